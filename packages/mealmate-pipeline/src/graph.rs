use std::sync::Arc;

use mealmate_config::ChatProviderConfig;
use mealmate_service::{AgentService, ChatProvider};

use crate::{
	Error, Result, history, prompt,
	retriever::{EventSearchRetriever, RetrieveOptions, Retriever, ScopedRetriever},
	state::InvocationState,
};

const NODE_RETRIEVE: &str = "retrieve";
const NODE_AGGREGATE_HISTORY: &str = "aggregate-history";
const NODE_BUILD_PROMPT: &str = "build-prompt";
const NODE_GENERATE: &str = "generate";
const NODE_FORMAT_OUTPUT: &str = "format-output";

/// Declarative wiring of the recommendation pipeline.
///
/// Construction registers the stages and their edges; [`Self::compile`]
/// validates the wiring once and returns the reusable agent. The topology
/// is a plain chain, so triggering a node when any predecessor finishes
/// degenerates to running the stages in sequence, which is exactly what
/// the compiled agent does.
pub struct AgentGraph {
	nodes: Vec<&'static str>,
	edges: Vec<(&'static str, &'static str)>,
	retriever: Arc<dyn Retriever>,
	chat: Arc<dyn ChatProvider>,
	chat_cfg: ChatProviderConfig,
	top_k: u32,
}
impl AgentGraph {
	pub fn new(
		retriever: Arc<dyn Retriever>,
		chat: Arc<dyn ChatProvider>,
		chat_cfg: ChatProviderConfig,
		top_k: u32,
	) -> Self {
		let nodes = vec![
			NODE_RETRIEVE,
			NODE_AGGREGATE_HISTORY,
			NODE_BUILD_PROMPT,
			NODE_GENERATE,
			NODE_FORMAT_OUTPUT,
		];
		let edges = nodes.windows(2).map(|pair| (pair[0], pair[1])).collect();

		Self { nodes, edges, retriever, chat, chat_cfg, top_k }
	}

	/// Standard wiring on top of a service: scoped retrieval over the event
	/// collection, generation through the service's chat provider.
	pub fn for_service(service: Arc<AgentService>) -> Self {
		let chat = service.providers.chat.clone();
		let chat_cfg = service.cfg.providers.chat.clone();
		let top_k = service.cfg.retrieval.top_k;
		let retriever =
			Arc::new(ScopedRetriever::new(Arc::new(EventSearchRetriever::new(service))));

		Self::new(retriever, chat, chat_cfg, top_k)
	}

	pub fn compile(self) -> Result<CompiledAgent> {
		for (from, to) in &self.edges {
			if !self.nodes.contains(from) {
				return Err(Error::Graph(format!("edge references unknown node {from}")));
			}
			if !self.nodes.contains(to) {
				return Err(Error::Graph(format!("edge references unknown node {to}")));
			}
		}

		let chains = self
			.nodes
			.windows(2)
			.all(|pair| self.edges.contains(&(pair[0], pair[1])));

		if !chains || self.edges.len() != self.nodes.len() - 1 {
			return Err(Error::Graph("stages do not form a single chain".to_string()));
		}

		Ok(CompiledAgent {
			retriever: self.retriever,
			chat: self.chat,
			chat_cfg: self.chat_cfg,
			top_k: self.top_k,
		})
	}
}

/// Compiled, reusable pipeline. `invoke` is safe to call from any number of
/// tasks; every call gets its own invocation state.
pub struct CompiledAgent {
	retriever: Arc<dyn Retriever>,
	chat: Arc<dyn ChatProvider>,
	chat_cfg: ChatProviderConfig,
	top_k: u32,
}
impl CompiledAgent {
	pub async fn invoke(&self, raw_request: &str) -> Result<String> {
		let state = InvocationState::new();
		let options = RetrieveOptions { top_k: self.top_k, scope: None };

		tracing::debug!(node = NODE_RETRIEVE, "Running stage.");

		let docs = self.retriever.retrieve(raw_request, &state, options).await?;

		tracing::debug!(node = NODE_AGGREGATE_HISTORY, count = docs.len(), "Running stage.");

		let history = history::aggregate(&docs);

		tracing::debug!(node = NODE_BUILD_PROMPT, "Running stage.");

		let snapshot = state.snapshot();
		let messages = prompt::build_messages(history.as_deref(), &snapshot)?;

		tracing::debug!(node = NODE_GENERATE, "Running stage.");

		let completion = self.chat.complete(&self.chat_cfg, &messages).await?;

		tracing::debug!(node = NODE_FORMAT_OUTPUT, "Running stage.");

		if let Some(reasoning) = &completion.reasoning {
			tracing::debug!(reasoning = %reasoning, "Model reasoning trace.");
		}

		tracing::info!("AI response produced.");

		Ok(completion.content)
	}
}
