use std::sync::{
	Arc, Mutex,
	atomic::{AtomicUsize, Ordering},
};

use mealmate_config::ChatProviderConfig;
use mealmate_domain::{DocumentMetadata, EventDocument};
use mealmate_pipeline::{
	AgentGraph, Error, InvocationState, RetrieveOptions, Retriever, ScopeFilter,
	ScopedRetriever,
};
use mealmate_providers::chat::{ChatCompletion, ChatMessage};
use mealmate_service::{BoxFuture, ChatProvider};

fn doc(id: &str, content: &str) -> EventDocument {
	EventDocument {
		id: id.to_string(),
		content: content.to_string(),
		metadata: DocumentMetadata {
			user_id: "xs90".to_string(),
			latitude: 40.7,
			longitude: -74.0,
			created_at: "2026-01-01T00:00:00Z".to_string(),
			schedule: "dinner".to_string(),
		},
	}
}

#[derive(Default)]
struct RecordingRetriever {
	calls: AtomicUsize,
	seen: Mutex<Option<(String, RetrieveOptions)>>,
	docs: Vec<EventDocument>,
}

impl Retriever for RecordingRetriever {
	fn retrieve<'a>(
		&'a self,
		query: &'a str,
		_state: &'a InvocationState,
		options: RetrieveOptions,
	) -> BoxFuture<'a, mealmate_pipeline::Result<Vec<EventDocument>>> {
		Box::pin(async move {
			self.calls.fetch_add(1, Ordering::SeqCst);
			*self.seen.lock().unwrap() = Some((query.to_string(), options));

			Ok(self.docs.clone())
		})
	}
}

#[derive(Default)]
struct RecordingChat {
	seen: Mutex<Vec<ChatMessage>>,
	reasoning: Option<String>,
}

impl ChatProvider for RecordingChat {
	fn complete<'a>(
		&'a self,
		_cfg: &'a ChatProviderConfig,
		messages: &'a [ChatMessage],
	) -> BoxFuture<'a, color_eyre::Result<ChatCompletion>> {
		Box::pin(async move {
			*self.seen.lock().unwrap() = messages.to_vec();

			Ok(ChatCompletion {
				content: "[{\"restaurant_name\":\"Hot Pot House\"}]".to_string(),
				reasoning: self.reasoning.clone(),
			})
		})
	}
}

fn chat_cfg() -> ChatProviderConfig {
	ChatProviderConfig {
		provider_id: "openai".to_string(),
		api_base: "http://localhost:9".to_string(),
		api_key: "test".to_string(),
		path: "/v1/chat/completions".to_string(),
		model: "test-model".to_string(),
		temperature: 0.2,
		timeout_ms: 1_000,
		default_headers: serde_json::Map::new(),
	}
}

fn request() -> String {
	serde_json::json!({
		"user_id": "xs90",
		"user_prompt": "want noodles",
		"username": "Xavier",
	})
	.to_string()
}

#[tokio::test]
async fn invoke_runs_the_full_chain() {
	let retriever = Arc::new(RecordingRetriever {
		docs: vec![doc("1", "Hot Pot House loved the spicy broth")],
		..RecordingRetriever::default()
	});
	let chat = Arc::new(RecordingChat::default());
	let agent = AgentGraph::new(
		Arc::new(ScopedRetriever::new(retriever.clone())),
		chat.clone(),
		chat_cfg(),
		3,
	)
	.compile()
	.expect("compile");
	let output = agent.invoke(&request()).await.expect("invoke");

	assert_eq!(output, "[{\"restaurant_name\":\"Hot Pot House\"}]");

	let (query, options) = retriever.seen.lock().unwrap().clone().expect("retriever ran");

	assert_eq!(query, "want noodles");
	assert_eq!(options.top_k, 3);
	assert_eq!(options.scope, Some(ScopeFilter { user_id: "xs90".to_string() }));

	let messages = chat.seen.lock().unwrap().clone();

	assert_eq!(messages.len(), 2);
	assert!(
		messages[0]
			.content
			.contains("Event history:\nHot Pot House loved the spicy broth\n")
	);
	assert_eq!(messages[1].content, "I'm Xavier, want noodles");
}

#[tokio::test]
async fn invalid_json_fails_before_the_base_retriever_runs() {
	let retriever = Arc::new(RecordingRetriever::default());
	let chat = Arc::new(RecordingChat::default());
	let agent =
		AgentGraph::new(Arc::new(ScopedRetriever::new(retriever.clone())), chat, chat_cfg(), 3)
			.compile()
			.expect("compile");

	assert!(matches!(agent.invoke("not json").await, Err(Error::InvalidInput(_))));
	assert_eq!(retriever.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn empty_request_fields_are_rejected() {
	let retriever = Arc::new(RecordingRetriever::default());
	let chat = Arc::new(RecordingChat::default());
	let agent =
		AgentGraph::new(Arc::new(ScopedRetriever::new(retriever.clone())), chat, chat_cfg(), 3)
			.compile()
			.expect("compile");

	for field in ["user_id", "user_prompt", "username"] {
		let mut request = serde_json::json!({
			"user_id": "xs90",
			"user_prompt": "want noodles",
			"username": "Xavier",
		});

		request[field] = serde_json::Value::String(" ".to_string());

		let raw = request.to_string();

		assert!(matches!(agent.invoke(&raw).await, Err(Error::InvalidInput(_))));
	}

	assert_eq!(retriever.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn no_history_still_reaches_the_model() {
	let retriever = Arc::new(RecordingRetriever::default());
	let chat = Arc::new(RecordingChat::default());
	let agent = AgentGraph::new(
		Arc::new(ScopedRetriever::new(retriever)),
		chat.clone(),
		chat_cfg(),
		3,
	)
	.compile()
	.expect("compile");

	agent.invoke(&request()).await.expect("invoke");

	let messages = chat.seen.lock().unwrap().clone();

	assert!(messages[0].content.contains("Event history:\n\n"));
}

#[tokio::test]
async fn reasoning_is_never_merged_into_the_output() {
	let retriever = Arc::new(RecordingRetriever::default());
	let chat = Arc::new(RecordingChat {
		reasoning: Some("the user likes noodles".to_string()),
		..RecordingChat::default()
	});
	let agent = AgentGraph::new(Arc::new(ScopedRetriever::new(retriever)), chat, chat_cfg(), 3)
		.compile()
		.expect("compile");
	let output = agent.invoke(&request()).await.expect("invoke");

	assert!(!output.contains("the user likes noodles"));
}
