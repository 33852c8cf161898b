use std::{collections::HashMap, sync::Arc};

use qdrant_client::qdrant::{
	Condition, Filter, Query, QueryPointsBuilder, ScoredPoint, Value, point_id::PointIdOptions,
	value::Kind,
};
use serde::{Deserialize, Serialize};

use mealmate_domain::{DocumentMetadata, EventDocument};
use mealmate_service::{AgentService, BoxFuture};

use crate::{Error, Result, state::InvocationState};

#[derive(Clone, Debug)]
pub struct RetrieveOptions {
	pub top_k: u32,
	pub scope: Option<ScopeFilter>,
}

/// Restricts a search to one user's documents. Rendered as a structured
/// qdrant match condition, never as an interpolated filter expression, so
/// the user id is treated as data regardless of its content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScopeFilter {
	pub user_id: String,
}
impl ScopeFilter {
	pub fn to_filter(&self) -> Filter {
		Filter::must([Condition::matches("user_id", self.user_id.clone())])
	}
}

/// Raw invocation request as callers send it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetrieverInput {
	pub user_id: String,
	pub user_prompt: String,
	pub username: String,
}

pub trait Retriever
where
	Self: Send + Sync,
{
	fn retrieve<'a>(
		&'a self,
		query: &'a str,
		state: &'a InvocationState,
		options: RetrieveOptions,
	) -> BoxFuture<'a, Result<Vec<EventDocument>>>;
}

/// Base retriever: embeds the query once and runs a similarity search over
/// the event collection, mapping payloads back into documents in relevance
/// order.
pub struct EventSearchRetriever {
	service: Arc<AgentService>,
}
impl EventSearchRetriever {
	pub fn new(service: Arc<AgentService>) -> Self {
		Self { service }
	}

	async fn search(
		&self,
		query: &str,
		options: &RetrieveOptions,
	) -> Result<Vec<EventDocument>> {
		let texts = [query.to_string()];
		let vectors = self
			.service
			.providers
			.embedding
			.embed(&self.service.cfg.providers.embedding, &texts)
			.await?;
		let vector = vectors.into_iter().next().ok_or_else(|| {
			Error::Provider("embedding provider returned no vectors".to_string())
		})?;

		if vector.len() != self.service.qdrant.vector_dim as usize {
			return Err(Error::Provider(format!(
				"embedding dimension {} does not match configured dimension {}",
				vector.len(),
				self.service.qdrant.vector_dim
			)));
		}

		let mut search = QueryPointsBuilder::new(self.service.qdrant.collection.clone())
			.query(Query::new_nearest(vector))
			.limit(options.top_k as u64)
			.with_payload(true);

		if let Some(scope) = &options.scope {
			search = search.filter(scope.to_filter());
		}

		let response = self
			.service
			.qdrant
			.client
			.query(search)
			.await
			.map_err(|err| Error::Search(err.to_string()))?;

		Ok(response.result.into_iter().filter_map(document_from_point).collect())
	}
}

impl Retriever for EventSearchRetriever {
	fn retrieve<'a>(
		&'a self,
		query: &'a str,
		_state: &'a InvocationState,
		options: RetrieveOptions,
	) -> BoxFuture<'a, Result<Vec<EventDocument>>> {
		Box::pin(async move { self.search(query, &options).await })
	}
}

/// Wraps a base retriever with request parsing and per-user scoping.
///
/// The raw invocation request is a JSON `RetrieverInput`. The wrapper
/// validates it, publishes the parsed fields into the invocation state for
/// the prompt stage, narrows the search scope to the requesting user and
/// then delegates with the actual prompt text.
pub struct ScopedRetriever {
	inner: Arc<dyn Retriever>,
}
impl ScopedRetriever {
	pub fn new(inner: Arc<dyn Retriever>) -> Self {
		Self { inner }
	}
}

impl Retriever for ScopedRetriever {
	fn retrieve<'a>(
		&'a self,
		query: &'a str,
		state: &'a InvocationState,
		options: RetrieveOptions,
	) -> BoxFuture<'a, Result<Vec<EventDocument>>> {
		Box::pin(async move {
			let input: RetrieverInput = serde_json::from_str(query)
				.map_err(|_| Error::InvalidInput("request is not valid JSON".to_string()))?;

			if input.user_prompt.trim().is_empty() {
				return Err(Error::InvalidInput("user_prompt is empty".to_string()));
			}
			if input.user_id.trim().is_empty() {
				return Err(Error::InvalidInput("user_id is empty".to_string()));
			}
			if input.username.trim().is_empty() {
				return Err(Error::InvalidInput("username is empty".to_string()));
			}

			state.publish(&input.user_id, &input.user_prompt, &input.username);

			let options = RetrieveOptions {
				scope: Some(ScopeFilter { user_id: input.user_id.clone() }),
				..options
			};

			self.inner.retrieve(&input.user_prompt, state, options).await
		})
	}
}

fn document_from_point(point: ScoredPoint) -> Option<EventDocument> {
	let id = match point.id.as_ref().and_then(|id| id.point_id_options.as_ref()) {
		Some(PointIdOptions::Num(id)) => id.to_string(),
		Some(PointIdOptions::Uuid(id)) => id.clone(),
		None => {
			tracing::warn!("Search hit has no point id; skipped.");

			return None;
		},
	};
	let Some(content) = payload_str(&point.payload, "content") else {
		tracing::warn!(id = %id, "Search hit has no content payload; skipped.");

		return None;
	};
	let mut metadata = match point.payload.get("metadata").and_then(|value| value.kind.as_ref())
	{
		Some(Kind::StructValue(fields)) => DocumentMetadata {
			user_id: payload_str(&fields.fields, "user_id").unwrap_or_default(),
			latitude: payload_f64(&fields.fields, "latitude").unwrap_or_default(),
			longitude: payload_f64(&fields.fields, "longitude").unwrap_or_default(),
			created_at: payload_str(&fields.fields, "created_at").unwrap_or_default(),
			schedule: payload_str(&fields.fields, "schedule").unwrap_or_default(),
		},
		_ => DocumentMetadata {
			user_id: String::new(),
			latitude: 0.0,
			longitude: 0.0,
			created_at: String::new(),
			schedule: String::new(),
		},
	};

	if metadata.user_id.is_empty()
		&& let Some(user_id) = payload_str(&point.payload, "user_id")
	{
		metadata.user_id = user_id;
	}

	Some(EventDocument { id, content, metadata })
}

fn payload_str(payload: &HashMap<String, Value>, key: &str) -> Option<String> {
	match payload.get(key)?.kind.as_ref() {
		Some(Kind::StringValue(text)) => Some(text.clone()),
		_ => None,
	}
}

fn payload_f64(payload: &HashMap<String, Value>, key: &str) -> Option<f64> {
	match payload.get(key)?.kind.as_ref() {
		Some(Kind::DoubleValue(value)) => Some(*value),
		Some(Kind::IntegerValue(value)) => Some(*value as f64),
		_ => None,
	}
}
