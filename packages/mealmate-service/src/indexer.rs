use qdrant_client::{
	client::Payload,
	qdrant::{PointStruct, UpsertPointsBuilder},
};

use mealmate_domain::{Event, EventDocument};

use crate::{AgentService, ServiceError, ServiceResult};

impl AgentService {
	/// Embeds and upserts a batch of event documents into the vector index.
	///
	/// Writes happen point-by-point under the same numeric id as the source
	/// event row, so re-indexing an event overwrites its previous point
	/// instead of duplicating it. The whole batch is validated before any
	/// side effect runs.
	pub async fn upsert_documents(&self, docs: &[EventDocument]) -> ServiceResult<usize> {
		if docs.is_empty() {
			return Ok(0);
		}

		let mut ids = Vec::with_capacity(docs.len());

		for doc in docs {
			if doc.metadata.user_id.trim().is_empty() {
				return Err(ServiceError::InvalidInput {
					message: format!("document {} has an empty user_id", doc.id),
				});
			}

			let id: u64 = doc.id.parse().map_err(|_| ServiceError::InvalidInput {
				message: format!("document id {} is not a valid point id", doc.id),
			})?;

			ids.push(id);
		}

		let texts: Vec<String> = docs.iter().map(|doc| doc.content.clone()).collect();
		let vectors =
			self.providers.embedding.embed(&self.cfg.providers.embedding, &texts).await?;

		if vectors.len() != docs.len() {
			return Err(ServiceError::Provider {
				message: format!(
					"embedding count {} does not match document count {}",
					vectors.len(),
					docs.len()
				),
			});
		}

		let expected_dim = self.qdrant.vector_dim as usize;
		let mut points = Vec::with_capacity(docs.len());

		for ((doc, id), vector) in docs.iter().zip(ids).zip(vectors) {
			if vector.len() != expected_dim {
				return Err(ServiceError::Provider {
					message: format!(
						"embedding dimension {} does not match configured dimension {expected_dim}",
						vector.len()
					),
				});
			}

			let metadata = serde_json::to_value(&doc.metadata)
				.map_err(|err| ServiceError::Storage { message: err.to_string() })?;
			let payload = Payload::try_from(serde_json::json!({
				"content": doc.content,
				"user_id": doc.metadata.user_id,
				"metadata": metadata,
			}))
			.map_err(|err| ServiceError::Storage { message: err.to_string() })?;

			points.push(PointStruct::new(id, vector, payload));
		}

		self.qdrant
			.client
			.upsert_points(
				UpsertPointsBuilder::new(self.qdrant.collection.clone(), points).wait(true),
			)
			.await?;

		tracing::debug!(count = docs.len(), "Upserted event documents.");

		Ok(docs.len())
	}

	/// Projects events into documents and indexes them in one batch.
	pub async fn sync_events(&self, events: &[Event]) -> ServiceResult<usize> {
		let docs = events
			.iter()
			.map(mealmate_domain::project)
			.collect::<Result<Vec<_>, _>>()?;

		self.upsert_documents(&docs).await
	}
}
