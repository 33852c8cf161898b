use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;

use crate::{Error, Result, event::Event};

/// Structured payload persisted next to a document's content. The field set
/// is a contract: `user_id` drives scope filtering, the rest is surfaced to
/// consumers of search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
	pub user_id: String,
	pub latitude: f64,
	pub longitude: f64,
	pub created_at: String,
	pub schedule: String,
}

/// Indexable projection of an [`Event`]. Shares the event's id space, so
/// re-indexing the same event overwrites rather than duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDocument {
	pub id: String,
	pub content: String,
	pub metadata: DocumentMetadata,
}

/// Maps an event to its indexable document. Pure; re-running it on the same
/// event always yields the same document. Content is the restaurant name
/// followed by the message, which is the searchable text consumers rank on.
pub fn project(event: &Event) -> Result<EventDocument> {
	if event.user_id.trim().is_empty() {
		return Err(Error::EmptyField { id: event.id, field: "user_id" });
	}

	let created_at =
		event.created_at.format(&Rfc3339).map_err(|_| Error::Timestamp { id: event.id })?;

	Ok(EventDocument {
		id: event.id.to_string(),
		content: format!("{} {}", event.restaurant_name, event.message),
		metadata: DocumentMetadata {
			user_id: event.user_id.clone(),
			latitude: event.coordinates.latitude,
			longitude: event.coordinates.longitude,
			created_at,
			schedule: event.schedule_time.clone(),
		},
	})
}
