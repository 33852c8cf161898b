use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
	pub latitude: f64,
	pub longitude: f64,
}

/// A restaurant visit/message record. Created externally; read-only here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
	pub id: i64,
	pub user_id: String,
	pub restaurant_name: String,
	pub message: String,
	pub schedule_time: String,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
	pub coordinates: Coordinates,
}
