#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Event {id} has an empty {field}.")]
	EmptyField { id: i64, field: &'static str },
	#[error("Failed to format created_at for event {id}.")]
	Timestamp { id: i64 },
}
