#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid input: {0}")]
	InvalidInput(String),
	#[error("Missing state field {0}.")]
	MissingState(&'static str),
	#[error("Provider error: {0}")]
	Provider(String),
	#[error("Search error: {0}")]
	Search(String),
	#[error("Graph error: {0}")]
	Graph(String),
}
impl From<mealmate_service::ServiceError> for Error {
	fn from(err: mealmate_service::ServiceError) -> Self {
		use mealmate_service::ServiceError;

		match err {
			ServiceError::InvalidInput { message } => Self::InvalidInput(message),
			ServiceError::Provider { message } => Self::Provider(message),
			ServiceError::Qdrant { message } => Self::Search(message),
			other => Self::Search(other.to_string()),
		}
	}
}

impl From<color_eyre::Report> for Error {
	fn from(err: color_eyre::Report) -> Self {
		Self::Provider(err.to_string())
	}
}
