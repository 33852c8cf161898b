use std::sync::Mutex;

/// Per-invocation shared state.
///
/// The retriever publishes the parsed request fields here and the prompt
/// stage reads them back later in the same invocation. One instance exists
/// per `invoke` call, never shared across invocations. Writes are
/// last-writer-wins.
#[derive(Debug, Default)]
pub struct InvocationState {
	fields: Mutex<RequestFields>,
}

#[derive(Debug, Default)]
struct RequestFields {
	user_id: Option<String>,
	user_prompt: Option<String>,
	username: Option<String>,
}

/// Point-in-time copy of the published fields.
#[derive(Clone, Debug, Default)]
pub struct RequestSnapshot {
	pub user_id: Option<String>,
	pub user_prompt: Option<String>,
	pub username: Option<String>,
}

impl InvocationState {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn publish(&self, user_id: &str, user_prompt: &str, username: &str) {
		let mut fields = self.fields.lock().unwrap_or_else(|err| err.into_inner());

		fields.user_id = Some(user_id.to_string());
		fields.user_prompt = Some(user_prompt.to_string());
		fields.username = Some(username.to_string());
	}

	pub fn snapshot(&self) -> RequestSnapshot {
		let fields = self.fields.lock().unwrap_or_else(|err| err.into_inner());

		RequestSnapshot {
			user_id: fields.user_id.clone(),
			user_prompt: fields.user_prompt.clone(),
			username: fields.username.clone(),
		}
	}
}
