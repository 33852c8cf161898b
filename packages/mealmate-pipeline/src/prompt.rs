use mealmate_providers::chat::ChatMessage;

use crate::{Error, Result, state::RequestSnapshot};

/// Builds the two-message recommendation prompt.
///
/// The retriever publishes `username` and `user_prompt` earlier in the same
/// invocation; missing fields here mean the stages ran out of order, which
/// is an internal wiring error rather than bad caller input.
pub fn build_messages(
	history: Option<&str>,
	snapshot: &RequestSnapshot,
) -> Result<Vec<ChatMessage>> {
	let username = snapshot.username.as_deref().ok_or(Error::MissingState("username"))?;
	let user_prompt =
		snapshot.user_prompt.as_deref().ok_or(Error::MissingState("user_prompt"))?;
	let history = history.unwrap_or("");
	let system = format!(
		"You are an intelligent dining recommendation assistant. Your task is to recommend \
		suitable dining options based on the user's historical event records. Please ensure \
		the recommendations match the user's taste and preferences.\nEvent history:\n\
		{history}\n Your answer should be a JSON string, containing a list of objects, with \
		each object containing \"restaurant_name\", \"recommendation_rating\", \
		\"main_dishes\", \"short_reason\"."
	);
	let query = format!("I'm {username}, {user_prompt}");

	Ok(vec![ChatMessage::system(system), ChatMessage::user(query)])
}
