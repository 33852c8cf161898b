use std::time::Duration;

use color_eyre::{Result, eyre};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
	System,
	User,
	Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
	pub role: Role,
	pub content: String,
}
impl ChatMessage {
	pub fn system(content: impl Into<String>) -> Self {
		Self { role: Role::System, content: content.into() }
	}

	pub fn user(content: impl Into<String>) -> Self {
		Self { role: Role::User, content: content.into() }
	}
}

/// A single completion. Some models attach a reasoning trace next to the
/// answer; it is carried separately and never merged into `content`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatCompletion {
	pub content: String,
	pub reasoning: Option<String>,
}

pub async fn complete(
	cfg: &mealmate_config::ChatProviderConfig,
	messages: &[ChatMessage],
) -> Result<ChatCompletion> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"model": cfg.model,
		"temperature": cfg.temperature,
		"messages": messages,
	});
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_chat_response(json)
}

fn parse_chat_response(json: Value) -> Result<ChatCompletion> {
	let message = json
		.get("choices")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.and_then(|choice| choice.get("message"))
		.ok_or_else(|| eyre::eyre!("Chat response is missing choices[0].message."))?;
	let content = message
		.get("content")
		.and_then(|c| c.as_str())
		.ok_or_else(|| eyre::eyre!("Chat message is missing content."))?
		.to_string();
	let reasoning = message
		.get("reasoning_content")
		.and_then(|c| c.as_str())
		.filter(|text| !text.is_empty())
		.map(str::to_string);

	Ok(ChatCompletion { content, reasoning })
}
