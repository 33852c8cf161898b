use mealmate_config::{Config, Error, validate};

fn base_toml() -> String {
	r#"
[service]
log_level = "info"

[storage.postgres]
dsn            = "postgres://localhost/mealmate"
pool_max_conns = 4

[storage.qdrant]
url        = "http://localhost:6334"
collection = "event"
vector_dim = 2560

[providers.embedding]
provider_id = "ark"
api_base    = "https://ark.example.com"
api_key     = "test-key"
path        = "/embeddings"
model       = "embedder-1"
dimensions  = 2560
timeout_ms  = 10000

[providers.chat]
provider_id = "ark"
api_base    = "https://ark.example.com"
api_key     = "test-key"
path        = "/chat/completions"
model       = "chat-1"
temperature = 0.7
timeout_ms  = 30000

[retrieval]
top_k = 3

[scheduler]
interval_secs = 60
lookback_secs = 60
"#
	.to_string()
}

fn parse(toml_text: &str) -> Config {
	toml::from_str(toml_text).expect("config parses")
}

fn expect_validation_error(toml_text: &str, needle: &str) {
	let cfg = parse(toml_text);
	let err = validate(&cfg).expect_err("expected validation failure");

	match err {
		Error::Validation { message } => {
			assert!(message.contains(needle), "unexpected message: {message}")
		},
		other => panic!("unexpected error: {other}"),
	}
}

#[test]
fn valid_config_passes() {
	let cfg = parse(&base_toml());

	validate(&cfg).expect("valid config");
}

#[test]
fn retrieval_and_scheduler_sections_default() {
	let trimmed = base_toml()
		.replace("[retrieval]\ntop_k = 3\n", "")
		.replace("[scheduler]\ninterval_secs = 60\nlookback_secs = 60\n", "");
	let cfg = parse(&trimmed);

	validate(&cfg).expect("defaults are valid");
	assert_eq!(cfg.retrieval.top_k, 3);
	assert_eq!(cfg.scheduler.interval_secs, 60);
	assert_eq!(cfg.scheduler.lookback_secs, 60);
}

#[test]
fn dimensions_must_match_vector_dim() {
	let toml_text = base_toml().replace("dimensions  = 2560", "dimensions  = 1024");

	expect_validation_error(&toml_text, "must match storage.qdrant.vector_dim");
}

#[test]
fn top_k_must_be_positive() {
	let toml_text = base_toml().replace("top_k = 3", "top_k = 0");

	expect_validation_error(&toml_text, "retrieval.top_k");
}

#[test]
fn interval_must_be_positive() {
	let toml_text = base_toml().replace("interval_secs = 60", "interval_secs = 0");

	expect_validation_error(&toml_text, "scheduler.interval_secs");
}

#[test]
fn lookback_must_cover_interval() {
	let toml_text = base_toml().replace("lookback_secs = 60", "lookback_secs = 30");

	expect_validation_error(&toml_text, "scheduler.lookback_secs");
}

#[test]
fn empty_api_key_is_rejected() {
	let toml_text = base_toml().replacen("api_key     = \"test-key\"", "api_key     = \"\"", 1);

	expect_validation_error(&toml_text, "api_key must be non-empty");
}

#[test]
fn empty_dsn_is_rejected() {
	let toml_text =
		base_toml().replace("dsn            = \"postgres://localhost/mealmate\"", "dsn            = \"\"");

	expect_validation_error(&toml_text, "storage.postgres.dsn");
}
