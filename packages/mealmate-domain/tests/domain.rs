use time::OffsetDateTime;

use mealmate_domain::{Coordinates, Event, project};

fn event(id: i64, user_id: &str) -> Event {
	Event {
		id,
		user_id: user_id.to_string(),
		restaurant_name: "Hot Pot House".to_string(),
		message: "loved the spicy broth".to_string(),
		schedule_time: "2024-06-01T18:30:00Z".to_string(),
		created_at: OffsetDateTime::from_unix_timestamp(1_717_000_000).expect("timestamp"),
		coordinates: Coordinates { latitude: 31.2, longitude: 121.5 },
	}
}

#[test]
fn document_id_space_equals_event_id_space() {
	let doc = project(&event(1, "xs90")).expect("projection");

	assert_eq!(doc.id, "1");
}

#[test]
fn event_round_trips_through_json() {
	let original = event(42, "xs90");
	let json = serde_json::to_string(&original).expect("serialize");
	let parsed: Event = serde_json::from_str(&json).expect("deserialize");

	assert_eq!(parsed.id, 42);
	assert_eq!(parsed.user_id, "xs90");
	assert_eq!(parsed.coordinates, original.coordinates);
	assert_eq!(parsed.created_at, original.created_at);
}

#[test]
fn created_at_metadata_is_rfc3339() {
	let doc = project(&event(3, "xs90")).expect("projection");

	OffsetDateTime::parse(
		&doc.metadata.created_at,
		&time::format_description::well_known::Rfc3339,
	)
	.expect("metadata created_at parses as RFC3339");
}
