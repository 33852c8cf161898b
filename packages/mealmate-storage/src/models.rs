use time::OffsetDateTime;

use mealmate_domain::{Coordinates, Event};

/// Row shape of the externally-owned `event` table.
#[derive(Debug, sqlx::FromRow)]
pub struct EventRow {
	pub id: i64,
	pub user_id: String,
	pub restaurant_name: String,
	pub message: String,
	pub schedule_time: String,
	pub created_at: OffsetDateTime,
	pub latitude: f64,
	pub longitude: f64,
}
impl EventRow {
	pub fn into_event(self) -> Event {
		Event {
			id: self.id,
			user_id: self.user_id,
			restaurant_name: self.restaurant_name,
			message: self.message,
			schedule_time: self.schedule_time,
			created_at: self.created_at,
			coordinates: Coordinates { latitude: self.latitude, longitude: self.longitude },
		}
	}
}
