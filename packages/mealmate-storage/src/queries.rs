use time::OffsetDateTime;

use mealmate_domain::Event;

use crate::{Result, db::Db, models::EventRow};

const EVENT_COLUMNS: &str = "\
id,
user_id,
restaurant_name,
message,
schedule_time,
created_at,
latitude,
longitude";

pub async fn events_for_user(db: &Db, user_id: &str) -> Result<Vec<Event>> {
	if user_id.trim().is_empty() {
		return Err(crate::Error::InvalidArgument("user_id must be non-empty.".to_string()));
	}

	let rows = sqlx::query_as::<_, EventRow>(&format!(
		"\
SELECT
{EVENT_COLUMNS}
FROM event
WHERE user_id = $1
ORDER BY created_at ASC"
	))
	.bind(user_id)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows.into_iter().map(EventRow::into_event).collect())
}

pub async fn events_created_since(db: &Db, since: OffsetDateTime) -> Result<Vec<Event>> {
	let rows = sqlx::query_as::<_, EventRow>(&format!(
		"\
SELECT
{EVENT_COLUMNS}
FROM event
WHERE created_at >= $1
ORDER BY created_at ASC"
	))
	.bind(since)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows.into_iter().map(EventRow::into_event).collect())
}
