use serde::{Deserialize, Serialize};

use mealmate_storage::queries;

use crate::{AgentService, ServiceError, ServiceResult};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SyncRequest {
	pub user_id: String,
}

impl AgentService {
	/// Re-indexes every stored event for one user.
	///
	/// A user with no events is treated as a failed request rather than a
	/// silent no-op, so operators notice typos in the user id.
	pub async fn manual_resync(&self, req: SyncRequest) -> ServiceResult<usize> {
		if req.user_id.trim().is_empty() {
			return Err(ServiceError::InvalidInput {
				message: "user_id must be non-empty".to_string(),
			});
		}

		let events = queries::events_for_user(&self.db, &req.user_id).await?;

		if events.is_empty() {
			return Err(ServiceError::NoEventsFound { user_id: req.user_id });
		}

		let count = self.sync_events(&events).await?;

		tracing::info!(user_id = %req.user_id, count, "Manual resync completed.");

		Ok(count)
	}
}
