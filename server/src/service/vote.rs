use tracing::debug;

use crate::database::SharedStore;
use crate::error::AppResult;

#[derive(Clone)]
pub struct VoteService {
    store: SharedStore,
}

impl VoteService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Adds one vote to `option_id`. An id that matches nothing is not an error.
    pub async fn record_vote(&self, option_id: i64) -> AppResult<()> {
        let updated = self.store.increment_votes(option_id).await?;
        if updated == 0 {
            debug!(option_id, "Vote for unknown option ignored");
        } else {
            debug!(option_id, "Vote recorded");
        }
        Ok(())
    }
}
