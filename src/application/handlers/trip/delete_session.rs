//! DeleteSessionHandler - Command handler that drops a session entirely.

use std::sync::Arc;

use crate::domain::foundation::SessionKey;
use crate::domain::trip::TripPlanningError;
use crate::ports::SessionStore;

/// Command to delete a session.
#[derive(Debug, Clone)]
pub struct DeleteSessionCommand {
    pub session_key: SessionKey,
}

/// Handler for deleting sessions.
pub struct DeleteSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl DeleteSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Returns `true` if the session existed.
    pub async fn handle(&self, cmd: DeleteSessionCommand) -> Result<bool, TripPlanningError> {
        let _guard = self.store.lock(&cmd.session_key).await;
        let existed = self.store.delete(&cmd.session_key).await?;
        if existed {
            tracing::info!(session = %cmd.session_key, "Session deleted");
        }
        Ok(existed)
    }
}
