//! CastVoteHandler - Command handler for voting on a recommended trip.

use std::sync::Arc;

use crate::domain::foundation::SessionKey;
use crate::domain::trip::{TripPlanningError, VoteReceipt};
use crate::ports::SessionStore;

/// Which trip a vote is for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteChoice {
    /// 1-based position in the recommendation list.
    Ordinal(usize),
    /// Exact trip name.
    Name(String),
}

/// Command to cast one vote.
#[derive(Debug, Clone)]
pub struct CastVoteCommand {
    pub session_key: SessionKey,
    pub choice: VoteChoice,
}

/// Handler for casting votes.
///
/// The read-increment-write runs under the session lock, so concurrent
/// votes are never lost.
pub struct CastVoteHandler {
    store: Arc<dyn SessionStore>,
}

impl CastVoteHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: CastVoteCommand) -> Result<VoteReceipt, TripPlanningError> {
        let _guard = self.store.lock(&cmd.session_key).await;
        let mut session = self
            .store
            .get(&cmd.session_key)
            .await?
            .ok_or(TripPlanningError::NoActiveBallot)?;

        let receipt = match &cmd.choice {
            VoteChoice::Ordinal(ordinal) => session.cast_vote(*ordinal)?,
            VoteChoice::Name(name) => session.cast_vote_by_name(name)?,
        };
        self.store.put(&cmd.session_key, session).await?;

        tracing::info!(
            session = %cmd.session_key,
            trip = %receipt.trip_name,
            "Vote recorded"
        );
        Ok(receipt)
    }
}
