//! Planning session aggregate.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::ballot::{Ballot, TallyEntry};
use super::errors::TripPlanningError;
use super::option::TripOption;
use super::preference::PreferenceRecord;

/// Everything a group has contributed to one planning session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripSession {
    preferences: Vec<PreferenceRecord>,
    recommended_trips: Option<Vec<TripOption>>,
    ballot: Ballot,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Outcome of a successful vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoteReceipt {
    pub trip_name: String,
    /// Full tally after the vote, in trip order.
    pub tally: Vec<TallyEntry>,
}

impl Default for TripSession {
    fn default() -> Self {
        Self::new()
    }
}

impl TripSession {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            preferences: Vec::new(),
            recommended_trips: None,
            ballot: Ballot::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn preferences(&self) -> &[PreferenceRecord] {
        &self.preferences
    }

    pub fn recommended_trips(&self) -> Option<&[TripOption]> {
        self.recommended_trips.as_deref()
    }

    pub fn ballot(&self) -> &Ballot {
        &self.ballot
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Appends a preference, keeping submission order.
    pub fn add_preference(&mut self, preference: PreferenceRecord) {
        self.preferences.push(preference);
        self.touch();
    }

    /// Drops every preference. Trips and votes are left alone.
    ///
    /// Returns how many preferences were removed.
    pub fn clear_preferences(&mut self) -> usize {
        let cleared = self.preferences.len();
        self.preferences.clear();
        self.touch();
        cleared
    }

    /// Replaces the recommended trips and opens a fresh ballot for them.
    pub fn install_recommendations(&mut self, trips: Vec<TripOption>) {
        self.ballot = Ballot::for_trips(&trips);
        self.recommended_trips = Some(trips);
        self.touch();
    }

    /// Votes for the trip at a 1-based position.
    pub fn cast_vote(&mut self, ordinal: usize) -> Result<VoteReceipt, TripPlanningError> {
        let trip_name = self.ballot.cast(ordinal)?.trip_name.clone();
        self.touch();
        Ok(self.receipt(trip_name))
    }

    /// Votes for the trip with the given name.
    pub fn cast_vote_by_name(&mut self, trip_name: &str) -> Result<VoteReceipt, TripPlanningError> {
        let trip_name = self.ballot.cast_by_name(trip_name)?.trip_name.clone();
        self.touch();
        Ok(self.receipt(trip_name))
    }

    /// The trip with the most votes, earliest trip winning ties.
    ///
    /// # Errors
    ///
    /// Returns `NoVotesCast` when there is no ballot or every count is zero.
    pub fn winner(&self) -> Result<&TripOption, TripPlanningError> {
        let leader = self.ballot.leader().ok_or(TripPlanningError::NoVotesCast)?;

        self.recommended_trips
            .iter()
            .flatten()
            .find(|trip| trip.name == leader.trip_name)
            .ok_or(TripPlanningError::NoActiveBallot)
    }

    fn receipt(&self, trip_name: String) -> VoteReceipt {
        VoteReceipt {
            trip_name,
            tally: self.ballot.entries().to_vec(),
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
