//! Vote tally for a batch of recommended trips.

use serde::Serialize;

use super::errors::TripPlanningError;
use super::option::TripOption;

/// Vote count for one trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TallyEntry {
    pub trip_name: String,
    pub votes: u32,
}

/// Per-session mapping from trip name to vote count.
///
/// Entries keep the order the AI returned the trips in. That order drives
/// both the tally display and the tie-break in [`Ballot::leader`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Ballot {
    entries: Vec<TallyEntry>,
}

impl Ballot {
    /// Opens a ballot with a zero count for every trip name.
    pub fn for_trips(trips: &[TripOption]) -> Self {
        let mut entries: Vec<TallyEntry> = Vec::with_capacity(trips.len());
        for trip in trips {
            if entries.iter().all(|e| e.trip_name != trip.name) {
                entries.push(TallyEntry {
                    trip_name: trip.name.clone(),
                    votes: 0,
                });
            }
        }
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Current counts in trip order.
    pub fn entries(&self) -> &[TallyEntry] {
        &self.entries
    }

    pub fn votes_for(&self, trip_name: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.trip_name == trip_name)
            .map(|e| e.votes)
    }

    pub fn total_votes(&self) -> u32 {
        self.entries.iter().map(|e| e.votes).sum()
    }

    /// Adds one vote for the trip at a 1-based position.
    ///
    /// # Errors
    ///
    /// - `NoActiveBallot` if the ballot is empty
    /// - `OutOfRange` if `ordinal` is 0 or past the last trip
    pub fn cast(&mut self, ordinal: usize) -> Result<&TallyEntry, TripPlanningError> {
        if self.entries.is_empty() {
            return Err(TripPlanningError::NoActiveBallot);
        }
        let count = self.entries.len();
        if ordinal == 0 || ordinal > count {
            return Err(TripPlanningError::OutOfRange { ordinal, count });
        }

        let entry = &mut self.entries[ordinal - 1];
        entry.votes = entry.votes.saturating_add(1);
        Ok(entry)
    }

    /// Adds one vote for the trip with the given name.
    ///
    /// # Errors
    ///
    /// - `NoActiveBallot` if the ballot is empty
    /// - `UnknownTrip` if no trip has that name
    pub fn cast_by_name(&mut self, trip_name: &str) -> Result<&TallyEntry, TripPlanningError> {
        if self.entries.is_empty() {
            return Err(TripPlanningError::NoActiveBallot);
        }
        let position = self
            .entries
            .iter()
            .position(|e| e.trip_name == trip_name)
            .ok_or_else(|| TripPlanningError::UnknownTrip(trip_name.to_string()))?;

        self.cast(position + 1)
    }

    /// Entry with the most votes; the earliest one wins a tie.
    ///
    /// `None` when nobody has voted yet.
    pub fn leader(&self) -> Option<&TallyEntry> {
        let mut leader: Option<&TallyEntry> = None;
        for entry in self.entries.iter().filter(|e| e.votes > 0) {
            if leader.map_or(true, |best| entry.votes > best.votes) {
                leader = Some(entry);
            }
        }
        leader
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip(name: &str) -> TripOption {
        TripOption {
            name: name.to_string(),
            dates: "d".to_string(),
            trip_style: "s".to_string(),
            budget: "b".to_string(),
            activities: vec![],
        }
    }

    fn abc() -> Ballot {
        Ballot::for_trips(&[trip("A"), trip("B"), trip("C")])
    }

    #[test]
    fn new_ballot_starts_at_zero_in_trip_order() {
        let ballot = abc();
        let names: Vec<&str> = ballot.entries().iter().map(|e| e.trip_name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(ballot.total_votes(), 0);
        assert!(ballot.leader().is_none());
    }

    #[test]
    fn cast_increments_by_ordinal() {
        let mut ballot = abc();
        let entry = ballot.cast(2).unwrap();
        assert_eq!(entry.trip_name, "B");
        assert_eq!(entry.votes, 1);
    }

    #[test]
    fn ordinal_zero_and_past_end_are_out_of_range() {
        let mut ballot = abc();
        assert_eq!(
            ballot.cast(0).unwrap_err(),
            TripPlanningError::OutOfRange { ordinal: 0, count: 3 }
        );
        assert_eq!(
            ballot.cast(4).unwrap_err(),
            TripPlanningError::OutOfRange { ordinal: 4, count: 3 }
        );
        assert_eq!(ballot.total_votes(), 0);
    }

    #[test]
    fn empty_ballot_has_no_active_vote() {
        let mut ballot = Ballot::default();
        assert_eq!(ballot.cast(1).unwrap_err(), TripPlanningError::NoActiveBallot);
        assert_eq!(
            ballot.cast_by_name("A").unwrap_err(),
            TripPlanningError::NoActiveBallot
        );
    }

    #[test]
    fn cast_by_name_finds_trip() {
        let mut ballot = abc();
        ballot.cast_by_name("C").unwrap();
        assert_eq!(ballot.votes_for("C"), Some(1));
        assert_eq!(
            ballot.cast_by_name("Z").unwrap_err(),
            TripPlanningError::UnknownTrip("Z".to_string())
        );
    }

    #[test]
    fn leader_is_highest_count() {
        let mut ballot = abc();
        for ordinal in [1, 2, 1, 3, 1] {
            ballot.cast(ordinal).unwrap();
        }
        let leader = ballot.leader().unwrap();
        assert_eq!(leader.trip_name, "A");
        assert_eq!(leader.votes, 3);
        assert_eq!(ballot.votes_for("B"), Some(1));
        assert_eq!(ballot.votes_for("C"), Some(1));
    }

    #[test]
    fn tie_goes_to_first_in_trip_order() {
        let mut ballot = abc();
        ballot.cast(3).unwrap();
        ballot.cast(2).unwrap();
        assert_eq!(ballot.leader().unwrap().trip_name, "B");
    }

    #[test]
    fn repeated_names_share_one_entry() {
        let ballot = Ballot::for_trips(&[trip("A"), trip("A")]);
        assert_eq!(ballot.len(), 1);
    }

    #[test]
    fn serializes_as_ordered_list() {
        let mut ballot = abc();
        ballot.cast(1).unwrap();
        let json = serde_json::to_value(&ballot).unwrap();
        assert_eq!(json[0]["trip_name"], "A");
        assert_eq!(json[0]["votes"], 1);
        assert_eq!(json[2]["trip_name"], "C");
    }
}
