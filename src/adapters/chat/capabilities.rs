//! Chat commands and the profile that enables each one.

use crate::config::CapabilityProfile;

/// Every command the bot understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ping,
    Help,
    Prefs,
    ShowPrefs,
    ClearPrefs,
    RecommendTrips,
    Vote,
    FinalizeTrip,
}

impl Command {
    pub const ALL: [Command; 8] = [
        Command::Ping,
        Command::Help,
        Command::Prefs,
        Command::ShowPrefs,
        Command::ClearPrefs,
        Command::RecommendTrips,
        Command::Vote,
        Command::FinalizeTrip,
    ];

    /// Name typed after the prefix.
    pub fn name(self) -> &'static str {
        match self {
            Command::Ping => "ping",
            Command::Help => "help",
            Command::Prefs => "prefs",
            Command::ShowPrefs => "show_prefs",
            Command::ClearPrefs => "clear_prefs",
            Command::RecommendTrips => "recommend_trips",
            Command::Vote => "vote",
            Command::FinalizeTrip => "finalize_trip",
        }
    }

    /// Argument synopsis shown in help.
    pub fn usage(self) -> &'static str {
        match self {
            Command::Ping => "[text]",
            Command::Prefs => "<location>; <budget>; <dates>; <mode>",
            Command::Vote => "<trip number>",
            _ => "",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Command::Ping => "Pings the bot.",
            Command::Help => "Lists the available commands.",
            Command::Prefs => "Submits your travel preferences.",
            Command::ShowPrefs => "Shows everyone's submitted preferences.",
            Command::ClearPrefs => "Clears all submitted preferences.",
            Command::RecommendTrips => "AI recommends trips that balance everyone's preferences.",
            Command::Vote => "Votes for one of the recommended trips.",
            Command::FinalizeTrip => "Picks the most voted trip and writes its itinerary.",
        }
    }

    /// Smallest profile that enables this command.
    pub fn minimum_profile(self) -> CapabilityProfile {
        match self {
            Command::Ping | Command::Help | Command::RecommendTrips => CapabilityProfile::Minimal,
            Command::Prefs | Command::ShowPrefs | Command::ClearPrefs => CapabilityProfile::Classic,
            Command::Vote | Command::FinalizeTrip => CapabilityProfile::Full,
        }
    }

    pub fn is_enabled(self, profile: CapabilityProfile) -> bool {
        profile >= self.minimum_profile()
    }

    /// Looks a command up by name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Command> {
        Command::ALL
            .into_iter()
            .find(|command| command.name().eq_ignore_ascii_case(name))
    }

    /// Commands enabled under `profile`, in help order.
    pub fn enabled(profile: CapabilityProfile) -> impl Iterator<Item = Command> {
        Command::ALL
            .into_iter()
            .filter(move |command| command.is_enabled(profile))
    }
}
