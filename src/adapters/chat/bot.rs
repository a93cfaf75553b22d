//! TripBot - turns chat lines into workflow calls and replies.

use std::fmt::Write as _;
use std::sync::Arc;

use crate::application::{
    CastVoteCommand, CastVoteHandler, ClearPreferencesCommand, ClearPreferencesHandler,
    FinalizeTripCommand, FinalizeTripHandler, FinalizeTripResult, GenerateRecommendationsCommand,
    GenerateRecommendationsHandler, ItineraryExpander, ListPreferencesHandler,
    ListPreferencesQuery, LlmGateway, SubmitPreferenceCommand, SubmitPreferenceHandler,
    VoteChoice,
};
use crate::config::{CapabilityProfile, ChatConfig};
use crate::domain::foundation::SessionKey;
use crate::domain::trip::{chunk_text, TallyEntry, TripOption, TripPlanningError, VoteReceipt};
use crate::ports::SessionStore;

use super::capabilities::Command;
use super::commands::{parse_input, parse_preference_args, parse_vote_args, ChatInput};

/// Where a chat line came from.
#[derive(Debug, Clone)]
pub struct ChatContext {
    /// The group (channel, guild, room) whose session the line belongs to.
    pub session_key: SessionKey,
    /// Display name of the author.
    pub user: String,
}

/// Command dispatcher for one bot instance.
pub struct TripBot {
    config: ChatConfig,
    gateway: Arc<LlmGateway>,
    submit: SubmitPreferenceHandler,
    list: ListPreferencesHandler,
    clear: ClearPreferencesHandler,
    recommend: GenerateRecommendationsHandler,
    vote: CastVoteHandler,
    finalize: FinalizeTripHandler,
}

impl TripBot {
    pub fn new(config: ChatConfig, store: Arc<dyn SessionStore>, gateway: Arc<LlmGateway>) -> Self {
        Self {
            submit: SubmitPreferenceHandler::new(store.clone()),
            list: ListPreferencesHandler::new(store.clone()),
            clear: ClearPreferencesHandler::new(store.clone()),
            recommend: GenerateRecommendationsHandler::new(store.clone(), gateway.clone()),
            vote: CastVoteHandler::new(store.clone()),
            finalize: FinalizeTripHandler::new(store, ItineraryExpander::new(gateway.clone())),
            gateway,
            config,
        }
    }

    pub fn profile(&self) -> CapabilityProfile {
        self.config.capabilities
    }

    /// Handles one incoming line.
    ///
    /// Returns the reply split into messages no longer than the configured
    /// chunk size. Empty when there is nothing to say.
    pub async fn respond(&self, ctx: &ChatContext, line: &str) -> Vec<String> {
        let reply = match parse_input(line, &self.config.command_prefix) {
            ChatInput::Empty => return Vec::new(),
            ChatInput::Text(text) => self.chat(ctx, text).await,
            ChatInput::Unknown { name } => self.unknown(name),
            ChatInput::Command { command, args } if command.is_enabled(self.profile()) => {
                tracing::debug!(
                    session = %ctx.session_key,
                    user = %ctx.user,
                    command = command.name(),
                    "Chat command"
                );
                self.run(ctx, command, args).await
            }
            ChatInput::Command { command, .. } => self.unknown(command.name()),
        };
        chunk_text(&reply, self.config.chunk_chars)
    }

    async fn run(&self, ctx: &ChatContext, command: Command, args: &str) -> String {
        match command {
            Command::Ping if args.is_empty() => "Pong!".to_string(),
            Command::Ping => format!("Pong! Your argument was {}", args),
            Command::Help => self.help(),
            Command::Prefs => self.submit_preference(ctx, args).await,
            Command::ShowPrefs => self.show_preferences(ctx).await,
            Command::ClearPrefs => self.clear_preferences(ctx).await,
            Command::RecommendTrips => self.recommend_trips(ctx).await,
            Command::Vote => self.cast_vote(ctx, args).await,
            Command::FinalizeTrip => self.finalize_trip(ctx).await,
        }
    }

    async fn chat(&self, ctx: &ChatContext, text: &str) -> String {
        match self
            .gateway
            .complete("chat", Some(&ctx.session_key), text, false)
            .await
        {
            Ok(reply) => reply,
            Err(err) => render_error(&err),
        }
    }

    fn unknown(&self, name: &str) -> String {
        format!(
            "Unknown command `{prefix}{name}`. Type `{prefix}help` to see what I can do.",
            prefix = self.config.command_prefix,
        )
    }

    fn help(&self) -> String {
        let prefix = &self.config.command_prefix;
        let mut help = String::from("**Commands:**");
        for command in Command::enabled(self.profile()) {
            let _ = write!(help, "\n`{}{}", prefix, command.name());
            if !command.usage().is_empty() {
                let _ = write!(help, " {}", command.usage());
            }
            let _ = write!(help, "` - {}", command.description());
        }
        help.push_str("\nAnything else is answered by the travel assistant.");
        help
    }

    async fn submit_preference(&self, ctx: &ChatContext, args: &str) -> String {
        let [location, budget, dates, mode] = match parse_preference_args(args) {
            Ok(fields) => fields,
            Err(err) => {
                return format!(
                    "Could not read your preferences: {}.\nUsage: `{}prefs {}`",
                    err,
                    self.config.command_prefix,
                    Command::Prefs.usage()
                )
            }
        };

        let result = self
            .submit
            .handle(SubmitPreferenceCommand {
                session_key: ctx.session_key.clone(),
                user: ctx.user.clone(),
                location: location.to_string(),
                budget: budget.to_string(),
                dates: dates.to_string(),
                mode: mode.to_string(),
            })
            .await;

        match result {
            Ok(result) => format!(
                "Saved preferences for {}: {}. ({} submitted so far)",
                ctx.user,
                result.preference.location(),
                result.preference_count
            ),
            Err(err) => render_error(&err),
        }
    }

    async fn show_preferences(&self, ctx: &ChatContext) -> String {
        let query = ListPreferencesQuery {
            session_key: ctx.session_key.clone(),
        };
        match self.list.handle(query).await {
            Ok(prefs) if prefs.is_empty() => "No preferences have been submitted yet.".to_string(),
            Ok(prefs) => {
                let mut out = String::from("**Submitted preferences:**");
                for pref in &prefs {
                    out.push('\n');
                    out.push_str(&pref.prompt_line());
                }
                out
            }
            Err(err) => render_error(&err),
        }
    }

    async fn clear_preferences(&self, ctx: &ChatContext) -> String {
        let cmd = ClearPreferencesCommand {
            session_key: ctx.session_key.clone(),
        };
        match self.clear.handle(cmd).await {
            Ok(result) => format!("Cleared {} preference(s).", result.cleared),
            Err(err) => render_error(&err),
        }
    }

    async fn recommend_trips(&self, ctx: &ChatContext) -> String {
        let cmd = GenerateRecommendationsCommand {
            session_key: ctx.session_key.clone(),
        };
        match self.recommend.handle(cmd).await {
            Ok(result) => {
                let mut out = render_trips(&result.trips);
                if Command::Vote.is_enabled(self.profile()) {
                    let _ = write!(
                        out,
                        "\n\nVote with `{}vote <number>`.",
                        self.config.command_prefix
                    );
                }
                out
            }
            Err(err) => render_error(&err),
        }
    }

    async fn cast_vote(&self, ctx: &ChatContext, args: &str) -> String {
        let ordinal = match parse_vote_args(args) {
            Ok(ordinal) => ordinal,
            Err(err) => {
                return format!(
                    "Could not read your vote: {}.\nUsage: `{}vote {}`",
                    err,
                    self.config.command_prefix,
                    Command::Vote.usage()
                )
            }
        };

        let cmd = CastVoteCommand {
            session_key: ctx.session_key.clone(),
            choice: VoteChoice::Ordinal(ordinal),
        };
        match self.vote.handle(cmd).await {
            Ok(receipt) => render_receipt(&ctx.user, &receipt),
            Err(err) => render_error(&err),
        }
    }

    async fn finalize_trip(&self, ctx: &ChatContext) -> String {
        let cmd = FinalizeTripCommand {
            session_key: ctx.session_key.clone(),
        };
        match self.finalize.handle(cmd).await {
            Ok(result) => render_finalized(&result),
            Err(err) => render_error(&err),
        }
    }
}

fn render_trips(trips: &[TripOption]) -> String {
    let mut out = String::from("**AI-Recommended Trips:**");
    for (i, trip) in trips.iter().enumerate() {
        let _ = write!(
            out,
            "\n{}. **{}** ({}, {}, {})",
            i + 1,
            trip.name,
            trip.dates,
            trip.trip_style,
            trip.budget
        );
        for activity in &trip.activities {
            let _ = write!(out, "\n   - {}", activity);
        }
    }
    out
}

fn render_tally(out: &mut String, tally: &[TallyEntry]) {
    for (i, entry) in tally.iter().enumerate() {
        let plural = if entry.votes == 1 { "" } else { "s" };
        let _ = write!(
            out,
            "\n{}. {}: {} vote{}",
            i + 1,
            entry.trip_name,
            entry.votes,
            plural
        );
    }
}

fn render_receipt(user: &str, receipt: &VoteReceipt) -> String {
    let mut out = format!("{} voted for **{}**.\n**Current votes:**", user, receipt.trip_name);
    render_tally(&mut out, &receipt.tally);
    out
}

fn render_finalized(result: &FinalizeTripResult) -> String {
    let mut out = format!("**Finalized trip: {}**\n**Final votes:**", result.trip.name);
    render_tally(&mut out, &result.tally);
    out.push_str("\n\n**Itinerary:**\n");
    out.push_str(&result.itinerary);
    out
}

/// User-facing text for a workflow failure. Malformed AI output is shown
/// verbatim so the group can see what went wrong.
fn render_error(err: &TripPlanningError) -> String {
    match err.raw_response() {
        Some(raw) => format!("Sorry, {}.\nRaw AI response:\n{}", err, raw),
        None => format!("Sorry, {}.", err),
    }
}
