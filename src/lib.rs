//! Tripvote - Group Trip Planning Assistant
//!
//! Collects travel preferences from a group, asks an AI for trip options
//! that balance them, lets the group vote, and expands the winner into a
//! day-by-day itinerary. Exposed over HTTP and a chat bot.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod state;
