//! Poker rules engine - hand FSM and the rules it enforces.
//!
//! This module provides:
//! - Declarative game definitions and a handful of named presets
//! - Dealing, betting and opening rules driven by those definitions
//! - Side pots, showdown and payout
//! - The per-hand finite state machine tying it all together

// Submodules
pub mod betting;
pub mod constants;
pub mod dealing;
pub mod definition;
pub mod entities;
pub mod errors;
pub mod functional;
pub mod opening;
pub mod presets;
pub mod showdown;
pub mod state_machine;
pub mod states;

pub use definition::{BettingStructure, GameDefinition, GameDefinitionBuilder, Opening, ShowdownFallback, StreetSpec};
pub use errors::{ConfigurationError, HandError, HandResult, IllegalActionError, InsufficientCardsError};
pub use showdown::{HandOutcome, PotAward, SeatOutcome, ShareAward};
pub use state_machine::{HandData, HandPhase, PhaseFlow, PokerHand};
