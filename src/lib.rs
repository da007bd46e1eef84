//! # Poker Rules
//!
//! A poker rules engine that plays one hand of any variant described by a
//! declarative [`GameDefinition`].
//!
//! The same finite state machine (FSM) plays flop games, stud games and
//! draw games, high-only or split hi/lo, by interpreting a small set of
//! per-street primitives instead of hard-coding each variant. Phases are
//! dispatched with `enum_dispatch`.
//!
//! ## Architecture
//!
//! A hand moves through these phases, street by street:
//!
//! - **Dealing**: Burn, hole cards and board cards for the street
//! - **Drawing**: Seats exchange hole cards on draw streets
//! - **Betting**: One betting round, opened by the street's opening rule
//! - **Showdown**: Revealing, ranking and splitting each pot
//! - **Complete**: Final stacks and awards are available
//!
//! ## Core Modules
//!
//! - [`game`]: Definitions, rules, pots and the hand state machine
//!
//! ## Example
//!
//! ```
//! use poker_rules::{Action, CardArena, PokerHand, presets};
//!
//! let definition = presets::no_limit_texas_holdem(1, 2, &[100, 100]).unwrap();
//! let mut hand = PokerHand::new(definition, CardArena::standard()).unwrap();
//!
//! // Heads-up, seat 0 posts the small blind and acts first.
//! hand.act(0, Action::Raise(10)).unwrap();
//! hand.act(1, Action::Call).unwrap();
//! assert_eq!(hand.snapshot().pot_total(), 20);
//! ```

/// Core game logic, entities, and state machine.
pub mod game;
pub use game::{
    BettingStructure, ConfigurationError, GameDefinition, GameDefinitionBuilder, HandError, HandOutcome,
    HandResult, IllegalActionError, InsufficientCardsError, Opening, PokerHand, ShowdownFallback, StreetSpec,
    constants::{self, DEFAULT_RAISE_CAP, MAX_SEATS},
    entities::{
        self, Action, ActionChoice, ActionChoices, Card, CardArena, Chips, PhaseKind, SeatIndex, SeatStatus, Suit,
        TableView, parse_cards,
    },
    functional::{self, HandRanking, RankedHand},
    presets,
};
