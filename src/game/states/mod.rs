//! Phase definitions for the hand FSM.
//!
//! A hand moves through these in order, street by street, until it
//! reaches [`Complete`].

use std::collections::VecDeque;

use crate::game::{betting::BettingRound, entities::SeatIndex, showdown::HandOutcome};

/// Dealing the cards of a street.
#[derive(Clone, Debug)]
pub struct Dealing {
    pub street: usize,
}

/// Seats still in the hand exchange cards one at a time, in seat order.
#[derive(Clone, Debug)]
pub struct Drawing {
    pub street: usize,
    pub(crate) pending: VecDeque<SeatIndex>,
}

/// Waiting on betting decisions.
#[derive(Clone, Debug)]
pub struct Betting {
    pub street: usize,
    pub(crate) round: BettingRound,
}

/// Revealing and ranking hands.
#[derive(Clone, Debug)]
pub struct Showdown {}

/// The hand is over. Nothing else can happen.
#[derive(Clone, Debug)]
pub struct Complete {
    pub(crate) outcome: HandOutcome,
}
