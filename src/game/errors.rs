use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entities::{Card, Chips, SeatIndex};

/// A game definition or starting table that can't produce a legal hand.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum ConfigurationError {
    #[error("a game needs at least one street")]
    NoStreets,
    #[error("the first street must deal hole cards")]
    FirstStreetWithoutHoleCards,
    #[error("street {0} deals nothing and has no draw")]
    EmptyStreet(usize),
    #[error("street {0} can't both deal hole cards and draw")]
    HoleCardsWithDraw(usize),
    #[error("street {0} needs a positive bet size")]
    ZeroBetSize(usize),
    #[error("fixed-limit street {0} needs a raise cap")]
    MissingRaiseCap(usize),
    #[error("need 1 or 2 hand rankings, got {0}")]
    RankingCount(usize),
    #[error("{schedule} lists {got} seats, but there are {seats} stacks")]
    SeatCountMismatch {
        schedule: String,
        got: usize,
        seats: usize,
    },
    #[error("need 2+ seats")]
    NotEnoughSeats,
    #[error("at most {max} seats, got {got}")]
    TooManySeats { max: usize, got: usize },
    #[error("seat {0} starts without chips")]
    EmptyStack(SeatIndex),
    #[error("need an ante, a blind, or a bring-in")]
    NoForcedBets,
    #[error("a bring-in can't be combined with blinds")]
    BringInWithBlinds,
    #[error("bring-in ${bring_in} must be less than the first bet size ${bet_size}")]
    BringInTooLarge { bring_in: Chips, bet_size: Chips },
    #[error("a bring-in needs a card-based opening on the first street")]
    BringInWithPositionOpening,
    #[error("{0} appears twice in the card sequence")]
    DuplicateCard(Card),
    #[error("malformed game definition: {0}")]
    Malformed(String),
}

/// A rejected action. The hand is left exactly as it was.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum IllegalActionError {
    #[error("no action is pending")]
    NoActionPending,
    #[error("hand is complete")]
    HandComplete,
    #[error("not your turn: seat {expected} acts, not seat {got}")]
    OutOfTurn { expected: SeatIndex, got: SeatIndex },
    #[error("can't check while owing ${owed}")]
    CannotCheck { owed: Chips },
    #[error("nothing to call")]
    NothingToCall,
    #[error("the bring-in must be posted or completed first")]
    BringInPending,
    #[error("no bring-in is owed")]
    NoBringInPending,
    #[error("raise cap of {cap} reached")]
    RaiseCapReached { cap: usize },
    #[error("not enough chips to raise")]
    InsufficientChips,
    #[error("every opponent is all-in")]
    NoOpponentCanRespond,
    #[error("facing a wager, raise instead")]
    FacingWager,
    #[error("no wager to raise, bet instead")]
    NoWagerToRaise,
    #[error("${amount} is below the minimum of ${minimum}")]
    BelowMinimum { amount: Chips, minimum: Chips },
    #[error("${amount} is above the maximum of ${maximum}")]
    AboveMaximum { amount: Chips, maximum: Chips },
    #[error("only allowed while drawing")]
    NotDrawing,
    #[error("waiting on a discard or stand pat")]
    DrawPending,
    #[error("{0} isn't in your hand")]
    CardNotHeld(Card),
    #[error("{0} is discarded twice")]
    DuplicateDiscard(Card),
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
#[error("need {requested} cards, only {remaining} remain")]
pub struct InsufficientCardsError {
    pub requested: usize,
    pub remaining: usize,
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum HandError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    IllegalAction(#[from] IllegalActionError),
    #[error(transparent)]
    InsufficientCards(#[from] InsufficientCardsError),
}

impl HandError {
    /// Illegal actions can simply be retried. Anything else means the
    /// hand can't go on as configured.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::IllegalAction(_))
    }
}

pub type HandResult<T> = Result<T, HandError>;
