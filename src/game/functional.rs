//! Hand evaluation. Every ranking reduces a five-card hand to a
//! [`SubHand`] of `(rank, values)`; the ranking decides whether a bigger
//! or a smaller `SubHand` wins.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

use super::entities::{Card, Value};

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Rank {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::HighCard => "hi",
            Self::OnePair => "1p",
            Self::TwoPair => "2p",
            Self::ThreeOfAKind => "3k",
            Self::Straight => "s8",
            Self::Flush => "fs",
            Self::FullHouse => "fh",
            Self::FourOfAKind => "4k",
            Self::StraightFlush => "sf",
        };
        write!(f, "{repr}")
    }
}

/// Values are ordered by group size then value, biggest first, so two
/// sub-hands of the same rank compare lexicographically.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct SubHand {
    pub rank: Rank,
    pub values: Vec<Value>,
}

impl fmt::Display for SubHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.rank, self.values)
    }
}

#[derive(Clone, Copy, Debug)]
struct Scoring {
    ace_low: bool,
    straights_and_flushes: bool,
    wheel: bool,
}

const HIGH: Scoring = Scoring {
    ace_low: false,
    straights_and_flushes: true,
    wheel: true,
};

const DEUCE_TO_SEVEN: Scoring = Scoring {
    ace_low: false,
    straights_and_flushes: true,
    wheel: false,
};

const ACE_TO_FIVE: Scoring = Scoring {
    ace_low: true,
    straights_and_flushes: false,
    wheel: false,
};

/// Groups only, ace high. Used for partial hands like exposed stud
/// cards.
const GROUPS_ACE_HIGH: Scoring = Scoring {
    ace_low: false,
    straights_and_flushes: false,
    wheel: false,
};

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum HandRanking {
    /// Best five of all cards, ace high, wheel counts.
    StandardHigh,
    /// Ace low, straights and flushes ignored. Lower wins.
    AceToFiveLow,
    /// Ace high, straights and flushes count, no wheel. Lower wins.
    DeuceToSevenLow,
    /// Five distinct ranks of eight or lower, ace low. Lower wins.
    EightOrBetterLow,
    /// Exactly two hole cards with exactly three board cards.
    OmahaHigh,
    OmahaEightOrBetterLow,
}

impl HandRanking {
    #[must_use]
    pub fn is_low(self) -> bool {
        matches!(
            self,
            Self::AceToFiveLow
                | Self::DeuceToSevenLow
                | Self::EightOrBetterLow
                | Self::OmahaEightOrBetterLow
        )
    }

    /// The best qualifying hand under this ranking, or `None` when the
    /// cards can't form one. With fewer than five cards the whole partial
    /// hand is scored, so only pairs, trips and quads count; eight-or-better
    /// and the Omaha rankings still need their full shape.
    #[must_use]
    pub fn evaluate(self, hole: &[Card], board: &[Card]) -> Option<RankedHand> {
        let candidates: Vec<Vec<Card>> = match self {
            Self::OmahaHigh | Self::OmahaEightOrBetterLow => {
                let holes: Vec<Vec<Card>> = hole.iter().copied().combinations(2).collect();
                let boards: Vec<Vec<Card>> = board.iter().copied().combinations(3).collect();
                holes
                    .iter()
                    .cartesian_product(boards.iter())
                    .map(|(h, b)| h.iter().chain(b).copied().collect())
                    .collect()
            }
            _ if hole.len() + board.len() < 5 => vec![hole.iter().chain(board).copied().collect()],
            _ => hole.iter().chain(board).copied().combinations(5).collect(),
        };
        candidates
            .into_iter()
            .filter_map(|cards| {
                self.score(&cards).map(|hand| RankedHand {
                    ranking: self,
                    hand,
                    cards,
                })
            })
            .max()
    }

    fn score(self, five: &[Card]) -> Option<SubHand> {
        match self {
            Self::StandardHigh | Self::OmahaHigh => Some(score(five, HIGH)),
            Self::DeuceToSevenLow => Some(score(five, DEUCE_TO_SEVEN)),
            Self::AceToFiveLow => Some(score(five, ACE_TO_FIVE)),
            Self::EightOrBetterLow | Self::OmahaEightOrBetterLow => {
                let hand = score(five, ACE_TO_FIVE);
                let qualifies = five.len() == 5
                    && hand.rank == Rank::HighCard
                    && hand.values.first().is_some_and(|&v| v <= 8);
                qualifies.then_some(hand)
            }
        }
    }
}

impl fmt::Display for HandRanking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::StandardHigh => "high",
            Self::AceToFiveLow => "ace-to-five low",
            Self::DeuceToSevenLow => "deuce-to-seven low",
            Self::EightOrBetterLow => "eight-or-better low",
            Self::OmahaHigh => "omaha high",
            Self::OmahaEightOrBetterLow => "omaha eight-or-better low",
        };
        write!(f, "{repr}")
    }
}

/// A scored hand and the cards that make it. Ordering is "better is
/// greater" under the hand's ranking, so low hands compare reversed.
#[derive(Clone, Debug, Deserialize, Eq, Serialize)]
pub struct RankedHand {
    pub ranking: HandRanking,
    pub hand: SubHand,
    pub cards: Vec<Card>,
}

impl PartialEq for RankedHand {
    fn eq(&self, other: &Self) -> bool {
        self.ranking == other.ranking && self.hand == other.hand
    }
}

impl Ord for RankedHand {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.ranking.is_low() {
            other.hand.cmp(&self.hand)
        } else {
            self.hand.cmp(&other.hand)
        }
    }
}

impl PartialOrd for RankedHand {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for RankedHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cards = self.cards.iter().map(ToString::to_string).join(" ");
        write!(f, "{} ({cards})", self.hand)
    }
}

fn score(cards: &[Card], scoring: Scoring) -> SubHand {
    let mut groups: Vec<(usize, Value)> = cards
        .iter()
        .map(|card| if scoring.ace_low { card.low_value() } else { card.0 })
        .counts()
        .into_iter()
        .map(|(value, count)| (count, value))
        .collect();
    groups.sort_unstable_by(|a, b| b.cmp(a));
    let values: Vec<Value> = groups.iter().map(|&(_, value)| value).collect();

    if scoring.straights_and_flushes && cards.len() == 5 {
        let flush = cards.iter().map(|card| card.1).all_equal();
        match (straight_high(&values, scoring.wheel), flush) {
            (Some(high), true) => {
                return SubHand {
                    rank: Rank::StraightFlush,
                    values: vec![high],
                };
            }
            (Some(high), false) => {
                return SubHand {
                    rank: Rank::Straight,
                    values: vec![high],
                };
            }
            (None, true) => {
                return SubHand {
                    rank: Rank::Flush,
                    values,
                };
            }
            (None, false) => {}
        }
    }

    let sizes = (
        groups.first().map_or(0, |g| g.0),
        groups.get(1).map_or(0, |g| g.0),
    );
    let rank = match sizes {
        (4, _) => Rank::FourOfAKind,
        (3, 2) => Rank::FullHouse,
        (3, _) => Rank::ThreeOfAKind,
        (2, 2) => Rank::TwoPair,
        (2, _) => Rank::OnePair,
        _ => Rank::HighCard,
    };
    SubHand { rank, values }
}

/// `values` must be sorted high to low.
fn straight_high(values: &[Value], wheel: bool) -> Option<Value> {
    if values.len() != 5 {
        return None;
    }
    if values[0] - values[4] == 4 {
        return Some(values[0]);
    }
    if wheel && values == [14, 5, 4, 3, 2] {
        return Some(5);
    }
    None
}

/// Best standard high hand from any number of cards. With fewer than
/// five cards only pairs, trips and quads count.
#[must_use]
pub fn eval(cards: &[Card]) -> SubHand {
    if cards.len() < 5 {
        return score(cards, GROUPS_ACE_HIGH);
    }
    cards
        .iter()
        .copied()
        .combinations(5)
        .map(|five| score(&five, HIGH))
        .max()
        .unwrap_or(SubHand {
            rank: Rank::HighCard,
            values: Vec::new(),
        })
}

/// Groups-only strength of an exposed partial hand. Aces count low when
/// `ace_low` is set.
#[must_use]
pub fn eval_exposed(cards: &[Card], ace_low: bool) -> SubHand {
    let scoring = if ace_low { ACE_TO_FIVE } else { GROUPS_ACE_HIGH };
    score(cards, scoring)
}

/// Indices of every maximal element.
#[must_use]
pub fn argmax<T: Ord>(items: &[T]) -> Vec<usize> {
    let Some(best) = items.iter().max() else {
        return Vec::new();
    };
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| *item == best)
        .map(|(i, _)| i)
        .collect()
}
