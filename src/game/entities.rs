use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeSet, HashSet},
    fmt,
    hash::{Hash, Hasher},
    mem::discriminant,
    str::FromStr,
};
use thiserror::Error;

use super::errors::InsufficientCardsError;

/// Suits are ordered club < diamond < heart < spade. The order only
/// matters for breaking ties between single exposed cards.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Suit {
    Club,
    Diamond,
    Heart,
    Spade,
}

impl Suit {
    pub const ALL: [Self; 4] = [Self::Club, Self::Diamond, Self::Heart, Self::Spade];
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Club => "c",
            Self::Diamond => "d",
            Self::Heart => "h",
            Self::Spade => "s",
        };
        write!(f, "{repr}")
    }
}

/// Card values run from deuce (2) to ace (14).
pub type Value = u8;

pub const ACE: Value = 14;

/// A card is a value and a suit. Aces are stored high; low-ace
/// rankings ask for [`Card::low_value`] instead.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Card(pub Value, pub Suit);

impl Card {
    /// The value with aces counted as 1.
    #[must_use]
    pub fn low_value(&self) -> Value {
        if self.0 == ACE { 1 } else { self.0 }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let value = match self.0 {
            10 => "T",
            11 => "J",
            12 => "Q",
            13 => "K",
            ACE => "A",
            v => &v.to_string(),
        };
        write!(f, "{value}{}", self.1)
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("can't parse card notation {0:?}")]
pub struct CardParseError(pub String);

impl FromStr for Card {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(value), Some(suit), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(CardParseError(s.to_string()));
        };
        let value = match value.to_ascii_uppercase() {
            d @ '2'..='9' => d as Value - b'0',
            'T' => 10,
            'J' => 11,
            'Q' => 12,
            'K' => 13,
            'A' => ACE,
            _ => return Err(CardParseError(s.to_string())),
        };
        let suit = match suit.to_ascii_lowercase() {
            'c' => Suit::Club,
            'd' => Suit::Diamond,
            'h' => Suit::Heart,
            's' => Suit::Spade,
            _ => return Err(CardParseError(s.to_string())),
        };
        Ok(Self(value, suit))
    }
}

/// Parse a run of cards like `"AsKd 7h"`. Whitespace is ignored, so
/// cards may be written back-to-back or spaced out.
pub fn parse_cards(notation: &str) -> Result<Vec<Card>, CardParseError> {
    let compact: Vec<char> = notation.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.len() % 2 != 0 {
        return Err(CardParseError(notation.to_string()));
    }
    compact
        .chunks(2)
        .map(|pair| pair.iter().collect::<String>().parse())
        .collect()
}

/// All 52 cards ordered by value, then suit.
#[must_use]
pub fn standard_deck() -> Vec<Card> {
    (2..=ACE)
        .flat_map(|value| Suit::ALL.into_iter().map(move |suit| Card(value, suit)))
        .collect()
}

/// An ordered sequence of cards consumed strictly front to back.
/// Dealt cards are never handed out again.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CardArena {
    cards: Vec<Card>,
    next: usize,
}

impl CardArena {
    #[must_use]
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards, next: 0 }
    }

    /// An unshuffled 52-card deck.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(standard_deck())
    }

    /// A deck that deals `top` first, followed by every other card of a
    /// standard deck in order.
    #[must_use]
    pub fn with_top(top: Vec<Card>) -> Self {
        let mut cards = top;
        let rest: Vec<Card> = standard_deck()
            .into_iter()
            .filter(|card| !cards.contains(card))
            .collect();
        cards.extend(rest);
        Self::new(cards)
    }

    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut cards = standard_deck();
        cards.shuffle(rng);
        Self::new(cards)
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.next
    }

    /// Everything dealt so far, in deal order.
    #[must_use]
    pub fn dealt(&self) -> &[Card] {
        &self.cards[..self.next]
    }

    /// Returns the first card that appears more than once.
    #[must_use]
    pub fn duplicate(&self) -> Option<Card> {
        let mut seen = HashSet::with_capacity(self.cards.len());
        self.cards.iter().copied().find(|card| !seen.insert(*card))
    }

    pub fn ensure(&self, requested: usize) -> Result<(), InsufficientCardsError> {
        if requested > self.remaining() {
            return Err(InsufficientCardsError {
                requested,
                remaining: self.remaining(),
            });
        }
        Ok(())
    }

    pub fn deal(&mut self, n: usize) -> Result<Vec<Card>, InsufficientCardsError> {
        self.ensure(n)?;
        let start = self.next;
        self.next += n;
        Ok(self.cards[start..self.next].to_vec())
    }

    pub fn deal_one(&mut self) -> Result<Card, InsufficientCardsError> {
        self.ensure(1)?;
        let card = self.cards[self.next];
        self.next += 1;
        Ok(card)
    }
}

impl Default for CardArena {
    fn default() -> Self {
        Self::standard()
    }
}

/// Whole chips. Stacks, bets and pots never go fractional.
pub type Chips = u32;

pub type SeatIndex = usize;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum SeatStatus {
    Active,
    AllIn,
    Folded,
}

impl fmt::Display for SeatStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Active => "active",
            Self::AllIn => "all-in",
            Self::Folded => "folded",
        };
        write!(f, "{repr}")
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct HoleCard {
    pub card: Card,
    pub face_up: bool,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Seat {
    pub stack: Chips,
    /// Chips put in during the current betting round.
    pub bet: Chips,
    /// Everything put in this hand, antes included.
    pub contributed: Chips,
    pub status: SeatStatus,
    pub hole: Vec<HoleCard>,
}

impl Seat {
    #[must_use]
    pub fn new(stack: Chips) -> Self {
        Self {
            stack,
            bet: 0,
            contributed: 0,
            status: SeatStatus::Active,
            hole: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_folded(&self) -> bool {
        self.status == SeatStatus::Folded
    }

    #[must_use]
    pub fn can_act(&self) -> bool {
        self.status == SeatStatus::Active && self.stack > 0
    }

    pub fn up_cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.hole.iter().filter(|h| h.face_up).map(|h| h.card)
    }

    #[must_use]
    pub fn cards(&self) -> Vec<Card> {
        self.hole.iter().map(|h| h.card).collect()
    }

    /// Move up to `amount` from the stack into the current bet. Returns
    /// what was actually moved.
    pub(crate) fn commit(&mut self, amount: Chips) -> Chips {
        let amount = amount.min(self.stack);
        self.stack -= amount;
        self.bet += amount;
        self.contributed += amount;
        self.mark_all_in();
        amount
    }

    /// Like [`Seat::commit`], but the chips go straight to the pot
    /// instead of sitting in front of the seat.
    pub(crate) fn post_dead(&mut self, amount: Chips) -> Chips {
        let amount = amount.min(self.stack);
        self.stack -= amount;
        self.contributed += amount;
        self.mark_all_in();
        amount
    }

    pub(crate) fn refund(&mut self, amount: Chips) {
        self.bet -= amount;
        self.contributed -= amount;
        self.stack += amount;
        if self.status == SeatStatus::AllIn && self.stack > 0 {
            self.status = SeatStatus::Active;
        }
    }

    fn mark_all_in(&mut self) {
        if self.stack == 0 && self.status == SeatStatus::Active {
            self.status = SeatStatus::AllIn;
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Pot {
    pub amount: Chips,
    pub eligible: BTreeSet<SeatIndex>,
    /// A pot stops growing once one of its eligible seats is all-in.
    pub(crate) open: bool,
}

/// The main pot followed by side pots, oldest first.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PotLedger {
    pots: Vec<Pot>,
}

impl PotLedger {
    #[must_use]
    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }

    #[must_use]
    pub fn total(&self) -> Chips {
        self.pots.iter().map(|pot| pot.amount).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pots.is_empty()
    }

    /// Antes go in as dead money. A seat that couldn't post its full ante
    /// is all-in and only contests the layer it covered; the rest goes to
    /// a pot for everyone still live.
    pub(crate) fn add_antes(&mut self, posted: &[Chips], seats: &[Seat]) {
        let max_posted = posted.iter().copied().max().unwrap_or(0);
        if max_posted == 0 {
            return;
        }
        let short = |i: usize, level: Chips| seats[i].status == SeatStatus::AllIn && posted[i] < level;

        let mut levels: Vec<Chips> = posted
            .iter()
            .zip(seats)
            .filter(|&(&amount, seat)| seat.status == SeatStatus::AllIn && amount > 0)
            .map(|(&amount, _)| amount)
            .collect();
        levels.push(max_posted);
        levels.sort_unstable();
        levels.dedup();

        let mut floor = 0;
        for level in levels {
            let amount: Chips = posted
                .iter()
                .map(|&p| p.min(level) - p.min(floor))
                .sum();
            floor = level;
            if amount == 0 {
                continue;
            }
            let eligible: BTreeSet<SeatIndex> = in_hand(seats)
                .into_iter()
                .filter(|&i| !short(i, level))
                .collect();
            let open = eligible.iter().all(|&i| seats[i].stack > 0);
            match self.pots.last_mut() {
                Some(last) if last.open && last.eligible == eligible => {
                    last.amount += amount;
                    last.open = open;
                }
                _ => self.pots.push(Pot {
                    amount,
                    eligible,
                    open,
                }),
            }
        }
    }

    /// Sweep the round's bets into the ledger. When `return_uncalled` is
    /// set, the part of the largest bet nobody matched goes back to its
    /// owner first and is reported.
    pub(crate) fn collect(
        &mut self,
        seats: &mut [Seat],
        return_uncalled: bool,
    ) -> Option<(SeatIndex, Chips)> {
        let refund = if return_uncalled {
            refund_uncalled(seats)
        } else {
            None
        };
        let max_bet = seats.iter().map(|seat| seat.bet).max().unwrap_or(0);
        if max_bet == 0 {
            return refund;
        }

        let mut levels: Vec<Chips> = seats
            .iter()
            .filter(|seat| seat.status == SeatStatus::AllIn && seat.bet > 0)
            .map(|seat| seat.bet)
            .collect();
        levels.push(max_bet);
        levels.sort_unstable();
        levels.dedup();

        let mut floor = 0;
        let mut first_layer = true;
        for level in levels {
            let amount: Chips = seats
                .iter()
                .map(|seat| seat.bet.min(level) - seat.bet.min(floor))
                .sum();
            floor = level;
            if amount == 0 {
                continue;
            }
            let eligible: BTreeSet<SeatIndex> = seats
                .iter()
                .enumerate()
                .filter(|(_, seat)| !seat.is_folded() && seat.bet >= level)
                .map(|(i, _)| i)
                .collect();
            let open = !eligible.is_empty() && eligible.iter().all(|&i| seats[i].stack > 0);
            let merge_into_last = first_layer || eligible.is_empty();
            first_layer = false;

            match self.pots.last_mut() {
                Some(last) if merge_into_last && (last.open || eligible.is_empty()) => {
                    last.amount += amount;
                    if !eligible.is_empty() {
                        last.open = open;
                    }
                }
                _ => {
                    let eligible = if eligible.is_empty() {
                        in_hand(seats)
                    } else {
                        eligible
                    };
                    self.pots.push(Pot {
                        amount,
                        eligible,
                        open,
                    });
                }
            }
        }

        for seat in seats.iter_mut() {
            seat.bet = 0;
        }
        refund
    }

    /// Drop a folded seat from every pot. A pot nobody can win any more
    /// is folded into its neighbour.
    pub(crate) fn remove_seat(&mut self, seat: SeatIndex) {
        for pot in &mut self.pots {
            pot.eligible.remove(&seat);
        }
        let mut i = 0;
        while i < self.pots.len() {
            if self.pots[i].eligible.is_empty() && self.pots.len() > 1 {
                let orphan = self.pots.remove(i);
                let target = i.saturating_sub(1);
                self.pots[target].amount += orphan.amount;
            } else {
                i += 1;
            }
        }
    }

    pub(crate) fn drain(&mut self) -> Vec<Pot> {
        std::mem::take(&mut self.pots)
    }
}

fn in_hand(seats: &[Seat]) -> BTreeSet<SeatIndex> {
    seats
        .iter()
        .enumerate()
        .filter(|(_, seat)| !seat.is_folded())
        .map(|(i, _)| i)
        .collect()
}

fn refund_uncalled(seats: &mut [Seat]) -> Option<(SeatIndex, Chips)> {
    let (top, top_bet) = seats
        .iter()
        .enumerate()
        .map(|(i, seat)| (i, seat.bet))
        .max_by_key(|&(i, bet)| (bet, std::cmp::Reverse(i)))?;
    let second = seats
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != top)
        .map(|(_, seat)| seat.bet)
        .max()
        .unwrap_or(0);
    if top_bet <= second {
        return None;
    }
    let excess = top_bet - second;
    seats[top].refund(excess);
    Some((top, excess))
}

/// Amounts on wagers are "to" totals for the round, not increments.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Action {
    Fold,
    Check,
    Call,
    BringIn,
    Bet(Chips),
    Raise(Chips),
    /// Resolves to whichever of bring-in, call, bet or raise puts the
    /// whole stack in.
    AllIn,
    StandPat,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Fold => "folds",
            Self::Check => "checks",
            Self::Call => "calls",
            Self::BringIn => "brings it in",
            Self::Bet(amount) => &format!("bets ${amount}"),
            Self::Raise(amount) => &format!("raises to ${amount}"),
            Self::AllIn => "goes all-in",
            Self::StandPat => "stands pat",
        };
        write!(f, "{repr}")
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub enum ActionChoice {
    Fold,
    Check,
    Call(Chips),
    BringIn(Chips),
    Bet { min: Chips, max: Chips },
    Raise { min: Chips, max: Chips },
    /// The "to" total that puts the whole stack in. Only offered when
    /// that commitment is itself a legal call, bring-in, bet or raise.
    AllIn(Chips),
    StandPat,
    Discard { max: usize },
}

impl fmt::Display for ActionChoice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Fold => "fold".to_string(),
            Self::Check => "check".to_string(),
            Self::Call(amount) => format!("call (== ${amount})"),
            Self::BringIn(amount) => format!("bring-in (== ${amount})"),
            Self::Bet { min, max } if min == max => format!("bet (== ${min})"),
            Self::Bet { min, max } => format!("bet (${min}..=${max})"),
            Self::Raise { min, max } if min == max => format!("raise (== ${min})"),
            Self::Raise { min, max } => format!("raise (${min}..=${max})"),
            Self::AllIn(amount) => format!("all-in (== ${amount})"),
            Self::StandPat => "stand pat".to_string(),
            Self::Discard { max } => format!("discard (<= {max})"),
        };
        write!(f, "{repr}")
    }
}

// Choices hash and compare by variant only, so a set of choices can be
// looked up with placeholder amounts.
impl Eq for ActionChoice {}

impl Hash for ActionChoice {
    fn hash<H: Hasher>(&self, state: &mut H) {
        discriminant(self).hash(state);
    }
}

impl PartialEq for ActionChoice {
    fn eq(&self, other: &Self) -> bool {
        discriminant(self) == discriminant(other)
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ActionChoices(pub HashSet<ActionChoice>);

impl ActionChoices {
    /// Whether the action's kind is on offer. Wager amounts are checked
    /// separately against [`ActionChoices::wager_bounds`].
    #[must_use]
    pub fn contains(&self, action: &Action) -> bool {
        self.lookup(action).is_some()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The `(min, max)` "to" totals for a bet or raise, whichever is on
    /// offer.
    #[must_use]
    pub fn wager_bounds(&self) -> Option<(Chips, Chips)> {
        self.0.iter().find_map(|choice| match choice {
            ActionChoice::Bet { min, max } | ActionChoice::Raise { min, max } => Some((*min, *max)),
            _ => None,
        })
    }

    #[must_use]
    pub fn call_amount(&self) -> Option<Chips> {
        match self.0.get(&ActionChoice::Call(0)) {
            Some(ActionChoice::Call(amount)) => Some(*amount),
            _ => None,
        }
    }

    fn lookup(&self, action: &Action) -> Option<&ActionChoice> {
        let key = match action {
            Action::Fold => ActionChoice::Fold,
            Action::Check => ActionChoice::Check,
            Action::Call => ActionChoice::Call(0),
            Action::BringIn => ActionChoice::BringIn(0),
            Action::Bet(_) => ActionChoice::Bet { min: 0, max: 0 },
            Action::Raise(_) => ActionChoice::Raise { min: 0, max: 0 },
            Action::AllIn => ActionChoice::AllIn(0),
            Action::StandPat => ActionChoice::StandPat,
        };
        self.0.get(&key)
    }
}

impl fmt::Display for ActionChoices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut choices: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        choices.sort();
        write!(f, "{}", choices.join(", "))
    }
}

impl<I> From<I> for ActionChoices
where
    I: IntoIterator<Item = ActionChoice>,
{
    fn from(iter: I) -> Self {
        Self(iter.into_iter().collect::<HashSet<_>>())
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum PhaseKind {
    Dealing,
    Drawing,
    Betting,
    Showdown,
    Complete,
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Dealing => "dealing",
            Self::Drawing => "drawing",
            Self::Betting => "betting",
            Self::Showdown => "showdown",
            Self::Complete => "complete",
        };
        write!(f, "{repr}")
    }
}

/// What everyone at the table can see of a seat.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SeatView {
    pub seat: SeatIndex,
    pub stack: Chips,
    pub bet: Chips,
    pub status: SeatStatus,
    pub up_cards: Vec<Card>,
    pub down_cards: usize,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PotView {
    pub amount: Chips,
    pub eligible: Vec<SeatIndex>,
}

impl fmt::Display for PotView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${} (seats {:?})", self.amount, self.eligible)
    }
}

impl From<&Pot> for PotView {
    fn from(pot: &Pot) -> Self {
        Self {
            amount: pot.amount,
            eligible: pot.eligible.iter().copied().collect(),
        }
    }
}

/// A public snapshot of the hand. Hidden hole cards only show up as
/// counts.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TableView {
    pub phase: PhaseKind,
    pub street: Option<usize>,
    pub actor: Option<SeatIndex>,
    pub board: Vec<Card>,
    pub pots: Vec<PotView>,
    pub seats: Vec<SeatView>,
    pub remaining_cards: usize,
}

impl TableView {
    /// Collected pots plus everything still sitting in front of seats.
    #[must_use]
    pub fn pot_total(&self) -> Chips {
        self.pots.iter().map(|pot| pot.amount).sum::<Chips>()
            + self.seats.iter().map(|seat| seat.bet).sum::<Chips>()
    }
}
