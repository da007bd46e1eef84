//! The hand state machine.
//!
//! [`PokerHand`] owns the mutable [`HandData`] and the current
//! [`HandPhase`]. Phases advance on their own until some seat has to
//! decide something, so callers only ever drive the hand through
//! [`PokerHand::act`] and [`PokerHand::discard`].

use enum_dispatch::enum_dispatch;
use log::{debug, info, trace, warn};
use std::collections::VecDeque;

use super::{
    betting::BettingRound,
    dealing,
    definition::GameDefinition,
    entities::{
        Action, ActionChoice, ActionChoices, Card, CardArena, Chips, HoleCard, PhaseKind, PotLedger,
        PotView, Seat, SeatIndex, SeatStatus, SeatView, TableView,
    },
    errors::{ConfigurationError, HandError, HandResult, IllegalActionError},
    showdown::{self, HandOutcome},
    states::{Betting, Complete, Dealing, Drawing, Showdown},
};

/// Mutable hand data shared by every phase.
#[derive(Clone, Debug)]
pub struct HandData {
    pub(crate) definition: GameDefinition,
    pub(crate) arena: CardArena,
    pub(crate) seats: Vec<Seat>,
    /// Community cards.
    pub(crate) board: Vec<Card>,
    pub(crate) burned: Vec<Card>,
    /// Cards thrown away on draw streets.
    pub(crate) discarded: Vec<Card>,
    pub(crate) pots: PotLedger,
    /// Chips paid out to each seat at settlement.
    pub(crate) paid: Vec<Chips>,
    pub(crate) street: Option<usize>,
    /// First actor of the most recent betting round. Odd chips start here.
    pub(crate) opener: SeatIndex,
}

impl HandData {
    /// Seat the table and post antes and blinds.
    pub(crate) fn new(definition: GameDefinition, arena: CardArena) -> Result<Self, ConfigurationError> {
        if let Some(card) = arena.duplicate() {
            return Err(ConfigurationError::DuplicateCard(card));
        }

        let mut seats: Vec<Seat> = definition
            .starting_stacks()
            .iter()
            .map(|&stack| Seat::new(stack))
            .collect();
        let mut pots = PotLedger::default();

        let posted: Vec<Chips> = seats
            .iter_mut()
            .zip(definition.antes())
            .map(|(seat, &ante)| seat.post_dead(ante))
            .collect();
        pots.add_antes(&posted, &seats);
        let antes: Chips = posted.iter().sum();
        for (i, (seat, &blind)) in seats.iter_mut().zip(definition.blinds()).enumerate() {
            if blind > 0 {
                let posted = seat.commit(blind);
                debug!("seat {i} posts blind ${posted}");
            }
        }
        if antes > 0 {
            debug!("antes collected: ${antes}");
        }

        let paid = vec![0; seats.len()];
        Ok(Self {
            definition,
            arena,
            seats,
            board: Vec::new(),
            burned: Vec::new(),
            discarded: Vec::new(),
            pots,
            paid,
            street: None,
            opener: 0,
        })
    }

    pub(crate) fn max_bet(&self) -> Chips {
        self.seats.iter().map(|seat| seat.bet).max().unwrap_or(0)
    }

    /// Collected pots plus the bets of the current round.
    pub(crate) fn pot_total(&self) -> Chips {
        self.pots.total() + self.seats.iter().map(|seat| seat.bet).sum::<Chips>()
    }

    /// Seats that haven't folded, in seat order.
    pub(crate) fn in_hand(&self) -> Vec<SeatIndex> {
        self.seats
            .iter()
            .enumerate()
            .filter(|(_, seat)| !seat.is_folded())
            .map(|(i, _)| i)
            .collect()
    }

    pub(crate) fn contenders(&self) -> usize {
        self.seats.iter().filter(|seat| !seat.is_folded()).count()
    }

    pub(crate) fn fold(&mut self, seat: SeatIndex) {
        self.seats[seat].status = SeatStatus::Folded;
        self.pots.remove_seat(seat);
    }

    /// Every seat, starting from the last round's opener.
    pub(crate) fn chip_order(&self) -> Vec<SeatIndex> {
        let n = self.seats.len();
        (0..n).map(|k| (self.opener + k) % n).collect()
    }

    pub(crate) fn pay(&mut self, seat: SeatIndex, amount: Chips) {
        self.seats[seat].stack += amount;
        self.paid[seat] += amount;
    }

    /// Stacks plus bets plus pots. Constant for the life of the hand.
    #[must_use]
    pub fn total_chips(&self) -> Chips {
        self.seats
            .iter()
            .map(|seat| seat.stack + seat.bet)
            .sum::<Chips>()
            + self.pots.total()
    }
}

/// Behavior shared by every phase.
#[enum_dispatch]
pub trait PhaseFlow {
    /// Do whatever needs no outside input. Returns the phase to move to,
    /// or `None` to keep waiting.
    fn advance(&mut self, data: &mut HandData) -> HandResult<Option<HandPhase>>;

    fn kind(&self) -> PhaseKind;

    /// The seat whose decision is pending, if any.
    fn actor(&self) -> Option<SeatIndex> {
        None
    }
}

#[enum_dispatch(PhaseFlow)]
#[derive(Clone, Debug)]
pub enum HandPhase {
    Dealing,
    Drawing,
    Betting,
    Showdown,
    Complete,
}

impl PhaseFlow for Dealing {
    fn advance(&mut self, data: &mut HandData) -> HandResult<Option<HandPhase>> {
        dealing::deal_street(data, self.street)?;
        data.street = Some(self.street);
        let next: HandPhase = if data.definition.streets()[self.street].draw {
            Drawing {
                street: self.street,
                pending: VecDeque::from(data.in_hand()),
            }
            .into()
        } else {
            Betting::open(data, self.street).into()
        };
        Ok(Some(next))
    }

    fn kind(&self) -> PhaseKind {
        PhaseKind::Dealing
    }
}

impl Drawing {
    fn exchange(&mut self, data: &mut HandData, seat: SeatIndex, discards: &[Card]) -> HandResult<Vec<Card>> {
        let expected = self
            .pending
            .front()
            .copied()
            .ok_or(IllegalActionError::NoActionPending)?;
        if seat != expected {
            return Err(IllegalActionError::OutOfTurn {
                expected,
                got: seat,
            }
            .into());
        }
        let replacements = dealing::exchange(data, seat, discards)?;
        self.pending.pop_front();
        Ok(replacements)
    }
}

impl PhaseFlow for Drawing {
    fn advance(&mut self, data: &mut HandData) -> HandResult<Option<HandPhase>> {
        if self.pending.is_empty() {
            return Ok(Some(Betting::open(data, self.street).into()));
        }
        Ok(None)
    }

    fn kind(&self) -> PhaseKind {
        PhaseKind::Drawing
    }

    fn actor(&self) -> Option<SeatIndex> {
        self.pending.front().copied()
    }
}

impl Betting {
    fn open(data: &mut HandData, street: usize) -> Self {
        let round = BettingRound::open(data, street);
        data.opener = round.opener();
        debug!("street {street} betting opens with seat {}", round.opener());
        Self { street, round }
    }
}

impl PhaseFlow for Betting {
    fn advance(&mut self, data: &mut HandData) -> HandResult<Option<HandPhase>> {
        if !self.round.is_closed() {
            return Ok(None);
        }

        if let Some((seat, amount)) = data.pots.collect(&mut data.seats, true) {
            debug!("returned ${amount} uncalled to seat {seat}");
        }
        let next: HandPhase = if data.contenders() <= 1 {
            Complete {
                outcome: showdown::award_uncontested(data),
            }
            .into()
        } else if self.street + 1 == data.definition.streets().len() {
            Showdown {}.into()
        } else {
            Dealing {
                street: self.street + 1,
            }
            .into()
        };
        Ok(Some(next))
    }

    fn kind(&self) -> PhaseKind {
        PhaseKind::Betting
    }

    fn actor(&self) -> Option<SeatIndex> {
        self.round.actor()
    }
}

impl PhaseFlow for Showdown {
    fn advance(&mut self, data: &mut HandData) -> HandResult<Option<HandPhase>> {
        Ok(Some(
            Complete {
                outcome: showdown::settle(data),
            }
            .into(),
        ))
    }

    fn kind(&self) -> PhaseKind {
        PhaseKind::Showdown
    }
}

impl PhaseFlow for Complete {
    fn advance(&mut self, _data: &mut HandData) -> HandResult<Option<HandPhase>> {
        Ok(None)
    }

    fn kind(&self) -> PhaseKind {
        PhaseKind::Complete
    }
}

/// A single hand of poker, played from forced bets to payout.
///
/// # Examples
///
/// ```
/// use poker_rules::{Action, CardArena, PokerHand, presets};
///
/// let definition = presets::no_limit_texas_holdem(1, 2, &[100, 100]).unwrap();
/// let mut hand = PokerHand::new(definition, CardArena::standard()).unwrap();
/// hand.act(0, Action::Fold).unwrap();
/// assert!(hand.is_complete());
/// ```
#[derive(Clone, Debug)]
pub struct PokerHand {
    data: HandData,
    phase: HandPhase,
}

impl PokerHand {
    /// Post forced bets, deal the first street and run until a seat has
    /// to act.
    pub fn new(definition: GameDefinition, arena: CardArena) -> HandResult<Self> {
        let data = HandData::new(definition, arena)?;
        info!(
            "new hand: {} seats, {} streets, ${} in play",
            data.seats.len(),
            data.definition.streets().len(),
            data.total_chips()
        );
        let mut hand = Self {
            data,
            phase: Dealing { street: 0 }.into(),
        };
        hand.run()?;
        Ok(hand)
    }

    fn run(&mut self) -> HandResult<()> {
        while let Some(next) = self.phase.advance(&mut self.data)? {
            trace!("{} -> {}", self.phase.kind(), next.kind());
            if let HandPhase::Complete(complete) = &next {
                info!("hand complete, winners: {:?}", complete.outcome.winners());
            }
            self.phase = next;
        }
        Ok(())
    }

    /// Apply a betting action, or stand pat on a draw street.
    pub fn act(&mut self, seat: SeatIndex, action: Action) -> HandResult<()> {
        self.run()?;
        let result: HandResult<()> = match &mut self.phase {
            HandPhase::Betting(betting) => betting
                .round
                .apply(&mut self.data, seat, action)
                .map_err(HandError::from),
            HandPhase::Drawing(drawing) if action == Action::StandPat => {
                drawing.exchange(&mut self.data, seat, &[]).map(|_| ())
            }
            HandPhase::Drawing(_) => Err(IllegalActionError::DrawPending.into()),
            HandPhase::Complete(_) => Err(IllegalActionError::HandComplete.into()),
            HandPhase::Dealing(_) | HandPhase::Showdown(_) => Err(IllegalActionError::NoActionPending.into()),
        };
        if let Err(err) = &result {
            warn!("rejected seat {seat} ({action}): {err}");
        }
        result?;
        self.run()
    }

    /// Swap out `cards` on a draw street. Returns the replacements.
    pub fn discard(&mut self, seat: SeatIndex, cards: &[Card]) -> HandResult<Vec<Card>> {
        self.run()?;
        let result = match &mut self.phase {
            HandPhase::Drawing(drawing) => drawing.exchange(&mut self.data, seat, cards),
            HandPhase::Complete(_) => Err(IllegalActionError::HandComplete.into()),
            _ => Err(IllegalActionError::NotDrawing.into()),
        };
        if let Err(err) = &result {
            warn!("rejected discard by seat {seat}: {err}");
        }
        let replacements = result?;
        self.run()?;
        Ok(replacements)
    }

    #[must_use]
    pub fn actor(&self) -> Option<SeatIndex> {
        self.phase.actor()
    }

    /// What the current actor may do, or `None` when nobody is up.
    #[must_use]
    pub fn legal_actions(&self) -> Option<ActionChoices> {
        match &self.phase {
            HandPhase::Betting(betting) => betting.round.legal_actions(&self.data),
            HandPhase::Drawing(drawing) => drawing.pending.front().map(|&seat| {
                ActionChoices::from([
                    ActionChoice::StandPat,
                    ActionChoice::Discard {
                        max: self.data.seats[seat].hole.len(),
                    },
                ])
            }),
            _ => None,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> TableView {
        let seats = self
            .data
            .seats
            .iter()
            .enumerate()
            .map(|(i, seat)| {
                let (up_cards, down_cards) = if seat.is_folded() {
                    (Vec::new(), 0)
                } else {
                    (
                        seat.up_cards().collect(),
                        seat.hole.iter().filter(|hole| !hole.face_up).count(),
                    )
                };
                SeatView {
                    seat: i,
                    stack: seat.stack,
                    bet: seat.bet,
                    status: seat.status,
                    up_cards,
                    down_cards,
                }
            })
            .collect();
        TableView {
            phase: self.phase.kind(),
            street: self.data.street,
            actor: self.actor(),
            board: self.data.board.clone(),
            pots: self.data.pots.pots().iter().map(PotView::from).collect(),
            seats,
            remaining_cards: self.data.arena.remaining(),
        }
    }

    /// A seat's private view of its own hole cards.
    #[must_use]
    pub fn hole_cards(&self, seat: SeatIndex) -> Option<&[HoleCard]> {
        self.data.seats.get(seat).map(|seat| seat.hole.as_slice())
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&HandOutcome> {
        match &self.phase {
            HandPhase::Complete(complete) => Some(&complete.outcome),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self.phase, HandPhase::Complete(_))
    }

    #[must_use]
    pub fn phase_kind(&self) -> PhaseKind {
        self.phase.kind()
    }

    #[must_use]
    pub fn street_index(&self) -> Option<usize> {
        self.data.street
    }

    #[must_use]
    pub fn definition(&self) -> &GameDefinition {
        &self.data.definition
    }

    #[must_use]
    pub fn board(&self) -> &[Card] {
        &self.data.board
    }

    #[must_use]
    pub fn burned_cards(&self) -> &[Card] {
        &self.data.burned
    }

    #[must_use]
    pub fn discarded_cards(&self) -> &[Card] {
        &self.data.discarded
    }

    /// Every card taken from the arena so far, in deal order.
    #[must_use]
    pub fn dealt_cards(&self) -> &[Card] {
        self.data.arena.dealt()
    }

    /// Bets, raises and completions in the current betting round.
    #[must_use]
    pub fn raise_count(&self) -> Option<usize> {
        match &self.phase {
            HandPhase::Betting(betting) => Some(betting.round.raises()),
            _ => None,
        }
    }

    #[must_use]
    pub fn total_chips(&self) -> Chips {
        self.data.total_chips()
    }
}
