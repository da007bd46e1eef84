//! One betting round: who acts next, what they may do, and applying it.

use log::{debug, trace};
use std::collections::VecDeque;

use super::{
    definition::BettingStructure,
    entities::{Action, ActionChoice, ActionChoices, Chips, Seat, SeatIndex},
    errors::IllegalActionError,
    opening,
    state_machine::HandData,
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BettingRound {
    street: usize,
    opener: SeatIndex,
    /// Seats that still owe a decision, next actor first.
    queue: VecDeque<SeatIndex>,
    bring_in_pending: bool,
    /// Set while the only wager on the table is the bring-in, so the next
    /// wager completes to the full bet instead of raising.
    completion: bool,
    last_increment: Chips,
    raises: usize,
}

impl BettingRound {
    pub(crate) fn open(data: &HandData, street: usize) -> Self {
        let spec = &data.definition.streets()[street];
        let opener = opening::first_actor(spec.opening, &data.seats);
        let queue = action_queue(&data.seats, opener, None);
        let bring_in_pending =
            street == 0 && data.definition.bring_in() > 0 && queue.front() == Some(&opener);
        let mut round = Self {
            street,
            opener,
            queue,
            bring_in_pending,
            completion: bring_in_pending,
            last_increment: 0,
            raises: 0,
        };

        let max_bet = data.max_bet();
        let run_out = round.queue.len() <= 1
            && round
                .queue
                .front()
                .is_none_or(|&seat| data.seats[seat].bet >= max_bet);
        if run_out || data.contenders() <= 1 {
            trace!("street {street}: nobody left to bet, running out");
            round.close();
        } else {
            trace!("street {street}: action order {:?}", round.queue);
        }
        round
    }

    #[must_use]
    pub fn actor(&self) -> Option<SeatIndex> {
        self.queue.front().copied()
    }

    #[must_use]
    pub fn opener(&self) -> SeatIndex {
        self.opener
    }

    #[must_use]
    pub fn street(&self) -> usize {
        self.street
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.queue.is_empty()
    }

    /// Bets, raises and completions made so far this round.
    #[must_use]
    pub fn raises(&self) -> usize {
        self.raises
    }

    pub(crate) fn legal_actions(&self, data: &HandData) -> Option<ActionChoices> {
        let seat = self.actor()?;
        let stack = data.seats[seat].stack;
        let owed = owed(data, seat);

        let mut choices = vec![ActionChoice::Fold];
        if self.bring_in_pending {
            choices.push(ActionChoice::BringIn(data.definition.bring_in().min(stack)));
        } else if owed == 0 {
            choices.push(ActionChoice::Check);
        } else {
            choices.push(ActionChoice::Call(owed.min(stack)));
        }
        if let Ok((min, max)) = self.wager_bounds(data, seat) {
            choices.push(if self.facing_wager(data) {
                ActionChoice::Raise { min, max }
            } else {
                ActionChoice::Bet { min, max }
            });
        }
        if self.all_in_allowed(data, seat, owed) {
            choices.push(ActionChoice::AllIn(stack + data.seats[seat].bet));
        }
        Some(choices.into())
    }

    /// Validate and apply `action` for `seat`. Nothing changes on error.
    pub(crate) fn apply(
        &mut self,
        data: &mut HandData,
        seat: SeatIndex,
        action: Action,
    ) -> Result<(), IllegalActionError> {
        let expected = self.actor().ok_or(IllegalActionError::NoActionPending)?;
        if seat != expected {
            return Err(IllegalActionError::OutOfTurn {
                expected,
                got: seat,
            });
        }

        let owed = owed(data, seat);
        let action = self.resolve_all_in(data, seat, action, owed);
        match action {
            Action::Fold => {
                self.queue.pop_front();
                data.fold(seat);
                if self.bring_in_pending {
                    self.bring_in_pending = false;
                    self.completion = false;
                }
                if data.contenders() <= 1 {
                    self.close();
                }
            }
            Action::Check => {
                if self.bring_in_pending {
                    return Err(IllegalActionError::BringInPending);
                }
                if owed > 0 {
                    return Err(IllegalActionError::CannotCheck { owed });
                }
                self.queue.pop_front();
            }
            Action::Call => {
                if self.bring_in_pending {
                    return Err(IllegalActionError::BringInPending);
                }
                if owed == 0 {
                    return Err(IllegalActionError::NothingToCall);
                }
                data.seats[seat].commit(owed);
                self.queue.pop_front();
            }
            Action::BringIn => {
                if !self.bring_in_pending {
                    return Err(IllegalActionError::NoBringInPending);
                }
                data.seats[seat].commit(data.definition.bring_in());
                self.bring_in_pending = false;
                self.queue.pop_front();
            }
            Action::Bet(to) | Action::Raise(to) => {
                let facing = self.facing_wager(data);
                if facing && matches!(action, Action::Bet(_)) {
                    return Err(IllegalActionError::FacingWager);
                }
                if !facing && matches!(action, Action::Raise(_)) {
                    return Err(IllegalActionError::NoWagerToRaise);
                }
                let (minimum, maximum) = self.wager_bounds(data, seat)?;
                if to < minimum {
                    return Err(IllegalActionError::BelowMinimum {
                        amount: to,
                        minimum,
                    });
                }
                if to > maximum {
                    return Err(IllegalActionError::AboveMaximum {
                        amount: to,
                        maximum,
                    });
                }

                let increment = to - data.max_bet();
                let committed = data.seats[seat].bet;
                data.seats[seat].commit(to - committed);
                self.last_increment = self.last_increment.max(increment);
                self.raises += 1;
                self.bring_in_pending = false;
                self.completion = false;
                self.queue = action_queue(&data.seats, seat + 1, Some(seat));
                trace!("action reopened: {:?}", self.queue);
            }
            Action::StandPat => return Err(IllegalActionError::NotDrawing),
            Action::AllIn => return Err(IllegalActionError::InsufficientChips),
        }

        debug!("seat {seat} {action}");
        Ok(())
    }

    fn close(&mut self) {
        self.queue.clear();
        self.bring_in_pending = false;
        self.completion = false;
    }

    fn facing_wager(&self, data: &HandData) -> bool {
        data.max_bet() > 0 && !self.completion
    }

    /// Turn an all-in into the concrete action that commits the whole
    /// stack.
    fn resolve_all_in(&self, data: &HandData, seat: SeatIndex, action: Action, owed: Chips) -> Action {
        if action != Action::AllIn {
            return action;
        }
        let me = &data.seats[seat];
        if self.bring_in_pending && me.stack <= data.definition.bring_in() {
            Action::BringIn
        } else if !self.bring_in_pending && me.stack <= owed {
            Action::Call
        } else if self.facing_wager(data) {
            Action::Raise(me.stack + me.bet)
        } else {
            Action::Bet(me.stack + me.bet)
        }
    }

    /// Whether the resolved all-in is an action `apply` would accept.
    fn all_in_allowed(&self, data: &HandData, seat: SeatIndex, owed: Chips) -> bool {
        match self.resolve_all_in(data, seat, Action::AllIn, owed) {
            Action::BringIn => self.bring_in_pending,
            Action::Call => owed > 0,
            Action::Bet(to) | Action::Raise(to) => self
                .wager_bounds(data, seat)
                .is_ok_and(|(min, max)| (min..=max).contains(&to)),
            _ => false,
        }
    }

    /// `(min, max)` "to" totals for a bet or raise by `seat`, or why it
    /// can't wager at all.
    fn wager_bounds(&self, data: &HandData, seat: SeatIndex) -> Result<(Chips, Chips), IllegalActionError> {
        let spec = &data.definition.streets()[self.street];
        if let Some(cap) = spec.raise_cap.filter(|&cap| self.raises >= cap) {
            return Err(IllegalActionError::RaiseCapReached { cap });
        }

        let me = &data.seats[seat];
        let max_bet = data.max_bet();
        if me.stack <= max_bet - me.bet {
            return Err(IllegalActionError::InsufficientChips);
        }
        let others_can_respond = data
            .seats
            .iter()
            .enumerate()
            .any(|(i, other)| i != seat && !other.is_folded() && other.stack + other.bet > max_bet);
        if !others_can_respond {
            return Err(IllegalActionError::NoOpponentCanRespond);
        }

        let mut min_to = self.last_increment.max(spec.bet_size);
        if !self.completion {
            min_to += max_bet;
        }
        let ceiling = me.stack + me.bet;
        let min_to = min_to.min(effective_stack(&data.seats, seat) + me.bet);
        let max_to = match data.definition.structure() {
            BettingStructure::FixedLimit => min_to,
            BettingStructure::PotLimit => {
                let owed = max_bet - me.bet;
                ceiling.min(min_to.max(max_bet + data.pot_total() + owed))
            }
            BettingStructure::NoLimit => ceiling,
        };
        Ok((min_to, max_to))
    }
}

fn owed(data: &HandData, seat: SeatIndex) -> Chips {
    data.max_bet() - data.seats[seat].bet
}

/// Seats that can still act, in seat order starting from `start`.
fn action_queue(seats: &[Seat], start: SeatIndex, skip: Option<SeatIndex>) -> VecDeque<SeatIndex> {
    let n = seats.len();
    (0..n)
        .map(|k| (start + k) % n)
        .filter(|&i| Some(i) != skip && seats[i].can_act())
        .collect()
}

/// The seat's stack, capped by what the deepest opponent could match.
fn effective_stack(seats: &[Seat], seat: SeatIndex) -> Chips {
    let me = &seats[seat];
    let deepest_opponent = seats
        .iter()
        .enumerate()
        .filter(|&(i, other)| i != seat && !other.is_folded())
        .map(|(_, other)| other.stack + other.bet)
        .max()
        .unwrap_or(0);
    me.stack.min(deepest_opponent.saturating_sub(me.bet))
}
