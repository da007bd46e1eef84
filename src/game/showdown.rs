//! Settling the pots once betting is over.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::{
    definition::ShowdownFallback,
    entities::{Chips, Pot, SeatIndex},
    functional::{HandRanking, RankedHand, SubHand, argmax, eval},
    state_machine::HandData,
};

/// The chips one ranking (or the fallback, when `ranking` is `None`) won
/// out of a pot.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ShareAward {
    pub ranking: Option<HandRanking>,
    pub amount: Chips,
    pub winners: Vec<(SeatIndex, Chips)>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PotAward {
    /// Position in the ledger, 0 being the main pot.
    pub pot: usize,
    pub amount: Chips,
    pub shares: Vec<ShareAward>,
    /// No ranking qualified anybody, so the showdown fallback decided.
    pub fallback: bool,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SeatOutcome {
    pub seat: SeatIndex,
    pub starting_stack: Chips,
    pub final_stack: Chips,
    pub net: i64,
    pub won: Chips,
    /// Revealed hands, one per ranking. Empty for seats that never
    /// showed.
    pub hands: Vec<Option<RankedHand>>,
    /// Reached showdown but threw the hand away unseen.
    #[serde(default)]
    pub mucked: bool,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct HandOutcome {
    pub awards: Vec<PotAward>,
    pub seats: Vec<SeatOutcome>,
}

impl HandOutcome {
    /// Seats that won anything, in seat order.
    #[must_use]
    pub fn winners(&self) -> Vec<SeatIndex> {
        self.seats
            .iter()
            .filter(|seat| seat.won > 0)
            .map(|seat| seat.seat)
            .collect()
    }

    #[must_use]
    pub fn winnings(&self, seat: SeatIndex) -> Chips {
        self.seats.get(seat).map_or(0, |outcome| outcome.won)
    }
}

/// Everything goes to the last seat standing. No cards are shown.
pub(crate) fn award_uncontested(data: &mut HandData) -> HandOutcome {
    let hands = vec![Vec::new(); data.seats.len()];
    let Some(winner) = data.in_hand().first().copied() else {
        return outcome(data, Vec::new(), hands);
    };
    let awards: Vec<PotAward> = data
        .pots
        .drain()
        .into_iter()
        .enumerate()
        .map(|(pot, Pot { amount, .. })| {
            data.pay(winner, amount);
            PotAward {
                pot,
                amount,
                shares: vec![ShareAward {
                    ranking: None,
                    amount,
                    winners: vec![(winner, amount)],
                }],
                fallback: false,
            }
        })
        .collect();
    info!("seat {winner} wins ${} uncontested", data.paid[winner]);
    outcome(data, awards, hands)
}

/// Pay each pot, main pot first, then turn the shown hands face up.
pub(crate) fn settle(data: &mut HandData) -> HandOutcome {
    let rankings = data.definition.rankings().to_vec();
    let hands: Vec<Vec<Option<RankedHand>>> = data
        .seats
        .iter()
        .map(|seat| {
            if seat.is_folded() {
                return Vec::new();
            }
            let cards = seat.cards();
            rankings
                .iter()
                .map(|ranking| ranking.evaluate(&cards, &data.board))
                .collect()
        })
        .collect();

    let order = data.chip_order();
    let pots = data.pots.pots().to_vec();
    let mut awards = Vec::new();
    for (index, pot) in data.pots.drain().into_iter().enumerate() {
        let award = split_pot(data, index, &pot, &rankings, &hands, &order);
        for share in &award.shares {
            for &(seat, amount) in &share.winners {
                data.pay(seat, amount);
            }
        }
        log_award(&award);
        awards.push(award);
    }

    let shown = reveal(data, &pots, &hands, &order);
    let mut mucked = vec![false; data.seats.len()];
    for (i, seat) in data.seats.iter_mut().enumerate() {
        if seat.is_folded() {
            continue;
        }
        if shown[i] {
            for hole in &mut seat.hole {
                hole.face_up = true;
            }
        } else {
            mucked[i] = true;
            debug!("seat {i} mucks");
        }
    }
    let hands = hands
        .into_iter()
        .zip(&mucked)
        .map(|(hand, &mucked)| if mucked { Vec::new() } else { hand })
        .collect();
    let mut result = outcome(data, awards, hands);
    for (seat, mucked) in result.seats.iter_mut().zip(mucked) {
        seat.mucked = mucked;
    }
    result
}

/// Which seats turn their cards up. Seats reveal in order from the last
/// opener; unless the game mucks losing hands, everyone shows. A seat
/// mucks when it won nothing and, in every pot it contests, every
/// ranking it holds is beaten by a hand already shown there.
fn reveal(data: &HandData, pots: &[Pot], hands: &[Vec<Option<RankedHand>>], order: &[SeatIndex]) -> Vec<bool> {
    let mut shown = vec![false; data.seats.len()];
    for &seat in order.iter().filter(|&&seat| !data.seats[seat].is_folded()) {
        shown[seat] = !data.definition.muck_losing_hands()
            || data.paid[seat] > 0
            || can_win(seat, pots, hands, &shown);
    }
    shown
}

fn can_win(seat: SeatIndex, pots: &[Pot], hands: &[Vec<Option<RankedHand>>], shown: &[bool]) -> bool {
    hands[seat].iter().enumerate().any(|(k, hand)| {
        let Some(hand) = hand else {
            return false;
        };
        pots.iter()
            .filter(|pot| pot.eligible.contains(&seat))
            .any(|pot| {
                pot.eligible
                    .iter()
                    .filter(|&&other| shown[other])
                    .filter_map(|&other| hands[other].get(k)?.as_ref())
                    .max()
                    .is_none_or(|best| best <= hand)
            })
    })
}

fn split_pot(
    data: &HandData,
    index: usize,
    pot: &Pot,
    rankings: &[HandRanking],
    hands: &[Vec<Option<RankedHand>>],
    order: &[SeatIndex],
) -> PotAward {
    let mut contenders: Vec<SeatIndex> = order
        .iter()
        .copied()
        .filter(|seat| pot.eligible.contains(seat))
        .collect();
    if contenders.is_empty() {
        contenders = order
            .iter()
            .copied()
            .filter(|&seat| !data.seats[seat].is_folded())
            .collect();
    }
    if let &[only] = contenders.as_slice() {
        return PotAward {
            pot: index,
            amount: pot.amount,
            shares: vec![ShareAward {
                ranking: None,
                amount: pot.amount,
                winners: vec![(only, pot.amount)],
            }],
            fallback: false,
        };
    }

    let mut groups: Vec<(Option<HandRanking>, Vec<SeatIndex>)> = rankings
        .iter()
        .enumerate()
        .filter_map(|(k, &ranking)| {
            let qualified: Vec<(SeatIndex, &RankedHand)> = contenders
                .iter()
                .filter_map(|&seat| hands[seat].get(k)?.as_ref().map(|hand| (seat, hand)))
                .collect();
            let strengths: Vec<&RankedHand> = qualified.iter().map(|&(_, hand)| hand).collect();
            let winners: Vec<SeatIndex> = argmax(&strengths)
                .into_iter()
                .map(|i| qualified[i].0)
                .collect();
            (!winners.is_empty()).then_some((Some(ranking), winners))
        })
        .collect();

    let fallback = groups.is_empty();
    if fallback {
        match data.definition.fallback() {
            ShowdownFallback::BestStandardHigh => {
                let strengths: Vec<SubHand> = contenders
                    .iter()
                    .map(|&seat| {
                        let mut cards = data.seats[seat].cards();
                        cards.extend_from_slice(&data.board);
                        eval(&cards)
                    })
                    .collect();
                let winners = argmax(&strengths)
                    .into_iter()
                    .map(|i| contenders[i])
                    .collect();
                groups.push((None, winners));
            }
        }
    }

    PotAward {
        pot: index,
        amount: pot.amount,
        shares: divide(pot.amount, groups, order),
        fallback,
    }
}

/// Split `amount` evenly over the groups and then over each group's
/// winners. Odd chips go out one at a time in `order`.
fn divide(
    amount: Chips,
    groups: Vec<(Option<HandRanking>, Vec<SeatIndex>)>,
    order: &[SeatIndex],
) -> Vec<ShareAward> {
    let group_count = groups.len() as Chips;
    let base = amount / group_count;
    let spare = amount % group_count;

    let mut shares: Vec<ShareAward> = groups
        .into_iter()
        .map(|(ranking, seats)| {
            let per_seat = base / seats.len() as Chips;
            let odd = (base % seats.len() as Chips) as usize;
            let winners = seats
                .iter()
                .enumerate()
                .map(|(i, &seat)| (seat, per_seat + Chips::from(i < odd)))
                .collect();
            ShareAward {
                ranking,
                amount: base,
                winners,
            }
        })
        .collect();

    let recipients: Vec<SeatIndex> = order
        .iter()
        .copied()
        .filter(|seat| shares.iter().any(|share| share.winners.iter().any(|w| w.0 == *seat)))
        .collect();
    for &seat in recipients.iter().cycle().take(spare as usize) {
        let Some(share) = shares
            .iter_mut()
            .find(|share| share.winners.iter().any(|w| w.0 == seat))
        else {
            continue;
        };
        share.amount += 1;
        if let Some(winner) = share.winners.iter_mut().find(|w| w.0 == seat) {
            winner.1 += 1;
        }
    }
    shares
}

fn log_award(award: &PotAward) {
    for share in &award.shares {
        let label = share
            .ranking
            .map_or_else(|| "fallback".to_string(), |ranking| ranking.to_string());
        for (seat, amount) in &share.winners {
            info!("pot {}: seat {seat} wins ${amount} ({label})", award.pot);
        }
    }
}

fn outcome(data: &HandData, awards: Vec<PotAward>, mut hands: Vec<Vec<Option<RankedHand>>>) -> HandOutcome {
    let seats = data
        .seats
        .iter()
        .enumerate()
        .map(|(i, seat)| {
            let starting_stack = data.definition.starting_stacks()[i];
            SeatOutcome {
                seat: i,
                starting_stack,
                final_stack: seat.stack,
                net: i64::from(seat.stack) - i64::from(starting_stack),
                won: data.paid[i],
                hands: std::mem::take(&mut hands[i]),
                mucked: false,
            }
        })
        .collect();
    HandOutcome { awards, seats }
}
