//! Picking the first actor of a betting round.

use std::cmp::Reverse;

use super::{
    definition::Opening,
    entities::{Card, Seat, SeatIndex},
    functional::eval_exposed,
};

/// The seat that opens the round. Card-based rules fall back to
/// [`Opening::Position`] when nobody shows a face-up card.
pub(crate) fn first_actor(opening: Opening, seats: &[Seat]) -> SeatIndex {
    let exposed = match opening {
        Opening::Position => None,
        Opening::LowCard => lowest_card(seats),
        Opening::HighCard => highest_card(seats),
        Opening::LowHand => lowest_hand(seats),
        Opening::HighHand => highest_hand(seats),
    };
    exposed.unwrap_or_else(|| by_position(seats))
}

/// Left of the largest bet; later seats win ties, so with no bets at all
/// this is seat 0.
fn by_position(seats: &[Seat]) -> SeatIndex {
    seats
        .iter()
        .enumerate()
        .max_by_key(|&(i, seat)| (seat.bet, i))
        .map_or(0, |(i, _)| (i + 1) % seats.len())
}

fn showing(seats: &[Seat]) -> impl Iterator<Item = (SeatIndex, Vec<Card>)> + '_ {
    seats
        .iter()
        .enumerate()
        .filter(|(_, seat)| !seat.is_folded())
        .map(|(i, seat)| (i, seat.up_cards().collect::<Vec<_>>()))
        .filter(|(_, up)| !up.is_empty())
}

fn lowest_card(seats: &[Seat]) -> Option<SeatIndex> {
    showing(seats)
        .filter_map(|(i, up)| {
            up.into_iter()
                .map(|card| (card.0, card.1))
                .min()
                .map(|key| (key, i))
        })
        .min()
        .map(|(_, i)| i)
}

fn highest_card(seats: &[Seat]) -> Option<SeatIndex> {
    showing(seats)
        .filter_map(|(i, up)| {
            up.into_iter()
                .map(|card| (card.low_value(), card.1))
                .max()
                .map(|key| (key, Reverse(i)))
        })
        .max()
        .map(|(_, Reverse(i))| i)
}

fn lowest_hand(seats: &[Seat]) -> Option<SeatIndex> {
    showing(seats)
        .map(|(i, up)| (eval_exposed(&up, true), i))
        .min()
        .map(|(_, i)| i)
}

fn highest_hand(seats: &[Seat]) -> Option<SeatIndex> {
    showing(seats)
        .map(|(i, up)| (eval_exposed(&up, false), Reverse(i)))
        .max()
        .map(|(_, Reverse(i))| i)
}
