//! Moving cards out of the arena: street deals and draw exchanges.

use log::{debug, warn};
use std::collections::HashSet;

use super::{
    entities::{Card, HoleCard, SeatIndex},
    errors::{HandResult, IllegalActionError, InsufficientCardsError},
    state_machine::HandData,
};

/// Deal one street: the burn, then hole cards round-robin to every seat
/// still in the hand, then the board. Nothing moves unless the whole
/// street can be dealt.
pub(crate) fn deal_street(data: &mut HandData, street: usize) -> Result<(), InsufficientCardsError> {
    let spec = data.definition.streets()[street].clone();
    let receivers = data.in_hand();
    let needed = usize::from(spec.burn) + spec.hole_deals.len() * receivers.len() + spec.board_count;
    data.arena.ensure(needed).inspect_err(|err| {
        warn!("can't deal street {street}: {err}");
    })?;

    if spec.burn {
        let burned = data.arena.deal_one()?;
        data.burned.push(burned);
    }
    for &face_up in &spec.hole_deals {
        for &seat in &receivers {
            let card = data.arena.deal_one()?;
            data.seats[seat].hole.push(HoleCard { card, face_up });
        }
    }
    if spec.board_count > 0 {
        let cards = data.arena.deal(spec.board_count)?;
        data.board.extend(cards);
    }

    debug!(
        "street {street}: {} hole cards to {} seats, {} to the board",
        spec.hole_deals.len(),
        receivers.len(),
        spec.board_count
    );
    Ok(())
}

/// Swap `discards` out of a seat's hand. Each replacement takes the slot,
/// and the visibility, of the card it replaces.
pub(crate) fn exchange(data: &mut HandData, seat: SeatIndex, discards: &[Card]) -> HandResult<Vec<Card>> {
    let mut seen = HashSet::with_capacity(discards.len());
    for &card in discards {
        if !seen.insert(card) {
            return Err(IllegalActionError::DuplicateDiscard(card).into());
        }
        if !data.seats[seat].hole.iter().any(|hole| hole.card == card) {
            return Err(IllegalActionError::CardNotHeld(card).into());
        }
    }
    data.arena.ensure(discards.len()).inspect_err(|err| {
        warn!("seat {seat} can't draw: {err}");
    })?;

    let replacements = data.arena.deal(discards.len())?;
    for (discard, &replacement) in discards.iter().zip(&replacements) {
        if let Some(slot) = data.seats[seat].hole.iter_mut().find(|hole| hole.card == *discard) {
            slot.card = replacement;
            data.discarded.push(*discard);
        }
    }

    match discards.len() {
        0 => debug!("seat {seat} stands pat"),
        n => debug!("seat {seat} draws {n}"),
    }
    Ok(replacements)
}
