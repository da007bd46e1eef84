//! Heads-Up Example
//!
//! Plays one shuffled hand of no-limit hold'em between two scripted seats
//! and prints the table after every action.
//!
//! Run with `RUST_LOG=debug` to see the engine's own log lines.

use poker_rules::{Action, ActionChoices, CardArena, PokerHand, TableView, presets};

/// Raise the minimum once per street when possible, otherwise check or
/// call.
fn choose(choices: &ActionChoices, raised: bool) -> Action {
    match choices.wager_bounds() {
        Some((min, _)) if !raised && choices.contains(&Action::Bet(min)) => Action::Bet(min),
        Some((min, _)) if !raised => Action::Raise(min),
        _ if choices.contains(&Action::Check) => Action::Check,
        _ => Action::Call,
    }
}

fn print_table(view: &TableView) {
    let board: Vec<String> = view.board.iter().map(ToString::to_string).collect();
    println!(
        "  [{}] street {:?}, board [{}], pot ${}",
        view.phase,
        view.street,
        board.join(" "),
        view.pot_total()
    );
    for seat in &view.seats {
        println!(
            "    seat {}: ${} (bet ${}, {}, {} down)",
            seat.seat, seat.stack, seat.bet, seat.status, seat.down_cards
        );
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("=== Heads-Up No-Limit Hold'em ===\n");
    let definition = presets::no_limit_texas_holdem(1, 2, &[100, 100])?;
    let mut hand = PokerHand::new(definition, CardArena::shuffled(&mut rand::rng()))?;

    for seat in 0..2 {
        let cards: Vec<String> = hand
            .hole_cards(seat)
            .unwrap_or_default()
            .iter()
            .map(|hole| hole.card.to_string())
            .collect();
        println!("seat {seat} holds {}", cards.join(" "));
    }
    print_table(&hand.snapshot());

    let mut raised_on = None;
    while let (Some(seat), Some(choices)) = (hand.actor(), hand.legal_actions()) {
        println!("\nseat {seat} may: {choices}");
        let street = hand.street_index();
        let action = choose(&choices, raised_on == street);
        if matches!(action, Action::Bet(_) | Action::Raise(_)) {
            raised_on = street;
        }
        println!("seat {seat} {action}");
        hand.act(seat, action)?;
        print_table(&hand.snapshot());
    }

    let outcome = hand.outcome().ok_or_else(|| anyhow::anyhow!("hand did not finish"))?;
    println!("\n=== Result ===");
    for award in &outcome.awards {
        for share in &award.shares {
            for (seat, amount) in &share.winners {
                println!("pot {}: seat {seat} wins ${amount}", award.pot);
            }
        }
    }
    for seat in &outcome.seats {
        if let Some(Some(best)) = seat.hands.first() {
            println!("seat {} showed {best}", seat.seat);
        }
        println!("seat {} finishes with ${} ({:+})", seat.seat, seat.final_stack, seat.net);
    }
    Ok(())
}
