//! Fixed-limit betting: exact bet sizes, doubling streets and the raise
//! cap.

use poker_rules::{Action, CardArena, HandError, IllegalActionError, PokerHand, presets};

fn three_handed() -> PokerHand {
    let definition = presets::fixed_limit_texas_holdem(1, 2, &[100, 100, 100]).unwrap();
    PokerHand::new(definition, CardArena::standard()).unwrap()
}

// ============================================================================
// Raise cap
// ============================================================================

#[test]
fn test_fifth_wager_rejected() {
    let mut hand = three_handed();
    hand.act(2, Action::Raise(4)).unwrap();
    hand.act(0, Action::Raise(6)).unwrap();
    hand.act(1, Action::Raise(8)).unwrap();
    hand.act(2, Action::Raise(10)).unwrap();
    assert_eq!(hand.raise_count(), Some(4));

    let before = hand.snapshot();
    assert_eq!(
        hand.act(0, Action::Raise(12)),
        Err(HandError::IllegalAction(IllegalActionError::RaiseCapReached { cap: 4 }))
    );
    assert_eq!(hand.snapshot(), before);

    let choices = hand.legal_actions().unwrap();
    assert!(choices.contains(&Action::Call));
    assert!(choices.contains(&Action::Fold));
    assert!(!choices.contains(&Action::Raise(12)));
    assert_eq!(choices.call_amount(), Some(4));
}

#[test]
fn test_cap_resets_each_street() {
    let mut hand = three_handed();
    hand.act(2, Action::Raise(4)).unwrap();
    hand.act(0, Action::Raise(6)).unwrap();
    hand.act(1, Action::Raise(8)).unwrap();
    hand.act(2, Action::Raise(10)).unwrap();
    hand.act(0, Action::Call).unwrap();
    hand.act(1, Action::Call).unwrap();

    assert_eq!(hand.street_index(), Some(1));
    assert_eq!(hand.raise_count(), Some(0));
    assert_eq!(hand.snapshot().pot_total(), 30);

    let choices = hand.legal_actions().unwrap();
    assert!(choices.contains(&Action::Check));
    assert_eq!(choices.wager_bounds(), Some((2, 2)));
}

// ============================================================================
// Bet sizes
// ============================================================================

#[test]
fn test_bets_are_exact() {
    let mut hand = three_handed();
    hand.act(2, Action::Call).unwrap();
    hand.act(0, Action::Call).unwrap();
    hand.act(1, Action::Check).unwrap();

    assert_eq!(
        hand.act(0, Action::Bet(3)),
        Err(HandError::IllegalAction(IllegalActionError::AboveMaximum {
            amount: 3,
            maximum: 2
        }))
    );
    hand.act(0, Action::Bet(2)).unwrap();
    let choices = hand.legal_actions().unwrap();
    assert!(choices.contains(&Action::Raise(4)));
    assert_eq!(choices.wager_bounds(), Some((4, 4)));
}

#[test]
fn test_turn_doubles_the_bet() {
    let mut hand = three_handed();
    hand.act(2, Action::Call).unwrap();
    hand.act(0, Action::Call).unwrap();
    hand.act(1, Action::Check).unwrap();
    for seat in 0..3 {
        hand.act(seat, Action::Check).unwrap();
    }

    assert_eq!(hand.street_index(), Some(2));
    let choices = hand.legal_actions().unwrap();
    assert_eq!(choices.wager_bounds(), Some((4, 4)));
}

// ============================================================================
// All-in
// ============================================================================

#[test]
fn test_all_in_only_listed_when_it_would_be_accepted() {
    let mut hand = three_handed();
    let choices = hand.legal_actions().unwrap();
    assert!(!choices.contains(&Action::AllIn), "offered: {choices}");

    let before = hand.snapshot();
    assert_eq!(
        hand.act(2, Action::AllIn),
        Err(HandError::IllegalAction(IllegalActionError::AboveMaximum {
            amount: 100,
            maximum: 4
        }))
    );
    assert_eq!(hand.snapshot(), before);
}

#[test]
fn test_pot_limit_omaha_withholds_deep_all_in() {
    let definition = presets::pot_limit_omaha(1, 2, &[100, 100, 100]).unwrap();
    let mut hand = PokerHand::new(definition, CardArena::standard()).unwrap();
    assert!(!hand.legal_actions().unwrap().contains(&Action::AllIn));
    assert!(hand.act(2, Action::AllIn).is_err());
}
