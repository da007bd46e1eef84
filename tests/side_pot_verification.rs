//! Side pot construction and payout driven through full hands.
//!
//! Every scenario checks that the main pot and each side pot only go to
//! seats that put in enough to contest them.

use poker_rules::{
    Action, BettingStructure, CardArena, Chips, GameDefinition, HandRanking, Opening, PokerHand, StreetSpec,
    parse_cards, presets,
};

fn four_way_all_in() -> PokerHand {
    // Seat 0 holds aces, seat 1 kings, seat 2 queens, seat 3 seven-deuce.
    // The board pairs nobody and makes no straight or flush.
    let arena = CardArena::with_top(parse_cards("AsKsQs7c AhKhQh2d 3c 9d8s4h 3d Jc 3h 5d").unwrap());
    let definition = presets::no_limit_texas_holdem(1, 2, &[10, 25, 40, 100]).unwrap();
    let mut hand = PokerHand::new(definition, arena).unwrap();

    assert_eq!(hand.actor(), Some(2));
    hand.act(2, Action::AllIn).unwrap();
    hand.act(3, Action::Call).unwrap();
    hand.act(0, Action::AllIn).unwrap();
    hand.act(1, Action::AllIn).unwrap();
    hand
}

// ============================================================================
// Layered all-ins
// ============================================================================

#[test]
fn test_three_pots_from_three_all_in_levels() {
    let hand = four_way_all_in();
    assert!(hand.is_complete(), "nobody left to bet, so the board runs out");

    let outcome = hand.outcome().unwrap();
    let amounts: Vec<Chips> = outcome.awards.iter().map(|award| award.amount).collect();
    assert_eq!(amounts, vec![40, 45, 30]);
}

#[test]
fn test_each_pot_goes_to_its_best_eligible_hand() {
    let hand = four_way_all_in();
    let outcome = hand.outcome().unwrap();

    let pot_winners: Vec<Vec<usize>> = outcome
        .awards
        .iter()
        .map(|award| {
            award
                .shares
                .iter()
                .flat_map(|share| share.winners.iter().map(|&(seat, _)| seat))
                .collect()
        })
        .collect();
    assert_eq!(pot_winners, vec![vec![0], vec![1], vec![2]]);

    let finals: Vec<Chips> = outcome.seats.iter().map(|seat| seat.final_stack).collect();
    assert_eq!(finals, vec![40, 45, 30, 60]);
    assert_eq!(finals.iter().sum::<Chips>(), 175);
}

#[test]
fn test_short_stacks_win_at_most_their_layer() {
    let hand = four_way_all_in();
    let outcome = hand.outcome().unwrap();
    // Seat 0 put in 10 against three callers; seat 1 put in 25.
    assert!(outcome.winnings(0) <= 40);
    assert!(outcome.winnings(1) <= 45 + 40);
    assert_eq!(outcome.winnings(3), 0);
}

// ============================================================================
// Folded money
// ============================================================================

#[test]
fn test_folded_chips_stay_in_pot() {
    let definition = presets::no_limit_texas_holdem(1, 2, &[50, 100, 100]).unwrap();
    let mut hand = PokerHand::new(definition, CardArena::standard()).unwrap();

    hand.act(2, Action::Raise(20)).unwrap();
    hand.act(0, Action::AllIn).unwrap();
    hand.act(1, Action::Fold).unwrap();
    hand.act(2, Action::Call).unwrap();
    assert!(hand.is_complete());

    let outcome = hand.outcome().unwrap();
    assert_eq!(outcome.awards.len(), 1);
    assert_eq!(outcome.awards[0].amount, 102);
    assert_eq!(outcome.winnings(1), 0);
    assert!(outcome.seats[1].hands.is_empty(), "folded hands are never shown");
    assert_eq!(outcome.seats[1].final_stack, 98);
    assert_eq!(hand.total_chips(), 250);
}

#[test]
fn test_pot_eligibility_visible_mid_hand() {
    let definition = presets::no_limit_texas_holdem(1, 2, &[30, 100, 100]).unwrap();
    let mut hand = PokerHand::new(definition, CardArena::standard()).unwrap();

    hand.act(2, Action::Call).unwrap();
    hand.act(0, Action::AllIn).unwrap();
    hand.act(1, Action::Call).unwrap();
    hand.act(2, Action::Call).unwrap();

    // Flop: seats 1 and 2 can still bet behind seat 0's all-in.
    let view = hand.snapshot();
    assert_eq!(view.street, Some(1));
    assert_eq!(view.pots.len(), 1);
    assert_eq!(view.pots[0].amount, 90);
    assert_eq!(view.pots[0].eligible, vec![0, 1, 2]);

    hand.act(1, Action::Bet(20)).unwrap();
    hand.act(2, Action::Call).unwrap();
    let view = hand.snapshot();
    assert_eq!(view.pots.len(), 2);
    assert_eq!(view.pots[1].amount, 40);
    assert_eq!(view.pots[1].eligible, vec![1, 2]);
}

// ============================================================================
// Short antes
// ============================================================================

/// One five-card street with antes of 5. Seat 0 can only post 3 and is
/// dealt quad aces; seat 1 gets kings and seat 2 queen high.
fn short_ante_hand() -> PokerHand {
    let definition = GameDefinition::builder()
        .street(StreetSpec::new(Opening::Position, 2).with_hole_cards(&[false; 5]))
        .structure(BettingStructure::NoLimit)
        .ranking(HandRanking::StandardHigh)
        .antes(&[5, 5, 5])
        .starting_stacks(&[3, 100, 100])
        .build()
        .unwrap();
    let hands = [
        parse_cards("As Ah Ad Ac 2c").unwrap(),
        parse_cards("Kc Kd Qh Jc 9s").unwrap(),
        parse_cards("Qs Td 9c 8h 7s").unwrap(),
    ];
    let top = (0..5).flat_map(|k| hands.iter().map(move |cards| cards[k])).collect();
    PokerHand::new(definition, CardArena::with_top(top)).unwrap()
}

#[test]
fn test_short_ante_opens_a_side_pot() {
    let hand = short_ante_hand();
    let view = hand.snapshot();
    assert_eq!(view.pots.len(), 2);
    assert_eq!(view.pots[0].amount, 9);
    assert_eq!(view.pots[0].eligible, vec![0, 1, 2]);
    assert_eq!(view.pots[1].amount, 4);
    assert_eq!(view.pots[1].eligible, vec![1, 2]);
}

#[test]
fn test_short_ante_wins_only_what_it_covered() {
    let mut hand = short_ante_hand();
    while let Some(seat) = hand.actor() {
        hand.act(seat, Action::Check).unwrap();
    }
    assert!(hand.is_complete());

    let outcome = hand.outcome().unwrap();
    assert_eq!(outcome.winnings(0), 9);
    assert_eq!(outcome.winnings(1), 4);
    assert_eq!(outcome.winnings(2), 0);
    assert_eq!(hand.total_chips(), 203);
}
