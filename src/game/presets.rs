//! Named variants built from the same primitives a host would use.
//!
//! Blinds sit on seats 0 and 1; seat 0 is the small blind and the last
//! seat holds the button.

use super::{
    constants::DEFAULT_RAISE_CAP,
    definition::{BettingStructure, GameDefinition, GameDefinitionBuilder, Opening, StreetSpec},
    entities::Chips,
    errors::ConfigurationError,
    functional::HandRanking,
};

fn blinds(small_blind: Chips, big_blind: Chips, seats: usize) -> Vec<Chips> {
    let mut blinds = vec![0; seats];
    if let [small, big, ..] = blinds.as_mut_slice() {
        *small = small_blind;
        *big = big_blind;
    }
    blinds
}

/// Preflop, flop, turn and river. The flop is the only street dealt at
/// the small bet size besides preflop.
fn flop_streets(hole_cards: usize, small_bet: Chips, big_bet: Chips, raise_cap: Option<usize>) -> Vec<StreetSpec> {
    let capped = |street: StreetSpec| match raise_cap {
        Some(cap) => street.with_raise_cap(cap),
        None => street,
    };
    vec![
        capped(StreetSpec::new(Opening::Position, small_bet).with_hole_cards(&vec![false; hole_cards])),
        capped(StreetSpec::new(Opening::Position, small_bet).with_burn().with_board(3)),
        capped(StreetSpec::new(Opening::Position, big_bet).with_burn().with_board(1)),
        capped(StreetSpec::new(Opening::Position, big_bet).with_burn().with_board(1)),
    ]
}

fn with_streets(mut builder: GameDefinitionBuilder, streets: Vec<StreetSpec>) -> GameDefinitionBuilder {
    for street in streets {
        builder = builder.street(street);
    }
    builder
}

pub fn no_limit_texas_holdem(
    small_blind: Chips,
    big_blind: Chips,
    stacks: &[Chips],
) -> Result<GameDefinition, ConfigurationError> {
    let builder = GameDefinition::builder()
        .ranking(HandRanking::StandardHigh)
        .structure(BettingStructure::NoLimit)
        .blinds(&blinds(small_blind, big_blind, stacks.len()))
        .starting_stacks(stacks);
    with_streets(builder, flop_streets(2, big_blind, big_blind, None)).build()
}

/// Small bet equal to the big blind, doubled from the turn on.
pub fn fixed_limit_texas_holdem(
    small_blind: Chips,
    big_blind: Chips,
    stacks: &[Chips],
) -> Result<GameDefinition, ConfigurationError> {
    let builder = GameDefinition::builder()
        .ranking(HandRanking::StandardHigh)
        .structure(BettingStructure::FixedLimit)
        .blinds(&blinds(small_blind, big_blind, stacks.len()))
        .starting_stacks(stacks);
    with_streets(
        builder,
        flop_streets(2, big_blind, big_blind * 2, Some(DEFAULT_RAISE_CAP)),
    )
    .build()
}

pub fn pot_limit_omaha(
    small_blind: Chips,
    big_blind: Chips,
    stacks: &[Chips],
) -> Result<GameDefinition, ConfigurationError> {
    let builder = GameDefinition::builder()
        .ranking(HandRanking::OmahaHigh)
        .structure(BettingStructure::PotLimit)
        .blinds(&blinds(small_blind, big_blind, stacks.len()))
        .starting_stacks(stacks);
    with_streets(builder, flop_streets(4, big_blind, big_blind, None)).build()
}

/// Omaha split between the best high hand and the best qualifying
/// eight-or-better low.
pub fn fixed_limit_omaha_hi_lo(
    small_blind: Chips,
    big_blind: Chips,
    stacks: &[Chips],
) -> Result<GameDefinition, ConfigurationError> {
    let builder = GameDefinition::builder()
        .ranking(HandRanking::OmahaHigh)
        .ranking(HandRanking::OmahaEightOrBetterLow)
        .structure(BettingStructure::FixedLimit)
        .blinds(&blinds(small_blind, big_blind, stacks.len()))
        .starting_stacks(stacks);
    with_streets(
        builder,
        flop_streets(4, big_blind, big_blind * 2, Some(DEFAULT_RAISE_CAP)),
    )
    .build()
}

/// Forced bets and bet sizes shared by the stud games.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StudStakes {
    pub ante: Chips,
    pub bring_in: Chips,
    pub small_bet: Chips,
    pub big_bet: Chips,
}

/// Third through seventh street. Stud games burn nothing so seven seats
/// fit in one deck.
fn stud_streets(stakes: StudStakes, third: Opening, later: Opening) -> Vec<StreetSpec> {
    let street = |opening, bet_size| StreetSpec::new(opening, bet_size).with_raise_cap(DEFAULT_RAISE_CAP);
    vec![
        street(third, stakes.small_bet).with_hole_cards(&[false, false, true]),
        street(later, stakes.small_bet).with_hole_cards(&[true]),
        street(later, stakes.big_bet).with_hole_cards(&[true]),
        street(later, stakes.big_bet).with_hole_cards(&[true]),
        street(later, stakes.big_bet).with_hole_cards(&[false]),
    ]
}

fn stud(
    rankings: &[HandRanking],
    third: Opening,
    later: Opening,
    stakes: StudStakes,
    stacks: &[Chips],
) -> Result<GameDefinition, ConfigurationError> {
    let mut builder = GameDefinition::builder()
        .structure(BettingStructure::FixedLimit)
        .antes(&vec![stakes.ante; stacks.len()])
        .bring_in(stakes.bring_in)
        .starting_stacks(stacks);
    for &ranking in rankings {
        builder = builder.ranking(ranking);
    }
    with_streets(builder, stud_streets(stakes, third, later)).build()
}

/// The lowest door card brings it in; the best board acts first after.
pub fn seven_card_stud(stakes: StudStakes, stacks: &[Chips]) -> Result<GameDefinition, ConfigurationError> {
    stud(
        &[HandRanking::StandardHigh],
        Opening::LowCard,
        Opening::HighHand,
        stakes,
        stacks,
    )
}

pub fn seven_card_stud_hi_lo(stakes: StudStakes, stacks: &[Chips]) -> Result<GameDefinition, ConfigurationError> {
    stud(
        &[HandRanking::StandardHigh, HandRanking::EightOrBetterLow],
        Opening::LowCard,
        Opening::HighHand,
        stakes,
        stacks,
    )
}

/// Ace-to-five lowball stud. The highest door card brings it in; the
/// lowest board acts first after.
pub fn razz(stakes: StudStakes, stacks: &[Chips]) -> Result<GameDefinition, ConfigurationError> {
    stud(
        &[HandRanking::AceToFiveLow],
        Opening::HighCard,
        Opening::LowHand,
        stakes,
        stacks,
    )
}

/// Five cards down, then three draws. Bets double from the second draw.
pub fn deuce_to_seven_triple_draw(
    small_blind: Chips,
    big_blind: Chips,
    stacks: &[Chips],
) -> Result<GameDefinition, ConfigurationError> {
    let small_bet = big_blind;
    let big_bet = big_blind * 2;
    let street = |bet_size| StreetSpec::new(Opening::Position, bet_size).with_raise_cap(DEFAULT_RAISE_CAP);
    GameDefinition::builder()
        .ranking(HandRanking::DeuceToSevenLow)
        .structure(BettingStructure::FixedLimit)
        .blinds(&blinds(small_blind, big_blind, stacks.len()))
        .starting_stacks(stacks)
        .street(street(small_bet).with_hole_cards(&[false; 5]))
        .street(street(small_bet).with_draw())
        .street(street(big_bet).with_draw())
        .street(street(big_bet).with_draw())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    const STAKES: StudStakes = StudStakes {
        ante: 1,
        bring_in: 2,
        small_bet: 5,
        big_bet: 10,
    };

    // === Flop games ===

    #[test]
    fn test_no_limit_holdem_layout() {
        let definition = no_limit_texas_holdem(1, 2, &[100; 6]).unwrap();
        assert_eq!(definition.streets().len(), 4);
        assert_eq!(definition.blinds(), &[1, 2, 0, 0, 0, 0]);
        assert_eq!(definition.structure(), BettingStructure::NoLimit);
        let board: usize = definition.streets().iter().map(|street| street.board_count).sum();
        assert_eq!(board, 5);
        // 3 burns, 12 hole cards, 5 board cards.
        assert_eq!(definition.max_cards_required(), 20);
    }

    #[test]
    fn test_fixed_limit_holdem_doubles_on_turn() {
        let definition = fixed_limit_texas_holdem(1, 2, &[50, 50, 50]).unwrap();
        let sizes: Vec<Chips> = definition.streets().iter().map(|street| street.bet_size).collect();
        assert_eq!(sizes, vec![2, 2, 4, 4]);
        assert!(definition.streets().iter().all(|street| street.raise_cap == Some(4)));
    }

    #[test]
    fn test_omaha_variants() {
        let plo = pot_limit_omaha(1, 2, &[100, 100]).unwrap();
        assert_eq!(plo.streets()[0].hole_deals.len(), 4);
        assert_eq!(plo.structure(), BettingStructure::PotLimit);
        assert!(!plo.is_split());

        let hi_lo = fixed_limit_omaha_hi_lo(1, 2, &[100, 100]).unwrap();
        assert!(hi_lo.is_split());
        assert_eq!(
            hi_lo.rankings(),
            &[HandRanking::OmahaHigh, HandRanking::OmahaEightOrBetterLow]
        );
    }

    #[test]
    fn test_single_seat_rejected() {
        assert_eq!(
            no_limit_texas_holdem(1, 2, &[100]),
            Err(ConfigurationError::NotEnoughSeats)
        );
    }

    // === Stud games ===

    #[test]
    fn test_seven_card_stud_layout() {
        let definition = seven_card_stud(STAKES, &[100; 7]).unwrap();
        let hole: usize = definition.streets().iter().map(|street| street.hole_deals.len()).sum();
        assert_eq!(hole, 7);
        assert_eq!(definition.bring_in(), 2);
        assert_eq!(definition.antes(), &[1; 7]);
        assert_eq!(definition.streets()[0].opening, Opening::LowCard);
        assert!(definition.max_cards_required() <= 52);
    }

    #[test]
    fn test_razz_opens_on_high_card() {
        let definition = razz(STAKES, &[100, 100, 100]).unwrap();
        assert_eq!(definition.rankings(), &[HandRanking::AceToFiveLow]);
        assert_eq!(definition.streets()[0].opening, Opening::HighCard);
        assert_eq!(definition.streets()[1].opening, Opening::LowHand);
    }

    #[test]
    fn test_stud_hi_lo_is_split() {
        let definition = seven_card_stud_hi_lo(STAKES, &[100, 100]).unwrap();
        assert!(definition.is_split());
    }

    #[test]
    fn test_stud_bring_in_must_be_below_bet() {
        let stakes = StudStakes {
            bring_in: 5,
            ..STAKES
        };
        assert_eq!(
            seven_card_stud(stakes, &[100, 100]),
            Err(ConfigurationError::BringInTooLarge {
                bring_in: 5,
                bet_size: 5
            })
        );
    }

    // === Draw games ===

    #[test]
    fn test_triple_draw_layout() {
        let definition = deuce_to_seven_triple_draw(1, 2, &[100, 100, 100]).unwrap();
        let draws = definition.streets().iter().filter(|street| street.draw).count();
        assert_eq!(draws, 3);
        assert_eq!(definition.streets()[0].hole_deals, vec![false; 5]);
        assert_eq!(definition.rankings(), &[HandRanking::DeuceToSevenLow]);
    }
}
