//! Declarative description of a poker variant plus the table it is
//! dealt to.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{
    constants::MAX_SEATS,
    entities::Chips,
    errors::ConfigurationError,
    functional::HandRanking,
};

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum BettingStructure {
    FixedLimit,
    PotLimit,
    #[default]
    NoLimit,
}

impl fmt::Display for BettingStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::FixedLimit => "fixed-limit",
            Self::PotLimit => "pot-limit",
            Self::NoLimit => "no-limit",
        };
        write!(f, "{repr}")
    }
}

/// How the first actor of a betting round is chosen.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Opening {
    /// Left of the largest bet, or seat 0 when nobody has bet.
    Position,
    /// Lowest exposed card, aces high, clubs lowest.
    LowCard,
    /// Highest exposed card, aces low.
    HighCard,
    /// Weakest exposed partial hand, aces low.
    LowHand,
    /// Strongest exposed partial hand, aces high.
    HighHand,
}

/// Which pot winner to pick when no ranking qualifies anybody.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum ShowdownFallback {
    /// Best standard high hand over each contender's full cards.
    #[default]
    BestStandardHigh,
}

/// One dealing step followed by one betting round.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct StreetSpec {
    #[serde(default)]
    pub burn: bool,
    /// One entry per hole card dealt to each seat; `true` deals it face up.
    #[serde(default)]
    pub hole_deals: Vec<bool>,
    #[serde(default)]
    pub board_count: usize,
    #[serde(default)]
    pub draw: bool,
    pub opening: Opening,
    pub bet_size: Chips,
    /// Bets, raises and completions allowed in the round.
    #[serde(default)]
    pub raise_cap: Option<usize>,
}

impl StreetSpec {
    #[must_use]
    pub fn new(opening: Opening, bet_size: Chips) -> Self {
        Self {
            burn: false,
            hole_deals: Vec::new(),
            board_count: 0,
            draw: false,
            opening,
            bet_size,
            raise_cap: None,
        }
    }

    #[must_use]
    pub fn with_burn(mut self) -> Self {
        self.burn = true;
        self
    }

    #[must_use]
    pub fn with_hole_cards(mut self, face_up: &[bool]) -> Self {
        self.hole_deals.extend_from_slice(face_up);
        self
    }

    #[must_use]
    pub fn with_board(mut self, count: usize) -> Self {
        self.board_count = count;
        self
    }

    #[must_use]
    pub fn with_draw(mut self) -> Self {
        self.draw = true;
        self
    }

    #[must_use]
    pub fn with_raise_cap(mut self, cap: usize) -> Self {
        self.raise_cap = Some(cap);
        self
    }
}

/// Fluent, serde-friendly staging area for a [`GameDefinition`].
/// Antes and blinds are per-seat lists; leave a list empty when the game
/// has none.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct GameDefinitionBuilder {
    pub rankings: Vec<HandRanking>,
    pub streets: Vec<StreetSpec>,
    #[serde(default)]
    pub structure: BettingStructure,
    #[serde(default)]
    pub antes: Vec<Chips>,
    #[serde(default)]
    pub blinds: Vec<Chips>,
    #[serde(default)]
    pub bring_in: Chips,
    pub starting_stacks: Vec<Chips>,
    #[serde(default)]
    pub fallback: ShowdownFallback,
    /// Let seats that can no longer win fold their hands unseen at
    /// showdown instead of turning every hand face up.
    #[serde(default)]
    pub muck_losing_hands: bool,
}

impl GameDefinitionBuilder {
    #[must_use]
    pub fn ranking(mut self, ranking: HandRanking) -> Self {
        self.rankings.push(ranking);
        self
    }

    #[must_use]
    pub fn street(mut self, street: StreetSpec) -> Self {
        self.streets.push(street);
        self
    }

    #[must_use]
    pub fn structure(mut self, structure: BettingStructure) -> Self {
        self.structure = structure;
        self
    }

    #[must_use]
    pub fn antes(mut self, antes: &[Chips]) -> Self {
        self.antes = antes.to_vec();
        self
    }

    #[must_use]
    pub fn blinds(mut self, blinds: &[Chips]) -> Self {
        self.blinds = blinds.to_vec();
        self
    }

    #[must_use]
    pub fn bring_in(mut self, bring_in: Chips) -> Self {
        self.bring_in = bring_in;
        self
    }

    #[must_use]
    pub fn starting_stacks(mut self, stacks: &[Chips]) -> Self {
        self.starting_stacks = stacks.to_vec();
        self
    }

    #[must_use]
    pub fn fallback(mut self, fallback: ShowdownFallback) -> Self {
        self.fallback = fallback;
        self
    }

    #[must_use]
    pub fn muck_losing_hands(mut self, muck: bool) -> Self {
        self.muck_losing_hands = muck;
        self
    }

    pub fn build(self) -> Result<GameDefinition, ConfigurationError> {
        self.validate()?;
        let seats = self.starting_stacks.len();
        let per_seat = |schedule: Vec<Chips>| {
            if schedule.is_empty() {
                vec![0; seats]
            } else {
                schedule
            }
        };
        Ok(GameDefinition {
            rankings: self.rankings,
            streets: self.streets,
            structure: self.structure,
            antes: per_seat(self.antes),
            blinds: per_seat(self.blinds),
            bring_in: self.bring_in,
            starting_stacks: self.starting_stacks,
            fallback: self.fallback,
            muck_losing_hands: self.muck_losing_hands,
        })
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        if !(1..=2).contains(&self.rankings.len()) {
            return Err(ConfigurationError::RankingCount(self.rankings.len()));
        }

        let first = self.streets.first().ok_or(ConfigurationError::NoStreets)?;
        if first.hole_deals.is_empty() {
            return Err(ConfigurationError::FirstStreetWithoutHoleCards);
        }
        for (i, street) in self.streets.iter().enumerate() {
            if street.hole_deals.is_empty() && street.board_count == 0 && !street.draw {
                return Err(ConfigurationError::EmptyStreet(i));
            }
            if !street.hole_deals.is_empty() && street.draw {
                return Err(ConfigurationError::HoleCardsWithDraw(i));
            }
            if street.bet_size == 0 {
                return Err(ConfigurationError::ZeroBetSize(i));
            }
            if self.structure == BettingStructure::FixedLimit && street.raise_cap.is_none() {
                return Err(ConfigurationError::MissingRaiseCap(i));
            }
        }

        let seats = self.starting_stacks.len();
        for (schedule, values) in [("antes", &self.antes), ("blinds", &self.blinds)] {
            if !values.is_empty() && values.len() != seats {
                return Err(ConfigurationError::SeatCountMismatch {
                    schedule: schedule.to_string(),
                    got: values.len(),
                    seats,
                });
            }
        }
        if seats < 2 {
            return Err(ConfigurationError::NotEnoughSeats);
        }
        if seats > MAX_SEATS {
            return Err(ConfigurationError::TooManySeats {
                max: MAX_SEATS,
                got: seats,
            });
        }
        if let Some(seat) = self.starting_stacks.iter().position(|&stack| stack == 0) {
            return Err(ConfigurationError::EmptyStack(seat));
        }

        let has_antes = self.antes.iter().any(|&ante| ante > 0);
        let has_blinds = self.blinds.iter().any(|&blind| blind > 0);
        if !has_antes && !has_blinds && self.bring_in == 0 {
            return Err(ConfigurationError::NoForcedBets);
        }
        if self.bring_in > 0 {
            if has_blinds {
                return Err(ConfigurationError::BringInWithBlinds);
            }
            if self.bring_in >= first.bet_size {
                return Err(ConfigurationError::BringInTooLarge {
                    bring_in: self.bring_in,
                    bet_size: first.bet_size,
                });
            }
            if first.opening == Opening::Position {
                return Err(ConfigurationError::BringInWithPositionOpening);
            }
        }
        Ok(())
    }
}

/// A validated variant and table. Never changes once built.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct GameDefinition {
    rankings: Vec<HandRanking>,
    streets: Vec<StreetSpec>,
    structure: BettingStructure,
    antes: Vec<Chips>,
    blinds: Vec<Chips>,
    bring_in: Chips,
    starting_stacks: Vec<Chips>,
    fallback: ShowdownFallback,
    muck_losing_hands: bool,
}

impl GameDefinition {
    #[must_use]
    pub fn builder() -> GameDefinitionBuilder {
        GameDefinitionBuilder::default()
    }

    /// Parse a [`GameDefinitionBuilder`] from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let builder: GameDefinitionBuilder = serde_json::from_str(json)
            .map_err(|err| ConfigurationError::Malformed(err.to_string()))?;
        builder.build()
    }

    #[must_use]
    pub fn rankings(&self) -> &[HandRanking] {
        &self.rankings
    }

    #[must_use]
    pub fn streets(&self) -> &[StreetSpec] {
        &self.streets
    }

    #[must_use]
    pub fn structure(&self) -> BettingStructure {
        self.structure
    }

    #[must_use]
    pub fn antes(&self) -> &[Chips] {
        &self.antes
    }

    #[must_use]
    pub fn blinds(&self) -> &[Chips] {
        &self.blinds
    }

    #[must_use]
    pub fn bring_in(&self) -> Chips {
        self.bring_in
    }

    #[must_use]
    pub fn starting_stacks(&self) -> &[Chips] {
        &self.starting_stacks
    }

    #[must_use]
    pub fn fallback(&self) -> ShowdownFallback {
        self.fallback
    }

    #[must_use]
    pub fn muck_losing_hands(&self) -> bool {
        self.muck_losing_hands
    }

    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.starting_stacks.len()
    }

    #[must_use]
    pub fn is_split(&self) -> bool {
        self.rankings.len() > 1
    }

    /// Upper bound on the cards a hand can consume, assuming nobody folds
    /// and every draw replaces every hole card.
    #[must_use]
    pub fn max_cards_required(&self) -> usize {
        let seats = self.seat_count();
        let mut hole = 0;
        let mut total = 0;
        for street in &self.streets {
            hole += street.hole_deals.len();
            total += usize::from(street.burn) + street.hole_deals.len() * seats + street.board_count;
            if street.draw {
                total += hole * seats;
            }
        }
        total
    }
}

impl TryFrom<GameDefinitionBuilder> for GameDefinition {
    type Error = ConfigurationError;

    fn try_from(builder: GameDefinitionBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holdem_like() -> GameDefinitionBuilder {
        GameDefinition::builder()
            .ranking(HandRanking::StandardHigh)
            .street(StreetSpec::new(Opening::Position, 2).with_hole_cards(&[false, false]))
            .street(StreetSpec::new(Opening::Position, 2).with_burn().with_board(3))
            .blinds(&[1, 2])
            .starting_stacks(&[100, 100])
    }

    #[test]
    fn test_valid_definition_builds() {
        let definition = holdem_like().build().unwrap();
        assert_eq!(definition.seat_count(), 2);
        assert_eq!(definition.antes(), &[0, 0], "missing antes become zeros");
        assert!(!definition.is_split());
    }

    #[test]
    fn test_first_street_must_deal_hole_cards() {
        let result = GameDefinition::builder()
            .ranking(HandRanking::StandardHigh)
            .street(StreetSpec::new(Opening::Position, 2).with_board(3))
            .blinds(&[1, 2])
            .starting_stacks(&[100, 100])
            .build();
        assert_eq!(result, Err(ConfigurationError::FirstStreetWithoutHoleCards));
    }

    #[test]
    fn test_empty_street_rejected() {
        let result = holdem_like()
            .street(StreetSpec::new(Opening::Position, 2))
            .build();
        assert_eq!(result, Err(ConfigurationError::EmptyStreet(2)));
    }

    #[test]
    fn test_hole_cards_with_draw_rejected() {
        let result = holdem_like()
            .street(StreetSpec::new(Opening::Position, 2).with_hole_cards(&[false]).with_draw())
            .build();
        assert_eq!(result, Err(ConfigurationError::HoleCardsWithDraw(2)));
    }

    #[test]
    fn test_zero_bet_size_rejected() {
        let result = holdem_like()
            .street(StreetSpec::new(Opening::Position, 0).with_board(1))
            .build();
        assert_eq!(result, Err(ConfigurationError::ZeroBetSize(2)));
    }

    #[test]
    fn test_fixed_limit_needs_raise_cap() {
        let result = holdem_like().structure(BettingStructure::FixedLimit).build();
        assert_eq!(result, Err(ConfigurationError::MissingRaiseCap(0)));
    }

    #[test]
    fn test_ranking_count() {
        let mut builder = holdem_like();
        builder.rankings.clear();
        assert_eq!(builder.build(), Err(ConfigurationError::RankingCount(0)));

        let builder = holdem_like()
            .ranking(HandRanking::EightOrBetterLow)
            .ranking(HandRanking::AceToFiveLow);
        assert_eq!(builder.build(), Err(ConfigurationError::RankingCount(3)));
    }

    #[test]
    fn test_seat_count_checks() {
        let result = holdem_like().antes(&[1, 1, 1]).build();
        assert!(matches!(
            result,
            Err(ConfigurationError::SeatCountMismatch { got: 3, seats: 2, .. })
        ));

        let result = holdem_like().blinds(&[2]).starting_stacks(&[100]).build();
        assert_eq!(result, Err(ConfigurationError::NotEnoughSeats));

        let result = holdem_like()
            .blinds(&[])
            .antes(&[1; MAX_SEATS + 1])
            .starting_stacks(&[100; MAX_SEATS + 1])
            .build();
        assert!(matches!(result, Err(ConfigurationError::TooManySeats { .. })));

        let result = holdem_like().starting_stacks(&[100, 0]).build();
        assert_eq!(result, Err(ConfigurationError::EmptyStack(1)));
    }

    #[test]
    fn test_forced_bet_rules() {
        let result = holdem_like().blinds(&[]).build();
        assert_eq!(result, Err(ConfigurationError::NoForcedBets));

        let result = holdem_like().bring_in(1).build();
        assert_eq!(result, Err(ConfigurationError::BringInWithBlinds));

        let stud = |bring_in, opening| {
            GameDefinition::builder()
                .ranking(HandRanking::StandardHigh)
                .street(StreetSpec::new(opening, 4).with_hole_cards(&[false, false, true]))
                .antes(&[1, 1])
                .bring_in(bring_in)
                .starting_stacks(&[100, 100])
                .build()
        };
        assert!(stud(2, Opening::LowCard).is_ok());
        assert_eq!(
            stud(4, Opening::LowCard),
            Err(ConfigurationError::BringInTooLarge {
                bring_in: 4,
                bet_size: 4
            })
        );
        assert_eq!(
            stud(2, Opening::Position),
            Err(ConfigurationError::BringInWithPositionOpening)
        );
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "rankings": ["StandardHigh"],
            "streets": [
                {"hole_deals": [false, false], "opening": "Position", "bet_size": 2},
                {"burn": true, "board_count": 3, "opening": "Position", "bet_size": 2}
            ],
            "structure": "NoLimit",
            "blinds": [1, 2],
            "starting_stacks": [100, 100]
        }"#;
        let definition = GameDefinition::from_json(json).unwrap();
        assert_eq!(definition, holdem_like().build().unwrap());
    }

    #[test]
    fn test_from_json_reports_malformed_input() {
        let result = GameDefinition::from_json("{\"rankings\": 3}");
        assert!(matches!(result, Err(ConfigurationError::Malformed(_))));

        let json = r#"{"rankings": ["StandardHigh"], "streets": [], "starting_stacks": [1, 1]}"#;
        assert_eq!(GameDefinition::from_json(json), Err(ConfigurationError::NoStreets));
    }

    #[test]
    fn test_max_cards_required() {
        let definition = holdem_like()
            .street(StreetSpec::new(Opening::Position, 2).with_draw())
            .build()
            .unwrap();
        // 4 hole + burn + 3 board + 4 replacements
        assert_eq!(definition.max_cards_required(), 12);
    }
}
