/// Most seats a single hand can be dealt to.
pub const MAX_SEATS: usize = 23;

/// Bets plus raises allowed per round in the fixed-limit presets.
pub const DEFAULT_RAISE_CAP: usize = 4;
