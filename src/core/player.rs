//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! A match always has exactly two participants. `PlayerId` is a 0-based
//! index (`PlayerId::ONE`, `PlayerId::TWO`); the 1-based number used in
//! player-facing text comes from [`PlayerId::number`].
//!
//! ## PerPlayer
//!
//! Two-slot per-player storage with O(1) access, indexable by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Identifier for one of the two match participants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// The first player. Takes the first turn once the match starts.
    pub const ONE: PlayerId = PlayerId(0);
    /// The second player.
    pub const TWO: PlayerId = PlayerId(1);

    /// 0-based slot index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// 1-based player number, as shown to players.
    #[must_use]
    pub const fn number(self) -> u8 {
        self.0 + 1
    }

    /// The other participant.
    #[must_use]
    pub const fn opponent(self) -> PlayerId {
        PlayerId(1 - self.0)
    }

    /// Board facing: player 1 advances along +y, player 2 along -y.
    ///
    /// Movement and targeting patterns are written in (forward, right)
    /// offsets; this sign converts them to absolute coordinates.
    #[must_use]
    pub const fn facing(self) -> i8 {
        match self.0 {
            0 => 1,
            _ => -1,
        }
    }

    /// Iterate over both player IDs, player 1 first.
    pub fn both() -> impl Iterator<Item = PlayerId> {
        [PlayerId::ONE, PlayerId::TWO].into_iter()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// Per-player data storage with O(1) access.
///
/// Backed by a two-element array, one slot per participant.
///
/// ```
/// use skirmish::core::{PerPlayer, PlayerId};
///
/// let mut wins: PerPlayer<u32> = PerPlayer::with_value(0);
/// wins[PlayerId::TWO] = 3;
/// assert_eq!(wins[PlayerId::ONE], 0);
/// assert_eq!(wins[PlayerId::TWO], 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerPlayer<T> {
    data: [T; 2],
}

impl<T> PerPlayer<T> {
    /// Create storage with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId::ONE), factory(PlayerId::TWO)],
        }
    }

    /// Create storage with both slots set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a player's slot.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's slot.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over `(PlayerId, &T)` pairs, player 1 first.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::both().zip(self.data.iter())
    }
}

impl<T: Default> Default for PerPlayer<T> {
    fn default() -> Self {
        Self::new(|_| T::default())
    }
}

impl<T> Index<PlayerId> for PerPlayer<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &T {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PerPlayer<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut T {
        self.get_mut(player)
    }
}
