//! Board geometry and tile occupancy.
//!
//! The board is a rectangle of tiles addressed by [`TileCoords`]. It
//! tracks which piece occupies each tile; all occupancy changes go
//! through `MatchState::set_occupant`, which keeps this map and the
//! piece arena consistent. Player 1 faces +y and player 2 faces -y;
//! each player places pieces in the rows closest to their own edge.

mod coords;

pub use coords::{StepOffset, TileCoords};

use im::HashMap;
use serde::{Deserialize, Serialize};

use crate::core::{PieceId, PlayerId};

/// Board dimensions and setup geometry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Number of columns.
    pub width: i8,
    /// Number of rows.
    pub height: i8,
    /// Rows nearest each player's edge that accept initial placement.
    pub placement_rows: i8,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 7,
            height: 10,
            placement_rows: 3,
        }
    }
}

/// The playing field: dimensions plus a tile-to-piece occupancy map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    config: BoardConfig,
    occupancy: HashMap<TileCoords, PieceId>,
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new(config: BoardConfig) -> Self {
        Self {
            config,
            occupancy: HashMap::new(),
        }
    }

    /// Board dimensions and placement geometry.
    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Whether `tile` lies on the board.
    #[must_use]
    pub fn contains(&self, tile: TileCoords) -> bool {
        tile.x >= 0 && tile.x < self.config.width && tile.y >= 0 && tile.y < self.config.height
    }

    /// Whether `tile` is inside `player`'s initial placement zone.
    #[must_use]
    pub fn in_placement_zone(&self, player: PlayerId, tile: TileCoords) -> bool {
        if !self.contains(tile) {
            return false;
        }
        if player == PlayerId::ONE {
            tile.y < self.config.placement_rows
        } else {
            tile.y >= self.config.height - self.config.placement_rows
        }
    }

    /// The piece occupying `tile`, if any.
    #[must_use]
    pub fn occupant_of(&self, tile: TileCoords) -> Option<PieceId> {
        self.occupancy.get(&tile).copied()
    }

    /// Whether every tile strictly between `from` and `to` is empty.
    /// Unaligned tile pairs have no tiles between them and report clear.
    #[must_use]
    pub fn path_is_clear(&self, from: TileCoords, to: TileCoords) -> bool {
        from.between(to)
            .into_iter()
            .all(|t| self.occupant_of(t).is_none())
    }

    /// All tiles on the board, column-major.
    pub fn all_tiles(&self) -> impl Iterator<Item = TileCoords> + '_ {
        let (w, h) = (self.config.width, self.config.height);
        (0..w).flat_map(move |x| (0..h).map(move |y| TileCoords::new(x, y)))
    }

    /// All occupied tiles and their occupants.
    pub fn occupied_tiles(&self) -> impl Iterator<Item = (TileCoords, PieceId)> + '_ {
        self.occupancy.iter().map(|(t, p)| (*t, *p))
    }

    pub(crate) fn place_raw(&mut self, tile: TileCoords, piece: PieceId) {
        self.occupancy.insert(tile, piece);
    }

    pub(crate) fn clear_raw(&mut self, tile: TileCoords) {
        self.occupancy.remove(&tile);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}
