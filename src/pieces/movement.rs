//! Move-tile enumeration.
//!
//! `valid_move_tiles` applies a piece's movement pattern (and its
//! clear-path requirement, where the type has one) to every board tile.
//! Destination emptiness is deliberately not checked here: whether a
//! move may land on a tile is decided by the authority boundary, which
//! also turns a move onto an enemy into an attack for types that allow
//! it.

use crate::board::TileCoords;
use crate::core::{PieceId, RulesError};
use crate::state::MatchState;

use super::behavior::behavior;

/// All board tiles a piece could move to by pattern and path, ignoring
/// destination occupancy.
pub fn valid_move_tiles(state: &MatchState, piece: PieceId) -> Result<Vec<TileCoords>, RulesError> {
    let (from, owner, type_id) = {
        let p = state.piece(piece).ok_or(RulesError::UnknownPiece(piece))?;
        let from = p.tile().ok_or(RulesError::UnknownPiece(piece))?;
        (from, p.owner(), p.type_id())
    };
    let b = behavior(type_id);
    let facing = owner.facing();

    Ok(state
        .board()
        .all_tiles()
        .filter(|&to| {
            to != from
                && b.movement_pattern(to.offset_from(from, facing))
                && (!b.path_aware() || state.board().path_is_clear(from, to))
        })
        .collect())
}

/// Whether `to` is a legal move destination for the piece by pattern
/// and path.
pub fn can_reach(state: &MatchState, piece: PieceId, to: TileCoords) -> Result<bool, RulesError> {
    Ok(valid_move_tiles(state, piece)?.contains(&to))
}
