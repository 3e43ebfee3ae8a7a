//! One module per piece type.

pub mod academy_recruit;
pub mod assassin;
pub mod captain;
pub mod cryomancer;
pub mod guardian;
pub mod king;
pub mod knight;
pub mod pyromancer;
pub mod recruit;
pub mod war_mage;

use crate::abilities::{TargetList, TargetRef};
use crate::board::{StepOffset, TileCoords};
use crate::core::{PieceId, PlayerId};
use crate::state::MatchState;

/// Board tiles whose facing-relative offset from `from` satisfies the
/// predicate.
fn tiles_matching(
    state: &MatchState,
    from: TileCoords,
    facing: i8,
    pred: impl Fn(StepOffset) -> bool,
) -> Vec<TileCoords> {
    state
        .board()
        .all_tiles()
        .filter(|&tile| tile != from && pred(tile.offset_from(from, facing)))
        .collect()
}

/// Dual piece-or-tile targets: for every tile in range holding a piece
/// of the wanted alignment with a clear path from the caster, both the
/// piece and its tile are selectable.
fn occupant_targets(
    state: &MatchState,
    caster_owner: PlayerId,
    caster_tile: TileCoords,
    range: &[TileCoords],
    friendly: bool,
) -> TargetList {
    let mut targets = TargetList::new();
    for &tile in range {
        let Some(occupant) = state.board().occupant_of(tile) else {
            continue;
        };
        let Some(piece) = state.piece(occupant) else {
            continue;
        };
        if (piece.owner() == caster_owner) == friendly
            && state.board().path_is_clear(caster_tile, tile)
        {
            targets.push(TargetRef::Piece(occupant));
            targets.push(TargetRef::Tile(tile));
        }
    }
    targets
}

/// Resolve a chosen target to the piece it denotes, whichever form the
/// player clicked.
fn target_piece(state: &MatchState, target: TargetRef) -> Option<PieceId> {
    match target {
        TargetRef::Piece(id) => state.piece(id).map(|p| p.id()),
        TargetRef::Tile(tile) => state.board().occupant_of(tile),
    }
}
