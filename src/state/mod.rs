//! Authoritative match state.
//!
//! ## Layout
//!
//! `MatchState` owns everything a match is: the board, the piece arena,
//! both player slots, the match status machine, the most recent
//! valid-target computation and the event journal. Persistent
//! collections (`im`) back the journal and owned-piece sets so the whole
//! state clones cheaply; a non-authoritative participant may keep such a
//! clone as a read-only predicted projection and discard it whenever the
//! authority's snapshot arrives.
//!
//! ## Mutation discipline
//!
//! Occupancy changes go through [`MatchState::set_occupant`], the single
//! writer that upholds the tile/piece bidirectional invariant. Stats
//! change only through the piece accessors and the modifier engine.
//! Every mutation appends the matching [`MatchEvent`].

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::abilities::TargetCache;
use crate::board::{Board, BoardConfig, TileCoords};
use crate::core::{PerPlayer, PieceId, PlayerId, RulesError};
use crate::events::MatchEvent;
use crate::pieces::behavior::behavior;
use crate::pieces::{Piece, PieceDefinition};

/// Overall phase of the match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    /// Participants are still connecting.
    WaitingForPlayers,
    /// Both players are placing their armies.
    SettingUpPieces,
    Player1Turn,
    Player2Turn,
    /// Terminal. A winner has been recorded and every further mutating
    /// command is rejected.
    EndingGame,
}

impl MatchStatus {
    /// The active player, once the match is in a turn phase.
    #[must_use]
    pub fn active_player(self) -> Option<PlayerId> {
        match self {
            MatchStatus::Player1Turn => Some(PlayerId::ONE),
            MatchStatus::Player2Turn => Some(PlayerId::TWO),
            _ => None,
        }
    }

    /// The turn phase in which `player` is active.
    #[must_use]
    pub fn turn_of(player: PlayerId) -> MatchStatus {
        if player == PlayerId::ONE {
            MatchStatus::Player1Turn
        } else {
            MatchStatus::Player2Turn
        }
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MatchStatus::WaitingForPlayers => "waiting for players",
            MatchStatus::SettingUpPieces => "setting up pieces",
            MatchStatus::Player1Turn => "Player 1's turn",
            MatchStatus::Player2Turn => "Player 2's turn",
            MatchStatus::EndingGame => "ending",
        };
        f.write_str(name)
    }
}

/// Where one participant is in their own action cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerStatus {
    Connecting,
    PlacingPieces,
    WaitingForTurn,
    SelectingPiece,
    SelectingAction,
    SelectingTargetMove,
    SelectingTargetActiveAbility,
}

/// How far the per-stat total of a merged modifier entry may stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StackingPolicy {
    /// Repeated stackable applications sum without limit.
    Unbounded,
    /// Each merged entry's per-stat delta magnitude is capped.
    Cap(i8),
}

impl Default for StackingPolicy {
    fn default() -> Self {
        StackingPolicy::Unbounded
    }
}

/// Match-level configuration, fixed at creation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub board: BoardConfig,
    pub stacking: StackingPolicy,
}

/// Per-participant turn-cycle state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSlot {
    pub status: PlayerStatus,
    /// The one move action this turn has been spent.
    pub move_used: bool,
    /// The one ability action this turn has been spent.
    pub ability_used: bool,
    pub ready: bool,
    pub pieces: im::HashSet<PieceId>,
}

impl Default for PlayerSlot {
    fn default() -> Self {
        Self {
            status: PlayerStatus::Connecting,
            move_used: false,
            ability_used: false,
            ready: false,
            pieces: im::HashSet::new(),
        }
    }
}

impl PlayerSlot {
    /// Reset the per-turn action flags. Happens exactly once per
    /// transition out of `WaitingForTurn`.
    pub(crate) fn reset_turn_flags(&mut self) {
        self.move_used = false;
        self.ability_used = false;
    }
}

/// The single authoritative match instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    config: MatchConfig,
    status: MatchStatus,
    /// Completed turn handoffs since match start.
    turn: u32,
    /// Elapsed match seconds, advanced by the transport.
    clock_seconds: u64,
    board: Board,
    pieces: FxHashMap<PieceId, Piece>,
    next_piece_id: u32,
    players: PerPlayer<PlayerSlot>,
    target_cache: Option<TargetCache>,
    journal: Vector<MatchEvent>,
    winner: Option<PlayerId>,
}

impl MatchState {
    /// Create a fresh match in `WaitingForPlayers`.
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        let board = Board::new(config.board.clone());
        Self {
            config,
            status: MatchStatus::WaitingForPlayers,
            turn: 0,
            clock_seconds: 0,
            board,
            pieces: FxHashMap::default(),
            next_piece_id: 0,
            players: PerPlayer::default(),
            target_cache: None,
            journal: Vector::new(),
            winner: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub fn status(&self) -> MatchStatus {
        self.status
    }

    pub(crate) fn set_status(&mut self, status: MatchStatus) {
        self.status = status;
    }

    /// Completed turn handoffs since the match started.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub(crate) fn advance_turn(&mut self) -> u32 {
        self.turn += 1;
        self.turn
    }

    /// Elapsed match seconds. The engine holds no timer; the transport
    /// advances this with [`MatchState::tick_clock`].
    #[must_use]
    pub fn clock_seconds(&self) -> u64 {
        self.clock_seconds
    }

    /// Advance the match clock.
    pub fn tick_clock(&mut self, seconds: u64) {
        self.clock_seconds += seconds;
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &PlayerSlot {
        &self.players[id]
    }

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> &mut PlayerSlot {
        &mut self.players[id]
    }

    /// The piece behind a handle, if it is still alive.
    #[must_use]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(&id)
    }

    pub(crate) fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.get_mut(&id)
    }

    /// Iterate over all live pieces.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.values()
    }

    /// Live pieces owned by `player`, in arena order.
    pub fn pieces_of(&self, player: PlayerId) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces.values().filter(move |p| p.owner() == player)
    }

    /// Create a piece for `owner` from a definition. The piece starts
    /// off-board.
    pub fn spawn_piece(&mut self, definition: &PieceDefinition, owner: PlayerId) -> PieceId {
        let id = PieceId::new(self.next_piece_id);
        self.next_piece_id += 1;
        let piece = Piece::from_definition(id, definition, owner);
        self.pieces.insert(id, piece);
        self.players[owner].pieces.insert(id);
        id
    }

    /// The only writer of board occupancy.
    ///
    /// `Some(piece)` moves that piece onto `tile`, atomically clearing
    /// its previous tile. `None` clears the tile, detaching any occupant
    /// from the board. Occupying a tile that holds a different live
    /// piece is a contract violation and is rejected without mutation.
    pub fn set_occupant(&mut self, tile: TileCoords, occupant: Option<PieceId>) -> Result<(), RulesError> {
        if !self.board.contains(tile) {
            return Err(RulesError::InvalidPlacement { tile });
        }
        match occupant {
            Some(id) => {
                if !self.pieces.contains_key(&id) {
                    return Err(RulesError::UnknownPiece(id));
                }
                if let Some(other) = self.board.occupant_of(tile) {
                    if other != id {
                        return Err(RulesError::OccupancyConflict { tile });
                    }
                    return Ok(());
                }
                let from = self.pieces[&id].tile();
                if let Some(prev) = from {
                    self.board.clear_raw(prev);
                }
                self.board.place_raw(tile, id);
                if let Some(piece) = self.pieces.get_mut(&id) {
                    piece.set_tile(Some(tile));
                }
                self.emit(MatchEvent::OccupancyChanged {
                    piece: id,
                    from,
                    to: Some(tile),
                });
            }
            None => {
                if let Some(id) = self.board.occupant_of(tile) {
                    self.board.clear_raw(tile);
                    if let Some(piece) = self.pieces.get_mut(&id) {
                        piece.set_tile(None);
                    }
                    self.emit(MatchEvent::OccupancyChanged {
                        piece: id,
                        from: Some(tile),
                        to: None,
                    });
                }
            }
        }
        Ok(())
    }

    /// Kill a piece: run its death hook, then remove it from the board,
    /// its owner's set and the arena.
    pub(crate) fn kill_piece(&mut self, id: PieceId) -> Result<(), RulesError> {
        let (type_id, owner, tile) = {
            let piece = self.piece(id).ok_or(RulesError::UnknownPiece(id))?;
            (piece.type_id(), piece.owner(), piece.tile())
        };

        // The hook runs while the piece is still on the board so it can
        // observe the final position (commander death ends the match).
        behavior(type_id).on_death(self, id);

        if let Some(tile) = tile {
            self.board.clear_raw(tile);
            self.emit(MatchEvent::OccupancyChanged {
                piece: id,
                from: Some(tile),
                to: None,
            });
        }
        self.pieces.remove(&id);
        self.players[owner].pieces.remove(&id);
        self.emit(MatchEvent::PieceKilled { piece: id, owner });
        Ok(())
    }

    /// Enter the terminal state and record the winner. Idempotent.
    pub(crate) fn end_match(&mut self, winner: Option<PlayerId>) {
        if self.status == MatchStatus::EndingGame {
            return;
        }
        self.status = MatchStatus::EndingGame;
        self.winner = winner;
        self.target_cache = None;
        self.emit(MatchEvent::MatchEnded { winner });
    }

    /// Recompute position-dependent passive modifiers after an
    /// occupancy change.
    pub(crate) fn refresh_auras(&mut self) {
        crate::pieces::types::recruit::refresh_phalanx(self);
    }

    #[must_use]
    pub(crate) fn target_cache(&self) -> Option<&TargetCache> {
        self.target_cache.as_ref()
    }

    pub(crate) fn set_target_cache(&mut self, cache: TargetCache) {
        self.target_cache = Some(cache);
    }

    pub(crate) fn clear_target_cache(&mut self) {
        self.target_cache = None;
    }

    /// Append an event to the journal.
    pub(crate) fn emit(&mut self, event: MatchEvent) {
        self.journal.push_back(event);
    }

    /// The full event journal since match creation.
    #[must_use]
    pub fn events(&self) -> &Vector<MatchEvent> {
        &self.journal
    }

    /// Events appended after the first `seen` entries. Consumers track
    /// their own cursor.
    pub fn events_since(&self, seen: usize) -> impl Iterator<Item = &MatchEvent> {
        self.journal.iter().skip(seen)
    }

    /// Serialize the full authoritative state. A non-authoritative
    /// participant overwrites its local copy with this on desync.
    pub fn snapshot(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Rebuild state from an authority snapshot.
    pub fn restore(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new(MatchConfig::default())
    }
}
