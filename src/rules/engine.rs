//! The authority: the single process allowed to mutate match state.
//!
//! ## Atomicity
//!
//! `apply` validates and executes a command against a working clone of
//! the state and commits the clone only on success, so a rejected
//! command never partially mutates anything. The persistent collections
//! inside `MatchState` make that clone cheap.
//!
//! ## Turn handoff
//!
//! Ending a turn runs, in order: modifier durations and ability
//! cooldowns tick for the player who just acted, the match status flips,
//! the new active player's status and action flags reset, and the new
//! active player's turn-start passives fire.

use crate::abilities;
use crate::board::TileCoords;
use crate::core::{PieceId, PlayerId, RulesError};
use crate::events::MatchEvent;
use crate::pieces::behavior::behavior;
use crate::pieces::{movement, PieceRegistry, PieceTypeId};
use crate::state::{MatchConfig, MatchState, MatchStatus, PlayerStatus};

use super::command::{Command, CommandReply};

/// Validates and applies commands under single-writer semantics.
pub struct Authority {
    registry: PieceRegistry,
    state: MatchState,
}

impl Authority {
    /// Create an authority over a fresh match.
    #[must_use]
    pub fn new(registry: PieceRegistry, config: MatchConfig) -> Self {
        Self {
            registry,
            state: MatchState::new(config),
        }
    }

    /// An authority with the standard piece set and default board.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(PieceRegistry::standard(), MatchConfig::default())
    }

    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    #[must_use]
    pub fn registry(&self) -> &PieceRegistry {
        &self.registry
    }

    /// Advance the match clock. Real time belongs to the transport.
    pub fn tick_clock(&mut self, seconds: u64) {
        self.state.tick_clock(seconds);
    }

    /// Mark a participant as connected. Once both are, setup begins.
    pub fn connect(&mut self, player: PlayerId) {
        if self.state.player(player).status == PlayerStatus::Connecting {
            self.state.player_mut(player).status = PlayerStatus::PlacingPieces;
        }
        let both_in = PlayerId::both()
            .all(|p| self.state.player(p).status != PlayerStatus::Connecting);
        if both_in && self.state.status() == MatchStatus::WaitingForPlayers {
            self.state.set_status(MatchStatus::SettingUpPieces);
        }
    }

    /// Validate and apply one command from `player`.
    ///
    /// Accepted commands commit their full effect chain; rejected ones
    /// leave the state untouched.
    pub fn apply(&mut self, player: PlayerId, command: Command) -> Result<CommandReply, RulesError> {
        let mut next = self.state.clone();
        match apply_inner(&mut next, &self.registry, player, &command) {
            Ok(reply) => {
                log::debug!("{player}: accepted {command:?}");
                self.state = next;
                Ok(reply)
            }
            Err(err) => {
                log::debug!("{player}: rejected {command:?}: {err}");
                Err(err)
            }
        }
    }
}

fn apply_inner(
    state: &mut MatchState,
    registry: &PieceRegistry,
    player: PlayerId,
    command: &Command,
) -> Result<CommandReply, RulesError> {
    if state.status() == MatchStatus::EndingGame {
        return Err(RulesError::MatchOver);
    }

    match *command {
        Command::PlacePiece { type_id, tile } => place_piece(state, registry, player, type_id, tile),
        Command::MovePiece { piece, to } => move_piece(state, player, piece, to),
        Command::Attack {
            attacker,
            defender,
            relocate,
        } => attack(state, player, attacker, defender, relocate),
        Command::RequestMoveTargets { piece } => request_move_targets(state, player, piece),
        Command::RequestAbilityTargets { piece, active } => {
            request_targets(state, player, piece, active)
        }
        Command::UseAbility { piece, ref targets } => {
            use_ability(state, registry, player, piece, targets)
        }
        Command::EndTurn => end_turn(state, registry, player),
        Command::SetReady(ready) => set_ready(state, registry, player, ready),
    }
}

fn reject(player: PlayerId, state: &MatchState) -> RulesError {
    RulesError::InvalidCommandForTurnState {
        player,
        status: state.status(),
    }
}

/// The command must come from the active player, who must own `piece`.
fn require_own_piece(state: &MatchState, player: PlayerId, piece: PieceId) -> Result<(), RulesError> {
    if state.status().active_player() != Some(player) {
        return Err(reject(player, state));
    }
    let owner = state
        .piece(piece)
        .map(|p| p.owner())
        .ok_or(RulesError::UnknownPiece(piece))?;
    if owner != player {
        return Err(reject(player, state));
    }
    Ok(())
}

fn place_piece(
    state: &mut MatchState,
    registry: &PieceRegistry,
    player: PlayerId,
    type_id: PieceTypeId,
    tile: TileCoords,
) -> Result<CommandReply, RulesError> {
    if state.status() != MatchStatus::SettingUpPieces
        || state.player(player).status != PlayerStatus::PlacingPieces
        || state.player(player).ready
    {
        return Err(reject(player, state));
    }
    if !state.board().in_placement_zone(player, tile) || state.board().occupant_of(tile).is_some() {
        return Err(RulesError::InvalidPlacement { tile });
    }
    let definition = registry
        .get(type_id)
        .ok_or(RulesError::UnknownPieceType(type_id))?
        .clone();

    let id = state.spawn_piece(&definition, player);
    state.set_occupant(tile, Some(id))?;
    Ok(CommandReply::Accepted)
}

fn move_piece(
    state: &mut MatchState,
    player: PlayerId,
    piece: PieceId,
    to: TileCoords,
) -> Result<CommandReply, RulesError> {
    require_own_piece(state, player, piece)?;
    if state.player(player).move_used {
        return Err(reject(player, state));
    }
    if !movement::can_reach(state, piece, to)? {
        return Err(RulesError::InvalidMovement { piece, to });
    }

    match state.board().occupant_of(to) {
        None => {
            state.set_occupant(to, Some(piece))?;
        }
        Some(occupant) => {
            let type_id = state
                .piece(piece)
                .map(|p| p.type_id())
                .ok_or(RulesError::UnknownPiece(piece))?;
            let hostile = state.piece(occupant).is_some_and(|p| p.owner() != player);
            if !hostile || !behavior(type_id).moves_onto_enemies() {
                return Err(RulesError::InvalidMovement { piece, to });
            }
            // A move onto an enemy is an attack with relocation.
            state.resolve_attack(piece, occupant, true, true)?;
        }
    }

    state.player_mut(player).move_used = true;
    state.player_mut(player).status = PlayerStatus::SelectingAction;
    state.clear_target_cache();
    state.refresh_auras();
    Ok(CommandReply::Accepted)
}

fn attack(
    state: &mut MatchState,
    player: PlayerId,
    attacker: PieceId,
    defender: PieceId,
    relocate: bool,
) -> Result<CommandReply, RulesError> {
    require_own_piece(state, player, attacker)?;
    if state.player(player).move_used {
        return Err(reject(player, state));
    }
    let defender_tile = state
        .piece(defender)
        .filter(|p| p.owner() != player)
        .and_then(|p| p.tile())
        .ok_or(RulesError::InvalidTarget)?;
    if !movement::can_reach(state, attacker, defender_tile)? {
        return Err(RulesError::InvalidMovement {
            piece: attacker,
            to: defender_tile,
        });
    }

    state.resolve_attack(attacker, defender, relocate, true)?;
    state.player_mut(player).move_used = true;
    state.player_mut(player).status = PlayerStatus::SelectingAction;
    state.clear_target_cache();
    Ok(CommandReply::Accepted)
}

fn request_move_targets(
    state: &mut MatchState,
    player: PlayerId,
    piece: PieceId,
) -> Result<CommandReply, RulesError> {
    require_own_piece(state, player, piece)?;
    if state.player(player).move_used {
        return Err(reject(player, state));
    }
    let tiles = movement::valid_move_tiles(state, piece)?;
    if !tiles.is_empty() {
        state.player_mut(player).status = PlayerStatus::SelectingTargetMove;
    }
    Ok(CommandReply::Targets(
        tiles.into_iter().map(crate::abilities::TargetRef::Tile).collect(),
    ))
}

fn request_targets(
    state: &mut MatchState,
    player: PlayerId,
    piece: PieceId,
    active: bool,
) -> Result<CommandReply, RulesError> {
    require_own_piece(state, player, piece)?;
    let targets = abilities::request_targets(state, piece, active)?;
    // A piece with no active ability, or none it could use here, leaves
    // the player where they were.
    if active && !targets.is_empty() {
        state.player_mut(player).status = PlayerStatus::SelectingTargetActiveAbility;
    }
    Ok(CommandReply::Targets(targets.into_vec()))
}

fn use_ability(
    state: &mut MatchState,
    registry: &PieceRegistry,
    player: PlayerId,
    piece: PieceId,
    targets: &[crate::abilities::TargetRef],
) -> Result<CommandReply, RulesError> {
    require_own_piece(state, player, piece)?;
    if state.player(player).ability_used {
        return Err(reject(player, state));
    }

    abilities::use_active(state, registry, piece, targets)?;
    state.player_mut(player).ability_used = true;
    state.player_mut(player).status = PlayerStatus::SelectingAction;
    state.refresh_auras();
    Ok(CommandReply::Accepted)
}

fn end_turn(
    state: &mut MatchState,
    registry: &PieceRegistry,
    player: PlayerId,
) -> Result<CommandReply, RulesError> {
    if state.status().active_player() != Some(player) {
        return Err(reject(player, state));
    }

    // An abandoned targeting sequence carries no state beyond the
    // cache, which the handoff discards.
    state.clear_target_cache();

    state.decrement_durations(player);
    let owned: Vec<PieceId> = state.pieces_of(player).map(|p| p.id()).collect();
    for id in owned {
        if let Some(piece) = state.piece_mut(id) {
            piece.tick_cooldowns();
        }
    }
    // A duration expiry hook may have ended the match.
    if state.status() == MatchStatus::EndingGame {
        return Ok(CommandReply::Accepted);
    }

    let next_player = player.opponent();
    state.set_status(MatchStatus::turn_of(next_player));
    state.player_mut(player).status = PlayerStatus::WaitingForTurn;
    {
        let slot = state.player_mut(next_player);
        slot.status = PlayerStatus::SelectingPiece;
        slot.reset_turn_flags();
    }
    let turn = state.advance_turn();
    state.emit(MatchEvent::TurnChanged {
        active: next_player,
        turn,
    });
    log::debug!("turn {turn}: {next_player} is active");

    abilities::run_turn_start_passives(state, registry, next_player);
    Ok(CommandReply::Accepted)
}

fn set_ready(
    state: &mut MatchState,
    registry: &PieceRegistry,
    player: PlayerId,
    ready: bool,
) -> Result<CommandReply, RulesError> {
    if state.status() != MatchStatus::SettingUpPieces {
        return Err(reject(player, state));
    }
    state.player_mut(player).ready = ready;

    if PlayerId::both().all(|p| state.player(p).ready) {
        start_match(state, registry);
    }
    Ok(CommandReply::Accepted)
}

/// Both players readied up: reveal the armies and begin player 1's turn.
fn start_match(state: &mut MatchState, registry: &PieceRegistry) {
    state.set_status(MatchStatus::Player1Turn);
    {
        let slot = state.player_mut(PlayerId::ONE);
        slot.status = PlayerStatus::SelectingPiece;
        slot.reset_turn_flags();
    }
    state.player_mut(PlayerId::TWO).status = PlayerStatus::WaitingForTurn;
    state.emit(MatchEvent::MatchStarted);

    // Game-start passives: formation bonuses seed from the initial
    // placement, then the first-turn player's turn-start passives fire.
    state.refresh_auras();
    abilities::run_turn_start_passives(state, registry, PlayerId::ONE);
}
