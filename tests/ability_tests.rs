//! Ability protocol tests driven through the authority.

use skirmish::{
    AbilityTag, Authority, Command, CommandReply, PieceId, PieceTypeId, PlayerId, PlayerStatus,
    RulesError, TargetRef, TileCoords,
};

fn place(authority: &mut Authority, player: PlayerId, type_id: PieceTypeId, tile: TileCoords) {
    authority
        .apply(player, Command::PlacePiece { type_id, tile })
        .unwrap();
}

fn start(authority: &mut Authority) {
    authority.apply(PlayerId::ONE, Command::SetReady(true)).unwrap();
    authority.apply(PlayerId::TWO, Command::SetReady(true)).unwrap();
}

fn piece_of(authority: &Authority, player: PlayerId, type_id: PieceTypeId) -> PieceId {
    authority
        .state()
        .pieces_of(player)
        .find(|p| p.type_id() == type_id)
        .unwrap()
        .id()
}

fn knight_match() -> (Authority, PieceId) {
    let mut authority = Authority::standard();
    authority.connect(PlayerId::ONE);
    authority.connect(PlayerId::TWO);
    place(&mut authority, PlayerId::ONE, PieceTypeId::Knight, TileCoords::new(3, 1));
    place(&mut authority, PlayerId::TWO, PieceTypeId::King, TileCoords::new(3, 9));
    start(&mut authority);
    let knight = piece_of(&authority, PlayerId::ONE, PieceTypeId::Knight);
    (authority, knight)
}

#[test]
fn test_two_step_protocol_happy_path() {
    let (mut authority, knight) = knight_match();

    let reply = authority
        .apply(
            PlayerId::ONE,
            Command::RequestAbilityTargets {
                piece: knight,
                active: true,
            },
        )
        .unwrap();
    let CommandReply::Targets(targets) = reply else {
        panic!("expected a target list");
    };
    let destination = TargetRef::Tile(TileCoords::new(3, 3));
    assert!(targets.contains(&destination));
    assert_eq!(
        authority.state().player(PlayerId::ONE).status,
        PlayerStatus::SelectingTargetActiveAbility
    );

    authority
        .apply(
            PlayerId::ONE,
            Command::UseAbility {
                piece: knight,
                targets: [destination].into_iter().collect(),
            },
        )
        .unwrap();
    let state = authority.state();
    assert_eq!(state.piece(knight).unwrap().tile(), Some(TileCoords::new(3, 3)));
    assert!(state.player(PlayerId::ONE).ability_used);
    // The move action is still available.
    assert!(!state.player(PlayerId::ONE).move_used);
}

#[test]
fn test_use_without_request_rejected_without_mutation() {
    let (mut authority, knight) = knight_match();

    let err = authority
        .apply(
            PlayerId::ONE,
            Command::UseAbility {
                piece: knight,
                targets: [TargetRef::Tile(TileCoords::new(3, 3))].into_iter().collect(),
            },
        )
        .unwrap_err();
    assert_eq!(err, RulesError::InvalidTarget);

    let state = authority.state();
    assert_eq!(state.piece(knight).unwrap().tile(), Some(TileCoords::new(3, 1)));
    assert_eq!(state.piece(knight).unwrap().active_cooldown(), 0);
    assert!(!state.player(PlayerId::ONE).ability_used);
}

#[test]
fn test_stale_targets_rejected_after_turn_change() {
    let (mut authority, knight) = knight_match();

    authority
        .apply(
            PlayerId::ONE,
            Command::RequestAbilityTargets {
                piece: knight,
                active: true,
            },
        )
        .unwrap();
    authority.apply(PlayerId::ONE, Command::EndTurn).unwrap();
    authority.apply(PlayerId::TWO, Command::EndTurn).unwrap();

    // The cached set belongs to a previous turn.
    let err = authority
        .apply(
            PlayerId::ONE,
            Command::UseAbility {
                piece: knight,
                targets: [TargetRef::Tile(TileCoords::new(3, 3))].into_iter().collect(),
            },
        )
        .unwrap_err();
    assert_eq!(err, RulesError::InvalidTarget);
}

#[test]
fn test_one_ability_per_turn_and_cooldown() {
    let (mut authority, knight) = knight_match();

    authority
        .apply(
            PlayerId::ONE,
            Command::RequestAbilityTargets {
                piece: knight,
                active: true,
            },
        )
        .unwrap();
    authority
        .apply(
            PlayerId::ONE,
            Command::UseAbility {
                piece: knight,
                targets: [TargetRef::Tile(TileCoords::new(3, 3))].into_iter().collect(),
            },
        )
        .unwrap();

    // The per-turn flag blocks a second activation outright.
    let err = authority
        .apply(
            PlayerId::ONE,
            Command::UseAbility {
                piece: knight,
                targets: [TargetRef::Tile(TileCoords::new(3, 5))].into_iter().collect(),
            },
        )
        .unwrap_err();
    assert!(matches!(err, RulesError::InvalidCommandForTurnState { .. }));
    assert_eq!(authority.state().piece(knight).unwrap().active_cooldown(), 2);

    // One full turn cycle ticks the cooldown down for the owner only.
    authority.apply(PlayerId::ONE, Command::EndTurn).unwrap();
    authority.apply(PlayerId::TWO, Command::EndTurn).unwrap();
    assert_eq!(authority.state().piece(knight).unwrap().active_cooldown(), 1);

    authority
        .apply(
            PlayerId::ONE,
            Command::RequestAbilityTargets {
                piece: knight,
                active: true,
            },
        )
        .unwrap();
    let err = authority
        .apply(
            PlayerId::ONE,
            Command::UseAbility {
                piece: knight,
                targets: [TargetRef::Tile(TileCoords::new(3, 5))].into_iter().collect(),
            },
        )
        .unwrap_err();
    assert_eq!(err, RulesError::AbilityUnavailable { piece: knight });
}

#[test]
fn test_inspire_fires_at_match_start_for_player_one() {
    let mut authority = Authority::standard();
    authority.connect(PlayerId::ONE);
    authority.connect(PlayerId::TWO);
    place(&mut authority, PlayerId::ONE, PieceTypeId::Captain, TileCoords::new(3, 0));
    place(&mut authority, PlayerId::ONE, PieceTypeId::Knight, TileCoords::new(2, 0));
    place(&mut authority, PlayerId::TWO, PieceTypeId::Captain, TileCoords::new(3, 9));
    place(&mut authority, PlayerId::TWO, PieceTypeId::Knight, TileCoords::new(2, 9));
    start(&mut authority);

    let p1_knight = piece_of(&authority, PlayerId::ONE, PieceTypeId::Knight);
    let p2_knight = piece_of(&authority, PlayerId::TWO, PieceTypeId::Knight);

    // Player 1's captain inspired its neighbor at game start; player
    // 2's waits for its own turn.
    assert_eq!(authority.state().piece(p1_knight).unwrap().current_strength(), 4);
    assert_eq!(authority.state().piece(p2_knight).unwrap().current_strength(), 3);

    authority.apply(PlayerId::ONE, Command::EndTurn).unwrap();
    assert_eq!(authority.state().piece(p2_knight).unwrap().current_strength(), 4);
    // Player 1's buff expired with player 1's turn.
    assert_eq!(authority.state().piece(p1_knight).unwrap().current_strength(), 3);
}

#[test]
fn test_phalanx_follows_formation_through_commands() {
    let mut authority = Authority::standard();
    authority.connect(PlayerId::ONE);
    authority.connect(PlayerId::TWO);
    place(&mut authority, PlayerId::ONE, PieceTypeId::Recruit, TileCoords::new(3, 0));
    place(&mut authority, PlayerId::ONE, PieceTypeId::Recruit, TileCoords::new(3, 1));
    place(&mut authority, PlayerId::TWO, PieceTypeId::King, TileCoords::new(3, 9));
    start(&mut authority);

    let recruits: Vec<PieceId> = authority
        .state()
        .pieces_of(PlayerId::ONE)
        .map(|p| p.id())
        .collect();
    for &id in &recruits {
        assert_eq!(authority.state().piece(id).unwrap().current_strength(), 2);
        assert!(authority
            .state()
            .piece(id)
            .unwrap()
            .modifiers()
            .iter()
            .any(|m| m.ability == AbilityTag::Phalanx));
    }

    // Breaking the formation removes the bonus from both.
    let mover = *recruits
        .iter()
        .find(|&&id| authority.state().piece(id).unwrap().tile() == Some(TileCoords::new(3, 1)))
        .unwrap();
    authority
        .apply(
            PlayerId::ONE,
            Command::MovePiece {
                piece: mover,
                to: TileCoords::new(4, 1),
            },
        )
        .unwrap();
    for &id in &recruits {
        assert_eq!(authority.state().piece(id).unwrap().current_strength(), 1);
    }
}
