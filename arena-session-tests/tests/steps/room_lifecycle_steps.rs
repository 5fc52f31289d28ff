use arena_session_core::{RoomCommand, SessionStatus};
use arena_session_tests::{RoomWorld, error_kind, participant, room};
use cucumber::{given, then, when};

// ===== Given Steps =====

#[given(expr = "a room {string} created by {word}")]
async fn room_created_by(world: &mut RoomWorld, code: String, creator: String) {
    world.execute(RoomCommand::CreateRoom {
        room_code: Some(room(&code)),
        creator: participant(&creator),
    });
    assert!(world.last_error.is_none(), "{:?}", world.last_error);
}

#[given(expr = "{word} has joined room {string}")]
async fn has_joined(world: &mut RoomWorld, who: String, code: String) {
    joins(world, who, code).await;
    assert!(world.last_error.is_none(), "{:?}", world.last_error);
}

/// Cells as "row,col" pairs separated by spaces; turns alternate from the
/// current turn holder
#[given(expr = "the moves {string} were played in room {string}")]
async fn moves_played(world: &mut RoomWorld, cells: String, code: String) {
    for cell in cells.split_whitespace() {
        let (row, col) = cell
            .split_once(',')
            .and_then(|(r, c)| Some((r.parse().ok()?, c.parse().ok()?)))
            .unwrap_or_else(|| panic!("Cells look like row,col, got '{cell}'"));

        let mover = world.snapshot(&code).current_turn;
        world.execute(RoomCommand::MakeMove {
            room_code: room(&code),
            participant: mover,
            row,
            col,
        });
        assert!(world.last_error.is_none(), "{cell}: {:?}", world.last_error);
    }
}

// ===== When Steps =====

#[when(expr = "{word} creates a room")]
async fn creates_room(world: &mut RoomWorld, creator: String) {
    world.execute(RoomCommand::CreateRoom {
        room_code: None,
        creator: participant(&creator),
    });
}

#[when(expr = "{word} creates a room with code {string}")]
async fn creates_room_with_code(world: &mut RoomWorld, creator: String, code: String) {
    world.execute(RoomCommand::CreateRoom {
        room_code: Some(room(&code)),
        creator: participant(&creator),
    });
}

#[when(expr = "{word} joins room {string}")]
async fn joins(world: &mut RoomWorld, who: String, code: String) {
    world.execute(RoomCommand::JoinRoom {
        room_code: room(&code),
        participant: participant(&who),
    });
}

#[when(expr = "{word} moves at row {int} col {int} in room {string}")]
async fn moves(world: &mut RoomWorld, who: String, row: u8, col: u8, code: String) {
    world.execute(RoomCommand::MakeMove {
        room_code: room(&code),
        participant: participant(&who),
        row,
        col,
    });
}

#[when(expr = "{word} leaves room {string}")]
async fn leaves(world: &mut RoomWorld, who: String, code: String) {
    world.execute(RoomCommand::LeaveRoom {
        room_code: room(&code),
        participant: participant(&who),
    });
}

#[when(expr = "{word} destroys room {string}")]
async fn destroys(world: &mut RoomWorld, who: String, code: String) {
    world.execute(RoomCommand::DestroyRoom {
        room_code: room(&code),
        participant: participant(&who),
    });
}

// ===== Then Steps =====

#[then("the command succeeds")]
async fn command_succeeds(world: &mut RoomWorld) {
    assert!(
        world.last_error.is_none(),
        "Expected success, got {:?}",
        world.last_error
    );
    assert!(world.last_event.is_some());
}

#[then(expr = "the command fails with {word}")]
async fn command_fails_with(world: &mut RoomWorld, kind: String) {
    let error = world
        .last_error
        .as_ref()
        .unwrap_or_else(|| panic!("Expected {kind}, got {:?}", world.last_event));
    assert_eq!(error_kind(error), kind, "{error}");
}

#[then(expr = "a new room is open for {word}")]
async fn new_room_open(world: &mut RoomWorld, who: String) {
    let code = world
        .last_event
        .as_ref()
        .map(|e| e.room_code().clone())
        .expect("No event");

    let snapshot = world.snapshot(code.as_str());
    assert_eq!(snapshot.player1, participant(&who));
    assert_eq!(snapshot.status, SessionStatus::Waiting);
    assert_eq!(code.as_str().len(), 6);
}

#[then(expr = "room {string} is {word}")]
async fn room_status(world: &mut RoomWorld, code: String, status: String) {
    assert_eq!(world.snapshot(&code).status.as_str(), status);
}

#[then(expr = "the turn in room {string} belongs to {word}")]
async fn turn_belongs_to(world: &mut RoomWorld, code: String, who: String) {
    assert_eq!(world.snapshot(&code).current_turn, participant(&who));
}

#[then(expr = "the second seat of room {string} is held by {word}")]
async fn second_seat(world: &mut RoomWorld, code: String, who: String) {
    assert_eq!(world.snapshot(&code).player2, Some(participant(&who)));
}

#[then(expr = "the winner of room {string} is {word}")]
async fn winner_is(world: &mut RoomWorld, code: String, who: String) {
    assert_eq!(world.snapshot(&code).winner, Some(participant(&who)));
}

#[then(expr = "room {string} has no winner")]
async fn no_winner(world: &mut RoomWorld, code: String) {
    assert_eq!(world.snapshot(&code).winner, None);
}

#[then(expr = "the ledger of room {string} has {int} moves")]
async fn ledger_len(world: &mut RoomWorld, code: String, count: usize) {
    let moves = world.service.moves(&room(&code)).expect("Room not found");
    assert_eq!(moves.len(), count);
    assert!(
        moves.iter().enumerate().all(|(i, m)| m.sequence == i as u64),
        "Ledger sequence has gaps"
    );
}

#[then(expr = "the board of room {string} reads {string}")]
async fn board_reads(world: &mut RoomWorld, code: String, board: String) {
    assert_eq!(world.snapshot(&code).board.to_string(), board);
}

#[then(expr = "room {string} no longer exists")]
async fn room_gone(world: &mut RoomWorld, code: String) {
    assert!(world.service.snapshot(&room(&code)).is_err());
    assert!(!world.service.registry().contains(&room(&code)));
}

#[then(expr = "the active room of {word} is {string}")]
async fn active_room_is(world: &mut RoomWorld, who: String, code: String) {
    let active = world.service.active_room_for(participant(&who));
    assert!(active.has_active_game);
    assert_eq!(active.room_code, Some(room(&code)));
}

#[then(expr = "{word} has no active room")]
async fn no_active_room(world: &mut RoomWorld, who: String) {
    let active = world.service.active_room_for(participant(&who));
    assert!(!active.has_active_game);
    assert_eq!(active.room_code, None);
}
