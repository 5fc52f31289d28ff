use arena_session_core::{RoomCommand, RoomEvent, SessionStatus};
use arena_session_tests::{RoomWorld, participant, room};
use cucumber::{then, when};

#[when(expr = "{word} requests a rematch in room {string}")]
async fn requests_rematch(world: &mut RoomWorld, who: String, code: String) {
    world.execute(RoomCommand::RequestRematch {
        room_code: room(&code),
        participant: participant(&who),
    });
}

#[then(expr = "the rematch is pending with {int} of 2 votes")]
async fn rematch_pending(world: &mut RoomWorld, count: u8) {
    match &world.last_event {
        Some(RoomEvent::RematchPending { votes, .. }) => assert_eq!(votes.count(), count),
        other => panic!("Expected RematchPending, got {other:?} / {:?}", world.last_error),
    }
}

#[then(expr = "room {string} does not forward anywhere")]
async fn no_forwarding(world: &mut RoomWorld, code: String) {
    assert_eq!(world.snapshot(&code).next_room_code, None);
}

#[then(expr = "room {string} forwards to a new room")]
async fn forwards(world: &mut RoomWorld, code: String) {
    let snapshot = world.snapshot(&code);
    let next = snapshot.next_room_code.expect("No forwarding pointer");

    assert_ne!(next, snapshot.room_code);
    assert!(matches!(
        &world.last_event,
        Some(RoomEvent::RematchAgreed { next_room_code, .. }) if *next_room_code == next
    ));
}

#[then(expr = "the rematch room of {string} is in progress with {word} moving first")]
async fn rematch_room_started(world: &mut RoomWorld, code: String, who: String) {
    let old = world.snapshot(&code);
    let next = old.next_room_code.expect("No forwarding pointer");
    let fresh = world.snapshot(next.as_str());

    assert_eq!(fresh.status, SessionStatus::InProgress);
    assert_eq!(fresh.player1, old.player1);
    assert_eq!(fresh.player2, old.player2);
    assert_eq!(fresh.current_turn, participant(&who));
    assert_eq!(fresh.move_count, 0);
}

#[then(expr = "{int} rooms exist")]
async fn room_count(world: &mut RoomWorld, count: usize) {
    assert_eq!(world.service.registry().len(), count);
}
