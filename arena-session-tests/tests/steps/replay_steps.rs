use arena_session_core::{PlaybackState, ReplayPlayer, board_at_step};
use arena_session_tests::{RoomWorld, room};
use cucumber::{then, when};

fn state_name(state: PlaybackState) -> &'static str {
    match state {
        PlaybackState::Stopped => "stopped",
        PlaybackState::Playing => "playing",
        PlaybackState::Paused => "paused",
    }
}

#[then(expr = "replaying room {string} to step {int} shows {string}")]
async fn replay_to_step(world: &mut RoomWorld, code: String, step_index: usize, board: String) {
    let snapshot = world.snapshot(&code);
    let moves = world.service.moves(&room(&code)).expect("Room not found");

    assert_eq!(board_at_step(&moves, snapshot.player1, step_index).to_string(), board);
}

#[then(expr = "replaying room {string} to the end shows its current board")]
async fn replay_to_end(world: &mut RoomWorld, code: String) {
    let snapshot = world.snapshot(&code);
    let moves = world.service.moves(&room(&code)).expect("Room not found");

    assert_eq!(
        board_at_step(&moves, snapshot.player1, moves.len()),
        snapshot.board
    );
}

#[when(expr = "the replay of room {string} is started")]
async fn replay_started(world: &mut RoomWorld, code: String) {
    let snapshot = world.snapshot(&code);
    let moves = world.service.moves(&room(&code)).expect("Room not found");

    let mut player = ReplayPlayer::new(moves, snapshot.player1);
    player.start();
    world.replay = Some(player);
}

#[when(expr = "the replay ticks {int} times")]
async fn replay_ticks(world: &mut RoomWorld, times: usize) {
    for _ in 0..times {
        world.replay().tick();
    }
}

#[when("the replay is paused or resumed")]
async fn replay_toggled(world: &mut RoomWorld) {
    world.replay().toggle_pause();
}

#[when("the replay is stopped")]
async fn replay_stopped(world: &mut RoomWorld) {
    world.replay().stop();
}

#[then(expr = "the replay is {word} at step {int}")]
async fn replay_state(world: &mut RoomWorld, state: String, step_index: usize) {
    let player = world.replay();
    assert_eq!(state_name(player.state()), state);
    assert_eq!(player.step(), step_index);
}

#[then(expr = "the replay board reads {string}")]
async fn replay_board(world: &mut RoomWorld, board: String) {
    assert_eq!(world.replay().board().to_string(), board);
}
