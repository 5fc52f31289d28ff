use crate::domain::{Board, Cell, Move, ParticipantId};
use serde::{Deserialize, Serialize};

/// Rebuild the board after the first `step` moves.
///
/// Marks are assigned by comparing each entry's participant with the slot-1
/// participant (`X`) so the result never depends on turn state.
pub fn board_at_step(moves: &[Move], player1: ParticipantId, step: usize) -> Board {
    moves
        .iter()
        .take(step)
        .fold(Board::new(), |mut board, mv| {
            let mark = if mv.participant == player1 {
                Cell::X
            } else {
                Cell::O
            };
            board.set(mv.row, mv.col, mark);
            board
        })
}

/// Playback state of a replay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

/// Step-by-step playback over a recorded ledger
///
/// The caller drives `tick` on a fixed interval; reaching the last move
/// pauses automatically.
#[derive(Debug, Clone)]
pub struct ReplayPlayer {
    moves: Vec<Move>,
    player1: ParticipantId,
    state: PlaybackState,
    step: usize,
}

impl ReplayPlayer {
    pub fn new(moves: Vec<Move>, player1: ParticipantId) -> Self {
        Self {
            moves,
            player1,
            state: PlaybackState::Stopped,
            step: 0,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn is_at_end(&self) -> bool {
        self.step >= self.moves.len()
    }

    /// Move shown by the current step, if any
    pub fn current_move(&self) -> Option<&Move> {
        self.step.checked_sub(1).and_then(|i| self.moves.get(i))
    }

    /// stopped → playing from step 0; no effect otherwise
    pub fn start(&mut self) {
        if self.state == PlaybackState::Stopped {
            self.step = 0;
            self.state = if self.moves.is_empty() {
                PlaybackState::Paused
            } else {
                PlaybackState::Playing
            };
        }
    }

    /// Advance one move while playing.
    ///
    /// Returns `true` when the step changed.
    pub fn tick(&mut self) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }

        let advanced = if self.is_at_end() {
            false
        } else {
            self.step += 1;
            true
        };

        if self.is_at_end() {
            self.state = PlaybackState::Paused;
        }

        advanced
    }

    /// playing ↔ paused; resuming at the last move rewinds to step 0
    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            PlaybackState::Playing => PlaybackState::Paused,
            PlaybackState::Paused if self.moves.is_empty() => PlaybackState::Paused,
            PlaybackState::Paused => {
                if self.is_at_end() {
                    self.step = 0;
                }
                PlaybackState::Playing
            }
            PlaybackState::Stopped => PlaybackState::Stopped,
        };
    }

    /// Back to stopped, discarding progress
    pub fn stop(&mut self) {
        self.state = PlaybackState::Stopped;
        self.step = 0;
    }

    pub fn board(&self) -> Board {
        board_at_step(&self.moves, self.player1, self.step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Timestamp;

    fn p(id: u64) -> ParticipantId {
        ParticipantId::new(id)
    }

    fn mv(sequence: u64, who: u64, row: u8, col: u8) -> Move {
        Move {
            sequence,
            participant: p(who),
            row,
            col,
            created_at: Timestamp::from_millis(sequence * 1000),
        }
    }

    fn scenario() -> Vec<Move> {
        vec![
            mv(0, 1, 1, 1),
            mv(1, 2, 0, 0),
            mv(2, 1, 1, 0),
            mv(3, 2, 2, 2),
            mv(4, 1, 1, 2),
        ]
    }

    #[test]
    fn test_board_at_step_zero_is_empty() {
        assert_eq!(board_at_step(&scenario(), p(1), 0), Board::new());
    }

    #[test]
    fn test_board_at_step_two_has_two_marks() {
        let board = board_at_step(&scenario(), p(1), 2);
        assert_eq!(board.to_string(), "O---X----");
        assert_eq!(board.filled_count(), 2);
    }

    #[test]
    fn test_board_at_step_clamps_to_ledger() {
        let full = board_at_step(&scenario(), p(1), 5);
        let beyond = board_at_step(&scenario(), p(1), 50);
        assert_eq!(full, beyond);
        assert_eq!(full.to_string(), "O--XXX--O");
    }

    #[test]
    fn test_marks_follow_slot_one_identity() {
        // Same moves, but slot 1 is user 2: every mark flips
        let board = board_at_step(&scenario(), p(2), 2);
        assert_eq!(board.to_string(), "X---O----");
    }

    #[test]
    fn test_playback_runs_to_end_then_pauses() {
        let mut player = ReplayPlayer::new(scenario(), p(1));
        assert_eq!(player.state(), PlaybackState::Stopped);

        player.start();
        assert_eq!(player.state(), PlaybackState::Playing);
        assert_eq!(player.step(), 0);

        for expected in 1..=5 {
            assert!(player.tick());
            assert_eq!(player.step(), expected);
        }

        assert_eq!(player.state(), PlaybackState::Paused);
        assert!(!player.tick());
        assert_eq!(player.step(), 5);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut player = ReplayPlayer::new(scenario(), p(1));
        player.start();
        player.tick();

        player.toggle_pause();
        assert_eq!(player.state(), PlaybackState::Paused);
        assert!(!player.tick());
        assert_eq!(player.step(), 1);

        player.toggle_pause();
        assert_eq!(player.state(), PlaybackState::Playing);
        assert!(player.tick());
        assert_eq!(player.step(), 2);
    }

    #[test]
    fn test_resume_at_end_rewinds() {
        let mut player = ReplayPlayer::new(scenario()[..3].to_vec(), p(1));
        player.start();
        while player.tick() {}
        assert_eq!(player.state(), PlaybackState::Paused);
        assert_eq!(player.step(), 3);

        player.toggle_pause();
        assert_eq!(player.state(), PlaybackState::Playing);
        assert_eq!(player.step(), 0);
        assert_eq!(player.board(), Board::new());

        assert!(player.tick());
        assert_eq!(player.step(), 1);
    }

    #[test]
    fn test_resume_on_empty_ledger_stays_paused() {
        let mut player = ReplayPlayer::new(Vec::new(), p(1));
        player.start();
        player.toggle_pause();
        assert_eq!(player.state(), PlaybackState::Paused);
        assert_eq!(player.step(), 0);
    }

    #[test]
    fn test_stop_then_start_restarts_from_zero() {
        let mut player = ReplayPlayer::new(scenario(), p(1));
        player.start();
        player.tick();
        player.tick();

        player.stop();
        assert_eq!(player.state(), PlaybackState::Stopped);
        assert_eq!(player.step(), 0);

        player.start();
        assert_eq!(player.state(), PlaybackState::Playing);
        assert_eq!(player.step(), 0);
        assert_eq!(player.board(), Board::new());
    }

    #[test]
    fn test_start_while_playing_keeps_progress() {
        let mut player = ReplayPlayer::new(scenario(), p(1));
        player.start();
        player.tick();
        player.start();
        assert_eq!(player.step(), 1);
    }

    #[test]
    fn test_empty_ledger_pauses_immediately() {
        let mut player = ReplayPlayer::new(Vec::new(), p(1));
        player.start();
        assert_eq!(player.state(), PlaybackState::Paused);
        assert!(!player.tick());
        assert!(player.current_move().is_none());
    }

    #[test]
    fn test_current_move() {
        let mut player = ReplayPlayer::new(scenario(), p(1));
        player.start();
        assert!(player.current_move().is_none());
        player.tick();
        assert_eq!(player.current_move().map(|m| m.sequence), Some(0));
    }
}
