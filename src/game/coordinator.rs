//! Turn keeping for a human against an automated player.
//!
//! The human's move and the automated reply are two separate steps, so a front end can show
//! the human's mark, wait a little while the opponent "thinks", and only then ask for the reply.
//! While a reply is pending the game refuses further human moves.

use log::{debug, warn};

use crate::core::{MoveError, Outcome, Player, PlayerMark, WinLine};
use crate::game::tictactoe::{TTTAddr, TTTBoard};

/// Where the game is in its turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    AwaitingHuman,
    /// The human has moved and the automated player has not replied yet.
    AwaitingReply,
    /// Holds a terminal outcome, never `Outcome::Undecided`.
    Finished(Outcome),
}

/// What happened to an accepted human move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    AwaitingReply { played: TTTAddr },
    Finished { played: TTTAddr, outcome: Outcome },
}

/// The automated player's move and how the board looks afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reply {
    pub played: TTTAddr,
    pub outcome: Outcome,
}

/// A human move together with the reply it triggered, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Round {
    pub human: TTTAddr,
    pub reply: Option<TTTAddr>,
    pub outcome: Outcome,
}

/// The holder of the game state, and the automated player
pub struct TicTacToe {
    opponent: Box<dyn Player>,
    board: TTTBoard,
    /// The mark the human plays, as last selected
    human_mark: PlayerMark,
    current_mark: PlayerMark,
    started: bool,
    phase: Phase,
}

impl TicTacToe {
    pub fn new(opponent: Box<dyn Player>) -> Self {
        Self::with_starting_mark(opponent, PlayerMark::default())
    }

    pub fn with_starting_mark(opponent: Box<dyn Player>, mark: PlayerMark) -> Self {
        Self {
            opponent,
            board: TTTBoard::new(),
            human_mark: mark,
            current_mark: mark,
            started: false,
            phase: Phase::AwaitingHuman,
        }
    }

    /// Choose which mark the human plays. Ignored once the first move has been made.
    /// Returns whether the choice was taken.
    pub fn select_starting_mark(&mut self, mark: PlayerMark) -> bool {
        if self.started {
            debug!("Ignoring choice of {} since the game has started", mark);
            return false;
        }
        self.human_mark = mark;
        self.current_mark = mark;
        true
    }

    /// Place the current mark for the human.
    ///
    /// On a rejected move nothing changes. When the move does not end the game the turn
    /// passes to the automated player, whose reply is made by [`TicTacToe::opponent_reply`].
    pub fn attempt_move(&mut self, a: TTTAddr) -> Result<MoveResult, MoveError> {
        match self.phase {
            Phase::Finished(_) => return Err(MoveError::GameFinished),
            Phase::AwaitingReply => return Err(MoveError::AwaitingReply),
            Phase::AwaitingHuman => {}
        }
        let mark = self.current_mark;
        self.board.place(a, mark)?;
        self.started = true;
        debug!("Human {} placed marker at {}", mark, a);

        let outcome = self.board.check_outcome(mark);
        if outcome.is_terminal() {
            self.finish(outcome);
            Ok(MoveResult::Finished { played: a, outcome })
        } else {
            self.current_mark = mark.other();
            self.phase = Phase::AwaitingReply;
            Ok(MoveResult::AwaitingReply { played: a })
        }
    }

    /// Let the automated player make its pending move.
    ///
    /// `Ok(None)` if no reply is pending, which is also the case after a [`TicTacToe::reset`]
    /// that came in between. When the policy has nothing to play the turn is skipped: a full
    /// board ends in a draw, otherwise the human is to move again.
    /// A policy that picks an occupied cell gets `Err(CellOccupied)` and the reply stays pending.
    pub fn opponent_reply(&mut self) -> Result<Option<Reply>, MoveError> {
        if self.phase != Phase::AwaitingReply {
            debug!("No reply pending in phase {:?}", self.phase);
            return Ok(None);
        }
        let Some(a) = self.opponent.play(&self.board) else {
            debug!("Opponent found nothing to play, skipping its turn");
            if self.board.is_full() {
                self.finish(Outcome::Draw);
            } else {
                self.current_mark = self.current_mark.other();
                self.phase = Phase::AwaitingHuman;
            }
            return Ok(None);
        };
        let mark = self.current_mark;
        if let Err(e) = self.board.place(a, mark) {
            warn!("Opponent tried an illegal move: {}", e);
            return Err(e);
        }
        debug!("Opponent {} placed marker at {}", mark, a);

        let outcome = self.board.check_outcome(mark);
        if outcome.is_terminal() {
            self.finish(outcome);
        } else {
            self.current_mark = mark.other();
            self.phase = Phase::AwaitingHuman;
        }
        Ok(Some(Reply { played: a, outcome }))
    }

    /// The human move and the automated reply in one go, without any pause in between.
    ///
    /// All or nothing: if the reply fails the human move is taken back as well,
    /// so an `Err` always leaves the game as it was.
    pub fn play_round(&mut self, a: TTTAddr) -> Result<Round, MoveError> {
        let board = self.board;
        let (current_mark, started, phase) = (self.current_mark, self.started, self.phase);
        match self.attempt_move(a)? {
            MoveResult::Finished { played, outcome } => Ok(Round {
                human: played,
                reply: None,
                outcome,
            }),
            MoveResult::AwaitingReply { played } => {
                let reply = match self.opponent_reply() {
                    Ok(reply) => reply,
                    Err(e) => {
                        debug!("Taking back the human move at {}", a);
                        self.board = board;
                        self.current_mark = current_mark;
                        self.started = started;
                        self.phase = phase;
                        return Err(e);
                    }
                };
                Ok(Round {
                    human: played,
                    reply: reply.map(|r| r.played),
                    outcome: reply.map_or(self.outcome(), |r| r.outcome),
                })
            }
        }
    }

    /// Start over with an empty board. The human keeps the mark last selected,
    /// and a reply that was still pending is dropped.
    pub fn reset(&mut self) {
        if self.phase == Phase::AwaitingReply {
            debug!("Reset cancels the pending reply");
        }
        self.board = TTTBoard::new();
        self.current_mark = self.human_mark;
        self.started = false;
        self.phase = Phase::AwaitingHuman;
        debug!("Game reset, human plays {}", self.human_mark);
    }

    fn finish(&mut self, outcome: Outcome) {
        debug!("Game over: {}", outcome);
        debug!("\n{}", self.board);
        self.phase = Phase::Finished(outcome);
    }

    pub fn board(&self) -> &TTTBoard {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> Outcome {
        match self.phase {
            Phase::Finished(outcome) => outcome,
            _ => Outcome::Undecided,
        }
    }

    pub fn winning_line(&self) -> Option<WinLine> {
        self.outcome().winning_line()
    }

    pub fn current_mark(&self) -> PlayerMark {
        self.current_mark
    }

    pub fn human_mark(&self) -> PlayerMark {
        self.human_mark
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished(_))
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.phase == Phase::AwaitingReply
    }
}
