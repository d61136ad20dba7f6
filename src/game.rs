pub mod coordinator;
pub mod tictactoe;

pub use coordinator::{MoveResult, Phase, Reply, Round, TicTacToe};
pub use tictactoe::{TTTAddr, TTTBoard, WIN_LINES};
