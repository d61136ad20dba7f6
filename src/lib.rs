//! A single-player tic-tac-toe engine.
//!
//! One mark is driven by a human through [`game::TicTacToe::attempt_move`], the other by an
//! automated [`core::Player`] policy. The default policy, [`player::RandomAi`], picks uniformly
//! among the empty cells.

pub mod core;
pub mod game;
pub mod player;
