use log::debug;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::core::Player;
use crate::game::tictactoe::{TTTAddr, TTTBoard};

/// Plays any empty cell, each with the same probability. It has no skill at all.
pub struct RandomAi<R> {
    rng: R,
}

impl<R> Player for RandomAi<R>
where
    R: rand::Rng,
{
    fn play(&mut self, b: &TTTBoard) -> Option<TTTAddr> {
        let moves = b.empty_indices();
        let choice = moves.choose(&mut self.rng).copied();
        if let Some(a) = choice {
            debug!("Random AI picks {} out of {} empty cells", a, moves.len());
        }
        choice
    }
}

impl RandomAi<StdRng> {
    pub fn new(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl<R: rand::Rng> RandomAi<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use super::*;
    use crate::core::PlayerMark;

    #[test]
    fn never_picks_an_occupied_cell() {
        let mut ai = RandomAi::new(42);
        let b: TTTBoard = "xo x o x ".parse().unwrap();
        let empty = b.empty_indices();
        for _ in 0..500 {
            let a = ai.play(&b).unwrap();
            assert!(empty.contains(&a));
        }
    }

    #[test]
    fn full_board_gives_nothing() {
        let mut ai = RandomAi::new(1);
        let b: TTTBoard = "xoxoxooxo".parse().unwrap();
        assert_eq!(ai.play(&b), None);
    }

    #[test]
    fn covers_every_empty_cell_evenly() {
        let mut ai = RandomAi::new(2024);
        let mut b = TTTBoard::new();
        b.place(TTTAddr::new(4), PlayerMark::Cross).unwrap();
        let n = 8000;
        let mut counts: HashMap<TTTAddr, usize> = HashMap::new();
        for _ in 0..n {
            *counts.entry(ai.play(&b).unwrap()).or_default() += 1;
        }
        assert_eq!(counts.len(), 8);
        // expected 1000 per cell
        assert!(counts.values().all(|&c| (850..=1150).contains(&c)), "{counts:?}");
    }

    #[test]
    fn same_seed_same_choices() {
        let b = TTTBoard::new();
        let mut a1 = RandomAi::new(9);
        let mut a2 = RandomAi::new(9);
        for _ in 0..20 {
            assert_eq!(a1.play(&b), a2.play(&b));
        }
    }
}
