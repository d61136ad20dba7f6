pub mod random;

pub use random::RandomAi;
