//! Инфраструктура вокруг движка:
//! - реализации RandomSource (системная и детерминированная);
//! - мастер-seed игры и расщепление потоков случайности.

pub mod rng;
pub mod rng_seed;

pub use rng::{DeterministicRng, SystemRng};
pub use rng_seed::GameSeed;
