use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt::Debug;
use std::sync::Mutex;

/// Half-width of the uniform noise band added to every score.
pub const JITTER_AMPLITUDE: f64 = 0.05;

/// Source of the bounded perturbation applied to each prediction.
pub trait JitterSource: Debug + Send + Sync {
    /// A value in `[-JITTER_AMPLITUDE, JITTER_AMPLITUDE]`.
    fn draw(&self) -> f64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngJitter;

impl JitterSource for ThreadRngJitter {
    fn draw(&self) -> f64 {
        rand::thread_rng().gen_range(-JITTER_AMPLITUDE..=JITTER_AMPLITUDE)
    }
}

/// Reproducible sequence of draws from a fixed seed.
#[derive(Debug)]
pub struct SeededJitter {
    rng: Mutex<StdRng>,
}

impl SeededJitter {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl JitterSource for SeededJitter {
    fn draw(&self) -> f64 {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(-JITTER_AMPLITUDE..=JITTER_AMPLITUDE)
    }
}

/// Always returns the same value.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedJitter(pub f64);

impl JitterSource for FixedJitter {
    fn draw(&self) -> f64 {
        self.0
    }
}
