//! Random sources for OTP codes

use rand::rngs::{OsRng, StdRng};
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Smallest code that can be issued
pub const CODE_MIN: u32 = 100_000;
/// Largest code that can be issued
pub const CODE_MAX: u32 = 999_999;

/// Source of fresh 6-digit codes
pub trait CodeGenerator: Send + Sync {
    /// Produce a code drawn uniformly from `CODE_MIN..=CODE_MAX`
    fn generate(&self) -> String;
}

/// Code generator backed by the operating system CSPRNG
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRngCodeGenerator;

impl CodeGenerator for OsRngCodeGenerator {
    fn generate(&self) -> String {
        OsRng.gen_range(CODE_MIN..=CODE_MAX).to_string()
    }
}

/// Deterministic generator for reproducible runs
pub struct SeededCodeGenerator {
    rng: Mutex<StdRng>,
}

impl SeededCodeGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl CodeGenerator for SeededCodeGenerator {
    fn generate(&self) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(CODE_MIN..=CODE_MAX).to_string()
    }
}
