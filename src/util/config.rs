// Cipher configuration
// Byte width and primality search parameters shared by all operations

use crate::error::{CipherError, Result};

/// Byte width used by the original host application
pub const DEFAULT_BYTEWIDTH: usize = 128;

/// Miller-Rabin rounds per candidate; false-accept bound is 4^-100
pub const DEFAULT_PRIMALITY_TRIALS: u32 = 100;

/// Fewest Miller-Rabin rounds accepted; below this a composite modulus
/// becomes likely enough to break decryption and make keys vary between runs
pub const MIN_PRIMALITY_TRIALS: u32 = 20;

/// Candidates examined before the prime search gives up
pub const DEFAULT_MAX_PRIME_CANDIDATES: usize = 100_000;

/// Configuration for key derivation and message processing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CipherConfig {
    pub bytewidth: usize,
    pub primality_trials: u32,
    pub max_prime_candidates: usize,
}

impl Default for CipherConfig {
    fn default() -> Self {
        Self {
            bytewidth: DEFAULT_BYTEWIDTH,
            primality_trials: DEFAULT_PRIMALITY_TRIALS,
            max_prime_candidates: DEFAULT_MAX_PRIME_CANDIDATES,
        }
    }
}

impl CipherConfig {
    pub fn with_bytewidth(mut self, bytewidth: usize) -> Self {
        self.bytewidth = bytewidth;
        self
    }

    pub fn with_primality_trials(mut self, trials: u32) -> Self {
        self.primality_trials = trials;
        self
    }

    pub fn with_max_prime_candidates(mut self, candidates: usize) -> Self {
        self.max_prime_candidates = candidates;
        self
    }

    /// Longest message or ciphertext in bytes: the width plus the sign byte
    pub fn max_message_len(&self) -> usize {
        self.bytewidth + 1
    }

    pub fn validate(&self) -> Result<()> {
        if self.bytewidth == 0 {
            return Err(CipherError::InvalidInput(
                "byte width must be positive".to_string(),
            ));
        }
        if self.primality_trials < MIN_PRIMALITY_TRIALS {
            return Err(CipherError::InvalidInput(format!(
                "primality trials must be at least {MIN_PRIMALITY_TRIALS}, got {}",
                self.primality_trials
            )));
        }
        Ok(())
    }
}
