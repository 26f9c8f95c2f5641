// Primality Oracle
// Miller-Rabin probable prime test and next probable prime search

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;
use rand::RngCore;

use super::bigint::{mod_pow, random_below};
use crate::error::{CipherError, Result};

/// Verdict of a primality test
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primality {
    /// A witness proved the number composite
    Composite,
    /// One of the small primes answered without sampling
    Prime,
    /// Every sampled witness passed
    ProbablyPrime { trials: u32 },
}

impl Primality {
    pub fn is_prime(&self) -> bool {
        !matches!(self, Primality::Composite)
    }

    /// Probability that a composite number produced this verdict, or `None`
    /// when compositeness was proven
    pub fn false_positive_bound(&self) -> Option<f64> {
        match self {
            Primality::Composite => None,
            Primality::Prime => Some(0.0),
            Primality::ProbablyPrime { trials } => {
                Some(0.25f64.powi(i32::try_from(*trials).unwrap_or(i32::MAX)))
            }
        }
    }
}

/// Outcome of a single Miller-Rabin round
enum Round {
    Composite,
    Passed,
}

/// Miller-Rabin primality test with `trials` random witnesses
pub fn is_probably_prime<R: RngCore + ?Sized>(n: &BigUint, trials: u32, rng: &mut R) -> Primality {
    let two = BigUint::from(2u8);
    if n < &two {
        return Primality::Composite;
    }
    if [2u8, 3, 5].iter().any(|&p| n == &BigUint::from(p)) {
        return Primality::Prime;
    }
    if n.is_even() {
        return Primality::Composite;
    }

    // Write n-1 as d * 2^r with d odd
    let n_minus_one = n - 1u8;
    let r = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> r;

    // Witnesses come from [2, n-3]
    let witness_bound = n - 2u8;

    for _ in 0..trials {
        let a = loop {
            let a = random_below(&witness_bound, rng);
            if a >= two {
                break a;
            }
        };

        if let Round::Composite = witness_round(n, &n_minus_one, &a, &d, r) {
            return Primality::Composite;
        }
    }

    Primality::ProbablyPrime { trials }
}

fn witness_round(n: &BigUint, n_minus_one: &BigUint, a: &BigUint, d: &BigUint, r: u64) -> Round {
    let mut x = mod_pow(a, d, n);
    if x.is_one() || &x == n_minus_one {
        return Round::Passed;
    }

    for _ in 1..r {
        x = (&x * &x) % n;
        if &x == n_minus_one {
            return Round::Passed;
        }
        if x.is_one() {
            return Round::Composite;
        }
    }

    Round::Composite
}

/// Smallest probable prime greater than `n`
///
/// Odd candidates are tried in increasing order. Gives up with
/// [`CipherError::DerivationFailed`] once `max_candidates` have been
/// rejected.
pub fn next_probable_prime<R: RngCore + ?Sized>(
    n: &BigUint,
    trials: u32,
    max_candidates: usize,
    rng: &mut R,
) -> Result<BigUint> {
    let mut candidate = n + 1u8;
    if candidate.is_even() {
        candidate += 1u8;
    }

    for rejected in 0..max_candidates {
        if is_probably_prime(&candidate, trials, rng).is_prime() {
            tracing::trace!(rejected, bits = candidate.bits(), "found probable prime");
            return Ok(candidate);
        }
        candidate += 2u8;
    }

    tracing::warn!(max_candidates, "prime search exhausted its candidate budget");
    Err(CipherError::DerivationFailed {
        candidates: max_candidates,
    })
}
