// Key Derivation Engine
// Derives the (e, d, n) key triple from a password, reproducibly

use num_bigint::BigUint;
use num_traits::One;
use rand::RngCore;

use super::bigint::{gcd, mod_inverse};
use super::prime::next_probable_prime;
use crate::error::{CipherError, Result};
use crate::util::config::CipherConfig;

/// Modulus of the squaring chain that spreads the password hash into bytes (2^31 - 1)
const HASH_CHAIN_MODULUS: u64 = 2_147_483_647;

/// The public exponent is the j-th unit modulo n-1, with j below this bound
const EXPONENT_RANK_MODULUS: u64 = 1000;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Key triple derived from a password
///
/// `n` is prime and larger than `256^bytewidth`, `e` is coprime to `n-1`
/// and `d` is its inverse modulo `n-1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyTriple {
    pub e: BigUint, // Public exponent
    pub d: BigUint, // Private exponent
    pub n: BigUint, // Prime modulus
}

impl KeyTriple {
    /// Bit length of the modulus
    pub fn modulus_bits(&self) -> u64 {
        self.n.bits()
    }

    /// Checks `(e * d) mod (n-1) == 1`
    pub fn is_consistent(&self) -> bool {
        let n_minus_one = &self.n - 1u8;
        (&self.e * &self.d) % n_minus_one == BigUint::one()
    }
}

/// 32-bit FNV-1a over the UTF-8 bytes of the password
pub fn password_hash(password: &str) -> u32 {
    password.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Absolute value of the hash read as a signed 32-bit integer
pub fn password_seed(password: &str) -> u64 {
    u64::from((password_hash(password) as i32).unsigned_abs())
}

/// Spread the hash seed over `bytewidth` little-endian bytes and append a
/// final 1, so the result lies in `[256^bytewidth, 2 * 256^bytewidth)`.
///
/// Returns the seed integer and the hash chain value left after the last
/// byte.
fn seed_block(mut hashcode: u64, bytewidth: usize) -> (BigUint, u64) {
    let mut bytes = Vec::with_capacity(bytewidth + 1);
    for _ in 0..bytewidth {
        bytes.push((hashcode % 256) as u8);
        hashcode = (hashcode * hashcode) % HASH_CHAIN_MODULUS;
    }
    bytes.push(1);

    (BigUint::from_bytes_le(&bytes), hashcode)
}

/// Next integer after `n` that is coprime to `m`, counting modulo `m`
///
/// Panics if `m` is zero.
pub fn next_relative_prime(n: &BigUint, m: &BigUint) -> BigUint {
    let mut candidate = (n + 1u8) % m;
    while !gcd(&candidate, m).is_one() {
        candidate = (candidate + 1u8) % m;
    }
    candidate
}

pub(crate) fn validate_password(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(CipherError::InvalidInput(
            "password cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Derive the key triple for `password` at the given byte width, using the
/// default primality parameters
pub fn password_to_edn<R: RngCore + ?Sized>(
    password: &str,
    bytewidth: usize,
    rng: &mut R,
) -> Result<KeyTriple> {
    let config = CipherConfig::default().with_bytewidth(bytewidth);
    derive_key(password, &config, rng)
}

/// Derive the key triple for `password` under `config`
///
/// The result depends only on the password and the byte width. `rng` only
/// drives Miller-Rabin witness selection.
pub fn derive_key<R: RngCore + ?Sized>(
    password: &str,
    config: &CipherConfig,
    rng: &mut R,
) -> Result<KeyTriple> {
    validate_password(password)?;
    config.validate()?;

    let (seed, hashcode) = seed_block(password_seed(password), config.bytewidth);
    let n = next_probable_prime(
        &seed,
        config.primality_trials,
        config.max_prime_candidates,
        rng,
    )?;

    let n_minus_one = &n - 1u8;
    let rank = hashcode % EXPONENT_RANK_MODULUS;
    let mut e = BigUint::one();
    for _ in 0..rank {
        e = next_relative_prime(&e, &n_minus_one);
    }

    // e is a unit modulo n-1 by construction
    let d = mod_inverse(&e, &n_minus_one).map_err(|err| {
        tracing::error!(
            bytewidth = config.bytewidth,
            rank,
            "derived public exponent has no inverse"
        );
        err
    })?;

    tracing::debug!(
        bytewidth = config.bytewidth,
        modulus_bits = n.bits(),
        exponent_rank = rank,
        "derived key triple"
    );

    Ok(KeyTriple { e, d, n })
}
