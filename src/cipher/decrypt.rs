// Decryption
// Private exponent side of the cipher facade

use num_bigint::BigUint;
use rand::RngCore;

use super::bigint::mod_pow;
use super::codec::{block_from_bytes, block_to_bytes, check_block_width, validate_length};
use super::keygen::{derive_key, validate_password, KeyTriple};
use crate::error::{CipherError, Result};
use crate::util::config::CipherConfig;

/// Decrypt a block with an already derived key: p = c^d mod n
///
/// A ciphertext at or above the modulus was not produced by this key and is
/// refused rather than reduced.
pub fn decrypt_block(ciphertext: &BigUint, key: &KeyTriple) -> Result<BigUint> {
    if ciphertext >= &key.n {
        return Err(CipherError::MessageTooLarge(format!(
            "ciphertext block of {} bits does not fit below the {}-bit modulus",
            ciphertext.bits(),
            key.modulus_bits()
        )));
    }
    Ok(mod_pow(ciphertext, &key.d, &key.n))
}

/// Decrypt a block under the key derived from `password`
pub fn decrypt<R: RngCore + ?Sized>(
    ciphertext: &BigUint,
    password: &str,
    bytewidth: usize,
    rng: &mut R,
) -> Result<BigUint> {
    let config = CipherConfig::default().with_bytewidth(bytewidth);
    validate_password(password)?;
    config.validate()?;
    check_block_width(ciphertext, bytewidth)?;

    let key = derive_key(password, &config, rng)?;
    decrypt_block(ciphertext, &key)
}

/// Decrypt a ciphertext produced by [`encrypt_message`](super::encrypt::encrypt_message)
///
/// With the wrong password this still succeeds whenever the block fits the
/// other modulus, yielding unrelated bytes.
pub fn decrypt_message<R: RngCore + ?Sized>(
    ciphertext: &[u8],
    password: &str,
    config: &CipherConfig,
    rng: &mut R,
) -> Result<Vec<u8>> {
    validate_password(password)?;
    config.validate()?;
    validate_length(ciphertext.len(), config.max_message_len())?;

    let block = block_from_bytes(ciphertext)?;
    check_block_width(&block, config.bytewidth)?;

    let key = derive_key(password, config, rng)?;
    let plaintext = block_to_bytes(&decrypt_block(&block, &key)?);

    tracing::debug!(
        ciphertext_len = ciphertext.len(),
        plaintext_len = plaintext.len(),
        "decrypted message"
    );

    Ok(plaintext)
}
