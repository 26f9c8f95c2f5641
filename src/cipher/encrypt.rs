// Encryption
// Public exponent side of the cipher facade

use num_bigint::BigUint;
use rand::RngCore;

use super::bigint::mod_pow;
use super::codec::{block_from_bytes, block_to_bytes, check_block_width, validate_length};
use super::keygen::{derive_key, validate_password, KeyTriple};
use crate::error::{CipherError, Result};
use crate::util::config::CipherConfig;

/// Encrypt a block with an already derived key: c = p^e mod n
pub fn encrypt_block(plaintext: &BigUint, key: &KeyTriple) -> Result<BigUint> {
    if plaintext >= &key.n {
        return Err(CipherError::MessageTooLarge(format!(
            "plaintext block of {} bits does not fit below the {}-bit modulus",
            plaintext.bits(),
            key.modulus_bits()
        )));
    }
    Ok(mod_pow(plaintext, &key.e, &key.n))
}

/// Encrypt a block under the key derived from `password`
pub fn encrypt<R: RngCore + ?Sized>(
    plaintext: &BigUint,
    password: &str,
    bytewidth: usize,
    rng: &mut R,
) -> Result<BigUint> {
    let config = CipherConfig::default().with_bytewidth(bytewidth);
    validate_password(password)?;
    config.validate()?;
    check_block_width(plaintext, bytewidth)?;

    let key = derive_key(password, &config, rng)?;
    encrypt_block(plaintext, &key)
}

/// Encrypt a message of 1 to `bytewidth + 1` bytes
///
/// The message is read as a single block, so its final byte must be below
/// 0x80. The ciphertext uses the same byte layout.
pub fn encrypt_message<R: RngCore + ?Sized>(
    message: &[u8],
    password: &str,
    config: &CipherConfig,
    rng: &mut R,
) -> Result<Vec<u8>> {
    validate_password(password)?;
    config.validate()?;
    validate_length(message.len(), config.max_message_len())?;

    let plaintext = block_from_bytes(message)?;
    check_block_width(&plaintext, config.bytewidth)?;

    let key = derive_key(password, config, rng)?;
    let ciphertext = block_to_bytes(&encrypt_block(&plaintext, &key)?);

    // Unreachable while n < 2 * 256^bytewidth holds; guards the length
    // contract hosts rely on when storing ciphertexts
    if ciphertext.len() > config.max_message_len() {
        return Err(CipherError::MessageTooLarge(format!(
            "ciphertext needs {} bytes, limit is {}",
            ciphertext.len(),
            config.max_message_len()
        )));
    }

    tracing::debug!(
        message_len = message.len(),
        ciphertext_len = ciphertext.len(),
        "encrypted message"
    );

    Ok(ciphertext)
}
