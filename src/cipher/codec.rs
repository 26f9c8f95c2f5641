// Block Codec
// Converts between byte sequences and cipher blocks
//
// Bytes are the little-endian two's-complement form with a sign byte only
// when needed, the same layout .NET's BigInteger uses for its byte arrays.
// Persisted ciphertexts depend on this staying fixed.

use num_bigint::{BigInt, BigUint, Sign};

use crate::error::{CipherError, Result};

/// Decode a byte sequence into a block
///
/// Fails when the bytes encode a negative integer (final byte >= 0x80),
/// since such a value has no place in [0, n).
pub fn block_from_bytes(bytes: &[u8]) -> Result<BigUint> {
    let (sign, magnitude) = BigInt::from_signed_bytes_le(bytes).into_parts();
    if sign == Sign::Minus {
        return Err(CipherError::InvalidInput(
            "bytes encode a negative block; the final byte must be below 0x80".to_string(),
        ));
    }
    Ok(magnitude)
}

/// Encode a block as bytes, shortest form with a clear sign bit
pub fn block_to_bytes(block: &BigUint) -> Vec<u8> {
    BigInt::from(block.clone()).to_signed_bytes_le()
}

/// Check a message or ciphertext length against `1..=max_len`
pub fn validate_length(len: usize, max_len: usize) -> Result<()> {
    if len == 0 || len > max_len {
        return Err(CipherError::InvalidInput(format!(
            "text must consist of 1 to {max_len} bytes, got {len}"
        )));
    }
    Ok(())
}

/// Reject blocks that cannot fit below any modulus derived for `bytewidth`
///
/// Every such modulus lies below `2 * 256^bytewidth`, so wider blocks are
/// refused before the prime search runs.
pub fn check_block_width(block: &BigUint, bytewidth: usize) -> Result<()> {
    let max_bits = 8 * bytewidth as u64 + 1;
    if block.bits() > max_bits {
        return Err(CipherError::MessageTooLarge(format!(
            "block needs {} bits but a {bytewidth}-byte key holds at most {max_bits}",
            block.bits()
        )));
    }
    Ok(())
}
