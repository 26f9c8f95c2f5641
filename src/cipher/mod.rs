// Cipher Module - Main module file
// Password-derived key triple and single-block modular exponentiation cipher

pub mod bigint;
pub mod codec;
pub mod decrypt;
pub mod encrypt;
pub mod keygen;
pub mod prime;

pub use bigint::{extended_euclid, gcd, mod_inverse, mod_pow, random_below};
pub use codec::{block_from_bytes, block_to_bytes};
pub use decrypt::{decrypt, decrypt_block, decrypt_message};
pub use encrypt::{encrypt, encrypt_block, encrypt_message};
pub use keygen::{derive_key, password_hash, password_to_edn, KeyTriple};
pub use prime::{is_probably_prime, next_probable_prime, Primality};
