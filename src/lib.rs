//! Password-derived single-block cipher.
//!
//! A password deterministically yields a key triple `(e, d, n)` with `n` a
//! probable prime above `256^bytewidth` and `e * d ≡ 1 (mod n-1)`. A block
//! is encrypted as `p^e mod n` and decrypted as `c^d mod n`.
//!
//! Randomness is only used to pick Miller-Rabin witnesses and is always
//! passed in by the caller, so the same password and width produce the same
//! key on every run.
//!
//! ```no_run
//! use passcipher::{decrypt_message, encrypt_message, CipherConfig};
//!
//! let config = CipherConfig::default();
//! let mut rng = rand::thread_rng();
//! let ciphertext = encrypt_message(b"hello world", "hunter2", &config, &mut rng)?;
//! let plaintext = decrypt_message(&ciphertext, "hunter2", &config, &mut rng)?;
//! assert_eq!(plaintext, b"hello world");
//! # Ok::<(), passcipher::CipherError>(())
//! ```

pub mod cipher;
pub mod error;
pub mod util;

pub use cipher::{
    decrypt, decrypt_message, derive_key, encrypt, encrypt_message, password_to_edn, KeyTriple,
};
pub use error::{CipherError, Result};
pub use util::CipherConfig;
