// Utility Module
// Configuration shared by the cipher operations

pub mod config;

pub use config::CipherConfig;
