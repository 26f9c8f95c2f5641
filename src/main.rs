use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use passcipher::{decrypt_message, encrypt_message, CipherConfig};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Encrypt short texts with a key derived from a password
#[derive(Debug, Parser)]
#[command(name = "passcipher")]
#[command(version, about)]
struct Cli {
    /// Password the key is derived from
    #[arg(short, long, env = "PASSCIPHER_PASSWORD", hide_env_values = true)]
    password: String,

    /// Key width in bytes; texts may be one byte longer
    #[arg(long, default_value_t = 128)]
    bytewidth: usize,

    /// Miller-Rabin rounds per prime candidate
    #[arg(long, default_value_t = 100)]
    trials: u32,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Encrypts text and prints the ciphertext as hex
    #[command(arg_required_else_help = true)]
    Encrypt { text: String },

    /// Decrypts hex ciphertext and prints the recovered text
    #[command(arg_required_else_help = true)]
    Decrypt { ciphertext: String },
}

fn run(cli: Cli) -> Result<()> {
    let config = CipherConfig::default()
        .with_bytewidth(cli.bytewidth)
        .with_primality_trials(cli.trials);
    let mut rng = rand::thread_rng();

    match cli.command {
        Commands::Encrypt { text } => {
            let ciphertext = encrypt_message(text.as_bytes(), &cli.password, &config, &mut rng)
                .context("Failed to encrypt text")?;
            println!("{}", hex::encode(ciphertext));
        }
        Commands::Decrypt { ciphertext } => {
            let bytes = hex::decode(ciphertext.trim()).context("Ciphertext is not valid hex")?;
            let plaintext = decrypt_message(&bytes, &cli.password, &config, &mut rng)
                .context("Failed to decrypt ciphertext")?;
            println!("{}", String::from_utf8_lossy(&plaintext));
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
