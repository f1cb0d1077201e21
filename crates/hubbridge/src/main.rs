// SPDX-FileCopyrightText: 2026 Hubbridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hubbridge command-line tool.
//!
//! Inspects the configured hub list and signs or checks webhook payloads
//! the same way the controller does.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use hubbridge::SignatureSettings;
use hubbridge_config::HubbridgeConfig;
use hubbridge_core::signature::{compute_signature, verify_signature};
use hubbridge_core::{HubError, SignatureAlgorithm};

/// Hubbridge - one contract for many smart-home hubs.
#[derive(Parser, Debug)]
#[command(name = "hubbridge", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List the configured hubs.
    Hubs,
    /// Validate configuration and print a summary.
    Check,
    /// Print the HMAC signature of a payload file.
    Sign {
        /// Shared secret.
        #[arg(long)]
        key: String,
        /// Digest to use instead of the configured one.
        #[arg(long)]
        algorithm: Option<SignatureAlgorithm>,
        /// Payload file, signed byte for byte.
        file: PathBuf,
    },
    /// Check a payload file against a signature.
    Verify {
        #[arg(long)]
        key: String,
        #[arg(long)]
        signature: String,
        #[arg(long)]
        algorithm: Option<SignatureAlgorithm>,
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match hubbridge_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            hubbridge_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = hubbridge::init_tracing(&config.logging.level) {
        eprintln!("hubbridge: {e}");
    }

    let result = match cli.command {
        Some(Commands::Hubs) => {
            print_hubs(&config);
            Ok(())
        }
        Some(Commands::Check) => {
            println!(
                "hubbridge: config ok ({} hubs, signature header {})",
                config.hubs.len(),
                config.verification.signature_header
            );
            Ok(())
        }
        Some(Commands::Sign {
            key,
            algorithm,
            file,
        }) => sign(&config, &key, algorithm, &file),
        Some(Commands::Verify {
            key,
            signature,
            algorithm,
            file,
        }) => verify(&config, &key, &signature, algorithm, &file),
        None => {
            println!("hubbridge: use --help for available commands");
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("hubbridge: {e}");
            ExitCode::FAILURE
        }
    }
}

fn print_hubs(config: &HubbridgeConfig) {
    let width = config.hubs.iter().map(|h| h.id.as_str().len()).max().unwrap_or(2);
    for hub in &config.hubs {
        println!("{:<width$}  {:<24}  {}", hub.id.as_str(), hub.name, hub.translator);
    }
}

fn read_payload(file: &Path) -> Result<Vec<u8>, HubError> {
    std::fs::read(file)
        .map_err(|e| HubError::Internal(format!("cannot read {}: {e}", file.display())))
}

fn sign(
    config: &HubbridgeConfig,
    key: &str,
    algorithm: Option<SignatureAlgorithm>,
    file: &Path,
) -> Result<(), HubError> {
    let settings = SignatureSettings::from(&config.verification);
    let algorithm = algorithm.unwrap_or(settings.algorithm);
    let signature = compute_signature(algorithm, key.as_bytes(), &read_payload(file)?)?;
    println!("{}: {algorithm}={signature}", settings.header);
    Ok(())
}

fn verify(
    config: &HubbridgeConfig,
    key: &str,
    signature: &str,
    algorithm: Option<SignatureAlgorithm>,
    file: &Path,
) -> Result<(), HubError> {
    let algorithm = algorithm.unwrap_or(config.verification.algorithm);
    verify_signature(algorithm, key.as_bytes(), &read_payload(file)?, signature)?;
    println!("hubbridge: signature ok");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_sign_with_algorithm() {
        let cli = Cli::parse_from([
            "hubbridge",
            "sign",
            "--key",
            "k",
            "--algorithm",
            "sha256",
            "body.json",
        ]);
        match cli.command {
            Some(Commands::Sign { key, algorithm, file }) => {
                assert_eq!(key, "k");
                assert_eq!(algorithm, Some(SignatureAlgorithm::Sha256));
                assert_eq!(file, PathBuf::from("body.json"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
