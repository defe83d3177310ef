// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Example: hide a secret in an image, check capacity, or recover it.
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use pixelveil_core::stego::random::os_rng;
use pixelveil_core::{
    capacity_report, decode, decode_image, encode, encode_png, DecodeRequest, EncodeRequest, PasswordChoice,
    SecretPayload, StegoError,
};

#[derive(Parser)]
#[command(name = "stego", about = "LSB steganography with AES-256-GCM")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Hide text or a file in a cover image; writes a PNG.
    Encode {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,
        #[arg(long)]
        file: Option<PathBuf>,
        /// MIME type recorded for --file.
        #[arg(long, default_value = "application/octet-stream")]
        mime: String,
        /// Custom password (min 8 chars); a random one is generated otherwise.
        #[arg(long)]
        password: Option<String>,
    },
    /// Show how much fits into a cover image.
    Capacity {
        input: PathBuf,
        #[arg(long, default_value = "")]
        text: String,
    },
    /// Recover a hidden secret.
    Decode {
        input: PathBuf,
        #[arg(long)]
        id: String,
        #[arg(long)]
        password: String,
        /// Where to write a recovered file (defaults to its embedded name).
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

/// Output name for decoded files whose embedded name is unusable.
const FALLBACK_FILE_NAME: &str = "secret.bin";

fn read(path: &PathBuf) -> Result<Vec<u8>, String> {
    fs::read(path).map_err(|e| format!("could not read {}: {e}", path.display()))
}

fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::Encode { input, output, text, file, mime, password } => {
            let carrier = decode_image(&read(&input)?).map_err(|e| e.to_string())?;
            let payload = match (text, file) {
                (Some(t), None) => SecretPayload::Text(t),
                (None, Some(path)) => {
                    let name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| "secret.bin".into());
                    SecretPayload::file_from_bytes(&name, &mime, &read(&path)?).map_err(|e| e.to_string())?
                }
                _ => return Err("pass exactly one of --text or --file".into()),
            };
            let password = password.map_or(PasswordChoice::Generate, PasswordChoice::Custom);

            let out = encode(EncodeRequest { carrier, payload, password, identifier: None })
                .map_err(|e| e.to_string())?;
            let png = encode_png(&out.carrier).map_err(|e| e.to_string())?;
            fs::write(&output, png).map_err(|e| format!("could not write {}: {e}", output.display()))?;

            println!("Stego image written to: {}", output.display());
            println!("Image ID: {}", out.identifier);
            println!("Password: {}", out.password);
        }
        Command::Capacity { input, text } => {
            let carrier = decode_image(&read(&input)?).map_err(|e| e.to_string())?;
            let report = capacity_report(&carrier, &SecretPayload::Text(text), &mut os_rng())
                .map_err(|e| e.to_string())?;
            println!("Capacity: {} bytes ({} bits)", report.usable_bytes, report.usable_bits);
            println!("Projected message: {} bytes", report.projected_encrypted_bytes);
            if report.over_capacity {
                println!("Warning: message will not fit");
            }
        }
        Command::Decode { input, id, password, out } => {
            let carrier = decode_image(&read(&input)?).map_err(|e| e.to_string())?;
            let secret = decode(&DecodeRequest { carrier: &carrier, identifier: &id, password: &password })
                .map_err(|e: StegoError| e.to_string())?;
            match &secret {
                SecretPayload::Text(text) => println!("Decoded message: {text}"),
                SecretPayload::File { name, mime_type, .. } => {
                    let bytes = secret.file_bytes().ok_or("embedded file is not base64 data")?;
                    // Never trust directory parts of a name read from the image.
                    let path = out.unwrap_or_else(|| {
                        PathBuf::from(secret.safe_file_name().unwrap_or(FALLBACK_FILE_NAME))
                    });
                    fs::write(&path, &bytes).map_err(|e| format!("could not write {}: {e}", path.display()))?;
                    println!("File: {name} ({mime_type}, {} bytes) -> {}", bytes.len(), path.display());
                }
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
