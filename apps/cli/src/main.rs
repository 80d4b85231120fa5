// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: run one room command against a JSON model snapshot.
//!
//! Usage:
//!   planroom <command> <model.json> [--output <path>]
//!
//! The snapshot is written back (in place unless `--output` is given) only
//! when the command succeeds.

use planroom_model::MemoryDocument;
use planroom_rooms::{run_command, CommandOutcome, RoomCommand, RoomsConfig};
use std::env;
use std::fs;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 3 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return if args.len() >= 2 && (args[1] == "--help" || args[1] == "-h") {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    }

    let command: RoomCommand = match args[1].parse() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            print_usage();
            return ExitCode::FAILURE;
        }
    };
    let model_path = &args[2];

    // Parse options
    let mut output_path = model_path.clone();
    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "--output" => {
                i += 1;
                match args.get(i) {
                    Some(path) => output_path = path.clone(),
                    None => {
                        eprintln!("--output needs a path");
                        return ExitCode::FAILURE;
                    }
                }
            }
            other => {
                eprintln!("Unknown option: {}", other);
                print_usage();
                return ExitCode::FAILURE;
            }
        }
        i += 1;
    }

    match run(command, model_path, &output_path) {
        Ok(CommandOutcome::Succeeded) => ExitCode::SUCCESS,
        Ok(CommandOutcome::Failed) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(
    command: RoomCommand,
    model_path: &str,
    output_path: &str,
) -> Result<CommandOutcome, Box<dyn std::error::Error>> {
    let json = fs::read_to_string(model_path)?;
    let mut doc = MemoryDocument::from_json(&json)?;
    let config = RoomsConfig::from_env();

    tracing::info!(
        command = %command,
        model = model_path,
        separator = %config.name_separator,
        numbering = ?config.numbering,
        "Running command"
    );

    let outcome = run_command(&mut doc, command, &config)?;

    for message in doc.take_messages() {
        eprintln!("[{}] {}", message.title, message.body);
    }

    if outcome == CommandOutcome::Succeeded {
        fs::write(output_path, doc.to_json()?)?;
        tracing::info!(output = output_path, "Model written");
    }
    Ok(outcome)
}

fn print_usage() {
    eprintln!("Usage: planroom <command> <model.json> [--output <path>]");
    eprintln!();
    eprintln!("Commands:");
    for command in RoomCommand::ALL {
        eprintln!("  {}", command);
    }
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  PLANROOM_NAME_SEPARATOR  Separator in room names (default: _)");
    eprintln!("  PLANROOM_NUMBERING       native | centroid (default: native)");
    eprintln!("  RUST_LOG                 Log filter (default: info)");
}
