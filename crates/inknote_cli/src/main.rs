//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `inknote_core` linkage.
//! - Exercise note create/list/delete against a real directory.

use clap::{Parser, Subcommand};
use inknote_core::{
    core_version, default_log_level, init_logging, load_drawing, CoreConfig, JsonStrokeCodec,
    NoteService,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "inknote_cli", version = core_version())]
#[command(about = "Smoke probe for InkNote drawing notes")]
struct Cli {
    /// Directory holding one `.drawing` file per note
    notes_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
enum Command {
    /// List notes in the directory (default)
    List,

    /// Create an empty note
    Create {
        /// Note title
        title: String,
    },

    /// Delete a note file
    Delete {
        /// Note title
        title: String,
    },

    /// Load a note and print its stroke count
    Show {
        /// Note title
        title: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let notes_dir = std::path::absolute(&cli.notes_dir).map_err(|err| err.to_string())?;
    let config = CoreConfig::new(notes_dir.clone());
    config.validate().map_err(|err| err.to_string())?;

    if let Err(err) = init_logging(default_log_level(), &notes_dir.join(".logs")) {
        eprintln!("warning: logging disabled: {err}");
    }

    let mut service = NoteService::start(&config).map_err(|err| err.to_string())?;

    match cli.command.unwrap_or(Command::List) {
        Command::List => {
            for note in service.notes() {
                println!("{}", note.title);
            }
        }
        Command::Create { title } => {
            let note = service.create_note(title).map_err(|err| err.to_string())?;
            let path = service.note_path(note.id).map_err(|err| err.to_string())?;
            println!("created {path}");
        }
        Command::Delete { title } => {
            service.store().delete(&title).map_err(|err| err.to_string())?;
            println!("deleted {title}");
        }
        Command::Show { title } => {
            let path = service.store().resolve_path(&title);
            let drawing = load_drawing(&path, &JsonStrokeCodec);
            println!("{path} strokes={}", drawing.len());
        }
    }

    log::debug!("event=cli_command module=cli status=ok");
    Ok(())
}
