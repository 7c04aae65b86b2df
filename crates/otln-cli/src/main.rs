//! otln CLI
//!
//! Command-line interface for otln - building essay outlines from notes.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "otln")]
#[command(about = "otln - turn piles of notes into an essay outline")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new project from a plain-text note file
    New {
        /// Note file: notes separated by blank lines
        notes: PathBuf,
        /// Where to write the project (.otln added when no extension given)
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Show the displayed note and the topic lines
    Show {
        /// Project file (.otln)
        project: PathBuf,
    },
    /// Manage topics
    Topic {
        #[command(subcommand)]
        command: TopicCommands,
    },
    /// Cycle and file pending notes
    Note {
        #[command(subcommand)]
        command: NoteCommands,
    },
    /// Export the outline as plain text
    Export {
        /// Project file (.otln)
        project: PathBuf,
        /// Where to write the outline
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum TopicCommands {
    /// Create a new topic
    #[command(alias = "add")]
    Create {
        /// Project file (.otln)
        project: PathBuf,
        /// Topic name (must be unique within the project)
        name: String,
    },
    /// List topics in display order
    #[command(alias = "ls")]
    List {
        /// Project file (.otln)
        project: PathBuf,
    },
    /// Show one topic and its notes
    Show {
        /// Project file (.otln)
        project: PathBuf,
        /// Topic name
        name: String,
    },
}

#[derive(Subcommand)]
enum NoteCommands {
    /// Rotate to the next pending note
    Next {
        /// Project file (.otln)
        project: PathBuf,
    },
    /// Rotate back to the previous pending note
    Prev {
        /// Project file (.otln)
        project: PathBuf,
    },
    /// File the displayed note into a topic
    #[command(alias = "add")]
    Assign {
        /// Project file (.otln)
        project: PathBuf,
        /// Topic to file the note into
        topic: String,
    },
    /// Move a note out of a topic, back to the front of the queue
    #[command(alias = "rm")]
    Unassign {
        /// Project file (.otln)
        project: PathBuf,
        /// Topic holding the note
        topic: String,
        /// Exact note text (first match is removed)
        note: String,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (canvas_width, canvas_height, item_gap,
        /// data_dir, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    match cli.command {
        Commands::New { notes, output: target } => commands::project::new(notes, target, &output),
        Commands::Show { project } => commands::project::show(project, &output),
        Commands::Topic { command } => handle_topic_command(command, &output),
        Commands::Note { command } => handle_note_command(command, &output),
        Commands::Export { project, output: target } => {
            commands::export::export(project, target, &output)
        }
        Commands::Config { command } => handle_config_command(command, &output),
    }
}

fn handle_topic_command(command: TopicCommands, output: &Output) -> Result<()> {
    match command {
        TopicCommands::Create { project, name } => commands::topic::create(project, name, output),
        TopicCommands::List { project } => commands::topic::list(project, output),
        TopicCommands::Show { project, name } => commands::topic::show(project, name, output),
    }
}

fn handle_note_command(command: NoteCommands, output: &Output) -> Result<()> {
    match command {
        NoteCommands::Next { project } => commands::note::next(project, output),
        NoteCommands::Prev { project } => commands::note::prev(project, output),
        NoteCommands::Assign { project, topic } => commands::note::assign(project, topic, output),
        NoteCommands::Unassign {
            project,
            topic,
            note,
        } => commands::note::unassign(project, topic, note, output),
    }
}

fn handle_config_command(command: Option<ConfigCommands>, output: &Output) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(output),
        Some(ConfigCommands::Set { key, value }) => commands::config::set(key, value, output),
    }
}
