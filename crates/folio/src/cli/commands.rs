//! CLI command definitions.

use clap::{Args, Parser, Subcommand};
use folio_core::{GenerationMode, Protocol, SegmentIndex};
use std::path::PathBuf;

/// Folio - grow stories and scenes one completion at a time
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "Grow stories and scenes one completion at a time", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file layered over the bundled defaults
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create (or overwrite) a World with one empty segment
    Create {
        /// World name
        name: String,

        /// Setting description; parsed as JSON when possible, else kept as a string
        #[arg(long, conflicts_with = "description_file")]
        description: Option<String>,

        /// JSON file holding the setting description
        #[arg(long)]
        description_file: Option<PathBuf>,
    },

    /// Empty the backstory of one World, or of every World
    Clear {
        /// World name
        #[arg(required_unless_present = "all", conflicts_with = "all")]
        name: Option<String>,

        /// Clear every stored World
        #[arg(long)]
        all: bool,
    },

    /// Print the narrative of each segment of a World
    Show {
        /// World name
        name: String,

        /// Print stored completions with their tags
        #[arg(long)]
        raw: bool,
    },

    /// Run one generation round and print the narrative
    Continue(GenerateArgs),

    /// Keep generating until the work ends, mirroring it to a file
    Run {
        #[command(flatten)]
        generate: GenerateArgs,

        /// File rewritten with the segment's narrative after each round
        #[arg(long, default_value = "output.md")]
        output: PathBuf,

        /// Clear the World's backstory first
        #[arg(long)]
        fresh: bool,

        /// Wait for Enter between rounds
        #[arg(long)]
        pause: bool,

        /// Stop a work after this many rounds even without an end marker
        #[arg(long, default_value = "20")]
        max_rounds: usize,

        /// Start a new segment after each finished work until this many are done
        #[arg(long, default_value = "1")]
        works: usize,
    },

    /// Start the HTTP transport
    Serve {
        /// Socket address, overriding `[server] bind`
        #[arg(long)]
        bind: Option<String>,
    },
}

/// Options shared by the generating commands.
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// World to extend
    #[arg(long, default_value = "world0")]
    pub world: String,

    /// What the work is about
    #[arg(long, default_value = "default topic")]
    pub topic: String,

    /// Language to write in
    #[arg(long, default_value = "English")]
    pub language: String,

    /// Segment to extend: `new`, `last`, `-1` or an index
    #[arg(long, default_value = "new", allow_hyphen_values = true)]
    pub segment: SegmentIndex,

    /// `story` or `scene`
    #[arg(long, default_value = "story")]
    pub mode: GenerationMode,

    /// Prompt protocol, overriding `[generation] protocol`
    #[arg(long)]
    pub protocol: Option<Protocol>,
}
