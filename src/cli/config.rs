// CLI configuration
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Padding written by the write-style commands unless overridden
pub const DEFAULT_PADDING: u32 = 8192;

/// flacmeta - FLAC metadata CLI tool
#[derive(Parser, Debug)]
#[command(name = "flacmeta")]
#[command(about = "Read and rewrite FLAC metadata blocks", long_about = None)]
#[command(version)]
#[command(author = "xwsjjctz <xwsjjctz@icloud.com>")]
pub struct Config {
    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub format: OutputFormat,

    /// Quiet mode (suppress progress messages)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Pretty,
    /// Compact JSON
    Json,
    /// Key-value pairs
    KeyValue,
    /// Table format
    Table,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read metadata from FLAC file(s)
    Read {
        /// FLAC file path(s)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Include picture data (base64) in the output
        #[arg(long)]
        with_data: bool,

        /// Output to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write tags to a FLAC file
    Write {
        /// FLAC file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Tags as a JSON object, e.g. '{"title": "x", "genre": null}'
        #[arg(short, long, required_unless_present = "from_file", conflicts_with = "from_file")]
        metadata: Option<String>,

        /// Read tags from a JSON file
        #[arg(long)]
        from_file: Option<PathBuf>,

        /// Size of the padding block written after the metadata
        #[arg(long, default_value_t = DEFAULT_PADDING)]
        padding: u32,
    },

    /// Parse every matching file in a directory
    Batch {
        /// Directory path
        #[arg(short, long)]
        directory: PathBuf,

        /// File pattern (e.g. "*.flac")
        #[arg(short, long, default_value = "*.flac")]
        pattern: String,
    },

    /// Export embedded pictures
    ExportCover {
        /// FLAC file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output directory for images
        #[arg(short, long)]
        output: PathBuf,

        /// Picture index (all pictures if omitted)
        #[arg(short, long)]
        index: Option<usize>,
    },

    /// Attach a picture
    SetCover {
        /// FLAC file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Image file path
        #[arg(short, long)]
        image: PathBuf,

        /// Picture type number (3 = front cover)
        #[arg(short = 't', long, default_value_t = 3)]
        picture_type: u8,

        /// MIME type (detected from the image if not specified)
        #[arg(short, long)]
        mime_type: Option<String>,

        /// Description
        #[arg(short, long)]
        description: Option<String>,

        /// Size of the padding block written after the metadata
        #[arg(long, default_value_t = DEFAULT_PADDING)]
        padding: u32,
    },

    /// Remove all pictures
    RemoveCover {
        /// FLAC file path(s)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Size of the padding block written after the metadata
        #[arg(long, default_value_t = DEFAULT_PADDING)]
        padding: u32,
    },

    /// Show file information
    Info {
        /// FLAC file path(s)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },
}

impl Config {
    /// Default tracing filter for the chosen verbosity
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}
