// CLI binary entry point for flacmeta

mod cli;

use std::process;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::commands;
use cli::{Commands, Config, OutputFormatter};

fn main() {
    let config = Config::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(config) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(config: Config) -> Result<()> {
    let formatter = OutputFormatter::new(config.format, config.quiet);

    match config.command {
        Commands::Read { files, with_data, output } => {
            commands::command_read(&files, with_data, output.as_deref(), &formatter)
        }
        Commands::Info { files } => commands::command_info(&files, &formatter),
        Commands::Write { file, metadata, from_file, padding } => commands::command_write(
            &file,
            metadata.as_deref(),
            from_file.as_deref(),
            padding,
            &formatter,
        ),
        Commands::Batch { directory, pattern } => {
            commands::command_batch(&directory, &pattern, &formatter)
        }
        Commands::ExportCover { file, output, index } => {
            commands::command_export_cover(&file, &output, index, &formatter)
        }
        Commands::SetCover {
            file,
            image,
            picture_type,
            mime_type,
            description,
            padding,
        } => commands::command_set_cover(
            &file,
            &image,
            picture_type,
            mime_type,
            description,
            padding,
            &formatter,
        ),
        Commands::RemoveCover { files, padding } => {
            commands::command_remove_cover(&files, padding, &formatter)
        }
    }
}
