use crate::config::EditorConfig;
use crate::error::Result;
use crate::file_utils::PathExt;
use crate::services::{EditCommand, ViewerService};
use crate::state::DirectoryLister;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pro-image-viewer")]
#[command(about = "Browse a folder of images and apply undoable edits", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Editor settings JSON file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the images next to a file (or inside a directory)
    List {
        /// Image file or directory
        #[arg(required = true)]
        path: PathBuf,
    },

    /// Open an image and replay edit commands against it
    Edit {
        /// Image file or directory
        #[arg(required = true)]
        path: PathBuf,

        /// Edit command, repeatable: rotate, sharpen, grayscale, commit, undo,
        /// redo, reset, next, prev, save, brightness=N, contrast=F,
        /// saturation=N, blur=N, crop=X,Y,W,H, crop=X1,Y1:X2,Y2
        #[arg(long = "op", value_name = "OP")]
        ops: Vec<EditCommand>,

        /// Write the result here instead of touching the original
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite the opened file with the result
        #[arg(long, conflicts_with = "output")]
        in_place: bool,
    },
}

/// Executes the parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => EditorConfig::from_json_file(path)?,
        None => EditorConfig::default(),
    };

    match cli.command {
        Commands::List { path } => {
            let mut lister = DirectoryLister::new();
            lister.open(&path)?;

            let current = lister.current_index();
            for (index, entry) in lister.entries().iter().enumerate() {
                let marker = if Some(index) == current { '>' } else { ' ' };
                println!("{} {}", marker, entry.display());
            }
        }

        Commands::Edit {
            path,
            ops,
            output,
            in_place,
        } => {
            let mut service = ViewerService::new(config);
            let opened = service.open(&path)?;
            println!("Opened {}", opened.format_for_log());

            for op in ops {
                service.apply(op)?;
            }

            if let Some(output) = output {
                service.session().save_as(&output)?;
                println!("Saved As: {}", output.display());
            } else if in_place {
                service.apply(EditCommand::Save)?;
                println!("Saved");
            }

            if let Some(status) = service.status_line() {
                println!("{}", status);
            }
            let session = service.session();
            println!(
                "History: {}/{}",
                session.history_index().map_or(0, |i| i + 1),
                session.history_len()
            );
        }
    }

    Ok(())
}
