#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]

mod commands;
mod options;
mod script;

pub use options::*;

use std::path::PathBuf;

use bitmappy_edit::{Color, Position};
use clap::{Parser, Subcommand};
use commands::ReplayArgs;
use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming};
use semver::Version;

lazy_static::lazy_static! {
    pub static ref VERSION: Version = Version::parse(env!("CARGO_PKG_VERSION")).unwrap();
}

#[derive(Parser, Debug)]
#[command(version, about = "Create and edit bitmappy sprite files", long_about = None)]
pub struct Args {
    /// Print debug output to stderr
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Create a blank transparent sprite")]
    New {
        output: PathBuf,
        #[arg(long)]
        width: Option<i32>,
        #[arg(long)]
        height: Option<i32>,
        #[arg(long)]
        name: Option<String>,
    },

    #[command(about = "Print name, size, color keys and pixel rows of a sprite")]
    Show { file: PathBuf },

    #[command(about = "Set pixels to a color")]
    Paint {
        file: PathBuf,
        #[arg(long, value_parser = Color::from_hex, help = "Color as #RRGGBB")]
        color: Color,
        #[arg(long = "at", value_parser = parse_position, required = true, help = "Pixel as X,Y, may be repeated")]
        at: Vec<Position>,
        #[arg(long, help = "Write here instead of overwriting FILE")]
        output: Option<PathBuf>,
    },

    #[command(about = "Render a sprite to PNG")]
    Render {
        file: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[arg(long, help = "Pixels per sprite pixel")]
        scale: Option<i32>,
    },

    #[command(about = "Feed an input script to the editor")]
    Replay {
        file: PathBuf,
        script: PathBuf,
        #[arg(long, help = "Save the edited sprite here")]
        output: Option<PathBuf>,
        #[arg(long, help = "Render the editor screen to this PNG")]
        screenshot: Option<PathBuf>,
    },
}

fn parse_position(arg: &str) -> Result<Position, String> {
    let Some((x, y)) = arg.split_once(',') else {
        return Err(format!("expected X,Y, got '{arg}'"));
    };
    let x = x.trim().parse().map_err(|e| format!("invalid x '{x}': {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("invalid y '{y}': {e}"))?;
    Ok(Position::new(x, y))
}

fn start_logger(verbose: bool) -> Option<LoggerHandle> {
    let log_spec = if verbose { "debug" } else { "info" };
    let logger = match Logger::try_with_env_or_str(log_spec) {
        Ok(logger) => logger,
        Err(err) => {
            eprintln!("Failed to set up logging: {err}");
            return None;
        }
    };
    let logger = if let Some(log_dir) = Options::get_log_dir() {
        logger
            .log_to_file(FileSpec::default().directory(&log_dir).basename("bitmappy").suffix("log").suppress_timestamp())
            .rotate(Criterion::Size(64 * 1024), Naming::Numbers, Cleanup::KeepLogFiles(3))
            .duplicate_to_stderr(if verbose { Duplicate::Debug } else { Duplicate::Warn })
    } else {
        eprintln!("Failed to create log file");
        logger.log_to_stderr()
    };
    match logger.start() {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("Failed to start logging: {err}");
            None
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _logger = start_logger(args.verbose);
    log::info!("Starting bitmappy {}", *VERSION);

    let options = Options::load_options();
    match &args.command {
        Commands::New { output, width, height, name } => {
            let size = (width.unwrap_or(options.canvas_width), height.unwrap_or(options.canvas_height));
            let name = name.as_deref().unwrap_or(&options.sprite_name);
            commands::new_sprite(output, size.into(), name)
        }
        Commands::Show { file } => commands::show_sprite(file),
        Commands::Paint { file, color, at, output } => commands::paint_sprite(file, *color, at, output.as_deref()),
        Commands::Render { file, output, scale } => commands::render_sprite(file, output, scale.unwrap_or(options.cell_size)),
        Commands::Replay {
            file,
            script,
            output,
            screenshot,
        } => commands::replay(
            &ReplayArgs {
                file,
                script,
                output: output.as_deref(),
                screenshot: screenshot.as_deref(),
            },
            &options,
        ),
    }
}

#[cfg(test)]
mod tests {
    use bitmappy_edit::Position;
    use clap::CommandFactory;

    use super::{parse_position, Args};

    #[test]
    fn test_args() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_position() {
        assert_eq!(Ok(Position::new(3, 14)), parse_position("3,14"));
        assert_eq!(Ok(Position::new(3, 14)), parse_position(" 3 , 14"));
        assert!(parse_position("3").is_err());
        assert!(parse_position("3,x").is_err());
    }
}
