use std::path::{Path, PathBuf};

use clap::Parser;
use clap_verbosity_flag::Verbosity;
use mymath_gc::{Heap, HeapConfig};

mod commands;
mod error;

use error::CliError;

#[derive(Parser, Debug)]
#[command(name = "mymath")]
#[command(about = "Drive the mymath native provider through the host boundary", long_about = None)]
struct Args {
    /// Heap configuration file (TOML, `[heap]` table)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(flatten)]
    verbose: Verbosity,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Print the provider version
    Version,

    /// Evaluate sin, cos and tan at a point, scalar and batched
    Trig {
        #[arg(value_name = "X", allow_hyphen_values = true)]
        x: f64,
    },

    /// Multiply two complex numbers given as `re,im`
    Complex {
        #[arg(value_name = "A", allow_hyphen_values = true)]
        a: String,
        #[arg(value_name = "B", allow_hyphen_values = true)]
        b: String,
    },

    /// Re-initialize an array where every other slot is empty
    Reinit {
        /// Number of slots
        #[arg(short = 'n', long, default_value_t = 5)]
        count: usize,
    },

    /// Walk through every boundary operation and report heap statistics
    Demo,
}

fn load_config(path: Option<&Path>) -> Result<HeapConfig, CliError> {
    let config = match path {
        Some(path) => HeapConfig::from_file(path).map_err(|source| CliError::Config {
            path: path.to_path_buf(),
            source,
        })?,
        None => HeapConfig::default(),
    };
    config.with_env_overrides().map_err(CliError::Environment)
}

fn main() -> miette::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let config = load_config(args.config.as_deref())?;
    log::debug!("using {:?}", config);
    let mut heap = Heap::new(config);

    match args.command {
        Command::Version => commands::version::handle_version(&mut heap),
        Command::Trig { x } => commands::trig::handle_trig(&mut heap, x)?,
        Command::Complex { a, b } => commands::complex::handle_complex(&mut heap, &a, &b)?,
        Command::Reinit { count } => commands::reinit::handle_reinit(&mut heap, count)?,
        Command::Demo => commands::demo::handle_demo(heap)?,
    }
    Ok(())
}
