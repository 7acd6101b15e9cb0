//! keycalc: drive the keypad calculator from the command line.
//!
//! ## Usage
//!
//! ```bash
//! keycalc '5+3+2='            # run a key script, print the display
//! keycalc '12{bs}3*2='        # {bs}, {del}, {esc}, {enter} name special keys
//! keycalc --frames '9/0='     # print every display refresh
//! keycalc -s session.json     # read key scripts from stdin, keep the session
//! ```

use clap::{ArgAction, Parser};
use keycalc::input::{run_script, KeyScriptError};
use keycalc::machine::{Calculator, DisplaySink, LatestSink, WriterSink};
use keycalc::{BuildError, CalculatorBuilder, Checkpoint, CheckpointError, Config, ConfigError};
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "keycalc", version, about = "Keypad calculator")]
struct Cli {
    /// Key script to run; reads scripts from stdin, one per line, if omitted
    keys: Vec<String>,

    /// Config file (default: <config dir>/keycalc/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Session checkpoint to resume from and save to
    #[arg(short, long)]
    session: Option<PathBuf>,

    /// Print the display after every change instead of once per script
    #[arg(long)]
    frames: bool,

    /// Print the calculation tape before exiting
    #[arg(long)]
    history: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Checkpoint(#[from] CheckpointError),

    #[error(transparent)]
    Keys(#[from] KeyScriptError),

    #[error("{path:?}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("reading stdin: {0}")]
    Stdin(#[source] io::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("keycalc: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let config = Config::load_or_default(cli.config.as_deref())?;
    init_logging(&config, cli.verbose);

    if cli.frames {
        session(cli, &config, WriterSink::new(io::stdout()))
    } else {
        session(cli, &config, LatestSink::new())
    }
}

fn init_logging(config: &Config, verbose: u8) {
    let directive = match verbose {
        0 => config.log.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn session<D: DisplaySink>(cli: &Cli, config: &Config, sink: D) -> Result<(), AppError> {
    let handler = config.input_handler()?;

    let mut builder = CalculatorBuilder::new()
        .sink(sink)
        .history_limit(config.history_limit);
    if let Some(checkpoint) = cli.session.as_deref().map(load_session).transpose()?.flatten() {
        builder = builder.resume(checkpoint);
    }
    let mut calc = builder.build()?;

    if cli.keys.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line.map_err(AppError::Stdin)?;
            match run_script(&mut calc, &handler, line.trim_end()) {
                Ok(_) => show(&calc, cli.frames),
                Err(e) => eprintln!("keycalc: {e}"),
            }
        }
    } else {
        run_script(&mut calc, &handler, &cli.keys.join(""))?;
        show(&calc, cli.frames);
    }

    if cli.history {
        for calculation in calc.tape().entries() {
            println!("{calculation}");
        }
    }

    if let Some(path) = &cli.session {
        save_session(path, &calc.checkpoint())?;
    }
    Ok(())
}

fn show<D: DisplaySink>(calc: &Calculator<D>, frames: bool) {
    if !frames {
        println!("{}", calc.frame());
    }
}

/// Read a session checkpoint. A missing file means a fresh session.
fn load_session(path: &Path) -> Result<Option<Checkpoint>, AppError> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "no session file, starting fresh");
        return Ok(None);
    }
    let json = std::fs::read_to_string(path).map_err(|source| AppError::File {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(Checkpoint::from_json(&json)?))
}

fn save_session(path: &Path, checkpoint: &Checkpoint) -> Result<(), AppError> {
    let json = checkpoint.to_json()?;
    std::fs::write(path, json).map_err(|source| AppError::File {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), id = %checkpoint.id, "session saved");
    Ok(())
}
