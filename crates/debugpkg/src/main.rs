use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use debugpkg_core::announce::CAPABILITY_ERROR;
use debugpkg_core::engine::create_engine;
use debugpkg_core::events::SessionEvent;
use debugpkg_core::package_db::RpmDatabase;
use debugpkg_core::resolver::{BuildIdResolver, DnfProvides};
use debugpkg_core::{BuildId, ResolutionMode, Session, Settings, SuggestError};
use debugpkg_utils::{debug, info, init_logging, init_logging_with_level, LogFormat, LogLevel};

/// Suggests commands for installing missing debuginfo packages.
#[derive(Parser, Debug)]
#[command(name = "debugpkg")]
#[command(version)]
#[command(about = "Suggests commands for installing missing debuginfo packages", long_about = None)]
struct Cli
{
    /// Log level (error, warn, info, debug, trace); overrides RUST_LOG
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands
{
    /// Run a scripted debugging session, one event or command per line
    Session
    {
        /// How missing files are handled (fast or slow)
        #[arg(long)]
        mode: Option<ResolutionMode>,
        /// Start with suggestions turned off
        #[arg(long, default_value_t = false)]
        disable: bool,
        /// Debug file search path, entries separated by ':'
        #[arg(long)]
        debug_file_directory: Option<String>,
        /// Script to read (default: stdin)
        script: Option<PathBuf>,
    },
    /// Resolve a build-id to the packages that would provide it
    Resolve
    {
        /// Build-id as a hex string
        build_id: BuildId,
    },
    /// Print the .build-id paths for a build-id
    Paths
    {
        /// Build-id as a hex string
        build_id: BuildId,
    },
}

fn main()
{
    let cli = Cli::parse();

    // Initialize logging before anything else runs. The guard flushes the
    // optional log file on exit.
    let logging = match cli.log_level {
        Some(level) => init_logging_with_level(level, log_format()),
        None => init_logging(),
    };
    let _guard = match logging {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn log_format() -> LogFormat
{
    std::env::var("DEBUGPKG_LOG_FORMAT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(LogFormat::Pretty)
}

fn run_command(command: Commands) -> Result<(), SuggestError>
{
    match command {
        Commands::Session {
            mode,
            disable,
            debug_file_directory,
            script,
        } => {
            let mut settings = Settings::from_env();
            if let Some(mode) = mode {
                settings.mode = mode;
            }
            if disable {
                settings.enabled = false;
            }
            if let Some(dirs) = debug_file_directory {
                settings.debug_file_directory = dirs;
            }
            info!(?settings, "starting session");

            let input: Box<dyn BufRead> = match script {
                Some(path) => Box::new(BufReader::new(File::open(path)?)),
                None => Box::new(BufReader::new(io::stdin())),
            };
            run_session(Session::new(settings, create_engine()), input)
        }
        Commands::Resolve { build_id } => {
            let database = RpmDatabase::detect()
                .ok_or_else(|| SuggestError::CapabilityUnavailable(CAPABILITY_ERROR.to_string()))?;
            let resolver = BuildIdResolver::new(Arc::new(DnfProvides::default()), Arc::new(database));
            let packages = resolver.resolve(&build_id)?;
            debug!(build_id = %build_id, count = packages.len(), "resolved");

            let mut out = io::stdout().lock();
            for package in packages {
                writeln!(out, "{package}")?;
            }
            Ok(())
        }
        Commands::Paths { build_id } => {
            let mut out = io::stdout().lock();
            writeln!(out, "{}", build_id.main_path())?;
            writeln!(out, "{}", build_id.debug_file_path())?;
            Ok(())
        }
    }
}

/// Feed every line of `input` to the session, then show one last prompt so
/// nothing pending is left unannounced.
fn run_session(mut session: Session, input: Box<dyn BufRead>) -> Result<(), SuggestError>
{
    let mut out = io::stdout().lock();
    for line in input.lines() {
        let line = line?;
        if let Err(e) = session.run_line(&line, &mut out) {
            if let SuggestError::Io(_) = e {
                return Err(e);
            }
            out.flush()?;
            eprintln!("Error: {}", e);
        }
    }
    session.handle_event(&SessionEvent::BeforePrompt, &mut out)?;
    out.flush()?;
    Ok(())
}
