use anyhow::{Context, Result};
use azenv::azure::auth;
use azenv::azure::cli::AzCli;
use azenv::config::Config;
use azenv::envfile::EnvFile;
use azenv::resource::{get_registry, render_summary, run_probe};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Export Azure resource group credentials into a local .env file
#[derive(Parser, Debug)]
#[command(name = "azenv", version = azenv::VERSION, about, long_about = None)]
struct Args {
    /// Resource group to enumerate
    resource_group: String,

    /// Path of the env file to write
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path of the az binary
    #[arg(long)]
    az_bin: Option<String>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off")]
    log_level: LogLevel,

    /// Skip the session check and device code login
    #[arg(long)]
    skip_login: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let Ok(file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    else {
        eprintln!("Warning: could not open log file {}", log_path.display());
        return None;
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("azenv started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("azenv").join("azenv.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".azenv").join("azenv.log");
    }
    PathBuf::from("azenv.log")
}

fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level);

    let config = Config::load();
    let az = AzCli::new(&config.effective_az_binary(args.az_bin.clone()));

    if args.skip_login {
        tracing::info!("Skipping session check");
    } else {
        auth::ensure_session(&az);
    }

    let output_path = config.effective_output(args.output.clone());
    let env = EnvFile::create(&output_path)
        .with_context(|| format!("Cannot initialize {}", output_path.display()))?;

    println!(
        "Collecting resources from resource group '{}'...",
        args.resource_group
    );

    let mut outcomes = Vec::new();
    for def in &get_registry().probes {
        let outcome = run_probe(def, &az, &args.resource_group);
        if let Some(name) = &outcome.name {
            println!("Found {}: {}", def.display_name, name);
            env.append(&outcome.lines)
                .with_context(|| format!("Cannot write {}", output_path.display()))?;
        }
        outcomes.push(outcome);
    }

    println!();
    println!("Environment written to {}", env.path().display());
    println!("Discovered resources:");
    print!("{}", render_summary(&outcomes));

    Ok(())
}
