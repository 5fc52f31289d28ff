use arena_session_cli::application::{
    DemoConfig, Frame, ReplayConfig, ReplayFile, SCHEMA_NAMES, play, run_demo, schema_by_name,
    write_all,
};
use arena_session_cli::{LogConfig, Result};
use arena_session_core::RoomCode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "arena-cli")]
#[command(version, about = "Arena Session CLI - two-player room sessions, replay and schemas")]
struct Cli {
    /// Debug-level logs with spans and thread ids
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true, env = "ARENA_LOG_JSON")]
    log_json: bool,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<String>,

    /// Level for workspace crates when RUST_LOG is unset
    #[arg(long, global = true)]
    log_level: Option<tracing::Level>,

    /// Disable logging entirely
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a scripted game between two polling viewers
    Demo {
        /// Room code to open
        #[arg(short = 'r', long, default_value = "AB12C3")]
        room_code: String,

        /// Polling interval of both viewers
        #[arg(short = 'i', long, default_value_t = 1000)]
        interval_ms: u64,

        /// Agree on a rematch afterwards
        #[arg(long)]
        rematch: bool,

        /// Write the finished game for `replay --input`
        #[arg(short = 'e', long)]
        export: Option<PathBuf>,
    },

    /// Replay a finished game move by move
    Replay {
        /// Game exported by `demo --export` (plays the demo game when omitted)
        #[arg(short = 'f', long)]
        input: Option<PathBuf>,

        /// Print only the board after this many moves
        #[arg(short = 's', long)]
        step: Option<usize>,

        /// Delay between moves
        #[arg(short = 'i', long, default_value_t = 1000)]
        interval_ms: u64,
    },

    /// Print JSON schemas of the wire types
    Schema {
        /// Single schema to print (default: all names)
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Write every schema into this directory instead
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    log_config(&cli).init()?;

    match cli.command {
        Commands::Demo {
            room_code,
            interval_ms,
            rematch,
            export,
        } => demo(&room_code, interval_ms, rematch, export).await?,
        Commands::Replay {
            input,
            step,
            interval_ms,
        } => replay(input, step, interval_ms).await?,
        Commands::Schema { name, out } => schema(name, out)?,
    }

    Ok(())
}

/// Logging setup from the global flags
fn log_config(cli: &Cli) -> LogConfig {
    let mut config = if cli.verbose {
        LogConfig::dev()
    } else if cli.log_json {
        LogConfig::json()
    } else {
        LogConfig::default()
    };
    config.json_format = cli.log_json;
    if let Some(level) = cli.log_level {
        config = config.with_level(level);
    }
    if let Some(path) = &cli.log_file {
        config = config.with_file_output(path.clone());
    }
    if cli.quiet {
        config = config.without_logs();
    }
    config
}

async fn demo(
    room_code: &str,
    interval_ms: u64,
    rematch: bool,
    export: Option<PathBuf>,
) -> Result<()> {
    let config = DemoConfig::new(RoomCode::parse(room_code)?)
        .with_poll_interval(interval_ms)
        .with_rematch(rematch);

    let report = run_demo(&config).await?;
    let snapshot = &report.final_snapshot;

    println!("Room {}", snapshot.room_code);
    println!("{}", snapshot.board.render_grid());
    println!("{}", snapshot.headline(None));
    if let Some(next) = &report.rematch_room {
        println!("Rematch continues in {next}");
    }

    if let Some(path) = export {
        report.replay.save(&path)?;
        info!("Exported {} moves to {}", report.replay.moves.len(), path.display());
    }

    Ok(())
}

async fn replay(input: Option<PathBuf>, step: Option<usize>, interval_ms: u64) -> Result<()> {
    let file = match input {
        Some(path) => ReplayFile::load(&path)?,
        None => {
            info!("No input given, replaying the demo game");
            let config = DemoConfig::new(RoomCode::parse("AB12C3")?).with_poll_interval(10);
            run_demo(&config).await?.replay
        }
    };

    if let Some(step) = step {
        println!("{}", file.board_at(step).render_grid());
        return Ok(());
    }

    let mut player = file.player();
    let config = ReplayConfig::default().with_tick_interval(interval_ms);
    play(&mut player, &config, print_frame).await;

    Ok(())
}

fn print_frame(frame: &Frame) {
    match &frame.last_move {
        Some(mv) => println!(
            "Move {}: {} at ({}, {})",
            frame.step, mv.participant, mv.row, mv.col
        ),
        None => println!("Start"),
    }
    println!("{}\n", frame.board.render_grid());
}

fn schema(name: Option<String>, out: Option<PathBuf>) -> Result<()> {
    if let Some(dir) = out {
        for path in write_all(&dir)? {
            println!("{}", path.display());
        }
        return Ok(());
    }

    let names: Vec<String> = match name {
        Some(name) => vec![name],
        None => SCHEMA_NAMES.iter().map(|n| n.to_string()).collect(),
    };

    for name in names {
        let schema = schema_by_name(&name)?;
        println!("{}", serde_json::to_string_pretty(&schema)?);
    }

    Ok(())
}
