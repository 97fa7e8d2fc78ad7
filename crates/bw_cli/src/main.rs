//! Basewarden CLI
//!
//! Runs the turn loop over stdin/stdout: init block once, then one
//! snapshot block per turn in, one action line per agent out. Diagnostics
//! go to stderr so the action stream stays clean.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use bw_core::{GameSetup, TurnEngine, TurnSnapshot};

#[derive(Parser)]
#[command(name = "basewarden")]
#[command(about = "Arena defense bot: snapshots on stdin, actions on stdout", long_about = None)]
struct Cli {
    /// Log filter in EnvFilter syntax, e.g. "bw_core=trace"
    #[arg(long, default_value = "info")]
    log: String,

    /// Stop after this many turns (runs until EOF when absent)
    #[arg(long)]
    max_turns: Option<u64>,

    /// Dump every decision as a JSON line on stderr
    #[arg(long)]
    trace_decisions: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cli.log))
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin().lock();
    let mut lines = stdin.lines().map_while(|line| line.ok());

    let setup = GameSetup::parse(&mut lines).context("reading init block")?;
    info!(
        base = ?setup.arena.own_base,
        agents = setup.agents_per_side,
        version = bw_core::VERSION,
        "match started"
    );

    let mut engine = TurnEngine::new(setup.arena.clone());
    let mut stdout = io::stdout().lock();
    let mut turn: u64 = 0;

    loop {
        if cli.max_turns.is_some_and(|max| turn >= max) {
            info!(turn, "turn limit reached");
            break;
        }

        let snapshot = match TurnSnapshot::parse(&mut lines, engine.arena()) {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                info!(turn, "input closed, match over");
                break;
            }
            Err(e) => return Err(e).with_context(|| format!("snapshot for turn {}", turn + 1)),
        };
        turn += 1;

        let started = Instant::now();
        let decisions = engine.play_turn(&snapshot);
        for decision in &decisions {
            writeln!(stdout, "{}", decision.action).context("writing action")?;
            if cli.trace_decisions {
                let dump = serde_json::to_string(decision).context("encoding decision")?;
                eprintln!("{dump}");
            }
        }
        stdout.flush().context("flushing actions")?;

        debug!(
            turn,
            elapsed_us = started.elapsed().as_micros() as u64,
            "turn evaluated"
        );
    }

    Ok(())
}
