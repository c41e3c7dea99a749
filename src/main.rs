//! Headless Tetris runner (default binary).
//!
//! Plays a script of actions and waits against a manual clock, then prints
//! the final snapshot as JSON. Sound cues are logged through `env_logger`
//! (`RUST_LOG=web_tetris::cue=debug`).

use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result};

use web_tetris::core::GameState;
use web_tetris::engine::{EngineConfig, GameDriver, LogSink, ManualClock};
use web_tetris::script::{parse_args, parse_script, run_script, USAGE};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let runner_args = parse_args(&args)?;
    if runner_args.help {
        println!("{USAGE}");
        return Ok(());
    }

    let mut config = EngineConfig::from_env();
    runner_args.apply(&mut config);
    log::debug!("config: {config:?}");

    let text = match &runner_args.script {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading script from stdin")?;
            buf
        }
    };
    let steps = parse_script(&text)?;

    let mut driver = GameDriver::with_store(
        GameState::new(config.seed),
        ManualClock::new(),
        LogSink,
        config.high_score_store(),
    );
    run_script(&mut driver, &steps, config.frame_ms);

    let snapshot = driver.snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
