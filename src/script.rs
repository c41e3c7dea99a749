//! Headless scripted runner: argument parsing, script parsing and playback.
//!
//! A script is one step per line:
//!
//! ```text
//! # comment
//! start
//! moveLeft
//! wait 500
//! hardDrop
//! ```

use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::engine::{EngineConfig, EventSink, GameDriver, ManualClock};
use crate::types::GameAction;

pub const USAGE: &str = "usage: web-tetris [--seed N] [--frame-ms MS] [--script FILE]";

/// Command-line overrides on top of the environment config
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunnerArgs {
    pub seed: Option<u64>,
    pub frame_ms: Option<u32>,
    /// Script file; stdin when unset
    pub script: Option<PathBuf>,
    pub help: bool,
}

impl RunnerArgs {
    pub fn apply(&self, config: &mut EngineConfig) {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(frame_ms) = self.frame_ms {
            config.frame_ms = frame_ms;
        }
    }
}

pub fn parse_args(args: &[String]) -> Result<RunnerArgs> {
    let mut out = RunnerArgs::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                out.seed = Some(
                    v.parse::<u64>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?,
                );
            }
            "--frame-ms" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --frame-ms"))?;
                let ms = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --frame-ms value: {}", v))?;
                if ms == 0 {
                    return Err(anyhow!("--frame-ms must be positive"));
                }
                out.frame_ms = Some(ms);
            }
            "--script" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --script"))?;
                out.script = Some(PathBuf::from(v));
            }
            "-h" | "--help" => out.help = true,
            other => {
                return Err(anyhow!("unknown argument: {}\n{}", other, USAGE));
            }
        }
        i += 1;
    }
    Ok(out)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStep {
    Action(GameAction),
    /// Let this many milliseconds of frames elapse
    Wait(u64),
}

pub fn parse_script(text: &str) -> Result<Vec<ScriptStep>> {
    let mut steps = Vec::new();
    for (n, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut words = line.split_whitespace();
        let head = words.next().unwrap_or_default();
        let step = if head == "wait" {
            let ms = words
                .next()
                .ok_or_else(|| anyhow!("line {}: wait needs a duration", n + 1))?;
            ScriptStep::Wait(
                ms.parse()
                    .map_err(|_| anyhow!("line {}: invalid duration: {}", n + 1, ms))?,
            )
        } else {
            ScriptStep::Action(
                GameAction::from_str(head)
                    .ok_or_else(|| anyhow!("line {}: unknown action: {}", n + 1, head))?,
            )
        };

        if let Some(extra) = words.next() {
            return Err(anyhow!("line {}: unexpected {}", n + 1, extra));
        }
        steps.push(step);
    }
    Ok(steps)
}

/// Play `steps` against the driver, advancing its clock one frame at a time
/// during waits.
pub fn run_script<S: EventSink>(
    driver: &mut GameDriver<ManualClock, S>,
    steps: &[ScriptStep],
    frame_ms: u32,
) {
    let frame_ms = u64::from(frame_ms.max(1));
    for step in steps {
        match *step {
            ScriptStep::Action(action) => {
                driver.apply(action);
            }
            ScriptStep::Wait(ms) => {
                let mut remaining = ms;
                while remaining > 0 {
                    let step_ms = remaining.min(frame_ms);
                    driver.clock().advance(step_ms);
                    driver.frame();
                    remaining -= step_ms;
                }
            }
        }
    }
}
