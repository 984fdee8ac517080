use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use snake_core::{Debrief, Runner, ScriptedInput, SessionConfig};

use crate::render::TerminalPresenter;
use crate::util::seed_to_hex;

#[derive(Clone, Debug)]
pub struct PlayOptions {
    pub config: SessionConfig,
    pub inputs: Vec<ScriptedInput>,
    pub max_ms: u64,
    pub render: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct PlaySummary {
    pub seed: u32,
    pub seed_hex: String,
    pub ran_ms: u64,
    pub ticks: u64,
    pub presses: usize,
    pub score: u32,
    pub bonus: u32,
    pub length: usize,
    pub game_over: bool,
    pub debrief: Option<Debrief>,
}

pub struct PlayOutcome {
    pub summary: PlaySummary,
    pub presenter: TerminalPresenter,
}

/// Play one round from a button script until it ends or `max_ms` passes.
pub fn run_play(options: PlayOptions) -> Result<PlayOutcome> {
    let PlayOptions {
        config,
        inputs,
        max_ms,
        render,
    } = options;

    let presenter = TerminalPresenter::new(config.board(), config.seed, render);
    let mut runner = Runner::new(config, presenter)
        .with_context(|| format!("cannot start round for seed {}", seed_to_hex(config.seed)))?;

    let presses = inputs.iter().filter(|input| input.at_ms <= max_ms).count();
    runner.run_script(&inputs, max_ms);

    let state = *runner.session().state();
    let snapshot = runner.session().snapshot();
    let ran_ms = runner.now_ms();
    let presenter = runner.into_presenter();

    tracing::info!(
        seed = config.seed,
        ticks = snapshot.ticks,
        score = state.score,
        game_over = state.resetting,
        "play finished"
    );

    Ok(PlayOutcome {
        summary: PlaySummary {
            seed: config.seed,
            seed_hex: seed_to_hex(config.seed),
            ran_ms,
            ticks: snapshot.ticks,
            presses,
            score: state.score,
            bonus: state.bonus,
            length: snapshot.length,
            game_over: state.resetting,
            debrief: presenter.last_debrief().copied(),
        },
        presenter,
    })
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let encoded = serde_json::to_vec_pretty(value)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed creating {}", parent.display()))?;
    }
    fs::write(path, encoded).with_context(|| format!("failed writing {}", path.display()))
}
