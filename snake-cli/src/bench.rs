//! Greedy autopilot and the multi-seed benchmark built on it.

use anyhow::{anyhow, Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use snake_core::{
    Board, Button, GameSession, MoveOutcome, NullPresenter, Position, Runner, SessionConfig,
    Snake,
};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::util::seed_to_hex;

/// Steer toward the apple one step at a time, never into the body.
pub fn greedy_policy(session: &GameSession) -> Option<Button> {
    choose_move(session.board(), session.snake(), session.apple().position)
}

/// Try each option (keep going, turn up, turn down) on a copy of the snake.
/// Among the moves that survive the step the one landing closest to `target`
/// wins, with going straight preferred on ties.
pub fn choose_move(board: &Board, snake: &Snake, target: Position) -> Option<Button> {
    let mut best: Option<(i32, Option<Button>)> = None;
    for choice in [None, Some(Button::Up), Some(Button::Down)] {
        let mut probe = snake.clone();
        match choice {
            Some(Button::Up) => probe.turn_ccw(),
            Some(Button::Down) => probe.turn_cw(),
            _ => {}
        }
        if probe.advance(board) == MoveOutcome::Collided {
            continue;
        }
        let distance = wrapped_distance(board, probe.head(), target);
        if best.map_or(true, |(current, _)| distance < current) {
            best = Some((distance, choice));
        }
    }

    best.and_then(|(_, choice)| choice)
}

/// Chebyshev distance on the torus.
fn wrapped_distance(board: &Board, a: Position, b: Position) -> i32 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    let dx = dx.min((board.width - dx).abs());
    let dy = dy.min((board.height - dy).abs());
    dx.max(dy)
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunMetrics {
    pub seed: u32,
    pub seed_hex: String,
    pub ticks: u64,
    pub elapsed_ms: u64,
    pub score: u32,
    pub apples: usize,
    pub final_length: usize,
    pub game_over: bool,
}

pub fn run_autopilot(config: SessionConfig, max_ms: u64) -> Result<RunMetrics> {
    let mut runner = Runner::new(config, NullPresenter)?;
    let game_over = runner.run_with_policy(max_ms, greedy_policy);

    let snapshot = runner.session().snapshot();
    Ok(RunMetrics {
        seed: config.seed,
        seed_hex: seed_to_hex(config.seed),
        ticks: snapshot.ticks,
        elapsed_ms: runner.now_ms(),
        score: snapshot.score,
        apples: snapshot.length.saturating_sub(config.start_length),
        final_length: snapshot.length,
        game_over,
    })
}

#[derive(Clone, Debug)]
pub struct BenchConfig {
    pub session: SessionConfig,
    pub seeds: Vec<u32>,
    pub max_ms: u64,
    pub jobs: Option<usize>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BenchReport {
    pub generated_unix_s: u64,
    pub max_ms: u64,
    pub jobs: Option<usize>,
    pub run_count: usize,
    pub avg_score: f64,
    pub max_score: u32,
    pub avg_ticks: f64,
    pub avg_apples: f64,
    pub death_rate: f64,
    pub runs: Vec<RunMetrics>,
}

pub fn run_benchmark(config: BenchConfig) -> Result<BenchReport> {
    if config.seeds.is_empty() {
        return Err(anyhow!("benchmark requires at least one seed"));
    }
    if let Some(jobs) = config.jobs {
        if jobs == 0 {
            return Err(anyhow!("benchmark --jobs must be >= 1 when provided"));
        }
    }
    config
        .session
        .validate()
        .context("invalid session configuration")?;

    let run_one = |seed: &u32| -> Result<RunMetrics> {
        run_autopilot(config.session.with_seed(*seed), config.max_ms)
            .with_context(|| format!("benchmark run failed for seed={seed:#x}"))
    };

    let run_results: Vec<Result<RunMetrics>> = if let Some(jobs) = config.jobs {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .context("failed to build rayon threadpool")?;
        pool.install(|| config.seeds.par_iter().map(run_one).collect())
    } else {
        config.seeds.par_iter().map(run_one).collect()
    };

    let mut runs = Vec::with_capacity(run_results.len());
    for result in run_results {
        runs.push(result?);
    }

    let run_count = runs.len();
    let sum_score: u64 = runs.iter().map(|r| r.score as u64).sum();
    let sum_ticks: u64 = runs.iter().map(|r| r.ticks).sum();
    let sum_apples: usize = runs.iter().map(|r| r.apples).sum();
    let max_score = runs.iter().map(|r| r.score).max().unwrap_or_default();
    let deaths = runs.iter().filter(|r| r.game_over).count();

    runs.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| b.ticks.cmp(&a.ticks))
            .then_with(|| a.seed.cmp(&b.seed))
    });

    tracing::info!(run_count, max_score, deaths, "benchmark finished");

    Ok(BenchReport {
        generated_unix_s: unix_now(),
        max_ms: config.max_ms,
        jobs: config.jobs,
        run_count,
        avg_score: sum_score as f64 / run_count as f64,
        max_score,
        avg_ticks: sum_ticks as f64 / run_count as f64,
        avg_apples: sum_apples as f64 / run_count as f64,
        death_rate: deaths as f64 / run_count as f64,
        runs,
    })
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
