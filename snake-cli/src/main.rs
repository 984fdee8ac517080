use anyhow::Result;
use clap::{Parser, Subcommand};
use snake_cli::bench::{run_benchmark, BenchConfig};
use snake_cli::config::{load_session_config, ConfigOverrides};
use snake_cli::play::{run_play, write_json, PlayOptions};
use snake_cli::script::{load_script, parse_inputs};
use snake_cli::util::{parse_seed, resolve_seeds, seed_to_hex};
use snake_core::{Debrief, SeededRng};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "wrist-snake")]
#[command(about = "Headless driver for the wrist-sized snake game")]
struct Cli {
    /// JSON file with session settings, layered over SNAKE_* environment variables
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play one round from a button script
    Play {
        #[arg(long)]
        seed: Option<String>,
        /// Presses as button@ms, e.g. "up@300,down@900,select@1500"
        #[arg(long, conflicts_with = "script")]
        inputs: Option<String>,
        /// JSON array of {"at_ms", "button"} objects
        #[arg(long)]
        script: Option<PathBuf>,
        #[arg(long, default_value_t = 60_000)]
        max_ms: u64,
        /// Print an ASCII frame for every redraw
        #[arg(long, default_value_t = false)]
        render: bool,
        /// Write every presenter call as JSON
        #[arg(long)]
        trace: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Run the greedy autopilot over many seeds
    Bench {
        #[arg(long)]
        seeds: Option<String>,
        #[arg(long)]
        seed_file: Option<PathBuf>,
        #[arg(long)]
        seed_start: Option<String>,
        #[arg(long, default_value_t = 12)]
        seed_count: u32,
        #[arg(long, default_value_t = 120_000)]
        max_ms: u64,
        #[arg(long)]
        jobs: Option<usize>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Show the results screen lines for a score
    Debrief {
        #[arg(long)]
        score: u32,
        #[arg(long)]
        seed: Option<String>,
    },
    /// Print the effective session configuration
    Config {
        #[arg(long)]
        seed: Option<String>,
    },
}

fn parse_optional_seed(seed: Option<&str>) -> Result<Option<u32>> {
    seed.map(parse_seed).transpose()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    let Cli { config, command } = Cli::parse();

    match command {
        Commands::Play {
            seed,
            inputs,
            script,
            max_ms,
            render,
            trace,
            output,
        } => {
            let overrides = ConfigOverrides {
                seed: parse_optional_seed(seed.as_deref())?,
            };
            let session = load_session_config(config.as_deref(), overrides)?;
            let inputs = match (inputs, script) {
                (Some(list), _) => parse_inputs(&list)?,
                (None, Some(path)) => load_script(&path)?,
                (None, None) => Vec::new(),
            };

            let outcome = run_play(PlayOptions {
                config: session,
                inputs,
                max_ms,
                render,
            })?;

            if render {
                for (index, frame) in outcome.presenter.frames().iter().enumerate() {
                    println!("tick {}", index + 1);
                    print!("{frame}");
                }
            }

            let summary = &outcome.summary;
            println!("seed={}", summary.seed_hex);
            println!("ticks={}", summary.ticks);
            println!("presses={}", summary.presses);
            println!("score={}", summary.score);
            println!("length={}", summary.length);
            println!("game_over={}", summary.game_over);
            if let Some(debrief) = &summary.debrief {
                println!("title={}", debrief.title);
                println!("compliment={}", debrief.compliment);
            }

            if let Some(path) = trace {
                write_json(&path, &outcome.presenter.recorder().events)?;
                println!("trace={}", path.display());
            }
            if let Some(path) = output {
                write_json(&path, summary)?;
                println!("output={}", path.display());
            }
        }
        Commands::Bench {
            seeds,
            seed_file,
            seed_start,
            seed_count,
            max_ms,
            jobs,
            output,
        } => {
            let session = load_session_config(config.as_deref(), ConfigOverrides::default())?;
            let seeds = resolve_seeds(
                seeds.as_deref(),
                seed_file.as_deref(),
                seed_start.as_deref(),
                seed_count,
            )?;

            let report = run_benchmark(BenchConfig {
                session,
                seeds,
                max_ms,
                jobs,
            })?;

            println!("runs={}", report.run_count);
            println!(
                "jobs={}",
                report
                    .jobs
                    .map(|value| value.to_string())
                    .unwrap_or_else(|| "auto".to_string())
            );
            println!("avg_score={:.1}", report.avg_score);
            println!("max_score={}", report.max_score);
            println!("avg_ticks={:.1}", report.avg_ticks);
            println!("death_rate={:.0}%", report.death_rate * 100.0);
            println!("top runs:");
            for (idx, run) in report.runs.iter().take(5).enumerate() {
                println!(
                    "  {}. {} score={} apples={} ticks={} game_over={}",
                    idx + 1,
                    run.seed_hex,
                    run.score,
                    run.apples,
                    run.ticks,
                    run.game_over,
                );
            }

            if let Some(path) = output {
                write_json(&path, &report)?;
                println!("output={}", path.display());
            }
        }
        Commands::Debrief { score, seed } => {
            let overrides = ConfigOverrides {
                seed: parse_optional_seed(seed.as_deref())?,
            };
            let session = load_session_config(config.as_deref(), overrides)?;
            let mut rng = SeededRng::new(session.seed);
            let debrief = Debrief::for_score(score, &mut rng);
            println!("seed={}", seed_to_hex(session.seed));
            println!("score={}", debrief.score);
            println!("title={}", debrief.title);
            println!("compliment={}", debrief.compliment);
        }
        Commands::Config { seed } => {
            let overrides = ConfigOverrides {
                seed: parse_optional_seed(seed.as_deref())?,
            };
            let session = load_session_config(config.as_deref(), overrides)?;
            println!("{}", serde_json::to_string_pretty(&session)?);
        }
    }

    Ok(())
}
