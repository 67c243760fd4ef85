use oligopoly_ports::TrajectoryRecorder;
use oligopoly_runner::{JsonLinesRecorder, MemoryRecorder, Tournament, TournamentConfig};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

fn print_help() {
    eprintln!(
        r#"Oligopoly Simulator - multi-firm pricing and R&D tournaments

USAGE:
    oligopoly-sim [OPTIONS]

OPTIONS:
    --config <PATH>     Load tournament configuration from JSON file
    --episodes <N>      Number of episodes (overrides config)
    --seed <SEED>       Base seed; episode k uses SEED + k (overrides config)
    --output <PATH>     Write per-step trajectory rows as JSON lines
    --report <PATH>     Write the tournament report as JSON
    --serial            Run episodes one after another
    --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG            Log level filter (default: info)

EXAMPLES:
    # Ten random-policy episodes with defaults
    oligopoly-sim

    # Reproducible run with trajectory output
    oligopoly-sim --seed 42 --episodes 20 --output trajectories.jsonl
"#
    );
}

fn next_value(args: &[String], i: &mut usize, flag: &str) -> String {
    *i += 1;
    if *i >= args.len() {
        eprintln!("Error: {} requires an argument", flag);
        std::process::exit(1);
    }
    args[*i].clone()
}

fn parse_or_exit<T: std::str::FromStr>(value: &str, flag: &str) -> T {
    value.parse().unwrap_or_else(|_| {
        eprintln!("Error: invalid value for {}: {}", flag, value);
        std::process::exit(1);
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;
    let mut episodes: Option<u32> = None;
    let mut seed: Option<u64> = None;
    let mut output: Option<PathBuf> = None;
    let mut report_path: Option<PathBuf> = None;
    let mut serial = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--config" | "-c" => config_path = Some(next_value(&args, &mut i, "--config")),
            "--episodes" | "-n" => {
                let value = next_value(&args, &mut i, "--episodes");
                episodes = Some(parse_or_exit(&value, "--episodes"));
            }
            "--seed" | "-s" => {
                let value = next_value(&args, &mut i, "--seed");
                seed = Some(parse_or_exit(&value, "--seed"));
            }
            "--output" | "-o" => output = Some(next_value(&args, &mut i, "--output").into()),
            "--report" => report_path = Some(next_value(&args, &mut i, "--report").into()),
            "--serial" => serial = true,
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let mut config = if let Some(path) = config_path {
        log::info!("Loading configuration from: {}", path);
        TournamentConfig::from_file(&path)?
    } else {
        log::info!("Using default configuration");
        TournamentConfig::default()
    };
    if let Some(episodes) = episodes {
        config.episodes = episodes;
    }
    if seed.is_some() {
        config.seed = seed;
    }
    if output.is_some() {
        config.output = output;
    }
    if serial {
        config.parallel = false;
    }

    log::info!(
        "Market: {} firms, {} steps per episode, {} episodes, seed={:?}",
        config.market.n_firms,
        config.market.max_steps,
        config.episodes,
        config.seed
    );

    let output = config.output.clone();
    let tournament = Tournament::new(config)?;

    let mut recorder: Box<dyn TrajectoryRecorder> = match &output {
        Some(path) => {
            log::info!("Writing trajectories to: {}", path.display());
            Box::new(JsonLinesRecorder::new(BufWriter::new(File::create(path)?)))
        }
        None => Box::new(MemoryRecorder::new()),
    };

    let report = tournament.run(recorder.as_mut()).await?;

    log::info!("=== TOURNAMENT SUMMARY ({} episodes) ===", report.episodes.len());
    log::info!("Policies: {:?}", report.policies);
    report.summary.log();

    if let Some(path) = report_path {
        let file = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(file, &report)?;
        log::info!("Report written to: {}", path.display());
    }

    Ok(())
}
