mod common;
mod logic;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use common::{OutputTarget, split_csv};
use logic::{CampaignReport, GameplayStrategy, run_campaigns};

#[derive(Debug, Parser)]
#[command(name = "guild-tester", version = "0.1.0")]
#[command(about = "Automated QA campaigns for the guild simulation engine")]
struct Args {
    /// Strategies to run (comma-separated, or `all`)
    #[arg(long, default_value = "all")]
    strategies: String,

    /// List all available strategies and exit
    #[arg(long)]
    list_strategies: bool,

    /// Seeds to run (comma-separated)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Day cap for each campaign
    #[arg(long, default_value_t = 30)]
    max_days: u32,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["console", "json", "markdown"])]
    report: String,

    /// Keep every phase log line in the report
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_strategies(&args)? {
        return Ok(());
    }

    let strategies = expand_strategies(&args.strategies)?;
    let seeds = parse_seeds(&args.seeds)?;

    if !(args.report == "json" && args.output.is_none()) {
        announce_banner();
    }

    let start_time = Instant::now();
    let reports = run_campaigns(&strategies, &seeds, args.max_days, args.verbose);
    write_reports(&args, &reports, start_time)?;

    if reports.iter().any(|r| !r.passed()) {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_strategies(args: &Args) -> Result<bool> {
    if !args.list_strategies {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target, "Available strategies:")?;
    for strategy in GameplayStrategy::ALL {
        writeln!(
            output_target,
            "  {:15} - {}",
            strategy.key(),
            strategy.description()
        )?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🏰 Guild Automated Tester".bright_cyan().bold());
    println!("{}", "=========================".cyan());
}

fn expand_strategies(arg: &str) -> Result<Vec<GameplayStrategy>> {
    let tokens = split_csv(arg);
    if tokens.is_empty() || tokens.iter().any(|t| t.eq_ignore_ascii_case("all")) {
        return Ok(GameplayStrategy::ALL.to_vec());
    }
    let mut strategies = Vec::with_capacity(tokens.len());
    for token in &tokens {
        let strategy: GameplayStrategy = token
            .parse()
            .with_context(|| format!("invalid --strategies entry `{token}`"))?;
        if !strategies.contains(&strategy) {
            strategies.push(strategy);
        }
    }
    Ok(strategies)
}

fn parse_seeds(arg: &str) -> Result<Vec<u64>> {
    split_csv(arg)
        .iter()
        .map(|token| {
            token
                .parse::<u64>()
                .with_context(|| format!("invalid seed `{token}`"))
        })
        .collect()
}

fn write_reports(args: &Args, reports: &[CampaignReport], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => logic::reports::generate_json_report(&mut output_target, reports)?,
        "markdown" => {
            if reports.is_empty() {
                writeln!(
                    output_target,
                    "# Guild Campaign Results\n\n_No campaigns executed._"
                )?;
            } else {
                logic::reports::generate_markdown_report(&mut output_target, reports)?;
            }
        }
        _ => {
            let duration = start_time.elapsed();
            if reports.is_empty() {
                writeln!(output_target, "No campaigns executed.")?;
            } else {
                logic::reports::generate_console_report(&mut output_target, reports, duration)?;
            }
            writeln!(output_target)?;
            writeln!(output_target, "🏁 Total time: {duration:?}")?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}
