use std::env;
use std::fs;
use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use reclens_core::{
    AnalysisResult, Category, FetchOutcome, PromptVariant, aggregate_runs, analyze,
    analyze_cold_summary, classify_readiness, compare_breakdowns, dominant_fix_for,
};

const APP_NAME: &str = "reclens";
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Placeholder origin when the caller gives no --url for a saved snapshot.
const DEFAULT_URL: &str = "https://example.com/";

#[derive(Clone, Copy, PartialEq)]
enum InputKind {
    Snapshot,
    ColdSummary,
}

struct CliOptions {
    paths: Vec<PathBuf>,
    url: String,
    kind: InputKind,
    url_only: bool,
    compare_with: Option<PathBuf>,
    json: bool,
}

enum CliCommand {
    Run(CliOptions),
    Help,
    Version,
}

fn parse_arguments(args: &[String]) -> Result<CliCommand> {
    if args.is_empty() {
        return Ok(CliCommand::Help);
    }

    let mut paths: Vec<PathBuf> = Vec::new();
    let mut url: Option<String> = None;
    let mut kind = InputKind::Snapshot;
    let mut url_only = false;
    let mut compare_with: Option<PathBuf> = None;
    let mut json = false;
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        if matches!(arg.as_str(), "-h" | "--help") {
            return Ok(CliCommand::Help);
        }

        if matches!(arg.as_str(), "-v" | "--version") {
            return Ok(CliCommand::Version);
        }

        if matches!(arg.as_str(), "-c" | "--cold") {
            kind = InputKind::ColdSummary;
            i += 1;
            continue;
        }

        if arg == "--url-only" {
            url_only = true;
            i += 1;
            continue;
        }

        if matches!(arg.as_str(), "-j" | "--json") {
            json = true;
            i += 1;
            continue;
        }

        if let Some(value) = arg.strip_prefix("--url=") {
            if url.is_some() {
                return Err(anyhow!("--url specified multiple times"));
            }
            url = Some(value.to_string());
            i += 1;
            continue;
        }

        if arg == "--url" {
            if url.is_some() {
                return Err(anyhow!("--url specified multiple times"));
            }
            let value = args.get(i + 1).ok_or_else(|| anyhow!("--url requires a value"))?;
            url = Some(value.clone());
            i += 2;
            continue;
        }

        if let Some(value) = arg.strip_prefix("--compare=") {
            if compare_with.is_some() {
                return Err(anyhow!("--compare specified multiple times"));
            }
            compare_with = Some(PathBuf::from(value));
            i += 1;
            continue;
        }

        if arg == "--compare" {
            if compare_with.is_some() {
                return Err(anyhow!("--compare specified multiple times"));
            }
            let value = args.get(i + 1).ok_or_else(|| anyhow!("--compare requires a path"))?;
            compare_with = Some(PathBuf::from(value));
            i += 2;
            continue;
        }

        if arg.starts_with('-') && arg != "-" {
            return Err(anyhow!("unknown flag: {arg}"));
        }

        paths.push(PathBuf::from(arg));
        i += 1;
    }

    if paths.is_empty() {
        return Err(anyhow!("no input file given (use - for stdin)"));
    }
    if kind == InputKind::Snapshot && paths.len() > 1 {
        return Err(anyhow!("snapshot mode takes exactly one input file"));
    }
    if url_only && kind != InputKind::ColdSummary {
        return Err(anyhow!("--url-only only applies to --cold transcripts"));
    }
    if compare_with.is_some() && kind != InputKind::Snapshot {
        return Err(anyhow!("--compare only applies to snapshot inputs"));
    }

    Ok(CliCommand::Run(CliOptions {
        paths,
        url: url.unwrap_or_else(|| DEFAULT_URL.to_string()),
        kind,
        url_only,
        compare_with,
        json,
    }))
}

fn print_help() {
    println!("{APP_NAME} - score how ready a page is to be recommended by AI assistants");
    println!();
    println!("Usage: {APP_NAME} [OPTIONS] <PATH | ->");
    println!();
    println!("Options:");
    println!("  --url <URL>        Source URL of the snapshot (for domain/brand signals)");
    println!("  -c, --cold         Treat input as a cold-summary transcript;");
    println!("                     several transcripts aggregate into one verdict");
    println!("      --url-only     The cold transcript came from a URL-only prompt");
    println!("      --compare <P>  Diff the snapshot against a second snapshot file");
    println!("  -j, --json         Emit the full result as JSON");
    println!("  -v, --version      Show version information");
    println!("  -h, --help         Show this help message");
}

fn read_input(path: &PathBuf) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        return Ok(buffer);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    match parse_arguments(&args)? {
        CliCommand::Help => {
            print_help();
            Ok(())
        }
        CliCommand::Version => {
            println!("{APP_NAME} {VERSION}");
            Ok(())
        }
        CliCommand::Run(options) => run(options),
    }
}

fn run(options: CliOptions) -> Result<()> {
    match options.kind {
        InputKind::ColdSummary => run_cold(&options),
        InputKind::Snapshot => {
            let html = read_input(&options.paths[0])?;
            let result = analyze(&html, &options.url, &FetchOutcome::Fetched, vec![]);

            if let Some(other) = &options.compare_with {
                let other_html = read_input(other)?;
                let other_result = analyze(&other_html, &options.url, &FetchOutcome::Fetched, vec![]);
                return print_compare(&result, &other_result, options.json);
            }

            print_snapshot(&result, options.json)
        }
    }
}

fn run_cold(options: &CliOptions) -> Result<()> {
    let variant = if options.url_only { PromptVariant::UrlOnly } else { PromptVariant::BrandAndUrl };

    let runs: Vec<_> = options
        .paths
        .iter()
        .map(|path| read_input(path).map(|text| analyze_cold_summary(&text, variant)))
        .collect::<Result<_>>()?;

    if runs.len() == 1 {
        if options.json {
            println!("{}", serde_json::to_string_pretty(&runs[0])?);
        } else {
            let run = &runs[0];
            println!("Failure mode : {:?}", run.failure_mode);
            println!("Clarity      : {}/5 ({:?})", run.clarity_score, run.verdict_label);
            println!("Unknown fields: {}/5", run.unknown_count);
            if run.has_hedging {
                println!("Hedging      : {}", run.signals.hedging_matches.join(", "));
            }
        }
        return Ok(());
    }

    let aggregate = aggregate_runs(&runs)?;
    if options.json {
        println!("{}", serde_json::to_string_pretty(&aggregate)?);
    } else {
        println!("Runs         : {}", runs.len());
        println!("Consistency  : {:?}", aggregate.consistency);
        println!("Clarity avg  : {}", aggregate.clarity_avg);
        println!("Refusals     : {}", aggregate.refusals_count);
        println!("{}", aggregate.note);
        println!(
            "Representative run: #{} (clarity {}/5)",
            aggregate.representative + 1,
            runs[aggregate.representative].clarity_score
        );
    }
    Ok(())
}

fn print_snapshot(result: &AnalysisResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    let verdict = classify_readiness(result);

    if result.score < 0 {
        println!("Score    : unavailable");
        if let Some(item) = result.breakdown.first() {
            println!("Reason   : {}", item.reason);
        }
    } else {
        println!("Score    : {}/100", result.score);
        println!();
        for category in Category::SCORED {
            let (points, max) = result
                .breakdown
                .iter()
                .filter(|i| i.category == category)
                .fold((0u32, 0u32), |(p, m), i| (p + i.points, m + i.max));
            println!("  {:<26} {:>3}/{}", category.label(), points, max);
        }
    }

    println!();
    println!("Readiness: {}", verdict.state.label());
    println!("  {}", verdict.explanation);

    if let Some(fix) = dominant_fix_for(result) {
        println!();
        println!("Top fix  : {}", fix.action);
    }
    Ok(())
}

fn print_compare(a: &AnalysisResult, b: &AnalysisResult, json: bool) -> Result<()> {
    let diff = compare_breakdowns(&a.breakdown, &b.breakdown);

    if json {
        println!("{}", serde_json::to_string_pretty(&diff)?);
        return Ok(());
    }

    println!("Score delta (B - A): {:+}", diff.score_delta);
    println!();
    println!("Biggest gaps:");
    for gap in &diff.biggest_gaps {
        println!(
            "  {:+3}  {} ({}): {} vs {} of {}",
            gap.delta,
            gap.label,
            gap.category.label(),
            gap.a_points,
            gap.b_points,
            gap.max
        );
    }
    if !diff.quick_wins.is_empty() {
        println!();
        println!("Quick wins:");
        for win in &diff.quick_wins {
            if let Some(action) = &win.suggested_action {
                println!("  [{:+}] {}", win.delta, action);
            }
        }
    }
    Ok(())
}
