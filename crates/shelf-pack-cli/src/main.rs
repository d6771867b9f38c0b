use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use serde::Deserialize;
use shelf_pack_core::config::{DEFAULT_STRIP_WIDTH, ShelfPolicy, SortOrder};
use shelf_pack_core::{
    ItemList, PackReport, ShelfConfig, ShelfPackError, compare_strategies, pack_with, read_items,
};
use tracing::{error, info, warn};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(
    name = "shelf-pack",
    about = "Pack rectangles onto fixed-width shelves and report the total height",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Show progress bars for directory inputs (disable with --progress false or --quiet)
    #[arg(long, default_value_t = true, action=ArgAction::Set, global=true, help_heading = "Logging/UX")]
    progress: bool,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging/UX"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pack item lists with one strategy and print the shelf report
    Pack(PackArgs),
    /// Run Next-Fit and First-Fit on the same input and compare total heights
    Compare(PackArgs),
    /// Simple timing bench (packs repeatedly with each strategy, prints time + coverage)
    Bench(BenchArgs),
}

#[derive(Parser, Debug, Clone)]
struct PackArgs {
    // Input/Output
    /// Item list file, or a directory of `.txt` item lists
    #[arg(help_heading = "Input/Output")]
    input: PathBuf,
    /// Write output here instead of stdout
    #[arg(short, long, help_heading = "Input/Output")]
    out: Option<PathBuf>,
    /// YAML config file path (overrides packing options)
    #[arg(long, help_heading = "Input/Output")]
    config: Option<PathBuf>,

    // Packing
    /// Strategy: next-fit | first-fit
    #[arg(long, default_value = "first-fit", help_heading = "Packing")]
    strategy: String,
    /// Strip width (defaults to the list's "Given width", then 100)
    #[arg(long, help_heading = "Packing")]
    width: Option<u32>,
    /// Maximum number of shelves
    #[arg(long, default_value_t = 10, help_heading = "Packing")]
    max_shelves: usize,
    /// Maximum number of items per list
    #[arg(long, default_value_t = 100, help_heading = "Packing")]
    max_items: usize,
    /// Sort order: height_desc|area_desc|width_desc|none
    #[arg(long, default_value = "height_desc", help_heading = "Packing")]
    sort_order: String,
    /// Print the partial report instead of failing when shelves run out
    #[arg(long, default_value_t = false, help_heading = "Packing")]
    allow_overflow: bool,
    /// Run compared strategies in parallel (requires core feature `parallel`)
    #[arg(long, default_value_t = false, help_heading = "Packing")]
    parallel: bool,

    // Export
    /// Output format: text | json | json-hash
    #[arg(long, default_value = "text", value_parser = ["text", "json", "json-hash"], help_heading = "Export")]
    format: String,
    /// Export packing stats (JSON) to this file
    #[arg(long, help_heading = "Export")]
    export_stats: Option<PathBuf>,
    /// Print the merged configuration (after CLI/YAML) and exit
    #[arg(long, default_value_t = false, help_heading = "Export")]
    print_config: bool,
    /// Output format for --print-config: json|yaml
    #[arg(long, default_value = "json", value_parser = ["json", "yaml"], help_heading = "Export")]
    print_config_format: String,
}

#[derive(Parser, Debug, Clone)]
struct BenchArgs {
    /// Item list file, or a directory of `.txt` item lists
    input: PathBuf,
    /// Strip width (defaults to the list's "Given width", then 100)
    #[arg(long)]
    width: Option<u32>,
    /// Repetitions per strategy
    #[arg(long, default_value_t = 100)]
    iterations: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    let show_progress = cli.progress && !cli.quiet;
    match &cli.command {
        Commands::Pack(args) => run_pack(args, show_progress),
        Commands::Compare(args) => run_compare(args, show_progress),
        Commands::Bench(b) => run_bench(b, show_progress),
    }
}

fn run_pack(cli: &PackArgs, show_progress: bool) -> anyhow::Result<()> {
    if cli.print_config {
        let cfg = build_config(cli, None)?;
        print_config(&cfg, &cli.print_config_format)?;
        return Ok(());
    }

    let lists = load_lists(&cli.input, show_progress)?;
    info!(count = lists.len(), "loaded item lists");
    let multi = lists.len() > 1;
    let mut output = String::new();
    let mut stats = Vec::new();

    for (path, list) in &lists {
        let cfg = build_config(cli, list.given_width)?;
        let report = match pack_with(&list.items, &cfg, cfg.strategy) {
            Ok(r) => r,
            Err(ShelfPackError::CapacityExceeded {
                placed,
                total,
                partial,
                ..
            }) if cli.allow_overflow => {
                warn!(?path, placed, total, "shelves exhausted; reporting partial result");
                *partial
            }
            Err(e) => return Err(e).with_context(|| format!("pack {}", path.display())),
        };
        info!(
            ?path,
            policy = %report.policy,
            shelves = report.shelves.len(),
            total_height = report.total_height,
            "packed"
        );
        if multi {
            output.push_str(&format!("== {}\n", path.display()));
        }
        output.push_str(&render(&report, &cli.format)?);
        stats.push(serde_json::json!({
            "input": path.to_string_lossy(),
            "policy": report.policy.as_str(),
            "stats": report.stats(),
        }));
    }

    write_output(cli.out.as_deref(), &output)?;
    if let Some(stats_path) = &cli.export_stats {
        fs::write(stats_path, serde_json::to_string_pretty(&stats)?)
            .with_context(|| format!("write {}", stats_path.display()))?;
        info!(?stats_path, "stats written");
    }
    Ok(())
}

fn run_compare(cli: &PackArgs, show_progress: bool) -> anyhow::Result<()> {
    let lists = load_lists(&cli.input, show_progress)?;
    let mut output = String::new();
    let mut json_rows = Vec::new();

    for (path, list) in &lists {
        let cfg = build_config(cli, list.given_width)?;
        let cmp = compare_strategies(&list.items, &cfg)
            .with_context(|| format!("compare {}", path.display()))?;
        output.push_str(&format!("== {} (width {})\n", path.display(), cfg.strip_width));
        for policy in ShelfPolicy::ALL {
            match cmp.get(policy) {
                Ok(r) => {
                    let s = r.stats();
                    output.push_str(&format!(
                        "{:<10} shelves={:<4} total_height={:<6} coverage={:.2}%\n",
                        policy.as_str(),
                        s.num_shelves,
                        s.total_height,
                        s.coverage * 100.0
                    ));
                    json_rows.push(serde_json::json!({
                        "input": path.to_string_lossy(),
                        "policy": policy.as_str(),
                        "stats": s,
                    }));
                }
                Err(e) => {
                    output.push_str(&format!("{:<10} failed: {}\n", policy.as_str(), e));
                    json_rows.push(serde_json::json!({
                        "input": path.to_string_lossy(),
                        "policy": policy.as_str(),
                        "error": e.to_string(),
                    }));
                }
            }
        }
        if let Some(best) = cmp.best() {
            output.push_str(&format!("best: {}\n", best.policy));
        }
    }

    if cli.format == "text" {
        write_output(cli.out.as_deref(), &output)?;
    } else {
        write_output(cli.out.as_deref(), &serde_json::to_string_pretty(&json_rows)?)?;
    }
    if let Some(stats_path) = &cli.export_stats {
        fs::write(stats_path, serde_json::to_string_pretty(&json_rows)?)
            .with_context(|| format!("write {}", stats_path.display()))?;
    }
    Ok(())
}

fn run_bench(b: &BenchArgs, show_progress: bool) -> anyhow::Result<()> {
    let lists = load_lists(&b.input, show_progress)?;
    let iterations = b.iterations.max(1);
    for (path, list) in &lists {
        // Bench measures the allocators, not the limits.
        let cfg = ShelfConfig::builder()
            .strip_width(b.width.or(list.given_width).unwrap_or(DEFAULT_STRIP_WIDTH))
            .max_items(list.items.len().max(1))
            .max_shelves(list.items.len().max(1))
            .build();
        for policy in ShelfPolicy::ALL {
            let start = Instant::now();
            let mut last = None;
            for _ in 0..iterations {
                last = Some(pack_with(&list.items, &cfg, policy)?);
            }
            let per_run = start.elapsed() / iterations;
            if let Some(r) = last {
                let s = r.stats();
                println!(
                    "{} policy={} items={} total_height={} coverage={:.2}% time={}",
                    path.display(),
                    policy,
                    s.num_items,
                    s.total_height,
                    s.coverage * 100.0,
                    fmt_dur(per_run)
                );
            }
        }
    }
    Ok(())
}

fn render(report: &PackReport, format: &str) -> anyhow::Result<String> {
    match format {
        "text" => Ok(report.to_string()),
        "json" => Ok(serde_json::to_string_pretty(&shelf_pack_core::to_json(report))? + "\n"),
        "json-hash" => {
            Ok(serde_json::to_string_pretty(&shelf_pack_core::to_json_hash(report))? + "\n")
        }
        other => anyhow::bail!("unknown output format: {}", other),
    }
}

fn write_output(out: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("write {}", path.display()))?;
            info!(?path, "report written");
        }
        None => print!("{}", text),
    }
    Ok(())
}

fn print_config(cfg: &ShelfConfig, format: &str) -> anyhow::Result<()> {
    match format {
        "yaml" => println!("{}", serde_yaml::to_string(cfg)?),
        _ => println!("{}", serde_json::to_string_pretty(cfg)?),
    }
    Ok(())
}

/// CLI flags first, then the list's declared width when `--width` is absent,
/// then the YAML file on top.
fn build_config(cli: &PackArgs, given_width: Option<u32>) -> anyhow::Result<ShelfConfig> {
    let base = ShelfConfig {
        strip_width: cli.width.or(given_width).unwrap_or(DEFAULT_STRIP_WIDTH),
        max_shelves: cli.max_shelves,
        max_items: cli.max_items,
        strategy: parse_policy(&cli.strategy)?,
        sort_order: parse_sort_order(&cli.sort_order)?,
        parallel: cli.parallel,
    };
    let cfg = if let Some(path) = &cli.config {
        let file =
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let y: YamlConfig = serde_yaml::from_str(&file)?;
        y.into_shelf_config(base)?
    } else {
        base
    };
    cfg.validate()?;
    Ok(cfg)
}

fn gather_paths(path: &Path) -> Vec<PathBuf> {
    if path.is_file() {
        return vec![path.to_path_buf()];
    }
    let mut list: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_item_list(p))
        .collect();
    list.sort();
    list
}

fn is_item_list(p: &Path) -> bool {
    p.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("txt"))
}

fn load_lists(input: &Path, progress: bool) -> anyhow::Result<Vec<(PathBuf, ItemList)>> {
    if input.is_file() {
        let list = read_items(input).with_context(|| format!("read {}", input.display()))?;
        return Ok(vec![(input.to_path_buf(), list)]);
    }
    let paths = gather_paths(input);
    if paths.is_empty() {
        anyhow::bail!("no item lists found under {}", input.display());
    }
    load_lists_with_progress(&paths, progress)
}

fn load_lists_with_progress(
    paths: &[PathBuf],
    progress: bool,
) -> anyhow::Result<Vec<(PathBuf, ItemList)>> {
    use indicatif::{ProgressBar, ProgressStyle};
    let bar = if progress {
        let b = ProgressBar::new(paths.len() as u64);
        b.set_style(ProgressStyle::with_template(
            "{spinner:.green} loading {pos}/{len} [{elapsed_precise}] {wide_msg}",
        )?);
        Some(b)
    } else {
        None
    };
    let mut list = Vec::with_capacity(paths.len());
    let mut failed: Vec<(PathBuf, ShelfPackError)> = Vec::new();
    for p in paths {
        let msg = p.file_name().and_then(|s| s.to_str()).unwrap_or("");
        if let Some(b) = &bar {
            b.set_message(msg.to_string());
        }
        match read_items(p) {
            Ok(items) => list.push((p.clone(), items)),
            Err(e) => {
                error!(?p, error = %e, "invalid item list");
                failed.push((p.clone(), e));
            }
        }
        if let Some(b) = &bar {
            b.inc(1);
        }
    }
    if let Some(b) = &bar {
        b.finish_and_clear();
    }
    // An invalid list fails the whole batch; nothing is packed.
    if let Some((path, err)) = failed.into_iter().next() {
        return Err(err).with_context(|| {
            format!(
                "read {} ({} of {} item lists invalid)",
                path.display(),
                paths.len() - list.len(),
                paths.len()
            )
        });
    }
    Ok(list)
}

fn fmt_dur(d: Duration) -> String {
    let us = d.as_micros();
    if us >= 1_000_000 {
        format!("{:.3}s", d.as_secs_f64())
    } else if us >= 1_000 {
        format!("{:.3}ms", us as f64 / 1_000.0)
    } else {
        format!("{}us", us)
    }
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct YamlConfig {
    strategy: Option<String>,
    strip_width: Option<u32>,
    max_shelves: Option<usize>,
    max_items: Option<usize>,
    sort_order: Option<String>,
    parallel: Option<bool>,
}

impl YamlConfig {
    fn into_shelf_config(self, mut cfg: ShelfConfig) -> anyhow::Result<ShelfConfig> {
        if let Some(s) = self.strategy {
            cfg.strategy = parse_policy(&s)?;
        }
        if let Some(v) = self.strip_width {
            cfg.strip_width = v;
        }
        if let Some(v) = self.max_shelves {
            cfg.max_shelves = v;
        }
        if let Some(v) = self.max_items {
            cfg.max_items = v;
        }
        if let Some(s) = self.sort_order {
            cfg.sort_order = parse_sort_order(&s)?;
        }
        if let Some(v) = self.parallel {
            cfg.parallel = v;
        }
        Ok(cfg)
    }
}

fn parse_policy(s: &str) -> anyhow::Result<ShelfPolicy> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("unknown strategy: {} (expected next-fit|first-fit)", s))
}

fn parse_sort_order(s: &str) -> anyhow::Result<SortOrder> {
    s.parse().map_err(|_| {
        anyhow::anyhow!(
            "unknown sort order: {} (expected height_desc|area_desc|width_desc|none)",
            s
        )
    })
}
