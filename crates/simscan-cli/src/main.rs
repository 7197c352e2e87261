mod commands;
mod logging;
mod progress;

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{CommandFactory, Parser};
use colored::*;
use commands::{Cli, Commands};
use dotenv::dotenv;
use progress::CliReporter;
use simscan_core::{
    AnalyzerConfig, CancelToken, ComparisonResult, DocumentStore, MasterKey, Method, Report,
    ReportEngine, Status,
};
use tracing::{error, info};
use walkdir::WalkDir;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let _guard = logging::init_logger();

    let config = match simscan_core::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    let args = Cli::parse();

    match args.command {
        Some(Commands::Add { paths }) => {
            if let Err(err) = run_add(&config, &paths) {
                error!("Error: {}", err);
            }
        }
        Some(Commands::List) => {
            if let Err(err) = run_list(&config) {
                error!("Error: {}", err);
            }
        }
        Some(Commands::Report { method, output }) => {
            if let Err(err) = run_report(&config, &method, output) {
                error!("Error: {}", err);
            }
        }
        Some(Commands::Export { id }) => {
            if let Err(err) = run_export(&config, id) {
                error!("Error: {}", err);
            }
        }
        Some(Commands::Cleanup) => {
            if let Err(err) = run_cleanup(&config) {
                error!("Error: {}", err);
            }
        }
        Some(Commands::Purge) => match prompt_confirm(
            "Are you SURE you want to DELETE every stored document?",
            Some(false),
        ) {
            Ok(true) => {
                if let Err(err) = run_purge(&config) {
                    error!("Error: {}", err);
                }
            }
            _ => {
                process::exit(0);
            }
        },
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", config);
        }
        None => {
            let _ = Cli::command().print_long_help();
        }
    }

    Ok(())
}

fn load_key() -> Result<MasterKey, Box<dyn std::error::Error>> {
    let hex_key = env::var("SIMSCAN_KEY")
        .map_err(|_| "SIMSCAN_KEY is not set (expected 64 hex characters)")?;
    Ok(MasterKey::from_hex(&hex_key)?)
}

fn open_store(config: &simscan_core::AppConfig) -> Result<DocumentStore, simscan_core::Error> {
    DocumentStore::open(&config.db_path, &config.scratch_dir)
}

/// Collect .txt files from the given paths, recursing into directories.
fn collect_txt_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
                let p = entry.path();
                if p.is_file() && p.extension().map_or(false, |ext| ext == "txt") {
                    files.push(p.to_path_buf());
                }
            }
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            error!("Path not found: {}", path.display());
        }
    }
    files
}

fn run_add(
    config: &simscan_core::AppConfig,
    paths: &[PathBuf],
) -> Result<(), Box<dyn std::error::Error>> {
    if paths.is_empty() {
        return Err("no paths given".into());
    }

    let key = load_key()?;
    let store = open_store(config)?;
    let files = collect_txt_files(paths);

    if files.is_empty() {
        return Err("no .txt files found under the given paths".into());
    }

    let mut stored = 0usize;
    for file in &files {
        let filename = file
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.display().to_string());
        match fs::read_to_string(file) {
            Ok(content) => {
                let document = store.encrypt_and_store(&key, &content, &filename)?;
                println!(
                    "  {} {} -> document {} ({} ciphertext bytes)",
                    "✓".green(),
                    filename,
                    document.id,
                    document.ciphertext.len()
                );
                stored += 1;
            }
            Err(err) => {
                error!("Failed to read {}: {}", file.display(), err);
            }
        }
    }

    info!("Encrypted and stored {} of {} files", stored, files.len());
    Ok(())
}

fn run_list(config: &simscan_core::AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(config)?;
    let documents = store.list()?;

    if documents.is_empty() {
        println!("No documents stored.");
        return Ok(());
    }

    println!("{:<6} {:<30} {:>12}  {}", "ID", "Filename", "Bytes", "Created");
    println!("{}", "-".repeat(76));
    for doc in &documents {
        println!(
            "{:<6} {:<30} {:>12}  {}",
            doc.id, doc.original_filename, doc.ciphertext_len, doc.created_at
        );
    }
    println!("{} documents total", documents.len());
    Ok(())
}

fn run_report(
    config: &simscan_core::AppConfig,
    method: &str,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let method: Method = method.parse()?;
    let key = load_key()?;
    let store = open_store(config)?;
    let analyzers = AnalyzerConfig::new(config.min_run_words, config.min_substring_chars)?;

    let engine = ReportEngine::new(&store, &key, analyzers);
    let reporter = CliReporter::new();
    let cancel = CancelToken::new();
    let run = engine.generate_report(method, &reporter, &cancel)?;

    println!();
    display_report(&run.report);

    for failure in &run.decrypt_failures {
        println!(
            "  {} excluded '{}': {}",
            "✗".red(),
            failure.original_filename,
            failure.reason
        );
    }

    let report_path = match output {
        Some(path) => path,
        None => {
            fs::create_dir_all(&config.reports_dir)?;
            let stamp = file_stamp(&run.report.timestamp);
            Path::new(&config.reports_dir).join(format!("report_{}_{}.json", stamp, method))
        }
    };
    fs::write(&report_path, serde_json::to_string_pretty(&run.report)?)?;
    info!("Report saved to {}", report_path.display());

    info!(
        "Snapshot: {}, Compare: {}",
        format!("{:.2}s", run.snapshot_duration.as_secs_f64()).green(),
        format!("{:.2}s", run.compare_duration.as_secs_f64()).green(),
    );

    Ok(())
}

/// Filesystem-safe timestamp derived from the report's RFC3339 timestamp:
/// digits only, date and time separated by an underscore.
fn file_stamp(rfc3339: &str) -> String {
    let mut stamp = String::with_capacity(15);
    for c in rfc3339.chars() {
        match c {
            '0'..='9' => stamp.push(c),
            'T' => stamp.push('_'),
            '.' | '+' | 'Z' => break,
            _ => {}
        }
    }
    stamp
}

fn colored_status(status: Status) -> ColoredString {
    match status {
        Status::High => status.as_str().red().bold(),
        Status::Medium => status.as_str().yellow(),
        Status::Low => status.as_str().cyan(),
        Status::Minimal => status.as_str().green(),
    }
}

fn display_report(report: &Report) {
    println!("{}", "=".repeat(80));
    println!("SIMILARITY REPORT ({})", report.method);
    println!("{}", "=".repeat(80));

    // Sorted by similarity descending for display; the stored report keeps
    // pair-enumeration order.
    let mut rows: Vec<&ComparisonResult> = report.comparisons.iter().collect();
    rows.sort_by(|a, b| b.similarity_percent.cmp(&a.similarity_percent));

    println!(
        "{:<22} {:<22} {:<12} {:<10} {}",
        "File 1", "File 2", "Similarity", "Segments", "Status"
    );
    println!("{}", "-".repeat(80));
    for row in rows {
        println!(
            "{:<22} {:<22} {:<12} {:<10} {}",
            truncate(&row.file1, 20),
            truncate(&row.file2, 20),
            format!("{}%", row.similarity_percent),
            row.common_segment_count,
            colored_status(row.status)
        );
    }
    println!("{}", "-".repeat(80));

    let summary = &report.summary;
    println!("Files compared:      {}", summary.total_files);
    println!("Total comparisons:   {}", summary.total_comparisons);
    println!("Average similarity:  {:.2}%", summary.average_similarity);
    println!("Highest similarity:  {}%", summary.highest_similarity);
    println!("Suspicious (>=50%):  {}", summary.suspicious_pairs);
    println!("High risk (>=80%):   {}", summary.high_risk_pairs);
}

fn truncate(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        name.to_string()
    } else {
        let head: String = name.chars().take(max - 2).collect();
        format!("{}..", head)
    }
}

fn run_export(config: &simscan_core::AppConfig, id: i64) -> Result<(), Box<dyn std::error::Error>> {
    let key = load_key()?;
    let store = open_store(config)?;
    let path = store.export_plaintext(&key, id)?;
    println!(
        "  {} Document {} exported to {} (transient: run `cleanup` when done)",
        "✓".green(),
        id,
        path.display()
    );
    Ok(())
}

fn run_cleanup(config: &simscan_core::AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(config)?;
    let outcome = store.cleanup()?;
    println!(
        "  {} Removed {} plaintext artifacts",
        "✓".green(),
        outcome.removed
    );
    for (path, reason) in &outcome.failed {
        println!("  {} Failed to remove {}: {}", "✗".red(), path.display(), reason);
    }
    Ok(())
}

fn run_purge(config: &simscan_core::AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(config)?;
    let count = store.purge()?;
    println!("Deleted {} documents", count);
    Ok(())
}

fn prompt_confirm(prompt: &str, default: Option<bool>) -> io::Result<bool> {
    let mut input = String::new();

    loop {
        input.clear();

        match default {
            Some(true) => print!("{} (Y/n): ", prompt),
            Some(false) | None => print!("{} (y/N): ", prompt),
        }
        io::stdout().flush()?;

        io::stdin().read_line(&mut input)?;

        match input.trim().to_uppercase().as_str() {
            "Y" => return Ok(true),
            "N" => return Ok(false),
            "" => match default {
                Some(default) => return Ok(default),
                None => continue,
            },
            _ => continue,
        }
    }
}
