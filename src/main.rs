// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use anyhow::Result;
use drillseq::config::{ShowEvent, ShowFile, ShowWatcher};
use drillseq::{align_with_measures, diff, renumber, Alignment, Page};
use std::env;
use tracing::{info, warn, Level};

fn print_usage() {
    println!("DRILLSEQ - Drill page sequencing and music alignment");
    println!();
    println!("Usage: drillseq [--verbose] <COMMAND> <SHOW FILE>");
    println!();
    println!("Commands:");
    println!("  --renumber <FILE>   Print the patches that fix page names and orders");
    println!("  --align <FILE>      Print each page's duration, timestamp and measures");
    println!("  --watch <FILE>      Re-align every time the show file changes");
    println!("  --help              Show this help message");
    println!();
    println!("Show files may be YAML (.yaml, .yml) or TOML (.toml).");
}

fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.3}", v))
}

fn print_alignment(alignment: &Alignment) {
    println!(
        "{:<6} {:>6} {:>10} {:>10} {:>5}  Measures",
        "Page", "Counts", "Duration", "Timestamp", "Beat"
    );
    for (index, page) in alignment.pages.iter().enumerate() {
        let aligned = alignment.unaligned_from.map_or(true, |first| index < first);
        let measures = page
            .measure_numbers()
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let (duration, timestamp, beat) = if aligned {
            (
                format_optional(page.duration()),
                format_optional(page.timestamp()),
                page.measure_beat_to_start_on()
                    .map_or_else(|| "-".to_string(), |b| b.to_string()),
            )
        } else {
            ("-".to_string(), "-".to_string(), "-".to_string())
        };
        println!(
            "{:<6} {:>6} {:>10} {:>10} {:>5}  {}",
            page.name(),
            page.counts(),
            duration,
            timestamp,
            beat,
            if aligned { measures } else { "(no music left)".to_string() }
        );
    }
    println!();
    println!("Total: {:.3}s", alignment.total_duration());
}

fn align_show(show: &ShowFile) -> Result<()> {
    let measures = show.measures()?;
    let pages: Vec<Page> = show.pages();
    let alignment = align_with_measures(&pages, &measures);

    println!("{} ({} pages, {} measures)", show.show.name, pages.len(), measures.len());
    println!();
    print_alignment(&alignment);

    if let Some(e) = alignment.degenerate_error() {
        eprintln!("Warning: {}", e);
    }
    Ok(())
}

fn renumber_show(show: &ShowFile) -> Result<()> {
    let pages = show.pages();
    let patches = diff(&pages, &renumber(&pages));

    if patches.is_empty() {
        println!("All {} pages are correctly named and ordered.", pages.len());
        return Ok(());
    }

    info!(patches = patches.len(), "Renumbering required");
    println!("{}", serde_yaml::to_string(&patches)?);
    Ok(())
}

fn watch_show(path: &str) -> Result<()> {
    let watcher = ShowWatcher::new(path, None)?;
    println!("Watching {} (press Ctrl+C to stop)...", path);
    align_show(&ShowFile::load(path)?)?;

    while let Some(event) = watcher.recv() {
        match event {
            ShowEvent::Reloaded(show) => {
                println!();
                if let Err(e) = align_show(&show) {
                    warn!(error = %e, "Reloaded show could not be aligned");
                    eprintln!("Error: {:#}", e);
                }
            }
            ShowEvent::Error(message) => eprintln!("Error: {}", message),
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let mut args: Vec<String> = env::args().collect();

    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    args.retain(|a| a != "--verbose" && a != "-v");
    tracing_subscriber::fmt()
        .with_max_level(if verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .init();

    if args.len() < 2 {
        println!("DRILLSEQ - Drill page sequencing and music alignment");
        println!("Run with --help for usage information");
        return Ok(());
    }

    let command = args[1].as_str();
    if command == "--help" || command == "-h" {
        print_usage();
        return Ok(());
    }

    let Some(path) = args.get(2) else {
        eprintln!("Error: {} requires a show file", command);
        print_usage();
        std::process::exit(1);
    };

    match command {
        "--renumber" => renumber_show(&ShowFile::load(path)?)?,
        "--align" => align_show(&ShowFile::load(path)?)?,
        "--watch" => watch_show(path)?,
        _ => {
            eprintln!("Unknown option: {}", command);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}
