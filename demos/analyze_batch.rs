//! Example: Recognize chords in many feature files in parallel
//!
//! Usage:
//!   cargo run --release --example analyze_batch -- [--jobs N] [--json] <file1> <file2> ...
//!
//! Notes:
//! - Parallelism is across files (batch-level). Each file is still analysed single-threaded.
//! - Default workers: (available CPU threads - 1), keeping one core free for the system.

use chordline::{analyze_request, AnalysisRequest, ChordChart, RecognitionConfig};
use rayon::prelude::*;
use std::env;
use std::fs::File;
use std::io::BufReader;
use std::time::Instant;

fn default_jobs() -> usize {
    let n = std::thread::available_parallelism().map(|v| v.get()).unwrap_or(1);
    std::cmp::max(1, n.saturating_sub(1))
}

fn load_and_analyze(path: &str, config: &RecognitionConfig) -> Result<ChordChart, String> {
    let file = File::open(path).map_err(|e| format!("open failed: {e}"))?;
    let request = AnalysisRequest::from_reader(BufReader::new(file))
        .map_err(|e| format!("read failed: {e}"))?;
    analyze_request(request, config).map_err(|e| format!("analysis failed: {e}"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();

    let mut json = false;
    let mut jobs: Option<usize> = None;
    let mut paths: Vec<String> = Vec::new();

    while let Some(a) = args.first().cloned() {
        args.remove(0);
        match a.as_str() {
            "--json" => json = true,
            "--jobs" => {
                let v = args
                    .first()
                    .ok_or("--jobs requires a value")?
                    .parse::<usize>()?;
                args.remove(0);
                jobs = Some(std::cmp::max(1, v));
            }
            "--help" | "-h" => {
                eprintln!(
                    "Usage: analyze_batch [--jobs N] [--json] <file1> <file2> ...\n\
                     \n\
                     --jobs N   Parallel workers (default: CPU-1)\n\
                     --json     Emit one JSON object per line (JSONL)\n"
                );
                return Ok(());
            }
            _ => paths.push(a),
        }
    }

    if paths.is_empty() {
        eprintln!("ERROR: Provide at least one request file path. Use --help for usage.");
        std::process::exit(2);
    }

    let jobs = jobs.unwrap_or_else(default_jobs);
    eprintln!("Batch: {} files, jobs={}", paths.len(), jobs);

    let config = RecognitionConfig::default();

    let t0 = Instant::now();
    let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;

    let outs: Vec<(String, Result<ChordChart, String>)> = pool.install(|| {
        paths
            .par_iter()
            .map(|path| (path.clone(), load_and_analyze(path, &config)))
            .collect()
    });

    for (idx, (path, out)) in outs.iter().enumerate() {
        match (out, json) {
            (Ok(chart), true) => {
                let line = serde_json::json!({ "file": path, "chart": chart });
                println!("{}", line);
            }
            (Err(e), true) => {
                let line = serde_json::json!({ "file": path, "error": e });
                println!("{}", line);
            }
            (Ok(chart), false) => {
                let chords: Vec<&str> = chart.events().iter().map(|e| e.chord.as_str()).collect();
                println!(
                    "[{}/{}] {}: {} chords{} key={} time={:.2}ms  {}",
                    idx + 1,
                    outs.len(),
                    path,
                    chords.len(),
                    if chart.recognition.is_fallback() { " (fallback)" } else { "" },
                    chart.key,
                    chart.metadata.processing_time_ms,
                    chords.join(" ")
                );
            }
            (Err(e), false) => {
                println!("[{}/{}] {}: ERROR: {}", idx + 1, outs.len(), path, e);
            }
        }
    }

    let ok = outs.iter().filter(|(_, o)| o.is_ok()).count();
    let fallbacks = outs
        .iter()
        .filter(|(_, o)| matches!(o, Ok(chart) if chart.recognition.is_fallback()))
        .count();
    eprintln!(
        "Done: ok={}/{} fallback={} wall={:.0}ms",
        ok,
        outs.len(),
        fallbacks,
        t0.elapsed().as_secs_f64() * 1000.0
    );

    Ok(())
}
