//! Example: Recognize chords in a single feature file
//!
//! Usage:
//!   cargo run --example analyze_file -- [--json] [--config config.json] <request.json>
//!
//! The request file follows `chordline::io::request::AnalysisRequest`.

use chordline::{analyze_request, AnalysisRequest, RecognitionConfig};
use std::env;
use std::fs::File;
use std::io::BufReader;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();
    let mut json = false;
    let mut config_path: Option<String> = None;
    let mut request_path: Option<String> = None;

    while let Some(a) = args.first().cloned() {
        args.remove(0);
        match a.as_str() {
            "--json" => json = true,
            "--config" => {
                let v = args.first().ok_or("--config requires a path")?.clone();
                args.remove(0);
                config_path = Some(v);
            }
            "--help" | "-h" => {
                eprintln!(
                    "Usage: analyze_file [--json] [--config config.json] <request.json>\n\
                     \n\
                     --json     Print the full chord chart as JSON\n\
                     --config   Recognition config overrides (JSON)\n"
                );
                return Ok(());
            }
            _ => request_path = Some(a),
        }
    }

    let request_path = match request_path {
        Some(p) => p,
        None => {
            eprintln!("ERROR: Provide a request file path. Use --help for usage.");
            std::process::exit(2);
        }
    };

    let config: RecognitionConfig = match config_path {
        Some(p) => serde_json::from_reader(BufReader::new(File::open(p)?))?,
        None => RecognitionConfig::default(),
    };

    let request = AnalysisRequest::from_reader(BufReader::new(File::open(&request_path)?))?;
    let chart = analyze_request(request, &config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&chart)?);
        return Ok(());
    }

    println!("Chord chart: {}", chart.title);
    println!("  Duration: {:.1}s (analysed {:.1}s)", chart.duration, chart.metadata.analyzed_seconds);
    println!("  Key (first chord): {}", chart.key);
    if let Some(bpm) = chart.bpm {
        println!("  BPM: {:.1}", bpm);
    }
    if let Some(reason) = chart.recognition.fallback_reason() {
        println!("  Fallback progression used: {}", reason.description());
    }
    for event in chart.events() {
        println!(
            "  [beat {}] {:>4} at {:6.2}s for {:5.2}s (confidence: {:.2})",
            event.beat, event.chord, event.time, event.duration, event.confidence
        );
    }
    println!("  Processing time: {:.2} ms", chart.metadata.processing_time_ms);

    Ok(())
}
