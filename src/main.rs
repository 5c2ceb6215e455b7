use std::path::PathBuf;

use clap::{Parser, Subcommand};
use inkscore::{fuse, InkSample, Recognition, ScoringConfig, StrokeTemplate};

#[derive(Parser)]
#[command(name = "inkscore", about = "Score handwritten ink against a character template")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score an ink sample against a template
    Score {
        /// Ink sample JSON ({"strokes": [[{"x":..,"y":..}, ..], ..], "canvas_width": ..})
        #[arg(short, long)]
        ink: PathBuf,

        /// Stroke template JSON
        #[arg(short, long)]
        template: PathBuf,

        /// Arc-length samples per stroke
        #[arg(long, default_value = "24")]
        samples: usize,

        /// Recognizer confidence to fuse (0-1 or 0-100)
        #[arg(long)]
        confidence: Option<f64>,

        /// Text the recognizer read; a mismatch with the template symbol drops the confidence
        #[arg(long)]
        recognized: Option<String>,

        /// Evaluate glyph-diff candidates on one thread
        #[arg(long)]
        sequential: bool,

        /// Print the full result as JSON on stdout
        #[arg(long)]
        json: bool,
    },
    /// Fuse a quality score with a recognizer confidence
    Fuse {
        /// Geometric quality score (0-100)
        #[arg(short, long)]
        quality: i32,

        /// Strokes drawn
        #[arg(short, long)]
        strokes: usize,

        /// Strokes expected by the template
        #[arg(short, long)]
        expected: usize,

        /// Recognizer confidence (0-1 or 0-100)
        #[arg(short, long)]
        confidence: Option<f64>,

        #[arg(long)]
        json: bool,
    },
}

/// `RUST_LOG` wins; otherwise `-v` picks debug and `-vv` trace.
fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "inkscore=debug",
        _ => "inkscore=trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback)),
        )
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Score {
            ink,
            template,
            samples,
            confidence,
            recognized,
            sequential,
            json,
        } => {
            let sample = InkSample::from_json(&std::fs::read_to_string(&ink)?)?;
            let template = StrokeTemplate::from_json(&std::fs::read_to_string(&template)?)?;
            let config = ScoringConfig {
                sample_count: samples,
                parallel_glyph_search: !sequential,
                ..ScoringConfig::default()
            };

            eprintln!();
            eprintln!("  inkscore \u{00b7} {} ({})", template.symbol, template.id);
            eprintln!();

            let result = if confidence.is_some() || recognized.is_some() {
                let recognition = Recognition { text: recognized, confidence };
                inkscore::assess(&sample, &template, &recognition, &config)
            } else {
                inkscore::score_with(&sample, &template, &config)
            };

            if let Some(b) = &result.breakdown {
                eprintln!(
                    "  Strokes     {} drawn \u{00b7} {} expected \u{00b7} {} matched",
                    b.ink_strokes, b.template_strokes, b.matches.len(),
                );
                eprintln!(
                    "  Shape       geometry {:.1} \u{00b7} straightness {:.1} \u{00b7} glyph {:.1}",
                    b.geometry, b.straightness, b.glyph_diff,
                );
                eprintln!(
                    "  Structure   count {:.1} \u{00b7} order {:.1} \u{00b7} flow {:.1} \u{00b7} coverage {:.1}",
                    b.count, b.order, b.flow, b.coverage,
                );
                eprintln!(
                    "  Scribble    trace {:.1} \u{00b7} crossings {:.1} \u{00b7} cap {:.0}",
                    b.trace, b.intersection, b.cap,
                );
            }
            if let Some(f) = &result.fusion {
                eprintln!(
                    "  Fusion      confidence {:.1}% (used {}) \u{00b7} quality {:.1} \u{00b7} cap {:.0}",
                    f.confidence_percent, f.used_confidence, f.adjusted_quality, f.cap,
                );
            }
            eprintln!("  Score       {}  {}", result.score, result.feedback);
            eprintln!();

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
        }
        Command::Fuse {
            quality,
            strokes,
            expected,
            confidence,
            json,
        } => {
            let result = fuse(confidence, quality, strokes, expected);
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                eprintln!(
                    "  Fusion      confidence {:.1}% (used {}) \u{00b7} quality {:.1} \u{00b7} penalty {:.2} \u{00b7} cap {:.0}",
                    result.confidence_percent, result.used_confidence, result.adjusted_quality,
                    result.penalty, result.cap,
                );
                println!("{}", result.score);
            }
        }
    }

    Ok(())
}
