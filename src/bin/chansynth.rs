//! CLI binary for channel-synth.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `SynthConfig` and prints results.

use anyhow::{Context, Result};
use channel_synth::{
    output_path, synthesize, synthesize_batch, synthesize_to_file, GuideOutput, SourceProfile,
    SynthConfig,
};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Synthesise one guide, listing written next to it
  chansynth voo_fr.pdf

  # Whole directory of guides, outputs collected in one place
  chansynth guides/*.pdf --output-dir listings/

  # Bounded-layout guide (short pre-merged lines, paragraph noise)
  chansynth --profile bounded orange_be.pdf

  # Print the listing to stdout instead of writing a file
  chansynth --stdout voo_fr.pdf

  # Structured JSON result (rows, stats, document info)
  chansynth --json voo_fr.pdf > result.json

  # Encrypted guide
  chansynth --password s3cret guide.pdf

SECTION LISTS:
  Section-aware cleaning (code-boundary trimming, header rows, oversized-line
  splitting) runs only when a companion phrase list exists:

    voo_fr.pdf  →  voo_fr_sections.tsv    (one phrase per line, UTF-8)

  The list is looked up next to the document, or in --section-dir when set.
  A guide without one is still synthesised — the section passes are skipped.

ENVIRONMENT VARIABLES:
  CHANSYNTH_OUTPUT_DIR    Default for --output-dir
  CHANSYNTH_SECTION_DIR   Default for --section-dir
  CHANSYNTH_PASSWORD      Default for --password
  PDFIUM_LIB_PATH         Path to an existing libpdfium
"#;

/// Reconstruct clean channel listings from operator guide PDFs.
#[derive(Parser, Debug)]
#[command(
    name = "chansynth",
    version,
    about = "Reconstruct clean channel listings from operator guide PDFs",
    long_about = "Extract the raw text spans from operator channel-guide PDFs and run a sequence \
of deterministic cleaning heuristics over them — fragment merging, package-code boundary \
splitting, section-header extraction, boilerplate trimming — to produce one clean row per \
channel, written as <stem>_channels.tsv.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Guide PDF files to synthesise.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Guide family: fragmented or bounded.
    #[arg(
        long,
        value_enum,
        default_value = "fragmented",
        long_help = "Guide family the documents belong to.\n\
          fragmented: records split across spans, channel numbers duplicated per column.\n\
          bounded: one short line per record, paragraph noise filtered by length."
    )]
    profile: ProfileArg,

    /// Directory listings are written to (default: next to each input).
    #[arg(short, long, env = "CHANSYNTH_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Directory section lists are looked up in (default: next to each input).
    #[arg(long, env = "CHANSYNTH_SECTION_DIR")]
    section_dir: Option<PathBuf>,

    /// Disable the follower re-interleave rule of the oversized-line splitter.
    #[arg(long)]
    no_interleave: bool,

    /// Character length above which a merged line is re-split (fragmented profile).
    #[arg(long, default_value_t = 15)]
    long_line_threshold: usize,

    /// Maximum line length kept by the bounded-profile filter.
    #[arg(long, default_value_t = 35)]
    max_line_chars: usize,

    /// Boilerplate marker; the first row with this prefix ends the listing.
    /// Repeatable; replaces the built-in markers when given.
    #[arg(long = "marker")]
    markers: Vec<String>,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "CHANSYNTH_PASSWORD")]
    password: Option<String>,

    /// Print the listing to stdout instead of writing a file (single input only).
    #[arg(long)]
    stdout: bool,

    /// Output structured JSON (rows, stats, document info) instead of writing files.
    #[arg(long)]
    json: bool,

    /// Worker threads for batch synthesis (default: one per CPU core).
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Disable progress bar.
    #[arg(long)]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum ProfileArg {
    Fragmented,
    Bounded,
}

impl From<ProfileArg> for SourceProfile {
    fn from(v: ProfileArg) -> Self {
        match v {
            ProfileArg::Fragmented => SourceProfile::Fragmented,
            ProfileArg::Bounded => SourceProfile::Bounded,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    if let Some(jobs) = cli.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .context("Invalid --jobs value")?;
    }

    if (cli.stdout || cli.json) && cli.inputs.len() > 1 {
        anyhow::bail!("--stdout and --json take a single input");
    }

    let config = build_config(&cli)?;

    // ── Single document to stdout / JSON ─────────────────────────────────
    if cli.stdout || cli.json {
        let input = &cli.inputs[0];
        let output = synthesize(input, &config)
            .with_context(|| format!("Failed to synthesise {}", input.display()))?;

        if cli.json {
            let json = serde_json::to_string_pretty(&output).context("Failed to serialise")?;
            println!("{json}");
        } else {
            io::stdout()
                .write_all(output.to_tsv().as_bytes())
                .context("Failed to write to stdout")?;
        }
        if !cli.quiet {
            print_summary(input, &output);
        }
        return Ok(());
    }

    // ── Single document to file ──────────────────────────────────────────
    if cli.inputs.len() == 1 {
        let input = &cli.inputs[0];
        let output = synthesize_to_file(input, &config)
            .with_context(|| format!("Failed to synthesise {}", input.display()))?;
        if !cli.quiet {
            print_summary(input, &output);
            if output.stats.output_written {
                eprintln!("   → {}", bold(&output_path(input, &config).display().to_string()));
            }
        }
        return Ok(());
    }

    // ── Batch ────────────────────────────────────────────────────────────
    let bar = if cli.quiet || cli.no_progress {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  ⏱ {elapsed_precise}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.set_prefix("Synthesising");
        bar.set_message(format!("{} guides", cli.inputs.len()));
        bar.enable_steady_tick(std::time::Duration::from_millis(80));
        bar
    };

    let results = synthesize_batch(&cli.inputs, &config);
    bar.finish_and_clear();

    let mut ok = 0usize;
    let mut failed = 0usize;
    for (path, result) in &results {
        match result {
            Ok(output) => {
                ok += 1;
                if !cli.quiet {
                    let tick = if output.stats.output_written {
                        green("✓")
                    } else {
                        cyan("∅")
                    };
                    eprintln!(
                        "  {} {}  {}",
                        tick,
                        path.display(),
                        dim(&format!(
                            "{} rows, {} channels, {} sections",
                            output.stats.emitted_rows,
                            output.stats.channel_rows,
                            output.stats.section_rows
                        )),
                    );
                }
            }
            Err(e) => {
                failed += 1;
                eprintln!("  {} {}  {}", red("✗"), path.display(), red(&e.to_string()));
            }
        }
    }

    if !cli.quiet {
        if failed == 0 {
            eprintln!("{} {} guides synthesised", green("✔"), bold(&ok.to_string()));
        } else {
            eprintln!(
                "{} {}/{} guides synthesised  ({} failed)",
                if ok == 0 { red("✘") } else { cyan("⚠") },
                bold(&ok.to_string()),
                results.len(),
                red(&failed.to_string()),
            );
        }
    }

    if failed > 0 && ok == 0 {
        anyhow::bail!("All guides failed");
    }
    Ok(())
}

/// Map CLI args to `SynthConfig`.
fn build_config(cli: &Cli) -> Result<SynthConfig> {
    let mut builder = SynthConfig::builder()
        .profile(cli.profile.into())
        .long_line_threshold(cli.long_line_threshold)
        .max_line_chars(cli.max_line_chars)
        .interleave_follower(!cli.no_interleave);

    if !cli.markers.is_empty() {
        builder = builder.boilerplate_markers(cli.markers.clone());
    }
    if let Some(ref dir) = cli.output_dir {
        builder = builder.output_dir(dir);
    }
    if let Some(ref dir) = cli.section_dir {
        builder = builder.section_dir(dir);
    }
    if let Some(ref pwd) = cli.password {
        builder = builder.password(pwd.clone());
    }

    builder.build().context("Invalid configuration")
}

fn print_summary(input: &std::path::Path, output: &GuideOutput) {
    eprintln!(
        "{}  {}  {} rows ({} channels, {} sections)  {}ms",
        if output.rows.is_empty() {
            cyan("∅")
        } else {
            green("✔")
        },
        input.display(),
        bold(&output.stats.emitted_rows.to_string()),
        output.stats.channel_rows,
        output.stats.section_rows,
        output.stats.total_duration_ms,
    );
    if !output.stats.sections_applied {
        eprintln!("   {}", dim("no section list found — section passes skipped"));
    }
}
