use anyhow::{Context, Result};
use clap::Parser;
use mixtrack::input::{sources, Source};
use mixtrack::report::{render, Format};
use mixtrack::{PipelineConfig, ReconcileConfig, Timecode, TracklistPipeline};
use rayon::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "mixtrack")]
#[command(about = "Reconstruct a timed tracklist from a DJ mix tracklist page", long_about = None)]
struct Args {
    /// Tracklist pages (HTML or text); "-" or nothing reads standard input
    inputs: Vec<String>,

    /// Total mix length (e.g. 1:58:12); skips detection
    #[arg(short = 't', long)]
    total_duration: Option<String>,

    /// Gaps longer than this get an ID track (default: 01:00)
    #[arg(long)]
    min_gap: Option<String>,

    /// Edge distance within which the first/last track is stretched (default: 00:30)
    #[arg(long)]
    edge_threshold: Option<String>,

    /// Don't look for the total length in the page
    #[arg(long)]
    no_detect_duration: bool,

    /// Don't extract mix title, artist, year and genre
    #[arg(long)]
    no_metadata: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: Format,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = build_config(&args)?;
    let pipeline = TracklistPipeline::new(config);

    let sources = sources(&args.inputs);
    log::info!("Processing {} document(s)", sources.len());

    let outputs: Vec<Result<String>> = sources
        .par_iter()
        .map(|source| process(&pipeline, source, args.format))
        .collect();

    let mut failures = 0;
    for (source, output) in sources.iter().zip(outputs) {
        match output {
            Ok(rendered) => print!("{}", rendered),
            Err(e) => {
                log::error!("{}: {:#}", source.describe(), e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} document(s) failed", failures, sources.len());
    }
    Ok(())
}

fn build_config(args: &Args) -> Result<PipelineConfig> {
    let mut reconcile = ReconcileConfig::new();
    if let Some(ref gap) = args.min_gap {
        reconcile = reconcile.with_min_gap(Timecode::parse(gap).context("Invalid --min-gap")?);
    }
    if let Some(ref edge) = args.edge_threshold {
        reconcile = reconcile
            .with_intro_outro(Timecode::parse(edge).context("Invalid --edge-threshold")?);
    }

    let mut config = PipelineConfig::new()
        .with_reconcile(reconcile)
        .with_duration_detection(!args.no_detect_duration)
        .with_metadata(!args.no_metadata);
    if let Some(ref total) = args.total_duration {
        Timecode::parse(total).context("Invalid --total-duration")?;
        config = config.with_total_duration(total.clone());
    }

    Ok(config)
}

fn process(pipeline: &TracklistPipeline, source: &Source, format: Format) -> Result<String> {
    let payload = source.read()?;
    let name = source.describe();

    let tracklist = pipeline
        .run(&payload)
        .with_context(|| format!("Failed to build tracklist for {}", name))?;

    let mut rendered = render(&name, &tracklist, format).context("Failed to render tracklist")?;
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    Ok(rendered)
}
