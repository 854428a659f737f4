use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use debate_tagger::{
    flush, format_preview, load_transcript, segment_timestamped, watch, write_annotated_csv,
    write_annotated_json, AnnotatedUtterance, CollectingObserver, CsvSink, Feature, FileTailer, NormalizerConfig,
    Pipeline, PipelineConfig, TracingObserver, TranscriptAccumulator, TranscriptDocument,
    TranscriptFormat, WatchConfig,
};

#[derive(Parser)]
#[command(name = "debate-tagger")]
#[command(author, version, about = "Debate transcript segmentation and lexical feature tagging", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Segment and annotate a transcript file
    Process {
        /// Input transcript (.json, .csv or .txt)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for annotated rows (.csv or .json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Input layout, overriding the file extension
        #[arg(short, long, value_parser = parse_format)]
        format: Option<TranscriptFormat>,

        #[command(flatten)]
        annotate: AnnotateArgs,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Follow a growing transcript and annotate new lines as they arrive
    Watch {
        /// Transcript file being appended to
        #[arg(short, long)]
        input: PathBuf,

        /// CSV file that new annotated rows are appended to
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Input layout
        #[arg(short, long, value_parser = parse_format, default_value = "timestamped")]
        format: TranscriptFormat,

        /// Poll interval in milliseconds
        #[arg(long, default_value = "1000")]
        interval_ms: u64,

        /// Stop after this many polls
        #[arg(long)]
        max_polls: Option<usize>,

        #[command(flatten)]
        annotate: AnnotateArgs,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Convert a `SPEAKER [START - END]: TEXT` transcript into JSON
    Convert {
        /// Timestamped text transcript
        #[arg(short, long)]
        input: PathBuf,

        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print per-speaker statistics without writing anything
    Analyze {
        /// Input transcript (.json, .csv or .txt)
        #[arg(short, long)]
        input: PathBuf,

        /// Input layout, overriding the file extension
        #[arg(short, long, value_parser = parse_format)]
        format: Option<TranscriptFormat>,

        #[command(flatten)]
        annotate: AnnotateArgs,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(Args, Debug, Clone)]
struct AnnotateArgs {
    /// Speaker identifier of the moderator (case-insensitive)
    #[arg(short, long)]
    moderator: Option<String>,

    /// Do not lower-case text
    #[arg(long)]
    keep_case: bool,

    /// Do not expand contractions
    #[arg(long)]
    keep_contractions: bool,

    /// Do not remove filler words
    #[arg(long)]
    keep_fillers: bool,

    /// Remove punctuation from cleaned text
    #[arg(long)]
    strip_punctuation: bool,
}

impl AnnotateArgs {
    fn pipeline(&self) -> Pipeline {
        let config = PipelineConfig {
            normalizer: NormalizerConfig {
                lowercase: !self.keep_case,
                expand_contractions: !self.keep_contractions,
                remove_fillers: !self.keep_fillers,
                preserve_punctuation: !self.strip_punctuation,
            },
            moderator: self.moderator.clone(),
        };
        Pipeline::new(config).with_observer(TracingObserver)
    }
}

fn parse_format(value: &str) -> Result<TranscriptFormat, String> {
    value.parse().map_err(|e| format!("{e}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            input,
            output,
            format,
            annotate,
            verbose,
        } => {
            setup_logging(verbose);
            process_transcript(&input, output.as_deref(), format, &annotate)
        }
        Commands::Watch {
            input,
            output,
            format,
            interval_ms,
            max_polls,
            annotate,
            verbose,
        } => {
            setup_logging(verbose);
            let config = WatchConfig {
                poll_interval: Duration::from_millis(interval_ms.max(1)),
                format,
                max_polls,
            };
            watch_transcript(input, output, config, &annotate).await
        }
        Commands::Convert {
            input,
            output,
            verbose,
        } => {
            setup_logging(verbose);
            convert_transcript(&input, &output)
        }
        Commands::Analyze {
            input,
            format,
            annotate,
            verbose,
        } => {
            setup_logging(verbose);
            analyze_transcript(&input, format, &annotate)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn process_transcript(
    input: &Path,
    output: Option<&Path>,
    format: Option<TranscriptFormat>,
    annotate: &AnnotateArgs,
) -> Result<()> {
    info!("Loading transcript from {:?}", input);
    let (content, format) =
        load_transcript(input, format).context("Failed to load input transcript")?;

    let pipeline = annotate.pipeline();
    let rows = pipeline
        .process(&content, format)
        .with_context(|| format!("Failed to parse {:?} as {}", input, format))?;

    info!("Annotated {} utterances ({} format)", rows.len(), format);
    print!("{}", format_preview(&rows, 5));

    if let Some(path) = output {
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let written = if is_json {
            write_annotated_json(path, &rows)
        } else {
            write_annotated_csv(path, &rows)
        };
        written.with_context(|| format!("Failed to write {:?}", path))?;
        info!("Processed data saved to {:?}", path);
    }

    Ok(())
}

async fn watch_transcript(
    input: PathBuf,
    output: Option<PathBuf>,
    config: WatchConfig,
    annotate: &AnnotateArgs,
) -> Result<()> {
    let pipeline = annotate.pipeline();
    let mut tailer = FileTailer::with_path(&input);
    let mut accumulator = TranscriptAccumulator::new();
    let mut sink = match &output {
        Some(path) => Some(CsvSink::open(path).with_context(|| format!("Failed to open {:?}", path))?),
        None => None,
    };

    if !config.format.is_line_oriented() {
        warn!("{} input is parsed one poll at a time as a whole document", config.format);
    }
    info!(
        "Watching {:?} every {:?} ({} format)",
        input, config.poll_interval, config.format
    );

    let mut on_batch = |rows: &[AnnotatedUtterance]| -> debate_tagger::Result<()> {
        print!("{}", format_preview(rows, rows.len()));
        if let Some(sink) = sink.as_mut() {
            sink.append(rows)?;
        }
        Ok(())
    };

    let run = watch(&mut tailer, &pipeline, &mut accumulator, &config, &mut on_batch);

    let interrupted = tokio::select! {
        result = run => {
            let summary = result.context("Watch loop failed")?;
            info!(
                "Stopped after {} polls: {} utterances from {} chunks ({} skipped)",
                summary.polls, summary.utterances, summary.chunks, summary.failed_chunks
            );
            false
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted");
            true
        }
    };

    if interrupted {
        let added = flush(&mut tailer, &pipeline, &mut accumulator, config.format, &mut on_batch)
            .context("Failed to process the rest of the transcript")?;
        if added > 0 {
            info!("Processed {} utterances from the unterminated tail", added);
        }
    }

    info!("{} utterances annotated in total", accumulator.len());
    Ok(())
}

fn convert_transcript(input: &Path, output: &Path) -> Result<()> {
    let (content, _) = load_transcript(input, Some(TranscriptFormat::Timestamped))
        .context("Failed to load input transcript")?;

    let observer = CollectingObserver::new();
    let utterances = segment_timestamped(&content, &observer);
    if !observer.is_empty() {
        info!("Skipped {} lines that did not match the expected pattern", observer.len());
    }

    TranscriptDocument::from_utterances(&utterances)
        .write_json(output)
        .with_context(|| format!("Failed to write {:?}", output))?;

    info!("Converted {} utterances to {:?}", utterances.len(), output);
    Ok(())
}

fn analyze_transcript(
    input: &Path,
    format: Option<TranscriptFormat>,
    annotate: &AnnotateArgs,
) -> Result<()> {
    let (content, format) =
        load_transcript(input, format).context("Failed to load input transcript")?;
    let rows = annotate
        .pipeline()
        .process(&content, format)
        .with_context(|| format!("Failed to parse {:?} as {}", input, format))?;

    println!("Transcript Analysis");
    println!("===================");
    println!("Format: {}", format);
    println!("Utterances: {}", rows.len());
    println!(
        "Moderator turns: {}",
        rows.iter().filter(|r| r.is_moderator).count()
    );
    println!();

    println!("Feature Counts");
    println!("--------------");
    for feature in Feature::ALL {
        let count = rows.iter().filter(|r| r.features.get(feature)).count();
        println!("{}: {}", feature.name(), count);
    }
    println!();

    println!("Speaker Statistics");
    println!("------------------");
    let mut speakers: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for row in &rows {
        let entry = speakers.entry(row.speaker()).or_default();
        entry.0 += 1;
        entry.1 += row.features.sentence_length;
    }
    for (speaker, (turns, words)) in speakers {
        println!(
            "{}: {} turns, {} words, avg {:.1} words/turn",
            speaker,
            turns,
            words,
            words as f64 / turns.max(1) as f64
        );
    }

    Ok(())
}
