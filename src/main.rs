use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{ArgGroup, Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use singular_they::annotator::ANNOTATOR_URL_VAR;
use singular_they::{
    execute_stage3_pairs, execute_stage3_sentences, read_jsonl, read_m2, run_batch, select_chains,
    Annotator, AnnotatorConfig, Augmentor, AugmentorConfig, BatchConfig, BatchSummary,
    EligibilityConfig, HttpAnnotator, InputRecord, Outcome, PairInput, PrecomputedAnnotator,
    SentenceInput, Stage3Config, AGREEMENT_TABLE,
};

#[derive(Parser)]
#[command(name = "singular-they")]
#[command(author, version, about = "Singular they augmentation for grammatical error correction data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand
#[derive(Args)]
struct PipelineArgs {
    /// Precomputed parses (JSONL, one annotated sentence per line)
    #[arg(long)]
    parses: Option<PathBuf>,

    /// URL of a parser/coreference server (default: $SINGULAR_THEY_ANNOTATOR_URL)
    #[arg(long)]
    annotator_url: Option<String>,

    /// Number of parallel workers (default: available cores)
    #[arg(long)]
    workers: Option<usize>,

    /// Rewrite every gendered pronoun, without requiring a singular anchor
    #[arg(long)]
    no_singular_check: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite single sentences to singular they
    Augment {
        /// Input sentences (JSONL: {"id"?, "text"})
        #[arg(short, long)]
        input: PathBuf,

        /// Output records (JSONL)
        #[arg(short, long)]
        output: PathBuf,

        /// Human-readable report
        #[arg(long)]
        report: Option<PathBuf>,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Rewrite errorful/corrected pairs and their edits in parallel
    #[command(group(ArgGroup::new("pairs").required(true).args(["input", "m2"])))]
    Gec {
        /// Input pairs (JSONL: {"id"?, "source", "target", "edits"?})
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Input corpus in M2 format
        #[arg(long)]
        m2: Option<PathBuf>,

        /// Output records (JSONL)
        #[arg(short, long)]
        output: PathBuf,

        /// Augmented corpus in M2 format
        #[arg(long)]
        m2_output: Option<PathBuf>,

        /// Human-readable report
        #[arg(long)]
        report: Option<PathBuf>,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Report chain eligibility statistics without rewriting
    Analyze {
        /// Input sentences (JSONL: {"id"?, "text"})
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Augment {
            input,
            output,
            report,
            pipeline,
        } => {
            setup_logging(pipeline.verbose);
            let stage3_config = Stage3Config {
                output: Some(output),
                m2_output: None,
                report,
            };
            augment_sentences(input, &stage3_config, &pipeline)
        }
        Commands::Gec {
            input,
            m2,
            output,
            m2_output,
            report,
            pipeline,
        } => {
            setup_logging(pipeline.verbose);
            let stage3_config = Stage3Config {
                output: Some(output),
                m2_output,
                report,
            };
            augment_pairs(input, m2, &stage3_config, &pipeline)
        }
        Commands::Analyze { input, pipeline } => {
            setup_logging(pipeline.verbose);
            analyze_sentences(input, &pipeline)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn build_annotator(args: &PipelineArgs) -> Result<Arc<dyn Annotator>> {
    if let Some(path) = &args.parses {
        return Ok(Arc::new(PrecomputedAnnotator::from_jsonl(path)?));
    }

    let config = match &args.annotator_url {
        Some(url) => AnnotatorConfig::new(url.clone()),
        None => AnnotatorConfig::from_env()
            .with_context(|| format!("Pass --parses or --annotator-url, or set {}", ANNOTATOR_URL_VAR))?,
    };
    info!("Using annotator at {}", config.url);
    Ok(Arc::new(HttpAnnotator::new(config)?))
}

fn augmentor_config(args: &PipelineArgs) -> AugmentorConfig {
    AugmentorConfig {
        eligibility: EligibilityConfig {
            require_singular_anchor: !args.no_singular_check,
            ..Default::default()
        },
    }
}

fn batch_config(args: &PipelineArgs) -> BatchConfig {
    let mut config = BatchConfig::default();
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    config
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")
}

fn log_summary(summary: &BatchSummary) {
    for (code, count) in &summary.reasons {
        info!("  {}: {}", code, count);
    }
    info!(
        "Complete: {}/{} augmented ({:.1}%)",
        summary.augmented,
        summary.total,
        summary.augmented_pct()
    );
}

fn augment_sentences(input: PathBuf, stage3_config: &Stage3Config, args: &PipelineArgs) -> Result<()> {
    info!("Loading sentences from {:?}", input);
    let inputs: Vec<InputRecord<SentenceInput>> =
        read_jsonl(&input).context("Failed to read input sentences")?;
    info!("Loaded {} sentences", inputs.len());

    // The annotator must outlive the runtime: a blocking HTTP client may not
    // be dropped inside it
    let augmentor = Arc::new(Augmentor::new(build_annotator(args)?, augmentor_config(args)));
    let job = {
        let augmentor = Arc::clone(&augmentor);
        move |input: &SentenceInput| Outcome::from(augmentor.augment_sentence(&input.text))
    };

    let (records, summary) = runtime()?.block_on(run_batch(inputs, &batch_config(args), job))?;

    let result = execute_stage3_sentences(&records, stage3_config)?;
    if let Some(path) = result.output_path {
        info!("Output written to {:?}", path);
    }
    if let Some(path) = result.report_path {
        info!("Report written to {:?}", path);
    }
    log_summary(&summary);

    Ok(())
}

fn augment_pairs(
    input: Option<PathBuf>,
    m2: Option<PathBuf>,
    stage3_config: &Stage3Config,
    args: &PipelineArgs,
) -> Result<()> {
    let inputs: Vec<InputRecord<PairInput>> = match (input, m2) {
        (Some(path), None) => {
            info!("Loading pairs from {:?}", path);
            read_jsonl(&path).context("Failed to read input pairs")?
        }
        (None, Some(path)) => {
            info!("Loading M2 corpus from {:?}", path);
            read_m2(&path)?
        }
        _ => bail!("Pass exactly one of --input or --m2"),
    };
    info!("Loaded {} pairs", inputs.len());

    let augmentor = Arc::new(Augmentor::new(build_annotator(args)?, augmentor_config(args)));
    let job = {
        let augmentor = Arc::clone(&augmentor);
        move |input: &PairInput| {
            Outcome::from(augmentor.augment_pair(&input.source, &input.target, input.edits.as_deref()))
        }
    };

    let (records, summary) = runtime()?.block_on(run_batch(inputs, &batch_config(args), job))?;

    let result = execute_stage3_pairs(&records, stage3_config)?;
    if let Some(path) = result.output_path {
        info!("Output written to {:?}", path);
    }
    if let Some(path) = result.m2_path {
        info!("M2 corpus written to {:?}", path);
    }
    if let Some(path) = result.report_path {
        info!("Report written to {:?}", path);
    }
    log_summary(&summary);

    Ok(())
}

fn analyze_sentences(input: PathBuf, args: &PipelineArgs) -> Result<()> {
    info!("Analyzing sentences from {:?}", input);
    let inputs: Vec<InputRecord<SentenceInput>> =
        read_jsonl(&input).context("Failed to read input sentences")?;
    let annotator = build_annotator(args)?;
    let config = augmentor_config(args);

    let mut parsed = 0;
    let mut invalid = 0;
    let mut with_gendered_pronoun = 0;
    let mut chains = 0;
    let mut gendered_chains = 0;
    let mut selected_chains = 0;
    let mut eligible_sentences = 0;
    let mut rejections: BTreeMap<&'static str, usize> = BTreeMap::new();

    for record in &inputs {
        let sentence = match annotator.annotate(&record.input.text) {
            Ok(sentence) => sentence,
            Err(e) => {
                info!("Skipping {}: {}", record.id, e);
                invalid += 1;
                continue;
            }
        };
        parsed += 1;

        if sentence
            .tokens
            .iter()
            .any(|t| AGREEMENT_TABLE.is_gendered_pronoun(&t.text))
        {
            with_gendered_pronoun += 1;
        }
        chains += sentence.chains.len();
        gendered_chains += sentence.chains.iter().filter(|c| c.is_gendered()).count();

        let selection = select_chains(&sentence, &config.eligibility);
        selected_chains += selection.chains.len();
        if !selection.chains.is_empty() {
            eligible_sentences += 1;
        }
        for rejection in &selection.rejections {
            *rejections.entry(rejection.label()).or_default() += 1;
        }
    }

    println!("Eligibility Analysis");
    println!("====================");
    println!("Sentences: {}", inputs.len());
    println!("Parsed: {}", parsed);
    println!("Invalid: {}", invalid);
    println!("With a gendered pronoun: {}", with_gendered_pronoun);
    println!();

    println!("Chains");
    println!("------");
    println!("Total chains: {}", chains);
    println!("Gendered chains: {}", gendered_chains);
    println!("Selected (singletons included): {}", selected_chains);
    println!(
        "Sentences with an eligible chain: {} ({:.1}%)",
        eligible_sentences,
        eligible_sentences as f64 / parsed.max(1) as f64 * 100.0
    );
    println!();

    println!("Rejections");
    println!("----------");
    for (code, count) in &rejections {
        println!("{}: {}", code, count);
    }

    Ok(())
}
