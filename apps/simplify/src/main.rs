use std::{io::Read, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use client_core::{
    artifact,
    config::{load_settings, normalize_service_url},
    readability,
    Draft, ExampleField, ExampleId, HttpSimplificationService, InputMode, SimplificationResult,
    SimplificationService, SourceFile, WorkflowController, WorkflowError,
};
use shared::domain::{DownloadFormat, ReplacePair, SamplePair};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "simplify", about = "Rewrite documents and text in plain language")]
struct Cli {
    /// Base URL of the simplification service.
    #[arg(long, global = true)]
    service_url: Option<String>,
    /// Where downloaded documents are written.
    #[arg(long, global = true)]
    download_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the service is reachable.
    Health,
    /// Print the service's default prompt configuration.
    Defaults,
    /// Simplify pasted text. Reads stdin when no text is given.
    Text {
        text: Option<String>,
        #[command(flatten)]
        prompt: PromptArgs,
    },
    /// Simplify a .docx document.
    Document {
        path: PathBuf,
        #[arg(long, value_enum)]
        download: Option<DownloadChoice>,
        #[command(flatten)]
        prompt: PromptArgs,
    },
}

#[derive(Args, Debug)]
struct PromptArgs {
    /// Replaces the default base prompt.
    #[arg(long)]
    prompt: Option<String>,
    /// Keyword the rewrite must keep as-is. Repeatable.
    #[arg(long = "keep")]
    keep: Vec<String>,
    /// ORIGINAL=REPLACEMENT. Repeatable.
    #[arg(long = "replace", value_parser = parse_replace)]
    replace: Vec<ReplacePair>,
    /// ORIGINAL=>SIMPLIFIED sample pair. Repeatable.
    #[arg(long = "example", value_parser = parse_example)]
    example: Vec<SamplePair>,
    /// Start from an empty draft instead of the service defaults.
    #[arg(long)]
    no_defaults: bool,
    /// Ask for this many further rewrites after the first result.
    #[arg(long, default_value_t = 0)]
    regenerate: u32,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DownloadChoice {
    Docx,
    Pdf,
    Both,
}

impl DownloadChoice {
    fn formats(self) -> &'static [DownloadFormat] {
        match self {
            Self::Docx => &[DownloadFormat::Docx],
            Self::Pdf => &[DownloadFormat::Pdf],
            Self::Both => &[DownloadFormat::Docx, DownloadFormat::Pdf],
        }
    }
}

fn parse_replace(raw: &str) -> Result<ReplacePair, String> {
    let (original, replacement) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ORIGINAL=REPLACEMENT, got {raw:?}"))?;
    Ok(ReplacePair::new(original, replacement))
}

fn parse_example(raw: &str) -> Result<SamplePair, String> {
    let (original, simplified) = raw
        .split_once("=>")
        .ok_or_else(|| format!("expected ORIGINAL=>SIMPLIFIED, got {raw:?}"))?;
    Ok(SamplePair {
        original: original.trim().to_string(),
        simplified: simplified.trim().to_string(),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let cli = Cli::parse();

    let mut settings = load_settings();
    if let Some(url) = cli.service_url {
        settings.service_url = url;
    }
    if let Some(dir) = cli.download_dir {
        settings.download_dir = dir;
    }
    settings.service_url = normalize_service_url(&settings.service_url)?;
    let service = HttpSimplificationService::from_settings(&settings);
    info!(service_url = %service.service_url(), "using simplification service");

    match cli.command {
        Command::Health => {
            let health = service
                .health()
                .await
                .context("simplification service is unreachable")?;
            println!("{} ({})", health.health, health.status);
        }
        Command::Defaults => {
            let config = service
                .fetch_default_config()
                .await
                .context("failed to fetch default configuration")?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Command::Text { text, prompt } => {
            let text = match text {
                Some(text) => text,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("failed to read text from stdin")?;
                    buf
                }
            };
            let mut controller = prepare(&service, &prompt).await?;
            controller.update(|draft| draft.set_mode(InputMode::PastedText).set_pasted_text(text))?;
            run(&service, &mut controller, prompt.regenerate).await?;
        }
        Command::Document {
            path,
            download,
            prompt,
        } => {
            let file = SourceFile::load(&path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            let mut controller = prepare(&service, &prompt).await?;
            controller.update(|draft| draft.set_mode(InputMode::Document))?;
            controller.select_source_file(file)?;
            run(&service, &mut controller, prompt.regenerate).await?;

            for &format in download.map(DownloadChoice::formats).unwrap_or_default() {
                let file = controller
                    .download(&service, format)
                    .await
                    .with_context(|| format!("failed to download {format:?} result"))?;
                let saved = artifact::save(&file, &settings.download_dir).await?;
                println!("saved {}", saved.display());
            }
        }
    }

    Ok(())
}

async fn prepare(
    service: &HttpSimplificationService,
    args: &PromptArgs,
) -> Result<WorkflowController> {
    let mut controller = if args.no_defaults {
        WorkflowController::new(Draft::default())
    } else {
        WorkflowController::load_defaults(service)
            .await
            .context("failed to load default configuration")?
    };

    if let Some(prompt) = &args.prompt {
        controller.update(|draft| draft.set_prompt(prompt.clone()))?;
    }
    for keyword in &args.keep {
        controller
            .try_update(|draft| draft.add_keep_keyword(keyword))
            .with_context(|| format!("cannot keep {keyword:?}"))?;
    }
    for pair in &args.replace {
        controller
            .try_update(|draft| draft.add_replace_pair(&pair.original, &pair.replacement))
            .with_context(|| format!("cannot replace {:?}", pair.original))?;
    }
    for sample in &args.example {
        let id = ExampleId::generate();
        controller.update(|draft| {
            draft
                .add_example_pair_with_id(id.clone())
                .update_example_pair(&id, ExampleField::Original, &sample.original)
                .update_example_pair(&id, ExampleField::Simplified, &sample.simplified)
        })?;
    }
    Ok(controller)
}

async fn run(
    service: &HttpSimplificationService,
    controller: &mut WorkflowController,
    regenerate: u32,
) -> Result<()> {
    let result = match controller.submit(service).await {
        Ok(result) => result,
        Err(WorkflowError::Validation(validation)) => {
            for message in validation.messages() {
                eprintln!("{message}");
            }
            bail!("draft is not ready to submit");
        }
        Err(err) => {
            if err.is_retryable() {
                warn!("the request can be retried as-is");
            }
            return Err(err.into());
        }
    };
    print_result(&result);

    for round in 1..=regenerate {
        println!("\n--- regeneration {round} ---");
        let result = controller.regenerate(service).await?;
        print_result(&result);
    }
    Ok(())
}

fn print_result(result: &SimplificationResult) {
    let report = result.report();
    println!("{}", result.simplified_text);
    println!();
    println!("Grade level: {}", report.grade);
    println!("ARI score: {} ({})", report.score_display(), report.zone);
    println!("Gauge position: {:.1}px", report.gauge_position);
    println!("{}", report.banner());
    println!();
    println!("{}", readability::ARI_EXPLAINER_TITLE);
    println!("{}", readability::ARI_EXPLAINER);
}
