mod settings;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use transcript2md_core::parsing::domain::parse_warning::ParseWarning;
use transcript2md_core::pipeline::convert_transcript_use_case::{
    Conversion, ConvertTranscriptUseCase,
};
use transcript2md_core::pipeline::pipeline_logger::LogPipelineLogger;
use transcript2md_core::pipeline::publish_transcript_use_case::{
    PublishTarget, PublishTranscriptUseCase,
};
use transcript2md_core::publishing::domain::publisher::validate_repository;
use transcript2md_core::publishing::infrastructure::gh_cli_publisher::GhCliPublisher;
use transcript2md_core::rendering::render_options::{RenderOptions, RenderStyle};

use settings::Settings;

/// Convert meeting transcripts (WebVTT, DOCX) to markdown and publish them to GitHub.
#[derive(Parser)]
#[command(name = "transcript2md", version)]
struct Cli {
    /// Settings file (defaults to <config dir>/transcript2md/settings.json).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a transcript and push the markdown to a GitHub repository.
    Push {
        /// Transcript file (.vtt or .docx).
        input: PathBuf,

        /// Target repository as owner/repo.
        #[arg(long)]
        repo: String,

        /// Target branch (default from settings, else main).
        #[arg(long)]
        branch: Option<String>,

        /// Destination path in the repository (default <path_prefix>/<input stem>.md).
        #[arg(long)]
        path: Option<String>,

        /// Commit message.
        #[arg(long)]
        message: Option<String>,

        /// Convert only and print or write the markdown instead of pushing.
        #[arg(long)]
        dry_run: bool,

        /// Also write the markdown to this file.
        #[arg(long, short)]
        output: Option<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,
    },
    /// Convert a transcript to markdown locally.
    Convert {
        /// Transcript file (.vtt or .docx).
        input: PathBuf,

        /// Output file (stdout when omitted).
        #[arg(long, short)]
        output: Option<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,
    },
}

#[derive(Args)]
struct RenderArgs {
    /// Document title (derived from the file name when omitted).
    #[arg(long)]
    title: Option<String>,

    /// Leave timestamps out of the markdown.
    #[arg(long)]
    no_timestamps: bool,

    /// One list item per utterance instead of a section per speaker.
    #[arg(long)]
    compact: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref());

    match cli.command {
        Command::Convert {
            input,
            output,
            render,
        } => {
            validate_input(&input)?;
            let conversion = convert(&input, &render, &settings)?;
            write_markdown(&conversion.markdown, output.as_deref())?;
        }
        Command::Push {
            input,
            repo,
            branch,
            path,
            message,
            dry_run,
            output,
            render,
        } => {
            validate_input(&input)?;
            validate_repository(repo.trim())?;
            let conversion = convert(&input, &render, &settings)?;

            if dry_run {
                log::info!("Dry run: not pushing to {repo}");
                write_markdown(&conversion.markdown, output.as_deref())?;
                return Ok(());
            }
            if let Some(output) = &output {
                write_markdown(&conversion.markdown, Some(output))?;
            }

            let target = PublishTarget {
                repository: repo,
                filename: path.unwrap_or_else(|| default_destination(&settings.path_prefix, &input)),
                branch: Some(branch.unwrap_or_else(|| settings.default_branch.clone())),
                commit_message: message,
            };
            let publisher =
                GhCliPublisher::with_timeout(Duration::from_secs(settings.publish_timeout_secs));
            let url = PublishTranscriptUseCase::new(Box::new(publisher))
                .execute(&conversion.markdown, &target)?;
            println!("{url}");
        }
    }

    Ok(())
}

fn convert(
    input: &Path,
    render: &RenderArgs,
    settings: &Settings,
) -> Result<Conversion, Box<dyn std::error::Error>> {
    let options = RenderOptions {
        title: Some(render.title.clone().unwrap_or_else(|| derive_title(input))),
        include_timestamps: settings.include_timestamps && !render.no_timestamps,
        style: if render.compact {
            RenderStyle::Compact
        } else {
            settings.style
        },
    };

    let mut use_case = ConvertTranscriptUseCase::new(options, Box::new(LogPipelineLogger::new()));
    let conversion = use_case.execute(input)?;
    log::info!(
        "Converted {} ({} transcript, {} utterances, {} warnings)",
        input.display(),
        conversion.format,
        conversion.utterance_count,
        conversion.warnings.len()
    );
    if let Some(summary) = warning_summary(input, &conversion.warnings) {
        eprintln!("{summary}");
    }
    Ok(conversion)
}

/// One stderr line counting parse warnings by kind.
fn warning_summary(input: &Path, warnings: &[ParseWarning]) -> Option<String> {
    if warnings.is_empty() {
        return None;
    }
    let mut kinds: BTreeMap<&str, usize> = BTreeMap::new();
    for warning in warnings {
        *kinds.entry(warning.kind.as_str()).or_default() += 1;
    }
    let breakdown = kinds
        .iter()
        .map(|(kind, count)| format!("{kind} x{count}"))
        .collect::<Vec<_>>()
        .join(", ");
    Some(format!(
        "Warning: {} parse warning{} in {} ({breakdown})",
        warnings.len(),
        if warnings.len() == 1 { "" } else { "s" },
        input.display()
    ))
}

fn write_markdown(markdown: &str, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => {
            fs::write(path, markdown)
                .map_err(|e| format!("Could not write {}: {e}", path.display()))?;
            log::info!("Output written to {}", path.display());
        }
        None => print!("{markdown}"),
    }
    Ok(())
}

fn validate_input(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !input.is_file() {
        return Err(format!("Input file not found: {}", input.display()).into());
    }
    Ok(())
}

/// `team_standup-notes.vtt` becomes `Team Standup Notes`.
fn derive_title(input: &Path) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    stem.replace(['-', '_'], " ")
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn default_destination(prefix: &str, input: &Path) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "transcript".to_string());
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        format!("{stem}.md")
    } else {
        format!("{prefix}/{stem}.md")
    }
}
