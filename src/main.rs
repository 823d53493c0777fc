use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use colored::Colorize;
use direye::artifacts::classify::change::ChangeKind;
use direye::commands::compare::{CompareOptions, CompareService};
use direye::commands::report;
use direye::{CancelToken, ExclusionSet, ProgressEvent};
use is_terminal::IsTerminal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "direye",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A folder comparison tool",
    long_about = "direye compares two folder trees, reports which text files were \
    modified, added or deleted, and renders context-bounded diff fragments \
    for every modified file.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "compare",
        about = "Compare two folder trees",
        long_about = "This command walks both trees, classifies every comparable file as \
        modified, added or deleted, and prints a line diff for each modified file. \
        Progress is reported on stderr while the comparison runs."
    )]
    Compare {
        #[arg(index = 1, help = "The original (left) folder")]
        original: PathBuf,
        #[arg(index = 2, help = "The modified (right) folder")]
        modified: PathBuf,
        #[arg(
            short,
            long,
            help = "Relative path to exclude from both trees (repeatable)"
        )]
        exclude: Vec<String>,
        #[arg(long, help = "Always hash contents, even when file sizes differ")]
        strict: bool,
        #[arg(
            long,
            default_value_t = 3,
            help = "Unchanged lines kept around each change"
        )]
        context: usize,
        #[arg(long, help = "Print the change summary only, without diff fragments")]
        names_only: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Compare {
            original,
            modified,
            exclude,
            strict,
            context,
            names_only,
        } => compare(original, modified, exclude, strict, context, names_only).await,
    }
}

async fn compare(
    original: PathBuf,
    modified: PathBuf,
    exclude: Vec<String>,
    strict: bool,
    context: usize,
    names_only: bool,
) -> Result<()> {
    let exclusions = exclude.into_iter().collect::<ExclusionSet>();
    let options = CompareOptions::new(original.clone(), modified.clone(), exclusions, strict);

    let cancel = CancelToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupt.cancel();
        }
    });

    let service = CompareService::default();
    let mut run = service.start(options, cancel)?;

    let mut complete = true;
    while let Some(event) = run.events.recv().await {
        match event {
            ProgressEvent::FileClassified { path, kind } => {
                if kind != ChangeKind::Unchanged {
                    progress(&format!("{kind} {path}"));
                }
            }
            ProgressEvent::Warning(warning) => {
                progress(&format!("{} {warning}", "warning:".yellow()));
            }
            ProgressEvent::Finished { complete: finished } => complete = finished,
        }
    }

    let report = run.finish().await?;

    let mut stdout = std::io::stdout();
    report::print_summary(&mut stdout, &report)?;
    if !names_only {
        report::print_fragments(&mut stdout, &report, &original, &modified, context)?;
    }

    if !complete {
        progress("comparison interrupted, results are partial");
    }

    Ok(())
}

fn progress(message: &str) {
    eprintln!("[{}] {message}", Local::now().format("%H:%M:%S"));
}
