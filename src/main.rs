use anyhow::{Context, Result};
use cli::Cli;
use config_wizard::Configuration;
use document::{load_all, DocumentStatus, FsLoader};
use indicatif::{ProgressBar, ProgressStyle};
use sinks::{export_epub, export_text, Deliver, FileSink, RandomUuid, MISSING_CONTENT};
use std::path::Path;
use std::process::ExitCode;

mod cli;
mod config_wizard;
mod detection;
mod document;
mod edit;
mod file_ordering;
mod sinks;

fn main() -> ExitCode {
    use clap::Parser;
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = try_main(&cli) {
        eprintln!("{}: {e:#}", console::style("Error").red());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn try_main(cli: &Cli) -> Result<()> {
    // one export at a time, on one thread
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .with_context(|| "Failed to start async runtime")?;

    match &cli.command {
        cli::Commands::Config => config_wizard::run(&cli.config),
        cli::Commands::Add { paths } => edit::add(&cli.config, paths),
        cli::Commands::Remove { position } => edit::remove(&cli.config, *position),
        cli::Commands::Move { from, to } => edit::move_document(&cli.config, *from, *to),
        cli::Commands::List => runtime.block_on(edit::list(&cli.config)),
        cli::Commands::Render => runtime.block_on(render(&cli.config)),
    }
}

async fn render(config_path: &Path) -> Result<()> {
    println!("Loading configuration...");
    let config = Configuration::load(config_path)?;

    if config.epub.is_none() && config.text.is_none() {
        println!("No output configured.");
        return Ok(());
    }

    let mut documents = config.document_set();
    if documents.is_empty() {
        log::warn!("No documents configured; exporting an empty book");
    }

    let progress = ProgressBar::new(documents.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .with_context(|| "Failed to parse progress style")?
            .progress_chars("#>-"),
    );
    load_all(&mut documents, &FsLoader, &progress).await?;
    progress.finish_with_message("Documents loaded");

    let failed: Vec<_> = documents
        .iter()
        .filter(|d| d.status == DocumentStatus::Failed)
        .map(|d| d.title.as_str())
        .collect();
    if !failed.is_empty() {
        println!(
            "  {} document(s) couldn't be loaded and will read '{}': {}",
            failed.len(),
            MISSING_CONTENT,
            failed.join(", ")
        );
    }

    let snapshot = documents.snapshot();
    println!();

    if let Some(epub) = &config.epub {
        let today = chrono::Local::now().date_naive();
        let blob = export_epub(&snapshot, epub, &RandomUuid, today).await?;
        let path = FileSink::beside(&epub.outfile).deliver(&blob)?;
        println!("  EPUB: {}", path.display());
    }

    if let Some(text) = &config.text {
        let blob = export_text(&snapshot, text).await?;
        let path = FileSink::beside(&text.outfile).deliver(&blob)?;
        println!("  Text: {}", path.display());
    }

    Ok(())
}
