use anyhow::{Result, anyhow, bail};
use clap::Parser;
use console::style;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;

use aidoc::buffer::DocumentBuffer;
use aidoc::cli::Cli;
use aidoc::client;
use aidoc::config::{self, Config};
use aidoc::diff;
use aidoc::documenter::{BatchReport, Documenter, RatePolicy};
use aidoc::generator::{DocGenerator, MockGenerator, OpenRouterGenerator};
use aidoc::language::{self, LanguageProfile};
use aidoc::scanner;
use aidoc::span_extractor::ScanOptions;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = config::load_or_create()?;
    apply_overrides(&mut config, &cli);

    let profile = resolve_profile(&cli, &config)?;
    let scan_options = ScanOptions {
        delimiter_context: config.delimiter_context,
    };

    if cli.list {
        return list_elements(&cli.path, profile, scan_options);
    }

    println!("Backend: {:?}", config.backend);
    println!("Model: {}", config.model);

    let documenter = Documenter::new(
        build_generator(&config)?,
        profile,
        RatePolicy::from_config(&config),
        scan_options,
        config.replace_existing,
    );

    let cancel = CancellationToken::new();
    spawn_interrupt_handler(cancel.clone());

    if cli.path.is_dir() {
        run_directory(&documenter, profile, &cli, &cancel).await
    } else {
        run_single_file(&documenter, &cli, &cancel).await
    }
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(model) = &cli.model {
        config.model = model.clone();
    }
    if let Some(backend) = cli.backend {
        config.backend = backend;
    }
    if cli.replace {
        config.replace_existing = true;
    }
}

/// Picks the language profile: explicit flag first, then the file's
/// extension, then the configured fallback.
fn resolve_profile(cli: &Cli, config: &Config) -> Result<&'static LanguageProfile> {
    if let Some(id) = &cli.language {
        return language::profile_for(id).ok_or_else(|| anyhow!("unsupported language '{id}'"));
    }
    if cli.path.is_file() {
        if let Some(profile) = language::profile_for_path(&cli.path) {
            return Ok(profile);
        }
    }
    language::profile_for(&config.language)
        .ok_or_else(|| anyhow!("unsupported language '{}' in config", config.language))
}

fn build_generator(config: &Config) -> Result<Box<dyn DocGenerator>> {
    if config.backend.has_api_key() {
        let client = client::initialize_client(config)?;
        Ok(Box::new(OpenRouterGenerator::new(
            client,
            config.model.clone(),
            config.system_prompt.clone(),
        )))
    } else {
        let env_var = config.backend.config().api_key_env_var.unwrap_or("API key");
        println!(
            "{} {env_var} is not set, generating placeholder documentation instead",
            style("Note:").yellow()
        );
        Ok(Box::new(MockGenerator))
    }
}

fn spawn_interrupt_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!(
                "\n{} stopping after the current element; finished documentation will still be applied",
                style("Interrupted:").yellow().bold()
            );
            cancel.cancel();
        }
    });
}

fn list_elements(
    path: &Path,
    profile: &'static LanguageProfile,
    options: ScanOptions,
) -> Result<()> {
    if path.is_dir() {
        bail!("--list expects a single file, got directory '{}'", path.display());
    }
    let buffer = DocumentBuffer::open(path.to_path_buf())?;
    let elements = scanner::scan_all(buffer.lines(), profile, options);
    println!("{}", serde_json::to_string_pretty(&elements)?);
    Ok(())
}

async fn run_single_file(
    documenter: &Documenter,
    cli: &Cli,
    cancel: &CancellationToken,
) -> Result<()> {
    if let Some(line) = cli.line {
        return document_at_line(documenter, cli, line).await;
    }

    let pending = {
        let buffer = DocumentBuffer::open(cli.path.clone())?;
        pending_count(buffer.lines(), documenter)
    };
    if pending == 0 {
        println!("Nothing to document in {}", cli.path.display());
        return Ok(());
    }
    let question = format!(
        "Found {pending} elements to document in {}. Generate documentation for all?",
        cli.path.display()
    );
    if !cli.yes && !confirm(&question)? {
        println!("{}", style("Aborted.").yellow());
        return Ok(());
    }

    let report = document_one(documenter, cli.path.clone(), cli.dry_run, cancel).await?;
    print_report(&report, cli.dry_run);
    Ok(())
}

async fn document_at_line(documenter: &Documenter, cli: &Cli, line: usize) -> Result<()> {
    if line == 0 {
        bail!("--line is 1-based; line numbers start at 1");
    }
    let mut buffer = DocumentBuffer::open(cli.path.clone())?;
    let before = buffer.lines().to_vec();

    match documenter.document_at_cursor(&mut buffer, line - 1).await? {
        Some(element) => {
            println!(
                "{} {} {}",
                style("Documented").green().bold(),
                element.kind,
                style(&element.name).bold()
            );
            if cli.dry_run {
                println!("{}", diff::render_diff(&before, buffer.lines()));
                println!("{} dry run, file not modified", style("Note:").yellow());
            } else {
                buffer.save()?;
                println!("{} {}", style("Wrote").green().bold(), buffer.path.display());
            }
        }
        None => println!(
            "{} no documentable element found at or above line {line}",
            style("Note:").yellow()
        ),
    }
    Ok(())
}

async fn run_directory(
    documenter: &Documenter,
    profile: &'static LanguageProfile,
    cli: &Cli,
    cancel: &CancellationToken,
) -> Result<()> {
    if cli.line.is_some() {
        bail!("--line expects a single file, got directory '{}'", cli.path.display());
    }
    let files = collect_source_files(&cli.path, profile)?;
    if files.is_empty() {
        println!(
            "No {} files found under {}",
            profile.display_name,
            cli.path.display()
        );
        return Ok(());
    }
    let question = format!(
        "Found {} {} files under {}. Generate documentation for all?",
        files.len(),
        profile.display_name,
        cli.path.display()
    );
    if !cli.yes && !confirm(&question)? {
        println!("{}", style("Aborted.").yellow());
        return Ok(());
    }

    let mut totals = BatchReport::default();
    for path in files {
        if cancel.is_cancelled() {
            totals.cancelled = true;
            break;
        }
        println!("{} {}", style("Documenting").cyan().bold(), path.display());
        match document_one(documenter, path.clone(), cli.dry_run, cancel).await {
            Ok(report) => {
                totals.documented += report.documented;
                totals.failed += report.failed;
                totals.skipped += report.skipped;
                totals.cancelled |= report.cancelled;
            }
            Err(error) => {
                eprintln!("{} {}: {error:#}", style("Error:").red(), path.display());
            }
        }
    }
    print_report(&totals, cli.dry_run);
    Ok(())
}

/// Runs the whole-buffer workflow on one file and writes the result back,
/// or prints a diff instead when `dry_run` is set.
async fn document_one(
    documenter: &Documenter,
    path: PathBuf,
    dry_run: bool,
    cancel: &CancellationToken,
) -> Result<BatchReport> {
    let mut buffer = DocumentBuffer::open(path)?;
    let before = buffer.lines().to_vec();
    let report = documenter.document_buffer(&mut buffer, cancel).await?;
    if report.documented > 0 {
        if dry_run {
            println!("{}", diff::render_diff(&before, buffer.lines()));
        } else {
            buffer.save()?;
        }
    }
    Ok(report)
}

fn pending_count(lines: &[String], documenter: &Documenter) -> usize {
    scanner::scan_all(lines, documenter.profile(), documenter.scan_options())
        .into_iter()
        .filter(|element| documenter.replaces_existing() || !element.has_documentation)
        .count()
}

fn collect_source_files(root: &Path, profile: &'static LanguageProfile) -> Result<Vec<PathBuf>> {
    let walker = ignore::WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(true)
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().map(|ft| ft.is_file()).unwrap_or(false) {
            continue;
        }
        let matches =
            language::profile_for_path(entry.path()).is_some_and(|found| found.id == profile.id);
        if matches {
            files.push(entry.path().to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

fn confirm(question: &str) -> Result<bool> {
    print!("\x07{} ", style(format!("{question} [Y/n]")).dim());
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(!answer.trim().eq_ignore_ascii_case("n"))
}

fn print_report(report: &BatchReport, dry_run: bool) {
    let mut parts = vec![format!("{} documented", report.documented)];
    if report.failed > 0 {
        parts.push(format!("{} failed", report.failed));
    }
    if report.skipped > 0 {
        parts.push(format!("{} already documented", report.skipped));
    }
    println!("{} {}", style("Done:").green().bold(), parts.join(", "));
    if report.cancelled {
        println!(
            "{} run was interrupted; earlier results were kept",
            style("Note:").yellow()
        );
    }
    if dry_run {
        println!("{} dry run, no files were modified", style("Note:").yellow());
    }
}
