use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::Semaphore;

use tablift::{ExtractOutcome, ExtractReport, Extractor, SinkFormat, Thresholds};

use super::output::{artifact_dirs, print_artifacts, write_artifacts};
use super::read_input;

/// Exit status when at least one input contained no tables.
pub const EXIT_NO_TABLES: u8 = 2;

pub async fn cmd_extract(
    inputs: &[String],
    format: SinkFormat,
    output: Option<PathBuf>,
    parallel: usize,
    thresholds: Thresholds,
) -> Result<ExitCode> {
    let extractor = Arc::new(Extractor::new(thresholds));
    let semaphore = Arc::new(Semaphore::new(parallel.max(1)));

    if inputs.len() > 1 {
        eprintln!(
            "📦 Extracting tables from {} documents (concurrency: {})",
            inputs.len(),
            parallel.max(1)
        );
    }

    let mut handles = Vec::with_capacity(inputs.len());
    for input in inputs {
        let sem = Arc::clone(&semaphore);
        let extractor = Arc::clone(&extractor);
        let input = input.clone();

        handles.push(tokio::spawn(async move {
            let _permit = sem.acquire_owned().await?;
            let (name, bytes) = tokio::task::spawn_blocking(move || read_input(&input))
                .await
                .context("input reader panicked")??;
            let result = extractor.extract_blocking(name, bytes).await?;
            anyhow::Ok(result)
        }));
    }

    let multiple = inputs.len() > 1;
    let dirs = output.as_deref().map(|dir| artifact_dirs(dir, inputs));
    let sink = format.sink();
    let mut missing = 0usize;

    // Results are reported in input order regardless of completion order.
    for (i, (input, handle)) in inputs.iter().zip(handles).enumerate() {
        let (outcome, report) = handle
            .await
            .context("extraction task panicked")?
            .with_context(|| format!("failed to extract tables from {input}"))?;
        log_report(input, &report);

        let tables = match outcome {
            ExtractOutcome::Tables(tables) => tables,
            ExtractOutcome::NoTables => {
                eprintln!("❌ No tables detected in {input}");
                missing += 1;
                continue;
            }
        };

        let artifacts = sink.render(&tables)?;
        match &dirs {
            Some(dirs) => {
                write_artifacts(&artifacts, &dirs[i])?;
            }
            None => {
                if multiple {
                    println!("==> {input} <==");
                }
                print_artifacts(&artifacts)?;
            }
        }
    }

    if missing > 0 {
        Ok(ExitCode::from(EXIT_NO_TABLES))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn log_report(input: &str, report: &ExtractReport) {
    tracing::info!(
        "{input}: {} tables from {} rows ({} tokens, {} pages) in {:.1}ms",
        report.tables,
        report.rows,
        report.tokens,
        report.pages,
        report.elapsed_ms
    );
}
