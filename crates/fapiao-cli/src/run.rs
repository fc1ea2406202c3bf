//! The single batch pass over one directory of e-invoice PDFs.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use fapiao_core::{Corpus, FapiaoConfig, FieldExtractor, InvoiceRecord, PdfTextSource, TextSource};

use crate::export;

pub fn run(dir: &Path, config: &FapiaoConfig) -> anyhow::Result<()> {
    let start = Instant::now();

    let files = scan_documents(dir)?;
    if files.is_empty() {
        anyhow::bail!("no .pdf documents found in {}", dir.display());
    }

    println!(
        "{} Found {} documents to process",
        style("ℹ").blue(),
        files.len()
    );

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} documents",
            )
            .unwrap()
            .progress_chars("=>-"),
    );

    let source = PdfTextSource::new();
    let extractor = FieldExtractor::new();
    let mut corpus = Corpus::new();

    // Every document is processed independently: a defective one is
    // ingested as a failed record, never skipped.
    for path in files {
        let text = source.first_page_text(&path);
        let extraction = extractor.extract(&text);
        let record = InvoiceRecord::new(path.clone(), text, extraction);

        for defect in record.defects() {
            warn!(path = %path.display(), "{}", defect);
        }

        if config.extraction.write_text_dump {
            if let Err(e) = export::write_text_dump(&record) {
                warn!(path = %path.display(), "text dump failed: {}", e);
            }
        }

        corpus.ingest(record);
        pb.inc(1);
    }
    pb.finish_with_message("Complete");

    corpus.rename_all(&config.rename);

    // Timestamped export names, colon-free for the filesystem.
    let stamp = chrono::Local::now().format("%Y-%m-%d %H.%M.%S").to_string();

    if config.export.csv {
        let path = dir.join(format!("{stamp}.csv"));
        export::write_csv(&path, &corpus)
            .with_context(|| format!("writing {}", path.display()))?;
        println!(
            "{} Table written to {}",
            style("✓").green(),
            path.display()
        );
    }

    if config.export.sheet {
        let path = dir.join(format!("{stamp}.xls"));
        export::write_sheet(&path, &corpus)
            .with_context(|| format!("writing {}", path.display()))?;
        println!(
            "{} Workbook written to {}",
            style("✓").green(),
            path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} documents in {:?}",
        style("✓").green(),
        corpus.record_count(),
        start.elapsed()
    );
    println!(
        "   {} canonical, {} duplicate, {} failed",
        style(corpus.group_count()).green(),
        style(corpus.duplicate_count()).yellow(),
        style(corpus.failed_count()).red()
    );

    Ok(())
}

/// Regular files with a case-sensitive `.pdf` extension, non-recursive,
/// in stable lexical order. Canonical selection depends on this order.
fn scan_documents(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().is_some_and(|e| e == "pdf") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
