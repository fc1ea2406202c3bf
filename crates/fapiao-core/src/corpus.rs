//! Identity grouping, classification and the rename policy.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::Local;
use tracing::{debug, info, warn};

use crate::models::config::RenameConfig;
use crate::models::record::InvoiceRecord;

/// Final classification of a record within its batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// First record seen for its identity; exported.
    Canonical,
    /// Later record sharing an identity; renamed only.
    Duplicate {
        /// 0-based position within the identity group.
        seq: usize,
    },
    /// Extraction failed; renamed only.
    Failed {
        /// 0-based position within the failed bucket.
        seq: usize,
    },
}

struct Group {
    records: Vec<InvoiceRecord>,
}

/// The batch of ingested records, grouped by identity.
///
/// Records with a key are grouped in ingestion order, first element
/// canonical. Failed records all land in a dedicated bucket and are
/// never canonical, never exported.
#[derive(Default)]
pub struct Corpus {
    groups: Vec<Group>,
    index: HashMap<String, usize>,
    failed: Vec<InvoiceRecord>,
    renamed: bool,
}

impl Corpus {
    /// Create an empty corpus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest one record. Grouping follows ingestion order: the first
    /// record seen for a key becomes that group's canonical record.
    pub fn ingest(&mut self, record: InvoiceRecord) {
        match record.identity.key() {
            Some(key) => {
                if let Some(&i) = self.index.get(key) {
                    debug!(key, "duplicate of an already ingested invoice");
                    self.groups[i].records.push(record);
                } else {
                    self.index.insert(key.to_string(), self.groups.len());
                    self.groups.push(Group {
                        records: vec![record],
                    });
                }
            }
            None => self.failed.push(record),
        }
    }

    /// The canonical record of every non-failed group, in
    /// group-insertion order. This is the export row set.
    pub fn canonical_records(&self) -> impl Iterator<Item = &InvoiceRecord> {
        self.groups.iter().filter_map(|g| g.records.first())
    }

    /// Every record with its classification, groups first (ingestion
    /// order within each group), then the failed bucket.
    pub fn classified(&self) -> impl Iterator<Item = (&InvoiceRecord, Classification)> {
        let keyed = self.groups.iter().flat_map(|g| {
            g.records.iter().enumerate().map(|(seq, r)| {
                let class = if seq == 0 {
                    Classification::Canonical
                } else {
                    Classification::Duplicate { seq }
                };
                (r, class)
            })
        });
        let failed = self
            .failed
            .iter()
            .enumerate()
            .map(|(seq, r)| (r, Classification::Failed { seq }));
        keyed.chain(failed)
    }

    /// Number of non-failed identity groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of duplicate records across all groups.
    pub fn duplicate_count(&self) -> usize {
        self.groups.iter().map(|g| g.records.len() - 1).sum()
    }

    /// Number of failed records.
    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    /// Total number of ingested records.
    pub fn record_count(&self) -> usize {
        self.groups.iter().map(|g| g.records.len()).sum::<usize>() + self.failed.len()
    }

    /// Rename every record exactly once according to its final
    /// classification, in place in its directory. A rename failure is
    /// logged and skipped; renames already performed are never undone.
    pub fn rename_all(&mut self, cfg: &RenameConfig) {
        if self.renamed {
            warn!("rename_all called twice, ignoring second call");
            return;
        }
        self.renamed = true;

        for group in &mut self.groups {
            for (seq, record) in group.records.iter_mut().enumerate() {
                let name = if seq == 0 {
                    canonical_name(record, cfg)
                } else {
                    duplicate_name(record, seq, cfg)
                };
                rename_record(record, &name);
            }
        }

        for (seq, record) in self.failed.iter_mut().enumerate() {
            let name = failed_name(record, seq, cfg);
            rename_record(record, &name);
        }
    }
}

/// Canonical target name: every field value in declared order, joined
/// by the separator, original extension retained. Falls back to a
/// disambiguated name if the target already exists on disk.
fn canonical_name(record: &InvoiceRecord, cfg: &RenameConfig) -> String {
    let name = format!(
        "{}.{}",
        record.fields.to_row().join(&cfg.separator),
        extension_of(record)
    );

    let dir = parent_of(record);
    let target = dir.join(&name);
    if target.exists() && target != record.source_path {
        // Same outcome as duplicate detection: keep the occupant, take
        // a timestamped name instead of overwriting or erroring.
        info!(target = %target.display(), "canonical target exists, using fallback name");
        return fallback_name(record, cfg);
    }
    name
}

/// Collision fallback: invoice number plus a precise timestamp.
fn fallback_name(record: &InvoiceRecord, cfg: &RenameConfig) -> String {
    let number = record.fields.number.as_deref().unwrap_or("");
    let stamp = Local::now().format("%Y%m%d%H%M%S%3f");
    format!(
        "{}{}{}.{}",
        number,
        cfg.separator,
        stamp,
        extension_of(record)
    )
}

/// Duplicate target name: tag, invoice code, invoice number and the
/// 0-based sequence number within the group.
fn duplicate_name(record: &InvoiceRecord, seq: usize, cfg: &RenameConfig) -> String {
    let sep = &cfg.separator;
    format!(
        "{}{sep}{}{sep}{}{sep}{:02}.{}",
        cfg.duplicate_tag,
        record.fields.code.as_deref().unwrap_or(""),
        record.fields.number.as_deref().unwrap_or(""),
        seq,
        extension_of(record)
    )
}

/// Failed target name: tag, a sanitized fragment of the original file
/// stem and the 0-based sequence number within the failed bucket. No
/// extracted field is relied on.
fn failed_name(record: &InvoiceRecord, seq: usize, cfg: &RenameConfig) -> String {
    let sep = &cfg.separator;
    format!(
        "{}{sep}{}{sep}{:02}.{}",
        cfg.failure_tag,
        sanitized_stem(&record.source_path),
        seq,
        extension_of(record)
    )
}

fn sanitized_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-')
        .take(32)
        .collect()
}

fn extension_of(record: &InvoiceRecord) -> String {
    record
        .source_path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("pdf")
        .to_string()
}

fn parent_of(record: &InvoiceRecord) -> &Path {
    record.source_path.parent().unwrap_or(Path::new("."))
}

fn rename_record(record: &mut InvoiceRecord, file_name: &str) {
    let target = parent_of(record).join(file_name);
    if target == record.source_path {
        return;
    }
    match fs::rename(&record.source_path, &target) {
        Ok(()) => {
            debug!(
                from = %record.source_path.display(),
                to = %target.display(),
                "renamed"
            );
            record.source_path = target;
        }
        Err(e) => {
            warn!(path = %record.source_path.display(), "rename failed: {}", e);
        }
    }
}
