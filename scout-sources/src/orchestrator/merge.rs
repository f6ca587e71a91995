//! Record merging by business name.
//!
//! Groups records from every source by exact name, keeping the first
//! record seen for each name and filling its empty fields from later
//! records. Tracks which sources contributed each name.

use std::collections::HashMap;

use crate::types::{CompanyRecord, SourceKind};

/// A company after merging, with the sources that mentioned it.
#[derive(Debug, Clone)]
pub struct MergedRecord {
    /// The enriched record.
    pub record: CompanyRecord,
    /// Every source that returned this name, in merge order.
    pub sources: Vec<SourceKind>,
}

/// Merge per-source batches into one deduplicated list.
///
/// Batches are applied in the order given, which must be source priority
/// order. Records with a blank name are dropped. The first record for a
/// name is inserted as-is; later records only fill fields that are still
/// empty (see [`CompanyRecord::enrich_from`]).
///
/// The output preserves first-seen order of distinct names.
pub fn merge_records<I>(batches: I) -> Vec<MergedRecord>
where
    I: IntoIterator<Item = (SourceKind, Vec<CompanyRecord>)>,
{
    let mut merged: Vec<MergedRecord> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (source, records) in batches {
        for record in records {
            if !record.has_name() {
                continue;
            }
            match index.get(&record.name).copied() {
                Some(slot) => {
                    let entry = &mut merged[slot];
                    entry.record.enrich_from(&record);
                    if !entry.sources.contains(&source) {
                        entry.sources.push(source);
                    }
                }
                None => {
                    index.insert(record.name.clone(), merged.len());
                    merged.push(MergedRecord {
                        record,
                        sources: vec![source],
                    });
                }
            }
        }
    }

    merged
}
