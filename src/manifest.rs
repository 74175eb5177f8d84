// src/manifest.rs
//
// Train/validation manifests: `key|speaker_id|transcript`, one per line.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::consts::MANIFEST_SEP;
use crate::config::options::ExportOptions;
use crate::data::{Dataset, DatasetEntry};
use crate::error::{Error, Result};
use crate::file::ensure_directory;

/// Two disjoint halves of a shuffled dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<DatasetEntry>,
    pub val: Vec<DatasetEntry>,
}

/* ---------------- Splitting ---------------- */

/// Shuffle with `rng` and cut at `floor(ratio * len)`.
pub fn split<R: Rng + ?Sized>(dataset: Dataset, ratio: f64, rng: &mut R) -> Result<Split> {
    if !(0.0..=1.0).contains(&ratio) {
        return Err(Error::Config(format!("Split ratio must be within [0, 1], got {ratio}")));
    }
    let mut items = dataset.into_entries();
    items.shuffle(rng);

    let total = items.len();
    let split_at = ((total as f64) * ratio).floor() as usize;
    let val = items.split_off(split_at.min(total));

    logd!("Dataset split: {} train, {} validation", items.len(), val.len());
    Ok(Split { train: items, val })
}

/* ---------------- Writing ---------------- */

/// Write one manifest line.
pub fn write_row<W: Write>(mut w: W, entry: &DatasetEntry, speaker_id: u32) -> io::Result<()> {
    writeln!(w, "{}{MANIFEST_SEP}{speaker_id}{MANIFEST_SEP}{}", entry.key, entry.transcript)
}

/// Create/truncate `path` and write every entry in order.
pub fn write_manifest(path: &Path, entries: &[DatasetEntry], speaker_id: u32) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    let mut out = BufWriter::new(File::create(path)?); // truncate/overwrite
    for e in entries {
        write_row(&mut out, e, speaker_id)?;
    }
    out.flush()?;
    Ok(())
}

/// Write `<name>_train.txt` and `<name>_val.txt`. Returns both paths.
pub fn write_manifests(split: &Split, export: &ExportOptions) -> Result<Vec<PathBuf>> {
    let train = export.train_path();
    let val = export.val_path();

    write_manifest(&train, &split.train, export.speaker_id)?;
    write_manifest(&val, &split.val, export.speaker_id)?;

    logf!("Wrote {} ({} lines)", train.display(), split.train.len());
    logf!("Wrote {} ({} lines)", val.display(), split.val.len());
    Ok(vec![train, val])
}

/* ---------------- Reading ---------------- */

/// One parsed manifest line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRow {
    pub key: String,
    pub speaker_id: String,
    pub transcript: String,
}

/// Parse manifest text. The first two separators split fields, so
/// transcripts may themselves contain `|`. Blank lines and lines with fewer
/// than three fields are dropped.
pub fn parse_rows(text: &str) -> Vec<ManifestRow> {
    text.lines()
        .filter_map(|line| {
            let line = line.strip_suffix('\r').unwrap_or(line);
            let mut parts = line.splitn(3, MANIFEST_SEP);
            let key = parts.next()?;
            let speaker_id = parts.next()?;
            let transcript = parts.next()?;
            if key.is_empty() { return None; }
            Some(ManifestRow {
                key: s!(key),
                speaker_id: s!(speaker_id),
                transcript: s!(transcript),
            })
        })
        .collect()
}

pub fn read_manifest(path: &Path) -> Result<Vec<ManifestRow>> {
    Ok(parse_rows(&fs::read_to_string(path)?))
}
