// src/runner.rs
use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::{
    config::{consts::TARGET_SAMPLE_RATE, options::AppOptions},
    core::Fetch,
    download::{self, DownloadSummary},
    error::Result,
    manifest,
    progress::Progress,
    specs::audio_table,
};

/// Summary of what was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub entries: usize,
    pub train: usize,
    pub val: usize,
    pub downloaded: usize,
    pub skipped: usize,
    pub files_written: Vec<PathBuf>,
}

/// Top-level runner: page → rows → audio → manifests, strictly in that order.
/// `progress` can be None (no UI updates) or Some(&mut impl Progress).
pub fn run(
    opts: &AppOptions,
    fetcher: &dyn Fetch,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Result<RunSummary> {
    opts.validate()?;

    let extraction = audio_table::fetch(fetcher, &opts.scrape.url, &opts.scrape.dataset_root)?;
    if extraction.entries.is_empty() {
        logw!("No audio rows found on {}", opts.scrape.url);
    }
    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("Found {} voice lines", extraction.entries.len()));
    }

    let dl = if opts.scrape.skip_download {
        logf!("Skipping downloads");
        DownloadSummary::default()
    } else {
        download::download_all(
            fetcher,
            &extraction.urls,
            &opts.export.audio_dir(),
            TARGET_SAMPLE_RATE,
            progress.as_deref_mut(),
        )?
    };

    let mut rng = match opts.export.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let entries = extraction.entries.len();
    let split = manifest::split(extraction.entries, opts.export.ratio, &mut rng)?;
    let files_written = manifest::write_manifests(&split, &opts.export)?;

    if let Some(p) = progress.as_deref_mut() {
        for f in &files_written {
            p.log(&format!("Wrote {}", f.display()));
        }
    }

    Ok(RunSummary {
        entries,
        train: split.train.len(),
        val: split.val.len(),
        downloaded: dl.downloaded,
        skipped: dl.skipped,
        files_written,
    })
}
