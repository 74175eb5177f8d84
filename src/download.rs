// src/download.rs
//
// Sequential download + transcode. A target that already exists is skipped
// without touching the network; nothing checks whether it is complete.

use std::path::{Path, PathBuf};

use crate::audio;
use crate::core::Fetch;
use crate::error::Result;
use crate::file::{ensure_directory, ext_hint, wav_path_for};
use crate::progress::Progress;
use crate::specs::audio_table::file_name;

/// What a download pass did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DownloadSummary {
    pub downloaded: usize,
    pub skipped: usize,
    /// Every target path, fetched or skipped, in URL order
    pub files: Vec<PathBuf>,
}

/// Fetch every URL in order into `audio_dir/<stem>.wav`.
/// The first failing request or transcode aborts the pass.
pub fn download_all(
    fetcher: &dyn Fetch,
    urls: &[String],
    audio_dir: &Path,
    target_rate: u32,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Result<DownloadSummary> {
    ensure_directory(audio_dir)?;
    if let Some(p) = progress.as_deref_mut() {
        p.begin(urls.len());
    }

    let mut summary = DownloadSummary::default();
    for url in urls {
        let name = file_name(url);
        let out_path = wav_path_for(audio_dir, url);

        if out_path.exists() {
            logd!("{} exists, skipping {name}", out_path.display());
            if let Some(p) = progress.as_deref_mut() {
                p.item_skipped(name);
            }
            summary.skipped += 1;
            summary.files.push(out_path);
            continue;
        }

        match fetch_one(fetcher, url, &out_path, target_rate) {
            Ok(()) => {
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(name);
                }
                summary.downloaded += 1;
                summary.files.push(out_path);
            }
            Err(e) => {
                loge!("{name}: {e}");
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(name);
                    p.finish();
                }
                return Err(e);
            }
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    logf!("Downloaded {}, skipped {}", summary.downloaded, summary.skipped);
    Ok(summary)
}

fn fetch_one(fetcher: &dyn Fetch, url: &str, out_path: &Path, target_rate: u32) -> Result<()> {
    logf!("Downloading {}", file_name(url));
    let bytes = fetcher.get_bytes(url)?;
    logd!("Converting {} bytes to {}", bytes.len(), out_path.display());
    let info = audio::transcode_to_wav(bytes, ext_hint(url), out_path, target_rate)?;
    logd!("{} frames at {}Hz", info.frames, info.sample_rate);
    Ok(())
}
