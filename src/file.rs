// src/file.rs

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::{Error, Result};

/// Create `dir` (and parents) unless it already exists as a directory.
pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        )));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// File name up to its first `.`: `Ibuki_Title.ogg.mp3` → `Ibuki_Title`.
pub fn file_stem(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}

/// Where the wav for a download URL lands: `<audio_dir>/<stem>.wav`.
pub fn wav_path_for(audio_dir: &Path, url: &str) -> PathBuf {
    let name = crate::specs::audio_table::file_name(url);
    audio_dir.join(join!(file_stem(name), ".wav"))
}

/// Extension of the last path segment, used as a decoder hint.
pub fn ext_hint(url: &str) -> Option<&str> {
    let name = crate::specs::audio_table::file_name(url);
    let name = name.split(['?', '#']).next().unwrap_or(name);
    name.rsplit_once('.').map(|(_, ext)| ext).filter(|e| !e.is_empty())
}
