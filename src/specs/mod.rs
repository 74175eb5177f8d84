//! # Page specs
//!
//! Page-specific extraction: *where the ground truth lives in the HTML* and
//! *how to read it robustly*.
//!
//! ## What lives here
//! - **Pure HTML parsing** of the fetched wiki page, built on `core::html`
//!   (case-insensitive tag blocks, attribute lookup, tag stripping, entity and
//!   whitespace normalization).
//! - **Pairing policy** between audio variants and transcript lines.
//! - **Light shaping** of results into an [`audio_table::Extraction`]:
//!   an ordered key → transcript `Dataset` plus the parallel URL list.
//!
//! ## What does **not** live here
//! - Downloading and transcoding audio (`download`, `audio`).
//! - Shuffling, splitting and writing manifests (`manifest`).
//!
//! ## Typical call chain
//! ```text
//! runner::run → specs::audio_table::fetch → core::net (page HTML)
//!                                        ↘ extract → Extraction
//!             → download::download_all(urls) → manifest::split / write_manifests
//! ```
//!
//! ## Conventions & invariants
//! - Rows that fail the shape check (fewer than two cells, no file marker) are
//!   skipped without noise; a marker with no mp3 variant is skipped with a warning.
//! - `urls[i]` is the download for the i-th pair produced, in document order.
//!
//! ## Testing notes
//! - Extraction is offline and pure; tests feed inline HTML fixtures.
pub mod audio_table;
