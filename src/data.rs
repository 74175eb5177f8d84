// src/data.rs
//
// In-memory dataset for one run.
//
// - DatasetEntry: manifest key + transcript (speaker id is added at write time).
// - Dataset: insertion-ordered key → transcript map. Re-inserting a key keeps
//            its first position and replaces the transcript (last write wins).

use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DatasetEntry {
    pub key: String,
    pub transcript: String,
}

impl DatasetEntry {
    pub fn new(key: impl Into<String>, transcript: impl Into<String>) -> Self {
        Self { key: key.into(), transcript: transcript.into() }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Dataset {
    entries: Vec<DatasetEntry>,
    index: HashMap<String, usize>,
}

impl Dataset {
    pub fn new() -> Self { Self::default() }

    /// Insert or overwrite. Returns the replaced transcript, if any.
    pub fn insert(&mut self, key: String, transcript: String) -> Option<String> {
        match self.index.get(&key) {
            Some(&ix) => Some(std::mem::replace(&mut self.entries[ix].transcript, transcript)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push(DatasetEntry { key, transcript });
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index.get(key).map(|&ix| self.entries[ix].transcript.as_str())
    }

    #[inline] pub fn len(&self) -> usize { self.entries.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn entries(&self) -> &[DatasetEntry] { &self.entries }

    pub fn into_entries(self) -> Vec<DatasetEntry> { self.entries }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }
}
