// src/config/consts.rs

// Net config
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/85.0.4183.121 Safari/537.36";
pub const REQUEST_TIMEOUT_SECS: u64 = 60;

// Scrape
pub const FILE_MARKER_ATTR: &str = "typeof";
pub const FILE_MARKER_VALUE: &str = "mw:File";
pub const TRANSCODE_ATTR: &str = "data-transcodekey";
pub const TRANSCODE_FORMAT: &str = "mp3";
pub const SOURCE_SUFFIX: &str = "ogg.mp3";
pub const KEY_SUFFIX: &str = "wav";

// Audio
pub const AUDIO_DIR: &str = "audio";
pub const TARGET_SAMPLE_RATE: u32 = 22_050;

// Export
pub const DEFAULT_SPEAKER_ID: u32 = 11;
pub const DEFAULT_RATIO: f64 = 0.7;
pub const DEFAULT_CHARACTER: &str = "ibuki";
pub const DEFAULT_DATASET_ROOT: &str = "";
pub const DEFAULT_OUT_DIR: &str = ".";
pub const MANIFEST_SEP: char = '|';
pub const TRAIN_SUFFIX: &str = "_train.txt";
pub const VAL_SUFFIX: &str = "_val.txt";
