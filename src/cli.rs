// src/cli.rs
use std::path::PathBuf;

use clap::Parser;

use crate::config::consts::*;
use crate::config::options::{AppOptions, ExportOptions, NetConfig, ScrapeOptions};
use crate::core::HttpClient;
use crate::progress::Progress;
use crate::runner::{self, RunSummary};

/// Scrape audio and transcripts from a wiki voice-line page and build a
/// train/validation dataset for a VITS-style TTS model.
#[derive(Parser, Debug, Clone)]
#[command(name = "voice_scrape", version, about)]
pub struct Args {
    /// Wiki audio page (example: https://bluearchive.wiki/wiki/Ibuki/audio)
    pub url: String,

    /// Speaker id written into every manifest line
    #[arg(long, default_value_t = DEFAULT_SPEAKER_ID)]
    pub id: u32,

    /// Share of entries that go to the training manifest
    #[arg(long, default_value_t = DEFAULT_RATIO)]
    pub ratio: f64,

    /// Manifest name prefix: <name>_train.txt / <name>_val.txt
    #[arg(long, alias = "character_name", default_value = DEFAULT_CHARACTER)]
    pub character_name: String,

    /// Path prefix for manifest keys (empty: bare file names)
    #[arg(long, default_value = DEFAULT_DATASET_ROOT)]
    pub dataset_root: String,

    /// Directory receiving audio/ and the manifests
    #[arg(short, long, default_value = DEFAULT_OUT_DIR)]
    pub out_dir: PathBuf,

    /// Fixed shuffle seed for a reproducible split
    #[arg(long)]
    pub seed: Option<u64>,

    /// Extract and write manifests without fetching audio
    #[arg(long)]
    pub skip_download: bool,

    /// Override the browser user agent
    #[arg(long, env = "VOICE_SCRAPE_USER_AGENT", default_value = USER_AGENT, hide_default_value = true)]
    pub user_agent: String,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn into_options(self) -> AppOptions {
        AppOptions {
            scrape: ScrapeOptions {
                url: self.url,
                dataset_root: self.dataset_root,
                skip_download: self.skip_download,
            },
            export: ExportOptions {
                speaker_id: self.id,
                ratio: self.ratio,
                character_name: self.character_name,
                out_dir: self.out_dir,
                seed: self.seed,
            },
            net: NetConfig { user_agent: self.user_agent, ..NetConfig::default() },
        }
    }
}

/// Prints one line per file to stdout.
#[derive(Default)]
pub struct CliProgress {
    total: usize,
    seen: usize,
}

impl CliProgress {
    fn tick(&mut self, name: &str, status: &str) {
        self.seen += 1;
        println!("[{}/{}] {name} {status}", self.seen, self.total);
    }
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.seen = 0;
        println!("Downloading {total} files...");
    }
    fn log(&mut self, msg: &str) { println!("{msg}"); }
    fn item_done(&mut self, name: &str) { self.tick(name, "ok"); }
    fn item_skipped(&mut self, name: &str) { self.tick(name, "exists, skipped"); }
    fn item_failed(&mut self, name: &str) { self.tick(name, "FAILED"); }
}

/// Parse args, run the pipeline, print the summary.
pub fn run(args: Args) -> crate::error::Result<RunSummary> {
    crate::log::init(args.verbose);
    let opts = args.into_options();

    println!("Wiki Voice Scraper");
    let client = HttpClient::new(&opts.net)?;
    let mut progress = CliProgress::default();
    let summary = runner::run(&opts, &client, Some(&mut progress))?;

    println!(
        "Done: {} entries ({} train / {} val), {} downloaded, {} already present",
        summary.entries, summary.train, summary.val, summary.downloaded, summary.skipped
    );
    Ok(summary)
}
