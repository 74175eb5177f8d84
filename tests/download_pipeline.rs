// tests/download_pipeline.rs
//
// Download/transcode and the full run, offline: a fake fetcher serves the
// page and synthetic wav bodies and counts every request.
//
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use voice_scrape::config::options::AppOptions;
use voice_scrape::core::Fetch;
use voice_scrape::download::download_all;
use voice_scrape::error::{Error, Result};
use voice_scrape::manifest::read_manifest;
use voice_scrape::progress::Progress;
use voice_scrape::runner;

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("voice_scrape_dl_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

/// Stereo 44.1kHz tone, 0.2 s.
fn wav_body() -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: 44_100,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cur = Cursor::new(Vec::new());
    {
        let mut w = hound::WavWriter::new(&mut cur, spec).unwrap();
        for i in 0..8_820u32 {
            let s = ((i as f32 * 0.05).sin() * 8_000.0) as i16;
            w.write_sample(s).unwrap();
            w.write_sample(s / 2).unwrap();
        }
        w.finalize().unwrap();
    }
    cur.into_inner()
}

#[derive(Default)]
struct FakeFetcher {
    pages: HashMap<String, String>,
    files: HashMap<String, Vec<u8>>,
    hits: RefCell<Vec<String>>,
}

impl FakeFetcher {
    fn hits_for(&self, url: &str) -> usize {
        self.hits.borrow().iter().filter(|u| u.as_str() == url).count()
    }
}

impl Fetch for FakeFetcher {
    fn get_text(&self, url: &str) -> Result<String> {
        self.hits.borrow_mut().push(url.to_string());
        self.pages.get(url).cloned().ok_or_else(|| Error::Http(format!("404 Not Found for {url}")))
    }
    fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        self.hits.borrow_mut().push(url.to_string());
        self.files.get(url).cloned().ok_or_else(|| Error::Http(format!("404 Not Found for {url}")))
    }
}

#[derive(Default)]
struct Recorder {
    total: usize,
    done: Vec<String>,
    skipped: Vec<String>,
    failed: Vec<String>,
    lines: Vec<String>,
    finished: bool,
}

impl Progress for Recorder {
    fn begin(&mut self, total: usize) { self.total = total; }
    fn log(&mut self, msg: &str) { self.lines.push(msg.into()); }
    fn item_done(&mut self, name: &str) { self.done.push(name.into()); }
    fn item_skipped(&mut self, name: &str) { self.skipped.push(name.into()); }
    fn item_failed(&mut self, name: &str) { self.failed.push(name.into()); }
    fn finish(&mut self) { self.finished = true; }
}

const A: &str = "https://static.wiki.gg/images/transcoded/A.ogg/A.ogg.mp3";
const B: &str = "https://static.wiki.gg/images/transcoded/B.ogg/B.ogg.mp3";

fn fetcher_with_audio() -> FakeFetcher {
    let mut f = FakeFetcher::default();
    f.files.insert(A.into(), wav_body());
    f.files.insert(B.into(), wav_body());
    f
}

#[test]
fn writes_mono_22050_wav_named_by_stem() {
    let dir = tmp_dir("mono");
    let f = fetcher_with_audio();
    let urls = vec![A.to_string()];

    let sum = download_all(&f, &urls, &dir, 22_050, None).unwrap();
    assert_eq!(sum.downloaded, 1);
    assert_eq!(sum.files, vec![dir.join("A.wav")]);

    let reader = hound::WavReader::open(dir.join("A.wav")).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 22_050);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(reader.duration(), 4_410);
    assert!(!dir.join("A.wav.part").exists());
}

#[test]
fn second_pass_fetches_nothing() {
    let dir = tmp_dir("idempotent");
    let f = fetcher_with_audio();
    let urls = vec![A.to_string(), B.to_string()];

    let first = download_all(&f, &urls, &dir, 22_050, None).unwrap();
    assert_eq!((first.downloaded, first.skipped), (2, 0));

    let mut rec = Recorder::default();
    let second = download_all(&f, &urls, &dir, 22_050, Some(&mut rec)).unwrap();
    assert_eq!((second.downloaded, second.skipped), (0, 2));
    assert_eq!(f.hits_for(A), 1);
    assert_eq!(f.hits_for(B), 1);
    assert_eq!(rec.total, 2);
    assert_eq!(rec.skipped, vec!["A.ogg.mp3", "B.ogg.mp3"]);
    assert!(rec.finished);
}

#[test]
fn duplicate_url_in_one_pass_is_fetched_once() {
    let dir = tmp_dir("dup");
    let f = fetcher_with_audio();
    let urls = vec![A.to_string(), A.to_string()];

    let sum = download_all(&f, &urls, &dir, 22_050, None).unwrap();
    assert_eq!((sum.downloaded, sum.skipped), (1, 1));
    assert_eq!(f.hits_for(A), 1);
}

#[test]
fn failed_request_aborts_the_pass() {
    let dir = tmp_dir("fail");
    let f = fetcher_with_audio();
    let missing = "https://static.wiki.gg/images/gone.ogg.mp3".to_string();
    let urls = vec![missing, B.to_string()];

    let mut rec = Recorder::default();
    let err = download_all(&f, &urls, &dir, 22_050, Some(&mut rec)).unwrap_err();
    assert!(matches!(err, Error::Http(_)));
    assert_eq!(rec.failed, vec!["gone.ogg.mp3"]);
    assert!(rec.finished);
    // nothing after the failure is attempted
    assert_eq!(f.hits_for(B), 0);
}

#[test]
fn undecodable_body_is_a_decode_error() {
    let dir = tmp_dir("garbage");
    let mut f = FakeFetcher::default();
    f.files.insert(A.into(), b"<html>rate limited</html>".to_vec());

    let err = download_all(&f, &[A.to_string()], &dir, 22_050, None).unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
    assert!(!dir.join("A.wav").exists());
}

const PAGE_URL: &str = "https://bluearchive.wiki/wiki/Ibuki/audio";

fn page() -> String {
    let cell = |name: &str| format!(
        r#"<span typeof="mw:File"><audio><source src="//static.wiki.gg/images/transcoded/{name}.ogg/{name}.ogg.mp3" data-transcodekey="mp3"/></audio></span>"#
    );
    format!(
        "<table><tr><td>Pair</td><td>{}{}</td><td><p>Hi</p><p>Bye</p></td></tr></table>",
        cell("A"), cell("B")
    )
}

#[test]
fn full_run_writes_audio_and_manifests() {
    let dir = tmp_dir("run");
    let mut f = fetcher_with_audio();
    f.pages.insert(PAGE_URL.into(), page());

    let mut opts = AppOptions::new(PAGE_URL);
    opts.scrape.dataset_root = "data".into();
    opts.export.out_dir = dir.clone();
    opts.export.ratio = 0.5;
    opts.export.seed = Some(3);

    let sum = runner::run(&opts, &f, None).unwrap();
    assert_eq!((sum.entries, sum.train, sum.val), (2, 1, 1));
    assert_eq!(sum.downloaded, 2);
    assert!(dir.join("audio").join("A.wav").exists());
    assert!(dir.join("audio").join("B.wav").exists());

    let mut rows = read_manifest(&dir.join("ibuki_train.txt")).unwrap();
    rows.extend(read_manifest(&dir.join("ibuki_val.txt")).unwrap());
    rows.sort_by(|a, b| a.key.cmp(&b.key));
    let got: Vec<(&str, &str, &str)> = rows.iter()
        .map(|r| (r.key.as_str(), r.speaker_id.as_str(), r.transcript.as_str()))
        .collect();
    assert_eq!(got, vec![("data/A.wav", "11", "Hi"), ("data/B.wav", "11", "Bye")]);
}

#[test]
fn run_reports_progress_through_every_stage() {
    let dir = tmp_dir("run_progress");
    let mut f = fetcher_with_audio();
    f.pages.insert(PAGE_URL.into(), page());

    let mut opts = AppOptions::new(PAGE_URL);
    opts.export.out_dir = dir.clone();
    opts.export.seed = Some(1);

    let mut rec = Recorder::default();
    let sum = runner::run(&opts, &f, Some(&mut rec)).unwrap();

    assert_eq!(sum.downloaded, 2);
    assert_eq!(rec.total, 2);
    assert_eq!(rec.done, vec!["A.ogg.mp3", "B.ogg.mp3"]);
    assert!(rec.failed.is_empty());
    assert!(rec.finished);
    assert_eq!(rec.lines[0], "Found 2 voice lines");
    let wrote: Vec<&String> = rec.lines.iter().filter(|l| l.starts_with("Wrote ")).collect();
    assert_eq!(wrote.len(), 2);
    assert!(wrote[0].ends_with("ibuki_train.txt"));
    assert!(wrote[1].ends_with("ibuki_val.txt"));
}

#[test]
fn skip_download_only_fetches_the_page() {
    let dir = tmp_dir("skip");
    let mut f = fetcher_with_audio();
    f.pages.insert(PAGE_URL.into(), page());

    let mut opts = AppOptions::new(PAGE_URL);
    opts.scrape.skip_download = true;
    opts.export.out_dir = dir.clone();

    let sum = runner::run(&opts, &f, None).unwrap();
    assert_eq!(sum.entries, 2);
    assert_eq!(sum.downloaded, 0);
    assert_eq!(f.hits.borrow().as_slice(), [PAGE_URL.to_string()]);
    assert!(dir.join("ibuki_train.txt").exists());
}

#[test]
fn bad_ratio_fails_before_any_request() {
    let f = FakeFetcher::default();
    let mut opts = AppOptions::new(PAGE_URL);
    opts.export.ratio = 2.0;

    assert!(matches!(runner::run(&opts, &f, None), Err(Error::Config(_))));
    assert!(f.hits.borrow().is_empty());
}

#[test]
fn page_error_is_fatal() {
    let f = FakeFetcher::default();
    let dir = tmp_dir("nopage");
    let mut opts = AppOptions::new(PAGE_URL);
    opts.export.out_dir = dir.clone();

    assert!(matches!(runner::run(&opts, &f, None), Err(Error::Http(_))));
    assert!(!dir.join("ibuki_train.txt").exists());
}
