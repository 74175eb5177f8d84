// src/progress.rs
/// Lightweight progress reporting used by long-running operations (downloads).
/// The CLI implements this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of items (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One file fetched and transcoded.
    fn item_done(&mut self, _name: &str) {}

    /// One file already on disk; nothing fetched.
    fn item_skipped(&mut self, _name: &str) {}

    /// One file failed; the run aborts right after.
    fn item_failed(&mut self, _name: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}
