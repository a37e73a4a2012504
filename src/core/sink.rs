//! Collaborators a run reports through. Closures implement both traits, so
//! callers can pass `|block: &str| ...` or `|done, total| ...` directly.

/// Receives the whole run transcript once, at the end of a run.
pub trait LogSink {
    fn deliver(&mut self, block: &str);
}

/// Receives `(processed, total)` after every examined file.
pub trait ProgressSink {
    fn report(&mut self, processed: usize, total: usize);
}

impl<F> LogSink for F
where
    F: FnMut(&str),
{
    fn deliver(&mut self, block: &str) {
        self(block)
    }
}

impl<F> ProgressSink for F
where
    F: FnMut(usize, usize),
{
    fn report(&mut self, processed: usize, total: usize) {
        self(processed, total)
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl LogSink for NullSink {
    fn deliver(&mut self, _block: &str) {}
}

impl ProgressSink for NullSink {
    fn report(&mut self, _processed: usize, _total: usize) {}
}

/// Whole-number percentage for a progress bar; an empty run is complete.
pub fn percent(processed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let clamped = processed.min(total);
    ((clamped * 100) / total) as u8
}
