//! Run-length labelling over boolean sequences.
//!
//! Both extreme event detection and heatwave flagging are the same
//! two-pass pattern: classify each step, then keep only runs of
//! consecutive classified steps that meet a minimum length. The labelling
//! pass lives here so both use one implementation. The unfiltered run
//! table is public so diagnostics can inspect runs that the duration
//! filter later discards.

/// A maximal run of consecutive `true` steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSpan {
    /// 1-based run identifier in chronological order.
    pub id: u32,
    /// Index of the first step of the run.
    pub start: usize,
    /// Number of steps in the run.
    pub len: usize,
}

impl RunSpan {
    /// Index one past the last step of the run.
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Find every maximal run of `true` steps, ids numbered 1, 2, ... in
/// chronological order.
pub fn label_runs(flags: &[bool]) -> Vec<RunSpan> {
    let mut spans = Vec::new();
    let mut start = None;
    for (i, &flag) in flags.iter().enumerate() {
        match (flag, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                spans.push(RunSpan {
                    id: spans.len() as u32 + 1,
                    start: s,
                    len: i - s,
                });
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        spans.push(RunSpan {
            id: spans.len() as u32 + 1,
            start: s,
            len: flags.len() - s,
        });
    }
    spans
}

/// Per-step run identifiers for runs of at least `min_len` steps; steps
/// outside a qualifying run get 0. Surviving runs keep their original
/// chronological ids, so ids may have gaps after filtering.
pub fn run_ids_with_min_length(flags: &[bool], min_len: usize) -> Vec<u32> {
    let mut ids = vec![0u32; flags.len()];
    for span in label_runs(flags) {
        if span.len < min_len {
            continue;
        }
        for slot in ids.iter_mut().take(span.end()).skip(span.start) {
            *slot = span.id;
        }
    }
    ids
}
