use std::collections::BTreeMap;

use super::messages::RecognitionResult;

/// One inbound recognition update, reduced to what reconciliation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub sn: u32,
    pub text: String,
    pub mode: FragmentMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentMode {
    /// Insert or overwrite the entry at this fragment's sn.
    Append,
    /// Invalidate every entry with sn in [start, end], then insert.
    Replace { start: u32, end: u32 },
}

impl Fragment {
    /// Reduce a wire-format result to a reconcilable fragment. A `pgs` other
    /// than "rpl", or a malformed range, degrades to append mode.
    pub fn from_result(result: &RecognitionResult) -> Self {
        let mode = match (result.pgs.as_deref(), result.rg.as_deref()) {
            (Some("rpl"), Some([start, end])) => FragmentMode::Replace {
                start: *start,
                end: *end,
            },
            _ => FragmentMode::Append,
        };

        Self {
            sn: result.sn,
            text: result.text(),
            mode,
        }
    }
}

/// The evolving best transcript, keyed by segment sequence number.
///
/// The service may retroactively correct earlier partial guesses, so naive
/// concatenation of every fragment ever seen would duplicate text. A replace
/// fragment drops the entries its range invalidates before inserting its own
/// text; the final transcript reads the surviving entries in ascending sn
/// order, which the map maintains for free.
#[derive(Debug, Default)]
pub struct TranscriptState {
    segments: BTreeMap<u32, String>,
}

impl TranscriptState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, fragment: Fragment) {
        if let FragmentMode::Replace { start, end } = fragment.mode {
            // An inverted range clamps to the single point at start. Ranges
            // referencing unknown sn values are a no-op for the removal.
            let end = end.max(start);
            self.segments.retain(|sn, _| *sn < start || *sn > end);
        }
        self.segments.insert(fragment.sn, fragment.text);
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Concatenation of the surviving segments in ascending sn order.
    pub fn transcript(&self) -> String {
        self.segments.values().map(String::as_str).collect()
    }
}
