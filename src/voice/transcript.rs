//! Transcript assembly.

use super::types::ResultBatch;

/// Committed and provisional transcript text of one session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TranscriptBuffer {
    finalized: String,
    interim: String,
}

impl TranscriptBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed text; only ever appended to within a session
    pub fn finalized(&self) -> &str {
        &self.finalized
    }

    /// Live preview from the last event
    pub fn interim(&self) -> &str {
        &self.interim
    }

    /// `finalized + interim`
    pub fn full(&self) -> String {
        format!("{}{}", self.finalized, self.interim)
    }

    pub fn has_finalized(&self) -> bool {
        !self.finalized.is_empty()
    }

    /// Apply one result event.
    ///
    /// Final results from `result_index` onward are appended to `finalized`
    /// without a separator. Interim results from this event alone replace the
    /// previous interim.
    pub fn apply(&mut self, batch: &ResultBatch) -> &TranscriptBuffer {
        let mut interim = String::new();
        for result in batch.delivered() {
            if result.is_final {
                self.finalized.push_str(&result.transcript);
            } else {
                interim.push_str(&result.transcript);
            }
        }
        self.interim = interim;
        self
    }

    pub fn clear(&mut self) {
        self.finalized.clear();
        self.interim.clear();
    }
}

/// Append a voice fragment to an existing text value, inserting one space
/// unless the value is empty or already ends in whitespace
pub fn append_fragment(existing: &str, fragment: &str) -> String {
    let needs_space = !existing.is_empty() && !existing.ends_with(char::is_whitespace);
    let mut out = String::with_capacity(existing.len() + fragment.len() + 1);
    out.push_str(existing);
    if needs_space {
        out.push(' ');
    }
    out.push_str(fragment);
    out
}
