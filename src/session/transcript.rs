// Captured console output for the session

/// Who produced a transcript line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Program output
    Output,
    /// Echo of what the user typed
    Input,
    /// Result of an integrity check that found tampering, or the win banner
    Alert,
}

/// A line of transcript output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptLine {
    pub text: String,
    pub kind: LineKind,
}

/// Mock terminal recording everything the session prints
#[derive(Debug, Clone)]
pub struct Transcript {
    pub lines: Vec<TranscriptLine>,
    /// Index of the first line not yet drained by [`Transcript::take_pending`]
    flushed: usize,
}

impl Transcript {
    pub fn new() -> Self {
        Transcript {
            lines: Vec::new(),
            flushed: 0,
        }
    }

    /// Record text, splitting embedded newlines into separate lines
    pub fn print(&mut self, text: impl AsRef<str>, kind: LineKind) {
        for line in text.as_ref().split('\n') {
            self.lines.push(TranscriptLine {
                text: line.to_string(),
                kind,
            });
        }
    }

    pub fn output(&mut self, text: impl AsRef<str>) {
        self.print(text, LineKind::Output);
    }

    pub fn alert(&mut self, text: impl AsRef<str>) {
        self.print(text, LineKind::Alert);
    }

    pub fn echo(&mut self, text: impl AsRef<str>) {
        self.print(text, LineKind::Input);
    }

    /// Get all lines as plain strings
    pub fn get_output(&self) -> Vec<String> {
        self.lines.iter().map(|l| l.text.clone()).collect()
    }

    /// Lines recorded since the last call, for streaming front-ends
    pub fn take_pending(&mut self) -> &[TranscriptLine] {
        let start = self.flushed;
        self.flushed = self.lines.len();
        &self.lines[start..]
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiline_print_splits() {
        let mut t = Transcript::new();
        t.output("a\nb");
        assert_eq!(t.get_output(), vec!["a", "b"]);
    }

    #[test]
    fn test_take_pending_drains_once() {
        let mut t = Transcript::new();
        t.output("first");
        assert_eq!(t.take_pending().len(), 1);
        assert!(t.take_pending().is_empty());
        t.alert("second");
        let pending = t.take_pending();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].kind, LineKind::Alert);
    }
}
