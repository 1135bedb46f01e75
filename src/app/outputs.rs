//! Change-only commit of the digital output lines.

use super::ports::{OutputLine, OutputPort};

/// Remembers the last level written to each line and skips rewrites.
#[derive(Debug, Default)]
pub struct OutputCommitter {
    /// `None` until the line has been written once.
    last: [Option<bool>; OutputLine::COUNT],
}

impl OutputCommitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write every line whose level differs from the last commit.
    /// Returns the number of pin writes issued.
    pub fn commit(&mut self, port: &mut impl OutputPort, lines: &[(OutputLine, bool)]) -> usize {
        let mut writes = 0;
        for &(line, high) in lines {
            let slot = &mut self.last[line.index()];
            if *slot != Some(high) {
                port.write_line(line, high);
                *slot = Some(high);
                writes += 1;
            }
        }
        writes
    }

    /// Last committed level of `line`.
    pub fn level(&self, line: OutputLine) -> Option<bool> {
        self.last[line.index()]
    }
}
