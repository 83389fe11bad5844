//! Line-oriented answer sources.

use std::collections::VecDeque;
use std::io::BufRead;
use std::time::Duration;

use quiz_core::Clock;

use crate::error::InputError;

/// Yields raw answer lines, one per call.
pub trait AnswerSource {
    /// Next line without its terminator, or `None` once input is exhausted.
    ///
    /// # Errors
    ///
    /// Returns `InputError` if the underlying reader fails.
    fn next_line(&mut self) -> Result<Option<String>, InputError>;
}

/// Reads lines from any buffered reader, typically a locked stdin.
#[derive(Debug)]
pub struct LineSource<R> {
    reader: R,
}

impl<R: BufRead> LineSource<R> {
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> AnswerSource for LineSource<R> {
    fn next_line(&mut self) -> Result<Option<String>, InputError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}

/// Scripted input for deterministic tests of the prompt loops.
///
/// Each line may carry a delay; when a clock is attached it is advanced by that delay
/// just before the line is handed out, simulating the user's think time.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    lines: VecDeque<(Duration, String)>,
    clock: Option<Clock>,
}

impl ScriptedInput {
    #[must_use]
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines
                .into_iter()
                .map(|line| (Duration::ZERO, line.into()))
                .collect(),
            clock: None,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Queue a line that arrives immediately.
    #[must_use]
    pub fn line(self, text: impl Into<String>) -> Self {
        self.line_after(Duration::ZERO, text)
    }

    /// Queue a line that arrives after `delay`.
    #[must_use]
    pub fn line_after(mut self, delay: Duration, text: impl Into<String>) -> Self {
        self.lines.push_back((delay, text.into()));
        self
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl AnswerSource for ScriptedInput {
    fn next_line(&mut self) -> Result<Option<String>, InputError> {
        let Some((delay, line)) = self.lines.pop_front() else {
            return Ok(None);
        };
        if let Some(clock) = &self.clock {
            clock.advance(delay);
        }
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_clock;
    use std::io::Cursor;

    #[test]
    fn line_source_strips_terminators() {
        let mut source = LineSource::new(Cursor::new("3\r\nParis\n\nlast"));
        assert_eq!(source.next_line().unwrap().as_deref(), Some("3"));
        assert_eq!(source.next_line().unwrap().as_deref(), Some("Paris"));
        assert_eq!(source.next_line().unwrap().as_deref(), Some(""));
        assert_eq!(source.next_line().unwrap().as_deref(), Some("last"));
        assert_eq!(source.next_line().unwrap(), None);
    }

    #[test]
    fn scripted_input_advances_clock() {
        let clock = fixed_clock();
        let start = clock.mark();
        let mut input = ScriptedInput::default()
            .with_clock(clock.clone())
            .line_after(Duration::from_secs(12), "1")
            .line("2");

        assert_eq!(input.next_line().unwrap().as_deref(), Some("1"));
        assert_eq!(clock.elapsed_since(start), Duration::from_secs(12));
        assert_eq!(input.next_line().unwrap().as_deref(), Some("2"));
        assert_eq!(clock.elapsed_since(start), Duration::from_secs(12));
        assert_eq!(input.next_line().unwrap(), None);
    }

    #[test]
    fn scripted_input_from_iterator() {
        let mut input = ScriptedInput::new(["a", "b"]);
        assert_eq!(input.remaining(), 2);
        assert_eq!(input.next_line().unwrap().as_deref(), Some("a"));
        assert_eq!(input.remaining(), 1);
    }
}
