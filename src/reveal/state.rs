//! Boot-sequence typing as an explicit `(state, event) -> state` function.

use crate::foundation::error::{MotionError, MotionResult};

/// Ordered lines revealed one character at a time.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct BootScript {
    lines: Vec<String>,
    // Character counts; lines may contain non-ASCII glyphs.
    lens: Vec<usize>,
}

impl BootScript {
    pub fn new<I, S>(lines: I) -> MotionResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        if let Some(bad) = lines.iter().find(|l| l.contains('\n')) {
            return Err(MotionError::configuration(format!(
                "boot line must be a single line: {bad:?}"
            )));
        }
        let lens = lines.iter().map(|l| l.chars().count()).collect();
        Ok(Self { lines, lens })
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Character length of line `i` (0 past the end).
    pub fn line_len(&self, i: usize) -> usize {
        self.lens.get(i).copied().unwrap_or(0)
    }

    /// Number of reveal ticks the whole script needs.
    pub fn total_chars(&self) -> usize {
        self.lens.iter().sum()
    }

    /// First `chars` characters of line `i`.
    pub fn prefix(&self, i: usize, chars: usize) -> &str {
        let Some(line) = self.lines.get(i) else {
            return "";
        };
        match line.char_indices().nth(chars) {
            Some((byte, _)) => &line[..byte],
            None => line,
        }
    }
}

impl TryFrom<Vec<String>> for BootScript {
    type Error = MotionError;

    fn try_from(lines: Vec<String>) -> MotionResult<Self> {
        Self::new(lines)
    }
}

impl From<BootScript> for Vec<String> {
    fn from(s: BootScript) -> Self {
        s.lines
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum RevealState {
    /// Not mounted yet.
    Idle,
    /// `(line, revealed_chars)`.
    RevealingLine(usize, usize),
    /// Line fully shown; waiting out the post-line pause.
    LineComplete(usize),
    SequenceComplete,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealEvent {
    Start,
    Tick,
    LineFilled,
    PauseElapsed,
}

impl RevealState {
    pub fn initial() -> Self {
        Self::RevealingLine(0, 0)
    }

    /// Pure transition. Events that do not apply to the current state leave it unchanged.
    pub fn step(self, event: RevealEvent, script: &BootScript) -> Self {
        match (self, event) {
            (Self::Idle, RevealEvent::Start) => {
                if script.is_empty() {
                    Self::SequenceComplete
                } else {
                    Self::initial()
                }
            }
            (Self::RevealingLine(i, k), RevealEvent::Tick) if k < script.line_len(i) => {
                Self::RevealingLine(i, k + 1)
            }
            (Self::RevealingLine(i, k), RevealEvent::LineFilled) if k >= script.line_len(i) => {
                Self::LineComplete(i)
            }
            (Self::LineComplete(i), RevealEvent::PauseElapsed) => {
                if i + 1 < script.len() {
                    Self::RevealingLine(i + 1, 0)
                } else {
                    Self::SequenceComplete
                }
            }
            (s, _) => s,
        }
    }

    pub fn is_line_full(self, script: &BootScript) -> bool {
        matches!(self, Self::RevealingLine(i, k) if k >= script.line_len(i))
    }

    pub fn is_complete(self) -> bool {
        self == Self::SequenceComplete
    }

    /// Index of the line currently on screen, if any.
    pub fn current_line(self) -> Option<usize> {
        match self {
            Self::RevealingLine(i, _) | Self::LineComplete(i) => Some(i),
            Self::Idle | Self::SequenceComplete => None,
        }
    }

    /// Text of the current line revealed so far.
    pub fn revealed_text(self, script: &BootScript) -> &str {
        match self {
            Self::RevealingLine(i, k) => script.prefix(i, k),
            Self::LineComplete(i) => script.prefix(i, script.line_len(i)),
            Self::Idle | Self::SequenceComplete => "",
        }
    }

    /// Every line visible on the boot overlay: finished lines plus the partial one.
    pub fn transcript(self, script: &BootScript) -> Vec<&str> {
        match self {
            Self::Idle => Vec::new(),
            Self::SequenceComplete => script.lines().iter().map(String::as_str).collect(),
            Self::RevealingLine(i, _) | Self::LineComplete(i) => {
                let mut out: Vec<&str> = script.lines()[..i.min(script.len())]
                    .iter()
                    .map(String::as_str)
                    .collect();
                out.push(self.revealed_text(script));
                out
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/state.rs"]
mod tests;
