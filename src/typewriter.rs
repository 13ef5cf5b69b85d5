#[derive(Clone, Debug)]
pub struct Typewriter {
    chars: Vec<char>,
    typed: usize,
}

impl Typewriter {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            typed: 0,
        }
    }

    pub fn is_done(&self) -> bool {
        self.typed >= self.chars.len()
    }

    /// Reveals one more character and returns everything typed so far.
    pub fn advance(&mut self) -> Option<String> {
        if self.is_done() {
            return None;
        }

        self.typed += 1;
        Some(self.chars[..self.typed].iter().collect())
    }
}

/// Text to show and when, in milliseconds from install.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Keystroke {
    pub at_ms: u32,
    pub text: String,
}

/// First keystroke after `start_delay_ms`, then one every `step_ms`.
pub fn schedule(text: &str, start_delay_ms: u32, step_ms: u32) -> impl Iterator<Item = Keystroke> {
    let mut typewriter = Typewriter::new(text);
    (0u32..).map_while(move |index| {
        typewriter.advance().map(|text| Keystroke {
            at_ms: start_delay_ms + step_ms * index,
            text,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{TYPEWRITER_START_DELAY_MS, TYPEWRITER_STEP_MS, TYPEWRITER_TEXT};

    #[test]
    fn types_hero_text_exactly_once() {
        let mut typewriter = Typewriter::new(TYPEWRITER_TEXT);
        let mut frames = Vec::new();
        while let Some(text) = typewriter.advance() {
            frames.push(text);
        }

        assert_eq!(frames.len(), TYPEWRITER_TEXT.chars().count());
        assert_eq!(frames.last().map(String::as_str), Some(TYPEWRITER_TEXT));
        assert_eq!(
            frames.iter().filter(|text| text.as_str() == TYPEWRITER_TEXT).count(),
            1
        );
        for (index, frame) in frames.iter().enumerate() {
            assert_eq!(frame.chars().count(), index + 1);
            assert!(TYPEWRITER_TEXT.starts_with(frame.as_str()));
        }
        assert!(typewriter.advance().is_none());
    }

    #[test]
    fn hero_schedule_starts_late_then_types_every_step() {
        let keystrokes: Vec<Keystroke> =
            schedule(TYPEWRITER_TEXT, TYPEWRITER_START_DELAY_MS, TYPEWRITER_STEP_MS).collect();
        let times: Vec<u32> = keystrokes.iter().map(|keystroke| keystroke.at_ms).collect();
        let expected: Vec<u32> = (0..28).map(|index| 800 + 50 * index).collect();

        assert_eq!(times, expected);
        assert_eq!(times.last().copied(), Some(2150));
    }

    #[test]
    fn hero_text_is_complete_exactly_once_by_deadline() {
        let deadline = 800 + 50 * 29;
        let shown: Vec<Keystroke> =
            schedule(TYPEWRITER_TEXT, TYPEWRITER_START_DELAY_MS, TYPEWRITER_STEP_MS)
                .take_while(|keystroke| keystroke.at_ms <= deadline)
                .collect();

        assert_eq!(shown.len(), TYPEWRITER_TEXT.chars().count());
        assert_eq!(
            shown
                .iter()
                .filter(|keystroke| keystroke.text == TYPEWRITER_TEXT)
                .count(),
            1
        );
        assert_eq!(shown.last().map(|keystroke| keystroke.text.as_str()), Some(TYPEWRITER_TEXT));
    }

    #[test]
    fn multibyte_characters_are_not_split() {
        let mut typewriter = Typewriter::new("né");
        assert_eq!(typewriter.advance().as_deref(), Some("n"));
        assert_eq!(typewriter.advance().as_deref(), Some("né"));
        assert!(typewriter.is_done());
    }

    #[test]
    fn empty_text_is_done_immediately() {
        let mut typewriter = Typewriter::new("");
        assert!(typewriter.is_done());
        assert!(typewriter.advance().is_none());
    }
}
