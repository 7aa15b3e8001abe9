use std::{fmt, time::SystemTime};

use itertools::Itertools;
use rand::Rng;

use crate::{
    keyboard::{placement_for_key, KeyPlacement},
    language::get_random_words,
    metrics::{calculate_accuracy, calculate_wpm},
    timing::TimingSession,
};

/// Separator placed between words in the text to type.
pub const SEPARATOR: char = ' ';

/// Accuracy shown before anything has been typed.
pub const DEFAULT_ACCURACY: u32 = 100;

/// The full text of a session: words joined by single spaces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalText {
    chars: Vec<char>,
    word_count: usize,
}

impl CanonicalText {
    /// Join `words` with single separators. Empty words and words with
    /// embedded whitespace are dropped so separators only ever sit between
    /// two words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .filter(|w| {
                let w = w.as_ref();
                !w.is_empty() && !w.chars().any(char::is_whitespace)
            })
            .collect::<Vec<S>>();

        let joined = words.iter().map(AsRef::as_ref).join(" ");

        Self {
            chars: joined.chars().collect(),
            word_count: words.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn char_at(&self, pos: usize) -> Option<char> {
        self.chars.get(pos).copied()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }
}

impl fmt::Display for CanonicalText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.chars.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

/// Correct/incorrect outcome for every position behind the cursor.
///
/// Positions are always `0..len()`: an entry exists exactly for the
/// positions already typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeystrokeLog {
    outcomes: Vec<bool>,
}

impl KeystrokeLog {
    pub fn get(&self, pos: usize) -> Option<bool> {
        self.outcomes.get(pos).copied()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, bool)> + '_ {
        self.outcomes.iter().copied().enumerate()
    }

    fn record(&mut self, pos: usize, is_correct: bool) {
        debug_assert_eq!(pos, self.outcomes.len());
        self.outcomes.push(is_correct);
    }

    fn erase(&mut self, pos: usize) {
        debug_assert_eq!(pos + 1, self.outcomes.len());
        self.outcomes.truncate(pos);
    }
}

/// A single keystroke as seen by the session.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyInput {
    Char(char),
    Backspace,
    /// Anything that is neither one printable character nor backspace.
    Ignored,
}

impl KeyInput {
    /// Classify raw input from a host. Pasted text and named keys other than
    /// backspace are ignored.
    pub fn parse(raw: &str) -> Self {
        if raw == "Backspace" {
            return KeyInput::Backspace;
        }

        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => KeyInput::from(c),
            _ => KeyInput::Ignored,
        }
    }
}

impl From<char> for KeyInput {
    fn from(c: char) -> Self {
        match c {
            '\u{8}' | '\u{7f}' => KeyInput::Backspace,
            c if c.is_control() => KeyInput::Ignored,
            c => KeyInput::Char(c),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Progress {
    pub words_completed: usize,
    pub total_words: usize,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DisplayStats {
    pub gross_wpm: u32,
    pub net_wpm: u32,
    pub accuracy: u32,
    pub elapsed_ms: u64,
}

/// The key the user should press next and where it sits under the hands.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct NextKey {
    pub key: char,
    pub placement: Option<KeyPlacement>,
}

/// One practice run: the text, how far the user got, what they got right,
/// and the clock.
///
/// Keystrokes are folded in with [`TypingSession::on_character`], which takes
/// the session by value and returns its successor. Speed, accuracy and
/// progress are computed on demand and never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct TypingSession {
    text: CanonicalText,
    cursor: usize,
    log: KeystrokeLog,
    timing: TimingSession,
    is_complete: bool,
}

/// An empty, already complete session.
impl Default for TypingSession {
    fn default() -> Self {
        Self::over(CanonicalText::default())
    }
}

impl TypingSession {
    /// Draw `word_count` distinct words from `pool` and start a fresh session
    /// over them.
    pub fn initialize<R: Rng + ?Sized>(pool: &[String], word_count: usize, rng: &mut R) -> Self {
        Self::from_words(get_random_words(pool, word_count, rng))
    }

    /// Fresh session over an exact word sequence.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let text = CanonicalText::from_words(words);
        tracing::debug!(
            words = text.word_count(),
            chars = text.len(),
            "typing session initialized"
        );
        Self::over(text)
    }

    fn over(text: CanonicalText) -> Self {
        // nothing to type means nothing left to type
        let is_complete = text.is_empty();
        Self {
            text,
            cursor: 0,
            log: KeystrokeLog::default(),
            timing: TimingSession::new(),
            is_complete,
        }
    }

    /// Apply one keystroke received at `now`.
    pub fn on_character(self, input: KeyInput, now: SystemTime) -> Self {
        if self.is_complete {
            return self;
        }

        match input {
            KeyInput::Char(c) => self.type_char(c, now),
            KeyInput::Backspace => self.erase(),
            KeyInput::Ignored => self,
        }
    }

    fn type_char(mut self, c: char, now: SystemTime) -> Self {
        let Some(expected) = self.text.char_at(self.cursor) else {
            return self;
        };

        if !self.timing.is_running() {
            self.timing = self.timing.start(now);
        }

        let is_correct = c == expected;
        self.log.record(self.cursor, is_correct);
        self.timing = self.timing.add_character(is_correct);
        self.cursor += 1;

        if self.cursor == self.text.len() {
            self.timing = self.timing.stop(now);
            self.is_complete = true;
        }

        self
    }

    // Counters on the timing session are left alone: a corrected error still
    // counts against accuracy.
    fn erase(mut self) -> Self {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.log.erase(self.cursor);
        }
        self
    }

    pub fn progress(&self) -> Progress {
        let consumed = &self.text.chars()[..self.cursor];
        let separators = consumed.iter().filter(|&&c| c == SEPARATOR).count();
        let inside_word = consumed.last().is_some_and(|&c| c != SEPARATOR);

        Progress {
            words_completed: separators + usize::from(inside_word),
            total_words: self.text.word_count(),
        }
    }

    pub fn display_stats(&self, now: SystemTime) -> DisplayStats {
        let timing = &self.timing;

        let elapsed_ms = match timing.start_time() {
            None => 0,
            Some(_) => (timing.duration(now).as_millis() as u64).max(1),
        };

        let (gross_wpm, net_wpm, accuracy) = if timing.character_count() == 0 {
            (0, 0, DEFAULT_ACCURACY)
        } else {
            (
                wpm_or_zero(timing.character_count(), elapsed_ms),
                wpm_or_zero(timing.correct_count(), elapsed_ms),
                calculate_accuracy(timing.character_count(), timing.error_count())
                    .unwrap_or_else(|err| {
                        tracing::error!(%err, "accuracy guard bypassed");
                        DEFAULT_ACCURACY
                    }),
            )
        };

        DisplayStats {
            gross_wpm,
            net_wpm,
            accuracy,
            elapsed_ms,
        }
    }

    pub fn text(&self) -> &CanonicalText {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn log(&self) -> &KeystrokeLog {
        &self.log
    }

    pub fn timing(&self) -> &TimingSession {
        &self.timing
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    pub fn expected_char(&self) -> Option<char> {
        self.text.char_at(self.cursor)
    }

    pub fn next_key(&self) -> Option<NextKey> {
        self.expected_char().map(|key| NextKey {
            key,
            placement: placement_for_key(key),
        })
    }
}

fn wpm_or_zero(characters: u64, elapsed_ms: u64) -> u32 {
    calculate_wpm(characters, elapsed_ms as f64).unwrap_or_else(|err| {
        tracing::error!(%err, "wpm guard bypassed");
        0
    })
}
