use crate::penalty::PenaltyLedger;
use itertools::{EitherOrBoth, Itertools};

/// Lifecycle of a single drawn word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WordState {
    Pending,
    Active,
    Correct,
    Incorrect,
    Skipped,
}

/// Per-character classification, derived from (typed, expected) on demand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharState {
    Untyped,
    Correct,
    Incorrect,
}

/// Live view of the active word while it is still editable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveWordView {
    Untouched,
    Correct,
    Incorrect,
}

/// Result of a separator keypress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Advance {
    Committed { correct: bool, penalty_secs: f64 },
    Skipped { penalty_secs: f64 },
    Ignored,
}

/// Pure derivation of character states. One entry per typed or expected
/// position, whichever is longer; overtyped positions past the word's end
/// count as incorrect, untyped trailing positions stay neutral.
pub fn char_states(typed: &str, expected: &str) -> Vec<CharState> {
    typed
        .chars()
        .zip_longest(expected.chars())
        .map(|pair| match pair {
            EitherOrBoth::Both(t, e) if t == e => CharState::Correct,
            EitherOrBoth::Both(..) | EitherOrBoth::Left(_) => CharState::Incorrect,
            EitherOrBoth::Right(_) => CharState::Untyped,
        })
        .collect()
}

/// Collapses runs of whitespace and drops leading whitespace, so a space can
/// never open a word's input nor follow another pending space.
pub fn sanitize_input(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c.is_whitespace() {
            if out.is_empty() || out.ends_with(' ') {
                continue;
            }
            out.push(' ');
        } else {
            out.push(c);
        }
    }
    out
}

fn correct_prefix(typed: &str, expected: &str) -> String {
    typed
        .chars()
        .zip(expected.chars())
        .take_while(|(t, e)| t == e)
        .map(|(t, _)| t)
        .collect()
}

/// The live state of one typing attempt. Mutated exclusively through the
/// event methods below; a frozen session ignores every event.
#[derive(Debug, Clone)]
pub struct Session {
    words: Vec<String>,
    typed: Vec<String>,
    states: Vec<WordState>,
    word_index: usize,
    current_input: String,
    correct_words: usize,
    incorrect_words: usize,
    completed_words: usize,
    penalties: PenaltyLedger,
    frozen: bool,
}

impl Session {
    pub fn new(words: Vec<String>, penalties_enabled: bool) -> Self {
        assert!(!words.is_empty(), "a session needs at least one word");
        let n = words.len();
        let mut states = vec![WordState::Pending; n];
        states[0] = WordState::Active;
        Self {
            typed: vec![String::new(); n],
            states,
            word_index: 0,
            current_input: String::new(),
            correct_words: 0,
            incorrect_words: 0,
            completed_words: 0,
            penalties: PenaltyLedger::new(penalties_enabled),
            frozen: false,
            words,
        }
    }

    /// Append one character to the active word's input. Whitespace obeys the
    /// double-space guard: never first, never after another space. Returns
    /// the penalty seconds newly charged by this keystroke.
    pub fn push_char(&mut self, c: char) -> f64 {
        if self.frozen || self.exhausted() {
            return 0.0;
        }
        if c.is_whitespace() {
            if self.current_input.is_empty() || self.current_input.ends_with(' ') {
                return 0.0;
            }
            self.current_input.push(' ');
        } else {
            self.current_input.push(c);
        }
        self.charge_mismatches()
    }

    /// Replace the whole in-progress input, for adapters that own a text
    /// buffer. The value is sanitized first. Returns newly charged penalty
    /// seconds.
    pub fn set_input(&mut self, raw: &str) -> f64 {
        if self.frozen || self.exhausted() {
            return 0.0;
        }
        self.current_input = sanitize_input(raw);
        self.charge_mismatches()
    }

    /// Separator pressed: commit the active word if anything was typed,
    /// skip it otherwise. Advances to the next word either way.
    pub fn commit_or_skip(&mut self) -> Advance {
        if self.frozen || self.exhausted() {
            return Advance::Ignored;
        }
        let idx = self.word_index;
        let text = self.current_input.trim().to_string();

        let advance = if text.is_empty() {
            self.states[idx] = WordState::Skipped;
            self.incorrect_words += 1;
            self.typed[idx].clear();
            Advance::Skipped {
                penalty_secs: self.penalties.charge_word(),
            }
        } else {
            let correct = text == self.words[idx];
            if correct {
                self.states[idx] = WordState::Correct;
                self.correct_words += 1;
            } else {
                self.states[idx] = WordState::Incorrect;
                self.incorrect_words += 1;
            }
            self.completed_words += 1;
            self.typed[idx] = text;
            let penalty_secs = if correct {
                0.0
            } else {
                self.penalties.charge_word()
            };
            Advance::Committed {
                correct,
                penalty_secs,
            }
        };

        self.word_index += 1;
        self.current_input.clear();
        if self.word_index < self.words.len() {
            self.states[self.word_index] = WordState::Active;
        }
        advance
    }

    /// Backspace: deletes the last character, or — at the start of an empty
    /// input — re-activates the immediately preceding word, seeding the
    /// input with the longest correct-from-the-start prefix it was typed
    /// with. At word 0 with empty input this is a no-op.
    pub fn backspace(&mut self) {
        if self.frozen {
            return;
        }
        if !self.current_input.is_empty() {
            self.current_input.pop();
            return;
        }
        if self.word_index == 0 {
            return;
        }
        if self.word_index < self.words.len() {
            self.states[self.word_index] = WordState::Pending;
        }
        self.word_index -= 1;
        let idx = self.word_index;
        self.states[idx] = WordState::Active;
        self.current_input = correct_prefix(&self.typed[idx], &self.words[idx]);
        self.typed[idx].clear();
    }

    /// Freeze the session at its current state; every later event is ignored.
    /// The in-progress input stays visible but is never committed.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    fn charge_mismatches(&mut self) -> f64 {
        let idx = self.word_index;
        let expected: Vec<char> = self.words[idx].chars().collect();
        let mut charged = 0.0;
        for (i, t) in self.current_input.chars().enumerate() {
            if expected.get(i) != Some(&t) {
                charged += self.penalties.charge_char(idx, i);
            }
        }
        charged
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn word_index(&self) -> usize {
        self.word_index
    }

    pub fn word_states(&self) -> &[WordState] {
        &self.states
    }

    pub fn current_input(&self) -> &str {
        &self.current_input
    }

    /// Cursor position inside the active word, in characters.
    pub fn cursor(&self) -> usize {
        self.current_input.chars().count()
    }

    /// The text a committed word was judged against (empty for skipped,
    /// pending, and re-activated words).
    pub fn typed_text(&self, idx: usize) -> &str {
        &self.typed[idx]
    }

    /// Character states for any word: live derivation for the active word,
    /// finalized derivation for committed words, all-untyped otherwise.
    pub fn word_chars(&self, idx: usize) -> Vec<CharState> {
        match self.states[idx] {
            WordState::Active => char_states(&self.current_input, &self.words[idx]),
            WordState::Pending => vec![CharState::Untyped; self.words[idx].chars().count()],
            _ => char_states(&self.typed[idx], &self.words[idx]),
        }
    }

    pub fn active_view(&self) -> ActiveWordView {
        if self.exhausted() || self.current_input.is_empty() {
            ActiveWordView::Untouched
        } else if self.current_input == self.words[self.word_index] {
            ActiveWordView::Correct
        } else {
            ActiveWordView::Incorrect
        }
    }

    pub fn correct_words(&self) -> usize {
        self.correct_words
    }

    pub fn incorrect_words(&self) -> usize {
        self.incorrect_words
    }

    pub fn completed_words(&self) -> usize {
        self.completed_words
    }

    pub fn total_penalty_secs(&self) -> f64 {
        self.penalties.total_secs()
    }

    /// True once every drawn word has been committed or skipped.
    pub fn exhausted(&self) -> bool {
        self.word_index == self.words.len()
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }
}
