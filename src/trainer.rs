use crate::config::{Config, TestMode};
use crate::error::EngineError;
use crate::generator;
use crate::scorer::{self, Summary};
use crate::session::{Advance, Session};
use crate::timer::TimerState;
use crate::wordlist::WordList;
use crate::TICK_RATE_MS;

/// One typing attempt: owns the session state machine and the clock,
/// routes input events between them, and detects the end conditions.
///
/// Replaced wholesale on restart or mode/difficulty change, so nothing
/// (counters, charged penalty positions, a half-run clock) can leak from
/// one attempt into the next.
#[derive(Debug)]
pub struct Trainer {
    config: Config,
    session: Session,
    timer: TimerState,
    summary: Option<Summary>,
}

impl Trainer {
    pub fn new(config: Config) -> Result<Self, EngineError> {
        let list = WordList::load(config.difficulty)?;
        let mut rng = rand::thread_rng();
        let words = generator::draw_for_config(&config, &list.words, &mut rng)?;
        Ok(Self::with_words(config, words))
    }

    /// Build a trainer over a fixed word set, bypassing the draw. Used by
    /// tests that need deterministic words.
    pub fn with_words(config: Config, words: Vec<String>) -> Self {
        let timer = match config.test_mode {
            TestMode::Time => TimerState::countdown(config.time_limit_secs as f64),
            TestMode::Words => TimerState::countup(),
        };
        let session = Session::new(words, config.difficulty.penalized());
        Self {
            config,
            session,
            timer,
            summary: None,
        }
    }

    /// Character input. The clock starts lazily on the first character, so
    /// idle time before typing is never charged. Whitespace routes to
    /// commit/skip.
    pub fn write(&mut self, c: char) {
        if self.has_finished() {
            return;
        }
        if c.is_whitespace() {
            self.commit_or_skip();
            return;
        }
        self.timer.start();
        let charged = self.session.push_char(c);
        self.settle_penalty(charged);
    }

    /// Whole-value input replacement for adapters that own a text buffer.
    pub fn set_input(&mut self, value: &str) {
        if self.has_finished() {
            return;
        }
        if !value.trim().is_empty() {
            self.timer.start();
        }
        let charged = self.session.set_input(value);
        self.settle_penalty(charged);
    }

    /// Separator pressed: commit or skip the active word, then check the
    /// end conditions (word-mode target, exhaustion).
    pub fn commit_or_skip(&mut self) {
        if self.has_finished() {
            return;
        }
        let advance = self.session.commit_or_skip();
        let (committed_correct, charged) = match advance {
            Advance::Committed {
                correct,
                penalty_secs,
            } => (correct, penalty_secs),
            Advance::Skipped { penalty_secs } => (false, penalty_secs),
            Advance::Ignored => return,
        };
        self.settle_penalty(charged);
        if self.has_finished() {
            return;
        }
        if self.config.test_mode == TestMode::Words
            && committed_correct
            && self.session.correct_words() >= self.config.target_word_count
        {
            self.end();
            return;
        }
        if self.session.exhausted() {
            self.end();
        }
    }

    pub fn backspace(&mut self) {
        if self.has_finished() {
            return;
        }
        self.session.backspace();
    }

    /// Advance the clock by one runtime tick. A tick arriving after the end
    /// is a no-op.
    pub fn on_tick(&mut self) {
        if self.has_finished() {
            return;
        }
        self.timer.on_tick(TICK_RATE_MS as f64 / 1000.0);
        if self.timer.has_started() && self.timer.expired() {
            self.end();
        }
    }

    fn settle_penalty(&mut self, charged: f64) {
        if charged <= 0.0 {
            return;
        }
        self.timer.apply_penalty(charged);
        // a penalty can use up the last of the clock
        if self.timer.has_started() && self.timer.expired() {
            self.end();
        }
    }

    fn end(&mut self) {
        if self.summary.is_some() {
            return;
        }
        self.timer.stop();
        self.session.freeze();
        self.summary = Some(scorer::score(&self.session, &self.timer));
    }

    pub fn has_started(&self) -> bool {
        self.timer.has_started()
    }

    pub fn has_finished(&self) -> bool {
        self.summary.is_some()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn timer(&self) -> &TimerState {
        &self.timer
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Difficulty;
    use crate::session::WordState;

    fn config(mode: TestMode, difficulty: Difficulty) -> Config {
        Config {
            difficulty,
            test_mode: mode,
            time_limit_secs: 15,
            target_word_count: 2,
        }
    }

    fn trainer(mode: TestMode, difficulty: Difficulty, words: &[&str]) -> Trainer {
        Trainer::with_words(
            config(mode, difficulty),
            words.iter().map(|w| w.to_string()).collect(),
        )
    }

    fn type_text(t: &mut Trainer, text: &str) {
        for c in text.chars() {
            t.write(c);
        }
    }

    #[test]
    fn clock_starts_on_the_first_character_only() {
        let mut t = trainer(TestMode::Time, Difficulty::Medium, &["cat"]);
        assert!(!t.has_started());
        t.on_tick();
        assert_eq!(t.timer().elapsed_secs(), 0.0);

        t.write('c');
        assert!(t.has_started());
        t.on_tick();
        assert!(t.timer().elapsed_secs() > 0.0);
    }

    #[test]
    fn skip_does_not_start_the_clock() {
        let mut t = trainer(TestMode::Time, Difficulty::Medium, &["cat", "dog"]);
        t.commit_or_skip();
        assert!(!t.has_started());
        assert_eq!(t.session().incorrect_words(), 1);
    }

    #[test]
    fn space_routes_to_commit() {
        let mut t = trainer(TestMode::Time, Difficulty::Medium, &["cat", "dog"]);
        type_text(&mut t, "cat ");
        assert_eq!(t.session().correct_words(), 1);
        assert_eq!(t.session().word_index(), 1);
    }

    #[test]
    fn countdown_expiry_ends_the_session() {
        let mut t = trainer(TestMode::Time, Difficulty::Medium, &["cat", "dog"]);
        t.write('c');
        // 15 s at 100 ms per tick
        for _ in 0..151 {
            t.on_tick();
        }
        assert!(t.has_finished());
        let summary = t.summary().unwrap();
        assert_eq!(summary.error_count, 0);
        // mid-word input frozen, never committed
        assert_eq!(t.session().current_input(), "c");
        assert_eq!(t.session().completed_words(), 0);
        assert_eq!(t.session().word_states()[0], WordState::Active);
    }

    #[test]
    fn unreached_words_stay_pending_after_expiry() {
        let mut t = trainer(TestMode::Time, Difficulty::Medium, &["cat", "dog", "owl"]);
        type_text(&mut t, "cat ");
        for _ in 0..200 {
            t.on_tick();
        }
        assert!(t.has_finished());
        assert_eq!(t.session().word_states()[1], WordState::Active);
        assert_eq!(t.session().word_states()[2], WordState::Pending);
    }

    #[test]
    fn time_mode_ends_when_the_draw_is_exhausted() {
        let mut t = trainer(TestMode::Time, Difficulty::Medium, &["cat", "dog"]);
        type_text(&mut t, "cat dog ");
        assert!(t.has_finished());
        let summary = t.summary().unwrap();
        assert_eq!(summary.accuracy, 100.0);
    }

    #[test]
    fn word_mode_ends_on_the_target_correct_commit() {
        let mut t = trainer(TestMode::Words, Difficulty::Medium, &["cat", "dog", "owl"]);
        type_text(&mut t, "cat dog ");
        // target is 2: ends immediately, leaving "owl" untouched
        assert!(t.has_finished());
        assert_eq!(t.session().word_states()[2], WordState::Pending);
        assert!(t.summary().unwrap().wpm > 0.0);
    }

    #[test]
    fn word_mode_incorrect_commits_do_not_reach_the_target() {
        let mut t = trainer(TestMode::Words, Difficulty::Medium, &["cat", "dog", "owl"]);
        type_text(&mut t, "cax dog ");
        assert!(!t.has_finished());
        type_text(&mut t, "owk ");
        // exhausted without the target: the session still terminates
        assert!(t.has_finished());
        assert_eq!(t.summary().unwrap().error_count, 2);
        assert_eq!(t.session().correct_words(), 1);
    }

    #[test]
    fn hard_tier_mistake_drains_the_countdown() {
        let mut t = trainer(TestMode::Time, Difficulty::Hard, &["cat", "dog"]);
        type_text(&mut t, "xat ");

        assert_eq!(t.session().incorrect_words(), 1);
        // 0.5 s for the 'x' mismatch + 0.5 s for the wrong commit
        assert_eq!(t.session().total_penalty_secs(), 1.0);
        assert_eq!(t.timer().display_secs(), 14.0);
    }

    #[test]
    fn retyping_the_same_wrong_position_charges_once() {
        let mut t = trainer(TestMode::Time, Difficulty::Hard, &["cat"]);
        t.write('x');
        t.backspace();
        t.write('x');
        t.backspace();
        t.write('c');
        assert_eq!(t.session().total_penalty_secs(), 0.5);
        assert_eq!(t.timer().display_secs(), 14.5);
    }

    #[test]
    fn countup_penalties_never_touch_the_display() {
        let mut t = trainer(TestMode::Words, Difficulty::Developer, &["cat", "dog"]);
        t.write('x');
        t.on_tick();
        assert_eq!(t.session().total_penalty_secs(), 0.5);
        // display shows pure elapsed time
        assert!((t.timer().display_secs() - 0.1).abs() < 1e-9);
    }

    #[test]
    fn penalties_can_expire_the_clock() {
        let mut t = Trainer::with_words(
            Config {
                difficulty: Difficulty::Hard,
                test_mode: TestMode::Time,
                time_limit_secs: 1,
                target_word_count: 2,
            },
            vec!["abc".into()],
        );
        t.write('x'); // 0.5
        t.backspace();
        assert!(!t.has_finished());
        t.write('c');
        t.write('x'); // another fresh position, 0.5 => clock hits 0
        assert!(t.has_finished());
    }

    #[test]
    fn whole_value_input_behaves_like_keystrokes() {
        let mut t = trainer(TestMode::Time, Difficulty::Hard, &["cat"]);
        t.set_input("xa");
        assert!(t.has_started());
        assert_eq!(t.session().total_penalty_secs(), 0.5);
        t.set_input("ca");
        t.write('t');
        t.commit_or_skip();
        assert_eq!(t.session().correct_words(), 1);
    }

    #[test]
    fn events_after_the_end_are_ignored() {
        let mut t = trainer(TestMode::Words, Difficulty::Medium, &["cat", "dog"]);
        type_text(&mut t, "cat dog ");
        assert!(t.has_finished());

        let summary = t.summary().unwrap().clone();
        t.write('z');
        t.commit_or_skip();
        t.backspace();
        t.on_tick();
        assert_eq!(t.summary().unwrap(), &summary);
        assert_eq!(t.session().correct_words(), 2);
    }

    #[test]
    fn a_fresh_trainer_carries_nothing_over() {
        let mut t = trainer(TestMode::Time, Difficulty::Hard, &["cat"]);
        t.write('x');
        assert!(t.session().total_penalty_secs() > 0.0);

        let t2 = trainer(TestMode::Time, Difficulty::Hard, &["cat"]);
        assert_eq!(t2.session().total_penalty_secs(), 0.0);
        assert!(!t2.has_started());
        assert_eq!(t2.timer().display_secs(), 15.0);
    }

    #[test]
    fn drawn_trainer_respects_the_configured_pool() {
        let t = Trainer::new(config(TestMode::Words, Difficulty::Easy)).unwrap();
        assert_eq!(t.session().words().len(), 2);
        let list = WordList::load(Difficulty::Easy).unwrap();
        for w in t.session().words() {
            assert!(list.words.contains(w));
        }
    }
}
