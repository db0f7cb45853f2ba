use crate::config::{Config, TestMode};
use crate::error::EngineError;
use rand::seq::SliceRandom;
use rand::Rng;

/// Time-mode sessions draw a randomized count in this band. The timer, not
/// word exhaustion, normally ends those sessions; the jitter just keeps the
/// screen from looking identical between runs.
pub const TIME_MODE_DRAW_MIN: usize = 40;
pub const TIME_MODE_DRAW_MAX: usize = 50;

/// Uniformly random permutation of `items` (Fisher-Yates). Returns a new
/// vector; the input is left untouched.
pub fn shuffled<T: Clone, R: Rng>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut drawn = items.to_vec();
    drawn.shuffle(rng);
    drawn
}

/// Shuffles `pool` and takes the first `min(count, pool.len())` words.
pub fn draw<R: Rng>(pool: &[String], count: usize, rng: &mut R) -> Vec<String> {
    let mut words = shuffled(pool, rng);
    words.truncate(count);
    words
}

/// Draws the word set for one session according to the mode policy:
/// a randomized 40-50 band in time mode, exactly the target in word mode.
/// An empty draw is a fatal configuration error.
pub fn draw_for_config<R: Rng>(
    config: &Config,
    pool: &[String],
    rng: &mut R,
) -> Result<Vec<String>, EngineError> {
    let count = match config.test_mode {
        TestMode::Time => rng.gen_range(TIME_MODE_DRAW_MIN..=TIME_MODE_DRAW_MAX),
        TestMode::Words => config.target_word_count,
    };
    let words = draw(pool, count, rng);
    if words.is_empty() {
        return Err(EngineError::EmptyWordPool(config.difficulty.to_string()));
    }
    Ok(words)
}
