// Library surface for the headless engine and integration tests.
// The binary (main.rs + ui.rs) layers the TUI on top of this.
pub mod config;
pub mod error;
pub mod generator;
pub mod penalty;
pub mod runtime;
pub mod scorer;
pub mod session;
pub mod timer;
pub mod trainer;
pub mod wordlist;

/// Cadence of the runtime's fixed ticker; the timer advances by this much
/// per tick.
pub const TICK_RATE_MS: u64 = 100;
