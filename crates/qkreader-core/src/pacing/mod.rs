//! Word pacing state machine.
//!
//! [`WordPacer`] owns a text source, a renderer and a [`WordTimer`]. Time is
//! injected: the host calls [`WordPacer::tick`] with a monotonic `now_ms` and
//! the pacer delivers at most one word per call, when its timer is due.

mod status;
mod timer;

use core::fmt;

use log::{debug, warn};

use crate::{
    content::TextSource,
    render::TextRenderer,
    settings::{ConfigError, PacerConfig},
};

pub use status::{PacerSnapshot, PacerStatusHandle};
pub use timer::WordTimer;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum PacerState {
    Stopped = 0,
    Running = 1,
    Paused = 2,
}

impl PacerState {
    fn from_raw(raw: u8) -> Self {
        match raw {
            1 => Self::Running,
            2 => Self::Paused,
            _ => Self::Stopped,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Running => "running",
            Self::Paused => "paused",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    Idle,
    WordDelivered,
}

/// Collaborator failure raised while handling a firing.
///
/// Either variant leaves the pacer [`PacerState::Stopped`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PacerError<SE, RE> {
    Source(SE),
    Render(RE),
}

impl<SE: fmt::Display, RE: fmt::Display> fmt::Display for PacerError<SE, RE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source(err) => write!(f, "text source failed: {err}"),
            Self::Render(err) => write!(f, "renderer failed: {err}"),
        }
    }
}

pub type TickOutcome<TS, TR> =
    Result<TickResult, PacerError<<TS as TextSource>::Error, <TR as TextRenderer>::Error>>;

pub struct WordPacer<TS, TR>
where
    TS: TextSource,
    TR: TextRenderer,
{
    source: TS,
    renderer: TR,
    config: PacerConfig,
    current_wpm: f64,
    timer: WordTimer,
    state: PacerState,
    words_delivered: u64,
    words_since_drain: u32,
}

impl<TS, TR> WordPacer<TS, TR>
where
    TS: TextSource,
    TR: TextRenderer,
{
    /// Pacer with the default start-word interval and acceleration factor.
    pub fn new(source: TS, renderer: TR, max_wpm: f64) -> Result<Self, ConfigError> {
        Self::with_config(source, renderer, PacerConfig::with_max_wpm(max_wpm))
    }

    pub fn with_config(source: TS, renderer: TR, config: PacerConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            source,
            renderer,
            config,
            current_wpm: config.start_word_wpm(),
            timer: WordTimer::new(config.start_word_interval_ms),
            state: PacerState::Stopped,
            words_delivered: 0,
            words_since_drain: 0,
        })
    }

    /// Starts (or restarts) firing; the next word is due one interval after `now_ms`.
    ///
    /// With `accelerate` the reported speed is set to the start-word rate,
    /// otherwise straight to the target speed. The timer interval is left as
    /// it is, so a restart after `pause` keeps the cadence reached so far.
    pub fn start(&mut self, accelerate: bool, now_ms: u64) {
        self.current_wpm = if accelerate {
            self.config.start_word_wpm()
        } else {
            self.config.max_wpm
        };
        self.timer.start(now_ms);
        self.state = PacerState::Running;

        debug!(
            "pacer: start accelerate={} wpm={} interval_ms={} next_due_ms={:?}",
            accelerate,
            self.current_wpm,
            self.timer.interval_ms(),
            self.timer.deadline_ms()
        );
    }

    /// Stops firing without touching speed or interval. No-op unless running.
    pub fn pause(&mut self) {
        if self.state != PacerState::Running {
            return;
        }

        self.timer.stop();
        self.state = PacerState::Paused;
        debug!("pacer: pause interval_ms={}", self.timer.interval_ms());
    }

    /// Stops firing. Rewinding the text is left to the owner of the source,
    /// see [`WordPacer::with_source_mut`].
    pub fn stop(&mut self) {
        if self.state == PacerState::Stopped {
            return;
        }

        self.timer.stop();
        self.state = PacerState::Stopped;
        debug!("pacer: stop words_delivered={}", self.words_delivered);
    }

    pub fn current_wpm(&self) -> f64 {
        self.current_wpm
    }

    pub fn max_wpm(&self) -> f64 {
        self.config.max_wpm
    }

    pub fn current_interval_ms(&self) -> f64 {
        self.timer.interval_ms()
    }

    pub fn state(&self) -> PacerState {
        self.state
    }

    pub fn config(&self) -> PacerConfig {
        self.config
    }

    /// When the next firing is due. `None` unless running.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.timer.deadline_ms()
    }

    pub fn words_delivered(&self) -> u64 {
        self.words_delivered
    }

    /// Words delivered since the previous call.
    pub fn drain_word_updates(&mut self) -> u32 {
        let words = self.words_since_drain;
        self.words_since_drain = 0;
        words
    }

    pub fn snapshot(&self) -> PacerSnapshot {
        PacerSnapshot {
            state: self.state,
            current_wpm: self.current_wpm,
            interval_ms: self.timer.interval_ms(),
            words_delivered: self.words_delivered,
            revision: 0,
        }
    }

    pub fn source(&self) -> &TS {
        &self.source
    }

    pub fn renderer(&self) -> &TR {
        &self.renderer
    }

    pub fn with_source_mut<R, F>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut TS) -> R,
    {
        f(&mut self.source)
    }

    pub fn with_renderer_mut<R, F>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut TR) -> R,
    {
        f(&mut self.renderer)
    }

    /// Handles a firing if the timer is due at `now_ms`.
    ///
    /// While the reported speed is below target the firing interval grows by
    /// `max_wpm * acceleration_factor` ms. The reported speed itself is not
    /// recomputed, so after an accelerated start below target the interval
    /// keeps growing on every firing. Exactly one word is fetched and rendered
    /// per firing.
    pub fn tick(&mut self, now_ms: u64) -> TickOutcome<TS, TR> {
        if self.state != PacerState::Running || !self.timer.is_due(now_ms) {
            return Ok(TickResult::Idle);
        }

        if self.current_wpm < self.config.max_wpm {
            self.timer.extend_interval_ms(self.config.interval_step_ms());
        }
        self.timer.rearm(now_ms);

        let word = match self.source.next_word() {
            Ok(word) => word,
            Err(err) => {
                self.halt("text source");
                return Err(PacerError::Source(err));
            }
        };

        debug!(
            "pacer: fire now_ms={} word={} interval_ms={} wpm={}",
            now_ms,
            word.text,
            self.timer.interval_ms(),
            self.current_wpm
        );

        if let Err(err) = self.renderer.display_text(word) {
            self.halt("renderer");
            return Err(PacerError::Render(err));
        }

        self.words_delivered = self.words_delivered.saturating_add(1);
        self.words_since_drain = self.words_since_drain.saturating_add(1);
        Ok(TickResult::WordDelivered)
    }

    fn halt(&mut self, culprit: &str) {
        self.timer.stop();
        self.state = PacerState::Stopped;
        warn!(
            "pacer: {} failed after {} words; timer halted",
            culprit, self.words_delivered
        );
    }
}

#[cfg(test)]
mod tests;
