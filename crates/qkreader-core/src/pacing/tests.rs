use super::*;
use crate::{
    content::{StaticSourceError, StaticWordSource, WordToken},
    settings::ConfigError,
};

/// Source that serves `words` in order and then fails.
struct ScriptedSource {
    words: &'static [&'static str],
    cursor: usize,
    calls: usize,
}

impl ScriptedSource {
    const fn new(words: &'static [&'static str]) -> Self {
        Self {
            words,
            cursor: 0,
            calls: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Exhausted;

impl TextSource for ScriptedSource {
    type Error = Exhausted;

    fn next_word(&mut self) -> Result<WordToken<'_>, Self::Error> {
        self.calls += 1;
        let word = self.words.get(self.cursor).ok_or(Exhausted)?;
        self.cursor += 1;
        Ok(WordToken::from_text(word))
    }

    fn reset(&mut self) -> Result<(), Self::Error> {
        self.cursor = 0;
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct DisplayLost;

#[derive(Default)]
struct RecordingRenderer {
    shown: Vec<String>,
    fail_on_call: Option<usize>,
}

impl TextRenderer for RecordingRenderer {
    type Error = DisplayLost;

    fn display_text(&mut self, word: WordToken<'_>) -> Result<(), Self::Error> {
        if self.fail_on_call == Some(self.shown.len()) {
            return Err(DisplayLost);
        }
        self.shown.push(word.text.to_owned());
        Ok(())
    }
}

const WORDS: &[&str] = &["one", "two", "three", "four", "five", "six", "seven", "eight"];

fn pacer(max_wpm: f64) -> WordPacer<ScriptedSource, RecordingRenderer> {
    WordPacer::new(
        ScriptedSource::new(WORDS),
        RecordingRenderer::default(),
        max_wpm,
    )
    .unwrap()
}

/// Ticks at every deadline until `count` words were delivered; returns the
/// gap between consecutive firings.
fn run_firings<TS, TR>(pacer: &mut WordPacer<TS, TR>, count: usize, start_ms: u64) -> Vec<u64>
where
    TS: TextSource,
    TR: TextRenderer,
{
    let mut gaps = Vec::new();
    let mut last = start_ms;
    for _ in 0..count {
        let due = pacer.next_deadline_ms().unwrap();
        assert!(matches!(pacer.tick(due), Ok(TickResult::WordDelivered)));
        gaps.push(due - last);
        last = due;
    }
    gaps
}

#[test]
fn construction_rejects_invalid_max_wpm() {
    for bad in [0.0, -120.0, f64::NAN] {
        let result = WordPacer::new(
            ScriptedSource::new(WORDS),
            RecordingRenderer::default(),
            bad,
        );
        assert!(matches!(result, Err(ConfigError::InvalidMaxWpm(_))));
    }
}

#[test]
fn new_pacer_is_stopped_with_start_word_interval() {
    let pacer = pacer(300.0);
    assert_eq!(pacer.state(), PacerState::Stopped);
    assert_eq!(pacer.current_interval_ms(), 500.0);
    assert_eq!(pacer.next_deadline_ms(), None);
    assert_eq!(pacer.max_wpm(), 300.0);
}

#[test]
fn no_firing_before_start() {
    let mut pacer = pacer(300.0);
    assert_eq!(pacer.tick(10_000), Ok(TickResult::Idle));
    assert_eq!(pacer.source().calls, 0);
    assert!(pacer.renderer().shown.is_empty());
}

#[test]
fn start_without_acceleration_reports_target_speed() {
    for max_wpm in [1.0, 250.5, 600.0, 1_000.0] {
        let mut pacer = pacer(max_wpm);
        pacer.start(false, 0);
        assert_eq!(pacer.current_wpm(), max_wpm);
        assert_eq!(pacer.words_delivered(), 0);
    }
}

#[test]
fn accelerated_start_reports_start_word_speed_regardless_of_target() {
    for max_wpm in [60.0, 120.0, 300.0, 900.0] {
        let mut pacer = pacer(max_wpm);
        pacer.start(true, 0);
        assert_eq!(pacer.current_wpm(), 120.0);
    }
}

#[test]
fn first_firing_waits_for_start_word_interval() {
    let mut pacer = pacer(300.0);
    pacer.start(true, 1_000);

    assert_eq!(pacer.tick(1_499), Ok(TickResult::Idle));
    assert_eq!(pacer.tick(1_500), Ok(TickResult::WordDelivered));
    assert_eq!(pacer.renderer().shown, ["one"]);
}

#[test]
fn interval_grows_every_tick_while_reported_speed_is_below_target() {
    let mut pacer = pacer(300.0);
    pacer.start(true, 0);

    let gaps = run_firings(&mut pacer, 5, 0);
    assert_eq!(gaps, [500, 530, 560, 590, 620]);
    assert_eq!(pacer.current_interval_ms(), 650.0);
    // Reported speed never moves after start.
    assert_eq!(pacer.current_wpm(), 120.0);
}

#[test]
fn fractional_growth_rounds_deadlines_up() {
    let config = PacerConfig {
        max_wpm: 102.0,
        start_word_interval_ms: 1_000.0,
        acceleration_factor: 0.25,
    };
    let mut pacer = WordPacer::with_config(
        ScriptedSource::new(WORDS),
        RecordingRenderer::default(),
        config,
    )
    .unwrap();
    pacer.start(true, 0);

    let gaps = run_firings(&mut pacer, 5, 0);
    assert_eq!(gaps, [1_000, 1_026, 1_051, 1_077, 1_102]);
    assert_eq!(pacer.current_interval_ms(), 1_127.5);
}

#[test]
fn target_speed_start_keeps_a_fixed_interval() {
    let mut pacer = pacer(600.0);
    pacer.start(false, 0);
    assert_eq!(pacer.current_wpm(), 600.0);

    let gaps = run_firings(&mut pacer, 2, 0);
    assert_eq!(gaps, [500, 500]);
    assert_eq!(pacer.current_interval_ms(), 500.0);
    assert_eq!(pacer.renderer().shown, ["one", "two"]);
}

#[test]
fn accelerated_start_at_start_word_speed_never_grows() {
    let mut pacer = pacer(120.0);
    pacer.start(true, 0);
    assert_eq!(pacer.current_wpm(), 120.0);

    let gaps = run_firings(&mut pacer, 6, 0);
    assert!(gaps.iter().all(|gap| *gap == 500));
    assert_eq!(pacer.current_interval_ms(), 500.0);
}

#[test]
fn each_firing_delivers_exactly_one_word_in_order() {
    let mut pacer = pacer(300.0);
    pacer.start(false, 0);

    // A single late tick does not catch up on missed firings.
    assert_eq!(pacer.tick(60_000), Ok(TickResult::WordDelivered));
    assert_eq!(pacer.tick(60_000), Ok(TickResult::Idle));
    assert_eq!(pacer.next_deadline_ms(), Some(60_500));

    run_firings(&mut pacer, 3, 60_000);
    assert_eq!(pacer.renderer().shown, ["one", "two", "three", "four"]);
    assert_eq!(pacer.source().calls, 4);
    assert_eq!(pacer.words_delivered(), 4);
    assert_eq!(pacer.drain_word_updates(), 4);
    assert_eq!(pacer.drain_word_updates(), 0);
}

#[test]
fn pause_stops_deliveries_until_restart() {
    let mut pacer = pacer(300.0);
    pacer.start(true, 0);
    run_firings(&mut pacer, 2, 0);

    pacer.pause();
    assert_eq!(pacer.state(), PacerState::Paused);
    assert_eq!(pacer.next_deadline_ms(), None);
    for now in [1_500, 5_000, 50_000] {
        assert_eq!(pacer.tick(now), Ok(TickResult::Idle));
    }
    assert_eq!(pacer.renderer().shown.len(), 2);
    assert_eq!(pacer.current_wpm(), 120.0);
    assert_eq!(pacer.current_interval_ms(), 560.0);

    // Resuming keeps the grown interval.
    pacer.start(false, 50_000);
    assert_eq!(pacer.current_wpm(), 300.0);
    assert_eq!(pacer.next_deadline_ms(), Some(50_560));
    assert_eq!(pacer.tick(50_560), Ok(TickResult::WordDelivered));
    assert_eq!(pacer.renderer().shown.last().map(String::as_str), Some("three"));
}

#[test]
fn pause_and_stop_are_noops_when_not_running() {
    let mut pacer = pacer(300.0);
    pacer.pause();
    assert_eq!(pacer.state(), PacerState::Stopped);
    pacer.stop();
    assert_eq!(pacer.state(), PacerState::Stopped);

    pacer.start(true, 0);
    pacer.pause();
    pacer.pause();
    assert_eq!(pacer.state(), PacerState::Paused);
    pacer.stop();
    pacer.stop();
    assert_eq!(pacer.state(), PacerState::Stopped);
}

#[test]
fn stop_halts_deliveries_and_restart_reapplies_start_speed() {
    let mut pacer = pacer(300.0);
    pacer.start(false, 0);
    run_firings(&mut pacer, 1, 0);

    pacer.stop();
    assert_eq!(pacer.tick(10_000), Ok(TickResult::Idle));
    assert_eq!(pacer.renderer().shown.len(), 1);

    pacer.start(true, 10_000);
    assert_eq!(pacer.current_wpm(), 120.0);
    assert_eq!(pacer.state(), PacerState::Running);
}

#[test]
fn stop_does_not_rewind_the_source() {
    let mut pacer = pacer(300.0);
    pacer.start(false, 0);
    run_firings(&mut pacer, 2, 0);
    pacer.stop();

    pacer.start(false, 5_000);
    run_firings(&mut pacer, 1, 5_000);
    assert_eq!(pacer.renderer().shown, ["one", "two", "three"]);

    // The owner decides when to rewind.
    pacer.stop();
    pacer.with_source_mut(|source| source.reset()).unwrap();
    pacer.start(false, 9_000);
    run_firings(&mut pacer, 1, 9_000);
    assert_eq!(pacer.renderer().shown.last().map(String::as_str), Some("one"));
}

#[test]
fn restart_while_running_rearms_without_double_firing() {
    let mut pacer = pacer(600.0);
    pacer.start(false, 0);
    pacer.start(false, 300);
    assert_eq!(pacer.next_deadline_ms(), Some(800));

    assert_eq!(pacer.tick(500), Ok(TickResult::Idle));
    assert_eq!(pacer.tick(800), Ok(TickResult::WordDelivered));
    assert_eq!(pacer.tick(800), Ok(TickResult::Idle));
    assert_eq!(pacer.renderer().shown.len(), 1);
}

#[test]
fn source_failure_halts_the_timer() {
    let mut pacer = WordPacer::new(
        ScriptedSource::new(&["only"]),
        RecordingRenderer::default(),
        300.0,
    )
    .unwrap();
    pacer.start(false, 0);

    assert_eq!(pacer.tick(500), Ok(TickResult::WordDelivered));
    assert_eq!(pacer.tick(1_000), Err(PacerError::Source(Exhausted)));
    assert_eq!(pacer.state(), PacerState::Stopped);
    assert_eq!(pacer.next_deadline_ms(), None);
    assert_eq!(pacer.tick(10_000), Ok(TickResult::Idle));
    assert_eq!(pacer.source().calls, 2);
}

#[test]
fn render_failure_halts_after_source_advanced() {
    let renderer = RecordingRenderer {
        fail_on_call: Some(1),
        ..RecordingRenderer::default()
    };
    let mut pacer = WordPacer::new(ScriptedSource::new(WORDS), renderer, 300.0).unwrap();
    pacer.start(false, 0);

    assert_eq!(pacer.tick(500), Ok(TickResult::WordDelivered));
    assert_eq!(pacer.tick(1_000), Err(PacerError::Render(DisplayLost)));
    assert_eq!(pacer.state(), PacerState::Stopped);
    assert_eq!(pacer.source().calls, 2);
    assert_eq!(pacer.words_delivered(), 1);

    // A later start resumes with the word after the one that failed to render.
    pacer.with_renderer_mut(|renderer| renderer.fail_on_call = None);
    pacer.start(false, 2_000);
    assert_eq!(pacer.tick(2_500), Ok(TickResult::WordDelivered));
    assert_eq!(pacer.renderer().shown, ["one", "three"]);
}

#[test]
fn tuned_constants_drive_start_speed_and_growth() {
    let config = PacerConfig {
        max_wpm: 400.0,
        start_word_interval_ms: 250.0,
        acceleration_factor: 0.05,
    };
    let mut pacer = WordPacer::with_config(
        ScriptedSource::new(WORDS),
        RecordingRenderer::default(),
        config,
    )
    .unwrap();
    pacer.start(true, 0);
    assert_eq!(pacer.current_wpm(), 240.0);

    let gaps = run_firings(&mut pacer, 3, 0);
    assert_eq!(gaps, [250, 270, 290]);
}

#[test]
fn snapshot_mirrors_pacer_state() {
    let mut pacer = pacer(300.0);
    pacer.start(true, 0);
    run_firings(&mut pacer, 1, 0);

    let snapshot = pacer.snapshot();
    assert_eq!(snapshot.state, PacerState::Running);
    assert_eq!(snapshot.current_wpm, 120.0);
    assert_eq!(snapshot.interval_ms, 530.0);
    assert_eq!(snapshot.words_delivered, 1);

    let status = PacerStatusHandle::new();
    assert!(status.publish(snapshot));
    assert_eq!(status.snapshot().words_delivered, 1);
}

#[test]
fn drives_static_word_source() {
    let paragraphs = ["Hola mundo.", "Adiós"];
    let mut pacer = WordPacer::new(
        StaticWordSource::new(&paragraphs),
        RecordingRenderer::default(),
        600.0,
    )
    .unwrap();
    pacer.start(false, 0);

    run_firings(&mut pacer, 4, 0);
    assert_eq!(pacer.renderer().shown, ["Hola", "mundo.", "Adiós", "Hola"]);

    let empty: [&str; 0] = [];
    let mut pacer = WordPacer::new(
        StaticWordSource::new(&empty),
        RecordingRenderer::default(),
        600.0,
    )
    .unwrap();
    pacer.start(false, 0);
    assert_eq!(
        pacer.tick(500),
        Err(PacerError::Source(StaticSourceError::Empty))
    );
}
