use std::process;

use embassy_executor::Spawner;
use embassy_sync::channel::Channel;
use embassy_time::{Instant, Timer};
use log::{error, info, warn};
use qkreader_core::{
    content::StaticWordSource,
    pacing::{PacerStatusHandle, WordPacer},
};

use config::AppConfig;
use console::ConsoleRenderer;
use pacer_task::{CommandChannel, ControlError, PacerControl};

#[path = "main/config.rs"]
mod config;
#[path = "main/console.rs"]
mod console;
#[path = "main/pacer_task.rs"]
mod pacer_task;
#[path = "main/text.rs"]
mod text;

const ORP_ANCHOR_COLUMN: usize = 24;
const PAUSE_BREAK_MS: u64 = 1_500;
const STATUS_REPORT_MS: u64 = 1_000;

static COMMANDS: CommandChannel = Channel::new();
static STATUS: PacerStatusHandle = PacerStatusHandle::new();

fn log_control_error(result: Result<(), ControlError>) {
    if let Err(err) = result {
        warn!("session: {}", err);
    }
}

fn status_report_count(secs: u64) -> u64 {
    secs.saturating_mul(1_000) / STATUS_REPORT_MS
}

/// Reports pacing progress once a second for `secs` seconds.
async fn read_for(control: PacerControl, secs: u64) {
    let mut last_revision = u32::MAX;
    for _ in 0..status_report_count(secs) {
        Timer::after_millis(STATUS_REPORT_MS).await;

        let snapshot = STATUS.snapshot();
        if snapshot.revision == last_revision {
            continue;
        }
        last_revision = snapshot.revision;
        info!(
            "status: state={} wpm={} interval_ms={} words={}",
            snapshot.state.as_str(),
            control.current_wpm(),
            snapshot.interval_ms,
            snapshot.words_delivered
        );
    }
}

/// Scripted session: accelerated read, pause, resume at target speed, stop
/// (rewind) and read again from the beginning.
async fn reading_session(control: PacerControl, accelerate: bool, read_secs: u64) {
    info!("session: start accelerate={}", accelerate);
    log_control_error(control.start(accelerate));
    read_for(control, read_secs).await;

    info!("session: pause for {}ms", PAUSE_BREAK_MS);
    log_control_error(control.pause());
    Timer::after_millis(PAUSE_BREAK_MS).await;

    info!("session: resume at target speed");
    log_control_error(control.start(false));
    read_for(control, read_secs).await;

    info!("session: stop and read again from the beginning");
    log_control_error(control.stop());
    log_control_error(control.start(accelerate));
    read_for(control, read_secs).await;

    log_control_error(control.shutdown());
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("config: {}", err);
            process::exit(2);
        }
    };

    let paragraphs: &'static [&'static str] = match config.text_path.as_deref() {
        Some(path) => match text::load_paragraphs(path) {
            Ok(paragraphs) => paragraphs,
            Err(err) => {
                error!("text: cannot read {}: {}", path, err);
                process::exit(1);
            }
        },
        None => &text::SAMPLE_PARAGRAPHS,
    };

    let source = StaticWordSource::new(paragraphs);
    let renderer = ConsoleRenderer::stdout(ORP_ANCHOR_COLUMN);
    let pacer = match WordPacer::with_config(source, renderer, config.pacer) {
        Ok(pacer) => pacer,
        Err(err) => {
            error!("pacer: {}", err);
            process::exit(2);
        }
    };

    info!(
        "Reader started: max_wpm={} accelerate={} start_word_interval_ms={} acceleration_factor={} paragraphs={}",
        config.pacer.max_wpm,
        config.accelerate,
        config.pacer.start_word_interval_ms,
        config.pacer.acceleration_factor,
        paragraphs.len()
    );

    let control = PacerControl::new(&COMMANDS, &STATUS);
    let pacer_future = pacer_task::pacer_loop(pacer, &COMMANDS, &STATUS, Instant::now());
    let session_future = reading_session(control, config.accelerate, config.read_secs);
    let (pacer, ()) = embassy_futures::join::join(pacer_future, session_future).await;

    let source = pacer.source();
    let (word, word_total) = source.paragraph_progress();
    info!(
        "Reader finished: words_delivered={} last_word={:?} paragraph={}/{} word={}/{} interval_ms={}",
        pacer.words_delivered(),
        pacer.renderer().last_word(),
        source.paragraph_number(),
        source.paragraph_total(),
        word,
        word_total,
        pacer.current_interval_ms()
    );
    process::exit(0);
}
