use std::fmt;

use embassy_futures::select::{Either, select};
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel};
use embassy_time::{Duration, Instant, Timer};
use log::{debug, info, warn};
use qkreader_core::{
    content::TextSource,
    pacing::{PacerStatusHandle, WordPacer},
    render::TextRenderer,
};

const COMMAND_QUEUE_DEPTH: usize = 4;

pub(super) type CommandChannel =
    Channel<CriticalSectionRawMutex, PacerCommand, COMMAND_QUEUE_DEPTH>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum PacerCommand {
    Start { accelerate: bool },
    Pause,
    /// Stop pacing and rewind the text to its first word.
    Stop,
    Shutdown,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum ControlError {
    QueueFull(PacerCommand),
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QueueFull(command) => write!(f, "pacer command queue full, dropped {command:?}"),
        }
    }
}

/// Non-blocking control surface for a pacer owned by [`pacer_loop`].
#[derive(Clone, Copy)]
pub(super) struct PacerControl {
    commands: &'static CommandChannel,
    status: &'static PacerStatusHandle,
}

impl PacerControl {
    pub(super) const fn new(
        commands: &'static CommandChannel,
        status: &'static PacerStatusHandle,
    ) -> Self {
        Self { commands, status }
    }

    pub(super) fn start(&self, accelerate: bool) -> Result<(), ControlError> {
        self.send(PacerCommand::Start { accelerate })
    }

    pub(super) fn pause(&self) -> Result<(), ControlError> {
        self.send(PacerCommand::Pause)
    }

    pub(super) fn stop(&self) -> Result<(), ControlError> {
        self.send(PacerCommand::Stop)
    }

    pub(super) fn shutdown(&self) -> Result<(), ControlError> {
        self.send(PacerCommand::Shutdown)
    }

    /// Speed last published by the pacing loop.
    pub(super) fn current_wpm(&self) -> f64 {
        self.status.current_wpm()
    }

    fn send(&self, command: PacerCommand) -> Result<(), ControlError> {
        self.commands
            .try_send(command)
            .map_err(|_| ControlError::QueueFull(command))
    }
}

/// Owns the pacer until a [`PacerCommand::Shutdown`] arrives, then hands it back.
///
/// Commands and firings are handled one at a time on this future, so the
/// source and renderer never see concurrent calls.
pub(super) async fn pacer_loop<TS, TR>(
    mut pacer: WordPacer<TS, TR>,
    commands: &CommandChannel,
    status: &PacerStatusHandle,
    clock_start: Instant,
) -> WordPacer<TS, TR>
where
    TS: TextSource,
    TS::Error: fmt::Display,
    TR: TextRenderer,
    TR::Error: fmt::Display,
{
    status.publish(pacer.snapshot());

    loop {
        let command = match pacer.next_deadline_ms() {
            Some(deadline_ms) => {
                let deadline = clock_start + Duration::from_millis(deadline_ms);
                match select(commands.receive(), Timer::at(deadline)).await {
                    Either::First(command) => Some(command),
                    Either::Second(()) => None,
                }
            }
            None => Some(commands.receive().await),
        };

        let now_ms = clock_start.elapsed().as_millis();
        match command {
            Some(PacerCommand::Shutdown) => {
                pacer.stop();
                status.publish(pacer.snapshot());
                info!(
                    "pacer-loop: shutdown words_delivered={}",
                    pacer.words_delivered()
                );
                return pacer;
            }
            Some(command) => apply_command(&mut pacer, command, now_ms),
            None => {
                if let Err(err) = pacer.tick(now_ms) {
                    warn!("pacer-loop: firing failed at {}ms: {}", now_ms, err);
                }
            }
        }

        status.publish(pacer.snapshot());
    }
}

fn apply_command<TS, TR>(pacer: &mut WordPacer<TS, TR>, command: PacerCommand, now_ms: u64)
where
    TS: TextSource,
    TS::Error: fmt::Display,
    TR: TextRenderer,
{
    debug!("pacer-loop: command={:?} now_ms={}", command, now_ms);

    match command {
        PacerCommand::Start { accelerate } => pacer.start(accelerate, now_ms),
        PacerCommand::Pause => pacer.pause(),
        PacerCommand::Stop => {
            pacer.stop();
            if let Err(err) = pacer.with_source_mut(|source| source.reset()) {
                warn!("pacer-loop: rewinding text failed: {}", err);
            }
        }
        PacerCommand::Shutdown => pacer.stop(),
    }
}
