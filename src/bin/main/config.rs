use std::{env, fmt};

use qkreader_core::settings::{ConfigError, DEFAULT_MAX_WPM, PacerConfig};

pub(super) const ENV_MAX_WPM: &str = "QKREADER_MAX_WPM";
pub(super) const ENV_ACCELERATE: &str = "QKREADER_ACCELERATE";
pub(super) const ENV_READ_SECS: &str = "QKREADER_READ_SECS";

const DEFAULT_READ_SECS: u64 = 6;

#[derive(Clone, Debug, PartialEq)]
pub(super) struct AppConfig {
    pub(super) pacer: PacerConfig,
    pub(super) accelerate: bool,
    /// Length of each reading burst in the scripted session.
    pub(super) read_secs: u64,
    pub(super) text_path: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub(super) enum AppConfigError {
    InvalidValue { key: &'static str, value: String },
    Pacer(ConfigError),
}

impl fmt::Display for AppConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { key, value } => write!(f, "{key}: cannot parse {value:?}"),
            Self::Pacer(err) => write!(f, "{err}"),
        }
    }
}

impl From<ConfigError> for AppConfigError {
    fn from(err: ConfigError) -> Self {
        Self::Pacer(err)
    }
}

impl AppConfig {
    pub(super) fn from_env() -> Result<Self, AppConfigError> {
        Self::from_lookup(|key| env::var(key).ok(), env::args().nth(1))
    }

    pub(super) fn from_lookup<F>(lookup: F, text_path: Option<String>) -> Result<Self, AppConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let max_wpm = match lookup(ENV_MAX_WPM) {
            Some(raw) => parse_value(ENV_MAX_WPM, &raw, |v| v.parse::<f64>().ok())?,
            None => DEFAULT_MAX_WPM,
        };
        let accelerate = match lookup(ENV_ACCELERATE) {
            Some(raw) => parse_value(ENV_ACCELERATE, &raw, parse_flag)?,
            None => true,
        };
        let read_secs = match lookup(ENV_READ_SECS) {
            Some(raw) => parse_value(ENV_READ_SECS, &raw, |v| {
                v.parse::<u64>().ok().filter(|secs| *secs > 0)
            })?,
            None => DEFAULT_READ_SECS,
        };

        let pacer = PacerConfig::with_max_wpm(max_wpm);
        pacer.validate()?;

        Ok(Self {
            pacer,
            accelerate,
            read_secs,
            text_path,
        })
    }
}

fn parse_value<T, P>(key: &'static str, raw: &str, parse: P) -> Result<T, AppConfigError>
where
    P: FnOnce(&str) -> Option<T>,
{
    parse(raw.trim()).ok_or_else(|| AppConfigError::InvalidValue {
        key,
        value: raw.to_owned(),
    })
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
