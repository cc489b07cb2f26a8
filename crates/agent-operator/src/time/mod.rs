//! A [`Duration`] type that (de)serializes to the human-readable format used in custom
//! resources, for example `10s` or `1m`.
use std::{fmt::Display, str::FromStr};

use snafu::{ResultExt, Snafu};

use crate::config::merge::Atomic;

mod serde_impl;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("failed to parse {input:?} as a duration"))]
    ParseDuration {
        source: humantime::DurationError,
        input: String,
    },
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Duration(std::time::Duration);

impl Duration {
    pub const fn from_secs(secs: u64) -> Self {
        Self(std::time::Duration::from_secs(secs))
    }

    pub const fn from_minutes(minutes: u64) -> Self {
        Self::from_secs(minutes * 60)
    }
}

impl FromStr for Duration {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        humantime::parse_duration(input)
            .map(Self)
            .context(ParseDurationSnafu { input })
    }
}

impl Display for Duration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        humantime::format_duration(self.0).fmt(f)
    }
}

impl From<std::time::Duration> for Duration {
    fn from(value: std::time::Duration) -> Self {
        Self(value)
    }
}

impl From<Duration> for std::time::Duration {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl Atomic for Duration {}
