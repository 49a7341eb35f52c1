use chrono::{DateTime, Datelike, TimeZone, Weekday};
use std::str::FromStr;

pub fn is_weekend_day(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}

/// How the per-request weekend flag is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeekendMode {
    /// Follow the wall clock at the moment the request arrives.
    #[default]
    System,
    Always,
    Never,
}

impl WeekendMode {
    pub fn resolve<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        match self {
            WeekendMode::System => is_weekend_day(now.weekday()),
            WeekendMode::Always => true,
            WeekendMode::Never => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeekendMode::System => "system",
            WeekendMode::Always => "always",
            WeekendMode::Never => "never",
        }
    }
}

impl FromStr for WeekendMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "system" | "" => Ok(WeekendMode::System),
            "always" | "weekend" => Ok(WeekendMode::Always),
            "never" | "weekday" => Ok(WeekendMode::Never),
            other => Err(format!("unknown weekend mode '{other}'")),
        }
    }
}
