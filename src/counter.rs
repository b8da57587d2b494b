//! Anniversary counter: time since (or until) the anchor date, split into
//! days / hours / minutes / seconds.

use std::fmt;

const SECOND_MS: f64 = 1_000.0;
const MINUTE_MS: f64 = 60.0 * SECOND_MS;
const HOUR_MS: f64 = 60.0 * MINUTE_MS;
const DAY_MS: f64 = 24.0 * HOUR_MS;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Elapsed {
    pub days: u64,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
    /// `now` is earlier than the anchor, so the fields count down.
    pub before_anchor: bool,
}

impl Elapsed {
    pub fn between(anchor_ms: f64, now_ms: f64) -> Self {
        let diff = now_ms - anchor_ms;
        let abs = diff.abs();
        Self {
            days: (abs / DAY_MS).floor() as u64,
            hours: ((abs / HOUR_MS).floor() % 24.0) as u8,
            minutes: ((abs / MINUTE_MS).floor() % 60.0) as u8,
            seconds: ((abs / SECOND_MS).floor() % 60.0) as u8,
            before_anchor: diff < 0.0,
        }
    }

    /// One-line markup with fixed-width number slots so the line does not
    /// jitter as digits change.
    pub fn to_markup(&self) -> String {
        format!(
            "<span style=\"display:inline-block; min-width: 3ch;\">{}</span>d&nbsp;\
             <span style=\"display:inline-block; min-width: 2ch;\">{:02}</span>h&nbsp;\
             <span style=\"display:inline-block; min-width: 2ch;\">{:02}</span>m&nbsp;\
             <span style=\"display:inline-block; min-width: 2ch;\">{:02}</span>s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}d {:02}h {:02}m {:02}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}
