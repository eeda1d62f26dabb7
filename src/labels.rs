use crate::period::Period;
use chrono::{DateTime, Datelike, Locale, TimeZone, Timelike};
use std::fmt;

pub const DEFAULT_LOCALE: Locale = Locale::th_TH;

/// Renders display labels for bucket windows. Presentation only: labels never
/// take part in ordering or counting.
#[derive(Debug, Clone, Copy)]
pub struct LabelFormatter {
    locale: Locale,
}

impl LabelFormatter {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn label<Tz>(&self, period: Period, start: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        match period {
            Period::Hour => format!("{}:00", start.hour()),
            Period::Day => start.format_localized("%a", self.locale).to_string(),
            Period::DayOfMonth => start.day().to_string(),
            Period::Month => start.format_localized("%b", self.locale).to_string(),
        }
    }
}

impl Default for LabelFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE)
    }
}

/// Maps a locale name such as `th_TH` or `en-US` to a chrono locale.
pub fn locale_from_name(name: &str) -> Option<Locale> {
    let locale = match name.trim().replace('-', "_").as_str() {
        "th_TH" => Locale::th_TH,
        "en_US" => Locale::en_US,
        "en_GB" => Locale::en_GB,
        "de_DE" => Locale::de_DE,
        "fr_FR" => Locale::fr_FR,
        "ja_JP" => Locale::ja_JP,
        "POSIX" | "C" => Locale::POSIX,
        _ => return None,
    };
    Some(locale)
}
