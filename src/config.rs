use crate::labels::{DEFAULT_LOCALE, locale_from_name};
use chrono::{FixedOffset, Locale};
use std::{env, fmt, str::FromStr, time::Duration};
use tracing::warn;
use url::Url;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_API_URL: &str = "http://localhost:3001";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Time zone in which bucket boundaries are aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeZonePolicy {
    #[default]
    Local,
    Utc,
    Fixed(FixedOffset),
}

impl FromStr for TimeZonePolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        match value.to_ascii_lowercase().as_str() {
            "local" => return Ok(Self::Local),
            "utc" | "z" => return Ok(Self::Utc),
            _ => {}
        }
        parse_offset(value)
            .map(Self::Fixed)
            .ok_or_else(|| format!("expected 'local', 'utc' or an offset like +07:00, got '{value}'"))
    }
}

impl fmt::Display for TimeZonePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::Utc => f.write_str("utc"),
            Self::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}

// chrono reads `+07:00` and `-0530`; a bare hour such as `+7` is accepted too.
fn parse_offset(value: &str) -> Option<FixedOffset> {
    if let Ok(offset) = value.parse::<FixedOffset>() {
        return Some(offset);
    }
    let (sign, hours) = match value.as_bytes().first()? {
        b'+' => (1, &value[1..]),
        b'-' => (-1, &value[1..]),
        _ => return None,
    };
    if hours.is_empty() || hours.len() > 2 || !hours.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = hours.parse().ok()?;
    FixedOffset::east_opt(sign * hours * 3600)
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub api_url: Url,
    pub api_timeout: Duration,
    pub timezone: TimeZonePolicy,
    pub locale: Locale,
}

impl Config {
    pub fn from_env() -> Result<Self, url::ParseError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from a variable lookup. Values that do not
    /// parse are logged and replaced by their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, url::ParseError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_or("PORT", lookup("PORT"), DEFAULT_PORT, |value| {
            value.parse::<u16>().map_err(|err| err.to_string())
        });

        let api_url = parse_or(
            "LINK_API_URL",
            lookup("LINK_API_URL"),
            Url::parse(DEFAULT_API_URL)?,
            parse_api_url,
        );

        let timeout_secs = parse_or(
            "LINK_API_TIMEOUT_SECS",
            lookup("LINK_API_TIMEOUT_SECS"),
            DEFAULT_TIMEOUT_SECS,
            |value| match value.parse::<u64>() {
                Ok(0) => Err("timeout must be positive".to_string()),
                Ok(secs) => Ok(secs),
                Err(err) => Err(err.to_string()),
            },
        );

        let timezone = parse_or(
            "APP_TIMEZONE",
            lookup("APP_TIMEZONE"),
            TimeZonePolicy::default(),
            |value| value.parse(),
        );

        let locale = parse_or("APP_LOCALE", lookup("APP_LOCALE"), DEFAULT_LOCALE, |value| {
            locale_from_name(value).ok_or_else(|| format!("unsupported locale '{value}'"))
        });

        Ok(Self {
            port,
            api_url,
            api_timeout: Duration::from_secs(timeout_secs),
            timezone,
            locale,
        })
    }
}

fn parse_or<T>(
    key: &str,
    raw: Option<String>,
    default: T,
    parse: impl FnOnce(&str) -> Result<T, String>,
) -> T {
    let Some(raw) = raw.filter(|value| !value.trim().is_empty()) else {
        return default;
    };
    match parse(raw.trim()) {
        Ok(value) => value,
        Err(err) => {
            warn!("ignoring invalid {key}={raw}: {err}");
            default
        }
    }
}

fn parse_api_url(value: &str) -> Result<Url, String> {
    let url = Url::parse(value).map_err(|err| err.to_string())?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err("expected an http(s) base URL".to_string());
    }
    Ok(url)
}
