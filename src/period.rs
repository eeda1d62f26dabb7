use serde::{Deserialize, Serialize};
use std::fmt;

/// Aggregation granularity for a click-history chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Period {
    /// Trailing 24 hours, one bucket per hour.
    #[default]
    Hour,
    /// Trailing 7 days, labelled by weekday.
    Day,
    /// Trailing 30 days, labelled by day of month.
    DayOfMonth,
    /// Trailing 12 calendar months.
    Month,
}

impl Period {
    pub const ALL: [Period; 4] = [Period::Hour, Period::Day, Period::DayOfMonth, Period::Month];

    pub const fn bucket_count(self) -> usize {
        match self {
            Period::Hour => 24,
            Period::Day => 7,
            Period::DayOfMonth => 30,
            Period::Month => 12,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Period::Hour => "hour",
            Period::Day => "day",
            Period::DayOfMonth => "dayOfMonth",
            Period::Month => "month",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
