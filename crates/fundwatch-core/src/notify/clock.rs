use time::format_description::well_known::Rfc3339;
use time::macros::{format_description, offset};
use time::{OffsetDateTime, UtcOffset};

/// China Standard Time, the zone the upstream quotes its estimates in.
pub const CHINA_STANDARD_TIME: UtcOffset = offset!(+8);

/// Wall clock pinned to a fixed offset, used for subjects and titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportClock {
    offset: UtcOffset,
}

impl ReportClock {
    pub const fn new(offset: UtcOffset) -> Self {
        Self { offset }
    }

    pub const fn china_standard() -> Self {
        Self::new(CHINA_STANDARD_TIME)
    }

    pub fn now(&self) -> OffsetDateTime {
        self.at(OffsetDateTime::now_utc())
    }

    pub fn at(&self, instant: OffsetDateTime) -> OffsetDateTime {
        instant.to_offset(self.offset)
    }

    /// Email subject timestamp, e.g. `2019-11-01T15:00:00+08:00`.
    pub fn subject_timestamp(&self, instant: OffsetDateTime) -> String {
        self.at(instant)
            .format(&Rfc3339)
            .unwrap_or_else(|_| String::from("<unformattable>"))
    }

    /// Digest title date, e.g. `2019-11-01`.
    pub fn title_date(&self, instant: OffsetDateTime) -> String {
        self.at(instant)
            .format(format_description!("[year]-[month]-[day]"))
            .unwrap_or_else(|_| String::from("<unformattable>"))
    }
}

impl Default for ReportClock {
    fn default() -> Self {
        Self::china_standard()
    }
}
