//! Notification formatters.
//!
//! Formatters consume the sorted estimates from a fan-out run. Each estimate
//! is classified against [`Thresholds`], but classification never decides
//! whether a message is sent: any non-empty input yields a sendable report.
//!
//! | Type | Channel |
//! |------|---------|
//! | [`HtmlReport`] | email |
//! | [`MarkdownDigest`] | ServerChan webhook |

mod classify;
mod clock;
mod digest;
mod html;

use rust_decimal::Decimal;

pub use classify::{Thresholds, Trend};
pub use clock::{ReportClock, CHINA_STANDARD_TIME};
pub use digest::MarkdownDigest;
pub use html::HtmlReport;

/// Shortest decimal form without trailing zeros, e.g. `3.6490` -> `3.649`.
pub fn format_decimal(value: Decimal) -> String {
    value.normalize().to_string()
}
