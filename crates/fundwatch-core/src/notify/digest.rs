use crate::notify::{format_decimal, Thresholds, Trend};
use crate::FundEstimate;

const TABLE_HEADER: &str = "
|状态|基金名称|估算涨幅|当前估算净值|昨日单位净值|估算时间|
| -- | -- | -- | -- | -- | -- |
";

/// Compact Markdown digest for the push-message channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownDigest {
    title: String,
    body: String,
    fall_count: usize,
}

impl MarkdownDigest {
    /// Renders the digest; `date` is the already formatted local title date.
    pub fn render(estimates: &[FundEstimate], thresholds: &Thresholds, date: &str) -> Self {
        if estimates.is_empty() {
            return Self {
                title: String::new(),
                body: String::new(),
                fall_count: 0,
            };
        }

        let mut fall_count = 0;
        let mut rows = Vec::with_capacity(estimates.len());
        for estimate in estimates {
            let trend = thresholds.classify(estimate.growth());
            if trend == Trend::Fall {
                fall_count += 1;
            }
            rows.push(format!(
                "|{}|{}|{}|{}|{}|{}|",
                trend.label(),
                escape_cell(estimate.name()),
                format_decimal(estimate.growth()),
                format_decimal(estimate.estimated_nav()),
                format_decimal(estimate.prior_nav()),
                escape_cell(estimate.estimated_at()),
            ));
        }

        Self {
            title: format!("基金涨跌监控_{date}_{fall_count}跌"),
            body: format!("{TABLE_HEADER}{}", rows.join("\n")),
            fall_count,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub const fn fall_count(&self) -> usize {
        self.fall_count
    }

    pub fn should_send(&self) -> bool {
        !self.title.is_empty()
    }
}

fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|")
}
