use crate::notify::{format_decimal, Thresholds};
use crate::FundEstimate;

const HEADER: &str = r#"<html>
  <head>
    <meta http-equiv="Content-Type" content="text/html; charset=utf-8" />
  </head>
  <body>
    <div id="container">
      <p>基金涨跌监控:</p>
      <div id="content">
        <table width="30%" border="1" cellspacing="0" cellpadding="0">
          <tr>
            <td width="50" align="center">状态</td>
            <td width="100" align="center">基金名称</td>
            <td width="50" align="center">估算涨幅</td>
            <td width="50" align="center">当前估算净值</td>
            <td width="50" align="center">昨日单位净值</td>
            <td width="50" align="center">估算时间</td>
          </tr>"#;

const FOOTER: &str = r#"
        </table>
      </div>
    </div>
  </body>
</html>"#;

/// HTML table report for the email channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlReport {
    body: String,
    rows: usize,
}

impl HtmlReport {
    /// Renders one row per estimate, in the given order.
    pub fn render(estimates: &[FundEstimate], thresholds: &Thresholds) -> Self {
        if estimates.is_empty() {
            return Self {
                body: String::new(),
                rows: 0,
            };
        }

        let rows = estimates
            .iter()
            .map(|estimate| render_row(estimate, thresholds))
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            body: format!("{HEADER}{rows}{FOOTER}"),
            rows: estimates.len(),
        }
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub const fn rows(&self) -> usize {
        self.rows
    }

    pub const fn should_send(&self) -> bool {
        self.rows > 0
    }
}

fn render_row(estimate: &FundEstimate, thresholds: &Thresholds) -> String {
    let cells = [
        thresholds.classify(estimate.growth()).label().to_owned(),
        escape_html(estimate.name()),
        format!("{}%", format_decimal(estimate.growth())),
        format_decimal(estimate.estimated_nav()),
        format_decimal(estimate.prior_nav()),
        escape_html(estimate.estimated_at()),
    ];

    let cells = cells
        .iter()
        .map(|cell| format!("\n            <td width=\"50\" align=\"center\">{cell}</td>"))
        .collect::<String>();
    format!("\n          <tr>{cells}\n          </tr>")
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
