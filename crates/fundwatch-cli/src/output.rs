use std::io::{self, Write};

use fundwatch_core::{FundEstimate, MarkdownDigest, ReportClock, Thresholds};
use serde::Serialize;

use crate::error::CliError;

pub fn render_json<T: Serialize>(data: &T, pretty: bool) -> Result<(), CliError> {
    let payload = if pretty {
        serde_json::to_string_pretty(data)?
    } else {
        serde_json::to_string(data)?
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{payload}")?;
    Ok(())
}

/// Writes the webhook digest that a real run would send.
pub fn render_preview(
    estimates: &[FundEstimate],
    thresholds: &Thresholds,
    clock: &ReportClock,
) -> Result<(), CliError> {
    let digest = MarkdownDigest::render(estimates, thresholds, &clock.title_date(clock.now()));

    let mut stdout = io::stdout().lock();
    if !digest.should_send() {
        writeln!(stdout, "no estimates collected, nothing would be sent")?;
        return Ok(());
    }
    writeln!(stdout, "{}", digest.title())?;
    writeln!(stdout, "{}", digest.body())?;
    Ok(())
}
