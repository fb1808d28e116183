use serde::Serialize;

use fundwatch_core::FundEstimate;

use crate::cli::QuoteArgs;
use crate::error::CliError;
use crate::output;

use super::RunContext;

#[derive(Debug, Serialize)]
struct QuoteResponseData<'a> {
    estimates: &'a [FundEstimate],
    error: Option<String>,
}

/// Prints whatever was collected, then fails if any code failed.
pub async fn run(args: &QuoteArgs, context: &RunContext) -> Result<(), CliError> {
    let aggregated = context
        .fanout
        .fetch_all(&context.settings.fund_codes, context.deadline)
        .await;

    let data = QuoteResponseData {
        estimates: aggregated.estimates(),
        error: aggregated.error().map(ToString::to_string),
    };
    output::render_json(&data, args.pretty)?;

    aggregated.into_result().map(|_| ()).map_err(CliError::from)
}
