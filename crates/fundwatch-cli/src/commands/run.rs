use std::sync::Arc;

use fundwatch_core::{Dispatcher, ReportClock, ServerChanClient, SmtpMailer, Thresholds};
use tracing::info;

use crate::cli::RunArgs;
use crate::error::CliError;
use crate::output;

use super::{fetch_estimates, RunContext};

pub async fn run(args: &RunArgs, context: &RunContext) -> Result<(), CliError> {
    let thresholds = Thresholds::new(args.min_rise, args.max_fall)?;
    let clock = ReportClock::china_standard();

    let estimates = fetch_estimates(context).await?;
    info!(count = estimates.len(), "funds fetched");

    if args.dry_run {
        return output::render_preview(&estimates, &thresholds, &clock);
    }

    let mut dispatcher = Dispatcher::new(thresholds, clock);
    if let Some(email) = context.settings.email.clone() {
        dispatcher = dispatcher.with_mailer(Arc::new(SmtpMailer::new(email)?));
    }
    if let Some(key) = &context.settings.server_chan_key {
        dispatcher = dispatcher.with_server_chan(ServerChanClient::new(
            Arc::clone(&context.http_client),
            key.clone(),
        ));
    }

    let report = tokio::time::timeout_at(context.deadline, dispatcher.dispatch(&estimates))
        .await
        .map_err(|_| CliError::DeadlineExceeded)??;

    info!(
        email_sent = report.email_sent,
        webhook_sent = report.webhook_sent,
        "notifications done"
    );
    Ok(())
}
