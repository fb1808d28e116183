mod quote;
mod run;

use std::sync::Arc;
use std::time::Duration;

use fundwatch_core::{
    FanOut, FanOutPolicy, FundEstimate, HttpClient, ReqwestHttpClient, Settings, TiantianSource,
};
use tokio::time::Instant;
use tracing::{error, info};

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Long-lived values built once per process and shared by every command.
pub struct RunContext {
    pub settings: Settings,
    pub http_client: Arc<dyn HttpClient>,
    pub fanout: FanOut,
    pub deadline: Instant,
}

pub async fn run(cli: &Cli) -> Result<(), CliError> {
    let mut settings = Settings::from_env();
    if let Some(codes) = &cli.codes {
        settings = settings.with_fund_codes(codes);
    }
    info!(codes = %settings.fund_codes.join(","), "fund codes");
    info!(
        email = settings.email.is_some(),
        serverchan = settings.server_chan_key.is_some(),
        "channels configured"
    );

    let http_client: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new()?);
    let source = Arc::new(TiantianSource::new(Arc::clone(&http_client)));
    let fanout = FanOut::new(source, FanOutPolicy::new(cli.concurrency)?);
    let deadline = Instant::now() + Duration::from_secs(cli.timeout_secs);

    let context = RunContext {
        settings,
        http_client,
        fanout,
        deadline,
    };

    match &cli.command {
        Command::Run(args) => run::run(args, &context).await,
        Command::Quote(args) => quote::run(args, &context).await,
    }
}

/// Fetches every configured code; any captured failure is fatal.
async fn fetch_estimates(context: &RunContext) -> Result<Vec<FundEstimate>, CliError> {
    let aggregated = context
        .fanout
        .fetch_all(&context.settings.fund_codes, context.deadline)
        .await;

    match aggregated.into_parts() {
        (estimates, None) => Ok(estimates),
        (estimates, Some(fetch_error)) => {
            error!(error = %fetch_error, collected = estimates.len(), "failed to fetch funds");
            Err(CliError::Fetch(fetch_error))
        }
    }
}
