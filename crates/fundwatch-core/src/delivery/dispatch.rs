use std::sync::Arc;

use time::OffsetDateTime;
use tracing::{error, info};

use crate::delivery::{email_subject, send_email, MailTransport, ServerChanClient};
use crate::notify::{HtmlReport, MarkdownDigest, ReportClock, Thresholds};
use crate::{DeliveryError, FundEstimate};

/// Which channels actually delivered a message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub email_sent: bool,
    pub webhook_sent: bool,
}

/// Formats estimates and pushes them through every configured channel.
///
/// Channels left unconfigured are skipped without error. The email and
/// webhook paths run concurrently; the first failure fails the dispatch.
#[derive(Clone)]
pub struct Dispatcher {
    mailer: Option<Arc<dyn MailTransport>>,
    server_chan: Option<ServerChanClient>,
    thresholds: Thresholds,
    clock: ReportClock,
}

impl Dispatcher {
    pub fn new(thresholds: Thresholds, clock: ReportClock) -> Self {
        Self {
            mailer: None,
            server_chan: None,
            thresholds,
            clock,
        }
    }

    pub fn with_mailer(mut self, mailer: Arc<dyn MailTransport>) -> Self {
        self.mailer = Some(mailer);
        self
    }

    pub fn with_server_chan(mut self, client: ServerChanClient) -> Self {
        self.server_chan = Some(client);
        self
    }

    pub async fn dispatch(&self, estimates: &[FundEstimate]) -> Result<DispatchReport, DeliveryError> {
        self.dispatch_at(estimates, OffsetDateTime::now_utc()).await
    }

    /// Same as [`dispatch`](Self::dispatch) with an explicit report time.
    pub async fn dispatch_at(
        &self,
        estimates: &[FundEstimate],
        now: OffsetDateTime,
    ) -> Result<DispatchReport, DeliveryError> {
        let (email_sent, webhook_sent) = tokio::try_join!(
            self.notify_email(estimates, now),
            self.notify_server_chan(estimates, now)
        )?;

        Ok(DispatchReport {
            email_sent,
            webhook_sent,
        })
    }

    async fn notify_email(
        &self,
        estimates: &[FundEstimate],
        now: OffsetDateTime,
    ) -> Result<bool, DeliveryError> {
        let report = HtmlReport::render(estimates, &self.thresholds);
        let should_send = report.should_send();
        info!(should_send, "email report rendered");

        let Some(mailer) = &self.mailer else {
            info!("email channel not configured, skipping");
            return Ok(false);
        };
        if !should_send {
            return Ok(false);
        }

        let subject = email_subject(&self.clock, now);
        send_email(mailer.as_ref(), &subject, report.body())
            .await
            .inspect_err(|error| error!(%error, "failed to send email"))?;
        Ok(true)
    }

    async fn notify_server_chan(
        &self,
        estimates: &[FundEstimate],
        now: OffsetDateTime,
    ) -> Result<bool, DeliveryError> {
        let digest =
            MarkdownDigest::render(estimates, &self.thresholds, &self.clock.title_date(now));
        let should_send = digest.should_send();
        info!(should_send, fall_count = digest.fall_count(), "serverchan digest rendered");

        let Some(client) = &self.server_chan else {
            info!("serverchan channel not configured, skipping");
            return Ok(false);
        };
        if !should_send {
            return Ok(false);
        }

        client
            .send(digest.title(), digest.body())
            .await
            .inspect_err(|error| error!(%error, "failed to send serverchan"))?;
        Ok(true)
    }
}
