use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::{debug, info};

use crate::data_source::ValuationSource;
use crate::http_client::{HttpClient, HttpRequest, BROWSER_USER_AGENT};
use crate::{FetchError, FundCode, FundEstimate};

const DEFAULT_BASE_URL: &str = "http://fundgz.1234567.com.cn/js";
const JSONP_PREFIX: &str = "jsonpgz(";
const JSONP_SUFFIX: &str = ");";

/// Valuation source backed by the fundgz.1234567.com.cn JSONP endpoint.
#[derive(Clone)]
pub struct TiantianSource {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
}

impl TiantianSource {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            base_url: String::from(DEFAULT_BASE_URL),
        }
    }

    /// Points the source at a different host, e.g. a local fixture server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    pub fn request_url(&self, code: &FundCode) -> String {
        format!("{}/{}.js", self.base_url, code)
    }

    async fn fetch(&self, code: &FundCode) -> Result<FundEstimate, FetchError> {
        let url = self.request_url(code);
        info!(%url, "request url");

        let request = HttpRequest::get(url).with_header("user-agent", BROWSER_USER_AGENT);
        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|error| FetchError::transport(code, error.message()))?;

        if !response.is_success() {
            return Err(FetchError::upstream_status(code, response.status));
        }

        let estimate = parse_estimate(code, &response.body)?;
        debug!(%estimate, "fetched estimate");
        Ok(estimate)
    }
}

impl ValuationSource for TiantianSource {
    fn estimate<'a>(
        &'a self,
        code: &'a FundCode,
    ) -> Pin<Box<dyn Future<Output = Result<FundEstimate, FetchError>> + Send + 'a>> {
        Box::pin(self.fetch(code))
    }
}

/// Strips the `jsonpgz(` ... `);` call wrapper, leaving other input untouched.
pub fn unwrap_jsonp(body: &str) -> &str {
    let body = body.strip_prefix(JSONP_PREFIX).unwrap_or(body);
    body.strip_suffix(JSONP_SUFFIX).unwrap_or(body)
}

/// Decodes one upstream body into an estimate for `code`.
pub fn parse_estimate(code: &FundCode, body: &str) -> Result<FundEstimate, FetchError> {
    let payload = unwrap_jsonp(body);
    serde_json::from_str(payload)
        .map_err(|error| FetchError::parse(code, error.to_string(), payload))
}
