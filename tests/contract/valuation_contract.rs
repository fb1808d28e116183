//! Contract tests for the fundgz valuation source
//!
//! The upstream payload is a JSONP call wrapping a flat object whose numeric
//! fields are strings. These tests pin that contract against canned bodies so
//! a format change upstream shows up here first.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use fundwatch_core::{
    FanOut, FanOutPolicy, FetchErrorKind, FundCode, HttpClient, HttpError, HttpMethod,
    HttpRequest, HttpResponse, TiantianSource, ValuationSource,
};
use rust_decimal_macros::dec;

const SAMPLE_180012: &str = r#"jsonpgz({"fundcode":"180012","name":"银华富裕主题混合","jzrq":"2019-10-31","dwjz":"2.6670","gsz":"2.6858","gszzl":"0.70","gztime":"2019-11-01 15:00"});"#;
const SAMPLE_003095: &str = r#"jsonpgz({"fundcode":"003095","name":"中欧医疗健康混合A","jzrq":"2019-10-31","dwjz":"1.6490","gsz":"1.6311","gszzl":"-1.08","gztime":"2019-11-01 15:00"});"#;

/// Serves canned bodies keyed by URL suffix and records every request.
#[derive(Default)]
struct FixtureHttpClient {
    fixtures: Vec<(String, HttpResponse)>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FixtureHttpClient {
    fn serve(mut self, suffix: &str, response: HttpResponse) -> Self {
        self.fixtures.push((suffix.to_owned(), response));
        self
    }

    fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

impl HttpClient for FixtureHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let response = self
            .fixtures
            .iter()
            .find(|(suffix, _)| request.url.ends_with(suffix.as_str()))
            .map(|(_, response)| response.clone())
            .ok_or_else(|| HttpError::new(format!("no fixture for {}", request.url)));
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
        Box::pin(async move { response })
    }
}

fn code(raw: &str) -> FundCode {
    FundCode::parse(raw).expect("fixture code must be valid")
}

// =============================================================================
// Contract: Request Shape
// =============================================================================

#[tokio::test]
async fn request_is_a_browser_like_get_to_the_per_code_script() {
    // Given: a fixture serving one code
    let http = Arc::new(FixtureHttpClient::default().serve("/180012.js", HttpResponse::ok(SAMPLE_180012)));
    let source = TiantianSource::new(http.clone());

    // When: the estimate is requested
    source.estimate(&code("180012")).await.expect("fixture parses");

    // Then: exactly one GET went to the JSONP script with a browser user agent
    let requests = http.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, HttpMethod::Get);
    assert_eq!(request.url, "http://fundgz.1234567.com.cn/js/180012.js");
    let user_agent = request.headers.get("user-agent").expect("user agent set");
    assert!(user_agent.starts_with("Mozilla/5.0"), "{user_agent}");
}

// =============================================================================
// Contract: Payload Decoding
// =============================================================================

#[tokio::test]
async fn sample_payload_decodes_every_field() {
    let http = Arc::new(FixtureHttpClient::default().serve("/180012.js", HttpResponse::ok(SAMPLE_180012)));
    let source = TiantianSource::new(http);

    let estimate = source.estimate(&code("180012")).await.expect("fixture parses");

    assert_eq!(estimate.code().as_str(), "180012");
    assert_eq!(estimate.name(), "银华富裕主题混合");
    assert_eq!(estimate.valuation_date(), "2019-10-31");
    assert_eq!(estimate.prior_nav(), dec!(2.6670));
    assert_eq!(estimate.estimated_nav(), dec!(2.6858));
    assert_eq!(estimate.growth(), dec!(0.70));
    assert_eq!(estimate.estimated_at(), "2019-11-01 15:00");
}

#[tokio::test]
async fn unwrapped_json_body_is_accepted() {
    let bare = SAMPLE_180012
        .trim_start_matches("jsonpgz(")
        .trim_end_matches(");");
    let http = Arc::new(FixtureHttpClient::default().serve("/180012.js", HttpResponse::ok(bare)));
    let source = TiantianSource::new(http);

    let estimate = source.estimate(&code("180012")).await.expect("bare json parses");

    assert_eq!(estimate.growth(), dec!(0.70));
}

#[tokio::test]
async fn empty_jsonp_call_is_a_parse_error_tagged_with_the_code() {
    // Upstream answers unknown codes with an empty call.
    let http = Arc::new(FixtureHttpClient::default().serve("/999999.js", HttpResponse::ok("jsonpgz();")));
    let source = TiantianSource::new(http);

    let error = source
        .estimate(&code("999999"))
        .await
        .expect_err("empty payload must fail");

    assert_eq!(error.code(), "999999");
    assert!(matches!(error.kind(), FetchErrorKind::Parse { .. }));
}

#[tokio::test]
async fn server_error_status_is_rejected_before_parsing() {
    let http = Arc::new(FixtureHttpClient::default().serve(
        "/180012.js",
        HttpResponse {
            status: 502,
            body: SAMPLE_180012.to_owned(),
        },
    ));
    let source = TiantianSource::new(http);

    let error = source
        .estimate(&code("180012"))
        .await
        .expect_err("502 must fail");

    assert_eq!(error.kind(), &FetchErrorKind::UpstreamStatus(502));
}

// =============================================================================
// Contract: Source Through Fan-out
// =============================================================================

#[tokio::test]
async fn fanout_over_the_fixture_source_returns_sorted_estimates() {
    // Given: two funds, one up and one down
    let http = Arc::new(
        FixtureHttpClient::default()
            .serve("/180012.js", HttpResponse::ok(SAMPLE_180012))
            .serve("/003095.js", HttpResponse::ok(SAMPLE_003095)),
    );
    let fanout = FanOut::new(
        Arc::new(TiantianSource::new(http.clone())),
        FanOutPolicy::default(),
    );
    let deadline = tokio::time::Instant::now() + Duration::from_secs(10);

    // When: both are fetched along with a blank entry
    let aggregated = fanout.fetch_all(["180012", "", "003095"], deadline).await;

    // Then: the falling fund sorts first and the blank entry never hit the wire
    let estimates = aggregated.into_result().expect("both fixtures parse");
    let codes = estimates
        .iter()
        .map(|estimate| estimate.code().as_str())
        .collect::<Vec<_>>();
    assert_eq!(codes, ["003095", "180012"]);
    assert_eq!(http.requests().len(), 2);
}

#[tokio::test]
async fn fanout_reports_a_missing_fixture_as_a_transport_failure() {
    let http = Arc::new(FixtureHttpClient::default().serve("/180012.js", HttpResponse::ok(SAMPLE_180012)));
    let fanout = FanOut::new(Arc::new(TiantianSource::new(http)), FanOutPolicy::default());
    let deadline = tokio::time::Instant::now() + Duration::from_secs(10);

    let aggregated = fanout.fetch_all(["180012", "519697"], deadline).await;

    assert_eq!(aggregated.estimates().len(), 1);
    let error = aggregated.error().expect("missing fixture must fail");
    assert_eq!(error.code(), "519697");
    assert!(matches!(error.kind(), FetchErrorKind::Transport(_)));
}
