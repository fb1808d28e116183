//! # Fundwatch Core
//!
//! Fetches intraday valuation estimates for a list of mutual funds, aggregates
//! them under a concurrency cap and pushes a digest to email and/or a
//! ServerChan webhook.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Upstream valuation source (fundgz.1234567.com.cn) |
//! | [`config`] | Environment-backed settings |
//! | [`data_source`] | Single-fetch trait and outcome type |
//! | [`delivery`] | Email and webhook channels, concurrent dispatcher |
//! | [`domain`] | Domain models (FundCode, FundEstimate) |
//! | [`error`] | Core error types |
//! | [`fanout`] | Bounded fan-out aggregator |
//! | [`http_client`] | HTTP client abstraction |
//! | [`notify`] | Threshold classification and message formatters |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use fundwatch_core::{FanOut, FanOutPolicy, ReqwestHttpClient, TiantianSource};
//!
//! #[tokio::main]
//! async fn main() {
//!     let http = Arc::new(ReqwestHttpClient::new().expect("http client"));
//!     let fanout = FanOut::new(Arc::new(TiantianSource::new(http)), FanOutPolicy::default());
//!     let deadline = tokio::time::Instant::now() + Duration::from_secs(120);
//!
//!     let aggregated = fanout.fetch_all(["180012", "003095"], deadline).await;
//!     for estimate in aggregated.estimates() {
//!         println!("{estimate}");
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  fund codes     │
//! └────────┬────────┘
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ FanOut (K=3)    │────▶│ ValuationSource  │──▶ HttpClient
//! └────────┬────────┘     └──────────────────┘
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ HtmlReport /    │────▶│ Dispatcher       │──▶ SMTP / ServerChan
//! │ MarkdownDigest  │     └──────────────────┘
//! └─────────────────┘
//! ```

pub mod adapters;
pub mod config;
pub mod data_source;
pub mod delivery;
pub mod domain;
pub mod error;
pub mod fanout;
pub mod http_client;
pub mod notify;

pub use adapters::{parse_estimate, unwrap_jsonp, TiantianSource};

pub use config::{Settings, DEFAULT_FUND_CODES};

pub use data_source::{FetchOutcome, ValuationSource};

pub use delivery::{
    DispatchReport, Dispatcher, EmailSettings, MailTransport, ServerChanClient, SmtpMailer,
};

pub use domain::{FundCode, FundEstimate};

pub use error::{DeliveryError, FetchError, FetchErrorKind, ValidationError};

pub use fanout::{Aggregated, ErrorLatch, FanOut, FanOutPolicy, DEFAULT_MAX_CONCURRENCY};

pub use http_client::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, ReqwestHttpClient,
};

pub use notify::{HtmlReport, MarkdownDigest, ReportClock, Thresholds, Trend};
