//! Valuation source trait and per-identifier outcome types.
//!
//! A [`ValuationSource`] performs exactly one upstream call per fund code and
//! returns either a parsed [`FundEstimate`] or a [`FetchError`] tagged with
//! the code. The fan-out aggregator drives many of these concurrently.
//!
//! # Example
//!
//! ```rust,ignore
//! use fundwatch_core::{FundCode, TiantianSource, ValuationSource};
//!
//! async fn show(source: &TiantianSource) -> Result<(), fundwatch_core::FetchError> {
//!     let code = FundCode::parse("180012").expect("valid code");
//!     let estimate = source.estimate(&code).await?;
//!     println!("{estimate}");
//!     Ok(())
//! }
//! ```

use std::future::Future;
use std::pin::Pin;

use crate::{FetchError, FundCode, FundEstimate};

/// Result of a single fetch, tagged with its code on failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Estimate(FundEstimate),
    Failed(FetchError),
}

impl From<Result<FundEstimate, FetchError>> for FetchOutcome {
    fn from(value: Result<FundEstimate, FetchError>) -> Self {
        match value {
            Ok(estimate) => Self::Estimate(estimate),
            Err(error) => Self::Failed(error),
        }
    }
}

/// Single-fetch contract.
///
/// Implementations must be `Send + Sync`; one instance is shared by every
/// task of a fan-out run. No retries happen at this layer.
pub trait ValuationSource: Send + Sync {
    /// Fetches and parses the current estimate for one fund.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] tagged with `code` on transport failure,
    /// non-2xx upstream status, or an unparseable body.
    fn estimate<'a>(
        &'a self,
        code: &'a FundCode,
    ) -> Pin<Box<dyn Future<Output = Result<FundEstimate, FetchError>> + Send + 'a>>;
}
