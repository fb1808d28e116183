//! # Domain Models
//!
//! | Type | Description |
//! |------|-------------|
//! | [`FundCode`] | Validated upstream fund identifier |
//! | [`FundEstimate`] | One fund's intraday valuation estimate |

mod estimate;
mod fund_code;

pub use estimate::FundEstimate;
pub use fund_code::FundCode;
