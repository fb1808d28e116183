use std::fmt::{Display, Formatter};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::FundCode;

/// Intraday valuation estimate for one fund.
///
/// Field names follow the upstream payload, where every numeric value is
/// transported as a JSON string:
///
/// ```text
/// {"fundcode":"180012","name":"...","jzrq":"2019-10-31","dwjz":"3.6009",
///  "gsz":"3.6490","gszzl":"1.34","gztime":"2019-11-01 15:00"}
/// ```
///
/// Values are read-only once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundEstimate {
    #[serde(rename = "fundcode")]
    code: FundCode,
    name: String,
    /// Date of the last published net value.
    #[serde(rename = "jzrq")]
    valuation_date: String,
    /// Last published (previous day) net value per unit.
    #[serde(rename = "dwjz")]
    prior_nav: Decimal,
    /// Current estimated net value per unit.
    #[serde(rename = "gsz")]
    estimated_nav: Decimal,
    /// Estimated growth in percent, `1.34` meaning +1.34%.
    #[serde(rename = "gszzl")]
    growth: Decimal,
    #[serde(rename = "gztime")]
    estimated_at: String,
}

impl FundEstimate {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        code: FundCode,
        name: impl Into<String>,
        valuation_date: impl Into<String>,
        prior_nav: Decimal,
        estimated_nav: Decimal,
        growth: Decimal,
        estimated_at: impl Into<String>,
    ) -> Self {
        Self {
            code,
            name: name.into(),
            valuation_date: valuation_date.into(),
            prior_nav,
            estimated_nav,
            growth,
            estimated_at: estimated_at.into(),
        }
    }

    pub fn code(&self) -> &FundCode {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn valuation_date(&self) -> &str {
        &self.valuation_date
    }

    pub const fn prior_nav(&self) -> Decimal {
        self.prior_nav
    }

    pub const fn estimated_nav(&self) -> Decimal {
        self.estimated_nav
    }

    pub const fn growth(&self) -> Decimal {
        self.growth
    }

    pub fn estimated_at(&self) -> &str {
        &self.estimated_at
    }
}

impl Display for FundEstimate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-单位净值:{}-估算净值:{}-估算增长率:{}-估值时间:{}-截止日期:{}",
            self.name,
            self.prior_nav.normalize(),
            self.estimated_nav.normalize(),
            self.growth.normalize(),
            self.estimated_at,
            self.valuation_date
        )
    }
}
