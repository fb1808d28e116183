use std::fmt::{Display, Formatter};

use rust_decimal::Decimal;

use crate::ValidationError;

/// Direction of a fund's move relative to the configured thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trend {
    Rise,
    Fall,
    Neutral,
}

impl Trend {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rise => "涨",
            Self::Fall => "跌",
            Self::Neutral => "-",
        }
    }
}

impl Display for Trend {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Rise/fall thresholds in percent. `max_fall` is expressed as a negative number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    min_rise: Decimal,
    max_fall: Decimal,
}

impl Thresholds {
    pub fn new(min_rise: Decimal, max_fall: Decimal) -> Result<Self, ValidationError> {
        if min_rise.is_sign_negative() && !min_rise.is_zero() {
            return Err(ValidationError::NegativeMinRise {
                value: min_rise.to_string(),
            });
        }
        if max_fall.is_sign_positive() && !max_fall.is_zero() {
            return Err(ValidationError::PositiveMaxFall {
                value: max_fall.to_string(),
            });
        }
        Ok(Self { min_rise, max_fall })
    }

    pub const fn min_rise(&self) -> Decimal {
        self.min_rise
    }

    pub const fn max_fall(&self) -> Decimal {
        self.max_fall
    }

    /// A rise needs a positive growth at or above `min_rise`; a fall needs a
    /// negative growth at or below `max_fall`.
    pub fn classify(&self, growth: Decimal) -> Trend {
        if growth > Decimal::ZERO && growth >= self.min_rise {
            Trend::Rise
        } else if growth < Decimal::ZERO && growth <= self.max_fall {
            Trend::Fall
        } else {
            Trend::Neutral
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_rise: Decimal::ONE,
            max_fall: Decimal::new(-8, 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn classifies_against_default_thresholds() {
        let thresholds = Thresholds::default();

        assert_eq!(thresholds.max_fall(), dec!(-0.8));
        assert_eq!(thresholds.classify(dec!(1.34)), Trend::Rise);
        assert_eq!(thresholds.classify(dec!(1)), Trend::Rise);
        assert_eq!(thresholds.classify(dec!(-0.9)), Trend::Fall);
        assert_eq!(thresholds.classify(dec!(-0.8)), Trend::Fall);
        assert_eq!(thresholds.classify(dec!(0.2)), Trend::Neutral);
        assert_eq!(thresholds.classify(dec!(-0.79)), Trend::Neutral);
    }

    #[test]
    fn zero_growth_is_neutral_even_with_zero_thresholds() {
        let thresholds = Thresholds::new(dec!(0), dec!(0)).expect("valid thresholds");
        assert_eq!(thresholds.classify(dec!(0)), Trend::Neutral);
    }

    #[test]
    fn rejects_inverted_thresholds() {
        assert!(matches!(
            Thresholds::new(dec!(-1), dec!(-0.8)),
            Err(ValidationError::NegativeMinRise { .. })
        ));
        assert!(matches!(
            Thresholds::new(dec!(1), dec!(0.8)),
            Err(ValidationError::PositiveMaxFall { .. })
        ));
    }
}
