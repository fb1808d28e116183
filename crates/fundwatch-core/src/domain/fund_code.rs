use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_FUND_CODE_LEN: usize = 16;

/// Upstream fund identifier, safe to substitute into a URL path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FundCode(String);

impl FundCode {
    /// Parse a raw identifier, trimming surrounding whitespace.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyFundCode);
        }

        let len = trimmed.chars().count();
        if len > MAX_FUND_CODE_LEN {
            return Err(ValidationError::FundCodeTooLong {
                len,
                max: MAX_FUND_CODE_LEN,
            });
        }

        for (index, ch) in trimmed.chars().enumerate() {
            if !ch.is_ascii_alphanumeric() {
                return Err(ValidationError::FundCodeInvalidChar { ch, index });
            }
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for FundCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for FundCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for FundCode {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<FundCode> for String {
    fn from(value: FundCode) -> Self {
        value.0
    }
}
