//! Environment-backed run settings.
//!
//! # Environment Variables
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `FOUND_CODES` | comma-separated fund codes | [`DEFAULT_FUND_CODES`] |
//! | `SMTP_HOST` | SMTP relay host | email disabled |
//! | `EMAIL_NAME` | sender address, also the SMTP login | email disabled |
//! | `EMAIL_PASSWORD` | SMTP credential | email disabled |
//! | `EMAIL_TO` | recipient | `EMAIL_NAME` |
//! | `SCKEY` | ServerChan key | webhook disabled |
//!
//! Blank values count as unset.

use std::env;

use crate::delivery::EmailSettings;

pub const DEFAULT_FUND_CODES: &str = "163406,519697,180012,003095,519778";

pub const FUND_CODES_VAR: &str = "FOUND_CODES";
pub const SMTP_HOST_VAR: &str = "SMTP_HOST";
pub const EMAIL_NAME_VAR: &str = "EMAIL_NAME";
pub const EMAIL_PASSWORD_VAR: &str = "EMAIL_PASSWORD";
pub const EMAIL_TO_VAR: &str = "EMAIL_TO";
pub const SERVER_CHAN_KEY_VAR: &str = "SCKEY";

/// Resolved inputs for one run. Absent channel settings disable that channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub fund_codes: Vec<String>,
    pub email: Option<EmailSettings>,
    pub server_chan_key: Option<String>,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds settings from any variable lookup, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let fund_codes = split_codes(
            read(FUND_CODES_VAR)
                .as_deref()
                .unwrap_or(DEFAULT_FUND_CODES),
        );

        let sender = read(EMAIL_NAME_VAR);
        let recipient = read(EMAIL_TO_VAR).or_else(|| sender.clone());
        let email = match (read(SMTP_HOST_VAR), sender, read(EMAIL_PASSWORD_VAR), recipient) {
            (Some(smtp_host), Some(sender), Some(password), Some(recipient)) => {
                Some(EmailSettings {
                    smtp_host,
                    sender,
                    password,
                    recipient,
                })
            }
            _ => None,
        };

        Self {
            fund_codes,
            email,
            server_chan_key: read(SERVER_CHAN_KEY_VAR),
        }
    }

    pub fn with_fund_codes(mut self, raw: &str) -> Self {
        self.fund_codes = split_codes(raw);
        self
    }
}

/// Splits a comma-separated list. Blank entries are kept so the fan-out can skip them.
pub fn split_codes(raw: &str) -> Vec<String> {
    raw.split(',').map(|code| code.trim().to_owned()).collect()
}
