use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// How requests to a service are authenticated.
///
/// Parsed case-insensitively, so `bearerToken`, `BEARERTOKEN` and
/// `bearertoken` are the same value.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "lowercase", try_from = "String")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AuthType {
    NoAuth,
    Basic,
    BearerToken,
    #[default]
    Iam,
}

impl TryFrom<String> for AuthType {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
