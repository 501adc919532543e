use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Logical grouping of observations relative to authentication
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    BeforeLogin,
    AfterLogin,
    AfterLogout,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BeforeLogin => "before_login",
            Self::AfterLogin => "after_login",
            Self::AfterLogout => "after_logout",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "before_login" => Ok(Self::BeforeLogin),
            "after_login" => Ok(Self::AfterLogin),
            "after_logout" => Ok(Self::AfterLogout),
            other => Err(format!("unknown phase '{}'", other)),
        }
    }
}

/// One record per visited URL
///
/// Exactly one of `status` and `error` is set: a status when navigation
/// produced an HTTP response, an error description when it did not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageObservation {
    pub phase: Option<Phase>,
    pub url: String,
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PageObservation {
    /// Observation for a page that answered with an HTTP status
    pub fn status(url: impl Into<String>, status: u16) -> Self {
        Self {
            phase: None,
            url: url.into(),
            status: Some(status),
            error: None,
        }
    }

    /// Observation for a page whose navigation failed
    pub fn error(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            phase: None,
            url: url.into(),
            status: None,
            error: Some(error.into()),
        }
    }

    /// Tags the observation with a phase
    pub fn in_phase(mut self, phase: Phase) -> Self {
        self.phase = Some(phase);
        self
    }

    /// 2xx status
    pub fn is_ok(&self) -> bool {
        matches!(self.status, Some(code) if (200..300).contains(&code))
    }

    /// Anything that is not a 2xx status, including navigation errors
    pub fn is_broken(&self) -> bool {
        !self.is_ok()
    }
}
