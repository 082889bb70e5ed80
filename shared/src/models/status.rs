//! Certificate status derived from remaining days

use serde::{Deserialize, Serialize};

use crate::types::Language;

/// Days before the due date during which a certificate should be renewed
pub const RENEWAL_WINDOW_DAYS: i64 = 30;

/// Status of a certificate
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Due date already passed
    Expired,
    /// Within the renewal window, due date included
    RenewSoon,
    Ok,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Expired => "expired",
            Status::RenewSoon => "renew_soon",
            Status::Ok => "ok",
        }
    }

    /// Highlight colour used by the records table, `None` for the default style
    pub fn color(&self) -> Option<&'static str> {
        match self {
            Status::Expired => Some("red"),
            Status::RenewSoon => Some("orange"),
            Status::Ok => None,
        }
    }

    pub fn label(&self, language: &Language) -> &'static str {
        match (self, language) {
            (Status::Expired, Language::English) => "Expired",
            (Status::RenewSoon, Language::English) => "Renew soon",
            (Status::Ok, Language::English) => "OK",
            (Status::Expired, Language::Portuguese) => "Vencido",
            (Status::RenewSoon, Language::Portuguese) => "Renovar",
            (Status::Ok, Language::Portuguese) => "Em dia",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label(&Language::English))
    }
}
