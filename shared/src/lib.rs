//! Bursary portal client core.
//!
//! Everything here is independent of the browser:
//! - domain models consumed from the backend,
//! - `document_url` normalization (`documents`),
//! - the session store (`session`),
//! - the route table and guard (`route`, `guard`),
//! - the HTTP wrapper and resource accessors (`request`, `protocol`, `client`, `api`),
//! - ordering of in-flight requests (`ticket`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod api;
pub mod client;
pub mod config;
pub mod documents;
pub mod error;
pub mod guard;
pub mod protocol;
pub mod request;
pub mod route;
mod serde_helper;
pub mod session;
pub mod ticket;

pub use client::ApiClient;
pub use config::{ClientConfig, CredentialsMode};
pub use error::{ApiError, ApiErrorKind, ApiResult};
pub use guard::{Access, can_access};
pub use route::AppRoute;
pub use session::{KeyValueStore, MemoryStore, Session, SessionStore, TokenSource};
pub use ticket::{InFlight, RequestSeq, Ticket};

// =========================================================
// Constants
// =========================================================

pub const STORAGE_TOKEN_KEY: &str = "cfg_token";
pub const STORAGE_USER_KEY: &str = "cfg_user";
pub const HEADER_AUTHORIZATION: &str = "Authorization";

// =========================================================
// Users & roles
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Student,
    Committee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Student => "STUDENT",
            Role::Committee => "COMMITTEE",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub role: Role,
}

// =========================================================
// Applications
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 3] = [Self::Pending, Self::Approved, Self::Rejected];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }

    /// Human label used by filters and badges.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    /// Inverse of [`as_str`](Self::as_str); anything else (including `""`) is `None`.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A funding application as returned by the backend.
///
/// The student listing omits the applicant columns, hence the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: u64,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub national_id: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub course: String,
    #[serde(default, deserialize_with = "serde_helper::lenient_u32")]
    pub year_of_study: Option<u32>,
    #[serde(default, deserialize_with = "serde_helper::lenient_u32")]
    pub cycle_year: Option<u32>,
    #[serde(default, deserialize_with = "serde_helper::lenient_f64")]
    pub amount_requested: Option<f64>,
    #[serde(default, deserialize_with = "serde_helper::lenient_f64")]
    pub amount_allocated: Option<f64>,
    pub status: ApplicationStatus,
    #[serde(default, deserialize_with = "serde_helper::lenient_string")]
    pub taada_flag: Option<String>,
    #[serde(default, deserialize_with = "documents::deserialize_document_urls")]
    pub document_url: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Formats an amount the way the tables show it: two decimals, `-` when absent.
pub fn format_amount(amount: Option<f64>) -> String {
    match amount {
        Some(v) => format!("{:.2}", v),
        None => "-".to_string(),
    }
}

/// Parses an admin-entered allocation. Must be a finite amount above zero.
pub fn parse_allocated_amount(input: &str) -> Result<f64, String> {
    let input = input.trim();
    let amount = input
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("\"{}\" is not a valid amount", input))?;
    if amount <= 0.0 {
        return Err("Amount must be greater than 0".to_string());
    }
    Ok(amount)
}

// =========================================================
// Audit trail
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: u64,
    #[serde(default)]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub admin_email: String,
    pub action: String,
    #[serde(default)]
    pub old_value: Option<serde_json::Value>,
    #[serde(default)]
    pub new_value: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl AuditLogEntry {
    /// Flattens an `old_value`/`new_value` object into `(label, value)` rows.
    ///
    /// Keys lose their underscores; numeric amounts are shown with two decimals.
    /// Anything that is not an object yields no rows.
    pub fn changes(value: Option<&serde_json::Value>) -> Vec<(String, String)> {
        let Some(serde_json::Value::Object(map)) = value else {
            return Vec::new();
        };

        map.iter()
            .map(|(key, val)| {
                let label = key.replace('_', " ");
                let text = match val {
                    serde_json::Value::Number(n) if key.contains("amount") || key.contains("price") => {
                        n.as_f64()
                            .map(|f| format!("{:.2}", f))
                            .unwrap_or_else(|| n.to_string())
                    }
                    serde_json::Value::String(s) => s.clone(),
                    serde_json::Value::Null => "null".to_string(),
                    other => other.to_string(),
                };
                (label, text)
            })
            .collect()
    }
}

// =========================================================
// Students
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub national_id: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub course: String,
    #[serde(default, deserialize_with = "serde_helper::lenient_u32")]
    pub year_of_study: Option<u32>,
}

// =========================================================
// Request payloads & response envelopes
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterStudentRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub national_id: String,
    pub institution: String,
    pub course: String,
    pub year_of_study: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub full_name: String,
    pub institution: String,
    pub course: String,
    pub year_of_study: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdated {
    pub student: StudentProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterAdminRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

/// Admin listing envelope: `{ "data": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationList {
    #[serde(default)]
    pub data: Vec<Application>,
}

/// Audit trail envelope: `{ "audit_logs": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditLogList {
    #[serde(default)]
    pub audit_logs: Vec<AuditLogEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn application_decodes_loose_backend_shapes() {
        let raw = json!({
            "id": 7,
            "full_name": "Jane Wanjiku",
            "national_id": "12345678",
            "institution": "UoN",
            "course": "BSc CS",
            "year_of_study": "2",
            "cycle_year": 2025,
            "amount_requested": "45000.00",
            "amount_allocated": null,
            "status": "PENDING",
            "taada_flag": true,
            "document_url": "[\"uploads/a.pdf\",\"uploads/b.pdf\"]",
            "created_at": "2025-01-10T08:30:00.000Z"
        });

        let app: Application = serde_json::from_value(raw).unwrap();
        assert_eq!(app.year_of_study, Some(2));
        assert_eq!(app.amount_requested, Some(45000.0));
        assert_eq!(app.amount_allocated, None);
        assert_eq!(app.taada_flag.as_deref(), Some("true"));
        assert_eq!(app.document_url, vec!["uploads/a.pdf", "uploads/b.pdf"]);
        assert_eq!(app.status, ApplicationStatus::Pending);
    }

    #[test]
    fn student_listing_without_applicant_columns_decodes() {
        let raw = json!({
            "id": 3,
            "status": "APPROVED",
            "amount_allocated": 12000,
            "created_at": "2025-02-01T00:00:00Z"
        });

        let app: Application = serde_json::from_value(raw).unwrap();
        assert!(app.full_name.is_empty());
        assert!(app.document_url.is_empty());
        assert_eq!(format_amount(app.amount_allocated), "12000.00");
        assert_eq!(format_amount(app.amount_requested), "-");
    }

    #[test]
    fn allocated_amount_must_be_finite_and_positive() {
        assert_eq!(parse_allocated_amount(" 15000 "), Ok(15000.0));
        assert_eq!(parse_allocated_amount("2500.50"), Ok(2500.5));

        for bad in ["inf", "-inf", "NaN", "infinity", "abc", ""] {
            assert!(parse_allocated_amount(bad).is_err(), "accepted {:?}", bad);
        }
        for not_positive in ["0", "-5"] {
            assert_eq!(
                parse_allocated_amount(not_positive),
                Err("Amount must be greater than 0".to_string())
            );
        }
    }

    #[test]
    fn status_parse_round_trips_labels() {
        for status in ApplicationStatus::ALL {
            assert_eq!(ApplicationStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ApplicationStatus::parse(""), None);
        assert_eq!(ApplicationStatus::parse("pending"), None);
    }

    #[test]
    fn role_uses_upper_case_wire_names() {
        let user: User =
            serde_json::from_str(r#"{"id":1,"email":"a@b.com","role":"COMMITTEE"}"#).unwrap();
        assert_eq!(user.role, Role::Committee);
        assert_eq!(
            serde_json::to_string(&Role::Admin).unwrap(),
            "\"ADMIN\"".to_string()
        );
    }

    #[test]
    fn audit_changes_flatten_objects() {
        let value = json!({ "status": "APPROVED", "amount_allocated": 1500 });
        let rows = AuditLogEntry::changes(Some(&value));

        assert!(rows.contains(&("status".to_string(), "APPROVED".to_string())));
        assert!(rows.contains(&("amount allocated".to_string(), "1500.00".to_string())));
        assert!(AuditLogEntry::changes(None).is_empty());
        assert!(AuditLogEntry::changes(Some(&json!("PENDING"))).is_empty());
    }

    #[test]
    fn envelopes_tolerate_missing_lists() {
        let list: ApplicationList = serde_json::from_str("{}").unwrap();
        assert!(list.data.is_empty());
        let logs: AuditLogList = serde_json::from_str(r#"{"message":"ok"}"#).unwrap();
        assert!(logs.audit_logs.is_empty());
    }
}
