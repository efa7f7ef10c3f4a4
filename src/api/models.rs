//! API request and response models.
//!
//! Request bodies keep every field optional so that a missing field is
//! reported as a `VALIDATION_ERROR` naming the field rather than a generic
//! deserialization failure. `validate` turns a body into its normalized
//! form and the sheet row it is stored as.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::{IntoParams, ToSchema};

use crate::ai::ContentSource;
use crate::auth::SessionUser;
use crate::error::{PortalError, PortalResult};

const MAX_SHORT: usize = 200;
const MAX_LONG: usize = 4000;

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,
    /// Machine-readable code (e.g. `RATE_LIMITED`)
    pub code: String,
}

/// Service health.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Always `ok` when the process answers
    pub status: String,
    /// Crate version
    pub version: String,
    /// Seconds since start
    pub uptime_seconds: u64,
    /// Whether an AI model is configured
    pub ai_enabled: bool,
    /// Whether confirmation email is delivered
    pub email_enabled: bool,
    /// Rows currently tracked by each rate limiter
    pub rate_limited_clients: BTreeMap<String, usize>,
}

// ==================== VALIDATION HELPERS ====================

fn required(value: Option<String>, field: &str, max: usize) -> PortalResult<String> {
    let value = value.map(|v| v.trim().to_string()).unwrap_or_default();
    if value.is_empty() {
        return Err(PortalError::validation(format!("{field} is required")));
    }
    if value.chars().count() > max {
        return Err(PortalError::validation(format!("{field} must be at most {max} characters")));
    }
    Ok(value)
}

fn optional(value: Option<String>, field: &str, max: usize) -> PortalResult<String> {
    let value = value.map(|v| v.trim().to_string()).unwrap_or_default();
    if value.chars().count() > max {
        return Err(PortalError::validation(format!("{field} must be at most {max} characters")));
    }
    Ok(value)
}

/// Loose address check: one `@`, a non-empty local part, a dotted domain, no spaces.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}

/// Phone numbers: 7 to 15 digits with optional `+`, spaces, dashes, dots and parentheses.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    (7..=15).contains(&digits)
        && phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '.' | '(' | ')'))
}

fn email_field(value: Option<String>) -> PortalResult<String> {
    let email = required(value, "email", MAX_SHORT)?.to_lowercase();
    if !is_valid_email(&email) {
        return Err(PortalError::validation("email is not a valid address"));
    }
    Ok(email)
}

fn phone_field(value: Option<String>) -> PortalResult<String> {
    let phone = required(value, "phone", MAX_SHORT)?;
    if !is_valid_phone(&phone) {
        return Err(PortalError::validation("phone is not a valid number"));
    }
    Ok(phone)
}

/// RFC 3339 timestamp used in every sheet row.
#[must_use]
pub fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn cell(row: &[String], index: usize) -> String {
    row.get(index).cloned().unwrap_or_default()
}

// ==================== REGISTRATION ====================

/// Public event registration form.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    /// Full name
    #[serde(alias = "fullName")]
    pub name: Option<String>,
    /// Contact email
    pub email: Option<String>,
    /// Contact phone
    pub phone: Option<String>,
    /// College or institution
    pub college: Option<String>,
    /// Year of study
    pub year: Option<String>,
    /// Department or major
    pub department: Option<String>,
    /// Areas of interest
    pub interests: Option<String>,
}

/// A validated registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Full name
    pub name: String,
    /// Lower-cased email
    pub email: String,
    /// Phone
    pub phone: String,
    /// College
    pub college: String,
    /// Year of study, may be empty
    pub year: String,
    /// Department, may be empty
    pub department: String,
    /// Interests, may be empty
    pub interests: String,
}

impl RegistrationRequest {
    /// Check required fields and formats.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first offending field.
    pub fn validate(self) -> PortalResult<Registration> {
        Ok(Registration {
            name: required(self.name, "name", MAX_SHORT)?,
            email: email_field(self.email)?,
            phone: phone_field(self.phone)?,
            college: required(self.college, "college", MAX_SHORT)?,
            year: optional(self.year, "year", MAX_SHORT)?,
            department: optional(self.department, "department", MAX_SHORT)?,
            interests: optional(self.interests, "interests", MAX_LONG)?,
        })
    }
}

impl Registration {
    /// `Registrations!A:J` row.
    #[must_use]
    pub fn to_row(&self, id: &str, at: DateTime<Utc>, client_key: &str) -> Vec<String> {
        vec![
            id.to_string(),
            timestamp(at),
            self.name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.college.clone(),
            self.year.clone(),
            self.department.clone(),
            self.interests.clone(),
            client_key.to_string(),
        ]
    }
}

/// Created registration.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    /// Always true
    pub success: bool,
    /// Reference shown to the registrant
    pub registration_id: String,
}

/// Stored registration as listed to admins.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    /// Registration reference
    pub id: String,
    /// Submission time
    pub submitted_at: String,
    /// Full name
    pub name: String,
    /// Email
    pub email: String,
    /// Phone
    pub phone: String,
    /// College
    pub college: String,
    /// Year of study
    pub year: String,
    /// Department
    pub department: String,
    /// Interests
    pub interests: String,
}

impl RegistrationRecord {
    /// Parse a sheet row; rows without an id are skipped.
    #[must_use]
    pub fn from_row(row: &[String]) -> Option<Self> {
        let id = cell(row, 0);
        if id.trim().is_empty() {
            return None;
        }
        Some(Self {
            id,
            submitted_at: cell(row, 1),
            name: cell(row, 2),
            email: cell(row, 3),
            phone: cell(row, 4),
            college: cell(row, 5),
            year: cell(row, 6),
            department: cell(row, 7),
            interests: cell(row, 8),
        })
    }
}

/// `?email=` filter for registrations.
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct RegistrationQuery {
    /// Exact email match, case-insensitive
    pub email: Option<String>,
}

// ==================== PARTICIPATION ====================

/// Roles accepted by the participation intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantRole {
    /// A founding team pitching a venture
    Startup,
    /// An experienced advisor
    Mentor,
    /// An angel or fund representative
    Investor,
    /// An event helper
    Volunteer,
}

impl ParticipantRole {
    /// All roles, in sheet order.
    pub const ALL: [Self; 4] = [Self::Startup, Self::Mentor, Self::Investor, Self::Volunteer];

    /// Parse a role tag, case-insensitive.
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(tag.trim()))
    }

    /// Lower-case tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Startup => "startup",
            Self::Mentor => "mentor",
            Self::Investor => "investor",
            Self::Volunteer => "volunteer",
        }
    }

    /// Role-specific detail fields and whether each is required, in column order.
    #[must_use]
    pub const fn detail_fields(self) -> [(&'static str, bool); 4] {
        match self {
            Self::Startup => [
                ("startupName", true),
                ("stage", true),
                ("description", true),
                ("website", false),
            ],
            Self::Mentor => [
                ("expertise", true),
                ("experience", true),
                ("linkedin", false),
                ("availability", false),
            ],
            Self::Investor => [
                ("firm", true),
                ("investmentFocus", true),
                ("ticketSize", false),
                ("linkedin", false),
            ],
            Self::Volunteer => [
                ("availability", true),
                ("skills", true),
                ("motivation", false),
                ("department", false),
            ],
        }
    }
}

/// Multi-role participation application.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParticipationRequest {
    /// `startup`, `mentor`, `investor` or `volunteer`
    pub role: Option<String>,
    /// Applicant name
    #[serde(alias = "fullName")]
    pub name: Option<String>,
    /// Contact email
    pub email: Option<String>,
    /// Contact phone
    pub phone: Option<String>,
    /// Company, college or fund
    pub organization: Option<String>,
    /// Role-specific fields
    #[serde(default)]
    pub details: BTreeMap<String, String>,
}

/// A validated participation application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participation {
    /// Applicant role
    pub role: ParticipantRole,
    /// Applicant name
    pub name: String,
    /// Lower-cased email
    pub email: String,
    /// Phone
    pub phone: String,
    /// Organization, may be empty
    pub organization: String,
    /// Role detail values in column order
    pub details: [String; 4],
}

impl ParticipationRequest {
    /// Check the role, the shared fields and the role's required details.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first offending field.
    pub fn validate(mut self) -> PortalResult<Participation> {
        let tag = required(self.role.take(), "role", MAX_SHORT)?;
        let role = ParticipantRole::parse(&tag).ok_or_else(|| {
            PortalError::validation(format!(
                "role must be one of startup, mentor, investor, volunteer; got {tag}"
            ))
        })?;

        let name = required(self.name, "name", MAX_SHORT)?;
        let email = email_field(self.email)?;
        let phone = phone_field(self.phone)?;
        let organization = optional(self.organization, "organization", MAX_SHORT)?;

        let mut details: [String; 4] = Default::default();
        for (slot, (key, is_required)) in details.iter_mut().zip(role.detail_fields()) {
            let value = self.details.remove(key);
            *slot = if is_required {
                required(value, key, MAX_LONG)?
            } else {
                optional(value, key, MAX_LONG)?
            };
        }

        Ok(Participation {
            role,
            name,
            email,
            phone,
            organization,
            details,
        })
    }
}

impl Participation {
    /// `Participation!A:L` row.
    #[must_use]
    pub fn to_row(&self, id: &str, at: DateTime<Utc>, client_key: &str) -> Vec<String> {
        let mut row = vec![
            id.to_string(),
            timestamp(at),
            self.role.as_str().to_string(),
            self.name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.organization.clone(),
        ];
        row.extend(self.details.iter().cloned());
        row.push(client_key.to_string());
        row
    }
}

/// Accepted participation application.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParticipationResponse {
    /// Always true
    pub success: bool,
    /// Reference shown to the applicant
    pub application_id: String,
    /// Role applied for
    pub role: ParticipantRole,
}

/// Stored application as listed to admins.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRecord {
    /// Application reference
    pub id: String,
    /// Submission time
    pub submitted_at: String,
    /// Role applied for
    pub role: ParticipantRole,
    /// Applicant name
    pub name: String,
    /// Email
    pub email: String,
    /// Phone
    pub phone: String,
    /// Organization
    pub organization: String,
    /// Non-empty role details by field name
    pub details: BTreeMap<String, String>,
}

impl ParticipantRecord {
    /// Parse a sheet row; rows without an id or a known role are skipped.
    #[must_use]
    pub fn from_row(row: &[String]) -> Option<Self> {
        let id = cell(row, 0);
        let role = ParticipantRole::parse(&cell(row, 2))?;
        if id.trim().is_empty() {
            return None;
        }
        let details = role
            .detail_fields()
            .iter()
            .enumerate()
            .map(|(i, (key, _))| ((*key).to_string(), cell(row, 7 + i)))
            .filter(|(_, value)| !value.is_empty())
            .collect();

        Some(Self {
            id,
            submitted_at: cell(row, 1),
            role,
            name: cell(row, 3),
            email: cell(row, 4),
            phone: cell(row, 5),
            organization: cell(row, 6),
            details,
        })
    }
}

/// `?role=` filter for participants.
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct ParticipantQuery {
    /// Only this role
    pub role: Option<String>,
}

// ==================== GENERATION ====================

/// Content generation request.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct GenerateRequest {
    /// `business_description`, `pitch_outline`, `executive_summary`,
    /// `presentation_slides`; anything else yields a generic document
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Free-text inputs; numbers and booleans are accepted as text
    #[serde(default)]
    #[schema(value_type = Object)]
    pub inputs: BTreeMap<String, serde_json::Value>,
}

impl GenerateRequest {
    /// Text form of the inputs. Nulls, arrays and objects are dropped.
    #[must_use]
    pub fn text_inputs(&self) -> BTreeMap<String, String> {
        self.inputs
            .iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    serde_json::Value::String(s) => s.clone(),
                    serde_json::Value::Number(n) => n.to_string(),
                    serde_json::Value::Bool(b) => b.to_string(),
                    _ => return None,
                };
                Some((key.clone(), text))
            })
            .collect()
    }
}

/// Generated document.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GenerateResponse {
    /// Requested type tag, echoed
    #[serde(rename = "type")]
    pub kind: String,
    /// Document text
    pub content: String,
    /// `ai` or `fallback`
    pub source: ContentSource,
}

/// One row of the `AIUsage` sheet as listed to admins.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AiUsageRecord {
    /// Generation time
    pub timestamp: String,
    /// Requesting client
    pub client_key: String,
    /// Content type tag
    pub content_type: String,
    /// `ai` or `fallback`
    pub source: String,
    /// Model name, empty for fallback
    pub model: String,
    /// Characters generated
    pub characters: u64,
}

impl AiUsageRecord {
    /// `AIUsage!A:F` row.
    #[must_use]
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.timestamp.clone(),
            self.client_key.clone(),
            self.content_type.clone(),
            self.source.clone(),
            self.model.clone(),
            self.characters.to_string(),
        ]
    }

    /// Parse a sheet row; rows without a timestamp are skipped.
    #[must_use]
    pub fn from_row(row: &[String]) -> Option<Self> {
        let timestamp = cell(row, 0);
        if timestamp.trim().is_empty() {
            return None;
        }
        Some(Self {
            timestamp,
            client_key: cell(row, 1),
            content_type: cell(row, 2),
            source: cell(row, 3),
            model: cell(row, 4),
            characters: cell(row, 5).parse().unwrap_or_default(),
        })
    }
}

// ==================== AUTH ====================

/// Admin login form.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Admin email
    pub email: Option<String>,
    /// Password
    pub password: Option<String>,
}

impl LoginRequest {
    /// Require both fields.
    ///
    /// # Errors
    ///
    /// Returns a validation error if either field is blank.
    pub fn validate(self) -> PortalResult<(String, String)> {
        let email = required(self.email, "email", MAX_SHORT)?;
        let password = self
            .password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| PortalError::validation("password is required"))?;
        Ok((email, password))
    }
}

/// The signed-in admin.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    /// Session payload
    pub user: SessionUser,
}

/// Logout acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LogoutResponse {
    /// Always true
    pub success: bool,
}

/// List wrapper for admin endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[aliases(
    RegistrationList = ListResponse<RegistrationRecord>,
    ParticipantList = ListResponse<ParticipantRecord>,
    AiUsageList = ListResponse<AiUsageRecord>
)]
pub struct ListResponse<T> {
    /// Number of items
    pub count: usize,
    /// Items in submission order
    pub items: Vec<T>,
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            count: items.len(),
            items,
        }
    }
}
