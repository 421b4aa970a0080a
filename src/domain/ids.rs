//! Domain identifier types with validation
//!
//! Newtype wrappers for the identifiers that make up an export's identity.
//! Each type rejects empty input so a blank id never reaches the job store.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Export type identifier (e.g. `"DailyAttendanceReport"`)
///
/// # Examples
///
/// ```
/// use sheetforge::domain::ids::ExportType;
/// use std::str::FromStr;
///
/// let export_type = ExportType::from_str("DailyAttendanceReport").unwrap();
/// assert_eq!(export_type.as_str(), "DailyAttendanceReport");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExportType(String);

impl ExportType {
    /// Creates a new ExportType, rejecting blank values
    pub fn new(value: impl Into<String>) -> Result<Self, String> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err("Export type cannot be empty".to_string());
        }
        Ok(Self(value))
    }

    /// Returns the export type as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifier of the user who requested an export
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequesterId(String);

impl RequesterId {
    /// Creates a new RequesterId, rejecting blank values
    pub fn new(value: impl Into<String>) -> Result<Self, String> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err("Requester ID cannot be empty".to_string());
        }
        Ok(Self(value))
    }

    /// Returns the requester ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifier of the organization an export is scoped to
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrganizationId(String);

impl OrganizationId {
    /// Creates a new OrganizationId, rejecting blank values
    pub fn new(value: impl Into<String>) -> Result<Self, String> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err("Organization ID cannot be empty".to_string());
        }
        Ok(Self(value))
    }

    /// Returns the organization ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Unique identifier of an export job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(Uuid);

impl JobId {
    /// Generates a fresh random job ID
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl FromStr for JobId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| format!("Invalid job ID '{s}': {e}"))
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! impl_string_id {
    ($($name:ident),+) => {
        $(
            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl FromStr for $name {
                type Err = String;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    Self::new(s)
                }
            }

            impl AsRef<str> for $name {
                fn as_ref(&self) -> &str {
                    &self.0
                }
            }
        )+
    };
}

impl_string_id!(ExportType, RequesterId, OrganizationId);
