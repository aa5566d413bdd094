//! # File-metadata records
//!
//! The shapes exchanged with the `/files` endpoints. A [`FileRecord`] is a
//! metadata pointer to a stored file (name, type, size, path, ownership and
//! access level), never the file's bytes.
//!
//! | Type | Used for |
//! |------|----------|
//! | [`FileRecord`] | A record as returned by the backend, including `file_id` and timestamps. |
//! | [`FileCreateInput`] | Body of `POST /files`. `access_level` defaults to `private` when omitted. |
//! | [`FileUpdateInput`] | Body of `PUT /files/{id}`. Every field optional; absent fields are not serialised. |
//! | [`FileQuery`] | Filters for `GET /files`. |
//! | [`Page`] | `skip`/`limit` pagination window. |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Who may see a file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    #[default]
    Private,
    Public,
    Internal,
    Confidential,
}

impl AccessLevel {
    pub const ALL: [AccessLevel; 4] = [
        AccessLevel::Private,
        AccessLevel::Public,
        AccessLevel::Internal,
        AccessLevel::Confidential,
    ];

    /// Wire value, also used as the `<option>` value in forms.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::Private => "private",
            AccessLevel::Public => "public",
            AccessLevel::Internal => "internal",
            AccessLevel::Confidential => "confidential",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AccessLevel::Private => "Private",
            AccessLevel::Public => "Public",
            AccessLevel::Internal => "Internal",
            AccessLevel::Confidential => "Confidential",
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the four access levels.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown access level: {0}")]
pub struct UnknownAccessLevel(pub String);

impl FromStr for AccessLevel {
    type Err = UnknownAccessLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AccessLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| UnknownAccessLevel(s.to_string()))
    }
}

/// A file-metadata record as stored by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Assigned by the backend; never changes.
    pub file_id: i64,
    pub file_name: String,
    pub file_type: String,
    /// Size in bytes.
    pub file_size: u64,
    pub file_path: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub access_level: AccessLevel,
    pub created_at: String,
    pub updated_at: String,
}

/// Body of a create request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FileCreateInput {
    pub file_name: String,
    pub file_type: String,
    pub file_size: u64,
    pub file_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default)]
    pub access_level: AccessLevel,
}

/// Partial patch for an existing record. Only `Some` fields go on the wire.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FileUpdateInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_level: Option<AccessLevel>,
}

impl FileUpdateInput {
    /// True when the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        *self == FileUpdateInput::default()
    }
}

/// Filters accepted by `GET /files`. `None` means "any".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FileQuery {
    pub department: Option<String>,
    pub owner: Option<String>,
    pub file_type: Option<String>,
    pub access_level: Option<AccessLevel>,
    pub min_size: Option<u64>,
    pub max_size: Option<u64>,
}

impl FileQuery {
    pub fn is_empty(&self) -> bool {
        *self == FileQuery::default()
    }
}

/// Pagination window for list requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub skip: u32,
    pub limit: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: 100,
        }
    }
}

impl Page {
    pub fn new(skip: u32, limit: u32) -> Self {
        Self { skip, limit }
    }

    /// The window directly after this one.
    pub fn next(self) -> Self {
        Self {
            skip: self.skip.saturating_add(self.limit),
            ..self
        }
    }

    /// The window directly before this one, clamped at the start.
    pub fn previous(self) -> Self {
        Self {
            skip: self.skip.saturating_sub(self.limit),
            ..self
        }
    }

    pub fn is_first(&self) -> bool {
        self.skip == 0
    }

    /// 1-based page number for display.
    pub fn number(&self) -> u32 {
        if self.limit == 0 {
            1
        } else {
            self.skip / self.limit + 1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_level_defaults_to_private_on_create() {
        let input: FileCreateInput = serde_json::from_str(
            r#"{"file_name":"a.pdf","file_type":"pdf","file_size":10,"file_path":"/a.pdf"}"#,
        )
        .unwrap();
        assert_eq!(input.access_level, AccessLevel::Private);
        assert!(input.department.is_none());
    }

    #[test]
    fn test_access_level_rejects_unknown_values() {
        assert_eq!("internal".parse::<AccessLevel>(), Ok(AccessLevel::Internal));
        let err = "secret".parse::<AccessLevel>().unwrap_err();
        assert_eq!(err.to_string(), "unknown access level: secret");
        assert!(serde_json::from_str::<AccessLevel>(r#""secret""#).is_err());
    }

    #[test]
    fn test_partial_update_only_serialises_set_fields() {
        let patch = FileUpdateInput {
            file_name: Some("x".to_string()),
            ..Default::default()
        };
        let body = serde_json::to_value(&patch).unwrap();
        assert_eq!(body, serde_json::json!({ "file_name": "x" }));
        assert!(!patch.is_empty());
        assert!(FileUpdateInput::default().is_empty());
    }

    #[test]
    fn test_record_deserialises_backend_payload() {
        let record: FileRecord = serde_json::from_str(
            r#"{
                "file_id": 7,
                "file_name": "report.xlsx",
                "file_type": "xlsx",
                "file_size": 2048,
                "file_path": "/finance/report.xlsx",
                "department": null,
                "owner": "dana",
                "access_level": "confidential",
                "created_at": "2024-03-01T09:30:00",
                "updated_at": "2024-03-02T10:00:00.123456"
            }"#,
        )
        .unwrap();
        assert_eq!(record.file_id, 7);
        assert_eq!(record.department, None);
        assert_eq!(record.owner.as_deref(), Some("dana"));
        assert_eq!(record.access_level, AccessLevel::Confidential);
    }

    #[test]
    fn test_page_navigation() {
        let page = Page::default();
        assert!(page.is_first());
        assert_eq!(page.number(), 1);

        let second = page.next();
        assert_eq!(second, Page::new(100, 100));
        assert_eq!(second.number(), 2);
        assert_eq!(second.previous(), page);
        assert_eq!(page.previous(), page);
    }
}
