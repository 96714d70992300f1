//! Uploaded document metadata attached to an award or invoice.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Which collection a document is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Attached to an award record.
    Award,
    /// Attached to an invoice record.
    Invoice,
}

impl EntityKind {
    /// Lowercase storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Award => "award",
            Self::Invoice => "invoice",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when parsing an unknown entity kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown entity kind: {value}")]
pub struct EntityKindParseError {
    /// The rejected input.
    pub value: String,
}

impl std::str::FromStr for EntityKind {
    type Err = EntityKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "award" => Ok(Self::Award),
            "invoice" => Ok(Self::Invoice),
            other => Err(EntityKindParseError {
                value: other.to_owned(),
            }),
        }
    }
}

/// Metadata for one successfully uploaded file.
///
/// Immutable after creation. The binary lives with the external file-hosting
/// collaborator; only its URL is recorded here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Store-assigned identifier.
    pub id: i32,
    /// Original file name.
    pub file_name: String,
    /// URL returned by the file-hosting collaborator.
    pub file_url: String,
    /// MIME-like content type.
    pub file_type: String,
    /// File size in bytes, always positive.
    pub file_size: i64,
    /// Collection the document attaches to.
    pub entity_kind: EntityKind,
    /// Identifier of the referenced row in that collection.
    pub entity_id: i32,
    /// Upload instant.
    pub uploaded_at: DateTime<Utc>,
}

/// Validation errors raised when constructing document payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentValidationError {
    EmptyFileName,
    EmptyFileUrl,
    EmptyFileType,
    NonPositiveFileSize,
}

impl fmt::Display for DocumentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFileName => write!(f, "file name must not be empty"),
            Self::EmptyFileUrl => write!(f, "file URL must not be empty"),
            Self::EmptyFileType => write!(f, "file type must not be empty"),
            Self::NonPositiveFileSize => write!(f, "file size must be a positive byte count"),
        }
    }
}

impl std::error::Error for DocumentValidationError {}

/// Validated payload for recording an upload.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDocument {
    file_name: String,
    file_url: String,
    file_type: String,
    file_size: i64,
    entity_kind: EntityKind,
    entity_id: i32,
}

impl NewDocument {
    /// Validate and construct an upload record payload.
    ///
    /// Existence of the referenced row is the service's responsibility, not
    /// this constructor's.
    pub fn try_new(
        file_name: impl Into<String>,
        file_url: impl Into<String>,
        file_type: impl Into<String>,
        file_size: i64,
        entity_kind: EntityKind,
        entity_id: i32,
    ) -> Result<Self, DocumentValidationError> {
        let file_name = file_name.into();
        if file_name.trim().is_empty() {
            return Err(DocumentValidationError::EmptyFileName);
        }
        let file_url = file_url.into();
        if file_url.trim().is_empty() {
            return Err(DocumentValidationError::EmptyFileUrl);
        }
        let file_type = file_type.into();
        if file_type.trim().is_empty() {
            return Err(DocumentValidationError::EmptyFileType);
        }
        if file_size <= 0 {
            return Err(DocumentValidationError::NonPositiveFileSize);
        }
        Ok(Self {
            file_name,
            file_url,
            file_type,
            file_size,
            entity_kind,
            entity_id,
        })
    }

    /// Original file name.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Hosted file URL.
    pub fn file_url(&self) -> &str {
        &self.file_url
    }

    /// MIME-like content type.
    pub fn file_type(&self) -> &str {
        &self.file_type
    }

    /// Size in bytes.
    pub fn file_size(&self) -> i64 {
        self.file_size
    }

    /// Target collection.
    pub fn entity_kind(&self) -> EntityKind {
        self.entity_kind
    }

    /// Target row identifier.
    pub fn entity_id(&self) -> i32 {
        self.entity_id
    }
}
