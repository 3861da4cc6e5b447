use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::InvalidSubjectId;

/// Opaque identifier of a subject, as handed out by the subject service.
///
/// Selector widgets carry identifiers as display strings, so the type round
/// trips through `Display` / `FromStr`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(pub String);

impl SubjectId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SubjectId {
    type Err = InvalidSubjectId;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.is_empty() {
            return Err(InvalidSubjectId::Empty);
        }
        Ok(Self(raw.to_string()))
    }
}

/// One labeled item: an image reference plus its editable caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: SubjectId,
    pub image_path: String,
    pub caption: String,
}

impl Subject {
    pub fn new(id: SubjectId, image_path: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            id,
            image_path: image_path.into(),
            caption: caption.into(),
        }
    }
}
