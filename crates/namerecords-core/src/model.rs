// ABOUTME: Defines the NameRecord entity and the candidate shapes used for creation and partial updates.
// ABOUTME: Empty strings in request bodies are normalized to absent fields before any checks run.

use serde::{Deserialize, Serialize};

use crate::validate::ValidationError;

/// A persisted name record as stored in the `namerecords` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRecord {
    pub id: i64,
    pub name: String,
    pub gender: String,
    pub era: String,
    pub recent: Option<bool>,
}

/// Fields supplied by a client on create or update. Every field is optional
/// here; creation narrows this into a `NewNameRecord` via `require_all`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NameRecordFields {
    #[serde(default, deserialize_with = "non_empty")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub era: Option<String>,
    #[serde(default)]
    pub recent: Option<bool>,
}

/// A fully specified record ready for insertion. The id is assigned by storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNameRecord {
    pub name: String,
    pub gender: String,
    pub era: String,
    pub recent: Option<bool>,
}

/// A partial update. Only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameRecordPatch {
    pub name: Option<String>,
    pub gender: Option<String>,
    pub era: Option<String>,
    pub recent: Option<bool>,
}

impl NameRecordFields {
    /// Narrow into a `NewNameRecord`, reporting the first missing required
    /// field in the order name, gender, era.
    pub fn require_all(self) -> Result<NewNameRecord, ValidationError> {
        let name = self.name.ok_or(ValidationError::Missing("name"))?;
        let gender = self.gender.ok_or(ValidationError::Missing("gender"))?;
        let era = self.era.ok_or(ValidationError::Missing("era"))?;
        Ok(NewNameRecord {
            name,
            gender,
            era,
            recent: self.recent,
        })
    }

    /// True when at least one field carries a truthy value. `recent: false`
    /// alone does not count as an update.
    pub fn has_update(&self) -> bool {
        self.name.is_some()
            || self.gender.is_some()
            || self.era.is_some()
            || self.recent == Some(true)
    }

    /// Convert into the patch applied by storage.
    pub fn into_patch(self) -> NameRecordPatch {
        NameRecordPatch {
            name: self.name,
            gender: self.gender,
            era: self.era,
            recent: self.recent,
        }
    }
}

impl NameRecordPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.gender.is_none() && self.era.is_none() && self.recent.is_none()
    }
}

impl From<&NewNameRecord> for NameRecordFields {
    fn from(record: &NewNameRecord) -> Self {
        Self {
            name: Some(record.name.clone()),
            gender: Some(record.gender.clone()),
            era: Some(record.era.clone()),
            recent: record.recent,
        }
    }
}

fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
