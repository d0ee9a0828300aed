use serde::{Deserialize, Serialize};

/// Class of an externally hosted file. Each class lives in its own fixed
/// destination folder of the object store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "asset_class", rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum AssetClass {
    FinanceProof,
    EventThumbnail,
    ManagementDecree,
    ManagementStructure,
}

impl AssetClass {
    pub const ALL: [AssetClass; 4] = [
        AssetClass::FinanceProof,
        AssetClass::EventThumbnail,
        AssetClass::ManagementDecree,
        AssetClass::ManagementStructure,
    ];

    /// Prefix of the final object name, e.g. `finance-proof-<name>-<ts>`
    pub fn name_prefix(&self) -> &'static str {
        match self {
            AssetClass::FinanceProof => "finance-proof",
            AssetClass::EventThumbnail => "event-thumbnail",
            AssetClass::ManagementDecree => "management-decree",
            AssetClass::ManagementStructure => "management-structure",
        }
    }

    /// Name of the entity field holding the reference
    pub fn field_name(&self) -> &'static str {
        match self {
            AssetClass::FinanceProof => "proof",
            AssetClass::EventThumbnail => "thumbnail",
            AssetClass::ManagementDecree => "decree",
            AssetClass::ManagementStructure => "structure",
        }
    }
}

impl std::fmt::Display for AssetClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name_prefix())
    }
}

/// A file received from the caller, not yet uploaded anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl LocalFile {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Lower-cased extension of the original file name, if any
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.file_name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}

/// What the caller wants to happen to one asset field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AssetChange {
    #[default]
    Keep,
    Replace(LocalFile),
    Remove,
}

/// One asset field of a form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSlot {
    pub class: AssetClass,
    pub change: AssetChange,
}

impl AssetSlot {
    pub fn replace(class: AssetClass, file: LocalFile) -> Self {
        Self { class, change: AssetChange::Replace(file) }
    }

    pub fn remove(class: AssetClass) -> Self {
        Self { class, change: AssetChange::Remove }
    }
}
