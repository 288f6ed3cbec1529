//! Core data model: hosting categories, export formats, and resources.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::error::{LocateError, UnknownNameError};

/// Which provider subsystem serves a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HostingCategory {
    /// Not specified by the share URL; must be guessed by probing.
    Unknown,
    /// Opaque blob stored in Drive.
    File,
    /// Native Docs document.
    Document,
    /// Native Slides presentation.
    Presentation,
    /// Native Sheets spreadsheet.
    Spreadsheet,
    /// Native Drawings drawing.
    Drawing,
}

impl HostingCategory {
    /// Every concrete category, in the default probing order.
    pub const KNOWN: [Self; 5] = [
        Self::Document,
        Self::Spreadsheet,
        Self::Presentation,
        Self::Drawing,
        Self::File,
    ];

    /// Path segment the provider uses for this category in share and export URLs.
    #[must_use]
    pub fn path_token(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::File => "file",
            Self::Document => "document",
            Self::Presentation => "presentation",
            Self::Spreadsheet => "spreadsheets",
            Self::Drawing => "drawings",
        }
    }

    /// Maps a share URL path segment back to its category.
    #[must_use]
    pub fn from_path_token(token: &str) -> Option<Self> {
        match token {
            "file" => Some(Self::File),
            "document" => Some(Self::Document),
            "presentation" => Some(Self::Presentation),
            "spreadsheets" => Some(Self::Spreadsheet),
            "drawings" => Some(Self::Drawing),
            _ => None,
        }
    }

    /// Returns true for categories that support export conversion.
    #[must_use]
    pub fn is_native_document(self) -> bool {
        matches!(
            self,
            Self::Document | Self::Presentation | Self::Spreadsheet | Self::Drawing
        )
    }

    /// Returns true unless this is the `Unknown` sentinel.
    #[must_use]
    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }
}

impl fmt::Display for HostingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_token())
    }
}

impl FromStr for HostingCategory {
    type Err = UnknownNameError;

    /// Accepts path tokens plus singular spellings, case-insensitively.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "unknown" => Ok(Self::Unknown),
            "file" => Ok(Self::File),
            "document" | "doc" => Ok(Self::Document),
            "presentation" => Ok(Self::Presentation),
            "spreadsheet" | "spreadsheets" => Ok(Self::Spreadsheet),
            "drawing" | "drawings" => Ok(Self::Drawing),
            _ => Err(UnknownNameError {
                kind: "category",
                value: value.to_string(),
                expected: "file, document, presentation, spreadsheet, drawing, unknown"
                    .to_string(),
            }),
        }
    }
}

/// Output encoding requested from the export endpoint of native documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Pdf,
    Docx,
    Odt,
    Rtf,
    Txt,
    Html,
    Epub,
    Xlsx,
    Ods,
    Csv,
    Tsv,
    Pptx,
    Odp,
    Png,
    Jpeg,
    Svg,
}

impl ExportFormat {
    /// All supported formats.
    pub const ALL: [Self; 16] = [
        Self::Pdf,
        Self::Docx,
        Self::Odt,
        Self::Rtf,
        Self::Txt,
        Self::Html,
        Self::Epub,
        Self::Xlsx,
        Self::Ods,
        Self::Csv,
        Self::Tsv,
        Self::Pptx,
        Self::Odp,
        Self::Png,
        Self::Jpeg,
        Self::Svg,
    ];

    /// The `format` value sent to the export endpoint.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Odt => "odt",
            Self::Rtf => "rtf",
            Self::Txt => "txt",
            Self::Html => "html",
            Self::Epub => "epub",
            Self::Xlsx => "xlsx",
            Self::Ods => "ods",
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Pptx => "pptx",
            Self::Odp => "odp",
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Svg => "svg",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = UnknownNameError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        let normalized = if normalized == "jpg" {
            "jpeg"
        } else {
            normalized.as_str()
        };
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == normalized)
            .ok_or_else(|| UnknownNameError {
                kind: "export format",
                value: value.to_string(),
                expected: Self::ALL
                    .iter()
                    .map(|format| format.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// One hosted document: an identifier plus the category serving it.
///
/// The category may start as [`HostingCategory::Unknown`] and move to a
/// concrete value once, through [`Resource::assign_category`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Resource {
    id: String,
    category: HostingCategory,
}

impl Resource {
    /// Creates a resource from an explicit id and category.
    ///
    /// # Errors
    ///
    /// Returns [`LocateError::InvalidId`] when `id` is empty or contains
    /// characters outside letters, digits, `-` and `_`.
    pub fn new(id: impl Into<String>, category: HostingCategory) -> Result<Self, LocateError> {
        let id = id.into();
        if !is_valid_id(&id) {
            return Err(LocateError::invalid_id(&id));
        }
        Ok(Self { id, category })
    }

    /// The provider's document identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The hosting category, possibly still `Unknown`.
    #[must_use]
    pub fn category(&self) -> HostingCategory {
        self.category
    }

    /// Returns true while the category still has to be guessed.
    #[must_use]
    pub fn needs_category(&self) -> bool {
        !self.category.is_known()
    }

    /// Moves an `Unknown` resource to a concrete category.
    ///
    /// # Errors
    ///
    /// Returns [`LocateError::InvalidCategory`] when the resource already has a
    /// concrete category or when `category` is itself `Unknown`.
    pub fn assign_category(self, category: HostingCategory) -> Result<Self, LocateError> {
        if self.category.is_known() {
            return Err(LocateError::invalid_category(&self.id, self.category));
        }
        if !category.is_known() {
            return Err(LocateError::invalid_category(&self.id, category));
        }
        Ok(Self {
            id: self.id,
            category,
        })
    }
}

/// Returns true if `id` matches the provider's identifier syntax.
#[must_use]
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
