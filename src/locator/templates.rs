//! Access URL templates per hosting category.
//!
//! The paths below are a protocol contract with the provider and must be
//! reproduced exactly. Only the base URLs vary (tests point them at a mock
//! server).

use super::error::LocateError;
use super::resource::{ExportFormat, HostingCategory, Resource};

/// Which configured base URL a template is served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TemplateHost {
    Drive,
    Docs,
}

#[derive(Debug)]
struct AccessTemplate {
    category: HostingCategory,
    host: TemplateHost,
    path: &'static str,
}

static ACCESS_TEMPLATES: [AccessTemplate; 5] = [
    AccessTemplate {
        category: HostingCategory::File,
        host: TemplateHost::Drive,
        path: "/uc?export=download&id={id}",
    },
    AccessTemplate {
        category: HostingCategory::Document,
        host: TemplateHost::Docs,
        path: "/document/d/{id}/export?format={format}",
    },
    AccessTemplate {
        category: HostingCategory::Presentation,
        host: TemplateHost::Docs,
        path: "/presentation/d/{id}/export/{format}",
    },
    AccessTemplate {
        category: HostingCategory::Spreadsheet,
        host: TemplateHost::Docs,
        path: "/spreadsheets/d/{id}/export?format={format}",
    },
    AccessTemplate {
        category: HostingCategory::Drawing,
        host: TemplateHost::Docs,
        path: "/drawings/d/{id}/export/{format}",
    },
];

/// Formats access URLs against a pair of provider base URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessTemplates {
    drive_base_url: String,
    docs_base_url: String,
}

impl AccessTemplates {
    /// Creates templates rooted at the given base URLs (trailing `/` ignored).
    #[must_use]
    pub fn new(drive_base_url: &str, docs_base_url: &str) -> Self {
        Self {
            drive_base_url: drive_base_url.trim_end_matches('/').to_string(),
            docs_base_url: docs_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Builds the access URL for `resource`.
    ///
    /// `format` is only substituted for native document categories; the file
    /// template has no format placeholder.
    ///
    /// # Errors
    ///
    /// Returns [`LocateError::InvalidCategory`] when the resource category is
    /// still `Unknown`.
    pub fn build(&self, resource: &Resource, format: ExportFormat) -> Result<String, LocateError> {
        let Some(template) = ACCESS_TEMPLATES
            .iter()
            .find(|template| template.category == resource.category())
        else {
            return Err(LocateError::invalid_category(
                resource.id(),
                resource.category(),
            ));
        };

        let base = match template.host {
            TemplateHost::Drive => &self.drive_base_url,
            TemplateHost::Docs => &self.docs_base_url,
        };
        let path = template
            .path
            .replace("{id}", resource.id())
            .replace("{format}", format.as_str());

        Ok(format!("{base}{path}"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn google() -> AccessTemplates {
        AccessTemplates::new("https://drive.google.com", "https://docs.google.com/")
    }

    fn resource(category: HostingCategory) -> Resource {
        Resource::new("ABC123", category).unwrap()
    }

    #[test]
    fn test_every_known_category_has_a_template() {
        for category in HostingCategory::KNOWN {
            assert!(
                ACCESS_TEMPLATES.iter().any(|t| t.category == category),
                "missing template for {category}"
            );
        }
    }

    #[test]
    fn test_build_file_url_ignores_format() {
        let templates = google();
        let pdf = templates
            .build(&resource(HostingCategory::File), ExportFormat::Pdf)
            .unwrap();
        let png = templates
            .build(&resource(HostingCategory::File), ExportFormat::Png)
            .unwrap();
        assert_eq!(pdf, "https://drive.google.com/uc?export=download&id=ABC123");
        assert_eq!(pdf, png);
        assert!(!pdf.contains("format"));
    }

    #[test]
    fn test_build_native_document_urls() {
        let templates = google();
        let cases = [
            (
                HostingCategory::Document,
                ExportFormat::Docx,
                "https://docs.google.com/document/d/ABC123/export?format=docx",
            ),
            (
                HostingCategory::Presentation,
                ExportFormat::Pdf,
                "https://docs.google.com/presentation/d/ABC123/export/pdf",
            ),
            (
                HostingCategory::Spreadsheet,
                ExportFormat::Xlsx,
                "https://docs.google.com/spreadsheets/d/ABC123/export?format=xlsx",
            ),
            (
                HostingCategory::Drawing,
                ExportFormat::Png,
                "https://docs.google.com/drawings/d/ABC123/export/png",
            ),
        ];
        for (category, format, expected) in cases {
            assert_eq!(templates.build(&resource(category), format).unwrap(), expected);
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        let templates = google();
        let first = templates
            .build(&resource(HostingCategory::Document), ExportFormat::Pdf)
            .unwrap();
        let second = google()
            .build(&resource(HostingCategory::Document), ExportFormat::Pdf)
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_build_unknown_category_is_invalid_category() {
        let err = google()
            .build(&resource(HostingCategory::Unknown), ExportFormat::Pdf)
            .unwrap_err();
        assert!(matches!(err, LocateError::InvalidCategory { .. }));
    }

    #[test]
    fn test_custom_base_urls() {
        let templates = AccessTemplates::new("http://127.0.0.1:9000/", "http://127.0.0.1:9001");
        assert_eq!(
            templates
                .build(&resource(HostingCategory::File), ExportFormat::Pdf)
                .unwrap(),
            "http://127.0.0.1:9000/uc?export=download&id=ABC123"
        );
        assert_eq!(
            templates
                .build(&resource(HostingCategory::Spreadsheet), ExportFormat::Csv)
                .unwrap(),
            "http://127.0.0.1:9001/spreadsheets/d/ABC123/export?format=csv"
        );
    }
}
