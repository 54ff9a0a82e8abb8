// src/models/search.rs
// DOCUMENTATION: Request and response bodies of the HTTP surface
// PURPOSE: Form input for searches and JSON bodies for exports

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::ExportRow;

/// Form submitted by the search page
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SearchForm {
    #[validate(custom = "not_blank")]
    pub zip_code: String,

    #[validate(custom = "not_blank")]
    pub search_term: String,
}

impl SearchForm {
    /// Trimmed copies of the submitted values
    pub fn normalized(&self) -> (String, String) {
        (
            self.zip_code.trim().to_string(),
            self.search_term.trim().to_string(),
        )
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// JSON body posted by the result page's export button
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequest {
    pub results: Vec<ExportRow>,
}

/// JSON acknowledgement returned by the export endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportResponse {
    pub message: String,
    pub rows_written: usize,
}
