use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverwriteMode {
    #[default]
    Append,
    Overlay,
    AppendOverlay,
}

/// Options for importing image documents from a delimited file.
///
/// Column indexes are zero-based. `max_errors` is the number of malformed rows
/// tolerated before the import is refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageImportOptions {
    pub document_identifier_column: usize,
    pub bates_number_column: usize,
    pub file_location_column: usize,
    pub has_header: bool,
    pub delimiter: char,
    pub max_errors: usize,
    pub overwrite_mode: OverwriteMode,
}

impl Default for ImageImportOptions {
    fn default() -> Self {
        Self {
            document_identifier_column: 0,
            bates_number_column: 1,
            file_location_column: 2,
            has_header: false,
            delimiter: ',',
            max_errors: 0,
            overwrite_mode: OverwriteMode::Append,
        }
    }
}

impl ImageImportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self) -> Self {
        self.has_header = true;
        self
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }

    pub fn with_columns(
        mut self,
        document_identifier: usize,
        bates_number: usize,
        file_location: usize,
    ) -> Self {
        self.document_identifier_column = document_identifier;
        self.bates_number_column = bates_number;
        self.file_location_column = file_location;
        self
    }

    pub fn with_overwrite_mode(mut self, overwrite_mode: OverwriteMode) -> Self {
        self.overwrite_mode = overwrite_mode;
        self
    }
}

/// One image page to ingest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImageRecord {
    pub document_identifier: String,
    pub bates_number: String,
    pub file_location: String,
}
