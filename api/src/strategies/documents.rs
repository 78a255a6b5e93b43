use crate::error::{ApiError, ApiResult};
use crate::operation::capability;
use async_trait::async_trait;
use rtf_model::{ImageImportOptions, ImageRecord, ParentContext, RestService, RestServiceExt};
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Imports image documents listed in a delimited file.
///
/// The file is read and checked before anything is sent; an unreadable file
/// or too many malformed rows is an [`ApiError::Validation`] with no remote
/// call made.
#[async_trait]
pub trait DocumentsFromCsvImageImportStrategy: Send + Sync {
    async fn import(
        &self,
        context: ParentContext,
        path: &Path,
        options: Option<ImageImportOptions>,
    ) -> ApiResult<()>;
}

capability!(DocumentsFromCsvImageImportStrategy, Import, "Document");

/// Parses image rows. Rows missing a mapped column or with an empty
/// identifier or file location are malformed; up to `options.max_errors` of
/// them are skipped.
pub fn parse_image_records(
    contents: &str,
    options: &ImageImportOptions,
) -> ApiResult<Vec<ImageRecord>> {
    let mut records = Vec::new();
    let mut malformed = Vec::new();

    let rows = contents
        .lines()
        .enumerate()
        .skip(usize::from(options.has_header))
        .filter(|(_, line)| !line.trim().is_empty());

    for (index, line) in rows {
        let fields: Vec<&str> = line.split(options.delimiter).map(str::trim).collect();
        let field = |column: usize| fields.get(column).copied().filter(|value| !value.is_empty());

        match (
            field(options.document_identifier_column),
            field(options.bates_number_column),
            field(options.file_location_column),
        ) {
            (Some(document_identifier), Some(bates_number), Some(file_location)) => {
                records.push(ImageRecord {
                    document_identifier: document_identifier.to_string(),
                    bates_number: bates_number.to_string(),
                    file_location: file_location.to_string(),
                })
            }
            _ => malformed.push(index + 1),
        }
    }

    if malformed.len() > options.max_errors {
        return Err(ApiError::validation(format!(
            "{} malformed rows (lines {:?}) exceed the tolerance of {}",
            malformed.len(),
            malformed,
            options.max_errors
        )));
    }
    if !malformed.is_empty() {
        warn!("Skipping {} malformed rows at lines {:?}", malformed.len(), malformed);
    }
    if records.is_empty() {
        return Err(ApiError::validation("no image rows to import"));
    }
    Ok(records)
}

pub struct DocumentsImageImportStrategy {
    rest: Arc<dyn RestService>,
}

impl DocumentsImageImportStrategy {
    pub fn new(rest: Arc<dyn RestService>) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl DocumentsFromCsvImageImportStrategy for DocumentsImageImportStrategy {
    async fn import(
        &self,
        context: ParentContext,
        path: &Path,
        options: Option<ImageImportOptions>,
    ) -> ApiResult<()> {
        let options = options.unwrap_or_default();
        let contents = tokio::fs::read_to_string(path).await.map_err(|err| {
            ApiError::validation(format!("cannot read {}: {}", path.display(), err))
        })?;
        let records = parse_image_records(&contents, &options)?;

        debug!(
            "Importing {} image rows from {} into {}",
            records.len(),
            path.display(),
            context
        );
        let endpoint = format!("relativity-import/v1/workspaces/{}/image-import", context.id());
        self.rest
            .post_unit(
                &endpoint,
                &json!({ "overwriteMode": options.overwrite_mode, "records": records }),
            )
            .await?;

        info!("Imported {} image rows into {}", records.len(), context);
        Ok(())
    }
}
