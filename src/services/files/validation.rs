use crate::errors::{AssistantsError, AssistantsResult, ValidationError};
use crate::services::files::FileUploadRequest;

/// Extensions accepted for file search and vector stores.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["pdf", "txt", "json", "md"];

/// Lower-cased extension of `filename` without the dot; empty if none.
pub fn extension_of(filename: &str) -> String {
    std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default()
}

pub fn is_supported_extension(extension: &str) -> bool {
    SUPPORTED_EXTENSIONS.contains(&extension)
}

pub(crate) struct FileRequestValidator;

impl FileRequestValidator {
    const MAX_FILE_SIZE: usize = 512 * 1024 * 1024;

    pub(crate) fn validate(request: &FileUploadRequest) -> AssistantsResult<()> {
        if request.extension.is_empty() {
            return Err(AssistantsError::Validation(
                ValidationError::MissingRequiredField("extension".to_string()),
            ));
        }

        if !is_supported_extension(&request.extension) {
            return Err(AssistantsError::Validation(
                ValidationError::UnsupportedFileType {
                    file: request.generated_filename(),
                    extension: request.extension.clone(),
                },
            ));
        }

        if request.data.is_empty() {
            return Err(AssistantsError::Validation(ValidationError::InvalidParameter {
                parameter: "data".to_string(),
                reason: "file cannot be empty".to_string(),
            }));
        }

        if request.data.len() > Self::MAX_FILE_SIZE {
            return Err(AssistantsError::Validation(ValidationError::InvalidParameter {
                parameter: "data".to_string(),
                reason: format!(
                    "file is {} bytes, limit is {}",
                    request.data.len(),
                    Self::MAX_FILE_SIZE
                ),
            }));
        }

        Ok(())
    }
}
