use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FileObject {
    pub id: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub bytes: u64,
    #[serde(default)]
    pub created_at: i64,
    pub filename: String,
    pub purpose: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilePurpose {
    Assistants,
    Batch,
    #[serde(rename = "fine-tune")]
    FineTune,
    Vision,
    UserData,
}

impl FilePurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilePurpose::Assistants => "assistants",
            FilePurpose::Batch => "batch",
            FilePurpose::FineTune => "fine-tune",
            FilePurpose::Vision => "vision",
            FilePurpose::UserData => "user_data",
        }
    }
}

impl fmt::Display for FilePurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upload of raw bytes; the stored filename is generated from the extension.
#[derive(Debug, Clone)]
pub struct FileUploadRequest {
    pub data: Bytes,
    pub purpose: FilePurpose,
    /// Extension without the leading dot, e.g. `pdf`.
    pub extension: String,
}

impl FileUploadRequest {
    pub fn new(data: impl Into<Bytes>, purpose: FilePurpose, extension: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            purpose,
            extension: extension.into(),
        }
    }

    /// `data_<unix seconds>.<extension>`
    pub fn generated_filename(&self) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        format!("data_{}.{}", now, self.extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_purpose_display() {
        assert_eq!(FilePurpose::FineTune.to_string(), "fine-tune");
        assert_eq!(FilePurpose::Assistants.to_string(), "assistants");
        assert_eq!(
            serde_json::to_string(&FilePurpose::UserData).unwrap(),
            r#""user_data""#
        );
    }

    #[test]
    fn test_generated_filename() {
        let request = FileUploadRequest::new(&b"{}"[..], FilePurpose::Assistants, "json");
        let filename = request.generated_filename();

        assert!(filename.starts_with("data_"));
        assert!(filename.ends_with(".json"));
        let stamp = &filename["data_".len()..filename.len() - ".json".len()];
        assert!(stamp.parse::<u64>().is_ok());
    }
}
