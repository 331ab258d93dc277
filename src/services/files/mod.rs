mod service;
mod types;
mod validation;


pub use service::{FileService, FileServiceImpl};
pub use types::{FileObject, FilePurpose, FileUploadRequest};
pub use validation::{extension_of, is_supported_extension, SUPPORTED_EXTENSIONS};
