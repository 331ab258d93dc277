mod common;

pub use common::{DeletionStatus, ListResponse, PaginationParams, SortOrder};
