//! Envelope shared by every listing endpoint.

use serde::Serialize;

use crate::utils::pagination_links::PaginationLinks;

/// `{"data": [...], "metadata": {...}, "links": {...}}`
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: Vec<T>,
    pub metadata: Metadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<PaginationLinks>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<DataMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataMeta {
    pub total: i64,
}

/// Position of the returned page within the full result.
///
/// `first` and `last` are 1-based item indexes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginationMeta {
    pub current_page: i64,
    pub size: i64,
    pub first: i64,
    pub last: i64,
    pub total: i64,
    pub total_pages: i64,
}
