//! Assembly of paginated listing responses.

use url::Url;

use crate::api::dto::pagination::PageRequest;
use crate::api::dto::response::{DataMeta, DataResponse, Metadata, PaginationMeta};
use crate::error::AppError;
use crate::utils::pagination_links::PaginationLinks;

/// Cuts the requested page out of `items` and wraps it in the listing envelope.
///
/// - `size == -1` returns every item, `size == 0` returns none.
/// - A positive `size` over a non-empty list slices the page and fills
///   `metadata.pagination`. A page before the first or past the last is an
///   error.
/// - `metadata.data.total` counts the returned items (before the `size == 0`
///   truncation) unless `metadata` already carries one.
///
/// # Errors
///
/// - `errors.pagination.size.invalid` when `size < -1`
/// - `errors.pagination.invalid` when the page is out of range
pub fn paginate<T>(
    items: Vec<T>,
    request: PageRequest,
    request_uri: &Url,
    metadata: Metadata,
) -> Result<DataResponse<T>, AppError> {
    let PageRequest { page, size } = request;
    if size < -1 {
        return Err(AppError::pagination_size_invalid());
    }

    let total = i64::try_from(items.len()).unwrap_or(i64::MAX);
    let mut pagination = None;

    let mut data = if total > 0 && size > 0 {
        let (page_meta, start, end) = locate_page(page, size, total)?;
        pagination = Some(page_meta);
        items.into_iter().skip(start).take(end - start).collect()
    } else {
        items
    };

    let data_total = match metadata.data {
        Some(provided) => provided,
        None => DataMeta {
            total: i64::try_from(data.len()).unwrap_or(i64::MAX),
        },
    };

    if size == 0 {
        data.clear();
    }

    Ok(DataResponse {
        data,
        metadata: Metadata {
            data: Some(data_total),
            pagination: pagination.or(metadata.pagination),
        },
        links: PaginationLinks::compute(page, size, total, request_uri),
    })
}

/// Pagination metadata and `[start, end)` item range of `page`.
fn locate_page(
    page: i64,
    size: i64,
    total: i64,
) -> Result<(PaginationMeta, usize, usize), AppError> {
    if page < 1 {
        return Err(AppError::pagination_invalid());
    }

    let start = (page - 1)
        .checked_mul(size)
        .filter(|start| *start < total)
        .ok_or_else(AppError::pagination_invalid)?;
    let end = start.saturating_add(size).min(total);

    let meta = PaginationMeta {
        current_page: page,
        size,
        first: start + 1,
        last: end,
        total,
        total_pages: (total - 1) / size + 1,
    };

    let to_index = |n: i64| usize::try_from(n).map_err(|_| AppError::pagination_invalid());
    Ok((meta, to_index(start)?, to_index(end)?))
}
