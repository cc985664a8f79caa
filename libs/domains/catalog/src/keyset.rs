//! Keyset pagination primitives.
//!
//! Listings page with strict `>` / `<` cursors over the sort column rather
//! than OFFSET, so pages stay consistent while rows are inserted between
//! requests.

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Select};

use crate::error::{CatalogError, CatalogResult};

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Resolves the effective page size.
///
/// `None` defaults to [`DEFAULT_PAGE_SIZE`]; out-of-range values are
/// rejected rather than clamped so callers learn about the bound.
pub fn page_size(requested: Option<u64>) -> CatalogResult<u64> {
    match requested {
        None => Ok(DEFAULT_PAGE_SIZE),
        Some(n) if (1..=MAX_PAGE_SIZE).contains(&n) => Ok(n),
        Some(n) => Err(CatalogError::Validation(format!(
            "limit must be between 1 and {}, got {}",
            MAX_PAGE_SIZE, n
        ))),
    }
}

/// Applies a keyset cursor and matching order-by to a select.
///
/// Ascending cursors filter `column > cursor`, descending `column < cursor`.
/// Rows equal to the cursor are excluded, so the caller passes the last
/// value of the previous page.
pub fn apply_cursor<E, C, V>(
    query: Select<E>,
    column: C,
    direction: SortDirection,
    cursor: Option<V>,
) -> Select<E>
where
    E: EntityTrait,
    C: ColumnTrait,
    V: Into<sea_orm::Value>,
{
    let query = match (cursor, direction) {
        (Some(value), SortDirection::Asc) => query.filter(column.gt(value)),
        (Some(value), SortDirection::Desc) => query.filter(column.lt(value)),
        (None, _) => query,
    };

    match direction {
        SortDirection::Asc => query.order_by_asc(column),
        SortDirection::Desc => query.order_by_desc(column),
    }
}
