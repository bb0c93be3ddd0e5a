//! Member search workflows backing the `/v1` and `/v2` endpoints.

use validator::Validate;

use crate::domain::search::{MemberSearchCondition, MemberTeam};
use crate::dto::member::MemberSearchParams;
use crate::pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Page, PageRequest};
use crate::repository::MemberSearchReader;
use crate::services::{ServiceError, ServiceResult};

/// Validates the query parameters and turns them into repository inputs.
///
/// Missing page/size fall back to the defaults; sizes above
/// [`MAX_PAGE_SIZE`] are clamped.
fn prepare(params: &MemberSearchParams) -> ServiceResult<(MemberSearchCondition, PageRequest)> {
    params
        .validate()
        .map_err(|e| ServiceError::InvalidPageRequest(e.to_string()))?;

    let size = params
        .size
        .unwrap_or(DEFAULT_PAGE_SIZE as i64)
        .min(MAX_PAGE_SIZE as i64);
    let page = PageRequest::new(params.page.unwrap_or(0), size)?;

    Ok((params.condition(), page))
}

/// Returns every member matching the filters, ignoring paging parameters.
pub fn search_members_all<R>(repo: &R, params: MemberSearchParams) -> ServiceResult<Vec<MemberTeam>>
where
    R: MemberSearchReader + ?Sized,
{
    Ok(repo.search_members(&params.condition())?)
}

/// Sorted page with a total counted over the joined query.
pub fn search_members_simple<R>(
    repo: &R,
    params: MemberSearchParams,
) -> ServiceResult<Page<MemberTeam>>
where
    R: MemberSearchReader + ?Sized,
{
    let (condition, page) = prepare(&params)?;
    Ok(repo.search_members_page(&condition, page)?)
}

/// Sorted page whose total is counted lazily without the join.
pub fn search_members_optimized<R>(
    repo: &R,
    params: MemberSearchParams,
) -> ServiceResult<Page<MemberTeam>>
where
    R: MemberSearchReader + ?Sized,
{
    let (condition, page) = prepare(&params)?;
    Ok(repo.search_members_page_optimized(&condition, page)?)
}
