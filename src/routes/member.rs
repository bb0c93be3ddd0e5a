use std::time::Duration;

use actix_web::rt::time::timeout;
use actix_web::{HttpRequest, HttpResponse, Responder, get, web};

use crate::domain::search::MemberTeam;
use crate::dto::member::{MemberSearchParams, MemberTeamDto, PageResponse};
use crate::models::config::ServerConfig;
use crate::pagination::Page;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::member::{search_members_optimized, search_members_simple};
use crate::services::{ServiceError, ServiceResult};

#[get("/v1/members")]
pub async fn search_members_v1(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    run_search(&req, repo, &server_config, search_members_simple::<DieselRepository>).await
}

#[get("/v2/members")]
pub async fn search_members_v2(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    run_search(&req, repo, &server_config, search_members_optimized::<DieselRepository>).await
}

/// Parses the query string, runs `search` on the blocking pool under the
/// configured deadline and renders the page envelope.
async fn run_search<F>(
    req: &HttpRequest,
    repo: web::Data<DieselRepository>,
    server_config: &ServerConfig,
    search: F,
) -> HttpResponse
where
    F: FnOnce(&DieselRepository, MemberSearchParams) -> ServiceResult<Page<MemberTeam>>
        + Send
        + 'static,
{
    // Lenient parsing: `?ageGoe=` means "no bound".
    let params = match serde_html_form::from_str::<MemberSearchParams>(req.query_string()) {
        Ok(params) => params,
        Err(e) => {
            return error_response(&ServiceError::InvalidPageRequest(e.to_string()));
        }
    };

    let deadline = Duration::from_secs(server_config.request_timeout_secs);
    let repo = repo.into_inner();

    let result = match timeout(deadline, web::block(move || search(&repo, params))).await {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => Err(ServiceError::Internal(e.to_string())),
        Err(_) => Err(ServiceError::Timeout),
    };

    match result {
        Ok(page) => HttpResponse::Ok().json(PageResponse::<MemberTeamDto>::from(page)),
        Err(e) => error_response(&e),
    }
}
