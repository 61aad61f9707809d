//! Volunteer API handlers.
//!
//! ```text
//! POST   /api/v1/volunteers {"name":"Jane","phone":"0711000111","ward":"Kibra"}
//! GET    /api/v1/volunteers?page=0&size=10
//! GET    /api/v1/volunteers/{id}
//! PUT    /api/v1/volunteers/{id} {"ward":"Langata"}
//! PUT    /api/v1/volunteers/{id}/status {"status":"SUSPENDED"}
//! DELETE /api/v1/volunteers/{id}
//! GET    /api/v1/volunteers/active
//! GET    /api/v1/volunteers/active/ward/{ward}
//! GET    /api/v1/volunteers/ward/{ward}
//! GET    /api/v1/volunteers/status/{status}
//! GET    /api/v1/volunteers/stats/active-count
//! GET    /api/v1/volunteers/stats/ward/{ward}
//! ```

use actix_web::{HttpResponse, Scope, delete, get, http::header, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{RegisterVolunteerRequest, UpdateProfileRequest};
use crate::domain::{Error, Page, PageRequest, Volunteer};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_status, parse_volunteer_id};

/// Base path of the volunteer resource.
pub const VOLUNTEERS_PATH: &str = "/api/v1/volunteers";

/// Optional zero-based paging parameters.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Zero-based page index.
    pub page: Option<u32>,
    /// Page size, clamped to 1..=100. Defaults to 10.
    pub size: Option<u32>,
}

impl PageQuery {
    fn is_requested(&self) -> bool {
        self.page.is_some() || self.size.is_some()
    }

    fn to_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.size)
    }
}

/// Body for `PUT /api/v1/volunteers/{id}/status`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct StatusUpdateRequest {
    #[schema(example = "SUSPENDED")]
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CountResponse {
    pub count: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WardCountResponse {
    pub ward: String,
    pub count: u64,
}

/// Register a volunteer.
///
/// Registration always starts `ACTIVE`. A registration event is published
/// best effort; a channel outage never fails the request.
#[utoipa::path(
    post,
    path = "/api/v1/volunteers",
    request_body = RegisterVolunteerRequest,
    responses(
        (status = 201, description = "Volunteer registered", body = Volunteer,
            headers(("Location" = String, description = "URL of the new volunteer"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Phone number already registered", body = Error),
        (status = 503, description = "Volunteer store unavailable", body = Error)
    ),
    tags = ["volunteers"],
    operation_id = "registerVolunteer"
)]
#[post("")]
pub async fn register_volunteer(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterVolunteerRequest>,
) -> ApiResult<HttpResponse> {
    let volunteer = state.volunteers.register(payload.into_inner()).await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("{VOLUNTEERS_PATH}/{}", volunteer.id)))
        .json(volunteer))
}

/// Page through all volunteers.
#[utoipa::path(
    get,
    path = "/api/v1/volunteers",
    params(PageQuery),
    responses(
        (status = 200, description = "Volunteers page", body = Page<Volunteer>),
        (status = 400, description = "Invalid request", body = Error)
    ),
    tags = ["volunteers"],
    operation_id = "listVolunteers"
)]
#[get("")]
pub async fn list_volunteers(
    state: web::Data<HttpState>,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<Page<Volunteer>>> {
    let page = state.volunteers_query.list_all(query.to_request()).await?;
    Ok(web::Json(page))
}

/// Fetch one volunteer.
#[utoipa::path(
    get,
    path = "/api/v1/volunteers/{id}",
    params(("id" = i64, Path, description = "Volunteer identifier")),
    responses(
        (status = 200, description = "Volunteer", body = Volunteer),
        (status = 400, description = "Invalid identifier", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["volunteers"],
    operation_id = "getVolunteer"
)]
#[get("/{id}")]
pub async fn get_volunteer(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<web::Json<Volunteer>> {
    let id = parse_volunteer_id(&id)?;
    Ok(web::Json(state.volunteers_query.get_by_id(id).await?))
}

/// Update profile fields. The phone number cannot be changed.
#[utoipa::path(
    put,
    path = "/api/v1/volunteers/{id}",
    params(("id" = i64, Path, description = "Volunteer identifier")),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated volunteer", body = Volunteer),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["volunteers"],
    operation_id = "updateVolunteerProfile"
)]
#[put("/{id}")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    id: web::Path<String>,
    payload: web::Json<UpdateProfileRequest>,
) -> ApiResult<web::Json<Volunteer>> {
    let id = parse_volunteer_id(&id)?;
    let volunteer = state
        .volunteers
        .update_profile(id, payload.into_inner())
        .await?;
    Ok(web::Json(volunteer))
}

/// Change a volunteer's status. No event is published.
#[utoipa::path(
    put,
    path = "/api/v1/volunteers/{id}/status",
    params(("id" = i64, Path, description = "Volunteer identifier")),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Updated volunteer", body = Volunteer),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["volunteers"],
    operation_id = "updateVolunteerStatus"
)]
#[put("/{id}/status")]
pub async fn update_status(
    state: web::Data<HttpState>,
    id: web::Path<String>,
    payload: web::Json<StatusUpdateRequest>,
) -> ApiResult<web::Json<Volunteer>> {
    let id = parse_volunteer_id(&id)?;
    let status = parse_status(&payload.status)?;
    Ok(web::Json(state.volunteers.update_status(id, status).await?))
}

/// Delete a volunteer.
#[utoipa::path(
    delete,
    path = "/api/v1/volunteers/{id}",
    params(("id" = i64, Path, description = "Volunteer identifier")),
    responses(
        (status = 204, description = "Volunteer deleted"),
        (status = 400, description = "Invalid identifier", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["volunteers"],
    operation_id = "deleteVolunteer"
)]
#[delete("/{id}")]
pub async fn delete_volunteer(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_volunteer_id(&id)?;
    state.volunteers.delete(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Every volunteer in a ward.
#[utoipa::path(
    get,
    path = "/api/v1/volunteers/ward/{ward}",
    params(("ward" = String, Path, description = "Ward name")),
    responses(
        (status = 200, description = "Volunteers in the ward", body = [Volunteer]),
        (status = 400, description = "Invalid ward", body = Error)
    ),
    tags = ["volunteers"],
    operation_id = "listVolunteersByWard"
)]
#[get("/ward/{ward}")]
pub async fn list_by_ward(
    state: web::Data<HttpState>,
    ward: web::Path<String>,
) -> ApiResult<web::Json<Vec<Volunteer>>> {
    let volunteers = state
        .volunteers_query
        .list_by_ward(ward.into_inner())
        .await?;
    Ok(web::Json(volunteers))
}

/// Every volunteer with a status.
#[utoipa::path(
    get,
    path = "/api/v1/volunteers/status/{status}",
    params(("status" = String, Path, description = "ACTIVE, INACTIVE, or SUSPENDED")),
    responses(
        (status = 200, description = "Volunteers with the status", body = [Volunteer]),
        (status = 400, description = "Unknown status", body = Error)
    ),
    tags = ["volunteers"],
    operation_id = "listVolunteersByStatus"
)]
#[get("/status/{status}")]
pub async fn list_by_status(
    state: web::Data<HttpState>,
    status: web::Path<String>,
) -> ApiResult<web::Json<Vec<Volunteer>>> {
    let status = parse_status(&status)?;
    Ok(web::Json(state.volunteers_query.list_by_status(status).await?))
}

/// Active volunteers.
///
/// Without paging parameters the full list is returned as an array; with
/// `page` or `size` the response is a page object.
#[utoipa::path(
    get,
    path = "/api/v1/volunteers/active",
    params(PageQuery),
    responses(
        (status = 200, description = "Active volunteers; a page object when paging parameters are given", body = [Volunteer]),
        (status = 400, description = "Invalid request", body = Error)
    ),
    tags = ["volunteers"],
    operation_id = "listActiveVolunteers"
)]
#[get("/active")]
pub async fn list_active(
    state: web::Data<HttpState>,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    if query.is_requested() {
        let page = state
            .volunteers_query
            .list_active_page(query.to_request())
            .await?;
        return Ok(HttpResponse::Ok().json(page));
    }
    let volunteers = state.volunteers_query.list_active().await?;
    Ok(HttpResponse::Ok().json(volunteers))
}

/// Active volunteers in a ward.
#[utoipa::path(
    get,
    path = "/api/v1/volunteers/active/ward/{ward}",
    params(("ward" = String, Path, description = "Ward name")),
    responses(
        (status = 200, description = "Active volunteers in the ward", body = [Volunteer]),
        (status = 400, description = "Invalid ward", body = Error)
    ),
    tags = ["volunteers"],
    operation_id = "listActiveVolunteersByWard"
)]
#[get("/active/ward/{ward}")]
pub async fn list_active_by_ward(
    state: web::Data<HttpState>,
    ward: web::Path<String>,
) -> ApiResult<web::Json<Vec<Volunteer>>> {
    let volunteers = state
        .volunteers_query
        .list_active_by_ward(ward.into_inner())
        .await?;
    Ok(web::Json(volunteers))
}

/// Number of active volunteers.
#[utoipa::path(
    get,
    path = "/api/v1/volunteers/stats/active-count",
    responses((status = 200, description = "Active volunteer count", body = CountResponse)),
    tags = ["volunteers"],
    operation_id = "countActiveVolunteers"
)]
#[get("/stats/active-count")]
pub async fn count_active(state: web::Data<HttpState>) -> ApiResult<web::Json<CountResponse>> {
    let count = state.volunteers_query.count_active().await?;
    Ok(web::Json(CountResponse { count }))
}

/// Number of volunteers in a ward, regardless of status.
#[utoipa::path(
    get,
    path = "/api/v1/volunteers/stats/ward/{ward}",
    params(("ward" = String, Path, description = "Ward name")),
    responses(
        (status = 200, description = "Ward volunteer count", body = WardCountResponse),
        (status = 400, description = "Invalid ward", body = Error)
    ),
    tags = ["volunteers"],
    operation_id = "countVolunteersByWard"
)]
#[get("/stats/ward/{ward}")]
pub async fn count_by_ward(
    state: web::Data<HttpState>,
    ward: web::Path<String>,
) -> ApiResult<web::Json<WardCountResponse>> {
    let ward = ward.into_inner();
    let count = state.volunteers_query.count_by_ward(ward.clone()).await?;
    Ok(web::Json(WardCountResponse {
        ward: ward.trim().to_owned(),
        count,
    }))
}

/// Volunteer routes mounted at [`VOLUNTEERS_PATH`].
///
/// Literal segments are registered before `/{id}` so `/active` is never
/// parsed as an identifier.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use volunteer_service::inbound::http::volunteers::volunteers_scope;
///
/// let _app = App::new().service(volunteers_scope());
/// ```
pub fn volunteers_scope() -> Scope {
    web::scope(VOLUNTEERS_PATH)
        .service(register_volunteer)
        .service(list_volunteers)
        .service(list_active)
        .service(list_active_by_ward)
        .service(count_active)
        .service(count_by_ward)
        .service(list_by_ward)
        .service(list_by_status)
        .service(update_status)
        .service(get_volunteer)
        .service(update_profile)
        .service(delete_volunteer)
}

#[cfg(test)]
mod tests;
