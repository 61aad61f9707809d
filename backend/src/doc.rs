//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every volunteer endpoint, the health probes, and the
//! payload schemas. The generated specification backs Swagger UI in debug
//! builds.

use utoipa::OpenApi;

use crate::domain::ports::{RegisterVolunteerRequest, UpdateProfileRequest};
use crate::domain::{Error, ErrorCode, Volunteer, VolunteerStatus};
use crate::inbound::http::volunteers::{CountResponse, StatusUpdateRequest, WardCountResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Volunteer registration API",
        description = "Register community volunteers, manage their status, and query them by ward."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::volunteers::register_volunteer,
        crate::inbound::http::volunteers::list_volunteers,
        crate::inbound::http::volunteers::get_volunteer,
        crate::inbound::http::volunteers::update_profile,
        crate::inbound::http::volunteers::update_status,
        crate::inbound::http::volunteers::delete_volunteer,
        crate::inbound::http::volunteers::list_by_ward,
        crate::inbound::http::volunteers::list_by_status,
        crate::inbound::http::volunteers::list_active,
        crate::inbound::http::volunteers::list_active_by_ward,
        crate::inbound::http::volunteers::count_active,
        crate::inbound::http::volunteers::count_by_ward,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Volunteer,
        VolunteerStatus,
        RegisterVolunteerRequest,
        UpdateProfileRequest,
        StatusUpdateRequest,
        CountResponse,
        WardCountResponse,
        Error,
        ErrorCode
    )),
    tags(
        (name = "volunteers", description = "Volunteer registration and queries"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema field structure.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("Volunteer", "createdAt")]
    #[case("Volunteer", "status")]
    #[case("Error", "traceId")]
    #[case("RegisterVolunteerRequest", "phone")]
    #[case("WardCountResponse", "ward")]
    fn schemas_expose_wire_fields(#[case] name: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).expect("schema registered");

        assert_object_schema_has_field(schema, field);
    }

    #[rstest]
    #[case("/api/v1/volunteers")]
    #[case("/api/v1/volunteers/{id}/status")]
    #[case("/api/v1/volunteers/stats/ward/{ward}")]
    #[case("/health/ready")]
    fn paths_are_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }
}
