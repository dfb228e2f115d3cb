//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::api::handlers::user_handler::{CreateUserRequest, MessageResponse, UpdateUserRequest};
use domain::UserResponse;

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::user_handler::create_user,
        crate::api::handlers::user_handler::get_user,
        crate::api::handlers::user_handler::get_user_by_email,
        crate::api::handlers::user_handler::update_user,
        crate::api::handlers::user_handler::delete_user,
    ),
    components(
        schemas(
            CreateUserRequest,
            UpdateUserRequest,
            UserResponse,
            MessageResponse,
        )
    ),
    tags(
        (name = "Users", description = "User account management endpoints"),
    )
)]
pub struct ApiDoc;
