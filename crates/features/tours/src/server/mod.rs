//! HTTP surface of the tours slice.

mod handlers;

use bo_kernel::server::{ApiError, ApiState};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::ToursError;

/// Routes served under `/backoffice/tours`.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(handlers::get_tours))
}

impl From<ToursError> for ApiError {
    fn from(err: ToursError) -> Self {
        Self::internal(err.to_string())
    }
}
