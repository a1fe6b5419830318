use crate::{BackOfficeTourFile, Tours, ToursError};
use axum::Json;
use axum::extract::State;
use bo_derive::api_handler;
use bo_kernel::domain::constants::TOURS_TAG;
use bo_kernel::server::{ApiError, ApiState, ErrorBody};

/// Lists every visible tour file, ordered by file name (case-insensitive).
///
/// The scan runs on the blocking pool; a broken tour file fails the whole request.
#[api_handler(
    get,
    path = "/backoffice/tours",
    responses(
        (status = OK, description = "Tour files visible to the backoffice", body = Vec<BackOfficeTourFile>),
        (status = INTERNAL_SERVER_ERROR, description = "A tour file could not be read or parsed", body = ErrorBody),
    ),
    tag = TOURS_TAG,
)]
pub(super) async fn get_tours(
    State(state): State<ApiState>,
) -> Result<Json<Vec<BackOfficeTourFile>>, ApiError> {
    let tours = state.try_get_slice::<Tours>().map_err(|e| ApiError::internal(e.to_string()))?;
    let catalog = tours.catalog.clone();

    let files = tokio::task::spawn_blocking(move || catalog.get_tours())
        .await
        .map_err(|e| ToursError::from(format!("Tour catalog task failed: {e}")))??;

    Ok(Json(files))
}
