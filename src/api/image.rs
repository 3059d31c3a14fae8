use axum::{
    Extension,
    extract::Query,
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};

use crate::{artwork, error::ProxyError, server::AppState, types::ImageParams};

/// Returns `image_url` resized for the embedded display.
pub async fn image(
    Query(params): Query<ImageParams>,
    Extension(state): Extension<AppState>,
) -> Result<Response, ProxyError> {
    let jpeg = state.artwork.fetch_and_transcode(&params.image_url).await?;
    Ok(([(CONTENT_TYPE, artwork::MEDIA_TYPE)], jpeg).into_response())
}
