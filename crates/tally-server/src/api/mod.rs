//! Voting endpoints.
//!
//! - `GET /`          : HTML standings page
//! - `GET /standings` : JSON standings
//! - `POST /vote`     : `{"company": "..."}` -> `{"company": "...", "new_count": n}`

mod page;

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use tally_core::error::TallyError;
use tally_core::VoteCounter;

use crate::app_state::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub company: String,
}

#[derive(Debug, Serialize)]
pub struct VoteResponse {
    pub company: String,
    pub new_count: u64,
}

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let standings = state.votes().list_standings().await?;
    Ok(Html(page::render(&standings)))
}

pub async fn standings(State(state): State<AppState>) -> Result<Json<Vec<VoteCounter>>, ApiError> {
    Ok(Json(state.votes().list_standings().await?))
}

/// The body is decoded by hand so every malformed payload maps to 400,
/// whatever the content type.
pub async fn vote(State(state): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    let req: VoteRequest = serde_json::from_slice(&body)
        .map_err(|e| TallyError::InvalidRequest(format!("invalid vote body: {e}")))?;

    let receipt = state.votes().vote(&req.company).await?;
    Ok(Json(VoteResponse {
        company: receipt.entity.into_inner(),
        new_count: receipt.new_count,
    })
    .into_response())
}
