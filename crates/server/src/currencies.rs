//! Currencies API endpoints.

use api_types::currency::{CurrencyNew, CurrencyUpdate, CurrencyView};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::AppendHeaders,
};
use chrono::Utc;
use serde::Deserialize;

use crate::{ServerError, server::ServerState};

fn map_currency(currency: engine::Currency) -> CurrencyView {
    CurrencyView {
        code: currency.code,
        name: currency.name,
        created_date: currency.created_at,
    }
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// 0-based page index.
    pub page: Option<u64>,
    pub size: Option<u64>,
}

pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<CurrencyView>>, ServerError> {
    let page = params.page.unwrap_or(0);
    let size = params.size.unwrap_or(state.page_size);

    let currencies = state
        .engine
        .list(page, size)
        .await?
        .into_iter()
        .map(map_currency)
        .collect();

    Ok(Json(currencies))
}

pub async fn get_by_code(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> Result<Json<CurrencyView>, ServerError> {
    let currency = state.engine.currency(&code).await?;
    Ok(Json(map_currency(currency)))
}

type Created = (
    StatusCode,
    AppendHeaders<[(header::HeaderName, String); 1]>,
    Json<CurrencyView>,
);

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CurrencyNew>,
) -> Result<Created, ServerError> {
    let currency = state
        .engine
        .create(&payload.code, &payload.name, Utc::now())
        .await?;

    let location = format!("/currencies/{}", currency.code);
    Ok((
        StatusCode::CREATED,
        AppendHeaders([(header::LOCATION, location)]),
        Json(map_currency(currency)),
    ))
}

/// Handles both PATCH and PUT; the two verbs share one contract.
pub async fn update_by_code(
    State(state): State<ServerState>,
    Path(code): Path<String>,
    Json(payload): Json<CurrencyUpdate>,
) -> Result<Json<CurrencyView>, ServerError> {
    let currency = state
        .engine
        .update_by_code(&code, payload.name.as_deref())
        .await?;
    Ok(Json(map_currency(currency)))
}

pub async fn delete_by_code(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> Result<StatusCode, ServerError> {
    // A miss is logged and swallowed: the caller sees 204 either way.
    match state.engine.delete_by_code(&code).await {
        Ok(()) => {}
        Err(err @ engine::EngineError::NotFound(_)) => {
            tracing::error!("delete {code}: {err}");
        }
        Err(err) => return Err(err.into()),
    }

    Ok(StatusCode::NO_CONTENT)
}
