//! HTTP API for the tax engine.
//!
//! This module exposes the calculators as a small JSON API using the
//! [`axum`](https://crates.io/crates/axum) framework.  Each calculator
//! has its own `POST` route taking the calculator's input record and
//! returning its result record.  `/api/batch` accepts a list of tagged
//! requests, and `/api/rates` returns every rate table so clients can
//! populate their selectors.

use crate::config::ServerConfig;
use crate::engine::{evaluate_batch, CalculationRequest, CalculationResponse};
use crate::models::{
    PpnInput, PpnResult, PpnSettlement, PpnSettlementInput, Pph21Input, Pph21Result, Pph23Input,
    Pph23Result, PphBadanInput, PphBadanResult, PphFinalInput, PphFinalResult,
    TransactionSettlement, TransactionSettlementInput,
};
use crate::rates::{catalogue, RateCatalogue};
use crate::{pph21, pph23, pph_badan, pph_final, ppn};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use thiserror::Error;

/// Largest number of requests accepted by `/api/batch`.
pub const MAX_BATCH_SIZE: usize = 1_000;

/// Errors returned by the HTTP handlers.  Each variant maps to a
/// status code and a JSON body of the form `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The body was not valid JSON or did not match the input record.
    #[error("invalid request: {0}")]
    InvalidInput(String),

    /// More than [`MAX_BATCH_SIZE`] requests were sent to `/api/batch`.
    #[error("batch of {size} requests exceeds the limit of {limit}")]
    BatchTooLarge { size: usize, limit: usize },

    /// The batch worker task failed.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BatchTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::warn!(status = status.as_u16(), error = %self, "request failed");
        let body = Json(serde_json::json!({"error": self.to_string()}));
        (status, body).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Build the API router.
pub fn build_router() -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/rates", get(rates_handler))
        .route("/api/pph21", post(pph21_handler))
        .route("/api/pph23", post(pph23_handler))
        .route("/api/pph-final", post(pph_final_handler))
        .route("/api/pph-badan", post(pph_badan_handler))
        .route("/api/ppn", post(ppn_handler))
        .route("/api/ppn/settlement", post(ppn_settlement_handler))
        .route("/api/ppn/transactions", post(ppn_transactions_handler))
        .route("/api/batch", post(batch_handler))
}

async fn health_handler() -> &'static str {
    "ok"
}

async fn rates_handler() -> Json<RateCatalogue> {
    Json(catalogue())
}

async fn pph21_handler(input: Result<Json<Pph21Input>, JsonRejection>) -> ApiResult<Pph21Result> {
    let Json(input) = input?;
    tracing::info!(filing_status = %input.filing_status, "calculating pph21");
    Ok(Json(pph21::calculate_pph21(&input)))
}

async fn pph23_handler(input: Result<Json<Pph23Input>, JsonRejection>) -> ApiResult<Pph23Result> {
    let Json(input) = input?;
    tracing::info!(income_type = %input.income_type, has_npwp = input.has_npwp, "calculating pph23");
    Ok(Json(pph23::calculate_pph23(&input)))
}

async fn pph_final_handler(
    input: Result<Json<PphFinalInput>, JsonRejection>,
) -> ApiResult<PphFinalResult> {
    let Json(input) = input?;
    tracing::info!(final_type = %input.final_type, "calculating pph final");
    let result = pph_final::calculate_pph_final(&input);
    if !result.umkm_eligible {
        tracing::warn!(turnover = ?input.annual_turnover, "umkm turnover above ceiling");
    }
    Ok(Json(result))
}

async fn pph_badan_handler(
    input: Result<Json<PphBadanInput>, JsonRejection>,
) -> ApiResult<PphBadanResult> {
    let Json(input) = input?;
    tracing::info!("calculating pph badan");
    Ok(Json(pph_badan::calculate_pph_badan(&input)))
}

async fn ppn_handler(input: Result<Json<PpnInput>, JsonRejection>) -> ApiResult<PpnResult> {
    let Json(input) = input?;
    tracing::info!(vat_inclusive = input.vat_inclusive, "calculating ppn");
    Ok(Json(ppn::calculate_ppn(&input)))
}

async fn ppn_settlement_handler(
    input: Result<Json<PpnSettlementInput>, JsonRejection>,
) -> ApiResult<PpnSettlement> {
    let Json(input) = input?;
    tracing::info!("settling ppn");
    Ok(Json(ppn::calculate_ppn_settlement(input.output_vat, input.input_vat)))
}

async fn ppn_transactions_handler(
    input: Result<Json<TransactionSettlementInput>, JsonRejection>,
) -> ApiResult<TransactionSettlement> {
    let Json(input) = input?;
    tracing::info!("settling ppn transactions");
    Ok(Json(ppn::settle_transactions(&input)))
}

async fn batch_handler(
    input: Result<Json<Vec<CalculationRequest>>, JsonRejection>,
) -> ApiResult<Vec<CalculationResponse>> {
    let Json(requests) = input?;
    if requests.len() > MAX_BATCH_SIZE {
        return Err(ApiError::BatchTooLarge { size: requests.len(), limit: MAX_BATCH_SIZE });
    }
    tracing::info!(count = requests.len(), "evaluating batch");
    // Keep the rayon work off the async worker threads.
    let responses = tokio::task::spawn_blocking(move || evaluate_batch(&requests))
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))?;
    Ok(Json(responses))
}

/// Launch the API server.  This function binds to the configured
/// address and blocks until the server terminates.
pub async fn serve(config: &ServerConfig) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "server listening");
    axum::serve(listener, build_router()).await?;
    Ok(())
}
