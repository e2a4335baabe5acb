use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::{Instrument, error, info, info_span, warn};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult, MSG_MESSAGE_REQUIRED},
    message::{ChatRequest, ChatResponse, UsageResponse, UsageSummary},
    prompt::CLINIC_SYSTEM_PROMPT,
    services::{
        usage::{Reservation, UsageStore},
        validation::validate_message,
    },
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> AppResult<Json<ChatResponse>> {
    let span = info_span!("chat", request_id = %Uuid::new_v4());

    async move {
        let Json(payload) = payload.map_err(|rejection| {
            warn!(%rejection, "unreadable chat body");
            AppError::InvalidInput(MSG_MESSAGE_REQUIRED)
        })?;

        let message = validate_message(payload.message.as_ref())?;

        let reserved = match state.usage.reserve().await {
            Ok(Reservation::Granted) => true,
            Ok(Reservation::Exhausted { limit }) => {
                info!(limit, "daily usage ceiling reached");
                return Err(AppError::DailyLimitExceeded { limit });
            }
            Err(e) => {
                warn!(error = %e, "usage reservation failed, permitting request");
                false
            }
        };

        let reply = match state.provider.complete(CLINIC_SYSTEM_PROMPT, &message).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(error = %e, "chat completion failed");
                if reserved {
                    release_usage_in_background(state.usage.clone());
                }
                return Err(AppError::from(e));
            }
        };

        record_usage_in_background(state.usage.clone());

        Ok(Json(ChatResponse::reply(reply)))
    }
    .instrument(span)
    .await
}

/// Best-effort write: never joined, failures only logged.
fn record_usage_in_background(usage: Arc<dyn UsageStore>) {
    tokio::spawn(
        async move {
            if let Err(e) = usage.record().await {
                warn!(error = %e, "failed to record usage");
            }
        }
        .in_current_span(),
    );
}

fn release_usage_in_background(usage: Arc<dyn UsageStore>) {
    tokio::spawn(
        async move {
            if let Err(e) = usage.release().await {
                warn!(error = %e, "failed to release usage slot");
            }
        }
        .in_current_span(),
    );
}

pub async fn usage_handler(State(state): State<SharedState>) -> AppResult<Json<UsageResponse>> {
    let check = state.usage.check().await.map_err(|e| {
        error!(error = %e, "usage check failed");
        AppError::from(e)
    })?;

    Ok(Json(UsageResponse {
        success: true,
        usage: UsageSummary {
            today: check.current_usage,
            limit: check.max_daily_requests,
            remaining: check.remaining(),
        },
    }))
}
