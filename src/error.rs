// src/error.rs
use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::message::ErrorEnvelope;

pub type AppResult<T> = Result<T, AppError>;

/// Every failure the relay can report, mapped onto one JSON envelope.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("too many requests, retry after {retry_after_secs}s")]
    TooManyRequests { retry_after_secs: u64 },

    #[error("daily usage limit reached ({limit})")]
    DailyLimitExceeded { limit: u64 },

    #[error("provider quota exhausted")]
    ServiceUnavailable,

    #[error("provider is rate limiting")]
    ServerBusy,

    #[error("not found")]
    NotFound,

    #[error("internal error: {0}")]
    Internal(String),
}

pub const MSG_MESSAGE_REQUIRED: &str = "メッセージが必要です";
pub const MSG_MESSAGE_TOO_LONG: &str = "メッセージが長すぎます";

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::TooManyRequests { .. }
            | AppError::DailyLimitExceeded { .. }
            | AppError::ServerBusy => StatusCode::TOO_MANY_REQUESTS,
            AppError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::TooManyRequests { .. } => "TOO_MANY_REQUESTS",
            AppError::DailyLimitExceeded { .. } => "DAILY_LIMIT_EXCEEDED",
            AppError::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            AppError::ServerBusy => "SERVER_BUSY",
            AppError::NotFound => "NOT_FOUND",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Visitor-facing text. Internal details never leave the process.
    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::InvalidInput(msg) => *msg,
            AppError::TooManyRequests { .. } => {
                "リクエストが多すぎます。しばらく待ってからお試しいただくか、お電話でお問い合わせください。"
            }
            AppError::DailyLimitExceeded { .. } => {
                "本日の利用上限に達しました。お電話でお問い合わせください。"
            }
            AppError::ServiceUnavailable => {
                "サービスが一時的に利用できません。お電話でお問い合わせください。"
            }
            AppError::ServerBusy => {
                "サーバーが混雑しています。しばらく待ってからお試しいただくか、お電話でお問い合わせください。"
            }
            AppError::NotFound => {
                "エンドポイントが見つかりません。お電話でお問い合わせください。"
            }
            AppError::Internal(_) => "サーバーエラーが発生しました。お電話でお問い合わせください。",
        }
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            success: false,
            error: self.public_message().to_string(),
            code: Some(self.code().to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal(detail) = &self {
            tracing::error!(%detail, "request failed with internal error");
        }
        let mut response = (self.status(), Json(self.envelope())).into_response();
        if let AppError::TooManyRequests { retry_after_secs } = self {
            if let Ok(value) = HeaderValue::from_str(&retry_after_secs.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }
        response
    }
}
