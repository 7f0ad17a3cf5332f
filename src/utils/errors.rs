//! Sistema de manejo de errores
//!
//! Este módulo define los tipos de errores del sistema, su conversión a
//! respuestas HTTP apropiadas y el mensaje que ve el operador del
//! estacionamiento en el panel.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::json;
use thiserror::Error;

/// Errores del ciclo de vida de una estadia
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StayError {
    #[error("Stay for plate '{plate}' is already closed")]
    AlreadyClosed { plate: String },

    #[error("Exit time {exit} precedes entry time {entry}")]
    InvalidTimeRange {
        entry: DateTime<Utc>,
        exit: DateTime<Utc>,
    },

    #[error("No active stay found for plate '{plate}'")]
    NoActiveStay { plate: String },

    #[error("Hourly rate must be positive, got {0}")]
    InvalidHourlyRate(Decimal),

    #[error("Fee for plate '{plate}' exceeds the representable amount")]
    FeeOverflow { plate: String },
}

/// Errores del cliente HTTP de la API de estacionamiento
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{context}: unexpected status {status}")]
    Status {
        status: reqwest::StatusCode,
        context: String,
    },

    #[error("Invalid response body: {0}")]
    Decode(String),
}

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Stay error: {0}")]
    Stay(#[from] StayError),

    #[error("Parking API error: {0}")]
    Api(#[from] ApiError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Mensaje en portugués para mostrar en el panel
    pub fn user_message(&self) -> String {
        match self {
            AppError::Stay(StayError::AlreadyClosed { plate }) => {
                format!("A estadia do veículo {} já foi encerrada.", plate)
            }
            AppError::Stay(StayError::InvalidTimeRange { .. }) => {
                "Horário de saída anterior ao horário de entrada.".to_string()
            }
            AppError::Stay(StayError::NoActiveStay { .. }) => {
                "Estadia ativa não encontrada para este veículo.".to_string()
            }
            AppError::Stay(StayError::InvalidHourlyRate(_)) => {
                "Valor por hora inválido.".to_string()
            }
            AppError::Stay(StayError::FeeOverflow { .. }) => {
                "Valor total fora do limite permitido.".to_string()
            }
            AppError::Api(ApiError::Status { context, .. }) => context.clone(),
            AppError::Api(_) => "Falha de comunicação com o servidor.".to_string(),
            AppError::Validation(errors) => validation_message(errors),
            AppError::NotFound(msg) | AppError::BadRequest(msg) => msg.clone(),
            AppError::Internal(_) => "Erro interno.".to_string(),
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Stay(StayError::NoActiveStay { .. }) | AppError::NotFound(_) => {
                StatusCode::NOT_FOUND
            }
            AppError::Stay(StayError::AlreadyClosed { .. }) => StatusCode::CONFLICT,
            AppError::Stay(_) | AppError::Validation(_) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Api(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Stay(StayError::AlreadyClosed { .. }) => "ALREADY_CLOSED",
            AppError::Stay(StayError::InvalidTimeRange { .. }) => "INVALID_TIME_RANGE",
            AppError::Stay(StayError::NoActiveStay { .. }) => "NO_ACTIVE_STAY",
            AppError::Stay(StayError::InvalidHourlyRate(_)) => "INVALID_HOURLY_RATE",
            AppError::Stay(StayError::FeeOverflow { .. }) => "FEE_OVERFLOW",
            AppError::Api(_) => "PARKING_API_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    code: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("❌ {}", self);
        } else {
            tracing::warn!("⚠️ {}", self);
        }

        let details = match &self {
            AppError::Validation(e) => Some(json!(e)),
            AppError::Api(e) => Some(json!({ "parking_api_error": e.to_string() })),
            _ => None,
        };

        let body = ErrorResponse {
            error: status
                .canonical_reason()
                .unwrap_or("Error")
                .to_string(),
            message: self.user_message(),
            details,
            code: self.code(),
        };

        (status, Json(body)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación
pub fn validation_error(field: &'static str, message: &'static str) -> AppError {
    use validator::ValidationError;

    let mut error = ValidationError::new("custom");
    error.message = Some(message.into());
    error.add_param("field".into(), &field);

    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);

    AppError::Validation(errors)
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} {} não encontrado", resource, id))
}

/// Primer mensaje legible de un conjunto de errores de validación
fn validation_message(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| *field);

    fields
        .into_iter()
        .find_map(|(field, errs)| {
            errs.first().map(|e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("Campo inválido: {}", field),
            })
        })
        .unwrap_or_else(|| "Dados inválidos.".to_string())
}
