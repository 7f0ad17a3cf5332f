use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::warn;

use crate::dto::{DashboardData, ParkedVehicleRow, StayHistoryRow, VehicleForm};
use crate::services::stay_lifecycle;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::views::{render_dashboard, FormMode, Notice};

pub fn create_parking_router() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard_page))
        .route("/veiculos", post(register_entry))
        .route("/veiculos/:placa", post(update_vehicle))
        .route("/veiculos/:placa/editar", get(edit_page))
        .route("/veiculos/:placa/excluir", post(delete_vehicle))
        .route("/veiculos/:placa/saida", post(register_exit))
        .route("/api/estacionados", get(list_parked))
        .route("/api/historico", get(list_history))
}

// Avisos que llegan por query string tras una redirección
#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    aviso: Option<String>,
    erro: Option<String>,
}

impl NoticeQuery {
    fn notice(self) -> Option<Notice> {
        match (self.erro, self.aviso) {
            (Some(err), _) => Some(Notice::Error(err)),
            (None, Some(msg)) => Some(Notice::Success(msg)),
            (None, None) => None,
        }
    }
}

fn redirect_with(path: &str, key: &str, message: &str) -> Redirect {
    Redirect::to(&format!("{}?{}={}", path, key, urlencoding::encode(message)))
}

fn redirect_success(message: &str) -> Redirect {
    redirect_with("/", "aviso", message)
}

fn redirect_error(path: &str, error: &AppError) -> Redirect {
    warn!("⚠️ Acción del panel fallida: {}", error);
    redirect_with(path, "erro", &error.user_message())
}

async fn render_page(
    state: &AppState,
    mode: FormMode,
    form: VehicleForm,
    notice: Option<Notice>,
) -> Html<String> {
    let (data, notice) = match state.controller().dashboard().await {
        Ok(data) => (data, notice),
        Err(e) => {
            warn!("⚠️ No se pudo cargar el panel: {}", e);
            (DashboardData::default(), Some(Notice::Error(e.user_message())))
        }
    };

    Html(render_dashboard(&data, &mode, &form, notice.as_ref()))
}

async fn dashboard_page(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> Html<String> {
    render_page(&state, FormMode::Creating, VehicleForm::default(), query.notice()).await
}

async fn edit_page(
    State(state): State<AppState>,
    Path(plate): Path<String>,
    Query(query): Query<NoticeQuery>,
) -> Response {
    match state.controller().edit_form(&plate).await {
        Ok(form) => {
            let mode = FormMode::Editing(form.plate.clone());
            render_page(&state, mode, form, query.notice())
                .await
                .into_response()
        }
        Err(e) => redirect_error("/", &e).into_response(),
    }
}

async fn register_entry(State(state): State<AppState>, Form(form): Form<VehicleForm>) -> Redirect {
    match state.controller().register_entry(&form).await {
        Ok(_) => redirect_success("Veículo registrado com sucesso!"),
        Err(e) => redirect_error("/", &e),
    }
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(plate): Path<String>,
    Form(form): Form<VehicleForm>,
) -> Redirect {
    match state.controller().update_vehicle(&plate, &form).await {
        Ok(()) => redirect_success("Veículo atualizado com sucesso!"),
        Err(e) => {
            let edit_path = format!("/veiculos/{}/editar", urlencoding::encode(&plate));
            redirect_error(&edit_path, &e)
        }
    }
}

async fn delete_vehicle(State(state): State<AppState>, Path(plate): Path<String>) -> Redirect {
    match state.controller().delete_vehicle(&plate).await {
        Ok(()) => redirect_success("Veículo deletado com sucesso!"),
        Err(e) => redirect_error("/", &e),
    }
}

async fn register_exit(State(state): State<AppState>, Path(plate): Path<String>) -> Redirect {
    match state.controller().register_exit(&plate, Utc::now()).await {
        Ok(closed) => redirect_success(&format!(
            "Saída registrada. Valor total: R$ {}",
            stay_lifecycle::format_money(closed.total_fee)
        )),
        Err(e) => redirect_error("/", &e),
    }
}

async fn list_parked(State(state): State<AppState>) -> Result<Json<Vec<ParkedVehicleRow>>, AppError> {
    let rows = state.controller().parked_vehicles().await?;
    Ok(Json(rows))
}

async fn list_history(State(state): State<AppState>) -> Result<Json<Vec<StayHistoryRow>>, AppError> {
    let rows = state.controller().stay_history().await?;
    Ok(Json(rows))
}
