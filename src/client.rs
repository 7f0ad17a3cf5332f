//! Cliente HTTP para la API de estacionamiento
//!
//! La API remota es el sistema de registro: vehículos en `/veiculos` y
//! estadias en `/estadias`. El trait [`ParkingApi`] es la frontera que usa el
//! controlador; [`ParkingApiClient`] es la implementación con reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::dto::{NewStay, NewVehicle, StayClosure, UpsertOutcome, VehicleUpdate};
use crate::models::{Stay, StayId, Vehicle};
use crate::utils::errors::ApiError;

/// Resultado tipado del cliente
pub type ApiResult<T> = Result<T, ApiError>;

/// Operaciones de la API remota que necesita el panel
#[async_trait]
pub trait ParkingApi: Send + Sync {
    /// Vehículos registrados con sus estadias embebidas
    async fn list_vehicles(&self) -> ApiResult<Vec<Vehicle>>;

    /// Vehículo por placa; `None` si la API responde 404
    async fn get_vehicle(&self, plate: &str) -> ApiResult<Option<Vehicle>>;

    /// Registrar un vehículo tolerando que ya exista (409)
    async fn upsert_vehicle(&self, vehicle: &NewVehicle) -> ApiResult<UpsertOutcome>;

    async fn update_vehicle(&self, plate: &str, changes: &VehicleUpdate) -> ApiResult<()>;

    async fn delete_vehicle(&self, plate: &str) -> ApiResult<()>;

    /// Historial completo de estadias
    async fn list_stays(&self) -> ApiResult<Vec<Stay>>;

    /// Estadias de una placa
    async fn list_stays_for_plate(&self, plate: &str) -> ApiResult<Vec<Stay>>;

    async fn create_stay(&self, stay: &NewStay) -> ApiResult<()>;

    /// Registrar la salida con una actualización parcial (PATCH)
    async fn close_stay(&self, id: &StayId, closure: &StayClosure) -> ApiResult<()>;
}

/// Cliente HTTP para la API de estacionamiento
#[derive(Clone)]
pub struct ParkingApiClient {
    client: Client,
    base_url: String,
}

impl ParkingApiClient {
    /// Crear nuevo cliente HTTP con URL base configurable
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn vehicle_url(&self, plate: &str) -> String {
        self.url(&format!("/veiculos/{}", urlencoding::encode(plate)))
    }
}

/// Verificar que la respuesta sea 2xx; si no, error con el contexto dado
fn ensure_success(response: Response, context: &str) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        log::warn!("❌ {} (HTTP {})", context, status);
        Err(ApiError::Status {
            status,
            context: context.to_string(),
        })
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait]
impl ParkingApi for ParkingApiClient {
    async fn list_vehicles(&self) -> ApiResult<Vec<Vehicle>> {
        log::debug!("🚗 GET /veiculos");
        let response = self.client.get(self.url("/veiculos")).send().await?;
        let response = ensure_success(response, "Erro ao carregar veículos")?;
        decode(response).await
    }

    async fn get_vehicle(&self, plate: &str) -> ApiResult<Option<Vehicle>> {
        log::debug!("🔍 GET /veiculos/{}", plate);
        let response = self.client.get(self.vehicle_url(plate)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = ensure_success(response, "Veículo não encontrado")?;
        decode(response).await.map(Some)
    }

    async fn upsert_vehicle(&self, vehicle: &NewVehicle) -> ApiResult<UpsertOutcome> {
        log::info!("🚗 Registrando veículo {}", vehicle.plate);
        let response = self
            .client
            .post(self.url("/veiculos"))
            .json(vehicle)
            .send()
            .await?;

        if response.status() == StatusCode::CONFLICT {
            log::info!("ℹ️ Veículo {} já cadastrado", vehicle.plate);
            return Ok(UpsertOutcome::AlreadyRegistered);
        }

        ensure_success(response, "Erro ao criar veículo")?;
        Ok(UpsertOutcome::Created)
    }

    async fn update_vehicle(&self, plate: &str, changes: &VehicleUpdate) -> ApiResult<()> {
        log::info!("✏️ Atualizando veículo {}", plate);
        let response = self
            .client
            .patch(self.vehicle_url(plate))
            .json(changes)
            .send()
            .await?;
        ensure_success(response, "Erro ao atualizar veículo")?;
        Ok(())
    }

    async fn delete_vehicle(&self, plate: &str) -> ApiResult<()> {
        log::info!("🗑️ Removendo veículo {}", plate);
        let response = self.client.delete(self.vehicle_url(plate)).send().await?;
        ensure_success(response, "Erro ao deletar veículo")?;
        Ok(())
    }

    async fn list_stays(&self) -> ApiResult<Vec<Stay>> {
        log::debug!("📋 GET /estadias");
        let response = self.client.get(self.url("/estadias")).send().await?;
        let response = ensure_success(response, "Erro ao carregar histórico")?;
        decode(response).await
    }

    async fn list_stays_for_plate(&self, plate: &str) -> ApiResult<Vec<Stay>> {
        log::debug!("📋 GET /estadias?placa={}", plate);
        let url = self.url(&format!("/estadias?placa={}", urlencoding::encode(plate)));
        let response = self.client.get(url).send().await?;
        let response = ensure_success(response, "Erro ao buscar estadias")?;
        let stays: Vec<Stay> = decode(response).await?;

        // El backend puede ignorar el filtro; se descartan solo las de otra placa.
        // Las que vuelven sin placa pertenecen a la consulta.
        Ok(stays
            .into_iter()
            .filter_map(|mut stay| {
                if stay.plate.trim().is_empty() {
                    stay.plate = plate.to_string();
                    Some(stay)
                } else if stay.plate.eq_ignore_ascii_case(plate) {
                    Some(stay)
                } else {
                    None
                }
            })
            .collect())
    }

    async fn create_stay(&self, stay: &NewStay) -> ApiResult<()> {
        log::info!("🅿️ Abrindo estadia para {}", stay.plate);
        let response = self
            .client
            .post(self.url("/estadias"))
            .json(stay)
            .send()
            .await?;
        ensure_success(response, "Erro ao registrar estadia")?;
        Ok(())
    }

    async fn close_stay(&self, id: &StayId, closure: &StayClosure) -> ApiResult<()> {
        log::info!("🏁 Encerrando estadia {} (R$ {})", id, closure.total_fee);
        let url = self.url(&format!("/estadias/{}", urlencoding::encode(&id.to_string())));
        let response = self.client.patch(url).json(closure).send().await?;
        ensure_success(response, "Erro ao registrar saída")?;
        Ok(())
    }
}
