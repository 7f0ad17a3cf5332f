//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use anyhow::Result;

use crate::client::{ParkingApi, ParkingApiClient};
use crate::config::environment::EnvironmentConfig;
use crate::controllers::ParkingController;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub api: Arc<dyn ParkingApi>,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, api: Arc<dyn ParkingApi>) -> Self {
        Self { config, api }
    }

    /// Estado con el cliente reqwest apuntando a la API configurada
    pub fn from_config(config: EnvironmentConfig) -> Result<Self> {
        let client = ParkingApiClient::new(&config.parking_api_url, config.http_timeout)?;
        tracing::info!("🔗 API de estacionamiento: {}", client.base_url());
        Ok(Self::new(config, Arc::new(client)))
    }

    /// Controlador para una petición
    pub fn controller(&self) -> ParkingController {
        ParkingController::new(
            self.api.clone(),
            self.config.default_hourly_rate,
            self.config.display_offset,
        )
    }
}
