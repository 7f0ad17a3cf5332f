use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::client::ParkingApi;
use crate::dto::{
    DashboardData, NewStay, NewVehicle, ParkedVehicleRow, StayClosure, StayHistoryRow,
    UpsertOutcome, VehicleForm, VehicleUpdate,
};
use crate::models::Stay;
use crate::services::stay_lifecycle;
use crate::utils::errors::{not_found_error, AppError, AppResult};
use crate::utils::validation::normalize_plate;

pub struct ParkingController {
    api: Arc<dyn ParkingApi>,
    default_hourly_rate: Decimal,
    display_offset: FixedOffset,
}

impl ParkingController {
    pub fn new(
        api: Arc<dyn ParkingApi>,
        default_hourly_rate: Decimal,
        display_offset: FixedOffset,
    ) -> Self {
        Self {
            api,
            default_hourly_rate,
            display_offset,
        }
    }

    /// Vehículos con estadia activa, en el orden de la API
    pub async fn parked_vehicles(&self) -> AppResult<Vec<ParkedVehicleRow>> {
        let vehicles = self.api.list_vehicles().await?;

        Ok(vehicles
            .iter()
            .filter_map(|v| ParkedVehicleRow::from_vehicle(v, self.display_offset))
            .collect())
    }

    /// Historial completo de estadias
    pub async fn stay_history(&self) -> AppResult<Vec<StayHistoryRow>> {
        let stays = self.api.list_stays().await?;

        Ok(stays
            .iter()
            .map(|s| StayHistoryRow::from_stay(s, self.display_offset))
            .collect())
    }

    /// Cargar las dos tablas del panel en paralelo
    pub async fn dashboard(&self) -> AppResult<DashboardData> {
        let (parked, history) = futures::try_join!(self.parked_vehicles(), self.stay_history())?;
        Ok(DashboardData { parked, history })
    }

    /// Registrar la entrada: cadastrar el vehículo (si no existe) y abrir la estadia
    pub async fn register_entry(&self, form: &VehicleForm) -> AppResult<Stay> {
        let form = form.validated_for_entry()?;
        let plate = form.plate.clone();

        let outcome = self.api.upsert_vehicle(&NewVehicle::from(form)).await?;
        if outcome == UpsertOutcome::AlreadyRegistered {
            info!("ℹ️ Vehículo {} ya registrado, se reutiliza", plate);
        }

        let stay = stay_lifecycle::open(&plate, self.default_hourly_rate)?;
        self.api.create_stay(&NewStay::from(&stay)).await?;

        info!("🅿️ Entrada registrada para {}", plate);
        Ok(stay)
    }

    /// Registrar la salida de un vehículo en el instante indicado
    pub async fn register_exit(&self, plate: &str, exit_time: DateTime<Utc>) -> AppResult<Stay> {
        let plate = normalize_plate(plate);
        let stays = self.api.list_stays_for_plate(&plate).await?;

        let active = stay_lifecycle::require_active(&stays, &plate)?;
        let id = active
            .id
            .clone()
            .ok_or_else(|| AppError::Internal(format!("Active stay for {} has no id", plate)))?;

        let closed = stay_lifecycle::close(active, exit_time)?;
        let closure = StayClosure::from_closed(&closed)
            .ok_or_else(|| AppError::Internal("Closed stay without exit data".to_string()))?;

        self.api.close_stay(&id, &closure).await?;

        info!(
            "🏁 Salida registrada para {}: R$ {}",
            plate,
            stay_lifecycle::format_money(closed.total_fee)
        );
        Ok(closed)
    }

    /// Formulario de edición prellenado con el vehículo guardado
    pub async fn edit_form(&self, plate: &str) -> AppResult<VehicleForm> {
        let plate = normalize_plate(plate);
        let vehicle = self
            .api
            .get_vehicle(&plate)
            .await?
            .ok_or_else(|| not_found_error("Veículo", &plate))?;

        Ok(VehicleForm::from_vehicle(&vehicle))
    }

    /// Actualizar los campos editables conservando los datos del propietario
    pub async fn update_vehicle(&self, plate: &str, form: &VehicleForm) -> AppResult<()> {
        let plate = normalize_plate(plate);
        let form = form.validated_for_update()?;

        let current = self
            .api
            .get_vehicle(&plate)
            .await?
            .ok_or_else(|| not_found_error("Veículo", &plate))?;

        self.api
            .update_vehicle(&plate, &VehicleUpdate::from_form(form, &current))
            .await?;

        info!("✏️ Vehículo {} actualizado", plate);
        Ok(())
    }

    pub async fn delete_vehicle(&self, plate: &str) -> AppResult<()> {
        let plate = normalize_plate(plate);
        if plate.is_empty() {
            warn!("⚠️ Intento de borrar vehículo sin placa");
            return Err(AppError::BadRequest("Placa não informada.".to_string()));
        }

        self.api.delete_vehicle(&plate).await?;
        info!("🗑️ Vehículo {} eliminado", plate);
        Ok(())
    }
}
