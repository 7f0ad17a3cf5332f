#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use parking_dashboard::client::{ApiResult, ParkingApi};
use parking_dashboard::config::environment::EnvironmentConfig;
use parking_dashboard::controllers::ParkingController;
use parking_dashboard::dto::{NewStay, NewVehicle, StayClosure, UpsertOutcome, VehicleUpdate};
use parking_dashboard::models::{Stay, StayId, Vehicle};
use parking_dashboard::state::AppState;
use parking_dashboard::utils::errors::ApiError;

#[derive(Default)]
struct Store {
    vehicles: Vec<Vehicle>,
    stays: Vec<Stay>,
    next_id: i64,
    fail_stay_creation: bool,
}

/// API de estacionamiento en memoria con la semántica del backend remoto
#[derive(Clone, Default)]
pub struct InMemoryParkingApi {
    store: Arc<Mutex<Store>>,
}

impl InMemoryParkingApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vehicle(&self, plate: &str, model: &str, vehicle_type: &str) {
        let mut store = self.store.lock().unwrap();
        store.vehicles.push(Vehicle {
            plate: plate.to_string(),
            model: model.to_string(),
            color: None,
            vehicle_type: vehicle_type.to_string(),
            owner: Some("Maria".to_string()),
            brand: None,
            phone: Some("11999998888".to_string()),
            stays: Vec::new(),
        });
    }

    pub fn add_open_stay(&self, plate: &str, entry_time: DateTime<Utc>, hourly_rate: Decimal) -> StayId {
        let mut store = self.store.lock().unwrap();
        store.next_id += 1;
        let id = StayId::Number(store.next_id);
        store.stays.push(Stay {
            id: Some(id.clone()),
            plate: plate.to_string(),
            entry_time,
            exit_time: None,
            hourly_rate,
            total_fee: None,
        });
        id
    }

    pub fn fail_stay_creation(&self) {
        self.store.lock().unwrap().fail_stay_creation = true;
    }

    pub fn vehicles(&self) -> Vec<Vehicle> {
        self.store.lock().unwrap().vehicles.clone()
    }

    pub fn stays(&self) -> Vec<Stay> {
        self.store.lock().unwrap().stays.clone()
    }

    pub fn stays_for(&self, plate: &str) -> Vec<Stay> {
        self.stays().into_iter().filter(|s| s.plate == plate).collect()
    }
}

fn status_error(status: reqwest::StatusCode, context: &str) -> ApiError {
    ApiError::Status {
        status,
        context: context.to_string(),
    }
}

#[async_trait]
impl ParkingApi for InMemoryParkingApi {
    async fn list_vehicles(&self) -> ApiResult<Vec<Vehicle>> {
        let store = self.store.lock().unwrap();
        Ok(store
            .vehicles
            .iter()
            .map(|v| Vehicle {
                stays: store.stays.iter().filter(|s| s.plate == v.plate).cloned().collect(),
                ..v.clone()
            })
            .collect())
    }

    async fn get_vehicle(&self, plate: &str) -> ApiResult<Option<Vehicle>> {
        let store = self.store.lock().unwrap();
        Ok(store.vehicles.iter().find(|v| v.plate == plate).cloned())
    }

    async fn upsert_vehicle(&self, vehicle: &NewVehicle) -> ApiResult<UpsertOutcome> {
        let mut store = self.store.lock().unwrap();
        if store.vehicles.iter().any(|v| v.plate == vehicle.plate) {
            return Ok(UpsertOutcome::AlreadyRegistered);
        }
        store.vehicles.push(Vehicle {
            plate: vehicle.plate.clone(),
            model: vehicle.model.clone(),
            color: Some(vehicle.color.clone()),
            vehicle_type: vehicle.vehicle_type.clone(),
            owner: Some(vehicle.owner.clone()),
            brand: Some(vehicle.brand.clone()),
            phone: Some(vehicle.phone.clone()),
            stays: Vec::new(),
        });
        Ok(UpsertOutcome::Created)
    }

    async fn update_vehicle(&self, plate: &str, changes: &VehicleUpdate) -> ApiResult<()> {
        let mut store = self.store.lock().unwrap();
        let vehicle = store
            .vehicles
            .iter_mut()
            .find(|v| v.plate == plate)
            .ok_or_else(|| status_error(reqwest::StatusCode::NOT_FOUND, "Erro ao atualizar veículo"))?;
        vehicle.model = changes.model.clone();
        vehicle.color = Some(changes.color.clone());
        vehicle.vehicle_type = changes.vehicle_type.clone();
        vehicle.owner = Some(changes.owner.clone());
        vehicle.brand = Some(changes.brand.clone());
        vehicle.phone = Some(changes.phone.clone());
        Ok(())
    }

    async fn delete_vehicle(&self, plate: &str) -> ApiResult<()> {
        let mut store = self.store.lock().unwrap();
        let before = store.vehicles.len();
        store.vehicles.retain(|v| v.plate != plate);
        if store.vehicles.len() == before {
            return Err(status_error(reqwest::StatusCode::NOT_FOUND, "Erro ao deletar veículo"));
        }
        Ok(())
    }

    async fn list_stays(&self) -> ApiResult<Vec<Stay>> {
        Ok(self.stays())
    }

    async fn list_stays_for_plate(&self, plate: &str) -> ApiResult<Vec<Stay>> {
        Ok(self.stays_for(plate))
    }

    async fn create_stay(&self, stay: &NewStay) -> ApiResult<()> {
        let mut store = self.store.lock().unwrap();
        if store.fail_stay_creation {
            return Err(status_error(
                reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                "Erro ao registrar estadia",
            ));
        }
        store.next_id += 1;
        let id = StayId::Number(store.next_id);
        store.stays.push(Stay {
            id: Some(id),
            plate: stay.plate.clone(),
            entry_time: stay.entry_time,
            exit_time: None,
            hourly_rate: stay.hourly_rate,
            total_fee: None,
        });
        Ok(())
    }

    async fn close_stay(&self, id: &StayId, closure: &StayClosure) -> ApiResult<()> {
        let mut store = self.store.lock().unwrap();
        let stay = store
            .stays
            .iter_mut()
            .find(|s| s.id.as_ref() == Some(id))
            .ok_or_else(|| status_error(reqwest::StatusCode::NOT_FOUND, "Erro ao registrar saída"))?;
        stay.exit_time = Some(closure.exit_time);
        stay.total_fee = Some(closure.total_fee);
        Ok(())
    }
}

pub fn test_config() -> EnvironmentConfig {
    EnvironmentConfig {
        display_offset: chrono::FixedOffset::east_opt(0).unwrap(),
        ..EnvironmentConfig::default()
    }
}

pub fn test_state(api: &InMemoryParkingApi) -> AppState {
    AppState::new(test_config(), Arc::new(api.clone()))
}

pub fn test_controller(api: &InMemoryParkingApi) -> ParkingController {
    test_state(api).controller()
}

pub fn at(ts: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(ts).unwrap().with_timezone(&Utc)
}
