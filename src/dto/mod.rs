pub mod dashboard_dto;
pub mod stay_dto;
pub mod vehicle_dto;

pub use dashboard_dto::{DashboardData, ParkedVehicleRow, StayHistoryRow};
pub use stay_dto::{NewStay, StayClosure};
pub use vehicle_dto::{NewVehicle, UpsertOutcome, VehicleForm, VehicleUpdate};
