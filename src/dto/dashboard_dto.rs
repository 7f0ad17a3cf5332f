use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;

use crate::models::{Stay, Vehicle};
use crate::services::stay_lifecycle::{self, EMPTY_CELL};

// Fila de la tabla de vehículos estacionados
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParkedVehicleRow {
    pub plate: String,
    pub model: String,
    pub color: String,
    pub vehicle_type: String,
    pub entry_time: DateTime<Utc>,
    pub entry: String,
}

impl ParkedVehicleRow {
    /// Solo los vehículos con estadia activa aparecen como estacionados
    pub fn from_vehicle(vehicle: &Vehicle, offset: FixedOffset) -> Option<Self> {
        let active = stay_lifecycle::find_active(&vehicle.stays)?;

        Some(Self {
            plate: vehicle.plate.clone(),
            model: vehicle.model.clone(),
            color: vehicle
                .color
                .clone()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| EMPTY_CELL.to_string()),
            vehicle_type: vehicle.vehicle_type.clone(),
            entry_time: active.entry_time,
            entry: stay_lifecycle::format_date_time(Some(active.entry_time), offset),
        })
    }
}

// Fila del historial de estadias
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StayHistoryRow {
    pub plate: String,
    pub entry: String,
    pub exit: String,
    pub duration: String,
    pub total: String,
    pub open: bool,
}

impl StayHistoryRow {
    pub fn from_stay(stay: &Stay, offset: FixedOffset) -> Self {
        Self {
            plate: if stay.plate.trim().is_empty() {
                EMPTY_CELL.to_string()
            } else {
                stay.plate.clone()
            },
            entry: stay_lifecycle::format_date_time(Some(stay.entry_time), offset),
            exit: stay_lifecycle::format_date_time(stay.exit_time, offset),
            duration: stay_lifecycle::format_duration(stay.entry_time, stay.exit_time),
            total: stay_lifecycle::format_money(stay.total_fee),
            open: stay.is_open(),
        }
    }
}

// Datos completos del panel
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardData {
    pub parked: Vec<ParkedVehicleRow>,
    pub history: Vec<StayHistoryRow>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn utc_offset() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_vehicle_without_active_stay_is_not_parked() {
        let vehicle: Vehicle = serde_json::from_value(json!({
            "placa": "ABC1234",
            "modelo": "Gol",
            "tipo": "CARRO",
            "estadias": [{
                "placa": "ABC1234",
                "entrada": "2024-01-01T10:00:00Z",
                "saida": "2024-01-01T11:00:00Z",
                "valorHora": 5.0,
                "valorTotal": 5.0
            }]
        }))
        .unwrap();

        assert_eq!(ParkedVehicleRow::from_vehicle(&vehicle, utc_offset()), None);
    }

    #[test]
    fn test_parked_row_uses_active_stay_entry() {
        let vehicle: Vehicle = serde_json::from_value(json!({
            "placa": "ABC1234",
            "modelo": "Gol",
            "cor": "",
            "tipo": "CARRO",
            "estadias": [
                { "placa": "ABC1234", "entrada": "2024-01-01T08:00:00Z", "saida": "2024-01-01T09:00:00Z", "valorHora": 5.0, "valorTotal": 5.0 },
                { "placa": "ABC1234", "entrada": "2024-01-01T10:00:00Z", "valorHora": 5.0 }
            ]
        }))
        .unwrap();

        let row = ParkedVehicleRow::from_vehicle(&vehicle, utc_offset()).unwrap();
        assert_eq!(row.entry, "01/01/2024, 10:00:00");
        assert_eq!(row.color, EMPTY_CELL);
    }

    #[test]
    fn test_history_row_formats_closed_stay() {
        let stay: Stay = serde_json::from_value(json!({
            "placa": "ABC1234",
            "entrada": "2024-01-01T10:00:00Z",
            "saida": "2024-01-01T12:30:00Z",
            "valorHora": 5.0,
            "valorTotal": 15.0
        }))
        .unwrap();

        let row = StayHistoryRow::from_stay(&stay, utc_offset());
        assert_eq!(row.duration, "2h 30m");
        assert_eq!(row.total, "15.00");
        assert_eq!(row.exit, "01/01/2024, 12:30:00");
        assert!(!row.open);
    }

    #[test]
    fn test_history_row_for_open_stay_without_plate() {
        let stay: Stay = serde_json::from_value(json!({
            "entrada": "2024-01-01T10:00:00Z",
            "valorHora": 5.0
        }))
        .unwrap();

        let row = StayHistoryRow::from_stay(&stay, utc_offset());
        assert_eq!(row.plate, EMPTY_CELL);
        assert_eq!(row.exit, EMPTY_CELL);
        assert_eq!(row.duration, EMPTY_CELL);
        assert_eq!(row.total, EMPTY_CELL);
        assert!(row.open);
    }
}
