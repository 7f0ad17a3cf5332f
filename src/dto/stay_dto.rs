use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Stay;

// Request POST /estadias
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewStay {
    #[serde(rename = "placa")]
    pub plate: String,
    #[serde(rename = "entrada")]
    pub entry_time: DateTime<Utc>,
    #[serde(rename = "valorHora", with = "rust_decimal::serde::float")]
    pub hourly_rate: Decimal,
}

impl From<&Stay> for NewStay {
    fn from(stay: &Stay) -> Self {
        Self {
            plate: stay.plate.clone(),
            entry_time: stay.entry_time,
            hourly_rate: stay.hourly_rate,
        }
    }
}

// Request PATCH /estadias/{id} - actualización parcial con la salida
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StayClosure {
    #[serde(rename = "saida")]
    pub exit_time: DateTime<Utc>,
    #[serde(rename = "valorTotal", with = "rust_decimal::serde::float")]
    pub total_fee: Decimal,
}

impl StayClosure {
    /// Cuerpo del PATCH para una estadia ya cerrada; `None` si sigue abierta
    pub fn from_closed(stay: &Stay) -> Option<Self> {
        Some(Self {
            exit_time: stay.exit_time?,
            total_fee: stay.total_fee?,
        })
    }
}
