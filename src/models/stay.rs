//! Modelo de Estadia
//!
//! Una estadia es una visita al estacionamiento: se abre cuando el vehículo
//! entra y se cierra, una sola vez, cuando sale. Los nombres de campo en JSON
//! siguen la API remota (`placa`, `entrada`, `saida`, `valorHora`, `valorTotal`).

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identificador asignado por el servidor (numérico o texto según el backend)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StayId {
    Number(i64),
    Text(String),
}

impl fmt::Display for StayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StayId::Number(n) => write!(f, "{}", n),
            StayId::Text(s) => f.write_str(s),
        }
    }
}

/// Estadia - mapea al recurso `/estadias` de la API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stay {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<StayId>,

    #[serde(rename = "placa", default)]
    pub plate: String,

    #[serde(rename = "entrada")]
    pub entry_time: DateTime<Utc>,

    #[serde(rename = "saida", default, skip_serializing_if = "Option::is_none")]
    pub exit_time: Option<DateTime<Utc>>,

    #[serde(rename = "valorHora", with = "rust_decimal::serde::float")]
    pub hourly_rate: Decimal,

    #[serde(
        rename = "valorTotal",
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub total_fee: Option<Decimal>,
}

impl Stay {
    /// Una estadia sin hora de salida sigue activa
    pub fn is_open(&self) -> bool {
        self.exit_time.is_none()
    }
}
