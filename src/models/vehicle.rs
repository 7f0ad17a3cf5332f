//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle tal como lo devuelve la API remota
//! en `/veiculos`, con sus estadias embebidas.

use serde::{Deserialize, Serialize};

use super::stay::Stay;

/// Propietario por defecto cuando el formulario no lo informa
pub const DEFAULT_OWNER: &str = "Desconhecido";

/// Marca por defecto cuando el formulario no la informa
pub const DEFAULT_BRAND: &str = "Desconhecida";

/// Teléfono por defecto cuando el formulario no lo informa
pub const DEFAULT_PHONE: &str = "00000000000";

/// Vehicle principal - la placa es la clave primaria en la API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(rename = "placa")]
    pub plate: String,

    #[serde(rename = "modelo", default)]
    pub model: String,

    #[serde(rename = "cor", default)]
    pub color: Option<String>,

    #[serde(rename = "tipo", default)]
    pub vehicle_type: String,

    #[serde(rename = "proprietario", default)]
    pub owner: Option<String>,

    #[serde(rename = "marca", default)]
    pub brand: Option<String>,

    #[serde(rename = "telefone", default)]
    pub phone: Option<String>,

    #[serde(rename = "estadias", default, skip_serializing_if = "Vec::is_empty")]
    pub stays: Vec<Stay>,
}

impl Vehicle {
    /// Propietario guardado o el valor por defecto
    pub fn owner_or_default(&self) -> String {
        non_blank(self.owner.as_deref()).unwrap_or(DEFAULT_OWNER).to_string()
    }

    /// Marca guardada o el valor por defecto
    pub fn brand_or_default(&self) -> String {
        non_blank(self.brand.as_deref()).unwrap_or(DEFAULT_BRAND).to_string()
    }

    /// Teléfono guardado o el valor por defecto
    pub fn phone_or_default(&self) -> String {
        non_blank(self.phone.as_deref()).unwrap_or(DEFAULT_PHONE).to_string()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_vehicle_with_stays() {
        let vehicle: Vehicle = serde_json::from_value(json!({
            "placa": "ABC1234",
            "modelo": "Gol",
            "cor": null,
            "tipo": "CARRO",
            "estadias": [
                { "id": 1, "placa": "ABC1234", "entrada": "2024-01-01T10:00:00Z", "valorHora": 5.0 }
            ]
        }))
        .unwrap();

        assert_eq!(vehicle.plate, "ABC1234");
        assert_eq!(vehicle.color, None);
        assert_eq!(vehicle.stays.len(), 1);
        assert_eq!(vehicle.owner_or_default(), DEFAULT_OWNER);
    }

    #[test]
    fn test_defaults_ignore_blank_metadata() {
        let vehicle: Vehicle = serde_json::from_value(json!({
            "placa": "ABC1234",
            "modelo": "Gol",
            "tipo": "CARRO",
            "proprietario": "Maria",
            "marca": "  ",
            "telefone": "11999998888"
        }))
        .unwrap();

        assert_eq!(vehicle.owner_or_default(), "Maria");
        assert_eq!(vehicle.brand_or_default(), DEFAULT_BRAND);
        assert_eq!(vehicle.phone_or_default(), "11999998888");
    }
}
