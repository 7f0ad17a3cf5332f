use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Vehicle;
use crate::models::vehicle::{DEFAULT_BRAND, DEFAULT_OWNER, DEFAULT_PHONE};
use crate::utils::errors::{validation_error, AppResult};
use crate::utils::validation::{normalize_plate, normalize_vehicle_type, validate_license_plate};

// Formulario del panel (entrada y edición de vehículo)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, Validate)]
pub struct VehicleForm {
    #[serde(rename = "placa", default)]
    pub plate: String,

    #[serde(rename = "modelo", default)]
    #[validate(length(min = 1, max = 60, message = "Informe o modelo do veículo."))]
    pub model: String,

    #[serde(rename = "cor", default)]
    #[validate(length(max = 30, message = "Cor muito longa."))]
    pub color: String,

    #[serde(rename = "tipo", default)]
    #[validate(length(min = 1, max = 20, message = "Informe o tipo do veículo."))]
    pub vehicle_type: String,
}

impl VehicleForm {
    /// Formulario prellenado con los datos de un vehículo existente
    pub fn from_vehicle(vehicle: &Vehicle) -> Self {
        Self {
            plate: vehicle.plate.clone(),
            model: vehicle.model.clone(),
            color: vehicle.color.clone().unwrap_or_default(),
            vehicle_type: vehicle.vehicle_type.clone(),
        }
    }

    /// Recortar espacios y pasar placa y tipo a mayúsculas
    pub fn normalized(&self) -> Self {
        Self {
            plate: normalize_plate(&self.plate),
            model: self.model.trim().to_string(),
            color: self.color.trim().to_string(),
            vehicle_type: normalize_vehicle_type(&self.vehicle_type),
        }
    }

    /// Normalizar y validar un formulario de entrada (con placa)
    pub fn validated_for_entry(&self) -> AppResult<Self> {
        let form = self.normalized();
        if validate_license_plate(&form.plate).is_err() {
            return Err(validation_error("placa", "Placa inválida."));
        }
        form.validate()?;
        Ok(form)
    }

    /// Normalizar y validar un formulario de edición (la placa viene de la ruta)
    pub fn validated_for_update(&self) -> AppResult<Self> {
        let form = self.normalized();
        form.validate()?;
        Ok(form)
    }
}

// Request POST /veiculos
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewVehicle {
    #[serde(rename = "placa")]
    pub plate: String,
    #[serde(rename = "modelo")]
    pub model: String,
    #[serde(rename = "cor")]
    pub color: String,
    #[serde(rename = "tipo")]
    pub vehicle_type: String,
    #[serde(rename = "proprietario")]
    pub owner: String,
    #[serde(rename = "marca")]
    pub brand: String,
    #[serde(rename = "telefone")]
    pub phone: String,
}

impl From<VehicleForm> for NewVehicle {
    fn from(form: VehicleForm) -> Self {
        Self {
            plate: form.plate,
            model: form.model,
            color: form.color,
            vehicle_type: form.vehicle_type,
            owner: DEFAULT_OWNER.to_string(),
            brand: DEFAULT_BRAND.to_string(),
            phone: DEFAULT_PHONE.to_string(),
        }
    }
}

// Request PATCH /veiculos/{placa} - la placa no se modifica
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleUpdate {
    #[serde(rename = "modelo")]
    pub model: String,
    #[serde(rename = "cor")]
    pub color: String,
    #[serde(rename = "tipo")]
    pub vehicle_type: String,
    #[serde(rename = "proprietario")]
    pub owner: String,
    #[serde(rename = "marca")]
    pub brand: String,
    #[serde(rename = "telefone")]
    pub phone: String,
}

impl VehicleUpdate {
    /// Campos editables del formulario, conservando los datos del propietario
    pub fn from_form(form: VehicleForm, current: &Vehicle) -> Self {
        Self {
            model: form.model,
            color: form.color,
            vehicle_type: form.vehicle_type,
            owner: current.owner_or_default(),
            brand: current.brand_or_default(),
            phone: current.phone_or_default(),
        }
    }
}

// Resultado de registrar un vehículo que puede existir ya
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UpsertOutcome {
    Created,
    AlreadyRegistered,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::AppError;
    use serde_json::json;

    fn form(plate: &str, model: &str, vehicle_type: &str) -> VehicleForm {
        VehicleForm {
            plate: plate.to_string(),
            model: model.to_string(),
            color: " prata ".to_string(),
            vehicle_type: vehicle_type.to_string(),
        }
    }

    #[test]
    fn test_entry_form_is_normalized() {
        let validated = form(" abc1d23", " Onix ", "carro").validated_for_entry().unwrap();
        assert_eq!(validated.plate, "ABC1D23");
        assert_eq!(validated.model, "Onix");
        assert_eq!(validated.color, "prata");
        assert_eq!(validated.vehicle_type, "CARRO");
    }

    #[test]
    fn test_entry_form_rejects_bad_plate() {
        let err = form("x", "Onix", "carro").validated_for_entry().unwrap_err();
        assert_eq!(err.user_message(), "Placa inválida.");
    }

    #[test]
    fn test_entry_form_requires_model() {
        let err = form("ABC1234", "   ", "carro").validated_for_entry().unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.user_message(), "Informe o modelo do veículo.");
    }

    #[test]
    fn test_update_form_ignores_missing_plate() {
        assert!(form("", "Onix", "moto").validated_for_update().is_ok());
    }

    #[test]
    fn test_new_vehicle_payload_carries_defaults() {
        let payload = NewVehicle::from(form("ABC1234", "Onix", "CARRO").normalized());
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({
                "placa": "ABC1234",
                "modelo": "Onix",
                "cor": "prata",
                "tipo": "CARRO",
                "proprietario": "Desconhecido",
                "marca": "Desconhecida",
                "telefone": "00000000000"
            })
        );
    }

    #[test]
    fn test_update_keeps_owner_metadata() {
        let current: Vehicle = serde_json::from_value(json!({
            "placa": "ABC1234",
            "modelo": "Gol",
            "tipo": "CARRO",
            "proprietario": "João",
            "telefone": "11988887777"
        }))
        .unwrap();

        let update = VehicleUpdate::from_form(form("", "Polo", "CARRO").normalized(), &current);
        assert_eq!(update.owner, "João");
        assert_eq!(update.brand, DEFAULT_BRAND);
        assert_eq!(update.phone, "11988887777");
        assert_eq!(update.model, "Polo");
    }
}
