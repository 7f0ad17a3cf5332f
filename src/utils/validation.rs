//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación y normalización
//! de los datos que llegan desde el formulario del panel.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use validator::ValidationError;

lazy_static! {
    // Placas antiguas (ABC1234 / ABC-1234) y Mercosul (ABC1D23)
    static ref PLATE_PATTERN: Regex = Regex::new(r"^[A-Z0-9][A-Z0-9-]{4,9}$").unwrap();
}

/// Normalizar una placa: sin espacios alrededor y en mayúsculas
pub fn normalize_plate(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Normalizar el código de tipo de vehículo
pub fn normalize_vehicle_type(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Validar formato de placa (ya normalizada)
pub fn validate_license_plate(value: &str) -> Result<(), ValidationError> {
    if !PLATE_PATTERN.is_match(value) {
        let mut error = ValidationError::new("license_plate");
        error.message = Some("Placa inválida.".into());
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea positivo
pub fn validate_positive<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value <= T::zero() {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}
