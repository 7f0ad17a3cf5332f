//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno. Todas las variables
//! tienen un valor por defecto; un valor presente pero inválido es un error.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use chrono::{FixedOffset, Offset, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::utils::validation::validate_positive;

/// URL de la API de estacionamiento usada por el panel original
pub const DEFAULT_PARKING_API_URL: &str = "https://estacionamentowillian.vercel.app";

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub parking_api_url: String,
    pub default_hourly_rate: Decimal,
    pub http_timeout: Duration,
    pub display_offset: FixedOffset,
    pub cors_origins: Vec<String>,
    pub log_level: tracing::Level,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            parking_api_url: DEFAULT_PARKING_API_URL.to_string(),
            default_hourly_rate: dec!(5.00),
            http_timeout: Duration::from_secs(30),
            display_offset: brasilia_offset(),
            cors_origins: Vec::new(),
            log_level: tracing::Level::INFO,
        }
    }
}

impl EnvironmentConfig {
    /// Leer la configuración desde las variables de entorno del proceso
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Leer la configuración desde una fuente arbitraria de claves
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let default_hourly_rate = parse_or(&var, "DEFAULT_HOURLY_RATE", defaults.default_hourly_rate)?;
        validate_positive(default_hourly_rate)
            .map_err(|_| anyhow!("DEFAULT_HOURLY_RATE must be positive"))?;

        let offset_hours: i32 = parse_or(&var, "DISPLAY_UTC_OFFSET_HOURS", -3)?;
        let display_offset = FixedOffset::east_opt(offset_hours * 3600)
            .ok_or_else(|| anyhow!("DISPLAY_UTC_OFFSET_HOURS out of range: {}", offset_hours))?;

        let timeout_secs: u64 = parse_or(&var, "HTTP_TIMEOUT_SECS", defaults.http_timeout.as_secs())?;

        Ok(Self {
            environment: var("ENVIRONMENT").unwrap_or(defaults.environment),
            port: parse_or(&var, "PORT", defaults.port)?,
            host: var("HOST").unwrap_or(defaults.host),
            parking_api_url: var("PARKING_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.parking_api_url),
            default_hourly_rate,
            http_timeout: Duration::from_secs(timeout_secs),
            display_offset,
            cors_origins: var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            log_level: parse_or(&var, "LOG_LEVEL", defaults.log_level)?,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la dirección de escucha del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// UTC-3, hora de Brasília
fn brasilia_offset() -> FixedOffset {
    FixedOffset::west_opt(3 * 3600).unwrap_or_else(|| Utc.fix())
}

fn parse_or<T, F>(var: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow!("{}", e))
            .with_context(|| format!("{} has an invalid value: '{}'", key, raw)),
        None => Ok(default),
    }
}
