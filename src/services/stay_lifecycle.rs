//! Ciclo de vida de las estadias
//!
//! Reglas para abrir una estadia cuando el vehículo entra, encontrar la
//! estadia activa de un vehículo y cerrarla con el valor cobrado cuando sale.
//! Todas las funciones son puras: no hacen I/O ni guardan estado, el envío
//! a la API lo hace el controlador.
//!
//! Cobro y presentación redondean distinto a propósito: el cobro sube a la
//! hora entera siguiente (mínimo una hora), la duración mostrada trunca a
//! minutos enteros.

use chrono::{DateTime, Duration, FixedOffset, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::Stay;
use crate::utils::errors::StayError;

/// Texto mostrado cuando no hay valor (estadia abierta, fecha ausente)
pub const EMPTY_CELL: &str = "-";

/// Abrir una estadia en el instante actual
pub fn open(plate: &str, hourly_rate: Decimal) -> Result<Stay, StayError> {
    open_at(plate, hourly_rate, Utc::now())
}

/// Abrir una estadia con una hora de entrada explícita
pub fn open_at(
    plate: &str,
    hourly_rate: Decimal,
    entry_time: DateTime<Utc>,
) -> Result<Stay, StayError> {
    if hourly_rate <= Decimal::ZERO {
        return Err(StayError::InvalidHourlyRate(hourly_rate));
    }

    Ok(Stay {
        id: None,
        plate: plate.to_string(),
        entry_time,
        exit_time: None,
        hourly_rate,
        total_fee: None,
    })
}

/// Primera estadia abierta de la secuencia.
///
/// Si por alguna anomalía de datos hay más de una abierta, gana la primera
/// en el orden recibido.
pub fn find_active(stays: &[Stay]) -> Option<&Stay> {
    stays.iter().find(|stay| stay.is_open())
}

/// Igual que [`find_active`] pero falla con `NoActiveStay` si no hay ninguna
pub fn require_active<'a>(stays: &'a [Stay], plate: &str) -> Result<&'a Stay, StayError> {
    find_active(stays).ok_or_else(|| StayError::NoActiveStay {
        plate: plate.to_string(),
    })
}

/// Horas cobradas entre entrada y salida: techo de la duración en horas,
/// con un mínimo de una hora aunque la duración sea cero.
pub fn billed_hours(
    entry_time: DateTime<Utc>,
    exit_time: DateTime<Utc>,
) -> Result<i64, StayError> {
    if exit_time < entry_time {
        return Err(StayError::InvalidTimeRange {
            entry: entry_time,
            exit: exit_time,
        });
    }

    let elapsed = exit_time - entry_time;
    let whole_hours = elapsed.num_hours();
    let remainder = elapsed - Duration::hours(whole_hours);

    let hours = if remainder > Duration::zero() {
        whole_hours + 1
    } else {
        whole_hours
    };

    Ok(hours.max(1))
}

/// Cerrar una estadia abierta calculando el valor total
pub fn close(stay: &Stay, exit_time: DateTime<Utc>) -> Result<Stay, StayError> {
    if !stay.is_open() {
        return Err(StayError::AlreadyClosed {
            plate: stay.plate.clone(),
        });
    }

    let hours = billed_hours(stay.entry_time, exit_time)?;
    let total_fee = Decimal::from(hours)
        .checked_mul(stay.hourly_rate)
        .ok_or_else(|| StayError::FeeOverflow {
            plate: stay.plate.clone(),
        })?;

    Ok(Stay {
        exit_time: Some(exit_time),
        total_fee: Some(total_fee),
        ..stay.clone()
    })
}

/// Duración transcurrida como `"{h}h {m}m"`, truncando a minutos enteros
pub fn format_duration(entry_time: DateTime<Utc>, exit_time: Option<DateTime<Utc>>) -> String {
    let Some(exit_time) = exit_time else {
        return EMPTY_CELL.to_string();
    };

    let minutes = (exit_time - entry_time).num_minutes().max(0);
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Fecha y hora al estilo pt-BR (`dd/mm/aaaa, HH:MM:SS`) en el huso indicado
pub fn format_date_time(timestamp: Option<DateTime<Utc>>, offset: FixedOffset) -> String {
    match timestamp {
        Some(ts) => ts
            .with_timezone(&offset)
            .format("%d/%m/%Y, %H:%M:%S")
            .to_string(),
        None => EMPTY_CELL.to_string(),
    }
}

/// Valor monetario con dos decimales
pub fn format_money(value: Option<Decimal>) -> String {
    match value {
        Some(v) => format!(
            "{:.2}",
            v.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        ),
        None => EMPTY_CELL.to_string(),
    }
}
