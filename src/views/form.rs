//! Formulario de vehículo
//!
//! El mismo formulario sirve para registrar la entrada y para editar un
//! vehículo; el modo decide a dónde se envía y qué campos se pueden tocar.

use super::escape_html;
use crate::dto::VehicleForm;

/// Modo del formulario del panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Creating,
    Editing(String),
}

impl FormMode {
    pub fn action(&self) -> String {
        match self {
            FormMode::Creating => "/veiculos".to_string(),
            FormMode::Editing(plate) => format!("/veiculos/{}", urlencoding::encode(plate)),
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            FormMode::Creating => "Registrar Entrada",
            FormMode::Editing(_) => "Atualizar Veículo",
        }
    }

    /// La placa es el identificador: no se edita
    pub fn plate_locked(&self) -> bool {
        matches!(self, FormMode::Editing(_))
    }
}

pub fn render_vehicle_form(mode: &FormMode, values: &VehicleForm) -> String {
    let plate_attrs = if mode.plate_locked() {
        " disabled"
    } else {
        " required"
    };

    let cancel = match mode {
        FormMode::Creating => String::new(),
        FormMode::Editing(_) => r#"<a class="cancel" href="/">Cancelar</a>"#.to_string(),
    };

    format!(
        r#"<form id="vehicleForm" method="post" action="{action}">
  <label>Placa <input name="placa" value="{plate}"{plate_attrs}></label>
  <label>Modelo <input name="modelo" value="{model}" required></label>
  <label>Cor <input name="cor" value="{color}"></label>
  <label>Tipo <input name="tipo" value="{vehicle_type}" required></label>
  <button type="submit">{label}</button>
  {cancel}
</form>"#,
        action = escape_html(&mode.action()),
        plate = escape_html(&values.plate),
        plate_attrs = plate_attrs,
        model = escape_html(&values.model),
        color = escape_html(&values.color),
        vehicle_type = escape_html(&values.vehicle_type),
        label = mode.submit_label(),
        cancel = cancel,
    )
}
