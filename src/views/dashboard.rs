use super::form::{render_vehicle_form, FormMode};
use super::escape_html;
use crate::dto::{DashboardData, ParkedVehicleRow, StayHistoryRow, VehicleForm};

/// Aviso mostrado arriba de las tablas tras una acción
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

/// Página completa del panel
pub fn render_dashboard(
    data: &DashboardData,
    mode: &FormMode,
    form: &VehicleForm,
    notice: Option<&Notice>,
) -> String {
    let parked_rows: String = data.parked.iter().map(render_parked_row).collect();
    let history_rows: String = data.history.iter().map(render_history_row).collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="utf-8">
<title>Estacionamento</title>
</head>
<body>
<h1>Estacionamento</h1>
{notice}
{form}
<h2>Veículos estacionados</h2>
<table id="vehicleList">
<thead><tr><th>Placa</th><th>Modelo</th><th>Cor</th><th>Tipo</th><th>Entrada</th><th>Ações</th></tr></thead>
<tbody>
{parked_rows}</tbody>
</table>
<h2>Histórico de estadias</h2>
<table id="stayHistory">
<thead><tr><th>Placa</th><th>Entrada</th><th>Saída</th><th>Duração</th><th>Valor (R$)</th></tr></thead>
<tbody>
{history_rows}</tbody>
</table>
</body>
</html>
"#,
        notice = notice.map(render_notice).unwrap_or_default(),
        form = render_vehicle_form(mode, form),
        parked_rows = parked_rows,
        history_rows = history_rows,
    )
}

fn render_notice(notice: &Notice) -> String {
    let (class, message) = match notice {
        Notice::Success(msg) => ("notice success", msg),
        Notice::Error(msg) => ("notice error", msg),
    };
    format!(
        r#"<p class="{}" role="status">{}</p>"#,
        class,
        escape_html(message)
    )
}

fn render_parked_row(row: &ParkedVehicleRow) -> String {
    let path = format!("/veiculos/{}", urlencoding::encode(&row.plate));
    let confirm = format!("Confirma a exclusão do veículo {}?", row.plate);

    format!(
        r#"<tr>
  <td>{plate}</td>
  <td>{model}</td>
  <td>{color}</td>
  <td>{vehicle_type}</td>
  <td>{entry}</td>
  <td>
    <form method="post" action="{path}/saida"><button class="saida-btn">Registrar Saída</button></form>
    <a class="edit-btn" href="{path}/editar">Editar</a>
    <form method="post" action="{path}/excluir" data-confirm="{confirm}" onsubmit="return confirm(this.dataset.confirm)"><button class="delete-btn">Deletar</button></form>
  </td>
</tr>
"#,
        plate = escape_html(&row.plate),
        model = escape_html(&row.model),
        color = escape_html(&row.color),
        vehicle_type = escape_html(&row.vehicle_type),
        entry = escape_html(&row.entry),
        path = escape_html(&path),
        confirm = escape_html(&confirm),
    )
}

fn render_history_row(row: &StayHistoryRow) -> String {
    format!(
        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
        escape_html(&row.plate),
        escape_html(&row.entry),
        escape_html(&row.exit),
        escape_html(&row.duration),
        escape_html(&row.total),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample_data() -> DashboardData {
        DashboardData {
            parked: vec![ParkedVehicleRow {
                plate: "ABC1234".to_string(),
                model: "<script>alert(1)</script>".to_string(),
                color: "-".to_string(),
                vehicle_type: "CARRO".to_string(),
                entry_time: Utc.with_ymd_and_hms(2024, 1, 1, 13, 0, 0).unwrap(),
                entry: "01/01/2024, 10:00:00".to_string(),
            }],
            history: vec![StayHistoryRow {
                plate: "XYZ9876".to_string(),
                entry: "01/01/2024, 10:00:00".to_string(),
                exit: "01/01/2024, 12:30:00".to_string(),
                duration: "2h 30m".to_string(),
                total: "15.00".to_string(),
                open: false,
            }],
        }
    }

    #[test]
    fn test_dashboard_renders_both_tables() {
        let html = render_dashboard(&sample_data(), &FormMode::Creating, &VehicleForm::default(), None);
        assert!(html.contains(r#"action="/veiculos/ABC1234/saida""#));
        assert!(html.contains(r#"href="/veiculos/ABC1234/editar""#));
        assert!(html.contains("Confirma a exclusão do veículo ABC1234?"));
        assert!(html.contains("<td>2h 30m</td>"));
        assert!(html.contains("<td>15.00</td>"));
        assert!(!html.contains("notice"));
    }

    #[test]
    fn test_dashboard_escapes_api_values() {
        let html = render_dashboard(&sample_data(), &FormMode::Creating, &VehicleForm::default(), None);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn test_dashboard_shows_notice() {
        let notice = Notice::Error("Erro ao registrar saída".to_string());
        let html = render_dashboard(
            &DashboardData::default(),
            &FormMode::Creating,
            &VehicleForm::default(),
            Some(&notice),
        );
        assert!(html.contains(r#"class="notice error""#));
        assert!(html.contains("Erro ao registrar saída"));
    }
}
