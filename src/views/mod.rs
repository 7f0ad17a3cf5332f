//! Vistas HTML del panel
//!
//! Funciones puras que reciben filas ya formateadas y devuelven HTML.
//! Todo valor interpolado pasa por [`escape_html`].

pub mod dashboard;
pub mod form;

pub use dashboard::{render_dashboard, Notice};
pub use form::{render_vehicle_form, FormMode};

/// Escapar texto para contenido y atributos HTML
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("Gol"), "Gol");
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }
}
