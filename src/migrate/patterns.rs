//! Call-site patterns and message classification
//!
//! The `regex` crate has no backreferences, so every quoted form comes in one
//! variant per quote character.

use lazy_static::lazy_static;
use regex::Regex;

/// Which dialog function a migrated `alert(...)` call becomes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertFunction {
    ShowAlert,
    ShowSuccess,
    ShowError,
    ShowWarning,
}

impl AlertFunction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertFunction::ShowAlert => "showAlert",
            AlertFunction::ShowSuccess => "showSuccess",
            AlertFunction::ShowError => "showError",
            AlertFunction::ShowWarning => "showWarning",
        }
    }
}

const SUCCESS_KEYWORDS: &[&str] = &[
    "exitosamente",
    "exitoso",
    "éxito",
    "success",
    "creado",
    "actualizado",
    "eliminado",
    "guardado",
    "enviado",
    "copiado",
    "generado",
    "duplicado",
    "activado",
    "desactivado",
    "✅",
    "completado",
];

const ERROR_KEYWORDS: &[&str] = &[
    "error",
    "fallo",
    "falló",
    "failed",
    "no se pudo",
    "no puede",
    "inválido",
    "invalid",
    "❌",
    "problema",
    "incorrecto",
];

const WARNING_KEYWORDS: &[&str] = &["advertencia", "warning", "cuidado", "atención", "⚠️"];

/// Pick the dialog function for a literal alert message
///
/// Success keywords win over error keywords, which win over warning ones.
pub fn classify_alert_message(message: &str) -> AlertFunction {
    let lower = message.to_lowercase();
    let mentions = |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));

    if mentions(SUCCESS_KEYWORDS) {
        AlertFunction::ShowSuccess
    } else if mentions(ERROR_KEYWORDS) {
        AlertFunction::ShowError
    } else if mentions(WARNING_KEYWORDS) {
        AlertFunction::ShowWarning
    } else {
        AlertFunction::ShowAlert
    }
}

/// Pick the dialog function for `alert(expression)`
pub fn classify_alert_expression(expression: &str) -> AlertFunction {
    if expression.to_lowercase().contains("err") {
        AlertFunction::ShowError
    } else {
        AlertFunction::ShowAlert
    }
}

lazy_static! {
    pub static ref HAS_ALERT: Regex = Regex::new(r"\balert\s*\(").unwrap();
    pub static ref HAS_CONFIRM: Regex = Regex::new(r"\bconfirm\s*\(").unwrap();

    pub static ref HAS_MODAL_HOOK: Regex = Regex::new(
        r"const\s*\{[^}]*show(?:Alert|Confirm|Success|Error|Warning)[^}]*\}\s*=\s*useModal\(\)"
    )
    .unwrap();

    /// Component openings the hook declaration is inserted after, in priority order
    pub static ref COMPONENT_OPENINGS: Vec<Regex> = [
        r"export\s+default\s+function\s+\w+\s*\([^)]*\)\s*(?::\s*[\w.<>\[\], |]+)?\{",
        r"export\s+function\s+\w+\s*\([^)]*\)\s*(?::\s*[\w.<>\[\], |]+)?\{",
        r"function\s+\w+\s*\([^)]*\)\s*(?::\s*[\w.<>\[\], |]+)?\{",
        r"const\s+\w+\s*(?::\s*[\w.<>\[\], |]+)?=\s*\([^)]*\)\s*=>\s*\{",
        r"export\s+default\s+function\s*\([^)]*\)\s*\{",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect();

    /// `if (!confirm('m')) { return; }`, one entry per quote
    pub static ref CONFIRM_GUARD_BLOCK: Vec<Regex> = per_quote(
        r"if\s*\(\s*!(?:window\.)?confirm\s*\(\s*Q(BODY)Q\s*\)\s*\)\s*\{\s*return;?\s*\}"
    );

    /// `if (!confirm('m')) return;`
    pub static ref CONFIRM_GUARD_RETURN: Vec<Regex> = per_quote(
        r"if\s*\(\s*!(?:window\.)?confirm\s*\(\s*Q(BODY)Q\s*\)\s*\)\s*return(;?)"
    );

    /// Any remaining `confirm('m')`
    pub static ref CONFIRM_CALL: Vec<Regex> = per_quote(
        r"(?:\bwindow\.)?\bconfirm\s*\(\s*Q(BODY)Q\s*\)"
    );

    /// `alert('m')`
    pub static ref ALERT_LITERAL: Vec<Regex> = per_quote(
        r"(?:\bwindow\.)?\balert\s*\(\s*Q(BODY)Q\s*\)"
    );

    /// `alert(value)`, `alert(err?.message || 'fallback')`
    pub static ref ALERT_EXPRESSION: Regex = Regex::new(
        r#"(?:\bwindow\.)?\balert\s*\(\s*([a-zA-Z_$][a-zA-Z0-9_$?.]*(?: *\|\| *['"`][^'"`]*['"`])?)\s*\)"#
    )
    .unwrap();

    /// Arrow handlers awaiting a dialog without being async
    pub static ref SYNC_ARROW_HANDLER: Regex = Regex::new(
        r"(const\s+\w+\s*=\s*)\(([^)]*)\)\s*=>\s*\{([^}]*await\s+show[A-Z]\w*)"
    )
    .unwrap();

    /// Function declarations awaiting a dialog, with their optional `async`
    pub static ref FUNCTION_HANDLER: Regex = Regex::new(
        r"(async\s+)?\bfunction\s+(\w+)\s*\(([^)]*)\)\s*\{([^}]*await\s+show[A-Z]\w*)"
    )
    .unwrap();
}

/// Quote characters a literal message can be wrapped in
pub const QUOTES: [char; 3] = ['\'', '"', '`'];

/// Expand a template into one regex per quote character
///
/// `Q` stands for the quote and `BODY` for the message characters. Quoted
/// messages may not contain any quote character; template literals may
/// contain anything but a backtick.
fn per_quote(template: &str) -> Vec<Regex> {
    QUOTES
        .iter()
        .map(|quote| {
            let body = if *quote == '`' { "[^`]*" } else { r#"[^'"`]*"# };
            let pattern = template
                .replace("BODY", body)
                .replace('Q', &regex::escape(&quote.to_string()));
            Regex::new(&pattern).unwrap()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_literals() {
        assert_eq!(
            classify_alert_message("Cliente creado exitosamente"),
            AlertFunction::ShowSuccess
        );
        assert_eq!(
            classify_alert_message("Error al guardar"),
            AlertFunction::ShowError
        );
        assert_eq!(
            classify_alert_message("No se pudo conectar"),
            AlertFunction::ShowError
        );
        assert_eq!(
            classify_alert_message("Cuidado: datos sin guardar"),
            AlertFunction::ShowWarning
        );
        assert_eq!(
            classify_alert_message("Por favor completa el formulario"),
            AlertFunction::ShowAlert
        );
        // success keywords take precedence
        assert_eq!(
            classify_alert_message("Error corregido y guardado"),
            AlertFunction::ShowSuccess
        );
    }

    #[test]
    fn test_classify_expressions() {
        assert_eq!(
            classify_alert_expression("err.message"),
            AlertFunction::ShowError
        );
        assert_eq!(
            classify_alert_expression("error?.message || 'Falló'"),
            AlertFunction::ShowError
        );
        assert_eq!(classify_alert_expression("message"), AlertFunction::ShowAlert);
    }

    #[test]
    fn test_quote_variants_do_not_cross() {
        let single = &ALERT_LITERAL[0];
        let double = &ALERT_LITERAL[1];
        let template = &ALERT_LITERAL[2];

        assert!(single.is_match("alert('Hola')"));
        assert!(!single.is_match(r#"alert('Hola")"#));
        assert!(double.is_match(r#"alert("Hola")"#));
        assert!(template.is_match("alert(`Hola ${name}`)"));
        assert!(!single.is_match("showAlert('Hola')"));
    }

    #[test]
    fn test_detectors() {
        assert!(HAS_ALERT.is_match("alert ('x')"));
        assert!(!HAS_ALERT.is_match("showAlert('x')"));
        assert!(HAS_CONFIRM.is_match("window.confirm('x')"));
        assert!(HAS_MODAL_HOOK.is_match("const { showAlert, showError } = useModal();"));
        assert!(!HAS_MODAL_HOOK.is_match("const modal = useModal();"));
    }

    #[test]
    fn test_component_openings() {
        let source = "export default function Page({ id }: Props) {";
        assert!(COMPONENT_OPENINGS[0].is_match(source));

        let typed = "function load(): Promise<void> {";
        assert!(COMPONENT_OPENINGS[2].is_match(typed));

        let arrow = "const Card = ({ title }) => {";
        assert!(COMPONENT_OPENINGS[3].is_match(arrow));
    }
}
