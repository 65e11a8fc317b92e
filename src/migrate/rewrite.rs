//! Textual rewriting of a single source file

use super::patterns::{
    classify_alert_expression, classify_alert_message, ALERT_EXPRESSION, ALERT_LITERAL,
    COMPONENT_OPENINGS, CONFIRM_CALL, CONFIRM_GUARD_BLOCK, CONFIRM_GUARD_RETURN,
    FUNCTION_HANDLER, HAS_ALERT, HAS_CONFIRM, HAS_MODAL_HOOK, QUOTES, SYNC_ARROW_HANDLER,
};
use super::MigrateResult;
use regex::{Captures, Regex};

/// How far past a component opening an existing `useModal()` call still counts
const HOOK_LOOKAHEAD: usize = 500;

const HOOK_DECLARATION: &str =
    "const { showAlert, showConfirm, showSuccess, showError, showWarning } = useModal();";

/// Result of rewriting one file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rewrite {
    pub content: String,
    pub import_added: bool,
    pub hook_added: bool,
    pub confirms_replaced: usize,
    pub alerts_replaced: usize,
    pub handlers_made_async: usize,
}

impl Rewrite {
    /// Human readable notes about what changed
    pub fn notes(&self) -> Vec<String> {
        let mut notes = Vec::new();
        if self.import_added {
            notes.push("added useModal import".to_string());
        }
        if self.hook_added {
            notes.push("added useModal() hook".to_string());
        }
        if self.confirms_replaced > 0 {
            notes.push(format!("replaced {} confirm()", self.confirms_replaced));
        }
        if self.alerts_replaced > 0 {
            notes.push(format!("replaced {} alert()", self.alerts_replaced));
        }
        if self.handlers_made_async > 0 {
            notes.push(format!("made {} handler(s) async", self.handlers_made_async));
        }
        notes
    }
}

/// Rewrites native `alert`/`confirm` calls into dialog calls
#[derive(Debug, Clone)]
pub struct SourceRewriter {
    import_line: String,
    has_import: Regex,
}

impl SourceRewriter {
    pub fn new(import_path: &str) -> MigrateResult<Self> {
        let has_import = Regex::new(&format!(
            r#"import\s*\{{[^}}]*\buseModal\b[^}}]*\}}\s*from\s*['"]{}['"]"#,
            regex::escape(import_path)
        ))?;

        Ok(Self {
            import_line: format!("import {{ useModal }} from '{}';", import_path),
            has_import,
        })
    }

    pub fn import_line(&self) -> &str {
        &self.import_line
    }

    /// Rewrite `source`, or `None` when it has no native dialog calls
    ///
    /// Confirms are replaced before alerts. Running the result through again
    /// changes nothing.
    pub fn rewrite(&self, source: &str) -> Option<Rewrite> {
        let has_alerts = HAS_ALERT.is_match(source);
        let has_confirms = HAS_CONFIRM.is_match(source);
        if !has_alerts && !has_confirms {
            return None;
        }

        let mut result = Rewrite {
            content: source.to_string(),
            ..Default::default()
        };

        if !self.has_import.is_match(&result.content) {
            result.content = add_import(&result.content, &self.import_line);
            result.import_added = true;
        }

        if !HAS_MODAL_HOOK.is_match(&result.content) {
            if let Some(content) = add_hook_declaration(&result.content) {
                result.content = content;
                result.hook_added = true;
            }
        }

        if has_confirms {
            let (content, count) = replace_confirms(&result.content);
            result.content = content;
            result.confirms_replaced = count;
        }

        if has_alerts {
            let (content, count) = replace_alerts(&result.content);
            result.content = content;
            result.alerts_replaced = count;
        }

        let (content, count) = make_handlers_async(&result.content);
        result.content = content;
        result.handlers_made_async = count;

        Some(result)
    }
}

/// Insert the import after the last import statement
///
/// A statement spanning several lines ends at the line carrying its `from`
/// clause. Without imports it goes after a leading `'use client'` directive,
/// otherwise at the top.
pub fn add_import(content: &str, import_line: &str) -> String {
    let mut insert_at = None;
    let mut in_import = false;
    let mut offset = 0;

    for line in content.split_inclusive('\n') {
        let text = line.trim_end_matches(['\n', '\r']);
        let line_end = offset + text.len();

        if text.starts_with("import ") || text.starts_with("import{") {
            in_import = true;
        }
        if in_import && ends_import_statement(text) {
            insert_at = Some(line_end);
            in_import = false;
        }

        offset += line.len();
    }

    if let Some(position) = insert_at {
        return format!(
            "{}\n{}{}",
            &content[..position],
            import_line,
            &content[position..]
        );
    }

    if content.starts_with("'use client'") || content.starts_with("\"use client\"") {
        let directive_end = content.find('\n').unwrap_or(content.len());
        return format!(
            "{}\n\n{}{}",
            &content[..directive_end],
            import_line,
            &content[directive_end..]
        );
    }

    format!("{}\n\n{}", import_line, content)
}

fn ends_import_statement(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.contains(" from ")
        || trimmed.contains("}from")
        || trimmed.starts_with("from ")
        || trimmed.ends_with(';')
        || (trimmed.starts_with("import '") || trimmed.starts_with("import \""))
}

/// Insert the hook declaration after the first component opening brace
///
/// Returns `None` when no component opening is found or a `useModal()` call
/// already follows it closely.
pub fn add_hook_declaration(content: &str) -> Option<String> {
    let opening = COMPONENT_OPENINGS
        .iter()
        .find_map(|pattern| pattern.find(content))?;
    let position = opening.end();

    let mut lookahead_end = (position + HOOK_LOOKAHEAD).min(content.len());
    while !content.is_char_boundary(lookahead_end) {
        lookahead_end -= 1;
    }
    if content[position..lookahead_end].contains("useModal()") {
        return None;
    }

    Some(format!(
        "{}\n  {}\n{}",
        &content[..position],
        HOOK_DECLARATION,
        &content[position..]
    ))
}

/// Replace confirm guards and bare confirm calls, returning the count
pub fn replace_confirms(content: &str) -> (String, usize) {
    let mut content = content.to_string();
    let mut count = 0;

    for (pattern, quote) in CONFIRM_GUARD_BLOCK.iter().zip(QUOTES) {
        content = replace_counted(&content, pattern, &mut count, |caps| {
            format!(
                "if (!(await showConfirm({q}{}{q}))) {{\n      return;\n    }}",
                &caps[1],
                q = quote
            )
        });
    }

    for (pattern, quote) in CONFIRM_GUARD_RETURN.iter().zip(QUOTES) {
        content = replace_counted(&content, pattern, &mut count, |caps| {
            format!(
                "if (!(await showConfirm({q}{}{q}))) return{}",
                &caps[1],
                &caps[2],
                q = quote
            )
        });
    }

    for (pattern, quote) in CONFIRM_CALL.iter().zip(QUOTES) {
        content = replace_counted(&content, pattern, &mut count, |caps| {
            format!("await showConfirm({q}{}{q})", &caps[1], q = quote)
        });
    }

    (content, count)
}

/// Replace alert calls with the classified dialog function, returning the count
pub fn replace_alerts(content: &str) -> (String, usize) {
    let mut content = content.to_string();
    let mut count = 0;

    for (pattern, quote) in ALERT_LITERAL.iter().zip(QUOTES) {
        content = replace_counted(&content, pattern, &mut count, |caps| {
            let function = classify_alert_message(&caps[1]);
            format!("await {}({q}{}{q})", function.as_str(), &caps[1], q = quote)
        });
    }

    content = replace_counted(&content, &ALERT_EXPRESSION, &mut count, |caps| {
        let function = classify_alert_expression(&caps[1]);
        format!("await {}({})", function.as_str(), &caps[1])
    });

    (content, count)
}

/// Add `async` to handlers that now await a dialog
pub fn make_handlers_async(content: &str) -> (String, usize) {
    let mut count = 0;

    let content = replace_counted(content, &SYNC_ARROW_HANDLER, &mut count, |caps| {
        format!("{}async ({}) => {{{}", &caps[1], &caps[2], &caps[3])
    });

    let mut made_async = 0;
    let content = FUNCTION_HANDLER
        .replace_all(&content, |caps: &Captures| {
            if caps.get(1).is_some() {
                return caps[0].to_string();
            }
            made_async += 1;
            format!("async function {}({}) {{{}", &caps[2], &caps[3], &caps[4])
        })
        .into_owned();

    (content, count + made_async)
}

fn replace_counted<F>(content: &str, pattern: &Regex, count: &mut usize, mut replacement: F) -> String
where
    F: FnMut(&Captures) -> String,
{
    pattern
        .replace_all(content, |caps: &Captures| {
            *count += 1;
            replacement(caps)
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewriter() -> SourceRewriter {
        SourceRewriter::new("@/context/ModalContext").unwrap()
    }

    #[test]
    fn test_untouched_without_native_calls() {
        assert!(rewriter().rewrite("export const x = 1;\n").is_none());
        assert!(rewriter()
            .rewrite("await showAlert('Hola');\n")
            .is_none());
    }

    #[test]
    fn test_full_rewrite() {
        let source = "\
'use client';
import { useState } from 'react';
import {
  Button,
  Card,
} from '@/components/ui';

export default function ClientsPage() {
  const [clients, setClients] = useState([]);

  const handleDelete = (id) => {
    if (!confirm('¿Eliminar este cliente?')) return;
    alert('Cliente eliminado exitosamente');
  };

  const handleLoad = async () => {
    try {
      await load();
    } catch (err) {
      alert(err.message || 'Error al cargar');
    }
  };
}
";
        let result = rewriter().rewrite(source).unwrap();
        let content = &result.content;

        assert!(result.import_added);
        assert!(result.hook_added);
        assert_eq!(result.confirms_replaced, 1);
        assert_eq!(result.alerts_replaced, 2);
        assert_eq!(result.handlers_made_async, 1);

        let import_at = content
            .find("import { useModal } from '@/context/ModalContext';")
            .unwrap();
        assert!(import_at > content.find("} from '@/components/ui';").unwrap());

        assert!(content.contains(
            "export default function ClientsPage() {\n  const { showAlert, showConfirm, showSuccess, showError, showWarning } = useModal();\n"
        ));
        assert!(content.contains("if (!(await showConfirm('¿Eliminar este cliente?'))) return"));
        assert!(content.contains("await showSuccess('Cliente eliminado exitosamente')"));
        assert!(content.contains("await showError(err.message || 'Error al cargar')"));
        assert!(content.contains("const handleDelete = async (id) => {"));
        assert!(!content.contains("async async"));

        // idempotent
        assert!(rewriter().rewrite(content).is_none());
    }

    #[test]
    fn test_import_placement() {
        let line = "import { useModal } from '@/context/ModalContext';";

        let directive = add_import("'use client'\n\nexport default function A() {}\n", line);
        assert!(directive.starts_with("'use client'\n\nimport { useModal }"));

        let bare = add_import("function A() {}\n", line);
        assert!(bare.starts_with(line));

        let after = add_import("import a from 'a';\nimport b from 'b';\n\nconst x = 1;\n", line);
        assert_eq!(
            after,
            "import a from 'a';\nimport b from 'b';\nimport { useModal } from '@/context/ModalContext';\n\nconst x = 1;\n"
        );
    }

    #[test]
    fn test_hook_not_duplicated() {
        let source = "function Page() {\n  const modal = useModal();\n  alert('x');\n}\n";
        assert!(add_hook_declaration(source).is_none());
    }

    #[test]
    fn test_hook_lookahead_respects_char_boundaries() {
        let body = "ñ".repeat(400);
        let source = format!("function Page() {{\n  // x{}\n}}\n", body);
        assert!(add_hook_declaration(&source).is_some());
    }

    #[test]
    fn test_confirm_forms() {
        let (content, count) = replace_confirms(
            "if (!confirm(\"¿Seguro?\")) { return; }\nif (!window.confirm(`Borrar ${n}?`)) return;\nconst ok = confirm('¿Enviar?');\n",
        );
        assert_eq!(count, 3);
        assert!(content.contains("if (!(await showConfirm(\"¿Seguro?\"))) {\n      return;\n    }"));
        assert!(content.contains("if (!(await showConfirm(`Borrar ${n}?`))) return;"));
        assert!(content.contains("const ok = await showConfirm('¿Enviar?');"));
    }

    #[test]
    fn test_alert_classification_in_place() {
        let (content, count) = replace_alerts(
            "alert(\"No se pudo guardar\");\nalert(`Atención: ${n} pendientes`);\nalert('Hola');\nalert(message);\n",
        );
        assert_eq!(count, 4);
        assert!(content.contains("await showError(\"No se pudo guardar\")"));
        assert!(content.contains("await showWarning(`Atención: ${n} pendientes`)"));
        assert!(content.contains("await showAlert('Hola')"));
        assert!(content.contains("await showAlert(message)"));
    }

    #[test]
    fn test_function_handlers_made_async_once() {
        let source = "function save() {\n  await showSuccess('ok');\n}\nasync function load() {\n  await showError('x');\n}\n";
        let (content, count) = make_handlers_async(source);
        assert_eq!(count, 1);
        assert!(content.starts_with("async function save() {"));
        assert!(content.contains("async function load() {"));
        assert!(!content.contains("async async"));
    }

    #[test]
    fn test_custom_import_path() {
        let rewriter = SourceRewriter::new("~/modal").unwrap();
        assert_eq!(rewriter.import_line(), "import { useModal } from '~/modal';");
        let result = rewriter
            .rewrite("import { useModal } from '~/modal';\nfunction A() {\n  alert('x');\n}\n")
            .unwrap();
        assert!(!result.import_added);
    }
}
