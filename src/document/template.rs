//! Literal placeholder substitution into the workbench template.

pub const WEB_CONFIGURATION: &str = "{{WORKBENCH_WEB_CONFIGURATION}}";
pub const BUILTIN_EXTENSIONS: &str = "{{WORKBENCH_BUILTIN_EXTENSIONS}}";
pub const WEBVIEW_ENDPOINT: &str = "{{WEBVIEW_ENDPOINT}}";
pub const REMOTE_USER_DATA_URI: &str = "{{REMOTE_USER_DATA_URI}}";

/// Make a JSON payload safe inside a double-quoted HTML attribute.
///
/// Only `"` is rewritten; the template places payloads in `content="..."`.
pub fn escape_attribute(value: &str) -> String {
    value.replace('"', "&quot;")
}

/// Fill the four placeholders, each at its first occurrence in `template`.
///
/// Values are inserted verbatim in a single pass over the template, so `$`
/// sequences or placeholder text inside a value are never reinterpreted.
pub fn fill(template: &str, configuration: &str, extensions: &str) -> String {
    let mut hits: Vec<(usize, &str, &str)> = [
        (WEB_CONFIGURATION, configuration),
        (BUILTIN_EXTENSIONS, extensions),
        (WEBVIEW_ENDPOINT, ""),
        (REMOTE_USER_DATA_URI, ""),
    ]
    .into_iter()
    .filter_map(|(placeholder, value)| {
        template
            .find(placeholder)
            .map(|at| (at, placeholder, value))
    })
    .collect();
    hits.sort_by_key(|(at, _, _)| *at);

    let mut doc = String::with_capacity(template.len() + configuration.len() + extensions.len());
    let mut cursor = 0;
    for (at, placeholder, value) in hits {
        doc.push_str(&template[cursor..at]);
        doc.push_str(value);
        cursor = at + placeholder.len();
    }
    doc.push_str(&template[cursor..]);
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = concat!(
        r#"<meta id="vscode-workbench-web-configuration" data-settings="{{WORKBENCH_WEB_CONFIGURATION}}">"#,
        r#"<meta id="vscode-workbench-builtin-extensions" data-settings="{{WORKBENCH_BUILTIN_EXTENSIONS}}">"#,
        r#"<meta data-webview="{{WEBVIEW_ENDPOINT}}" data-remote="{{REMOTE_USER_DATA_URI}}">"#,
    );

    #[test]
    fn test_escape_attribute_only_touches_quotes() {
        assert_eq!(
            escape_attribute(r#"{"a":"<b>&'"}"#),
            "{&quot;a&quot;:&quot;<b>&'&quot;}"
        );
    }

    #[test]
    fn test_fill_all_placeholders() {
        let doc = fill(TEMPLATE, "CONF", "EXTS");
        assert!(doc.contains(r#"data-settings="CONF""#));
        assert!(doc.contains(r#"data-settings="EXTS""#));
        assert!(doc.contains(r#"data-webview="" data-remote="""#));
        assert!(!doc.contains("{{"));
    }

    #[test]
    fn test_dollar_sequences_are_literal() {
        let doc = fill(TEMPLATE, "$& $1 $$ $`", "$'");
        assert!(doc.contains(r#"data-settings="$& $1 $$ $`""#));
        assert!(doc.contains(r#"data-settings="$'""#));
    }

    #[test]
    fn test_only_first_occurrence_is_replaced() {
        let doc = fill("{{WEBVIEW_ENDPOINT}}|{{WEBVIEW_ENDPOINT}}", "", "");
        assert_eq!(doc, "|{{WEBVIEW_ENDPOINT}}");
    }

    #[test]
    fn test_payload_containing_placeholder_is_not_reprocessed() {
        let doc = fill(TEMPLATE, "{{WORKBENCH_BUILTIN_EXTENSIONS}}", "EXTS");
        assert!(doc.contains(r#"data-settings="{{WORKBENCH_BUILTIN_EXTENSIONS}}""#));
        assert!(doc.contains(r#"data-settings="EXTS""#));
    }
}
