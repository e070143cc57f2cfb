use minijinja::{AutoEscape, Environment};
use osg_core::HarRequest;

use super::CodeConverter;
use super::request::RequestView;
use crate::error::EmitError;
use crate::target::{BUILTIN_TARGETS, LanguageTarget, TargetInfo};

/// Template name and source keyed by `(language, library)`.
const TEMPLATES: &[(&str, &str, &str, &str)] = &[
    (
        "shell",
        "curl",
        "shell_curl",
        include_str!("../../templates/shell_curl.j2"),
    ),
    (
        "shell",
        "httpie",
        "shell_httpie",
        include_str!("../../templates/shell_httpie.j2"),
    ),
    (
        "shell",
        "wget",
        "shell_wget",
        include_str!("../../templates/shell_wget.j2"),
    ),
    (
        "javascript",
        "xhr",
        "javascript_xhr",
        include_str!("../../templates/javascript_xhr.j2"),
    ),
    (
        "javascript",
        "fetch",
        "javascript_fetch",
        include_str!("../../templates/javascript_fetch.j2"),
    ),
    (
        "javascript",
        "axios",
        "javascript_axios",
        include_str!("../../templates/javascript_axios.j2"),
    ),
    (
        "node",
        "native",
        "node_native",
        include_str!("../../templates/node_native.j2"),
    ),
    (
        "node",
        "fetch",
        "node_fetch",
        include_str!("../../templates/node_fetch.j2"),
    ),
    (
        "node",
        "axios",
        "node_axios",
        include_str!("../../templates/node_axios.j2"),
    ),
    (
        "python",
        "python3",
        "python_python3",
        include_str!("../../templates/python_python3.j2"),
    ),
    (
        "python",
        "requests",
        "python_requests",
        include_str!("../../templates/python_requests.j2"),
    ),
    (
        "go",
        "native",
        "go_native",
        include_str!("../../templates/go_native.j2"),
    ),
    (
        "http",
        "1.1",
        "http_1.1",
        include_str!("../../templates/http_1.1.j2"),
    ),
    (
        "ruby",
        "native",
        "ruby_native",
        include_str!("../../templates/ruby_native.j2"),
    ),
    (
        "php",
        "curl",
        "php_curl",
        include_str!("../../templates/php_curl.j2"),
    ),
];

/// Built-in converter rendering one minijinja template per client.
pub struct HttpSnippet {
    env: Environment<'static>,
}

impl HttpSnippet {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.add_filter("dq", double_quote);
        env.add_filter("sq", single_quote);
        env.add_filter("shell", shell_quote);
        Self { env }
    }

    fn template_source(target: &LanguageTarget) -> Option<(&'static str, &'static str)> {
        TEMPLATES
            .iter()
            .find(|(language, library, _, _)| {
                *language == target.language && *library == target.library
            })
            .map(|(_, _, name, source)| (*name, *source))
    }
}

impl Default for HttpSnippet {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeConverter for HttpSnippet {
    fn available_targets(&self) -> &[TargetInfo] {
        BUILTIN_TARGETS
    }

    fn convert(&self, request: &HarRequest, target: &LanguageTarget) -> Result<String, EmitError> {
        let (name, source) = Self::template_source(target).ok_or_else(|| EmitError::InvalidLibrary {
            language: target.language.clone(),
            library: target.library.clone(),
        })?;
        let view = RequestView::new(request)?;
        let tmpl = self.env.template_from_named_str(name, source)?;
        let code = tmpl.render(&view)?;
        Ok(code.trim_end().to_string())
    }
}

/// A double-quoted string literal with JSON escapes.
fn double_quote(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{value}\""))
}

/// A single-quoted literal escaping backslashes and single quotes.
fn single_quote(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// A POSIX shell single-quoted word.
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}
