use std::error::Error as StdError;

use minijinja::{AutoEscape, Environment, Error, ErrorKind, Value};

use crate::domain::AppError;
use crate::domain::casing::to_snake_case;

use super::asset_collect::ChartSourceFile;

/// Serialize any template value as a YAML fragment, without the trailing newline.
fn to_yaml(value: Value) -> Result<String, Error> {
    let rendered = serde_yaml::to_string(&value)
        .map_err(|e| Error::new(ErrorKind::InvalidOperation, format!("toYaml failed: {}", e)))?;
    Ok(rendered.trim_end_matches('\n').to_string())
}

/// Start a new line and indent every non-empty line by `width` spaces.
fn nindent(value: String, width: usize) -> String {
    let pad = " ".repeat(width);
    let mut out = String::with_capacity(value.len() + width * 4);
    for line in value.split('\n') {
        out.push('\n');
        if !line.is_empty() {
            out.push_str(&pad);
            out.push_str(line);
        }
    }
    out
}

/// Rename the keys of a mapping from camelCase to snake_case (one level deep).
fn snake_keys(value: Value) -> Result<Value, Error> {
    let json = serde_json::to_value(&value)
        .map_err(|e| Error::new(ErrorKind::InvalidOperation, format!("snake_keys failed: {}", e)))?;
    match json {
        serde_json::Value::Object(map) => {
            let renamed: serde_json::Map<String, serde_json::Value> =
                map.into_iter().map(|(key, value)| (to_snake_case(&key), value)).collect();
            Ok(Value::from_serialize(&renamed))
        }
        serde_json::Value::Null => Ok(Value::from_serialize(serde_json::Map::new())),
        other => Err(Error::new(
            ErrorKind::InvalidOperation,
            format!("snake_keys expects a mapping, got {}", other),
        )),
    }
}

pub fn build_template_environment(
    sources: &[ChartSourceFile],
) -> Result<Environment<'_>, AppError> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    // YAML output must not be JSON-escaped by the extension-based default.
    env.set_auto_escape_callback(|_| AutoEscape::None);

    env.add_filter("to_yaml", to_yaml);
    env.add_filter("nindent", nindent);
    env.add_filter("snake_keys", snake_keys);

    for source in sources.iter().filter(|source| source.is_template()) {
        env.add_template(source.template_name(), source.content.as_str()).map_err(|e| {
            AppError::Template {
                template: source.template_name().to_string(),
                details: format!("failed to register: {}", e),
            }
        })?;
    }

    Ok(env)
}

pub fn render_template_by_name(
    env: &Environment<'_>,
    template_name: &str,
    ctx: &Value,
) -> Result<String, AppError> {
    let template = env
        .get_template(template_name)
        .map_err(|_| AppError::TemplateNotFound(template_name.to_string()))?;

    template.render(ctx).map_err(|e| AppError::Template {
        template: template_name.to_string(),
        details: render_error_chain(&e),
    })
}

/// minijinja nests include/import failures; surface the innermost cause too.
fn render_error_chain(err: &Error) -> String {
    let mut message = err.to_string();
    let mut source = StdError::source(err);
    while let Some(cause) = source {
        message.push_str(&format!(": {}", cause));
        source = StdError::source(cause);
    }
    message
}
