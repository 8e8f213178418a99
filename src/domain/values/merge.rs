//! Helm-style values coalescing.

use serde_yaml::Value;

/// Layer `overlay` on top of `base`, the way Helm merges values files.
///
/// Mappings merge key by key, recursively. Any other overlay value replaces
/// the base value wholesale (lists are not concatenated). A `null` in the
/// overlay deletes the key from the result; a `null` overlay document (an
/// empty values file) changes nothing.
pub fn coalesce(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (base, Value::Null) => base,
        (Value::Mapping(mut base), Value::Mapping(overlay)) => {
            for (key, value) in overlay {
                if value.is_null() {
                    base.remove(&key);
                    continue;
                }
                match base.get_mut(&key) {
                    Some(existing) => {
                        let current = std::mem::replace(existing, Value::Null);
                        *existing = coalesce(current, value);
                    }
                    None => {
                        base.insert(key, strip_nulls(value));
                    }
                }
            }
            Value::Mapping(base)
        }
        (_, overlay) => strip_nulls(overlay),
    }
}

/// Combine user values files in order, the way `helm -f a.yaml -f b.yaml`
/// does before the chart defaults are applied.
///
/// Later documents win. Unlike [`coalesce`], explicit nulls survive so they
/// can still delete chart defaults; empty documents are ignored.
pub fn layer_all<I>(documents: I) -> Value
where
    I: IntoIterator<Item = Value>,
{
    documents.into_iter().filter(|document| !document.is_null()).fold(Value::Null, layer)
}

fn layer(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(mut base), Value::Mapping(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) if existing.is_mapping() && value.is_mapping() => {
                        let current = std::mem::replace(existing, Value::Null);
                        *existing = layer(current, value);
                    }
                    _ => {
                        base.insert(key, value);
                    }
                }
            }
            Value::Mapping(base)
        }
        (_, overlay) => overlay,
    }
}

fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Mapping(mapping) => Value::Mapping(
            mapping
                .into_iter()
                .filter(|(_, value)| !value.is_null())
                .map(|(key, value)| (key, strip_nulls(value)))
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(text: &str) -> Value {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn overlay_merges_nested_mappings() {
        let base = yaml("postgresql:\n  enabled: true\n  service:\n    port: 5432\n");
        let overlay = yaml("postgresql:\n  service:\n    port: 8080\n");
        assert_eq!(
            coalesce(base, overlay),
            yaml("postgresql:\n  enabled: true\n  service:\n    port: 8080\n")
        );
    }

    #[test]
    fn lists_are_replaced_not_appended() {
        let base = yaml("envVars: [A, B]\n");
        let overlay = yaml("envVars: [C]\n");
        assert_eq!(coalesce(base, overlay), yaml("envVars: [C]\n"));
    }

    #[test]
    fn null_removes_default_key() {
        let base = yaml("config:\n  queuedRunCoordinator: {}\n  other: 1\n");
        let overlay = yaml("config:\n  other: null\n");
        assert_eq!(coalesce(base, overlay), yaml("config:\n  queuedRunCoordinator: {}\n"));
    }

    #[test]
    fn empty_overlay_keeps_defaults() {
        let base = yaml("scheduler:\n  type: DagsterDaemonScheduler\n");
        assert_eq!(coalesce(base.clone(), Value::Null), base);
    }

    #[test]
    fn later_documents_win() {
        let merged = layer_all(vec![
            yaml("scheduler:\n  type: DagsterDaemonScheduler\n"),
            Value::Null,
            yaml("scheduler:\n  type: CustomScheduler\n"),
            yaml("nameOverride: x\n"),
        ]);
        assert_eq!(merged["scheduler"]["type"], "CustomScheduler");
        assert_eq!(merged["nameOverride"], "x");
    }

    #[test]
    fn layered_nulls_still_delete_defaults() {
        let user = layer_all(vec![
            yaml("config:\n  other: 2\n"),
            yaml("config:\n  other: null\n"),
        ]);
        assert_eq!(user["config"].get("other"), Some(&Value::Null));

        let base = yaml("config:\n  queuedRunCoordinator: {}\n  other: 1\n");
        assert_eq!(coalesce(base, user), yaml("config:\n  queuedRunCoordinator: {}\n"));
    }
}
