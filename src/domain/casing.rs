//! Name casing between chart values (camelCase) and instance config (snake_case).

/// Convert a snake_case identifier to camelCase.
///
/// The first component is kept as-is; every following component is
/// title-cased (`verify_cert_path` -> `verifyCertPath`).
pub fn to_camel_case(s: &str) -> String {
    let mut components = s.split('_');
    let mut out = components.next().unwrap_or_default().to_string();
    for component in components {
        let mut chars = component.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(&chars.as_str().to_lowercase());
        }
    }
    out
}

/// Convert a camelCase identifier to snake_case.
///
/// Runs of capitals are treated as one word (`useSSL` -> `use_ssl`).
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev_lower = i > 0 && !chars[i - 1].is_uppercase() && chars[i - 1] != '_';
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let prev_upper = i > 0 && chars[i - 1].is_uppercase();
            if prev_lower || (prev_upper && next_lower) {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
