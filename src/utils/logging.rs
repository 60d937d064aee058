use serde::Serialize;

/// Serializes `value` as pretty JSON and hands it to `log_action`, but only when DEBUG is on.
pub(crate) fn with_pretty_json_debug<T, F>(value: &T, log_action: F)
where
    T: Serialize,
    F: FnOnce(&str),
{
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }

    let pretty_json = serde_json::to_string_pretty(value)
        .unwrap_or_else(|error| format!("<pretty serialize failed: {error}>"));
    log_action(pretty_json.as_str());
}

/// Keeps the first few characters of a secret so logs can tell tokens apart.
pub(crate) fn redact(secret: Option<&str>) -> String {
    match secret {
        None => "<none>".to_string(),
        Some(s) if s.chars().count() <= 8 => "***".to_string(),
        Some(s) => {
            let head: String = s.chars().take(4).collect();
            format!("{head}***")
        }
    }
}
