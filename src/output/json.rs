//! JSON output formatting

use serde::Serialize;

/// Format data as pretty-printed JSON
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_json_pretty_prints() {
        let value = json!({"id": 1, "name": "Backlog"});
        let output = format_json(&value).expect("format");
        assert!(output.contains("\"name\": \"Backlog\""));
        assert!(output.contains('\n'));
    }
}
