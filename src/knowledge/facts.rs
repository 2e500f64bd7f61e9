use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::core::errors::ApiError;

/// Load a domain's JSON fact sheet and flatten it into searchable
/// sentences.
///
/// The fact sheet is optional; a nonexistent file yields an empty
/// string. The expected shape is a mapping of string keys to either
/// scalars or one-level-nested mappings of string keys to scalars.
/// Sentence order follows the mapping's key order.
pub fn load_json_facts(path: &Path) -> Result<String, ApiError> {
    if !path.exists() {
        return Ok(String::new());
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ApiError::Internal(format!("failed to read {}: {}", path.display(), e))
    })?;
    let data: Value = serde_json::from_str(&contents).map_err(|e| {
        ApiError::BadRequest(format!("invalid JSON in {}: {}", path.display(), e))
    })?;

    let Value::Object(map) = data else {
        return Err(ApiError::BadRequest(format!(
            "expected a JSON object in {}",
            path.display()
        )));
    };

    let mut text = String::new();
    for (key, value) in &map {
        let formatted_key = key.replace('_', " ");
        match value {
            Value::Object(nested) => {
                for (sub_key, sub_value) in nested {
                    text.push_str(&format!(
                        "Regarding {}, the value for {} is {}. ",
                        formatted_key,
                        sub_key.replace('_', " "),
                        render_scalar(sub_value)
                    ));
                }
            }
            other => {
                text.push_str(&format!(
                    "The value for {} is {}. ",
                    formatted_key,
                    render_scalar(other)
                ));
            }
        }
    }

    Ok(text)
}

fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_facts(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(json.as_bytes()).expect("write facts");
        file
    }

    #[test]
    fn nested_keys_become_regarding_sentences() {
        let file = write_facts(r#"{"leave_policy": {"annual_days": 18}}"#);
        let text = load_json_facts(file.path()).expect("facts should load");
        assert!(text.contains("Regarding leave policy, the value for annual days is 18."));
    }

    #[test]
    fn scalar_keys_become_value_sentences() {
        let file = write_facts(r#"{"payroll_date": "last working day", "pf_rate": 12}"#);
        let text = load_json_facts(file.path()).expect("facts should load");
        assert!(text.contains("The value for payroll date is last working day."));
        assert!(text.contains("The value for pf rate is 12."));
    }

    #[test]
    fn sentence_order_follows_key_order() {
        let file = write_facts(r#"{"b_first": 1, "a_second": 2}"#);
        let text = load_json_facts(file.path()).expect("facts should load");
        let first = text.find("b first").expect("first key present");
        let second = text.find("a second").expect("second key present");
        assert!(first < second);
    }

    #[test]
    fn missing_file_yields_empty_text() {
        let text = load_json_facts(Path::new("/nonexistent/facts.json")).expect("missing is ok");
        assert_eq!(text, "");
    }

    #[test]
    fn non_object_root_is_rejected() {
        let file = write_facts(r#"[1, 2, 3]"#);
        let err = load_json_facts(file.path()).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
