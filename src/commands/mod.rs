use serde_json::{Map, Value};
use std::io::Read;
use std::path::Path;

pub type CmdResult<T> = storygen::Result<(T, i32)>;

pub(crate) struct GlobalArgs {
    /// Workspace file (defaults to ./angular.json).
    pub workspace: Option<String>,
}

// ============================================================================
// JSON Input Parsing (CLI layer)
// ============================================================================

/// Read JSON spec from string, file (@path), or stdin (-).
fn read_json_spec_to_string(spec: &str) -> storygen::Result<String> {
    use std::io::IsTerminal;

    if spec.trim() == "-" {
        let mut buf = String::new();
        let mut stdin = std::io::stdin();
        if stdin.is_terminal() {
            return Err(storygen::Error::validation_invalid_argument(
                "json",
                "Cannot read JSON from stdin when stdin is a TTY",
                None,
                None,
            ));
        }
        stdin.read_to_string(&mut buf).map_err(|e| {
            storygen::Error::internal_io(e.to_string(), Some("read stdin".to_string()))
        })?;
        return Ok(buf);
    }

    if let Some(path) = spec.strip_prefix('@') {
        if path.trim().is_empty() {
            return Err(storygen::Error::validation_invalid_argument(
                "json",
                "Invalid JSON spec '@' (missing file path)",
                None,
                None,
            ));
        }
        return storygen::io::read_file(Path::new(path), &format!("read {}", path));
    }

    Ok(spec.to_string())
}

/// Parse an optional JSON spec into an object. Non-objects are rejected.
pub fn parse_json_spec(spec: Option<&str>) -> storygen::Result<Map<String, Value>> {
    let Some(spec) = spec else {
        return Ok(Map::new());
    };

    let raw = read_json_spec_to_string(spec)?;
    let value: Value = serde_json::from_str(&raw).map_err(|e| {
        storygen::Error::validation_invalid_json(
            e,
            Some("parse JSON spec".to_string()),
            Some(raw.chars().take(200).collect::<String>()),
        )
    })?;

    match value {
        Value::Object(obj) => Ok(obj),
        _ => Err(storygen::Error::validation_invalid_argument(
            "json",
            "JSON spec must be an object",
            None,
            None,
        )),
    }
}

/// Merge option layers left to right. Later layers override earlier keys.
pub fn merge_json_layers(layers: Vec<Map<String, Value>>) -> Value {
    let mut base = Map::new();
    for layer in layers {
        for (k, v) in layer {
            base.insert(k, v);
        }
    }
    Value::Object(base)
}

pub mod project;
pub mod story;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (storygen::Result<serde_json::Value>, i32) {
    crate::tty::status("storygen is working...");

    match command {
        crate::Commands::Story(args) => dispatch!(args, global, story),
        crate::Commands::Project(args) => dispatch!(args, global, project),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn later_layers_override_earlier_keys() {
        let defaults = json!({ "useTemplate": true, "tagAsLabel": true });
        let spec = json!({ "useTemplate": false });
        let flags = json!({ "noStory": true });

        let merged = merge_json_layers(vec![
            defaults.as_object().unwrap().clone(),
            spec.as_object().unwrap().clone(),
            flags.as_object().unwrap().clone(),
        ]);

        assert_eq!(
            merged,
            json!({ "useTemplate": false, "tagAsLabel": true, "noStory": true })
        );
    }

    #[test]
    fn inline_spec_must_be_object() {
        assert!(parse_json_spec(Some("[1, 2]")).is_err());
        assert!(parse_json_spec(Some("{\"name\": \"foo/bar\"}")).is_ok());
        assert!(parse_json_spec(None).unwrap().is_empty());
    }

    #[test]
    fn invalid_spec_is_validation_error() {
        let err = parse_json_spec(Some("{")).unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_json");
    }

    #[test]
    fn spec_can_be_read_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, br#"{"useTemplate": true}"#).unwrap();
        let spec = format!("@{}", file.path().display());

        let obj = parse_json_spec(Some(&spec)).unwrap();
        assert_eq!(obj["useTemplate"], json!(true));
    }
}
