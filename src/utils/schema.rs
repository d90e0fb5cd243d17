use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    Object,
    Array,
    String,
}

impl Kind {
    fn matches(self, value: &Value) -> bool {
        match self {
            Kind::Object => value.is_object(),
            Kind::Array => value.is_array(),
            Kind::String => value.is_string(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Kind::Object => "an object",
            Kind::Array => "an array",
            Kind::String => "a string",
        }
    }
}

/// Top-level structure every scanner report carries, checked in order so that
/// a missing parent is reported before its children.
const REQUIRED: &[(&str, Kind)] = &[
    ("scanner", Kind::Object),
    ("info", Kind::Object),
    ("info.resultUrl", Kind::String),
    ("result", Kind::Object),
    ("result.metadata", Kind::Object),
    ("result.packages", Kind::Array),
];

/// Checks that `document` has the shape of a scanner report. The error names
/// the first offending key.
pub fn check_required_keys(document: &Value) -> Result<(), String> {
    if !document.is_object() {
        return Err("top-level value is not an object".to_string());
    }
    for (key, kind) in REQUIRED {
        let pointer = format!("/{}", key.replace('.', "/"));
        match document.pointer(&pointer) {
            None => return Err(format!("missing required key `{key}`")),
            Some(value) if !kind.matches(value) => {
                return Err(format!("`{key}` must be {}", kind.name()))
            }
            Some(_) => {}
        }
    }
    Ok(())
}
