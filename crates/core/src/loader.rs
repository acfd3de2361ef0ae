//! Reading a specification document from disk.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{GeneratorError, Result};
use crate::spec::OpenApiSpec;

/// Input document format, chosen purely by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
    /// `.yaml` or `.yml`
    Yaml,
    /// Anything else
    Json,
}

impl SpecFormat {
    /// `.yaml` / `.yml` select YAML; every other extension is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Load and parse a specification file. Parser errors propagate unchanged.
pub fn load_spec(path: &Path) -> Result<OpenApiSpec> {
    let content = fs::read_to_string(path).map_err(|e| GeneratorError::io(path, e))?;
    let format = SpecFormat::from_path(path);
    debug!(
        path = %path.display(),
        ?format,
        bytes = content.len(),
        "Loaded specification file."
    );
    match format {
        SpecFormat::Yaml => OpenApiSpec::from_yaml(&content),
        SpecFormat::Json => OpenApiSpec::from_json(&content),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(SpecFormat::from_path(Path::new("api.yaml")), SpecFormat::Yaml);
        assert_eq!(SpecFormat::from_path(Path::new("api.YML")), SpecFormat::Yaml);
        assert_eq!(SpecFormat::from_path(Path::new("api.json")), SpecFormat::Json);
        assert_eq!(SpecFormat::from_path(Path::new("api")), SpecFormat::Json);
    }

    #[test]
    fn test_load_yaml_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("api.yml");
        fs::write(&yaml, "paths:\n  /api/widgets/: {}\n").unwrap();
        let json = dir.path().join("api.json");
        fs::write(&json, r#"{"paths":{"/api/gadgets/":{}}}"#).unwrap();

        assert!(load_spec(&yaml).unwrap().paths.contains_key("/api/widgets/"));
        assert!(load_spec(&json).unwrap().paths.contains_key("/api/gadgets/"));
    }

    #[test]
    fn test_parser_errors_propagate() {
        let dir = tempfile::tempdir().unwrap();
        let bad_json = dir.path().join("api.json");
        fs::write(&bad_json, "{ not json").unwrap();
        assert!(matches!(load_spec(&bad_json), Err(GeneratorError::Json(_))));

        let bad_yaml = dir.path().join("api.yaml");
        fs::write(&bad_yaml, "paths: [unclosed").unwrap();
        assert!(matches!(load_spec(&bad_yaml), Err(GeneratorError::Yaml(_))));

        let missing = dir.path().join("missing.yaml");
        assert!(matches!(load_spec(&missing), Err(GeneratorError::Io { .. })));
    }
}
