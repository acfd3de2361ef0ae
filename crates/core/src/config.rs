//! Generator configuration.
//!
//! Every field has a default, so an absent or partial `modgen.toml` is valid.
//! The names configured here are the contracts of the collaborators the
//! generated code calls into (HTTP layer, query library, router).

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{GeneratorError, Result};

/// Conventional config file name looked up by the CLI.
pub const CONFIG_FILE_NAME: &str = "modgen.toml";

/// What to emit for a `$ref` that names no known schema or enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnresolvedRefPolicy {
    /// Emit `any`.
    #[default]
    Any,
    /// Emit the simplified name even though no interface will declare it.
    Name,
}

/// Settings for one generator run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Root directory the host writes into.
    pub output_dir: String,
    /// Leading path segment ignored when inferring module names.
    pub api_prefix: String,
    /// Import source of the HTTP collaborator.
    pub http_module: String,
    /// Request dispatcher exported by `http_module`.
    pub http_client: String,
    /// Single-payload response envelope.
    pub response_type: String,
    /// Paginated collection envelope.
    pub paginated_type: String,
    /// Structural type carrying the pagination query parameters.
    pub pagination_params_type: String,
    /// Query parameter names handled by `pagination_params_type`.
    pub pagination_params: Vec<String>,
    /// Import source of `useQuery` / `useMutation`.
    pub query_module: String,
    /// Import source of `useNavigate`.
    pub router_module: String,
    /// Treatment of refs that resolve to nothing.
    pub unresolved_refs: UnresolvedRefPolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: "modules".to_string(),
            api_prefix: "api".to_string(),
            http_module: "@/core/http".to_string(),
            http_client: "httpClient".to_string(),
            response_type: "ApiResponse".to_string(),
            paginated_type: "PaginatedResponse".to_string(),
            pagination_params_type: "PaginationParams".to_string(),
            pagination_params: vec!["page".to_string(), "page_size".to_string()],
            query_module: "@tanstack/react-query".to_string(),
            router_module: "react-router-dom".to_string(),
            unresolved_refs: UnresolvedRefPolicy::default(),
        }
    }
}

impl GeneratorConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(source: &str, path: &Path) -> Result<Self> {
        toml::from_str(source).map_err(|source| GeneratorError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| GeneratorError::io(path, e))?;
        Self::from_toml(&content, path)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn from_file_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub(crate) fn is_pagination_param(&self, name: &str) -> bool {
        self.pagination_params.iter().any(|p| p == name)
    }
}
