//! Request templates: YAML documents describing one HTTP call.
//!
//! A template is looked up by file name under the templates directory:
//!
//! ```yaml
//! api_name: Echo
//! method: POST
//! url: https://example.com/echo
//! headers:
//!   Authorization: Bearer [token_issue.yml]
//! params:
//!   q: hello
//! ```

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Name shown when a template has no `api_name`.
pub const UNNAMED_API: &str = "(unnamed)";

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template {name} not found in {}", .dir.display())]
    NotFound { name: String, dir: PathBuf },
    #[error("template name {name:?} must stay inside the templates directory")]
    InvalidName { name: String },
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid template {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// One declarative HTTP request. `params` and `headers` keep document order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RequestSpec {
    #[serde(default = "default_method")]
    pub method: String,
    pub url: String,
    #[serde(default, deserialize_with = "string_pairs")]
    pub params: Vec<(String, String)>,
    #[serde(default, deserialize_with = "string_pairs")]
    pub headers: Vec<(String, String)>,
    #[serde(default, deserialize_with = "body_data")]
    pub data: Option<String>,
    #[serde(default)]
    pub api_name: Option<String>,
}

fn default_method() -> String {
    "GET".to_string()
}

impl RequestSpec {
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    pub fn api_name(&self) -> &str {
        self.api_name.as_deref().unwrap_or(UNNAMED_API)
    }

    /// First header whose name matches `name` ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Copy of this spec with the first `name` header set to `value`.
    /// Appends the header if it was not present.
    pub fn with_header(&self, name: &str, value: &str) -> RequestSpec {
        let mut spec = self.clone();
        match spec
            .headers
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
        {
            Some((_, v)) => *v = value.to_string(),
            None => spec.headers.push((name.to_string(), value.to_string())),
        }
        spec
    }
}

/// Render a YAML scalar the way it reads in the document. `None` for nested values.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => None,
    }
}

fn string_pairs<'de, D>(deserializer: D) -> Result<Vec<(String, String)>, D::Error>
where
    D: Deserializer<'de>,
{
    let map: Option<serde_yaml::Mapping> = Option::deserialize(deserializer)?;
    let Some(map) = map else {
        return Ok(Vec::new());
    };

    map.iter()
        .map(|(k, v)| {
            let key = scalar_to_string(k)
                .ok_or_else(|| D::Error::custom("mapping keys must be scalars"))?;
            let value = scalar_to_string(v)
                .ok_or_else(|| D::Error::custom(format!("value of `{key}` must be a scalar")))?;
            Ok((key, value))
        })
        .collect()
}

/// `data` may be a string (sent verbatim), a scalar, or a structure (sent as compact JSON).
fn body_data<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Sequence(_)) | Some(Value::Mapping(_)) => {
            let json = serde_json::to_string(&value).map_err(D::Error::custom)?;
            Ok(Some(json))
        }
        Some(other) => scalar_to_string(&other)
            .map(Some)
            .ok_or_else(|| D::Error::custom("unsupported `data` value")),
    }
}

/// Directory of request templates.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    root: PathBuf,
}

impl TemplateStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of `name` if it exists in the store. `name` is relative to the
    /// root; absolute paths and `.`/`..` components are refused.
    pub fn locate(&self, name: &str) -> Result<PathBuf, TemplateError> {
        if !Path::new(name)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(TemplateError::InvalidName {
                name: name.to_string(),
            });
        }
        let path = self.root.join(name);
        if path.is_file() {
            Ok(path)
        } else {
            Err(TemplateError::NotFound {
                name: name.to_string(),
                dir: self.root.clone(),
            })
        }
    }

    pub fn load(&self, name: &str) -> Result<RequestSpec, TemplateError> {
        let path = self.locate(name)?;
        let text = fs::read_to_string(&path).map_err(|source| TemplateError::Read {
            path: path.clone(),
            source,
        })?;
        let spec =
            RequestSpec::from_yaml(&text).map_err(|source| TemplateError::Parse { path, source })?;
        tracing::debug!("loaded template {} ({} {})", name, spec.method, spec.url);
        Ok(spec)
    }

    /// Names of all `*.yml` / `*.yaml` files in the store, sorted.
    pub fn list(&self) -> Result<Vec<String>, TemplateError> {
        let entries = fs::read_dir(&self.root).map_err(|source| TemplateError::Read {
            path: self.root.clone(),
            source,
        })?;

        let mut names: Vec<String> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml"))
            })
            .filter_map(|path| path.file_name().and_then(|n| n.to_str()).map(str::to_string))
            .collect();
        names.sort();
        Ok(names)
    }
}
