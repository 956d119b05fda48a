//! Solver package manifests as published by `GET /package`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Packages keyed by name, as returned by the package listing.
pub type PackageIndex = BTreeMap<String, PackageManifest>;

/// Name of the service every solver package exposes.
pub const SOLVE_SERVICE: &str = "solve";

/// A solver package and the services it exposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageManifest {
    /// Package name; filled from the listing key when the manifest omits it.
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub endpoint: PackageEndpoint,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageEndpoint {
    #[serde(default)]
    pub services: BTreeMap<String, ServiceManifest>,
}

/// Declared arguments and return type of one package service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceManifest {
    #[serde(default)]
    pub args: Vec<ParameterSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returns: Option<Value>,
}

/// One solve-time parameter of a package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub name: String,

    #[serde(rename = "type", default)]
    pub param_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Allowed values for categorical parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<ParameterChoice>,
}

/// A value/display pair of a categorical parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterChoice {
    #[serde(deserialize_with = "scalar_to_string")]
    pub value: String,

    #[serde(alias = "display_value", default)]
    pub display: String,
}

impl PackageManifest {
    /// The `solve` service of this package, if declared.
    pub fn solve_service(&self) -> Option<&ServiceManifest> {
        self.endpoint.services.get(SOLVE_SERVICE)
    }
}

impl ParameterSpec {
    pub fn is_categorical(&self) -> bool {
        self.param_type == "categorical" || !self.choices.is_empty()
    }

    /// The declared default rendered as the string sent on the wire.
    pub fn default_string(&self) -> Option<String> {
        match self.default.as_ref()? {
            Value::Null => None,
            Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Whether `value` is acceptable for this parameter.
    ///
    /// Only categorical parameters constrain their values.
    pub fn accepts(&self, value: &str) -> bool {
        !self.is_categorical() || self.choices.iter().any(|choice| choice.value == value)
    }

    pub fn choice_values(&self) -> Vec<&str> {
        self.choices.iter().map(|choice| choice.value.as_str()).collect()
    }
}

/// Parse a package listing, naming each manifest after its key.
pub fn parse_package_index(listing: Value) -> Result<PackageIndex, serde_json::Error> {
    let mut index: PackageIndex = serde_json::from_value(listing)?;
    for (key, manifest) in &mut index {
        if manifest.name.is_empty() {
            manifest.name.clone_from(key);
        }
    }
    Ok(index)
}

fn scalar_to_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        other => other.to_string(),
    })
}
