//! Records of the public planning-domains collection API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named group of domains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(default)]
    pub collection_id: Option<i64>,

    pub collection_name: String,

    #[serde(default)]
    pub description: String,

    /// Member domain ids, delivered either as a JSON array or as a string
    /// holding one.
    #[serde(default)]
    pub domain_set: Value,
}

impl Collection {
    pub fn domain_ids(&self) -> Vec<i64> {
        match &self.domain_set {
            Value::String(encoded) => serde_json::from_str(encoded).unwrap_or_default(),
            Value::Array(ids) => ids.iter().filter_map(Value::as_i64).collect(),
            _ => Vec::new(),
        }
    }

    pub fn contains(&self, domain_id: i64) -> bool {
        self.domain_ids().contains(&domain_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainEntry {
    pub domain_id: i64,

    pub domain_name: String,

    #[serde(default)]
    pub description: String,
}

/// A problem instance with the URLs of its hosted documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemEntry {
    #[serde(default)]
    pub problem_id: Option<i64>,

    pub problem: String,

    pub domain_url: String,

    pub problem_url: String,

    #[serde(default)]
    pub upper_bound: Option<f64>,

    #[serde(default)]
    pub lower_bound: Option<f64>,
}

impl ProblemEntry {
    pub fn upper_bound_label(&self) -> String {
        bound_label(self.upper_bound)
    }

    pub fn lower_bound_label(&self) -> String {
        bound_label(self.lower_bound)
    }
}

fn bound_label(bound: Option<f64>) -> String {
    bound.map_or_else(|| "unknown".to_string(), |value| value.to_string())
}
