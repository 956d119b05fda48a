//! Solver package discovery and solve-parameter resolution.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::domain::errors::SolveError;
use crate::domain::models::{PackageIndex, PackageManifest, ParameterSpec};
use crate::domain::ports::SolverService;

/// Arguments of the solve service that carry the documents themselves.
const DOCUMENT_ARGS: [&str; 2] = ["domain", "problem"];

/// Cached view of the packages a service offers.
pub struct PackageCatalog {
    service: Arc<dyn SolverService>,
    cache: RwLock<Option<PackageIndex>>,
}

impl PackageCatalog {
    pub fn new(service: Arc<dyn SolverService>) -> Self {
        Self {
            service,
            cache: RwLock::new(None),
        }
    }

    /// Fetch the package listing again, replacing the cache.
    pub async fn refresh(&self) -> Result<PackageIndex, SolveError> {
        let index = self
            .service
            .list_packages()
            .await
            .map_err(SolveError::Catalog)?;
        debug!(count = index.len(), "package listing refreshed");
        *self.cache.write().await = Some(index.clone());
        Ok(index)
    }

    /// The cached listing, fetched on first use.
    pub async fn index(&self) -> Result<PackageIndex, SolveError> {
        if let Some(index) = self.cache.read().await.as_ref() {
            return Ok(index.clone());
        }
        self.refresh().await
    }

    /// Forget the cached listing, e.g. after the base URL changed.
    pub async fn invalidate(&self) {
        *self.cache.write().await = None;
    }

    /// All packages, sorted by name.
    pub async fn list(&self) -> Result<Vec<PackageManifest>, SolveError> {
        let mut packages: Vec<_> = self.index().await?.into_values().collect();
        packages.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(packages)
    }

    pub async fn package(&self, name: &str) -> Result<PackageManifest, SolveError> {
        self.index()
            .await?
            .remove(name)
            .ok_or_else(|| SolveError::UnknownPackage(name.to_string()))
    }

    /// Parameters of the package's solve service, minus the document slots.
    pub async fn solve_parameters(&self, package: &str) -> Result<Vec<ParameterSpec>, SolveError> {
        let manifest = self.package(package).await?;
        Ok(solve_parameters_of(&manifest))
    }

    /// Merge user-supplied values with declared defaults.
    ///
    /// A categorical value outside its declared choices is rejected.
    /// Names the package does not declare are passed through unchanged.
    pub async fn resolve_parameters(
        &self,
        package: &str,
        user_values: &BTreeMap<String, String>,
    ) -> Result<BTreeMap<String, String>, SolveError> {
        let manifest = self.package(package).await?;
        resolve_against(&solve_parameters_of(&manifest), user_values)
    }
}

fn solve_parameters_of(manifest: &PackageManifest) -> Vec<ParameterSpec> {
    manifest
        .solve_service()
        .map(|service| {
            service
                .args
                .iter()
                .filter(|arg| !DOCUMENT_ARGS.contains(&arg.name.as_str()))
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}

fn resolve_against(
    specs: &[ParameterSpec],
    user_values: &BTreeMap<String, String>,
) -> Result<BTreeMap<String, String>, SolveError> {
    let mut resolved = BTreeMap::new();

    for spec in specs {
        match user_values.get(&spec.name) {
            Some(value) if !spec.accepts(value) => {
                return Err(SolveError::InvalidParameter {
                    name: spec.name.clone(),
                    value: value.clone(),
                    expected: spec.choice_values().join(", "),
                });
            }
            Some(value) => {
                resolved.insert(spec.name.clone(), value.clone());
            }
            None => {
                if let Some(default) = spec.default_string() {
                    resolved.insert(spec.name.clone(), default);
                }
            }
        }
    }

    for (name, value) in user_values {
        if !specs.iter().any(|spec| &spec.name == name) {
            warn!(parameter = %name, "parameter not declared by package, sending as-is");
            resolved.insert(name.clone(), value.clone());
        }
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ServiceError;
    use crate::domain::models::{parse_package_index, SolveRequest, TaskHandle};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ListingService {
        listing: Value,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SolverService for ListingService {
        fn base_url(&self) -> &str {
            "http://localhost:5001"
        }

        async fn list_packages(&self) -> Result<PackageIndex, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            parse_package_index(self.listing.clone()).map_err(|err| ServiceError::Decode {
                url: "http://localhost:5001/package".to_string(),
                reason: err.to_string(),
            })
        }

        async fn submit(&self, _: &str, _: &SolveRequest) -> Result<Value, ServiceError> {
            unreachable!("catalog never submits")
        }

        async fn check(&self, _: &TaskHandle, _: &str) -> Result<Value, ServiceError> {
            unreachable!("catalog never polls")
        }

        async fn solve_and_validate(&self, _: i64) -> Result<Value, ServiceError> {
            unreachable!("catalog never validates")
        }
    }

    fn catalog() -> (PackageCatalog, Arc<ListingService>) {
        let service = Arc::new(ListingService {
            listing: json!({
                "lama-first": {
                    "description": "LAMA first solution",
                    "endpoint": {"services": {"solve": {"args": [
                        {"name": "domain", "type": "file"},
                        {"name": "problem", "type": "file"},
                        {"name": "search", "type": "categorical", "default": "lazy",
                         "choices": [{"value": "lazy", "display_value": "Lazy"},
                                     {"value": "eager", "display_value": "Eager"}]},
                        {"name": "bound", "type": "int", "default": 100}
                    ]}}}
                },
                "dual-bfws": {"endpoint": {"services": {"solve": {"args": []}}}}
            }),
            calls: AtomicUsize::new(0),
        });
        (PackageCatalog::new(service.clone()), service)
    }

    #[tokio::test]
    async fn test_list_sorted_and_cached() {
        let (catalog, service) = catalog();
        let names: Vec<_> = catalog
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["dual-bfws", "lama-first"]);

        catalog.list().await.unwrap();
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);

        catalog.invalidate().await;
        catalog.list().await.unwrap();
        assert_eq!(service.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_solve_parameters_exclude_documents() {
        let (catalog, _) = catalog();
        let names: Vec<_> = catalog
            .solve_parameters("lama-first")
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["search", "bound"]);
    }

    #[tokio::test]
    async fn test_resolve_fills_defaults() {
        let (catalog, _) = catalog();
        let resolved = catalog
            .resolve_parameters("lama-first", &BTreeMap::new())
            .await
            .unwrap();
        assert_eq!(resolved.get("search").map(String::as_str), Some("lazy"));
        assert_eq!(resolved.get("bound").map(String::as_str), Some("100"));
    }

    #[tokio::test]
    async fn test_resolve_rejects_unknown_choice() {
        let (catalog, _) = catalog();
        let values = BTreeMap::from([("search".to_string(), "greedy".to_string())]);
        let err = catalog
            .resolve_parameters("lama-first", &values)
            .await
            .unwrap_err();
        assert!(matches!(err, SolveError::InvalidParameter { ref name, .. } if name == "search"));
        assert!(err.to_string().contains("lazy, eager"));
    }

    #[tokio::test]
    async fn test_resolve_passes_undeclared_names() {
        let (catalog, _) = catalog();
        let values = BTreeMap::from([
            ("search".to_string(), "eager".to_string()),
            ("seed".to_string(), "7".to_string()),
        ]);
        let resolved = catalog.resolve_parameters("lama-first", &values).await.unwrap();
        assert_eq!(resolved.get("search").map(String::as_str), Some("eager"));
        assert_eq!(resolved.get("seed").map(String::as_str), Some("7"));
    }

    #[tokio::test]
    async fn test_unknown_package() {
        let (catalog, _) = catalog();
        assert!(matches!(
            catalog.solve_parameters("nope").await,
            Err(SolveError::UnknownPackage(name)) if name == "nope"
        ));
    }
}
