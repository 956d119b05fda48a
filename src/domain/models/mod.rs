pub mod collection;
pub mod config;
pub mod package;
pub mod settings;
pub mod solve;
pub mod validation;
pub mod view;

pub use collection::{Collection, DomainEntry, ProblemEntry};
pub use config::{
    CatalogConfig, Config, LogFormat, LoggingConfig, PollConfig, RotationPolicy, ServiceConfig,
};
pub use package::{
    parse_package_index, PackageIndex, PackageManifest, ParameterChoice, ParameterSpec,
    ServiceManifest,
};
pub use settings::PluginSettings;
pub use solve::{
    solve_url, Plan, PlanStep, PollAttempt, SolveFailure, SolveOutcome, SolveRequest,
    SolveResult, TaskHandle, DEFAULT_ADAPTOR,
};
pub use validation::{ValidationReport, ValidationStatus, DEFAULT_VALIDATION_PROBLEMS};
pub use view::ResultView;
