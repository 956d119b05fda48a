pub mod collection_browser;
pub mod document_selection;
pub mod package_catalog;
pub mod poll_machine;
pub mod result_formatter;
pub mod session;
pub mod solve_adapter;
pub mod validation_runner;

pub use collection_browser::{solve_request_for, CollectionBrowser};
pub use document_selection::{
    classify, domain_choices, load_documents, problem_choices, select_pair, Document,
    DocumentKind,
};
pub use package_catalog::PackageCatalog;
pub use poll_machine::{PollMachine, PollTransition};
pub use session::SolveSession;
pub use solve_adapter::{SolveAdapter, SolveHandle};
pub use validation_runner::ValidationRunner;
