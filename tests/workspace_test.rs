//! Filesystem-backed documents and settings working together with the
//! session and document selection services.

use tempfile::TempDir;

use paas_client::domain::errors::DocumentError;
use paas_client::infrastructure::{FileDocumentSource, FileSettingsStore};
use paas_client::services::{load_documents, select_pair, DocumentKind, SolveSession};

const DOMAIN: &str = "(define (DOMAIN blocksworld) (:requirements :strips))";
const PROBLEM: &str = "(define (problem bw-4) (:domain blocksworld))";

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("domain.pddl"), DOMAIN).unwrap();
    std::fs::write(dir.path().join("p01.pddl"), PROBLEM).unwrap();
    std::fs::write(dir.path().join("p02.pddl"), PROBLEM).unwrap();
    std::fs::write(dir.path().join("notes.txt"), "todo: try lama").unwrap();
    dir
}

#[tokio::test]
async fn test_pair_selected_from_files_on_disk() {
    let dir = workspace();
    let source = FileDocumentSource::new(dir.path());
    let ids: Vec<String> = ["notes.txt", "p01.pddl", "domain.pddl"]
        .iter()
        .map(ToString::to_string)
        .collect();

    let documents = load_documents(&source, &ids).await.unwrap();
    assert_eq!(documents[0].kind, DocumentKind::Unknown);
    assert_eq!(documents[2].kind, DocumentKind::Domain);

    let (domain, problem) = select_pair(&documents, None, None).unwrap();
    assert_eq!(domain.id, "domain.pddl");
    assert_eq!(problem.id, "p01.pddl");
}

#[tokio::test]
async fn test_remembered_problem_preferred() {
    let dir = workspace();
    let source = FileDocumentSource::new(dir.path());
    let ids: Vec<String> = ["domain.pddl", "p01.pddl", "p02.pddl"]
        .iter()
        .map(ToString::to_string)
        .collect();
    let documents = load_documents(&source, &ids).await.unwrap();

    let mut session = SolveSession::new("http://localhost:5001");
    session.remember_selection("domain.pddl", "p02.pddl");

    let (_, problem) =
        select_pair(&documents, session.last_domain(), session.last_problem()).unwrap();
    assert_eq!(problem.id, "p02.pddl");
}

#[tokio::test]
async fn test_missing_file_is_not_found() {
    let dir = workspace();
    let source = FileDocumentSource::new(dir.path());

    let result = load_documents(&source, &["missing.pddl".to_string()]).await;
    assert!(matches!(result, Err(DocumentError::NotFound(_))));
}

#[tokio::test]
async fn test_session_base_url_survives_restart() {
    let dir = TempDir::new().unwrap();
    let store = FileSettingsStore::new(dir.path().join("nested").join("settings.json"));

    let mut first = SolveSession::new("https://solver.planning.domains:5001");
    assert!(!first.restore(&store).await.unwrap());
    first.set_base_url("http://localhost:5001");
    first.persist(&store).await.unwrap();
    assert!(store.path().exists());

    let mut second = SolveSession::new("https://solver.planning.domains:5001");
    assert!(second.restore(&store).await.unwrap());
    assert_eq!(second.base_url(), "http://localhost:5001");
    assert!(second.last_domain().is_none());
}

#[tokio::test]
async fn test_legacy_settings_key_accepted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{"PASURL": "http://legacy:5001"}"#).unwrap();

    let mut session = SolveSession::new("http://localhost:5001");
    assert!(session
        .restore(&FileSettingsStore::new(&path))
        .await
        .unwrap());
    assert_eq!(session.base_url(), "http://legacy:5001");
}
