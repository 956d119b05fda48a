//! Picking the domain and problem documents for a solve.

use serde::Serialize;

use crate::domain::errors::DocumentError;
use crate::domain::ports::DocumentSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Domain,
    Problem,
    Unknown,
}

/// Guess what a document holds from its text.
///
/// The check is case-insensitive; a text containing both markers counts as
/// a domain.
pub fn classify(text: &str) -> DocumentKind {
    let lowered = text.to_lowercase();
    if lowered.contains("(domain") {
        DocumentKind::Domain
    } else if lowered.contains("(problem") {
        DocumentKind::Problem
    } else {
        DocumentKind::Unknown
    }
}

/// A loaded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: String,
    pub text: String,
    pub kind: DocumentKind,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            id: id.into(),
            kind: classify(&text),
            text,
        }
    }
}

/// Read and classify every document in `ids`, in order.
pub async fn load_documents(
    source: &dyn DocumentSource,
    ids: &[String],
) -> Result<Vec<Document>, DocumentError> {
    let mut documents = Vec::with_capacity(ids.len());
    for id in ids {
        let text = source.document_text(id).await?;
        documents.push(Document::new(id.clone(), text));
    }
    Ok(documents)
}

/// Domain candidates first, then unclassified documents, then problems.
pub fn domain_choices(documents: &[Document]) -> Vec<&Document> {
    ordered(
        documents,
        [DocumentKind::Domain, DocumentKind::Unknown, DocumentKind::Problem],
    )
}

/// Problem candidates first, then unclassified documents, then domains.
pub fn problem_choices(documents: &[Document]) -> Vec<&Document> {
    ordered(
        documents,
        [DocumentKind::Problem, DocumentKind::Unknown, DocumentKind::Domain],
    )
}

fn ordered(documents: &[Document], order: [DocumentKind; 3]) -> Vec<&Document> {
    order
        .iter()
        .flat_map(|kind| documents.iter().filter(move |doc| doc.kind == *kind))
        .collect()
}

/// Choose a distinct domain/problem pair.
///
/// The last-used ids win when they are still among `documents`; otherwise
/// the head of each ordering is taken.
pub fn select_pair<'a>(
    documents: &'a [Document],
    last_domain: Option<&str>,
    last_problem: Option<&str>,
) -> Result<(&'a Document, &'a Document), DocumentError> {
    let domains = domain_choices(documents);
    let domain = pick(&domains, last_domain, None).ok_or_else(|| incomplete(documents))?;

    let problems = problem_choices(documents);
    let problem = pick(&problems, last_problem, Some(domain.id.as_str()))
        .ok_or_else(|| incomplete(documents))?;

    Ok((domain, problem))
}

fn pick<'a>(
    choices: &[&'a Document],
    preferred: Option<&str>,
    exclude: Option<&str>,
) -> Option<&'a Document> {
    let allowed = |doc: &&&'a Document| Some(doc.id.as_str()) != exclude;
    preferred
        .and_then(|id| choices.iter().filter(allowed).find(|doc| doc.id == id))
        .or_else(|| choices.iter().find(allowed))
        .copied()
}

fn incomplete(documents: &[Document]) -> DocumentError {
    let ids: Vec<_> = documents.iter().map(|doc| doc.id.as_str()).collect();
    DocumentError::IncompleteSelection(if ids.is_empty() {
        "no documents".to_string()
    } else {
        ids.join(", ")
    })
}
