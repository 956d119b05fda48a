use crate::domain::models::ResultView;

/// Display collaborator that receives formatted results.
pub trait ResultRenderer: Send + Sync {
    fn render(&self, view: &ResultView);
}
