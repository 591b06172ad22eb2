use crate::directory::{WorkflowCatalog, WorkflowIds};
use crate::shared::SmokeError;

// Fetched on first use, never invalidated within a run.
#[derive(Debug, Clone, Default)]
pub struct WorkflowDirectoryCache {
    ids: Option<WorkflowIds>,
}

impl WorkflowDirectoryCache {
    pub fn is_populated(&self) -> bool {
        self.ids.is_some()
    }

    pub fn get_or_fetch<C>(&mut self, catalog: &C) -> Result<&WorkflowIds, SmokeError>
    where
        C: WorkflowCatalog + ?Sized,
    {
        let ids = match self.ids.take() {
            Some(ids) => ids,
            None => catalog.fetch_workflow_ids()?,
        };
        Ok(self.ids.insert(ids))
    }
}
