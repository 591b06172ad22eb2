#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Bootstrap,
    Search,
    TasksCreate,
    TasksUpdate,
    DbSchema,
    DbSample,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::Bootstrap,
        Operation::Search,
        Operation::TasksCreate,
        Operation::TasksUpdate,
        Operation::DbSchema,
        Operation::DbSample,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Self::Bootstrap => "/v1/os/bootstrap",
            Self::Search => "/v1/notion/search",
            Self::TasksCreate => "/v1/notion/tasks/create",
            Self::TasksUpdate => "/v1/notion/tasks/update",
            Self::DbSchema => "/v1/notion/db/schema",
            Self::DbSample => "/v1/notion/db/sample",
        }
    }

    pub fn workflow_name(self) -> &'static str {
        match self {
            Self::Bootstrap => "v1_os_bootstrap",
            Self::Search => "v1_notion_search",
            Self::TasksCreate => "v1_tasks_create",
            Self::TasksUpdate => "v1_tasks_update",
            Self::DbSchema => "v1_db_schema",
            Self::DbSample => "v1_db_sample",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Bootstrap => "bootstrap",
            Self::Search => "search",
            Self::TasksCreate => "tasks_create",
            Self::TasksUpdate => "tasks_update",
            Self::DbSchema => "db_schema",
            Self::DbSample => "db_sample",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.path() == path)
    }
}
