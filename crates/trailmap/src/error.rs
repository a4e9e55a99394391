#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("graph contains an edge with a missing endpoint: {edge_id}")]
    MissingEndpoint { edge_id: String },

    #[error("graph contains a duplicate node id: {node_id}")]
    DuplicateNode { node_id: String },

    #[error("node {node_id} references parent {parent_id}, which is missing or forms a cycle")]
    UnknownParent { node_id: String, parent_id: String },

    #[error("invalid layout options: {message}")]
    InvalidOptions { message: String },

    #[error("roadmap document JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
