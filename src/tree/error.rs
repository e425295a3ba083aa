use snafu::Snafu;

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TreeError {
    #[snafu(display("Tree is empty"))]
    EmptyTree,
    #[snafu(display("Node '{}' not found", value))]
    NotFound { value: String },
    #[snafu(display("Node '{}' is a file, not a folder", value))]
    NotAFolder { value: String },
    #[snafu(display("Parent '{}' not found", parent))]
    ParentNotFound { parent: String },
    #[snafu(display("Failed to attach node '{}'", value))]
    InsertFailed { value: String },
}
