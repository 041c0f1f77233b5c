use thiserror::Error;

pub type MirrorResult<T> = Result<T, MirrorError>;

#[derive(Error, Debug)]
pub enum MirrorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path error: {0}")]
    Path(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The repository URL does not contain an `owner/name` pair.
    #[error("Invalid repository URL: {0}")]
    InvalidUrl(String),

    /// A git invocation failed or exited with a non-zero status.
    #[error("Git error: {0}")]
    Git(String),

    /// The hosting API answered with an error status or an unreadable body.
    #[error("GitHub API error: {0}")]
    Api(String),

    /// An asset download failed part way.
    #[error("Transfer error: {0}")]
    Transfer(String),

    #[error("Input error: {0}")]
    Prompt(String),
}
