/// Status reported by the backend for an article-fetch job.
///
/// Parsing never fails: statuses with the literal prefix `error` become
/// [`JobStatus::Error`], and anything else unrecognized becomes
/// [`JobStatus::Other`] and is treated as still in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Searching,
    Processing,
    CreatingEmbeddings,
    Completed,
    Ready,
    Failed,
    Timeout,
    Error(String),
    Other(String),
}

impl JobStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "searching" => Self::Searching,
            "processing" => Self::Processing,
            "creating_embeddings" => Self::CreatingEmbeddings,
            "completed" => Self::Completed,
            "ready" => Self::Ready,
            "failed" => Self::Failed,
            "timeout" => Self::Timeout,
            _ if raw.starts_with("error") => Self::Error(raw.to_string()),
            _ => Self::Other(raw.to_string()),
        }
    }

    /// The raw wire string for this status.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Searching => "searching",
            Self::Processing => "processing",
            Self::CreatingEmbeddings => "creating_embeddings",
            Self::Completed => "completed",
            Self::Ready => "ready",
            Self::Failed => "failed",
            Self::Timeout => "timeout",
            Self::Error(raw) | Self::Other(raw) => raw,
        }
    }

    /// Both `completed` and `ready` mean the article set is usable.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed | Self::Ready)
    }

    pub fn is_terminal(&self) -> bool {
        self.is_success() || matches!(self, Self::Failed | Self::Timeout | Self::Error(_))
    }

    /// Human-readable progress message for this status.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Searching => "Searching PubMed for matching articles",
            Self::Processing => "Processing retrieved articles",
            Self::CreatingEmbeddings => "Creating embeddings for the article set",
            Self::Completed | Self::Ready => "Articles are ready",
            Self::Failed => "Article fetch failed",
            Self::Timeout => "Article fetch timed out",
            Self::Error(_) => "Article fetch reported an error",
            Self::Other(_) => "Still working",
        }
    }
}
