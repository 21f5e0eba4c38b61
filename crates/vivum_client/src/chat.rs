use serde::Deserialize;

/// Reference to a source article backing part of an answer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Citation {
    pub pmid: String,
    #[serde(default)]
    pub title: Option<String>,
}

/// Answer to a chat query, grounded in the fetched article set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatAnswer {
    pub answer: String,
    #[serde(default)]
    pub citations: Vec<Citation>,
}
