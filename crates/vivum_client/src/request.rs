use serde::Serialize;

/// How multiple topics are combined in a [`SearchSpec::Topics`] search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BooleanOperator {
    And,
    Or,
}

/// The three mutually exclusive forms of a search. Exactly one of the
/// `topic`/`topics`/`query` fields appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SearchSpec {
    Topic {
        topic: String,
    },
    Topics {
        topics: Vec<String>,
        operator: BooleanOperator,
    },
    Query {
        query: String,
    },
}

/// Structured PubMed filters. Empty collections and unset options are
/// omitted from the request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct SearchFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub article_types: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub species: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sex: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub age_groups: Vec<String>,
    /// Other PubMed filter flags, e.g. "free full text" or "humans".
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub other_terms: Vec<String>,
    /// Free-text filter appended verbatim to the query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<String>,
}

/// Body of the job-creation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    #[serde(flatten)]
    pub spec: SearchSpec,
    pub max_results: u32,
    pub auto_transform: bool,
    pub create_embeddings: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<SearchFilters>,
}

impl SearchRequest {
    pub fn new(spec: SearchSpec) -> Self {
        Self {
            spec,
            max_results: 100,
            auto_transform: true,
            create_embeddings: true,
            filters: None,
        }
    }

    pub fn topic(topic: impl Into<String>) -> Self {
        Self::new(SearchSpec::Topic {
            topic: topic.into(),
        })
    }

    pub fn topics(topics: Vec<String>, operator: BooleanOperator) -> Self {
        Self::new(SearchSpec::Topics { topics, operator })
    }

    /// Raw advanced PubMed query, passed through untransformed.
    pub fn query(query: impl Into<String>) -> Self {
        Self::new(SearchSpec::Query {
            query: query.into(),
        })
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_auto_transform(mut self, auto_transform: bool) -> Self {
        self.auto_transform = auto_transform;
        self
    }

    pub fn with_embeddings(mut self, create_embeddings: bool) -> Self {
        self.create_embeddings = create_embeddings;
        self
    }

    pub fn with_filters(mut self, filters: SearchFilters) -> Self {
        self.filters = Some(filters);
        self
    }
}
