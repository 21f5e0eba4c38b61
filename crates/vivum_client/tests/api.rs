use pretty_assertions::assert_eq;
use serde_json::json;
use vivum_client::{
    ApiError, ApiSettings, BooleanOperator, ConversationId, HttpVivumApi, JobId, SearchFilters,
    SearchRequest, VivumApi,
};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> HttpVivumApi {
    HttpVivumApi::new(ApiSettings::new(server.uri())).expect("client builds")
}

#[test]
fn single_topic_request_serializes_with_defaults() {
    let request = SearchRequest::topic("aspirin");
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({
            "topic": "aspirin",
            "max_results": 100,
            "auto_transform": true,
            "create_embeddings": true,
        })
    );
}

#[test]
fn topics_request_serializes_operator_and_filters() {
    let filters = SearchFilters {
        date_from: Some("2020/01/01".to_string()),
        article_types: vec!["Review".to_string()],
        languages: vec!["english".to_string()],
        other_terms: vec!["free full text".to_string()],
        ..SearchFilters::default()
    };
    let request = SearchRequest::topics(
        vec!["aspirin".to_string(), "stroke".to_string()],
        BooleanOperator::Or,
    )
    .with_max_results(50)
    .with_auto_transform(false)
    .with_filters(filters);

    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({
            "topics": ["aspirin", "stroke"],
            "operator": "OR",
            "max_results": 50,
            "auto_transform": false,
            "create_embeddings": true,
            "filters": {
                "date_from": "2020/01/01",
                "article_types": ["Review"],
                "languages": ["english"],
                "other_terms": ["free full text"],
            },
        })
    );
}

#[test]
fn advanced_query_request_serializes_the_raw_query() {
    let request = SearchRequest::query("(aspirin[Title]) AND (stroke[MeSH Terms])")
        .with_embeddings(false);
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({
            "query": "(aspirin[Title]) AND (stroke[MeSH Terms])",
            "max_results": 100,
            "auto_transform": true,
            "create_embeddings": false,
        })
    );
}

#[tokio::test]
async fn create_job_posts_the_request_and_returns_the_id() {
    let server = MockServer::start().await;
    let request = SearchRequest::topic("sepsis biomarkers").with_max_results(25);
    Mock::given(method("POST"))
        .and(path("/api/articles/fetch"))
        .and(body_json(json!({
            "topic": "sepsis biomarkers",
            "max_results": 25,
            "auto_transform": true,
            "create_embeddings": true,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "topic_id": "abc123" })))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let job_id = api.create_job(&request).await.expect("job created");
    assert_eq!(job_id, JobId::new("abc123"));
}

#[tokio::test]
async fn create_job_maps_http_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/articles/fetch"))
        .respond_with(ResponseTemplate::new(422))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let err = api
        .create_job(&SearchRequest::topic("x"))
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::Http(422));
}

#[tokio::test]
async fn job_status_reads_the_raw_status_string() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/articles/status/abc123"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "status": "creating_embeddings" })),
        )
        .mount(&server)
        .await;

    let api = api_for(&server);
    let report = api
        .job_status(&JobId::new("abc123"))
        .await
        .expect("status read");
    assert_eq!(report.status, "creating_embeddings");
}

#[tokio::test]
async fn job_status_rejects_malformed_bodies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/articles/status/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let err = api.job_status(&JobId::new("abc123")).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn send_query_returns_answer_and_citations() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat/query"))
        .and(body_json(json!({
            "conversation_id": "conv-1",
            "question": "Does aspirin reduce stroke risk?",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": "Yes, in secondary prevention [1].",
            "citations": [{ "pmid": "12345678", "title": "Aspirin after stroke" }],
        })))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let answer = api
        .send_query(
            &ConversationId::new("conv-1"),
            "Does aspirin reduce stroke risk?",
        )
        .await
        .expect("query answered");
    assert_eq!(answer.answer, "Yes, in secondary prevention [1].");
    assert_eq!(answer.citations.len(), 1);
    assert_eq!(answer.citations[0].pmid, "12345678");
    assert_eq!(
        answer.citations[0].title.as_deref(),
        Some("Aspirin after stroke")
    );
}

#[tokio::test]
async fn send_query_tolerates_missing_citations() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "answer": "No data." })))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let answer = api
        .send_query(&ConversationId::new("conv-2"), "Anything?")
        .await
        .expect("query answered");
    assert_eq!(answer.answer, "No data.");
    assert!(answer.citations.is_empty());
}
