use rolechat::{
    CompletionHandler, Credential, OpenAiClient, OpenAiConfig, Outcome, Role,
};
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, Request as WiremockRequest, ResponseTemplate,
    matchers::{header, method, path},
};

const COMPLETIONS_PATH: &str = "/v1/chat/completions";

fn handler_for(server: &MockServer) -> CompletionHandler<OpenAiClient> {
    let config = OpenAiConfig::new().with_base_url(format!("{}/v1", server.uri()));
    CompletionHandler::new(OpenAiClient::new(config).expect("client"))
}

fn completion(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "chatcmpl-abc123",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "gpt-3.5-turbo-0125",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "logprobs": null,
            "finish_reason": "stop"
        }],
        "usage": {
            "prompt_tokens": 64,
            "completion_tokens": 12,
            "total_tokens": 76
        }
    }))
}

fn error_envelope(status: u16, message: &str, kind: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "error": {
            "message": message,
            "type": kind,
            "param": null,
            "code": null
        }
    }))
}

fn parse_body(request: &WiremockRequest) -> Value {
    serde_json::from_slice(&request.body).expect("request body should be JSON")
}

#[tokio::test]
async fn success_sends_expected_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(header("authorization", "Bearer sk-test-key"))
        .respond_with(completion("Use soft diffused light..."))
        .expect(1)
        .mount(&server)
        .await;

    let question = "How do I light a dream sequence?";
    let outcome = handler_for(&server)
        .generate(&Credential::new("sk-test-key"), Role::VideoDirector, question)
        .await;

    assert_eq!(
        outcome,
        Outcome::Success("Use soft diffused light...".to_string())
    );

    let requests = server
        .received_requests()
        .await
        .expect("mock server should record requests");
    assert_eq!(requests.len(), 1);

    let body = parse_body(&requests[0]);
    assert_eq!(body["model"], "gpt-3.5-turbo");
    assert_eq!(body["max_tokens"], 500);
    let temperature = body["temperature"].as_f64().expect("temperature");
    assert!((temperature - 0.7).abs() < 1e-6);

    let messages = body["messages"].as_array().expect("messages array");
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(
        messages[0]["content"],
        Role::VideoDirector.describe().description
    );
    assert_eq!(messages[1]["role"], "user");
    assert_eq!(messages[1]["content"], question);
}

#[tokio::test]
async fn unauthorized_maps_to_auth_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(error_envelope(
            401,
            "Incorrect API key provided: sk-wrong.",
            "invalid_request_error",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = handler_for(&server)
        .generate(&Credential::new("sk-wrong"), Role::ActingCoach, "How?")
        .await;

    assert_eq!(outcome, Outcome::AuthFailure);
    assert_eq!(
        outcome.to_string(),
        "Invalid API key. Please check your OpenAI API key."
    );
}

#[tokio::test]
async fn too_many_requests_maps_to_rate_limited_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(error_envelope(
            429,
            "You exceeded your current quota, please check your plan and billing details.",
            "insufficient_quota",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = handler_for(&server)
        .generate(&Credential::new("sk-test"), Role::FashionStylist, "What now?")
        .await;

    assert_eq!(outcome, Outcome::RateLimited);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn server_error_surfaces_upstream_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(error_envelope(
            503,
            "The engine is currently overloaded, please try again later",
            "server_error",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = handler_for(&server)
        .generate(&Credential::new("sk-test"), Role::ArtCurator, "Why?")
        .await;

    assert_eq!(
        outcome,
        Outcome::OtherFailure(
            "The engine is currently overloaded, please try again later".to_string()
        )
    );
}

#[tokio::test]
async fn empty_choices_is_an_other_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-empty",
            "model": "gpt-3.5-turbo",
            "choices": []
        })))
        .mount(&server)
        .await;

    let outcome = handler_for(&server)
        .generate(&Credential::new("sk-test"), Role::DanceInstructor, "Hi")
        .await;

    assert_eq!(
        outcome,
        Outcome::OtherFailure("No choices in response".to_string())
    );
}

#[tokio::test]
async fn unreachable_upstream_is_an_other_failure() {
    // Bind then release a port so nothing is listening on it.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let config = OpenAiConfig::new().with_base_url(format!("http://{addr}/v1"));
    let handler = CompletionHandler::new(OpenAiClient::new(config).expect("client"));

    let outcome = handler
        .generate(&Credential::new("sk-test"), Role::VideoDirector, "Hello?")
        .await;

    match outcome {
        Outcome::OtherFailure(message) => assert!(message.starts_with("Request failed")),
        other => panic!("Expected OtherFailure, got {other:?}"),
    }
}

#[tokio::test]
async fn validation_failure_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(completion("unused"))
        .expect(0)
        .mount(&server)
        .await;

    let handler = handler_for(&server);
    let missing_key = handler
        .generate(&Credential::default(), Role::VideoDirector, "q")
        .await;
    let missing_question = handler
        .generate(&Credential::new("sk-test"), Role::VideoDirector, "   ")
        .await;

    assert_eq!(missing_key.to_string(), "Please enter your OpenAI API key.");
    assert_eq!(missing_question.to_string(), "Please enter a question.");
}

#[tokio::test]
async fn repeated_submissions_each_reach_the_server() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(completion("Use soft diffused light..."))
        .expect(2)
        .mount(&server)
        .await;

    let handler = handler_for(&server);
    let credential = Credential::new("sk-test");
    for _ in 0..2 {
        let outcome = handler
            .generate(&credential, Role::VideoDirector, "How do I light a dream sequence?")
            .await;
        assert!(outcome.is_success());
    }
}
