use ec_client::{ClientConfig, HttpExposureApi};
use ec_core::{messages, Error, ErrorKind, ExposureApi, SearchRequest};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> HttpExposureApi {
    HttpExposureApi::new(ClientConfig::parse(&server.uri()).unwrap()).unwrap()
}

fn request() -> SearchRequest {
    SearchRequest::new("망원동맛집", "https://blog.naver.com/x/1").unwrap()
}

#[tokio::test]
async fn test_posts_json_body_and_decodes_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/check-exposure"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "keyword": "망원동맛집", "blog_url": "https://blog.naver.com/x/1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "keyword": "망원동맛집",
            "is_exposed": true,
            "exposed_rank": 1,
            "exposed_result": { "rank": 1, "title": "t", "url": "https://blog.naver.com/x/1" },
            "total_results": 1,
            "results": [{ "rank": 1, "title": "t", "url": "https://blog.naver.com/x/1" }],
            "message": "입력한 글이 1위에 노출됩니다!"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = api_for(&server).check_exposure(&request()).await.unwrap();
    assert!(response.success);
    assert!(response.is_exposed);
    assert_eq!(response.exposed_rank, Some(1));
    assert_eq!(response.results.len(), 1);
    assert_eq!(response.exposed_result.unwrap().url, "https://blog.naver.com/x/1");
}

#[tokio::test]
async fn test_application_failure_is_returned_as_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/check-exposure"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "keyword": "k",
            "message": "요청 시간이 초과되었습니다."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = api_for(&server).check_exposure(&request()).await.unwrap();
    assert!(!response.success);
    assert_eq!(response.message(), Some("요청 시간이 초과되었습니다."));
}

#[tokio::test]
async fn test_http_error_uses_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "detail": "rate limited" })))
        .expect(1)
        .mount(&server)
        .await;

    let err = api_for(&server).check_exposure(&request()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.to_string(), "rate limited");
    assert!(matches!(err, Error::Transport { status: Some(500), .. }));
}

#[tokio::test]
async fn test_http_error_without_json_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = api_for(&server).check_exposure(&request()).await.unwrap_err();
    assert_eq!(err.to_string(), messages::HTTP_FAILURE);
    assert!(matches!(err, Error::Transport { status: Some(502), .. }));
}

#[tokio::test]
async fn test_validation_detail_list_is_joined() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [
                { "loc": ["body", "keyword"], "msg": "field required", "type": "value_error.missing" }
            ]
        })))
        .mount(&server)
        .await;

    let err = api_for(&server).check_exposure(&request()).await.unwrap_err();
    assert_eq!(err.to_string(), "field required");
}

#[tokio::test]
async fn test_non_json_success_body_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<!doctype html><p>maintenance</p>"))
        .mount(&server)
        .await;

    let err = api_for(&server).check_exposure(&request()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.to_string(), messages::NETWORK_FAILURE);
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let uri = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let api = HttpExposureApi::new(ClientConfig::parse(&uri).unwrap()).unwrap();
    let err = api.check_exposure(&request()).await.unwrap_err();
    assert!(matches!(err, Error::Transport { status: None, .. }));
    assert_eq!(err.to_string(), messages::NETWORK_FAILURE);
}

#[tokio::test]
async fn test_base_url_path_prefix_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/exposure/api/check-exposure"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true, "keyword": "k" })))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::parse(&format!("{}/exposure", server.uri())).unwrap();
    let api = HttpExposureApi::new(config).unwrap();
    let response = api.check_exposure(&request()).await.unwrap();
    assert!(response.success);
    assert!(response.results.is_empty());
}
