use teamcity_api::types::{BuildConfigurationId, BuildId, ProjectId};
use teamcity_api::{Auth, BuildQuery, Client, Error};
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

fn guest(server: &MockServer) -> Client {
    Client::new(&server.uri(), Auth::Guest).unwrap()
}

#[tokio::test]
async fn get_builds_sends_locator() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("builds.json");

    Mock::given(method("GET"))
        .and(path("/guestAuth/app/rest/builds"))
        .and(query_param("locator", "buildType:(id:Kotlin_Dev),status:SUCCESS,count:2"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let query = BuildQuery::default()
        .from_configuration(BuildConfigurationId::new("Kotlin_Dev").unwrap())
        .limit_results(2)
        .unwrap();
    let resp = guest(&mock_server).get_builds(&query).await.unwrap();
    assert_eq!(resp.build.unwrap().len(), 2);
}

#[tokio::test]
async fn basic_auth_uses_http_auth_entry_point() {
    let mock_server = MockServer::start().await;

    // "admin:secret" in base64
    Mock::given(method("GET"))
        .and(path("/httpAuth/app/rest/projects/id:_Root"))
        .and(header("authorization", "Basic YWRtaW46c2VjcmV0"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"id":"_Root","name":"<Root project>"}"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(
        &mock_server.uri(),
        Auth::Basic {
            username: "admin".to_string(),
            password: "secret".to_string(),
        },
    )
    .unwrap();
    let project = client
        .get_project(&ProjectId::new("_Root").unwrap())
        .await
        .unwrap();
    assert_eq!(project.name.as_deref(), Some("<Root project>"));
}

#[tokio::test]
async fn unauthorized_surfaces_as_http_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/httpAuth/app/rest/builds/id:1"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Authentication required"))
        .mount(&mock_server)
        .await;

    let client = Client::new(
        &mock_server.uri(),
        Auth::Basic {
            username: "admin".to_string(),
            password: "wrong".to_string(),
        },
    )
    .unwrap();
    let result = client.get_build(&BuildId::new("1").unwrap()).await;
    match result {
        Err(Error::HttpStatus { status, body }) => {
            assert_eq!(status, 401);
            assert_eq!(body, "Authentication required");
        }
        other => panic!("expected HttpStatus, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn missing_resource_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/guestAuth/app/rest/vcs-roots/id:Gone"))
        .respond_with(ResponseTemplate::new(404).set_body_string("No VCS root found"))
        .mount(&mock_server)
        .await;

    let result = guest(&mock_server)
        .get_vcs_root(&"Gone".parse().unwrap())
        .await;
    assert!(matches!(
        result,
        Err(Error::NotFound { path }) if path == "/guestAuth/app/rest/vcs-roots/id:Gone"
    ));
}

#[tokio::test]
async fn malformed_json_is_parse_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/guestAuth/app/rest/builds"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not valid json}"))
        .mount(&mock_server)
        .await;

    let result = guest(&mock_server).get_builds(&BuildQuery::default()).await;
    assert!(matches!(result, Err(Error::ParseFailed(_))));
}

#[tokio::test]
async fn add_tag_and_pin_send_plain_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/guestAuth/app/rest/builds/id:42/tags/"))
        .and(header("content-type", "text/plain"))
        .and(body_string("release"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/guestAuth/app/rest/builds/id:42/pin/"))
        .and(body_string("keep forever"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = guest(&mock_server);
    let id = BuildId::new("42").unwrap();
    client.add_build_tag(&id, "release").await.unwrap();
    client.pin_build(&id, "keep forever").await.unwrap();
}

#[tokio::test]
async fn set_parameters_put_value() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/guestAuth/app/rest/projects/id:Kotlin/parameters/env.JDK"))
        .and(body_string("17"))
        .respond_with(ResponseTemplate::new(200).set_body_string("17"))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/guestAuth/app/rest/buildTypes/id:Kotlin_Dev/parameters/env.JDK"))
        .and(body_string("21"))
        .respond_with(ResponseTemplate::new(200).set_body_string("21"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = guest(&mock_server);
    client
        .set_project_parameter(&ProjectId::new("Kotlin").unwrap(), "env.JDK", "17")
        .await
        .unwrap();
    client
        .set_build_type_parameter(
            &BuildConfigurationId::new("Kotlin_Dev").unwrap(),
            "env.JDK",
            "21",
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn artifact_children_of_root_and_subdirectory() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("artifacts.json");

    Mock::given(method("GET"))
        .and(path("/guestAuth/app/rest/builds/id:7/artifacts/children/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/guestAuth/app/rest/builds/id:7/artifacts/children/reports"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"file":[]}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = guest(&mock_server);
    let id = BuildId::new("7").unwrap();
    let root = client.get_artifact_children(&id, "").await.unwrap();
    assert_eq!(root.file.unwrap().len(), 3);
    let reports = client.get_artifact_children(&id, "reports").await.unwrap();
    assert!(reports.file.unwrap().is_empty());
}

#[tokio::test]
async fn download_artifact_streams_body_into_sink() {
    let mock_server = MockServer::start().await;
    let content: Vec<u8> = (0..64 * 1024).map(|i| (i % 251) as u8).collect();

    Mock::given(method("GET"))
        .and(path("/guestAuth/app/rest/builds/id:7/artifacts/content/dist/a.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content.clone()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut sink: Vec<u8> = Vec::new();
    let written = guest(&mock_server)
        .download_artifact(&BuildId::new("7").unwrap(), "dist/a.zip", &mut sink)
        .await
        .unwrap();
    assert_eq!(written, content.len() as u64);
    assert_eq!(sink, content);
}

#[tokio::test]
async fn download_missing_artifact_writes_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/guestAuth/app/rest/builds/id:7/artifacts/content/missing.zip"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let mut sink: Vec<u8> = Vec::new();
    let result = guest(&mock_server)
        .download_artifact(&BuildId::new("7").unwrap(), "missing.zip", &mut sink)
        .await;
    assert!(matches!(result, Err(Error::NotFound { .. })));
    assert!(sink.is_empty());
}

#[tokio::test]
async fn connection_refused_is_request_failed() {
    let client = Client::new("http://127.0.0.1:9", Auth::Guest).unwrap();
    let result = client.get_vcs_roots().await;
    assert!(matches!(result, Err(Error::RequestFailed)));
}

#[tokio::test]
async fn response_logging_keeps_server_and_auth() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/guestAuth/app/rest/vcs-roots"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"vcs-root":[{"id":"Kotlin_Git","name":"kotlin.git"}]}"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = guest(&mock_server);
    let logging = client.clone().with_log_responses();
    assert_eq!(logging.server_url(), client.server_url());

    let roots = logging.get_vcs_roots().await.unwrap();
    assert_eq!(roots.vcs_root.unwrap().len(), 1);
}
