mod mock_support;

use mstranslate::error::TranslateError;
use pretty_assertions::assert_eq;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mock_support::{array_response, mount_auth, translator, xml_string, API_PATH, AUTH_PATH};

const ARRAYS_NAMESPACE: &str = "http://schemas.microsoft.com/2003/10/Serialization/Arrays";

#[tokio::test]
async fn translate_sends_one_escaped_get_with_bearer() {
    let server = MockServer::start().await;
    mount_auth(&server, "tok-1", 1).await;
    Mock::given(method("GET"))
        .and(path(format!("{API_PATH}/Translate")))
        .and(query_param("from", "en"))
        .and(query_param("to", "fr"))
        .and(query_param("text", "hello world & more"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(xml_string("bonjour le monde &amp; plus")))
        .expect(1)
        .mount(&server)
        .await;

    let result = translator(&server)
        .translate("hello world & more", "en", "fr")
        .await
        .expect("translate");
    assert_eq!(result, "bonjour le monde & plus");

    let requests = server.received_requests().await.expect("recording enabled");
    let gets: Vec<_> = requests
        .iter()
        .filter(|r| r.method.as_str() == "GET")
        .collect();
    assert_eq!(gets.len(), 1);
    let query = gets[0].url.query().unwrap_or_default();
    assert!(query.contains("text=hello+world+%26+more"), "{query}");
}

#[tokio::test]
async fn translate_with_empty_source_requests_detection() {
    let server = MockServer::start().await;
    mount_auth(&server, "tok-1", 1).await;
    Mock::given(method("GET"))
        .and(path(format!("{API_PATH}/Translate")))
        .and(query_param("to", "de"))
        .respond_with(ResponseTemplate::new(200).set_body_string(xml_string("Hallo")))
        .expect(1)
        .mount(&server)
        .await;

    let result = translator(&server)
        .translate("hello", "", "de")
        .await
        .expect("translate");
    assert_eq!(result, "Hallo");

    let requests = server.received_requests().await.expect("recording enabled");
    let get = requests
        .iter()
        .find(|r| r.method.as_str() == "GET")
        .expect("translate request");
    assert!(get.url.query().unwrap_or_default().starts_with("from=&to=de"));
}

#[tokio::test]
async fn translate_empty_text_fails_before_any_request() {
    let server = MockServer::start().await;

    let err = translator(&server)
        .translate("", "en", "fr")
        .await
        .unwrap_err();

    assert!(matches!(&err, TranslateError::InvalidArgument(msg) if msg.contains("\"text\"")));
    let requests = server.received_requests().await.expect("recording enabled");
    assert!(requests.is_empty());
}

#[tokio::test]
async fn translate_empty_target_fails_before_any_request() {
    let server = MockServer::start().await;

    let err = translator(&server)
        .translate("hello", "en", "")
        .await
        .unwrap_err();

    assert!(matches!(&err, TranslateError::InvalidArgument(msg) if msg.contains("\"to\"")));
    let requests = server.received_requests().await.expect("recording enabled");
    assert!(requests.is_empty());
}

#[tokio::test]
async fn translate_error_status_wins_over_parseable_body() {
    let server = MockServer::start().await;
    mount_auth(&server, "tok-1", 1).await;
    Mock::given(method("GET"))
        .and(path(format!("{API_PATH}/Translate")))
        .respond_with(ResponseTemplate::new(400).set_body_string(xml_string("bad language")))
        .expect(1)
        .mount(&server)
        .await;

    let err = translator(&server)
        .translate("hello", "en", "xx")
        .await
        .unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(400));
    assert!(err.to_string().contains("bad language"));
}

#[tokio::test]
async fn translate_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    mount_auth(&server, "tok-1", 1).await;
    Mock::given(method("GET"))
        .and(path(format!("{API_PATH}/Translate")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<string>unterminated"))
        .mount(&server)
        .await;

    let err = translator(&server)
        .translate("hello", "en", "fr")
        .await
        .unwrap_err();
    assert!(matches!(err, TranslateError::Decode(_)));
}

#[tokio::test]
async fn auth_failure_stops_translation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(AUTH_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad secret"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{API_PATH}/Translate")))
        .respond_with(ResponseTemplate::new(200).set_body_string(xml_string("nope")))
        .expect(0)
        .mount(&server)
        .await;

    let err = translator(&server)
        .translate("hello", "en", "fr")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn token_is_reused_across_calls() {
    let server = MockServer::start().await;
    mount_auth(&server, "tok-1", 1).await;
    Mock::given(method("GET"))
        .and(path(format!("{API_PATH}/Translate")))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(xml_string("ok")))
        .expect(3)
        .mount(&server)
        .await;

    let translator = translator(&server);
    for word in ["one", "two", "three"] {
        translator.translate(word, "en", "fr").await.expect("translate");
    }
}

#[tokio::test]
async fn translate_array_preserves_order() {
    let server = MockServer::start().await;
    mount_auth(&server, "tok-1", 1).await;
    Mock::given(method("POST"))
        .and(path(format!("{API_PATH}/TranslateArray")))
        .and(header("content-type", "text/xml"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(array_response(&["bonjour", "monde"])))
        .expect(1)
        .mount(&server)
        .await;

    let result = translator(&server)
        .translate_array(&["hello", "world"], "en", "fr")
        .await
        .expect("translate array");
    assert_eq!(result, vec!["bonjour".to_string(), "monde".to_string()]);

    let requests = server.received_requests().await.expect("recording enabled");
    let post = requests
        .iter()
        .find(|r| r.url.path().ends_with("/TranslateArray"))
        .expect("batch request");
    let body = String::from_utf8(post.body.clone()).expect("utf-8 body");
    let hello = body
        .find(&format!("<string xmlns=\"{ARRAYS_NAMESPACE}\">hello</string>"))
        .expect("hello element");
    let world = body
        .find(&format!("<string xmlns=\"{ARRAYS_NAMESPACE}\">world</string>"))
        .expect("world element");
    assert!(hello < world);
    assert!(body.contains("<From>en</From>"));
    assert!(body.contains("<To>fr</To>"));
}

#[tokio::test]
async fn translate_array_accepts_owned_strings() {
    let server = MockServer::start().await;
    mount_auth(&server, "tok-1", 1).await;
    Mock::given(method("POST"))
        .and(path(format!("{API_PATH}/TranslateArray")))
        .respond_with(ResponseTemplate::new(200).set_body_string(array_response(&["uno", "dos", "tres"])))
        .expect(1)
        .mount(&server)
        .await;

    let texts = vec!["one".to_string(), "two".to_string(), "three".to_string()];
    let result = translator(&server)
        .translate_array(&texts, "", "es")
        .await
        .expect("translate array");
    assert_eq!(result, vec!["uno", "dos", "tres"]);
}

#[tokio::test]
async fn translate_array_detailed_reports_item_errors() {
    let server = MockServer::start().await;
    mount_auth(&server, "tok-1", 1).await;
    let body = r#"<ArrayOfTranslateArrayResponse><TranslateArrayResponse><From>en</From><TranslatedText>bonjour</TranslatedText></TranslateArrayResponse><TranslateArrayResponse><Error>Text too long</Error></TranslateArrayResponse></ArrayOfTranslateArrayResponse>"#;
    Mock::given(method("POST"))
        .and(path(format!("{API_PATH}/TranslateArray")))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(&server)
        .await;

    let items = translator(&server)
        .translate_array_detailed(&["hello", "a very long text"], "en", "fr")
        .await
        .expect("translate array");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].translated_text, "bonjour");
    assert_eq!(items[0].from.as_deref(), Some("en"));
    assert_eq!(items[0].error, None);
    assert_eq!(items[1].error.as_deref(), Some("Text too long"));
}

#[tokio::test]
async fn translate_array_count_mismatch_returns_no_results() {
    let server = MockServer::start().await;
    mount_auth(&server, "tok-1", 1).await;
    Mock::given(method("POST"))
        .and(path(format!("{API_PATH}/TranslateArray")))
        .respond_with(ResponseTemplate::new(200).set_body_string(array_response(&["bonjour"])))
        .expect(1)
        .mount(&server)
        .await;

    let err = translator(&server)
        .translate_array(&["hello", "world"], "en", "fr")
        .await
        .unwrap_err();
    assert!(matches!(&err, TranslateError::Decode(msg) if msg.contains("expected 2")));
}

#[tokio::test]
async fn translate_array_error_status_returns_no_results() {
    let server = MockServer::start().await;
    mount_auth(&server, "tok-1", 1).await;
    Mock::given(method("POST"))
        .and(path(format!("{API_PATH}/TranslateArray")))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .expect(1)
        .mount(&server)
        .await;

    let err = translator(&server)
        .translate_array(&["hello"], "en", "fr")
        .await
        .unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(500));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn translate_array_validates_before_any_request() {
    let server = MockServer::start().await;
    let translator = translator(&server);

    let empty: [&str; 0] = [];
    let err = translator
        .translate_array(&empty, "en", "fr")
        .await
        .unwrap_err();
    assert!(matches!(&err, TranslateError::InvalidArgument(msg) if msg.contains("\"texts\"")));

    let err = translator
        .translate_array(&["hello"], "en", "")
        .await
        .unwrap_err();
    assert!(matches!(&err, TranslateError::InvalidArgument(msg) if msg.contains("\"to\"")));

    let requests = server.received_requests().await.expect("recording enabled");
    assert!(requests.is_empty());
}

#[tokio::test]
async fn translate_array_passes_empty_items_and_keeps_whitespace() {
    let server = MockServer::start().await;
    mount_auth(&server, "tok-1", 1).await;
    let body = "<ArrayOfTranslateArrayResponse>\n  <TranslateArrayResponse>\n    <TranslatedText/>\n  </TranslateArrayResponse>\n  <TranslateArrayResponse>\n    <From>en</From>\n    <TranslatedText> a b \n</TranslatedText>\n  </TranslateArrayResponse>\n</ArrayOfTranslateArrayResponse>";
    Mock::given(method("POST"))
        .and(path(format!("{API_PATH}/TranslateArray")))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(&server)
        .await;

    let result = translator(&server)
        .translate_array(&["", "x"], "en", "fr")
        .await
        .expect("translate array");
    assert_eq!(result, vec![String::new(), " a b \n".to_string()]);

    let requests = server.received_requests().await.expect("recording enabled");
    let post = requests
        .iter()
        .find(|r| r.url.path().ends_with("/TranslateArray"))
        .expect("batch request");
    let sent = String::from_utf8(post.body.clone()).expect("utf-8 body");
    let empty = sent
        .find(&format!("<string xmlns=\"{ARRAYS_NAMESPACE}\"/>"))
        .expect("empty element");
    let x = sent
        .find(&format!("<string xmlns=\"{ARRAYS_NAMESPACE}\">x</string>"))
        .expect("x element");
    assert!(empty < x);
}

#[tokio::test]
async fn translate_keeps_whitespace_of_result() {
    let server = MockServer::start().await;
    mount_auth(&server, "tok-1", 1).await;
    Mock::given(method("GET"))
        .and(path(format!("{API_PATH}/Translate")))
        .respond_with(ResponseTemplate::new(200).set_body_string(xml_string("  bonjour  ")))
        .expect(1)
        .mount(&server)
        .await;

    let result = translator(&server)
        .translate(" hello ", "en", "fr")
        .await
        .expect("translate");
    assert_eq!(result, "  bonjour  ");
}
