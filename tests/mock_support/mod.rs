#![allow(dead_code)]

use mstranslate::auth::Token;
use mstranslate::config::Credentials;
use mstranslate::Translator;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const AUTH_PATH: &str = "/v2/OAuth2-13";
pub const API_PATH: &str = "/v2/Http.svc";
pub const STRING_NAMESPACE: &str = "http://schemas.microsoft.com/2003/10/Serialization/";

pub fn oauth_credentials(server: &MockServer) -> Credentials {
    Credentials::client_credentials("my-app", "s3cret")
        .with_auth_url(format!("{}{AUTH_PATH}", server.uri()))
}

pub fn token_body(access_token: &str, expires_in: &str) -> serde_json::Value {
    json!({
        "token_type": "http://schemas.xmlsoap.org/ws/2009/11/swt-token-profile-1.0",
        "access_token": access_token,
        "expires_in": expires_in,
        "scope": "http://api.microsofttranslator.com"
    })
}

/// Mount a token endpoint that must be hit exactly `times` times.
pub async fn mount_auth(server: &MockServer, access_token: &str, times: u64) {
    Mock::given(method("POST"))
        .and(path(AUTH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body(access_token, "600")))
        .expect(times)
        .mount(server)
        .await;
}

pub fn translator(server: &MockServer) -> Translator {
    let token = Token::new(reqwest::Client::new(), oauth_credentials(server));
    Translator::new(token).with_base_url(format!("{}{API_PATH}", server.uri()))
}

pub fn xml_string(text: &str) -> String {
    format!(r#"<string xmlns="{STRING_NAMESPACE}">{text}</string>"#)
}

pub fn array_response(translations: &[&str]) -> String {
    let items: String = translations
        .iter()
        .map(|text| {
            format!(
                "<TranslateArrayResponse><From>en</From><OriginalTextSentenceLengths xmlns:a=\"http://schemas.microsoft.com/2003/10/Serialization/Arrays\"><a:int>5</a:int></OriginalTextSentenceLengths><TranslatedText>{text}</TranslatedText></TranslateArrayResponse>"
            )
        })
        .collect();
    format!(
        r#"<ArrayOfTranslateArrayResponse xmlns="http://schemas.datacontract.org/2004/07/Microsoft.MT.Web.Service.V2" xmlns:i="http://www.w3.org/2001/XMLSchema-instance">{items}</ArrayOfTranslateArrayResponse>"#
    )
}
