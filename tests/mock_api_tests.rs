//! Mock API tests for the translation providers
//!
//! Each test stands up local mock servers in place of the public endpoints,
//! so nothing here needs network access.

use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};
use vedtranslate::translate::{http_client, GoogleTranslator, MyMemoryTranslator};
use vedtranslate::{
    AutoTranslateState, AutoTranslator, Config, ErrorKind, ProviderChain, TranslateError,
    Translator,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(primary: &MockServer, secondary: &MockServer) -> Config {
    Config {
        primary_url: primary.uri(),
        secondary_url: secondary.uri(),
        request_timeout_secs: 1,
        ..Config::default()
    }
}

fn google_body(text: &str) -> serde_json::Value {
    json!([[[text, "source", null, null, 10]], null, "en"])
}

fn mymemory_body(text: &str) -> serde_json::Value {
    json!({
        "responseData": { "translatedText": text, "match": 1 },
        "responseStatus": 200,
        "responseDetails": ""
    })
}

// ============================================================================
// Google Provider Tests
// ============================================================================

mod google_tests {
    use super::*;

    #[tokio::test]
    async fn test_google_sends_gtx_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/translate_a/single"))
            .and(query_param("client", "gtx"))
            .and(query_param("sl", "en"))
            .and(query_param("tl", "fr"))
            .and(query_param("dt", "t"))
            .and(query_param("q", "Hello"))
            .respond_with(ResponseTemplate::new(200).set_body_json(google_body("Bonjour")))
            .expect(1)
            .mount(&server)
            .await;

        let google = GoogleTranslator::new(http_client(Duration::from_secs(2)).unwrap())
            .with_base_url(server.uri());
        let translated = assert_ok!(google.translate("Hello", "en", "fr").await);
        assert_eq!(translated, "Bonjour");
    }

    #[tokio::test]
    async fn test_google_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let google = GoogleTranslator::new(http_client(Duration::from_secs(2)).unwrap())
            .with_base_url(server.uri());
        let err = assert_err!(google.translate("Hello", "en", "fr").await);
        assert!(matches!(err, TranslateError::Api(_)));
    }

    #[tokio::test]
    async fn test_google_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>captcha</html>"))
            .mount(&server)
            .await;

        let google = GoogleTranslator::new(http_client(Duration::from_secs(2)).unwrap())
            .with_base_url(server.uri());
        assert_err!(google.translate("Hello", "en", "fr").await);
    }
}

// ============================================================================
// MyMemory Provider Tests
// ============================================================================

mod mymemory_tests {
    use super::*;

    #[tokio::test]
    async fn test_mymemory_sends_langpair() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/get"))
            .and(query_param("q", "Hello"))
            .and(query_param("langpair", "en|fr"))
            .respond_with(ResponseTemplate::new(200).set_body_json(mymemory_body("Bonjour")))
            .expect(1)
            .mount(&server)
            .await;

        let mymemory = MyMemoryTranslator::new(http_client(Duration::from_secs(2)).unwrap())
            .with_base_url(server.uri());
        assert_eq!(
            assert_ok!(mymemory.translate("Hello", "en", "fr").await),
            "Bonjour"
        );
    }

    #[tokio::test]
    async fn test_mymemory_http_error_mentions_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let mymemory = MyMemoryTranslator::new(http_client(Duration::from_secs(2)).unwrap())
            .with_base_url(server.uri());
        match mymemory.translate("Hello", "en", "fr").await {
            Err(TranslateError::ServiceUnavailable(msg)) => assert!(msg.contains("503")),
            other => panic!("unexpected {:?}", other),
        }
    }
}

// ============================================================================
// Provider Chain Tests
// ============================================================================

mod chain_tests {
    use super::*;

    #[tokio::test]
    async fn test_primary_failure_falls_back_to_secondary() {
        let primary = MockServer::start().await;
        let secondary = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&primary)
            .await;
        Mock::given(method("GET"))
            .and(path("/get"))
            .respond_with(ResponseTemplate::new(200).set_body_json(mymemory_body("Bonjour")))
            .expect(1)
            .mount(&secondary)
            .await;

        let chain = ProviderChain::from_config(&config_for(&primary, &secondary)).unwrap();
        assert_eq!(chain.translate("Hello", "en", "fr").await.unwrap(), "Bonjour");
    }

    #[tokio::test]
    async fn test_primary_timeout_falls_back_to_secondary() {
        let primary = MockServer::start().await;
        let secondary = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(google_body("Salut"))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&primary)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(mymemory_body("Bonjour")))
            .mount(&secondary)
            .await;

        let chain = ProviderChain::from_config(&config_for(&primary, &secondary)).unwrap();
        assert_eq!(chain.translate("Hello", "en", "fr").await.unwrap(), "Bonjour");
    }

    #[tokio::test]
    async fn test_primary_success_never_calls_secondary() {
        let primary = MockServer::start().await;
        let secondary = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(google_body("Bonjour")))
            .mount(&primary)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(mymemory_body("Salut")))
            .expect(0)
            .mount(&secondary)
            .await;

        let chain = ProviderChain::from_config(&config_for(&primary, &secondary)).unwrap();
        assert_eq!(chain.translate("Hello", "en", "fr").await.unwrap(), "Bonjour");
    }

    #[tokio::test]
    async fn test_unchanged_output_everywhere_is_unsupported() {
        let primary = MockServer::start().await;
        let secondary = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(google_body("HELLO")))
            .mount(&primary)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(mymemory_body("hello")))
            .mount(&secondary)
            .await;

        let chain = ProviderChain::from_config(&config_for(&primary, &secondary)).unwrap();
        let err = chain.translate("Hello", "en", "xx").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unsupported);
    }

    #[tokio::test]
    async fn test_secondary_forbidden_is_quota_exceeded() {
        let primary = MockServer::start().await;
        let secondary = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&primary)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "responseData": { "translatedText": "" },
                "responseStatus": 403,
                "responseDetails": "INVALID LANGUAGE PAIR"
            })))
            .mount(&secondary)
            .await;

        let chain = ProviderChain::from_config(&config_for(&primary, &secondary)).unwrap();
        let err = chain.translate("Hello", "en", "fr").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::QuotaExceeded);
    }

    #[tokio::test]
    async fn test_both_down_is_service_unavailable() {
        let primary = MockServer::start().await;
        let secondary = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&primary)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&secondary)
            .await;

        let chain = ProviderChain::from_config(&config_for(&primary, &secondary)).unwrap();
        match chain.translate("Hello", "en", "fr").await {
            Err(TranslateError::ServiceUnavailable(msg)) => {
                assert_eq!(msg, "Translation service temporarily unavailable (502)")
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_same_language_sends_nothing() {
        let primary = MockServer::start().await;
        let secondary = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(google_body("x")))
            .expect(0)
            .mount(&primary)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(mymemory_body("x")))
            .expect(0)
            .mount(&secondary)
            .await;

        let chain = ProviderChain::from_config(&config_for(&primary, &secondary)).unwrap();
        let err = chain.translate("Hello", "fr", "fr").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    }

    #[tokio::test]
    async fn test_chinese_code_is_mapped() {
        let primary = MockServer::start().await;
        let secondary = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("tl", "zh-CN"))
            .respond_with(ResponseTemplate::new(200).set_body_json(google_body("你好")))
            .expect(1)
            .mount(&primary)
            .await;

        let chain = ProviderChain::from_config(&config_for(&primary, &secondary)).unwrap();
        assert_eq!(chain.translate("Hello", "en", "zh").await.unwrap(), "你好");
        assert_eq!(chain.provider_names(), vec!["google", "mymemory"]);
    }
}

// ============================================================================
// Auto-Translate Tests
// ============================================================================

mod autotranslate_tests {
    use super::*;

    async fn settled(
        rx: &mut tokio::sync::watch::Receiver<AutoTranslateState>,
    ) -> AutoTranslateState {
        loop {
            rx.changed().await.unwrap();
            let state = rx.borrow_and_update().clone();
            if state.is_settled() {
                return state;
            }
        }
    }

    #[tokio::test]
    async fn test_rapid_input_makes_one_request() {
        let primary = MockServer::start().await;
        let secondary = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("q", "Hello there"))
            .respond_with(ResponseTemplate::new(200).set_body_json(google_body("Bonjour")))
            .expect(1)
            .mount(&primary)
            .await;

        let chain = ProviderChain::from_config(&config_for(&primary, &secondary)).unwrap();
        let mut auto = AutoTranslator::new(Arc::new(chain), Duration::from_millis(100));
        let mut rx = auto.subscribe();

        for partial in ["H", "Hel", "Hello", "Hello th", "Hello there"] {
            auto.on_input(partial, "en", "fr");
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        match tokio::time::timeout(Duration::from_secs(5), settled(&mut rx))
            .await
            .unwrap()
        {
            AutoTranslateState::Translated {
                text, translation, ..
            } => {
                assert_eq!(text, "Hello there");
                assert_eq!(translation, "Bonjour");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(primary.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_superseded_slow_response_is_never_published() {
        let primary = MockServer::start().await;
        let secondary = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("q", "first"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(google_body("premier"))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&primary)
            .await;
        Mock::given(method("GET"))
            .and(query_param("q", "second"))
            .respond_with(ResponseTemplate::new(200).set_body_json(google_body("deuxième")))
            .mount(&primary)
            .await;

        let chain = ProviderChain::from_config(&config_for(&primary, &secondary)).unwrap();
        let mut auto = AutoTranslator::new(Arc::new(chain), Duration::from_millis(20));
        let mut rx = auto.subscribe();

        auto.on_input("first", "en", "fr");
        // Let the first request go out before superseding it.
        tokio::time::sleep(Duration::from_millis(100)).await;
        auto.on_input("second", "en", "fr");

        let state = tokio::time::timeout(Duration::from_secs(5), settled(&mut rx))
            .await
            .unwrap();
        assert!(matches!(
            &state,
            AutoTranslateState::Translated { translation, .. } if translation == "deuxième"
        ));

        tokio::time::sleep(Duration::from_millis(700)).await;
        assert_eq!(auto.state(), state);
    }
}
