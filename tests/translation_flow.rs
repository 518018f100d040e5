use dpr_translate::config::ProviderConfig;
use dpr_translate::{
    find_by_code, BindingState, Config, FileStore, LanguageSelector, MemoryStore, SelectorVariant, TranslateError,
    TranslatedText, TranslationContext, Translator,
};
use serde_json::json;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer, api_key: &str) -> Config {
    Config {
        provider: ProviderConfig {
            api_base: format!("{}/translate", server.uri()),
            api_key: api_key.to_string(),
            timeout_ms: 1_000,
            ..ProviderConfig::default()
        },
        cache_capacity: None,
    }
}

async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.map(|r| r.len()).unwrap_or(0)
}

#[tokio::test]
async fn no_credential_keeps_text_and_cache_empty() {
    let server = MockServer::start().await;
    let translator = Translator::from_config(&config_for(&server, "")).unwrap();

    let out = translator
        .translate("Upload a DPR", &find_by_code("hi").unwrap(), &find_by_code("en").unwrap())
        .await;

    assert_eq!(out, "Upload a DPR");
    assert!(translator.cache().is_empty());
    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn identical_requests_hit_the_provider_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/translate"))
        .and(body_partial_json(json!({
            "input": "Upload a DPR",
            "source_language_code": "en-IN",
            "target_language_code": "hi-IN"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "translated_text": "एक DPR अपलोड करें" })))
        .expect(1)
        .mount(&server)
        .await;

    let translator = Translator::from_config(&config_for(&server, "key")).unwrap();
    let (hi, en) = (find_by_code("hi").unwrap(), find_by_code("en").unwrap());

    assert_eq!(translator.translate("Upload a DPR", &hi, &en).await, "एक DPR अपलोड करें");
    assert_eq!(translator.translate("Upload a DPR", &hi, &en).await, "एक DPR अपलोड करें");
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn third_call_failure_falls_back_to_original() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "translated_text": "एक्स" })))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let translator = Translator::from_config(&config_for(&server, "key")).unwrap();
    let (hi, en) = (find_by_code("hi").unwrap(), find_by_code("en").unwrap());

    assert_eq!(translator.translate("X", &hi, &en).await, "एक्स");
    translator.clear_cache();
    assert_eq!(translator.translate("X", &hi, &en).await, "एक्स");
    translator.clear_cache();
    assert_eq!(translator.translate("X", &hi, &en).await, "X");
    assert!(translator.cache().is_empty());
    assert_eq!(request_count(&server).await, 3);
}

#[tokio::test]
async fn malformed_body_falls_back_to_original() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let translator = Translator::from_config(&config_for(&server, "key")).unwrap();
    let out = translator
        .translate("Threats", &find_by_code("ta").unwrap(), &find_by_code("en").unwrap())
        .await;
    assert_eq!(out, "Threats");
}

#[tokio::test]
async fn unreachable_provider_falls_back_to_original() {
    let closed = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = closed.local_addr().unwrap();
    drop(closed);

    let config = Config {
        provider: ProviderConfig {
            api_base: format!("http://{}/translate", addr),
            api_key: "key".to_string(),
            timeout_ms: 1_000,
            ..ProviderConfig::default()
        },
        cache_capacity: None,
    };
    let failures = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&failures);
    let translator = Translator::from_config(&config)
        .unwrap()
        .with_failure_hook(Arc::new(move |err: &TranslateError| {
            seen.lock().unwrap().push(matches!(err, TranslateError::Transport(_)));
        }));

    let out = translator
        .translate("Budget", &find_by_code("te").unwrap(), &find_by_code("en").unwrap())
        .await;

    assert_eq!(out, "Budget");
    assert!(translator.cache().is_empty());
    assert_eq!(*failures.lock().unwrap(), vec![true]);
}

#[tokio::test]
async fn selector_drives_bindings_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "target_language_code": "bn-IN" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "translated_text": "হ্যালো" })))
        .mount(&server)
        .await;

    let translator = Arc::new(Translator::from_config(&config_for(&server, "key")).unwrap());
    let ctx = Arc::new(TranslationContext::new(translator, Arc::new(MemoryStore::new())));
    let mut picker = LanguageSelector::new(Arc::clone(&ctx), SelectorVariant::Compact);
    let binding = TranslatedText::new(Arc::clone(&ctx), "Hello");

    assert!(binding.refresh().await);
    assert_eq!(binding.display_text(), "Hello");

    picker.select_code("bn").unwrap();
    assert!(binding.refresh().await);
    assert_eq!(binding.state(), BindingState::Resolved);
    assert_eq!(binding.display_text(), "হ্যালো");
    assert_eq!(ctx.translate_label("save"), "সংরক্ষণ");
    assert!(!ctx.is_translating());
}

#[tokio::test]
async fn saved_language_is_restored_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let prefs = dir.path().join("preferences.json");
    let translator = || Arc::new(Translator::from_config(&Config::default()).unwrap());

    let ctx = TranslationContext::new(translator(), Arc::new(FileStore::open(&prefs)));
    ctx.set_language(find_by_code("kn").unwrap());

    let restarted = TranslationContext::new(translator(), Arc::new(FileStore::open(&prefs)));
    assert_eq!(restarted.current_language().code, "kn");
}
