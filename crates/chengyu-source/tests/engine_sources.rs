//! Quiz engine driven by the real source backends.

use std::sync::Arc;

use chengyu_core::engine::{AdvanceOutcome, QuizEngine, QuizEngineConfig, FALLBACK_NOTICE};
use chengyu_core::error::SourceError;
use chengyu_core::model::{DisplayMode, IdiomRecord, DEFAULT_IDIOM};
use chengyu_source::dataset::{DatasetIdiomSource, BUILTIN_IDIOMS};
use chengyu_source::http::HttpIdiomSource;
use chengyu_source::mock::MockIdiomSource;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn quiz_config() -> QuizEngineConfig {
    QuizEngineConfig {
        display_mode: DisplayMode::Quiz,
        ..Default::default()
    }
}

#[tokio::test]
async fn http_source_feeds_engine() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/idiom"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {
                "word": "塞翁失马",
                "pinyin": "sài wēng shī mǎ",
                "explanation": "比喻一时虽然受到损失，也许反而因此能得到好处。",
                "example": "真是塞翁失马，焉知非福。",
                "derivation": "《淮南子·人间训》",
                "abbreviation": "swsm"
            },
            "total": 1
        })))
        .mount(&server)
        .await;

    let source = HttpIdiomSource::new(&server.uri(), 2).unwrap();
    let mut engine = QuizEngine::new(Arc::new(source), quiz_config());

    assert_eq!(engine.advance().await, AdvanceOutcome::Loaded);
    let idiom = engine.current().unwrap();
    assert_eq!(idiom.word(), "塞翁失马");
    assert_eq!(idiom.derivation(), Some("《淮南子·人间训》"));

    let outcome = engine.submit_answer("塞翁失马 ").unwrap();
    assert!(outcome.correct);
}

#[tokio::test]
async fn http_server_error_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/idiom"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(serde_json::json!({"error": "服务器内部错误"})),
        )
        .mount(&server)
        .await;

    let source = HttpIdiomSource::new(&server.uri(), 2).unwrap();
    let mut engine = QuizEngine::new(Arc::new(source), quiz_config());

    assert_eq!(engine.advance().await, AdvanceOutcome::Fallback);
    assert_eq!(engine.current_word(), DEFAULT_IDIOM.word);
    assert_eq!(engine.notice(), Some(FALLBACK_NOTICE));
}

#[tokio::test]
async fn empty_dataset_falls_back() {
    let source = DatasetIdiomSource::new("empty", vec![]);
    let mut engine = QuizEngine::new(Arc::new(source), QuizEngineConfig::default());
    assert_eq!(engine.reset().await, AdvanceOutcome::Fallback);
    assert_eq!(engine.current_word(), DEFAULT_IDIOM.word);
}

#[tokio::test]
async fn builtin_dataset_always_loads_known_idiom() {
    let mut engine = QuizEngine::new(
        Arc::new(DatasetIdiomSource::builtin()),
        QuizEngineConfig::default(),
    );
    for _ in 0..20 {
        assert_eq!(engine.advance().await, AdvanceOutcome::Loaded);
        let word = engine.current_word();
        assert!(BUILTIN_IDIOMS.iter().any(|seed| seed.word == word));
    }
}

#[tokio::test]
async fn engine_requests_one_idiom_per_advance() {
    let source = Arc::new(
        MockIdiomSource::failing()
            .then(Ok(vec![IdiomRecord {
                word: "亡羊补牢".into(),
                pinyin: "wáng yáng bǔ láo".into(),
                explanation: String::new(),
                example: String::new(),
                derivation: None,
                abbreviation: None,
            }]))
            .then(Err(SourceError::Timeout(10))),
    );
    let mut engine = QuizEngine::new(source.clone(), quiz_config());

    assert_eq!(engine.advance().await, AdvanceOutcome::Loaded);
    assert_eq!(engine.current().unwrap().meaning(), "暂无释义");
    assert_eq!(source.last_count(), Some(1));

    engine.submit_answer("错");
    assert_eq!(engine.next_question().await, AdvanceOutcome::Fallback);
    assert_eq!(engine.current_word(), DEFAULT_IDIOM.word);
    assert_eq!(engine.state().total_count(), 1);
    assert_eq!(source.call_count(), 2);
}
