use std::sync::Arc;
use std::time::Duration;

use star_journal::client::HttpSuggestionSource;
use star_journal::config::ClientConfig;
use star_journal::scheduler::{FieldState, SchedulerConfig, SuggestionScheduler};
use star_journal::server::{router, AppState};
use star_journal_core::field::Field;
use star_journal_core::lexicon::Lexicon;
use star_journal_core::service::SuggestionService;

/// Serve the API on an ephemeral port and return its `/api` base URL.
async fn spawn_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(AppState::new(SuggestionService::new(Arc::new(
        Lexicon::builtin(),
    ))));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api", addr)
}

fn scheduler_for(base_url: String) -> SuggestionScheduler<HttpSuggestionSource> {
    let client = ClientConfig {
        base_url,
        debounce_ms: 30,
        ..Default::default()
    };
    SuggestionScheduler::new(
        HttpSuggestionSource::new(&client).unwrap(),
        SchedulerConfig::from(&client),
    )
}

async fn wait_idle(scheduler: &SuggestionScheduler<HttpSuggestionSource>, field: Field) {
    for _ in 0..100 {
        tokio::time::sleep(Duration::from_millis(20)).await;
        if scheduler.state(field) == FieldState::Idle {
            return;
        }
    }
    panic!("field {} did not settle", field);
}

#[tokio::test]
async fn test_typing_fetches_from_server() {
    let scheduler = scheduler_for(spawn_server().await);

    scheduler.on_input(Field::Action, "mov");
    scheduler.on_input(Field::Action, "moved sessions to redis");
    wait_idle(&scheduler, Field::Action).await;

    let bundle = scheduler.suggestions(Field::Action);
    assert_eq!(bundle.tags, vec!["redis", "caching"]);
    assert!(bundle.actions.contains(&"added tracing".to_string()));
    assert!(scheduler.suggestions(Field::Result).is_empty());
}

#[tokio::test]
async fn test_unreachable_server_leaves_suggestions_unchanged() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let scheduler = scheduler_for(format!("http://127.0.0.1:{}/api", port));
    scheduler.on_input(Field::Situation, "kubernetes pods restarting");
    wait_idle(&scheduler, Field::Situation).await;

    assert!(scheduler.suggestions(Field::Situation).is_empty());
}
