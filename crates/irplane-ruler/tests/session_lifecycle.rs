mod common;

use common::{p, Fixture, StaticToken, ViewCall};
use irplane_core::RulerEvent;
use irplane_settings::{RulerMode, StopTrigger};

#[tokio::test]
async fn test_disabled_start_is_noop() {
    let mut fx = Fixture::new(RulerMode::Disabled);
    fx.ruler
        .start(StaticToken::at("goblin", p(0.0, 0.0)), p(0.0, 0.0))
        .await
        .unwrap();

    assert!(!fx.ruler.is_active());
    assert!(!fx.ruler.has_view());
    assert_eq!(fx.log().acquired, 0);
}

#[tokio::test]
async fn test_start_acquires_view_and_announces() {
    let mut fx = Fixture::new(RulerMode::Follow);
    let mut events = fx.host.events.subscribe();

    fx.ruler
        .start(StaticToken::at("goblin", p(0.0, 0.0)), p(0.0, 0.0))
        .await
        .unwrap();

    assert!(fx.ruler.is_active());
    assert!(fx.ruler.has_view());
    assert_eq!(fx.ruler.session().origin(), Some(p(0.0, 0.0)));
    assert_eq!(fx.ruler.session().previous_position(), Some(p(0.0, 0.0)));
    assert_eq!(fx.log().acquired, 1);
    assert_eq!(
        events.try_recv().unwrap(),
        RulerEvent::SessionStarted {
            token_id: "goblin".to_string(),
            origin: p(0.0, 0.0),
        }
    );
}

#[tokio::test]
async fn test_second_start_ends_first_session() {
    let mut fx = Fixture::new(RulerMode::Follow);
    let mut events = fx.host.events.subscribe();

    fx.ruler
        .start(StaticToken::at("goblin", p(0.0, 0.0)), p(0.0, 0.0))
        .await
        .unwrap();
    fx.ruler.move_to(p(50.0, 0.0)).await.unwrap();
    fx.ruler
        .start(StaticToken::at("orc", p(100.0, 100.0)), p(100.0, 100.0))
        .await
        .unwrap();

    {
        let log = fx.log();
        assert_eq!(log.acquired, 2);
        assert_eq!(log.released, 1);
    }
    assert!(fx.ruler.is_active());
    assert_eq!(fx.ruler.session().token().unwrap().id(), "orc");
    assert_eq!(fx.ruler.session().origin(), Some(p(100.0, 100.0)));
    assert!(fx.ruler.session().path().is_empty());

    let received: Vec<RulerEvent> = std::iter::from_fn(|| events.try_recv().ok()).collect();
    assert_eq!(
        received[1],
        RulerEvent::SessionEnded {
            token_id: Some("goblin".to_string())
        }
    );
    assert!(matches!(
        received[2],
        RulerEvent::SessionStarted { ref token_id, .. } if token_id == "orc"
    ));
}

#[tokio::test]
async fn test_repeated_position_is_ignored() {
    let mut fx = Fixture::new(RulerMode::Follow);
    fx.ruler
        .start(StaticToken::at("goblin", p(0.0, 0.0)), p(0.0, 0.0))
        .await
        .unwrap();

    fx.ruler.move_to(p(50.0, 0.0)).await.unwrap();
    let path = fx.ruler.session().path().to_vec();
    let calls = fx.log().calls.len();

    fx.ruler.move_to(p(50.0, 0.0)).await.unwrap();
    assert_eq!(fx.ruler.session().path(), path.as_slice());
    assert_eq!(fx.log().calls.len(), calls);
    assert_eq!(fx.log().measures(), 1);
}

#[tokio::test]
async fn test_move_to_origin_is_ignored() {
    let mut fx = Fixture::new(RulerMode::Follow);
    fx.ruler
        .start(StaticToken::at("goblin", p(0.0, 0.0)), p(0.0, 0.0))
        .await
        .unwrap();

    fx.ruler.move_to(p(0.0, 0.0)).await.unwrap();
    assert!(fx.ruler.session().path().is_empty());
    assert!(fx.log().calls.is_empty());
}

#[tokio::test]
async fn test_move_without_session_is_noop() {
    let mut fx = Fixture::new(RulerMode::Follow);
    fx.ruler.move_to(p(50.0, 0.0)).await.unwrap();

    assert!(fx.ruler.session().is_reset());
    assert!(fx.log().calls.is_empty());
}

#[tokio::test]
async fn test_end_resets_every_field() {
    let mut fx = Fixture::new(RulerMode::Follow);
    let mut events = fx.host.events.subscribe();
    fx.ruler
        .start(StaticToken::at("goblin", p(0.0, 0.0)), p(0.0, 0.0))
        .await
        .unwrap();
    fx.ruler.move_to(p(50.0, 0.0)).await.unwrap();
    fx.ruler.move_to(p(100.0, 0.0)).await.unwrap();

    fx.ruler.end();

    assert!(fx.ruler.session().is_reset());
    assert!(!fx.ruler.has_view());
    {
        let log = fx.log();
        assert_eq!(log.released, 1);
        assert_eq!(log.calls.last(), Some(&ViewCall::Clear));
    }
    let received: Vec<RulerEvent> = std::iter::from_fn(|| events.try_recv().ok()).collect();
    assert_eq!(
        received.last(),
        Some(&RulerEvent::SessionEnded {
            token_id: Some("goblin".to_string())
        })
    );
}

#[tokio::test]
async fn test_end_without_session_is_safe() {
    let mut fx = Fixture::new(RulerMode::Pathfinding);
    let mut events = fx.host.events.subscribe();

    fx.ruler.end();
    fx.ruler.token_drop();

    assert!(fx.ruler.session().is_reset());
    assert_eq!(fx.log().released, 0);
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn test_end_then_token_drop() {
    let mut fx = Fixture::new(RulerMode::Follow);
    fx.ruler
        .start(StaticToken::at("goblin", p(0.0, 0.0)), p(0.0, 0.0))
        .await
        .unwrap();
    fx.ruler.move_to(p(50.0, 0.0)).await.unwrap();

    fx.ruler.end();
    fx.ruler.token_drop();

    assert!(fx.ruler.session().is_reset());
    assert_eq!(fx.log().released, 1);
}

#[tokio::test]
async fn test_token_drop_follows_stop_trigger() {
    let mut fx = Fixture::new(RulerMode::Follow);
    fx.settings.write().stop = StopTrigger::Manual;
    fx.ruler
        .start(StaticToken::at("goblin", p(0.0, 0.0)), p(0.0, 0.0))
        .await
        .unwrap();

    fx.ruler.token_drop();
    assert!(fx.ruler.is_active());

    fx.settings.write().stop = StopTrigger::TokenDrop;
    fx.ruler.token_drop();
    assert!(!fx.ruler.is_active());
    assert_eq!(fx.log().released, 1);
}

#[tokio::test]
async fn test_settings_are_read_on_every_call() {
    let mut fx = Fixture::new(RulerMode::Follow);
    fx.ruler
        .start(StaticToken::at("goblin", p(0.0, 0.0)), p(0.0, 0.0))
        .await
        .unwrap();

    fx.settings.write().mode = RulerMode::Disabled;
    fx.ruler.move_to(p(50.0, 0.0)).await.unwrap();
    assert_eq!(fx.log().measures(), 0);

    fx.settings.write().mode = RulerMode::Follow;
    fx.ruler.move_to(p(50.0, 0.0)).await.unwrap();
    assert_eq!(fx.log().measures(), 1);
}

#[tokio::test]
async fn test_shared_ruler_serializes_moves() {
    let fx = Fixture::new(RulerMode::Follow);
    let log = fx.log.clone();
    let ruler = fx.ruler.into_shared();

    ruler
        .lock()
        .await
        .start(StaticToken::at("goblin", p(0.0, 0.0)), p(0.0, 0.0))
        .await
        .unwrap();

    let tasks: Vec<_> = [p(50.0, 0.0), p(100.0, 0.0)]
        .into_iter()
        .map(|position| {
            let ruler = ruler.clone();
            tokio::spawn(async move { ruler.lock().await.move_to(position).await })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    assert_eq!(log.lock().unwrap().measures(), 2);
    assert_eq!(ruler.lock().await.session().path().len(), 3);
}
