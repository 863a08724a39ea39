//! Tests for the Tokio game driver.
//!
//! Time is paused, so scheduled computer turns fire as soon as the runtime
//! is otherwise idle.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedReceiver;
use ttt_session::{
    DriverError, EngineConfig, GameDriver, GameEvent, Mark, MemoryStore, MoveError, Outcome,
    Position, Status,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn config(toml: &str) -> EngineConfig {
    EngineConfig::from_toml_str(toml).expect("Valid config")
}

/// Skips state updates until the next non-state event.
async fn next_action(events: &mut UnboundedReceiver<GameEvent>) -> GameEvent {
    loop {
        match events.recv().await.expect("Driver closed event stream") {
            GameEvent::StateChanged(_) => continue,
            other => return other,
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_initial_state_published() {
    init_tracing();
    let (_handle, mut events, _task) = GameDriver::spawn(&config(""), Box::new(MemoryStore::new()));

    match events.recv().await {
        Some(GameEvent::StateChanged(snapshot)) => {
            assert_eq!(snapshot.status, Status::YourTurn);
            assert_eq!(snapshot.board.occupied_count(), 0);
        }
        other => panic!("Expected initial state, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_computer_replies_after_delay() {
    init_tracing();
    let (handle, mut events, _task) = GameDriver::spawn(&config(""), Box::new(MemoryStore::new()));

    handle.request_move(Position::TopLeft, Mark::X).expect("Driver running");
    assert_eq!(
        next_action(&mut events).await,
        GameEvent::MovePlayed {
            mark: Mark::X,
            position: Position::TopLeft
        }
    );
    assert_eq!(
        next_action(&mut events).await,
        GameEvent::MovePlayed {
            mark: Mark::O,
            position: Position::Center
        }
    );

    let snapshot = handle.snapshot().await.expect("Driver running");
    assert_eq!(snapshot.status, Status::YourTurn);
    assert!(!snapshot.computer_pending);
}

#[tokio::test(start_paused = true)]
async fn test_computer_opens_when_human_plays_o() {
    init_tracing();
    let (handle, mut events, _task) =
        GameDriver::spawn(&config(r#"human_mark = "O""#), Box::new(MemoryStore::new()));

    let snapshot = handle.snapshot().await.expect("Driver running");
    assert_eq!(snapshot.status, Status::ComputerThinking);

    assert_eq!(
        next_action(&mut events).await,
        GameEvent::MovePlayed {
            mark: Mark::X,
            position: Position::Center
        }
    );
}

#[tokio::test(start_paused = true)]
async fn test_new_game_cancels_pending_reply() {
    init_tracing();
    let (handle, _events, _task) = GameDriver::spawn(&config(""), Box::new(MemoryStore::new()));

    handle.request_move(Position::TopLeft, Mark::X).expect("Driver running");
    handle.new_game(false).expect("Driver running");
    tokio::time::sleep(Duration::from_secs(1)).await;

    let snapshot = handle.snapshot().await.expect("Driver running");
    assert_eq!(snapshot.board.occupied_count(), 0);
    assert_eq!(snapshot.status, Status::YourTurn);
    assert!(!snapshot.computer_pending);
}

#[tokio::test(start_paused = true)]
async fn test_rejected_move_reported() {
    init_tracing();
    let (handle, mut events, _task) =
        GameDriver::spawn(&config(r#"mode = "pvp""#), Box::new(MemoryStore::new()));

    handle.request_move(Position::Center, Mark::O).expect("Driver running");
    assert_eq!(
        next_action(&mut events).await,
        GameEvent::MoveRejected(MoveError::WrongPlayer(Mark::O))
    );
}

#[tokio::test(start_paused = true)]
async fn test_two_player_game_over_event() {
    init_tracing();
    let (handle, mut events, _task) =
        GameDriver::spawn(&config(r#"mode = "pvp""#), Box::new(MemoryStore::new()));

    let moves = [
        (Position::TopLeft, Mark::X),
        (Position::Center, Mark::O),
        (Position::TopCenter, Mark::X),
        (Position::BottomLeft, Mark::O),
        (Position::TopRight, Mark::X),
    ];
    for (position, mark) in moves {
        handle.request_move(position, mark).expect("Driver running");
        assert_eq!(
            next_action(&mut events).await,
            GameEvent::MovePlayed { mark, position }
        );
    }

    let line = [Position::TopLeft, Position::TopCenter, Position::TopRight];
    assert_eq!(
        next_action(&mut events).await,
        GameEvent::GameOver(Outcome::Win(Mark::X, line))
    );
    let snapshot = handle.snapshot().await.expect("Driver running");
    assert_eq!(snapshot.scores.wins(Mark::X), 1);
}

#[tokio::test(start_paused = true)]
async fn test_handle_errors_after_shutdown() {
    init_tracing();
    let (handle, _events, task) = GameDriver::spawn(&config(""), Box::new(MemoryStore::new()));

    handle.shutdown().expect("Driver running");
    task.await.expect("Driver task panicked");

    assert_eq!(
        handle.request_move(Position::Center, Mark::X),
        Err(DriverError::Stopped)
    );
    assert_eq!(handle.snapshot().await, Err(DriverError::Stopped));
}
