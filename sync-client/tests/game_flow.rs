//! End-to-end game flows against the mock channel.

use std::sync::{Arc, Mutex};
use tictactoe_sync_client::{ClientError, GameEvent, GameSynchronizer, MockChannel, SyncConfig};
use tictactoe_sync_core::Outcome;
use tictactoe_sync_types::{
    AreaId, Command, CommandResponse, GameArea, GameInstance, GamePiece, GameStatus,
    GridPosition, InstanceId, PlayerId, TicTacToeMove, TicTacToeState,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn pos(v: u8) -> GridPosition {
    GridPosition::try_from(v).unwrap()
}

fn mv(row: u8, col: u8, piece: GamePiece) -> TicTacToeMove {
    TicTacToeMove::new(pos(row), pos(col), piece)
}

fn snapshot(
    id: InstanceId,
    moves: Vec<TicTacToeMove>,
    status: GameStatus,
    winner: Option<&str>,
) -> GameArea {
    GameArea {
        id: AreaId::new("ttt-area"),
        game: Some(GameInstance {
            id,
            state: TicTacToeState {
                moves,
                x: Some(PlayerId::new("P1")),
                o: Some(PlayerId::new("P2")),
                winner: winner.map(PlayerId::new),
                status,
            },
        }),
    }
}

struct Harness {
    sync: GameSynchronizer<MockChannel>,
    channel: MockChannel,
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl Harness {
    fn new(local: &str) -> Self {
        init_tracing();
        let channel = MockChannel::new();
        let sync = GameSynchronizer::new(SyncConfig::new(local, "ttt-area"), channel.clone());
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        sync.subscribe(move |event| sink.lock().unwrap().push(event.clone()));
        Self {
            sync,
            channel,
            events,
        }
    }

    /// Board and turn notifications since the last call.
    fn signals(&self) -> Vec<GameEvent> {
        std::mem::take(&mut *self.events.lock().unwrap())
            .into_iter()
            .filter(|e| matches!(e, GameEvent::BoardChanged(_) | GameEvent::TurnChanged(_)))
            .collect()
    }

    fn all_events(&self) -> Vec<GameEvent> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }
}

#[tokio::test]
async fn waiting_game_has_empty_board_and_no_pieces() {
    let h = Harness::new("P1");
    let waiting = GameArea {
        id: AreaId::new("ttt-area"),
        game: Some(GameInstance {
            id: InstanceId::new(),
            state: TicTacToeState::default(),
        }),
    };

    h.sync.ingest(waiting).await;

    let view = h.sync.view().await;
    assert!(view.board.is_empty());
    assert!(!view.is_local_turn);
    assert!(matches!(
        h.sync.game_piece().await,
        Err(ClientError::PlayerNotInGame)
    ));
    assert!(h.signals().is_empty());
}

#[tokio::test]
async fn mid_game_view_for_first_player() {
    let h = Harness::new("P1");
    let moves = vec![mv(0, 0, GamePiece::X), mv(1, 1, GamePiece::O)];

    h.sync
        .ingest(snapshot(InstanceId::new(), moves, GameStatus::InProgress, None))
        .await;

    let view = h.sync.view().await;
    assert_eq!(view.board.cell(pos(0), pos(0)), Some(GamePiece::X));
    assert_eq!(view.board.cell(pos(1), pos(1)), Some(GamePiece::O));
    assert_eq!(view.board.occupied(), 2);
    assert_eq!(view.move_count, 2);
    assert_eq!(view.turn_owner, Some(PlayerId::new("P1")));
    assert!(view.is_local_turn);
}

#[tokio::test]
async fn repeated_snapshot_is_silent_and_new_move_signals_both() {
    let h = Harness::new("P1");
    let id = InstanceId::new();
    let two = vec![mv(0, 0, GamePiece::X), mv(1, 1, GamePiece::O)];

    h.sync
        .ingest(snapshot(id, two.clone(), GameStatus::InProgress, None))
        .await;
    assert_eq!(h.signals().len(), 2);

    h.sync
        .ingest(snapshot(id, two.clone(), GameStatus::InProgress, None))
        .await;
    assert!(h.all_events().is_empty());

    let mut three = two;
    three.push(mv(2, 2, GamePiece::X));
    h.sync
        .ingest(snapshot(id, three, GameStatus::InProgress, None))
        .await;

    let signals = h.signals();
    assert_eq!(signals.len(), 2);
    match &signals[0] {
        GameEvent::BoardChanged(board) => {
            assert_eq!(board.cell(pos(2), pos(2)), Some(GamePiece::X));
        }
        other => panic!("expected BoardChanged, got {:?}", other),
    }
    assert_eq!(signals[1], GameEvent::TurnChanged(false));
    assert_eq!(
        h.sync.view().await.turn_owner,
        Some(PlayerId::new("P2"))
    );
}

#[tokio::test]
async fn finished_game_outcomes() {
    let id = InstanceId::new();
    let moves = vec![mv(0, 0, GamePiece::X)];

    for (local, winner, expected) in [
        ("P1", None, Outcome::Tie),
        ("P2", None, Outcome::Tie),
        ("P1", Some("P1"), Outcome::Win),
        ("P1", Some("P2"), Outcome::Loss),
    ] {
        let h = Harness::new(local);
        h.sync
            .ingest(snapshot(id, moves.clone(), GameStatus::InProgress, None))
            .await;
        h.sync
            .ingest(snapshot(id, moves.clone(), GameStatus::Over, winner))
            .await;

        assert_eq!(h.sync.view().await.outcome, Some(expected));
        assert!(h
            .all_events()
            .contains(&GameEvent::GameEnd(Some(expected))));
    }
}

#[tokio::test]
async fn move_while_waiting_is_refused_locally() {
    let h = Harness::new("P1");
    h.sync
        .ingest(snapshot(InstanceId::new(), vec![], GameStatus::WaitingToStart, None))
        .await;

    let result = h.sync.make_move(pos(0), pos(0)).await;

    assert!(matches!(result, Err(ClientError::NoGameInProgress)));
    assert!(h.channel.sent_payloads().is_empty());
}

#[tokio::test]
async fn join_play_and_finish() {
    let h = Harness::new("P2");
    let id = InstanceId::new();

    h.channel
        .queue_reply(&CommandResponse::Accepted { game_id: Some(id) })
        .unwrap();
    assert_eq!(h.sync.join_game().await.unwrap(), id);

    h.sync
        .ingest(snapshot(id, vec![], GameStatus::InProgress, None))
        .await;
    assert!(!h.sync.is_our_turn().await);

    h.sync
        .ingest(snapshot(id, vec![mv(0, 0, GamePiece::X)], GameStatus::InProgress, None))
        .await;
    assert!(h.sync.is_our_turn().await);

    h.channel
        .queue_reply(&CommandResponse::Accepted { game_id: Some(id) })
        .unwrap();
    h.sync.make_move(pos(1), pos(1)).await.unwrap();
    assert_eq!(
        h.channel.last_command(),
        Some(Command::GameMove {
            game_id: id,
            game_move: mv(1, 1, GamePiece::O),
        })
    );

    // Our view only moves when the authority says so.
    assert_eq!(h.sync.move_count().await, 1);

    h.sync
        .ingest(snapshot(
            id,
            vec![mv(0, 0, GamePiece::X), mv(1, 1, GamePiece::O)],
            GameStatus::Over,
            Some("P2"),
        ))
        .await;

    let events = h.all_events();
    assert!(events.contains(&GameEvent::GameEnd(Some(Outcome::Win))));
    assert!(events.contains(&GameEvent::TurnChanged(false)));

    let result = h.sync.make_move(pos(2), pos(2)).await;
    assert!(matches!(result, Err(ClientError::NoGameInProgress)));
}
