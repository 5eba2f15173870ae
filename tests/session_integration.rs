//! Full sessions against a scripted in-memory server

use hexbattle_bot::core::config::BotConfig;
use hexbattle_bot::hex::Cell;
use hexbattle_bot::protocol::codec::{decode_request, encode_response, FrameHeader, HEADER_SIZE};
use hexbattle_bot::protocol::{Action, Connection, StatusCode};
use hexbattle_bot::session::{connect_and_play, Game, SessionEvent};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt, DuplexStream};

/// One scripted reply: expected action, then status and body to answer with
struct Step {
    action: Action,
    status: StatusCode,
    body: Value,
}

fn reply(action: Action, body: Value) -> Step {
    Step {
        action,
        status: StatusCode::Ok,
        body,
    }
}

fn cell(x: i32, y: i32, z: i32) -> Value {
    json!({"x": x, "y": y, "z": z})
}

fn map_payload() -> Value {
    json!({
        "size": 5,
        "name": "duel",
        "spawn_points": [{"medium_tank": [cell(-3, 0, 3)]}],
        "content": {"base": [cell(0, 0, 0)]}
    })
}

fn state_payload(turn: u32, finished: bool) -> Value {
    json!({
        "num_players": 1,
        "num_turns": 45,
        "current_turn": turn,
        "current_player_idx": 1,
        "finished": finished,
        "winner": if finished { json!(1) } else { Value::Null },
        "players": [{"idx": 1, "name": "Bot", "is_observer": false}],
        "attack_matrix": {"1": []},
        "catapult_usage": [],
        "win_points": {"1": {"capture": 1, "kill": 0}},
        "vehicles": {
            "1": {
                "player_id": 1,
                "vehicle_type": "medium_tank",
                "health": 2,
                "spawn_position": cell(-3, 0, 3),
                "position": cell(-3, 0, 3),
                "capture_points": 0,
                "shoot_range_bonus": 0
            }
        }
    })
}

fn medium_tank(player: u32, position: Value, health: u32) -> Value {
    json!({
        "player_id": player,
        "vehicle_type": "medium_tank",
        "health": health,
        "spawn_position": position.clone(),
        "position": position,
        "capture_points": 0,
        "shoot_range_bonus": 0
    })
}

/// Map whose spawn points are the given tanks' positions
fn squad_map(spawns: Vec<Value>, base: Vec<Value>) -> Value {
    json!({
        "size": 5,
        "name": "squad",
        "spawn_points": [{"medium_tank": spawns}],
        "content": {"base": base}
    })
}

/// Our turn in a two player game where nobody has attacked yet
fn squad_state(turn: u32, finished: bool, vehicles: Value) -> Value {
    json!({
        "num_players": 2,
        "num_turns": 45,
        "current_turn": turn,
        "current_player_idx": 1,
        "finished": finished,
        "winner": Value::Null,
        "players": [
            {"idx": 1, "name": "Bot", "is_observer": false},
            {"idx": 2, "name": "Rival", "is_observer": false}
        ],
        "attack_matrix": {"1": [], "2": []},
        "catapult_usage": [],
        "win_points": {},
        "vehicles": vehicles
    })
}

/// Script one turn of a squad game: setup, our actions, TURN, game over
fn squad_script(map: Value, vehicles: Value, actions: &[Action]) -> Vec<Step> {
    let mut script = vec![
        reply(Action::Login, json!({"idx": 1, "name": "Bot", "is_observer": false})),
        reply(Action::GameState, squad_state(0, false, vehicles.clone())),
        reply(Action::Map, map),
        reply(Action::GameState, squad_state(0, false, vehicles.clone())),
    ];
    script.extend(actions.iter().map(|action| reply(*action, Value::Null)));
    script.push(reply(Action::Turn, Value::Null));
    script.push(reply(Action::GameState, squad_state(1, true, vehicles)));
    script.push(reply(Action::Logout, Value::Null));
    script
}

async fn read_request(server: &mut DuplexStream) -> Option<(Action, Option<Value>)> {
    let mut header = [0u8; HEADER_SIZE];
    if server.read_exact(&mut header).await.is_err() {
        return None;
    }
    let length = FrameHeader::from_bytes(header).length as usize;
    let mut body = vec![0u8; length];
    server.read_exact(&mut body).await.unwrap();
    let mut frame = header.to_vec();
    frame.extend_from_slice(&body);
    Some(decode_request(&frame).unwrap())
}

/// Answer each request from the script and record what the client sent
async fn serve(mut server: DuplexStream, script: Vec<Step>) -> Vec<(Action, Option<Value>)> {
    let mut seen = Vec::new();
    for step in script {
        let Some((action, payload)) = read_request(&mut server).await else {
            break;
        };
        assert_eq!(action, step.action, "unexpected request after {seen:?}");
        seen.push((action, payload));

        let body = if step.body.is_null() {
            Vec::new()
        } else {
            serde_json::to_vec(&step.body).unwrap()
        };
        server
            .write_all(&encode_response(step.status, &body).unwrap())
            .await
            .unwrap();
    }
    seen
}

fn config() -> BotConfig {
    let mut config = BotConfig::new();
    config.login.name = "Bot".into();
    config.strategy.seed = Some(1);
    config
}

#[tokio::test]
async fn test_full_session_moves_toward_base() {
    let (client, server) = tokio::io::duplex(64 * 1024);
    let script = vec![
        reply(Action::Login, json!({"idx": 1, "name": "Bot", "is_observer": false})),
        reply(Action::GameState, state_payload(0, false)),
        reply(Action::Map, map_payload()),
        Step {
            action: Action::GameState,
            status: StatusCode::Timeout,
            body: json!({"error_message": "Timeout"}),
        },
        reply(Action::GameState, state_payload(0, false)),
        reply(Action::Move, Value::Null),
        reply(Action::Turn, Value::Null),
        reply(Action::GameState, state_payload(1, true)),
        reply(Action::Logout, Value::Null),
    ];
    let server_task = tokio::spawn(serve(server, script));

    let config = config();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let game = Game::new(Connection::new(client), &config, config.login.to_request(None), tx);
    let outcome = game.run().await;

    assert_eq!(outcome.failure, None);
    assert_eq!(outcome.player, Some(1));
    assert_eq!(outcome.winner, Some(1));
    assert!(outcome.is_victory());
    assert_eq!(outcome.turns_played, 1);
    assert_eq!(outcome.our_points().capture, 1);

    let seen = server_task.await.unwrap();
    let actions: Vec<Action> = seen.iter().map(|(action, _)| *action).collect();
    assert_eq!(
        actions,
        vec![
            Action::Login,
            Action::GameState,
            Action::Map,
            Action::GameState,
            Action::GameState,
            Action::Move,
            Action::Turn,
            Action::GameState,
            Action::Logout,
        ]
    );
    assert_eq!(seen[0].1.as_ref().unwrap()["name"], "Bot");
    let move_payload = seen[5].1.clone().unwrap();
    assert_eq!(move_payload["vehicle_id"], 1);
    let target: Cell = serde_json::from_value(move_payload["target"].clone()).unwrap();
    assert_eq!(target, Cell::new(-1, 0, 1));

    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    assert!(events.len() >= 2);
    match &events[0] {
        SessionEvent::StateUpdated { map, state } => {
            assert_eq!(map.name, "duel");
            assert_eq!(state.current_turn, 0);
            assert_eq!(state.our_tanks.len(), 1);
        }
        other => panic!("expected a state update first, got {other:?}"),
    }
    match events.last() {
        Some(SessionEvent::GameEnded(ended)) => assert_eq!(ended, &outcome),
        other => panic!("expected the game end last, got {other:?}"),
    }
}

#[tokio::test]
async fn test_waits_out_other_players_turns() {
    let (client, server) = tokio::io::duplex(64 * 1024);
    let mut waiting = state_payload(0, false);
    waiting["current_player_idx"] = json!(2);
    let mut next = state_payload(1, false);
    next["current_player_idx"] = json!(2);

    let script = vec![
        reply(Action::Login, json!({"idx": 1, "name": "Bot", "is_observer": false})),
        reply(Action::GameState, waiting.clone()),
        reply(Action::Map, map_payload()),
        reply(Action::GameState, waiting),
        reply(Action::Turn, Value::Null),
        reply(Action::GameState, next),
        reply(Action::Turn, Value::Null),
        reply(Action::GameState, state_payload(2, true)),
        reply(Action::Logout, Value::Null),
    ];
    let server_task = tokio::spawn(serve(server, script));

    let config = config();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let outcome = Game::new(Connection::new(client), &config, config.login.to_request(None), tx)
        .run()
        .await;

    assert_eq!(outcome.failure, None);
    assert_eq!(outcome.turns_played, 2);
    let seen = server_task.await.unwrap();
    assert!(seen.iter().all(|(action, _)| *action != Action::Move));

    let mut updates = 0;
    while let Ok(event) = rx.try_recv() {
        if matches!(event, SessionEvent::StateUpdated { .. }) {
            updates += 1;
        }
    }
    // setup plus the change to turn 1
    assert_eq!(updates, 2);
}

#[tokio::test]
async fn test_rejected_login_reports_failure() {
    let (client, server) = tokio::io::duplex(1024);
    let script = vec![Step {
        action: Action::Login,
        status: StatusCode::AccessDenied,
        body: json!({"error_message": "Wrong password"}),
    }];
    let server_task = tokio::spawn(serve(server, script));

    let config = config();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let outcome = Game::new(Connection::new(client), &config, config.login.to_request(None), tx)
        .run()
        .await;

    let reason = outcome.failure.clone().unwrap();
    assert!(reason.contains("ACCESS_DENIED"));
    assert!(reason.contains("Wrong password"));
    assert_eq!(outcome.player, None);

    match rx.try_recv() {
        Ok(SessionEvent::GameEnded(ended)) => assert_eq!(ended, outcome),
        other => panic!("expected only the game end, got {other:?}"),
    }
    server_task.await.unwrap();
}

#[tokio::test]
async fn test_missing_map_key_ends_session() {
    let (client, server) = tokio::io::duplex(64 * 1024);
    let mut broken_map = map_payload();
    broken_map.as_object_mut().unwrap().remove("content");
    let script = vec![
        reply(Action::Login, json!({"idx": 1, "name": "Bot", "is_observer": false})),
        reply(Action::GameState, state_payload(0, false)),
        reply(Action::Map, broken_map),
    ];
    let server_task = tokio::spawn(serve(server, script));

    let config = config();
    let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
    let outcome = Game::new(Connection::new(client), &config, config.login.to_request(None), tx)
        .run()
        .await;

    assert!(outcome.failure.unwrap().contains("content"));
    server_task.await.unwrap();
}

#[tokio::test]
async fn test_second_unit_sees_first_units_kill() {
    let (client, server) = tokio::io::duplex(64 * 1024);
    let vehicles = json!({
        "1": medium_tank(1, cell(-2, 0, 2), 2),
        "2": medium_tank(1, cell(0, 2, -2), 2),
        "3": medium_tank(2, cell(0, 0, 0), 1),
    });
    let map = squad_map(
        vec![cell(-2, 0, 2), cell(0, 2, -2)],
        vec![cell(0, 0, 0), cell(1, -1, 0)],
    );
    let script = squad_script(map, vehicles, &[Action::Shoot, Action::Move]);
    let server_task = tokio::spawn(serve(server, script));

    let config = config();
    let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
    let outcome = Game::new(Connection::new(client), &config, config.login.to_request(None), tx)
        .run()
        .await;
    assert_eq!(outcome.failure, None);

    let seen = server_task.await.unwrap();
    let orders: Vec<(Action, Value)> = seen
        .iter()
        .filter(|(action, _)| matches!(action, Action::Shoot | Action::Move))
        .map(|(action, payload)| (*action, payload.clone().unwrap()))
        .collect();
    // the enemy is dead after the first shot, so the second tank drives to the free base
    assert_eq!(
        orders,
        vec![
            (Action::Shoot, json!({"vehicle_id": 1, "target": cell(0, 0, 0)})),
            (Action::Move, json!({"vehicle_id": 2, "target": cell(1, 0, -1)})),
        ]
    );
}

#[tokio::test]
async fn test_second_unit_avoids_first_units_destination() {
    let (client, server) = tokio::io::duplex(64 * 1024);
    let vehicles = json!({
        "1": medium_tank(1, cell(-3, 0, 3), 2),
        "2": medium_tank(1, cell(-3, 1, 2), 2),
    });
    let map = squad_map(vec![cell(-3, 0, 3), cell(-3, 1, 2)], vec![cell(0, 0, 0)]);
    let script = squad_script(map, vehicles, &[Action::Move, Action::Move]);
    let server_task = tokio::spawn(serve(server, script));

    let config = config();
    let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
    let outcome = Game::new(Connection::new(client), &config, config.login.to_request(None), tx)
        .run()
        .await;
    assert_eq!(outcome.failure, None);

    let seen = server_task.await.unwrap();
    let moves: Vec<Value> = seen
        .iter()
        .filter(|(action, _)| *action == Action::Move)
        .map(|(_, payload)| payload.clone().unwrap())
        .collect();
    // both head for the base; the second path would end on the first tank's new cell
    assert_eq!(
        moves,
        vec![
            json!({"vehicle_id": 1, "target": cell(-1, 0, 1)}),
            json!({"vehicle_id": 2, "target": cell(-1, 1, 0)}),
        ]
    );
}

#[tokio::test]
async fn test_unreachable_server_reports_game_end() {
    let mut config = config();
    config.server.host = "127.0.0.1".into();
    config.server.port = 1;
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

    let outcome = connect_and_play(&config, config.login.to_request(None), tx).await;

    let reason = outcome.failure.clone().unwrap();
    assert!(reason.contains("127.0.0.1:1"));
    assert_eq!(outcome.player, None);
    match rx.recv().await {
        Some(SessionEvent::GameEnded(ended)) => assert_eq!(ended, outcome),
        other => panic!("expected the game end, got {other:?}"),
    }
    assert!(rx.recv().await.is_none());
}
