//! JSON-lines boundary between a [`Session`] and an out-of-process presentation layer.
//!
//! Each request and response is one JSON object on its own line, tagged by `type`:
//!
//! ```text
//! {"type":"move","direction":"left"}
//! {"type":"key","code":"ArrowUp"}
//! {"type":"swipe","dx":-120.0,"dy":4.0}
//! {"type":"settle"}
//! {"type":"state"}
//! {"type":"reset"}
//! ```

use serde::{Deserialize, Serialize};

use crate::engine::{Direction, SpawnEvent, TileEvent};
use crate::session::{MoveRequest, Phase, Session};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    Reset,
    State,
    Move { direction: Direction },
    Key { code: String },
    Swipe { dx: f32, dy: f32 },
    Settle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    State {
        board: Vec<Vec<u32>>,
        score: u64,
        best_score: u64,
        phase: Phase,
    },
    MoveResult {
        board: Vec<Vec<u32>>,
        events: Vec<TileEvent>,
        spawn: Option<SpawnEvent>,
        score_delta: u64,
        score: u64,
        best_score: u64,
        game_over: bool,
        settle_ms: u64,
    },
    Ignored {
        phase: Phase,
    },
    Error {
        message: String,
    },
}

impl Response {
    pub fn state(session: &Session) -> Self {
        Response::State {
            board: session.grid().rows(),
            score: session.score(),
            best_score: session.best_score(),
            phase: session.phase(),
        }
    }

    pub fn to_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| error_line(&e.to_string()))
    }
}

fn error_line(message: &str) -> String {
    serde_json::json!({ "type": "error", "message": message }).to_string()
}

/// Apply one decoded request to the session.
pub fn handle_request(session: &mut Session, request: Request) -> Response {
    let outcome = match request {
        Request::Reset => {
            session.restart();
            return Response::state(session);
        }
        Request::State => return Response::state(session),
        Request::Settle => {
            session.settle();
            return Response::state(session);
        }
        Request::Move { direction } => session.request_move(direction),
        Request::Key { code } => session.handle_key(&code),
        Request::Swipe { dx, dy } => session.handle_swipe(dx, dy),
    };
    match outcome {
        MoveRequest::Accepted(result) => Response::MoveResult {
            board: result.grid.rows(),
            events: result.events,
            spawn: result.spawn,
            score_delta: result.score_delta,
            score: result.score,
            best_score: session.best_score(),
            game_over: result.game_over,
            settle_ms: session.settle_delay().as_millis() as u64,
        },
        MoveRequest::Unchanged => Response::state(session),
        MoveRequest::Ignored => Response::Ignored { phase: session.phase() },
    }
}

/// Parse and apply one line. Blank lines produce no response.
pub fn handle_line(session: &mut Session, line: &str) -> Option<Response> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let response = match serde_json::from_str::<Request>(line) {
        Ok(request) => handle_request(session, request),
        Err(e) => Response::Error { message: format!("bad request: {e}") },
    };
    Some(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::engine::{Grid, GridEngine};

    fn session() -> Session {
        let grid = Grid::from_rows(vec![
            vec![2, 2, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
        ])
        .unwrap();
        Session::with_engine(GridEngine::from_grid(grid, 5), SessionConfig::default())
    }

    #[test]
    fn parses_requests() {
        assert_eq!(
            serde_json::from_str::<Request>(r#"{"type":"move","direction":"left"}"#).unwrap(),
            Request::Move { direction: Direction::Left }
        );
        assert_eq!(
            serde_json::from_str::<Request>(r#"{"type":"swipe","dx":3.5,"dy":-80}"#).unwrap(),
            Request::Swipe { dx: 3.5, dy: -80.0 }
        );
        assert_eq!(serde_json::from_str::<Request>(r#"{"type":"settle"}"#).unwrap(), Request::Settle);
    }

    #[test]
    fn move_then_ignored_then_settle() {
        let mut s = session();
        match handle_line(&mut s, r#"{"type":"move","direction":"left"}"#) {
            Some(Response::MoveResult { score_delta, events, spawn, settle_ms, .. }) => {
                assert_eq!(score_delta, 4);
                assert_eq!(events.len(), 1);
                assert!(events[0].merged);
                assert!(spawn.is_some());
                assert_eq!(settle_ms, 120);
            }
            other => panic!("unexpected response {other:?}"),
        }
        assert_eq!(
            handle_line(&mut s, r#"{"type":"key","code":"ArrowRight"}"#),
            Some(Response::Ignored { phase: Phase::Settling })
        );
        match handle_line(&mut s, r#"{"type":"settle"}"#) {
            Some(Response::State { phase, score, .. }) => {
                assert_eq!(phase, Phase::Ready);
                assert_eq!(score, 4);
            }
            other => panic!("unexpected response {other:?}"),
        }
    }

    #[test]
    fn bad_lines_become_errors() {
        let mut s = session();
        assert_eq!(handle_line(&mut s, "   "), None);
        assert!(matches!(handle_line(&mut s, "{not json"), Some(Response::Error { .. })));
        assert!(matches!(
            handle_line(&mut s, r#"{"type":"move","direction":"sideways"}"#),
            Some(Response::Error { .. })
        ));
    }

    #[test]
    fn responses_serialize_with_type_tag() {
        let s = session();
        let line = Response::state(&s).to_line();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["type"], "state");
        assert_eq!(value["phase"], "ready");
        assert_eq!(value["board"][0][0], 2);
    }

    #[test]
    fn error_fallback_escapes_its_message() {
        let message = "key \"cells\" bad\\path\nline two";
        let value: serde_json::Value = serde_json::from_str(&error_line(message)).unwrap();
        assert_eq!(value["type"], "error");
        assert_eq!(value["message"], message);
    }
}
