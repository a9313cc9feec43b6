//! One-shot session runner

use crate::config::ClientConfig;
use crate::session::{Session, StateReport};
use cloudwars_bridge::LineChannel;
use cloudwars_core::{Color, GameState, Move, Response, ResponseKind, Result};
use tracing::{debug, info};

/// What a single run submits
#[derive(Debug, Clone, PartialEq)]
pub struct SessionPlan {
    pub name: String,
    pub color: Color,
    pub next_move: Move,
}

impl From<&ClientConfig> for SessionPlan {
    fn from(config: &ClientConfig) -> Self {
        Self {
            name: config.name.clone(),
            color: config.color,
            next_move: config.next_move,
        }
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionReport {
    /// Plain-text replies in the order received, delimiters stripped
    pub messages: Vec<String>,
    /// Decoded game state, when the state reply was structured
    pub state: Option<GameState>,
    /// The server's reply to the move, plain or structured
    pub move_reply: Option<Response>,
}

impl SessionReport {
    pub fn height(&self) -> Option<i64> {
        self.state.as_ref().map(|s| s.height)
    }

    fn record(&mut self, response: Response) {
        match response.kind() {
            ResponseKind::Plain => self.messages.push(response.into_content()),
            ResponseKind::Structured => {
                debug!("Structured reply not kept as a message: {}", response.content())
            }
        }
    }
}

/// Drive register, colour, play, state query and move over `channel`.
///
/// The first failure aborts the run. The channel is dropped when this returns.
pub async fn run_session<C: LineChannel>(channel: C, plan: &SessionPlan) -> Result<SessionReport> {
    let mut report = SessionReport::default();

    let (session, response) = Session::new(channel).register(&plan.name).await?;
    report.record(response);
    let (session, response) = session.select_color(plan.color).await?;
    report.record(response);
    let (session, response) = session.play().await?;
    report.record(response);

    let session = session.query_state().await?;
    match session.report() {
        StateReport::World(state) => report.state = Some(state.clone()),
        StateReport::Info(text) => report.messages.push(text.clone()),
    }

    let (_session, response) = session.send_move(plan.next_move).await?;
    report.record(response.clone());
    report.move_reply = Some(response);

    Ok(report)
}

/// Connect to the configured server and run one session
pub async fn play(config: &ClientConfig) -> Result<SessionReport> {
    let session = Session::connect(&config.host, config.port).await?;
    let report = run_session(session.into_channel(), &SessionPlan::from(config)).await?;
    info!(
        "Session finished: {} messages, height {:?}",
        report.messages.len(),
        report.height()
    );
    Ok(report)
}
