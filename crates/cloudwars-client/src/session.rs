//! Session driver
//!
//! A session walks a fixed sequence: register a name, pick a colour, start
//! playing, fetch the game state, submit a move. Each step consumes the
//! session and hands back one that only offers the next legal step, so an
//! out-of-order command does not compile.
//!
//! Every step is one send followed by one receive. Any error ends the session;
//! the channel is dropped with it, which closes the connection.

use cloudwars_bridge::{LineChannel, TcpChannel};
use cloudwars_core::{Color, Command, GameState, Move, Response, ResponseKind, Result};
use tracing::{debug, info};

/// Stream open, nothing sent yet
#[derive(Debug)]
pub struct Connected;

/// Name sent
#[derive(Debug)]
pub struct Registered;

/// Colour sent
#[derive(Debug)]
pub struct Configured;

/// `play` sent
#[derive(Debug)]
pub struct InGame;

/// Game state fetched
#[derive(Debug)]
pub struct StateKnown {
    report: StateReport,
}

/// Move sent; only housekeeping commands remain
#[derive(Debug)]
pub struct Done;

/// Interpretation of the reply to `list`
#[derive(Debug, Clone, PartialEq)]
pub enum StateReport {
    /// Structured reply, decoded
    World(GameState),
    /// Plain informational line
    Info(String),
}

impl StateReport {
    /// Board height, when the reply was structured
    pub fn height(&self) -> Option<i64> {
        match self {
            StateReport::World(state) => Some(state.height),
            StateReport::Info(_) => None,
        }
    }
}

/// A game session over a line channel, tagged with its protocol state
#[derive(Debug)]
pub struct Session<C, S = Connected> {
    channel: C,
    state: S,
}

impl<C: LineChannel, S> Session<C, S> {
    /// Send one command and wait for its reply
    async fn exchange(&mut self, command: Command) -> Result<Response> {
        self.channel.send(&command.encode()).await?;
        let response = self.channel.receive().await?;
        debug!("{} -> {:?} reply", command.keyword(), response.kind());
        Ok(response)
    }

    fn advance<N>(self, state: N) -> Session<C, N> {
        Session {
            channel: self.channel,
            state,
        }
    }

    /// Give back the channel, abandoning the session
    pub fn into_channel(self) -> C {
        self.channel
    }
}

impl Session<TcpChannel, Connected> {
    /// Open a TCP connection to the game server
    pub async fn connect(host: &str, port: u16) -> Result<Self> {
        let channel = cloudwars_bridge::connect(host, port).await?;
        Ok(Self::new(channel))
    }
}

impl<C: LineChannel> Session<C, Connected> {
    /// Start a session over an already-open channel
    pub fn new(channel: C) -> Self {
        Self {
            channel,
            state: Connected,
        }
    }

    /// Register under a display name
    pub async fn register(mut self, name: &str) -> Result<(Session<C, Registered>, Response)> {
        let response = self.exchange(Command::Name(name.to_string())).await?;
        Ok((self.advance(Registered), response))
    }
}

impl<C: LineChannel> Session<C, Registered> {
    /// Pick one of the server's player colours
    pub async fn select_color(self, color: Color) -> Result<(Session<C, Configured>, Response)> {
        self.select_type(color.as_str()).await
    }

    /// Declare a role by name; the server judges whether it is valid
    pub async fn select_type(mut self, role: &str) -> Result<(Session<C, Configured>, Response)> {
        let response = self.exchange(Command::Type(role.to_string())).await?;
        Ok((self.advance(Configured), response))
    }
}

impl<C: LineChannel> Session<C, Configured> {
    /// Ask the server to begin play
    pub async fn play(mut self) -> Result<(Session<C, InGame>, Response)> {
        let response = self.exchange(Command::Play).await?;
        Ok((self.advance(InGame), response))
    }
}

impl<C: LineChannel> Session<C, InGame> {
    /// Fetch the game state.
    ///
    /// A structured reply must decode and carry an integer `Height`, otherwise
    /// this fails with a payload error. A plain reply is kept as text.
    pub async fn query_state(mut self) -> Result<Session<C, StateKnown>> {
        let response = self.exchange(Command::List).await?;
        let report = match response.kind() {
            ResponseKind::Structured => StateReport::World(response.game_state()?),
            ResponseKind::Plain => StateReport::Info(response.into_content()),
        };
        if let Some(height) = report.height() {
            info!("Game state received, height {}", height);
        }
        Ok(self.advance(StateKnown { report }))
    }
}

impl<C: LineChannel> Session<C, StateKnown> {
    pub fn report(&self) -> &StateReport {
        &self.state.report
    }

    pub fn height(&self) -> Option<i64> {
        self.state.report.height()
    }

    /// Submit a move. Legality is decided by the server and reported in the reply.
    pub async fn send_move(mut self, mv: Move) -> Result<(Session<C, Done>, Response)> {
        let response = self.exchange(mv.to_command()).await?;
        Ok((self.advance(Done), response))
    }

    /// Take the state report out, ending the session
    pub fn into_report(self) -> StateReport {
        self.state.report
    }
}

impl<C: LineChannel> Session<C, Done> {
    /// Blast the controlled cloud; the connection stays open
    pub async fn kill(mut self) -> Result<(Self, Response)> {
        let response = self.exchange(Command::Kill).await?;
        Ok((self, response))
    }

    /// Say goodbye and close the connection
    pub async fn quit(mut self) -> Result<Response> {
        let response = self.exchange(Command::Quit).await?;
        self.channel.close().await?;
        info!("Session closed");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudwars_bridge::FramedChannel;
    use cloudwars_core::CloudWarsError;
    use tokio_test::io::Builder;

    #[tokio::test]
    async fn test_full_sequence() {
        let mock = Builder::new()
            .write(b"nameMike\n")
            .read(b"ok\r\n")
            .write(b"typered\n")
            .read(b"ok\r\n")
            .write(b"play\n")
            .read(b"ok: the game begins when all players are ready\r\n")
            .write(b"list\n")
            .read(b"{\"Width\":2048,\"Height\":1152,\"Clouds\":[]}\r\n")
            .write(b"move10,10;10,10\n")
            .read(b"ok\r\n")
            .write(b"kill\n")
            .read(b"ok\r\n")
            .write(b"quit\n")
            .read(b"ok\r\n")
            .build();
        let session = Session::new(FramedChannel::new(mock));

        let (session, resp) = session.register("Mike").await.unwrap();
        assert_eq!(resp.content(), "ok");
        let (session, _) = session.select_color(Color::Red).await.unwrap();
        let (session, resp) = session.play().await.unwrap();
        assert!(resp.content().starts_with("ok: the game begins"));

        let session = session.query_state().await.unwrap();
        assert_eq!(session.height(), Some(1152));
        match session.report() {
            StateReport::World(state) => assert_eq!(state.width, Some(2048)),
            other => panic!("Expected World report, got {:?}", other),
        }

        let (session, resp) = session
            .send_move(Move::from_parts(10, 10, 10, 10))
            .await
            .unwrap();
        assert_eq!(resp.content(), "ok");

        let (session, _) = session.kill().await.unwrap();
        assert_eq!(session.quit().await.unwrap().content(), "ok");
    }

    #[tokio::test]
    async fn test_plain_state_reply_kept_as_text() {
        let mock = Builder::new()
            .write(b"list\n")
            .read(b"err: wait for other players\r\n")
            .build();
        let session = Session {
            channel: FramedChannel::new(mock),
            state: InGame,
        };

        let session = session.query_state().await.unwrap();
        assert_eq!(session.height(), None);
        assert_eq!(
            session.into_report(),
            StateReport::Info("err: wait for other players".into())
        );
    }

    #[tokio::test]
    async fn test_state_without_height_is_payload_error() {
        let mock = Builder::new()
            .write(b"list\n")
            .read(b"{\"Width\": 8}\n")
            .build();
        let session = Session {
            channel: FramedChannel::new(mock),
            state: InGame,
        };

        match session.query_state().await {
            Err(CloudWarsError::Payload(_)) => {}
            other => panic!("Expected Payload error, got {:?}", other.map(|s| s.into_report())),
        }
    }

    #[tokio::test]
    async fn test_rejected_role_is_not_an_error() {
        let mock = Builder::new()
            .write(b"typegreen\n")
            .read(b"err: invalid color; use 'blue', 'gray', 'orange', 'purple' or 'red'\r\n")
            .build();
        let session = Session {
            channel: FramedChannel::new(mock),
            state: Registered,
        };

        let (_, resp) = session.select_type("green").await.unwrap();
        assert!(resp.content().starts_with("err: invalid color"));
        assert_eq!(resp.kind(), ResponseKind::Plain);
    }
}
