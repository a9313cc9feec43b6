//! TCP transport
//!
//! The game server listens on a plain TCP port (3333 by default).

use crate::channel::FramedChannel;
use cloudwars_core::{CloudWarsError, Result};
use tokio::net::TcpStream;
use tracing::info;

/// Framed channel over a TCP connection
pub type TcpChannel = FramedChannel<TcpStream>;

/// Open a TCP connection to `host:port` and wrap it in a framed channel
pub async fn connect(host: &str, port: u16) -> Result<TcpChannel> {
    info!("Connecting to game server at {}:{}", host, port);

    let stream = TcpStream::connect((host, port)).await.map_err(|e| {
        CloudWarsError::Connection(format!("Failed to connect to {}:{}: {}", host, port, e))
    })?;
    stream
        .set_nodelay(true)
        .map_err(|e| CloudWarsError::Connection(format!("Failed to set TCP_NODELAY: {}", e)))?;

    Ok(FramedChannel::new(stream))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{LineReader, LineWriter};
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_tcp_line_exchange() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let (read_half, mut write_half) = stream.into_split();
            let mut lines = BufReader::new(read_half).lines();
            let line = lines.next_line().await.unwrap().unwrap();
            assert_eq!(line, "list");
            write_half.write_all(b"{\"Height\": 3}\r\n").await.unwrap();
        });

        let mut channel = connect("127.0.0.1", port).await.unwrap();
        channel.send("list").await.unwrap();
        let resp = channel.receive().await.unwrap();
        assert_eq!(resp.game_state().unwrap().height, 3);

        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_connect_refused() {
        // Bind then drop to get a port nobody listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        assert!(matches!(
            connect("127.0.0.1", port).await,
            Err(CloudWarsError::Connection(_))
        ));
    }
}
