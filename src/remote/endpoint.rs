use std::io::ErrorKind;
use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::{TcpListener, TcpStream, ToSocketAddrs};
use tokio::sync::{mpsc, watch};

use crate::remote::protocol::{read_frame, GAME_MESSAGE_ID};

pub type ConnectionId = u64;

const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointEvent {
    Connected(ConnectionId),
    Disconnected(ConnectionId),
    Message {
        connection: ConnectionId,
        payload: String,
    },
}

/// Accepts controller connections and forwards their game messages as
/// events. Messages are delivered in arrival order per connection.
///
/// Dropping the endpoint stops the listener and ends every live
/// connection.
pub struct MessageEndpoint {
    local_addr: SocketAddr,
    close_sender: watch::Sender<bool>,
}

/// How long the listener waits before accepting again after `error`.
/// Errors tied to a single peer retry at once.
fn accept_retry_delay(error: &std::io::Error) -> Duration {
    match error.kind() {
        ErrorKind::ConnectionAborted
        | ErrorKind::ConnectionReset
        | ErrorKind::Interrupted
        | ErrorKind::WouldBlock => Duration::ZERO,
        _ => ACCEPT_BACKOFF,
    }
}

impl MessageEndpoint {
    pub async fn bind(
        addr: impl ToSocketAddrs,
        events: mpsc::UnboundedSender<EndpointEvent>,
    ) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        let (close_sender, close_receiver) = watch::channel(false);

        log::info!("listening for controllers on {local_addr}");
        tokio::spawn(Self::accept_loop(listener, events, close_receiver));

        Ok(Self {
            local_addr,
            close_sender,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    async fn accept_loop(
        listener: TcpListener,
        events: mpsc::UnboundedSender<EndpointEvent>,
        mut closed: watch::Receiver<bool>,
    ) {
        let mut next_id: ConnectionId = 1;
        loop {
            let accept = tokio::select! {
                accept = listener.accept() => accept,
                _ = closed.changed() => break,
            };

            match accept {
                Ok((socket, peer)) => {
                    let connection = next_id;
                    next_id += 1;
                    log::info!("controller {connection} connected from {peer}");

                    let serve = Self::serve(connection, socket, events.clone(), closed.clone());
                    tokio::spawn(serve);
                }
                Err(e) => {
                    let delay = accept_retry_delay(&e);
                    log::warn!("accept failed, retrying in {delay:?}: {e}");
                    tokio::time::sleep(delay).await;
                }
            }
        }

        log::debug!("controller endpoint closed");
    }

    async fn serve(
        connection: ConnectionId,
        mut socket: TcpStream,
        events: mpsc::UnboundedSender<EndpointEvent>,
        mut closed: watch::Receiver<bool>,
    ) {
        if events.send(EndpointEvent::Connected(connection)).is_err() {
            return;
        }

        let result = tokio::select! {
            result = Self::handle_connection_rx(connection, &mut socket, &events) => result,
            _ = closed.changed() => Ok(()),
        };

        let _ = events.send(EndpointEvent::Disconnected(connection));
        match result {
            Err(e)
                if e.kind() == ErrorKind::UnexpectedEof
                    || e.kind() == ErrorKind::ConnectionReset
                    || e.kind() == ErrorKind::ConnectionAborted =>
            {
                log::info!("controller {connection} disconnected");
            }
            Err(e) => log::warn!("closing controller {connection}: {e}"),
            Ok(()) => log::debug!("controller {connection} closed by the server"),
        }
    }

    async fn handle_connection_rx(
        connection: ConnectionId,
        socket: &mut TcpStream,
        events: &mpsc::UnboundedSender<EndpointEvent>,
    ) -> std::io::Result<()> {
        loop {
            let frame = read_frame(socket).await?;
            if frame.message_id != GAME_MESSAGE_ID {
                log::trace!(
                    "controller {connection}: skipping message id {}",
                    frame.message_id
                );
                continue;
            }

            let event = EndpointEvent::Message {
                connection,
                payload: frame.text(),
            };
            if events.send(event).is_err() {
                return Ok(());
            }
        }
    }
}

impl Drop for MessageEndpoint {
    fn drop(&mut self) {
        let _ = self.close_sender.send(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::protocol::{write_frame, Frame};

    async fn bind_local() -> (MessageEndpoint, mpsc::UnboundedReceiver<EndpointEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let endpoint = MessageEndpoint::bind("127.0.0.1:0", events_tx).await;
        (endpoint.unwrap(), events_rx)
    }

    #[tokio::test]
    async fn forwards_game_messages_in_order() {
        let (endpoint, mut events_rx) = bind_local().await;
        let other = Frame {
            message_id: 5,
            payload: b"z".to_vec(),
        };

        let connect = TcpStream::connect(endpoint.local_addr()).await;
        let mut client = connect.unwrap();
        let command = Frame::game("PNT A 1 2 3");
        write_frame(&mut client, &command).await.unwrap();
        write_frame(&mut client, &other).await.unwrap();
        write_frame(&mut client, &Frame::game("z")).await.unwrap();

        let Some(EndpointEvent::Connected(connection)) = events_rx.recv().await else {
            panic!("expected a connection event");
        };
        assert_eq!(
            events_rx.recv().await,
            Some(EndpointEvent::Message {
                connection,
                payload: "PNT A 1 2 3".into(),
            })
        );
        assert_eq!(
            events_rx.recv().await,
            Some(EndpointEvent::Message {
                connection,
                payload: "z".into(),
            })
        );

        drop(client);
        assert_eq!(
            events_rx.recv().await,
            Some(EndpointEvent::Disconnected(connection))
        );
    }

    #[tokio::test]
    async fn dropping_the_endpoint_ends_live_connections() {
        let (endpoint, mut events_rx) = bind_local().await;
        let connect = TcpStream::connect(endpoint.local_addr()).await;
        let _client = connect.unwrap();

        let Some(EndpointEvent::Connected(connection)) = events_rx.recv().await else {
            panic!("expected a connection event");
        };

        drop(endpoint);
        assert_eq!(
            events_rx.recv().await,
            Some(EndpointEvent::Disconnected(connection))
        );
        assert_eq!(events_rx.recv().await, None);
    }

    #[test]
    fn accept_errors_keep_the_listener_running() {
        let aborted = std::io::Error::from(ErrorKind::ConnectionAborted);
        assert_eq!(accept_retry_delay(&aborted), Duration::ZERO);

        // EMFILE: wait for descriptors to free up instead of spinning.
        let exhausted = std::io::Error::from_raw_os_error(24);
        assert_eq!(accept_retry_delay(&exhausted), ACCEPT_BACKOFF);
    }
}
