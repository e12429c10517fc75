use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpStream;

use orrery::remote::protocol::{write_frame, Frame, MAX_PAYLOAD_LEN};

/// Send control codes and authoring commands to orrery servers
#[derive(Parser, Debug)]
#[command(name = "orrery-client")]
struct Cli {
    /// Servers to control, as host:port
    #[arg(required = true, num_args = 1..)]
    servers: Vec<String>,
}

/// The frame carrying `line`, or `None` when the servers would refuse it.
fn frame_for(line: &str) -> Option<Frame> {
    let frame = Frame::game(line);
    if frame.fits() {
        Some(frame)
    } else {
        log::warn!(
            "skipping a {} byte line, the limit is {MAX_PAYLOAD_LEN}",
            line.len()
        );
        None
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let mut connections = Vec::with_capacity(cli.servers.len());
    for server in &cli.servers {
        let stream = TcpStream::connect(server)
            .await
            .with_context(|| format!("failed to connect to {server}"))?;
        log::info!("connected to {server}");
        connections.push((server.as_str(), stream));
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.starts_with('X') {
            break;
        }

        let Some(frame) = frame_for(&line) else {
            continue;
        };
        for (server, stream) in &mut connections {
            write_frame(stream, &frame)
                .await
                .with_context(|| format!("failed to send to {server}"))?;
        }
    }

    log::info!("session ended");
    Ok(())
}
