use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Message id carrying text commands. Other ids are not for us.
pub const GAME_MESSAGE_ID: u32 = 32;
pub const MAX_PAYLOAD_LEN: u32 = 64 * 1024;

/// One message on the wire: `u32` id, `u32` length, then the payload,
/// integers big-endian.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub message_id: u32,
    pub payload: Vec<u8>,
}

impl Frame {
    pub fn game(text: &str) -> Self {
        Self {
            message_id: GAME_MESSAGE_ID,
            payload: text.as_bytes().to_vec(),
        }
    }

    pub fn fits(&self) -> bool {
        self.payload.len() <= MAX_PAYLOAD_LEN as usize
    }

    /// Payload as text, without trailing NULs or line endings.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.payload)
            .trim_end_matches(['\0', '\r', '\n'])
            .to_string()
    }
}

fn oversized(length: usize) -> std::io::Error {
    std::io::Error::new(
        std::io::ErrorKind::InvalidData,
        format!("payload of {length} bytes exceeds {MAX_PAYLOAD_LEN}"),
    )
}

pub async fn read_frame<R: AsyncRead + Unpin>(reader: &mut R) -> std::io::Result<Frame> {
    let message_id = reader.read_u32().await?;
    let length = reader.read_u32().await?;
    if length > MAX_PAYLOAD_LEN {
        return Err(oversized(length as usize));
    }

    let mut payload = vec![0u8; length as usize];
    reader.read_exact(&mut payload).await?;

    Ok(Frame {
        message_id,
        payload,
    })
}

pub async fn write_frame<W: AsyncWrite + Unpin>(
    writer: &mut W,
    frame: &Frame,
) -> std::io::Result<()> {
    let length = u32::try_from(frame.payload.len())
        .ok()
        .filter(|&length| length <= MAX_PAYLOAD_LEN)
        .ok_or_else(|| oversized(frame.payload.len()))?;

    writer.write_u32(frame.message_id).await?;
    writer.write_u32(length).await?;
    writer.write_all(&frame.payload).await?;
    writer.flush().await
}
