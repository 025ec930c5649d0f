// Copyright 2026 BadCompany
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Message Transport Codec.
//!
//! Newline-delimited JSON framing for `MessageEvent`s delivered to the host
//! from another process. Malformed lines are surfaced as `Frame::Malformed`
//! instead of errors so one bad sender line does not end the stream; only an
//! oversized frame is fatal.

use crate::bootstrap_core::constants::limits;
use crate::bootstrap_core::models::MessageEvent;
use anyhow::{anyhow, Result};
use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};
use tracing::trace;

#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Message(MessageEvent),
    Malformed(String),
}

pub struct MessageCodec {
    // Bytes already scanned for a newline in the current buffer
    scanned: usize,
}

impl MessageCodec {
    #[must_use]
    pub fn new() -> Self {
        Self { scanned: 0 }
    }
}

impl Default for MessageCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for MessageCodec {
    type Item = Frame;
    type Error = anyhow::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        loop {
            let newline = src[self.scanned..].iter().position(|b| *b == b'\n');

            let Some(offset) = newline else {
                if src.len() as u64 > limits::MAX_MESSAGE_SIZE_BYTES {
                    return Err(anyhow!(
                        "Message exceeded size limit of {} bytes",
                        limits::MAX_MESSAGE_SIZE_BYTES
                    ));
                }
                self.scanned = src.len();
                return Ok(None);
            };

            let line = src.split_to(self.scanned + offset + 1);
            self.scanned = 0;

            let body = trim_line(&line);
            if body.is_empty() {
                continue;
            }
            if body.len() as u64 > limits::MAX_MESSAGE_SIZE_BYTES {
                return Err(anyhow!("Message length {} exceeds max limit", body.len()));
            }

            trace!("Decoding {} byte message frame", body.len());
            return Ok(Some(match serde_json::from_slice::<MessageEvent>(body) {
                Ok(event) => Frame::Message(event),
                Err(e) => Frame::Malformed(e.to_string()),
            }));
        }
    }

    // A final line without a trailing newline still counts
    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        if let Some(frame) = self.decode(src)? {
            return Ok(Some(frame));
        }
        if src.is_empty() {
            return Ok(None);
        }
        src.extend_from_slice(b"\n");
        self.decode(src)
    }
}

impl<'a> Encoder<&'a MessageEvent> for MessageCodec {
    type Error = anyhow::Error;

    fn encode(&mut self, item: &'a MessageEvent, dst: &mut BytesMut) -> Result<()> {
        let body = serde_json::to_vec(item)?;
        dst.reserve(body.len() + 1);
        dst.extend_from_slice(&body);
        dst.extend_from_slice(b"\n");
        Ok(())
    }
}

fn trim_line(line: &[u8]) -> &[u8] {
    let mut end = line.len();
    while end > 0 && (line[end - 1] == b'\n' || line[end - 1] == b'\r') {
        end -= 1;
    }
    let start = line[..end]
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(end);
    &line[start..end]
}
