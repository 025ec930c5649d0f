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

use futures_util::StreamExt;
use tokio::io::AsyncRead;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::codec::FramedRead;
use tracing::{debug, error, warn};

use crate::bootstrap_core::models::MessageEvent;
use crate::gate::codec::{Frame, MessageCodec};

/// Spawns a background task that frames `stream` into `MessageEvent`s and
/// feeds them to the gate. Ends on EOF, on a fatal framing error, or when the
/// receiving side is gone.
pub fn spawn_message_reader<R>(stream: R, tx: mpsc::Sender<MessageEvent>) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut framed = FramedRead::new(stream, MessageCodec::new());

        while let Some(result) = framed.next().await {
            match result {
                Ok(Frame::Message(event)) => {
                    if tx.send(event).await.is_err() {
                        break;
                    }
                }
                Ok(Frame::Malformed(reason)) => {
                    warn!("Dropping malformed message frame: {}", reason);
                }
                Err(e) => {
                    error!("Message framing error: {}", e);
                    break;
                }
            }
        }
        debug!("Message reader finished");
    })
}
