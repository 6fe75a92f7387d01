// workroom/workroom-wasm-utils
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::time::Duration;

use futures::{Stream, StreamExt};
use tokio::sync::mpsc::channel;

use crate::{sleep, spawn, ReceiverStream, SendUnlessWasm};

pub trait WorkroomStreamExt: Stream {
    /// Emits the most recent item once the upstream has been quiet for `window`. Every new item
    /// restarts the window, so a burst of items results in a single emission of the last one.
    /// A pending item is flushed when the upstream ends.
    fn debounced(self, window: Duration) -> ReceiverStream<Self::Item>
    where
        Self: Sized;
}

impl<T: Stream + SendUnlessWasm + 'static> WorkroomStreamExt for T
where
    T::Item: SendUnlessWasm,
{
    fn debounced(self, window: Duration) -> ReceiverStream<T::Item> {
        let (tx, rx) = channel(1);

        spawn(async move {
            let mut stream = Box::pin(self);
            let mut pending: Option<T::Item> = None;

            loop {
                let Some(item) = pending.take() else {
                    let Some(item) = stream.next().await else {
                        break;
                    };
                    pending = Some(item);
                    continue;
                };

                tokio::select! {
                    next = stream.next() => {
                        match next {
                            Some(newer) => pending = Some(newer),
                            None => {
                                _ = tx.send(item).await;
                                break;
                            }
                        }
                    }
                    _ = sleep(window) => {
                        if tx.send(item).await.is_err() {
                            break;
                        }
                    }
                }
            }
        });

        ReceiverStream::new(rx)
    }
}
