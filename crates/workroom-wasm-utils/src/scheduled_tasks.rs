// workroom/workroom-wasm-utils
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::future::Future;

use futures::future::{AbortHandle, Abortable};

use crate::{spawn, SendUnlessWasm};

/// A group of background tasks that are cancelled together.
///
/// Every task spawned through the group is wrapped in an `Abortable`, so cancelling works the same
/// way on tokio and in the browser. Dropping the group cancels all of its tasks.
#[derive(Debug, Default)]
pub struct ScheduledTasks {
    handles: Vec<AbortHandle>,
}

impl ScheduledTasks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn<F>(&mut self, future: F)
    where
        F: Future<Output = ()> + SendUnlessWasm + 'static,
    {
        let (handle, registration) = AbortHandle::new_pair();
        self.handles.push(handle);
        spawn(async move {
            _ = Abortable::new(future, registration).await;
        });
    }

    /// Spawns a task that runs `tick` every `period`. The first tick happens after one period
    /// unless `immediately` is set.
    pub fn spawn_repeating<F, Fut>(&mut self, period: std::time::Duration, immediately: bool, tick: F)
    where
        F: Fn() -> Fut + SendUnlessWasm + 'static,
        Fut: Future<Output = ()> + SendUnlessWasm + 'static,
    {
        self.spawn(async move {
            if immediately {
                tick().await;
            }
            loop {
                crate::sleep(period).await;
                tick().await;
            }
        })
    }

    /// Aborts all tasks of the group. Tasks are stopped at their next suspension point.
    pub fn cancel_all(&mut self) {
        for handle in self.handles.drain(..) {
            handle.abort();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl Drop for ScheduledTasks {
    fn drop(&mut self) {
        self.cancel_all()
    }
}
