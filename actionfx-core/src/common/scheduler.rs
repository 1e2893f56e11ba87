/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

//! Cancellable single-fire delayed continuations.
//!
//! Each tool owns one [`Scheduler`]. Delayed use passes and timer effects
//! register a continuation here instead of blocking: the continuation runs
//! on the tool's runtime after the delay, or never, if its [`TaskHandle`]
//! is cancelled first.

use std::future::Future;
use std::time::Duration;

use tokio::task::AbortHandle;
use tokio_util::task::TaskTracker;
use tracing::trace;

/// Handle to one scheduled continuation.
///
/// Cloneable so timer bookkeeping (the per-definition run slot and the
/// interrupt-group registry) can share it. Cancelling an already-fired
/// continuation is a no-op.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    abort: AbortHandle,
}

impl TaskHandle {
    /// Stops the continuation before it fires. Nothing runs on this path;
    /// callers that need end-of-timer semantics invoke those themselves.
    pub fn cancel(&self) {
        self.abort.abort();
    }

    /// Whether the continuation has already run (or been cancelled).
    pub fn is_finished(&self) -> bool {
        self.abort.is_finished()
    }
}

/// Schedules cancellable, single-fire delayed continuations on the
/// current runtime.
#[derive(Debug, Default)]
pub struct Scheduler {
    tracker: TaskTracker,
}

impl Scheduler {
    /// Runs `task` after `delay`. A zero delay still yields to the
    /// runtime; callers that need inline execution simply do not schedule.
    pub fn schedule_after<F>(&self, delay: Duration, task: F) -> TaskHandle
    where
        F: Future<Output = ()> + Send + 'static,
    {
        trace!(?delay, "scheduling continuation");
        let handle = self.tracker.spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            task.await;
        });
        TaskHandle {
            abort: handle.abort_handle(),
        }
    }

    /// Waits for every outstanding continuation to finish or be cancelled.
    /// Further scheduling is rejected once called; intended for teardown.
    pub async fn shutdown(&self) {
        self.tracker.close();
        self.tracker.wait().await;
    }
}
