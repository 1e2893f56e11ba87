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

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::trace;

use crate::common::EffectId;

/// Lifecycle outcomes a tool reports to its subscribers.
///
/// Every observable outcome of a use/end-use/cancel invocation is a signal;
/// the controller has no error-code or exception surface. `Locked` is
/// distinct from `UseFailed`: a manual-mode tool that rejects a use while
/// locked emits `Locked` and never runs the failed-effect pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolSignal {
    /// A use invocation passed its gates; the use pass ran or is
    /// scheduled.
    Use,
    /// The tool's use ended normally.
    EndUse,
    /// A dependency gate or an in-flight effect vetoed the invocation.
    UseFailed,
    /// A manual-mode use was rejected because the tool is locked.
    Locked,
    /// The tool's use was cancelled externally.
    UseCancelled,
    /// An effect instance finished something; timers emit this on their
    /// end path so other systems can chain off completion.
    EffectCallback(EffectId),
}

/// Per-tool subscriber registry.
///
/// Subscribers receive every signal the tool emits, in emission order.
/// Closed receivers are dropped on the next emit.
#[derive(Debug, Default)]
pub(crate) struct SignalHub {
    subscribers: DashMap<u64, UnboundedSender<ToolSignal>>,
    next_id: AtomicU64,
}

impl SignalHub {
    /// Registers a new subscriber and returns its receiving half.
    pub(crate) fn subscribe(&self) -> UnboundedReceiver<ToolSignal> {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.subscribers.insert(id, tx);
        rx
    }

    /// Delivers `signal` to every live subscriber.
    pub(crate) fn emit(&self, signal: ToolSignal) {
        trace!(?signal, "emitting tool signal");
        self.subscribers
            .retain(|_, tx| tx.send(signal).is_ok());
    }
}
