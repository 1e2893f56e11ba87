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

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::common::{EffectId, EffectIds, FutureBox};
use crate::tool::Tool;
use crate::traits::{ToolEffect, TriggerPoint};

/// Fires a single process callback on whichever lifecycle event matches
/// its configured trigger.
///
/// The building block for simple one-shot side effects. The callback
/// receives a clone of the invoking tool and returns a
/// [`FutureBox`](crate::common::FutureBox); use
/// [`ToolReply`](crate::common::ToolReply) for the common synchronous
/// case.
pub struct CommonEffect {
    id: EffectId,
    trigger: TriggerPoint,
    process: Box<dyn Fn(Tool) -> FutureBox + Send + Sync>,
}

impl CommonEffect {
    /// Builds a shared common effect with the given trigger and process
    /// callback.
    pub fn new<F>(ids: &EffectIds, trigger: TriggerPoint, process: F) -> Arc<Self>
    where
        F: Fn(Tool) -> FutureBox + Send + Sync + 'static,
    {
        Arc::new(Self {
            id: ids.allocate::<Self>(),
            trigger,
            process: Box::new(process),
        })
    }
}

impl fmt::Debug for CommonEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommonEffect")
            .field("id", &self.id)
            .field("trigger", &self.trigger)
            .finish()
    }
}

#[async_trait]
impl ToolEffect for CommonEffect {
    fn id(&self) -> EffectId {
        self.id
    }

    async fn on_use(self: Arc<Self>, tool: &Tool) {
        if self.trigger == TriggerPoint::OnUse {
            (self.process)(tool.clone()).await;
        }
    }

    async fn on_end_use(self: Arc<Self>, tool: &Tool) {
        if self.trigger == TriggerPoint::OnEndUse {
            (self.process)(tool.clone()).await;
        }
    }

    async fn on_use_failed(self: Arc<Self>, tool: &Tool) {
        if self.trigger == TriggerPoint::OnFailed {
            (self.process)(tool.clone()).await;
        }
    }
}
