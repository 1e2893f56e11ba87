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

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

use crate::common::EffectId;
use crate::tool::Tool;

/// Which lifecycle event activates an effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerPoint {
    /// Activate when the tool is used.
    #[default]
    OnUse,
    /// Activate when the tool's use ends.
    OnEndUse,
    /// Activate when a use attempt fails.
    OnFailed,
}

/// A shareable unit of tool behavior.
///
/// One definition may be referenced by any number of tools concurrently,
/// so implementations hold immutable configuration only; anything mutable
/// and per-tool goes through the tool's
/// [`VariableStore`](crate::common::VariableStore), keyed by
/// [`EffectId::var`](crate::common::EffectId::var). Methods take
/// `Arc<Self>` so a definition can move an owned reference of itself into
/// a scheduled continuation (timers do exactly that).
///
/// The default `on_reset_use` forwards to `on_end_use`; variants whose
/// reset must be a hard stop (timers) override it.
#[async_trait]
pub trait ToolEffect: Debug + Send + Sync {
    /// This definition's identity, assigned once at construction.
    fn id(&self) -> EffectId;

    /// Invoked during a tool's use pass.
    async fn on_use(self: Arc<Self>, tool: &Tool);

    /// Invoked during a tool's end-use pass.
    async fn on_end_use(self: Arc<Self>, tool: &Tool);

    /// Invoked during a failed-effect pass. Every effect in the list
    /// receives this, including ones the aborted pass never reached.
    async fn on_use_failed(self: Arc<Self>, _tool: &Tool) {}

    /// Invoked during a cancel pass.
    async fn on_cancel_use(self: Arc<Self>, _tool: &Tool) {}

    /// Resets any in-flight per-tool state for this definition.
    async fn on_reset_use(self: Arc<Self>, tool: &Tool) {
        self.on_end_use(tool).await;
    }

    /// The hosting tool came online (or its effects were re-enabled).
    fn tool_enabled(&self, _tool: &Tool) {}

    /// The hosting tool went offline.
    fn tool_disabled(&self, _tool: &Tool) {}

    /// The hosting tool is being destroyed.
    fn tool_destroyed(&self, _tool: &Tool) {}
}
