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

use std::sync::Arc;

use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{instrument, trace};

use crate::common::{EffectId, EffectIds};
use crate::tool::{secs, AimMode, LockMode, Tool, Vec3};
use crate::traits::ToolEffect;

/// The lifecycle rules a [`ToolOverride`] imposes on its host tool.
#[derive(Debug, Clone, Default)]
pub struct OverrideConfig {
    /// Lock behavior enforced by the override.
    pub lock_mode: LockMode,
    /// Delay between uses, in seconds.
    pub reuse_delay: f32,
    /// Semi-auto delay between uses while locked, in seconds.
    pub semi_reuse_delay: f32,
    /// Aim configuration pushed onto the host tool.
    pub aim_mode: AimMode,
    /// Aim offset pushed onto the host tool.
    pub aim_offset: Vec3,
    /// Mirror the aim offset on the x-axis.
    pub mirror_aim_offset: bool,
}

/// Re-parents a tool's use-lifecycle rules.
///
/// Lets a single tool represent a skill or weapon configured entirely by
/// an effect definition: on enable the override pushes its aim
/// configuration onto the host, forces the host to full-auto with no
/// delay, and disables the host's self-locking and self-timing so the two
/// rule sets never double-gate. The override then applies its own lock
/// mode and reuse delays against the host's shared lock/timing state and
/// runs its own private ordered effect list. An override is itself an
/// effect, so it composes; it can sit inside any collection.
#[derive(Debug)]
pub struct ToolOverride {
    id: EffectId,
    config: OverrideConfig,
    use_effects: Vec<Arc<dyn ToolEffect>>,
}

impl ToolOverride {
    /// Builds a shared override definition.
    pub fn new(
        ids: &EffectIds,
        config: OverrideConfig,
        use_effects: Vec<Arc<dyn ToolEffect>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            id: ids.allocate::<Self>(),
            config,
            use_effects,
        })
    }

    /// Takes the host's locked state into account when returning the
    /// delay time.
    fn effective_reuse_delay(&self, tool: &Tool) -> f32 {
        if tool.is_locked() {
            self.config.semi_reuse_delay
        } else {
            self.config.reuse_delay
        }
    }

    /// The override's version of the use gate, evaluated against the
    /// host's shared lock and timing state.
    fn check_lock_state(&self, tool: &Tool) -> bool {
        // Guards against early invocation before the actor is wired up.
        if tool.owner().is_none() {
            return false;
        }

        if self.config.lock_mode == LockMode::Toggle && tool.is_locked() {
            return false;
        }

        // Only lock out in manual mode; semi-auto adjusts the reuse delay.
        if self.config.lock_mode == LockMode::Manual && tool.is_locked() {
            tool.signal_locked();
            return false;
        }

        let now = Instant::now();
        if let Some(last) = tool.last_use_time() {
            if now.duration_since(last) < secs(self.effective_reuse_delay(tool)) {
                // Normal rate limiting: no failure, no lock.
                return false;
            }
        }
        tool.stamp_last_use();
        true
    }
}

#[async_trait]
impl ToolEffect for ToolOverride {
    fn id(&self) -> EffectId {
        self.id
    }

    async fn on_use(self: Arc<Self>, tool: &Tool) {
        if !self.check_lock_state(tool) {
            return;
        }

        for effect in &self.use_effects {
            if tool.has_failed() {
                break;
            }
            effect.clone().on_use(tool).await;
        }

        if self.config.lock_mode != LockMode::FullAuto {
            tool.set_locked(true);
        }
    }

    async fn on_end_use(self: Arc<Self>, tool: &Tool) {
        if self.config.lock_mode == LockMode::Toggle {
            tool.set_locked(false);
        }

        for effect in &self.use_effects {
            if tool.has_failed() {
                break;
            }
            effect.clone().on_end_use(tool).await;
        }
    }

    async fn on_use_failed(self: Arc<Self>, tool: &Tool) {
        for effect in &self.use_effects {
            effect.clone().on_use_failed(tool).await;
        }
    }

    #[instrument(skip(self, tool), fields(effect = %self.id, tool = %tool.id()))]
    fn tool_enabled(&self, tool: &Tool) {
        trace!("override taking over tool lifecycle rules");
        tool.update_settings(|settings| {
            settings.aim_mode = self.config.aim_mode;
            settings.aim_offset = self.config.aim_offset;
            settings.mirror_aim_offset = self.config.mirror_aim_offset;
            settings.lock_mode = LockMode::FullAuto;
            settings.reuse_delay = 0.0;
        });
        tool.set_disable_self_locking(true);
        tool.set_disable_self_timing(true);
    }
}
