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

use tracing::{instrument, trace};

use crate::common::{CanUseHook, FutureBox, ToolId, CONFIG};
use crate::tool::tool_handle::Tool;
use crate::tool::{AimMode, LockMode, ToolSettings, Vec3};
use crate::traits::{ActionDependency, ToolEffect};

/// Configures a tool before it goes live.
///
/// Produced by [`ActionFxRuntime::new_tool`](crate::common::ActionFxRuntime::new_tool)
/// with settings seeded from the loaded configuration. `start()` builds
/// the [`Tool`] handle and enables its effects.
pub struct ToolBuilder {
    id: ToolId,
    owner: Option<String>,
    settings: ToolSettings,
    use_effects: Vec<Arc<dyn ToolEffect>>,
    init_effects: Vec<Arc<dyn ToolEffect>>,
    dependencies: Vec<Arc<dyn ActionDependency>>,
    can_use_hooks: Vec<CanUseHook>,
}

impl ToolBuilder {
    pub(crate) fn new(id: ToolId) -> Self {
        let owner = if CONFIG.defaults.owner.is_empty() {
            None
        } else {
            Some(CONFIG.defaults.owner.clone())
        };
        Self {
            id,
            owner,
            settings: ToolSettings::default(),
            use_effects: Vec::new(),
            init_effects: Vec::new(),
            dependencies: Vec::new(),
            can_use_hooks: Vec::new(),
        }
    }

    /// Sets the entity that owns this tool. An unowned tool ignores
    /// `begin_use` entirely.
    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Sets the lock behavior after a successful use.
    pub fn lock_mode(mut self, mode: LockMode) -> Self {
        self.settings.lock_mode = mode;
        self
    }

    /// Sets the delay between uses, in seconds.
    pub fn reuse_delay(mut self, seconds: f32) -> Self {
        self.settings.reuse_delay = seconds;
        self
    }

    /// Sets the locked-cadence delay between uses, in seconds.
    pub fn semi_reuse_delay(mut self, seconds: f32) -> Self {
        self.settings.semi_reuse_delay = seconds;
        self
    }

    /// Sets how long after a successful use its effects run, in seconds.
    pub fn effect_delay(mut self, seconds: f32) -> Self {
        self.settings.effect_delay = seconds;
        self
    }

    /// Sets the aim configuration carried by the tool.
    pub fn aim(mut self, mode: AimMode, offset: Vec3, mirror: bool) -> Self {
        self.settings.aim_mode = mode;
        self.settings.aim_offset = offset;
        self.settings.mirror_aim_offset = mirror;
        self
    }

    /// Appends a shared effect definition to the ordered use-effect list.
    pub fn use_effect(mut self, effect: Arc<dyn ToolEffect>) -> Self {
        self.use_effects.push(effect);
        self
    }

    /// Appends an effect driven only by `initialize_effects` /
    /// `cleanup_effects`.
    pub fn init_effect(mut self, effect: Arc<dyn ToolEffect>) -> Self {
        self.init_effects.push(effect);
        self
    }

    /// Appends a dependency gate. Gates run in registration order and
    /// short-circuit on the first rejection.
    pub fn dependency(mut self, dependency: Arc<dyn ActionDependency>) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// Registers a deferred can-use hook, awaited after the gates on every
    /// use attempt. The hook may veto via
    /// [`Tool::fail_use`](crate::tool::Tool::fail_use).
    pub fn on_can_use<F>(mut self, hook: F) -> Self
    where
        F: Fn(Tool) -> FutureBox + Send + Sync + 'static,
    {
        self.can_use_hooks.push(Box::new(hook));
        self
    }

    /// Builds the tool and enables its effects.
    #[instrument(skip(self), fields(tool = %self.id))]
    pub fn start(self) -> Tool {
        trace!(
            effects = self.use_effects.len(),
            dependencies = self.dependencies.len(),
            "starting tool"
        );
        let tool = Tool::assemble(
            self.id,
            self.owner,
            self.settings,
            self.use_effects,
            self.init_effects,
            self.dependencies,
            self.can_use_hooks,
        );
        tool.enable_effects();
        tool
    }
}

impl fmt::Debug for ToolBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolBuilder")
            .field("id", &self.id)
            .field("settings", &self.settings)
            .field("use_effects", &self.use_effects.len())
            .field("init_effects", &self.init_effects.len())
            .field("dependencies", &self.dependencies.len())
            .finish()
    }
}
