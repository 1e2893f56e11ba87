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

//! Entry point and composition root for the ActionFx engine.

use std::sync::Arc;

use tracing::{instrument, trace};

use crate::common::ids::ToolIds;
use crate::common::{EffectIds, CONFIG};
use crate::tool::ToolBuilder;

/// Entry point for initializing the ActionFx engine.
#[derive(Debug, Clone, Copy)]
pub struct ActionFxApp;

impl ActionFxApp {
    /// Launches a runtime: the composition root that owns definition-id
    /// allocation and seeds new tools from the loaded configuration.
    #[instrument]
    pub fn launch() -> ActionFxRuntime {
        trace!(config = ?*CONFIG, "launching actionfx runtime");
        ActionFxRuntime::default()
    }
}

/// Represents an initialized ActionFx runtime.
///
/// Owns the [`EffectIds`] allocator, so effect definitions built against
/// one runtime carry ids deterministic for that runtime, and hands
/// out [`ToolBuilder`]s seeded from the global configuration.
#[derive(Debug, Default)]
pub struct ActionFxRuntime {
    effect_ids: Arc<EffectIds>,
    tool_ids: Arc<ToolIds>,
}

impl ActionFxRuntime {
    /// The definition-id allocator for this runtime. Pass to effect
    /// constructors.
    pub fn effect_ids(&self) -> Arc<EffectIds> {
        self.effect_ids.clone()
    }

    /// Begins configuring a new tool with the given name, seeded from
    /// [`CONFIG`](crate::common::CONFIG) defaults.
    #[instrument(skip(self))]
    pub fn new_tool(&self, name: &str) -> ToolBuilder {
        let id = self.tool_ids.allocate(name);
        trace!(tool = %id, "creating tool builder");
        ToolBuilder::new(id)
    }
}
