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

use anyhow::bail;
use async_trait::async_trait;
use tracing::trace;

use crate::common::{EffectId, EffectIds};
use crate::effect::charged::{ChargedConfig, ChargedCore};
use crate::effect::collection::EffectCollection;
use crate::tool::Tool;
use crate::traits::{ToolEffect, TriggerPoint};

/// Indexes into an array of effect collections using the current charge
/// level.
///
/// On use the charge level picks which child collection executes; on
/// end-use the charge gate decides whether the end is legal, and the level
/// at that moment picks the child. End-of-charge dispatch reuses the
/// child's *use* entry point. The level index is clamped to the child
/// range: time past the curve's domain selects the last collection rather
/// than faulting.
#[derive(Debug)]
pub struct ChargedEffectCollection {
    id: EffectId,
    core: ChargedCore,
    sub_effects: Vec<Arc<EffectCollection>>,
}

impl ChargedEffectCollection {
    /// Builds a shared charged collection. The child list must not be
    /// empty.
    pub fn new(
        ids: &EffectIds,
        config: ChargedConfig,
        sub_effects: Vec<Arc<EffectCollection>>,
    ) -> anyhow::Result<Arc<Self>> {
        if sub_effects.is_empty() {
            bail!("a charged collection requires at least one child collection");
        }
        let id = ids.allocate::<Self>();
        Ok(Arc::new(Self {
            id,
            core: ChargedCore::new(id, config),
            sub_effects,
        }))
    }

    /// The charge state shared with custom charge-aware callers.
    pub fn core(&self) -> &ChargedCore {
        &self.core
    }

    fn level_index(&self, tool: &Tool) -> usize {
        let level = self.core.current_level(tool);
        let clamped = level.clamp(0, self.sub_effects.len() as i32 - 1) as usize;
        if clamped as i32 != level {
            trace!(effect = %self.id, level, clamped, "charge level clamped to child range");
        }
        clamped
    }
}

#[async_trait]
impl ToolEffect for ChargedEffectCollection {
    fn id(&self) -> EffectId {
        self.id
    }

    async fn on_use(self: Arc<Self>, tool: &Tool) {
        self.core.begin_charge(tool);
        if self.core.trigger() == TriggerPoint::OnUse {
            let index = self.level_index(tool);
            self.sub_effects[index].clone().on_use(tool).await;
        }
    }

    async fn on_end_use(self: Arc<Self>, tool: &Tool) {
        if self.core.can_end_use(tool) {
            let index = self.level_index(tool);
            self.sub_effects[index].clone().on_use(tool).await;
        }
        self.core.clear(tool);
    }

    async fn on_cancel_use(self: Arc<Self>, tool: &Tool) {
        self.core.cancel(tool);
    }
}
