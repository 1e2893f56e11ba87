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
use rand::Rng;
use tracing::trace;

use crate::common::{EffectId, EffectIds};
use crate::tool::Tool;
use crate::traits::{ToolEffect, TriggerPoint};

/// Randomly uses one of the effects in the provided list.
///
/// On the configured trigger, one child is chosen uniformly and routed to
/// its use or end-use path per the sub-trigger. Cancellation instead fans
/// the failed path out to *every* child, since the unselected children must not
/// be left in an inconsistent state.
#[derive(Debug)]
pub struct RandomEffects {
    id: EffectId,
    /// Are we triggering on use or on end-use?
    fx_trigger: TriggerPoint,
    /// Which event is triggered on the chosen child?
    sub_trigger: TriggerPoint,
    choices: Vec<Arc<dyn ToolEffect>>,
}

impl RandomEffects {
    /// Builds a shared random-choice effect. The child list must not be
    /// empty.
    pub fn new(
        ids: &EffectIds,
        fx_trigger: TriggerPoint,
        sub_trigger: TriggerPoint,
        choices: Vec<Arc<dyn ToolEffect>>,
    ) -> anyhow::Result<Arc<Self>> {
        if choices.is_empty() {
            bail!("random effects require at least one choice");
        }
        Ok(Arc::new(Self {
            id: ids.allocate::<Self>(),
            fx_trigger,
            sub_trigger,
            choices,
        }))
    }

    async fn process(&self, tool: &Tool) {
        let pick = {
            let mut rng = rand::rng();
            rng.random_range(0..self.choices.len())
        };
        trace!(effect = %self.id, pick, "random choice");
        let chosen = self.choices[pick].clone();
        if self.sub_trigger == TriggerPoint::OnUse {
            chosen.on_use(tool).await;
        } else {
            chosen.on_end_use(tool).await;
        }
    }
}

#[async_trait]
impl ToolEffect for RandomEffects {
    fn id(&self) -> EffectId {
        self.id
    }

    async fn on_use(self: Arc<Self>, tool: &Tool) {
        if self.fx_trigger == TriggerPoint::OnUse {
            self.process(tool).await;
        }
    }

    async fn on_end_use(self: Arc<Self>, tool: &Tool) {
        if self.fx_trigger == TriggerPoint::OnEndUse {
            self.process(tool).await;
        }
    }

    async fn on_cancel_use(self: Arc<Self>, tool: &Tool) {
        for effect in &self.choices {
            effect.clone().on_use_failed(tool).await;
        }
    }
}
