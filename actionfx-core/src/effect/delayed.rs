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

use crate::effect::timer::{halt_timer, trigger_timer, TimerConfig, TimerDriver, TimerHooks};
use crate::common::{EffectId, EffectIds};
use crate::tool::Tool;
use crate::traits::{ToolEffect, TriggerPoint};

/// After a delay period, activates all of the effects in the list.
///
/// Built on the timer machinery: the delay follows the timer's restart and
/// interrupt-group rules. Cancellation deliberately bypasses the timer's
/// cancel path: a delayed effect that never fired notifies its children
/// that it failed, not that it ended normally.
#[derive(Debug)]
pub struct DelayedEffects {
    driver: TimerDriver,
    /// Are we triggering the children's use or end-use paths?
    fx_trigger: TriggerPoint,
    sub_effects: Vec<Arc<dyn ToolEffect>>,
}

impl DelayedEffects {
    /// Builds a shared delayed-fanout effect.
    pub fn new(
        ids: &EffectIds,
        config: TimerConfig,
        fx_trigger: TriggerPoint,
        sub_effects: Vec<Arc<dyn ToolEffect>>,
    ) -> Arc<Self> {
        let id = ids.allocate::<Self>();
        Arc::new(Self {
            driver: TimerDriver::new(id, config),
            fx_trigger,
            sub_effects,
        })
    }
}

#[async_trait]
impl TimerHooks for DelayedEffects {
    fn driver(&self) -> &TimerDriver {
        &self.driver
    }

    async fn on_end_timer(self: Arc<Self>, tool: &Tool) {
        if self.fx_trigger == TriggerPoint::OnUse {
            for effect in &self.sub_effects {
                effect.clone().on_use(tool).await;
            }
        } else {
            for effect in &self.sub_effects {
                effect.clone().on_end_use(tool).await;
            }
        }
    }
}

#[async_trait]
impl ToolEffect for DelayedEffects {
    fn id(&self) -> EffectId {
        self.driver.id()
    }

    async fn on_use(self: Arc<Self>, tool: &Tool) {
        trigger_timer(self, tool, TriggerPoint::OnUse).await;
    }

    async fn on_end_use(self: Arc<Self>, tool: &Tool) {
        trigger_timer(self, tool, TriggerPoint::OnEndUse).await;
    }

    async fn on_use_failed(self: Arc<Self>, tool: &Tool) {
        trigger_timer(self, tool, TriggerPoint::OnFailed).await;
    }

    async fn on_cancel_use(self: Arc<Self>, tool: &Tool) {
        for effect in &self.sub_effects {
            effect.clone().on_use_failed(tool).await;
        }
    }

    async fn on_reset_use(self: Arc<Self>, tool: &Tool) {
        halt_timer(self.as_ref(), tool);
    }
}
