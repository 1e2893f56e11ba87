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

use crate::common::{EffectId, EffectIds};
use crate::tool::Tool;
use crate::traits::ToolEffect;

/// Simple container of a list of effects that should be treated as a
/// single effect.
///
/// Use and end-use fan out to the children in declared order; observing
/// the tool's failed flag mid-iteration aborts the remainder and switches
/// to a failed pass over this collection's whole child list. The failed
/// and cancel paths fan out unconditionally.
#[derive(Debug)]
pub struct EffectCollection {
    id: EffectId,
    sub_effects: Vec<Arc<dyn ToolEffect>>,
}

impl EffectCollection {
    /// Builds a shared collection over the given children.
    pub fn new(ids: &EffectIds, sub_effects: Vec<Arc<dyn ToolEffect>>) -> Arc<Self> {
        Arc::new(Self {
            id: ids.allocate::<Self>(),
            sub_effects,
        })
    }
}

#[async_trait]
impl ToolEffect for EffectCollection {
    fn id(&self) -> EffectId {
        self.id
    }

    async fn on_use(self: Arc<Self>, tool: &Tool) {
        for effect in &self.sub_effects {
            if tool.has_failed() {
                self.clone().on_use_failed(tool).await;
                return;
            }
            effect.clone().on_use(tool).await;
        }
    }

    async fn on_end_use(self: Arc<Self>, tool: &Tool) {
        for effect in &self.sub_effects {
            if tool.has_failed() {
                self.clone().on_use_failed(tool).await;
                return;
            }
            effect.clone().on_end_use(tool).await;
        }
    }

    async fn on_use_failed(self: Arc<Self>, tool: &Tool) {
        for effect in &self.sub_effects {
            effect.clone().on_use_failed(tool).await;
        }
    }

    async fn on_cancel_use(self: Arc<Self>, tool: &Tool) {
        for effect in &self.sub_effects {
            effect.clone().on_cancel_use(tool).await;
        }
    }
}
