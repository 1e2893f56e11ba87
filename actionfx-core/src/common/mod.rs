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

//! Common utilities and structures shared by the tool controller and the
//! effect graph.

pub use app::{ActionFxApp, ActionFxRuntime};
pub use config::{ActionFxConfig, CONFIG};
pub use ids::{EffectId, EffectIds, ToolId};
pub use interrupts::{interrupt_groups, InterruptGroups, TimerRun, INTERRUPT_GROUPS_KEY};
pub use reply::ToolReply;
pub use scheduler::{Scheduler, TaskHandle};
pub use types::{CanUseHook, FutureBox, TimerFinish};
pub use variable_store::VariableStore;

mod app;
mod config;
mod ids;
mod interrupts;
mod reply;
mod scheduler;
mod types;
mod variable_store;
