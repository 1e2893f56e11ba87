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

//! The closed set of effect variants interpreting shared definitions
//! against per-tool state: one-shot processes, charge tracking, timers
//! with interrupt groups, and the collection/override composites.

pub use charged::{ChargeCurve, ChargedConfig, ChargedCore, Rounding};
pub use charged_collection::ChargedEffectCollection;
pub use collection::EffectCollection;
pub use common_effect::CommonEffect;
pub use delayed::DelayedEffects;
pub use random::RandomEffects;
pub use timer::{
    cancel_timer, finish_timer, halt_timer, start_timer, trigger_timer, Timer, TimerConfig,
    TimerDriver, TimerHooks,
};
pub use tool_override::{OverrideConfig, ToolOverride};

mod charged;
mod charged_collection;
mod collection;
mod common_effect;
mod delayed;
mod random;
mod timer;
mod tool_override;
