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

#![forbid(unsafe_code)]

//! ActionFx Core Library
//!
//! This library provides the use-lifecycle engine behind ActionFx: the
//! [`Tool`](crate::tool::Tool) action controller with its lock modes and
//! reuse timing, the composable effect graph ([`ToolEffect`](crate::traits::ToolEffect)
//! definitions shared across many tools), the per-tool
//! [`VariableStore`](crate::common::VariableStore) that keeps shared
//! definitions stateless, and the [`Scheduler`](crate::common::Scheduler)
//! used for delayed passes and interruptible timers.

/// Common utilities and structures used throughout the ActionFx engine.
pub(crate) mod common;

pub(crate) mod effect;
pub(crate) mod message;
pub(crate) mod tool;
/// Trait definitions used in the ActionFx engine.
pub(crate) mod traits;

/// Prelude module for convenient imports.
///
/// This module re-exports commonly used items from the `common`, `tool`,
/// `effect`, `message`, and `traits` modules, as well as the `async_trait`
/// attribute needed to implement [`ToolEffect`](crate::traits::ToolEffect).
pub mod prelude {
    pub use async_trait::async_trait;

    pub use crate::common::{
        ActionFxApp, ActionFxConfig, ActionFxRuntime, EffectId, EffectIds, FutureBox, Scheduler,
        TaskHandle, ToolId, ToolReply, VariableStore, CONFIG,
    };
    pub use crate::effect::{
        cancel_timer, finish_timer, halt_timer, start_timer, trigger_timer, ChargeCurve,
        ChargedConfig, ChargedCore, ChargedEffectCollection, CommonEffect, DelayedEffects,
        EffectCollection, OverrideConfig, RandomEffects, Rounding, Timer, TimerConfig,
        TimerDriver, TimerHooks, ToolOverride,
    };
    pub use crate::message::ToolSignal;
    pub use crate::tool::{AimMode, LockMode, Tool, ToolBuilder, ToolSettings, Vec3};
    pub use crate::traits::{ActionDependency, ToolEffect, TriggerPoint};
}
