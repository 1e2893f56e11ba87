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

//! # ActionFx
//!
//! This crate provides a use-lifecycle engine for shareable tool behaviors,
//! built on top of Tokio. One stateless effect definition (a weapon burst,
//! an interruptible cast timer, a charge-and-release attack) can be shared
//! across any number of independent tools, each tracking its own timing,
//! lock, and charge state.
//!
//! ## Key Concepts
//!
//! - **Tools (`Tool`)**: Per-actor action controllers deciding whether an
//!   invocation is permitted, locked, or failed, and driving the ordered
//!   effect passes.
//! - **Effects (`ToolEffect`)**: Shared, immutable definitions. All
//!   per-tool state lives in the tool's `VariableStore`, keyed by the
//!   definition's `EffectId`.
//! - **Signals (`ToolSignal`)**: Every observable outcome (use, end-use,
//!   failure, lock rejection, cancellation, effect completion) is a
//!   signal; there is no error-code surface on the use path.
//! - **Timers & interrupt groups**: Cancellable single-fire waits; timers
//!   sharing a group on one tool preempt each other, and preemption runs
//!   the preempted run's end path rather than dropping it.
//! - **Charge levels**: Curve-driven integer levels for charge-and-release
//!   dispatch.
//! - **Runtime (`ActionFxApp` / `ActionFxRuntime`)**: The composition root
//!   owning definition-id allocation and configuration defaults.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use actionfx::prelude::*;
//!
//! let runtime = ActionFxApp::launch();
//! let ids = runtime.effect_ids();
//! let burst = CommonEffect::new(&ids, TriggerPoint::OnUse, |_tool| ToolReply::ready());
//! let pistol = runtime
//!     .new_tool("pistol")
//!     .owner("player")
//!     .lock_mode(LockMode::SemiAuto)
//!     .reuse_delay(1.0)
//!     .semi_reuse_delay(0.2)
//!     .use_effect(burst)
//!     .start();
//! pistol.begin_use().await;
//! ```

/// A prelude module for conveniently importing the most commonly used
/// items.
pub mod prelude {
    pub use actionfx_core::prelude::*;
}
