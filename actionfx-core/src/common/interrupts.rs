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

//! Cross-definition timer preemption registry.
//!
//! Timer effects that share a non-zero interrupt group on the same tool
//! preempt each other: starting one cancels the group's registered run and
//! fires that run's own end path immediately. The registry is one entry in
//! the tool's [`VariableStore`](crate::common::VariableStore) under a
//! fixed key shared by every timer-family definition, deliberately not
//! namespaced by definition id, because groups must cross different timer
//! instances. Group id `0` means "no grouping" and is never tracked.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;

use crate::common::types::TimerFinish;
use crate::common::{TaskHandle, VariableStore};

/// Fixed store key for the per-tool interrupt-group map.
pub const INTERRUPT_GROUPS_KEY: &str = "interrupt-groups";

/// One registered timer run: the scheduled continuation plus the owning
/// definition's end path, so preemption can finish the run it cancels.
#[derive(Clone)]
pub struct TimerRun {
    pub(crate) handle: TaskHandle,
    pub(crate) finish: TimerFinish,
}

impl TimerRun {
    pub(crate) fn new(handle: TaskHandle, finish: TimerFinish) -> Self {
        Self { handle, finish }
    }

    /// The scheduled continuation's handle.
    pub fn handle(&self) -> &TaskHandle {
        &self.handle
    }
}

impl fmt::Debug for TimerRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerRun")
            .field("handle", &self.handle)
            .finish()
    }
}

/// Per-tool map from interrupt-group id to the group's active run.
pub type InterruptGroups = Arc<DashMap<u32, TimerRun>>;

/// Returns the tool's interrupt-group map, lazily creating it on first
/// use.
pub fn interrupt_groups(vars: &VariableStore) -> InterruptGroups {
    vars.get::<InterruptGroups>(INTERRUPT_GROUPS_KEY)
}
