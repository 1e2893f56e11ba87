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

//! Timer-family effects: single-fire waits with restart rules and
//! cross-definition interrupt groups.
//!
//! The state machine is shared by every timer-like variant through
//! [`TimerDriver`] and the free functions here; variants supply their
//! start/end hooks via [`TimerHooks`]. Cancellation is never silent (a
//! cancelled or preempted run still executes its end path), while
//! `on_reset_use` is the one hard stop. The end path is guarded by the
//! per-tool `started` flag, so a run can never finish twice.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::trace;

use crate::common::{
    interrupt_groups, EffectId, EffectIds, FutureBox, TimerFinish, TimerRun,
};
use crate::tool::Tool;
use crate::traits::{ToolEffect, TriggerPoint};

/// Immutable configuration for a timer-family effect.
#[derive(Debug, Clone)]
pub struct TimerConfig {
    /// Which lifecycle event starts the timer.
    pub trigger: TriggerPoint,
    /// How long before the end path is invoked.
    pub wait_time: Duration,
    /// Can the timer be restarted while still counting down? A restart
    /// cancels the running instance (its end path fires) before
    /// rescheduling; without it, triggers while running are ignored.
    pub allow_restart: bool,
    /// Timers sharing a non-zero group id on the same tool preempt each
    /// other. Zero means no grouping.
    pub interrupt_group: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            trigger: TriggerPoint::OnUse,
            wait_time: Duration::ZERO,
            allow_restart: false,
            interrupt_group: 0,
        }
    }
}

/// Per-definition timer bookkeeping: the configuration plus the variable
/// keys tracking the run state on each tool.
#[derive(Debug)]
pub struct TimerDriver {
    id: EffectId,
    config: TimerConfig,
    started_key: String,
    run_key: String,
}

impl TimerDriver {
    /// Binds timer state to the owning definition's id.
    pub fn new(id: EffectId, config: TimerConfig) -> Self {
        Self {
            id,
            config,
            started_key: id.var("started"),
            run_key: id.var("run"),
        }
    }

    /// The owning definition's identity.
    pub fn id(&self) -> EffectId {
        self.id
    }

    /// The timer configuration.
    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    /// Whether this definition has a run in flight on `tool`.
    pub fn is_started(&self, tool: &Tool) -> bool {
        tool.vars().get::<bool>(&self.started_key)
    }
}

/// Extension hooks for timer-family effects.
///
/// Implementors expose their [`TimerDriver`] and get the shared trigger,
/// restart, preemption, and end-path machinery from the free functions in
/// this module.
#[async_trait]
pub trait TimerHooks: ToolEffect {
    /// The per-definition timer bookkeeping.
    fn driver(&self) -> &TimerDriver;

    /// Invoked when a run is scheduled.
    async fn on_start_timer(self: Arc<Self>, _tool: &Tool) {}

    /// Invoked when a run ends: natural fire, explicit cancel, or
    /// preemption.
    async fn on_end_timer(self: Arc<Self>, _tool: &Tool) {}
}

/// Routes a lifecycle event into the timer state machine: starts a run if
/// the trigger point matches and the restart rule allows it.
pub async fn trigger_timer<T>(fx: Arc<T>, tool: &Tool, at: TriggerPoint)
where
    T: TimerHooks + 'static,
{
    let config = fx.driver().config();
    if config.trigger != at {
        return;
    }
    if !config.allow_restart && fx.driver().is_started(tool) {
        trace!(effect = %fx.id(), "timer already running, trigger ignored");
        return;
    }
    start_timer(fx, tool).await;
}

/// Starts (or restarts) a run: cancels the previous run when restarting,
/// preempts any registered run in the same interrupt group, invokes the
/// start hook, and schedules the end path after the configured wait.
pub async fn start_timer<T>(fx: Arc<T>, tool: &Tool)
where
    T: TimerHooks + 'static,
{
    if fx.driver().config().allow_restart {
        cancel_timer(fx.clone(), tool).await;
    }

    // Preemption is not a silent drop: the preempted run's own end path
    // fires before the new run begins counting.
    let group = fx.driver().config().interrupt_group;
    if group != 0 {
        let groups = interrupt_groups(tool.vars());
        if let Some((_, run)) = groups.remove(&group) {
            trace!(group, effect = %fx.id(), "preempting interrupt group");
            run.handle().cancel();
            (run.finish)(tool.clone()).await;
        }
    }

    tool.vars().set(&fx.driver().started_key, true);
    fx.clone().on_start_timer(tool).await;

    let wait = fx.driver().config().wait_time;
    trace!(effect = %fx.id(), ?wait, "starting timer");
    let task_fx = fx.clone();
    let task_tool = tool.clone();
    let handle = tool.schedule(wait, async move {
        finish_timer(task_fx, task_tool).await;
    });

    let finish_fx = fx.clone();
    let finish: TimerFinish = Arc::new(move |tool: Tool| -> FutureBox {
        let fx = finish_fx.clone();
        Box::pin(async move {
            finish_timer(fx, tool).await;
        })
    });
    let run = TimerRun::new(handle, finish);
    tool.vars().set(&fx.driver().run_key, Some(run.clone()));
    if group != 0 {
        interrupt_groups(tool.vars()).insert(group, run);
    }
}

/// The end-of-timer path: clears the run state, invokes the end hook, and
/// signals the tool that this effect instance completed. Idempotent: a
/// run that already finished (or was hard-stopped) is left alone.
pub async fn finish_timer<T>(fx: Arc<T>, tool: Tool)
where
    T: TimerHooks + 'static,
{
    if !fx.driver().is_started(&tool) {
        return;
    }
    tool.vars().set(&fx.driver().started_key, false);
    fx.clone().on_end_timer(&tool).await;
    tool.signal_effect_callback(fx.id());
}

/// Cancels a previously started run. The schedule stops and the normal
/// end path still runs. If no run was in flight, nothing happens.
pub async fn cancel_timer<T>(fx: Arc<T>, tool: &Tool)
where
    T: TimerHooks + 'static,
{
    if fx.driver().is_started(tool) {
        if let Some(run) = tool.vars().get::<Option<TimerRun>>(&fx.driver().run_key) {
            run.handle().cancel();
        }
        finish_timer(fx, tool.clone()).await;
    }
}

/// Hard stop: the schedule is aborted and the run state cleared without
/// invoking the end hook or the completion signal.
pub fn halt_timer<T>(fx: &T, tool: &Tool)
where
    T: TimerHooks + ?Sized,
{
    if fx.driver().is_started(tool) {
        if let Some(run) = tool.vars().get::<Option<TimerRun>>(&fx.driver().run_key) {
            run.handle().cancel();
        }
        tool.vars().set(&fx.driver().started_key, false);
    }
}

/// Waits for a period of time before signaling the effect callback on the
/// tool. The plain timer variant; richer timers implement [`TimerHooks`]
/// themselves.
#[derive(Debug)]
pub struct Timer {
    driver: TimerDriver,
}

impl Timer {
    /// Builds a shared timer definition.
    pub fn new(ids: &EffectIds, config: TimerConfig) -> Arc<Self> {
        let id = ids.allocate::<Self>();
        Arc::new(Self {
            driver: TimerDriver::new(id, config),
        })
    }
}

#[async_trait]
impl TimerHooks for Timer {
    fn driver(&self) -> &TimerDriver {
        &self.driver
    }
}

#[async_trait]
impl ToolEffect for Timer {
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
        cancel_timer(self, tool).await;
    }

    async fn on_reset_use(self: Arc<Self>, tool: &Tool) {
        halt_timer(self.as_ref(), tool);
    }
}
