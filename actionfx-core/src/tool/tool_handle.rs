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

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::Instant;
use tracing::{instrument, trace};

use crate::common::{CanUseHook, Scheduler, TaskHandle, ToolId, VariableStore};
use crate::message::{SignalHub, ToolSignal};
use crate::tool::{LockMode, ToolSettings, Vec3};
use crate::traits::{ActionDependency, ToolEffect};

/// Represents one useable tool: the actor-facing action controller.
///
/// A `Tool` is a cheap-clone handle; clones share the same state, so
/// scheduled continuations and effect callbacks can carry one into the
/// future. The effect definitions it references are shared and stateless;
/// their per-tool state lives in this tool's [`VariableStore`].
///
/// All use-lifecycle outcomes are reported through [`ToolSignal`]s and the
/// queryable state (`is_locked`, `in_use`, `has_failed`); none of the
/// lifecycle operations return a value.
#[derive(Clone)]
pub struct Tool {
    inner: Arc<ToolInner>,
}

pub(crate) struct ToolInner {
    id: ToolId,
    owner: Mutex<Option<String>>,
    settings: Mutex<ToolSettings>,
    locked: AtomicBool,
    failed: AtomicBool,
    disable_self_locking: AtomicBool,
    disable_self_timing: AtomicBool,
    effects_enabled: AtomicBool,
    last_use: Mutex<Option<Instant>>,
    use_effects: Vec<Arc<dyn ToolEffect>>,
    init_effects: Vec<Arc<dyn ToolEffect>>,
    dependencies: Vec<Arc<dyn ActionDependency>>,
    can_use_hooks: Vec<CanUseHook>,
    vars: VariableStore,
    scheduler: Scheduler,
    signals: SignalHub,
}

impl fmt::Debug for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tool").field("id", &self.inner.id).finish()
    }
}

/// Seconds-to-duration with negative values treated as zero.
pub(crate) fn secs(seconds: f32) -> Duration {
    Duration::from_secs_f32(seconds.max(0.0))
}

impl Tool {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn assemble(
        id: ToolId,
        owner: Option<String>,
        settings: ToolSettings,
        use_effects: Vec<Arc<dyn ToolEffect>>,
        init_effects: Vec<Arc<dyn ToolEffect>>,
        dependencies: Vec<Arc<dyn ActionDependency>>,
        can_use_hooks: Vec<CanUseHook>,
    ) -> Self {
        Self {
            inner: Arc::new(ToolInner {
                id,
                owner: Mutex::new(owner),
                settings: Mutex::new(settings),
                locked: AtomicBool::new(false),
                failed: AtomicBool::new(false),
                disable_self_locking: AtomicBool::new(false),
                disable_self_timing: AtomicBool::new(false),
                effects_enabled: AtomicBool::new(false),
                last_use: Mutex::new(None),
                use_effects,
                init_effects,
                dependencies,
                can_use_hooks,
                vars: VariableStore::default(),
                scheduler: Scheduler::default(),
                signals: SignalHub::default(),
            }),
        }
    }

    /// This tool's identity.
    pub fn id(&self) -> &ToolId {
        &self.inner.id
    }

    /// The entity that currently owns this tool, if any.
    pub fn owner(&self) -> Option<String> {
        self.inner.owner.lock().expect("owner lock poisoned").clone()
    }

    /// Assigns or clears the owning entity.
    pub fn set_owner(&self, owner: Option<String>) {
        *self.inner.owner.lock().expect("owner lock poisoned") = owner;
    }

    /// Registers a subscriber for this tool's signals.
    pub fn subscribe(&self) -> UnboundedReceiver<ToolSignal> {
        self.inner.signals.subscribe()
    }

    /// The tool's instanced variable store. Effect definitions keep all
    /// their per-tool state here.
    pub fn vars(&self) -> &VariableStore {
        &self.inner.vars
    }

    /// Schedules a cancellable continuation on this tool's scheduler.
    pub fn schedule<F>(&self, delay: Duration, task: F) -> TaskHandle
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.inner.scheduler.schedule_after(delay, task)
    }

    /// Waits for outstanding scheduled continuations; teardown helper.
    pub async fn drain_scheduled(&self) {
        self.inner.scheduler.shutdown().await;
    }

    /// A snapshot of the tool's current settings.
    pub fn settings(&self) -> ToolSettings {
        self.inner
            .settings
            .lock()
            .expect("settings lock poisoned")
            .clone()
    }

    /// Replaces the tool's settings wholesale. Used by override effects
    /// that re-parent the tool's lifecycle rules.
    pub fn apply_settings(&self, settings: ToolSettings) {
        *self.inner.settings.lock().expect("settings lock poisoned") = settings;
    }

    /// Mutates the tool's settings in place.
    pub fn update_settings(&self, update: impl FnOnce(&mut ToolSettings)) {
        let mut settings = self.inner.settings.lock().expect("settings lock poisoned");
        update(&mut settings);
    }

    /// The aim offset with bilateral mirroring applied.
    pub fn aim_offset(&self) -> Vec3 {
        self.settings().resolved_aim_offset()
    }

    /// Whether the tool is currently locked.
    pub fn is_locked(&self) -> bool {
        self.inner.locked.load(Ordering::SeqCst)
    }

    /// Directly sets the locked state. Override effects manage the lock
    /// themselves when self-locking is disabled.
    pub fn set_locked(&self, locked: bool) {
        self.inner.locked.store(locked, Ordering::SeqCst);
    }

    /// Resets the internal locked use state, independent of lock mode.
    pub fn lock_reset(&self) {
        self.inner.locked.store(false, Ordering::SeqCst);
    }

    /// Whether the last invocation's pass flagged a failure. Transient:
    /// cleared at the start of every pass.
    pub fn has_failed(&self) -> bool {
        self.inner.failed.load(Ordering::SeqCst)
    }

    /// Marks the in-flight invocation failed. Effects use this to stop
    /// subsequent effects from being processed; can-use hooks use it to
    /// veto a use before any effect runs.
    pub fn fail_use(&self) {
        self.inner.failed.store(true, Ordering::SeqCst);
    }

    /// Disables the tool's own lock writes so an override can manage them.
    pub fn set_disable_self_locking(&self, disabled: bool) {
        self.inner
            .disable_self_locking
            .store(disabled, Ordering::SeqCst);
    }

    /// Disables the tool's own reuse-delay gating so an override can
    /// manage it.
    pub fn set_disable_self_timing(&self, disabled: bool) {
        self.inner
            .disable_self_timing
            .store(disabled, Ordering::SeqCst);
    }

    /// When the tool last cleared its reuse gate.
    pub fn last_use_time(&self) -> Option<Instant> {
        *self.inner.last_use.lock().expect("last-use lock poisoned")
    }

    /// Stamps the reuse gate at `now`.
    pub fn stamp_last_use(&self) {
        *self.inner.last_use.lock().expect("last-use lock poisoned") = Some(Instant::now());
    }

    /// Takes the locked state into account when returning the delay time.
    pub fn effective_reuse_delay(&self) -> f32 {
        self.settings().effective_reuse_delay(self.is_locked())
    }

    /// Whether the tool is considered in use: toggled on, or still inside
    /// its reuse window.
    pub fn in_use(&self) -> bool {
        let settings = self.settings();
        if settings.lock_mode == LockMode::Toggle {
            return self.is_locked();
        }
        match self.last_use_time() {
            Some(last) => {
                Instant::now().duration_since(last)
                    < secs(settings.effective_reuse_delay(self.is_locked()))
            }
            None => false,
        }
    }

    /// Emits the `Locked` rejection signal. Override effects reuse this
    /// when their own manual-mode gate rejects a use.
    pub fn signal_locked(&self) {
        self.inner.signals.emit(ToolSignal::Locked);
    }

    /// Lets an effect tell this tool's subscribers that something
    /// happened with that effect. Timers emit this on their end path.
    pub fn signal_effect_callback(&self, effect: crate::common::EffectId) {
        self.inner.signals.emit(ToolSignal::EffectCallback(effect));
    }

    pub(crate) fn emit(&self, signal: ToolSignal) {
        self.inner.signals.emit(signal);
    }

    /// Attempts to use the tool.
    ///
    /// Gate order: owner guard, toggle/manual lock checks, reuse timing,
    /// dependency gates (in order, short-circuiting), deferred can-use
    /// hooks (awaited to completion). A failed attempt emits `UseFailed`
    /// and runs the failed-effect pass over the whole list; a successful
    /// one emits `Use`, runs the use pass (scheduling it instead when an
    /// effect delay is set), then locks per the lock mode. A use rejected by
    /// the reuse window or a toggle-active tool is a silent no-op, never
    /// a failure.
    #[instrument(skip(self), fields(tool = %self.inner.id))]
    pub async fn begin_use(&self) {
        // Guards against early invocation before the actor is wired up.
        if self.owner().is_none() {
            trace!("unowned tool, ignoring use");
            return;
        }

        let settings = self.settings();
        let locked = self.is_locked();

        if settings.lock_mode == LockMode::Toggle && locked {
            return;
        }

        // Manual mode locks out entirely; semi-auto adjusts the reuse
        // delay instead.
        if settings.lock_mode == LockMode::Manual && locked {
            self.emit(ToolSignal::Locked);
            return;
        }

        if !self.inner.disable_self_timing.load(Ordering::SeqCst) {
            let now = Instant::now();
            let window = secs(settings.effective_reuse_delay(locked));
            let mut last = self.inner.last_use.lock().expect("last-use lock poisoned");
            if let Some(previous) = *last {
                if now.duration_since(previous) < window {
                    // Normal rate limiting, not a failure.
                    trace!("reuse window not elapsed");
                    return;
                }
            }
            *last = Some(now);
        }

        self.inner.failed.store(false, Ordering::SeqCst);
        for dependency in &self.inner.dependencies {
            if !dependency.can_use(self) {
                self.fail_use();
                break;
            }
        }
        for hook in &self.inner.can_use_hooks {
            hook(self.clone()).await;
        }

        if self.has_failed() {
            trace!("use failed");
            self.emit(ToolSignal::UseFailed);
            self.run_failed_pass().await;
            return;
        }

        self.emit(ToolSignal::Use);
        let effect_delay = settings.effect_delay;
        if effect_delay > 0.0 {
            let tool = self.clone();
            self.schedule(secs(effect_delay), async move {
                tool.run_use_pass().await;
            });
        } else {
            self.run_use_pass().await;
        }

        if !self.inner.disable_self_locking.load(Ordering::SeqCst)
            && settings.lock_mode != LockMode::FullAuto
        {
            self.inner.locked.store(true, Ordering::SeqCst);
        }
    }

    /// Ends the tool's use: toggle tools unlock, the `EndUse` signal is
    /// emitted, and the end-use pass runs.
    #[instrument(skip(self), fields(tool = %self.inner.id))]
    pub async fn end_use(&self) {
        if !self.inner.disable_self_locking.load(Ordering::SeqCst)
            && self.settings().lock_mode == LockMode::Toggle
        {
            self.inner.locked.store(false, Ordering::SeqCst);
        }
        self.inner.failed.store(false, Ordering::SeqCst);
        self.emit(ToolSignal::EndUse);
        self.run_end_use_pass().await;
    }

    /// Aborts the tool's use without running the normal effects. Similar
    /// to `end_use` in that it unlocks a toggle tool, but effects receive
    /// their cancel path instead.
    #[instrument(skip(self), fields(tool = %self.inner.id))]
    pub async fn cancel_use(&self) {
        if !self.inner.disable_self_locking.load(Ordering::SeqCst)
            && self.settings().lock_mode == LockMode::Toggle
        {
            self.inner.locked.store(false, Ordering::SeqCst);
        }
        self.emit(ToolSignal::UseCancelled);
        self.run_cancel_pass().await;
    }

    /// Resets every effect in the list. The default reset of an effect is
    /// its end-use path; timer effects hard-stop instead.
    #[instrument(skip(self), fields(tool = %self.inner.id))]
    pub async fn reset_use(&self) {
        self.inner.failed.store(false, Ordering::SeqCst);
        for effect in &self.inner.use_effects {
            effect.clone().on_reset_use(self).await;
        }
    }

    /// Drives the init-effect list's use path. It is up to the caller to
    /// ensure this runs at the right time and the correct number of
    /// times.
    #[instrument(skip(self), fields(tool = %self.inner.id))]
    pub async fn initialize_effects(&self) {
        for effect in &self.inner.init_effects {
            effect.clone().on_use(self).await;
        }
    }

    /// Drives the init-effect list's end-use path.
    #[instrument(skip(self), fields(tool = %self.inner.id))]
    pub async fn cleanup_effects(&self) {
        self.inner.failed.store(false, Ordering::SeqCst);
        for effect in &self.inner.init_effects {
            effect.clone().on_end_use(self).await;
        }
    }

    /// Notifies every use effect that the tool is live. Idempotent until
    /// the next `disable_effects`.
    pub fn enable_effects(&self) {
        if !self.inner.effects_enabled.swap(true, Ordering::SeqCst) {
            for effect in &self.inner.use_effects {
                effect.tool_enabled(self);
            }
        }
    }

    /// Notifies every use effect that the tool went offline.
    pub fn disable_effects(&self) {
        if self.inner.effects_enabled.swap(false, Ordering::SeqCst) {
            for effect in &self.inner.use_effects {
                effect.tool_disabled(self);
            }
        }
    }

    /// Tears the tool down: effects are disabled and notified of
    /// destruction, and the owner is cleared.
    #[instrument(skip(self), fields(tool = %self.inner.id))]
    pub fn destroy(&self) {
        self.disable_effects();
        for effect in &self.inner.use_effects {
            effect.tool_destroyed(self);
        }
        self.set_owner(None);
    }

    pub(crate) async fn run_use_pass(&self) {
        self.inner.failed.store(false, Ordering::SeqCst);
        for effect in &self.inner.use_effects {
            if self.has_failed() {
                self.run_failed_pass().await;
                return;
            }
            effect.clone().on_use(self).await;
        }
    }

    pub(crate) async fn run_end_use_pass(&self) {
        self.inner.failed.store(false, Ordering::SeqCst);
        for effect in &self.inner.use_effects {
            if self.has_failed() {
                self.run_failed_pass().await;
                return;
            }
            effect.clone().on_end_use(self).await;
        }
    }

    // The cancel pass never re-enters the failed pass.
    pub(crate) async fn run_cancel_pass(&self) {
        self.inner.failed.store(false, Ordering::SeqCst);
        for effect in &self.inner.use_effects {
            effect.clone().on_cancel_use(self).await;
        }
    }

    // Runs over the entire list, including effects an aborted pass never
    // reached. Never re-enters itself.
    pub(crate) async fn run_failed_pass(&self) {
        self.inner.failed.store(false, Ordering::SeqCst);
        for effect in &self.inner.use_effects {
            effect.clone().on_use_failed(self).await;
        }
    }
}
