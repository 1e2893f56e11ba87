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
#![allow(dead_code)]

use std::time::Duration;

use actionfx::prelude::*;
use tokio::time::{self, Instant};

use crate::setup::{drain_signals, initialize_tracing, next_effect_callback, settle};

mod setup;

fn timer_config(wait_secs: u64) -> TimerConfig {
    TimerConfig {
        trigger: TriggerPoint::OnUse,
        wait_time: Duration::from_secs(wait_secs),
        allow_restart: false,
        interrupt_group: 0,
    }
}

/// A timer fires its end path, and the effect-callback signal, after
/// its wait time.
#[tokio::test(start_paused = true)]
async fn test_timer_fires_after_wait() {
    initialize_tracing();
    let runtime = ActionFxApp::launch();
    let ids = runtime.effect_ids();
    let timer = Timer::new(&ids, timer_config(5));
    let timer_id = timer.id();

    let tool = runtime
        .new_tool("fuse")
        .owner("player")
        .lock_mode(LockMode::FullAuto)
        .use_effect(timer)
        .start();
    let mut signals = tool.subscribe();

    let started_at = Instant::now();
    tool.begin_use().await;
    settle().await;

    let fired = next_effect_callback(&mut signals).await;
    assert_eq!(fired, timer_id);
    assert_eq!(started_at.elapsed(), Duration::from_secs(5));
}

/// With `allow_restart = false`, a second trigger while running neither
/// reschedules nor resets the remaining wait.
#[tokio::test(start_paused = true)]
async fn test_no_restart_ignores_second_trigger() {
    initialize_tracing();
    let runtime = ActionFxApp::launch();
    let ids = runtime.effect_ids();
    let timer = Timer::new(&ids, timer_config(5));

    let tool = runtime
        .new_tool("cooldown")
        .owner("player")
        .lock_mode(LockMode::FullAuto)
        .use_effect(timer)
        .start();
    let mut signals = tool.subscribe();

    let started_at = Instant::now();
    tool.begin_use().await;
    settle().await;

    time::advance(Duration::from_secs(2)).await;
    tool.begin_use().await;
    settle().await;

    next_effect_callback(&mut signals).await;
    assert_eq!(
        started_at.elapsed(),
        Duration::from_secs(5),
        "the original deadline must stand"
    );
    assert!(
        drain_signals(&mut signals).is_empty(),
        "exactly one end path"
    );
}

/// With `allow_restart = true`, retriggering cancels the running
/// instance (its end path fires) and restarts the wait.
#[tokio::test(start_paused = true)]
async fn test_restart_cancels_and_reschedules() {
    initialize_tracing();
    let runtime = ActionFxApp::launch();
    let ids = runtime.effect_ids();
    let mut config = timer_config(5);
    config.allow_restart = true;
    let timer = Timer::new(&ids, config);
    let timer_id = timer.id();

    let tool = runtime
        .new_tool("recharge")
        .owner("player")
        .lock_mode(LockMode::FullAuto)
        .use_effect(timer)
        .start();
    let mut signals = tool.subscribe();

    let started_at = Instant::now();
    tool.begin_use().await;
    settle().await;

    time::advance(Duration::from_secs(2)).await;
    tool.begin_use().await;

    // The cancelled run finished immediately at the restart.
    let first = next_effect_callback(&mut signals).await;
    assert_eq!(first, timer_id);
    assert_eq!(started_at.elapsed(), Duration::from_secs(2));

    settle().await;
    let second = next_effect_callback(&mut signals).await;
    assert_eq!(second, timer_id);
    assert_eq!(started_at.elapsed(), Duration::from_secs(7));
}

/// Two timers sharing an interrupt group on one tool: starting the second
/// cancels the first and fires its end path before the second starts
/// counting.
#[tokio::test(start_paused = true)]
async fn test_interrupt_group_preemption() {
    initialize_tracing();
    let runtime = ActionFxApp::launch();
    let ids = runtime.effect_ids();
    let slow = Timer::new(
        &ids,
        TimerConfig {
            trigger: TriggerPoint::OnUse,
            wait_time: Duration::from_secs(10),
            allow_restart: false,
            interrupt_group: 5,
        },
    );
    let fast = Timer::new(
        &ids,
        TimerConfig {
            trigger: TriggerPoint::OnUse,
            wait_time: Duration::from_secs(3),
            allow_restart: false,
            interrupt_group: 5,
        },
    );
    let slow_id = slow.id();
    let fast_id = fast.id();
    assert_ne!(slow_id, fast_id);

    let tool = runtime
        .new_tool("caster")
        .owner("player")
        .lock_mode(LockMode::FullAuto)
        .use_effect(slow)
        .use_effect(fast)
        .start();
    let mut signals = tool.subscribe();

    let started_at = Instant::now();
    tool.begin_use().await;

    // The slow timer registered first; the fast one preempted it within
    // the same pass, so the slow end path fired at t=0.
    let preempted = next_effect_callback(&mut signals).await;
    assert_eq!(preempted, slow_id);
    assert_eq!(started_at.elapsed(), Duration::ZERO);

    settle().await;
    let fired = next_effect_callback(&mut signals).await;
    assert_eq!(fired, fast_id);
    assert_eq!(
        started_at.elapsed(),
        Duration::from_secs(3),
        "the preempting timer counts from its own start"
    );
}

/// Cancelling a tool's use stops a running timer's schedule but still
/// runs the normal end-of-timer path.
#[tokio::test(start_paused = true)]
async fn test_cancel_use_finishes_running_timer() {
    initialize_tracing();
    let runtime = ActionFxApp::launch();
    let ids = runtime.effect_ids();
    let timer = Timer::new(&ids, timer_config(5));
    let timer_id = timer.id();

    let tool = runtime
        .new_tool("cast")
        .owner("player")
        .lock_mode(LockMode::FullAuto)
        .use_effect(timer)
        .start();
    let mut signals = tool.subscribe();

    let started_at = Instant::now();
    tool.begin_use().await;
    settle().await;
    time::advance(Duration::from_secs(1)).await;

    tool.cancel_use().await;
    let fired = next_effect_callback(&mut signals).await;
    assert_eq!(fired, timer_id);
    assert_eq!(started_at.elapsed(), Duration::from_secs(1));

    // The aborted schedule must not fire a second end path.
    settle().await;
    time::advance(Duration::from_secs(10)).await;
    settle().await;
    assert!(drain_signals(&mut signals).is_empty());
}

/// `reset_use` is a hard stop for timers: no end hook, no callback.
#[tokio::test(start_paused = true)]
async fn test_reset_hard_stops_timer() {
    initialize_tracing();
    let runtime = ActionFxApp::launch();
    let ids = runtime.effect_ids();
    let timer = Timer::new(&ids, timer_config(5));

    let tool = runtime
        .new_tool("winding")
        .owner("player")
        .lock_mode(LockMode::FullAuto)
        .use_effect(timer)
        .start();
    let mut signals = tool.subscribe();

    tool.begin_use().await;
    settle().await;
    drain_signals(&mut signals);

    tool.reset_use().await;
    settle().await;
    time::advance(Duration::from_secs(10)).await;
    settle().await;
    assert!(
        drain_signals(&mut signals).is_empty(),
        "a halted timer never finishes"
    );
}
