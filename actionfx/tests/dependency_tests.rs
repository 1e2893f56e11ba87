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

use actionfx::prelude::*;

use crate::setup::{drain_signals, initialize_tracing, log_entries, Recorder, SwitchGate};

mod setup;

/// A rejecting gate fails the use: `UseFailed` fires and every effect in
/// the list receives the failed path, including ones positioned before
/// where the pass would have stopped, and none receives use.
#[tokio::test(start_paused = true)]
async fn test_gate_rejection_runs_failed_pass_over_whole_list() {
    initialize_tracing();
    let runtime = ActionFxApp::launch();
    let ids = runtime.effect_ids();
    let (first, first_log) = Recorder::new(&ids, "first");
    let (second, second_log) = Recorder::new(&ids, "second");
    let gate = SwitchGate::new(false);

    let tool = runtime
        .new_tool("gated")
        .owner("player")
        .lock_mode(LockMode::FullAuto)
        .use_effect(first)
        .use_effect(second)
        .dependency(gate)
        .start();
    let mut signals = tool.subscribe();

    tool.begin_use().await;
    assert_eq!(drain_signals(&mut signals), vec![ToolSignal::UseFailed]);
    assert_eq!(
        log_entries(&first_log),
        vec!["first:enabled", "first:use_failed"]
    );
    assert_eq!(
        log_entries(&second_log),
        vec!["second:enabled", "second:use_failed"]
    );
    assert!(!tool.has_failed(), "failed flag is transient");
}

/// Gates evaluate in registration order and short-circuit on the first
/// rejection.
#[tokio::test(start_paused = true)]
async fn test_gates_short_circuit_in_order() {
    initialize_tracing();
    let runtime = ActionFxApp::launch();
    let ids = runtime.effect_ids();
    let (effect, _log) = Recorder::new(&ids, "fx");
    let closed = SwitchGate::new(false);
    let open = SwitchGate::new(true);

    let tool = runtime
        .new_tool("vault")
        .owner("player")
        .lock_mode(LockMode::FullAuto)
        .use_effect(effect)
        .dependency(closed.clone())
        .dependency(open.clone())
        .start();

    tool.begin_use().await;
    assert_eq!(closed.queries(), 1);
    assert_eq!(open.queries(), 0, "later gates are skipped");

    closed.set_allow(true);
    tool.begin_use().await;
    assert_eq!(closed.queries(), 2);
    assert_eq!(open.queries(), 1);
}

/// A deferred can-use hook can veto the invocation before any effect
/// runs.
#[tokio::test(start_paused = true)]
async fn test_can_use_hook_veto() {
    initialize_tracing();
    let runtime = ActionFxApp::launch();
    let ids = runtime.effect_ids();
    let (effect, log) = Recorder::new(&ids, "fx");

    let tool = runtime
        .new_tool("jammed")
        .owner("player")
        .lock_mode(LockMode::FullAuto)
        .use_effect(effect)
        .on_can_use(|tool| {
            ToolReply::from_async(async move {
                tool.fail_use();
            })
        })
        .start();
    let mut signals = tool.subscribe();

    tool.begin_use().await;
    assert_eq!(drain_signals(&mut signals), vec![ToolSignal::UseFailed]);
    assert_eq!(log_entries(&log), vec!["fx:enabled", "fx:use_failed"]);
}

/// An effect flagging failure mid-pass aborts the remainder and switches
/// to a failed pass over the entire list.
#[tokio::test(start_paused = true)]
async fn test_mid_pass_failure_switches_to_failed_pass() {
    initialize_tracing();
    let runtime = ActionFxApp::launch();
    let ids = runtime.effect_ids();
    let (before, before_log) = Recorder::new(&ids, "before");
    let (after, after_log) = Recorder::new(&ids, "after");
    let saboteur = CommonEffect::new(&ids, TriggerPoint::OnUse, |tool| {
        tool.fail_use();
        ToolReply::ready()
    });

    let tool = runtime
        .new_tool("misfire")
        .owner("player")
        .lock_mode(LockMode::FullAuto)
        .use_effect(before)
        .use_effect(saboteur)
        .use_effect(after)
        .start();
    let mut signals = tool.subscribe();

    tool.begin_use().await;
    // The use itself succeeded; the failure happened inside the pass.
    assert_eq!(drain_signals(&mut signals), vec![ToolSignal::Use]);
    assert_eq!(
        log_entries(&before_log),
        vec!["before:enabled", "before:use", "before:use_failed"]
    );
    assert_eq!(
        log_entries(&after_log),
        vec!["after:enabled", "after:use_failed"],
        "effects after the failure never get the use path"
    );
    assert!(!tool.has_failed());
}

/// The cancel pass reaches every effect and never runs a failed pass.
#[tokio::test(start_paused = true)]
async fn test_cancel_pass_is_plain_iteration() {
    initialize_tracing();
    let runtime = ActionFxApp::launch();
    let ids = runtime.effect_ids();
    let (first, first_log) = Recorder::new(&ids, "first");
    let (second, second_log) = Recorder::new(&ids, "second");

    let tool = runtime
        .new_tool("aborted")
        .owner("player")
        .lock_mode(LockMode::Toggle)
        .use_effect(first)
        .use_effect(second)
        .start();
    let mut signals = tool.subscribe();

    tool.begin_use().await;
    tool.cancel_use().await;
    assert!(!tool.is_locked(), "cancel unlocks a toggle tool");
    assert_eq!(
        drain_signals(&mut signals),
        vec![ToolSignal::Use, ToolSignal::UseCancelled]
    );
    assert_eq!(
        log_entries(&first_log),
        vec!["first:enabled", "first:use", "first:cancel_use"]
    );
    assert_eq!(
        log_entries(&second_log),
        vec!["second:enabled", "second:use", "second:cancel_use"]
    );
}
