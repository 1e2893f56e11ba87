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

//! Defines common type aliases for futures and hooks used within
//! `actionfx-core`.
//!
//! This module centralizes the boxed-future signatures shared by can-use
//! hooks, effect process callbacks, and timer end paths.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::tool::Tool;

/// A pinned, boxed, dynamically dispatched future with `Output = ()`.
///
/// This is the return type for asynchronous hooks registered on a tool
/// (can-use vetoes, [`CommonEffect`](crate::effect::CommonEffect) process
/// callbacks) and for the deferred portions of timer effects. Build one
/// with [`ToolReply`](crate::common::ToolReply) rather than boxing by hand.
pub type FutureBox = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// A deferred can-use hook, awaited between dependency-gate evaluation and
/// the failure branch of a use pass.
///
/// The hook receives a clone of the tool and may call
/// [`Tool::fail_use`](crate::tool::Tool::fail_use) to veto the invocation.
/// Every registered hook completes before the controller inspects the
/// failed flag.
pub type CanUseHook = Box<dyn Fn(Tool) -> FutureBox + Send + Sync + 'static>;

/// The end-of-timer continuation held by an interrupt-group registration.
///
/// Preempting a timer runs this closure for the *preempted* definition, so
/// each registration carries its own end path.
pub type TimerFinish = Arc<dyn Fn(Tool) -> FutureBox + Send + Sync + 'static>;
