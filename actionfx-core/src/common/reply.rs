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

//! Helpers for producing the boxed futures expected by tool hooks.

use crate::common::FutureBox;

/// Builds [`FutureBox`] values for can-use hooks and
/// [`CommonEffect`](crate::effect::CommonEffect) process callbacks.
#[derive(Debug, Clone, Copy)]
pub struct ToolReply;

impl ToolReply {
    /// An immediately-ready reply, for hooks with no asynchronous work.
    pub fn ready() -> FutureBox {
        Box::pin(async {})
    }

    /// Boxes an async block as a reply.
    pub fn from_async<F>(future: F) -> FutureBox
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        Box::pin(future)
    }
}
