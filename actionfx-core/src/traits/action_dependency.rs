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

use crate::tool::Tool;

/// An external precondition a tool must satisfy before a use proceeds.
///
/// Gates are evaluated in registration order at the start of every use
/// pass and short-circuit on the first rejection. Implementations must be
/// side-effect-free: the controller queries them, never mutates them, and
/// may skip later gates entirely.
pub trait ActionDependency: Send + Sync {
    /// Whether the tool may be used right now.
    fn can_use(&self, tool: &Tool) -> bool;
}
