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

//! Identity types for tools and effect definitions.
//!
//! Effect definitions are shared across many tools, so every definition is
//! assigned an [`EffectId`] exactly once, at construction, by the
//! [`EffectIds`] allocator owned by the runtime. The id namespaces that
//! definition's per-tool variables: two definitions of the same type never
//! collide, and the same definition on two tools never collides because
//! each tool owns its own [`VariableStore`](crate::common::VariableStore).

use std::fmt;
use std::sync::atomic::{AtomicU16, AtomicU64, Ordering};
use std::sync::Arc;

/// Unique identity of one tool instance within a runtime.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ToolId {
    name: Arc<str>,
    seq: u64,
}

impl ToolId {
    pub(crate) fn new(name: &str, seq: u64) -> Self {
        Self {
            name: Arc::from(name),
            seq,
        }
    }

    /// The human-readable name this tool was created with.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.seq)
    }
}

/// Identity of one effect definition.
///
/// `kind` is the definition's short type name and `seq` is allocated by
/// [`EffectIds`]. Copyable so signals can carry it by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EffectId {
    kind: &'static str,
    seq: u16,
}

impl EffectId {
    /// Builds the variable-store key for a named per-tool variable owned
    /// by this definition.
    pub fn var(&self, name: &str) -> String {
        format!("{}{}-{}", self.kind, self.seq, name)
    }

    /// The definition's short type name.
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

impl fmt::Display for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.kind, self.seq)
    }
}

/// Allocator handing out definition ids.
///
/// Owned by the composition root ([`ActionFxRuntime`](crate::common::ActionFxRuntime)),
/// not process-wide state, so id assignment is deterministic per runtime
/// and independent runtimes (e.g. parallel tests) never leak ids into each
/// other.
#[derive(Debug, Default)]
pub struct EffectIds {
    next: AtomicU16,
}

impl EffectIds {
    /// Allocates the next definition id for an effect of type `T`.
    pub fn allocate<T>(&self) -> EffectId {
        EffectId {
            kind: short_type_name::<T>(),
            seq: self.next.fetch_add(1, Ordering::Relaxed),
        }
    }
}

/// Counter for tool ids, owned by the runtime.
#[derive(Debug, Default)]
pub(crate) struct ToolIds {
    next: AtomicU64,
}

impl ToolIds {
    pub(crate) fn allocate(&self, name: &str) -> ToolId {
        ToolId::new(name, self.next.fetch_add(1, Ordering::Relaxed))
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
