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

//! Per-tool instanced variable storage.
//!
//! Effect definitions are shared and immutable; everything mutable they
//! track for a given tool lives here. Keys are produced by
//! [`EffectId::var`](crate::common::EffectId::var) so distinct definitions
//! never collide, and the store itself is owned by one tool, so the same
//! definition used by two tools reads and writes disjoint state. Entries
//! are created lazily on first read and dropped with the tool.

use std::any::Any;

use dashmap::DashMap;
use tracing::trace;

/// Typed key/value store scoped to one tool.
#[derive(Debug, Default)]
pub struct VariableStore {
    vars: DashMap<String, Box<dyn Any + Send + Sync>>,
}

impl VariableStore {
    /// Reads the variable under `key`, default-initializing it on first
    /// access.
    ///
    /// A value previously stored under `key` with a different type is
    /// replaced by the default; definitions own their keys, so a type
    /// mismatch means the key was reused for a new purpose.
    pub fn get<T>(&self, key: &str) -> T
    where
        T: Clone + Default + Send + Sync + 'static,
    {
        {
            let entry = self
                .vars
                .entry(key.to_string())
                .or_insert_with(|| Box::new(T::default()));
            if let Some(value) = entry.value().downcast_ref::<T>() {
                return value.clone();
            }
        }
        trace!(key, "variable retyped, resetting to default");
        let value = T::default();
        self.vars.insert(key.to_string(), Box::new(value.clone()));
        value
    }

    /// Stores `value` under `key`, creating the entry if needed.
    pub fn set<T>(&self, key: &str, value: T)
    where
        T: Send + Sync + 'static,
    {
        self.vars.insert(key.to_string(), Box::new(value));
    }

    /// Number of live entries. Diagnostics only.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether the store holds no entries yet.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
