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

use serde::{Deserialize, Serialize};

use crate::common::CONFIG;

/// How a tool locks after use and what re-arms it.
///
/// | mode | `begin_use` while locked | unlock trigger |
/// |---|---|---|
/// | `Manual` | rejected, emits `Locked` | external `lock_reset()` |
/// | `SemiAuto` | allowed, `semi_reuse_delay` gates cadence | time elapses |
/// | `FullAuto` | never locked by use | n/a |
/// | `Toggle` | rejected (already active) | `end_use()` or `cancel_use()` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LockMode {
    /// Requires an external `lock_reset()` before the tool can be used
    /// again.
    #[default]
    Manual,
    /// Locked state switches the reuse delay to the semi-auto cadence.
    SemiAuto,
    /// Never self-locks.
    FullAuto,
    /// Stays active until `end_use()` is called.
    Toggle,
}

/// The manner in which a tool's aim offset is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AimMode {
    /// Offset is interpreted in the tool's aim space.
    #[default]
    AimSpace,
    /// Offset may be mirrored on the x-axis (sprite-style facing flips).
    Bilateral,
    /// Offset ignores orientation.
    NonOriented,
}

/// Plain three-component vector for aim offsets.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    /// Builds a vector from components.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// The same offset with the x component flipped.
    pub fn mirrored(self) -> Self {
        Self {
            x: -self.x,
            y: self.y,
            z: self.z,
        }
    }
}

/// A tool's tunable configuration.
///
/// Mutable at runtime: [`ToolOverride`](crate::effect::ToolOverride)
/// pushes new values when it takes over a tool's lifecycle rules. Timing
/// values are in seconds; values at or below zero disable the
/// corresponding delay.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Lock behavior after a successful use.
    pub lock_mode: LockMode,
    /// Delay between uses.
    pub reuse_delay: f32,
    /// Delay between uses while locked, for semi-auto cadence.
    pub semi_reuse_delay: f32,
    /// How long after a successful use before its effects run.
    pub effect_delay: f32,
    /// The manner in which the aim offset is applied.
    pub aim_mode: AimMode,
    /// Local-space offset applied at the moment of use.
    pub aim_offset: Vec3,
    /// Mirror the aim offset on the x-axis. Only honored in
    /// [`AimMode::Bilateral`].
    pub mirror_aim_offset: bool,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            lock_mode: LockMode::default(),
            reuse_delay: CONFIG.timing.reuse_delay_secs,
            semi_reuse_delay: CONFIG.timing.semi_reuse_delay_secs,
            effect_delay: CONFIG.timing.effect_delay_secs,
            aim_mode: AimMode::default(),
            aim_offset: Vec3::default(),
            mirror_aim_offset: false,
        }
    }
}

impl ToolSettings {
    /// Takes the locked state into account when returning the delay:
    /// locked tools rate-limit on the semi-auto cadence.
    pub fn effective_reuse_delay(&self, locked: bool) -> f32 {
        if locked {
            self.semi_reuse_delay
        } else {
            self.reuse_delay
        }
    }

    /// The aim offset with bilateral mirroring applied.
    pub fn resolved_aim_offset(&self) -> Vec3 {
        if self.mirror_aim_offset && self.aim_mode == AimMode::Bilateral {
            self.aim_offset.mirrored()
        } else {
            self.aim_offset
        }
    }
}
