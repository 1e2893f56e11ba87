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

//! Curve-driven charge tracking.
//!
//! [`ChargedCore`] is the charge-state building block shared by charge-aware
//! effects: it owns the per-tool `start`/`using` variables, the end-use
//! gate, and the curve-to-level conversion other nodes use as an index.

use anyhow::bail;
use tokio::time::Instant;

use crate::common::{EffectId, VariableStore};
use crate::tool::Tool;
use crate::traits::TriggerPoint;

/// When converting the curve's output to an integer level, which rounding
/// is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rounding {
    /// Round toward negative infinity.
    #[default]
    Floor,
    /// Round toward positive infinity.
    Ceil,
    /// Round to the nearest integer.
    Nearest,
}

impl Rounding {
    fn apply(self, value: f32) -> i32 {
        match self {
            Rounding::Floor => value.floor() as i32,
            Rounding::Ceil => value.ceil() as i32,
            Rounding::Nearest => value.round() as i32,
        }
    }
}

/// Piecewise-linear mapping from elapsed charge time to charge value.
///
/// Keys are `(time_secs, value)` pairs. Evaluation clamps to the first and
/// last key, so time past the configured domain holds the final value;
/// charge-aware nodes additionally clamp the derived index to their child
/// range.
#[derive(Debug, Clone)]
pub struct ChargeCurve {
    keys: Vec<(f32, f32)>,
}

impl ChargeCurve {
    /// Builds a curve from keyframes, sorting them by time. At least one
    /// key is required.
    pub fn new(mut keys: Vec<(f32, f32)>) -> anyhow::Result<Self> {
        if keys.is_empty() {
            bail!("a charge curve requires at least one key");
        }
        keys.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(Self { keys })
    }

    /// A curve that scales linearly from `(0, 0)` to `(time, value)`.
    pub fn linear(time: f32, value: f32) -> Self {
        Self {
            keys: vec![(0.0, 0.0), (time.max(f32::EPSILON), value)],
        }
    }

    /// Evaluates the curve at `t` seconds, clamped to the key range.
    pub fn evaluate(&self, t: f32) -> f32 {
        let first = self.keys[0];
        if t <= first.0 {
            return first.1;
        }
        let last = self.keys[self.keys.len() - 1];
        if t >= last.0 {
            return last.1;
        }
        for window in self.keys.windows(2) {
            let (t0, v0) = window[0];
            let (t1, v1) = window[1];
            if t >= t0 && t <= t1 {
                if t1 - t0 <= f32::EPSILON {
                    return v1;
                }
                let alpha = (t - t0) / (t1 - t0);
                return v0 + (v1 - v0) * alpha;
            }
        }
        last.1
    }
}

/// Immutable configuration for a charge-aware effect.
#[derive(Debug, Clone)]
pub struct ChargedConfig {
    /// When the effect triggers. Charging can only start on use, but
    /// finalized results can occur on end-use when the final charge level
    /// matters.
    pub trigger: TriggerPoint,
    /// When the trigger point is `OnEndUse`, whether a use must be seen
    /// first for the end-use to fire.
    pub require_use_before_end: bool,
    /// How the curve value becomes an integer level.
    pub rounding: Rounding,
    /// How charge levels scale over elapsed time.
    pub curve: ChargeCurve,
}

/// Per-tool charge state for one definition.
///
/// Embedded by charge-aware effects; the owning definition passes its own
/// [`EffectId`] so the `start`/`using` variables are namespaced to that
/// definition. `start == None` is the "not charging" sentinel: the level
/// reads the curve at zero elapsed time.
#[derive(Debug)]
pub struct ChargedCore {
    config: ChargedConfig,
    using_key: String,
    start_key: String,
}

impl ChargedCore {
    /// Binds the charge state to the owning definition's id.
    pub fn new(id: EffectId, config: ChargedConfig) -> Self {
        Self {
            config,
            using_key: id.var("using"),
            start_key: id.var("start"),
        }
    }

    /// The owning definition's trigger point.
    pub fn trigger(&self) -> TriggerPoint {
        self.config.trigger
    }

    /// Must be invoked by the owning effect before any other use-path
    /// operation: records the charge start if none is in progress and
    /// marks the `using` flag when the end gate requires a prior use.
    pub fn begin_charge(&self, tool: &Tool) {
        let vars = tool.vars();
        if vars.get::<Option<Instant>>(&self.start_key).is_none() {
            vars.set(&self.start_key, Some(Instant::now()));
        }
        if self.config.trigger == TriggerPoint::OnEndUse && self.config.require_use_before_end {
            vars.set(&self.using_key, true);
        }
    }

    /// The end-use gate: true only when the trigger point is `OnEndUse`
    /// and either no prior use is required or one was seen. Clears the
    /// `using` flag when it passes.
    pub fn can_end_use(&self, tool: &Tool) -> bool {
        if self.config.trigger == TriggerPoint::OnEndUse
            && (!self.config.require_use_before_end || tool.vars().get::<bool>(&self.using_key))
        {
            tool.vars().set(&self.using_key, false);
            return true;
        }
        false
    }

    /// The rounded charge level for the elapsed charging time. Intended
    /// as an array lookup; callers clamp to their child range.
    pub fn current_level(&self, tool: &Tool) -> i32 {
        let elapsed = match tool.vars().get::<Option<Instant>>(&self.start_key) {
            Some(start) => Instant::now().duration_since(start).as_secs_f32(),
            None => 0.0,
        };
        self.config.rounding.apply(self.config.curve.evaluate(elapsed))
    }

    /// Must be invoked by the owning effect after all other end-path
    /// operations: resets the charge start sentinel.
    pub fn clear(&self, tool: &Tool) {
        tool.vars().set::<Option<Instant>>(&self.start_key, None);
    }

    /// Resets the internal charge timer and the `using` flag.
    pub fn cancel(&self, tool: &Tool) {
        let vars: &VariableStore = tool.vars();
        vars.set::<Option<Instant>>(&self.start_key, None);
        vars.set(&self.using_key, false);
    }
}
