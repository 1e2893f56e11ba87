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

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// Configuration for the ActionFx engine.
///
/// All configurable defaults for tools built through
/// [`ActionFxRuntime`](crate::common::ActionFxRuntime), loaded from TOML
/// files in XDG-compliant directories.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ActionFxConfig {
    /// Default values applied to new tools
    pub defaults: DefaultsConfig,
    /// Timing defaults for reuse delays and effect delays
    pub timing: TimingConfig,
    /// Tracing and logging configuration
    pub tracing: TracingConfig,
    /// Behavioral configuration switches
    pub behavior: BehaviorConfig,
}

/// Default values applied to tools that do not set their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Default tool name when none provided
    pub tool_name: String,
    /// Default owner tag for new tools; empty means "unowned"
    pub owner: String,
}

/// Timing defaults, in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Default delay between uses
    pub reuse_delay_secs: f32,
    /// Default semi-auto delay between uses while locked
    pub semi_reuse_delay_secs: f32,
    /// Default delay before a successful use pass runs its effects
    pub effect_delay_secs: f32,
}

/// Tracing and logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TracingConfig {
    /// Default tracing level for the engine's own events
    pub level: String,
}

/// Behavioral configuration switches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Enable tracing
    pub enable_tracing: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            tool_name: "tool".to_string(),
            owner: String::new(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            reuse_delay_secs: 0.0,
            semi_reuse_delay_secs: 0.0,
            effect_delay_secs: 0.0,
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            enable_tracing: true,
        }
    }
}

impl ActionFxConfig {
    /// Load configuration from XDG-compliant locations.
    ///
    /// Attempts to load `actionfx/config.toml` from the XDG config
    /// directories (`$XDG_CONFIG_HOME` first). If no configuration file
    /// is found, returns the default configuration. If a configuration
    /// file exists but is malformed, logs an error and uses defaults.
    pub fn load() -> Self {
        let xdg_dirs = match xdg::BaseDirectories::with_prefix("actionfx") {
            Ok(dirs) => dirs,
            Err(e) => {
                error!("Failed to initialize XDG directories: {}", e);
                return Self::default();
            }
        };

        let config_path = xdg_dirs.find_config_file("config.toml");

        if let Some(path) = config_path {
            info!("Loading configuration from: {}", path.display());
            match std::fs::read_to_string(&path) {
                Ok(config_str) => match toml::from_str::<Self>(&config_str) {
                    Ok(config) => {
                        info!("Successfully loaded configuration");
                        config
                    }
                    Err(e) => {
                        error!(
                            "Failed to parse configuration file {}: {}",
                            path.display(),
                            e
                        );
                        Self::default()
                    }
                },
                Err(e) => {
                    error!(
                        "Failed to read configuration file {}: {}",
                        path.display(),
                        e
                    );
                    Self::default()
                }
            }
        } else {
            info!("No configuration file found, using defaults");
            Self::default()
        }
    }
}

lazy_static! {
    /// Global configuration instance loaded from XDG-compliant locations
    pub static ref CONFIG: ActionFxConfig = ActionFxConfig::load();
}
