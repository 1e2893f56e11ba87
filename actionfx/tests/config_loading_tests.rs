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

use std::fs;

use actionfx::prelude::*;
use tempfile::TempDir;

/// Configuration resolution against an isolated XDG home, exercised in
/// one test because the XDG environment is process-global.
///
/// **Scenarios:**
/// 1. No config file: defaults apply.
/// 2. A custom `actionfx/config.toml`: its values override the defaults,
///    and unspecified sections keep theirs.
/// 3. A malformed file: defaults apply instead of a panic.
#[test]
fn test_configuration_loading() {
    let temp_dir = TempDir::new().unwrap();
    std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());

    // 1. Missing file falls back to defaults.
    let config = ActionFxConfig::load();
    assert_eq!(config.defaults.tool_name, "tool");
    assert!(config.defaults.owner.is_empty());
    assert_eq!(config.timing.reuse_delay_secs, 0.0);
    assert!(config.behavior.enable_tracing);

    // 2. Custom values override defaults.
    let config_dir = temp_dir.path().join("actionfx");
    fs::create_dir_all(&config_dir).unwrap();
    let config_content = r#"
        [defaults]
        tool_name = "sidearm"
        owner = "player-one"

        [timing]
        reuse_delay_secs = 1.5
        semi_reuse_delay_secs = 0.25

        [tracing]
        level = "debug"
    "#;
    fs::write(config_dir.join("config.toml"), config_content).unwrap();

    let config = ActionFxConfig::load();
    assert_eq!(config.defaults.tool_name, "sidearm");
    assert_eq!(config.defaults.owner, "player-one");
    assert_eq!(config.timing.reuse_delay_secs, 1.5);
    assert_eq!(config.timing.semi_reuse_delay_secs, 0.25);
    assert_eq!(config.timing.effect_delay_secs, 0.0, "unset keeps default");
    assert_eq!(config.tracing.level, "debug");

    // 3. A malformed file logs an error and uses defaults.
    let malformed = r#"
        [timing]
        reuse_delay_secs = "not_a_number"
    "#;
    fs::write(config_dir.join("config.toml"), malformed).unwrap();

    let config = ActionFxConfig::load();
    assert_eq!(config.timing.reuse_delay_secs, 0.0);
    assert_eq!(config.defaults.tool_name, "tool");

    temp_dir.close().unwrap();
}
