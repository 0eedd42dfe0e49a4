//! Configuration management utilities.

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));

/// Layered configuration loaded from defaults, the user file, an explicit file, and env.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub opener: OpenerConfig,
    #[serde(default)]
    pub keybindings: Keybindings,
    #[serde(default)]
    pub pins: Vec<PinEntry>,
}

/// How category icons are drawn in the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IconStyle {
    /// Nerd Font glyphs.
    #[default]
    Nerd,
    /// Bracketed ASCII tags for terminals without patched fonts.
    Ascii,
}

impl fmt::Display for IconStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IconStyle::Nerd => f.write_str("nerd"),
            IconStyle::Ascii => f.write_str("ascii"),
        }
    }
}

impl FromStr for IconStyle {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "nerd" => Ok(IconStyle::Nerd),
            "ascii" | "plain" => Ok(IconStyle::Ascii),
            other => bail!("unknown icon style '{other}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defaults {
    #[serde(default)]
    pub icon_style: IconStyle,
    #[serde(default = "Defaults::default_shake_amount")]
    pub shake_amount: u16,
    #[serde(default = "Defaults::default_shakes_per_unit")]
    pub shakes_per_unit: u16,
}

impl Defaults {
    fn default_shake_amount() -> u16 {
        5
    }

    fn default_shakes_per_unit() -> u16 {
        5
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            icon_style: IconStyle::default(),
            shake_amount: Self::default_shake_amount(),
            shakes_per_unit: Self::default_shakes_per_unit(),
        }
    }
}

/// External program used to reveal paths. `None` means the platform handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OpenerConfig {
    #[serde(default)]
    pub command: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keybindings {
    #[serde(default = "Keybindings::default_up")]
    pub up: String,
    #[serde(default = "Keybindings::default_down")]
    pub down: String,
    #[serde(default = "Keybindings::default_select")]
    pub select: String,
    #[serde(default = "Keybindings::default_back")]
    pub back: String,
    #[serde(default = "Keybindings::default_open")]
    pub open: String,
    #[serde(default = "Keybindings::default_quit")]
    pub quit: String,
}

impl Keybindings {
    fn default_up() -> String {
        "k".into()
    }

    fn default_down() -> String {
        "j".into()
    }

    fn default_select() -> String {
        "enter".into()
    }

    fn default_back() -> String {
        "esc".into()
    }

    fn default_open() -> String {
        "o".into()
    }

    fn default_quit() -> String {
        "q".into()
    }
}

impl Default for Keybindings {
    fn default() -> Self {
        Self {
            up: Self::default_up(),
            down: Self::default_down(),
            select: Self::default_select(),
            back: Self::default_back(),
            open: Self::default_open(),
            quit: Self::default_quit(),
        }
    }
}

/// A pinned path as written in config. `~/` expands to the home directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinEntry {
    pub path: String,
    #[serde(default)]
    pub label: Option<String>,
}

/// Environment overrides for critical settings.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    opener: Option<String>,
    icon_style: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            opener: env::var("ZFINDER_OPENER").ok(),
            icon_style: env::var("ZFINDER_ICON_STYLE").ok(),
        }
    }

    #[cfg(test)]
    fn for_tests(opener: &str, icon_style: &str) -> Self {
        Self {
            opener: Some(opener.to_owned()),
            icon_style: Some(icon_style.to_owned()),
        }
    }
}

/// One config source before merging. A key left out keeps the value from the layer below.
#[derive(Debug, Default, Deserialize)]
struct ConfigLayer {
    #[serde(default)]
    defaults: DefaultsLayer,
    #[serde(default)]
    opener: OpenerConfig,
    #[serde(default)]
    keybindings: KeybindingsLayer,
    #[serde(default)]
    pins: Vec<PinEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct DefaultsLayer {
    icon_style: Option<IconStyle>,
    shake_amount: Option<u16>,
    shakes_per_unit: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
struct KeybindingsLayer {
    up: Option<String>,
    down: Option<String>,
    select: Option<String>,
    back: Option<String>,
    open: Option<String>,
    quit: Option<String>,
}

impl Config {
    /// Load configuration from defaults, the user config, `explicit`, and env overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let env = EnvOverrides::from_env();
        let global = global_config_path();
        Self::load_with_layers(global, explicit.map(Path::to_path_buf), env)
    }

    /// Location of the per-user config file, if the platform has a config directory.
    pub fn user_config_path() -> Option<PathBuf> {
        global_config_path()
    }

    fn load_with_layers(
        global: Option<PathBuf>,
        explicit: Option<PathBuf>,
        env_overrides: EnvOverrides,
    ) -> Result<Self> {
        let mut layers: Vec<ConfigLayer> = Vec::new();

        layers.push(ConfigLayer::from_str(&DEFAULT_CONFIG)?);

        if let Some(global_path) = global.filter(|path| path.exists()) {
            layers.push(ConfigLayer::from_file(&global_path)?);
        }

        if let Some(explicit_path) = explicit {
            layers.push(ConfigLayer::from_file(&explicit_path)?);
        }

        let merged = layers
            .into_iter()
            .reduce(ConfigLayer::merge)
            .unwrap_or_default()
            .resolve();
        apply_env_overrides(merged, env_overrides)
    }
}

impl ConfigLayer {
    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&data)
            .with_context(|| format!("invalid config file: {}", path.display()))
    }

    fn from_str(contents: &str) -> Result<Self> {
        let layer: ConfigLayer =
            toml::from_str(contents).with_context(|| "failed to parse TOML config".to_string())?;
        Ok(layer)
    }

    fn merge(self, other: Self) -> Self {
        let mut pins = self.pins;
        pins.extend(other.pins);
        Self {
            defaults: merge_defaults(self.defaults, other.defaults),
            opener: merge_opener(self.opener, other.opener),
            keybindings: merge_keybindings(self.keybindings, other.keybindings),
            pins,
        }
    }

    fn resolve(self) -> Config {
        let defaults = self.defaults;
        let keys = self.keybindings;
        Config {
            defaults: Defaults {
                icon_style: defaults.icon_style.unwrap_or_default(),
                shake_amount: defaults
                    .shake_amount
                    .unwrap_or_else(Defaults::default_shake_amount),
                shakes_per_unit: defaults
                    .shakes_per_unit
                    .unwrap_or_else(Defaults::default_shakes_per_unit),
            },
            opener: self.opener,
            keybindings: Keybindings {
                up: keys.up.unwrap_or_else(Keybindings::default_up),
                down: keys.down.unwrap_or_else(Keybindings::default_down),
                select: keys.select.unwrap_or_else(Keybindings::default_select),
                back: keys.back.unwrap_or_else(Keybindings::default_back),
                open: keys.open.unwrap_or_else(Keybindings::default_open),
                quit: keys.quit.unwrap_or_else(Keybindings::default_quit),
            },
            pins: self.pins,
        }
    }
}

fn merge_defaults(base: DefaultsLayer, overlay: DefaultsLayer) -> DefaultsLayer {
    DefaultsLayer {
        icon_style: overlay.icon_style.or(base.icon_style),
        shake_amount: overlay.shake_amount.or(base.shake_amount),
        shakes_per_unit: overlay.shakes_per_unit.or(base.shakes_per_unit),
    }
}

fn merge_opener(base: OpenerConfig, overlay: OpenerConfig) -> OpenerConfig {
    OpenerConfig {
        command: overlay.command.or(base.command),
    }
}

fn merge_keybindings(base: KeybindingsLayer, overlay: KeybindingsLayer) -> KeybindingsLayer {
    KeybindingsLayer {
        up: overlay.up.or(base.up),
        down: overlay.down.or(base.down),
        select: overlay.select.or(base.select),
        back: overlay.back.or(base.back),
        open: overlay.open.or(base.open),
        quit: overlay.quit.or(base.quit),
    }
}

fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("zfinder/config.toml"))
}

fn apply_env_overrides(mut config: Config, env: EnvOverrides) -> Result<Config> {
    if let Some(opener) = env.opener {
        let command: Vec<String> = opener.split_whitespace().map(str::to_owned).collect();
        if !command.is_empty() {
            config.opener.command = Some(command);
        }
    }
    if let Some(style) = env.icon_style {
        config.defaults.icon_style = style
            .parse()
            .context("invalid ZFINDER_ICON_STYLE")?;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_uses_defaults_when_no_files() {
        let config = Config::load_with_layers(None, None, EnvOverrides::default())
            .expect("load default config");
        assert_eq!(config, Config::default());
        assert!(config.pins.is_empty());
        assert_eq!(config.keybindings.select, "enter");
        assert_eq!(config.opener.command, None);
    }

    #[test]
    fn merge_user_and_explicit_files() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let global = temp.path().join("config.toml");
        fs::write(
            &global,
            r#"
[defaults]
icon_style = "ascii"
[opener]
command = ["open", "-R"]
[[pins]]
path = "/Users/me/Downloads"
label = "Downloads"
"#,
        )?;

        let explicit = temp.path().join("extra.toml");
        fs::write(
            &explicit,
            r#"
[defaults]
shake_amount = 8
[keybindings]
open = "space"
[[pins]]
path = "/Users/me/Desktop"
"#,
        )?;

        let config = Config::load_with_layers(
            Some(global),
            Some(explicit),
            EnvOverrides::default(),
        )?;

        assert_eq!(config.defaults.icon_style, IconStyle::Ascii);
        assert_eq!(config.defaults.shake_amount, 8);
        assert_eq!(config.defaults.shakes_per_unit, 5);
        assert_eq!(
            config.opener.command,
            Some(vec!["open".to_string(), "-R".to_string()])
        );
        assert_eq!(config.keybindings.open, "space");
        assert_eq!(config.keybindings.up, "k");
        assert_eq!(config.pins.len(), 2);
        assert_eq!(config.pins[0].label.as_deref(), Some("Downloads"));
        assert_eq!(config.pins[1].path, "/Users/me/Desktop");
        Ok(())
    }

    #[test]
    fn explicit_file_can_reset_values_to_defaults() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let global = temp.path().join("config.toml");
        fs::write(
            &global,
            r#"
[defaults]
icon_style = "ascii"
shake_amount = 8
[keybindings]
back = "h"
"#,
        )?;

        let explicit = temp.path().join("extra.toml");
        fs::write(
            &explicit,
            r#"
[defaults]
icon_style = "nerd"
shake_amount = 5
[keybindings]
back = "esc"
"#,
        )?;

        let config = Config::load_with_layers(
            Some(global.clone()),
            Some(explicit),
            EnvOverrides::default(),
        )?;
        assert_eq!(config.defaults.icon_style, IconStyle::Nerd);
        assert_eq!(config.defaults.shake_amount, 5);
        assert_eq!(config.keybindings.back, "esc");

        let user_only = Config::load_with_layers(Some(global), None, EnvOverrides::default())?;
        assert_eq!(user_only.defaults.icon_style, IconStyle::Ascii);
        assert_eq!(user_only.defaults.shake_amount, 8);
        assert_eq!(user_only.keybindings.back, "h");
        Ok(())
    }

    #[test]
    fn missing_user_file_is_skipped_but_missing_explicit_file_fails() {
        let temp = tempfile::tempdir().unwrap();
        let absent = temp.path().join("absent.toml");

        assert!(
            Config::load_with_layers(Some(absent.clone()), None, EnvOverrides::default()).is_ok()
        );
        assert!(Config::load_with_layers(None, Some(absent), EnvOverrides::default()).is_err());
    }

    #[test]
    fn env_overrides_take_precedence() -> Result<()> {
        let overrides = EnvOverrides::for_tests("xdg-open --verbose", "ascii");
        let config = Config::load_with_layers(None, None, overrides)?;
        assert_eq!(
            config.opener.command,
            Some(vec!["xdg-open".to_string(), "--verbose".to_string()])
        );
        assert_eq!(config.defaults.icon_style, IconStyle::Ascii);
        Ok(())
    }

    #[test]
    fn bad_icon_style_in_env_is_an_error() {
        let overrides = EnvOverrides::for_tests("open", "emoji");
        assert!(Config::load_with_layers(None, None, overrides).is_err());
    }

    #[test]
    fn invalid_config_returns_error() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let file = temp.path().join("broken.toml");
        fs::write(&file, "this is not toml")?;
        let result = ConfigLayer::from_file(&file);
        assert!(result.is_err());
        Ok(())
    }
}
