/// DELVE Project
/// `File` config.rs
/// `Description` Runtime configuration module
/// `Author` TioT2
/// `Last changed` 14.10.2026

use std::path::PathBuf;

use crate::caster::DEFAULT_MAX_DEPTH;
use crate::math::Ext2su;

/// Supported back buffer resolutions, lower ones yield better performance
pub const RESOLUTIONS: [Ext2su; 5] = [
    Ext2su { width: 160, height: 120 },
    Ext2su { width: 320, height: 240 },
    Ext2su { width: 480, height: 460 },
    Ext2su { width: 640, height: 480 },
    Ext2su { width: 800, height: 600 },
];

/// Default resolution index (640x480)
pub const DEFAULT_RESOLUTION: usize = 3;

/// Configuration parsing error
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    MissingValue(String),
    InvalidNumber {
        option: String,
        value: String,
    },
    ResolutionOutOfRange(usize),
    UnknownOption(String),
    UnexpectedArgument(String),
} // enum ConfigError

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingValue(option) => f.write_fmt(format_args!("option {option} requires a value")),
            Self::InvalidNumber { option, value } => f.write_fmt(format_args!("invalid value \"{value}\" for {option}")),
            Self::ResolutionOutOfRange(index) => {
                f.write_fmt(format_args!("resolution index {index} is out of range 0..{}", RESOLUTIONS.len()))
            }
            Self::UnknownOption(option) => f.write_fmt(format_args!("unknown option {option}")),
            Self::UnexpectedArgument(argument) => f.write_fmt(format_args!("unexpected argument \"{argument}\"")),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Runtime configuration
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    resolution: usize,
    /// Movement speed, in cells per second
    pub movement_speed: f32,
    /// Rotation speed, in radians per second
    pub rotation_speed: f32,
    pub max_depth: usize,
    /// Interaction cool-down, in seconds
    pub interact_cooldown: f32,
    pub pickup_score: u32,
    /// Minimum loading screen duration, in seconds
    pub min_loading: f32,
    /// Directory texture sources are resolved against
    pub assets: PathBuf,
    /// Additional .wlv level to play
    pub level_file: Option<PathBuf>,
} // struct Config

impl Default for Config {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            movement_speed: 2.5,
            rotation_speed: 3.1,
            max_depth: DEFAULT_MAX_DEPTH,
            interact_cooldown: 0.25,
            pickup_score: 100,
            min_loading: 2.0,
            assets: PathBuf::from("assets"),
            level_file: None,
        }
    }
}

impl Config {
    /// Command line arguments parsing function
    /// * `args` - arguments without program name
    /// * Returns configuration or ConfigError
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let mut args = args.into_iter();

        fn number<T: std::str::FromStr>(option: &str, value: Option<String>) -> Result<T, ConfigError> {
            let value = value.ok_or_else(|| ConfigError::MissingValue(option.to_string()))?;
            value.parse::<T>().map_err(|_| ConfigError::InvalidNumber { option: option.to_string(), value })
        }

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--assets" => {
                    config.assets = args.next().map(PathBuf::from).ok_or_else(|| ConfigError::MissingValue(arg.clone()))?;
                }
                "--resolution" => {
                    let index: usize = number(&arg, args.next())?;
                    if index >= RESOLUTIONS.len() {
                        return Err(ConfigError::ResolutionOutOfRange(index));
                    }
                    config.resolution = index;
                }
                "--min-loading" => {
                    let seconds: f32 = number(&arg, args.next())?;
                    if !seconds.is_finite() || seconds < 0.0 {
                        return Err(ConfigError::InvalidNumber { option: arg, value: seconds.to_string() });
                    }
                    config.min_loading = seconds;
                }
                option if option.starts_with("--") => return Err(ConfigError::UnknownOption(arg)),
                _ => {
                    if config.level_file.is_some() {
                        return Err(ConfigError::UnexpectedArgument(arg));
                    }
                    config.level_file = Some(PathBuf::from(arg));
                }
            }
        }

        Ok(config)
    } // fn from_args

    /// Current back buffer resolution getting function
    pub fn resolution(&self) -> Ext2su {
        RESOLUTIONS[self.resolution]
    } // fn resolution

    pub fn resolution_index(&self) -> usize {
        self.resolution
    }

    /// Back buffer resolution increasing function
    /// * Returns true if resolution changed
    pub fn increase_resolution(&mut self) -> bool {
        if self.resolution + 1 >= RESOLUTIONS.len() {
            return false;
        }
        self.resolution += 1;
        true
    } // fn increase_resolution

    /// Back buffer resolution decreasing function
    /// * Returns true if resolution changed
    pub fn decrease_resolution(&mut self) -> bool {
        if self.resolution == 0 {
            return false;
        }
        self.resolution -= 1;
        true
    } // fn decrease_resolution
} // impl Config

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn defaults() {
        let config = Config::from_args(Vec::new()).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.resolution(), Ext2su { width: 640, height: 480 });
    }

    #[test]
    fn parses_options() {
        let config = Config::from_args(args(&["--assets", "data", "--resolution", "0", "--min-loading", "0.5", "maps/cellar.wlv"])).unwrap();

        assert_eq!(config.assets, PathBuf::from("data"));
        assert_eq!(config.resolution(), Ext2su { width: 160, height: 120 });
        assert_eq!(config.min_loading, 0.5);
        assert_eq!(config.level_file, Some(PathBuf::from("maps/cellar.wlv")));
    }

    #[test]
    fn rejects_malformed_arguments() {
        assert_eq!(Config::from_args(args(&["--assets"])), Err(ConfigError::MissingValue("--assets".into())));
        assert_eq!(Config::from_args(args(&["--resolution", "9"])), Err(ConfigError::ResolutionOutOfRange(9)));
        assert_eq!(
            Config::from_args(args(&["--resolution", "high"])),
            Err(ConfigError::InvalidNumber { option: "--resolution".into(), value: "high".into() })
        );
        assert_eq!(Config::from_args(args(&["--fullscreen"])), Err(ConfigError::UnknownOption("--fullscreen".into())));
        assert_eq!(Config::from_args(args(&["a.wlv", "b.wlv"])), Err(ConfigError::UnexpectedArgument("b.wlv".into())));
    }

    #[test]
    fn resolution_ladder_is_bounded() {
        let mut config = Config::default();

        assert!(config.increase_resolution());
        assert!(!config.increase_resolution());
        assert_eq!(config.resolution(), Ext2su { width: 800, height: 600 });

        while config.decrease_resolution() {}
        assert_eq!(config.resolution_index(), 0);
    }
}

// file config.rs
