use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

pub fn validate_probability(name: &str, value: f64) -> Result<(), String> {
    if !(0.0..=1.0).contains(&value) {
        return Err(format!("{} must be between 0.0 and 1.0, got {}", name, value));
    }
    Ok(())
}

pub fn to_yaml<T: Serialize>(value: &T) -> Result<String, String> {
    serde_yaml_ng::to_string(value).map_err(|e| format!("Failed to serialize config: {}", e))
}

pub fn from_yaml<T: DeserializeOwned>(content: &str) -> Result<T, String> {
    serde_yaml_ng::from_str(content).map_err(|e| format!("Failed to deserialize config: {}", e))
}

const SAVED_HEADER: &str = "# Written by `play --save`. Delete this file to go back to the defaults.\n";

/// Settings file in YAML. A missing or blank file loads as `TConfig::default()`;
/// keys missing from the file fall back through `#[serde(default)]` on the type.
/// Both directions validate, so a bad file never reaches a game session.
pub struct ConfigFile<TConfig> {
    path: PathBuf,
    _config: PhantomData<fn() -> TConfig>,
}

impl<TConfig> ConfigFile<TConfig>
where
    TConfig: Serialize + DeserializeOwned + Validate + Default,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _config: PhantomData,
        }
    }

    /// Keeps the file beside the binary so every launch finds the same settings,
    /// whatever the working directory.
    pub fn next_to_executable(file_name: &str) -> Self {
        if let Ok(exe_path) = std::env::current_exe()
            && let Some(exe_dir) = exe_path.parent()
        {
            return Self::new(exe_dir.join(file_name));
        }
        Self::new(file_name)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<TConfig, String> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(TConfig::default()),
            Err(err) => {
                return Err(format!(
                    "Failed to read config file {}: {}",
                    self.path.display(),
                    err
                ));
            }
        };

        if content.trim().is_empty() {
            return Ok(TConfig::default());
        }

        let config: TConfig = from_yaml(&content)
            .map_err(|e| format!("{} ({})", e, self.path.display()))?;
        config
            .validate()
            .map_err(|e| format!("Config validation error in {}: {}", self.path.display(), e))?;
        Ok(config)
    }

    pub fn save(&self, config: &TConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        let content = format!("{}{}", SAVED_HEADER, to_yaml(config)?);

        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            std::fs::create_dir_all(dir)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }
        std::fs::write(&self.path, content).map_err(|e| {
            format!(
                "Failed to write config file {}: {}",
                self.path.display(),
                e
            )
        })
    }
}
