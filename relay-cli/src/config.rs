use relay_core::contracts::GenerationParameters;
use relay_core::{RelayError, RelayResult};
use relay_provider_wandb::WandbClientConfig;
use std::fs;
use std::path::PathBuf;

/// Path to a JSON file overriding fields of the generation parameter set.
pub const PARAMETERS_FILE_ENV: &str = "RELAY_PARAMETERS_FILE";
/// Root URL of the experiment-tracking service.
pub const WANDB_BASE_URL_ENV: &str = "WANDB_BASE_URL";

/// Settings the binaries read from the environment.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub parameters_file: Option<PathBuf>,
    pub wandb_base_url: Option<String>,
}

impl Settings {
    pub fn from_env() -> Self {
        let mut settings = Settings::default();

        if let Ok(path) = std::env::var(PARAMETERS_FILE_ENV) {
            if !path.is_empty() {
                settings.parameters_file = Some(PathBuf::from(path));
            }
        }
        if let Ok(url) = std::env::var(WANDB_BASE_URL_ENV) {
            if !url.is_empty() {
                settings.wandb_base_url = Some(url);
            }
        }

        settings
    }

    /// The default parameter set, with any fields from the parameters file
    /// laid over it.
    pub fn generation_parameters(&self) -> RelayResult<GenerationParameters> {
        let Some(path) = &self.parameters_file else {
            return Ok(GenerationParameters::default());
        };

        let content = fs::read_to_string(path).map_err(|e| {
            RelayError::Config(format!("could not read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&content)
            .map_err(|e| RelayError::Config(format!("invalid parameters in {}: {}", path.display(), e)))
    }

    pub fn wandb_config(&self) -> WandbClientConfig {
        let mut config = WandbClientConfig::default();
        if let Some(url) = &self.wandb_base_url {
            config.base_url = url.clone();
        }
        config
    }
}
