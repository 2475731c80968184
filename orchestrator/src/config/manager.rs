// File: orchestrator/src/config/manager.rs
use super::Config;
use crate::errors::ConfigError;
use crate::workflow::InstanceTarget;
use anyhow::{anyhow, Result};
use glob::glob;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info, warn};

pub struct ConfigManager {
    current_config: Arc<Config>,
}

impl ConfigManager {
    pub async fn new(config_dir: String) -> Result<Self> {
        let config = Self::load_configuration(&config_dir).await?;
        Ok(Self {
            current_config: Arc::new(config),
        })
    }

    pub fn get_current_config(&self) -> Arc<Config> {
        self.current_config.clone()
    }

    async fn load_configuration(config_dir: &str) -> Result<Config> {
        let main_config_path = format!("{}/main.toml", config_dir);
        let main_config_content =
            fs::read_to_string(&main_config_path)
                .await
                .map_err(|e| ConfigError::LoadFailed {
                    path: main_config_path.clone(),
                    reason: e.to_string(),
                })?;

        let mut config: Config =
            toml::from_str(&main_config_content).map_err(|e| ConfigError::LoadFailed {
                path: main_config_path.clone(),
                reason: e.to_string(),
            })?;

        config
            .validate()
            .map_err(|e| anyhow!("Invalid main config {}: {}", main_config_path, e))?;

        config.targets = Self::load_targets(config_dir).await?;

        info!(
            "Loaded {} reboot targets ({} externally managed)",
            config.targets.len(),
            config
                .targets
                .iter()
                .filter(|t| t.is_externally_managed())
                .count()
        );

        Ok(config)
    }

    /// Every `targets/*.json` file holds a JSON array of instance targets
    async fn load_targets(config_dir: &str) -> Result<Vec<InstanceTarget>> {
        let pattern = format!("{}/targets/*.json", config_dir);
        let mut targets = Vec::new();
        let mut seen = HashSet::new();

        for entry in glob(&pattern).map_err(|e| anyhow!("Glob pattern error: {}", e))? {
            let path = entry.map_err(|e| anyhow!("Glob entry error: {}", e))?;
            debug!("Loading targets file: {}", path.display());

            let content = fs::read_to_string(&path)
                .await
                .map_err(|e| anyhow!("Failed to read {}: {}", path.display(), e))?;

            let file_targets: Vec<InstanceTarget> = serde_json::from_str(&content)
                .map_err(|e| anyhow!("Failed to parse {}: {}", path.display(), e))?;

            for target in file_targets {
                if !seen.insert(target.instance_id.clone()) {
                    warn!(
                        "Duplicate target {} in {}, keeping the first definition",
                        target.instance_id,
                        path.display()
                    );
                    continue;
                }
                targets.push(target);
            }
        }

        Ok(targets)
    }
}
