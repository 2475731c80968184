//! Test configuration builder for creating test configs programmatically

use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Builder for creating test configurations
pub struct TestConfigBuilder {
    temp_dir: TempDir,
    main_config: MainConfigBuilder,
    target_files: Vec<(String, Value)>,
}

impl TestConfigBuilder {
    /// Create a new test config builder
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self {
            temp_dir,
            main_config: MainConfigBuilder::default(),
            target_files: Vec::new(),
        }
    }

    /// Configure main settings
    pub fn with_main_config<F>(mut self, f: F) -> Self
    where
        F: FnOnce(MainConfigBuilder) -> MainConfigBuilder,
    {
        self.main_config = f(self.main_config);
        self
    }

    /// Add `targets/{name}.json` holding the given JSON array
    pub fn with_targets(mut self, name: &str, targets: Value) -> Self {
        self.target_files.push((name.to_string(), targets));
        self
    }

    /// Build and write config files to temp directory
    pub fn build(self) -> TestConfig {
        let config_dir = self.temp_dir.path().join("config");
        let targets_dir = config_dir.join("targets");
        fs::create_dir_all(&targets_dir).expect("Failed to create config dir");

        // Write main.toml
        let main_toml = self.main_config.to_toml();
        fs::write(config_dir.join("main.toml"), main_toml).expect("Failed to write main.toml");

        for (name, targets) in self.target_files {
            let content = serde_json::to_string_pretty(&targets).expect("Failed to render targets");
            fs::write(targets_dir.join(format!("{}.json", name)), content)
                .expect("Failed to write targets file");
        }

        TestConfig {
            _temp_dir: self.temp_dir,
            config_dir,
        }
    }
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Main configuration builder
#[derive(Clone)]
pub struct MainConfigBuilder {
    host: String,
    port: u16,
    schedule_timezone: String,
    control_plane_url: String,
    api_key: Option<String>,
    webhook_url: Option<String>,
    escalation_mode: String,
    handler_url: Option<String>,
    delay_seconds: u64,
    max_attempts: u32,
}

impl MainConfigBuilder {
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn timezone(mut self, timezone: &str) -> Self {
        self.schedule_timezone = timezone.to_string();
        self
    }

    pub fn control_plane(mut self, url: &str) -> Self {
        self.control_plane_url = url.to_string();
        self
    }

    pub fn api_key(mut self, key: &str) -> Self {
        self.api_key = Some(key.to_string());
        self
    }

    pub fn webhook(mut self, url: &str) -> Self {
        self.webhook_url = Some(url.to_string());
        self
    }

    pub fn http_escalation(mut self, handler_url: Option<&str>) -> Self {
        self.escalation_mode = "http".to_string();
        self.handler_url = handler_url.map(str::to_string);
        self
    }

    pub fn health_check(mut self, delay_seconds: u64, max_attempts: u32) -> Self {
        self.delay_seconds = delay_seconds;
        self.max_attempts = max_attempts;
        self
    }

    fn to_toml(&self) -> String {
        let mut toml = format!(
            r#"
host = "{}"
port = {}
schedule_timezone = "{}"

[control_plane]
base_url = "{}"
"#,
            self.host, self.port, self.schedule_timezone, self.control_plane_url
        );

        if let Some(key) = &self.api_key {
            toml.push_str(&format!("api_key = \"{}\"\n", key));
        }

        toml.push_str(&format!(
            "\n[notification]\nwebhook_url = \"{}\"\ntopic = \"reboot-alerts\"\n",
            self.webhook_url.as_deref().unwrap_or("")
        ));

        toml.push_str(&format!("\n[escalation]\nmode = \"{}\"\n", self.escalation_mode));
        if let Some(url) = &self.handler_url {
            toml.push_str(&format!("handler_url = \"{}\"\n", url));
        }

        toml.push_str(&format!(
            "\n[health_check]\ndelay_seconds = {}\nmax_attempts = {}\n",
            self.delay_seconds, self.max_attempts
        ));

        toml
    }
}

impl Default for MainConfigBuilder {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8096,
            schedule_timezone: "UTC".to_string(),
            control_plane_url: "http://localhost:9999".to_string(),
            api_key: None,
            webhook_url: None,
            escalation_mode: "in_process".to_string(),
            handler_url: None,
            delay_seconds: 15,
            max_attempts: 20,
        }
    }
}

/// Built test configuration; the temp dir lives as long as this value
pub struct TestConfig {
    _temp_dir: TempDir,
    config_dir: PathBuf,
}

impl TestConfig {
    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }

    pub fn config_dir_string(&self) -> String {
        self.config_dir.to_string_lossy().to_string()
    }
}
