use config::{Config, ConfigError};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    particle: Particle,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("particle.url", "https://api.particle.io")?
            .set_default("particle.get_timeout", "3s")?
            .set_default("particle.post_timeout", "2s")?
            .set_default("particle.descriptor_variable", "achStr")?
            .set_default("particle.control_function", "control")?
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::File::with_name("config_local").required(false))
            .add_source(config::Environment::with_prefix("BRIDGE").prefix_separator("_").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn particle(&self) -> &Particle {
        &self.particle
    }
}

#[derive(Debug, Deserialize)]
pub struct Particle {
    url: String,
    #[serde(with = "humantime_serde")]
    get_timeout: Duration,
    #[serde(with = "humantime_serde")]
    post_timeout: Duration,
    descriptor_variable: String,
    control_function: String,
}

impl Particle {
    pub fn url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    pub fn get_timeout(&self) -> Duration {
        self.get_timeout
    }

    pub fn post_timeout(&self) -> Duration {
        self.post_timeout
    }

    /// Name of the cloud variable in which a device publishes its descriptor payload.
    pub fn descriptor_variable(&self) -> &str {
        &self.descriptor_variable
    }

    pub fn control_function(&self) -> &str {
        &self.control_function
    }
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfigBuilder {
            config: AppConfig {
                particle: Particle {
                    url: "https://particle.url".to_string(),
                    get_timeout: Duration::from_millis(3000),
                    post_timeout: Duration::from_millis(2000),
                    descriptor_variable: "achStr".to_string(),
                    control_function: "control".to_string(),
                },
            },
        }
    }

    pub fn particle_url(mut self, url: String) -> Self {
        self.config.particle.url = url;
        self
    }

    pub fn timeouts(mut self, get_timeout: Duration, post_timeout: Duration) -> Self {
        self.config.particle.get_timeout = get_timeout;
        self.config.particle.post_timeout = post_timeout;
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}
