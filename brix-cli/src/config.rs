use anyhow::Result;
use clap::ArgMatches;
use config::{Config as ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete configuration that merges CLI args, env vars, config files, and defaults
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BrixConfig {
    /// Build configuration
    pub build: BuildConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BuildConfig {
    /// Site document to render
    pub input: String,
    /// Output HTML file
    pub output: String,
    /// Configuration file path
    pub config: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            input: "./site.json".to_string(),
            output: "./site.html".to_string(),
            config: "./brix.toml".to_string(),
        }
    }
}

impl Default for BrixConfig {
    fn default() -> Self {
        Self {
            build: BuildConfig::default(),
        }
    }
}

impl BrixConfig {
    /// Load configuration with cascading precedence:
    /// 1. CLI arguments (highest priority)
    /// 2. Environment variables (BRIX_*)
    /// 3. Configuration file
    /// 4. Defaults (lowest priority)
    pub fn load(args: &ArgMatches) -> Result<Self> {
        let config_file = args
            .get_one::<String>("config")
            .unwrap_or(&"./brix.toml".to_string())
            .clone();

        let mut builder = ConfigBuilder::builder();

        // 1. Start with defaults
        let defaults = Self::default();
        builder = builder.add_source(config::Config::try_from(&defaults)?);

        // 2. Add configuration file if it exists
        if Path::new(&config_file).exists() {
            builder = builder.add_source(File::with_name(&config_file.replace(".toml", "")));
        }

        // 3. Add environment variables with BRIX_ prefix
        builder = builder.add_source(
            Environment::with_prefix("BRIX")
                .prefix_separator("_")
                .separator("__"), // Use double underscore for nested keys
        );

        // 4. Override with CLI arguments (highest priority)
        let mut cli_overrides = std::collections::HashMap::new();

        if let Some(input) = args.get_one::<String>("input") {
            cli_overrides.insert("build.input".to_string(), input.clone());
        }
        if let Some(output) = args.get_one::<String>("output") {
            cli_overrides.insert("build.output".to_string(), output.clone());
        }
        if let Some(config) = args.get_one::<String>("config") {
            cli_overrides.insert("build.config".to_string(), config.clone());
        }

        if !cli_overrides.is_empty() {
            builder = builder.add_source(config::Config::try_from(&cli_overrides)?);
        }

        // Build and deserialize
        let config = builder.build()?;
        let brix_config: BrixConfig = config.try_deserialize()?;

        Ok(brix_config)
    }

    /// Get the build configuration
    pub fn build_config(&self) -> &BuildConfig {
        &self.build
    }
}

/// Load configuration specifically for build commands
pub fn load_build_config(args: &ArgMatches) -> Result<BrixConfig> {
    BrixConfig::load(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{Arg, Command};

    #[test]
    fn test_default_config() {
        let config = BrixConfig::default();
        assert_eq!(config.build.input, "./site.json");
        assert_eq!(config.build.output, "./site.html");
        assert_eq!(config.build.config, "./brix.toml");
    }

    #[test]
    fn test_cli_args_override() {
        let app = Command::new("test")
            .arg(Arg::new("input").long("input").value_name("FILE"))
            .arg(Arg::new("output").long("output").value_name("FILE"))
            .arg(Arg::new("config").long("config").value_name("FILE"));

        let matches = app
            .try_get_matches_from(vec![
                "test",
                "--input",
                "/custom/site.json",
                "--output",
                "/custom/site.html",
            ])
            .unwrap();

        let config = BrixConfig::load(&matches).unwrap();
        assert_eq!(config.build.input, "/custom/site.json");
        assert_eq!(config.build.output, "/custom/site.html");
        // Should still have defaults for non-overridden values
        assert_eq!(config.build.config, "./brix.toml");
    }
}
