pub mod credentials;
pub mod toml_config;

pub use credentials::Credentials;
pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "omega-sermon")]
#[command(about = "Turns the daily newsletter into an OMEGA blog sermon")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the newsletter export URL
    #[arg(long)]
    pub newsletter_url: Option<String>,

    /// Override the completion model
    #[arg(long)]
    pub model: Option<String>,

    /// Save the generated sermon to the blog_posts table
    #[arg(long)]
    pub save: bool,

    /// Also write the full sermon (title, blank line, body) to this file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 載入 TOML（若有）並套用命令列覆蓋設定
    pub fn load_settings(&self) -> crate::utils::error::Result<TomlConfig> {
        let mut settings = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(url) = &self.newsletter_url {
            settings.newsletter.url = url.clone();
        }
        if let Some(model) = &self.model {
            settings.completion.model = model.clone();
        }

        Ok(settings)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::domain::ports::ConfigProvider;

    #[test]
    fn test_cli_overrides_defaults() {
        let cli = CliConfig::parse_from([
            "omega-sermon",
            "--newsletter-url",
            "http://localhost:9000/export?format=csv",
            "--model",
            "gemini-2.5-pro",
            "--save",
        ]);

        let settings = cli.load_settings().unwrap();

        assert!(cli.save);
        assert_eq!(settings.newsletter_url(), "http://localhost:9000/export?format=csv");
        assert_eq!(settings.completion_model(), "gemini-2.5-pro");
        assert_eq!(settings.persistence_table(), "blog_posts");
    }

    #[test]
    fn test_missing_config_file_is_io_error() {
        let cli = CliConfig::parse_from(["omega-sermon", "--config", "/nonexistent/omega.toml"]);
        assert!(cli.load_settings().is_err());
    }
}
