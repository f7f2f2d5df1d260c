use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/tui.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Gemini API key, the only secret.
    pub api_key: String,
    pub base_url: String,
    pub chat_model: String,
    pub image_model: String,
    /// Pre-filled login name.
    pub username: String,
    /// Directory where generated images are saved.
    pub output_dir: String,
    /// Log filter, e.g. "info" or "gateway=debug".
    pub level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: gateway::DEFAULT_BASE_URL.to_string(),
            chat_model: gateway::DEFAULT_CHAT_MODEL.to_string(),
            image_model: gateway::DEFAULT_IMAGE_MODEL.to_string(),
            username: String::new(),
            output_dir: ".".to_string(),
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "gruzzolo_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the Gemini API key.
    #[arg(long)]
    api_key: Option<String>,
    /// Override the API base URL.
    #[arg(long)]
    base_url: Option<String>,
    /// Override the chat model id.
    #[arg(long)]
    chat_model: Option<String>,
    /// Override the image model id.
    #[arg(long)]
    image_model: Option<String>,
    /// Override the pre-filled login name.
    #[arg(long)]
    username: Option<String>,
    /// Override the image output directory.
    #[arg(long)]
    output_dir: Option<String>,
    /// Override the log filter.
    #[arg(long)]
    level: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("GRUZZOLO_TUI"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(api_key) = args.api_key {
        settings.api_key = api_key;
    }
    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(chat_model) = args.chat_model {
        settings.chat_model = chat_model;
    }
    if let Some(image_model) = args.image_model {
        settings.image_model = image_model;
    }
    if let Some(username) = args.username {
        settings.username = username;
    }
    if let Some(output_dir) = args.output_dir {
        settings.output_dir = output_dir;
    }
    if let Some(level) = args.level {
        settings.level = level;
    }

    Ok(settings)
}
