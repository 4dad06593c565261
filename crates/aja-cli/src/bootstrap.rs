use anyhow::Context;
use aja_config::AjaConfig;

/// Load the layered configuration, reading a dotenv file first.
///
/// A project-local `.ajalabs/.env` wins over the working directory's `.env`.
pub fn load_config() -> anyhow::Result<AjaConfig> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;

    let local = cwd.join(".ajalabs").join(".env");
    let config = if local.exists() {
        dotenvy::from_path(&local)
            .with_context(|| format!("failed to load dotenv file at {}", local.display()))?;
        AjaConfig::load()
    } else {
        AjaConfig::load_with_dotenv()
    };

    config.context("failed to load aja configuration")
}
