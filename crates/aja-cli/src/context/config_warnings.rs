use aja_config::{AjaConfig, ApiConfig, GeneralConfig};

/// Warn about env vars that look like config overrides but were ignored
/// because they use a single underscore after the section name.
pub fn warn_unconfigured(config: &AjaConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &AjaConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let mut warnings = Vec::new();

    let api_default = ApiConfig::default();
    if config.api.audit_url == api_default.audit_url
        && config.api.analytics_url == api_default.analytics_url
        && has_single_underscore_key(&env_keys, "AJA_API")
    {
        warnings.push(
            "API config appears default while AJA_API_* env vars exist. Use double underscores (example: AJA_API__AUDIT_URL)."
                .to_string(),
        );
    }

    let general_default = GeneralConfig::default();
    if config.general.page_size == general_default.page_size
        && config.general.history_limit == general_default.history_limit
        && config.general.data_dir.is_empty()
        && has_single_underscore_key(&env_keys, "AJA_GENERAL")
    {
        warnings.push(
            "General config appears default while AJA_GENERAL_* env vars exist. Use double underscores (example: AJA_GENERAL__PAGE_SIZE)."
                .to_string(),
        );
    }

    warnings
}

fn has_single_underscore_key(keys: &[String], section: &str) -> bool {
    let single = format!("{section}_");
    let double = format!("{section}__");
    keys.iter()
        .any(|key| key.starts_with(&single) && !key.starts_with(&double))
}
