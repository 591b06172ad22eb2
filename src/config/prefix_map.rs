use super::ConfigError;
use serde_json::Value;
use std::collections::BTreeMap;

pub type PrefixMap = BTreeMap<String, String>;

pub fn parse_prefix_map(raw: &str) -> Result<PrefixMap, ConfigError> {
    let value: Value = serde_json::from_str(raw).map_err(ConfigError::InvalidPrefixMap)?;
    let Value::Object(entries) = value else {
        return Err(ConfigError::PrefixMapNotObject);
    };

    Ok(entries
        .into_iter()
        .map(|(path, prefix)| {
            let prefix = match prefix {
                Value::String(text) => text,
                other => other.to_string(),
            };
            (path, prefix.trim_matches('/').to_string())
        })
        .collect())
}
