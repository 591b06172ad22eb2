pub mod error;
pub mod prefix_map;
pub mod settings;
pub mod tokens;

pub use error::ConfigError;
pub use prefix_map::{parse_prefix_map, PrefixMap};
pub use settings::{
    SmokeConfig, DEFAULT_BASE_URL, DEFAULT_DATABASE_KEY, DEFAULT_DISCOVERY_TIMEOUT_SECS,
    DEFAULT_INVOKE_TIMEOUT_SECS,
};
pub use tokens::TokenProvider;
