use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read or write configuration file")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize or deserialize JSON")]
    SerdeJson(#[from] serde_json::Error),
    #[error("Failed to serialize or deserialize YAML")]
    SerdeYaml(#[from] serde_yaml::Error),
    #[error("Failed to deserialize TOML")]
    TomlDe(#[from] toml::de::Error),
    #[error("Failed to serialize TOML")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Route prefix '{0}' must start with '/'")]
    InvalidPrefix(String),
    #[error("Invalid proxy target '{target}': {reason}")]
    InvalidTarget { target: String, reason: String },
    #[error("Duplicate proxy route for prefix '{0}'")]
    DuplicateRoute(String),
    #[error("Invalid backend origin '{0}'")]
    InvalidBackend(String),
}
