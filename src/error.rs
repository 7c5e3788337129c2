use thiserror::Error;

/// Problems found while validating a project configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("project configuration is missing a canonical URL")]
    MissingCanonical,

    #[error("canonical '{0}' is not an absolute URL: {1}")]
    InvalidCanonical(String, String),

    #[error("unsupported FHIR version '{0}': expected MAJOR.MINOR.PATCH")]
    UnsupportedFhirVersion(String),

    #[error("project configuration field '{0}' must not be empty")]
    EmptyField(&'static str),
}
