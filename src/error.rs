use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// Mass must be finite and strictly positive.
    #[error("invalid body mass {0}: must be finite and > 0")]
    InvalidMass(f32),

    /// Radius must be finite and non-negative.
    #[error("invalid body radius {0}: must be finite and >= 0")]
    InvalidRadius(f32),

    #[error("invalid parameter `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: f32 },

    #[error("failed to read configuration")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration")]
    Parse(#[from] serde_yaml::Error),
}
