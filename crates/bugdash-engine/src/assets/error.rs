use std::fmt;

use super::AssetId;

/// Asset loading and resolution failures.
///
/// Cloneable so one failure can be reported to every ready callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// The identifier was requested but is not (or not yet) loaded.
    NotLoaded(AssetId),
    /// Reading the asset's bytes failed.
    Io { id: AssetId, message: String },
    /// The bytes could not be decoded into an image.
    Decode { id: AssetId, message: String },
    /// A loader thread could not be started.
    Spawn { id: AssetId, message: String },
    /// The loader panicked while fetching the asset.
    Panicked { id: AssetId, message: String },
}

impl AssetError {
    /// Identifier the error is about.
    pub fn id(&self) -> &AssetId {
        match self {
            Self::NotLoaded(id) => id,
            Self::Io { id, .. }
            | Self::Decode { id, .. }
            | Self::Spawn { id, .. }
            | Self::Panicked { id, .. } => id,
        }
    }
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotLoaded(id) => write!(f, "asset `{id}` is not loaded (missing from the manifest?)"),
            Self::Io { id, message } => write!(f, "failed to read asset `{id}`: {message}"),
            Self::Decode { id, message } => write!(f, "failed to decode asset `{id}`: {message}"),
            Self::Spawn { id, message } => write!(f, "failed to start loader for `{id}`: {message}"),
            Self::Panicked { id, message } => write!(f, "loader panicked on `{id}`: {message}"),
        }
    }
}

impl std::error::Error for AssetError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_loaded_names_the_identifier() {
        let err = AssetError::NotLoaded(AssetId::new("images/Rock1.png"));
        assert!(err.to_string().contains("images/Rock1.png"));
        assert_eq!(err.id().as_str(), "images/Rock1.png");
    }
}
