//! Error types for the diorama renderer
//!
//! Three families of failure exist:
//! - [`InitError`]: window, surface or device creation failed. Fatal, the
//!   process exits non-zero.
//! - [`TextureError`]: a texture could not be registered. Logged and
//!   skipped, the tag simply stays unresolvable.
//! - [`MaterialError`]: a material tag was defined twice.
//!
//! Lookup misses at draw time are not errors at all; they are `None`.

use std::path::PathBuf;

use thiserror::Error;

/// Startup failures that abort the application.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("failed to create event loop: {0}")]
    EventLoop(String),

    #[error("failed to create window: {0}")]
    Window(String),

    #[error("failed to create rendering surface: {0}")]
    Surface(String),

    #[error("no compatible graphics adapter: {0}")]
    Adapter(String),

    #[error("failed to create graphics device: {0}")]
    Device(String),

    #[error("failed to build render pipeline: {0}")]
    Pipeline(String),
}

/// Reasons a texture was not registered.
#[derive(Debug, Error)]
pub enum TextureError {
    /// The file is missing, unreadable or not a decodable image.
    #[error("could not load image '{}'", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Only RGB and RGBA images can be uploaded.
    #[error("image '{}' has {channels} channels, only RGB and RGBA are supported", path.display())]
    UnsupportedFormat { path: PathBuf, channels: u8 },

    #[error("texture registry is full ({max} slots)")]
    Capacity { max: usize },

    #[error("texture tag '{0}' is already registered")]
    DuplicateTag(String),
}

impl TextureError {
    /// True for failures caused by the image file itself rather than by
    /// registry bookkeeping.
    pub fn is_asset_error(&self) -> bool {
        matches!(self, Self::Load { .. } | Self::UnsupportedFormat { .. })
    }
}

#[derive(Debug, Error)]
pub enum MaterialError {
    #[error("material tag '{0}' is already defined")]
    DuplicateTag(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_error_classification() {
        let unsupported = TextureError::UnsupportedFormat {
            path: PathBuf::from("gray.png"),
            channels: 1,
        };
        assert!(unsupported.is_asset_error());
        assert!(!TextureError::Capacity { max: 16 }.is_asset_error());
        assert!(!TextureError::DuplicateTag("wood".into()).is_asset_error());
    }

    #[test]
    fn test_messages_name_the_offender() {
        let err = TextureError::UnsupportedFormat {
            path: PathBuf::from("textures/gray.png"),
            channels: 2,
        };
        let message = err.to_string();
        assert!(message.contains("textures/gray.png"));
        assert!(message.contains("2 channels"));

        let err = MaterialError::DuplicateTag("plastic".into());
        assert_eq!(err.to_string(), "material tag 'plastic' is already defined");
    }
}
