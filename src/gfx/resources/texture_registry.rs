//! Tagged texture registry
//!
//! Maps human-readable tags to dense, 0-based texture slots. The registry
//! owns every uploaded texture handle and releases them in [`TextureRegistry::teardown`].
//!
//! GPU work goes through a [`TextureUploader`], which keeps the registry
//! independent of the graphics backend.

use std::path::{Path, PathBuf};

use crate::error::TextureError;

/// Number of texture slots available to the shading stage.
pub const MAX_TEXTURE_SLOTS: usize = 16;

/// A decoded image, flipped so row 0 is the bottom of the picture.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// 3 for RGB, 4 for RGBA.
    pub channels: u8,
    /// Tightly packed rows of `channels` bytes per pixel.
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Pixels expanded to RGBA8, ready for GPU upload.
    pub fn to_rgba8(&self) -> Vec<u8> {
        match self.channels {
            4 => self.pixels.clone(),
            _ => self
                .pixels
                .chunks_exact(3)
                .flat_map(|px| [px[0], px[1], px[2], 255])
                .collect(),
        }
    }
}

/// Decodes an image file into RGB or RGBA pixels, flipped vertically.
///
/// # Errors
/// [`TextureError::Load`] if the file cannot be read or decoded,
/// [`TextureError::UnsupportedFormat`] for anything other than 3 or 4 channels.
pub fn decode_image(path: impl AsRef<Path>) -> Result<DecodedImage, TextureError> {
    let path = path.as_ref();
    let image = image::open(path)
        .map_err(|source| TextureError::Load {
            path: path.to_path_buf(),
            source,
        })?
        .flipv();

    let (width, height) = (image.width(), image.height());
    let (channels, pixels) = match image.color().channel_count() {
        3 => (3, image.into_rgb8().into_raw()),
        4 => (4, image.into_rgba8().into_raw()),
        channels => {
            return Err(TextureError::UnsupportedFormat {
                path: path.to_path_buf(),
                channels,
            })
        }
    };

    Ok(DecodedImage {
        width,
        height,
        channels,
        pixels,
    })
}

/// Backend that turns decoded images into bindable textures.
pub trait TextureUploader {
    type Handle;

    /// Creates a texture with repeat wrapping, linear filtering and mipmaps.
    fn upload(&mut self, image: &DecodedImage, label: &str) -> Self::Handle;

    /// Makes `handle` the texture sampled through `slot`.
    fn bind(&mut self, slot: usize, handle: &Self::Handle);

    /// Unbinds `slot` and frees the texture.
    fn release(&mut self, slot: usize, handle: Self::Handle);
}

/// Bookkeeping for one registered texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureEntry {
    pub tag: String,
    pub slot: usize,
    pub channels: u8,
}

struct Registered<H> {
    entry: TextureEntry,
    handle: H,
}

/// Tag to slot registry that owns the uploaded texture handles.
pub struct TextureRegistry<H> {
    textures: Vec<Registered<H>>,
}

impl<H> Default for TextureRegistry<H> {
    fn default() -> Self {
        Self {
            textures: Vec::new(),
        }
    }
}

impl<H> TextureRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the image at `path` and registers it under `tag`.
    ///
    /// Returns the assigned slot.
    ///
    /// # Errors
    /// Duplicate tags and a full registry are rejected before the file is
    /// touched. Decode failures leave the registry unchanged.
    pub fn register<U>(
        &mut self,
        uploader: &mut U,
        path: impl AsRef<Path>,
        tag: &str,
    ) -> Result<usize, TextureError>
    where
        U: TextureUploader<Handle = H>,
    {
        self.check_insert(tag)?;
        let image = decode_image(path)?;
        self.register_image(uploader, &image, tag)
    }

    /// Registers an already decoded image under `tag`.
    pub fn register_image<U>(
        &mut self,
        uploader: &mut U,
        image: &DecodedImage,
        tag: &str,
    ) -> Result<usize, TextureError>
    where
        U: TextureUploader<Handle = H>,
    {
        self.check_insert(tag)?;
        if !matches!(image.channels, 3 | 4) {
            return Err(TextureError::UnsupportedFormat {
                path: PathBuf::from(tag),
                channels: image.channels,
            });
        }

        let slot = self.textures.len();
        let handle = uploader.upload(image, tag);
        self.textures.push(Registered {
            entry: TextureEntry {
                tag: tag.to_string(),
                slot,
                channels: image.channels,
            },
            handle,
        });

        log::debug!("texture '{}' registered in slot {}", tag, slot);
        Ok(slot)
    }

    fn check_insert(&self, tag: &str) -> Result<(), TextureError> {
        if self.slot_of(tag).is_some() {
            return Err(TextureError::DuplicateTag(tag.to_string()));
        }
        if self.textures.len() >= MAX_TEXTURE_SLOTS {
            return Err(TextureError::Capacity {
                max: MAX_TEXTURE_SLOTS,
            });
        }
        Ok(())
    }

    /// Slot assigned to `tag`, scanning in registration order.
    pub fn slot_of(&self, tag: &str) -> Option<usize> {
        self.textures
            .iter()
            .find(|t| t.entry.tag == tag)
            .map(|t| t.entry.slot)
    }

    /// Binds every registered texture to its slot. Safe to call repeatedly.
    pub fn bind_all<U>(&self, uploader: &mut U)
    where
        U: TextureUploader<Handle = H>,
    {
        for texture in &self.textures {
            uploader.bind(texture.entry.slot, &texture.handle);
        }
    }

    /// Releases every texture handle and empties the registry.
    pub fn teardown<U>(&mut self, uploader: &mut U)
    where
        U: TextureUploader<Handle = H>,
    {
        for texture in self.textures.drain(..).rev() {
            uploader.release(texture.entry.slot, texture.handle);
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &TextureEntry> {
        self.textures.iter().map(|t| &t.entry)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingUploader {
        uploaded: u32,
        bound: Vec<(usize, u32)>,
        released: Vec<u32>,
    }

    impl TextureUploader for CountingUploader {
        type Handle = u32;

        fn upload(&mut self, _image: &DecodedImage, _label: &str) -> u32 {
            self.uploaded += 1;
            self.uploaded
        }

        fn bind(&mut self, slot: usize, handle: &u32) {
            self.bound.push((slot, *handle));
        }

        fn release(&mut self, _slot: usize, handle: u32) {
            self.released.push(handle);
        }
    }

    fn rgb(width: u32, height: u32) -> DecodedImage {
        DecodedImage {
            width,
            height,
            channels: 3,
            pixels: vec![128; (width * height * 3) as usize],
        }
    }

    #[test]
    fn test_slots_are_dense_and_ordered() {
        let mut uploader = CountingUploader::default();
        let mut registry = TextureRegistry::new();
        for (expected, tag) in ["wood", "metal", "wall"].iter().enumerate() {
            let slot = registry.register_image(&mut uploader, &rgb(2, 2), tag).unwrap();
            assert_eq!(slot, expected);
        }
        assert_eq!(registry.slot_of("metal"), Some(1));
        assert_eq!(registry.slot_of("glass"), None);
    }

    #[test]
    fn test_capacity_rejects_seventeenth() {
        let mut uploader = CountingUploader::default();
        let mut registry = TextureRegistry::new();
        for i in 0..MAX_TEXTURE_SLOTS {
            registry
                .register_image(&mut uploader, &rgb(1, 1), &format!("t{}", i))
                .unwrap();
        }
        let err = registry
            .register_image(&mut uploader, &rgb(1, 1), "one-too-many")
            .unwrap_err();
        assert!(matches!(err, TextureError::Capacity { max: 16 }));
        assert_eq!(registry.slot_of("one-too-many"), None);
        assert_eq!(uploader.uploaded, 16);
    }

    #[test]
    fn test_unsupported_channel_count_not_registered() {
        let mut uploader = CountingUploader::default();
        let mut registry = TextureRegistry::new();
        let gray = DecodedImage {
            width: 1,
            height: 1,
            channels: 1,
            pixels: vec![0],
        };
        let err = registry.register_image(&mut uploader, &gray, "gray").unwrap_err();
        assert!(matches!(err, TextureError::UnsupportedFormat { channels: 1, .. }));
        assert!(registry.is_empty());
        assert_eq!(uploader.uploaded, 0);
    }

    #[test]
    fn test_duplicate_tag_rejected() {
        let mut uploader = CountingUploader::default();
        let mut registry = TextureRegistry::new();
        registry.register_image(&mut uploader, &rgb(1, 1), "wood").unwrap();
        let err = registry
            .register_image(&mut uploader, &rgb(1, 1), "wood")
            .unwrap_err();
        assert!(matches!(err, TextureError::DuplicateTag(_)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let mut uploader = CountingUploader::default();
        let mut registry: TextureRegistry<u32> = TextureRegistry::new();
        let err = registry
            .register(&mut uploader, "does/not/exist.jpg", "ghost")
            .unwrap_err();
        assert!(matches!(err, TextureError::Load { .. }));
        assert_eq!(registry.slot_of("ghost"), None);
    }

    #[test]
    fn test_bind_all_is_idempotent() {
        let mut uploader = CountingUploader::default();
        let mut registry = TextureRegistry::new();
        registry.register_image(&mut uploader, &rgb(1, 1), "wood").unwrap();
        registry.register_image(&mut uploader, &rgb(1, 1), "metal").unwrap();

        registry.bind_all(&mut uploader);
        registry.bind_all(&mut uploader);
        assert_eq!(uploader.bound, vec![(0, 1), (1, 2), (0, 1), (1, 2)]);
    }

    #[test]
    fn test_teardown_releases_every_handle() {
        let mut uploader = CountingUploader::default();
        let mut registry = TextureRegistry::new();
        registry.register_image(&mut uploader, &rgb(1, 1), "wood").unwrap();
        registry.register_image(&mut uploader, &rgb(1, 1), "metal").unwrap();

        registry.teardown(&mut uploader);
        assert_eq!(uploader.released, vec![2, 1]);
        assert!(registry.is_empty());
        assert_eq!(registry.slot_of("wood"), None);

        registry.teardown(&mut uploader);
        assert_eq!(uploader.released.len(), 2);
    }

    #[test]
    fn test_decode_flips_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stripe.png");
        image::RgbImage::from_fn(1, 2, |_, y| {
            if y == 0 {
                image::Rgb([255, 0, 0])
            } else {
                image::Rgb([0, 0, 255])
            }
        })
        .save(&path)
        .unwrap();

        let decoded = decode_image(&path).unwrap();
        assert_eq!((decoded.width, decoded.height, decoded.channels), (1, 2, 3));
        // Bottom of the picture comes first
        assert_eq!(decoded.pixels, vec![0, 0, 255, 255, 0, 0]);
    }

    #[test]
    fn test_decode_keeps_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("glass.png");
        image::RgbaImage::from_pixel(2, 2, image::Rgba([10, 20, 30, 40]))
            .save(&path)
            .unwrap();

        let decoded = decode_image(&path).unwrap();
        assert_eq!(decoded.channels, 4);
        assert_eq!(decoded.pixels.len(), 16);
    }

    #[test]
    fn test_grayscale_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.png");
        image::GrayImage::from_pixel(2, 2, image::Luma([7])).save(&path).unwrap();

        let mut uploader = CountingUploader::default();
        let mut registry: TextureRegistry<u32> = TextureRegistry::new();
        let err = registry.register(&mut uploader, &path, "gray").unwrap_err();
        assert!(matches!(err, TextureError::UnsupportedFormat { channels: 1, .. }));
        assert!(registry.is_empty());
        assert_eq!(uploader.uploaded, 0);
    }

    #[test]
    fn test_register_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wood.jpg");
        image::RgbImage::from_pixel(4, 4, image::Rgb([120, 80, 40]))
            .save(&path)
            .unwrap();

        let mut uploader = CountingUploader::default();
        let mut registry = TextureRegistry::new();
        assert_eq!(registry.register(&mut uploader, &path, "wood").unwrap(), 0);
        assert_eq!(
            registry.entries().next(),
            Some(&TextureEntry {
                tag: "wood".to_string(),
                slot: 0,
                channels: 3,
            })
        );
    }

    #[test]
    fn test_rgb_expands_to_rgba() {
        let image = DecodedImage {
            width: 2,
            height: 1,
            channels: 3,
            pixels: vec![1, 2, 3, 4, 5, 6],
        };
        assert_eq!(image.to_rgba8(), vec![1, 2, 3, 255, 4, 5, 6, 255]);
    }
}
