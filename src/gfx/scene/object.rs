//! Draw descriptors
//!
//! A scene is a fixed list of [`DrawDescriptor`]s. Each one names a
//! primitive mesh and everything needed to place and shade it.

use cgmath::Vector2;

use crate::gfx::{geometry::PrimitiveKind, transform::TransformParams};

/// One entry of a scene's object list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawDescriptor {
    pub kind: PrimitiveKind,
    pub transform: TransformParams,
    /// Texture sampled by this object. Unknown tags draw untextured.
    pub texture_tag: &'static str,
    /// Material pushed before the draw. `None` keeps whatever is current.
    pub material_tag: Option<&'static str>,
    /// Texture coordinate multiplier, `(1, 1)` for one repeat per face.
    pub uv_scale: Vector2<f32>,
}

impl DrawDescriptor {
    pub const fn new(kind: PrimitiveKind, transform: TransformParams, texture_tag: &'static str) -> Self {
        Self {
            kind,
            transform,
            texture_tag,
            material_tag: None,
            uv_scale: Vector2::new(1.0, 1.0),
        }
    }

    pub const fn with_material(mut self, tag: &'static str) -> Self {
        self.material_tag = Some(tag);
        self
    }

    pub const fn with_uv_scale(mut self, u: f32, v: f32) -> Self {
        self.uv_scale = Vector2::new(u, v);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let descriptor = DrawDescriptor::new(PrimitiveKind::Box, TransformParams::default(), "wood");
        assert_eq!(descriptor.material_tag, None);
        assert_eq!(descriptor.uv_scale, Vector2::new(1.0, 1.0));

        let descriptor = descriptor.with_material("plastic").with_uv_scale(0.5, 2.0);
        assert_eq!(descriptor.material_tag, Some("plastic"));
        assert_eq!(descriptor.uv_scale, Vector2::new(0.5, 2.0));
    }
}
