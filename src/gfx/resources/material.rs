//! Material registry for Phong shading
//!
//! Materials are stored in definition order and looked up by tag with a
//! linear scan. A scene defines a handful of materials, so a map would buy
//! nothing. Tags are unique: defining one twice is rejected.

use cgmath::Vector3;

use crate::{error::MaterialError, gfx::shading::ShadingStage};

/// Phong shading coefficients
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub ambient_color: Vector3<f32>,
    pub ambient_strength: f32,
    pub diffuse_color: Vector3<f32>,
    pub specular_color: Vector3<f32>,
    pub shininess: f32,
}

impl Material {
    /// Material with the default ambient term used by the desk scene.
    pub fn new(diffuse_color: Vector3<f32>, specular_color: Vector3<f32>, shininess: f32) -> Self {
        Self {
            ambient_color: Vector3::new(0.2, 0.2, 0.2),
            ambient_strength: 0.3,
            diffuse_color,
            specular_color,
            shininess,
        }
    }

    /// Pushes every coefficient to the `material.*` uniforms.
    pub fn apply(&self, stage: &mut dyn ShadingStage) {
        stage.set_vec3("material.ambientColor", self.ambient_color);
        stage.set_float("material.ambientStrength", self.ambient_strength);
        stage.set_vec3("material.diffuseColor", self.diffuse_color);
        stage.set_vec3("material.specularColor", self.specular_color);
        stage.set_float("material.shininess", self.shininess);
    }
}

#[derive(Debug, Clone)]
struct MaterialEntry {
    tag: String,
    material: Material,
}

/// Ordered collection of tagged materials
#[derive(Debug, Clone, Default)]
pub struct MaterialRegistry {
    entries: Vec<MaterialEntry>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a material under `tag`.
    ///
    /// # Errors
    /// [`MaterialError::DuplicateTag`] if `tag` is already defined; the
    /// existing material is left untouched.
    pub fn define(&mut self, tag: &str, material: Material) -> Result<(), MaterialError> {
        if self.lookup(tag).is_some() {
            return Err(MaterialError::DuplicateTag(tag.to_string()));
        }
        self.entries.push(MaterialEntry {
            tag: tag.to_string(),
            material,
        });
        Ok(())
    }

    pub fn lookup(&self, tag: &str) -> Option<&Material> {
        self.entries
            .iter()
            .find(|entry| entry.tag == tag)
            .map(|entry| &entry.material)
    }

    /// Tags in definition order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.tag.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
