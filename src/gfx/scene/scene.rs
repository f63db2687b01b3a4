use std::path::Path;

use crate::{
    error::MaterialError,
    gfx::{
        lights::LightSet,
        resources::{MaterialRegistry, TextureRegistry, TextureUploader},
        shading::{MeshDrawer, ShadingStage},
    },
};

use super::{object::DrawDescriptor, SceneContent};

/// Owns the scene's registries and draws its object list.
///
/// `H` is the texture handle type of the backend that uploads textures.
pub struct SceneManager<H> {
    textures: TextureRegistry<H>,
    materials: MaterialRegistry,
    content: SceneContent,
}

impl<H> SceneManager<H> {
    /// Creates a manager for `content`. Nothing is loaded until
    /// [`prepare_scene`](Self::prepare_scene).
    pub fn new(content: SceneContent) -> Self {
        Self {
            textures: TextureRegistry::new(),
            materials: MaterialRegistry::new(),
            content,
        }
    }

    pub fn textures(&self) -> &TextureRegistry<H> {
        &self.textures
    }

    pub fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }

    pub fn objects(&self) -> &[DrawDescriptor] {
        self.content.objects
    }

    pub fn lights(&self) -> &LightSet {
        &self.content.lights
    }

    /// Loads textures from `asset_root`, binds them, defines the materials
    /// and pushes the lights.
    ///
    /// A texture that fails to load is logged and skipped; its tag then
    /// draws untextured. Returns the number of textures registered.
    ///
    /// # Errors
    /// [`MaterialError::DuplicateTag`] if the content defines a material tag
    /// twice or the scene was already prepared.
    pub fn prepare_scene<U>(
        &mut self,
        uploader: &mut U,
        stage: &mut dyn ShadingStage,
        asset_root: &Path,
    ) -> Result<usize, MaterialError>
    where
        U: TextureUploader<Handle = H>,
    {
        for &(tag, relative) in self.content.textures {
            let path = asset_root.join(relative);
            if let Err(err) = self.textures.register(uploader, &path, tag) {
                if err.is_asset_error() {
                    log::warn!("skipping texture '{}': {}", tag, err);
                } else {
                    log::error!("texture '{}' not registered: {}", tag, err);
                }
            }
        }
        self.textures.bind_all(uploader);

        for (tag, material) in &self.content.materials {
            self.materials.define(tag, *material)?;
        }

        self.content.lights.apply(stage);

        log::info!(
            "scene prepared: {} of {} textures, {} materials, {} objects",
            self.textures.len(),
            self.content.textures.len(),
            self.materials.len(),
            self.content.objects.len()
        );
        Ok(self.textures.len())
    }

    /// Draws every object in list order.
    pub fn render_frame<F>(&self, frame: &mut F)
    where
        F: ShadingStage + MeshDrawer,
    {
        for object in self.content.objects {
            self.draw_object(frame, object);
        }
    }

    /// Pushes transform, texture and material for `object`, then draws it.
    pub fn draw_object<F>(&self, frame: &mut F, object: &DrawDescriptor)
    where
        F: ShadingStage + MeshDrawer,
    {
        frame.set_mat4("model", object.transform.model_matrix());

        match self.textures.slot_of(object.texture_tag) {
            Some(slot) => {
                frame.set_bool("bUseTexture", true);
                frame.set_sampler("objectTexture", slot as i32);
            }
            None => {
                log::debug!("texture '{}' not loaded, drawing untextured", object.texture_tag);
                frame.set_bool("bUseTexture", false);
                frame.set_sampler("objectTexture", -1);
            }
        }
        frame.set_vec2("UVscale", object.uv_scale);

        if let Some(tag) = object.material_tag {
            match self.materials.lookup(tag) {
                Some(material) => material.apply(frame),
                None => log::debug!("material '{}' not defined", tag),
            }
        }

        frame.draw(object.kind);
    }

    /// Releases every texture and forgets the materials. Safe to call twice.
    pub fn teardown<U>(&mut self, uploader: &mut U)
    where
        U: TextureUploader<Handle = H>,
    {
        self.textures.teardown(uploader);
        self.materials.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{
        geometry::PrimitiveKind,
        resources::{DecodedImage, Material},
        shading::ShadingState,
        transform::TransformParams,
    };
    use cgmath::Vector3;

    struct NullUploader;

    impl TextureUploader for NullUploader {
        type Handle = ();

        fn upload(&mut self, _image: &DecodedImage, _label: &str) {}

        fn bind(&mut self, _slot: usize, _handle: &()) {}

        fn release(&mut self, _slot: usize, _handle: ()) {}
    }

    #[derive(Default)]
    struct Capture {
        state: ShadingState,
        draws: Vec<(PrimitiveKind, Option<usize>, f32)>,
    }

    impl ShadingStage for Capture {
        fn set_float(&mut self, name: &str, value: f32) {
            self.state.set_float(name, value)
        }
        fn set_int(&mut self, name: &str, value: i32) {
            self.state.set_int(name, value)
        }
        fn set_bool(&mut self, name: &str, value: bool) {
            self.state.set_bool(name, value)
        }
        fn set_vec2(&mut self, name: &str, value: cgmath::Vector2<f32>) {
            self.state.set_vec2(name, value)
        }
        fn set_vec3(&mut self, name: &str, value: Vector3<f32>) {
            self.state.set_vec3(name, value)
        }
        fn set_vec4(&mut self, name: &str, value: cgmath::Vector4<f32>) {
            self.state.set_vec4(name, value)
        }
        fn set_mat4(&mut self, name: &str, value: cgmath::Matrix4<f32>) {
            self.state.set_mat4(name, value)
        }
        fn set_sampler(&mut self, name: &str, slot: i32) {
            self.state.set_sampler(name, slot)
        }
    }

    impl MeshDrawer for Capture {
        fn draw(&mut self, kind: PrimitiveKind) {
            self.draws.push((
                kind,
                self.state.texture_slot(),
                self.state.object().material.shininess,
            ));
        }
    }

    const OBJECTS: [DrawDescriptor; 2] = [
        DrawDescriptor::new(PrimitiveKind::Box, TransformParams::new([1.0; 3], [0.0; 3], [0.0; 3]), "wood")
            .with_material("glossy"),
        DrawDescriptor::new(PrimitiveKind::Torus, TransformParams::new([1.0; 3], [0.0; 3], [0.0; 3]), "missing")
            .with_material("unknown"),
    ];

    fn content() -> SceneContent {
        SceneContent {
            textures: &[("wood", "does/not/exist.png")],
            materials: vec![(
                "glossy",
                Material::new(Vector3::new(1.0, 1.0, 1.0), Vector3::new(1.0, 1.0, 1.0), 64.0),
            )],
            lights: LightSet::default(),
            objects: &OBJECTS,
        }
    }

    #[test]
    fn test_missing_texture_is_skipped_not_fatal() {
        let mut scene = SceneManager::new(content());
        let mut stage = ShadingState::new();
        let loaded = scene
            .prepare_scene(&mut NullUploader, &mut stage, Path::new("."))
            .unwrap();
        assert_eq!(loaded, 0);
        assert_eq!(scene.materials().len(), 1);
        assert_eq!(stage.scene().use_lighting, 1);
    }

    #[test]
    fn test_lookup_misses_degrade() {
        let mut scene = SceneManager::new(content());
        let mut frame = Capture::default();
        scene
            .prepare_scene(&mut NullUploader, &mut frame.state, Path::new("."))
            .unwrap();
        scene.render_frame(&mut frame);

        // The unknown material leaves the previous one in place
        assert_eq!(
            frame.draws,
            vec![
                (PrimitiveKind::Box, None, 64.0),
                (PrimitiveKind::Torus, None, 64.0)
            ]
        );
    }

    #[test]
    fn test_second_prepare_rejects_duplicate_materials() {
        let mut scene = SceneManager::new(content());
        let mut stage = ShadingState::new();
        scene
            .prepare_scene(&mut NullUploader, &mut stage, Path::new("."))
            .unwrap();
        let err = scene
            .prepare_scene(&mut NullUploader, &mut stage, Path::new("."))
            .unwrap_err();
        assert!(matches!(err, MaterialError::DuplicateTag(tag) if tag == "glossy"));
    }

    #[test]
    fn test_teardown_clears_registries() {
        let mut scene = SceneManager::new(content());
        let mut stage = ShadingState::new();
        scene
            .prepare_scene(&mut NullUploader, &mut stage, Path::new("."))
            .unwrap();
        scene.teardown(&mut NullUploader);
        scene.teardown(&mut NullUploader);
        assert!(scene.materials().is_empty());
        assert!(scene.textures().is_empty());
    }

    #[derive(Default)]
    struct CountingUploader {
        uploaded: usize,
        released: usize,
    }

    impl TextureUploader for CountingUploader {
        type Handle = usize;

        fn upload(&mut self, _image: &DecodedImage, _label: &str) -> usize {
            self.uploaded += 1;
            self.uploaded
        }

        fn bind(&mut self, _slot: usize, _handle: &usize) {}

        fn release(&mut self, _slot: usize, _handle: usize) {
            self.released += 1;
        }
    }

    #[test]
    fn test_failed_prepare_leaves_loaded_textures_releasable() {
        let root = tempfile::tempdir().unwrap();
        image::RgbImage::from_pixel(2, 2, image::Rgb([10, 20, 30]))
            .save(root.path().join("wood.png"))
            .unwrap();

        let glossy = Material::new(Vector3::new(1.0, 1.0, 1.0), Vector3::new(1.0, 1.0, 1.0), 64.0);
        let mut scene = SceneManager::new(SceneContent {
            textures: &[("wood", "wood.png")],
            materials: vec![("glossy", glossy), ("glossy", glossy)],
            lights: LightSet::default(),
            objects: &OBJECTS,
        });
        let mut uploader = CountingUploader::default();
        let mut stage = ShadingState::new();

        let err = scene
            .prepare_scene(&mut uploader, &mut stage, root.path())
            .unwrap_err();
        assert!(matches!(err, MaterialError::DuplicateTag(ref tag) if tag == "glossy"));
        assert_eq!(uploader.uploaded, 1);
        assert_eq!(scene.textures().len(), 1);

        scene.teardown(&mut uploader);
        assert_eq!(uploader.released, 1);
        assert!(scene.textures().is_empty());
    }
}
