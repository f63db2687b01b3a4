//! Named-uniform interface to the shading stage
//!
//! Scene code never touches GPU buffers directly. It pushes values by the
//! uniform names the shader declares (`"model"`, `"material.shininess"`,
//! `"spotLight.position"`, ...) through [`ShadingStage`], then asks a
//! [`MeshDrawer`] to draw a primitive with whatever state is current.
//!
//! [`ShadingState`] is the CPU mirror of the shader's two uniform blocks:
//! [`SceneUniform`] (camera and lights, bound once per frame) and
//! [`ObjectUniform`] (transform, colour, texture flag and material, captured
//! per draw).

use cgmath::{Matrix4, SquareMatrix, Vector2, Vector3, Vector4};

use crate::gfx::geometry::PrimitiveKind;

/// Setter interface for the shader's named uniforms.
///
/// A value takes effect on the next draw issued after it was set. Names the
/// stage does not know are ignored.
pub trait ShadingStage {
    fn set_float(&mut self, name: &str, value: f32);
    fn set_int(&mut self, name: &str, value: i32);
    fn set_bool(&mut self, name: &str, value: bool);
    fn set_vec2(&mut self, name: &str, value: Vector2<f32>);
    fn set_vec3(&mut self, name: &str, value: Vector3<f32>);
    fn set_vec4(&mut self, name: &str, value: Vector4<f32>);
    fn set_mat4(&mut self, name: &str, value: Matrix4<f32>);
    /// Points a sampler uniform at a texture slot. Negative means no texture.
    fn set_sampler(&mut self, name: &str, slot: i32);
}

/// Draws a pre-generated primitive mesh using the current shading state.
pub trait MeshDrawer {
    fn draw(&mut self, kind: PrimitiveKind);
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DirectionalLightUniform {
    pub direction: [f32; 3],
    pub active: u32,
    pub ambient: [f32; 3],
    _pad0: f32,
    pub diffuse: [f32; 3],
    _pad1: f32,
    pub specular: [f32; 3],
    _pad2: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointLightUniform {
    pub position: [f32; 3],
    pub active: u32,
    pub ambient: [f32; 3],
    pub constant: f32,
    pub diffuse: [f32; 3],
    pub linear: f32,
    pub specular: [f32; 3],
    pub quadratic: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpotLightUniform {
    pub position: [f32; 3],
    pub active: u32,
    pub direction: [f32; 3],
    pub cut_off: f32,
    pub ambient: [f32; 3],
    pub outer_cut_off: f32,
    pub diffuse: [f32; 3],
    pub constant: f32,
    pub specular: [f32; 3],
    pub linear: f32,
    pub quadratic: f32,
    _pad: [f32; 3],
}

/// Camera and light state shared by every draw in a frame.
///
/// MUST match `SceneUniform` in `scene.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub view_position: [f32; 3],
    pub use_lighting: u32,
    pub directional_light: DirectionalLightUniform,
    pub point_light: PointLightUniform,
    pub spot_light: SpotLightUniform,
}
// 64 + 64 + 16 + 64 + 64 + 96 = 368 bytes

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub ambient_color: [f32; 3],
    pub ambient_strength: f32,
    pub diffuse_color: [f32; 3],
    pub shininess: f32,
    pub specular_color: [f32; 3],
    _pad: f32,
}

/// Per-draw state, captured every time a primitive is drawn.
///
/// MUST match `ObjectUniform` in `scene.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub object_color: [f32; 4],
    pub uv_scale: [f32; 2],
    pub use_texture: u32,
    _pad: u32,
    pub material: MaterialUniform,
}
// 64 + 16 + 16 + 48 = 144 bytes

impl Default for ObjectUniform {
    fn default() -> Self {
        Self {
            model: Matrix4::<f32>::identity().into(),
            object_color: [1.0, 1.0, 1.0, 1.0],
            uv_scale: [1.0, 1.0],
            use_texture: 0,
            _pad: 0,
            material: MaterialUniform {
                ambient_color: [1.0, 1.0, 1.0],
                ambient_strength: 0.1,
                diffuse_color: [1.0, 1.0, 1.0],
                shininess: 32.0,
                specular_color: [0.5, 0.5, 0.5],
                _pad: 0.0,
            },
        }
    }
}

impl Default for SceneUniform {
    fn default() -> Self {
        let identity: [[f32; 4]; 4] = Matrix4::<f32>::identity().into();
        Self {
            view: identity,
            projection: identity,
            view_position: [0.0; 3],
            use_lighting: 0,
            directional_light: bytemuck::Zeroable::zeroed(),
            point_light: bytemuck::Zeroable::zeroed(),
            spot_light: bytemuck::Zeroable::zeroed(),
        }
    }
}

/// CPU-side uniform state addressed by shader uniform name.
#[derive(Debug, Clone, Default)]
pub struct ShadingState {
    scene: SceneUniform,
    object: ObjectUniform,
    texture_slot: i32,
}

fn ignored(name: &str, kind: &str) {
    log::debug!("ignoring unknown {} uniform '{}'", kind, name);
}

impl ShadingState {
    pub fn new() -> Self {
        Self {
            texture_slot: -1,
            ..Default::default()
        }
    }

    pub fn scene(&self) -> &SceneUniform {
        &self.scene
    }

    pub fn object(&self) -> &ObjectUniform {
        &self.object
    }

    /// Texture slot the next draw samples, if texturing is enabled and the
    /// sampler points at a real slot.
    pub fn texture_slot(&self) -> Option<usize> {
        if self.object.use_texture != 0 && self.texture_slot >= 0 {
            Some(self.texture_slot as usize)
        } else {
            None
        }
    }

    /// Sets whichever boolean uniform `name` refers to.
    fn flag(&mut self, name: &str) -> Option<&mut u32> {
        let scene = &mut self.scene;
        Some(match name {
            "bUseTexture" => &mut self.object.use_texture,
            "bUseLighting" => &mut scene.use_lighting,
            "directionalLight.bActive" => &mut scene.directional_light.active,
            "pointLight.bActive" => &mut scene.point_light.active,
            "spotLight.bActive" => &mut scene.spot_light.active,
            _ => return None,
        })
    }
}

impl ShadingStage for ShadingState {
    fn set_float(&mut self, name: &str, value: f32) {
        let scene = &mut self.scene;
        let target = match name {
            "material.ambientStrength" => &mut self.object.material.ambient_strength,
            "material.shininess" => &mut self.object.material.shininess,
            "pointLight.constant" => &mut scene.point_light.constant,
            "pointLight.linear" => &mut scene.point_light.linear,
            "pointLight.quadratic" => &mut scene.point_light.quadratic,
            "spotLight.constant" => &mut scene.spot_light.constant,
            "spotLight.linear" => &mut scene.spot_light.linear,
            "spotLight.quadratic" => &mut scene.spot_light.quadratic,
            "spotLight.cutOff" => &mut scene.spot_light.cut_off,
            "spotLight.outerCutOff" => &mut scene.spot_light.outer_cut_off,
            _ => return ignored(name, "float"),
        };
        *target = value;
    }

    fn set_int(&mut self, name: &str, value: i32) {
        if name == "objectTexture" {
            self.texture_slot = value;
        } else if let Some(flag) = self.flag(name) {
            *flag = (value != 0) as u32;
        } else {
            ignored(name, "int");
        }
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        match self.flag(name) {
            Some(flag) => *flag = value as u32,
            None => ignored(name, "bool"),
        }
    }

    fn set_vec2(&mut self, name: &str, value: Vector2<f32>) {
        match name {
            "UVscale" => self.object.uv_scale = value.into(),
            _ => ignored(name, "vec2"),
        }
    }

    fn set_vec3(&mut self, name: &str, value: Vector3<f32>) {
        let scene = &mut self.scene;
        let material = &mut self.object.material;
        let target = match name {
            "viewPosition" => &mut scene.view_position,
            "material.ambientColor" => &mut material.ambient_color,
            "material.diffuseColor" => &mut material.diffuse_color,
            "material.specularColor" => &mut material.specular_color,
            "directionalLight.direction" => &mut scene.directional_light.direction,
            "directionalLight.ambient" => &mut scene.directional_light.ambient,
            "directionalLight.diffuse" => &mut scene.directional_light.diffuse,
            "directionalLight.specular" => &mut scene.directional_light.specular,
            "pointLight.position" => &mut scene.point_light.position,
            "pointLight.ambient" => &mut scene.point_light.ambient,
            "pointLight.diffuse" => &mut scene.point_light.diffuse,
            "pointLight.specular" => &mut scene.point_light.specular,
            "spotLight.position" => &mut scene.spot_light.position,
            "spotLight.direction" => &mut scene.spot_light.direction,
            "spotLight.ambient" => &mut scene.spot_light.ambient,
            "spotLight.diffuse" => &mut scene.spot_light.diffuse,
            "spotLight.specular" => &mut scene.spot_light.specular,
            _ => return ignored(name, "vec3"),
        };
        *target = value.into();
    }

    fn set_vec4(&mut self, name: &str, value: Vector4<f32>) {
        match name {
            "objectColor" => self.object.object_color = value.into(),
            _ => ignored(name, "vec4"),
        }
    }

    fn set_mat4(&mut self, name: &str, value: Matrix4<f32>) {
        let target = match name {
            "model" => &mut self.object.model,
            "view" => &mut self.scene.view,
            "projection" => &mut self.scene.projection,
            _ => return ignored(name, "mat4"),
        };
        *target = value.into();
    }

    fn set_sampler(&mut self, name: &str, slot: i32) {
        match name {
            "objectTexture" => self.texture_slot = slot,
            _ => ignored(name, "sampler"),
        }
    }
}
