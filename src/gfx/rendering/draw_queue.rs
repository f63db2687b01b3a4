//! Frame recorder behind the shading-stage interface
//!
//! Scene code sets uniforms by name and calls `draw`; the [`DrawQueue`]
//! keeps the uniform state and snapshots the per-draw part of it into a
//! [`DrawCommand`] on every draw. The render engine replays the commands in
//! a single render pass.

use cgmath::{Matrix4, Vector2, Vector3, Vector4};

use crate::gfx::{
    geometry::PrimitiveKind,
    shading::{MeshDrawer, ObjectUniform, SceneUniform, ShadingStage, ShadingState},
};

/// Everything needed to replay one draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub kind: PrimitiveKind,
    pub object: ObjectUniform,
    /// `None` samples the fallback texture.
    pub texture_slot: Option<usize>,
}

pub struct DrawQueue {
    state: ShadingState,
    commands: Vec<DrawCommand>,
}

impl Default for DrawQueue {
    fn default() -> Self {
        Self {
            state: ShadingState::new(),
            commands: Vec::new(),
        }
    }
}

impl DrawQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scene_uniform(&self) -> &SceneUniform {
        self.state.scene()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drops the recorded draws. Uniform state persists across frames.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl ShadingStage for DrawQueue {
    fn set_float(&mut self, name: &str, value: f32) {
        self.state.set_float(name, value);
    }

    fn set_int(&mut self, name: &str, value: i32) {
        self.state.set_int(name, value);
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        self.state.set_bool(name, value);
    }

    fn set_vec2(&mut self, name: &str, value: Vector2<f32>) {
        self.state.set_vec2(name, value);
    }

    fn set_vec3(&mut self, name: &str, value: Vector3<f32>) {
        self.state.set_vec3(name, value);
    }

    fn set_vec4(&mut self, name: &str, value: Vector4<f32>) {
        self.state.set_vec4(name, value);
    }

    fn set_mat4(&mut self, name: &str, value: Matrix4<f32>) {
        self.state.set_mat4(name, value);
    }

    fn set_sampler(&mut self, name: &str, slot: i32) {
        self.state.set_sampler(name, slot);
    }
}

impl MeshDrawer for DrawQueue {
    fn draw(&mut self, kind: PrimitiveKind) {
        self.commands.push(DrawCommand {
            kind,
            object: *self.state.object(),
            texture_slot: self.state.texture_slot(),
        });
    }
}
