//! Light definitions and their one-shot upload to the shading stage
//!
//! The shader has one directional, one point and one spot light. A
//! [`LightSet`] is applied once during scene setup; only the spot light's
//! position and direction change afterwards, mirrored from the camera each
//! frame.

use cgmath::{Angle, Deg, Vector3};

use crate::gfx::shading::ShadingStage;

/// Ambient, diffuse and specular intensities of a light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightColor {
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
}

impl LightColor {
    /// Grey light with the same intensity on every channel.
    pub fn uniform(ambient: f32, diffuse: f32, specular: f32) -> Self {
        Self {
            ambient: Vector3::new(ambient, ambient, ambient),
            diffuse: Vector3::new(diffuse, diffuse, diffuse),
            specular: Vector3::new(specular, specular, specular),
        }
    }
}

/// Distance falloff `1 / (constant + linear*d + quadratic*d^2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightDescriptor {
    Directional {
        direction: Vector3<f32>,
        color: LightColor,
        active: bool,
    },
    Point {
        position: Vector3<f32>,
        color: LightColor,
        attenuation: Attenuation,
        active: bool,
    },
    Spot {
        position: Vector3<f32>,
        direction: Vector3<f32>,
        color: LightColor,
        attenuation: Attenuation,
        /// Full-intensity half-angle.
        inner_cone: Deg<f32>,
        /// Half-angle where the light has faded to zero.
        outer_cone: Deg<f32>,
        active: bool,
    },
}

impl LightDescriptor {
    /// Uniform struct name in the shader.
    pub fn uniform_prefix(&self) -> &'static str {
        match self {
            Self::Directional { .. } => "directionalLight",
            Self::Point { .. } => "pointLight",
            Self::Spot { .. } => "spotLight",
        }
    }

    /// Pushes this light's parameters under its uniform prefix.
    pub fn apply(&self, stage: &mut dyn ShadingStage) {
        let prefix = self.uniform_prefix();
        let name = |field: &str| format!("{}.{}", prefix, field);

        let (color, active) = match *self {
            Self::Directional {
                direction,
                color,
                active,
            } => {
                stage.set_vec3(&name("direction"), direction);
                (color, active)
            }
            Self::Point {
                position,
                color,
                attenuation,
                active,
            } => {
                stage.set_vec3(&name("position"), position);
                push_attenuation(stage, prefix, attenuation);
                (color, active)
            }
            Self::Spot {
                position,
                direction,
                color,
                attenuation,
                inner_cone,
                outer_cone,
                active,
            } => {
                stage.set_vec3(&name("position"), position);
                stage.set_vec3(&name("direction"), direction);
                push_attenuation(stage, prefix, attenuation);
                stage.set_float(&name("cutOff"), inner_cone.cos());
                stage.set_float(&name("outerCutOff"), outer_cone.cos());
                (color, active)
            }
        };

        stage.set_vec3(&name("ambient"), color.ambient);
        stage.set_vec3(&name("diffuse"), color.diffuse);
        stage.set_vec3(&name("specular"), color.specular);
        stage.set_bool(&name("bActive"), active);
    }
}

fn push_attenuation(stage: &mut dyn ShadingStage, prefix: &str, attenuation: Attenuation) {
    stage.set_float(&format!("{}.constant", prefix), attenuation.constant);
    stage.set_float(&format!("{}.linear", prefix), attenuation.linear);
    stage.set_float(&format!("{}.quadratic", prefix), attenuation.quadratic);
}

/// The lights of a scene.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LightSet {
    pub lights: Vec<LightDescriptor>,
}

impl LightSet {
    pub fn new(lights: Vec<LightDescriptor>) -> Self {
        Self { lights }
    }

    /// Enables lighting and pushes every light.
    pub fn apply(&self, stage: &mut dyn ShadingStage) {
        stage.set_bool("bUseLighting", true);
        for light in &self.lights {
            light.apply(stage);
        }
    }
}

/// Re-aims the spot light along the viewer's line of sight.
pub fn follow_viewer(stage: &mut dyn ShadingStage, position: Vector3<f32>, front: Vector3<f32>) {
    stage.set_vec3("spotLight.position", position);
    stage.set_vec3("spotLight.direction", front);
}
