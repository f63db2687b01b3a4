//! The desk scene
//!
//! Textures, materials, lights and the 25-object arrangement: a table with
//! four legs, a fabric mat, a keyboard with rails and end caps, a mouse, two
//! monitors on arms, a back wall and a water bottle.

use cgmath::{Deg, Vector3};

use super::{object::DrawDescriptor, SceneContent};
use crate::gfx::{
    geometry::PrimitiveKind::{self, Box, Cylinder, Plane, Sphere, Torus},
    lights::{Attenuation, LightColor, LightDescriptor, LightSet},
    resources::Material,
    transform::TransformParams,
};

/// Texture tag and path relative to the asset root.
pub const DESK_TEXTURES: [(&str, &str); 9] = [
    ("wood", "textures/wood/wood1.jpg"),
    ("metal", "textures/metal/metal.jpg"),
    ("wall", "textures/wall/wall3.jpg"),
    ("fabric", "textures/fabric/fabric1.jpg"),
    ("plastic", "textures/plastic/plastic.jpg"),
    ("keyboard", "textures/keyboard/keyboard.jpg"),
    ("mouse", "textures/mouse/mouse2.jpg"),
    ("bottle", "textures/bottle/bottle.jpg"),
    ("silver", "textures/silver/silver.jpg"),
];

/// Material pushed for the table top and the monitors. Other objects keep
/// whatever material is current when they are drawn.
pub const DESK_MATERIAL: &str = "plastic";

const fn object(
    kind: PrimitiveKind,
    scale: [f32; 3],
    rotation: [f32; 3],
    position: [f32; 3],
    texture: &'static str,
    uv: f32,
) -> DrawDescriptor {
    DrawDescriptor::new(kind, TransformParams::new(scale, rotation, position), texture)
        .with_uv_scale(uv, uv)
}

const NO_ROTATION: [f32; 3] = [0.0, 0.0, 0.0];

/// Draw order of the desk scene.
#[rustfmt::skip]
pub const DESK_OBJECTS: [DrawDescriptor; 25] = [
    // table top
    object(Box, [20.0, 1.5, 10.0], NO_ROTATION, [0.0, 0.0, 0.0], "wood", 1.0).with_material(DESK_MATERIAL),
    // left monitor: stand, arm, panel
    object(Cylinder, [0.5, 3.0, 0.25], NO_ROTATION, [-1.0, 1.0, -5.0], "plastic", 2.0).with_material(DESK_MATERIAL),
    object(Cylinder, [0.5, 7.0, 0.25], [15.0, 0.0, 60.0], [-1.0, 4.0, -5.0], "plastic", 2.0).with_material(DESK_MATERIAL),
    object(Box, [7.0, 4.0, 1.0], NO_ROTATION, [-5.0, 6.0, -3.0], "metal", 1.0).with_material(DESK_MATERIAL),
    // monitor base
    object(Box, [3.0, 1.0, 1.0], NO_ROTATION, [0.0, 1.0, -5.0], "plastic", 1.0).with_material(DESK_MATERIAL),
    // back wall
    object(Plane, [15.0, 3.0, 15.0], [90.0, 0.0, 0.0], [0.0, 4.0, -5.5], "wall", 1.0),
    // right monitor: stand, arm, panel
    object(Cylinder, [0.5, 3.0, 0.25], NO_ROTATION, [1.0, 1.0, -5.0], "plastic", 2.0).with_material(DESK_MATERIAL),
    object(Cylinder, [0.5, 7.0, 0.25], [15.0, 0.0, -60.0], [1.0, 4.0, -5.0], "plastic", 2.0).with_material(DESK_MATERIAL),
    object(Box, [7.0, 4.0, 1.0], NO_ROTATION, [5.0, 6.0, -3.0], "metal", 1.0).with_material(DESK_MATERIAL),
    // desk mat
    object(Box, [18.0, 0.15, 4.5], NO_ROTATION, [0.5, 1.0, -0.1], "fabric", 0.5),
    // keyboard, rails and end caps
    object(Box, [6.0, 1.0, 2.0], NO_ROTATION, [-2.0, 1.0, -0.25], "keyboard", 1.0),
    object(Box, [6.0, 1.0, 0.25], NO_ROTATION, [-2.0, 1.1, 0.65], "plastic", 1.0),
    object(Box, [6.0, 1.0, 0.25], NO_ROTATION, [-2.0, 1.1, -1.25], "plastic", 1.0),
    object(Box, [0.25, 0.75, 2.0], NO_ROTATION, [-5.0, 1.23, -0.25], "plastic", 1.0),
    object(Box, [0.25, 0.75, 2.0], NO_ROTATION, [1.0, 1.23, -0.25], "plastic", 1.0),
    // mouse
    object(Sphere, [0.5, 0.6, 1.0], NO_ROTATION, [4.0, 1.0, -0.25], "mouse", 1.0),
    // water bottle: base, body, handle, cap, cap ring
    object(Cylinder, [0.75, 0.3, 0.75], NO_ROTATION, [-8.0, 0.85, 4.0], "silver", 0.5),
    object(Cylinder, [0.75, 4.0, 0.75], NO_ROTATION, [-8.0, 1.2, 4.0], "bottle", 1.0),
    object(Torus, [0.55, 0.55, 0.55], [90.0, 90.0, 0.0], [-8.0, 5.25, 4.0], "silver", 0.5),
    object(Cylinder, [0.5, 0.5, 0.5], NO_ROTATION, [-8.0, 5.2, 4.0], "silver", 0.5),
    object(Torus, [0.4, 0.4, 0.5], NO_ROTATION, [-8.0, 5.75, 4.0], "silver", 0.5),
    // table legs
    object(Box, [1.5, 10.0, 1.5], NO_ROTATION, [-8.0, -5.5, -4.0], "wood", 1.0),
    object(Box, [1.5, 10.0, 1.5], NO_ROTATION, [8.0, -5.5, 4.0], "wood", 1.0),
    object(Box, [1.5, 10.0, 1.5], NO_ROTATION, [8.0, -5.5, -4.0], "wood", 1.0),
    object(Box, [1.5, 10.0, 1.5], NO_ROTATION, [-8.0, -5.5, 4.0], "wood", 1.0),
];

/// wood, silver and plastic; they differ only in shininess.
pub fn desk_materials() -> Vec<(&'static str, Material)> {
    let diffuse = Vector3::new(0.6, 0.6, 0.4);
    let specular = Vector3::new(0.6, 0.6, 0.6);
    vec![
        ("wood", Material::new(diffuse, specular, 5.0)),
        ("silver", Material::new(diffuse, specular, 52.0)),
        ("plastic", Material::new(diffuse, specular, 2.0)),
    ]
}

/// A dim directional fill, a spot light carried by the viewer and a warm
/// overhead point light.
pub fn desk_lights() -> LightSet {
    LightSet::new(vec![
        LightDescriptor::Directional {
            direction: Vector3::new(-0.3, -0.4, -0.5),
            color: LightColor::uniform(0.3, 0.6, 0.9),
            active: true,
        },
        LightDescriptor::Spot {
            // Re-aimed from the camera every frame
            position: Vector3::new(0.0, 5.0, 12.0),
            direction: Vector3::new(0.0, -0.5, -2.0),
            color: LightColor::uniform(0.1, 1.2, 1.5),
            attenuation: Attenuation {
                constant: 1.0,
                linear: 0.07,
                quadratic: 0.017,
            },
            inner_cone: Deg(18.0),
            outer_cone: Deg(25.0),
            active: true,
        },
        LightDescriptor::Point {
            position: Vector3::new(0.0, 10.0, 0.0),
            color: LightColor {
                ambient: Vector3::new(0.2, 0.2, 0.2),
                diffuse: Vector3::new(1.0, 0.9, 0.8),
                specular: Vector3::new(1.3, 1.3, 1.3),
            },
            attenuation: Attenuation {
                constant: 1.0,
                linear: 0.045,
                quadratic: 0.0075,
            },
            active: true,
        },
    ])
}

/// Everything the desk scene needs.
pub fn desk_scene() -> SceneContent {
    SceneContent {
        textures: &DESK_TEXTURES,
        materials: desk_materials(),
        lights: desk_lights(),
        objects: &DESK_OBJECTS,
    }
}
