//! One mesh, three interchangeable materials and three shapes.

use glam::Vec3;

use crate::constants::{
    CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR, CAMERA_Z, MESH_ROTATION_X, MESH_ROTATION_Y,
};
use crate::controller::Controller;
use crate::error::ConfigError;
use crate::event::InputEvent;
use crate::param::Value;
use crate::presets;
use crate::uniforms::Uniforms;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Shape {
    #[default]
    Cube,
    Sphere,
    Torus,
}

/// Geometry parameters the host builds the mesh from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Geometry {
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    },
}

impl Shape {
    pub const ALL: [Shape; 3] = [Shape::Cube, Shape::Sphere, Shape::Torus];

    pub fn from_name(name: &str) -> Option<Shape> {
        match name {
            "cube" => Some(Shape::Cube),
            "sphere" => Some(Shape::Sphere),
            "torus" => Some(Shape::Torus),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Shape::Cube => "cube",
            Shape::Sphere => "sphere",
            Shape::Torus => "torus",
        }
    }

    pub fn geometry(self) -> Geometry {
        match self {
            Shape::Cube => Geometry::Box {
                width: 6.0,
                height: 6.0,
                depth: 6.0,
            },
            Shape::Sphere => Geometry::Sphere {
                radius: 3.0,
                width_segments: 32,
                height_segments: 32,
            },
            Shape::Torus => Geometry::Torus {
                radius: 3.0,
                tube: 1.0,
                radial_segments: 32,
                tubular_segments: 64,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MaterialKind {
    Vertex,
    #[default]
    Gelatin,
    Creative,
}

impl MaterialKind {
    pub const ALL: [MaterialKind; 3] = [
        MaterialKind::Vertex,
        MaterialKind::Gelatin,
        MaterialKind::Creative,
    ];

    pub fn from_name(name: &str) -> Option<MaterialKind> {
        match name {
            "vertex" | "materialVertex" => Some(MaterialKind::Vertex),
            "gelatin" => Some(MaterialKind::Gelatin),
            "creative" => Some(MaterialKind::Creative),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MaterialKind::Vertex => "vertex",
            MaterialKind::Gelatin => "gelatin",
            MaterialKind::Creative => "creative",
        }
    }

    fn index(self) -> usize {
        match self {
            MaterialKind::Vertex => 0,
            MaterialKind::Gelatin => 1,
            MaterialKind::Creative => 2,
        }
    }
}

/// Perspective camera and mesh pose the host renders the showcase with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Staging {
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    pub camera_position: Vec3,
    /// Euler angles (radians) applied to the mesh, X then Y.
    pub mesh_rotation: Vec3,
}

impl Default for Staging {
    fn default() -> Self {
        Self {
            fov_deg: CAMERA_FOV_DEG,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            camera_position: Vec3::new(0.0, 0.0, CAMERA_Z),
            mesh_rotation: Vec3::new(MESH_ROTATION_X, MESH_ROTATION_Y, 0.0),
        }
    }
}

/// Material/shape switcher. Only the active material's controller advances;
/// the others keep their state until they are selected again.
#[derive(Debug)]
pub struct Showcase {
    shape: Shape,
    active: MaterialKind,
    controllers: [Controller; 3],
}

impl Showcase {
    pub fn new() -> Result<Self, ConfigError> {
        Ok(Self {
            shape: Shape::default(),
            active: MaterialKind::default(),
            controllers: [
                Controller::new(presets::vertex())?,
                Controller::new(presets::gelatin())?,
                Controller::new(presets::creative())?,
            ],
        })
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn set_shape(&mut self, shape: Shape) {
        if shape != self.shape {
            log::info!("[showcase] shape {} -> {}", self.shape.name(), shape.name());
            self.shape = shape;
        }
    }

    pub fn geometry(&self) -> Geometry {
        self.shape.geometry()
    }

    pub fn staging(&self) -> Staging {
        Staging::default()
    }

    pub fn material(&self) -> MaterialKind {
        self.active
    }

    pub fn set_material(&mut self, material: MaterialKind) {
        if material != self.active {
            log::info!(
                "[showcase] material {} -> {}",
                self.active.name(),
                material.name()
            );
            self.active = material;
        }
    }

    pub fn active(&self) -> &Controller {
        &self.controllers[self.active.index()]
    }

    pub fn active_mut(&mut self) -> &mut Controller {
        &mut self.controllers[self.active.index()]
    }

    pub fn controller(&self, material: MaterialKind) -> &Controller {
        &self.controllers[material.index()]
    }

    pub fn tick(&mut self, elapsed: f32) -> &Uniforms {
        self.active_mut().tick(elapsed)
    }

    /// Resizes reach every material; everything else goes to the active one.
    pub fn handle(&mut self, event: InputEvent) -> Result<(), ConfigError> {
        let now = self.active().elapsed();
        self.handle_at(event, now)
    }

    pub fn handle_at(&mut self, event: InputEvent, now: f32) -> Result<(), ConfigError> {
        if let InputEvent::Resize { .. } = event {
            for c in &mut self.controllers {
                c.handle_at(event.clone(), now)?;
            }
            return Ok(());
        }
        self.active_mut().handle_at(event, now)
    }

    pub fn set_static(&mut self, name: &str, value: Value) -> Result<(), ConfigError> {
        self.active_mut().set_static(name, value)
    }

    /// Register `listener` on every material, so it keeps firing after a switch.
    pub fn on_change<F>(&mut self, listener: F)
    where
        F: FnMut(&str, &Value) + Clone + 'static,
    {
        for c in &mut self.controllers {
            c.on_change(listener.clone());
        }
    }
}
