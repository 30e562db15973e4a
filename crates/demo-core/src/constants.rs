use glam::Vec3;

// Shared tuning constants used by the controller, the presets and the web front-end.

// Decay (click elasticity)
pub const DECAY_RATE: f32 = 0.02; // fraction of the current value removed per tick
pub const DECAY_FLOOR: f32 = 0.001; // below this the value snaps to exactly zero
pub const DECAY_PEAK: f32 = 1.0; // value an arming impulse sets
pub const DECAY_REFERENCE_HZ: f32 = 60.0; // refresh rate the per-tick rate was tuned at

// Impulse bookkeeping
pub const NO_IMPULSE_TIME: f32 = -1.0; // click time published before any hit / after a miss
pub const NO_IMPULSE_POINT: [f32; 3] = [-1.0, -1.0, -1.0];

// Offset added to scene time by the vertex-warp material
pub const VERTEX_TIME_OFFSET: f32 = 0.01;

// Trail
pub const TRAIL_FADE: f32 = 0.99; // opacity multiplier per slot of age
pub const TRAIL_DEFAULT_LEN: usize = 500;
pub const TRAIL_TINT_JITTER: f32 = 0.08;

// Spiral galaxy
pub const SPIRAL_DEFAULT_COUNT: usize = 20_000;
pub const SPIRAL_ANGLE_STEP: f32 = 0.137; // radians per particle index
pub const SPIRAL_RADIUS_SCALE: f32 = 0.05; // radius = scale * sqrt(index)
pub const SPIRAL_JITTER: f32 = 0.3;

// Fireworks
pub const BURST_DEFAULT_COUNT: usize = 1_500;
pub const BURST_SPEED_MIN: f32 = 2.0;
pub const BURST_SPEED_MAX: f32 = 6.0;
pub const BURST_LIFE_MIN: f32 = 1.2;
pub const BURST_LIFE_CEILING: f32 = 3.0; // per-particle lifetime ceiling (u_maxLife)
pub const GRAVITY: [f32; 3] = [0.0, -9.8, 0.0];

// Camera and mesh setup shared with the rendering host
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_Z: f32 = 9.0;
pub const MESH_ROTATION_Y: f32 = std::f32::consts::PI / 5.0;
pub const MESH_ROTATION_X: f32 = std::f32::consts::PI / 6.0;

// Default key that reseeds particle demos
pub const RESEED_KEY: &str = "r";

#[inline]
pub fn gravity_vec3() -> Vec3 {
    Vec3::from_array(GRAVITY)
}

#[inline]
pub fn no_impulse_point() -> Vec3 {
    Vec3::from_array(NO_IMPULSE_POINT)
}
