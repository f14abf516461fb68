//! Math type aliases and helper functions.
//!
//! Rendering math is always f32. Vertex data handed to the display list is
//! quantised to signed 16-bit integers, and rotations coming from game code
//! use 16-bit binary angles (0x10000 units per turn).

pub use nalgebra;

/// 3D vector (f32).
pub type Vec3 = nalgebra::Vector3<f32>;

/// 4x4 matrix (f32).
pub type Mat4 = nalgebra::Matrix4<f32>;

/// World up axis.
pub const UP: [f32; 3] = [0.0, 1.0, 0.0];

/// Convert a float position into signed 16-bit vertex space.
///
/// Truncates toward zero. Values outside the `i16` range saturate.
pub fn quantize_vec3(v: [f32; 3]) -> [i16; 3] {
    [v[0] as i16, v[1] as i16, v[2] as i16]
}

/// Widen a quantised position back to floats.
pub fn widen_vec3(v: [i16; 3]) -> Vec3 {
    Vec3::new(v[0] as f32, v[1] as f32, v[2] as f32)
}

/// Convert a 16-bit binary angle to radians.
///
/// `0x4000` is a quarter turn; negative values rotate the other way.
pub fn binary_angle_to_radians(angle: i16) -> f32 {
    angle as f32 / 32768.0 * std::f32::consts::PI
}

/// Unit direction for a pitch/yaw pair (radians).
///
/// Yaw 0 looks down +Z, positive pitch looks up.
pub fn angle_to_direction(pitch: f32, yaw: f32) -> Vec3 {
    let (sin_p, cos_p) = pitch.sin_cos();
    let (sin_y, cos_y) = yaw.sin_cos();
    Vec3::new(cos_p * sin_y, sin_p, cos_p * cos_y)
}

/// Translation matrix.
pub fn translation(offset: &Vec3) -> Mat4 {
    Mat4::new_translation(offset)
}

/// Rotation about the world Y axis.
pub fn rotation_y(radians: f32) -> Mat4 {
    Mat4::from_axis_angle(&Vec3::y_axis(), radians)
}

/// Normalize `v`, returning `None` for (near) zero-length vectors.
pub fn try_normalize(v: &Vec3) -> Option<Vec3> {
    v.try_normalize(1.0e-6)
}
