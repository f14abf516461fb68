//! Fixed-point matrices as stored in the graphics pool.

use pinewood_core::math::Mat4;

/// A 4x4 matrix in s15.16 fixed point, row major.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Mtx {
    pub m: [[i32; 4]; 4],
}

/// Size of one [`Mtx`] in the graphics pool.
pub const MTX_SIZE: usize = std::mem::size_of::<Mtx>();

static_assertions::const_assert_eq!(MTX_SIZE, 64);

const FIXED_ONE: f32 = 65536.0;

impl Mtx {
    pub const IDENTITY: Self = Self {
        m: [
            [0x10000, 0, 0, 0],
            [0, 0x10000, 0, 0],
            [0, 0, 0x10000, 0],
            [0, 0, 0, 0x10000],
        ],
    };

    /// Convert from a float matrix. Entries outside ±32768 saturate.
    pub fn from_mat4(mat: &Mat4) -> Self {
        let mut m = [[0i32; 4]; 4];
        for (row, out) in m.iter_mut().enumerate() {
            for (col, value) in out.iter_mut().enumerate() {
                *value = (mat[(row, col)] * FIXED_ONE).round() as i32;
            }
        }
        Self { m }
    }

    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_fn(|row, col| self.m[row][col] as f32 / FIXED_ONE)
    }
}

impl Default for Mtx {
    fn default() -> Self {
        Self::IDENTITY
    }
}
