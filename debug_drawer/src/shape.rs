use pinewood_core::color::PackedColor;
use pinewood_core::math::{try_normalize, widen_vec3, Vec3, UP};
use pinewood_graphics::Vtx;

/// A box queued for this frame.
///
/// Spans `center - bounds` to `center + bounds`, rotated by `yaw` (binary
/// angle) about the vertical axis through `center`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebugBox {
    pub center: [i16; 3],
    pub bounds: [i16; 3],
    pub yaw: i16,
    pub color: PackedColor,
}

impl DebugBox {
    /// Corner vertices around `center`, unrotated.
    ///
    /// Slots 0-3 are the `-z` face, 4-7 the `+z` face; even slots are on
    /// the left, slots 0, 1, 4, 5 on top.
    pub fn vertices(&self) -> [Vtx; 8] {
        let [x, y, z] = self.center.map(i32::from);
        let [w, h, d] = self.bounds.map(i32::from);
        let color = self.color.to_rgba();
        let v = |x: i32, y: i32, z: i32| Vtx::colored([clamp(x), clamp(y), clamp(z)], color);
        [
            v(x - w, y + h, z - d),
            v(x + w, y + h, z - d),
            v(x - w, y - h, z - d),
            v(x + w, y - h, z - d),
            v(x - w, y + h, z + d),
            v(x + w, y + h, z + d),
            v(x - w, y - h, z + d),
            v(x + w, y - h, z + d),
        ]
    }

    pub fn is_rotated(&self) -> bool {
        self.yaw != 0
    }
}

/// A rect queued for this frame: a slab from `start` to `end` whose square
/// cross-section extends `width` units to each side of the segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebugRect {
    pub start: [i16; 3],
    pub end: [i16; 3],
    pub width: u32,
    pub color: PackedColor,
}

impl DebugRect {
    /// Right and up vectors perpendicular to the segment.
    ///
    /// The world up axis is the reference; segments parallel to it use
    /// world X instead. A zero-length segment is treated as pointing +Z.
    pub fn basis(&self) -> (Vec3, Vec3) {
        let start = widen_vec3(self.start);
        let end = widen_vec3(self.end);
        let dir = try_normalize(&(start - end)).unwrap_or_else(Vec3::z);

        let world_up = Vec3::from(UP);
        let right = try_normalize(&world_up.cross(&dir))
            .or_else(|| try_normalize(&Vec3::x().cross(&dir)))
            .unwrap_or_else(Vec3::x);
        let up = try_normalize(&dir.cross(&right)).unwrap_or(world_up);
        (right, up)
    }

    /// Slab corners. Slots 0-3 surround `start`, 4-7 surround `end`, in
    /// the same up/down, left/right order as [`DebugBox::vertices`].
    pub fn vertices(&self) -> [Vtx; 8] {
        let (right, up) = self.basis();
        let width = self.width as f32;
        let up = up * width;
        let right = right * width;
        let color = self.color.to_rgba();

        let start = widen_vec3(self.start);
        let end = widen_vec3(self.end);
        let v = |p: Vec3| Vtx::colored([p.x as i16, p.y as i16, p.z as i16], color);
        [
            v(start + up - right),
            v(start + up + right),
            v(start - up - right),
            v(start - up + right),
            v(end + up - right),
            v(end + up + right),
            v(end - up - right),
            v(end - up + right),
        ]
    }
}

fn clamp(value: i32) -> i16 {
    value.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).norm() < 1.0e-5
    }

    #[test]
    fn test_box_corners() {
        let b = DebugBox {
            center: [10, 20, 30],
            bounds: [1, 2, 3],
            yaw: 0,
            color: PackedColor(0x7F11_2233),
        };
        let v = b.vertices();
        assert_eq!(v[0].ob, [9, 22, 27]);
        assert_eq!(v[7].ob, [11, 18, 33]);
        assert!(v.iter().all(|v| v.color == [0x11, 0x22, 0x33, 0x7F]));
    }

    #[test]
    fn test_box_corners_clamp() {
        let b = DebugBox {
            center: [i16::MAX, 0, i16::MIN],
            bounds: [100, 0, 100],
            yaw: 0,
            color: PackedColor::WHITE,
        };
        let v = b.vertices();
        assert_eq!(v[1].ob[0], i16::MAX);
        assert_eq!(v[0].ob[2], i16::MIN);
    }

    #[test]
    fn test_rect_basis_is_orthonormal() {
        let r = DebugRect {
            start: [0, 0, 0],
            end: [100, 50, -30],
            width: 5,
            color: PackedColor::GREEN,
        };
        let (right, up) = r.basis();
        let dir = (widen_vec3(r.start) - widen_vec3(r.end)).normalize();
        assert!((right.norm() - 1.0).abs() < 1.0e-5);
        assert!((up.norm() - 1.0).abs() < 1.0e-5);
        assert!(right.dot(&dir).abs() < 1.0e-5);
        assert!(up.dot(&dir).abs() < 1.0e-5);
        assert!(right.dot(&up).abs() < 1.0e-5);
    }

    #[test]
    fn test_horizontal_rect_vertices() {
        let r = DebugRect {
            start: [0, 0, 0],
            end: [0, 0, 100],
            width: 10,
            color: PackedColor::RED,
        };
        let (right, up) = r.basis();
        // dir = -Z, right = up x dir = -X, up = dir x right = +Y
        assert!(approx_eq(right, Vec3::new(-1.0, 0.0, 0.0)));
        assert!(approx_eq(up, Vec3::new(0.0, 1.0, 0.0)));

        let v = r.vertices();
        assert_eq!(v[0].ob, [10, 10, 0]);
        assert_eq!(v[3].ob, [-10, -10, 0]);
        assert_eq!(v[4].ob, [10, 10, 100]);
        assert_eq!(v[7].ob, [-10, -10, 100]);
    }

    #[test]
    fn test_vertical_rect_has_a_basis() {
        let r = DebugRect {
            start: [0, 0, 0],
            end: [0, 200, 0],
            width: 4,
            color: PackedColor::BLUE,
        };
        let (right, up) = r.basis();
        assert!((right.norm() - 1.0).abs() < 1.0e-5);
        assert!((up.norm() - 1.0).abs() < 1.0e-5);
        assert!(right.y.abs() < 1.0e-5);
        assert!(up.y.abs() < 1.0e-5);
    }

    #[test]
    fn test_zero_length_rect() {
        let r = DebugRect {
            start: [5, 5, 5],
            end: [5, 5, 5],
            width: 2,
            color: PackedColor::WHITE,
        };
        let v = r.vertices();
        assert!(v.iter().all(|v| v.ob.iter().all(|c| (3..=7).contains(c))));
    }
}
