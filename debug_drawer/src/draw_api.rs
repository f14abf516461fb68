use pinewood_core::color::PackedColor;
use pinewood_core::math::{angle_to_direction, quantize_vec3, Vec3};

use crate::drawer::DebugDrawerContext;
use crate::shape::{DebugBox, DebugRect};

impl DebugDrawerContext<'_> {
    /// Set the colour for boxes queued after this call (`0xAARRGGBB`).
    pub fn set_box_color(&mut self, color: impl Into<PackedColor>) {
        self.box_color = color.into();
    }

    /// Draw a box from `center - bounds` to `center + bounds`.
    ///
    /// To draw a rotated box, use [`debug_box_rot`](Self::debug_box_rot).
    pub fn debug_box(&mut self, center: [f32; 3], bounds: [f32; 3]) {
        self.debug_box_rot(center, bounds, 0);
    }

    /// Draw a box rotated by `yaw` (0x10000 per turn) around its center.
    pub fn debug_box_rot(&mut self, center: [f32; 3], bounds: [f32; 3], yaw: i16) {
        let shape = DebugBox {
            center: quantize_vec3(center),
            bounds: quantize_vec3(bounds),
            yaw,
            color: self.box_color,
        };
        self.push_box(shape);
    }

    /// Draw a box spanning the two corners `min` and `max`.
    pub fn debug_box_pos(&mut self, min: [f32; 3], max: [f32; 3]) {
        self.debug_box_pos_rot(min, max, 0);
    }

    /// Draw a box spanning two corners, rotated by `yaw` around its center.
    pub fn debug_box_pos_rot(&mut self, min: [f32; 3], max: [f32; 3], yaw: i16) {
        let min = Vec3::from(min);
        let max = Vec3::from(max);
        let center = (min + max) * 0.5;
        let bounds = (max - min).abs() * 0.5;
        self.debug_box_rot(center.into(), bounds.into(), yaw);
    }

    /// Draw a rect from `start` to `end`, `width` units to each side.
    pub fn debug_rect(
        &mut self,
        start: [f32; 3],
        end: [f32; 3],
        width: u32,
        color: impl Into<PackedColor>,
    ) {
        let shape = DebugRect {
            start: quantize_vec3(start),
            end: quantize_vec3(end),
            width,
            color: color.into(),
        };
        self.push_rect(shape);
    }

    /// Draw a rect of `length` from `origin` along a pitch/yaw heading
    /// (radians).
    pub fn debug_rect_heading(
        &mut self,
        origin: [f32; 3],
        pitch: f32,
        yaw: f32,
        length: f32,
        width: u32,
        color: impl Into<PackedColor>,
    ) {
        let origin = Vec3::from(origin);
        let end = origin + angle_to_direction(pitch, yaw) * length;
        self.debug_rect(origin.into(), end.into(), width, color);
    }
}
