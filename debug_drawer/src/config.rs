use pinewood_core::color::PackedColor;
use serde::Deserialize;

/// Default number of debug boxes accepted per frame.
///
/// Higher values work, but every box costs graphics pool space.
pub const MAX_DEBUG_BOXES: usize = 512;

/// Default number of debug rects accepted per frame.
pub const MAX_DEBUG_RECTS: usize = 512;

/// Debug drawer settings, usually the `[debug_draw]` table of a config file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DebugDrawConfig {
    /// Boxes beyond this count are dropped for the frame.
    pub max_boxes: usize,
    /// Rects beyond this count are dropped for the frame.
    pub max_rects: usize,
    /// Colour boxes use until a context sets another one (`0xAARRGGBB`).
    pub default_box_color: PackedColor,
}

impl Default for DebugDrawConfig {
    fn default() -> Self {
        Self {
            max_boxes: MAX_DEBUG_BOXES,
            max_rects: MAX_DEBUG_RECTS,
            default_box_color: PackedColor::DEBUG_BOX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_table_uses_defaults() {
        let config: DebugDrawConfig = toml::from_str("max_boxes = 16").unwrap();
        assert_eq!(config.max_boxes, 16);
        assert_eq!(config.max_rects, MAX_DEBUG_RECTS);
        assert_eq!(config.default_box_color, PackedColor::DEBUG_BOX);
    }

    #[test]
    fn test_color_is_a_plain_integer() {
        let config: DebugDrawConfig = toml::from_str("default_box_color = 0x80FFFFFF").unwrap();
        assert_eq!(config.default_box_color, PackedColor(0x80FF_FFFF));
    }
}
