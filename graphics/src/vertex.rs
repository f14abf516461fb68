/// A display-list vertex: quantised position, texture coords, colour.
///
/// Layout matches the 16-byte vertex the display-list consumers expect.
/// `color` is RGBA; unlit geometry uses it directly as the shade colour.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vtx {
    pub ob: [i16; 3],
    pub flag: u16,
    pub tc: [i16; 2],
    pub color: [u8; 4],
}

impl Vtx {
    /// Untextured coloured vertex.
    pub const fn colored(ob: [i16; 3], color: [u8; 4]) -> Self {
        Self {
            ob,
            flag: 0,
            tc: [0, 0],
            color,
        }
    }
}

/// Size of one [`Vtx`] in the graphics pool.
pub const VTX_SIZE: usize = std::mem::size_of::<Vtx>();

static_assertions::const_assert_eq!(VTX_SIZE, 16);
