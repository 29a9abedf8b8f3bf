use std::io::{Result, Write};

use crate::{
    codec::VarInt,
    serial::WriteTo,
};

/// Quantization ceiling for a 15-bit normalized component.
const MAX_QUANTIZED_VALUE: f64 = 32766.0;

/// Velocities whose largest component is below this are sent as a single
/// zero byte.
const ZERO_EPSILON: f64 = 3.051_944_088_384_301e-5;

/// A low-precision velocity vector in blocks per tick.
///
/// Three 15-bit quantized components and a scale factor share 48 bits. The
/// low three bits carry the scale's two low bits plus a continuation flag;
/// when the flag is set a varint with the remaining scale bits follows. The
/// six payload bytes go out in the order 0, 1, 5, 4, 3, 2 (two
/// little-endian, then four big-endian).
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct LpVec3 {
    #[allow(missing_docs)]
    pub x: f64,
    #[allow(missing_docs)]
    pub y: f64,
    #[allow(missing_docs)]
    pub z: f64,
}

impl LpVec3 {
    #[allow(missing_docs)]
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    fn quantize(value: f64) -> u64 {
        ((value * 0.5 + 0.5) * MAX_QUANTIZED_VALUE).round() as u64
    }
}

impl WriteTo for LpVec3 {
    fn write(&self, writer: &mut impl Write) -> Result<()> {
        let max_component = self.x.abs().max(self.y.abs()).max(self.z.abs());
        if max_component < ZERO_EPSILON {
            return 0u8.write(writer);
        }

        let scale = max_component.ceil() as u64;
        let need_continuation = (scale & 3) != scale;
        let packed_scale = (scale & 3) | if need_continuation { 4 } else { 0 };

        let scale_f = scale as f64;
        let packed = (Self::quantize(self.z / scale_f) << 33)
            | (Self::quantize(self.y / scale_f) << 18)
            | (Self::quantize(self.x / scale_f) << 3)
            | packed_scale;

        let bytes = [
            (packed & 0xFF) as u8,
            ((packed >> 8) & 0xFF) as u8,
            ((packed >> 16) & 0xFF) as u8,
            ((packed >> 24) & 0xFF) as u8,
            ((packed >> 32) & 0xFF) as u8,
            ((packed >> 40) & 0xFF) as u8,
        ];

        for index in [0, 1, 5, 4, 3, 2] {
            bytes[index].write(writer)?;
        }

        if need_continuation {
            VarInt((scale >> 2) as i32).write(writer)?;
        }

        Ok(())
    }
}
