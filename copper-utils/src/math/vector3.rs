use std::{
    io::{Read, Result, Write},
    ops::{Add, AddAssign, Mul, MulAssign, Sub},
};

use num_traits::{Float, Num, ToPrimitive};

use crate::serial::{ReadFrom, WriteTo};

/// A 3D vector.
#[derive(Clone, Copy, Debug, PartialEq, Hash, Eq, Default)]
#[allow(missing_docs)]
pub struct Vector3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

#[allow(missing_docs)]
impl<T: Num + Copy> Vector3<T> {
    pub const fn new(x: T, y: T, z: T) -> Self {
        Vector3 { x, y, z }
    }

    #[must_use]
    pub fn length_squared(&self) -> T {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    #[must_use]
    pub fn scale(&self, factor: T) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }
}

#[allow(missing_docs)]
impl<T: Float> Vector3<T> {
    #[must_use]
    pub fn length(&self) -> T {
        self.length_squared().sqrt()
    }

    #[must_use]
    pub fn max_abs_component(&self) -> T {
        self.x.abs().max(self.y.abs()).max(self.z.abs())
    }

    #[must_use]
    pub fn floor_i32(&self) -> Vector3<i32> {
        Vector3::new(
            self.x.floor().to_i32().unwrap_or(0),
            self.y.floor().to_i32().unwrap_or(0),
            self.z.floor().to_i32().unwrap_or(0),
        )
    }
}

impl<T: Num + Copy> Add for Vector3<T> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl<T: Num + Copy> AddAssign for Vector3<T> {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl<T: Num + Copy> Sub for Vector3<T> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl<T: Num + Copy> Mul<T> for Vector3<T> {
    type Output = Self;

    fn mul(self, factor: T) -> Self {
        self.scale(factor)
    }
}

impl<T: Num + Copy> MulAssign<T> for Vector3<T> {
    fn mul_assign(&mut self, factor: T) {
        *self = self.scale(factor);
    }
}

impl<T: ReadFrom> ReadFrom for Vector3<T> {
    fn read(data: &mut impl Read) -> Result<Self> {
        Ok(Self {
            x: T::read(data)?,
            y: T::read(data)?,
            z: T::read(data)?,
        })
    }
}

impl<T: WriteTo> WriteTo for Vector3<T> {
    fn write(&self, writer: &mut impl Write) -> Result<()> {
        self.x.write(writer)?;
        self.y.write(writer)?;
        self.z.write(writer)
    }
}
