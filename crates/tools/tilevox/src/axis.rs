use glam::IVec3;

/// Signed source axis for one component of a reoriented position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl Axis {
    /// Component index: 0=X, 1=Y, 2=Z
    #[inline]
    pub fn index(self) -> usize {
        (self as usize) >> 1
    }

    /// Sign: 1 for Pos*, -1 for Neg*
    #[inline]
    pub fn sign(self) -> i32 {
        1 - ((self as i32) & 1) * 2
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.sign() < 0
    }

    /// Signed component of `v` along this axis
    #[inline]
    pub fn of_i(self, v: IVec3) -> i32 {
        v[self.index()] * self.sign()
    }

    /// Size of this axis in a `[width, height, depth]` triple
    #[inline]
    pub fn extent(self, size: [u32; 3]) -> u32 {
        size[self.index()]
    }

    pub fn to_char(self) -> char {
        match self {
            Axis::PosX | Axis::NegX => 'x',
            Axis::PosY | Axis::NegY => 'y',
            Axis::PosZ | Axis::NegZ => 'z',
        }
    }
}
