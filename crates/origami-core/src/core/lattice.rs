use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Neg, Sub};

/// An integer 3-vector on the cubic lattice.
///
/// Used both for site positions and for domain orientation vectors. The type is a plain
/// value: every operation returns a new vector and none of them can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[i32; 3]", into = "[i32; 3]")]
pub struct LatticeVector(Vector3<i32>);

impl LatticeVector {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self(Vector3::new(x, y, z))
    }

    pub fn zero() -> Self {
        Self::new(0, 0, 0)
    }

    pub fn xhat() -> Self {
        Self::new(1, 0, 0)
    }

    pub fn yhat() -> Self {
        Self::new(0, 1, 0)
    }

    pub fn zhat() -> Self {
        Self::new(0, 0, 1)
    }

    /// The six unit vectors of the cubic lattice, positive before negative per axis.
    pub fn unit_vectors() -> [Self; 6] {
        [
            Self::xhat(),
            -Self::xhat(),
            Self::yhat(),
            -Self::yhat(),
            Self::zhat(),
            -Self::zhat(),
        ]
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.0.y
    }

    #[inline]
    pub fn z(&self) -> i32 {
        self.0.z
    }

    pub fn components(&self) -> [i32; 3] {
        [self.0.x, self.0.y, self.0.z]
    }

    /// Signed sum of the components.
    #[inline]
    pub fn sum(&self) -> i32 {
        self.0.sum()
    }

    /// Manhattan norm.
    #[inline]
    pub fn abssum(&self) -> i32 {
        self.0.x.abs() + self.0.y.abs() + self.0.z.abs()
    }

    /// Component-wise absolute value.
    pub fn absolute(&self) -> Self {
        Self(self.0.abs())
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> i32 {
        self.0.x * other.0.x + self.0.y * other.0.y + self.0.z * other.0.z
    }

    /// Components in ascending order.
    pub fn sorted(&self) -> Self {
        let mut components = self.components();
        components.sort_unstable();
        components.into()
    }

    /// True for the six lattice unit vectors.
    pub fn is_unit(&self) -> bool {
        self.abssum() == 1
    }

    /// Rotates the vector by 180 degrees about the principal axis that `axis` lies on.
    ///
    /// The two components orthogonal to the axis are negated; the sign of `axis` is
    /// irrelevant. If `axis` is not a principal axis the vector is returned unchanged.
    pub fn rotate_half(&self, axis: Self) -> Self {
        let axis = axis.absolute();
        let [x, y, z] = self.components();
        if axis == Self::xhat() {
            Self::new(x, -y, -z)
        } else if axis == Self::yhat() {
            Self::new(-x, y, -z)
        } else if axis == Self::zhat() {
            Self::new(-x, -y, z)
        } else {
            *self
        }
    }
}

impl Hash for LatticeVector {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.components().hash(state);
    }
}

impl From<[i32; 3]> for LatticeVector {
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<LatticeVector> for [i32; 3] {
    fn from(v: LatticeVector) -> Self {
        v.components()
    }
}

impl Add for LatticeVector {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for LatticeVector {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Neg for LatticeVector {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl fmt::Display for LatticeVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.0.x, self.0.y, self.0.z)
    }
}
