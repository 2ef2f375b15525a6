//! World-space transform types and interpolation.
//!
//! `f32` throughout: these values are copied to and from the rendering
//! engine's transforms every tick, and the engine stores single precision.

use std::ops::{Add, Mul, Neg, Sub};

// ── Vec3 ──────────────────────────────────────────────────────────────────────

/// 3D vector with f32 components.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn distance(self, other: Self) -> f32 {
        (other - self).length()
    }

    /// Linear interpolation; `t = 0` yields `self`, `t = 1` yields `other`.
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl std::fmt::Display for Vec3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

// ── Quat ──────────────────────────────────────────────────────────────────────

/// Unit quaternion orientation, `(x, y, z)` vector part and `w` scalar part.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Above this |dot| the two rotations are treated as parallel and blended
/// with a normalized lerp; `sin(θ)` is too small to divide by.
const SLERP_PARALLEL_DOT: f32 = 0.9995;

impl Quat {
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation of `angle` radians around `axis` (need not be normalized).
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let len = axis.length();
        if len < f32::EPSILON {
            return Self::IDENTITY;
        }
        let (s, c) = (angle * 0.5).sin_cos();
        let a = axis * (s / len);
        Self::new(a.x, a.y, a.z, c)
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    pub fn normalize(self) -> Self {
        let len = self.dot(self).sqrt();
        if len < f32::EPSILON {
            return Self::IDENTITY;
        }
        self.scale(1.0 / len)
    }

    fn scale(self, s: f32) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s, self.w * s)
    }

    fn add(self, o: Self) -> Self {
        Self::new(self.x + o.x, self.y + o.y, self.z + o.z, self.w + o.w)
    }

    /// Angular distance to `other` in radians, in `[0, π]`.
    pub fn angle_to(self, other: Self) -> f32 {
        let d = self.dot(other).abs().min(1.0);
        2.0 * d.acos()
    }

    /// Spherical interpolation along the shortest arc.
    ///
    /// `q` and `-q` encode the same rotation; when the dot product is negative
    /// the end rotation is negated so the blend never takes the long way round.
    pub fn slerp(self, other: Self, t: f32) -> Self {
        let mut end = other;
        let mut cos_theta = self.dot(other);
        if cos_theta < 0.0 {
            end = end.scale(-1.0);
            cos_theta = -cos_theta;
        }

        if cos_theta > SLERP_PARALLEL_DOT {
            return self.scale(1.0 - t).add(end.scale(t)).normalize();
        }

        let theta = cos_theta.acos();
        let sin_theta = theta.sin();
        let a = ((1.0 - t) * theta).sin() / sin_theta;
        let b = (t * theta).sin() / sin_theta;
        self.scale(a).add(end.scale(b))
    }
}

// ── Transform ─────────────────────────────────────────────────────────────────

/// World position and orientation of a waypoint or entity.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Transform {
    pub const IDENTITY: Self = Self { position: Vec3::ZERO, rotation: Quat::IDENTITY };

    pub const fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Identity rotation at `position`.
    pub const fn at(position: Vec3) -> Self {
        Self { position, rotation: Quat::IDENTITY }
    }

    /// Linear position and shortest-arc rotation blend between `self` and
    /// `end`.  `t` is clamped to `[0, 1]`; `t = 1` returns `end` exactly.
    pub fn interpolate(self, end: Transform, t: f32) -> Transform {
        let t = t.clamp(0.0, 1.0);
        if t >= 1.0 {
            return end;
        }
        Transform {
            position: self.position.lerp(end.position, t),
            rotation: self.rotation.slerp(end.rotation, t),
        }
    }
}
