use cgmath::{Deg, Matrix4, Vector2, Vector3};

/// Degrees of rotation per unit of UV.
const DEGREES_PER_UV: f64 = 120.0;

/// Euler rotation of the box, in degrees, applied in X, Y, Z order.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoxRotation {
    degrees: Vector3<f64>,
}
impl Default for BoxRotation {
    fn default() -> Self {
        Self {
            degrees: Self::resting(),
        }
    }
}

impl BoxRotation {
    /// Returns the resting rotation, which shows three faces of the box.
    pub fn resting() -> Vector3<f64> {
        Vector3::new(-45.0, 45.0, 0.0)
    }

    /// Returns the rotation in degrees.
    pub fn degrees(self) -> Vector3<f64> {
        self.degrees
    }
    /// Sets the rotation in degrees.
    pub fn set_rotation(&mut self, x: f64, y: f64, z: f64) {
        self.degrees = Vector3::new(x, y, z);
    }

    /// Tilts the box away from its resting rotation in proportion to a UV
    /// coordinate: vertical UV tilts about X and horizontal UV about Z.
    pub fn set_from_uv(&mut self, uv: Vector2<f64>) {
        let Vector3 { x, y, z } = Self::resting();
        self.set_rotation(
            x + uv.y * DEGREES_PER_UV,
            y,
            z + uv.x * DEGREES_PER_UV,
        );
    }

    /// Returns the rotation matrix.
    pub fn matrix(self) -> Matrix4<f32> {
        let d = self.degrees;
        let rx = Matrix4::from_angle_x(Deg(d.x as f32));
        let ry = Matrix4::from_angle_y(Deg(d.y as f32));
        let rz = Matrix4::from_angle_z(Deg(d.z as f32));
        rx * ry * rz
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uv_tilt() {
        let mut r = BoxRotation::default();
        r.set_from_uv(Vector2::new(1.0, -0.5));
        assert_eq!(r.degrees(), Vector3::new(-105.0, 45.0, 120.0));
        r.set_from_uv(Vector2::new(0.0, 0.0));
        assert_eq!(r, BoxRotation::default());
    }
}
