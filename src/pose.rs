//! World placement of a fragment: translation, rotation and non-uniform scale.

use crate::errors::ValidationError;
use crate::float_types::{EPSILON, Real};
use nalgebra::{Point3, UnitQuaternion, Vector3};

/// `world = position + rotation * (scale ⊙ local)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Point3<Real>,
    pub rotation: UnitQuaternion<Real>,
    pub scale: Vector3<Real>,
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

impl Pose {
    pub fn identity() -> Self {
        Pose {
            position: Point3::origin(),
            rotation: UnitQuaternion::identity(),
            scale: Vector3::repeat(1.0),
        }
    }

    pub fn new(position: Point3<Real>, rotation: UnitQuaternion<Real>, scale: Vector3<Real>) -> Self {
        Pose {
            position,
            rotation,
            scale,
        }
    }

    pub fn from_position(position: Point3<Real>) -> Self {
        Pose {
            position,
            ..Self::identity()
        }
    }

    /// Rotation given as Euler angles in degrees, applied Z·Y·X.
    pub fn with_rotation_degrees(mut self, x_deg: Real, y_deg: Real, z_deg: Real) -> Self {
        self.rotation = UnitQuaternion::from_euler_angles(
            x_deg.to_radians(),
            y_deg.to_radians(),
            z_deg.to_radians(),
        );
        self
    }

    pub const fn with_scale(mut self, scale: Vector3<Real>) -> Self {
        self.scale = scale;
        self
    }

    /// The position must be finite, and scale components finite and non-zero
    /// for the pose to be invertible.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.position.coords.iter().any(|c| !c.is_finite()) {
            return Err(ValidationError::InvalidCoordinate(self.position));
        }
        if self.scale.iter().any(|s| !s.is_finite() || s.abs() < EPSILON) {
            return Err(ValidationError::DegenerateScale(self.scale));
        }
        Ok(())
    }

    /// Local point to world space.
    pub fn transform_point(&self, local: &Point3<Real>) -> Point3<Real> {
        self.position + self.rotation * local.coords.component_mul(&self.scale)
    }

    /// World point to local space.
    pub fn inverse_transform_point(&self, world: &Point3<Real>) -> Point3<Real> {
        Point3::from(self.inverse_transform_vector(&(*world - self.position)))
    }

    /// World direction to local space: inverse rotation, then divide by scale.
    pub fn inverse_transform_vector(&self, world: &Vector3<Real>) -> Vector3<Real> {
        (self.rotation.inverse() * world).component_div(&self.scale)
    }

    /// Map a world-space plane normal into local space.
    ///
    /// Normals follow the inverse transpose of the point transform, so a
    /// non-uniform scale multiplies instead of divides. The result is not normalized.
    pub fn inverse_transform_normal(&self, world: &Vector3<Real>) -> Vector3<Real> {
        (self.rotation.inverse() * world).component_mul(&self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skewed() -> Pose {
        Pose::from_position(Point3::new(3.0, -2.0, 1.0))
            .with_rotation_degrees(30.0, -45.0, 60.0)
            .with_scale(Vector3::new(2.0, 0.5, 1.5))
    }

    #[test]
    fn point_round_trip() {
        let pose = skewed();
        let local = Point3::new(0.25, -1.0, 4.0);
        let back = pose.inverse_transform_point(&pose.transform_point(&local));
        assert!((back - local).norm() < 1e-9);
    }

    #[test]
    fn world_plane_maps_onto_local_plane() {
        let pose = skewed();
        let normal = Vector3::new(0.3, -1.0, 0.6);
        let point = Point3::new(1.0, 2.0, -1.0);
        let local_normal = pose.inverse_transform_normal(&normal);
        let local_point = pose.inverse_transform_point(&point);

        // any world point on the plane stays on the mapped plane
        let on_plane = point + normal.cross(&Vector3::new(2.0, 0.5, -1.0));
        let local = pose.inverse_transform_point(&on_plane);
        assert!((local - local_point).dot(&local_normal).abs() < 1e-9);
    }

    #[test]
    fn zero_scale_is_rejected() {
        let pose = Pose::identity().with_scale(Vector3::new(1.0, 0.0, 1.0));
        assert!(matches!(pose.validate(), Err(ValidationError::DegenerateScale(_))));
    }

    #[test]
    fn non_finite_position_is_an_invalid_coordinate() {
        let pose = Pose::from_position(Point3::new(0.0, Real::INFINITY, 0.0));
        assert!(matches!(pose.validate(), Err(ValidationError::InvalidCoordinate(p)) if p == pose.position));
    }
}
