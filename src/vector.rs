use cgmath::{InnerSpace, Vector2};

pub type Vec2 = Vector2<f64>;

/// Below this magnitude a vector is treated as zero when normalizing.
pub const NORMALIZE_EPSILON: f64 = 1e-12;

/// Total versions of the cgmath operations that can divide by zero.
///
/// `cgmath::InnerSpace::normalize` produces NaN components for the zero
/// vector; the trajectory code needs the zero vector back instead.
pub trait VectorExt {
  fn normalized(self) -> Self;
  fn distance_to(self, other: Self) -> f64;
}

impl VectorExt for Vec2 {
  fn normalized(self) -> Self {
    let mag = self.magnitude();
    if mag > NORMALIZE_EPSILON {
      self / mag
    } else {
      Vec2::new(0.0, 0.0)
    }
  }

  fn distance_to(self, other: Self) -> f64 {
    (other - self).magnitude()
  }
}
