use crate::vector::{Vec2, VectorExt};

/// The central mass rays bend around.
///
/// Fixed for its whole lifetime: there are no mutators, so the capture radius
/// computed at construction always matches `mass`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Attractor {
  position: Vec2,
  mass: f64,
  capture_radius: f64,
}

impl Attractor {
  /// `radius_scale` converts mass into the capture radius in viewport units.
  #[must_use]
  pub fn new(position: Vec2, mass: f64, radius_scale: f64) -> Self {
    Self {
      position,
      mass,
      capture_radius: mass * radius_scale,
    }
  }

  pub fn position(&self) -> Vec2 {
    self.position
  }

  pub fn mass(&self) -> f64 {
    self.mass
  }

  pub fn capture_radius(&self) -> f64 {
    self.capture_radius
  }

  pub fn captures(&self, point: Vec2) -> bool {
    point.distance_to(self.position) < self.capture_radius
  }
}
