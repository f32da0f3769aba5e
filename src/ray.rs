use crate::attractor::Attractor;
use crate::vector::{Vec2, VectorExt};
use crate::{Bounds, Color, RayPhysics};
use cgmath::InnerSpace;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RayState {
  Traveling,
  /// Terminal: the ray crossed the capture radius and no longer moves.
  Absorbed,
}

/// A single light ray and the trail it has drawn so far.
#[derive(Clone, Debug)]
pub struct Ray {
  position: Vec2,
  velocity: Vec2,
  path: Vec<Vec2>,
  color: Color,
  impact_parameter: f64,
  state: RayState,
}

impl Ray {
  /// `reference_y` is the attractor's height at spawn time; the impact
  /// parameter is measured against it once and never updated.
  #[must_use]
  pub fn new(start: Vec2, velocity: Vec2, color: Color, reference_y: f64) -> Self {
    Self {
      position: start,
      velocity,
      path: vec![start],
      color,
      impact_parameter: (start.y - reference_y).abs(),
      state: RayState::Traveling,
    }
  }

  /// Advance the ray by one tick of `dt` seconds.
  ///
  /// The capture test runs before any acceleration is applied, so a ray
  /// inside the capture radius is frozen exactly where it was.
  pub fn update(&mut self, attractor: &Attractor, physics: &RayPhysics, dt: f64) {
    if self.state == RayState::Absorbed {
      return;
    }

    let to_attractor = attractor.position() - self.position;
    let distance = to_attractor.magnitude();

    if distance < attractor.capture_radius() {
      self.state = RayState::Absorbed;
      return;
    }

    let strength = attractor.mass() * physics.gravity;
    let acceleration = to_attractor.normalized() * (strength / (distance * distance));

    // +1 keeps a dead-on ray (zero impact parameter) finite
    let deflection_factor =
      1.0 + (strength * physics.deflection) / (distance * self.impact_parameter + 1.0);
    let acceleration = acceleration * deflection_factor;

    self.velocity += acceleration * dt;
    // light keeps its speed, only the heading bends
    self.velocity = self.velocity.normalized() * physics.light_speed;
    self.position += self.velocity * dt;

    let far_enough = self
      .path
      .last()
      .map_or(true, |last| self.position.distance_to(*last) > physics.min_sample_distance);
    if far_enough {
      self.path.push(self.position);
    }
  }

  /// A traveling ray outside the extended viewport. Absorbed rays are never off bounds.
  pub fn is_off_bounds(&self, bounds: &Bounds) -> bool {
    self.state == RayState::Traveling && !bounds.contains(self.position)
  }

  pub fn is_absorbed(&self) -> bool {
    self.state == RayState::Absorbed
  }

  pub fn state(&self) -> RayState {
    self.state
  }

  pub fn position(&self) -> Vec2 {
    self.position
  }

  pub fn velocity(&self) -> Vec2 {
    self.velocity
  }

  pub fn path(&self) -> &[Vec2] {
    &self.path
  }

  pub fn color(&self) -> Color {
    self.color
  }

  pub fn impact_parameter(&self) -> f64 {
    self.impact_parameter
  }
}
