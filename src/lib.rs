pub mod attractor;
pub mod driver;
pub mod error;
pub mod ray;
pub mod render;
pub mod scene;
pub mod vector;

use crate::error::ConfigError;
use crate::vector::Vec2;

/// Colour tag carried by each ray. The simulation never looks at it; it only
/// cycles through [`Color::PALETTE`] so neighbouring lanes are told apart.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
  Red,
  Green,
  Blue,
  Yellow,
  Magenta,
  Cyan,
  White,
}

impl Color {
  pub const PALETTE: [Color; 7] = [
    Color::Red,
    Color::Green,
    Color::Blue,
    Color::Yellow,
    Color::Magenta,
    Color::Cyan,
    Color::White,
  ];

  pub fn from_index(index: u64) -> Self {
    Self::PALETTE[(index % Self::PALETTE.len() as u64) as usize]
  }

  pub fn rgba(self) -> [f32; 4] {
    match self {
      Color::Red => [1.0, 0.0, 0.0, 1.0],
      Color::Green => [0.0, 1.0, 0.0, 1.0],
      Color::Blue => [0.0, 0.0, 1.0, 1.0],
      Color::Yellow => [1.0, 1.0, 0.0, 1.0],
      Color::Magenta => [1.0, 0.0, 1.0, 1.0],
      Color::Cyan => [0.0, 1.0, 1.0, 1.0],
      Color::White => [1.0, 1.0, 1.0, 1.0],
    }
  }
}

/// Visible region plus the margin a ray may wander into before it is retired.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
  pub width: f64,
  pub height: f64,
  pub margin: f64,
}

impl Bounds {
  pub fn center(&self) -> Vec2 {
    Vec2::new(self.width / 2.0, self.height / 2.0)
  }

  /// True while `point` is inside the viewport extended by `margin` on every side.
  pub fn contains(&self, point: Vec2) -> bool {
    point.x >= -self.margin
      && point.x <= self.width + self.margin
      && point.y >= -self.margin
      && point.y <= self.height + self.margin
  }
}

impl Default for Bounds {
  fn default() -> Self {
    Self {
      width: 1200.0,
      height: 800.0,
      margin: 100.0,
    }
  }
}

/// Coupling constants of the per-tick ray update.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RayPhysics {
  /// Multiplied by the attractor mass to get the inverse-square strength.
  pub gravity: f64,
  /// Strength of the close-pass bending amplifier.
  pub deflection: f64,
  pub light_speed: f64,
  /// A new path point is stored only once the ray is farther than this from the last one.
  pub min_sample_distance: f64,
}

impl Default for RayPhysics {
  fn default() -> Self {
    Self {
      gravity: 10000.0,
      deflection: 0.001,
      light_speed: 200.0,
      min_sample_distance: 2.0,
    }
  }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SceneConfig {
  pub bounds: Bounds,
  pub attractor_position: Vec2,
  pub attractor_mass: f64,
  /// Capture radius per unit of mass.
  pub radius_scale: f64,
  pub physics: RayPhysics,
  /// Seconds between spawns.
  pub spawn_interval: f64,
  pub lanes: u32,
  /// Height of lane 0.
  pub lane_origin: f64,
  pub lane_spacing: f64,
  /// Rays start here, just outside the left edge.
  pub spawn_x: f64,
  /// Drop absorbed rays this many seconds after capture. `None` keeps them for good.
  pub absorbed_grace: Option<f64>,
}

impl Default for SceneConfig {
  fn default() -> Self {
    let bounds = Bounds::default();
    Self {
      bounds,
      attractor_position: bounds.center(),
      attractor_mass: 50.0,
      radius_scale: 0.01,
      physics: RayPhysics::default(),
      spawn_interval: 0.3,
      lanes: 15,
      lane_origin: 50.0,
      lane_spacing: 50.0,
      spawn_x: -50.0,
      absorbed_grace: None,
    }
  }
}

impl SceneConfig {
  pub fn validate(&self) -> Result<(), ConfigError> {
    let positive = [
      ("width", self.bounds.width),
      ("height", self.bounds.height),
      ("attractor_mass", self.attractor_mass),
      ("radius_scale", self.radius_scale),
      ("gravity", self.physics.gravity),
      ("light_speed", self.physics.light_speed),
      ("spawn_interval", self.spawn_interval),
    ];
    for (name, value) in positive {
      if !(value.is_finite() && value > 0.0) {
        return Err(ConfigError::InvalidValue { name, value });
      }
    }

    let non_negative = [
      ("margin", self.bounds.margin),
      ("deflection", self.physics.deflection),
      ("min_sample_distance", self.physics.min_sample_distance),
      ("lane_spacing", self.lane_spacing),
      ("absorbed_grace", self.absorbed_grace.unwrap_or(0.0)),
    ];
    for (name, value) in non_negative {
      if !(value.is_finite() && value >= 0.0) {
        return Err(ConfigError::InvalidValue { name, value });
      }
    }

    let finite = [
      ("attractor_x", self.attractor_position.x),
      ("attractor_y", self.attractor_position.y),
      ("lane_origin", self.lane_origin),
      ("spawn_x", self.spawn_x),
    ];
    for (name, value) in finite {
      if !value.is_finite() {
        return Err(ConfigError::InvalidValue { name, value });
      }
    }

    if self.lanes == 0 {
      return Err(ConfigError::NoLanes);
    }
    Ok(())
  }
}
