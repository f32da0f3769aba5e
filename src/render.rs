//! Read-only view of a [`Scene`] for whatever draws it.
//!
//! Nothing here can mutate ray state. A frame is rebuilt from the scene after
//! every `advance`, as flat vertex lists that can be uploaded to a vertex
//! buffer unchanged.

use crate::scene::Scene;
use crate::vector::Vec2;

pub const GRID_SPACING: f64 = 50.0;
pub const GRID_COLOR: [f32; 4] = [30.0 / 255.0, 30.0 / 255.0, 30.0 / 255.0, 1.0];
pub const PHOTON_RADIUS: f32 = 3.0;
/// The faint ring drawn around the capture disk, relative to the capture radius.
pub const HORIZON_RING_SCALE: f32 = 1.5;
const HORIZON_RING_COLOR: [f32; 4] = [100.0 / 255.0, 100.0 / 255.0, 100.0 / 255.0, 100.0 / 255.0];
const ATTRACTOR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
  pub pos: [f32; 2],
  pub color: [f32; 4],
}

impl LineVertex {
  fn new(pos: Vec2, color: [f32; 4]) -> Self {
    Self {
      pos: [pos.x as f32, pos.y as f32],
      color,
    }
  }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkerKind {
  /// Filled disk of the attractor's capture radius.
  Attractor,
  /// Outline ring around the attractor.
  Horizon,
  /// Head of a traveling ray.
  Photon,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Marker {
  pub kind: MarkerKind,
  pub center: [f32; 2],
  pub radius: f32,
  pub color: [f32; 4],
}

/// Everything needed to draw one frame. Line lists hold vertex pairs.
#[derive(Clone, Debug, Default)]
pub struct RenderFrame {
  pub grid: Vec<LineVertex>,
  pub paths: Vec<LineVertex>,
  pub markers: Vec<Marker>,
}

impl RenderFrame {
  #[must_use]
  pub fn build(scene: &Scene) -> Self {
    let bounds = scene.config().bounds;
    let mut frame = Self {
      grid: grid_lines(bounds.width, bounds.height),
      ..Self::default()
    };

    for ray in scene.live_rays() {
      let color = ray.color().rgba();
      for segment in ray.path().windows(2) {
        frame.paths.push(LineVertex::new(segment[0], color));
        frame.paths.push(LineVertex::new(segment[1], color));
      }

      let head = ray.position();
      if !ray.is_absorbed() && head.x >= 0.0 && head.x <= bounds.width {
        frame.markers.push(Marker {
          kind: MarkerKind::Photon,
          center: [head.x as f32, head.y as f32],
          radius: PHOTON_RADIUS,
          color,
        });
      }
    }

    let attractor = scene.attractor();
    let center = [attractor.position().x as f32, attractor.position().y as f32];
    let radius = attractor.capture_radius() as f32;
    frame.markers.push(Marker {
      kind: MarkerKind::Horizon,
      center,
      radius: radius * HORIZON_RING_SCALE,
      color: HORIZON_RING_COLOR,
    });
    frame.markers.push(Marker {
      kind: MarkerKind::Attractor,
      center,
      radius,
      color: ATTRACTOR_COLOR,
    });

    frame
  }

  pub fn vertex_count(&self) -> usize {
    self.grid.len() + self.paths.len()
  }

  pub fn path_bytes(&self) -> &[u8] {
    bytemuck::cast_slice(&self.paths)
  }
}

fn grid_lines(width: f64, height: f64) -> Vec<LineVertex> {
  let mut lines = Vec::new();
  let mut x = 0.0;
  while x < width {
    lines.push(LineVertex::new(Vec2::new(x, 0.0), GRID_COLOR));
    lines.push(LineVertex::new(Vec2::new(x, height), GRID_COLOR));
    x += GRID_SPACING;
  }
  let mut y = 0.0;
  while y < height {
    lines.push(LineVertex::new(Vec2::new(0.0, y), GRID_COLOR));
    lines.push(LineVertex::new(Vec2::new(width, y), GRID_COLOR));
    y += GRID_SPACING;
  }
  lines
}

/// The on-screen status block.
pub fn hud_text(scene: &Scene) -> String {
  format!(
    "Light Rays: {}\nTotal Spawned: {}\nPress ESC to exit\nPress R to reset",
    scene.live_count(),
    scene.spawned_count()
  )
}
