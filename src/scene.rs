use crate::attractor::Attractor;
use crate::ray::Ray;
use crate::vector::Vec2;
use crate::{Color, SceneConfig};
use log::{debug, trace};

struct Tracked {
  ray: Ray,
  /// Scene clock reading at the tick the ray was captured.
  absorbed_at: Option<f64>,
}

/// One attractor and every ray currently in flight.
///
/// Rays are only ever mutated through [`Scene::advance`]; everything handed
/// out to callers is a shared borrow.
pub struct Scene {
  config: SceneConfig,
  attractor: Attractor,
  rays: Vec<Tracked>,
  spawn_timer: f64,
  spawned: u64,
  elapsed: f64,
}

impl Scene {
  #[must_use]
  pub fn new(config: SceneConfig) -> Self {
    let attractor = Attractor::new(
      config.attractor_position,
      config.attractor_mass,
      config.radius_scale,
    );
    Self {
      config,
      attractor,
      rays: Vec::new(),
      spawn_timer: 0.0,
      spawned: 0,
      elapsed: 0.0,
    }
  }

  pub fn config(&self) -> &SceneConfig {
    &self.config
  }

  pub fn attractor(&self) -> &Attractor {
    &self.attractor
  }

  /// Rays in spawn order.
  pub fn live_rays(&self) -> impl ExactSizeIterator<Item = &Ray> + '_ {
    self.rays.iter().map(|tracked| &tracked.ray)
  }

  pub fn live_count(&self) -> usize {
    self.rays.len()
  }

  pub fn absorbed_count(&self) -> usize {
    self.rays.iter().filter(|t| t.ray.is_absorbed()).count()
  }

  /// Rays spawned since construction or the last reset.
  pub fn spawned_count(&self) -> u64 {
    self.spawned
  }

  /// Seconds of simulated time.
  pub fn elapsed(&self) -> f64 {
    self.elapsed
  }

  /// Emit the next ray. Lane and colour both cycle with the spawn counter.
  ///
  /// A config with no lanes spawns everything in lane 0.
  pub fn spawn(&mut self) {
    let config = &self.config;
    let lane = self.spawned % u64::from(config.lanes.max(1));
    let y = config.lane_origin + lane as f64 * config.lane_spacing;
    let color = Color::from_index(self.spawned);
    let ray = Ray::new(
      Vec2::new(config.spawn_x, y),
      Vec2::new(config.physics.light_speed, 0.0),
      color,
      self.attractor.position().y,
    );
    debug!(
      "spawned ray #{} lane {} ({:?}), impact parameter {:.1}",
      self.spawned,
      lane,
      color,
      ray.impact_parameter()
    );
    self.rays.push(Tracked {
      ray,
      absorbed_at: None,
    });
    self.spawned += 1;
  }

  /// Step the scene forward by `dt` seconds.
  ///
  /// At most one ray is spawned per call however large `dt` is.
  pub fn advance(&mut self, dt: f64) {
    self.elapsed += dt;

    self.spawn_timer += dt;
    if self.spawn_timer > self.config.spawn_interval {
      self.spawn();
      self.spawn_timer = 0.0;
    }

    let elapsed = self.elapsed;
    for tracked in &mut self.rays {
      tracked.ray.update(&self.attractor, &self.config.physics, dt);
      if tracked.absorbed_at.is_none() && tracked.ray.is_absorbed() {
        debug!("ray absorbed at {:?}", tracked.ray.position());
        tracked.absorbed_at = Some(elapsed);
      }
    }

    let before = self.rays.len();
    let bounds = self.config.bounds;
    let grace = self.config.absorbed_grace;
    self.rays.retain(|tracked| {
      if tracked.ray.is_off_bounds(&bounds) {
        return false;
      }
      match (grace, tracked.absorbed_at) {
        (Some(grace), Some(at)) => elapsed - at < grace,
        _ => true,
      }
    });
    let removed = before - self.rays.len();
    if removed > 0 {
      trace!("pruned {} rays, {} live", removed, self.rays.len());
    }
  }

  /// Drop every ray and restart the spawn sequence. The attractor stays.
  pub fn reset(&mut self) {
    self.rays.clear();
    self.spawned = 0;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const DT: f64 = 1.0 / 60.0;

  /// Lane 0 passes 350 above the attractor, lane 1 heads straight at it.
  fn two_lanes(absorbed_grace: Option<f64>) -> SceneConfig {
    SceneConfig {
      spawn_interval: 1000.0,
      lanes: 2,
      lane_origin: 50.0,
      lane_spacing: 350.0,
      absorbed_grace,
      ..SceneConfig::default()
    }
  }

  #[test]
  fn spawn_cycles_lanes_and_colors() {
    let mut scene = Scene::new(SceneConfig::default());
    for _ in 0..16 {
      scene.spawn();
    }
    let rays: Vec<&Ray> = scene.live_rays().collect();
    assert_eq!(rays.len(), 16);
    assert_eq!(rays[0].position(), Vec2::new(-50.0, 50.0));
    assert_eq!(rays[1].position(), Vec2::new(-50.0, 100.0));
    assert_eq!(rays[14].position(), Vec2::new(-50.0, 750.0));
    assert_eq!(rays[15].position(), Vec2::new(-50.0, 50.0));
    assert_eq!(rays[7].color(), Color::Red);
    assert_eq!(rays[15].color(), Color::Green);
    assert_eq!(rays[0].velocity(), Vec2::new(200.0, 0.0));
    assert_eq!(rays[7].impact_parameter(), 0.0);
    assert_eq!(scene.spawned_count(), 16);
  }

  #[test]
  fn zero_lanes_spawn_in_lane_zero() {
    let config = SceneConfig {
      lanes: 0,
      ..SceneConfig::default()
    };
    assert!(config.validate().is_err());
    let mut scene = Scene::new(config);
    scene.spawn();
    scene.spawn();
    for ray in scene.live_rays() {
      assert_eq!(ray.position(), Vec2::new(-50.0, 50.0));
    }
    assert_eq!(scene.spawned_count(), 2);
  }

  #[test]
  fn spawns_once_per_interval() {
    let mut scene = Scene::new(SceneConfig::default());
    scene.advance(0.2);
    assert_eq!(scene.spawned_count(), 0);
    scene.advance(0.2);
    assert_eq!(scene.spawned_count(), 1);
    scene.advance(0.2);
    assert_eq!(scene.spawned_count(), 1);
    scene.advance(0.2);
    assert_eq!(scene.spawned_count(), 2);
  }

  #[test]
  fn large_step_spawns_a_single_ray() {
    let mut scene = Scene::new(SceneConfig::default());
    scene.advance(5.0);
    assert_eq!(scene.spawned_count(), 1);
  }

  #[test]
  fn off_bounds_rays_are_pruned_and_absorbed_rays_kept() {
    let mut scene = Scene::new(two_lanes(None));
    scene.spawn();
    scene.spawn();
    for _ in 0..1200 {
      scene.advance(DT);
    }
    let rays: Vec<&Ray> = scene.live_rays().collect();
    assert_eq!(rays.len(), 1);
    assert!(rays[0].is_absorbed());
    assert_eq!(rays[0].impact_parameter(), 0.0);
    assert_eq!(scene.absorbed_count(), 1);
  }

  #[test]
  fn absorbed_rays_pruned_after_grace() {
    let mut scene = Scene::new(two_lanes(Some(1.0)));
    scene.spawn();
    scene.spawn();
    // the dead-on ray is captured after about 3.3 s
    for _ in 0..240 {
      scene.advance(DT);
    }
    assert_eq!(scene.absorbed_count(), 1);
    for _ in 0..120 {
      scene.advance(DT);
    }
    assert_eq!(scene.absorbed_count(), 0);
  }

  #[test]
  fn reset_restarts_the_sequence() {
    let mut scene = Scene::new(SceneConfig::default());
    for _ in 0..5 {
      scene.spawn();
    }
    scene.advance(DT);
    let attractor = *scene.attractor();
    scene.reset();
    assert_eq!(scene.live_rays().len(), 0);
    assert_eq!(scene.spawned_count(), 0);
    assert_eq!(*scene.attractor(), attractor);

    scene.spawn();
    let mut fresh = Scene::new(SceneConfig::default());
    fresh.spawn();
    let a = scene.live_rays().next().map(|r| (r.position(), r.color()));
    let b = fresh.live_rays().next().map(|r| (r.position(), r.color()));
    assert_eq!(a, b);
  }
}
