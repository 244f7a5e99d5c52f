//! Hero particle field: ambient drift that converges onto the brace outline.
//!
//! All timing is taken from the `now_ms` passed to [`ParticleField::step`], so
//! a field can be driven by `requestAnimationFrame` timestamps or by a test.

use std::f32::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::NARROW_VIEWPORT_PX;
use crate::grid::SpatialGrid;
use crate::silhouette::build_targets;

/// Tunable constants. None of these are invariants.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleTuning {
    pub area_per_particle: f32,
    pub max_particles: usize,
    pub narrow_width: f32,
    pub narrow_max_particles: usize,
    pub min_particles: usize,
    /// Outline samples per particle before densifying.
    pub target_ratio: f32,
    pub convergence_window_ms: f64,
    pub reassign_interval_ms: f64,
    pub convergence_threshold: f32,
    pub pull_strength: f32,
    pub velocity_residual: f32,
    pub wrap_margin: f32,
    pub connect_distance: f32,
    pub line_alpha: f32,
    pub halo_threshold: f32,
    pub halo_scale: f32,
    pub halo_alpha: f32,
    pub twinkle_speed: f32,
    pub twinkle_depth: f32,
    /// Silhouette height relative to the shorter viewport side.
    pub silhouette_scale: f32,
    /// Horizontal silhouette center relative to width, wide layouts.
    pub center_x_ratio: f32,
}

impl Default for ParticleTuning {
    fn default() -> Self {
        Self {
            area_per_particle: 9000.0,
            max_particles: 180,
            narrow_width: NARROW_VIEWPORT_PX,
            narrow_max_particles: 70,
            min_particles: 24,
            target_ratio: 0.45,
            convergence_window_ms: 10_000.0,
            reassign_interval_ms: 2_000.0,
            convergence_threshold: 0.01,
            pull_strength: 0.08,
            velocity_residual: 0.5,
            wrap_margin: 10.0,
            connect_distance: 110.0,
            line_alpha: 0.18,
            halo_threshold: 0.6,
            halo_scale: 3.0,
            halo_alpha: 0.15,
            twinkle_speed: 0.002,
            twinkle_depth: 0.35,
            silhouette_scale: 0.62,
            center_x_ratio: 0.68,
        }
    }
}

impl ParticleTuning {
    pub fn particle_count(&self, width: f32, height: f32) -> usize {
        let area = (width.max(0.0) * height.max(0.0)) / self.area_per_particle.max(1.0);
        let cap = if width <= self.narrow_width {
            self.narrow_max_particles
        } else {
            self.max_particles
        };
        (area as usize).clamp(self.min_particles.min(cap), cap)
    }

    pub fn silhouette_center(&self, width: f32, height: f32) -> (f32, f32) {
        let ratio = if width <= self.narrow_width {
            0.5
        } else {
            self.center_x_ratio
        };
        (width * ratio, height * 0.5)
    }

    pub fn silhouette_height(&self, width: f32, height: f32) -> f32 {
        width.min(height) * self.silhouette_scale
    }

    /// Eased `min(elapsed / window, 1)^2`.
    pub fn convergence(&self, elapsed_ms: f64) -> f32 {
        let window = self.convergence_window_ms.max(1.0);
        let linear = (elapsed_ms.max(0.0) / window).min(1.0) as f32;
        linear * linear
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub radius: f32,
    pub base_opacity: f32,
    pub opacity: f32,
    pub phase: f32,
    pub target: Option<usize>,
    pub drift_radius: f32,
    pub drift_speed: f32,
}

/// Drawing backend for a frame.
pub trait Surface {
    fn clear(&mut self, width: f32, height: f32);
    fn line(&mut self, from: (f32, f32), to: (f32, f32), alpha: f32);
    fn dot(&mut self, center: (f32, f32), radius: f32, alpha: f32);
}

fn triangular<R: Rng>(rng: &mut R) -> f32 {
    (rng.random::<f32>() + rng.random::<f32>() + rng.random::<f32>()) / 3.0
}

/// Greedy nearest-available matching: targets in order, each takes the
/// closest particle not yet taken. Clears previous assignments first.
pub fn assign_targets(particles: &mut [Particle], targets: &[(f32, f32)]) -> usize {
    for particle in particles.iter_mut() {
        particle.target = None;
    }
    let mut assigned = 0;
    for (target_index, &(tx, ty)) in targets.iter().enumerate() {
        let mut best: Option<(usize, f32)> = None;
        for (index, particle) in particles.iter().enumerate() {
            if particle.target.is_some() {
                continue;
            }
            let dx = particle.x - tx;
            let dy = particle.y - ty;
            let dist = dx * dx + dy * dy;
            match best {
                Some((_, best_dist)) if dist >= best_dist => {}
                _ => best = Some((index, dist)),
            }
        }
        let Some((index, _)) = best else {
            break;
        };
        particles[index].target = Some(target_index);
        assigned += 1;
    }
    assigned
}

/// `now_ms * speed + phase`, reduced to one turn in f64 so long-lived pages
/// keep smooth motion.
pub fn phase_angle(now_ms: f64, speed: f32, phase: f32) -> f32 {
    (now_ms * f64::from(speed)).rem_euclid(std::f64::consts::TAU) as f32 + phase
}

pub struct ParticleField {
    width: f32,
    height: f32,
    tuning: ParticleTuning,
    particles: Vec<Particle>,
    targets: Vec<(f32, f32)>,
    grid: SpatialGrid,
    rng: StdRng,
    started_ms: Option<f64>,
    last_assign_ms: Option<f64>,
    convergence: f32,
}

impl ParticleField {
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        Self::with_tuning(width, height, seed, ParticleTuning::default())
    }

    pub fn with_tuning(width: f32, height: f32, seed: u64, tuning: ParticleTuning) -> Self {
        let width = width.max(1.0);
        let height = height.max(1.0);
        let mut rng = StdRng::seed_from_u64(seed);
        let count = tuning.particle_count(width, height);
        let center = tuning.silhouette_center(width, height);
        let glyph_height = tuning.silhouette_height(width, height);
        let sample_count = ((count as f32) * tuning.target_ratio).round() as usize;
        let targets = build_targets(center, glyph_height, sample_count.max(1), &mut rng);

        let particles = (0..count)
            .map(|_| {
                let ox = (triangular(&mut rng) - 0.5) * width;
                let oy = (triangular(&mut rng) - 0.5) * height;
                Particle {
                    x: (center.0 + ox).clamp(0.0, width),
                    y: (center.1 + oy).clamp(0.0, height),
                    vx: rng.random_range(-0.25..=0.25),
                    vy: rng.random_range(-0.25..=0.25),
                    radius: rng.random_range(0.6..=2.2),
                    base_opacity: rng.random_range(0.25..=0.75),
                    opacity: 0.0,
                    phase: rng.random_range(0.0..TAU),
                    target: None,
                    drift_radius: rng.random_range(2.0..=8.0),
                    drift_speed: rng.random_range(0.0005..=0.0015),
                }
            })
            .collect();

        let grid = SpatialGrid::new(width, height, tuning.connect_distance);
        Self {
            width,
            height,
            tuning,
            particles,
            targets,
            grid,
            rng,
            started_ms: None,
            last_assign_ms: None,
            convergence: 0.0,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn tuning(&self) -> &ParticleTuning {
        &self.tuning
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn targets(&self) -> &[(f32, f32)] {
        &self.targets
    }

    pub fn convergence(&self) -> f32 {
        self.convergence
    }

    /// Fresh random seed for the next rebuild, drawn from this field's stream.
    pub fn next_seed(&mut self) -> u64 {
        self.rng.random()
    }

    pub fn step(&mut self, now_ms: f64) {
        let started = *self.started_ms.get_or_insert(now_ms);
        let elapsed = (now_ms - started).max(0.0);
        self.convergence = self.tuning.convergence(elapsed);

        let due = match self.last_assign_ms {
            None => true,
            Some(last) => elapsed - last >= self.tuning.reassign_interval_ms,
        };
        if due {
            assign_targets(&mut self.particles, &self.targets);
            self.last_assign_ms = Some(elapsed);
        }

        let convergence = self.convergence;
        let tuning = &self.tuning;
        let margin = tuning.wrap_margin;
        for particle in &mut self.particles {
            let target = particle.target.and_then(|index| self.targets.get(index));
            match target {
                Some(&(tx, ty)) if convergence > tuning.convergence_threshold => {
                    let angle = phase_angle(now_ms, particle.drift_speed, particle.phase);
                    let goal_x = tx + angle.cos() * particle.drift_radius;
                    let goal_y = ty + angle.sin() * particle.drift_radius;
                    let pull = tuning.pull_strength * convergence;
                    let residual = (1.0 - convergence) * tuning.velocity_residual;
                    particle.x += (goal_x - particle.x) * pull + particle.vx * residual;
                    particle.y += (goal_y - particle.y) * pull + particle.vy * residual;
                }
                _ => {
                    particle.x += particle.vx;
                    particle.y += particle.vy;
                }
            }

            if particle.x < -margin {
                particle.x = self.width + margin;
            } else if particle.x > self.width + margin {
                particle.x = -margin;
            }
            if particle.y < -margin {
                particle.y = self.height + margin;
            } else if particle.y > self.height + margin {
                particle.y = -margin;
            }

            let twinkle = phase_angle(now_ms, tuning.twinkle_speed, particle.phase).sin();
            particle.opacity =
                particle.base_opacity * (1.0 - tuning.twinkle_depth + tuning.twinkle_depth * twinkle);
        }

        self.grid
            .rebuild(self.particles.iter().map(|particle| (particle.x, particle.y)));
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        surface.clear(self.width, self.height);
        let distance = self.tuning.connect_distance;
        let distance_sq = distance * distance;
        for (index, particle) in self.particles.iter().enumerate() {
            for other_index in self.grid.neighbors(particle.x, particle.y) {
                if other_index <= index {
                    continue;
                }
                let other = &self.particles[other_index];
                let dx = particle.x - other.x;
                let dy = particle.y - other.y;
                let dist_sq = dx * dx + dy * dy;
                if dist_sq >= distance_sq {
                    continue;
                }
                let alpha = (1.0 - dist_sq.sqrt() / distance) * self.tuning.line_alpha;
                surface.line((particle.x, particle.y), (other.x, other.y), alpha);
            }
        }
        for particle in &self.particles {
            let center = (particle.x, particle.y);
            surface.dot(center, particle.radius, particle.opacity);
            if particle.opacity > self.tuning.halo_threshold {
                surface.dot(
                    center,
                    particle.radius * self.tuning.halo_scale,
                    particle.opacity * self.tuning.halo_alpha,
                );
            }
        }
    }

    pub fn frame(&mut self, now_ms: f64, surface: &mut impl Surface) {
        self.step(now_ms);
        self.draw(surface);
    }
}
