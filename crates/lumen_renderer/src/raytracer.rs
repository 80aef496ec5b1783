//! Host-facing renderer facade.
//!
//! Owns the scene, the render settings and the frame counter. Every
//! mutation goes through `&mut self`, so no frame can be in flight while
//! the scene changes.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use lumen_core::Scene;
use lumen_math::{Interval, Vec3};

use crate::hittable::{Hittable, PrimitiveRef};
use crate::integrator::T_MIN;
use crate::renderer::{primary_ray, render_frame, ImageBuffer, RenderConfig};

/// Number of frames averaged for the FPS readout.
pub const FPS_WINDOW: usize = 60;

/// Rolling frame timing.
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    frames: u64,
    last_frame: Duration,
    window: VecDeque<Duration>,
}

impl FrameStats {
    /// Record one finished frame.
    pub fn record(&mut self, elapsed: Duration) {
        self.frames += 1;
        self.last_frame = elapsed;
        if self.window.len() == FPS_WINDOW {
            self.window.pop_front();
        }
        self.window.push_back(elapsed);
    }

    /// Total frames rendered.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Duration of the most recent frame.
    pub fn last_frame(&self) -> Duration {
        self.last_frame
    }

    /// Frames per second over the last [`FPS_WINDOW`] frames.
    pub fn fps(&self) -> f32 {
        let total: Duration = self.window.iter().sum();
        if total.is_zero() {
            return 0.0;
        }
        self.window.len() as f32 / total.as_secs_f32()
    }
}

/// Result of picking a pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pick {
    pub primitive: PrimitiveRef,
    /// Distance along the primary ray
    pub t: f32,
    pub point: Vec3,
    pub normal: Vec3,
}

/// Scene plus the state needed to render it frame after frame.
pub struct Raytracer {
    scene: Scene,
    config: RenderConfig,
    width: u32,
    height: u32,
    frame: u32,
    stats: FrameStats,
}

impl Raytracer {
    /// Renderer over the demo scene.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_scene(Scene::demo(), width, height)
    }

    pub fn with_scene(scene: Scene, width: u32, height: u32) -> Self {
        log::info!("Raytracer initialized at {}x{}", width, height);
        Self {
            scene,
            config: RenderConfig::default(),
            width,
            height,
            frame: 0,
            stats: FrameStats::default(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: RenderConfig) {
        self.config = config;
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Change the output resolution. The scene is untouched.
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) != (self.width, self.height) {
            log::debug!("Resized to {}x{}", width, height);
        }
        self.width = width;
        self.height = height;
    }

    /// Number of the next frame to render.
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Set the number of the next frame to render.
    pub fn set_frame(&mut self, frame: u32) {
        self.frame = frame;
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Render the next frame and advance the frame counter.
    pub fn render(&mut self) -> ImageBuffer {
        let start = Instant::now();
        let image = render_frame(&self.scene, self.width, self.height, self.frame, &self.config);
        self.stats.record(start.elapsed());
        self.frame = self.frame.wrapping_add(1);
        image
    }

    /// Resize, then render the next frame.
    pub fn render_at(&mut self, width: u32, height: u32) -> ImageBuffer {
        self.resize(width, height);
        self.render()
    }

    /// Closest primitive under film position (`x`, `y`) in pixels.
    pub fn pick(&self, x: f32, y: f32) -> Option<Pick> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let ray = primary_ray(self.scene.camera(), x, y, self.width, self.height);
        let rec = self.scene.hit(&ray, Interval::from_min(T_MIN))?;

        Some(Pick {
            primitive: rec.primitive?,
            t: rec.t,
            point: rec.p,
            normal: rec.normal,
        })
    }
}
