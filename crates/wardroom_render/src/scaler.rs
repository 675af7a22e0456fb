//! Adaptive render-resolution scaling
//!
//! The scaler picks a starting resolution divisor from coarse device hints
//! and then samples the achieved frame rate every couple of seconds, raising
//! the divisor (fewer pixels) when frames are slow and lowering it again
//! when there is headroom. The divisor itself lives on a [`ResolutionTarget`],
//! usually the renderer.

use std::time::{Duration, Instant};

/// Something whose render resolution can be divided down
pub trait ResolutionTarget {
    /// Current divisor (1.0 = native resolution)
    fn scaling_level(&self) -> f32;
    /// Set the divisor; the rendered pixel count shrinks by its square
    fn set_scaling_level(&mut self, level: f32);
}

/// Coarse hints about the device's capability
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DeviceHints {
    /// Approximate device memory in gigabytes, if known
    pub device_memory_gb: Option<f32>,
    /// Logical CPU cores, if known
    pub logical_cores: Option<usize>,
    /// Whether the primary pointer is coarse (a finger rather than a mouse)
    pub coarse_pointer: bool,
}

impl DeviceHints {
    /// Hints for the running machine
    ///
    /// Only the core count can be detected portably; memory and pointer
    /// kind are left for configuration to supply.
    pub fn detect() -> Self {
        Self {
            device_memory_gb: None,
            logical_cores: std::thread::available_parallelism().ok().map(|n| n.get()),
            coarse_pointer: false,
        }
    }
}

/// Scaler thresholds and bounds
#[derive(Clone, Debug, PartialEq)]
pub struct ScalerConfig {
    /// Length of one frame-rate sample
    pub sample_interval: Duration,
    /// Below this frame rate the divisor goes up
    pub low_fps: f32,
    /// Above this frame rate the divisor comes down
    pub high_fps: f32,
    pub step_up: f32,
    pub step_down: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    /// Changes no larger than this are not applied
    pub epsilon: f32,

    // Device-hint starting points
    pub low_memory_gb: f32,
    pub low_memory_scale: f32,
    pub low_core_count: usize,
    pub low_core_scale: f32,
    pub coarse_pointer_scale: f32,
}

impl Default for ScalerConfig {
    fn default() -> Self {
        Self {
            sample_interval: Duration::from_millis(2000),
            low_fps: 45.0,
            high_fps: 58.0,
            step_up: 0.2,
            step_down: 0.1,
            min_scale: 1.0,
            max_scale: 2.5,
            epsilon: 0.01,

            low_memory_gb: 4.0,
            low_memory_scale: 1.6,
            low_core_count: 4,
            low_core_scale: 1.4,
            coarse_pointer_scale: 1.4,
        }
    }
}

/// Frame-rate driven resolution scaler
#[derive(Clone, Debug)]
pub struct AdaptiveScaler {
    config: ScalerConfig,
    frame_count: u32,
    last_sample: Instant,
    last_fps: Option<f32>,
}

impl AdaptiveScaler {
    /// Create a scaler whose first sample window starts at `now`
    pub fn new(config: ScalerConfig, now: Instant) -> Self {
        Self {
            config,
            frame_count: 0,
            last_sample: now,
            last_fps: None,
        }
    }

    pub fn config(&self) -> &ScalerConfig {
        &self.config
    }

    /// Starting divisor for a device
    pub fn initial_scale(&self, hints: &DeviceHints) -> f32 {
        let c = &self.config;
        let mut scale = 1.0;
        if hints.device_memory_gb.is_some_and(|gb| gb <= c.low_memory_gb) {
            scale = c.low_memory_scale;
        } else if hints.logical_cores.is_some_and(|n| n <= c.low_core_count) {
            scale = c.low_core_scale;
        }
        if hints.coarse_pointer {
            scale = f32::max(scale, c.coarse_pointer_scale);
        }
        scale
    }

    /// Apply the starting divisor to a target
    pub fn apply_initial<T: ResolutionTarget + ?Sized>(&self, hints: &DeviceHints, target: &mut T) -> f32 {
        let scale = self.initial_scale(hints);
        target.set_scaling_level(scale);
        log::info!("Initial render scale {:.2} from {:?}", scale, hints);
        scale
    }

    /// Record a completed frame
    ///
    /// Once a full sample interval has elapsed this measures the frame rate,
    /// starts a new window and, if the divisor should move by more than the
    /// epsilon, applies it to the target and returns it.
    pub fn frame_rendered<T: ResolutionTarget + ?Sized>(&mut self, now: Instant, target: &mut T) -> Option<f32> {
        self.frame_count += 1;
        let elapsed = now.saturating_duration_since(self.last_sample);
        if elapsed < self.config.sample_interval {
            return None;
        }

        let fps = self.frame_count as f32 / elapsed.as_secs_f32();
        self.frame_count = 0;
        self.last_sample = now;
        self.last_fps = Some(fps);
        log::debug!("Sampled {:.1} fps", fps);

        let current = target.scaling_level();
        let next = self.next_scale(current, fps);
        if (next - current).abs() > self.config.epsilon {
            target.set_scaling_level(next);
            log::info!("Render scale {:.2} -> {:.2} at {:.1} fps", current, next, fps);
            Some(next)
        } else {
            None
        }
    }

    /// Divisor to use after measuring `fps` at `current`
    pub fn next_scale(&self, current: f32, fps: f32) -> f32 {
        let c = &self.config;
        if fps < c.low_fps && current < c.max_scale {
            f32::min(c.max_scale, current + c.step_up)
        } else if fps > c.high_fps && current > c.min_scale {
            f32::max(c.min_scale, current - c.step_down)
        } else {
            current
        }
    }

    /// Frame rate measured by the last completed sample
    pub fn last_fps(&self) -> Option<f32> {
        self.last_fps
    }
}

/// Render-target size in pixels for a surface size and divisor
pub fn scaled_size(width: u32, height: u32, scale: f32) -> (u32, u32) {
    let scale = if scale.is_finite() && scale >= 1.0 { scale } else { 1.0 };
    let w = (width as f32 / scale).ceil() as u32;
    let h = (height as f32 / scale).ceil() as u32;
    (w.max(1), h.max(1))
}
