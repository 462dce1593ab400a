//! Engine configuration.
//!
//! `LoopConfig` is all the loop controller needs and is usable headless.
//! `EngineConfig` adds what the windowed host needs on top of it, including
//! the `GpuConfig` of the device and presenter.

use std::time::Duration;

use crate::logging::LoggingConfig;
use crate::paint::Rgba8;

/// Loop controller settings.
#[derive(Debug, Clone)]
pub struct LoopConfig {
    /// Render surface width in pixels.
    pub surface_width: u32,
    /// Render surface height in pixels.
    pub surface_height: u32,
    /// Color the surface is cleared to before every render phase.
    /// `None` leaves the previous frame in place.
    pub clear_color: Option<Rgba8>,
    /// Upper bound for a single frame's delta. Unbounded when `None`.
    pub max_frame_delta: Option<Duration>,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            surface_width: 808,
            surface_height: 808,
            clear_color: Some(Rgba8::WHITE),
            max_frame_delta: None,
        }
    }
}

impl LoopConfig {
    pub fn surface_size(mut self, width: u32, height: u32) -> Self {
        self.surface_width = width.max(1);
        self.surface_height = height.max(1);
        self
    }

    pub fn clear_color(mut self, color: Option<Rgba8>) -> Self {
        self.clear_color = color;
        self
    }

    pub fn max_frame_delta(mut self, max: Duration) -> Self {
        self.max_frame_delta = Some(max);
        self
    }
}

/// Display settings of the windowed host.
#[derive(Debug, Clone)]
pub struct GpuConfig {
    /// Present mode. FIFO paces ticks to the display refresh; unsupported
    /// modes fall back to FIFO.
    pub present_mode: wgpu::PresentMode,
    /// Prefer an sRGB swapchain so surface pixels reach the screen unchanged.
    pub prefer_srgb: bool,
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,
    pub power_preference: wgpu::PowerPreference,
    /// Filter used when the blit scales the surface to the window.
    /// `Nearest` keeps sprite edges sharp.
    pub blit_filter: wgpu::FilterMode,
    /// Hint for the swapchain's frame latency.
    pub max_frame_latency: u32,
}

impl Default for GpuConfig {
    fn default() -> Self {
        Self {
            present_mode: wgpu::PresentMode::Fifo,
            prefer_srgb: true,
            alpha_mode: None,
            power_preference: wgpu::PowerPreference::LowPower,
            blit_filter: wgpu::FilterMode::Nearest,
            max_frame_latency: 2,
        }
    }
}

impl GpuConfig {
    /// FIFO when on; otherwise `AutoNoVsync`, which ticks as fast as frames
    /// can be presented.
    pub fn vsync(mut self, on: bool) -> Self {
        self.present_mode = if on {
            wgpu::PresentMode::Fifo
        } else {
            wgpu::PresentMode::AutoNoVsync
        };
        self
    }

    /// Linear filtering for a window larger or smaller than the surface.
    pub fn smooth_scaling(mut self, on: bool) -> Self {
        self.blit_filter = if on { wgpu::FilterMode::Linear } else { wgpu::FilterMode::Nearest };
        self
    }
}

/// Windowed host settings.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub title: String,
    pub loop_config: LoopConfig,
    pub gpu: GpuConfig,
    pub logging: LoggingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: "bugdash".to_string(),
            loop_config: LoopConfig::default(),
            gpu: GpuConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), ..Self::default() }
    }

    pub fn surface_size(mut self, width: u32, height: u32) -> Self {
        self.loop_config = self.loop_config.surface_size(width, height);
        self
    }

    pub fn clear_color(mut self, color: Option<Rgba8>) -> Self {
        self.loop_config = self.loop_config.clear_color(color);
        self
    }

    pub fn max_frame_delta(mut self, max: Duration) -> Self {
        self.loop_config = self.loop_config.max_frame_delta(max);
        self
    }

    pub fn gpu(mut self, gpu: GpuConfig) -> Self {
        self.gpu = gpu;
        self
    }

    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = logging;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_board_size() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.title, "bugdash");
        assert_eq!((cfg.loop_config.surface_width, cfg.loop_config.surface_height), (808, 808));
        assert_eq!(cfg.loop_config.clear_color, Some(Rgba8::WHITE));
        assert!(cfg.loop_config.max_frame_delta.is_none());
        assert_eq!(cfg.gpu.present_mode, wgpu::PresentMode::Fifo);
        assert_eq!(cfg.gpu.blit_filter, wgpu::FilterMode::Nearest);
    }

    #[test]
    fn gpu_builder_switches_pacing_and_filter() {
        let gpu = GpuConfig::default().vsync(false).smooth_scaling(true);
        assert_eq!(gpu.present_mode, wgpu::PresentMode::AutoNoVsync);
        assert_eq!(gpu.blit_filter, wgpu::FilterMode::Linear);

        let cfg = EngineConfig::new("demo").gpu(gpu.vsync(true));
        assert_eq!(cfg.gpu.present_mode, wgpu::PresentMode::Fifo);
        assert_eq!(cfg.gpu.blit_filter, wgpu::FilterMode::Linear);
    }

    #[test]
    fn builder_updates_loop_settings() {
        let cfg = EngineConfig::new("demo")
            .surface_size(0, 240)
            .clear_color(None)
            .max_frame_delta(Duration::from_millis(100));

        assert_eq!(cfg.title, "demo");
        assert_eq!(cfg.loop_config.surface_width, 1);
        assert_eq!(cfg.loop_config.surface_height, 240);
        assert_eq!(cfg.loop_config.clear_color, None);
        assert_eq!(cfg.loop_config.max_frame_delta, Some(Duration::from_millis(100)));
    }
}
