/// Coarse device-capability tier, supplied once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceClass {
    /// Phones, tablets and other low-power devices.
    Constrained,
    #[default]
    Full,
}

impl DeviceClass {
    pub fn from_constrained(constrained: bool) -> Self {
        if constrained {
            DeviceClass::Constrained
        } else {
            DeviceClass::Full
        }
    }

    /// Every budget the device flag controls.
    pub fn profile(self) -> DeviceProfile {
        match self {
            DeviceClass::Constrained => DeviceProfile {
                particle_count: 200,
                star_count: 2000,
                max_pixel_ratio: 1.5,
                texture_edge_px: 256,
                high_performance: false,
            },
            DeviceClass::Full => DeviceProfile {
                particle_count: 500,
                star_count: 5000,
                max_pixel_ratio: 2.0,
                texture_edge_px: 512,
                high_performance: true,
            },
        }
    }
}

/// Resource budgets derived from a [`DeviceClass`]. Fixed for the lifetime
/// of a mounted scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceProfile {
    /// Points in the main particle shell.
    pub particle_count: usize,
    /// Points in the background star shell.
    pub star_count: usize,
    /// Upper bound for the canvas device pixel ratio.
    pub max_pixel_ratio: f32,
    /// Preferred texture edge length in pixels.
    pub texture_edge_px: u32,
    /// Whether to request a high-performance GPU.
    pub high_performance: bool,
}

/// Configuration for a scene instance.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// Capability tier (default: full).
    pub device_class: DeviceClass,
    /// Seed for the particle and star generators.
    pub seed: u64,
    /// Seconds after mount before the scripted tour starts (default: 3.0).
    pub tour_delay: f32,
    /// Largest frame delta accepted by the clock, in seconds (default: 0.25).
    /// Longer gaps (background tabs) are clamped.
    pub max_frame_dt: f32,
    /// Pointer travel in pixels that turns a press into a drag (default: 8.0).
    pub drag_threshold: f32,
    /// Initial viewport size in pixels.
    pub viewport: [f32; 2],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            device_class: DeviceClass::Full,
            seed: 42,
            tour_delay: 3.0,
            max_frame_dt: 0.25,
            drag_threshold: 8.0,
            viewport: [1280.0, 720.0],
        }
    }
}

impl SceneConfig {
    pub fn with_device_class(mut self, device_class: DeviceClass) -> Self {
        self.device_class = device_class;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = [width, height];
        self
    }

    pub fn profile(&self) -> DeviceProfile {
        self.device_class.profile()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constrained_budgets_are_smaller() {
        let low = DeviceClass::Constrained.profile();
        let high = DeviceClass::Full.profile();
        assert!(low.particle_count < high.particle_count);
        assert!(low.star_count < high.star_count);
        assert!(low.texture_edge_px < high.texture_edge_px);
        assert!(!low.high_performance);
    }

    #[test]
    fn default_config_waits_three_seconds() {
        let cfg = SceneConfig::default();
        assert_eq!(cfg.tour_delay, 3.0);
        assert_eq!(cfg.device_class, DeviceClass::Full);
    }

    #[test]
    fn from_constrained_flag() {
        assert_eq!(DeviceClass::from_constrained(true), DeviceClass::Constrained);
        assert_eq!(DeviceClass::from_constrained(false), DeviceClass::Full);
    }
}
