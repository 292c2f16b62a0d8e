//! Per-category animation constants. Fixed configuration, never derived at runtime.

use crate::api::types::Category;

/// Motion and presentation parameters shared by every object of a category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionParams {
    /// Continuous spin about Y, radians per second.
    pub spin_rate: f32,
    /// Back-and-forth yaw: frequency and amplitude.
    pub sway_freq: f32,
    pub sway_amp: f32,
    /// Continuous tumble about X, radians per second.
    pub tumble_rate: f32,
    /// Tilt about X: frequency and amplitude.
    pub tilt_freq: f32,
    pub tilt_amp: f32,
    /// Vertical float.
    pub float_freq: f32,
    pub float_amp: f32,
    /// Always-on breathing scale.
    pub idle_pulse_freq: f32,
    pub idle_pulse_amp: f32,
    /// Hover emphasis: `boost * (1 + sin(t * 5) * hover_pulse_amp)`.
    pub hover_pulse_amp: f32,
    pub hover_boost: f32,
    /// Bounding-sphere radius at scale 1, for hit tests.
    pub pick_radius: f32,
    /// Flat material shown until a texture loads.
    pub placeholder_rgb: [f32; 3],
}

/// Hover pulse frequency, radians per second.
pub const HOVER_PULSE_FREQ: f32 = 5.0;

const STILL: MotionParams = MotionParams {
    spin_rate: 0.0,
    sway_freq: 0.0,
    sway_amp: 0.0,
    tumble_rate: 0.0,
    tilt_freq: 0.0,
    tilt_amp: 0.0,
    float_freq: 0.0,
    float_amp: 0.0,
    idle_pulse_freq: 0.0,
    idle_pulse_amp: 0.0,
    hover_pulse_amp: 0.0,
    hover_boost: 1.0,
    pick_radius: 0.5,
    placeholder_rgb: [1.0, 1.0, 1.0],
};

const SERVER_RACK: MotionParams = MotionParams {
    float_freq: 0.5,
    float_amp: 0.08,
    hover_pulse_amp: 0.05,
    pick_radius: 1.2,
    placeholder_rgb: [0.04, 0.04, 0.04],
    ..STILL
};

const DATABASE: MotionParams = MotionParams {
    spin_rate: 0.4,
    float_freq: 0.8,
    float_amp: 0.15,
    hover_pulse_amp: 0.08,
    pick_radius: 0.8,
    placeholder_rgb: [0.0, 1.0, 0.25],
    ..STILL
};

const CODE_WINDOW: MotionParams = MotionParams {
    sway_freq: 0.3,
    sway_amp: 0.25,
    float_freq: 0.8,
    float_amp: 0.12,
    hover_pulse_amp: 0.05,
    pick_radius: 0.9,
    placeholder_rgb: [0.12, 0.12, 0.12],
    ..STILL
};

const LOGO_BADGE: MotionParams = MotionParams {
    spin_rate: 0.3,
    float_freq: 0.6,
    float_amp: 0.12,
    hover_pulse_amp: 0.1,
    pick_radius: 0.55,
    placeholder_rgb: [0.0, 1.0, 0.25],
    ..STILL
};

const MICROSERVICE_NODE: MotionParams = MotionParams {
    spin_rate: 0.7,
    tumble_rate: 0.5,
    idle_pulse_freq: 3.0,
    idle_pulse_amp: 0.15,
    hover_boost: 1.2,
    pick_radius: 0.35,
    placeholder_rgb: [0.0, 0.5, 1.0],
    ..STILL
};

const CENTRAL_SPHERE: MotionParams = MotionParams {
    spin_rate: 0.15,
    tilt_freq: 0.05,
    tilt_amp: 0.15,
    pick_radius: 4.0,
    placeholder_rgb: [0.0, 1.0, 0.25],
    ..STILL
};

impl MotionParams {
    pub fn for_category(category: Category) -> &'static MotionParams {
        match category {
            Category::ServerRack => &SERVER_RACK,
            Category::Database => &DATABASE,
            Category::CodeWindow => &CODE_WINDOW,
            Category::LogoBadge => &LOGO_BADGE,
            Category::MicroserviceNode => &MICROSERVICE_NODE,
            Category::CentralSphere => &CENTRAL_SPHERE,
        }
    }

    /// Period of the vertical float, if the category floats.
    #[cfg(test)]
    pub fn float_period(&self) -> Option<f32> {
        (self.float_freq > 0.0).then(|| std::f32::consts::TAU / self.float_freq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn racks_do_not_spin() {
        let p = MotionParams::for_category(Category::ServerRack);
        assert_eq!(p.spin_rate, 0.0);
        assert_eq!(p.float_amp, 0.08);
    }

    #[test]
    fn float_period_matches_frequency() {
        let p = MotionParams::for_category(Category::Database);
        let period = p.float_period().unwrap();
        assert!((period - std::f32::consts::TAU / 0.8).abs() < 1e-6);
        assert!(MotionParams::for_category(Category::MicroserviceNode)
            .float_period()
            .is_none());
    }
}
