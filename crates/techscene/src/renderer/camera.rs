use std::f32::consts::{PI, TAU};
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3, Vec4};

/// Scripted tour: angular speed (rad/s), radius, and vertical bob around `TOUR_BASE_Y`.
pub const TOUR_SPEED: f32 = 0.1;
pub const TOUR_RADIUS: f32 = 12.0;
pub const TOUR_BASE_Y: f32 = 2.0;
pub const TOUR_BOB: f32 = 2.0;
/// Seconds over which the tour eases from the entry pose onto its path.
pub const TOUR_BLEND: f32 = 2.5;

/// Orbit limits: polar angle bounds keep the camera from flipping under or over the scene.
pub const MIN_POLAR: f32 = PI / 3.5;
pub const MAX_POLAR: f32 = PI / 1.8;
pub const ROTATE_SPEED: f32 = 0.6;
pub const DAMPING: f32 = 0.08;

/// Perspective camera looking at a target.
#[derive(Debug, Clone)]
pub struct Camera3D {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 4],
}

impl CameraUniform {
    pub const FLOATS: usize = 20;
}

impl Camera3D {
    /// Showcase framing: eye at (0, 0, 12), 70° vertical FOV, looking at the origin.
    pub fn new(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, TOUR_RADIUS),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: 70f32.to_radians(),
            znear: 0.1,
            zfar: 200.0,
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_proj().to_cols_array_2d(),
            eye: self.eye.extend(1.0).to_array(),
        }
    }

    /// World-space ray through a viewport pixel (origin top-left).
    /// Returns `(origin, direction)`.
    pub fn screen_ray(&self, sx: f32, sy: f32, viewport: [f32; 2]) -> (Vec3, Vec3) {
        let width = viewport[0].max(1.0);
        let height = viewport[1].max(1.0);
        let ndc_x = (2.0 * sx / width) - 1.0;
        let ndc_y = 1.0 - (2.0 * sy / height);
        let inv = self.view_proj().inverse();
        let far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let far: Vec3 = far.truncate() / far.w;
        (self.eye, (far - self.eye).normalize())
    }
}

/// Which update function owns the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraState {
    /// Just mounted: held still, no orbit input, waiting for the grace delay.
    Neutral,
    ScriptedTour,
    UserOrbit,
}

#[derive(Debug, Clone, Copy)]
enum Mode {
    Neutral { until: f32 },
    /// `offset` is the entry eye minus the path point at `start_angle`;
    /// it fades to zero over `TOUR_BLEND`.
    ScriptedTour { entered_at: f32, start_angle: f32, offset: Vec3 },
    UserOrbit,
}

/// Spherical orbit around the target with damped drag input.
#[derive(Debug, Clone, Copy, Default)]
struct Orbit {
    azimuth: f32,
    polar: f32,
    radius: f32,
    pending_azimuth: f32,
    pending_polar: f32,
}

/// Camera state machine: neutral → scripted tour → user orbit.
///
/// Switching modes only changes which update function drives the camera on
/// the next frame; the new mode picks up from the current pose. The tour
/// eases onto its path from wherever the eye was when it started.
pub struct CameraController {
    camera: Camera3D,
    mode: Mode,
    orbit: Orbit,
    viewport: [f32; 2],
}

impl CameraController {
    pub fn new(tour_delay: f32, viewport: [f32; 2]) -> Self {
        let aspect = viewport[0] / viewport[1].max(1.0);
        Self {
            camera: Camera3D::new(aspect),
            mode: Mode::Neutral {
                until: tour_delay.max(0.0),
            },
            orbit: Orbit::default(),
            viewport,
        }
    }

    pub fn camera(&self) -> &Camera3D {
        &self.camera
    }

    pub fn viewport(&self) -> [f32; 2] {
        self.viewport
    }

    pub fn state(&self) -> CameraState {
        match self.mode {
            Mode::Neutral { .. } => CameraState::Neutral,
            Mode::ScriptedTour { .. } => CameraState::ScriptedTour,
            Mode::UserOrbit => CameraState::UserOrbit,
        }
    }

    pub fn is_touring(&self) -> bool {
        matches!(self.mode, Mode::ScriptedTour { .. })
    }

    /// Resize the viewport (e.g. on canvas resize).
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = [width, height];
        self.camera.aspect = width / height.max(1.0);
    }

    /// Explicit user toggle. Returns the new state.
    pub fn toggle_tour(&mut self, t: f32) -> CameraState {
        match self.mode {
            Mode::Neutral { .. } | Mode::UserOrbit => self.enter_tour(t),
            Mode::ScriptedTour { .. } => self.enter_orbit(),
        }
        self.state()
    }

    /// An object was selected: the tour always stops, and a pending
    /// automatic start is cancelled.
    pub fn on_selection(&mut self) {
        if !matches!(self.mode, Mode::UserOrbit) {
            self.enter_orbit();
        }
    }

    /// Drag input in pixels. Ignored outside user orbit.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        if !matches!(self.mode, Mode::UserOrbit) {
            return;
        }
        let height = self.viewport[1].max(1.0);
        self.orbit.pending_azimuth -= TAU * dx / height * ROTATE_SPEED;
        self.orbit.pending_polar -= TAU * dy / height * ROTATE_SPEED;
    }

    /// Per-frame update at scene time `t`.
    pub fn update(&mut self, t: f32) {
        if let Mode::Neutral { until } = self.mode {
            if t >= until {
                self.enter_tour(t);
            }
        }
        match self.mode {
            Mode::Neutral { .. } => {}
            Mode::ScriptedTour { entered_at, start_angle, offset } => {
                let since = (t - entered_at).max(0.0);
                let fade = 1.0 - smoothstep(since / TOUR_BLEND);
                self.camera.eye = tour_eye(start_angle + since * TOUR_SPEED) + offset * fade;
                self.camera.target = Vec3::ZERO;
            }
            Mode::UserOrbit => {
                let o = &mut self.orbit;
                o.azimuth += o.pending_azimuth * DAMPING;
                o.polar += o.pending_polar * DAMPING;
                o.pending_azimuth *= 1.0 - DAMPING;
                o.pending_polar *= 1.0 - DAMPING;
                o.polar = o.polar.clamp(MIN_POLAR, MAX_POLAR);
                self.camera.eye = self.camera.target + spherical(o.radius, o.polar, o.azimuth);
            }
        }
    }

    fn enter_tour(&mut self, t: f32) {
        // Continue around the circle from the camera's current bearing.
        let eye = self.camera.eye;
        let start_angle = eye.z.atan2(eye.x);
        let offset = eye - tour_eye(start_angle);
        self.mode = Mode::ScriptedTour { entered_at: t, start_angle, offset };
        log::debug!("camera: scripted tour from {start_angle:.2} rad");
    }

    fn enter_orbit(&mut self) {
        let offset = self.camera.eye - self.camera.target;
        let radius = offset.length().max(1e-3);
        self.orbit = Orbit {
            azimuth: offset.x.atan2(offset.z),
            polar: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            radius,
            pending_azimuth: 0.0,
            pending_polar: 0.0,
        };
        self.mode = Mode::UserOrbit;
        log::debug!("camera: user orbit");
    }
}

/// Eye position on the tour path at angle `phase`.
pub fn tour_eye(phase: f32) -> Vec3 {
    Vec3::new(
        phase.cos() * TOUR_RADIUS,
        TOUR_BASE_Y + (phase * 0.5).sin() * TOUR_BOB,
        phase.sin() * TOUR_RADIUS,
    )
}

fn smoothstep(x: f32) -> f32 {
    let x = x.clamp(0.0, 1.0);
    x * x * (3.0 - 2.0 * x)
}

/// Y-up spherical to cartesian; azimuth measured from +Z toward +X.
fn spherical(radius: f32, polar: f32, azimuth: f32) -> Vec3 {
    Vec3::new(
        radius * polar.sin() * azimuth.sin(),
        radius * polar.cos(),
        radius * polar.sin() * azimuth.cos(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> CameraController {
        CameraController::new(3.0, [800.0, 600.0])
    }

    #[test]
    fn starts_neutral_then_tours_after_delay() {
        let mut cam = controller();
        cam.update(0.0);
        assert_eq!(cam.state(), CameraState::Neutral);
        cam.update(2.9);
        assert_eq!(cam.state(), CameraState::Neutral);
        assert_eq!(cam.camera().eye, Vec3::new(0.0, 0.0, 12.0));
        cam.update(3.0);
        assert_eq!(cam.state(), CameraState::ScriptedTour);
    }

    #[test]
    fn tour_follows_circle_and_targets_origin() {
        let mut cam = controller();
        cam.toggle_tour(0.0);
        for i in 0..50 {
            let t = TOUR_BLEND + i as f32 * 0.7;
            cam.update(t);
            let eye = cam.camera().eye;
            let horizontal = (eye.x * eye.x + eye.z * eye.z).sqrt();
            assert!((horizontal - TOUR_RADIUS).abs() < 1e-3);
            assert!(eye.y >= TOUR_BASE_Y - TOUR_BOB - 1e-4 && eye.y <= TOUR_BASE_Y + TOUR_BOB + 1e-4);
            assert_eq!(cam.camera().target, Vec3::ZERO);
        }
    }

    #[test]
    fn tour_resumes_from_current_bearing() {
        let mut cam = controller();
        cam.toggle_tour(0.0);
        cam.update(0.0);
        let eye = cam.camera().eye;
        assert!(eye.x.abs() < 1e-4);
        assert!((eye.z - TOUR_RADIUS).abs() < 1e-4);
    }

    /// Eye travel along the tour path in one 60 Hz frame.
    const FRAME_STEP: f32 = TOUR_RADIUS * TOUR_SPEED / 60.0 * 1.5;

    #[test]
    fn auto_start_does_not_jump() {
        let mut cam = controller();
        cam.update(2.99);
        let before = cam.camera().eye;
        cam.update(3.0);
        assert_eq!(cam.state(), CameraState::ScriptedTour);
        assert!((cam.camera().eye - before).length() < FRAME_STEP);

        let mut prev = cam.camera().eye;
        for i in 1..=400 {
            cam.update(3.0 + i as f32 / 60.0);
            let eye = cam.camera().eye;
            assert!((eye - prev).length() < 0.1, "step {i} moved {}", (eye - prev).length());
            prev = eye;
        }
    }

    #[test]
    fn resume_from_orbit_does_not_jump() {
        let mut cam = controller();
        cam.on_selection();
        for _ in 0..200 {
            cam.drag(0.0, -5000.0);
            cam.update(5.0);
        }
        let before = cam.camera().eye;
        assert!(before.y < 0.0);

        assert_eq!(cam.toggle_tour(10.0), CameraState::ScriptedTour);
        cam.update(10.0);
        assert!((cam.camera().eye - before).length() < FRAME_STEP);

        cam.update(10.0 + TOUR_BLEND);
        let eye = cam.camera().eye;
        let horizontal = (eye.x * eye.x + eye.z * eye.z).sqrt();
        assert!((horizontal - TOUR_RADIUS).abs() < 1e-3);
        assert!(eye.y >= TOUR_BASE_Y - TOUR_BOB - 1e-4);
    }

    #[test]
    fn selection_stops_tour_and_cancels_auto_start() {
        let mut cam = controller();
        cam.on_selection();
        assert_eq!(cam.state(), CameraState::UserOrbit);
        cam.update(10.0);
        assert_eq!(cam.state(), CameraState::UserOrbit);

        let mut touring = controller();
        touring.update(3.0);
        touring.on_selection();
        assert_eq!(touring.state(), CameraState::UserOrbit);
    }

    #[test]
    fn orbit_never_restarts_tour_on_its_own() {
        let mut cam = controller();
        cam.update(3.0);
        cam.toggle_tour(3.5);
        assert_eq!(cam.state(), CameraState::UserOrbit);
        for i in 0..1000 {
            cam.update(3.5 + i as f32);
        }
        assert_eq!(cam.state(), CameraState::UserOrbit);
        assert_eq!(cam.toggle_tour(2000.0), CameraState::ScriptedTour);
    }

    #[test]
    fn handover_to_orbit_keeps_pose() {
        let mut cam = controller();
        cam.update(3.0);
        cam.update(9.0);
        let before = cam.camera().eye;
        cam.on_selection();
        cam.update(9.016);
        assert!((cam.camera().eye - before).length() < 1e-3);
    }

    #[test]
    fn orbit_polar_is_clamped_and_radius_fixed() {
        let mut cam = controller();
        cam.on_selection();
        for _ in 0..200 {
            cam.drag(0.0, 5000.0);
            cam.update(0.0);
        }
        let eye = cam.camera().eye;
        let polar = (eye.y / eye.length()).acos();
        assert!(polar >= MIN_POLAR - 1e-4 && polar <= MAX_POLAR + 1e-4);
        assert!((eye.length() - 12.0).abs() < 1e-3);
    }

    #[test]
    fn drag_ignored_while_touring() {
        let mut cam = controller();
        cam.toggle_tour(0.0);
        cam.update(1.0);
        let before = cam.camera().eye;
        cam.drag(300.0, 0.0);
        cam.update(1.0);
        assert_eq!(cam.camera().eye, before);
    }

    #[test]
    fn center_ray_points_at_target() {
        let cam = Camera3D::new(800.0 / 600.0);
        let (origin, dir) = cam.screen_ray(400.0, 300.0, [800.0, 600.0]);
        assert_eq!(origin, Vec3::new(0.0, 0.0, 12.0));
        assert!((dir - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-4);
    }

    #[test]
    fn uniform_is_twenty_floats() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), CameraUniform::FLOATS * 4);
    }
}
