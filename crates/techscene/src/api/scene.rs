//! The mounted showcase scene: owns every subsystem and drives one frame per
//! display refresh.

use glam::{Vec2, Vec3};
use crate::api::config::SceneConfig;
use crate::api::error::SceneError;
use crate::api::host::SceneHost;
use crate::api::types::{Category, ObjectId, SelectionKey};
use crate::assets::content::DescriptiveContent;
use crate::assets::loader::{LoadOutcome, LoadTicket, TextureFetcher, TextureLoader};
use crate::assets::manifest::{FlowDescriptor, SceneManifest};
use crate::components::motion::MotionParams;
use crate::components::object::Transform;
use crate::core::scene::SceneRegistry;
use crate::core::time::FrameClock;
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::camera::{CameraController, CameraState, CameraUniform};
use crate::renderer::instance::{FlowPulse, FrameSnapshot, ObjectInstance};
use crate::systems::animation::{
    flow_position, object_transform, particle_field_rotation, typed_chars, wireframe_opacity,
};
use crate::systems::info_panel::InfoPanelController;
use crate::systems::interaction::{Dispatcher, InteractionState};
use crate::systems::particles::ParticleField;
use crate::systems::picking::pick_screen;

pub struct ShowcaseScene {
    config: SceneConfig,
    registry: SceneRegistry,
    clock: FrameClock,
    particles: ParticleField,
    flows: Vec<FlowDescriptor>,
    camera: CameraController,
    dispatcher: Dispatcher,
    panel: InfoPanelController,
    loader: TextureLoader,
    input: InputQueue,
    /// Animated transforms from the latest frame, in registry order.
    transforms: Vec<Transform>,
    snapshot: FrameSnapshot,
    camera_uniform: CameraUniform,
    disposed: bool,
}

impl ShowcaseScene {
    /// Build a scene. Any configuration error refuses to start.
    pub fn new(
        config: SceneConfig,
        manifest: &SceneManifest,
        content: DescriptiveContent,
    ) -> Result<Self, SceneError> {
        let registry = SceneRegistry::new(manifest.create_objects()?)?;
        let particles = ParticleField::new(config.device_class, config.seed);
        let camera = CameraController::new(config.tour_delay, config.viewport);
        let camera_uniform = camera.camera().uniform();

        log::info!(
            "showcase scene: {} objects, {} flows, {} content entries",
            registry.len(),
            manifest.flows.len(),
            content.len()
        );

        let mut scene = Self {
            clock: FrameClock::new(config.max_frame_dt),
            dispatcher: Dispatcher::new(config.drag_threshold),
            panel: InfoPanelController::new(content),
            loader: TextureLoader::new(),
            input: InputQueue::new(),
            transforms: Vec::with_capacity(registry.len()),
            snapshot: FrameSnapshot::new(),
            flows: manifest.flows.clone(),
            config,
            registry,
            particles,
            camera,
            camera_uniform,
            disposed: false,
        };
        scene.rebuild_frame(0.0);
        Ok(scene)
    }

    /// Scene built from the manifest and content shipped with the crate.
    pub fn builtin(config: SceneConfig) -> Result<Self, SceneError> {
        let manifest = SceneManifest::builtin()?;
        let content = DescriptiveContent::builtin()?;
        Self::new(config, &manifest, content)
    }

    /// Queue an input event for the next tick.
    pub fn push_input(&mut self, event: InputEvent) {
        if !self.disposed {
            self.input.push(event);
        }
    }

    /// Issue a load for every object that carries a texture path.
    /// Returns the number of fetches started.
    pub fn start_texture_loads(&mut self, fetcher: &mut dyn TextureFetcher) -> usize {
        let edge_px = self.config.profile().texture_edge_px;
        let mut started = 0;
        for obj in self.registry.iter() {
            if let Some(path) = &obj.texture {
                if self.loader.request(obj.id, path, edge_px, fetcher).is_some() {
                    started += 1;
                }
            }
        }
        started
    }

    /// Report a finished texture fetch. Applied on the next tick.
    pub fn complete_texture_load(&mut self, ticket: LoadTicket, outcome: LoadOutcome) {
        self.loader.complete(ticket, outcome);
    }

    /// Run one frame: advance time, apply input and finished loads, update
    /// the camera and rebuild the frame snapshot.
    pub fn tick(&mut self, dt: f32, host: &mut dyn SceneHost) {
        if self.disposed {
            return;
        }
        let t = self.clock.advance(dt);

        for event in self.input.drain() {
            self.handle_input(event, t, host);
        }
        self.loader.apply_completions();
        self.camera.update(t);
        self.rebuild_frame(t);
    }

    fn handle_input(&mut self, event: InputEvent, t: f32, host: &mut dyn SceneHost) {
        match event {
            InputEvent::PointerMove { x, y } => {
                self.dispatcher.pointer_move(Vec2::new(x, y), &mut self.camera);
                let hit = self.hit_test(x, y);
                self.dispatcher.pointer_over(hit, &mut self.registry, host);
            }
            InputEvent::PointerDown { x, y } => self.dispatcher.pointer_down(Vec2::new(x, y)),
            InputEvent::PointerUp { x, y } => {
                if self.dispatcher.pointer_up(Vec2::new(x, y)) {
                    if let Some(id) = self.hit_test(x, y) {
                        self.dispatcher
                            .on_click(id, &self.registry, &mut self.camera, &mut self.panel, host);
                    }
                }
            }
            InputEvent::PointerLeave => self.dispatcher.pointer_left_canvas(&mut self.registry, host),
            InputEvent::ToggleTour => {
                self.dispatcher.toggle_tour(t, &mut self.camera, &mut self.panel);
            }
            InputEvent::ClosePanel => self.dispatcher.close_panel(&mut self.panel),
            InputEvent::Resize { width, height } => self.camera.set_viewport(width, height),
        }
    }

    /// Object under a viewport pixel, using the latest frame's transforms.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<ObjectId> {
        pick_screen(
            &self.registry,
            &self.transforms,
            self.camera.camera(),
            x,
            y,
            self.camera.viewport(),
        )
    }

    fn rebuild_frame(&mut self, t: f32) {
        self.transforms.clear();
        self.snapshot.clear();
        for obj in self.registry.iter() {
            let transform = object_transform(obj, t);
            let params = MotionParams::for_category(obj.category);
            let material = self.loader.material(obj.id, params.placeholder_rgb);
            let extra = match obj.category {
                Category::CodeWindow => typed_chars(t) as f32,
                Category::CentralSphere => wireframe_opacity(t),
                _ => 0.0,
            };
            self.snapshot
                .instances
                .push(ObjectInstance::new(obj, &transform, material, extra));
            self.transforms.push(transform);
        }
        for flow in &self.flows {
            let pos = flow_position(Vec3::from_array(flow.from), Vec3::from_array(flow.to), t);
            self.snapshot.flows.push(FlowPulse::new(pos, flow.color));
        }
        self.snapshot.particle_rotation = particle_field_rotation(t);
        self.camera_uniform = self.camera.camera().uniform();
    }

    // ---- Direct interaction entry points ----

    pub fn on_pointer_enter(&mut self, id: ObjectId, host: &mut dyn SceneHost) {
        self.dispatcher.on_pointer_enter(id, &mut self.registry, host);
    }

    pub fn on_pointer_leave(&mut self, id: ObjectId, host: &mut dyn SceneHost) {
        self.dispatcher.on_pointer_leave(id, &mut self.registry, host);
    }

    pub fn on_click(&mut self, id: ObjectId, host: &mut dyn SceneHost) -> Option<SelectionKey> {
        self.dispatcher
            .on_click(id, &self.registry, &mut self.camera, &mut self.panel, host)
    }

    pub fn toggle_tour(&mut self) -> CameraState {
        let t = self.clock.elapsed_seconds();
        self.dispatcher.toggle_tour(t, &mut self.camera, &mut self.panel)
    }

    pub fn close_panel(&mut self) {
        self.dispatcher.close_panel(&mut self.panel);
    }

    /// Freeze scene time, e.g. while the page is hidden. Frames still run,
    /// so input and finished loads are applied against the held time.
    pub fn pause(&mut self) {
        if !self.clock.is_paused() {
            log::debug!("scene paused at {:.2}s", self.clock.elapsed_seconds());
        }
        self.clock.pause();
    }

    pub fn resume(&mut self) {
        self.clock.resume();
    }

    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    /// Stop the scene. Later ticks, input and texture completions are ignored.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.loader.dispose();
        self.input.clear();
        log::info!("showcase scene disposed after {} frames", self.clock.frame());
    }

    // ---- Accessors ----

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn registry(&self) -> &SceneRegistry {
        &self.registry
    }

    pub fn elapsed_seconds(&self) -> f32 {
        self.clock.elapsed_seconds()
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn camera_state(&self) -> CameraState {
        self.camera.state()
    }

    pub fn camera_uniform(&self) -> &CameraUniform {
        &self.camera_uniform
    }

    pub fn tour_enabled(&self) -> bool {
        self.camera.is_touring()
    }

    pub fn interaction(&self) -> &InteractionState {
        self.dispatcher.state()
    }

    pub fn hovered_label(&self) -> Option<&str> {
        let id = self.dispatcher.hovered()?;
        self.registry.get_by_id(id).map(|o| o.label.as_str())
    }

    pub fn panel(&self) -> &InfoPanelController {
        &self.panel
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn loader(&self) -> &TextureLoader {
        &self.loader
    }

    pub fn snapshot(&self) -> &FrameSnapshot {
        &self.snapshot
    }

    pub fn transform_of(&self, id: ObjectId) -> Option<&Transform> {
        self.registry.index_of(id).and_then(|i| self.transforms.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::DeviceClass;
    use crate::api::host::testing::RecordingHost;
    use crate::api::host::NullHost;
    use crate::assets::loader::testing::QueuedFetcher;
    use crate::assets::loader::{LoadFailure, TextureHandle};
    use glam::Vec4;

    fn scene(device_class: DeviceClass) -> ShowcaseScene {
        let config = SceneConfig::default()
            .with_device_class(device_class)
            .with_viewport(800.0, 600.0);
        ShowcaseScene::builtin(config).unwrap()
    }

    fn id_of(scene: &ShowcaseScene, label: &str, category: Category) -> ObjectId {
        scene
            .registry()
            .iter()
            .find(|o| o.label == label && o.category == category)
            .map(|o| o.id)
            .unwrap()
    }

    fn project(scene: &ShowcaseScene, id: ObjectId) -> (f32, f32) {
        let p = scene.transform_of(id).unwrap().position;
        let clip = scene.camera().camera().view_proj() * Vec4::new(p.x, p.y, p.z, 1.0);
        let [w, h] = scene.camera().viewport();
        let ndc = clip / clip.w;
        ((ndc.x + 1.0) / 2.0 * w, (1.0 - ndc.y) / 2.0 * h)
    }

    #[test]
    fn builtin_scene_has_full_manifest() {
        let s = scene(DeviceClass::Full);
        assert_eq!(s.registry().of_category(Category::LogoBadge).count(), 20);
        assert_eq!(s.registry().of_category(Category::MicroserviceNode).count(), 8);
        assert_eq!(s.snapshot().instance_count() as usize, s.registry().len());
        assert_eq!(s.snapshot().flow_count(), 5);
    }

    #[test]
    fn scenario_a_particle_budget_follows_device_flag() {
        assert_eq!(scene(DeviceClass::Constrained).particles().particles.len(), 200);
        assert_eq!(scene(DeviceClass::Full).particles().particles.len(), 500);
    }

    #[test]
    fn scenario_b_click_load_balancer_opens_panel_and_stops_tour() {
        let mut s = scene(DeviceClass::Full);
        let mut host = RecordingHost::default();
        s.toggle_tour();
        assert!(s.tour_enabled());

        let id = id_of(&s, "Load Balancer", Category::ServerRack);
        s.on_click(id, &mut host);

        let view = s.panel().view().unwrap();
        assert_eq!(view.title, "Load Balancer");
        assert_eq!(view.features.len(), 5);
        assert!(!s.tour_enabled());
        assert_eq!(host.selects, vec![("server".to_string(), "Load Balancer".to_string())]);
    }

    #[test]
    fn scenario_c_tour_starts_after_grace_delay() {
        let mut s = scene(DeviceClass::Full);
        for _ in 0..29 {
            s.tick(0.1, &mut NullHost);
        }
        assert_eq!(s.camera_state(), CameraState::Neutral);
        for _ in 0..2 {
            s.tick(0.1, &mut NullHost);
        }
        assert_eq!(s.camera_state(), CameraState::ScriptedTour);
    }

    #[test]
    fn scenario_d_failed_badge_texture_keeps_placeholder_and_interactivity() {
        let mut s = scene(DeviceClass::Constrained);
        let mut fetcher = QueuedFetcher::default();
        assert_eq!(s.start_texture_loads(&mut fetcher), 20);

        let node = id_of(&s, "Node.js", Category::LogoBadge);
        let (ticket, path) = fetcher
            .requests
            .iter()
            .find(|(ticket, _)| ticket.object == node)
            .cloned()
            .unwrap();
        s.complete_texture_load(ticket, Err(LoadFailure { path, reason: "404".into() }));
        s.tick(0.016, &mut NullHost);

        let index = s.registry().index_of(node).unwrap();
        let instance = s.snapshot().instances[index];
        assert_eq!(instance.material, 0.0);
        assert_eq!([instance.r, instance.g, instance.b], MotionParams::for_category(Category::LogoBadge).placeholder_rgb);
        assert_eq!(s.loader().failures().count(), 1);

        let mut host = RecordingHost::default();
        s.on_click(node, &mut host);
        assert_eq!(host.badges, vec!["Node.js".to_string()]);
        assert_eq!(s.panel().view().unwrap().title, "Node.js");
    }

    #[test]
    fn loaded_texture_reaches_instance_buffer() {
        let mut s = scene(DeviceClass::Full);
        let mut fetcher = QueuedFetcher::default();
        s.start_texture_loads(&mut fetcher);
        let (ticket, _) = fetcher.requests[0].clone();
        s.complete_texture_load(ticket, Ok(TextureHandle(3)));
        s.tick(0.016, &mut NullHost);
        let index = s.registry().index_of(ticket.object).unwrap();
        assert_eq!(s.snapshot().instances[index].texture, 3.0);
    }

    #[test]
    fn pointer_click_through_input_queue() {
        let mut s = scene(DeviceClass::Full);
        let mut host = RecordingHost::default();
        s.tick(0.0, &mut host);
        let id = id_of(&s, "Load Balancer", Category::ServerRack);
        let (x, y) = project(&s, id);

        s.push_input(InputEvent::PointerMove { x, y });
        s.push_input(InputEvent::PointerDown { x, y });
        s.push_input(InputEvent::PointerUp { x: x + 2.0, y });
        s.tick(0.016, &mut host);

        assert_eq!(s.hovered_label(), Some("Load Balancer"));
        assert_eq!(host.hovers, vec![("Load Balancer".to_string(), true)]);
        assert_eq!(s.interaction().selection.as_ref().map(|k| k.content_key()), Some("server-Load Balancer".to_string()));
        assert_eq!(s.camera_state(), CameraState::UserOrbit);

        let index = s.registry().index_of(id).unwrap();
        assert_eq!(s.snapshot().instances[index].highlight, 1.0);
    }

    #[test]
    fn close_panel_does_not_restart_tour() {
        let mut s = scene(DeviceClass::Full);
        let id = id_of(&s, "PostgreSQL", Category::Database);
        s.on_click(id, &mut NullHost);
        s.push_input(InputEvent::ClosePanel);
        for _ in 0..100 {
            s.tick(0.1, &mut NullHost);
        }
        assert!(!s.panel().is_open());
        assert!(!s.tour_enabled());
        assert!(s.interaction().selection.is_none());
    }

    #[test]
    fn failing_host_never_stops_frames() {
        let mut s = scene(DeviceClass::Full);
        let mut host = RecordingHost::failing();
        let id = id_of(&s, "MongoDB", Category::Database);
        s.on_pointer_enter(id, &mut host);
        s.on_click(id, &mut host);
        let before = s.elapsed_seconds();
        s.tick(0.1, &mut host);
        assert!(s.elapsed_seconds() > before);
        assert_eq!(s.interaction().hovered, Some(id));
    }

    #[test]
    fn dispose_stops_ticks_and_late_loads() {
        let mut s = scene(DeviceClass::Full);
        let mut fetcher = QueuedFetcher::default();
        s.start_texture_loads(&mut fetcher);
        s.tick(0.1, &mut NullHost);
        s.dispose();

        let (ticket, _) = fetcher.requests[0].clone();
        s.complete_texture_load(ticket, Ok(TextureHandle(1)));
        let t = s.elapsed_seconds();
        s.tick(0.1, &mut NullHost);
        assert_eq!(s.elapsed_seconds(), t);
        assert_eq!(s.loader().in_flight(), 20);
        assert!(s.is_disposed());
    }

    #[test]
    fn duplicate_ids_refuse_to_start() {
        let json = r#"{ "objects": [
            { "id": 1, "category": "database", "label": "A", "position": [0, 0, 0] },
            { "id": 1, "category": "database", "label": "B", "position": [1, 0, 0] }
        ] }"#;
        let manifest = SceneManifest::from_json(json).unwrap();
        let result = ShowcaseScene::new(SceneConfig::default(), &manifest, DescriptiveContent::new());
        assert!(matches!(result, Err(SceneError::DuplicateObjectId(ObjectId(1)))));
    }

    #[test]
    fn pause_holds_time_and_resumes_in_step() {
        let mut paused = scene(DeviceClass::Full);
        let mut steady = scene(DeviceClass::Full);
        for _ in 0..10 {
            paused.tick(0.1, &mut NullHost);
            steady.tick(0.1, &mut NullHost);
        }
        let t = paused.elapsed_seconds();
        let frozen = paused.snapshot().instances.clone();

        paused.pause();
        assert!(paused.is_paused());
        for _ in 0..50 {
            paused.tick(0.1, &mut NullHost);
        }
        assert_eq!(paused.elapsed_seconds(), t);
        assert_eq!(paused.snapshot().instances, frozen);

        paused.resume();
        for _ in 0..30 {
            paused.tick(0.1, &mut NullHost);
            steady.tick(0.1, &mut NullHost);
        }
        assert_eq!(paused.elapsed_seconds(), steady.elapsed_seconds());
        assert_eq!(paused.snapshot().instances, steady.snapshot().instances);
        assert_eq!(paused.camera().camera().eye, steady.camera().camera().eye);
    }

    #[test]
    fn resize_updates_aspect() {
        let mut s = scene(DeviceClass::Full);
        s.push_input(InputEvent::Resize { width: 1000.0, height: 500.0 });
        s.tick(0.016, &mut NullHost);
        assert!((s.camera().camera().aspect - 2.0).abs() < 1e-6);
    }
}
