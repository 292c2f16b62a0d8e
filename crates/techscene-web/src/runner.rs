use std::cell::{Cell, RefCell};
use js_sys::{Function, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlImageElement;
use techscene::{
    CameraState, CursorHint, DeviceClass, HostError, InputEvent, LoadFailure, LoadOutcome,
    LoadTicket, SceneConfig, SceneError, SceneHost, ShowcaseScene, TextureFetcher, TextureHandle,
};

thread_local! {
    /// Generation of the mounted scene's loader; 0 while unmounted.
    static ACTIVE_GENERATION: Cell<u32> = Cell::new(0);
    /// Finished image loads, handed to the scene on the next tick.
    static COMPLETIONS: RefCell<Vec<(LoadTicket, LoadOutcome)>> = RefCell::new(Vec::new());
    /// Decoded images and their preferred texture edge, indexed by handle.
    static IMAGES: RefCell<Vec<(HtmlImageElement, u32)>> = RefCell::new(Vec::new());
}

fn is_current(ticket: LoadTicket) -> bool {
    ACTIVE_GENERATION.with(|g| g.get() == ticket.generation)
}

fn push_completion(ticket: LoadTicket, outcome: LoadOutcome) {
    if !is_current(ticket) {
        log::debug!("ignoring image load for {} after unmount", ticket.object);
        return;
    }
    COMPLETIONS.with(|c| c.borrow_mut().push((ticket, outcome)));
}

/// Image for a loaded texture handle.
pub fn texture_image(handle: u32) -> Option<HtmlImageElement> {
    IMAGES.with(|images| images.borrow().get(handle as usize).map(|(img, _)| img.clone()))
}

/// Preferred upload edge (px) for a loaded texture handle.
pub fn texture_edge(handle: u32) -> u32 {
    IMAGES.with(|images| images.borrow().get(handle as usize).map_or(0, |(_, edge)| *edge))
}

/// Loads images with `HtmlImageElement`; results land in `COMPLETIONS`.
pub struct WebFetcher;

impl TextureFetcher for WebFetcher {
    fn fetch(&mut self, ticket: LoadTicket, path: &str, edge_px: u32) {
        let img = match HtmlImageElement::new() {
            Ok(img) => img,
            Err(err) => {
                push_completion(
                    ticket,
                    Err(LoadFailure {
                        path: path.to_string(),
                        reason: format!("{err:?}"),
                    }),
                );
                return;
            }
        };
        img.set_cross_origin(Some("anonymous"));

        let loaded = img.clone();
        let onload = Closure::once_into_js(move || {
            if !is_current(ticket) {
                return;
            }
            let handle = IMAGES.with(|images| {
                let mut images = images.borrow_mut();
                images.push((loaded, edge_px));
                TextureHandle(images.len() as u32 - 1)
            });
            push_completion(ticket, Ok(handle));
        });

        let failed_path = path.to_string();
        let onerror = Closure::once_into_js(move || {
            push_completion(
                ticket,
                Err(LoadFailure {
                    path: failed_path,
                    reason: "image failed to load".to_string(),
                }),
            );
        });

        img.set_onload(Some(onload.unchecked_ref()));
        img.set_onerror(Some(onerror.unchecked_ref()));
        img.set_src(path);
    }
}

/// Forwards scene callbacks to functions on a JS object:
/// `onObjectHover`, `onObjectSelect`, `onTechBadgeSelect`, `setCursor`.
/// Missing functions are skipped; thrown exceptions become `HostError`s.
pub struct JsHost {
    callbacks: JsValue,
}

impl JsHost {
    pub fn new(callbacks: JsValue) -> Self {
        Self { callbacks }
    }

    fn call(&self, name: &'static str, args: &[JsValue]) -> Result<(), HostError> {
        if self.callbacks.is_undefined() || self.callbacks.is_null() {
            return Ok(());
        }
        let value = Reflect::get(&self.callbacks, &JsValue::from_str(name))
            .map_err(|err| HostError::new(name, format!("{err:?}")))?;
        if value.is_undefined() || value.is_null() {
            return Ok(());
        }
        let func: Function = value
            .dyn_into()
            .map_err(|_| HostError::new(name, "not a function"))?;
        let result = match args {
            [] => func.call0(&JsValue::NULL),
            [a] => func.call1(&JsValue::NULL, a),
            [a, b, ..] => func.call2(&JsValue::NULL, a, b),
        };
        result
            .map(|_| ())
            .map_err(|err| HostError::new(name, format!("{err:?}")))
    }
}

impl SceneHost for JsHost {
    fn on_object_hover(&mut self, name: &str, is_hovered: bool) -> Result<(), HostError> {
        self.call("onObjectHover", &[JsValue::from_str(name), JsValue::from_bool(is_hovered)])
    }

    fn on_object_select(&mut self, category: &str, name: &str) -> Result<(), HostError> {
        self.call("onObjectSelect", &[JsValue::from_str(category), JsValue::from_str(name)])
    }

    fn on_tech_badge_select(&mut self, name: &str) -> Result<(), HostError> {
        self.call("onTechBadgeSelect", &[JsValue::from_str(name)])
    }

    fn set_cursor(&mut self, hint: CursorHint) -> Result<(), HostError> {
        self.call("setCursor", &[JsValue::from_str(hint.as_css())])
    }
}

/// Owns the mounted scene and its JS host. Lives in a `thread_local!` in
/// `lib.rs`; there is at most one per page.
pub struct SceneRunner {
    scene: ShowcaseScene,
    host: JsHost,
}

impl SceneRunner {
    pub fn mount(constrained: bool, callbacks: JsValue) -> Result<Self, SceneError> {
        let config = SceneConfig::default().with_device_class(DeviceClass::from_constrained(constrained));
        let mut scene = ShowcaseScene::builtin(config)?;

        ACTIVE_GENERATION.with(|g| g.set(scene.loader().generation()));
        let started = scene.start_texture_loads(&mut WebFetcher);
        log::info!("techscene: mounted ({started} textures requested)");

        Ok(Self {
            scene,
            host: JsHost::new(callbacks),
        })
    }

    /// Apply finished loads and run one frame.
    pub fn tick(&mut self, dt: f32, input: Vec<InputEvent>) {
        for (ticket, outcome) in COMPLETIONS.with(|c| std::mem::take(&mut *c.borrow_mut())) {
            self.scene.complete_texture_load(ticket, outcome);
        }
        for event in input {
            self.scene.push_input(event);
        }
        self.scene.tick(dt, &mut self.host);
    }

    pub fn set_paused(&mut self, paused: bool) {
        if paused {
            self.scene.pause();
        } else {
            self.scene.resume();
        }
    }

    /// Dispose the scene and drop every pending or loaded image.
    pub fn unmount(mut self) {
        self.scene.dispose();
        ACTIVE_GENERATION.with(|g| g.set(0));
        COMPLETIONS.with(|c| c.borrow_mut().clear());
        IMAGES.with(|images| images.borrow_mut().clear());
    }

    // ---- Pointer accessors for renderer reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.scene.snapshot().instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.scene.snapshot().instance_count()
    }

    pub fn flows_ptr(&self) -> *const f32 {
        self.scene.snapshot().flows_ptr()
    }

    pub fn flow_count(&self) -> u32 {
        self.scene.snapshot().flow_count()
    }

    pub fn particles_ptr(&self) -> *const f32 {
        self.scene.particles().particles_ptr()
    }

    pub fn particle_count(&self) -> u32 {
        self.scene.particles().particles.len() as u32
    }

    pub fn stars_ptr(&self) -> *const f32 {
        self.scene.particles().stars_ptr()
    }

    pub fn star_count(&self) -> u32 {
        self.scene.particles().stars.len() as u32
    }

    pub fn particle_rotation(&self) -> [f32; 2] {
        self.scene.snapshot().particle_rotation
    }

    pub fn camera_uniform_ptr(&self) -> *const f32 {
        self.scene.camera_uniform() as *const _ as *const f32
    }

    // ---- State accessors ----

    pub fn tour_enabled(&self) -> bool {
        self.scene.tour_enabled()
    }

    pub fn camera_state(&self) -> u32 {
        match self.scene.camera_state() {
            CameraState::Neutral => 0,
            CameraState::ScriptedTour => 1,
            CameraState::UserOrbit => 2,
        }
    }

    pub fn panel_json(&self) -> String {
        self.scene.panel().to_json()
    }

    pub fn hovered_label(&self) -> Option<String> {
        self.scene.hovered_label().map(str::to_string)
    }

    pub fn max_pixel_ratio(&self) -> f32 {
        self.scene.config().profile().max_pixel_ratio
    }

    pub fn high_performance(&self) -> bool {
        self.scene.config().profile().high_performance
    }
}
