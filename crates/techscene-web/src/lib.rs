//! `#[wasm_bindgen]` exports for mounting the showcase scene in a page.
//!
//! The scene lives in a `thread_local!` because wasm-bindgen cannot export
//! stateful Rust structs with borrowed host callbacks. Every export is a
//! no-op (or returns a zero value) while no scene is mounted.

pub mod runner;

use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use web_sys::HtmlImageElement;
use techscene::{InputEvent, InputQueue};

pub use runner::SceneRunner;

thread_local! {
    static RUNNER: RefCell<Option<SceneRunner>> = RefCell::new(None);
    /// Input from JS. Kept apart from the runner so host callbacks running
    /// inside `scene_tick` can still queue events.
    static INPUT: RefCell<InputQueue> = RefCell::new(InputQueue::new());
}

fn with_runner<R>(f: impl FnOnce(&mut SceneRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| match cell.try_borrow_mut() {
        Ok(mut borrow) => borrow.as_mut().map(f),
        Err(_) => {
            log::warn!("techscene: re-entrant call ignored");
            None
        }
    })
}

fn push_input(event: InputEvent) {
    INPUT.with(|q| q.borrow_mut().push(event));
}

/// Mount the scene. `callbacks` is an object with optional `onObjectHover`,
/// `onObjectSelect`, `onTechBadgeSelect` and `setCursor` functions.
/// Returns false if the built-in scene data is invalid.
#[wasm_bindgen]
pub fn scene_mount(constrained: bool, callbacks: JsValue) -> bool {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    if RUNNER.with(|cell| cell.try_borrow_mut().is_err()) {
        log::warn!("techscene: mount during a frame ignored");
        return false;
    }
    scene_unmount();
    match SceneRunner::mount(constrained, callbacks) {
        Ok(runner) => {
            RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));
            true
        }
        Err(err) => {
            log::error!("techscene: refusing to start: {err}");
            false
        }
    }
}

#[wasm_bindgen]
pub fn scene_unmount() {
    let Ok(runner) = RUNNER.with(|cell| cell.try_borrow_mut().map(|mut r| r.take())) else {
        log::warn!("techscene: unmount during a frame ignored");
        return;
    };
    INPUT.with(|q| q.borrow_mut().clear());
    if let Some(runner) = runner {
        runner.unmount();
        log::info!("techscene: unmounted");
    }
}

#[wasm_bindgen]
pub fn scene_tick(dt: f32) {
    let events = INPUT.with(|q| q.borrow_mut().drain());
    with_runner(|r| r.tick(dt, events));
}

/// Hold scene time, e.g. from a `visibilitychange` listener. Frames keep
/// rendering the held pose until resumed.
#[wasm_bindgen]
pub fn scene_set_paused(paused: bool) {
    with_runner(|r| r.set_paused(paused));
}

#[wasm_bindgen]
pub fn scene_pointer_move(x: f32, y: f32) {
    push_input(InputEvent::PointerMove { x, y });
}

#[wasm_bindgen]
pub fn scene_pointer_down(x: f32, y: f32) {
    push_input(InputEvent::PointerDown { x, y });
}

#[wasm_bindgen]
pub fn scene_pointer_up(x: f32, y: f32) {
    push_input(InputEvent::PointerUp { x, y });
}

#[wasm_bindgen]
pub fn scene_pointer_leave() {
    push_input(InputEvent::PointerLeave);
}

#[wasm_bindgen]
pub fn scene_toggle_tour() {
    push_input(InputEvent::ToggleTour);
}

#[wasm_bindgen]
pub fn scene_close_panel() {
    push_input(InputEvent::ClosePanel);
}

#[wasm_bindgen]
pub fn scene_resize(width: f32, height: f32) {
    push_input(InputEvent::Resize { width, height });
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_instances_ptr() -> *const f32 {
    with_runner(|r| r.instances_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_instance_count() -> u32 {
    with_runner(|r| r.instance_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_flows_ptr() -> *const f32 {
    with_runner(|r| r.flows_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_flow_count() -> u32 {
    with_runner(|r| r.flow_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_particles_ptr() -> *const f32 {
    with_runner(|r| r.particles_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_particle_count() -> u32 {
    with_runner(|r| r.particle_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_stars_ptr() -> *const f32 {
    with_runner(|r| r.stars_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_star_count() -> u32 {
    with_runner(|r| r.star_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_particle_rotation_y() -> f32 {
    with_runner(|r| r.particle_rotation()[0]).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn get_particle_rotation_x() -> f32 {
    with_runner(|r| r.particle_rotation()[1]).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn get_camera_uniform_ptr() -> *const f32 {
    with_runner(|r| r.camera_uniform_ptr()).unwrap_or(std::ptr::null())
}

// ---- State accessors ----

#[wasm_bindgen]
pub fn get_tour_enabled() -> bool {
    with_runner(|r| r.tour_enabled()).unwrap_or(false)
}

/// 0 = neutral, 1 = scripted tour, 2 = user orbit.
#[wasm_bindgen]
pub fn get_camera_state() -> u32 {
    with_runner(|r| r.camera_state()).unwrap_or(0)
}

/// The open info panel as JSON, or `null`.
#[wasm_bindgen]
pub fn get_panel_json() -> String {
    with_runner(|r| r.panel_json()).unwrap_or_else(|| "null".to_string())
}

#[wasm_bindgen]
pub fn get_hovered_label() -> Option<String> {
    with_runner(|r| r.hovered_label()).flatten()
}

#[wasm_bindgen]
pub fn get_max_pixel_ratio() -> f32 {
    with_runner(|r| r.max_pixel_ratio()).unwrap_or(1.0)
}

#[wasm_bindgen]
pub fn get_high_performance() -> bool {
    with_runner(|r| r.high_performance()).unwrap_or(false)
}

#[wasm_bindgen]
pub fn get_texture_image(handle: u32) -> Option<HtmlImageElement> {
    runner::texture_image(handle)
}

#[wasm_bindgen]
pub fn get_texture_edge(handle: u32) -> u32 {
    runner::texture_edge(handle)
}
