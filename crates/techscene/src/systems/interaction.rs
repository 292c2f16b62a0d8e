//! Pointer interaction dispatcher.
//!
//! The dispatcher is the only writer of hover and selection state. It always
//! finishes its own update before invoking host callbacks, and a failing
//! callback is logged and swallowed.

use glam::Vec2;
use crate::api::host::{guarded, SceneHost};
use crate::api::types::{CursorHint, ObjectId, SelectionKey};
use crate::components::object::VisualState;
use crate::core::scene::SceneRegistry;
use crate::renderer::camera::{CameraController, CameraState};
use crate::systems::info_panel::InfoPanelController;

/// Hover and selection for the mounted scene.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionState {
    pub hovered: Option<ObjectId>,
    pub selection: Option<SelectionKey>,
}

/// Press/drag tracking for one pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Idle,
    /// Pressed but not yet moved past the drag threshold.
    Pressed { start: Vec2, last: Vec2 },
    /// Moved past the threshold; orbits the camera until released.
    Dragging { last: Vec2 },
}

pub struct Dispatcher {
    state: InteractionState,
    gesture: Gesture,
    drag_threshold: f32,
}

impl Dispatcher {
    pub fn new(drag_threshold: f32) -> Self {
        Self {
            state: InteractionState::default(),
            gesture: Gesture::Idle,
            drag_threshold,
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn hovered(&self) -> Option<ObjectId> {
        self.state.hovered
    }

    pub fn selection(&self) -> Option<&SelectionKey> {
        self.state.selection.as_ref()
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    /// Pointer entered `id`. Replaces any other hover; repeated calls with
    /// the current hover are no-ops.
    pub fn on_pointer_enter(&mut self, id: ObjectId, registry: &mut SceneRegistry, host: &mut dyn SceneHost) {
        if self.state.hovered == Some(id) {
            return;
        }
        let Some(label) = registry
            .get_by_id(id)
            .filter(|o| o.category.is_interactive())
            .map(|o| o.label.clone())
        else {
            return;
        };

        let previous = self.state.hovered.take().and_then(|old| demote(old, registry));
        if let Some(obj) = registry.get_mut(id) {
            obj.set_visual_state(VisualState::Hovered);
        }
        self.state.hovered = Some(id);

        if let Some(old_label) = previous {
            guarded(host.on_object_hover(&old_label, false));
        }
        guarded(host.on_object_hover(&label, true));
        guarded(host.set_cursor(CursorHint::Pointer));
    }

    /// Pointer left `id`. Ignored unless `id` is the current hover, so a late
    /// leave for an object that was already superseded changes nothing.
    pub fn on_pointer_leave(&mut self, id: ObjectId, registry: &mut SceneRegistry, host: &mut dyn SceneHost) {
        if self.state.hovered != Some(id) {
            return;
        }
        self.state.hovered = None;
        let label = demote(id, registry);

        if let Some(label) = label {
            guarded(host.on_object_hover(&label, false));
        }
        guarded(host.set_cursor(CursorHint::Default));
    }

    /// Translate the object currently under the pointer into leave/enter calls.
    pub fn pointer_over(&mut self, hit: Option<ObjectId>, registry: &mut SceneRegistry, host: &mut dyn SceneHost) {
        match (self.state.hovered, hit) {
            (current, new) if current == new => {}
            (_, Some(new)) => self.on_pointer_enter(new, registry, host),
            (Some(old), None) => self.on_pointer_leave(old, registry, host),
            (None, None) => {}
        }
    }

    /// Object `id` was clicked: select it, stop the tour, open its panel and
    /// notify the host. Returns the selection key, or None if `id` is not
    /// selectable.
    ///
    /// An object without descriptive content leaves an open panel as it is,
    /// and the selection stays with the object that panel describes.
    pub fn on_click(
        &mut self,
        id: ObjectId,
        registry: &SceneRegistry,
        camera: &mut CameraController,
        panel: &mut InfoPanelController,
        host: &mut dyn SceneHost,
    ) -> Option<SelectionKey> {
        let key = registry.get_by_id(id)?.selection_key()?;
        camera.on_selection();
        if panel.show(&key.content_key()) || !panel.is_open() {
            self.state.selection = Some(key.clone());
        }

        match &key {
            SelectionKey::Service { category, name } => guarded(host.on_object_select(category, name)),
            SelectionKey::Tech { name } => guarded(host.on_tech_badge_select(name)),
        }
        Some(key)
    }

    /// Explicit tour toggle. Turning the tour on clears any open selection.
    pub fn toggle_tour(
        &mut self,
        t: f32,
        camera: &mut CameraController,
        panel: &mut InfoPanelController,
    ) -> CameraState {
        let next = camera.toggle_tour(t);
        if next == CameraState::ScriptedTour {
            self.close_panel(panel);
        }
        next
    }

    /// Close the info panel. The tour stays off.
    pub fn close_panel(&mut self, panel: &mut InfoPanelController) {
        self.state.selection = None;
        panel.close();
    }

    pub fn pointer_down(&mut self, pos: Vec2) {
        self.gesture = Gesture::Pressed { start: pos, last: pos };
    }

    /// Track pointer motion; drags past the threshold orbit the camera.
    pub fn pointer_move(&mut self, pos: Vec2, camera: &mut CameraController) {
        self.gesture = match self.gesture {
            Gesture::Idle => Gesture::Idle,
            Gesture::Pressed { start, last } => {
                if (pos - start).length() > self.drag_threshold {
                    let delta = pos - last;
                    camera.drag(delta.x, delta.y);
                    Gesture::Dragging { last: pos }
                } else {
                    Gesture::Pressed { start, last: pos }
                }
            }
            Gesture::Dragging { last } => {
                let delta = pos - last;
                camera.drag(delta.x, delta.y);
                Gesture::Dragging { last: pos }
            }
        };
    }

    /// Pointer released. Returns true if the press counts as a click.
    pub fn pointer_up(&mut self, pos: Vec2) -> bool {
        let was_click = match self.gesture {
            Gesture::Pressed { start, .. } => (pos - start).length() <= self.drag_threshold,
            _ => false,
        };
        self.gesture = Gesture::Idle;
        was_click
    }

    /// Pointer left the canvas: cancel any gesture and drop the hover.
    pub fn pointer_left_canvas(&mut self, registry: &mut SceneRegistry, host: &mut dyn SceneHost) {
        self.gesture = Gesture::Idle;
        if let Some(id) = self.state.hovered {
            self.on_pointer_leave(id, registry, host);
        }
    }
}

/// Return an object to Idle, yielding its label for the host callback.
fn demote(id: ObjectId, registry: &mut SceneRegistry) -> Option<String> {
    let obj = registry.get_mut(id)?;
    obj.set_visual_state(VisualState::Idle);
    Some(obj.label.clone())
}
