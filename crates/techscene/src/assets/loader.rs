//! Best-effort texture loading with placeholder fallback.
//!
//! Loads are fire-and-forget: the host fetches the image out-of-band and
//! reports back with [`TextureLoader::complete`]. Results are applied on the
//! next frame. At most one load is ever in flight per object and a failure is
//! terminal for that object (no retry). Completions that arrive after the
//! scene is disposed, or that belong to another scene instance, are ignored.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use crate::api::types::ObjectId;

static NEXT_GENERATION: AtomicU32 = AtomicU32::new(1);

/// Host-assigned handle to a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Identifies one load request. Carries the scene generation so completions
/// can be matched against the instance that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket {
    pub object: ObjectId,
    pub generation: u32,
}

/// Why a texture failed to load.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("failed to load texture {path:?}: {reason}")]
pub struct LoadFailure {
    pub path: String,
    pub reason: String,
}

/// The two terminal outcomes of a load.
pub type LoadOutcome = Result<TextureHandle, LoadFailure>;

/// Fetches images on behalf of the loader. Implementations must not call
/// back into the scene synchronously; completions go through the host's
/// event loop.
pub trait TextureFetcher {
    fn fetch(&mut self, ticket: LoadTicket, path: &str, edge_px: u32);
}

/// Load state of one object's texture.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotState {
    /// Flat-colour material; no load requested.
    Placeholder,
    /// Load in flight.
    Pending { ticket: LoadTicket, path: String },
    Loaded(TextureHandle),
    /// Terminal; the placeholder stays.
    Failed(LoadFailure),
}

/// Material the renderer should use for an object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    Placeholder { rgb: [f32; 3] },
    Textured { handle: TextureHandle },
}

/// Per-object texture slots for one scene instance.
pub struct TextureLoader {
    generation: u32,
    slots: HashMap<ObjectId, SlotState>,
    completed: Vec<(LoadTicket, LoadOutcome)>,
    disposed: bool,
}

impl TextureLoader {
    /// Create a loader with a fresh generation.
    pub fn new() -> Self {
        Self {
            generation: NEXT_GENERATION.fetch_add(1, Ordering::Relaxed),
            slots: HashMap::new(),
            completed: Vec::new(),
            disposed: false,
        }
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Start loading `path` for `object`. Returns the ticket if a fetch was
    /// issued; None if a load is already in flight, done, or failed.
    pub fn request(
        &mut self,
        object: ObjectId,
        path: &str,
        edge_px: u32,
        fetcher: &mut dyn TextureFetcher,
    ) -> Option<LoadTicket> {
        if self.disposed {
            return None;
        }
        match self.slots.get(&object) {
            None | Some(SlotState::Placeholder) => {}
            Some(_) => return None,
        }
        let ticket = LoadTicket {
            object,
            generation: self.generation,
        };
        self.slots.insert(
            object,
            SlotState::Pending {
                ticket,
                path: path.to_string(),
            },
        );
        fetcher.fetch(ticket, path, edge_px);
        Some(ticket)
    }

    /// Report the outcome of a fetch. Queued until the next frame.
    pub fn complete(&mut self, ticket: LoadTicket, outcome: LoadOutcome) {
        if self.disposed || ticket.generation != self.generation {
            log::debug!("dropping texture completion for {} (scene disposed)", ticket.object);
            return;
        }
        self.completed.push((ticket, outcome));
    }

    /// Apply queued completions. Returns how many changed a slot.
    pub fn apply_completions(&mut self) -> usize {
        let mut applied = 0;
        for (ticket, outcome) in std::mem::take(&mut self.completed) {
            let Some(slot) = self.slots.get_mut(&ticket.object) else {
                continue;
            };
            let path = match slot {
                SlotState::Pending { ticket: pending, path } if *pending == ticket => path.clone(),
                _ => continue,
            };
            *slot = match outcome {
                Ok(handle) => {
                    log::debug!("texture {path:?} loaded for {}", ticket.object);
                    SlotState::Loaded(handle)
                }
                Err(failure) => {
                    log::warn!("{failure}; keeping placeholder for {}", ticket.object);
                    SlotState::Failed(failure)
                }
            };
            applied += 1;
        }
        applied
    }

    /// Material for an object, falling back to its placeholder colour.
    pub fn material(&self, object: ObjectId, placeholder_rgb: [f32; 3]) -> Material {
        match self.slots.get(&object) {
            Some(SlotState::Loaded(handle)) => Material::Textured { handle: *handle },
            _ => Material::Placeholder { rgb: placeholder_rgb },
        }
    }

    pub fn state(&self, object: ObjectId) -> Option<&SlotState> {
        self.slots.get(&object)
    }

    /// Diagnostics for every failed load.
    pub fn failures(&self) -> impl Iterator<Item = (ObjectId, &LoadFailure)> {
        self.slots.iter().filter_map(|(id, slot)| match slot {
            SlotState::Failed(f) => Some((*id, f)),
            _ => None,
        })
    }

    pub fn in_flight(&self) -> usize {
        self.slots
            .values()
            .filter(|s| matches!(s, SlotState::Pending { .. }))
            .count()
    }

    /// Stop accepting completions. Pending loads will resolve into nothing.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.completed.clear();
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl Default for TextureLoader {
    fn default() -> Self {
        Self::new()
    }
}
