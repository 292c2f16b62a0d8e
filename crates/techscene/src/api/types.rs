use serde::{Deserialize, Serialize};

/// Stable identifier for a scene object, assigned by the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u32);

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of visual entity in the showcase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Category {
    ServerRack = 0,
    Database = 1,
    CodeWindow = 2,
    LogoBadge = 3,
    MicroserviceNode = 4,
    CentralSphere = 5,
}

impl Category {
    pub const COUNT: usize = 6;

    /// Category prefix used in `category-name` content keys and in
    /// `onObjectSelect`. Logo badges key by name alone and the central
    /// sphere is never selectable, so both return `None`.
    pub fn selection_prefix(self) -> Option<&'static str> {
        match self {
            Category::ServerRack => Some("server"),
            Category::Database => Some("database"),
            Category::CodeWindow => Some("code"),
            Category::MicroserviceNode => Some("microservice"),
            Category::LogoBadge | Category::CentralSphere => None,
        }
    }

    /// Whether pointer interaction applies to this category.
    pub fn is_interactive(self) -> bool {
        !matches!(self, Category::CentralSphere)
    }

    /// Convert to a float for the instance wire format.
    pub fn as_f32(self) -> f32 {
        self as u8 as f32
    }
}

/// Lookup key for descriptive content, derived from a clicked object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum SelectionKey {
    /// A service object: `category-name` (e.g. `server-Load Balancer`).
    Service { category: &'static str, name: String },
    /// A technology logo badge, keyed by name alone.
    Tech { name: String },
}

impl SelectionKey {
    /// The content-table key this selection resolves to.
    pub fn content_key(&self) -> String {
        match self {
            SelectionKey::Service { category, name } => format!("{category}-{name}"),
            SelectionKey::Tech { name } => name.clone(),
        }
    }

    /// Display name of the selected object.
    pub fn name(&self) -> &str {
        match self {
            SelectionKey::Service { name, .. } | SelectionKey::Tech { name } => name,
        }
    }
}

/// Cursor hint requested from the host while hovering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    Default,
    Pointer,
}

impl CursorHint {
    /// CSS cursor value.
    pub fn as_css(self) -> &'static str {
        match self {
            CursorHint::Default => "auto",
            CursorHint::Pointer => "pointer",
        }
    }
}
