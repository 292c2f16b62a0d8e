use serde::Serialize;
use crate::assets::content::DescriptiveContent;

/// What the info panel currently displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelView {
    pub key: String,
    pub title: String,
    pub description: String,
    pub features: Vec<String>,
}

/// Maps a selection key to descriptive content and tracks the single
/// visible panel. Lookup misses are silent.
pub struct InfoPanelController {
    content: DescriptiveContent,
    visible: Option<PanelView>,
}

impl InfoPanelController {
    pub fn new(content: DescriptiveContent) -> Self {
        Self {
            content,
            visible: None,
        }
    }

    /// Open the panel for `key`, replacing any open panel.
    /// Returns false (and changes nothing) if `key` has no content.
    pub fn show(&mut self, key: &str) -> bool {
        let Some(entry) = self.content.get(key) else {
            log::debug!("no descriptive content for {key:?}");
            return false;
        };
        self.visible = Some(PanelView {
            key: key.to_string(),
            title: entry.title.clone(),
            description: entry.description.clone(),
            features: entry.features.clone(),
        });
        true
    }

    pub fn close(&mut self) {
        self.visible = None;
    }

    pub fn is_open(&self) -> bool {
        self.visible.is_some()
    }

    pub fn view(&self) -> Option<&PanelView> {
        self.visible.as_ref()
    }

    pub fn content(&self) -> &DescriptiveContent {
        &self.content
    }

    /// The open panel as JSON, or `null` when closed.
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.visible).unwrap_or_else(|_| "null".to_string())
    }
}
