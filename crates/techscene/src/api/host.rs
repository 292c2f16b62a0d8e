//! Host callbacks: the page that embeds the scene.

use crate::api::error::HostError;
use crate::api::types::CursorHint;

/// Lifecycle callbacks consumed by the surrounding page.
///
/// Every method is fallible; the scene logs and swallows failures so a
/// broken handler never stops the frame loop. All methods default to no-ops.
pub trait SceneHost {
    /// Hover caption: `name` became hovered or stopped being hovered.
    fn on_object_hover(&mut self, _name: &str, _is_hovered: bool) -> Result<(), HostError> {
        Ok(())
    }

    /// A service object was clicked.
    fn on_object_select(&mut self, _category: &str, _name: &str) -> Result<(), HostError> {
        Ok(())
    }

    /// A technology logo badge was clicked.
    fn on_tech_badge_select(&mut self, _name: &str) -> Result<(), HostError> {
        Ok(())
    }

    /// Visual cursor hint while the pointer is over an interactive object.
    fn set_cursor(&mut self, _hint: CursorHint) -> Result<(), HostError> {
        Ok(())
    }
}

/// Host that ignores every callback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHost;

impl SceneHost for NullHost {}

/// Run a host callback, logging instead of propagating failure.
pub(crate) fn guarded(result: Result<(), HostError>) {
    if let Err(err) = result {
        log::warn!("{err}");
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Records every callback; optionally fails all of them.
    #[derive(Debug, Default)]
    pub struct RecordingHost {
        pub hovers: Vec<(String, bool)>,
        pub selects: Vec<(String, String)>,
        pub badges: Vec<String>,
        pub cursors: Vec<CursorHint>,
        pub fail: bool,
    }

    impl RecordingHost {
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn result(&self, callback: &'static str) -> Result<(), HostError> {
            if self.fail {
                Err(HostError::new(callback, "handler threw"))
            } else {
                Ok(())
            }
        }
    }

    impl SceneHost for RecordingHost {
        fn on_object_hover(&mut self, name: &str, is_hovered: bool) -> Result<(), HostError> {
            self.hovers.push((name.to_string(), is_hovered));
            self.result("onObjectHover")
        }

        fn on_object_select(&mut self, category: &str, name: &str) -> Result<(), HostError> {
            self.selects.push((category.to_string(), name.to_string()));
            self.result("onObjectSelect")
        }

        fn on_tech_badge_select(&mut self, name: &str) -> Result<(), HostError> {
            self.badges.push(name.to_string());
            self.result("onTechBadgeSelect")
        }

        fn set_cursor(&mut self, hint: CursorHint) -> Result<(), HostError> {
            self.cursors.push(hint);
            self.result("setCursor")
        }
    }
}
