use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Anything that can hold the persisted preference and the live document attribute.
pub trait ThemeHost {
    fn stored(&self) -> Option<String>;
    fn persist(&self, theme: Theme);
    fn attribute(&self) -> Option<String>;
    fn apply(&self, theme: Theme);
}

/// Unknown or missing stored values resolve to light.
pub fn resolve_stored(stored: Option<&str>) -> Theme {
    stored.and_then(Theme::from_str).unwrap_or(Theme::Light)
}

/// The live attribute, not storage, decides the next theme.
pub fn next_from_attribute(live: Option<&str>) -> Theme {
    live.and_then(Theme::from_str)
        .unwrap_or(Theme::Light)
        .toggled()
}

pub fn load(host: &impl ThemeHost) -> Theme {
    let theme = resolve_stored(host.stored().as_deref());
    host.apply(theme);
    theme
}

pub fn toggle(host: &impl ThemeHost) -> Theme {
    let next = next_from_attribute(host.attribute().as_deref());
    host.apply(next);
    host.persist(next);
    next
}

#[cfg(target_arch = "wasm32")]
pub use dom::DocumentThemeHost;

#[cfg(target_arch = "wasm32")]
mod dom {
    use web_sys::{window, Element, Storage};

    use super::{Theme, ThemeHost};
    use crate::config::{DARK_SCHEME_QUERY, THEME_ATTRIBUTE, THEME_KEY};

    fn local_storage() -> Option<Storage> {
        window()?.local_storage().ok().flatten()
    }

    pub struct DocumentThemeHost {
        root: Element,
        storage: Option<Storage>,
    }

    impl DocumentThemeHost {
        pub fn new(root: Element) -> Self {
            Self {
                root,
                storage: local_storage(),
            }
        }

        /// Read for diagnostics only; the initial theme never consults it.
        pub fn system_prefers_dark(&self) -> bool {
            window()
                .and_then(|w| w.match_media(DARK_SCHEME_QUERY).ok().flatten())
                .map(|mq| mq.matches())
                .unwrap_or(false)
        }
    }

    impl ThemeHost for DocumentThemeHost {
        fn stored(&self) -> Option<String> {
            self.storage.as_ref()?.get_item(THEME_KEY).ok().flatten()
        }

        fn persist(&self, theme: Theme) {
            if let Some(storage) = self.storage.as_ref() {
                let _ = storage.set_item(THEME_KEY, theme.as_str());
            }
        }

        fn attribute(&self) -> Option<String> {
            self.root.get_attribute(THEME_ATTRIBUTE)
        }

        fn apply(&self, theme: Theme) {
            let _ = self.root.set_attribute(THEME_ATTRIBUTE, theme.as_str());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct MemoryHost {
        stored: RefCell<Option<String>>,
        attribute: RefCell<Option<String>>,
    }

    impl ThemeHost for MemoryHost {
        fn stored(&self) -> Option<String> {
            self.stored.borrow().clone()
        }

        fn persist(&self, theme: Theme) {
            *self.stored.borrow_mut() = Some(theme.as_str().to_string());
        }

        fn attribute(&self) -> Option<String> {
            self.attribute.borrow().clone()
        }

        fn apply(&self, theme: Theme) {
            *self.attribute.borrow_mut() = Some(theme.as_str().to_string());
        }
    }

    #[test]
    fn load_defaults_to_light_without_preference() {
        let host = MemoryHost::default();
        assert_eq!(load(&host), Theme::Light);
        assert_eq!(host.attribute().as_deref(), Some("light"));
        assert_eq!(host.stored(), None, "loading never writes storage");
    }

    #[test]
    fn load_ignores_unrecognized_preference() {
        let host = MemoryHost::default();
        *host.stored.borrow_mut() = Some("Dark".to_string());
        assert_eq!(load(&host), Theme::Light);
    }

    #[test]
    fn load_applies_stored_dark() {
        let host = MemoryHost::default();
        *host.stored.borrow_mut() = Some("dark".to_string());
        assert_eq!(load(&host), Theme::Dark);
        assert_eq!(host.attribute().as_deref(), Some("dark"));
    }

    #[test]
    fn toggle_follows_live_attribute_over_storage() {
        let host = MemoryHost::default();
        *host.stored.borrow_mut() = Some("light".to_string());
        *host.attribute.borrow_mut() = Some("dark".to_string());

        assert_eq!(toggle(&host), Theme::Light);
        assert_eq!(host.stored().as_deref(), Some("light"));
    }

    #[test]
    fn toggle_without_attribute_goes_dark() {
        assert_eq!(next_from_attribute(None), Theme::Dark);
        assert_eq!(next_from_attribute(Some("sepia")), Theme::Dark);
        assert_eq!(next_from_attribute(Some("dark")), Theme::Light);
    }

    #[test]
    fn toggling_twice_restores_attribute_and_storage() {
        let host = MemoryHost::default();
        *host.stored.borrow_mut() = Some("dark".to_string());
        load(&host);

        toggle(&host);
        assert_eq!(host.attribute().as_deref(), Some("light"));
        toggle(&host);

        assert_eq!(host.attribute().as_deref(), Some("dark"));
        assert_eq!(host.stored().as_deref(), Some("dark"));
    }
}
