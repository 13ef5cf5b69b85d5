#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Systems,
    CaseStudies,
    About,
    Hero,
}

impl Section {
    pub fn selector(self) -> &'static str {
        match self {
            Self::Systems => "#systems",
            Self::CaseStudies => "#casestudies",
            Self::About => "#about",
            Self::Hero => "#hero",
        }
    }

    /// Lowercase only; shifted keys do not match.
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "s" => Some(Self::Systems),
            "c" => Some(Self::CaseStudies),
            "a" => Some(Self::About),
            "h" => Some(Self::Hero),
            _ => None,
        }
    }
}

/// What currently holds keyboard focus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusKind {
    TextInput,
    TextArea,
    ContentEditable,
    Other,
    Nothing,
}

impl FocusKind {
    pub fn classify(tag_name: &str, content_editable: bool) -> Self {
        match tag_name {
            "INPUT" => Self::TextInput,
            "TEXTAREA" => Self::TextArea,
            _ if content_editable => Self::ContentEditable,
            _ => Self::Other,
        }
    }

    fn accepts_text(self) -> bool {
        matches!(self, Self::TextInput | Self::TextArea | Self::ContentEditable)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
}

pub fn resolve(press: &KeyPress, focus: FocusKind) -> Option<Section> {
    if press.ctrl || press.meta || focus.accepts_text() {
        return None;
    }

    Section::from_key(&press.key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(key: &str) -> KeyPress {
        KeyPress {
            key: key.to_string(),
            ctrl: false,
            meta: false,
        }
    }

    #[test]
    fn letters_map_to_sections() {
        assert_eq!(resolve(&press("s"), FocusKind::Nothing), Some(Section::Systems));
        assert_eq!(resolve(&press("c"), FocusKind::Other), Some(Section::CaseStudies));
        assert_eq!(resolve(&press("a"), FocusKind::Nothing), Some(Section::About));
        assert_eq!(resolve(&press("h"), FocusKind::Nothing), Some(Section::Hero));
        assert_eq!(Section::Systems.selector(), "#systems");
    }

    #[test]
    fn text_focus_suppresses_shortcuts() {
        for focus in [FocusKind::TextInput, FocusKind::TextArea, FocusKind::ContentEditable] {
            assert_eq!(resolve(&press("s"), focus), None);
        }
    }

    #[test]
    fn modifiers_suppress_shortcuts() {
        let mut with_ctrl = press("s");
        with_ctrl.ctrl = true;
        let mut with_meta = press("s");
        with_meta.meta = true;

        assert_eq!(resolve(&with_ctrl, FocusKind::Nothing), None);
        assert_eq!(resolve(&with_meta, FocusKind::Nothing), None);
    }

    #[test]
    fn uppercase_and_other_keys_are_ignored() {
        assert_eq!(resolve(&press("S"), FocusKind::Nothing), None);
        assert_eq!(resolve(&press("x"), FocusKind::Nothing), None);
        assert_eq!(resolve(&press("Enter"), FocusKind::Nothing), None);
    }

    #[test]
    fn focus_classification_uses_tag_then_editability() {
        assert_eq!(FocusKind::classify("INPUT", false), FocusKind::TextInput);
        assert_eq!(FocusKind::classify("TEXTAREA", false), FocusKind::TextArea);
        assert_eq!(FocusKind::classify("DIV", true), FocusKind::ContentEditable);
        assert_eq!(FocusKind::classify("BUTTON", false), FocusKind::Other);
    }
}
