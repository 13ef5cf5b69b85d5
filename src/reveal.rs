/// Whether an observer keeps watching an element after its first intersection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    Repeating,
    Once,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObserverSpec {
    pub threshold: f64,
    pub root_margin: Option<&'static str>,
    pub trigger: Trigger,
}

pub const REVEAL: ObserverSpec = ObserverSpec {
    threshold: 0.1,
    root_margin: Some("0px 0px -50px 0px"),
    trigger: Trigger::Repeating,
};

pub const SECTION_FADE: ObserverSpec = ObserverSpec {
    threshold: 0.05,
    root_margin: None,
    trigger: Trigger::Repeating,
};

pub const DIAGRAM_STAGGER: ObserverSpec = ObserverSpec {
    threshold: 0.2,
    root_margin: None,
    trigger: Trigger::Once,
};

/// Set by once-only observers on elements they have already handled.
pub const ONCE_MARKER: &str = "data-once-applied";

impl ObserverSpec {
    /// Only the observer's own marker counts; classes added by other behaviors do not.
    pub fn should_apply(&self, intersecting: bool, has_attribute: impl Fn(&str) -> bool) -> bool {
        intersecting && (self.trigger == Trigger::Repeating || !has_attribute(ONCE_MARKER))
    }
}

#[derive(Clone, Debug)]
pub struct TitleFlicker {
    original: String,
    away: &'static str,
}

impl TitleFlicker {
    pub fn new(original: String, away: &'static str) -> Self {
        Self { original, away }
    }

    pub fn title_for(&self, hidden: bool) -> &str {
        if hidden {
            self.away
        } else {
            &self.original
        }
    }
}
