use crate::logging::LogLevel;

pub const SCROLL_INDICATOR_ID: &str = "scrollIndicator";
pub const THEME_TOGGLE_ID: &str = "theme-toggle";
pub const FOLLOWER_ID: &str = "chick-follower";
pub const BEHAVIOR_ROOT_ID: &str = "behavior-root";
pub const HERO_SECTION_ID: &str = "hero";

pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";
pub const REVEAL_SELECTOR: &str = ".reveal";
pub const SECTION_SELECTOR: &str = ".section";
pub const DOODLE_SELECTOR: &str = ".doodle";
pub const CARD_SELECTOR: &str = ".system-card, .casestudy-card";
pub const BUTTON_SELECTOR: &str = ".btn";
pub const DIAGRAM_SELECTOR: &str = ".system-viz";
pub const DIAGRAM_STEP_SELECTOR: &str = ".system-viz-block, .system-viz-arrow";
pub const HERO_HIGHLIGHT_SELECTOR: &str = ".hero-title .highlight";

pub const VISIBLE_CLASS: &str = "visible";
pub const RIPPLE_CLASS: &str = "ripple";

pub const ANCHOR_SCROLL_OFFSET: f64 = 20.0;
pub const TILT_DIVISOR: f64 = 20.0;
pub const TILT_PERSPECTIVE_PX: f64 = 1000.0;
pub const TILT_LIFT_PX: f64 = -6.0;
pub const RIPPLE_LIFETIME_MS: u32 = 600;
pub const STAGGER_STEP_MS: u32 = 150;

pub const TYPEWRITER_TEXT: &str = "intelligent digital systems.";
pub const TYPEWRITER_START_DELAY_MS: u32 = 800;
pub const TYPEWRITER_STEP_MS: u32 = 50;

pub const MAGNETIC_PULL: f64 = 0.3;
pub const MAGNETIC_TWIST: f64 = 0.05;
pub const MAGNETIC_MIN_VIEWPORT_WIDTH: f64 = 768.0;

pub const FOLLOWER_SPEED: f64 = 0.8;
pub const FOLLOWER_ARRIVAL_RADIUS: f64 = 1.0;
pub const FOLLOWER_PHASE_STEP: f64 = 0.2;
pub const FOLLOWER_TILT_DEG: f64 = 12.0;
pub const FOLLOWER_BOUNCE_PX: f64 = 4.0;

pub const HIDDEN_TITLE: &str = "Come back soon!";

pub const THEME_KEY: &str = "theme";
pub const THEME_ATTRIBUTE: &str = "data-theme";

pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
pub const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

const LOG_LEVEL_ATTRIBUTE: &str = "data-log-level";
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

/// Page-level overrides read from `data-*` attributes on the root element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub log_level: LogLevel,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl RuntimeConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            log_level: parse_log_level(lookup(LOG_LEVEL_ATTRIBUTE).as_deref(), DEFAULT_LOG_LEVEL),
        }
    }
}

fn parse_log_level(value: Option<&str>, default: LogLevel) -> LogLevel {
    let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) else {
        return default;
    };

    match value.to_ascii_lowercase().as_str() {
        "debug" => LogLevel::Debug,
        "info" => LogLevel::Info,
        "warn" => LogLevel::Warn,
        _ => default,
    }
}
