use log::Level;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose console output when running locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Relative to the page, same as every other static asset on the site.
pub fn get_events_url() -> &'static str {
    "data/events.json"
}

/// Options for a visibility subscription.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityOptions {
    pub threshold: f64,
    pub root_margin: &'static str,
}

pub const STATS_VISIBILITY: VisibilityOptions = VisibilityOptions {
    threshold: 0.5,
    root_margin: "0px",
};

pub const FADE_VISIBILITY: VisibilityOptions = VisibilityOptions {
    threshold: 0.1,
    root_margin: "0px 0px -50px 0px",
};

pub const COUNTER_DURATION_MS: f64 = 2000.0;
pub const COUNTER_FRAME_MS: f64 = 16.0; // ~60 FPS

pub const FADE_DELAY_MS: u32 = 100;
pub const PRESS_RELEASE_MS: u32 = 150;

pub const NAVBAR_SHADOW_OFFSET: f64 = 100.0;
pub const PARALLAX_FACTOR: f64 = 0.5;

pub mod selectors {
    pub const FAMILIES_SERVED_ID: &str = "familiesServed";
    pub const MENU_TOGGLE: &str = ".mobile-menu-toggle";
    pub const NAV_MENU: &str = ".nav-menu";
    pub const NAV_LINKS: &str = ".nav-menu a";
    pub const NAV_WRAPPER: &str = ".nav-wrapper";
    pub const STAT: &str = ".stat";
    pub const STAT_NUMBER: &str = ".stat-number";
    pub const ANCHORS: &str = "a[href^=\"#\"]";
    pub const CONTACT_FORM_ID: &str = "contactForm";
    pub const FORM_MESSAGE_ID: &str = "formMessage";
    pub const NAVBAR: &str = ".navbar";
    pub const FADE_TARGETS: &str = ".step, .donation-card, .content-section";
    pub const FORM_FIELDS: &str =
        ".form-group input, .form-group textarea, .form-group select";
    pub const BUTTONS: &str = ".btn, .submit-btn";
    pub const SUBMIT_BUTTON_CLASS: &str = "submit-btn";
    pub const HERO: &str = ".hero";
}

pub mod classes {
    pub const ACTIVE: &str = "active";
    pub const ANIMATED: &str = "animated";
    pub const LOADED: &str = "loaded";
}
