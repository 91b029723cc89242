#![forbid(unsafe_code)]

//! Page components expressed as style channels.
//!
//! Each scene owns the derived channels for one component and exposes them
//! as a flat list of named CSS values, which is what a host applies as inline
//! styles (and what the `folio` CLI prints).

pub mod background;
pub mod hero;
pub mod hover;
pub mod loader;
pub mod skills;
pub mod timeline;

pub use background::{BackgroundConfig, BackgroundFrame, BackgroundLayout, BackgroundScene};
pub use hero::{HeroConfig, HeroMask, HeroScene, MaskCenter};
pub use hover::{HoverDriver, HoverStyle};
pub use loader::{Loader, LoaderConfig, LoaderPhase};
pub use skills::{MarqueeConfig, SkillsMarquee};
pub use timeline::{TimelineConfig, TimelineScene};

/// One named style output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub name: String,
    pub css: String,
}

impl Channel {
    #[must_use]
    pub fn new(name: impl Into<String>, css: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            css: css.into(),
        }
    }
}

/// A component whose current styles can be listed.
pub trait Scene {
    /// Stable scene name.
    fn name(&self) -> &'static str;

    /// Current value of every channel, in a stable order.
    fn channels(&self) -> Vec<Channel>;
}
