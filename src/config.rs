//! Mount-time configuration.
//!
//! The page opts in with data attributes; anything missing or malformed
//! falls back to the default with a warning.

use std::time::Duration;

use crate::color::Rgb;
use crate::error::{BackdropError, Result};
use crate::particles::DEFAULT_COUNT;

pub const PRIMARY_ATTR: &str = "data-primary";
pub const SECONDARY_ATTR: &str = "data-secondary";
pub const PARTICLE_COUNT_ATTR: &str = "data-particle-count";
pub const PARTICLES_ATTR: &str = "data-particles";

pub const DEFAULT_PRIMARY: Rgb = Rgb::new(0x0A, 0x73, 0x73);
pub const DEFAULT_SECONDARY: Rgb = Rgb::new(0xB1, 0x97, 0x77);

/// Larger `data-particle-count` values are clamped to this.
pub const MAX_PARTICLES: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackdropConfig {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub particle_count: usize,
    pub particles_enabled: bool,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            primary: DEFAULT_PRIMARY,
            secondary: DEFAULT_SECONDARY,
            particle_count: DEFAULT_COUNT,
            particles_enabled: true,
        }
    }
}

impl BackdropConfig {
    /// Read the config through `attr`, which returns an attribute's value if
    /// present.
    pub fn from_attributes(attr: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let mut config = defaults;

        if let Some(raw) = attr(PRIMARY_ATTR) {
            config.primary = or_default(raw.parse(), defaults.primary);
        }
        if let Some(raw) = attr(SECONDARY_ATTR) {
            config.secondary = or_default(raw.parse(), defaults.secondary);
        }
        if let Some(raw) = attr(PARTICLE_COUNT_ATTR) {
            config.particle_count = or_default(parse_count(&raw), defaults.particle_count);
        }
        if let Some(raw) = attr(PARTICLES_ATTR) {
            config.particles_enabled = parse_switch(&raw);
        }
        config
    }
}

fn or_default<T: Copy>(parsed: Result<T>, default: T) -> T {
    parsed.unwrap_or_else(|err| {
        log::warn!("{err}, using default");
        default
    })
}

fn parse_count(raw: &str) -> Result<usize> {
    let count = raw
        .trim()
        .parse::<usize>()
        .map_err(|_| BackdropError::InvalidCount(raw.to_string()))?;
    if count > MAX_PARTICLES {
        log::warn!("{count} particles requested, capping at {MAX_PARTICLES}");
    }
    Ok(count.min(MAX_PARTICLES))
}

/// Everything except an explicit "off" spelling enables the effect,
/// including a bare attribute.
fn parse_switch(raw: &str) -> bool {
    !matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "false" | "off" | "0" | "no"
    )
}

pub const PENDING_ATTR: &str = "data-reveal";
pub const REVEALED_CLASS: &str = "revealed";
pub const STAGGER_ATTR: &str = "data-stagger";

#[derive(Debug, Clone, PartialEq)]
pub struct RevealConfig {
    /// Visible fraction of the container needed to fire.
    pub threshold: f64,
    pub interval: Duration,
    /// Attribute marking descendants that still wait for their reveal.
    pub pending_attribute: String,
    pub revealed_class: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.2,
            interval: Duration::from_millis(150),
            pending_attribute: PENDING_ATTR.to_string(),
            revealed_class: REVEALED_CLASS.to_string(),
        }
    }
}

impl RevealConfig {
    pub fn pending_selector(&self) -> String {
        format!("[{}]", self.pending_attribute)
    }
}
