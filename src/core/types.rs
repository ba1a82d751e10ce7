//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Opaque identifier for nations, assigned by the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NationId(pub u32);

impl NationId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for NationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 2D position
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Axis-aligned square occupied by a nation's primary territory
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    /// Top-left anchor
    pub origin: Vec2,
    pub size: f32,
}

impl Footprint {
    pub fn new(origin: Vec2, size: f32) -> Self {
        Self { origin, size }
    }

    /// Open-interval rectangle overlap; touching edges do not overlap
    pub fn overlaps(&self, other: &Footprint) -> bool {
        self.origin.x < other.origin.x + other.size
            && self.origin.x + self.size > other.origin.x
            && self.origin.y < other.origin.y + other.size
            && self.origin.y + self.size > other.origin.y
    }

    /// True when the point lies strictly inside (border points are outside)
    pub fn contains_strict(&self, point: Vec2) -> bool {
        point.x > self.origin.x
            && point.x < self.origin.x + self.size
            && point.y > self.origin.y
            && point.y < self.origin.y + self.size
    }
}

/// Display color, opaque to the simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha: f32,
}

impl Color {
    /// Territory overlay alpha used for every generated nation
    pub const TERRITORY_ALPHA: f32 = 0.32;

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, alpha: Self::TERRITORY_ALPHA }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::rgb(0, 0, 0)
    }
}
