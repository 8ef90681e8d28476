use serde::Serialize;

/// An inclusive range such as a player count or a play time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Range {
    pub min: i32,
    pub max: i32,
}

impl Range {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Renders "X unit" or "X à Y unit"
    pub fn describe(&self, unit: &str) -> String {
        if self.min == self.max {
            format!("{} {unit}", self.min)
        } else {
            format!("{} à {} {unit}", self.min, self.max)
        }
    }
}

pub fn players(min: i32, max: i32) -> String {
    Range::new(min, max).describe("joueurs")
}

pub fn duration(min: i32, max: i32) -> String {
    Range::new(min, max).describe("minutes")
}
