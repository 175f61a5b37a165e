use egui::Pos2;
use serde::{Deserialize, Serialize};

use crate::renderer::Surface;

/// A freehand line through the raw pointer samples, in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    points: Vec<Pos2>,
    thickness: f32,
}

impl Stroke {
    /// Start a stroke at `origin`. The thickness is fixed for the stroke's lifetime.
    pub fn new(origin: Pos2, thickness: f32) -> Self {
        Self {
            points: vec![origin],
            thickness,
        }
    }

    /// Append a point. No deduplication or smoothing, raw input is kept as-is.
    pub fn add_point(&mut self, point: Pos2) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    /// A single click leaves one point and produces no visible mark.
    pub fn render(&self, surface: &mut dyn Surface) {
        if self.points.len() < 2 {
            return;
        }
        surface.polyline(&self.points, self.thickness);
    }
}
