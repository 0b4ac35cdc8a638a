//! Shape generation for 2D primitives
//!
//! Everything is emitted as a triangle list.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::Rect;

/// Line width for outlined shapes (door, ground)
pub const STROKE_WIDTH: f32 = 2.0;

/// Filled axis-aligned rectangle
pub fn rect(r: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let (x0, y0, x1, y1) = (r.x, r.y, r.right(), r.bottom());
    vec![
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Rectangle outline drawn inside the bounds
pub fn rect_outline(r: &Rect, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let w = width.min(r.w / 2.0).min(r.h / 2.0);
    let edges = [
        Rect::new(r.x, r.y, r.w, w),
        Rect::new(r.x, r.bottom() - w, r.w, w),
        Rect::new(r.x, r.y + w, w, r.h - 2.0 * w),
        Rect::new(r.right() - w, r.y + w, w, r.h - 2.0 * w),
    ];
    edges.iter().flat_map(|e| rect(e, color)).collect()
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// A row of `count` spikes filling `r`: bases on the bottom edge, apexes on the top
pub fn spikes(r: &Rect, count: u32, color: [f32; 4]) -> Vec<Vertex> {
    let count = count.max(1);
    let unit = r.w / count as f32;
    let mut vertices = Vec::with_capacity(count as usize * 3);

    for i in 0..count {
        let left = r.x + unit * i as f32;
        vertices.push(Vertex::new(left, r.bottom(), color));
        vertices.push(Vertex::new(left + unit / 2.0, r.y, color));
        vertices.push(Vertex::new(left + unit, r.bottom(), color));
    }

    vertices
}
