//! Shape generation for 2D primitives
//!
//! Everything is emitted as a plain triangle list in world units.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::Rect;

/// Multiply a color's alpha
pub fn fade(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], color[3] * alpha.clamp(0.0, 1.0)]
}

/// Two triangles through four corners in order
pub fn quad(corners: [Vec2; 4], color: [f32; 4]) -> Vec<Vertex> {
    let [a, b, c, d] = corners;
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(a.x, a.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(d.x, d.y, color),
    ]
}

/// Axis-aligned filled rectangle
pub fn rect(r: Rect, color: [f32; 4]) -> Vec<Vertex> {
    quad(
        [
            Vec2::new(r.left(), r.top()),
            Vec2::new(r.right(), r.top()),
            Vec2::new(r.right(), r.bottom()),
            Vec2::new(r.left(), r.bottom()),
        ],
        color,
    )
}

/// Rectangle of `size` centred on `center`, rotated by `angle` radians
pub fn rotated_rect(center: Vec2, size: Vec2, angle: f32, color: [f32; 4]) -> Vec<Vertex> {
    let half = size / 2.0;
    let rot = Vec2::from_angle(angle);
    let corner = |x: f32, y: f32| center + rot.rotate(Vec2::new(x, y));
    quad(
        [
            corner(-half.x, -half.y),
            corner(half.x, -half.y),
            corner(half.x, half.y),
            corner(-half.x, half.y),
        ],
        color,
    )
}

/// Rectangle outline of width `thickness`, drawn inside `r`
pub fn frame(r: Rect, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let t = thickness.min(r.size.x / 2.0).min(r.size.y / 2.0);
    let mut vertices = Vec::with_capacity(24);
    vertices.extend(rect(Rect::new(r.left(), r.top(), r.size.x, t), color));
    vertices.extend(rect(Rect::new(r.left(), r.bottom() - t, r.size.x, t), color));
    vertices.extend(rect(Rect::new(r.left(), r.top() + t, t, r.size.y - 2.0 * t), color));
    vertices.extend(rect(Rect::new(r.right() - t, r.top() + t, t, r.size.y - 2.0 * t), color));
    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

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

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);
    let point = |radius: f32, theta: f32| center + Vec2::from_angle(theta) * radius;

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        vertices.extend(quad(
            [
                point(inner_radius, theta1),
                point(outer_radius, theta1),
                point(outer_radius, theta2),
                point(inner_radius, theta2),
            ],
            color,
        ));
    }

    vertices
}

/// Tractor beam: a cone from `origin` widening downward, brighter at the top
pub fn beam_cone(origin: Vec2, length: f32, half_width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let bottom = origin.y + length;
    let tip = fade(color, 0.2);
    vec![
        Vertex::new(origin.x - half_width * 0.15, origin.y, color),
        Vertex::new(origin.x + half_width * 0.15, origin.y, color),
        Vertex::new(origin.x + half_width, bottom, tip),
        Vertex::new(origin.x - half_width * 0.15, origin.y, color),
        Vertex::new(origin.x + half_width, bottom, tip),
        Vertex::new(origin.x - half_width, bottom, tip),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_covers_corners() {
        let vertices = rect(Rect::new(10.0, 20.0, 30.0, 40.0), [1.0; 4]);
        assert_eq!(vertices.len(), 6);
        let xs: Vec<f32> = vertices.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = vertices.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 60.0);
    }

    #[test]
    fn test_circle_vertex_count() {
        assert_eq!(circle(Vec2::ZERO, 5.0, [1.0; 4], 12).len(), 36);
        assert_eq!(ring(Vec2::ZERO, 4.0, 5.0, [1.0; 4], 12).len(), 72);
    }

    #[test]
    fn test_rotated_rect_keeps_center() {
        let vertices = rotated_rect(Vec2::new(50.0, 50.0), Vec2::new(10.0, 4.0), 1.0, [1.0; 4]);
        let sum = vertices
            .iter()
            .fold(Vec2::ZERO, |acc, v| acc + Vec2::from(v.position));
        let center = sum / vertices.len() as f32;
        assert!((center - Vec2::new(50.0, 50.0)).length() < 1.0);
    }

    #[test]
    fn test_fade_only_touches_alpha() {
        assert_eq!(fade([0.1, 0.2, 0.3, 0.8], 0.5), [0.1, 0.2, 0.3, 0.4]);
        assert_eq!(fade([0.1, 0.2, 0.3, 0.8], 2.0), [0.1, 0.2, 0.3, 0.8]);
    }
}
