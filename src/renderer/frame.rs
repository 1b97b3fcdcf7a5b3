//! One rendered frame, independent of any graphics API
//!
//! Draw routines fill a `Frame`; the host uploads `vertices` to the GPU and
//! paints sprites and text on the overlay canvas. The hit regions are handed
//! to the input layer so the next click can be routed to a control.

use glam::Vec2;

use super::vertex::Vertex;
use crate::assets::AssetId;
use crate::sim::Rect;

/// What a click on a control does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Interact,
    Exit,
    ConfirmExit,
    CancelExit,
    Answer(usize),
    Restart,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRegion {
    pub rect: Rect,
    pub action: UiAction,
}

/// Clickable controls laid out this frame, topmost last
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HitRegions {
    regions: Vec<HitRegion>,
}

impl HitRegions {
    pub fn push(&mut self, rect: Rect, action: UiAction) {
        self.regions.push(HitRegion { rect, action });
    }

    /// The topmost control under `point`
    pub fn resolve(&self, point: Vec2) -> Option<UiAction> {
        self.regions
            .iter()
            .rev()
            .find(|r| r.rect.contains(point))
            .map(|r| r.action)
    }

    pub fn find(&self, action: UiAction) -> Option<Rect> {
        self.regions.iter().find(|r| r.action == action).map(|r| r.rect)
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HitRegion> {
        self.regions.iter()
    }
}

/// An image placed in world units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub asset: AssetId,
    pub rect: Rect,
    pub alpha: f32,
    pub flip_x: bool,
    /// Radians, around the rect centre
    pub rotation: f32,
}

impl Sprite {
    pub fn new(asset: AssetId, rect: Rect) -> Self {
        Self {
            asset,
            rect,
            alpha: 1.0,
            flip_x: false,
            rotation: 0.0,
        }
    }

    pub fn alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    pub fn flipped(mut self, flip_x: bool) -> Self {
        self.flip_x = flip_x;
        self
    }

    pub fn rotated(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    Left,
    #[default]
    Center,
}

/// Text drawn on the overlay
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub pos: Vec2,
    pub size: f32,
    pub color: [f32; 4],
    pub align: Align,
}

impl Label {
    pub fn new(text: impl Into<String>, pos: Vec2, size: f32, color: [f32; 4]) -> Self {
        Self {
            text: text.into(),
            pos,
            size,
            color,
            align: Align::Center,
        }
    }

    pub fn left(mut self) -> Self {
        self.align = Align::Left;
        self
    }
}

/// Filled rectangle on the overlay, above sprites
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Panel {
    pub rect: Rect,
    pub color: [f32; 4],
}

/// Everything needed to present one frame
#[derive(Debug, Clone, Default)]
pub struct Frame {
    /// Scene geometry for the GPU, world units
    pub vertices: Vec<Vertex>,
    /// Images on the overlay, only for assets that are ready
    pub sprites: Vec<Sprite>,
    /// Black veil over the scene (0..1), below the UI
    pub veil: f32,
    pub panels: Vec<Panel>,
    pub labels: Vec<Label>,
    pub hit_regions: HitRegions,
}

impl Frame {
    pub fn push(&mut self, vertices: Vec<Vertex>) {
        self.vertices.extend(vertices);
    }

    pub fn sprite(&mut self, sprite: Sprite) {
        self.sprites.push(sprite);
    }

    pub fn label(&mut self, label: Label) {
        self.labels.push(label);
    }

    pub fn panel(&mut self, rect: Rect, color: [f32; 4]) {
        self.panels.push(Panel { rect, color });
    }

    /// A labelled clickable button
    pub fn button(&mut self, rect: Rect, text: &str, color: [f32; 4], action: UiAction) {
        self.panel(rect, color);
        self.label(Label::new(text, rect.center(), 16.0, [1.0; 4]));
        self.hit_regions.push(rect, action);
    }

    pub fn darken(&mut self, alpha: f32) {
        self.veil = self.veil.max(alpha.clamp(0.0, 1.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_prefers_topmost() {
        let mut regions = HitRegions::default();
        regions.push(Rect::new(0.0, 0.0, 100.0, 100.0), UiAction::Interact);
        regions.push(Rect::new(40.0, 40.0, 20.0, 20.0), UiAction::Restart);
        assert_eq!(regions.resolve(Vec2::new(50.0, 50.0)), Some(UiAction::Restart));
        assert_eq!(regions.resolve(Vec2::new(10.0, 10.0)), Some(UiAction::Interact));
        assert_eq!(regions.resolve(Vec2::new(200.0, 10.0)), None);
    }

    #[test]
    fn test_button_adds_region_and_label() {
        let mut frame = Frame::default();
        frame.button(Rect::new(0.0, 0.0, 80.0, 30.0), "Yes", [1.0; 4], UiAction::ConfirmExit);
        assert_eq!(frame.hit_regions.len(), 1);
        assert_eq!(frame.labels[0].text, "Yes");
        assert_eq!(frame.labels[0].pos, Vec2::new(40.0, 15.0));
    }

    #[test]
    fn test_veil_keeps_darkest() {
        let mut frame = Frame::default();
        frame.darken(0.6);
        frame.darken(0.2);
        assert_eq!(frame.veil, 0.6);
    }
}
