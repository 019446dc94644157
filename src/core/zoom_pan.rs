//! Click-to-zoom and drag-to-pan gesture state for an open preview.

use crate::config::PREVIEW_ZOOM;

/// Pointer position in client coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Scale and translation to apply to the previewed image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    /// CSS `transform` value. Translation is applied before scaling so offsets
    /// stay in screen pixels.
    pub fn to_css(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.translate_x, self.translate_y, self.scale
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Drag {
    Idle,
    Active { last: Point, moved: bool },
}

/// Gesture state machine: `Normal` or `Zoomed`, with optional drag while zoomed.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoomPanSession {
    zoomed: bool,
    translate: Point,
    drag: Drag,
    /// Set when a drag that moved was released over the image; the click the
    /// browser fires right after that pointer-up is swallowed.
    swallow_click: bool,
}

impl Default for ZoomPanSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ZoomPanSession {
    pub fn new() -> Self {
        Self {
            zoomed: false,
            translate: Point::default(),
            drag: Drag::Idle,
            swallow_click: false,
        }
    }

    pub fn is_zoomed(&self) -> bool {
        self.zoomed
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, Drag::Active { .. })
    }

    pub fn transform(&self) -> Transform {
        if self.zoomed {
            Transform {
                scale: PREVIEW_ZOOM,
                translate_x: self.translate.x,
                translate_y: self.translate.y,
            }
        } else {
            Transform::IDENTITY
        }
    }

    /// Toggles between Normal and Zoomed. Both directions reset translation.
    pub fn click(&mut self) {
        if std::mem::take(&mut self.swallow_click) {
            return;
        }
        self.zoomed = !self.zoomed;
        self.translate = Point::default();
        self.drag = Drag::Idle;
    }

    /// Starts a drag. Ignored while Normal.
    pub fn pointer_down(&mut self, at: Point) {
        if !self.zoomed {
            return;
        }
        self.swallow_click = false;
        self.drag = Drag::Active {
            last: at,
            moved: false,
        };
    }

    /// Adds the delta since the previous move event to the translation.
    pub fn pointer_move(&mut self, at: Point) {
        let Drag::Active { last, moved } = self.drag else {
            return;
        };
        let (dx, dy) = (at.x - last.x, at.y - last.y);
        self.translate.x += dx;
        self.translate.y += dy;
        self.drag = Drag::Active {
            last: at,
            moved: moved || dx != 0.0 || dy != 0.0,
        };
    }

    /// Ends the drag. `on_image` tells whether the pointer was released over
    /// the image; a release elsewhere produces no click on it, so there is
    /// nothing to swallow.
    pub fn pointer_up(&mut self, on_image: bool) {
        if let Drag::Active { moved, .. } = self.drag {
            self.swallow_click = moved && on_image;
        }
        self.drag = Drag::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_toggles_zoom() {
        let mut session = ZoomPanSession::new();
        assert_eq!(session.transform(), Transform::IDENTITY);

        session.click();
        assert!(session.is_zoomed());
        assert_eq!(
            session.transform(),
            Transform {
                scale: PREVIEW_ZOOM,
                translate_x: 0.0,
                translate_y: 0.0
            }
        );

        session.click();
        assert!(!session.is_zoomed());
        assert_eq!(session.transform(), Transform::IDENTITY);
    }

    #[test]
    fn test_pan_ignored_while_normal() {
        let mut session = ZoomPanSession::new();
        session.pointer_down(Point::new(0.0, 0.0));
        session.pointer_move(Point::new(50.0, 50.0));
        assert!(!session.is_dragging());
        assert_eq!(session.transform(), Transform::IDENTITY);
    }

    #[test]
    fn test_pan_accumulates_incremental_deltas() {
        let mut session = ZoomPanSession::new();
        session.click();
        session.pointer_down(Point::new(10.0, 10.0));
        session.pointer_move(Point::new(15.0, 12.0));
        session.pointer_move(Point::new(25.0, 7.0));
        session.pointer_up(true);

        let t = session.transform();
        assert_eq!((t.translate_x, t.translate_y), (15.0, -3.0));

        // a second drag continues from the current offset without jumping
        session.pointer_down(Point::new(100.0, 100.0));
        session.pointer_move(Point::new(101.0, 100.0));
        let t = session.transform();
        assert_eq!((t.translate_x, t.translate_y), (16.0, -3.0));
    }

    #[test]
    fn test_move_without_drag_is_noop() {
        let mut session = ZoomPanSession::new();
        session.click();
        session.pointer_move(Point::new(30.0, 30.0));
        assert_eq!(session.transform().translate_x, 0.0);
    }

    #[test]
    fn test_unzoom_resets_translation() {
        let mut session = ZoomPanSession::new();
        session.click();
        session.pointer_down(Point::new(0.0, 0.0));
        session.pointer_move(Point::new(40.0, 0.0));
        session.pointer_up(true);
        session.click(); // swallowed: follows a drag that moved
        assert!(session.is_zoomed());

        session.click();
        assert!(!session.is_zoomed());
        session.click();
        assert_eq!(session.transform().translate_x, 0.0);
    }

    #[test]
    fn test_click_after_stationary_press_toggles() {
        let mut session = ZoomPanSession::new();
        session.click();
        session.pointer_down(Point::new(5.0, 5.0));
        session.pointer_up(true);
        session.click();
        assert!(!session.is_zoomed());
    }

    #[test]
    fn test_drag_released_outside_image_keeps_next_click() {
        let mut session = ZoomPanSession::new();
        session.click();
        session.pointer_down(Point::new(0.0, 0.0));
        session.pointer_move(Point::new(300.0, 0.0));
        session.pointer_up(false);

        session.click();
        assert!(!session.is_zoomed());
    }

    #[test]
    fn test_css() {
        assert_eq!(
            Transform::IDENTITY.to_css(),
            "translate(0px, 0px) scale(1)"
        );
    }
}
