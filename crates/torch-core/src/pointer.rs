use glam::Vec2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerSource {
    #[default]
    Mouse,
    Touch,
}

/// Device-independent pointer snapshot, in viewport CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
    pub source: PointerSource,
    pub pressed: bool,
}

impl PointerState {
    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    pub x: f32,
    pub y: f32,
}

/// Raw host input, already converted to viewport coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerInput<'a> {
    MouseMove { x: f32, y: f32 },
    MouseDown { x: f32, y: f32 },
    MouseUp { x: f32, y: f32 },
    TouchStart { touches: &'a [TouchPoint] },
    TouchMove { touches: &'a [TouchPoint] },
    TouchEnd,
}

/// Result of applying one input event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerUpdate {
    pub state: PointerState,
    /// The host should call `preventDefault()` on the originating event.
    pub prevent_default: bool,
}

/// Single writer of [`PointerState`]. The latest event always wins.
#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
    state: PointerState,
    suppress_touch_scroll: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> PointerState {
        self.state
    }

    /// When set, touch-move events report `prevent_default` so the page does
    /// not scroll under the finger. The owning mode decides when.
    pub fn set_suppress_touch_scroll(&mut self, suppress: bool) {
        self.suppress_touch_scroll = suppress;
    }

    pub fn apply(&mut self, input: PointerInput<'_>) -> PointerUpdate {
        let mut prevent_default = false;
        match input {
            PointerInput::MouseMove { x, y } => {
                self.move_to(x, y, PointerSource::Mouse);
            }
            PointerInput::MouseDown { x, y } => {
                self.move_to(x, y, PointerSource::Mouse);
                self.state.pressed = true;
            }
            PointerInput::MouseUp { x, y } => {
                self.move_to(x, y, PointerSource::Mouse);
                self.state.pressed = false;
            }
            PointerInput::TouchStart { touches } => {
                if let Some(t) = touches.first() {
                    self.move_to(t.x, t.y, PointerSource::Touch);
                    self.state.pressed = true;
                }
            }
            PointerInput::TouchMove { touches } => {
                if let Some(t) = touches.first() {
                    self.move_to(t.x, t.y, PointerSource::Touch);
                    self.state.pressed = true;
                    prevent_default = self.suppress_touch_scroll;
                }
            }
            PointerInput::TouchEnd => {
                self.state.source = PointerSource::Touch;
                self.state.pressed = false;
            }
        }
        PointerUpdate {
            state: self.state,
            prevent_default,
        }
    }

    fn move_to(&mut self, x: f32, y: f32, source: PointerSource) {
        self.state.source = source;
        // A bad reading keeps the previous position rather than poisoning readers.
        if x.is_finite() && y.is_finite() {
            self.state.x = x;
            self.state.y = y;
        }
    }
}
