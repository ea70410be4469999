/// Navbar look derived from the scroll position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavbarState {
    /// Opaque background with shadow
    pub solid: bool,
    /// Slid out of view
    pub hidden: bool,
    last_offset: f64,
    solid_after: f64,
    hide_after: f64,
}

impl NavbarState {
    pub fn new(solid_after: f64, hide_after: f64) -> Self {
        Self {
            solid: false,
            hidden: false,
            last_offset: 0.0,
            solid_after,
            hide_after,
        }
    }

    /// Updates the state for a new vertical scroll offset. Scrolling down
    /// past the hide threshold hides the bar, any upward scroll shows it.
    pub fn on_scroll(&mut self, offset: f64) {
        self.solid = offset > self.solid_after;
        self.hidden = offset > self.last_offset && offset > self.hide_after;
        self.last_offset = offset;
    }

    pub fn class(&self) -> String {
        let mut class = String::from("navbar");
        if self.solid {
            class.push_str(" navbar--solid");
        }
        if self.hidden {
            class.push_str(" navbar--hidden");
        }
        class
    }
}
