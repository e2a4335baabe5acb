use super::is_mobile;

pub const DESKTOP_EXTRA_OFFSET: f64 = 20.0;
pub const MOBILE_SCROLL_OFFSET: f64 = 130.0;
pub const SCROLL_TOP_THRESHOLD: f64 = 300.0;
pub const HEADER_SOLID_THRESHOLD: f64 = 50.0;

/// Mobile navigation panel and its hamburger trigger share one open flag.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NavPanel {
    pub open: bool,
}

impl NavPanel {
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Growing past the breakpoint always closes the panel.
    pub fn on_resize(&mut self, viewport_width: f64) {
        if !is_mobile(viewport_width) {
            self.open = false;
        }
    }
}

/// Scroll position for an in-page anchor, keeping the target clear of the fixed header.
pub fn scroll_target_offset(target_top: f64, header_height: f64, viewport_width: f64) -> f64 {
    let offset = if is_mobile(viewport_width) {
        MOBILE_SCROLL_OFFSET
    } else {
        header_height + DESKTOP_EXTRA_OFFSET
    };
    (target_top - offset).max(0.0)
}

/// Resolves an anchor click. `None` target means the link points nowhere on the page.
pub fn anchor_scroll(target_top: Option<f64>, header_height: f64, viewport_width: f64) -> Option<f64> {
    target_top.map(|top| scroll_target_offset(top, header_height, viewport_width))
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DropdownItem {
    pub active: bool,
}

impl DropdownItem {
    /// Returns whether the click's default navigation should be cancelled.
    /// Wide layouts rely on hover and keep the link behaviour.
    pub fn on_click(&mut self, viewport_width: f64) -> bool {
        if is_mobile(viewport_width) {
            self.active = !self.active;
            true
        } else {
            false
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

impl Visibility {
    pub fn opacity(self) -> &'static str {
        match self {
            Visibility::Visible => "1",
            Visibility::Hidden => "0",
        }
    }

    pub fn css(self) -> &'static str {
        match self {
            Visibility::Visible => "visible",
            Visibility::Hidden => "hidden",
        }
    }
}

/// The floating "back to top" button, created once per page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollToTop {
    pub label: &'static str,
    pub class_name: &'static str,
    pub visibility: Visibility,
}

impl Default for ScrollToTop {
    fn default() -> Self {
        Self {
            label: "↑",
            class_name: "scroll-to-top",
            visibility: Visibility::Hidden,
        }
    }
}

impl ScrollToTop {
    pub fn on_scroll(&mut self, scroll_y: f64) -> Visibility {
        self.visibility = if scroll_y > SCROLL_TOP_THRESHOLD {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
        self.visibility
    }

    pub fn click_target(&self) -> f64 {
        0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderStyle {
    pub background_color: &'static str,
    pub backdrop_filter: &'static str,
}

pub fn header_style(scroll_y: f64) -> HeaderStyle {
    if scroll_y > HEADER_SOLID_THRESHOLD {
        HeaderStyle {
            background_color: "rgba(255, 255, 255, 0.95)",
            backdrop_filter: "blur(10px)",
        }
    } else {
        HeaderStyle {
            background_color: "#fff",
            backdrop_filter: "none",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nav_toggles_and_closes_on_wide_resize() {
        let mut nav = NavPanel::default();
        nav.toggle();
        assert!(nav.open);
        nav.on_resize(768.0);
        assert!(nav.open);
        nav.on_resize(769.0);
        assert!(!nav.open);
        nav.toggle();
        nav.toggle();
        assert!(!nav.open);
    }

    #[test]
    fn anchor_offsets_differ_by_layout() {
        assert_eq!(scroll_target_offset(1000.0, 80.0, 1280.0), 900.0);
        assert_eq!(scroll_target_offset(1000.0, 80.0, 375.0), 870.0);
        assert_eq!(scroll_target_offset(50.0, 80.0, 1280.0), 0.0);
        assert_eq!(anchor_scroll(None, 80.0, 1280.0), None);
    }

    #[test]
    fn dropdown_only_toggles_on_narrow_viewports() {
        let mut item = DropdownItem::default();
        assert!(!item.on_click(1024.0));
        assert!(!item.active);
        assert!(item.on_click(768.0));
        assert!(item.active);
        assert!(item.on_click(400.0));
        assert!(!item.active);
    }

    #[test]
    fn scroll_to_top_appears_past_threshold() {
        let mut button = ScrollToTop::default();
        assert_eq!(button.visibility, Visibility::Hidden);
        assert_eq!(button.on_scroll(300.0), Visibility::Hidden);
        assert_eq!(button.on_scroll(301.0), Visibility::Visible);
        assert_eq!(button.on_scroll(0.0).opacity(), "0");
        assert_eq!(button.click_target(), 0.0);
    }

    #[test]
    fn header_switches_at_fifty_pixels() {
        assert_eq!(header_style(50.0).backdrop_filter, "none");
        assert_eq!(header_style(51.0).background_color, "rgba(255, 255, 255, 0.95)");
    }
}
