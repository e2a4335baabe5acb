#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LightboxImage {
    pub src: String,
    pub alt: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Backdrop,
    CloseButton,
    Content,
}

/// Modal image viewer. While open, the page body must not scroll.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lightbox {
    image: Option<LightboxImage>,
}

impl Lightbox {
    pub fn open(&mut self, image: LightboxImage) {
        self.image = Some(image);
    }

    pub fn close(&mut self) {
        self.image = None;
    }

    pub fn is_open(&self) -> bool {
        self.image.is_some()
    }

    pub fn body_scroll_locked(&self) -> bool {
        self.is_open()
    }

    pub fn image(&self) -> Option<&LightboxImage> {
        self.image.as_ref()
    }

    pub fn on_key(&mut self, key: &str) {
        if key == "Escape" {
            self.close();
        }
    }

    /// Clicks inside the content area stop propagation and never reach the backdrop.
    pub fn on_click(&mut self, target: ClickTarget) {
        match target {
            ClickTarget::Backdrop | ClickTarget::CloseButton => self.close(),
            ClickTarget::Content => {}
        }
    }
}
