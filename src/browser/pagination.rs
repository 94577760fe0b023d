//! First / previous / next / last page controls.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageControl {
    First,
    Previous,
    Next,
    Last,
}

impl PageControl {
    pub const ALL: [PageControl; 4] = [
        PageControl::First,
        PageControl::Previous,
        PageControl::Next,
        PageControl::Last,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PageControl::First => "<<",
            PageControl::Previous => "<",
            PageControl::Next => ">",
            PageControl::Last => ">>",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub total_pages: u32,
}

impl Pagination {
    pub fn new(page: u32, total_pages: u32) -> Self {
        Self { page, total_pages }
    }

    pub fn is_enabled(&self, control: PageControl) -> bool {
        match control {
            PageControl::First | PageControl::Previous => self.page > 1,
            PageControl::Next | PageControl::Last => self.page < self.total_pages,
        }
    }

    /// Page a control leads to, `None` while it is disabled.
    pub fn target(&self, control: PageControl) -> Option<u32> {
        if !self.is_enabled(control) {
            return None;
        }
        Some(match control {
            PageControl::First => 1,
            PageControl::Previous => self.page - 1,
            PageControl::Next => self.page + 1,
            PageControl::Last => self.total_pages,
        })
    }

    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, 1)
    }
}
