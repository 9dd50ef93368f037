//! Visual feedback applied to a handle while it is dragged

/// Highlight state of a handle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feedback {
    /// Raised, tinted and blurred while a drag is in progress
    Active,
    /// Inline highlight cleared
    Inactive,
}

impl Feedback {
    /// Inline style declarations for this state
    pub fn style(&self) -> [(&'static str, String); 3] {
        match self {
            Feedback::Active => [
                ("z-index", "9999".to_string()),
                ("background-color", "rgba(86, 159, 248, 0.2)".to_string()),
                ("filter", "blur(3px)".to_string()),
            ],
            Feedback::Inactive => [
                ("z-index", String::new()),
                ("background-color", String::new()),
                ("filter", String::new()),
            ],
        }
    }
}
