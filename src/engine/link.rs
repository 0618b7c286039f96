use super::BodyHandle;

/// Elastic distance constraint between two bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub body_a: BodyHandle,
    pub body_b: BodyHandle,
    /// Fraction of the length error corrected per iteration
    pub stiffness: f32,
    /// Fraction of the relative normal velocity removed per iteration
    pub damping: f32,
    /// Rest length
    pub length: f32,
    /// Drawn by the renderer when set
    pub visible: bool,
}
