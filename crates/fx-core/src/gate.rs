/// Combined page-visibility and intersection condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibilityGate {
    page_visible: bool,
    intersecting: bool,
}

impl VisibilityGate {
    /// Effects that observe intersection start closed until the first
    /// "in view" report; the rest count as permanently intersecting.
    pub fn new(observes_intersection: bool) -> Self {
        Self {
            page_visible: true,
            intersecting: !observes_intersection,
        }
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.page_visible && self.intersecting
    }

    /// Returns true when the combined state flipped.
    pub fn set_page_visible(&mut self, visible: bool) -> bool {
        let before = self.is_open();
        self.page_visible = visible;
        before != self.is_open()
    }

    /// Returns true when the combined state flipped.
    pub fn set_intersecting(&mut self, intersecting: bool) -> bool {
        let before = self.is_open();
        self.intersecting = intersecting;
        before != self.is_open()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_signals_must_be_visible() {
        let mut g = VisibilityGate::new(true);
        assert!(!g.is_open());
        assert!(g.set_intersecting(true));
        assert!(g.is_open());
        assert!(g.set_page_visible(false));
        assert!(!g.is_open());
        assert!(!g.set_intersecting(false));
        assert!(!g.set_page_visible(true));
        assert!(!g.is_open());
    }

    #[test]
    fn non_observing_gate_starts_open() {
        let mut g = VisibilityGate::new(false);
        assert!(g.is_open());
        assert!(g.set_page_visible(false));
        assert!(!g.is_open());
    }
}
