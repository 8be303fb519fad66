use super::model::{Segment, WheelConfiguration};
use super::selection::{Label, Selection};
use crate::geometry::{Point, WheelGeometry};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Interaction {
    #[default]
    Idle,
    Hovering(Label),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorAction {
    pub should_redraw: bool,
}

impl CursorAction {
    pub fn new(should_redraw: bool) -> Self {
        Self { should_redraw }
    }
}

/// The flavor wheel as an interactive widget model: configuration, current surface
/// geometry and the transient hover state. Selection is never stored here; callers
/// pass theirs in and receive a replacement set back.
#[derive(Debug, Clone)]
pub struct RadialSelector {
    pub config: WheelConfiguration,
    pub geometry: WheelGeometry,
    pub interaction: Interaction,
}

impl RadialSelector {
    pub fn new(config: WheelConfiguration, geometry: WheelGeometry) -> Self {
        Self {
            config,
            geometry,
            interaction: Interaction::Idle,
        }
    }

    /// Recomputes geometry for a new surface size. Hover is dropped since the old
    /// pointer position no longer means anything.
    pub fn resize(&mut self, width: f64, height: f64) -> CursorAction {
        let geometry = WheelGeometry::for_surface(width, height);
        if geometry == self.geometry {
            return CursorAction::default();
        }
        self.geometry = geometry;
        self.clear_hover();
        CursorAction::new(true)
    }

    pub fn segment_at(&self, cursor: Point) -> Option<Segment> {
        self.config
            .segment_at(&self.geometry, self.geometry.locate(cursor))
    }

    pub fn label_at(&self, cursor: Point) -> Option<&Label> {
        self.config.label_at(&self.geometry, cursor)
    }

    pub fn hovered(&self) -> Option<&Label> {
        match &self.interaction {
            Interaction::Idle => None,
            Interaction::Hovering(label) => Some(label),
        }
    }

    pub fn update_cursor(&mut self, cursor: Point) -> CursorAction {
        let next = match self.label_at(cursor) {
            Some(label) => Interaction::Hovering(label.clone()),
            None => Interaction::Idle,
        };

        if next == self.interaction {
            return CursorAction::default();
        }

        log::debug!("Hover: {:?} -> {:?}", self.interaction, next);
        self.interaction = next;
        CursorAction::new(true)
    }

    pub fn leave(&mut self) -> CursorAction {
        CursorAction::new(self.clear_hover())
    }

    fn clear_hover(&mut self) -> bool {
        let changed = self.interaction != Interaction::Idle;
        self.interaction = Interaction::Idle;
        changed
    }

    /// Resolves the click position and returns the selection the caller should adopt,
    /// or `None` when the click landed outside every segment.
    pub fn click(&self, cursor: Point, selected: &Selection) -> Option<Selection> {
        self.label_at(cursor).map(|label| selected.toggled(label))
    }

    /// Callback flavor of [`click`](Self::click).
    pub fn click_with(
        &self,
        cursor: Point,
        selected: &Selection,
        on_selection_change: impl FnOnce(Selection),
    ) {
        if let Some(next) = self.click(cursor, selected) {
            on_selection_change(next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::model::tests::eight_by_five;

    fn selector() -> RadialSelector {
        RadialSelector::new(eight_by_five(), WheelGeometry::square(300.0))
    }

    #[test]
    fn test_hover_transitions() {
        let mut wheel = selector();
        assert_eq!(wheel.hovered(), None);

        let action = wheel.update_cursor(Point::new(210.0, 150.0));
        assert!(action.should_redraw);
        assert_eq!(wheel.hovered(), Some(&Label::from("cat0")));

        // same segment, different pixel
        let action = wheel.update_cursor(Point::new(215.0, 151.0));
        assert!(!action.should_redraw);

        let action = wheel.update_cursor(Point::new(190.0, 150.0));
        assert!(action.should_redraw);
        assert_eq!(wheel.hovered(), Some(&Label::from("cat0-sub0")));

        let action = wheel.update_cursor(Point::new(150.0, 150.0));
        assert!(action.should_redraw);
        assert_eq!(wheel.interaction, Interaction::Idle);

        let action = wheel.update_cursor(Point::new(152.0, 150.0));
        assert!(!action.should_redraw);
    }

    #[test]
    fn test_leave_clears_hover() {
        let mut wheel = selector();
        wheel.update_cursor(Point::new(210.0, 150.0));
        assert!(wheel.leave().should_redraw);
        assert_eq!(wheel.hovered(), None);
        assert!(!wheel.leave().should_redraw);
    }

    #[test]
    fn test_click_toggles_caller_selection() {
        let wheel = selector();
        let selected = Selection::new();

        let next = wheel.click(Point::new(210.0, 150.0), &selected).unwrap();
        assert!(next.contains("cat0"));
        assert!(selected.is_empty());

        let back = wheel.click(Point::new(210.0, 150.0), &next).unwrap();
        assert_eq!(back, selected);
    }

    #[test]
    fn test_click_outside_is_noop() {
        let wheel = selector();
        let selected: Selection = ["cat1"].into_iter().collect();

        assert_eq!(wheel.click(Point::new(150.0, 150.0), &selected), None);
        assert_eq!(wheel.click(Point::new(0.0, 0.0), &selected), None);

        let mut called = false;
        wheel.click_with(Point::new(299.0, 299.0), &selected, |_| called = true);
        assert!(!called);
    }

    #[test]
    fn test_click_with_reports_replacement_set() {
        let wheel = selector();
        let selected: Selection = ["cat1"].into_iter().collect();

        let mut reported = None;
        wheel.click_with(Point::new(190.0, 150.0), &selected, |next| {
            reported = Some(next)
        });
        assert_eq!(
            reported.unwrap().labels(),
            &["cat1", "cat0-sub0"].map(Label::from)
        );
    }

    #[test]
    fn test_resize_recomputes_geometry() {
        let mut wheel = selector();
        wheel.update_cursor(Point::new(210.0, 150.0));

        assert!(!wheel.resize(300.0, 300.0).should_redraw);
        assert!(wheel.hovered().is_some());

        assert!(wheel.resize(600.0, 600.0).should_redraw);
        assert_eq!(wheel.geometry.outer_radius, 280.0);
        assert_eq!(wheel.hovered(), None);
        assert_eq!(
            wheel.label_at(Point::new(300.0 + 200.0, 300.0)),
            Some(&Label::from("cat0"))
        );
    }

    #[test]
    fn test_resize_before_allocation_then_hover() {
        let mut wheel = selector();
        wheel.update_cursor(Point::new(210.0, 150.0));

        // unallocated widgets report zero size
        assert!(wheel.resize(0.0, 0.0).should_redraw);
        assert_eq!(wheel.hovered(), None);
        assert!(!wheel.update_cursor(Point::new(0.0, 0.0)).should_redraw);

        assert!(wheel.resize(300.0, 300.0).should_redraw);
        assert!(wheel.update_cursor(Point::new(210.0, 150.0)).should_redraw);
        assert_eq!(wheel.hovered(), Some(&Label::from("cat0")));
    }
}
