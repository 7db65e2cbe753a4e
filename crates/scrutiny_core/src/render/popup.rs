//! Hover popup for highlighted segments.
//!
//! # Responsibility
//! - Track which annotation the hover popup shows and where it is anchored.
//! - Bridge the pointer gap between segment and popup with a grace period.
//!
//! # Invariants
//! - Every enter/leave bumps `generation`; a dismissal only takes effect if
//!   its token still carries the current generation.
//! - The popup stores an annotation ID only. Fields are resolved from the
//!   store each time `view` is called.

use crate::model::annotation::AnnotationId;
use crate::model::taxonomy::Color;
use crate::store::annotation_store::AnnotationStore;
use std::time::{Duration, Instant};

/// Surface-defined anchor point near the hovered segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopupAnchor {
    pub x: f32,
    pub y: f32,
}

/// Deferred close request handed to the surface's timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DismissToken {
    generation: u64,
    due_at: Instant,
}

impl DismissToken {
    pub fn due_at(&self) -> Instant {
        self.due_at
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct OpenPopup {
    annotation_id: AnnotationId,
    anchor: PopupAnchor,
}

/// Popup content resolved from the live annotation record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupView<'a> {
    pub annotation_id: AnnotationId,
    pub code: &'a str,
    pub description: &'a str,
    pub color: &'a Color,
    pub text: &'a str,
}

/// Hover popup state machine.
#[derive(Debug, Clone)]
pub struct HoverPopup {
    grace: Duration,
    generation: u64,
    open: Option<OpenPopup>,
    pending: Option<DismissToken>,
}

impl HoverPopup {
    pub fn new(grace: Duration) -> Self {
        Self {
            grace,
            generation: 0,
            open: None,
            pending: None,
        }
    }

    pub fn grace(&self) -> Duration {
        self.grace
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn annotation_id(&self) -> Option<AnnotationId> {
        self.open.map(|open| open.annotation_id)
    }

    pub fn anchor(&self) -> Option<PopupAnchor> {
        self.open.map(|open| open.anchor)
    }

    /// Pending dismissal, if one is scheduled and not superseded.
    pub fn pending_dismiss(&self) -> Option<DismissToken> {
        self.pending
    }

    /// Pointer entered a highlighted segment: show (or retarget) the popup
    /// and cancel any pending dismissal.
    pub fn enter_segment(&mut self, annotation_id: AnnotationId, anchor: PopupAnchor) {
        self.supersede();
        self.open = Some(OpenPopup {
            annotation_id,
            anchor,
        });
    }

    /// Pointer entered the popup itself: keep it open.
    pub fn enter_popup(&mut self) {
        if self.open.is_some() {
            self.supersede();
        }
    }

    /// Pointer left the segment. Returns the token the surface should fire
    /// after the grace period, or `None` when nothing is open.
    pub fn leave_segment(&mut self, now: Instant) -> Option<DismissToken> {
        self.schedule_dismiss(now)
    }

    /// Pointer left the popup. Same contract as `leave_segment`.
    pub fn leave_popup(&mut self, now: Instant) -> Option<DismissToken> {
        self.schedule_dismiss(now)
    }

    /// Timer callback for `token`. Closes the popup only if the token was not
    /// superseded. Returns whether the popup closed.
    pub fn fire(&mut self, token: DismissToken) -> bool {
        if self.pending != Some(token) || token.generation != self.generation {
            return false;
        }
        self.close();
        true
    }

    /// Polling alternative to `fire`: closes when the pending token is due.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(token) if now >= token.due_at => self.fire(token),
            _ => false,
        }
    }

    /// Closes immediately, e.g. when the document is replaced.
    pub fn close(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.open = None;
        self.pending = None;
    }

    /// Resolves the popup's content against `store`.
    ///
    /// Returns `None` when closed or when the annotation no longer resolves.
    pub fn view<'a>(&self, store: &'a AnnotationStore) -> Option<PopupView<'a>> {
        let open = self.open?;
        let annotation = store.get(open.annotation_id)?;
        Some(PopupView {
            annotation_id: annotation.id,
            code: annotation.code.as_str(),
            description: annotation.description.as_str(),
            color: &annotation.color,
            text: annotation.text.as_str(),
        })
    }

    fn supersede(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.pending = None;
    }

    fn schedule_dismiss(&mut self, now: Instant) -> Option<DismissToken> {
        self.open?;
        self.generation = self.generation.wrapping_add(1);
        let token = DismissToken {
            generation: self.generation,
            due_at: now + self.grace,
        };
        self.pending = Some(token);
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::{HoverPopup, PopupAnchor};
    use crate::model::range::TextRange;
    use crate::model::taxonomy::CodeGroup;
    use crate::store::annotation_store::AnnotationStore;
    use std::time::{Duration, Instant};
    use uuid::Uuid;

    const GRACE: Duration = Duration::from_millis(150);
    const ANCHOR: PopupAnchor = PopupAnchor { x: 10.0, y: 20.0 };

    #[test]
    fn leave_then_fire_closes() {
        let mut popup = HoverPopup::new(GRACE);
        popup.enter_segment(Uuid::new_v4(), ANCHOR);
        let token = popup.leave_segment(Instant::now()).expect("popup is open");
        assert!(popup.is_open());
        assert!(popup.fire(token));
        assert!(!popup.is_open());
    }

    #[test]
    fn entering_popup_supersedes_pending_dismiss() {
        let mut popup = HoverPopup::new(GRACE);
        popup.enter_segment(Uuid::new_v4(), ANCHOR);
        let token = popup.leave_segment(Instant::now()).expect("popup is open");

        popup.enter_popup();
        assert!(!popup.fire(token), "stale token must be inert");
        assert!(popup.is_open());
    }

    #[test]
    fn stale_token_is_inert_after_newer_leave() {
        let mut popup = HoverPopup::new(GRACE);
        popup.enter_segment(Uuid::new_v4(), ANCHOR);
        let now = Instant::now();
        let first = popup.leave_segment(now).expect("open");
        popup.enter_popup();
        let second = popup.leave_popup(now).expect("open");

        assert!(!popup.fire(first));
        assert!(popup.is_open());
        assert!(popup.fire(second));
        assert!(!popup.is_open());
    }

    #[test]
    fn expire_waits_for_grace_period() {
        let mut popup = HoverPopup::new(GRACE);
        popup.enter_segment(Uuid::new_v4(), ANCHOR);
        let now = Instant::now();
        popup.leave_segment(now).expect("open");

        assert!(!popup.expire(now + Duration::from_millis(100)));
        assert!(popup.is_open());
        assert!(popup.expire(now + GRACE));
        assert!(!popup.is_open());
    }

    #[test]
    fn leave_without_open_popup_schedules_nothing() {
        let mut popup = HoverPopup::new(GRACE);
        assert!(popup.leave_segment(Instant::now()).is_none());
    }

    #[test]
    fn view_reads_live_annotation_text() {
        let mut store = AnnotationStore::new("The quick brown fox");
        let id = store
            .create(
                "FLOW",
                "Improve logical flow",
                CodeGroup::Structure.color(),
                TextRange::new(4, 9),
            )
            .expect("valid range")
            .id;
        let mut popup = HoverPopup::new(GRACE);
        popup.enter_segment(id, ANCHOR);
        assert_eq!(popup.view(&store).expect("open").text, "");

        store.set_text(id, "needs more punch");
        let view = popup.view(&store).expect("open");
        assert_eq!(view.code, "FLOW");
        assert_eq!(view.text, "needs more punch");
    }
}
