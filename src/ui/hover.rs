/// Hover preview scheduling and placement
///
/// Debounces preview show/hide so a pointer sweeping across many tiles
/// never flickers a preview in and out: showing waits 150ms, hiding
/// waits 100ms, and every new intent supersedes whatever timer is still
/// pending (of either kind). The anchor rectangle is measured when the
/// show timer fires, not when the pointer enters, so the preview lands
/// next to where the tile actually is at that moment.
///
/// Timers are `tokio::time::sleep` futures carried by iced tasks; they
/// cannot be aborted once spawned, so cancellation is an epoch token:
/// each request mints a new epoch and callbacks carrying a stale epoch
/// are dropped on arrival.

use iced::widget::{container, image};
use iced::{ContentFit, Element, Length, Padding, Point, Rectangle, Size};
use std::time::Duration;

/// Delay before a hovered tile's preview appears.
pub const SHOW_DELAY: Duration = Duration::from_millis(150);

/// Delay before the preview disappears after the pointer leaves.
/// Shorter than [`SHOW_DELAY`]: once the user stops hovering, intent is
/// clear and the preview should go quickly.
pub const HIDE_DELAY: Duration = Duration::from_millis(100);

/// Fixed width of the floating preview card.
pub const PREVIEW_WIDTH: f32 = 320.0;

/// Card height: 4:3 image area plus the card padding.
pub const PREVIEW_HEIGHT: f32 = 256.0;

/// Gap kept between the preview, its anchor, and the viewport edges.
const MARGIN: f32 = 24.0;

/// A published preview: what to show and where its anchor tile was.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivePreview {
    pub image_url: String,
    pub anchor: Rectangle,
}

#[derive(Debug, Clone)]
enum Pending {
    Show {
        image_url: String,
        anchor: container::Id,
    },
    Hide,
}

/// Owns the debounce state: one epoch counter, at most one pending
/// intent, and the currently published preview. Dropping or clearing
/// the scheduler invalidates every outstanding timer.
#[derive(Debug, Default)]
pub struct HoverScheduler {
    epoch: u64,
    pending: Option<Pending>,
    active: Option<ActivePreview>,
}

impl HoverScheduler {
    /// The preview currently on screen, if any.
    pub fn active(&self) -> Option<&ActivePreview> {
        self.active.as_ref()
    }

    /// Register intent to show a preview for the hovered tile. Any
    /// pending show or hide timer is superseded. Returns the epoch
    /// token the caller's 150ms timer must carry back.
    pub fn request_show(&mut self, image_url: String, anchor: container::Id) -> u64 {
        self.epoch += 1;
        self.pending = Some(Pending::Show { image_url, anchor });
        self.epoch
    }

    /// Register intent to hide the preview. Any pending show timer is
    /// superseded. Returns the epoch token for the 100ms timer.
    pub fn request_hide(&mut self) -> u64 {
        self.epoch += 1;
        self.pending = Some(Pending::Hide);
        self.epoch
    }

    /// The show timer fired. If it was not superseded in the meantime,
    /// hand back what to measure: the anchor to resolve into a viewport
    /// rectangle before publishing.
    pub fn show_elapsed(&mut self, token: u64) -> Option<(String, container::Id)> {
        if token != self.epoch {
            return None;
        }
        match self.pending.take() {
            Some(Pending::Show { image_url, anchor }) => Some((image_url, anchor)),
            other => {
                self.pending = other;
                None
            }
        }
    }

    /// The anchor measurement came back. Publishes the preview unless a
    /// newer request arrived during the round-trip, or the tile is no
    /// longer laid out (e.g. the page changed).
    pub fn anchor_measured(&mut self, token: u64, image_url: String, anchor: Option<Rectangle>) {
        if token != self.epoch {
            return;
        }
        if let Some(anchor) = anchor {
            self.active = Some(ActivePreview { image_url, anchor });
        }
    }

    /// The hide timer fired; clears the published preview unless
    /// superseded.
    pub fn hide_elapsed(&mut self, token: u64) {
        if token != self.epoch {
            return;
        }
        if matches!(self.pending, Some(Pending::Hide)) {
            self.pending = None;
            self.active = None;
        }
    }

    /// Immediately drop the preview and invalidate all outstanding
    /// timers. Called on every navigation transition so a stale preview
    /// can never leak onto the next screen.
    pub fn clear(&mut self) {
        self.epoch += 1;
        self.pending = None;
        self.active = None;
    }
}

/// Where the preview card goes, as a pure function of the anchor, the
/// card size and the viewport.
///
/// Prefers the right side of the anchor; flips to the left when the
/// right edge would overflow. Vertically centered on the anchor, then
/// clamped inside the viewport. The flipped-left position has no lower
/// bound, so on very narrow viewports the card can extend past the left
/// edge; that boundary case is intentional, see the placement tests.
pub fn placement(anchor: Rectangle, preview: Size, viewport: Size) -> Point {
    let mut left = anchor.x + anchor.width + MARGIN;
    if left + preview.width > viewport.width - MARGIN {
        left = anchor.x - preview.width - MARGIN;
    }

    let mut top = anchor.y + anchor.height / 2.0 - preview.height / 2.0;
    if top < MARGIN {
        top = MARGIN;
    }
    if top + preview.height > viewport.height - MARGIN {
        top = viewport.height - preview.height - MARGIN;
    }

    Point::new(left, top)
}

/// The floating preview card, positioned inside a viewport-filling
/// layer. Only called while a preview is published; when none is, the
/// overlay is not mounted at all.
pub fn overlay<'a, Message: 'a>(preview: &ActivePreview, viewport: Size) -> Element<'a, Message> {
    let size = Size::new(PREVIEW_WIDTH, PREVIEW_HEIGHT);
    let position = placement(preview.anchor, size, viewport);

    let card = container(
        image(image::Handle::from_path(&preview.image_url))
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(ContentFit::Cover),
    )
    .width(Length::Fixed(PREVIEW_WIDTH))
    .height(Length::Fixed(PREVIEW_HEIGHT))
    .padding(8)
    .style(container::rounded_box);

    container(card)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(Padding {
            top: position.y,
            left: position.x,
            right: 0.0,
            bottom: 0.0,
        })
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor_id(name: &str) -> container::Id {
        container::Id::new(name.to_string())
    }

    fn some_rect() -> Rectangle {
        Rectangle::new(Point::new(100.0, 200.0), Size::new(50.0, 50.0))
    }

    #[test]
    fn test_show_superseded_by_hide_never_publishes() {
        let mut scheduler = HoverScheduler::default();

        // Pointer enters a tile, then leaves before the show delay ran out.
        let show = scheduler.request_show("a.jpg".into(), anchor_id("a"));
        let hide = scheduler.request_hide();

        assert!(scheduler.show_elapsed(show).is_none());
        scheduler.hide_elapsed(hide);
        assert!(scheduler.active().is_none());
    }

    #[test]
    fn test_uninterrupted_show_publishes_after_measurement() {
        let mut scheduler = HoverScheduler::default();

        let show = scheduler.request_show("a.jpg".into(), anchor_id("a"));
        let (image_url, _anchor) = scheduler.show_elapsed(show).unwrap();
        scheduler.anchor_measured(show, image_url, Some(some_rect()));

        let active = scheduler.active().unwrap();
        assert_eq!(active.image_url, "a.jpg");
        assert_eq!(active.anchor, some_rect());
    }

    #[test]
    fn test_new_show_supersedes_pending_hide() {
        let mut scheduler = HoverScheduler::default();

        let show = scheduler.request_show("a.jpg".into(), anchor_id("a"));
        let (url, _) = scheduler.show_elapsed(show).unwrap();
        scheduler.anchor_measured(show, url, Some(some_rect()));

        // Pointer hops to the next tile: the hide scheduled on leave is
        // cancelled by the new show, so the old preview stays up until
        // the new one replaces it.
        let hide = scheduler.request_hide();
        let show2 = scheduler.request_show("b.jpg".into(), anchor_id("b"));
        scheduler.hide_elapsed(hide);
        assert_eq!(scheduler.active().unwrap().image_url, "a.jpg");

        let (url2, _) = scheduler.show_elapsed(show2).unwrap();
        scheduler.anchor_measured(show2, url2, Some(some_rect()));
        assert_eq!(scheduler.active().unwrap().image_url, "b.jpg");
    }

    #[test]
    fn test_measurement_that_lost_the_race_is_dropped() {
        let mut scheduler = HoverScheduler::default();

        let show = scheduler.request_show("a.jpg".into(), anchor_id("a"));
        let (url, _) = scheduler.show_elapsed(show).unwrap();

        // Pointer left while the bounds query was in flight.
        let hide = scheduler.request_hide();
        scheduler.anchor_measured(show, url, Some(some_rect()));
        assert!(scheduler.active().is_none());

        scheduler.hide_elapsed(hide);
        assert!(scheduler.active().is_none());
    }

    #[test]
    fn test_unmeasurable_anchor_publishes_nothing() {
        let mut scheduler = HoverScheduler::default();

        let show = scheduler.request_show("a.jpg".into(), anchor_id("a"));
        let (url, _) = scheduler.show_elapsed(show).unwrap();
        scheduler.anchor_measured(show, url, None);
        assert!(scheduler.active().is_none());
    }

    #[test]
    fn test_clear_invalidates_outstanding_timers() {
        let mut scheduler = HoverScheduler::default();

        let show = scheduler.request_show("a.jpg".into(), anchor_id("a"));
        scheduler.clear();

        assert!(scheduler.show_elapsed(show).is_none());
        assert!(scheduler.active().is_none());
    }

    #[test]
    fn test_placement_flips_left_when_right_side_overflows() {
        let anchor = Rectangle::new(Point::new(1000.0, 100.0), Size::new(50.0, 50.0));
        let preview = Size::new(320.0, 200.0);
        let viewport = Size::new(1200.0, 800.0);

        let position = placement(anchor, preview, viewport);
        // 1050 + 24 + 320 = 1394 > 1200 - 24, so the card flips left.
        assert_eq!(position.x, 1000.0 - 320.0 - 24.0);
        assert_eq!(position.y, 100.0 + 25.0 - 100.0);
    }

    #[test]
    fn test_placement_prefers_the_right_side() {
        let anchor = Rectangle::new(Point::new(100.0, 300.0), Size::new(50.0, 50.0));
        let position = placement(anchor, Size::new(320.0, 200.0), Size::new(1200.0, 800.0));
        assert_eq!(position.x, 150.0 + 24.0);
    }

    #[test]
    fn test_placement_clamps_vertically() {
        let preview = Size::new(320.0, 200.0);
        let viewport = Size::new(1200.0, 600.0);

        let near_top = Rectangle::new(Point::new(100.0, 0.0), Size::new(50.0, 50.0));
        assert_eq!(placement(near_top, preview, viewport).y, 24.0);

        let near_bottom = Rectangle::new(Point::new(100.0, 580.0), Size::new(50.0, 50.0));
        assert_eq!(
            placement(near_bottom, preview, viewport).y,
            600.0 - 200.0 - 24.0
        );
    }

    #[test]
    fn test_flipped_left_has_no_lower_bound() {
        // On a viewport narrower than the card, flipping left pushes the
        // card past the left edge. Matches the shipped behavior.
        let anchor = Rectangle::new(Point::new(10.0, 100.0), Size::new(50.0, 50.0));
        let position = placement(anchor, Size::new(320.0, 200.0), Size::new(300.0, 800.0));
        assert!(position.x < 0.0);
    }
}
