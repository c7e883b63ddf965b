//! Square regions drawn on the current image
//!
//! Regions are kept in creation order. Each one remembers the anchor where
//! its drag started; every later drag re-derives the rectangle from that
//! anchor and the pointer position, so the anchor itself never moves.

use super::geometry::{Point, Rect, enforce_square};

/// Opaque handle identifying one region for the lifetime of its session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RegionHandle(u64);

/// One drawn region in preview space
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    pub handle: RegionHandle,
    /// Where the drag started
    pub anchor: Point,
    /// Current corners, already square-constrained
    pub rect: Rect,
}

impl Region {
    /// Still the one-pixel seed `begin` created
    pub fn is_untouched(&self) -> bool {
        self.rect == seed_rect(self.anchor)
    }
}

#[derive(Clone, Debug, Default)]
pub struct RegionTracker {
    regions: Vec<Region>,
    next_handle: u64,
}

impl RegionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new region anchored at `point`.
    ///
    /// The region starts one pixel wide so its corners are ordered from the
    /// first moment.
    pub fn begin(&mut self, point: Point) -> RegionHandle {
        let anchor = point.clamped();
        let handle = RegionHandle(self.next_handle);
        self.next_handle += 1;

        self.regions.push(Region {
            handle,
            anchor,
            rect: seed_rect(anchor),
        });
        handle
    }

    /// Move the free corner of the most recent region to `point`
    pub fn update(&mut self, point: Point) -> Option<Rect> {
        let handle = self.regions.last()?.handle;
        self.update_region(handle, point)
    }

    /// Move the free corner of the region identified by `handle` to `point`
    pub fn update_region(&mut self, handle: RegionHandle, point: Point) -> Option<Rect> {
        let region = self.regions.iter_mut().find(|r| r.handle == handle)?;
        region.rect = drag_rect(region.anchor, region.rect, point);
        Some(region.rect)
    }

    /// Hand back every region in creation order and clear the list
    pub fn commit(&mut self) -> Vec<Rect> {
        self.regions.drain(..).map(|r| r.rect).collect()
    }

    /// Remove the most recent region; `None` when nothing is drawn
    pub fn undo_last(&mut self) -> Option<Region> {
        self.regions.pop()
    }

    /// Remove the region identified by `handle`
    pub fn remove(&mut self, handle: RegionHandle) -> Option<Region> {
        let index = self.regions.iter().position(|r| r.handle == handle)?;
        Some(self.regions.remove(index))
    }

    pub fn get(&self, handle: RegionHandle) -> Option<&Region> {
        self.regions.iter().find(|r| r.handle == handle)
    }

    pub fn last(&self) -> Option<&Region> {
        self.regions.last()
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Current corners of every region, in creation order
    pub fn rects(&self) -> Vec<Rect> {
        self.regions.iter().map(|r| r.rect).collect()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

fn seed_rect(anchor: Point) -> Rect {
    Rect::new(anchor.x, anchor.y, anchor.x + 1, anchor.y + 1)
}

/// Rectangle spanned by `anchor` and `point`, clamped and squared.
///
/// An axis where the pointer sits exactly on the anchor keeps its previous
/// extent instead of collapsing to zero.
fn drag_rect(anchor: Point, current: Rect, point: Point) -> Rect {
    let (left, right) = span(anchor.x, point.x, (current.left, current.right));
    let (top, bottom) = span(anchor.y, point.y, (current.top, current.bottom));

    let left = left.max(0);
    let top = top.max(0);
    let right = right.max(left + 1);
    let bottom = bottom.max(top + 1);

    enforce_square(Rect::new(left, top, right, bottom))
}

fn span(anchor: i32, free: i32, previous: (i32, i32)) -> (i32, i32) {
    match free.cmp(&anchor) {
        std::cmp::Ordering::Less => (free, anchor),
        std::cmp::Ordering::Greater => (anchor, free),
        std::cmp::Ordering::Equal => previous,
    }
}
