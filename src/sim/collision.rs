//! Collision detection
//!
//! Plain axis-aligned bounding boxes. Rectangles that only share an edge do
//! not collide; both axes need a nonzero overlap.

use super::body::{Body, Rect};

/// True if the rectangles overlap by a nonzero amount on both axes
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && b.left() < a.right() && a.top() < b.bottom() && b.top() < a.bottom()
}

/// Index of the first body in `others` overlapping `subject`, if any.
///
/// Which index comes back depends on order, but whether one comes back does not.
pub fn first_collision<'a, S, O>(subject: &S, others: impl IntoIterator<Item = &'a O>) -> Option<usize>
where
    S: Body + ?Sized,
    O: Body + 'a,
{
    let bounds = subject.bounds();
    others
        .into_iter()
        .position(|other| rects_overlap(&bounds, &other.bounds()))
}
