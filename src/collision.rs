/// Axis-separated collision resolution against static surfaces.
///
/// A moving body is resolved one axis at a time, right after its position on
/// that axis was integrated:
///
/// 1. move on x, then [`resolve_horizontal`]
/// 2. move on y, then [`resolve_vertical`]
///
/// Resolution snaps the body's edge flush against the surface it entered. The
/// vertical pass also notifies the body so it can land or stop rising.
///
/// # Multiple hits
///
/// The set of overlapping surfaces is collected once, before any snapping,
/// then each hit is handled in surface order. The velocity is re-read for
/// every hit, so after a `land()` (which zeroes vertical velocity) later hits
/// in the same pass do nothing. Position snaps are last-write-wins.
use crate::rect::Rect;
use crate::surface::Surface;
use serde::{Deserialize, Serialize};

/// Something that moves and reacts to vertical contacts.
pub trait Body {
    fn bounds(&self) -> &Rect;

    fn bounds_mut(&mut self) -> &mut Rect;

    /// Current `(delta_x, delta_y)` velocity.
    fn velocity(&self) -> (f32, f32);

    /// Called after the body was snapped on top of a surface while falling.
    fn land(&mut self);

    /// Called after the body was snapped below a surface while rising.
    fn stop_rising(&mut self);
}

/// Which velocity decides the "moving left" branch of the horizontal pass.
///
/// With `VerticalVelocity` (the default) the horizontal pass snaps to a
/// surface's right edge only when the body is moving *up* (`delta_y < 0`), so
/// a body walking left into a wall passes through it.
/// `HorizontalVelocity` tests `delta_x < 0` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalSnapRule {
    #[default]
    VerticalVelocity,
    HorizontalVelocity,
}

/// What a single resolution pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Contact {
    /// Surfaces overlapping the body when the pass started
    pub hits: usize,
    /// Hits that moved the body
    pub snaps: usize,
    pub landed: bool,
    pub bumped_head: bool,
}

/// Indices of every surface overlapping `rect`, in surface order.
pub fn overlapping(rect: &Rect, surfaces: &[Surface]) -> Vec<usize> {
    surfaces
        .iter()
        .enumerate()
        .filter(|(_, surface)| rect.intersects(surface.bounds()))
        .map(|(index, _)| index)
        .collect()
}

/// Pure ground check used to decide whether a jump is allowed.
///
/// Looks `probe_depth` units below `rect` for a surface, without moving
/// `rect`. Standing at or below `floor_y` (the bottom of the screen) also
/// counts as grounded.
///
/// The probe is 2 units by default rather than 1 so that a body resting on a
/// surface that drifts down between frames still reads as touching it.
pub fn is_grounded_at(rect: &Rect, surfaces: &[Surface], probe_depth: f32, floor_y: f32) -> bool {
    let probe = rect.translated(0.0, probe_depth);
    surfaces.iter().any(|surface| probe.intersects(surface.bounds())) || rect.bottom() >= floor_y
}

/// Horizontal pass. Never changes velocity.
pub fn resolve_horizontal<B: Body + ?Sized>(
    body: &mut B,
    surfaces: &[Surface],
    rule: HorizontalSnapRule,
) -> Contact {
    let hits = overlapping(body.bounds(), surfaces);
    let mut contact = Contact {
        hits: hits.len(),
        ..Contact::default()
    };

    for index in hits {
        let block = surfaces[index].bounds();
        let (delta_x, delta_y) = body.velocity();
        let moving_left = match rule {
            HorizontalSnapRule::VerticalVelocity => delta_y < 0.0,
            HorizontalSnapRule::HorizontalVelocity => delta_x < 0.0,
        };

        if delta_x > 0.0 {
            body.bounds_mut().set_right(block.left());
            contact.snaps += 1;
        } else if moving_left {
            body.bounds_mut().set_left(block.right());
            contact.snaps += 1;
        }
    }

    contact
}

/// Vertical pass. Lands on surfaces hit while falling, bumps heads on
/// surfaces hit while rising.
pub fn resolve_vertical<B: Body + ?Sized>(body: &mut B, surfaces: &[Surface]) -> Contact {
    let hits = overlapping(body.bounds(), surfaces);
    let mut contact = Contact {
        hits: hits.len(),
        ..Contact::default()
    };

    for index in hits {
        let block = surfaces[index].bounds();
        let (_, delta_y) = body.velocity();

        if delta_y > 0.0 {
            body.bounds_mut().set_bottom(block.top());
            body.land();
            contact.snaps += 1;
            contact.landed = true;
        } else if delta_y < 0.0 {
            body.bounds_mut().set_top(block.bottom());
            body.stop_rising();
            contact.snaps += 1;
            contact.bumped_head = true;
        }
    }

    contact
}
