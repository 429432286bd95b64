//! Drag session and hover state.
//!
//! A pointer-down on an item arms a [`DragSession`]; the drag starts once the
//! pointer has travelled more than [`DRAG_THRESHOLD_PX`]. While dragging, the
//! session tracks the pointer (for the preview layer) and the container under
//! it. Dropping hands the payload back to the caller, which lets the
//! container under the pointer decide.

use fridgekit_core::{Entity, ItemId};
use fridgekit_inventory::{Item, Residence, Zone};

/// Distance the pointer must travel before a press turns into a drag.
pub const DRAG_THRESHOLD_PX: f32 = 5.0;

/// Offset of the hover detail popup from the pointer, on both axes.
pub const DETAIL_OFFSET_PX: f32 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    fn offset(&self, by: f32) -> Point {
        Point::new(self.x + by, self.y + by)
    }
}

/// What is being dragged.
///
/// `name` and `icon` only feed the preview; `id`, `category` and `source`
/// drive the drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload {
    pub id: ItemId,
    pub category: Option<Zone>,
    pub source: Residence,
    pub name: String,
    pub icon: &'static str,
}

impl DragPayload {
    /// Payload for an item held by `source`.
    ///
    /// Cart items report their food category, so they can go back onto a
    /// matching shelf.
    pub fn from_item(item: &Item, source: Residence) -> Self {
        Self {
            id: item.id().clone(),
            category: Some(Zone::from(item.category())),
            source,
            name: item.name().to_string(),
            icon: item.icon(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Phase {
    Idle,
    Pending { payload: DragPayload, origin: Point },
    Dragging { payload: DragPayload, pointer: Point },
}

/// Preview layer contents while dragging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragPreview<'a> {
    pub payload: &'a DragPayload,
    pub pointer: Point,
}

/// Hovered item and the pointer position that opened the detail popup.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverDetail {
    pub item: Item,
    pub pointer: Point,
}

impl HoverDetail {
    pub fn popup_position(&self) -> Point {
        self.pointer.offset(DETAIL_OFFSET_PX)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    phase: Phase,
    hovered_zone: Option<Zone>,
    hover: Option<HoverDetail>,
}

impl Default for DragSession {
    fn default() -> Self {
        Self::new()
    }
}

impl DragSession {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            hovered_zone: None,
            hover: None,
        }
    }

    /// Arm a drag for `payload`. Replaces any unfinished session.
    pub fn pointer_down(&mut self, payload: DragPayload, at: Point) {
        self.phase = Phase::Pending {
            payload,
            origin: at,
        };
        self.hovered_zone = None;
    }

    /// Track the pointer. Returns true when this move started the drag.
    pub fn pointer_move(&mut self, to: Point) -> bool {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Pending { payload, origin } if origin.distance(to) > DRAG_THRESHOLD_PX => {
                tracing::debug!(id = %payload.id, "drag started");
                self.phase = Phase::Dragging {
                    payload,
                    pointer: to,
                };
                self.hover = None;
                true
            }
            Phase::Dragging { payload, .. } => {
                self.phase = Phase::Dragging {
                    payload,
                    pointer: to,
                };
                false
            }
            other => {
                self.phase = other;
                false
            }
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging { .. })
    }

    /// The dragged payload, once the threshold has been crossed.
    pub fn payload(&self) -> Option<&DragPayload> {
        match &self.phase {
            Phase::Dragging { payload, .. } => Some(payload),
            _ => None,
        }
    }

    pub fn preview(&self) -> Option<DragPreview<'_>> {
        match &self.phase {
            Phase::Dragging { payload, pointer } => Some(DragPreview {
                payload,
                pointer: *pointer,
            }),
            _ => None,
        }
    }

    pub fn enter_zone(&mut self, zone: Zone) {
        self.hovered_zone = Some(zone);
    }

    /// Leave `zone`; a stale leave for a zone no longer hovered is ignored.
    pub fn leave_zone(&mut self, zone: Zone) {
        if self.hovered_zone == Some(zone) {
            self.hovered_zone = None;
        }
    }

    /// Container under the pointer, only while dragging.
    pub fn hovered_zone(&self) -> Option<Zone> {
        if self.is_dragging() {
            self.hovered_zone
        } else {
            None
        }
    }

    /// End the press. Returns the payload and the zone it was released over
    /// if a drag was in progress; a plain click returns `None`.
    pub fn finish(&mut self) -> Option<(DragPayload, Option<Zone>)> {
        let zone = self.hovered_zone.take();
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Dragging { payload, .. } => Some((payload, zone)),
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.phase = Phase::Idle;
        self.hovered_zone = None;
    }

    /// Show details for `item`. Ignored while dragging.
    pub fn hover_item(&mut self, item: &Item, pointer: Point) {
        if self.is_dragging() {
            return;
        }
        self.hover = Some(HoverDetail {
            item: item.clone(),
            pointer,
        });
    }

    pub fn leave_item(&mut self) {
        self.hover = None;
    }

    pub fn hover_detail(&self) -> Option<&HoverDetail> {
        self.hover.as_ref()
    }
}
