//! Popover arena: explicit open/close state for every menu and submenu.
//!
//! Each popover lives in a slot addressed by a [`PopoverId`]. Triggers and
//! content hold the id instead of looking state up from an ambient context.
//!
//! Lifecycle per popover: closed -> open (anchor captured, first-pass
//! placement computed) -> measured (refined placement) -> closed. Every open
//! issues a [`MeasureTicket`]; a measurement arriving with a ticket from an
//! earlier open, or after the popover closed, is dropped.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PlacementConfig;
use crate::error::PopoverError;
use crate::placement::{ContentSize, Placement, PlacementRequest, Side, resolve};
use crate::primitives::{Point, Rect, Size};

/// Handle to a popover in a [`PopoverArena`].
///
/// The generation changes when a slot is reused, so handles to removed
/// popovers never alias new ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PopoverId {
    index: u32,
    generation: u32,
}

impl PopoverId {
    pub const fn index(&self) -> u32 {
        self.index
    }
}

impl fmt::Display for PopoverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "popover#{}.{}", self.index, self.generation)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PopoverKind {
    Menu,
    Submenu,
}

impl PopoverKind {
    /// Menus drop down, submenus open to the right.
    pub fn default_side(self) -> Side {
        match self {
            PopoverKind::Menu => Side::Below,
            PopoverKind::Submenu => Side::Right,
        }
    }
}

/// Why a popover is being closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    /// Tap on the backdrop outside the content.
    OutsideTap,
    /// An item was chosen; the whole menu chain closes.
    ItemSelected,
    /// Escape key or hardware back.
    Escape,
}

/// Proof that a measurement belongs to a specific open of a popover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasureTicket {
    id: PopoverId,
    epoch: u64,
}

impl MeasureTicket {
    pub fn id(&self) -> PopoverId {
        self.id
    }
}

/// Result of feeding a content measurement back into the arena.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeasureOutcome {
    /// Placement refined; `shift` is how far the content origin moved.
    Applied { placement: Placement, shift: Point },
    /// The popover closed, reopened or was removed since the ticket was issued.
    Stale,
}

#[derive(Debug, Clone, Copy)]
struct OpenState {
    anchor: Rect,
    content: ContentSize,
    placement: Placement,
    epoch: u64,
}

#[derive(Debug, Clone)]
struct Popover {
    kind: PopoverKind,
    preferred: Side,
    parent: Option<PopoverId>,
    open: Option<OpenState>,
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    popover: Option<Popover>,
}

/// Owns every popover of one window.
#[derive(Debug)]
pub struct PopoverArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    viewport: Size,
    config: PlacementConfig,
    next_epoch: u64,
}

impl PopoverArena {
    pub fn new(viewport: Size, config: PlacementConfig) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            viewport,
            config,
            next_epoch: 0,
        }
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Number of live popovers (open or closed).
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.popover.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // =====================================================================
    // Creation / removal
    // =====================================================================

    /// Register a top-level dropdown menu.
    pub fn create_menu(&mut self) -> PopoverId {
        self.insert(Popover {
            kind: PopoverKind::Menu,
            preferred: PopoverKind::Menu.default_side(),
            parent: None,
            open: None,
        })
    }

    /// Register a submenu nested in `parent`.
    pub fn create_submenu(&mut self, parent: PopoverId) -> Result<PopoverId, PopoverError> {
        self.get(parent)?;
        Ok(self.insert(Popover {
            kind: PopoverKind::Submenu,
            preferred: PopoverKind::Submenu.default_side(),
            parent: Some(parent),
            open: None,
        }))
    }

    /// Override the side a popover tries first.
    pub fn set_preferred_side(&mut self, id: PopoverId, side: Side) -> Result<(), PopoverError> {
        self.get_mut(id)?.preferred = side;
        Ok(())
    }

    /// Unmount a popover and everything nested in it.
    pub fn remove(&mut self, id: PopoverId) -> Result<(), PopoverError> {
        self.get(id)?;
        for child in self.children(id) {
            self.remove(child)?;
        }
        let slot = &mut self.slots[id.index as usize];
        slot.popover = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        debug!(%id, "popover removed");
        Ok(())
    }

    fn insert(&mut self, popover: Popover) -> PopoverId {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot::default());
                (self.slots.len() - 1) as u32
            }
        };
        let slot = &mut self.slots[index as usize];
        slot.popover = Some(popover);
        PopoverId { index, generation: slot.generation }
    }

    // =====================================================================
    // State transitions
    // =====================================================================

    /// Open with an unknown content size.
    pub fn open(&mut self, id: PopoverId, anchor: Rect) -> Result<MeasureTicket, PopoverError> {
        self.open_with(id, anchor, ContentSize::Unknown)
    }

    /// Open with a guessed content size for a better first pass.
    pub fn open_with_estimate(
        &mut self,
        id: PopoverId,
        anchor: Rect,
        estimate: Size,
    ) -> Result<MeasureTicket, PopoverError> {
        self.open_with(id, anchor, ContentSize::Estimated(estimate))
    }

    fn open_with(
        &mut self,
        id: PopoverId,
        anchor: Rect,
        content: ContentSize,
    ) -> Result<MeasureTicket, PopoverError> {
        let parent = self.get(id)?.parent;

        if let Some(parent) = parent {
            if !self.is_open(parent) {
                return Err(PopoverError::ParentNotOpen { parent, child: id });
            }
            // Only one submenu per level is open at a time.
            for sibling in self.children(parent) {
                if sibling != id && self.is_open(sibling) {
                    self.close_tree(sibling);
                }
            }
        }

        // Nested popovers were anchored on the previous panel.
        for child in self.children(id) {
            self.close_tree(child);
        }

        let epoch = self.next_epoch;
        self.next_epoch += 1;

        let request = PlacementRequest::new(anchor, content, self.viewport, self.get(id)?.preferred);
        let placement = resolve(&request, &self.config);

        self.get_mut(id)?.open = Some(OpenState { anchor, content, placement, epoch });
        debug!(%id, ?anchor, side = ?placement.side, epoch, "popover opened");

        Ok(MeasureTicket { id, epoch })
    }

    /// Apply the content size the host measured after laying the content out.
    ///
    /// Returns [`MeasureOutcome::Stale`] without touching any state if the
    /// ticket no longer matches the popover's current open.
    pub fn content_measured(
        &mut self,
        ticket: MeasureTicket,
        size: Size,
    ) -> Result<MeasureOutcome, PopoverError> {
        let viewport = self.viewport;
        let config = self.config;

        let Ok(popover) = self.get_mut(ticket.id) else {
            debug!(id = %ticket.id, "measurement for removed popover dropped");
            return Ok(MeasureOutcome::Stale);
        };
        let preferred = popover.preferred;
        let Some(open) = popover.open.as_mut().filter(|o| o.epoch == ticket.epoch) else {
            debug!(id = %ticket.id, epoch = ticket.epoch, "stale measurement dropped");
            return Ok(MeasureOutcome::Stale);
        };

        open.content = ContentSize::Measured(size);
        let request = PlacementRequest::new(open.anchor, open.content, viewport, preferred);
        let placement = resolve(&request, &config);
        let shift = placement.shift_from(&open.placement);
        open.placement = placement;

        debug!(id = %ticket.id, ?shift, side = ?placement.side, "popover measured");
        Ok(MeasureOutcome::Applied { placement, shift })
    }

    /// Close a popover and every open popover nested in it. Returns the ids
    /// that actually transitioned to closed.
    ///
    /// `ItemSelected` closes the whole chain up to the root menu.
    pub fn close(&mut self, id: PopoverId, reason: DismissReason) -> Result<Vec<PopoverId>, PopoverError> {
        self.get(id)?;
        let target = match reason {
            DismissReason::ItemSelected => self.root_of(id),
            DismissReason::OutsideTap | DismissReason::Escape => id,
        };
        let closed = self.close_tree(target);
        if !closed.is_empty() {
            debug!(%target, ?reason, count = closed.len(), "popovers closed");
        }
        Ok(closed)
    }

    fn close_tree(&mut self, id: PopoverId) -> Vec<PopoverId> {
        let mut closed = Vec::new();
        for child in self.children(id) {
            closed.extend(self.close_tree(child));
        }
        if let Ok(popover) = self.get_mut(id) {
            if popover.open.take().is_some() {
                closed.push(id);
            }
        }
        closed
    }

    /// Re-run placement for every open popover after a rotation or resize.
    pub fn set_viewport(&mut self, viewport: Size) -> Vec<(PopoverId, Placement)> {
        self.viewport = viewport;
        let config = self.config;
        let mut updated = Vec::new();

        for (index, slot) in self.slots.iter_mut().enumerate() {
            let generation = slot.generation;
            let Some(popover) = slot.popover.as_mut() else { continue };
            let Some(open) = popover.open.as_mut() else { continue };
            let request = PlacementRequest::new(open.anchor, open.content, viewport, popover.preferred);
            open.placement = resolve(&request, &config);
            updated.push((PopoverId { index: index as u32, generation }, open.placement));
        }

        debug!(?viewport, count = updated.len(), "viewport changed");
        updated
    }

    // =====================================================================
    // Queries
    // =====================================================================

    pub fn contains(&self, id: PopoverId) -> bool {
        self.get(id).is_ok()
    }

    pub fn is_open(&self, id: PopoverId) -> bool {
        self.get(id).is_ok_and(|p| p.open.is_some())
    }

    pub fn kind(&self, id: PopoverId) -> Option<PopoverKind> {
        self.get(id).ok().map(|p| p.kind)
    }

    pub fn parent(&self, id: PopoverId) -> Option<PopoverId> {
        self.get(id).ok().and_then(|p| p.parent)
    }

    pub fn placement(&self, id: PopoverId) -> Option<Placement> {
        self.get(id).ok().and_then(|p| p.open.map(|o| o.placement))
    }

    pub fn anchor(&self, id: PopoverId) -> Option<Rect> {
        self.get(id).ok().and_then(|p| p.open.map(|o| o.anchor))
    }

    /// Open popovers in slot order.
    pub fn open_popovers(&self) -> Vec<PopoverId> {
        self.ids().filter(|id| self.is_open(*id)).collect()
    }

    fn ids(&self) -> impl Iterator<Item = PopoverId> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.popover.as_ref().map(|_| PopoverId { index: index as u32, generation: slot.generation })
        })
    }

    fn children(&self, parent: PopoverId) -> Vec<PopoverId> {
        self.ids().filter(|id| self.parent(*id) == Some(parent)).collect()
    }

    fn root_of(&self, mut id: PopoverId) -> PopoverId {
        while let Some(parent) = self.parent(id) {
            id = parent;
        }
        id
    }

    fn get(&self, id: PopoverId) -> Result<&Popover, PopoverError> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.popover.as_ref())
            .ok_or(PopoverError::UnknownPopover(id))
    }

    fn get_mut(&mut self, id: PopoverId) -> Result<&mut Popover, PopoverError> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.popover.as_mut())
            .ok_or(PopoverError::UnknownPopover(id))
    }
}
