// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::dates::format_event_date;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::Date;

/// One of the three staff positions on an event.
///
/// Slots fill in order: `First` before `Second` before `Third`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slot {
    /// The first staff position.
    First,
    /// The second staff position.
    Second,
    /// The third staff position.
    Third,
}

impl Slot {
    /// Converts this slot to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::First => "staff1",
            Self::Second => "staff2",
            Self::Third => "staff3",
        }
    }
}

/// Represents a calendar event.
///
/// Exactly one event may exist per calendar date. An event is requested by
/// a single customer identity and carries up to three optional staff slot
/// references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Canonical internal identifier (opaque, stable, immutable).
    /// Optional to support creation before persistence.
    pub event_id: Option<i64>,
    /// The calendar day this event occupies (unique across all events).
    pub date: Date,
    /// The event name (free text, non-empty).
    pub name: String,
    /// The `user_id` of the requesting customer.
    pub requestor_id: i64,
    /// The first staff slot, if filled.
    pub staff1_id: Option<i64>,
    /// The second staff slot, if filled.
    pub staff2_id: Option<i64>,
    /// The third staff slot, if filled.
    pub staff3_id: Option<i64>,
}

impl Event {
    /// Creates a new `Event` with all staff slots empty and no persisted
    /// `event_id`.
    #[must_use]
    pub const fn new(date: Date, name: String, requestor_id: i64) -> Self {
        Self {
            event_id: None,
            date,
            name,
            requestor_id,
            staff1_id: None,
            staff2_id: None,
            staff3_id: None,
        }
    }

    /// Creates an `Event` with an existing `event_id` (from persistence).
    #[must_use]
    pub const fn with_id(
        event_id: i64,
        date: Date,
        name: String,
        requestor_id: i64,
        staff1_id: Option<i64>,
        staff2_id: Option<i64>,
        staff3_id: Option<i64>,
    ) -> Self {
        Self {
            event_id: Some(event_id),
            date,
            name,
            requestor_id,
            staff1_id,
            staff2_id,
            staff3_id,
        }
    }

    /// Returns the occupant of the given slot, if any.
    #[must_use]
    pub const fn slot(&self, slot: Slot) -> Option<i64> {
        match slot {
            Slot::First => self.staff1_id,
            Slot::Second => self.staff2_id,
            Slot::Third => self.staff3_id,
        }
    }

    /// Returns whether the given staff identity occupies any slot on this
    /// event.
    #[must_use]
    pub fn occupies_slot(&self, user_id: i64) -> bool {
        [self.staff1_id, self.staff2_id, self.staff3_id]
            .iter()
            .any(|slot| *slot == Some(user_id))
    }

    /// Returns the first empty slot in fill order, or `None` if the event
    /// is full.
    #[must_use]
    pub const fn first_open_slot(&self) -> Option<Slot> {
        if self.staff1_id.is_none() {
            Some(Slot::First)
        } else if self.staff2_id.is_none() {
            Some(Slot::Second)
        } else if self.staff3_id.is_none() {
            Some(Slot::Third)
        } else {
            None
        }
    }

    /// Returns whether all three staff slots are occupied.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.staff1_id.is_some() && self.staff2_id.is_some() && self.staff3_id.is_some()
    }

    /// Returns whether the event has no staff assigned at all.
    ///
    /// Understaffed events feed the owner's warning view.
    #[must_use]
    pub const fn is_understaffed(&self) -> bool {
        self.staff1_id.is_none() && self.staff2_id.is_none() && self.staff3_id.is_none()
    }

    /// Returns whether this event is upcoming relative to `as_of`.
    ///
    /// The boundary includes `as_of` itself and excludes every earlier day.
    #[must_use]
    pub fn is_upcoming(&self, as_of: Date) -> bool {
        self.date >= as_of
    }

    /// Assigns the given staff identity to the first empty slot.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AlreadySignedUp` if the identity already
    /// occupies a slot on this event, or `DomainError::EventFull` if all
    /// three slots are occupied. A full event is never overwritten.
    pub fn assign_staff(&mut self, user_id: i64) -> Result<Slot, DomainError> {
        if self.occupies_slot(user_id) {
            return Err(DomainError::AlreadySignedUp {
                name: self.name.clone(),
                date: format_event_date(self.date),
            });
        }

        let slot: Slot = self.first_open_slot().ok_or_else(|| DomainError::EventFull {
            name: self.name.clone(),
            date: format_event_date(self.date),
        })?;

        match slot {
            Slot::First => self.staff1_id = Some(user_id),
            Slot::Second => self.staff2_id = Some(user_id),
            Slot::Third => self.staff3_id = Some(user_id),
        }

        Ok(slot)
    }
}
