use serde::{Deserialize, Serialize};

/// Extracted details for a single staff member
///
/// Each field is `None` when the page carried no matching markup. A field
/// whose markup matched but held only whitespace stays `Some` with an empty
/// string, so "not found" and "found but blank" remain distinguishable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffRecord {
    /// Full name from the page heading
    pub name: Option<String>,

    /// Room designation (if listed)
    pub room: Option<String>,

    /// Office-hours text (if listed)
    pub office_hours: Option<String>,
}

impl StaffRecord {
    /// Create a new record with the given fields
    pub fn new(name: Option<String>, room: Option<String>, office_hours: Option<String>) -> Self {
        Self {
            name,
            room,
            office_hours,
        }
    }

    /// A record with every field absent
    ///
    /// Used when a detail page could not be fetched at all.
    pub fn absent() -> Self {
        Self {
            name: None,
            room: None,
            office_hours: None,
        }
    }

    /// Returns true when no field was extracted
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.room.is_none() && self.office_hours.is_none()
    }
}

/// A record paired with the position of its originating link
///
/// `index` is the zero-based position of the link in the discovery result,
/// so consumers can restore listing order even when fetches complete out of
/// order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordEvent {
    /// Position of the link in the discovery result
    pub index: usize,

    /// Detail page URL the record came from
    pub url: String,

    /// Extracted fields
    pub record: StaffRecord,
}
