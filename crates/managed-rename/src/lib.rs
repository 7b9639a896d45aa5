//! The Renamer: a scope-keyed naming authority with collision resolution
//! (spec.md §4.3). Name Reservation and every phase downstream of it
//! read names from here; nobody recomputes a name once Shape has handed
//! off to Name Reservation.

pub mod renamer;
pub mod reserved;
pub mod scope;
pub mod style;

pub use renamer::{Kind, RenameDecision, Renamer, ReservationRequest};
pub use scope::{NamespaceVisibility, ScopeKey, Staticness};
