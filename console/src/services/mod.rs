//! Module for the client-side view logic shared by the screens.
//!
//! This module encapsulates the pure functions that mirror backend rules for
//! display purposes (approval eligibility, punch eligibility), derive
//! display-only aggregates such as the daily attendance summary, and handle
//! the attachment transport format.

pub mod approval;
pub mod attachments;
pub mod attendance;
pub mod validation;
