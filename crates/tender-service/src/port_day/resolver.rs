//! Picks the single active port day out of whatever the store holds.

use std::cmp::Reverse;

use tender_core::types::PortDayId;
use tender_entity::port_day::PortDay;

/// Outcome of [`resolve_active`].
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// The port day in effect, if any.
    pub active: Option<PortDay>,
    /// Records still flagged active that must be switched off.
    pub deactivate: Vec<PortDayId>,
}

/// Choose the active port day.
///
/// When more than one record claims to be active, the one with the latest
/// `start_date` wins (ties go to the greatest id) and every other claimant is
/// returned for deactivation.
pub fn resolve_active(port_days: &[PortDay]) -> Resolution {
    let mut actives: Vec<&PortDay> = port_days.iter().filter(|d| d.is_active).collect();
    actives.sort_by_key(|d| Reverse((d.start_date, d.id)));

    let mut actives = actives.into_iter();
    let active = actives.next().cloned();
    let deactivate = actives.map(|d| d.id).collect();
    Resolution { active, deactivate }
}
