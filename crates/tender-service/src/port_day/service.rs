//! Port day lifecycle on top of the `portDays` collection.

use std::cmp::Reverse;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use tender_core::error::AppError;
use tender_core::types::PortDayId;
use tender_database::repositories::PortDayRepository;
use tender_entity::port_day::PortDay;

use super::input::{PortDayFields, PortDayInput, check_confirmation};
use super::resolver::resolve_active;

/// Creates, edits, ends, and resolves port days.
#[derive(Debug, Clone)]
pub struct PortDayService {
    repo: Arc<dyn PortDayRepository>,
}

impl PortDayService {
    /// Creates a new port day service.
    pub fn new(repo: Arc<dyn PortDayRepository>) -> Self {
        Self { repo }
    }

    /// The port day in effect, repairing duplicate active flags on the way.
    pub async fn active_port_day(&self) -> Result<Option<PortDay>, AppError> {
        let all = self.repo.find_all().await?;
        let resolution = resolve_active(&all);
        if !resolution.deactivate.is_empty() {
            warn!(
                count = resolution.deactivate.len(),
                kept = ?resolution.active.as_ref().map(|d| d.id),
                "Multiple active port days found; deactivating older ones"
            );
            self.repo.deactivate(&resolution.deactivate).await?;
        }
        Ok(resolution.active)
    }

    /// Every port day, most recent first.
    pub async fn list(&self) -> Result<Vec<PortDay>, AppError> {
        let mut all = self.repo.find_all().await?;
        all.sort_by_key(|d| Reverse((d.start_date, d.id)));
        Ok(all)
    }

    /// Start a new port day, switching off every other one.
    pub async fn create(&self, input: &PortDayInput, confirmation: &str) -> Result<PortDay, AppError> {
        check_confirmation(confirmation)?;
        let fields = input.validate()?;

        let mut port_day = PortDay {
            id: PortDayId::new(),
            name: String::new(),
            is_active: true,
            start_date: Utc::now(),
            pier_location: None,
            avg_time: None,
            last_tender_time: None,
            timezone: None,
        };
        apply(&mut port_day, fields);

        let deactivated = self.repo.create_active(&port_day).await?;
        info!(
            port_day_id = %port_day.id,
            name = %port_day.name,
            timezone = ?port_day.timezone.map(|t| t.to_string()),
            deactivated,
            "Port day created"
        );
        Ok(port_day)
    }

    /// Update the details of a port day without changing whether it is active.
    pub async fn edit(&self, id: PortDayId, input: &PortDayInput) -> Result<PortDay, AppError> {
        let fields = input.validate()?;
        let mut port_day = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Port day not found"))?;
        apply(&mut port_day, fields);

        if !self.repo.update_details(&port_day).await? {
            return Err(AppError::not_found("Port day not found"));
        }
        info!(port_day_id = %id, "Port day updated");
        Ok(port_day)
    }

    /// End a port day by removing it.
    pub async fn end(&self, id: PortDayId) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(AppError::not_found("Port day not found"));
        }
        info!(port_day_id = %id, "Port day ended");
        Ok(())
    }
}

fn apply(port_day: &mut PortDay, fields: PortDayFields) {
    port_day.name = fields.name;
    port_day.pier_location = Some(fields.pier_location);
    port_day.avg_time = Some(fields.avg_time);
    port_day.last_tender_time = fields.last_tender_time;
    port_day.timezone = Some(fields.timezone);
}
