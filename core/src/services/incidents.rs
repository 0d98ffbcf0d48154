//! Incident reporting operations

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::store::{sequential_id, Store};
use shared::models::{Incident, IncidentStatus};
use shared::types::GeoPoint;
use shared::validation;

/// Incident service
#[derive(Clone)]
pub struct IncidentService {
    store: Arc<Store>,
}

/// Input for reporting an incident
#[derive(Debug, Deserialize)]
pub struct ReportIncidentInput {
    pub kind: String,
    pub description: String,
    pub location: Option<GeoPoint>,
    pub audio: Option<String>,
    pub photo: Option<String>,
    pub worker_id: Option<String>,
}

impl IncidentService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<Incident> {
        self.store.incidents().list()
    }

    pub fn get(&self, id: &str) -> Option<Incident> {
        self.store.incidents().get(id)
    }

    pub fn by_worker(&self, worker_id: &str) -> Vec<Incident> {
        self.store
            .incidents()
            .find(|i| i.worker_id.as_deref() == Some(worker_id))
    }

    /// Report an incident and bump the reporting worker's daily counter
    ///
    /// The counter bump is a second collection write; an interruption
    /// between the two leaves the incident without the bump.
    pub fn report(&self, input: ReportIncidentInput) -> AppResult<Incident> {
        if input.kind.trim().is_empty() {
            return Err(AppError::validation(
                "kind",
                "Incident type cannot be empty",
                "O tipo da ocorrência não pode ser vazio",
            ));
        }
        if input.description.trim().is_empty() {
            return Err(AppError::validation(
                "description",
                "Incident description cannot be empty",
                "A descrição da ocorrência não pode ser vazia",
            ));
        }
        if let Some(location) = &input.location {
            if let Err(message) = validation::validate_coordinates(location.lat, location.lng) {
                return Err(AppError::validation(
                    "location",
                    message,
                    "Coordenadas inválidas",
                ));
            }
        }

        let incidents = self.store.incidents();
        let worker_name = input
            .worker_id
            .as_deref()
            .and_then(|id| self.store.workers().get(id))
            .map(|w| w.name);

        let incident = Incident {
            id: sequential_id("OC", incidents.len()),
            kind: input.kind,
            description: input.description,
            reported_at: Utc::now(),
            status: IncidentStatus::Pending,
            location: input.location,
            audio: input.audio,
            photo: input.photo,
            worker_id: input.worker_id,
            worker_name,
        };
        incidents.insert(incident.clone())?;

        if let Some(worker_id) = &incident.worker_id {
            self.store
                .workers()
                .update_with(worker_id, |w| w.incidents_today += 1)?;
        }

        tracing::info!(incident = %incident.id, kind = %incident.kind, "incident reported");
        Ok(incident)
    }

    /// Replace the stored record; no-op `false` when the id is absent
    pub fn update(&self, incident: Incident) -> AppResult<bool> {
        Ok(self.store.incidents().replace(incident)?)
    }
}
