//! Field worker tracking: positions, routes and read-side statistics
//!
//! Distance accrues through the haversine formula from the previous fix.
//! Deltas under the configured noise floor are discarded before
//! accumulating. That policy lives here, for every recording path, so
//! periodic polling and continuous watch sources behave identically.

use std::sync::Arc;

use serde::Deserialize;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::geo::haversine_km;
use crate::store::{sequential_id, Store};
use shared::models::{FieldWorker, TaskStatus, WorkerStatistics, WorkerStatus};
use shared::types::{RouteArchive, RoutePoint};
use shared::validation;

/// Tracking service
#[derive(Clone)]
pub struct TrackingService {
    store: Arc<Store>,
    noise_floor_meters: f64,
}

/// Input for registering a field worker
#[derive(Debug, Deserialize)]
pub struct AddWorkerInput {
    pub name: String,
    pub sector: String,
}

impl TrackingService {
    /// Create a new TrackingService instance
    pub fn new(store: Arc<Store>, config: &Config) -> Self {
        Self {
            store,
            noise_floor_meters: config.tracking.noise_floor_meters,
        }
    }

    pub fn list(&self) -> Vec<FieldWorker> {
        self.store.workers().list()
    }

    pub fn get(&self, id: &str) -> Option<FieldWorker> {
        self.store.workers().get(id)
    }

    /// Register a worker with zeroed counters
    pub fn add_worker(&self, input: AddWorkerInput) -> AppResult<FieldWorker> {
        if input.name.trim().is_empty() {
            return Err(AppError::validation(
                "name",
                "Worker name cannot be empty",
                "O nome do peão não pode ser vazio",
            ));
        }

        let workers = self.store.workers();
        let worker = FieldWorker {
            id: sequential_id("P", workers.len()),
            name: input.name,
            sector: input.sector,
            status: WorkerStatus::Active,
            last_position: None,
            route: Vec::new(),
            incidents_today: 0,
            distance_km: 0.0,
            active_time_secs: 0,
            photos_captured: 0,
            audios_captured: 0,
            tasks_completed: 0,
            tasks_pending: 0,
        };
        workers.insert(worker.clone())?;

        tracing::info!(worker = %worker.id, sector = %worker.sector, "field worker registered");
        Ok(worker)
    }

    pub fn set_status(&self, worker_id: &str, status: WorkerStatus) -> AppResult<bool> {
        Ok(self
            .store
            .workers()
            .update_with(worker_id, |w| w.status = status)?)
    }

    /// Record a position fix for a worker
    ///
    /// - `full_route` replaces the live route wholesale (the continuous
    ///   watch path sends its own accumulated trace).
    /// - `close_out` archives the live route to the history log under the
    ///   worker and date, then restarts it with only `point`.
    /// - With neither, `point` is appended to the live route.
    ///
    /// Returns `Ok(false)` when the worker does not exist.
    pub fn record_position(
        &self,
        worker_id: &str,
        point: RoutePoint,
        full_route: Option<Vec<RoutePoint>>,
        close_out: bool,
    ) -> AppResult<bool> {
        if let Err(message) = validation::validate_coordinates(point.lat, point.lng) {
            return Err(AppError::validation(
                "point",
                message,
                "Coordenadas inválidas",
            ));
        }

        let noise_floor_km = self.noise_floor_meters / 1000.0;
        let mut archived = None;

        let updated = self.store.workers().update_with(worker_id, |worker| {
            if let Some(last) = worker.last_position {
                let delta_km = haversine_km(last.position(), point.position());
                if delta_km >= noise_floor_km {
                    worker.distance_km += delta_km;
                }
                let elapsed = (point.timestamp - last.timestamp).num_seconds();
                if elapsed > 0 {
                    worker.active_time_secs += elapsed;
                }
            }

            match (full_route, close_out) {
                (Some(_), true) => {
                    archived = Some(RouteArchive {
                        worker_id: worker.id.clone(),
                        date: point.timestamp,
                        route: std::mem::take(&mut worker.route),
                    });
                    worker.route = vec![point];
                }
                (Some(route), false) => worker.route = route,
                (None, _) => worker.route.push(point),
            }

            worker.last_position = Some(point);
        })?;

        if !updated {
            return Ok(false);
        }
        if let Some(archive) = archived {
            self.store.append_route_archive(archive)?;
            tracing::info!(worker = %worker_id, "route closed out and archived");
        }
        Ok(true)
    }

    /// Archived routes for a worker, oldest first
    pub fn route_history(&self, worker_id: &str) -> Vec<RouteArchive> {
        self.store.route_history_for(worker_id)
    }

    /// Read-side aggregation across workers, incidents and tasks
    ///
    /// Distance and active time come from the incrementally accumulated
    /// counters on the worker record; incident and task counts are computed
    /// live from their repositories.
    pub fn statistics(&self, worker_id: &str) -> Option<WorkerStatistics> {
        let worker = self.store.workers().get(worker_id)?;

        let incidents_reported = self
            .store
            .incidents()
            .count(|i| i.worker_id.as_deref() == Some(worker_id));
        let tasks_completed = self.store.tasks().count(|t| {
            t.worker_id.as_deref() == Some(worker_id) && t.status == TaskStatus::Done
        });

        Some(WorkerStatistics {
            worker_id: worker.id,
            total_distance_km: worker.distance_km,
            active_time_secs: worker.active_time_secs,
            incidents_reported,
            tasks_completed,
        })
    }
}
