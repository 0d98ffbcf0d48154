//! Captured media operations
//!
//! Audio clips and photos are held inline as base64 payloads, the way the
//! client-local store keeps them. Capture requires an authenticated
//! session: the session's user becomes `created_by`.

use std::sync::Arc;

use anyhow::anyhow;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::Utc;
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};
use crate::services::auth::Session;
use crate::store::{sequential_id, Store};
use shared::models::{MediaKind, StoredFile};
use shared::types::GeoPoint;
use shared::validation;

/// Media service
#[derive(Clone)]
pub struct MediaService {
    store: Arc<Store>,
}

/// Input for saving a captured file
#[derive(Debug)]
pub struct SaveFileInput {
    pub kind: MediaKind,
    /// Raw capture bytes; stored base64-encoded
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime_type: String,
    pub worker_id: Option<String>,
    pub farm_id: Option<String>,
    pub incident_id: Option<String>,
    pub animal_id: Option<String>,
    pub location: Option<GeoPoint>,
    pub metadata: Map<String, Value>,
}

impl MediaService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<StoredFile> {
        self.store.files().list()
    }

    pub fn get(&self, id: &str) -> Option<StoredFile> {
        self.store.files().get(id)
    }

    pub fn by_kind(&self, kind: MediaKind) -> Vec<StoredFile> {
        self.store.files().find(|f| f.kind == kind)
    }

    pub fn by_worker(&self, worker_id: &str) -> Vec<StoredFile> {
        self.store
            .files()
            .find(|f| f.worker_id.as_deref() == Some(worker_id))
    }

    pub fn by_farm(&self, farm_id: &str) -> Vec<StoredFile> {
        self.store
            .files()
            .find(|f| f.farm_id.as_deref() == Some(farm_id))
    }

    pub fn by_incident(&self, incident_id: &str) -> Vec<StoredFile> {
        self.store
            .files()
            .find(|f| f.incident_id.as_deref() == Some(incident_id))
    }

    pub fn by_animal(&self, animal_id: &str) -> Vec<StoredFile> {
        self.store
            .files()
            .find(|f| f.animal_id.as_deref() == Some(animal_id))
    }

    /// Store a captured file and bump the capturing worker's counters
    pub fn save(&self, session: &Session, input: SaveFileInput) -> AppResult<StoredFile> {
        if input.file_name.trim().is_empty() {
            return Err(AppError::validation(
                "file_name",
                "File name cannot be empty",
                "O nome do arquivo não pode ser vazio",
            ));
        }
        if input.bytes.is_empty() {
            return Err(AppError::validation(
                "bytes",
                "File payload cannot be empty",
                "O conteúdo do arquivo não pode ser vazio",
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

        let files = self.store.files();
        let file = StoredFile {
            id: sequential_id("F", files.len()),
            kind: input.kind,
            data: BASE64.encode(&input.bytes),
            file_name: input.file_name,
            mime_type: input.mime_type,
            created_at: Utc::now(),
            created_by: session.user.id.clone(),
            worker_id: input.worker_id,
            farm_id: input.farm_id,
            incident_id: input.incident_id,
            animal_id: input.animal_id,
            location: input.location,
            metadata: input.metadata,
        };
        files.insert(file.clone())?;

        if let Some(worker_id) = &file.worker_id {
            self.store
                .workers()
                .update_with(worker_id, |w| match file.kind {
                    MediaKind::Photo => w.photos_captured += 1,
                    MediaKind::Audio => w.audios_captured += 1,
                })?;
        }

        tracing::info!(file = %file.id, kind = ?file.kind, by = %file.created_by, "file stored");
        Ok(file)
    }

    /// Decode a file's payload back to raw bytes
    pub fn payload(&self, file: &StoredFile) -> AppResult<Vec<u8>> {
        BASE64
            .decode(&file.data)
            .map_err(|e| AppError::Internal(anyhow!("corrupt base64 payload: {e}")))
    }

    /// Attach a file to an incident after the fact
    pub fn link_to_incident(&self, file_id: &str, incident_id: &str) -> AppResult<bool> {
        Ok(self.store.files().update_with(file_id, |f| {
            f.incident_id = Some(incident_id.to_string());
        })?)
    }

    /// Attach a file to an animal after the fact
    pub fn link_to_animal(&self, file_id: &str, animal_id: &str) -> AppResult<bool> {
        Ok(self.store.files().update_with(file_id, |f| {
            f.animal_id = Some(animal_id.to_string());
        })?)
    }

    /// Merge keys into a file's metadata map
    pub fn update_metadata(
        &self,
        file_id: &str,
        metadata: Map<String, Value>,
    ) -> AppResult<bool> {
        Ok(self.store.files().update_with(file_id, |f| {
            f.metadata.extend(metadata);
        })?)
    }

    pub fn delete(&self, file_id: &str) -> AppResult<bool> {
        Ok(self.store.files().remove(file_id)?)
    }
}
