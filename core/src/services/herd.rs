//! Herd management operations

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::store::{sequential_id, Store};
use shared::models::{Animal, AnimalKind};
use shared::types::StatusFlag;

/// Herd service
#[derive(Clone)]
pub struct HerdService {
    store: Arc<Store>,
}

/// Input for registering an animal
#[derive(Debug, Deserialize)]
pub struct AddAnimalInput {
    pub kind: AnimalKind,
    pub name: String,
    pub age: String,
    pub status: String,
    pub status_flag: StatusFlag,
    pub last_event: String,
    pub photo: Option<String>,
    pub notes: Option<String>,
}

impl HerdService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<Animal> {
        self.store.animals().list()
    }

    pub fn by_kind(&self, kind: AnimalKind) -> Vec<Animal> {
        self.store.animals().find(|a| a.kind == kind)
    }

    pub fn get(&self, id: &str) -> Option<Animal> {
        self.store.animals().get(id)
    }

    /// Register an animal; ids are sequential within each kind (V/T/B)
    pub fn add(&self, input: AddAnimalInput) -> AppResult<Animal> {
        if input.name.trim().is_empty() {
            return Err(AppError::validation(
                "name",
                "Animal name cannot be empty",
                "O nome do animal não pode ser vazio",
            ));
        }

        let animals = self.store.animals();
        let in_kind = animals.count(|a| a.kind == input.kind);
        let animal = Animal {
            id: sequential_id(input.kind.id_prefix(), in_kind),
            kind: input.kind,
            name: input.name,
            age: input.age,
            status: input.status,
            status_flag: input.status_flag,
            last_event: input.last_event,
            registered_at: Utc::now(),
            photo: input.photo,
            notes: input.notes,
        };
        animals.insert(animal.clone())?;

        tracing::info!(animal = %animal.id, kind = %animal.kind, "animal registered");
        Ok(animal)
    }

    /// Replace the stored record; no-op `false` when the id is absent
    pub fn update(&self, animal: Animal) -> AppResult<bool> {
        Ok(self.store.animals().replace(animal)?)
    }
}
