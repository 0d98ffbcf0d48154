//! Supply inventory operations

use std::sync::Arc;

use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::store::{sequential_id, Store};
use shared::models::{Supply, Urgency};

/// Supply service
#[derive(Clone)]
pub struct SupplyService {
    store: Arc<Store>,
}

/// Input for registering a supply
#[derive(Debug, Deserialize)]
pub struct AddSupplyInput {
    pub name: String,
    pub quantity: u32,
    pub unit: String,
    pub urgency: Urgency,
}

impl SupplyService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<Supply> {
        self.store.supplies().list()
    }

    pub fn get(&self, id: &str) -> Option<Supply> {
        self.store.supplies().get(id)
    }

    pub fn add(&self, input: AddSupplyInput) -> AppResult<Supply> {
        if input.name.trim().is_empty() {
            return Err(AppError::validation(
                "name",
                "Supply name cannot be empty",
                "O nome do suprimento não pode ser vazio",
            ));
        }

        let supplies = self.store.supplies();
        let supply = Supply {
            id: sequential_id("S", supplies.len()),
            name: input.name,
            quantity: input.quantity,
            unit: input.unit,
            urgency: input.urgency,
        };
        supplies.insert(supply.clone())?;
        Ok(supply)
    }

    /// Replace the stored record; no-op `false` when the id is absent
    pub fn update(&self, supply: Supply) -> AppResult<bool> {
        Ok(self.store.supplies().replace(supply)?)
    }
}
