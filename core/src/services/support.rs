//! Support ticket operations

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::store::{sequential_id, Store};
use shared::models::{SupportTicket, TicketPriority, TicketStatus};

/// Support ticket service
#[derive(Clone)]
pub struct SupportService {
    store: Arc<Store>,
}

/// Input for opening a ticket
#[derive(Debug, Deserialize)]
pub struct OpenTicketInput {
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub priority: TicketPriority,
}

impl SupportService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<SupportTicket> {
        self.store.tickets().list()
    }

    pub fn get(&self, id: &str) -> Option<SupportTicket> {
        self.store.tickets().get(id)
    }

    pub fn by_user(&self, user_id: &str) -> Vec<SupportTicket> {
        self.store.tickets().find(|t| t.user_id == user_id)
    }

    /// Open a ticket with zeroed time and cost counters
    pub fn open(&self, input: OpenTicketInput) -> AppResult<SupportTicket> {
        if input.title.trim().is_empty() {
            return Err(AppError::validation(
                "title",
                "Ticket title cannot be empty",
                "O título do chamado não pode ser vazio",
            ));
        }

        let tickets = self.store.tickets();
        let ticket = SupportTicket {
            id: sequential_id("TIC", tickets.len()),
            user_id: input.user_id,
            title: input.title,
            description: input.description,
            status: TicketStatus::Open,
            priority: input.priority,
            created_at: Utc::now(),
            closed_at: None,
            hours_spent: Decimal::ZERO,
            cost: Decimal::ZERO,
        };
        tickets.insert(ticket.clone())?;

        tracing::info!(ticket = %ticket.id, user = %ticket.user_id, "ticket opened");
        Ok(ticket)
    }

    /// Replace the stored record; no-op `false` when the id is absent
    pub fn update(&self, ticket: SupportTicket) -> AppResult<bool> {
        Ok(self.store.tickets().replace(ticket)?)
    }

    /// Close a ticket, stamping `closed_at`
    pub fn close(&self, id: &str) -> AppResult<bool> {
        Ok(self.store.tickets().update_with(id, |t| {
            t.status = TicketStatus::Closed;
            t.closed_at = Some(Utc::now());
        })?)
    }
}
