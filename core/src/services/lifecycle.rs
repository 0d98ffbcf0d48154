//! License/user lifecycle engine
//!
//! The one place where user and license records move together: account
//! creation, suspension, reactivation, term extension and support-hour
//! consumption. State machine over `User.status`: trial → active
//! (reactivation), active → expired (time-based, evaluated lazily at
//! login), active/trial → suspended (admin action, cancels the active
//! license), suspended → active (reactivation, renews or creates a
//! license).

use std::sync::Arc;

use chrono::{Days, Months, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::store::{sequential_id, Store};
use shared::models::{
    License, LicenseStatus, PaymentStatus, PlanType, User, UserRole, UserStatus,
};
use shared::validation;

/// Support work is billed to tickets at this rate (BRL per hour)
const SUPPORT_HOURLY_RATE: Decimal = Decimal::ONE_HUNDRED;

/// Lifecycle service
#[derive(Clone)]
pub struct LifecycleService {
    store: Arc<Store>,
    trial_days: u32,
    reactivation_months: u32,
}

/// Input for self-registering a trial client
#[derive(Debug, Deserialize)]
pub struct CreateTrialInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub farm_name: String,
    /// Trial window override; configured default when unset
    pub trial_days: Option<u32>,
}

/// Input for an admin creating a paying client
#[derive(Debug, Deserialize)]
pub struct CreatePaidInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub farm_name: String,
    pub plan: PlanType,
    pub duration_months: u32,
}

/// Input for creating a field-worker account bound to a worker record
#[derive(Debug, Deserialize)]
pub struct CreateWorkerInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub farm_id: String,
    pub farm_name: String,
    pub worker_id: String,
}

impl LifecycleService {
    /// Create a new LifecycleService instance
    pub fn new(store: Arc<Store>, config: &Config) -> Self {
        Self {
            store,
            trial_days: config.licensing.trial_days,
            reactivation_months: config.licensing.reactivation_months,
        }
    }

    /// Register a trial client with a matching trial license
    pub fn create_trial_user(&self, input: CreateTrialInput) -> AppResult<User> {
        self.validate_registration(&input.name, &input.email, &input.password)?;
        validate_farm_name(&input.farm_name)?;
        self.ensure_email_free(&input.email)?;

        let now = Utc::now();
        let trial_days = input.trial_days.unwrap_or(self.trial_days);
        let expires_at = now + Days::new(u64::from(trial_days));

        let user = User {
            id: self.allocate_user_id(),
            email: input.email,
            name: input.name,
            password: input.password,
            role: UserRole::Client,
            status: UserStatus::Trial,
            created_at: now,
            expires_at: Some(expires_at),
            last_login: None,
            farm_id: Some(self.allocate_farm_id()),
            farm_name: Some(input.farm_name),
            worker_id: None,
        };
        self.store.users().insert(user.clone())?;

        let license = License {
            id: self.allocate_license_id(),
            user_id: user.id.clone(),
            plan: PlanType::Trial,
            start_date: now,
            end_date: expires_at,
            price: Decimal::ZERO,
            status: LicenseStatus::Active,
            payment_status: PaymentStatus::Paid,
            payment_date: None,
            support_hours: Decimal::ONE,
            support_hours_used: Decimal::ZERO,
        };
        self.store.licenses().insert(license)?;

        tracing::info!(user = %user.id, trial_days, "trial client created");
        Ok(user)
    }

    /// Create a paying client with a license priced by plan and duration
    pub fn create_paid_user(&self, input: CreatePaidInput) -> AppResult<User> {
        self.validate_registration(&input.name, &input.email, &input.password)?;
        validate_farm_name(&input.farm_name)?;
        self.ensure_email_free(&input.email)?;

        if input.plan == PlanType::Trial {
            return Err(AppError::validation(
                "plan",
                "Paid accounts require a basic or premium plan",
                "Contas pagas exigem plano básico ou premium",
            ));
        }
        if input.duration_months == 0 {
            return Err(AppError::validation(
                "duration_months",
                "Duration must be at least one month",
                "A duração deve ser de pelo menos um mês",
            ));
        }

        let now = Utc::now();
        let end_date = now + Months::new(input.duration_months);
        let months = Decimal::from(input.duration_months);

        let user = User {
            id: self.allocate_user_id(),
            email: input.email,
            name: input.name,
            password: input.password,
            role: UserRole::Client,
            status: UserStatus::Active,
            created_at: now,
            expires_at: Some(end_date),
            last_login: None,
            farm_id: Some(self.allocate_farm_id()),
            farm_name: Some(input.farm_name),
            worker_id: None,
        };
        self.store.users().insert(user.clone())?;

        let license = License {
            id: self.allocate_license_id(),
            user_id: user.id.clone(),
            plan: input.plan,
            start_date: now,
            end_date,
            price: input.plan.monthly_rate() * months,
            status: LicenseStatus::Active,
            payment_status: PaymentStatus::Paid,
            payment_date: Some(now),
            support_hours: input.plan.support_hours_per_month() * months,
            support_hours_used: Decimal::ZERO,
        };
        self.store.licenses().insert(license)?;

        tracing::info!(
            user = %user.id,
            plan = %input.plan,
            months = input.duration_months,
            "paid client created"
        );
        Ok(user)
    }

    /// Create a field-worker account bound to an existing worker record
    ///
    /// Field workers never carry a license-driven expiry.
    pub fn create_worker_user(&self, input: CreateWorkerInput) -> AppResult<User> {
        self.validate_registration(&input.name, &input.email, &input.password)?;
        self.ensure_email_free(&input.email)?;

        if self.store.workers().get(&input.worker_id).is_none() {
            return Err(AppError::NotFound("Field worker".to_string()));
        }

        let user = User {
            id: self.allocate_user_id(),
            email: input.email,
            name: input.name,
            password: input.password,
            role: UserRole::FieldWorker,
            status: UserStatus::Active,
            created_at: Utc::now(),
            expires_at: None,
            last_login: None,
            farm_id: Some(input.farm_id),
            farm_name: Some(input.farm_name),
            worker_id: Some(input.worker_id),
        };
        self.store.users().insert(user.clone())?;

        tracing::info!(user = %user.id, worker = ?user.worker_id, "field worker account created");
        Ok(user)
    }

    /// Suspend an account and cancel its active license
    ///
    /// Returns `Ok(false)` when the user does not exist.
    pub fn suspend_user(&self, user_id: &str) -> AppResult<bool> {
        let updated = self
            .store
            .users()
            .update_with(user_id, |u| u.status = UserStatus::Suspended)?;
        if !updated {
            return Ok(false);
        }

        if let Some(license) = self.active_license(user_id) {
            self.store
                .licenses()
                .update_with(&license.id, |l| l.status = LicenseStatus::Canceled)?;
        }

        tracing::info!(user = %user_id, "account suspended");
        Ok(true)
    }

    /// Reactivate an account for a fresh term
    ///
    /// An existing license record is renewed in place (new window, active
    /// again); when none exists a basic license is created, priced at the
    /// basic monthly rate for the whole term. Returns `Ok(false)` when the
    /// user does not exist.
    pub fn reactivate_user(&self, user_id: &str, months: Option<u32>) -> AppResult<bool> {
        let months = months.unwrap_or(self.reactivation_months);
        let now = Utc::now();
        let end_date = now + Months::new(months);

        let updated = self.store.users().update_with(user_id, |u| {
            u.status = UserStatus::Active;
            u.expires_at = Some(end_date);
        })?;
        if !updated {
            return Ok(false);
        }

        let licenses = self.store.licenses();
        match licenses.find_first(|l| l.user_id == user_id) {
            Some(existing) => {
                licenses.update_with(&existing.id, |l| {
                    l.status = LicenseStatus::Active;
                    l.start_date = now;
                    l.end_date = end_date;
                })?;
            }
            None => {
                let term = Decimal::from(months);
                licenses.insert(License {
                    id: self.allocate_license_id(),
                    user_id: user_id.to_string(),
                    plan: PlanType::Basic,
                    start_date: now,
                    end_date,
                    price: PlanType::Basic.monthly_rate() * term,
                    status: LicenseStatus::Active,
                    payment_status: PaymentStatus::Paid,
                    payment_date: Some(now),
                    support_hours: PlanType::Basic.support_hours_per_month() * term,
                    support_hours_used: Decimal::ZERO,
                })?;
            }
        }

        tracing::info!(user = %user_id, months, "account reactivated");
        Ok(true)
    }

    /// Extend the active license by whole months
    ///
    /// The new end date compounds on the current one, so extending by `a`
    /// then `b` months lands on the same date as a single `a + b`
    /// extension. Price and support hours always accrue at the basic-plan
    /// monthly rates, whatever the license plan. Returns `Ok(false)` when
    /// the user or an active license is missing.
    pub fn extend_user_license(&self, user_id: &str, additional_months: u32) -> AppResult<bool> {
        if self.store.users().get(user_id).is_none() {
            return Ok(false);
        }
        let Some(license) = self.active_license(user_id) else {
            return Ok(false);
        };

        let new_end = license.end_date + Months::new(additional_months);
        let term = Decimal::from(additional_months);

        self.store
            .users()
            .update_with(user_id, |u| u.expires_at = Some(new_end))?;
        self.store.licenses().update_with(&license.id, |l| {
            l.end_date = new_end;
            l.price += PlanType::Basic.monthly_rate() * term;
            l.support_hours += PlanType::Basic.support_hours_per_month() * term;
        })?;

        tracing::info!(user = %user_id, months = additional_months, "license extended");
        Ok(true)
    }

    /// Bill support work to a ticket and consume the reporter's budget
    ///
    /// Returns `Ok(false)` when the ticket does not exist.
    pub fn log_support_time(&self, ticket_id: &str, hours: Decimal) -> AppResult<bool> {
        if hours <= Decimal::ZERO {
            return Err(AppError::validation(
                "hours",
                "Logged hours must be positive",
                "As horas registradas devem ser positivas",
            ));
        }

        let Some(ticket) = self.store.tickets().get(ticket_id) else {
            return Ok(false);
        };

        self.store.tickets().update_with(ticket_id, |t| {
            t.hours_spent += hours;
            t.cost += hours * SUPPORT_HOURLY_RATE;
        })?;

        if let Some(license) = self.active_license(&ticket.user_id) {
            self.store
                .licenses()
                .update_with(&license.id, |l| l.support_hours_used += hours)?;
        }

        Ok(true)
    }

    fn active_license(&self, user_id: &str) -> Option<License> {
        self.store
            .licenses()
            .find_first(|l| l.user_id == user_id && l.is_active())
    }

    fn validate_registration(&self, name: &str, email: &str, password: &str) -> AppResult<()> {
        if let Err(message) = validation::validate_name(name) {
            return Err(AppError::validation(
                "name",
                message,
                "O nome não pode ser vazio",
            ));
        }
        if let Err(message) = validation::validate_email(email) {
            return Err(AppError::validation("email", message, "E-mail inválido"));
        }
        if let Err(message) = validation::validate_password(password) {
            return Err(AppError::validation(
                "password",
                message,
                "A senha deve ter pelo menos 8 caracteres",
            ));
        }
        Ok(())
    }

    fn ensure_email_free(&self, email: &str) -> AppResult<()> {
        if self.store.users().find_first(|u| u.email == email).is_some() {
            return Err(AppError::DuplicateEntry("email".to_string()));
        }
        Ok(())
    }

    fn allocate_user_id(&self) -> String {
        format!("user{}", self.store.users().len() + 1)
    }

    fn allocate_farm_id(&self) -> String {
        let clients = self.store.users().count(|u| u.role == UserRole::Client);
        sequential_id("FAZ", clients)
    }

    fn allocate_license_id(&self) -> String {
        sequential_id("LIC", self.store.licenses().len())
    }
}

fn validate_farm_name(farm_name: &str) -> AppResult<()> {
    if let Err(message) = validation::validate_name(farm_name) {
        return Err(AppError::validation(
            "farm_name",
            message,
            "O nome da fazenda não pode ser vazio",
        ));
    }
    Ok(())
}
