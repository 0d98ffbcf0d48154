//! License/user lifecycle tests
//!
//! Covers account creation pricing, suspension/reactivation, term
//! extension compounding and support-hour billing.

use std::sync::Arc;

use chrono::{Datelike, Days, Months, TimeZone, Utc};
use rust_decimal::Decimal;

use fazenda_core::config::Config;
use fazenda_core::error::AppError;
use fazenda_core::services::{
    LifecycleService, SupportService, TrackingService,
};
use fazenda_core::services::lifecycle::{
    CreatePaidInput, CreateTrialInput, CreateWorkerInput,
};
use fazenda_core::services::support::OpenTicketInput;
use fazenda_core::services::tracking::AddWorkerInput;
use fazenda_core::store::Store;
use shared::models::{LicenseStatus, PlanType, TicketPriority, UserRole, UserStatus};

fn setup() -> (Arc<Store>, LifecycleService) {
    let store = Arc::new(Store::in_memory());
    let lifecycle = LifecycleService::new(store.clone(), &Config::default());
    (store, lifecycle)
}

fn trial_input(name: &str, email: &str) -> CreateTrialInput {
    CreateTrialInput {
        name: name.to_string(),
        email: email.to_string(),
        password: "cliente123".to_string(),
        farm_name: "Fazenda Boa Vista".to_string(),
        trial_days: None,
    }
}

fn paid_input(name: &str, email: &str, plan: PlanType, months: u32) -> CreatePaidInput {
    CreatePaidInput {
        name: name.to_string(),
        email: email.to_string(),
        password: "cliente123".to_string(),
        farm_name: "Fazenda Santa Maria".to_string(),
        plan,
        duration_months: months,
    }
}

// ============================================================================
// Account creation
// ============================================================================

#[test]
fn trial_user_gets_fifteen_days_and_a_trial_license() {
    let (store, lifecycle) = setup();

    let user = lifecycle
        .create_trial_user(trial_input("Ana", "ana@fazenda.com"))
        .unwrap();

    assert_eq!(user.id, "user1");
    assert_eq!(user.role, UserRole::Client);
    assert_eq!(user.status, UserStatus::Trial);
    assert_eq!(user.farm_id.as_deref(), Some("FAZ001"));

    let expected = Utc::now() + Days::new(15);
    let expires = user.expires_at.expect("trial users carry an expiry");
    assert!((expires - expected).num_seconds().abs() < 5);

    let license = store.licenses().get("LIC001").expect("license created");
    assert_eq!(license.user_id, user.id);
    assert_eq!(license.plan, PlanType::Trial);
    assert_eq!(license.status, LicenseStatus::Active);
    assert_eq!(license.price, Decimal::ZERO);
    assert_eq!(license.support_hours, Decimal::ONE);
}

#[test]
fn trial_window_can_be_overridden() {
    let (_store, lifecycle) = setup();

    let mut input = trial_input("Ana", "ana@fazenda.com");
    input.trial_days = Some(30);
    let user = lifecycle.create_trial_user(input).unwrap();

    let expected = Utc::now() + Days::new(30);
    let expires = user.expires_at.unwrap();
    assert!((expires - expected).num_seconds().abs() < 5);
}

#[test]
fn paid_basic_three_months_prices_at_1500_with_9_support_hours() {
    let (store, lifecycle) = setup();

    let user = lifecycle
        .create_paid_user(paid_input("Bruno", "bruno@fazenda.com", PlanType::Basic, 3))
        .unwrap();

    assert_eq!(user.status, UserStatus::Active);
    let license = store.licenses().get("LIC001").unwrap();
    assert_eq!(license.price, Decimal::from(1500));
    assert_eq!(license.support_hours, Decimal::from(9));
    assert_eq!(license.plan, PlanType::Basic);

    let expected_end = Utc::now() + Months::new(3);
    assert!((license.end_date - expected_end).num_seconds().abs() < 5);
    assert_eq!(user.expires_at, Some(license.end_date));
}

#[test]
fn paid_premium_two_months_prices_at_1800_with_12_support_hours() {
    let (store, lifecycle) = setup();

    lifecycle
        .create_paid_user(paid_input("Carla", "carla@fazenda.com", PlanType::Premium, 2))
        .unwrap();

    let license = store.licenses().get("LIC001").unwrap();
    assert_eq!(license.price, Decimal::from(1800));
    assert_eq!(license.support_hours, Decimal::from(12));
}

#[test]
fn duplicate_email_is_rejected() {
    let (_store, lifecycle) = setup();

    lifecycle
        .create_trial_user(trial_input("Ana", "ana@fazenda.com"))
        .unwrap();
    let err = lifecycle
        .create_trial_user(trial_input("Outra Ana", "ana@fazenda.com"))
        .unwrap_err();

    assert!(matches!(err, AppError::DuplicateEntry(field) if field == "email"));
}

#[test]
fn invalid_registration_is_rejected_before_any_write() {
    let (store, lifecycle) = setup();

    let mut input = trial_input("Ana", "not-an-email");
    let err = lifecycle.create_trial_user(input).unwrap_err();
    assert!(matches!(err, AppError::Validation { field, .. } if field == "email"));

    input = trial_input("Ana", "ana@fazenda.com");
    input.password = "short".to_string();
    let err = lifecycle.create_trial_user(input).unwrap_err();
    assert!(matches!(err, AppError::Validation { field, .. } if field == "password"));

    assert!(store.users().is_empty());
    assert!(store.licenses().is_empty());
}

#[test]
fn paid_plan_must_not_be_trial_and_duration_must_be_positive() {
    let (_store, lifecycle) = setup();

    let err = lifecycle
        .create_paid_user(paid_input("Bruno", "bruno@fazenda.com", PlanType::Trial, 3))
        .unwrap_err();
    assert!(matches!(err, AppError::Validation { field, .. } if field == "plan"));

    let err = lifecycle
        .create_paid_user(paid_input("Bruno", "bruno@fazenda.com", PlanType::Basic, 0))
        .unwrap_err();
    assert!(matches!(err, AppError::Validation { field, .. } if field == "duration_months"));
}

#[test]
fn worker_accounts_bind_to_an_existing_worker_and_never_expire() {
    let (store, lifecycle) = setup();
    let tracking = TrackingService::new(store.clone(), &Config::default());

    let worker = tracking
        .add_worker(AddWorkerInput {
            name: "João Silva".to_string(),
            sector: "Setor Norte".to_string(),
        })
        .unwrap();

    let user = lifecycle
        .create_worker_user(CreateWorkerInput {
            name: "José Pereira".to_string(),
            email: "peao@fazenda.com".to_string(),
            password: "peao1234".to_string(),
            farm_id: "FAZ001".to_string(),
            farm_name: "Fazenda Boa Vista".to_string(),
            worker_id: worker.id.clone(),
        })
        .unwrap();

    assert_eq!(user.role, UserRole::FieldWorker);
    assert_eq!(user.expires_at, None);
    assert_eq!(user.worker_id, Some(worker.id));

    let err = lifecycle
        .create_worker_user(CreateWorkerInput {
            name: "Fantasma".to_string(),
            email: "fantasma@fazenda.com".to_string(),
            password: "peao1234".to_string(),
            farm_id: "FAZ001".to_string(),
            farm_name: "Fazenda Boa Vista".to_string(),
            worker_id: "P999".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

// ============================================================================
// Suspension and reactivation
// ============================================================================

#[test]
fn suspend_cancels_the_active_license_and_reactivate_renews_it_in_place() {
    let (store, lifecycle) = setup();

    let user = lifecycle
        .create_paid_user(paid_input("Bruno", "bruno@fazenda.com", PlanType::Basic, 3))
        .unwrap();

    assert!(lifecycle.suspend_user(&user.id).unwrap());
    assert_eq!(
        store.users().get(&user.id).unwrap().status,
        UserStatus::Suspended
    );
    assert_eq!(
        store.licenses().get("LIC001").unwrap().status,
        LicenseStatus::Canceled
    );

    // no active license left, so an extension must fail
    assert!(!lifecycle.extend_user_license(&user.id, 2).unwrap());

    assert!(lifecycle.reactivate_user(&user.id, None).unwrap());
    let reactivated = store.users().get(&user.id).unwrap();
    assert_eq!(reactivated.status, UserStatus::Active);

    let license = store.licenses().get("LIC001").unwrap();
    assert_eq!(license.status, LicenseStatus::Active);
    let expected_end = Utc::now() + Months::new(3);
    assert!((license.end_date - expected_end).num_seconds().abs() < 5);

    // renewed in place, not duplicated
    assert_eq!(store.licenses().len(), 1);
}

#[test]
fn suspend_and_reactivate_report_false_for_unknown_users() {
    let (_store, lifecycle) = setup();
    assert!(!lifecycle.suspend_user("user999").unwrap());
    assert!(!lifecycle.reactivate_user("user999", None).unwrap());
    assert!(!lifecycle.extend_user_license("user999", 1).unwrap());
}

#[test]
fn reactivate_creates_a_basic_license_when_none_exists() {
    let (store, lifecycle) = setup();
    let tracking = TrackingService::new(store.clone(), &Config::default());

    // a worker-role account has no license record at all
    tracking
        .add_worker(AddWorkerInput {
            name: "João Silva".to_string(),
            sector: "Setor Norte".to_string(),
        })
        .unwrap();
    let user = lifecycle
        .create_worker_user(CreateWorkerInput {
            name: "José Pereira".to_string(),
            email: "peao@fazenda.com".to_string(),
            password: "peao1234".to_string(),
            farm_id: "FAZ001".to_string(),
            farm_name: "Fazenda Boa Vista".to_string(),
            worker_id: "P001".to_string(),
        })
        .unwrap();

    assert!(lifecycle.reactivate_user(&user.id, Some(2)).unwrap());

    let license = store.licenses().get("LIC001").unwrap();
    assert_eq!(license.plan, PlanType::Basic);
    assert_eq!(license.price, Decimal::from(1000));
    assert_eq!(license.support_hours, Decimal::from(6));
}

// ============================================================================
// Extension
// ============================================================================

#[test]
fn extension_compounds_on_the_current_end_date() {
    let (store, lifecycle) = setup();

    let user = lifecycle
        .create_paid_user(paid_input("Bruno", "bruno@fazenda.com", PlanType::Basic, 3))
        .unwrap();

    let fixed_end = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
    store
        .licenses()
        .update_with("LIC001", |l| l.end_date = fixed_end)
        .unwrap();

    assert!(lifecycle.extend_user_license(&user.id, 3).unwrap());

    let license = store.licenses().get("LIC001").unwrap();
    assert_eq!(license.end_date.year(), 2025);
    assert_eq!(license.end_date.month(), 9);
    assert_eq!(license.end_date.day(), 1);
    // 1500 at creation plus 500 x 3 for the extension
    assert_eq!(license.price, Decimal::from(3000));
    assert_eq!(license.support_hours, Decimal::from(18));
    assert_eq!(
        store.users().get(&user.id).unwrap().expires_at,
        Some(license.end_date)
    );
}

#[test]
fn extending_a_then_b_months_equals_one_extension_of_a_plus_b() {
    let (store, lifecycle) = setup();

    let user = lifecycle
        .create_paid_user(paid_input("Bruno", "bruno@fazenda.com", PlanType::Basic, 1))
        .unwrap();

    let fixed_end = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
    store
        .licenses()
        .update_with("LIC001", |l| l.end_date = fixed_end)
        .unwrap();

    assert!(lifecycle.extend_user_license(&user.id, 2).unwrap());
    assert!(lifecycle.extend_user_license(&user.id, 1).unwrap());

    let license = store.licenses().get("LIC001").unwrap();
    assert_eq!(license.end_date, fixed_end + Months::new(3));
}

#[test]
fn extension_always_bills_at_the_basic_rate_even_for_premium() {
    let (store, lifecycle) = setup();

    let user = lifecycle
        .create_paid_user(paid_input("Carla", "carla@fazenda.com", PlanType::Premium, 1))
        .unwrap();

    assert!(lifecycle.extend_user_license(&user.id, 2).unwrap());

    let license = store.licenses().get("LIC001").unwrap();
    // 900 at creation plus 500 x 2, not 900 x 2
    assert_eq!(license.price, Decimal::from(1900));
    // 6 at creation plus 3 x 2
    assert_eq!(license.support_hours, Decimal::from(12));
    assert_eq!(license.plan, PlanType::Premium);
}

// ============================================================================
// Support-hour billing
// ============================================================================

#[test]
fn logged_support_time_bills_the_ticket_and_consumes_the_budget() {
    let (store, lifecycle) = setup();
    let support = SupportService::new(store.clone());

    let user = lifecycle
        .create_paid_user(paid_input("Bruno", "bruno@fazenda.com", PlanType::Basic, 3))
        .unwrap();
    let ticket = support
        .open(OpenTicketInput {
            user_id: user.id.clone(),
            title: "Erro ao gerar relatório".to_string(),
            description: "O relatório mensal não sai".to_string(),
            priority: TicketPriority::High,
        })
        .unwrap();

    let hours = Decimal::new(15, 1); // 1.5h
    assert!(lifecycle.log_support_time(&ticket.id, hours).unwrap());

    let billed = store.tickets().get(&ticket.id).unwrap();
    assert_eq!(billed.hours_spent, hours);
    assert_eq!(billed.cost, Decimal::from(150));

    let license = store.licenses().get("LIC001").unwrap();
    assert_eq!(license.support_hours_used, hours);
}

#[test]
fn support_time_rejects_non_positive_hours_and_unknown_tickets() {
    let (_store, lifecycle) = setup();

    let err = lifecycle
        .log_support_time("TIC001", Decimal::ZERO)
        .unwrap_err();
    assert!(matches!(err, AppError::Validation { field, .. } if field == "hours"));

    assert!(!lifecycle
        .log_support_time("TIC999", Decimal::ONE)
        .unwrap());
}
