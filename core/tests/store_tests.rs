//! Store and repository tests
//!
//! Round-trip guarantees, id allocation scoping, the no-op update
//! contract, and persistence through the file-backed port.

use std::sync::Arc;

use fazenda_core::config::Config;
use fazenda_core::seed;
use fazenda_core::services::herd::AddAnimalInput;
use fazenda_core::services::supplies::AddSupplyInput;
use fazenda_core::services::{
    AccountService, AuthService, HerdService, IncidentService, SupplyService,
};
use fazenda_core::store::{JsonFileStorage, Store, DEFAULT_KEY_PREFIX};
use shared::models::{Animal, AnimalKind, Urgency};
use shared::types::StatusFlag;

fn animal_input(kind: AnimalKind, name: &str) -> AddAnimalInput {
    AddAnimalInput {
        kind,
        name: name.to_string(),
        age: "5 anos".to_string(),
        status: "Saudável".to_string(),
        status_flag: StatusFlag::Ok,
        last_event: "Vacinação (01/03/2025)".to_string(),
        photo: None,
        notes: None,
    }
}

// ============================================================================
// Repository contract
// ============================================================================

#[test]
fn added_records_round_trip_by_id() {
    let store = Arc::new(Store::in_memory());
    let herd = HerdService::new(store.clone());

    let created = herd.add(animal_input(AnimalKind::Cow, "Mimosa")).unwrap();
    let fetched = herd.get(&created.id).expect("created record is readable");

    assert_eq!(
        serde_json::to_value(&created).unwrap(),
        serde_json::to_value(&fetched).unwrap()
    );

    let listed = herd.list();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);
}

#[test]
fn list_preserves_insertion_order() {
    let store = Arc::new(Store::in_memory());
    let supplies = SupplyService::new(store.clone());

    for (name, urgency) in [
        ("Sal Mineral", Urgency::Urgent),
        ("Peças para cerca", Urgency::Normal),
        ("Combustível para trator", Urgency::Important),
    ] {
        supplies
            .add(AddSupplyInput {
                name: name.to_string(),
                quantity: 5,
                unit: "unidades".to_string(),
                urgency,
            })
            .unwrap();
    }

    let ids: Vec<String> = supplies.list().into_iter().map(|s| s.id).collect();
    assert_eq!(ids, vec!["S001", "S002", "S003"]);
}

#[test]
fn updating_an_absent_id_is_a_no_op() {
    let store = Arc::new(Store::in_memory());
    let herd = HerdService::new(store.clone());

    let ghost = Animal {
        id: "V999".to_string(),
        kind: AnimalKind::Cow,
        name: "Fantasma".to_string(),
        age: "1 ano".to_string(),
        status: "Saudável".to_string(),
        status_flag: StatusFlag::Ok,
        last_event: String::new(),
        registered_at: chrono::Utc::now(),
        photo: None,
        notes: None,
    };

    assert!(!herd.update(ghost).unwrap());
    assert!(herd.list().is_empty());
}

#[test]
fn animal_ids_are_sequential_within_each_kind() {
    let store = Arc::new(Store::in_memory());
    let herd = HerdService::new(store.clone());

    let cow_1 = herd.add(animal_input(AnimalKind::Cow, "Mimosa")).unwrap();
    let bull = herd.add(animal_input(AnimalKind::Bull, "Sultão")).unwrap();
    let cow_2 = herd.add(animal_input(AnimalKind::Cow, "Malhada")).unwrap();
    let calf = herd.add(animal_input(AnimalKind::Calf, "Pintadinho")).unwrap();

    assert_eq!(cow_1.id, "V001");
    assert_eq!(bull.id, "T001");
    assert_eq!(cow_2.id, "V002");
    assert_eq!(calf.id, "B001");
}

#[test]
fn user_deletion_is_a_hard_delete() {
    let store = Arc::new(Store::in_memory());
    seed::install_demo_data(&store).unwrap();
    let accounts = AccountService::new(store.clone());

    assert!(accounts.get("client2").is_some());
    assert!(accounts.delete("client2").unwrap());
    assert!(accounts.get("client2").is_none());
    assert!(!accounts.delete("client2").unwrap());
}

// ============================================================================
// Seed data
// ============================================================================

#[test]
fn demo_data_installs_once() {
    let store = Arc::new(Store::in_memory());
    seed::install_demo_data(&store).unwrap();
    seed::install_demo_data(&store).unwrap();

    assert_eq!(store.users().len(), 5);
    assert_eq!(store.licenses().len(), 2);
    assert_eq!(store.animals().len(), 6);
    assert_eq!(store.workers().len(), 2);
    assert_eq!(store.tasks().len(), 4);
    assert_eq!(store.supplies().len(), 4);

    // seeded staff credentials work
    let auth = AuthService::new(store.clone());
    let session = auth.login("admin@fazendaapp.com", "admin123").unwrap();
    assert!(session.is_some());
}

// ============================================================================
// File-backed port
// ============================================================================

#[test]
fn collections_survive_a_reopen_through_the_file_port() {
    let dir = tempfile::tempdir().unwrap();

    {
        let backend = JsonFileStorage::new(dir.path()).unwrap();
        let store = Arc::new(Store::open(Box::new(backend), DEFAULT_KEY_PREFIX).unwrap());
        let herd = HerdService::new(store.clone());
        herd.add(animal_input(AnimalKind::Cow, "Mimosa")).unwrap();
        herd.add(animal_input(AnimalKind::Bull, "Sultão")).unwrap();
    }

    let backend = JsonFileStorage::new(dir.path()).unwrap();
    let store = Arc::new(Store::open(Box::new(backend), DEFAULT_KEY_PREFIX).unwrap());
    let herd = HerdService::new(store.clone());

    let ids: Vec<String> = herd.list().into_iter().map(|a| a.id).collect();
    assert_eq!(ids, vec!["V001", "T001"]);
    assert_eq!(herd.get("V001").unwrap().name, "Mimosa");
}

#[test]
fn the_session_pointer_survives_a_reopen() {
    let dir = tempfile::tempdir().unwrap();

    {
        let backend = JsonFileStorage::new(dir.path()).unwrap();
        let store = Arc::new(Store::open(Box::new(backend), DEFAULT_KEY_PREFIX).unwrap());
        seed::install_demo_data(&store).unwrap();
        let auth = AuthService::new(store.clone());
        auth.login("joao@fazenda.com", "cliente123").unwrap().unwrap();
    }

    let backend = JsonFileStorage::new(dir.path()).unwrap();
    let store = Arc::new(Store::open(Box::new(backend), DEFAULT_KEY_PREFIX).unwrap());
    let auth = AuthService::new(store.clone());

    let restored = auth.restore_session().unwrap().expect("pointer persisted");
    assert_eq!(restored.user.id, "client1");
}

// ============================================================================
// Cross-repository composition
// ============================================================================

#[test]
fn incident_ids_follow_the_collection_sequence() {
    let store = Arc::new(Store::in_memory());
    let incidents = IncidentService::new(store.clone());

    for n in 0..3 {
        let incident = incidents
            .report(fazenda_core::services::incidents::ReportIncidentInput {
                kind: "Cerca Danificada".to_string(),
                description: format!("Ocorrência {}", n + 1),
                location: None,
                audio: None,
                photo: None,
                worker_id: None,
            })
            .unwrap();
        assert_eq!(incident.id, format!("OC{:03}", n + 1));
    }
}

#[test]
fn config_defaults_match_the_documented_values() {
    let config = Config::default();
    assert_eq!(config.licensing.trial_days, 15);
    assert_eq!(config.licensing.reactivation_months, 3);
    assert_eq!(config.tracking.noise_floor_meters, 5.0);
    assert_eq!(config.storage.key_prefix, "fazenda");
}
