//! Demo catalogue for first runs
//!
//! Mirrors the sample data the original client shipped with: a staff
//! account pair, two farm clients, a field-worker account, and a small
//! herd/incident/task/supply catalogue to make the dashboards non-empty.

use chrono::{Days, Duration, Months, Utc};
use rust_decimal::Decimal;

use crate::error::AppResult;
use crate::store::Store;
use shared::models::{
    Animal, AnimalKind, FieldWorker, Incident, IncidentStatus, License, LicenseStatus,
    PaymentStatus, PlanType, Supply, SupportTicket, TaskStatus, TicketPriority, TicketStatus,
    Urgency, User, UserRole, UserStatus, WorkTask, WorkerStatus,
};
use shared::types::{GeoPoint, RoutePoint, StatusFlag};

/// Populate an empty store with the demo catalogue; no-op when user
/// records already exist.
pub fn install_demo_data(store: &Store) -> AppResult<()> {
    if !store.users().is_empty() {
        tracing::debug!("store already initialized, skipping demo data");
        return Ok(());
    }

    let now = Utc::now();

    // ------------------------------------------------------------------
    // Accounts and licenses
    // ------------------------------------------------------------------

    let staff = |id: &str, email: &str, name: &str, password: &str, role: UserRole| User {
        id: id.to_string(),
        email: email.to_string(),
        name: name.to_string(),
        password: password.to_string(),
        role,
        status: UserStatus::Active,
        created_at: now,
        expires_at: None,
        last_login: None,
        farm_id: None,
        farm_name: None,
        worker_id: None,
    };

    let users = store.users();
    users.insert(staff(
        "admin1",
        "admin@fazendaapp.com",
        "Administrador",
        "admin123",
        UserRole::Admin,
    ))?;
    users.insert(staff(
        "dev1",
        "dev@fazendaapp.com",
        "Desenvolvedor",
        "dev123",
        UserRole::Dev,
    ))?;
    users.insert(User {
        id: "client1".to_string(),
        email: "joao@fazenda.com".to_string(),
        name: "João da Silva".to_string(),
        password: "cliente123".to_string(),
        role: UserRole::Client,
        status: UserStatus::Active,
        created_at: now,
        expires_at: Some(now + Months::new(3)),
        last_login: None,
        farm_id: Some("FAZ001".to_string()),
        farm_name: Some("Fazenda Boa Vista".to_string()),
        worker_id: None,
    })?;
    users.insert(User {
        id: "client2".to_string(),
        email: "maria@fazenda.com".to_string(),
        name: "Maria Oliveira".to_string(),
        password: "cliente123".to_string(),
        role: UserRole::Client,
        status: UserStatus::Trial,
        created_at: now,
        expires_at: Some(now + Days::new(15)),
        last_login: None,
        farm_id: Some("FAZ002".to_string()),
        farm_name: Some("Fazenda Santa Maria".to_string()),
        worker_id: None,
    })?;
    users.insert(User {
        id: "peao1".to_string(),
        email: "peao@fazenda.com".to_string(),
        name: "José Pereira".to_string(),
        password: "peao123".to_string(),
        role: UserRole::FieldWorker,
        status: UserStatus::Active,
        created_at: now,
        expires_at: None,
        last_login: None,
        farm_id: Some("FAZ001".to_string()),
        farm_name: Some("Fazenda Boa Vista".to_string()),
        worker_id: Some("P001".to_string()),
    })?;

    let licenses = store.licenses();
    licenses.insert(License {
        id: "LIC001".to_string(),
        user_id: "client1".to_string(),
        plan: PlanType::Basic,
        start_date: now,
        end_date: now + Months::new(3),
        price: Decimal::from(500),
        status: LicenseStatus::Active,
        payment_status: PaymentStatus::Paid,
        payment_date: Some(now),
        support_hours: Decimal::from(3),
        support_hours_used: Decimal::ZERO,
    })?;
    licenses.insert(License {
        id: "LIC002".to_string(),
        user_id: "client2".to_string(),
        plan: PlanType::Trial,
        start_date: now,
        end_date: now + Days::new(15),
        price: Decimal::ZERO,
        status: LicenseStatus::Active,
        payment_status: PaymentStatus::Paid,
        payment_date: None,
        support_hours: Decimal::ONE,
        support_hours_used: Decimal::ZERO,
    })?;

    let tickets = store.tickets();
    tickets.insert(SupportTicket {
        id: "TIC001".to_string(),
        user_id: "client1".to_string(),
        title: "Problema ao cadastrar animal".to_string(),
        description: "Não consigo adicionar um novo bezerro no sistema.".to_string(),
        status: TicketStatus::Open,
        priority: TicketPriority::Medium,
        created_at: now,
        closed_at: None,
        hours_spent: Decimal::ZERO,
        cost: Decimal::ZERO,
    })?;
    tickets.insert(SupportTicket {
        id: "TIC002".to_string(),
        user_id: "client1".to_string(),
        title: "Erro ao gerar relatório".to_string(),
        description: "O relatório mensal não está sendo gerado corretamente.".to_string(),
        status: TicketStatus::InProgress,
        priority: TicketPriority::High,
        created_at: now - Duration::days(2),
        closed_at: None,
        hours_spent: Decimal::new(15, 1),
        cost: Decimal::from(150),
    })?;

    // ------------------------------------------------------------------
    // Farm catalogue
    // ------------------------------------------------------------------

    let animal = |id: &str,
                  kind: AnimalKind,
                  name: &str,
                  age: &str,
                  status: &str,
                  flag: StatusFlag,
                  last_event: &str,
                  notes: &str| Animal {
        id: id.to_string(),
        kind,
        name: name.to_string(),
        age: age.to_string(),
        status: status.to_string(),
        status_flag: flag,
        last_event: last_event.to_string(),
        registered_at: now,
        photo: None,
        notes: Some(notes.to_string()),
    };

    let animals = store.animals();
    animals.insert(animal(
        "V001",
        AnimalKind::Cow,
        "Mimosa",
        "5 anos",
        "Prenha",
        StatusFlag::Ok,
        "Inseminação (15/03/2025)",
        "Boa produtora, segunda gestação",
    ))?;
    animals.insert(animal(
        "V002",
        AnimalKind::Cow,
        "Malhada",
        "7 anos",
        "Não prenha",
        StatusFlag::Warning,
        "Tentativa de cruzamento (10/02/2025)",
        "Dificuldade para engravidar",
    ))?;
    animals.insert(animal(
        "V003",
        AnimalKind::Cow,
        "Pintada",
        "8 anos",
        "Problema",
        StatusFlag::Alert,
        "Não engravida há 2 anos",
        "Considerar para venda",
    ))?;
    animals.insert(animal(
        "B001",
        AnimalKind::Calf,
        "Pintadinho",
        "3 meses",
        "Saudável",
        StatusFlag::Ok,
        "Vacinação (01/03/2025)",
        "Filho da Mimosa",
    ))?;
    animals.insert(animal(
        "B002",
        AnimalKind::Calf,
        "Estrela",
        "5 meses",
        "Doente",
        StatusFlag::Alert,
        "Diarreia (25/03/2025)",
        "Sob tratamento veterinário",
    ))?;
    animals.insert(animal(
        "T001",
        AnimalKind::Bull,
        "Sultão",
        "6 anos",
        "Ativo",
        StatusFlag::Ok,
        "Exame (10/01/2025)",
        "Reprodutor principal",
    ))?;

    let workers = store.workers();
    let route_p1 = vec![
        RoutePoint::new(-15.789012, -47.923456, now - Duration::minutes(135)),
        RoutePoint::new(-15.7889, -47.9245, now - Duration::minutes(90)),
        RoutePoint::new(-15.7878, -47.9256, now - Duration::minutes(45)),
        RoutePoint::new(-15.789012, -47.923456, now),
    ];
    workers.insert(FieldWorker {
        id: "P001".to_string(),
        name: "João Silva".to_string(),
        sector: "Setor Norte".to_string(),
        status: WorkerStatus::Active,
        last_position: route_p1.last().copied(),
        route: route_p1,
        incidents_today: 2,
        distance_km: 0.0,
        active_time_secs: 0,
        photos_captured: 0,
        audios_captured: 0,
        tasks_completed: 0,
        tasks_pending: 4,
    })?;
    let route_p2 = vec![
        RoutePoint::new(-15.792345, -47.918765, now - Duration::minutes(90)),
        RoutePoint::new(-15.793456, -47.917654, now - Duration::minutes(45)),
        RoutePoint::new(-15.792345, -47.918765, now),
    ];
    workers.insert(FieldWorker {
        id: "P002".to_string(),
        name: "Pedro Oliveira".to_string(),
        sector: "Setor Sul".to_string(),
        status: WorkerStatus::Paused,
        last_position: route_p2.last().copied(),
        route: route_p2,
        incidents_today: 1,
        distance_km: 0.0,
        active_time_secs: 0,
        photos_captured: 0,
        audios_captured: 0,
        tasks_completed: 0,
        tasks_pending: 0,
    })?;

    let incidents = store.incidents();
    incidents.insert(Incident {
        id: "OC001".to_string(),
        kind: "Cerca Danificada".to_string(),
        description: "Touro quebrou cerca no pasto norte".to_string(),
        reported_at: now - Duration::days(1),
        status: IncidentStatus::Pending,
        location: Some(GeoPoint::new(-15.789012, -47.923456)),
        audio: None,
        photo: None,
        worker_id: Some("P001".to_string()),
        worker_name: Some("João Silva".to_string()),
    })?;
    incidents.insert(Incident {
        id: "OC002".to_string(),
        kind: "Falta de Suprimento".to_string(),
        description: "Acabou o sal mineral".to_string(),
        reported_at: now - Duration::days(4),
        status: IncidentStatus::Resolved,
        location: None,
        audio: None,
        photo: None,
        worker_id: Some("P002".to_string()),
        worker_name: Some("Pedro Oliveira".to_string()),
    })?;
    incidents.insert(Incident {
        id: "OC003".to_string(),
        kind: "Máquina Quebrada".to_string(),
        description: "Trator com problema no motor".to_string(),
        reported_at: now - Duration::days(9),
        status: IncidentStatus::InProgress,
        location: Some(GeoPoint::new(-15.782345, -47.912345)),
        audio: None,
        photo: None,
        worker_id: Some("P001".to_string()),
        worker_name: Some("João Silva".to_string()),
    })?;

    let tasks = store.tasks();
    let task = |id: &str, description: &str| WorkTask {
        id: id.to_string(),
        description: description.to_string(),
        status: TaskStatus::Pending,
        worker_id: Some("P001".to_string()),
    };
    tasks.insert(task("T001", "Verificar cercas no pasto norte"))?;
    tasks.insert(task("T002", "Alimentar bezerros"))?;
    tasks.insert(task("T003", "Verificar vaca doente (ID: V003)"))?;
    tasks.insert(task("T004", "Consertar cerca quebrada no setor leste"))?;

    let supplies = store.supplies();
    let supply = |id: &str, name: &str, quantity: u32, unit: &str, urgency: Urgency| Supply {
        id: id.to_string(),
        name: name.to_string(),
        quantity,
        unit: unit.to_string(),
        urgency,
    };
    supplies.insert(supply("S001", "Sal Mineral", 5, "sacos", Urgency::Urgent))?;
    supplies.insert(supply(
        "S002",
        "Medicamentos para bezerros",
        1,
        "kit",
        Urgency::Important,
    ))?;
    supplies.insert(supply(
        "S003",
        "Peças para cerca",
        20,
        "unidades",
        Urgency::Normal,
    ))?;
    supplies.insert(supply(
        "S004",
        "Combustível para trator",
        50,
        "litros",
        Urgency::Important,
    ))?;

    tracing::info!("demo catalogue installed");
    Ok(())
}
