//! Record store with a pluggable key-value persistence port
//!
//! Every entity collection lives in memory as an insertion-ordered arena
//! indexed by id. Collections are loaded from the [`StoragePort`] when the
//! store opens and snapshotted back as whole JSON arrays after every
//! mutating call. There are no partial writes and no transactions across
//! collections: a caller composing writes to two collections can observe a
//! window where only the first landed.

mod file;
mod memory;

pub use file::JsonFileStorage;
pub use memory::InMemoryStorage;

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use shared::models::{
    Animal, FieldWorker, Incident, License, StoredFile, SupportTicket, Supply, User, WorkTask,
};
use shared::types::RouteArchive;

/// Default key prefix, matching the original persisted layout
pub const DEFAULT_KEY_PREFIX: &str = "fazenda";

const SESSION_RECORD: &str = "current_user";
const ROUTE_HISTORY_RECORD: &str = "rotas_historico";

/// Errors surfaced by storage ports and snapshot plumbing
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// The injectable key-value persistence port. Payloads are JSON documents.
pub trait StoragePort: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn save(&self, key: &str, payload: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// A record type persisted as one JSON collection
pub trait Entity: Clone + Serialize + DeserializeOwned {
    /// Collection name, appended to the store's key prefix
    const COLLECTION: &'static str;

    fn id(&self) -> &str;
}

impl Entity for User {
    const COLLECTION: &'static str = "users";
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for License {
    const COLLECTION: &'static str = "licenses";
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for SupportTicket {
    const COLLECTION: &'static str = "tickets";
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Animal {
    const COLLECTION: &'static str = "animais";
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Incident {
    const COLLECTION: &'static str = "ocorrencias";
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for FieldWorker {
    const COLLECTION: &'static str = "peoes";
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for WorkTask {
    const COLLECTION: &'static str = "tarefas";
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Supply {
    const COLLECTION: &'static str = "suprimentos";
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for StoredFile {
    const COLLECTION: &'static str = "files";
    fn id(&self) -> &str {
        &self.id
    }
}

/// Build a sequential human-readable id: `prefix` + zero-padded(count + 1).
///
/// Count-based allocation is only unique with a single writer; this store
/// targets single-process, single-thread-of-control usage.
pub fn sequential_id(prefix: &str, existing: usize) -> String {
    format!("{}{:03}", prefix, existing + 1)
}

/// Insertion-ordered arena keyed by id
struct Arena<E> {
    records: Vec<E>,
    index: HashMap<String, usize>,
}

impl<E: Entity> Arena<E> {
    fn from_records(records: Vec<E>) -> Self {
        let index = records
            .iter()
            .enumerate()
            .map(|(pos, record)| (record.id().to_string(), pos))
            .collect();
        Self { records, index }
    }

    fn get(&self, id: &str) -> Option<&E> {
        self.index.get(id).map(|&pos| &self.records[pos])
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut E> {
        self.index.get(id).map(|&pos| &mut self.records[pos])
    }

    fn push(&mut self, record: E) {
        self.index
            .insert(record.id().to_string(), self.records.len());
        self.records.push(record);
    }

    fn replace(&mut self, record: E) -> bool {
        match self.index.get(record.id()) {
            Some(&pos) => {
                self.records[pos] = record;
                true
            }
            None => false,
        }
    }

    fn remove(&mut self, id: &str) -> bool {
        match self.index.remove(id) {
            Some(pos) => {
                self.records.remove(pos);
                // positions after the removed record shifted down by one
                for (record_pos, record) in self.records.iter().enumerate().skip(pos) {
                    self.index.insert(record.id().to_string(), record_pos);
                }
                true
            }
            None => false,
        }
    }
}

/// The in-memory record store behind every repository and service
pub struct Store {
    backend: Box<dyn StoragePort>,
    prefix: String,
    users: RwLock<Arena<User>>,
    licenses: RwLock<Arena<License>>,
    tickets: RwLock<Arena<SupportTicket>>,
    animals: RwLock<Arena<Animal>>,
    incidents: RwLock<Arena<Incident>>,
    workers: RwLock<Arena<FieldWorker>>,
    tasks: RwLock<Arena<WorkTask>>,
    supplies: RwLock<Arena<Supply>>,
    files: RwLock<Arena<StoredFile>>,
    route_history: RwLock<Vec<RouteArchive>>,
}

impl Store {
    /// Open a store over the given port, loading every persisted collection
    pub fn open(
        backend: Box<dyn StoragePort>,
        prefix: impl Into<String>,
    ) -> Result<Self, StorageError> {
        let prefix = prefix.into();

        fn load<E: Entity>(
            backend: &dyn StoragePort,
            prefix: &str,
        ) -> Result<Arena<E>, StorageError> {
            let key = format!("{}_{}", prefix, E::COLLECTION);
            let records = match backend.load(&key)? {
                Some(payload) => serde_json::from_str(&payload)?,
                None => Vec::new(),
            };
            Ok(Arena::from_records(records))
        }

        let route_history = match backend.load(&format!("{}_{}", prefix, ROUTE_HISTORY_RECORD))? {
            Some(payload) => serde_json::from_str(&payload)?,
            None => Vec::new(),
        };

        let store = Self {
            users: RwLock::new(load(backend.as_ref(), &prefix)?),
            licenses: RwLock::new(load(backend.as_ref(), &prefix)?),
            tickets: RwLock::new(load(backend.as_ref(), &prefix)?),
            animals: RwLock::new(load(backend.as_ref(), &prefix)?),
            incidents: RwLock::new(load(backend.as_ref(), &prefix)?),
            workers: RwLock::new(load(backend.as_ref(), &prefix)?),
            tasks: RwLock::new(load(backend.as_ref(), &prefix)?),
            supplies: RwLock::new(load(backend.as_ref(), &prefix)?),
            files: RwLock::new(load(backend.as_ref(), &prefix)?),
            route_history: RwLock::new(route_history),
            backend,
            prefix,
        };

        tracing::debug!(prefix = %store.prefix, "store opened");
        Ok(store)
    }

    /// An empty store over an in-memory port, for tests and ephemeral use
    pub fn in_memory() -> Self {
        Self {
            backend: Box::new(InMemoryStorage::new()),
            prefix: DEFAULT_KEY_PREFIX.to_string(),
            users: RwLock::new(Arena::from_records(Vec::new())),
            licenses: RwLock::new(Arena::from_records(Vec::new())),
            tickets: RwLock::new(Arena::from_records(Vec::new())),
            animals: RwLock::new(Arena::from_records(Vec::new())),
            incidents: RwLock::new(Arena::from_records(Vec::new())),
            workers: RwLock::new(Arena::from_records(Vec::new())),
            tasks: RwLock::new(Arena::from_records(Vec::new())),
            supplies: RwLock::new(Arena::from_records(Vec::new())),
            files: RwLock::new(Arena::from_records(Vec::new())),
            route_history: RwLock::new(Vec::new()),
        }
    }

    fn key(&self, record: &str) -> String {
        format!("{}_{}", self.prefix, record)
    }

    pub fn users(&self) -> Repository<'_, User> {
        self.repository(&self.users)
    }

    pub fn licenses(&self) -> Repository<'_, License> {
        self.repository(&self.licenses)
    }

    pub fn tickets(&self) -> Repository<'_, SupportTicket> {
        self.repository(&self.tickets)
    }

    pub fn animals(&self) -> Repository<'_, Animal> {
        self.repository(&self.animals)
    }

    pub fn incidents(&self) -> Repository<'_, Incident> {
        self.repository(&self.incidents)
    }

    pub fn workers(&self) -> Repository<'_, FieldWorker> {
        self.repository(&self.workers)
    }

    pub fn tasks(&self) -> Repository<'_, WorkTask> {
        self.repository(&self.tasks)
    }

    pub fn supplies(&self) -> Repository<'_, Supply> {
        self.repository(&self.supplies)
    }

    pub fn files(&self) -> Repository<'_, StoredFile> {
        self.repository(&self.files)
    }

    fn repository<'s, E: Entity>(&'s self, cell: &'s RwLock<Arena<E>>) -> Repository<'s, E> {
        Repository {
            cell,
            backend: self.backend.as_ref(),
            key: self.key(E::COLLECTION),
        }
    }

    // ------------------------------------------------------------------
    // Current-session pointer (singleton record)
    // ------------------------------------------------------------------

    pub fn save_session_user(&self, user: &User) -> Result<(), StorageError> {
        let payload = serde_json::to_string(user)?;
        self.backend.save(&self.key(SESSION_RECORD), &payload)
    }

    pub fn load_session_user(&self) -> Result<Option<User>, StorageError> {
        match self.backend.load(&self.key(SESSION_RECORD))? {
            Some(payload) => Ok(Some(serde_json::from_str(&payload)?)),
            None => Ok(None),
        }
    }

    pub fn clear_session_user(&self) -> Result<(), StorageError> {
        self.backend.remove(&self.key(SESSION_RECORD))
    }

    // ------------------------------------------------------------------
    // Route history log (append-only, keyed by worker + date)
    // ------------------------------------------------------------------

    pub fn append_route_archive(&self, archive: RouteArchive) -> Result<(), StorageError> {
        let mut log = self
            .route_history
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        log.push(archive);
        let payload = serde_json::to_string(&*log)?;
        self.backend.save(&self.key(ROUTE_HISTORY_RECORD), &payload)
    }

    pub fn route_history_for(&self, worker_id: &str) -> Vec<RouteArchive> {
        self.route_history
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|archive| archive.worker_id == worker_id)
            .cloned()
            .collect()
    }
}

/// Uniform accessor over one entity collection
///
/// Mutating calls snapshot the whole collection back through the port
/// before returning. Absent ids are reported through the return value,
/// never as errors.
pub struct Repository<'s, E: Entity> {
    cell: &'s RwLock<Arena<E>>,
    backend: &'s dyn StoragePort,
    key: String,
}

impl<'s, E: Entity> Repository<'s, E> {
    /// All records, in insertion order
    pub fn list(&self) -> Vec<E> {
        self.read().records.clone()
    }

    pub fn get(&self, id: &str) -> Option<E> {
        self.read().get(id).cloned()
    }

    pub fn find(&self, pred: impl Fn(&E) -> bool) -> Vec<E> {
        self.read()
            .records
            .iter()
            .filter(|record| pred(record))
            .cloned()
            .collect()
    }

    pub fn find_first(&self, pred: impl Fn(&E) -> bool) -> Option<E> {
        self.read().records.iter().find(|record| pred(record)).cloned()
    }

    pub fn count(&self, pred: impl Fn(&E) -> bool) -> usize {
        self.read().records.iter().filter(|record| pred(record)).count()
    }

    pub fn len(&self) -> usize {
        self.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().records.is_empty()
    }

    /// Append a record and snapshot the collection
    pub fn insert(&self, record: E) -> Result<(), StorageError> {
        let mut arena = self.write();
        arena.push(record);
        self.persist(&arena)
    }

    /// Replace the stored record sharing this id; no-op `false` when absent
    pub fn replace(&self, record: E) -> Result<bool, StorageError> {
        let mut arena = self.write();
        if !arena.replace(record) {
            return Ok(false);
        }
        self.persist(&arena)?;
        Ok(true)
    }

    /// Atomically read-modify-write one record in place
    pub fn update_with(
        &self,
        id: &str,
        apply: impl FnOnce(&mut E),
    ) -> Result<bool, StorageError> {
        let mut arena = self.write();
        match arena.get_mut(id) {
            Some(record) => apply(record),
            None => return Ok(false),
        }
        self.persist(&arena)?;
        Ok(true)
    }

    pub fn remove(&self, id: &str) -> Result<bool, StorageError> {
        let mut arena = self.write();
        if !arena.remove(id) {
            return Ok(false);
        }
        self.persist(&arena)?;
        Ok(true)
    }

    fn persist(&self, arena: &Arena<E>) -> Result<(), StorageError> {
        let payload = serde_json::to_string(&arena.records)?;
        self.backend.save(&self.key, &payload)?;
        tracing::trace!(key = %self.key, records = arena.records.len(), "collection snapshot saved");
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, Arena<E>> {
        self.cell.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Arena<E>> {
        self.cell.write().unwrap_or_else(PoisonError::into_inner)
    }
}
