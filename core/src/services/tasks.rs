//! Work task operations

use std::sync::Arc;

use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::store::{sequential_id, Store};
use shared::models::{TaskStatus, WorkTask};

/// Task service
#[derive(Clone)]
pub struct TaskService {
    store: Arc<Store>,
}

/// Input for creating a task
#[derive(Debug, Deserialize)]
pub struct AddTaskInput {
    pub description: String,
    pub worker_id: Option<String>,
}

impl TaskService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<WorkTask> {
        self.store.tasks().list()
    }

    pub fn get(&self, id: &str) -> Option<WorkTask> {
        self.store.tasks().get(id)
    }

    pub fn by_worker(&self, worker_id: &str) -> Vec<WorkTask> {
        self.store
            .tasks()
            .find(|t| t.worker_id.as_deref() == Some(worker_id))
    }

    pub fn add(&self, input: AddTaskInput) -> AppResult<WorkTask> {
        if input.description.trim().is_empty() {
            return Err(AppError::validation(
                "description",
                "Task description cannot be empty",
                "A descrição da tarefa não pode ser vazia",
            ));
        }

        let tasks = self.store.tasks();
        let task = WorkTask {
            id: sequential_id("T", tasks.len()),
            description: input.description,
            status: TaskStatus::Pending,
            worker_id: input.worker_id,
        };
        tasks.insert(task.clone())?;

        if let Some(worker_id) = &task.worker_id {
            self.store
                .workers()
                .update_with(worker_id, |w| w.tasks_pending += 1)?;
        }

        Ok(task)
    }

    /// Move a task between pending and done, keeping the assigned worker's
    /// display counters in step. Returns `Ok(false)` when the id is absent.
    pub fn set_status(&self, task_id: &str, status: TaskStatus) -> AppResult<bool> {
        let Some(task) = self.store.tasks().get(task_id) else {
            return Ok(false);
        };
        if task.status == status {
            return Ok(true);
        }

        self.store
            .tasks()
            .update_with(task_id, |t| t.status = status)?;

        if let Some(worker_id) = &task.worker_id {
            self.store.workers().update_with(worker_id, |w| match status {
                TaskStatus::Done => {
                    w.tasks_completed += 1;
                    w.tasks_pending = w.tasks_pending.saturating_sub(1);
                }
                TaskStatus::Pending => {
                    w.tasks_completed = w.tasks_completed.saturating_sub(1);
                    w.tasks_pending += 1;
                }
            })?;
        }

        Ok(true)
    }
}
