//! Daily task list.
//!
//! Tasks belong to one calendar day. Every view over them (tasks for the
//! selected day, dots on the month grid) is a pure query over the owned
//! collection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::ValidationError;

/// At most this many dots decorate a day cell.
pub const MAX_DAY_DOTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub text: String,
    pub date: NaiveDate,
    pub completed: bool,
}

#[derive(Debug, Clone)]
pub struct DailyTasks {
    tasks: Vec<Task>,
    selected_date: NaiveDate,
}

impl DailyTasks {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            tasks: Vec::new(),
            selected_date: today,
        }
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
    }

    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tasks on `date`, in the order they were added.
    pub fn for_date(&self, date: NaiveDate) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.date == date).collect()
    }

    pub fn for_selected_date(&self) -> Vec<&Task> {
        self.for_date(self.selected_date)
    }

    pub fn count_on(&self, date: NaiveDate) -> usize {
        self.tasks.iter().filter(|t| t.date == date).count()
    }

    /// Number of dots to draw on a calendar cell.
    pub fn dot_count(&self, date: NaiveDate) -> usize {
        self.count_on(date).min(MAX_DAY_DOTS)
    }

    /// Add a task for an explicit day.
    pub fn add(&mut self, text: &str, date: NaiveDate) -> Result<Uuid, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::Empty { field: "text" });
        }
        let task = Task {
            id: Uuid::new_v4(),
            text: text.to_string(),
            date,
            completed: false,
        };
        let id = task.id;
        debug!(%id, %date, "task added");
        self.tasks.push(task);
        Ok(id)
    }

    /// Add a task for the selected day.
    pub fn add_to_selected(&mut self, text: &str) -> Result<Uuid, ValidationError> {
        self.add(text, self.selected_date)
    }

    /// Flip completion. Returns the new state, or `None` for an unknown id.
    pub fn toggle(&mut self, id: Uuid) -> Option<bool> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.completed = !task.completed;
        Some(task.completed)
    }

    /// Returns `false` when no task had that id.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }
}
