// Shared stub collaborators for unit tests. The event log is shared between
// the admin stub and the runner stub so ordering across both can be asserted.
use std::collections::{HashSet, VecDeque};
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use crate::admin::{AdminClient, DatabaseDocument};
use crate::smuggler::runner::{CommandRunner, ProcessResult};

pub type EventLog = Arc<Mutex<Vec<String>>>;

pub fn new_event_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub struct StubAdmin {
    pub server_url: String,
    /// Flat tenant listing, paged out by `list_database_names`.
    pub names: Vec<String>,
    pub disabled: HashSet<String>,
    pub existing: Mutex<HashSet<String>>,
    pub created: Mutex<Vec<DatabaseDocument>>,
    pub deleted: Mutex<Vec<(String, bool)>>,
    pub events: EventLog,
}

impl StubAdmin {
    pub fn new(events: EventLog) -> Self {
        Self {
            server_url: "http://localhost:8080".to_string(),
            names: Vec::new(),
            disabled: HashSet::new(),
            existing: Mutex::new(HashSet::new()),
            created: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
            events,
        }
    }
}

#[async_trait]
impl AdminClient for StubAdmin {
    fn server_url(&self) -> &str {
        &self.server_url
    }

    async fn list_database_names(&self, page_size: usize, start: usize) -> Result<Vec<String>> {
        let end = (start + page_size).min(self.names.len());
        if start >= end {
            return Ok(Vec::new());
        }
        Ok(self.names[start..end].to_vec())
    }

    async fn database_exists(&self, name: &str) -> Result<bool> {
        Ok(self.existing.lock().unwrap().contains(name))
    }

    async fn is_database_disabled(&self, name: &str) -> Result<bool> {
        Ok(self.disabled.contains(name))
    }

    async fn create_database(&self, document: &DatabaseDocument) -> Result<()> {
        self.events
            .lock()
            .unwrap()
            .push(format!("create {}", document.id));
        self.existing.lock().unwrap().insert(document.id.clone());
        self.created.lock().unwrap().push(document.clone());
        Ok(())
    }

    async fn delete_database(&self, name: &str, hard_delete: bool) -> Result<()> {
        self.events.lock().unwrap().push(format!("delete {name}"));
        self.existing.lock().unwrap().remove(name);
        self.deleted
            .lock()
            .unwrap()
            .push((name.to_string(), hard_delete));
        Ok(())
    }
}

pub struct StubRunner {
    /// Scripted exit codes, consumed per invocation; exhausted means success.
    pub exit_codes: Mutex<VecDeque<i32>>,
    pub calls: Mutex<Vec<(String, Vec<String>)>>,
    pub events: EventLog,
}

impl StubRunner {
    pub fn new(events: EventLog) -> Self {
        Self {
            exit_codes: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            events,
        }
    }

    pub fn script_exit_codes(&self, codes: &[i32]) {
        *self.exit_codes.lock().unwrap() = codes.iter().copied().collect();
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl CommandRunner for StubRunner {
    fn run(&self, program: &Path, args: &[String]) -> crate::errors::Result<ProcessResult> {
        self.events
            .lock()
            .unwrap()
            .push(format!("run {}", args.join(" ")));
        self.calls
            .lock()
            .unwrap()
            .push((program.display().to_string(), args.to_vec()));

        let exit_code = self.exit_codes.lock().unwrap().pop_front().unwrap_or(0);
        Ok(ProcessResult {
            exit_code,
            output: String::new(),
        })
    }
}
