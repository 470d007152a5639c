use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use dirnotes::config::NotesConfig;
use dirnotes::error::ApiError;
use dirnotes::host::{EditorLauncher, Host, LauncherSelector, Pick, Picker, StatusLine};
use dirnotes::search::SearchProvider;
use dirnotes::tooling::cli::CliContext;
use tempfile::TempDir;

/// What the scripted picker does with the items it is shown.
#[derive(Debug, Clone)]
pub enum Choice {
    Cancel,
    First,
    Label(String),
}

/// Everything the fake host observed.
#[derive(Default)]
pub struct Recorded {
    pub shown: Vec<Vec<String>>,
    pub opened: Vec<PathBuf>,
    pub status: Vec<String>,
}

pub type Log = Rc<RefCell<Recorded>>;

struct ScriptedPicker {
    query: String,
    choice: Choice,
    log: Log,
}

impl Picker for ScriptedPicker {
    fn pick(&self, provider: &dyn SearchProvider) -> Result<Option<Pick>, ApiError> {
        let labels: Vec<String> = provider.provide(&self.query).map(|item| item.label).collect();
        self.log.borrow_mut().shown.push(labels.clone());
        let label = match &self.choice {
            Choice::Cancel => None,
            Choice::First => labels.first().cloned(),
            Choice::Label(wanted) => labels.iter().find(|l| *l == wanted).cloned(),
        };
        Ok(label.map(|label| Pick {
            query: self.query.clone(),
            label,
        }))
    }
}

struct RecordingStatus {
    log: Log,
}

impl StatusLine for RecordingStatus {
    fn set(&self, message: &str) {
        self.log.borrow_mut().status.push(format!("set:{}", message));
    }

    fn clear(&self) {
        self.log.borrow_mut().status.push("clear".to_string());
    }
}

struct RecordingLauncher {
    log: Log,
}

impl EditorLauncher for RecordingLauncher {
    fn name(&self) -> &str {
        "recording-editor"
    }

    fn open(&self, note: &Path) -> Result<(), ApiError> {
        self.log.borrow_mut().opened.push(note.to_path_buf());
        Ok(())
    }
}

struct RecordingSelector {
    log: Log,
}

impl LauncherSelector for RecordingSelector {
    fn select(&self) -> Result<Box<dyn EditorLauncher>, ApiError> {
        Ok(Box::new(RecordingLauncher {
            log: Rc::clone(&self.log),
        }))
    }
}

/// Temporary sandbox holding directories, the data dir and the project marker.
pub struct Sandbox {
    _temp: TempDir,
    pub root: PathBuf,
}

impl Sandbox {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let root = dunce::canonicalize(temp.path()).unwrap();
        Self { _temp: temp, root }
    }

    pub fn dir(&self, rel: &str) -> PathBuf {
        let path = self.root.join(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    pub fn marker_path(&self) -> PathBuf {
        self.root.join(".currentprojectdir")
    }

    pub fn set_project(&self, project: &Path) {
        fs::write(self.marker_path(), format!("{}\n", project.display())).unwrap();
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join("data")
    }

    pub fn config(&self) -> NotesConfig {
        let mut config = NotesConfig::default();
        config.storage.data_dir = Some(self.data_dir());
        config.notes.project_marker = Some(self.marker_path());
        config
    }

    /// Context for `open_dir` whose picker searches `query` and applies `choice`.
    pub fn context(&self, open_dir: &Path, query: &str, choice: Choice) -> (CliContext, Log) {
        let (ctx, log) = self.try_context(open_dir, query, choice);
        (ctx.unwrap(), log)
    }

    pub fn try_context(
        &self,
        open_dir: &Path,
        query: &str,
        choice: Choice,
    ) -> (Result<CliContext, ApiError>, Log) {
        let log: Log = Rc::new(RefCell::new(Recorded::default()));
        let host = Host {
            picker: Box::new(ScriptedPicker {
                query: query.to_string(),
                choice,
                log: Rc::clone(&log),
            }),
            status: Box::new(RecordingStatus {
                log: Rc::clone(&log),
            }),
            launchers: Box::new(RecordingSelector {
                log: Rc::clone(&log),
            }),
        };
        let ctx = CliContext::with_host(open_dir.to_path_buf(), self.config(), host);
        (ctx, log)
    }

    /// Registry contents as persisted on disk.
    pub fn persisted_registry(&self) -> Vec<String> {
        let path = self.data_dir().join("notesdir.json");
        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap(),
            Err(_) => Vec::new(),
        }
    }
}

pub fn key(notes_dir: &Path) -> String {
    dirnotes::registry::registry_key(notes_dir)
}
