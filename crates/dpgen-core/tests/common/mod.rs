#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use dpgen_core::document::DocumentFormat;
use dpgen_core::publish::{DiffPublisher, ValidationHook, VersionControl};

pub const ORDERS_CREATE: &str = include_str!("../fixtures/orders_create.yaml");
pub const WEATHER: &str = include_str!("../fixtures/weather.json");
pub const MISSING_DEFINITION: &str = include_str!("../fixtures/missing_definition.yaml");
pub const NULL_DEFINITION: &str = include_str!("../fixtures/null_definition.yaml");
pub const MALFORMED: &str = include_str!("../fixtures/malformed.yaml");
pub const MISSING_SUMMARY: &str = include_str!("../fixtures/missing_summary.yaml");
pub const UNRESOLVED_REF: &str = include_str!("../fixtures/unresolved_ref.yaml");

/// Records every path the hook was invoked with.
#[derive(Clone, Default)]
pub struct RecordingHook {
    pub calls: Rc<RefCell<Vec<PathBuf>>>,
}

impl ValidationHook for RecordingHook {
    fn run(&self, path: &Path) {
        self.calls.borrow_mut().push(path.to_path_buf());
    }
}

/// Reports a fixed answer and records every query.
#[derive(Clone, Default)]
pub struct FakeVcs {
    pub untracked: bool,
    pub queries: Rc<RefCell<Vec<PathBuf>>>,
}

impl FakeVcs {
    pub fn untracked() -> Self {
        Self {
            untracked: true,
            ..Self::default()
        }
    }
}

impl VersionControl for FakeVcs {
    fn is_untracked(&self, path: &Path) -> bool {
        self.queries.borrow_mut().push(path.to_path_buf());
        self.untracked
    }
}

pub fn publisher(format: DocumentFormat, vcs: &FakeVcs, hook: &RecordingHook) -> DiffPublisher {
    DiffPublisher::new(format, Box::new(vcs.clone()), Box::new(hook.clone()))
}

/// Write `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}
