//! Stand-ins for mfold. They are all written before any test spawns a
//! process, so no test ever executes a script that another thread still
//! holds open for writing.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::path::PathBuf;
use std::sync::OnceLock;

use tempfile::TempDir;

pub struct Stubs {
    _dir: TempDir,
    /// Checks its invocation, writes both outputs, exits 0.
    pub folds: PathBuf,
    /// Leaves outputs behind but exits 1.
    pub fails: PathBuf,
    /// Never finishes on its own.
    pub sleeps: PathBuf,
}

const FOLDS: &str = r#"#!/bin/sh
[ "$1" = "SEQ=sequence" ] || exit 2
[ -s sequence ] || exit 3
cp sequence sequence_1.pdf
printf '1 9\n2 8\n' > sequence_1.ss
exit 0
"#;

const FAILS: &str = r#"#!/bin/sh
touch sequence_1.pdf sequence_1.ss
exit 1
"#;

const SLEEPS: &str = r#"#!/bin/sh
exec sleep 30
"#;

fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

pub fn stubs() -> &'static Stubs {
    static STUBS: OnceLock<Stubs> = OnceLock::new();
    STUBS.get_or_init(|| {
        let dir = tempfile::tempdir().unwrap();
        Stubs {
            folds: script(dir.path(), "mfold-ok", FOLDS),
            fails: script(dir.path(), "mfold-fail", FAILS),
            sleeps: script(dir.path(), "mfold-slow", SLEEPS),
            _dir: dir,
        }
    })
}
