use std::fs;

use dirnotes::error::{ApiError, StorageError};
use dirnotes::tooling::cli::Commands;

use crate::support::{key, Choice, Sandbox};

fn open(target: Option<&str>, path: Option<std::path::PathBuf>) -> Commands {
    Commands::Open {
        target: target.map(Into::into),
        path,
    }
}

#[test]
fn open_creates_note_and_registers_directory() {
    let sandbox = Sandbox::new();
    let open_dir = sandbox.dir("a/b");
    fs::write(open_dir.join("report.txt"), "data").unwrap();
    let (ctx, log) = sandbox.context(&open_dir, "", Choice::Cancel);

    let output = ctx.execute(&open(Some("report.txt"), None)).unwrap();

    let notes_dir = open_dir.join(".notes");
    let note = notes_dir.join("report.txt.md");
    assert!(output.contains("Opened note"), "{}", output);
    assert!(output.contains("Created notes directory"), "{}", output);
    assert_eq!(fs::metadata(&note).unwrap().len(), 0);
    assert_eq!(log.borrow().opened, vec![note]);
    assert_eq!(sandbox.persisted_registry(), vec![key(&notes_dir)]);
}

#[test]
fn second_open_reuses_directory_and_keeps_content() {
    let sandbox = Sandbox::new();
    let open_dir = sandbox.dir("a/b");
    let (ctx, log) = sandbox.context(&open_dir, "", Choice::Cancel);

    ctx.execute(&open(Some("todo.txt"), None)).unwrap();
    let note = open_dir.join(".notes").join("todo.txt.md");
    fs::write(&note, "# remember").unwrap();
    let output = ctx.execute(&open(Some("todo.txt"), None)).unwrap();

    assert!(!output.contains("Created notes directory"));
    assert_eq!(fs::read_to_string(&note).unwrap(), "# remember");
    assert_eq!(log.borrow().opened, vec![note.clone(), note]);
    assert_eq!(sandbox.persisted_registry().len(), 1);
}

#[test]
fn open_without_selection_reports_nothing_selected() {
    let sandbox = Sandbox::new();
    let open_dir = sandbox.dir("a");
    let (ctx, log) = sandbox.context(&open_dir, "", Choice::Cancel);

    let err = ctx.execute(&open(None, None)).unwrap_err();

    assert!(matches!(err, ApiError::NothingSelected));
    assert_eq!(err.to_string(), "Nothing is selected.");
    assert!(!open_dir.join(".notes").exists());
    assert!(log.borrow().opened.is_empty());
    assert!(sandbox.persisted_registry().is_empty());
}

#[test]
fn path_override_anchors_at_its_parent() {
    let sandbox = Sandbox::new();
    let open_dir = sandbox.dir("open");
    let elsewhere = sandbox.dir("elsewhere/deep");
    let (ctx, log) = sandbox.context(&open_dir, "", Choice::Cancel);

    ctx.execute(&open(Some("ignored.txt"), Some(elsewhere.join("plan.txt"))))
        .unwrap();

    let note = elsewhere.join(".notes").join("plan.txt.md");
    assert!(note.exists());
    assert!(!open_dir.join(".notes").exists());
    assert_eq!(log.borrow().opened, vec![note]);
}

#[test]
fn project_marker_routes_notes_to_project_root() {
    let sandbox = Sandbox::new();
    let project = sandbox.dir("proj");
    let open_dir = sandbox.dir("proj/sub/dir");
    sandbox.set_project(&project);
    let (ctx, _log) = sandbox.context(&open_dir, "", Choice::Cancel);

    ctx.execute(&open(Some("lib.rs"), None)).unwrap();

    assert!(project.join(".notes").join("lib.rs.md").exists());
    assert!(!open_dir.join(".notes").exists());
    assert_eq!(
        sandbox.persisted_registry(),
        vec![key(&project.join(".notes"))]
    );
}

#[test]
fn empty_marker_file_means_no_project() {
    let sandbox = Sandbox::new();
    let open_dir = sandbox.dir("proj/sub");
    fs::write(sandbox.marker_path(), "").unwrap();
    let (ctx, _log) = sandbox.context(&open_dir, "", Choice::Cancel);

    ctx.execute(&open(Some("x"), None)).unwrap();

    assert!(open_dir.join(".notes").join("x.md").exists());
}

#[test]
fn opening_the_directory_itself_names_the_note_after_it() {
    let sandbox = Sandbox::new();
    let open_dir = sandbox.dir("work/reports");
    let (ctx, _log) = sandbox.context(&open_dir, "", Choice::Cancel);

    ctx.execute(&open(Some("."), None)).unwrap();

    assert!(open_dir.join(".notes").join("reports.md").exists());
}

#[cfg(unix)]
#[test]
fn symlinked_entry_keeps_its_own_name() {
    let sandbox = Sandbox::new();
    let open_dir = sandbox.dir("open");
    let elsewhere = sandbox.dir("elsewhere");
    fs::write(elsewhere.join("real.txt"), "data").unwrap();
    std::os::unix::fs::symlink(elsewhere.join("real.txt"), open_dir.join("link.txt")).unwrap();
    let (ctx, log) = sandbox.context(&open_dir, "", Choice::Cancel);

    ctx.execute(&open(Some("link.txt"), None)).unwrap();

    let note = open_dir.join(".notes").join("link.txt.md");
    assert!(note.exists());
    assert!(!elsewhere.join(".notes").exists());
    assert!(!open_dir.join(".notes").join("real.txt.md").exists());
    assert_eq!(log.borrow().opened, vec![note]);
}

#[cfg(unix)]
#[test]
fn symlinked_path_override_anchors_at_the_link_parent() {
    let sandbox = Sandbox::new();
    let open_dir = sandbox.dir("open");
    let linked = sandbox.dir("linked");
    let elsewhere = sandbox.dir("elsewhere");
    fs::write(elsewhere.join("real.txt"), "data").unwrap();
    std::os::unix::fs::symlink(elsewhere.join("real.txt"), linked.join("plan.txt")).unwrap();
    let (ctx, log) = sandbox.context(&open_dir, "", Choice::Cancel);

    ctx.execute(&open(None, Some(linked.join("plan.txt")))).unwrap();

    let note = linked.join(".notes").join("plan.txt.md");
    assert!(note.exists());
    assert!(!elsewhere.join(".notes").exists());
    assert_eq!(log.borrow().opened, vec![note]);
}

#[test]
fn relative_target_with_dots_resolves_under_open_dir() {
    let sandbox = Sandbox::new();
    let open_dir = sandbox.dir("top/inner");
    let (ctx, _log) = sandbox.context(&open_dir, "", Choice::Cancel);

    ctx.execute(&open(Some("./sub/../notes.txt"), None)).unwrap();

    assert!(open_dir.join(".notes").join("notes.txt.md").exists());
}

#[test]
fn dir_that_is_a_file_is_an_invalid_path() {
    let sandbox = Sandbox::new();
    let file = sandbox.dir("a").join("plain.txt");
    fs::write(&file, "x").unwrap();

    let (ctx, _log) = sandbox.try_context(&file, "", Choice::Cancel);

    match ctx {
        Err(ApiError::StorageError(StorageError::InvalidPath(message))) => {
            assert!(message.contains("Not a directory"), "{}", message);
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected an invalid path error"),
    }
}
