//! End-to-end editor workflows through the public facade.

use quillkit::{
    BufferEngine, CallbackStore, EditorOptions, EditorShell, FixedScheme, LocalStore, SaveStatus,
    StorageStrategy, ThemeMode,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

fn immediate_options() -> EditorOptions {
    EditorOptions {
        autosave_delay: Duration::ZERO,
        ..EditorOptions::default()
    }
}

#[test]
fn typing_session_saves_and_reports_through_callbacks() {
    let writes: Arc<Mutex<Vec<String>>> = Arc::default();
    let writes_in = Arc::clone(&writes);
    let strategy = CallbackStore::new(
        move |_key, content| {
            writes_in.lock().unwrap().push(content.to_string());
            Ok(())
        },
        |_key| Ok(None),
        |_key| Ok(()),
    );

    let mut shell = EditorShell::new(
        immediate_options(),
        Box::new(strategy),
        Box::new(FixedScheme(false)),
    );
    shell.initialize(Ok(BufferEngine::new("")));

    let saved: Arc<Mutex<Vec<String>>> = Arc::default();
    let saved_in = Arc::clone(&saved);
    shell.callbacks_mut().on_save = Some(Box::new(move |content: &str| {
        saved_in.lock().unwrap().push(content.to_string())
    }));

    shell
        .engine_mut()
        .unwrap()
        .insert_text("One sentence. And another!");
    shell.tick();

    assert_eq!(shell.save_status(), SaveStatus::Saved);
    assert_eq!(shell.stats().sentences, 2);
    assert_eq!(shell.stats().words, 4);
    assert_eq!(
        writes.lock().unwrap().as_slice(),
        &["<p>One sentence. And another!</p>"]
    );
    assert_eq!(saved.lock().unwrap().len(), 1);
    assert!(shell.last_saved_at().is_some());
}

#[test]
fn draft_survives_remount_through_local_store() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("drafts.redb");

    {
        let store = LocalStore::open(&path).expect("store");
        let mut shell = EditorShell::new(
            immediate_options(),
            Box::new(store),
            Box::new(FixedScheme(false)),
        );
        shell.initialize(Ok(BufferEngine::new("")));
        shell.engine_mut().unwrap().insert_text("Persistent draft");
        shell.flush_pending_save(Duration::from_secs(1));
        assert_eq!(shell.save_status(), SaveStatus::Saved);
    }

    let store = LocalStore::open(&path).expect("reopen");
    let options = EditorOptions::default();
    let restored = store
        .restore(&options.autosave_key)
        .expect("restore")
        .expect("saved draft");
    assert_eq!(restored, "<p>Persistent draft</p>");

    let mut shell = EditorShell::new(options, Box::new(store), Box::new(FixedScheme(false)));
    shell.initialize(Ok(BufferEngine::new(&restored)));
    assert_eq!(shell.stats().words, 2);
    assert_eq!(shell.save_status(), SaveStatus::Idle);
}

#[test]
fn theme_choice_survives_remount_alongside_content() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("drafts.redb");

    {
        let store = LocalStore::open(&path).expect("store");
        let mut shell = EditorShell::new(
            EditorOptions::default(),
            Box::new(store),
            Box::new(FixedScheme(false)),
        );
        shell.initialize(Ok(BufferEngine::new("")));
        shell.set_theme_mode(ThemeMode::Dark);
    }

    let store = LocalStore::open(&path).expect("reopen");
    let mut shell: EditorShell<BufferEngine> = EditorShell::new(
        EditorOptions::default(),
        Box::new(store),
        Box::new(FixedScheme(false)),
    );
    assert!(shell.restore_theme_mode());
    assert_eq!(shell.theme().theme.name, "dark");
}
