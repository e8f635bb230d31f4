//! Native demo application around the editor widget.

use quillkit_core::buffer::BufferEngine;
use quillkit_core::config::EditorOptions;
use quillkit_core::error::EditorError;
use quillkit_core::shell::EditorShell;
use quillkit_core::storage::{LocalStore, StorageStrategy};
use quillkit_core::theme::{FixedScheme, ThemeMode};
use quillkit_egui::RichEditorView;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_DB_FILE: &str = "quillkit-demo.redb";
const SHUTDOWN_FLUSH_LIMIT: Duration = Duration::from_secs(2);

struct DemoApp {
    shell: EditorShell<BufferEngine>,
    view: RichEditorView,
}

impl DemoApp {
    fn new() -> Result<Self, EditorError> {
        let db_path =
            std::env::var("QUILLKIT_DB").unwrap_or_else(|_| DEFAULT_DB_FILE.to_string());
        let store = LocalStore::open(&db_path)?;

        let mut options = EditorOptions {
            placeholder: "Start typing; your draft saves automatically.".to_string(),
            autofocus: true,
            ..EditorOptions::default()
        }
        .apply_env_overrides();
        if let Ok(mode) = std::env::var("QUILLKIT_THEME") {
            options.theme_mode = mode.parse().unwrap_or(ThemeMode::Light);
        }

        let restored = store.restore(&options.autosave_key)?;
        if restored.is_some() {
            info!("Restored previous draft");
        }
        let initial = restored.unwrap_or_default();

        let mut shell = EditorShell::new(options, Box::new(store), Box::new(FixedScheme(true)));
        shell.restore_theme_mode();
        shell.callbacks_mut().on_save = Some(Box::new(|content: &str| {
            info!(bytes = content.len(), "Draft saved");
        }));
        shell.initialize(Ok(BufferEngine::new(&initial)));
        Ok(Self {
            shell,
            view: RichEditorView::new(),
        })
    }
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &eframe::egui::Context, _frame: &mut eframe::Frame) {
        self.view.show(ctx, &mut self.shell);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.shell.flush_pending_save(SHUTDOWN_FLUSH_LIMIT);
        self.shell.teardown();
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("quillkit=info"))
        .unwrap();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

/// Start the demo editor with tracing enabled.
///
/// # Errors
/// Propagates `eframe` initialization or runtime errors, including app
/// creation failures when the content store cannot be opened.
pub fn run() -> eframe::Result<()> {
    init_tracing();

    let app = DemoApp::new().map_err(|err| eframe::Error::AppCreation(Box::new(err)))?;

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([900.0, 640.0])
            .with_min_inner_size([480.0, 320.0])
            .with_title("QuillKit Demo"),
        ..Default::default()
    };

    eframe::run_native("QuillKit Demo", options, Box::new(|_cc| Ok(Box::new(app))))
}
