use ping_overlay::app::{App, AppEvent};
use ping_overlay::config::{ConfigStore, Settings, SharedSettings};
use ping_overlay::overlay::{place, Corner, Point, Size, WindowFlags};
use ping_overlay::probe::{PingBackend, Prober, Reading};
use ping_overlay::sampler::{ActivityGate, SamplingLoop};
use ping_overlay::tray::{EditOutcome, RenderLayer, SettingsEditor, TrayCommand, TrayController};
use ping_overlay::{OverlayError, Result};
use std::collections::VecDeque;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;

/// Test helper: renderer that remembers the last thing it drew
#[derive(Default)]
struct FakeRenderer {
    windows: Vec<WindowFlags>,
    visible: bool,
    last_text: String,
    position: Point,
    closed: bool,
}

impl RenderLayer for FakeRenderer {
    fn screen_size(&self) -> Size {
        Size::new(1920, 1080)
    }

    fn create_window(&mut self, flags: WindowFlags) {
        self.windows.push(flags);
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn render(&mut self, reading: &Reading) -> Size {
        self.last_text = reading.text.clone();
        Size::new(80, 20)
    }

    fn move_to(&mut self, position: Point) {
        self.position = position;
    }

    fn notice(&mut self, _message: &str) {}

    fn close(&mut self) {
        self.closed = true;
    }
}

/// Test helper: editor replaying a fixed list of outcomes
#[derive(Default)]
struct ScriptedEditor {
    outcomes: VecDeque<EditOutcome>,
    rejections: usize,
}

impl ScriptedEditor {
    fn new(outcomes: Vec<EditOutcome>) -> Self {
        Self {
            outcomes: outcomes.into(),
            rejections: 0,
        }
    }
}

impl SettingsEditor for ScriptedEditor {
    fn edit(&mut self, _current: &Settings, _first_run: bool) -> Result<EditOutcome> {
        Ok(self.outcomes.pop_front().unwrap_or(EditOutcome::Cancel))
    }

    fn reject(&mut self, _error: &OverlayError) {
        self.rejections += 1;
    }
}

/// Test helper: backend that answers 7 ms and asks the app to exit on the third probe
struct ExitAfterThree {
    calls: AtomicUsize,
    events: Mutex<Sender<AppEvent>>,
}

impl PingBackend for ExitAfterThree {
    fn ping(&self, _host: &str, _timeout: Duration) -> Result<Option<Duration>> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 2 {
            if let Ok(events) = self.events.lock() {
                let _ = events.send(AppEvent::Command(TrayCommand::Exit));
            }
        }
        Ok(Some(Duration::from_millis(7)))
    }
}

fn controller(
    dir: &TempDir,
    editor: ScriptedEditor,
    gate: ActivityGate,
) -> TrayController<FakeRenderer, ScriptedEditor> {
    let store = ConfigStore::new(dir.path().join("settings.json"));
    let settings = SharedSettings::new(store.load());
    TrayController::new(store, settings, FakeRenderer::default(), editor, gate)
}

#[test]
fn test_store_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = ConfigStore::new(dir.path().join("nested").join("settings.json"));
    assert!(store.is_first_run());

    let settings = Settings {
        host: "8.8.8.8".to_string(),
        green_threshold: 30,
        yellow_threshold: 90,
        show_on_startup: false,
        click_through: true,
        position: Corner::BottomLeft,
    };
    store.save(&settings).unwrap();

    assert!(!store.is_first_run());
    assert_eq!(store.load(), settings);
}

#[test]
fn test_older_document_merges_with_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{"host": "1.1.1.1", "show_on_startup": false}"#).unwrap();

    let settings = ConfigStore::new(&path).load();
    assert_eq!(settings.host, "1.1.1.1");
    assert!(!settings.show_on_startup);
    assert_eq!(settings.green_threshold, 50);
    assert_eq!(settings.yellow_threshold, 100);
    assert_eq!(settings.position, Corner::TopLeft);
}

#[test]
fn test_place_top_right() {
    let position = place(Corner::TopRight, Size::new(80, 20), Size::new(1920, 1080));
    assert_eq!(position, Point::new(1835, 5));
}

#[test]
fn test_sampler_feeds_event_loop_until_exit() {
    let dir = TempDir::new().unwrap();
    let gate = ActivityGate::default();
    let (tx, rx) = mpsc::channel();

    let controller = controller(&dir, ScriptedEditor::default(), gate.clone());
    let mut app = App::with_channel(controller, tx.clone(), rx);
    app.controller_mut().show_overlay();

    let backend = ExitAfterThree {
        calls: AtomicUsize::new(0),
        events: Mutex::new(tx),
    };
    let sampler = SamplingLoop::new(
        Prober::new(backend),
        app.controller().settings().clone(),
        app.sink(),
        Duration::from_millis(5),
        Duration::from_millis(100),
    )
    .with_gate(gate.clone())
    .spawn()
    .unwrap();

    app.run();
    let stats = sampler.shutdown();

    assert!(stats.replies >= 3);
    assert!(!gate.is_active());

    let renderer = app.controller().renderer();
    assert_eq!(renderer.last_text, "7 ms");
    assert!(renderer.closed);
    assert_eq!(renderer.position, Point::new(5, 5));

    // Exit flushes the settings document
    assert!(dir.path().join("settings.json").exists());
}

#[test]
fn test_first_run_rejects_then_accepts() {
    let dir = TempDir::new().unwrap();
    let gate = ActivityGate::default();

    let inverted = Settings {
        green_threshold: 200,
        yellow_threshold: 100,
        ..Settings::default()
    };
    let accepted = Settings {
        host: "example.org".to_string(),
        click_through: true,
        position: Corner::BottomRight,
        ..Settings::default()
    };
    let editor = ScriptedEditor::new(vec![
        EditOutcome::Apply(inverted),
        EditOutcome::Apply(accepted.clone()),
    ]);

    let mut controller = controller(&dir, editor, gate.clone());
    assert!(controller.store().is_first_run());
    assert!(controller.open_settings(true));

    assert_eq!(controller.editor().rejections, 1);
    assert_eq!(controller.store().load(), accepted);
    assert_eq!(*controller.settings().snapshot(), accepted);
    assert!(controller.window().is_visible());
    assert!(gate.is_active());
    assert_eq!(
        controller.renderer().windows.last(),
        Some(&WindowFlags::overlay(true))
    );
    assert_eq!(controller.renderer().position, Point::new(1835, 1055));
}

#[test]
fn test_first_run_declined_leaves_nothing_behind() {
    let dir = TempDir::new().unwrap();
    let gate = ActivityGate::default();

    let mut controller = controller(&dir, ScriptedEditor::new(vec![EditOutcome::Cancel]), gate.clone());
    assert!(!controller.open_settings(true));

    assert!(controller.store().is_first_run());
    assert!(!controller.window().is_visible());
    assert!(!gate.is_active());
}
