//! Integration tests for sshgo
//!
//! Drives the host list and application shell against real YAML storage.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::Write;
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tempfile::{tempdir, TempDir};

use sshgo::config::{ApplicationState, Settings, SharedState};
use sshgo::host_list::{HostListOptions, ListError, Update};
use sshgo::ssh::{ExecError, Executor, SshCommand, SshCommandBuilder};
use sshgo::storage::{self, Host, HostStorage, YamlStorage};
use sshgo::{Event, HostId, HostList, Message, Mode};

/// Executor that records commands and replays a scripted outcome
#[derive(Clone, Default)]
struct ScriptedExecutor {
    runs: Rc<RefCell<Vec<String>>>,
    stderr: &'static str,
    fail: bool,
}

impl Executor for ScriptedExecutor {
    fn execute(&mut self, command: &SshCommand, stderr: &mut dyn Write) -> Result<(), ExecError> {
        self.runs.borrow_mut().push(command.to_string());
        stderr.write_all(self.stderr.as_bytes())?;
        if self.fail {
            Err(ExecError::Terminal("exit status: 255".to_string()))
        } else {
            Ok(())
        }
    }
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn seeded_storage(hosts: Vec<Host>) -> (YamlStorage, TempDir) {
    let dir = tempdir().unwrap();
    let mut yaml = YamlStorage::in_dir(dir.path()).unwrap();
    for host in hosts {
        yaml.save(host).unwrap();
    }
    (yaml, dir)
}

/// Host list plus a FIFO message loop, the way the application drives it
struct Driver {
    list: HostList,
    storage: Rc<RefCell<YamlStorage>>,
    state: SharedState,
    events: Vec<Event>,
    _dir: TempDir,
}

impl Driver {
    fn new(hosts: Vec<Host>, executor: ScriptedExecutor) -> Self {
        let (yaml, dir) = seeded_storage(hosts);
        let storage = Rc::new(RefCell::new(yaml));
        let state = ApplicationState::default().into_shared();
        let list = HostList::new(
            storage.clone(),
            state.clone(),
            Box::new(SshCommandBuilder::default()),
            Box::new(executor),
            HostListOptions::default(),
        );

        let mut driver = Self {
            list,
            storage,
            state,
            events: Vec::new(),
            _dir: dir,
        };
        let init = driver.list.init();
        driver.run(init);
        driver
    }

    fn run(&mut self, update: Update) {
        let mut queue: VecDeque<Message> = update.messages.into();
        self.handle(update.events);
        while let Some(message) = queue.pop_front() {
            let update = self.list.update(message);
            queue.extend(update.messages);
            self.handle(update.events);
        }
    }

    fn handle(&mut self, events: Vec<Event>) {
        for event in events {
            if let Event::HostSelected(id) = event {
                self.state.borrow_mut().selected = Some(id);
            }
            self.events.push(event);
        }
    }

    fn press(&mut self, code: KeyCode) {
        self.run(Update::message(Message::Key(key(code))));
    }

    fn titles(&self) -> Vec<String> {
        self.list
            .list()
            .visible_items()
            .map(|i| i.title().to_string())
            .collect()
    }

    fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

fn hosts(titles: &[&str]) -> Vec<Host> {
    titles
        .iter()
        .map(|t| Host::new(t, &format!("{}.example.com", t)))
        .collect()
}

mod host_list_flow {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_initial_refresh_is_sorted() {
        let driver = Driver::new(hosts(&["web", "db", "cache"]), ScriptedExecutor::default());

        assert_eq!(driver.titles(), vec!["cache", "db", "web"]);
        assert_eq!(driver.list.title(), "press 'n' to add a new host");
    }

    #[test]
    fn test_remove_round_trips_through_storage() {
        let mut driver = Driver::new(hosts(&["a", "b", "c"]), ScriptedExecutor::default());
        driver.press(KeyCode::Char('j'));
        driver.press(KeyCode::Char('j'));
        assert_eq!(driver.list.selected().unwrap().title(), "b");

        driver.press(KeyCode::Char('d'));
        assert_eq!(driver.list.mode(), Mode::ConfirmRemove);
        assert_eq!(driver.list.title(), "delete \"b\" ? (y/N)");

        driver.press(KeyCode::Char('y'));

        assert_eq!(driver.list.mode(), Mode::Normal);
        assert_eq!(driver.titles(), vec!["a", "c"]);
        let stored: Vec<String> = driver
            .storage
            .borrow()
            .get_all()
            .unwrap()
            .into_iter()
            .map(|h| h.title)
            .collect();
        assert_eq!(stored, vec!["a", "c"]);
    }

    #[test]
    fn test_clone_twice() {
        let mut driver = Driver::new(hosts(&["db1"]), ScriptedExecutor::default());
        driver.press(KeyCode::Char('j'));

        driver.press(KeyCode::Char('c'));
        driver.press(KeyCode::Char('c'));

        assert_eq!(driver.titles(), vec!["db1", "db1 1", "db1 2"]);
        assert_eq!(driver.list.selected().unwrap().title(), "db1");
    }

    #[test]
    fn test_selection_survives_refresh() {
        let mut driver = Driver::new(hosts(&["a", "b"]), ScriptedExecutor::default());
        driver.press(KeyCode::Char('j'));
        driver.press(KeyCode::Char('j'));
        driver.take_events();

        driver
            .storage
            .borrow_mut()
            .save(Host::new("0-first", "first.example.com"))
            .unwrap();
        driver.run(Update::message(Message::RefreshRepo));

        assert_eq!(driver.list.selected().unwrap().title(), "b");
        let events = driver.take_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], Event::RefreshCompleted));
    }

    #[test]
    fn test_connect_failure_event() {
        let executor = ScriptedExecutor {
            stderr: "\n  Permission denied (publickey).  \n",
            fail: true,
            ..ScriptedExecutor::default()
        };
        let runs = executor.runs.clone();
        let mut driver = Driver::new(
            vec![Host::new("prod", "10.1.1.1").with_user("ops")],
            executor,
        );
        driver.press(KeyCode::Char('j'));
        driver.take_events();

        driver.press(KeyCode::Enter);

        assert_eq!(*runs.borrow(), vec!["ssh ops@10.1.1.1".to_string()]);
        let failures: Vec<String> = driver
            .take_events()
            .into_iter()
            .filter_map(|e| match e {
                Event::ProcessError(f) => Some(f.to_string()),
                _ => None,
            })
            .collect();
        assert_eq!(
            failures,
            vec!["Command: ssh ops@10.1.1.1\nError:   Permission denied (publickey).".to_string()]
        );
        assert_eq!(driver.list.mode(), Mode::Normal);
    }

    #[test]
    fn test_no_selection_on_empty_list() {
        let mut driver = Driver::new(Vec::new(), ScriptedExecutor::default());
        driver.take_events();

        driver.press(KeyCode::Char('c'));

        let events = driver.take_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], Event::Error(ListError::NoSelection)));
    }

    #[test]
    fn test_edit_and_create_requests() {
        let mut driver = Driver::new(hosts(&["a"]), ScriptedExecutor::default());
        driver.press(KeyCode::Char('j'));
        driver.take_events();

        driver.press(KeyCode::Char('e'));
        driver.press(KeyCode::Char('n'));

        let events = driver.take_events();
        assert!(matches!(
            events[..],
            [Event::EditHost(HostId(1)), Event::CreateHost]
        ));
    }
}

mod app_shell {
    use super::*;
    use pretty_assertions::assert_eq;
    use sshgo::App;

    fn app(titles: &[&str], executor: ScriptedExecutor) -> (App, TempDir) {
        let (yaml, dir) = seeded_storage(hosts(titles));
        let mut app = App::new(
            Settings::default(),
            storage::shared(yaml),
            ApplicationState::default().into_shared(),
            ApplicationState::path_in(dir.path()),
            Box::new(executor),
        )
        .unwrap();
        app.start(80, 24);
        (app, dir)
    }

    #[test]
    fn test_selection_restored_across_sessions() {
        let dir = {
            let (mut first, dir) = app(&["a", "b", "c"], ScriptedExecutor::default());
            first.handle_key(key(KeyCode::Char('j')));
            first.handle_key(key(KeyCode::Char('G')));
            assert_eq!(first.host_list.selected().unwrap().title(), "c");
            dir
        };

        let state_path = ApplicationState::path_in(dir.path());
        let state = ApplicationState::load(&state_path).unwrap();
        let mut second = App::new(
            Settings::default(),
            storage::shared(YamlStorage::in_dir(dir.path()).unwrap()),
            state.into_shared(),
            state_path,
            Box::new(ScriptedExecutor::default()),
        )
        .unwrap();
        second.start(80, 24);

        assert_eq!(second.host_list.selected().unwrap().title(), "c");
        assert_eq!(second.host_list.title(), "ssh c.example.com");
    }

    #[test]
    fn test_process_error_shown() {
        let executor = ScriptedExecutor {
            stderr: "boom",
            fail: true,
            ..ScriptedExecutor::default()
        };
        let (mut app, _dir) = app(&["a"], executor);

        app.handle_key(key(KeyCode::Char('j')));
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(
            app.error_message.as_deref(),
            Some("Command: ssh a.example.com\nError:   boom")
        );
        assert!(app.take_needs_clear());
    }

    #[test]
    fn test_filter_then_connect() {
        let executor = ScriptedExecutor::default();
        let runs = executor.runs.clone();
        let (mut app, _dir) = app(&["alpha", "beta", "gamma"], executor);

        for code in [
            KeyCode::Char('/'),
            KeyCode::Char('g'),
            KeyCode::Char('m'),
            KeyCode::Enter,
            KeyCode::Enter,
        ] {
            app.handle_key(key(code));
        }

        assert_eq!(*runs.borrow(), vec!["ssh gamma.example.com".to_string()]);
    }
}

mod config_operations {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_settings_roundtrip() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("test_config.toml");
        let path_str = config_path.to_string_lossy().to_string();

        let mut settings = Settings::default();
        settings.ssh.program = "/opt/ssh".to_string();
        settings.keybindings.connect = vec!["Enter".to_string(), "o".to_string()];

        settings.save(Some(path_str.as_str())).unwrap();
        let loaded = Settings::load(Some(path_str.as_str())).unwrap();

        assert_eq!(loaded.ssh.program, "/opt/ssh");
        assert_eq!(loaded.keybindings.connect.len(), 2);
    }

    #[test]
    fn test_custom_keys_drive_host_list() {
        let mut settings = Settings::default();
        settings.keybindings.remove = vec!["x".to_string()];
        settings.keybindings.confirm = vec!["Enter".to_string()];
        settings.keybindings.connect = vec!["o".to_string()];

        let (yaml, _dir) = seeded_storage(hosts(&["a"]));
        let mut list = HostList::new(
            storage::shared(yaml),
            ApplicationState::default().into_shared(),
            Box::new(SshCommandBuilder::from_settings(&settings.ssh)),
            Box::new(ScriptedExecutor::default()),
            HostListOptions::from_settings(&settings).unwrap(),
        );
        list.update(Message::RefreshRepo);
        list.update(Message::Key(key(KeyCode::Char('j'))));
        list.update(Message::RefreshUi);

        list.update(Message::Key(key(KeyCode::Char('x'))));
        assert_eq!(list.mode(), Mode::ConfirmRemove);
        assert_eq!(list.title(), "delete \"a\" ? (enter/N)");

        list.update(Message::Key(key(KeyCode::Enter)));
        list.update(Message::RefreshRepo);
        assert_eq!(list.list().items().len(), 0);
    }
}

mod rendering {
    use super::*;
    use pretty_assertions::assert_eq;
    use ratatui::{backend::TestBackend, Terminal};
    use sshgo::App;

    #[allow(deprecated)]
    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| sshgo::ui::draw(frame, app)).unwrap();

        let buf = terminal.backend().buffer();
        let area = buf.area;
        let mut lines = Vec::new();
        for y in area.y..area.y + area.height {
            let mut line = String::new();
            for x in area.x..area.x + area.width {
                line.push_str(buf.get(x, y).symbol());
            }
            lines.push(line.trim_end().to_string());
        }
        lines.join("\n")
    }

    fn app(titles: &[&str]) -> (App, TempDir) {
        let (yaml, dir) = seeded_storage(hosts(titles));
        let mut app = App::new(
            Settings::default(),
            storage::shared(yaml),
            ApplicationState::default().into_shared(),
            ApplicationState::path_in(dir.path()),
            Box::new(ScriptedExecutor::default()),
        )
        .unwrap();
        app.start(80, 24);
        (app, dir)
    }

    #[test]
    fn test_renders_placeholder_and_hosts() {
        let (app, _dir) = app(&["web", "db"]);
        let screen = render(&app);

        assert!(screen.starts_with(" press 'n' to add a new host"));
        let db = screen.find("db").unwrap();
        let web = screen.find("web").unwrap();
        assert!(db < web);
    }

    #[test]
    fn test_renders_command_title_for_selection() {
        let (mut app, _dir) = app(&["web"]);
        app.handle_key(key(KeyCode::Char('j')));

        let screen = render(&app);
        assert!(screen.starts_with(" ssh web.example.com"));
    }

    #[test]
    fn test_renders_delete_prompt() {
        let (mut app, _dir) = app(&["web"]);
        app.handle_key(key(KeyCode::Char('j')));
        app.handle_key(key(KeyCode::Char('d')));

        let screen = render(&app);
        assert!(screen.starts_with(" delete \"web\" ? (y/N)"));
    }

    #[test]
    fn test_renders_empty_list() {
        let (app, _dir) = app(&[]);
        let screen = render(&app);

        assert!(screen.contains("No hosts yet."));
    }

    #[test]
    fn test_renders_footer_hints() {
        let (app, _dir) = app(&[]);
        let screen = render(&app);

        assert_eq!(
            screen.lines().last(),
            Some("n add new \u{2022} ? more \u{2022} q quit")
        );
    }

    #[test]
    fn test_renders_editor_over_list() {
        let (mut app, _dir) = app(&["web"]);
        app.handle_key(key(KeyCode::Char('n')));
        assert!(app.editor.is_some());

        let screen = render(&app);
        assert!(screen.contains("Title"));
    }
}
