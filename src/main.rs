use clap::Parser;
use crossterm::{
    cursor::Show,
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyCode, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use exam_prep_cards::{
    app::App,
    boundary::{self, Fault},
    config::{Config, Settings},
    input,
    loader::{spawn_image_load, QuestionLoader},
    logger,
    models::{AppEvent, Command},
    ui,
};
use futures::StreamExt;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use tokio::sync::mpsc::{self, UnboundedSender};

/// Leaves the alternate screen and raw mode however `main` exits.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen, Show);
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let config = Config::parse();
    logger::init(&config.log_file);
    boundary::install_panic_hook();
    logger::log(&format!(
        "Starting: dataset {}, assets {}",
        config.questions.display(),
        config.assets_root().display()
    ));

    enable_raw_mode()?;
    let _guard = TerminalGuard;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &config).await;
    match &result {
        Ok(()) => logger::log("Exiting"),
        Err(e) => logger::log(&format!("Exiting with error: {}", e)),
    }
    result
}

fn fresh_app<B: Backend>(terminal: &Terminal<B>, settings: &Settings) -> io::Result<App> {
    let mut app = App::new(settings.clone());
    let size = terminal.size()?;
    app.resize(size.width, size.height);
    Ok(app)
}

async fn run<B: Backend>(terminal: &mut Terminal<B>, config: &Config) -> io::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let settings = config.settings();
    let mut loader = QuestionLoader::new(config.questions.clone(), tx.clone());
    let mut app = fresh_app(terminal, &settings)?;
    loader.request();

    let mut events = EventStream::new();
    let mut fault: Option<Fault> = None;

    loop {
        if let Some(caught) = &fault {
            terminal.draw(|frame| ui::draw_fault(frame, &caught.message))?;
        } else {
            match boundary::guard(|| terminal.draw(|frame| ui::draw(frame, &mut app)).map(|_| ())) {
                Ok(drawn) => drawn?,
                Err(caught) => {
                    fault = Some(caught);
                    continue;
                }
            }
            // Sentinel visibility from the frame just drawn.
            if app.after_draw() {
                continue;
            }
        }

        tokio::select! {
            maybe_event = events.next() => {
                let Some(event) = maybe_event else {
                    break;
                };
                let event = event?;

                if fault.is_some() {
                    match fault_action(&event) {
                        FaultAction::Quit => break,
                        FaultAction::Reset => {
                            logger::log("Resetting after fault");
                            app = fresh_app(terminal, &settings)?;
                            loader.request();
                            fault = None;
                        }
                        FaultAction::None => {}
                    }
                    continue;
                }

                match boundary::guard(|| handle_event(&mut app, event)) {
                    Ok(Some(command)) => execute_command(command, &mut loader, &tx),
                    Ok(None) => {}
                    Err(caught) => fault = Some(caught),
                }
            }
            Some(message) = rx.recv() => {
                if fault.is_some() {
                    continue;
                }
                if let Err(caught) = boundary::guard(|| apply_message(&mut app, &loader, message)) {
                    fault = Some(caught);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_event(app: &mut App, event: Event) -> Option<Command> {
    match event {
        Event::Key(key) => input::handle_key(app, key),
        Event::Mouse(mouse) => input::handle_mouse(app, mouse),
        Event::Resize(columns, rows) => {
            app.resize(columns, rows);
            None
        }
        _ => None,
    }
}

fn execute_command(command: Command, loader: &mut QuestionLoader, tx: &UnboundedSender<AppEvent>) {
    match command {
        Command::Reload => {
            loader.request();
        }
        Command::LoadImage { request_id, path } => spawn_image_load(request_id, path, tx.clone()),
    }
}

fn apply_message(app: &mut App, loader: &QuestionLoader, message: AppEvent) {
    match message {
        AppEvent::DatasetLoaded { generation, result } => {
            if loader.is_current(generation) {
                app.dataset_loaded(result);
            } else {
                logger::log(&format!(
                    "Discarding result of superseded load (generation {})",
                    generation
                ));
            }
        }
        AppEvent::ImageLoaded { request_id, result } => app.image_loaded(request_id, result),
    }
}

enum FaultAction {
    None,
    Reset,
    Quit,
}

fn fault_action(event: &Event) -> FaultAction {
    let Event::Key(key) = event else {
        return FaultAction::None;
    };
    if key.kind == KeyEventKind::Release {
        return FaultAction::None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('q') if ctrl => FaultAction::Quit,
        KeyCode::Char('r') | KeyCode::Enter => FaultAction::Reset,
        _ => FaultAction::None,
    }
}
