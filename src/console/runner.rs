//! Event loop and request dispatch.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind, MouseEventKind};
use futures_util::future::{AbortHandle, Aborted, abortable};
use ratatui::layout::{Position, Rect};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::ConsoleError;
use crate::api::{HttpClient, usecases};
use crate::config::Config;
use crate::terminal::{self, AppTerminal};

use super::app::{App, Command, Outcome, Response, ViewId};
use super::ui;

/// Run the console on the configured start page until the user quits.
pub async fn run<C: HttpClient + 'static>(client: Arc<C>, config: &Config) -> Result<(), ConsoleError> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Response>();
    let mut requests = Requests::new(client, tx);

    let (mut app, commands) = App::open(config.start_route);
    requests.dispatch(app.view(), commands);

    let mut terminal = terminal::init()?;
    let result = run_tui(&mut terminal, &mut app, &mut requests, &mut rx, &config.language);
    requests.abort_reads();
    terminal::restore()?;
    result
}

fn run_tui<C: HttpClient + 'static>(
    terminal: &mut AppTerminal,
    app: &mut App,
    requests: &mut Requests<C>,
    rx: &mut mpsc::UnboundedReceiver<Response>,
    language: &str,
) -> Result<(), ConsoleError> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(frame, app, language))?;

        // Handle input with timeout
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let commands = app.handle_key(key);
                    requests.dispatch(app.view(), commands);
                }
                Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(_)) => {
                    let size = terminal.size()?;
                    let bounds = ui::tag_field_bounds(Rect::new(0, 0, size.width, size.height), app);
                    app.handle_click(Position::new(mouse.column, mouse.row), bounds);
                }
                _ => {}
            }
        }

        while let Ok(response) = rx.try_recv() {
            let commands = app.apply(response);
            requests.dispatch(app.view(), commands);
        }
    }

    info!("console closed");
    Ok(())
}

/// A read still tied to its view.
struct Read {
    abort: AbortHandle,
    task: JoinHandle<Result<(), Aborted>>,
}

/// Spawns requests and ties the reads to the view that asked for them.
struct Requests<C> {
    client: Arc<C>,
    tx: mpsc::UnboundedSender<Response>,
    view: Option<ViewId>,
    reads: Vec<Read>,
}

impl<C: HttpClient + 'static> Requests<C> {
    fn new(client: Arc<C>, tx: mpsc::UnboundedSender<Response>) -> Self {
        Self {
            client,
            tx,
            view: None,
            reads: Vec::new(),
        }
    }

    /// Leaving a view aborts its outstanding reads. Mutations keep running;
    /// their responses are dropped by the app.
    fn dispatch(&mut self, view: ViewId, commands: Vec<Command>) {
        if self.view != Some(view) {
            self.abort_reads();
            self.view = Some(view);
        }

        for command in commands {
            self.spawn(view, command);
        }
    }

    fn abort_reads(&mut self) {
        if !self.reads.is_empty() {
            debug!(count = self.reads.len(), "aborting reads of a closed view");
        }
        for read in self.reads.drain(..) {
            read.abort.abort();
        }
    }

    fn spawn(&mut self, view: ViewId, command: Command) {
        debug!(?command, %view, "sending request");

        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        let mutation = command.is_mutation();
        let request = async move {
            let outcome = execute(client.as_ref(), command).await;
            // Fails only once the console has shut down.
            let _ = tx.send(Response { view, outcome });
        };

        if mutation {
            tokio::spawn(request);
        } else {
            let (request, abort) = abortable(request);
            self.reads.retain(|read| !read.task.is_finished());
            self.reads.push(Read {
                abort,
                task: tokio::spawn(request),
            });
        }
    }
}

async fn execute<C: HttpClient>(client: &C, command: Command) -> Outcome {
    match command {
        Command::LoadAlgorithms => Outcome::Algorithms(usecases::list_algorithms(client).await),
        Command::LoadTags => Outcome::Tags(usecases::list_tags(client).await),
        Command::LoadAlgorithm(id) => Outcome::Algorithm(usecases::fetch_algorithm(client, id).await),
        Command::CreateAlgorithm(draft) => Outcome::Created(usecases::create_algorithm(client, &draft).await),
        Command::UpdateAlgorithm(algorithm) => {
            Outcome::Updated(usecases::update_algorithm(client, &algorithm).await)
        }
        Command::DeleteAlgorithm(id) => Outcome::Deleted(id, usecases::delete_algorithm(client, id).await),
        Command::GenerateQuiz(id) => Outcome::Quiz(id, usecases::generate_quiz(client, id).await),
    }
}
