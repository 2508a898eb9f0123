//! Terminal console: pages, controller, rendering and the event loop.

mod app;
mod route;
mod runner;
mod state;
mod ui;

pub use app::{App, Command, Outcome, Response, ViewId};
pub use route::{ParseRouteError, Route};
pub use runner::run;
pub use state::{FormField, FormMode, FormPage, ListFocus, ListPage, LoadState, Page, QuizPage};
