//! Interactive console front-end: a menu-driven navigation state machine over
//! the repositories and services.

mod actions;
mod app;
mod io;
mod render;
mod state;


pub use actions::{parse_input, ActionSet, CommonAction, Selection};
pub use app::ConsoleApp;
pub use io::ConsoleIo;
pub use state::{ConsoleState, Session};
