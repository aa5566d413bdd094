mod shell;
pub use shell::Shell;

mod pages;
pub use pages::{Controller, Model, View};
