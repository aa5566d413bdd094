//! Form primitives shared by every view.

mod button;
pub use button::{Button, ButtonVariant};

mod input;
pub use input::Input;

mod label;
pub use label::Label;
