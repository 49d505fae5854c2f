mod lines;
mod view;

pub use lines::{ViewState, form_lines};
pub use view::FormView;
