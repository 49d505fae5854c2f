mod controller;
mod options;
mod session;
mod status;

pub use controller::{Configurator, ConfiguratorError, SelectionTicket};
pub use options::FormOptions;
pub use session::AppSession;
pub use status::{StatusKind, StatusLine};
