mod controller;
mod dispatcher;

pub use controller::{LogMount, MountController, MountError};
pub use dispatcher::{Alignment, Dispatcher};
