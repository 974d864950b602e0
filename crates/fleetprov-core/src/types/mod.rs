mod credential;
mod device;
mod page;
mod task;

pub use credential::*;
pub use device::*;
pub use page::*;
pub use task::*;
