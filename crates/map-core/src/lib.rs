pub mod catalog;
pub mod config;
pub mod constants;
pub mod coordinator;
pub mod drawing;
pub mod gesture;
pub mod indicator;
pub mod keyboard;
pub mod readout;
pub mod style;
pub mod tone;

pub use catalog::*;
pub use config::*;
pub use coordinator::*;
pub use drawing::*;
pub use gesture::*;
pub use indicator::*;
pub use keyboard::*;
pub use readout::*;
pub use style::*;
pub use tone::*;
