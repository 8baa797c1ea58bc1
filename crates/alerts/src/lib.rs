pub mod checker;
pub mod parser;
pub mod store;

pub use checker::{AlertChecker, CycleReport};
pub use parser::{parse_alert, AlertParseError};
pub use store::AlertStore;
