pub mod stock;
pub mod chat;
pub mod earnings;
pub mod response;

pub use stock::*;
pub use chat::*;
pub use earnings::*;
pub use response::*;
