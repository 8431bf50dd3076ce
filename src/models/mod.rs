pub mod analysis;
pub mod page;
pub mod request;
pub mod response;

pub use analysis::*;
pub use page::*;
pub use request::*;
pub use response::*;
