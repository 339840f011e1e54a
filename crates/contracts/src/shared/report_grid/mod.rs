pub mod column;
pub mod request;
pub mod response;
pub mod row;

pub use column::*;
pub use request::*;
pub use response::*;
pub use row::*;
