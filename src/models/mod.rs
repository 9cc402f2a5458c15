pub mod notification;
pub mod request_schema;
pub mod response_schema;
pub mod travel_plan;
pub mod user;

pub use notification::*;
pub use request_schema::*;
pub use response_schema::*;
pub use travel_plan::*;
pub use user::*;
