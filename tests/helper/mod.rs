#![allow(dead_code, unused_imports)]

pub mod fakes;
pub mod helper;

pub use fakes::Fakes;
pub use fakes::FakePush;
pub use fakes::FakeTrips;

pub use helper::build_get_request;
pub use helper::build_post_request;
pub use helper::read_json;
pub use helper::user;
