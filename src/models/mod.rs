pub mod course;
pub mod group_test;
pub mod material;
pub mod question;
pub mod test_session;
pub mod user;
