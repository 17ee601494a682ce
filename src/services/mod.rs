pub mod extract;
pub mod group_test_service;
pub mod leaderboard_service;
pub mod mailer_service;
pub mod material_service;
pub mod parser;
pub mod question_service;
pub mod sampling;
pub mod scoring;
pub mod session_service;
pub mod user_service;
