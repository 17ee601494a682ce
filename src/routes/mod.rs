pub mod auth;
pub mod courses;
pub mod exams;
pub mod group_tests;
pub mod health;
pub mod leaderboard;
pub mod materials;
pub mod uploads;
