pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    group_test_service::GroupTestService, leaderboard_service::LeaderboardService,
    mailer_service::MailerService, material_service::MaterialService,
    question_service::QuestionService, session_service::SessionService, user_service::UserService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub user_service: UserService,
    pub session_service: SessionService,
    pub group_test_service: GroupTestService,
    pub question_service: QuestionService,
    pub leaderboard_service: LeaderboardService,
    pub material_service: MaterialService,
    pub mailer: MailerService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let config = crate::config::get_config();
        let uploads_dir = std::env::var("UPLOADS_DIR").unwrap_or_else(|_| "uploads".to_string());

        let mailer = MailerService::new(config.mail_gateway_url.clone());
        let user_service = UserService::new(pool.clone());
        let session_service = SessionService::new(pool.clone());
        let group_test_service =
            GroupTestService::new(pool.clone(), session_service.clone(), mailer.clone());
        let question_service = QuestionService::new(pool.clone());
        let leaderboard_service = LeaderboardService::new(pool.clone());
        let material_service = MaterialService::new(pool.clone(), uploads_dir);

        Self {
            pool,
            user_service,
            session_service,
            group_test_service,
            question_service,
            leaderboard_service,
            material_service,
            mailer,
        }
    }
}
