//! App Context

use std::{path::PathBuf, sync::Arc};

use thiserror::Error;

use crate::{
    assistant::{AssistantService, GeminiAssistantService, GeminiClient, GeminiConfig, KnowledgeBase},
    auth::{AuthService, GoTrueClient},
    backend::BackendConfig,
    database::{self, Db},
    domain::{
        admin::{AdminService, PgAdminService},
        boxes::{BoxesService, PgBoxesService},
        notifications::{EdgeFunctionMailer, NotificationsService, PgNotificationsService},
        rentals::{PgRentalsService, RentalsService},
        users::{PgUsersService, UsersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

/// Everything needed to wire the application services.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub backend: BackendConfig,
    pub gemini: GeminiConfig,

    /// Help-desk knowledge base; absent means an empty one.
    pub knowledge_base: Option<PathBuf>,
}

#[derive(Clone)]
pub struct AppContext {
    pub users: Arc<dyn UsersService>,
    pub boxes: Arc<dyn BoxesService>,
    pub rentals: Arc<dyn RentalsService>,
    pub notifications: Arc<dyn NotificationsService>,
    pub admin: Arc<dyn AdminService>,
    pub auth: Arc<dyn AuthService>,
    pub assistant: Arc<dyn AssistantService>,
}

impl AppContext {
    /// Build application context from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_config(config: AppConfig) -> Result<Self, AppInitError> {
        let pool = database::connect(&config.database_url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool);

        let knowledge = config
            .knowledge_base
            .as_deref()
            .map(KnowledgeBase::load)
            .unwrap_or_default();

        let mailer = Arc::new(EdgeFunctionMailer::new(config.backend.clone()));
        let model = Arc::new(GeminiClient::new(config.gemini));

        Ok(Self {
            users: Arc::new(PgUsersService::new(db.clone())),
            boxes: Arc::new(PgBoxesService::new(db.clone())),
            rentals: Arc::new(PgRentalsService::new(db.clone(), mailer)),
            notifications: Arc::new(PgNotificationsService::new(db.clone())),
            admin: Arc::new(PgAdminService::new(db)),
            auth: Arc::new(GoTrueClient::new(config.backend)),
            assistant: Arc::new(GeminiAssistantService::new(model, knowledge)),
        })
    }
}
