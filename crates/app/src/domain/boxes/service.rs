//! Deposit boxes service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        boxes::{
            errors::BoxesServiceError,
            records::{BoxStatus, BoxUuid, DepositBoxRecord},
            repository::PgBoxesRepository,
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgBoxesService {
    db: Db,
    repository: PgBoxesRepository,
}

impl PgBoxesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgBoxesRepository::new(),
        }
    }
}

#[async_trait]
impl BoxesService for PgBoxesService {
    async fn list_boxes(&self) -> Result<Vec<DepositBoxRecord>, BoxesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let boxes = self.repository.list_boxes(&mut tx).await?;

        tx.commit().await?;

        Ok(boxes)
    }

    async fn get_box(&self, deposit_box: BoxUuid) -> Result<DepositBoxRecord, BoxesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let record = self.repository.get_box(&mut tx, deposit_box).await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn create_box(
        &self,
        admin: Option<UserUuid>,
        box_code: &str,
    ) -> Result<DepositBoxRecord, BoxesServiceError> {
        let box_code = box_code.trim();

        if box_code.is_empty() {
            return Err(BoxesServiceError::EmptyBoxCode);
        }

        let mut tx = self.db.begin_transaction_as(admin).await?;

        let created = self
            .repository
            .create_box(&mut tx, BoxUuid::new(), box_code)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_status(
        &self,
        admin: Option<UserUuid>,
        deposit_box: BoxUuid,
        status: BoxStatus,
    ) -> Result<DepositBoxRecord, BoxesServiceError> {
        let mut tx = self.db.begin_transaction_as(admin).await?;

        let updated = self
            .repository
            .update_status(&mut tx, deposit_box, status)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait BoxesService: Send + Sync {
    /// Lists every box ordered by box code.
    async fn list_boxes(&self) -> Result<Vec<DepositBoxRecord>, BoxesServiceError>;

    /// Retrieves a single box.
    async fn get_box(&self, deposit_box: BoxUuid) -> Result<DepositBoxRecord, BoxesServiceError>;

    /// Creates an available box with the given (trimmed) code.
    ///
    /// `admin` is the signed-in caller; operator tools pass `None`.
    async fn create_box(
        &self,
        admin: Option<UserUuid>,
        box_code: &str,
    ) -> Result<DepositBoxRecord, BoxesServiceError>;

    /// Overwrites the box status.
    async fn update_status(
        &self,
        admin: Option<UserUuid>,
        deposit_box: BoxUuid,
        status: BoxStatus,
    ) -> Result<DepositBoxRecord, BoxesServiceError>;
}
