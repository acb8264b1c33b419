//! Rentals service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    auth::AuthUser,
    database::Db,
    domain::{
        boxes::{
            records::{BoxStatus, BoxUuid},
            repository::PgBoxesRepository,
        },
        notifications::mailer::{DEFAULT_RECIPIENT_NAME, Mailer, PinSetEmail},
        rentals::{
            data::{
                ExtensionSubmission, NewBooking, PaymentSubmission, SubmissionAction, SubmissionClaim,
            },
            errors::RentalsServiceError,
            pin::Pin,
            records::{
                BookingView, PaymentView, RentalOverview, RentalRecord, RentalUuid,
                SubmissionOutcome,
            },
            repository::{NewRental, PgRentalsRepository},
        },
        users::{data::NewUser, records::UserUuid, repository::PgUsersRepository},
    },
};

pub struct PgRentalsService {
    db: Db,
    rentals: PgRentalsRepository,
    boxes: PgBoxesRepository,
    users: PgUsersRepository,
    mailer: Arc<dyn Mailer>,
}

impl PgRentalsService {
    #[must_use]
    pub fn new(db: Db, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            db,
            rentals: PgRentalsRepository::new(),
            boxes: PgBoxesRepository::new(),
            users: PgUsersRepository::new(),
            mailer,
        }
    }

    async fn send_pin_set_email(&self, user: &AuthUser, box_code: &str) {
        let Some(email) = user.email.clone() else {
            warn!(user = %user.uuid, "PIN was set, but the user has no e-mail address");
            return;
        };

        let name = user
            .full_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_RECIPIENT_NAME.to_string());

        let result = self
            .mailer
            .send_pin_set(PinSetEmail {
                email,
                name,
                box_code: box_code.to_string(),
            })
            .await;

        if let Err(error) = result {
            warn!(user = %user.uuid, error = %error, "PIN was set, but the confirmation e-mail failed");
        }
    }
}

impl std::fmt::Debug for PgRentalsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgRentalsService")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

fn box_not_found(error: sqlx::Error) -> RentalsServiceError {
    match error {
        sqlx::Error::RowNotFound => RentalsServiceError::BoxNotFound,
        error => error.into(),
    }
}

fn ensure_paid_without_pin(rental: &RentalRecord) -> Result<(), RentalsServiceError> {
    if !rental.is_paid() {
        return Err(RentalsServiceError::PaymentIncomplete);
    }

    if rental.has_pin() {
        return Err(RentalsServiceError::PinAlreadySet);
    }

    Ok(())
}

#[async_trait]
impl RentalsService for PgRentalsService {
    async fn booking_view(
        &self,
        user: &AuthUser,
        deposit_box: BoxUuid,
    ) -> Result<BookingView, RentalsServiceError> {
        let mut tx = self.db.begin_user_transaction(user.uuid).await?;

        let record = self
            .boxes
            .get_box(&mut tx, deposit_box)
            .await
            .map_err(box_not_found)?;

        if !record.is_available() {
            return Err(RentalsServiceError::BoxUnavailable);
        }

        let full_name = match self.users.get_user(&mut tx, user.uuid).await {
            Ok(stored) => stored.full_name,
            Err(sqlx::Error::RowNotFound) => None,
            Err(error) => return Err(error.into()),
        };

        tx.commit().await?;

        Ok(BookingView {
            deposit_box: record,
            full_name: full_name.unwrap_or_else(|| NewUser::from(user).full_name),
            email: user.email.clone(),
        })
    }

    async fn book_box(
        &self,
        user: &AuthUser,
        booking: NewBooking,
    ) -> Result<RentalRecord, RentalsServiceError> {
        let items_type = booking.items_type.trim();

        if items_type.is_empty() {
            return Err(RentalsServiceError::MissingItemsType);
        }

        let mut tx = self.db.begin_user_transaction(user.uuid).await?;

        let record = self
            .boxes
            .lock_box(&mut tx, booking.box_uuid)
            .await
            .map_err(box_not_found)?;

        if !record.is_available() {
            return Err(RentalsServiceError::BoxUnavailable);
        }

        self.users
            .ensure_user(&mut tx, &NewUser::from(user))
            .await?;

        let rental = self
            .rentals
            .create_rental(
                &mut tx,
                NewRental {
                    uuid: RentalUuid::new(),
                    user: user.uuid,
                    deposit_box: record.uuid,
                    price: booking.rent_duration.booking_price(),
                    barcode: Uuid::new_v4().to_string(),
                    items_type,
                    rent_duration: booking.rent_duration,
                },
            )
            .await?;

        self.boxes
            .update_status(&mut tx, record.uuid, BoxStatus::Pending)
            .await?;

        tx.commit().await?;

        info!(rental = %rental.uuid, deposit_box = %record.box_code, "rental booked");

        Ok(rental)
    }

    async fn payment_view(
        &self,
        user: &AuthUser,
        rental: RentalUuid,
    ) -> Result<PaymentView, RentalsServiceError> {
        let mut tx = self.db.begin_user_transaction(user.uuid).await?;

        let overview = self.rentals.get_overview(&mut tx, rental, user.uuid).await?;

        if overview.rental.is_paid() {
            return Err(RentalsServiceError::AlreadyPaid);
        }

        let customer_name = match self.users.get_user(&mut tx, user.uuid).await {
            Ok(stored) => stored.full_name,
            Err(sqlx::Error::RowNotFound) => None,
            Err(error) => return Err(error.into()),
        };

        tx.commit().await?;

        Ok(PaymentView {
            rental: overview.rental,
            box_code: overview.box_code,
            customer_name: customer_name.unwrap_or_else(|| NewUser::from(user).full_name),
        })
    }

    async fn pay_rental(
        &self,
        user: UserUuid,
        payment: PaymentSubmission,
    ) -> Result<SubmissionOutcome, RentalsServiceError> {
        let mut tx = self.db.begin_user_transaction(user).await?;

        let claim = self
            .rentals
            .claim_submission_key(
                &mut tx,
                user,
                payment.submission_key,
                SubmissionAction::Payment,
                payment.rental,
            )
            .await?;

        match claim {
            SubmissionClaim::Claimed => {}
            SubmissionClaim::Replay => {
                tx.commit().await?;

                info!(rental = %payment.rental, "payment submission replayed");

                return Ok(SubmissionOutcome {
                    rental: payment.rental,
                    replayed: true,
                });
            }
            SubmissionClaim::Conflict => {
                warn!(rental = %payment.rental, "payment submission key reused");

                return Err(RentalsServiceError::SubmissionKeyReused);
            }
        }

        let rental = self.rentals.lock_rental(&mut tx, payment.rental, user).await?;

        if rental.is_paid() {
            return Err(RentalsServiceError::AlreadyPaid);
        }

        self.rentals
            .handle_successful_payment(&mut tx, rental.uuid, rental.box_uuid, payment.method)
            .await
            .map_err(RentalsServiceError::from_procedure)?;

        tx.commit().await?;

        info!(rental = %rental.uuid, method = %payment.method, "payment settled");

        Ok(SubmissionOutcome {
            rental: rental.uuid,
            replayed: false,
        })
    }

    async fn pin_view(
        &self,
        user: UserUuid,
        rental: RentalUuid,
    ) -> Result<RentalOverview, RentalsServiceError> {
        let mut tx = self.db.begin_user_transaction(user).await?;

        let overview = self.rentals.get_overview(&mut tx, rental, user).await?;

        tx.commit().await?;

        ensure_paid_without_pin(&overview.rental)?;

        Ok(overview)
    }

    async fn set_pin(
        &self,
        user: &AuthUser,
        rental: RentalUuid,
        pin: &str,
    ) -> Result<RentalOverview, RentalsServiceError> {
        let pin = Pin::parse(pin)?;

        let mut tx = self.db.begin_user_transaction(user.uuid).await?;

        let locked = self.rentals.lock_rental(&mut tx, rental, user.uuid).await?;

        ensure_paid_without_pin(&locked)?;

        let hash = pin.hash()?;

        self.rentals
            .set_pin(&mut tx, locked.uuid, user.uuid, &hash)
            .await?;

        let overview = self
            .rentals
            .get_overview(&mut tx, locked.uuid, user.uuid)
            .await?;

        tx.commit().await?;

        info!(rental = %locked.uuid, "rental PIN set");

        self.send_pin_set_email(user, &overview.box_code).await;

        Ok(overview)
    }

    async fn rental_overview(
        &self,
        user: UserUuid,
        rental: RentalUuid,
    ) -> Result<RentalOverview, RentalsServiceError> {
        let mut tx = self.db.begin_user_transaction(user).await?;

        let overview = self.rentals.get_overview(&mut tx, rental, user).await?;

        tx.commit().await?;

        Ok(overview)
    }

    async fn list_orders(&self, user: UserUuid) -> Result<Vec<RentalOverview>, RentalsServiceError> {
        let mut tx = self.db.begin_user_transaction(user).await?;

        let orders = self.rentals.list_overviews(&mut tx, user).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn extension_view(
        &self,
        user: UserUuid,
        rental: RentalUuid,
    ) -> Result<RentalOverview, RentalsServiceError> {
        let overview = self.rental_overview(user, rental).await?;

        if !overview.rental.is_active() {
            return Err(RentalsServiceError::RentalInactive);
        }

        Ok(overview)
    }

    async fn extend_rental(
        &self,
        user: UserUuid,
        extension: ExtensionSubmission,
    ) -> Result<SubmissionOutcome, RentalsServiceError> {
        let price = extension
            .duration
            .extension_price()
            .ok_or(RentalsServiceError::DurationNotExtendable)?;

        let mut tx = self.db.begin_user_transaction(user).await?;

        let claim = self
            .rentals
            .claim_submission_key(
                &mut tx,
                user,
                extension.submission_key,
                SubmissionAction::Extension,
                extension.rental,
            )
            .await?;

        match claim {
            SubmissionClaim::Claimed => {}
            SubmissionClaim::Replay => {
                tx.commit().await?;

                info!(rental = %extension.rental, "extension submission replayed");

                return Ok(SubmissionOutcome {
                    rental: extension.rental,
                    replayed: true,
                });
            }
            SubmissionClaim::Conflict => {
                warn!(rental = %extension.rental, "extension submission key reused");

                return Err(RentalsServiceError::SubmissionKeyReused);
            }
        }

        let rental = self
            .rentals
            .lock_rental(&mut tx, extension.rental, user)
            .await?;

        if !rental.is_active() {
            return Err(RentalsServiceError::RentalInactive);
        }

        self.rentals
            .handle_rental_extension(
                &mut tx,
                rental.uuid,
                extension.duration,
                extension.method,
                price,
            )
            .await
            .map_err(RentalsServiceError::from_procedure)?;

        tx.commit().await?;

        info!(rental = %rental.uuid, duration = %extension.duration, "rental extended");

        Ok(SubmissionOutcome {
            rental: rental.uuid,
            replayed: false,
        })
    }
}

#[automock]
#[async_trait]
pub trait RentalsService: Send + Sync {
    /// Box and customer details for the booking form. The box must be available.
    async fn booking_view(
        &self,
        user: &AuthUser,
        deposit_box: BoxUuid,
    ) -> Result<BookingView, RentalsServiceError>;

    /// Books an available box: creates a pending rental and marks the box pending.
    async fn book_box(
        &self,
        user: &AuthUser,
        booking: NewBooking,
    ) -> Result<RentalRecord, RentalsServiceError>;

    /// Unpaid rental details for the payment form.
    async fn payment_view(
        &self,
        user: &AuthUser,
        rental: RentalUuid,
    ) -> Result<PaymentView, RentalsServiceError>;

    /// Settles payment once per submission key.
    async fn pay_rental(
        &self,
        user: UserUuid,
        payment: PaymentSubmission,
    ) -> Result<SubmissionOutcome, RentalsServiceError>;

    /// Rental ready for a PIN: paid and without one.
    async fn pin_view(
        &self,
        user: UserUuid,
        rental: RentalUuid,
    ) -> Result<RentalOverview, RentalsServiceError>;

    /// Stores the hashed PIN and sends the confirmation e-mail.
    async fn set_pin(
        &self,
        user: &AuthUser,
        rental: RentalUuid,
        pin: &str,
    ) -> Result<RentalOverview, RentalsServiceError>;

    /// A single rental of the user, with box code and total paid.
    async fn rental_overview(
        &self,
        user: UserUuid,
        rental: RentalUuid,
    ) -> Result<RentalOverview, RentalsServiceError>;

    /// All rentals of the user, newest first.
    async fn list_orders(&self, user: UserUuid) -> Result<Vec<RentalOverview>, RentalsServiceError>;

    /// Active rental details for the extension form.
    async fn extension_view(
        &self,
        user: UserUuid,
        rental: RentalUuid,
    ) -> Result<RentalOverview, RentalsServiceError>;

    /// Extends an active rental once per submission key.
    async fn extend_rental(
        &self,
        user: UserUuid,
        extension: ExtensionSubmission,
    ) -> Result<SubmissionOutcome, RentalsServiceError>;
}
