//! Rental Handlers

pub(crate) mod book;
pub(crate) mod booking_form;
pub(crate) mod confirmation;
pub(crate) mod details;
pub(crate) mod extend;
pub(crate) mod extension_form;
pub(crate) mod orders;
pub(crate) mod pay;
pub(crate) mod payment_form;
pub(crate) mod pin_form;
pub(crate) mod set_pin;

#[cfg(test)]
pub(crate) mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;

    use brankas_app::domain::{
        boxes::records::{BoxStatus, BoxUuid},
        rentals::{
            pin::PinHash,
            records::{PaymentStatus, RentalOverview, RentalRecord, RentalStatus, RentalUuid},
        },
    };

    use crate::test_helpers::TEST_USER_UUID;

    pub(crate) fn make_rental(status: RentalStatus, payment_status: PaymentStatus) -> RentalRecord {
        RentalRecord {
            uuid: RentalUuid::new(),
            user_uuid: TEST_USER_UUID,
            box_uuid: BoxUuid::new(),
            status,
            price: Decimal::new(1499, 2),
            payment_status,
            pin: None,
            barcode: "6f1c2a9e-barcode".to_string(),
            items_type: "Documents".to_string(),
            rent_duration: "three_days".to_string(),
            start_date: None,
            end_date: None,
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    pub(crate) fn make_overview(rental: RentalRecord) -> RentalOverview {
        RentalOverview {
            rental,
            box_code: "A-01".to_string(),
            box_status: Some(BoxStatus::Rented),
            total_paid: Decimal::new(1499, 2),
        }
    }

    pub(crate) fn with_pin(mut rental: RentalRecord) -> RentalRecord {
        rental.pin = PinHash::from_stored(Some("$argon2id$v=19$stored".to_string()));
        rental
    }
}
