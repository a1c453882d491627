//! Sample accounts for local development and demos.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, info};

use crate::{errors::ServiceError, services::accounts::CreateAccountInput, services::AccountService};

/// A demo account: number, PIN, opening balance, holder
pub struct SampleAccount {
    pub account_number: &'static str,
    pub pin: &'static str,
    pub balance: Decimal,
    pub account_holder_name: &'static str,
}

pub const SAMPLE_ACCOUNTS: [SampleAccount; 3] = [
    SampleAccount {
        account_number: "1234567890",
        pin: "1234",
        balance: dec!(1000.00),
        account_holder_name: "John Doe",
    },
    SampleAccount {
        account_number: "9876543210",
        pin: "5678",
        balance: dec!(5000.50),
        account_holder_name: "Jane Smith",
    },
    SampleAccount {
        account_number: "5555555555",
        pin: "0000",
        balance: dec!(250.75),
        account_holder_name: "Bob Johnson",
    },
];

/// Inserts the sample accounts, skipping numbers that already exist.
/// Returns how many were created.
pub async fn seed_sample_accounts(service: &AccountService) -> Result<usize, ServiceError> {
    let mut created = 0;

    for sample in &SAMPLE_ACCOUNTS {
        if service
            .repository()
            .exists_by_number(sample.account_number)
            .await?
        {
            debug!(account_number = sample.account_number, "Sample account already present");
            continue;
        }

        let input = CreateAccountInput {
            account_number: sample.account_number.to_string(),
            pin: sample.pin.to_string(),
            balance: Some(sample.balance),
            account_holder_name: Some(sample.account_holder_name.to_string()),
        };

        match service.create_account(input).await {
            Ok(_) => created += 1,
            // Another process seeded the same number between check and insert
            Err(ServiceError::DuplicateAccount(_)) => {}
            Err(e) => return Err(e),
        }
    }

    info!(
        created,
        total = SAMPLE_ACCOUNTS.len(),
        "Sample account seeding finished"
    );
    Ok(created)
}
