use crate::{
    auth::PinHasher,
    common::{to_money, MAX_MONEY},
    db::DbPool,
    entities::account::{self, AccountStatus},
    errors::ServiceError,
    repositories::AccountRepository,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;

/// Public view of an account. The PIN hash never leaves the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountSnapshot {
    pub id: i32,
    #[schema(example = "1234567890")]
    pub account_number: String,
    #[schema(value_type = String, example = "1000.00")]
    pub balance: Decimal,
    #[schema(example = "John Doe")]
    pub account_holder_name: Option<String>,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<account::Model> for AccountSnapshot {
    fn from(model: account::Model) -> Self {
        Self {
            id: model.id,
            account_number: model.account_number,
            balance: to_money(model.balance),
            account_holder_name: model.account_holder_name,
            status: model.status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Input for opening an account
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    pub account_number: String,
    pub pin: String,
    pub balance: Option<Decimal>,
    pub account_holder_name: Option<String>,
}

/// Adds `amount` to `balance`. The amount must be strictly positive.
pub fn credit(balance: Decimal, amount: Decimal) -> Result<Decimal, ServiceError> {
    ensure_positive(amount)?;
    balance
        .checked_add(amount)
        .map(to_money)
        .filter(|total| *total <= MAX_MONEY)
        .ok_or_else(|| ServiceError::ValidationError("Resulting balance is out of range".into()))
}

/// Subtracts `amount` from `balance`, refusing to go below zero.
pub fn debit(account_number: &str, balance: Decimal, amount: Decimal) -> Result<Decimal, ServiceError> {
    ensure_positive(amount)?;
    if balance < amount {
        return Err(ServiceError::InsufficientFunds(account_number.to_string()));
    }
    balance
        .checked_sub(amount)
        .map(to_money)
        .ok_or_else(|| ServiceError::ValidationError("Resulting balance is out of range".into()))
}

fn ensure_positive(amount: Decimal) -> Result<(), ServiceError> {
    if amount <= Decimal::ZERO {
        return Err(ServiceError::ValidationError(
            "Amount must be greater than 0".into(),
        ));
    }
    Ok(())
}

/// Service for authenticating account holders and moving money
#[derive(Clone, Debug)]
pub struct AccountService {
    repository: AccountRepository,
    pin_hasher: PinHasher,
}

impl AccountService {
    /// Creates a new account service instance
    pub fn new(db_pool: Arc<DbPool>, pin_hasher: PinHasher) -> Self {
        Self {
            repository: AccountRepository::new(db_pool),
            pin_hasher,
        }
    }

    pub fn repository(&self) -> &AccountRepository {
        &self.repository
    }

    /// Looks up an active account and checks the supplied PIN against it
    async fn load_verified(
        &self,
        account_number: &str,
        pin: &str,
    ) -> Result<account::Model, ServiceError> {
        let account = self.load_active(account_number).await?;

        if !self.pin_hasher.verify(pin, &account.pin_hash)? {
            warn!(account_number, "Invalid PIN attempt");
            return Err(ServiceError::InvalidPin);
        }

        Ok(account)
    }

    async fn load_active(&self, account_number: &str) -> Result<account::Model, ServiceError> {
        self.repository
            .find_active_by_number(account_number)
            .await?
            .ok_or_else(|| ServiceError::AccountNotFound(account_number.to_string()))
    }

    /// Verifies account number and PIN; no side effects
    #[instrument(skip(self, pin))]
    pub async fn authenticate(
        &self,
        account_number: &str,
        pin: &str,
    ) -> Result<AccountSnapshot, ServiceError> {
        info!("Authenticating account");
        let account = self.load_verified(account_number, pin).await?;
        Ok(account.into())
    }

    /// Current balance of an active account
    #[instrument(skip(self))]
    pub async fn get_balance(&self, account_number: &str) -> Result<AccountSnapshot, ServiceError> {
        info!("Getting balance");
        let account = self.load_active(account_number).await?;
        Ok(account.into())
    }

    #[instrument(skip(self, pin))]
    pub async fn deposit(
        &self,
        account_number: &str,
        pin: &str,
        amount: Decimal,
    ) -> Result<AccountSnapshot, ServiceError> {
        info!("Processing deposit");
        let account = self.load_verified(account_number, pin).await?;

        let new_balance = credit(to_money(account.balance), amount)?;
        let saved = self.repository.update_balance(account, new_balance).await?;

        info!(new_balance = %new_balance, "Deposit successful");
        Ok(saved.into())
    }

    #[instrument(skip(self, pin))]
    pub async fn withdraw(
        &self,
        account_number: &str,
        pin: &str,
        amount: Decimal,
    ) -> Result<AccountSnapshot, ServiceError> {
        info!("Processing withdrawal");
        let account = self.load_verified(account_number, pin).await?;

        let balance = to_money(account.balance);
        let new_balance = debit(account_number, balance, amount).map_err(|e| {
            if matches!(e, ServiceError::InsufficientFunds(_)) {
                warn!(balance = %balance, requested = %amount, "Insufficient funds for withdrawal");
            }
            e
        })?;
        let saved = self.repository.update_balance(account, new_balance).await?;

        info!(new_balance = %new_balance, "Withdrawal successful");
        Ok(saved.into())
    }

    /// All accounts, any status
    #[instrument(skip(self))]
    pub async fn list_accounts(&self) -> Result<Vec<AccountSnapshot>, ServiceError> {
        let accounts = self.repository.find_all().await?;
        Ok(accounts.into_iter().map(AccountSnapshot::from).collect())
    }

    /// Opens a new `ACTIVE` account with a hashed PIN
    #[instrument(skip(self, input), fields(account_number = %input.account_number))]
    pub async fn create_account(
        &self,
        input: CreateAccountInput,
    ) -> Result<AccountSnapshot, ServiceError> {
        info!("Creating new account");

        if self.repository.exists_by_number(&input.account_number).await? {
            return Err(ServiceError::DuplicateAccount(input.account_number));
        }

        let balance = input.balance.unwrap_or(Decimal::ZERO);
        if balance < Decimal::ZERO {
            return Err(ServiceError::ValidationError(
                "Balance cannot be negative".into(),
            ));
        }
        if balance > MAX_MONEY {
            return Err(ServiceError::ValidationError(format!(
                "Balance must not exceed {}",
                MAX_MONEY
            )));
        }

        let pin_hash = self.pin_hasher.hash(&input.pin)?;

        let model = account::ActiveModel {
            account_number: Set(input.account_number),
            pin_hash: Set(pin_hash),
            balance: Set(to_money(balance)),
            account_holder_name: Set(input.account_holder_name),
            status: Set(AccountStatus::Active),
            ..Default::default()
        };

        let saved = self.repository.create(model).await?;
        info!(id = saved.id, "Account created");
        Ok(saved.into())
    }
}
