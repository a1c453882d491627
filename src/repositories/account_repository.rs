use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;

use crate::entities::account::{
    ActiveModel as AccountActiveModel, AccountStatus, Column, Entity as Account,
    Model as AccountModel,
};
use crate::errors::ServiceError;
use crate::repositories::Repository;

use super::BaseRepository;

/// Repository for account records
#[derive(Debug, Clone)]
pub struct AccountRepository {
    base: BaseRepository,
}

impl AccountRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find an account by number, but only while it is `ACTIVE`
    pub async fn find_active_by_number(
        &self,
        account_number: &str,
    ) -> Result<Option<AccountModel>, ServiceError> {
        Account::find()
            .filter(Column::AccountNumber.eq(account_number))
            .filter(Column::Status.eq(AccountStatus::Active))
            .one(self.base.get_db())
            .await
            .map_err(ServiceError::DatabaseError)
    }

    /// Find an account by number regardless of status
    pub async fn find_by_number(
        &self,
        account_number: &str,
    ) -> Result<Option<AccountModel>, ServiceError> {
        Account::find()
            .filter(Column::AccountNumber.eq(account_number))
            .one(self.base.get_db())
            .await
            .map_err(ServiceError::DatabaseError)
    }

    pub async fn exists_by_number(&self, account_number: &str) -> Result<bool, ServiceError> {
        let count = Account::find()
            .filter(Column::AccountNumber.eq(account_number))
            .count(self.base.get_db())
            .await
            .map_err(ServiceError::DatabaseError)?;
        Ok(count > 0)
    }

    /// Every account, any status, in insertion order
    pub async fn find_all(&self) -> Result<Vec<AccountModel>, ServiceError> {
        Account::find()
            .order_by_asc(Column::Id)
            .all(self.base.get_db())
            .await
            .map_err(ServiceError::DatabaseError)
    }

    /// Insert a new account; a unique-index hit becomes `DuplicateAccount`
    pub async fn create(&self, account: AccountActiveModel) -> Result<AccountModel, ServiceError> {
        let account_number = match &account.account_number {
            ActiveValue::Set(number) | ActiveValue::Unchanged(number) => number.clone(),
            _ => String::new(),
        };

        account
            .insert(self.base.get_db())
            .await
            .map_err(|e| ServiceError::from_insert_error(e, &account_number))
    }

    /// Overwrite the stored balance of an existing account
    pub async fn update_balance(
        &self,
        account: AccountModel,
        balance: Decimal,
    ) -> Result<AccountModel, ServiceError> {
        let mut active = account.into_active_model();
        active.balance = Set(balance);
        active
            .update(self.base.get_db())
            .await
            .map_err(ServiceError::DatabaseError)
    }

    /// Change the lifecycle status of an account
    pub async fn update_status(
        &self,
        account: AccountModel,
        status: AccountStatus,
    ) -> Result<AccountModel, ServiceError> {
        let mut active = account.into_active_model();
        active.status = Set(status);
        active
            .update(self.base.get_db())
            .await
            .map_err(ServiceError::DatabaseError)
    }
}
