//! # Registration Command
//!
//! Registers a customer and hands the stored name to the next refresh, which
//! pre-fills the lookup with it.

use madang_core::NewCustomer;
use madang_db::Database;
use tracing::info;

use super::Outcome;
use crate::error::ApiError;
use crate::state::{Notice, RegistrationForm, ViewState};

/// Registers a new customer.
///
/// ## Returns
/// * `Outcome::Rerun { carry_over: Some(name) }` - Registered; `name` is the
///   trimmed name as stored
/// * `Err(_)` - Nothing stored; the form keeps what was typed
pub async fn register(
    db: &Database,
    view: &mut ViewState,
    new: NewCustomer,
) -> Result<Outcome, ApiError> {
    view.registration = RegistrationForm {
        name: new.name.clone(),
        address: new.address.clone(),
        phone: new.phone.clone(),
    };

    let registration = db.customers().register(&new).await?;

    info!(custid = registration.custid, "Customer registered from shell");
    view.registration = RegistrationForm::default();
    view.set_notice(Notice::success(format!(
        "Customer '{}' registered (custid {}).",
        registration.name, registration.custid
    )));

    Ok(Outcome::Rerun {
        carry_over: Some(registration.name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use madang_db::DbConfig;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn new_customer(name: &str, address: &str, phone: &str) -> NewCustomer {
        NewCustomer {
            name: name.to_string(),
            address: address.to_string(),
            phone: phone.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_returns_trimmed_carry_over() {
        let db = test_db().await;
        let mut view = ViewState::new();

        let outcome = register(&db, &mut view, new_customer("  Alice  ", "Seoul", ""))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            Outcome::Rerun {
                carry_over: Some("Alice".to_string())
            }
        );
        assert_eq!(view.registration, RegistrationForm::default());
        assert!(view.notice.unwrap().message.contains("custid 1"));
    }

    #[tokio::test]
    async fn test_blank_name_keeps_form_and_inserts_nothing() {
        let db = test_db().await;
        let mut view = ViewState::new();

        let err = register(&db, &mut view, new_customer("  ", "Daejeon", "010"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "name is required");
        assert_eq!(view.registration.address, "Daejeon");
        assert_eq!(db.customers().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_id_follows_existing_rows() {
        let db = test_db().await;
        insert_existing(&db, 7).await;

        let mut view = ViewState::new();
        register(&db, &mut view, new_customer("Kim", "", "")).await.unwrap();

        assert!(view.notice.unwrap().message.contains("custid 8"));
        assert_eq!(db.customers().count().await.unwrap(), 2);
    }

    async fn insert_existing(db: &Database, custid: i64) {
        db.run_execute(
            "INSERT INTO Customer (custid, name) VALUES (?1, ?2)",
            &[custid.into(), "Existing".into()],
        )
        .await
        .unwrap();
    }
}
