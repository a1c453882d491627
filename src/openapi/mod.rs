use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "zBANK API",
        version = "1.0.0",
        description = r#"
# zBANK Account API

Account holders authenticate with an account number and PIN, check balances,
deposit and withdraw. Administrative endpoints list and open accounts.

## Amounts

Amounts and balances are decimal strings with two fractional digits (`"250.75"`).
Requests may send them as strings or JSON numbers.

## Error Handling

Failures share one body shape; `code` tells errors with the same status apart:

```json
{
  "error": "Conflict",
  "code": "insufficient_funds",
  "message": "Insufficient funds for account 1234567890",
  "timestamp": "2024-01-01T00:00:00Z"
}
```
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "accounts", description = "Account authentication, balances and transactions")
    ),
    paths(
        crate::handlers::accounts::authenticate,
        crate::handlers::accounts::get_balance,
        crate::handlers::accounts::deposit,
        crate::handlers::accounts::withdraw,
        crate::handlers::accounts::list_accounts,
        crate::handlers::accounts::create_account,
    ),
    components(
        schemas(
            crate::services::accounts::AccountSnapshot,
            crate::entities::account::AccountStatus,
            crate::handlers::accounts::AuthenticateRequest,
            crate::handlers::accounts::TransactionRequest,
            crate::handlers::accounts::CreateAccountRequest,
            crate::errors::ErrorResponse,
        )
    )
)]
pub struct ApiDocV1;

/// Default location of the exported document, relative to the crate root.
pub const EXPORT_PATH: &str = "openapi/zbank-api.v1.json";

/// Pretty-printed v1 document, newline-terminated for committing.
pub fn export_json() -> Result<String, serde_json::Error> {
    let mut json = serde_json::to_string_pretty(&ApiDocV1::openapi())?;
    json.push('\n');
    Ok(json)
}

/// True when `existing` describes the same document as the current build.
/// Formatting differences are ignored; unparsable input is stale.
pub fn is_current(existing: &str) -> bool {
    let Ok(on_disk) = serde_json::from_str::<serde_json::Value>(existing) else {
        return false;
    };
    serde_json::to_value(ApiDocV1::openapi()).is_ok_and(|generated| generated == on_disk)
}

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDocV1::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_account_route() {
        let doc = ApiDocV1::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/api/v1/accounts",
            "/api/v1/accounts/authenticate",
            "/api/v1/accounts/deposit",
            "/api/v1/accounts/withdraw",
            "/api/v1/accounts/{account_number}/balance",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing path {expected}"
            );
        }
    }

    #[test]
    fn exported_json_is_current_regardless_of_formatting() {
        let pretty = export_json().unwrap();
        assert!(pretty.ends_with('\n'));
        assert!(is_current(&pretty));

        let compact = serde_json::to_string(&ApiDocV1::openapi()).unwrap();
        assert!(is_current(&compact));
    }

    #[test]
    fn stale_or_broken_exports_are_detected() {
        let mut doc: serde_json::Value = serde_json::from_str(&export_json().unwrap()).unwrap();
        doc["info"]["version"] = serde_json::json!("0.0.0");

        assert!(!is_current(&doc.to_string()));
        assert!(!is_current("{not json"));
        assert!(!is_current(""));
    }
}
