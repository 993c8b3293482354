pub mod auth;
pub mod clients;
pub mod households;
pub mod portfolios;
pub mod scenarios;

use serde::Deserialize;
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::ApiError;
use crate::store::Page;

/// Common list-endpoint query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub client_id: Option<Uuid>,
}

impl ListQuery {
    /// Validate pagination bounds: `skip >= 0`, `1 <= limit <= 1000`,
    /// defaults 0/100. Out-of-range values are a field-level 400, detected
    /// before any data access.
    pub fn page(&self) -> Result<Page, ApiError> {
        let mut field_errors = HashMap::new();

        let skip = self.skip.unwrap_or(0);
        if skip < 0 {
            field_errors.insert("skip".to_string(), "must be >= 0".to_string());
        }

        let max = crate::config::config().api.max_page_size;
        let limit = self
            .limit
            .unwrap_or(crate::config::config().api.default_page_size);
        if limit < 1 || limit > max {
            field_errors.insert("limit".to_string(), format!("must be between 1 and {max}"));
        }

        if !field_errors.is_empty() {
            return Err(ApiError::validation_error(
                "Invalid pagination parameters",
                Some(field_errors),
            ));
        }

        Ok(Page {
            skip: skip as usize,
            limit: limit as usize,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults() {
        let page = ListQuery::default().page().unwrap();
        assert_eq!(page.skip, 0);
        assert_eq!(page.limit, 100);
    }

    #[test]
    fn pagination_bounds() {
        let q = ListQuery {
            skip: Some(-1),
            limit: Some(0),
            ..Default::default()
        };
        let err = q.page().unwrap_err();
        assert_eq!(err.status_code(), 400);

        let q = ListQuery {
            limit: Some(1001),
            ..Default::default()
        };
        assert!(q.page().is_err());

        let q = ListQuery {
            skip: Some(5),
            limit: Some(1000),
            ..Default::default()
        };
        let page = q.page().unwrap();
        assert_eq!(page.skip, 5);
        assert_eq!(page.limit, 1000);
    }
}
