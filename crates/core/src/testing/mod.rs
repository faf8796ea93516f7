//! Testing utilities and mock implementations for E2E tests.
//!
//! This module provides a mock implementation of the marketplace API trait,
//! allowing pipeline and server tests to run without real infrastructure.
//!
//! # Example
//!
//! ```rust,ignore
//! use packflow_core::testing::MockMarketplace;
//!
//! let api = MockMarketplace::new();
//! api.fail_operation("write_meta", MarketplaceError::Timeout).await;
//!
//! // Use as Arc<dyn MarketplaceApi> in AppState...
//! ```

mod mock_marketplace;

pub use mock_marketplace::{MockMarketplace, RecordedCall};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::marketplace::{Order, Pass, PassOffice};

    /// Create a test order with reasonable defaults.
    pub fn order(id: i64) -> Order {
        Order {
            id,
            rid: Some(format!("{}.0.0", id)),
            created_at: None,
            supply_id: None,
            article: Some("white-tshirt-m".to_string()),
            skus: vec!["2000328074634".to_string()],
            price: Some(123500),
            converted_price: Some(123500),
            office_id: Some(507),
        }
    }

    /// Create a test pass office.
    pub fn pass_office(id: i64, name: &str) -> PassOffice {
        PassOffice {
            id,
            name: Some(name.to_string()),
            address: Some("Koledino, bld. 1".to_string()),
        }
    }

    /// Create a test access pass.
    pub fn pass(id: i64, office_id: i64) -> Pass {
        Pass {
            id,
            office_id,
            car_number: Some("A123BC77".to_string()),
            car_model: None,
            driver_name: Some("Test Driver".to_string()),
            date_start: None,
            date_end: None,
        }
    }
}
