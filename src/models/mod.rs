//! Domain models and DTOs for the catalog API
//!
//! Rows (`Category`, `Product`), write inputs, pagination, and the
//! request/response bodies used by the HTTP layer.

pub mod category;
pub mod pagination;
pub mod product;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use category::{Category, CategoryWithChildren, NewCategory};
pub use pagination::{Page, PageRequest, DEFAULT_PER_PAGE};
pub use product::{NewProduct, Product, ProductChanges};
pub use requests::ProductQuery;
pub use responses::{DataResponse, HealthResponse, MessageResponse, StatsResponse};
