pub mod catalog;
pub mod history;
pub mod pagination;
pub mod recommendations;
pub mod routines;
pub mod rules;
pub mod scoring;
pub mod search;
pub mod tags;

pub use catalog::CatalogService;
pub use pagination::{paginate, Page, PageError};
pub use recommendations::{Recommendation, ScoredItem};
