pub mod classify;
pub mod coordinator;
pub mod document;
pub mod error;
pub mod extract;
pub mod fetch;
pub(crate) mod html;
pub mod patterns;
pub(crate) mod rate_limit;

pub use classify::classify;
pub use coordinator::{extract_details, ProductDataFetcher};
pub use document::Document;
pub use error::{ExtractError, FetchError, PatternError};
pub use extract::{extract_draft, Draft, ExtractionCandidate, FieldSlot};
pub use fetch::{FetchedPage, HtmlFetcher, HttpFetcher};
pub use patterns::{library, Capture, Field, PatternLibrary, RuleSpec, Scope, Tier};
