//! Article markup processing: text normalization, platform node-stream
//! extraction, and document tree construction.
//!
//! The chain for one article is
//! [`extract_nodes`] → [`build_document`], with [`normalize`] applied to
//! every title, paragraph, and citation text along the way.

pub mod adapters;
pub mod normalize;
pub mod tree;

pub use adapters::{
    ArticleAdapter, GrokipediaAdapter, WikipediaAdapter, adapter_for, extract_nodes,
};
pub use normalize::normalize;
pub use tree::build_document;
