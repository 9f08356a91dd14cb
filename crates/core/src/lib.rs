//! symptom-core: Shared analysis types and pure pipeline stages
//!
//! This crate holds everything in the analysis pipeline that does not touch
//! the network or the clock of a running server: the data model, prompt
//! templates, the canned fallback reply, and the response normalizer.

pub mod analysis;
pub mod error;
pub mod fallback;
pub mod normalize;
pub mod outcome;
pub mod prompt;

// Re-export our types
pub use analysis::{
    AnalysisResult, ChatMessage, ChatReply, DISCLAIMER, DocumentAnalysis, PossibleCondition,
    REPORT_DISCLAIMER, SymptomInput,
};
pub use error::AnalysisError;
pub use fallback::FALLBACK_PAYLOAD;
pub use normalize::{NormalizedReply, normalize};
pub use outcome::ErrorBody;
