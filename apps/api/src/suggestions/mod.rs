// Writing assistance for content fields: critique heuristics and example statements.
// Vocabularies are configuration data, loaded once and shared read-only.

pub mod critique;
pub mod handlers;
pub mod statements;
pub mod vocabulary;

pub use critique::{critique, critique_as, CritiqueKind};
pub use statements::{examples_for, fill_placeholders, ExampleTarget};
pub use vocabulary::SuggestionVocabulary;
