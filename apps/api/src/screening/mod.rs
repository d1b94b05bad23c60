// Resume screening engine.
// Pipeline: extract text -> {contacts, skills, professions, similarity} -> assemble.
// Sub-computations degrade to defaults; nothing here returns an error to the caller.

pub mod assembler;
pub mod contact;
pub mod entities;
pub mod extractor;
pub mod handlers;
pub mod highlight;
pub mod pipeline;
pub mod professions;
pub mod prompts;
pub mod result;
pub mod similarity;
pub mod skills;
pub mod stop_words;
pub mod text;
pub mod vocabulary;
