//! Prompt templates for classification and grounded answering

mod template;

pub use template::PromptTemplate;
