//! Grounded-answer prompt rendering.

/// Renders the fixed instruction template for the downstream language model.
///
/// The template tells the model to answer only from the supplied context and
/// to declare uncertainty otherwise; context and question are embedded
/// verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    /// Render the prompt for `question` over `context`.
    pub fn build(&self, question: &str, context: &str) -> String {
        format!(
            "System: Answer using the provided context only. \
             If the answer is not in the context, say you don't know.\n\
             Context:\n{context}\nQuestion:\n{question}"
        )
    }
}
