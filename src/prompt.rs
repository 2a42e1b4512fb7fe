//! Grounded prompt construction.
//!
//! A pure, deterministic rendering of question + retrieved context. The
//! instruction block forbids outside knowledge and pins the exact refusal
//! phrase, so at temperature 0 the same retrieval yields the same answer.

/// Fixed delimiter between context passages.
pub const CONTEXT_DELIMITER: &str = "\n\n---\n\n";

/// Render the grounded prompt: instruction block, joined context, question.
pub fn build_prompt(question: &str, contexts: &[String], refusal: &str) -> String {
    let joined = contexts.join(CONTEXT_DELIMITER);

    format!(
        "You are a strict book tutor.\n\
         \n\
         Rules:\n\
         - Answer ONLY using the context below.\n\
         - Do NOT use outside knowledge.\n\
         - Do NOT guess.\n\
         - If the answer is not found in the context, reply exactly:\n\
         \"{refusal}\"\n\
         \n\
         Context:\n\
         {joined}\n\
         \n\
         Question:\n\
         {question}"
    )
}
