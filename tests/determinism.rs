//! Determinism guarantees: identical inputs reproduce identical chunk
//! sequences, prompts, and stub vectors across runs.

use folio::{prompt, Embedder, StubEmbedder};
use ingest::chunk;

#[test]
fn chunking_reproduces_identical_sequences() {
    let text = "It was the best of times, it was the worst of times, it was the age of wisdom";

    let first: Vec<String> = chunk(text, 6, 2).unwrap().collect();
    let second: Vec<String> = chunk(text, 6, 2).unwrap().collect();

    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn prompt_rendering_is_pure() {
    let contexts = vec![
        "[Book | Chapter 1]\nThe sky is blue.".to_string(),
        "The grass is green.".to_string(),
    ];

    let a = prompt::build_prompt("What color is the sky?", &contexts, "Not found in book.");
    let b = prompt::build_prompt("What color is the sky?", &contexts, "Not found in book.");

    assert_eq!(a, b);
    assert!(a.contains(prompt::CONTEXT_DELIMITER));
}

#[tokio::test]
async fn stub_embedder_reproduces_vectors() {
    let embedder = StubEmbedder::new(384, true);

    let first = embedder.embed("the sky is blue").await.unwrap();
    let second = embedder.embed("the sky is blue").await.unwrap();
    let other = embedder.embed("the grass is green").await.unwrap();

    assert_eq!(first, second);
    assert_ne!(first, other);
    assert_eq!(first.len(), 384);
}
