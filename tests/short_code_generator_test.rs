// Short code generator: alphabet, collision retries and bounded exhaustion

mod common;

use common::{InMemoryRepository, ScriptedCodeSource};
use foodgram_backend_core::{
    services::{ShortCodeError, ShortCodeGenerator},
    utils::code_alphabet::{is_valid_code, CODE_ALPHABET},
};
use std::sync::Arc;

#[tokio::test]
async fn test_generated_codes_use_alphabet_and_length() {
    let repo = InMemoryRepository::new();
    let generator = ShortCodeGenerator::new(3, 256).unwrap();

    for _ in 0..200 {
        let code = generator.generate_unique_code(&repo).await.unwrap();
        assert_eq!(code.len(), 3);
        assert!(is_valid_code(&code), "unexpected symbol in {}", code);
    }

    for length in [1, 5, 10] {
        let code = generator
            .generate_unique_code_with_length(&repo, length)
            .await
            .unwrap();
        assert_eq!(code.len(), length);
    }
}

#[tokio::test]
async fn test_collision_is_retried() {
    let repo = InMemoryRepository::new();
    repo.add_recipe(1, "Pancakes", &[]);
    repo.seed_link(1, "AbC");

    let source = Arc::new(ScriptedCodeSource::new(&["AbC", "XyZ"]));
    let generator = ShortCodeGenerator::with_source(source.clone(), 3, 256).unwrap();

    let code = generator.generate_unique_code(&repo).await.unwrap();

    assert_eq!(code, "XyZ");
    assert_eq!(source.draws(), 2);
}

#[tokio::test]
async fn test_never_returns_stored_code_in_tiny_space() {
    let repo = InMemoryRepository::new();
    let free = CODE_ALPHABET[17] as char;

    for (i, &symbol) in CODE_ALPHABET.iter().enumerate() {
        if symbol as char != free {
            repo.seed_link(i as i64 + 1, &(symbol as char).to_string());
        }
    }

    // Large budget so a uniform source finds the single free code
    let generator = ShortCodeGenerator::new(1, 10_000).unwrap();
    let code = generator.generate_unique_code(&repo).await.unwrap();

    assert_eq!(code, free.to_string());
}

#[tokio::test]
async fn test_exhaustion_after_exactly_max_attempts() {
    let repo = InMemoryRepository::new();
    repo.seed_link(1, "AbC");

    let source = Arc::new(ScriptedCodeSource::new(&["AbC"]));
    let generator = ShortCodeGenerator::with_source(source.clone(), 3, 7).unwrap();

    let result = generator.generate_unique_code(&repo).await;

    assert!(matches!(
        result,
        Err(ShortCodeError::CodeSpaceExhausted { attempts: 7 })
    ));
    assert_eq!(source.draws(), 7);
    assert_eq!(repo.code_checks(), 7);
}

#[tokio::test]
async fn test_invalid_length_rejected() {
    let repo = InMemoryRepository::new();
    let generator = ShortCodeGenerator::new(3, 256).unwrap();

    assert!(matches!(
        generator.generate_unique_code_with_length(&repo, 0).await,
        Err(ShortCodeError::InvalidLength(0, 10))
    ));
    assert!(matches!(
        generator.generate_unique_code_with_length(&repo, 11).await,
        Err(ShortCodeError::InvalidLength(11, 10))
    ));
}
