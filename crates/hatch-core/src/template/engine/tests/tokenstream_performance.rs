//! O(n) guarantees for TokenStream

use super::tokenize::{test_counter, TokenStream};

#[test]
fn test_tokenstream_steps_are_linear() {
    let mut input = String::new();
    for i in 0..500 {
        input.push_str(&format!("{{% if k{} %}}x{{{{ v{} }}}}{{% endif %}} {{ }} ", i, i));
    }

    test_counter::reset();
    let tokens: Vec<_> = TokenStream::new(&input).collect();
    let steps = test_counter::get();

    assert_eq!(tokens.len(), 1500);
    assert!(
        steps <= input.len() * 2,
        "Expected at most 2 steps per byte, got {} steps for {} bytes",
        steps,
        input.len()
    );
}

#[test]
fn test_tokenstream_pathological_braces_terminate() {
    // Many lone braces and near-miss closers force the reprocess paths
    let input = "{ {% %% %% }{{ }} } ".repeat(2000);

    test_counter::reset();
    let count = TokenStream::new(&input).count();
    let steps = test_counter::get();

    assert!(count > 0);
    assert!(steps <= input.len() * 3);
}
