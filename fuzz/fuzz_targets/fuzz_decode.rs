#![no_main]

use exprga::ga::{bit_string_to_expression, BITS_PER_GROUP};
use exprga::BitString;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary text must either parse or be rejected, never panic
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = text.parse::<BitString>();
        let _ = text.parse::<exprga::Expression>().map(|e| e.evaluate());
    }

    let bits = BitString::new(data.iter().map(|b| b & 1 == 1).collect());
    let expression = bit_string_to_expression(&bits);
    let symbols = expression.symbols();

    assert!(symbols.len() <= bits.len() / BITS_PER_GROUP);
    for (i, symbol) in symbols.iter().enumerate() {
        assert_eq!(symbol.is_digit(), i % 2 == 0, "bad grammar: {expression}");
    }
    if !symbols.is_empty() {
        assert!(symbols.len() % 2 == 1, "trailing operator: {expression}");
    }
    assert!(expression.evaluate().is_finite());
});
