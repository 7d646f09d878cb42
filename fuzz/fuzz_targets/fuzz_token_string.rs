#![no_main]

use libfuzzer_sys::fuzz_target;
use tokpos_core::{Contextual, TokenContext};
use tokpos_text::TokenString;

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(mut s) = TokenString::parse(raw) {
        let _ = s.update_context(&TokenContext::new());
    }
});
