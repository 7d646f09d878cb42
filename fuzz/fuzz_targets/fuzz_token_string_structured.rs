#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tokpos_core::{Contextual, ContextualText, TokenContext};
use tokpos_text::TokenString;

#[derive(Arbitrary, Debug)]
enum FuzzPiece {
    Text(String),
    Open,
    Close,
    Colon,
    Token { name: u8, input: Option<String> },
}

impl FuzzPiece {
    fn push_to(&self, out: &mut String) {
        match self {
            FuzzPiece::Text(text) => out.push_str(text),
            FuzzPiece::Open => out.push_str("{{"),
            FuzzPiece::Close => out.push_str("}}"),
            FuzzPiece::Colon => out.push(':'),
            FuzzPiece::Token { name, input } => {
                out.push_str("{{");
                out.push_str(&format!("T{}", name % 8));
                if let Some(input) = input {
                    out.push(':');
                    out.push_str(input);
                }
                out.push_str("}}");
            }
        }
    }
}

fuzz_target!(|input: (Vec<FuzzPiece>, Vec<(u8, String)>)| {
    let (pieces, bindings) = input;
    let mut raw = String::new();
    for piece in pieces {
        if raw.len() > 4096 {
            break;
        }
        piece.push_to(&mut raw);
    }

    let mut ctx = TokenContext::new();
    for (name, value) in bindings {
        ctx.set(&format!("T{}", name % 8), value);
    }

    if let Ok(mut s) = TokenString::parse(&raw) {
        let _ = s.update_context(&ctx);
        let _ = s.resolved_text();
        assert!(!s.update_context(&ctx));
    }
});
