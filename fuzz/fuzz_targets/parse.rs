#![no_main]

use libfuzzer_sys::fuzz_target;

use active_oberon::toolchain::diagnostics::NullDiagnosticConsumer;
use active_oberon::toolchain::lexer::TokenizedBuffer;
use active_oberon::toolchain::parser::Parser;
use active_oberon::toolchain::source::SourceBuffer;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);
    let source = SourceBuffer::new_from_string(&s, "fuzz_targets/parse.rs");
    let mut diags = NullDiagnosticConsumer {};
    let buffer = TokenizedBuffer::tokenize(&source, &mut diags);
    let _ = Parser::parse(&buffer, &mut diags);
});
