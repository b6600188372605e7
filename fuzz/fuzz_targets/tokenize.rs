#![no_main]

use libfuzzer_sys::fuzz_target;

use active_oberon::toolchain::diagnostics::NullDiagnosticConsumer;
use active_oberon::toolchain::lexer::TokenizedBuffer;
use active_oberon::toolchain::source::SourceBuffer;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);
    let source = SourceBuffer::new_from_string(&s, "fuzz_targets/tokenize.rs");
    let mut diags = NullDiagnosticConsumer {};
    let _ = TokenizedBuffer::tokenize(&source, &mut diags);
});
