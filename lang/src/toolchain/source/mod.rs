pub mod source_buffer;

pub use source_buffer::SourceBuffer;

/// Builds an in-memory [SourceBuffer] named after the location of the macro invocation, so
/// diagnostics from test inputs point back at the test that produced them.
#[macro_export]
macro_rules! oberon {
    ( $s:literal ) => {
        &$crate::toolchain::source::SourceBuffer::new_from_string(
            $s,
            const_format::formatcp!("{}:{}:{}", file!(), line!(), column!()),
        )
    };
}
