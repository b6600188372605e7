use std::fs::File;

use bstr::BStr;

enum SourceBufferKind<'a> {
    File { buffer: mmap_rs::Mmap },
    Memory { string: &'a str },
}

/// Keeps source and a file name in the same object, so they provide the same lifetimes.
pub struct SourceBuffer<'a> {
    kind: SourceBufferKind<'a>,
    file_name: String,
}

impl<'a> SourceBuffer<'a> {
    /// Maps the file at `file_path` into memory. Does nothing to check if the input file is valid
    /// utf-8, the scanner substitutes invalid sequences as it decodes.
    pub fn new_from_file(file_path: &std::path::Path) -> Result<SourceBuffer<'a>, mmap_rs::Error> {
        let file = File::open(file_path)?;
        let len = File::metadata(&file)?.len();
        let file_name = file_path.to_string_lossy().into_owned();

        // A zero-length mapping is an error, an empty module is only a syntax error.
        if len == 0 {
            return Ok(SourceBuffer { kind: SourceBufferKind::Memory { string: "" }, file_name });
        }

        let len = usize::try_from(len).map_err(|_| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, "source file too large to map")
        })?;
        let buffer = unsafe { mmap_rs::MmapOptions::new(len)?.with_file(&file, 0).map()? };
        Ok(SourceBuffer { kind: SourceBufferKind::File { buffer }, file_name })
    }

    pub fn new_from_string(string: &'a str, name: &str) -> SourceBuffer<'a> {
        SourceBuffer { kind: SourceBufferKind::Memory { string }, file_name: String::from(name) }
    }

    pub fn code(&self) -> &BStr {
        match &self.kind {
            SourceBufferKind::File { buffer } => BStr::new(buffer.as_slice()),
            SourceBufferKind::Memory { string } => BStr::new(string.as_bytes()),
        }
    }

    pub fn file_name(&self) -> &str {
        self.file_name.as_str()
    }
}
