//! File I/O utilities (gzip aware)

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter};
use std::path::Path;

const READER_BUF_CAP: usize = 128 * 1024; // 128 KiB

/// Open a result file for line-wise reading. `*.gz` files are decompressed on the fly.
pub fn open_reader<P: AsRef<Path>>(path: P) -> io::Result<Box<dyn BufRead>> {
    let p = path.as_ref();
    let f = File::open(p)?;
    if is_gzip(p) {
        let dec = flate2::read::GzDecoder::new(f);
        return Ok(Box::new(BufReader::with_capacity(READER_BUF_CAP, dec)));
    }
    Ok(Box::new(BufReader::with_capacity(READER_BUF_CAP, f)))
}

/// Open `path` for appending, creating it if needed.
///
/// Returns the writer together with a flag telling whether the file was empty
/// before this call, so callers can emit a header once.
pub fn open_appender<P: AsRef<Path>>(path: P) -> io::Result<(BufWriter<File>, bool)> {
    let f = OpenOptions::new().create(true).append(true).open(path)?;
    let was_empty = f.metadata()?.len() == 0;
    Ok((BufWriter::new(f), was_empty))
}

fn is_gzip(p: &Path) -> bool {
    p.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gz"))
}
