use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Iterator over the lines of a byte stream.
///
/// - Splits on `\n` / `\r\n`, terminators are not kept
/// - Bytes that are not valid UTF-8 are replaced with U+FFFD instead of
///   failing the whole read
pub(crate) struct LossyLines<R> {
	reader: R,
	buf: Vec<u8>,
}

impl<R: BufRead> Iterator for LossyLines<R> {
	type Item = io::Result<String>;

	fn next(&mut self) -> Option<Self::Item> {
		self.buf.clear();
		match self.reader.read_until(b'\n', &mut self.buf) {
			Ok(0) => None,
			Ok(_) => {
				if self.buf.last() == Some(&b'\n') {
					self.buf.pop();
					if self.buf.last() == Some(&b'\r') {
						self.buf.pop();
					}
				}
				Some(Ok(String::from_utf8_lossy(&self.buf).into_owned()))
			}
			Err(e) => Some(Err(e)),
		}
	}
}

/// Wraps `reader` into a [`LossyLines`] iterator.
pub(crate) fn lossy_lines<R: BufRead>(reader: R) -> LossyLines<R> {
	LossyLines { reader, buf: Vec::new() }
}

/// Opens a file for line-by-line reading.
pub(crate) fn open_lines<P: AsRef<Path>>(filename: P) -> io::Result<LossyLines<BufReader<File>>> {
	Ok(lossy_lines(BufReader::new(File::open(filename)?)))
}

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// Reads the entire file into memory before anything is processed.
pub(crate) fn read_lines<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	open_lines(filename)?.collect()
}

/// Builds the path of the temporary sibling used while rewriting `path`.
///
/// Example:
/// `data/potato.kb` → `data/.potato.kb.tmp`
pub(crate) fn build_temp_path<P: AsRef<Path>>(path: P) -> io::Result<PathBuf> {
	let path = path.as_ref();
	let file_name = path
		.file_name()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no filename"))?;

	let mut temp_name = OsString::from(".");
	temp_name.push(file_name);
	temp_name.push(".tmp");
	Ok(path.with_file_name(temp_name))
}

/// Replaces the content of `path` with `bytes`.
///
/// Data is written and synced to a temporary sibling first, then renamed
/// over `path`, so readers never see a half-written file.
pub(crate) fn write_replace<P: AsRef<Path>>(path: P, bytes: &[u8]) -> io::Result<()> {
	let path = path.as_ref();
	let temp_path = build_temp_path(path)?;

	let result = File::create(&temp_path)
		.and_then(|mut file| {
			file.write_all(bytes)?;
			file.sync_all()
		})
		.and_then(|()| fs::rename(&temp_path, path));

	if result.is_err() {
		let _ = fs::remove_file(&temp_path);
	}
	result
}
