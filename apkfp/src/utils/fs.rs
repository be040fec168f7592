use std::borrow::Cow;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// Lossy string form of a path for messages
pub fn path_str(path: &Path) -> Cow<'_, str> {
    path.to_string_lossy()
}

pub fn open_file(path: &Path) -> crate::Result<File> {
    match File::open(path) {
        Ok(v) => Ok(v),
        Err(e) => match e.kind() {
            ErrorKind::NotFound => Err(crate::Error::MissingFile(path_str(path).into_owned())),
            _ => Err(e.into()),
        },
    }
}

pub fn read_file(path: &Path) -> crate::Result<String> {
    let mut content = String::new();
    open_file(path)?.read_to_string(&mut content)?;
    Ok(content)
}
