use std::path::Path;

use crate::error::{Error, Result};

/// Extension trait for Path to provide checked string conversions
pub trait PathExt {
    /// Converts a path to a string slice, returning an error if the path contains invalid Unicode characters.
    ///
    /// # Examples
    /// ```
    /// use mcrender::ext::PathExt;
    /// use std::path::Path;
    ///
    /// let path = Path::new("templates/worker");
    /// assert_eq!(path.to_str_checked().unwrap(), "templates/worker");
    /// ```
    fn to_str_checked(&self) -> Result<&str>;

    /// The final component of the path as a string. Rendered artifacts are keyed by it.
    ///
    /// # Examples
    /// ```
    /// use mcrender::ext::PathExt;
    /// use std::path::Path;
    ///
    /// let path = Path::new("worker/00-worker/_base/units/kubelet.service.yaml");
    /// assert_eq!(path.file_name_checked().unwrap(), "kubelet.service.yaml");
    /// ```
    fn file_name_checked(&self) -> Result<&str>;
}

impl PathExt for Path {
    fn to_str_checked(&self) -> Result<&str> {
        self.to_str().ok_or_else(|| Error::InvalidPath { path: self.display().to_string() })
    }

    fn file_name_checked(&self) -> Result<&str> {
        self.file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| Error::InvalidPath { path: self.display().to_string() })
    }
}
