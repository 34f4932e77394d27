//! Cluster name inference from the infrastructure name and API server hostname.
//!
//! The infrastructure name is conventionally `<cluster-name-with-dashes>-<suffix>`,
//! while the API hostname embeds the cluster name with some dashes replaced by dots.
//! Neither the suffix length nor the dash/dot pattern is known up front, so every
//! combination is tried.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClusterNameError {
    #[error("Could not find a match of '{infrastructure_name}' in '{api_hostname}'.")]
    NotFound { infrastructure_name: String, api_hostname: String },
}

/// Returns the most plausible cluster name.
///
/// Trailing `-` segments are dropped from `infrastructure_name` one at a time, and
/// for each shortened name every dash/dot variant is checked against `api_hostname`.
/// The first variant contained in the hostname wins.
///
/// # Examples
/// ```
/// use mcrender::cluster_name::infer_cluster_name;
///
/// let name = infer_cluster_name("sub-my-cluster-nzml9", "api.sub.my-cluster.example.com");
/// assert_eq!(name.unwrap(), "sub.my-cluster");
/// ```
pub fn infer_cluster_name(
    infrastructure_name: &str,
    api_hostname: &str,
) -> Result<String, ClusterNameError> {
    let parts: Vec<&str> = infrastructure_name.split('-').collect();

    for i in (1..parts.len()).rev() {
        let found = NameVariants::new(&parts[..i]).find(|candidate| {
            !candidate.ends_with('.') && api_hostname.contains(candidate.as_str())
        });
        if let Some(name) = found {
            return Ok(name);
        }
    }

    Err(ClusterNameError::NotFound {
        infrastructure_name: infrastructure_name.to_string(),
        api_hostname: api_hostname.to_string(),
    })
}

/// Lazily yields every way of joining `parts` with `.` or `-`.
///
/// The separator after the first part changes fastest and `.` comes before `-`,
/// so `a-b-c` yields `a.b.c`, `a-b.c`, `a.b-c`, `a-b-c`.
#[derive(Debug, Clone)]
pub struct NameVariants<'a> {
    parts: &'a [&'a str],
    /// `true` selects `-` for the separator at that index.
    dashes: Vec<bool>,
    done: bool,
}

impl<'a> NameVariants<'a> {
    pub fn new(parts: &'a [&'a str]) -> Self {
        let separators = parts.len().saturating_sub(1);
        Self { parts, dashes: vec![false; separators], done: parts.is_empty() }
    }

    fn current(&self) -> String {
        let mut name = String::new();
        for (index, part) in self.parts.iter().enumerate() {
            if index > 0 {
                name.push(if self.dashes[index - 1] { '-' } else { '.' });
            }
            name.push_str(part);
        }
        name
    }

    /// Advances the separator odometer, returning false once it wraps around.
    fn advance(&mut self) -> bool {
        for dash in self.dashes.iter_mut() {
            if *dash {
                *dash = false;
            } else {
                *dash = true;
                return true;
            }
        }
        false
    }
}

impl Iterator for NameVariants<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let name = self.current();
        self.done = !self.advance();
        Some(name)
    }
}
