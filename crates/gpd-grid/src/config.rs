//! Where the dataset lives and what its files are called.

use serde::Deserialize;
use std::path::PathBuf;

use gpd_common::Axis;

use crate::loader::ArraySource;

/// Root location of the five dataset files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataRoot {
    /// Local directory.
    Dir(PathBuf),
    /// HTTP(S) base URL.
    Url(String),
}

impl DataRoot {
    /// Interpret a locator string. Anything starting with `http://` or
    /// `https://` is a base URL, everything else a directory.
    pub fn parse(locator: &str) -> Self {
        if is_http(locator) {
            DataRoot::Url(locator.trim_end_matches('/').to_string())
        } else {
            DataRoot::Dir(PathBuf::from(locator))
        }
    }

    /// Resolve a file name against this root.
    pub fn resolve(&self, file_name: &str) -> ArraySource {
        match self {
            DataRoot::Dir(dir) => ArraySource::File(dir.join(file_name)),
            DataRoot::Url(base) => ArraySource::Http(format!("{}/{}", base, file_name)),
        }
    }
}

pub(crate) fn is_http(locator: &str) -> bool {
    locator.starts_with("http://") || locator.starts_with("https://")
}

/// File names of the dataset arrays relative to the [`DataRoot`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatasetLayout {
    #[serde(default = "default_x")]
    pub x: String,
    #[serde(default = "default_xi")]
    pub xi: String,
    #[serde(default = "default_t")]
    pub t: String,
    #[serde(default = "default_q2")]
    pub q2: String,
    #[serde(default = "default_gpd")]
    pub gpd: String,
}

fn default_x() -> String {
    Axis::X.file_name()
}

fn default_xi() -> String {
    Axis::Xi.file_name()
}

fn default_t() -> String {
    Axis::T.file_name()
}

fn default_q2() -> String {
    Axis::Q2.file_name()
}

fn default_gpd() -> String {
    "gpd_4d.bin".to_string()
}

impl Default for DatasetLayout {
    fn default() -> Self {
        Self {
            x: default_x(),
            xi: default_xi(),
            t: default_t(),
            q2: default_q2(),
            gpd: default_gpd(),
        }
    }
}

impl DatasetLayout {
    /// File name of an axis array.
    pub fn axis_file(&self, axis: Axis) -> &str {
        match axis {
            Axis::X => &self.x,
            Axis::Xi => &self.xi,
            Axis::T => &self.t,
            Axis::Q2 => &self.q2,
            Axis::Dim(_) => &self.gpd,
        }
    }
}
