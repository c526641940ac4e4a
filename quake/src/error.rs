use std::{
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("io error: {0}")]
    Io(#[source] io::Error),
    #[error("{0}")]
    Format(String),
    #[error("unsupported BSP version {found}, expected {expected}")]
    Version { found: i32, expected: i32 },
    #[error("{0}")]
    Truncated(String),
    #[error("{0}")]
    NotFound(String),

    /// Which step of a load was running when the inner error happened.
    #[error("{stage}: {source}")]
    Stage {
        stage: &'static str,
        source: Box<AssetError>,
    },
    #[error("{}: {source}", .path.display())]
    File {
        path: PathBuf,
        source: Box<AssetError>,
    },
}

pub type Result<T> = std::result::Result<T, AssetError>;

impl AssetError {
    /// The error behind any [AssetError::Stage] or [AssetError::File] wrappers.
    pub fn root(&self) -> &AssetError {
        let mut err = self;
        loop {
            match err {
                Self::Stage { source, .. } | Self::File { source, .. } => err = source,
                _ => return err,
            }
        }
    }

    pub fn is_format(&self) -> bool {
        matches!(self.root(), Self::Format(_) | Self::Version { .. })
    }

    pub fn is_truncated(&self) -> bool {
        matches!(self.root(), Self::Truncated(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.root(), Self::NotFound(_))
    }
}

impl From<io::Error> for AssetError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => AssetError::Truncated("unexpected EOF".to_owned()),
            _ => AssetError::Io(err),
        }
    }
}

pub trait ErrorContext {
    /// Tag the error with the load step that produced it.
    fn stage(self, stage: &'static str) -> Self;
    fn in_file(self, path: &Path) -> Self;
}

impl<T> ErrorContext for Result<T> {
    fn stage(self, stage: &'static str) -> Self {
        self.map_err(|err| AssetError::Stage {
            stage,
            source: Box::new(err),
        })
    }

    fn in_file(self, path: &Path) -> Self {
        self.map_err(|err| AssetError::File {
            path: path.to_owned(),
            source: Box::new(err),
        })
    }
}

#[cfg(test)]
mod error_tests {
    use std::{error::Error, io, path::Path};

    use super::{AssetError, ErrorContext, Result};

    #[test]
    fn eof_maps_to_truncated() {
        let err: AssetError = io::Error::from(io::ErrorKind::UnexpectedEof).into();
        assert!(err.is_truncated());

        let err: AssetError = io::Error::from(io::ErrorKind::PermissionDenied).into();
        assert!(matches!(err, AssetError::Io(_)));
    }

    #[test]
    fn io_errors_chain() {
        let res: Result<()> = Err(io::Error::new(io::ErrorKind::PermissionDenied, "locked").into());
        let err = res.stage("header").unwrap_err();

        let io = err.source().and_then(|inner| inner.source()).unwrap();
        assert_eq!(io.to_string(), "locked");
        assert!(io.downcast_ref::<io::Error>().is_some());
    }

    #[test]
    fn context_wrappers_keep_root() {
        let res: Result<()> = Err(AssetError::NotFound("could not find map maps/e1m1.bsp".into()));
        let err = res
            .stage("entities")
            .in_file(Path::new("pak0.pak"))
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "pak0.pak: entities: could not find map maps/e1m1.bsp"
        );
    }
}
