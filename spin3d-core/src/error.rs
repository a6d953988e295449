/// Error type shared by the core and every `Surface` backend
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// `viewer_distance + z` was zero, so the perspective divide is undefined.
    #[error("cannot project point: viewer distance plus depth is {depth}")]
    DegenerateProjection { depth: f64 },

    /// The display collaborator failed (window creation, present, input).
    #[error("display surface failure")]
    Surface(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    pub fn surface<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Error::Surface(err.into())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::surface(err)
    }
}
