use thiserror::Error;

/// Errors reported by the containers in this crate. A call that
/// returns an error leaves the container exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// A removal or sample was attempted on a container holding no
    /// items.
    #[error("can't {operation} an empty {container}")]
    Empty {
        container: &'static str,
        operation: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
