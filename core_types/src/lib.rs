use strum_macros::{Display, EnumIter};

pub mod permission_type;
pub mod tree_path;

pub type NodeId = i64;
pub type UserId = i64;

#[derive(Debug, Clone, PartialEq)]
pub enum CoreTypeError {
    ConversionError(String),
    InvalidArgumentType(String),
}

impl std::fmt::Display for CoreTypeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoreTypeError::ConversionError(msg) => write!(f, "Conversion Error: {}", msg),
            CoreTypeError::InvalidArgumentType(msg) => write!(f, "Invalid Argument Type: {}", msg),
        }
    }
}

/// Publication state of a content node.
///
/// Nodes only ever move from `Live` to `Unpublished` through the bulk action.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Hash, EnumIter, Display)]
pub enum PublicationState {
    #[strum(serialize = "live")]
    Live,
    #[strum(serialize = "unpublished")]
    Unpublished,
}

impl PublicationState {
    pub fn is_live(&self) -> bool {
        matches!(self, PublicationState::Live)
    }
}

impl From<bool> for PublicationState {
    fn from(live: bool) -> Self {
        if live {
            PublicationState::Live
        } else {
            PublicationState::Unpublished
        }
    }
}

impl From<PublicationState> for bool {
    fn from(value: PublicationState) -> Self {
        value.is_live()
    }
}
