use strum_macros::{Display, EnumIter};

/// Kind of grant a user can hold on a node. A grant covers the node's whole subtree.
#[derive(Debug, Clone, PartialEq, Copy, EnumIter, Display, Eq, Hash)]
pub enum PermissionType {
    #[strum(serialize = "edit")]
    Edit,
    /// Also grants unpublishing.
    #[strum(serialize = "publish")]
    Publish,
    #[strum(serialize = "lock")]
    Lock,
}

impl PermissionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionType::Edit => "edit",
            PermissionType::Publish => "publish",
            PermissionType::Lock => "lock",
        }
    }
}
