//! Presentation state that is not part of the table engine

/// Progress of the one-time record load
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Pending,
    Loaded,
    /// The source could not be reached or decoded; the table stays empty
    Failed(String),
}

/// Field focused in the edit dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditField {
    #[default]
    Name,
    Email,
    Role,
}

impl EditField {
    pub fn next(self) -> Self {
        match self {
            EditField::Name => EditField::Email,
            EditField::Email => EditField::Role,
            EditField::Role => EditField::Name,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            EditField::Name => EditField::Role,
            EditField::Email => EditField::Name,
            EditField::Role => EditField::Email,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            EditField::Name => "Name",
            EditField::Email => "Email",
            EditField::Role => "Role",
        }
    }
}
