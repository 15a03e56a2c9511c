/// Partial profile update.
///
/// `name` and `email` go through the generic field path. `password_hash` is
/// applied as a separate step after them, in the same transaction.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}
