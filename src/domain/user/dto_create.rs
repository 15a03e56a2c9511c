/// Row to insert into the identity store.
///
/// `password_hash` must already be hashed; plaintext never reaches a repository.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}
