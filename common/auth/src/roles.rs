pub const ROLE_USER: &str = "USER";
pub const ROLE_ADMIN: &str = "ADMIN";

pub const KNOWN_ROLES: &[&str] = &[ROLE_USER, ROLE_ADMIN];
