//! Role intersection between a bearer token and a server record.

/// Whether any of the caller's roles is authorized on the server.
///
/// An empty intersection, including an empty role list on either side, is
/// a refusal.
pub fn roles_intersect(token_roles: &[String], server_roles: &[String]) -> bool {
    token_roles
        .iter()
        .any(|role| server_roles.iter().any(|allowed| allowed == role))
}
