use crate::AccountError;

/// Fails unless `host` is one of `allowed`, compared as exact strings. An
/// empty allow-list permits every host.
pub fn check_push_host(host: &str, allowed: &[String]) -> Result<(), AccountError> {
    if allowed.is_empty() || allowed.iter().any(|allowed| allowed == host) {
        return Ok(());
    }
    Err(AccountError::PushHostNotAllowed {
        host: host.to_owned(),
        allowed: allowed
            .iter()
            .map(|host| format!("\"{host}\""))
            .collect::<Vec<_>>()
            .join(", "),
    })
}
