//! Input validation functions
//!
//! Length bounds mirror the column bounds declared by the schema.

/// Maximum username length
pub const USERNAME_MAX_LEN: usize = 32;
/// Maximum password length, in characters
pub const PASSWORD_MAX_LEN: usize = 128;
/// Maximum length of category and item names
pub const NAME_MAX_LEN: usize = 250;
/// Maximum length of an item description
pub const DESCRIPTION_MAX_LEN: usize = 250;

/// Validate a username
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.trim().is_empty() {
        return Err("Username cannot be empty".to_string());
    }
    if username.chars().count() > USERNAME_MAX_LEN {
        return Err(format!(
            "Username must be at most {} characters",
            USERNAME_MAX_LEN
        ));
    }
    if username.chars().any(char::is_whitespace) {
        return Err("Username cannot contain whitespace".to_string());
    }
    Ok(())
}

/// Validate a password before hashing
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password cannot be empty".to_string());
    }
    if password.chars().count() > PASSWORD_MAX_LEN {
        return Err(format!(
            "Password must be at most {} characters",
            PASSWORD_MAX_LEN
        ));
    }
    Ok(())
}

/// Validate a category or item name
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Name is required".to_string());
    }
    if name.chars().count() > NAME_MAX_LEN {
        return Err(format!("Name must be at most {} characters", NAME_MAX_LEN));
    }
    Ok(())
}

/// Validate an item description
pub fn validate_description(description: &str) -> Result<(), String> {
    if description.trim().is_empty() {
        return Err("Description is required".to_string());
    }
    if description.chars().count() > DESCRIPTION_MAX_LEN {
        return Err(format!(
            "Description must be at most {} characters",
            DESCRIPTION_MAX_LEN
        ));
    }
    Ok(())
}
