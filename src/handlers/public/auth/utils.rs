use crate::services::{Registration, ServiceError};

use super::register::RegisterRequest;

/// Default password minimum length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Longest accepted full name
pub const MAX_FULL_NAME_LENGTH: usize = 100;

/// Turn a raw register body into a validated `Registration`
pub fn validate_registration(req: RegisterRequest) -> Result<Registration, ServiceError> {
    let full_name = required(req.full_name, "full_name")?;
    let email = required(req.email, "email")?;
    let username = required(req.username, "username")?;
    let password = req
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ServiceError::invalid_input("password is required"))?;
    let age = req
        .age
        .ok_or_else(|| ServiceError::invalid_input("age is required"))?;

    validate_full_name(&full_name).map_err(ServiceError::InvalidInput)?;
    validate_email_format(&email).map_err(ServiceError::InvalidInput)?;
    validate_username_format(&username).map_err(ServiceError::InvalidInput)?;
    validate_password_strength(&password).map_err(ServiceError::InvalidInput)?;
    if age <= 0 {
        return Err(ServiceError::invalid_input("age must be greater than 0"));
    }

    Ok(Registration {
        full_name,
        email,
        username,
        password,
        age,
    })
}

fn required(value: Option<String>, field: &str) -> Result<String, ServiceError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ServiceError::invalid_input(format!("{} is required", field)))
}

pub fn validate_full_name(full_name: &str) -> Result<(), String> {
    if full_name.chars().count() > MAX_FULL_NAME_LENGTH {
        return Err(format!(
            "Full name must be at most {} characters",
            MAX_FULL_NAME_LENGTH
        ));
    }
    if full_name.chars().any(|c| c.is_control()) {
        return Err("Full name contains invalid characters".to_string());
    }
    Ok(())
}

/// Validate username format and requirements
pub fn validate_username_format(username: &str) -> Result<(), String> {
    if username.len() < 3 {
        return Err("Username must be at least 3 characters".to_string());
    }

    if username.len() > 50 {
        return Err("Username must be less than 50 characters".to_string());
    }

    // Allow alphanumeric, underscore, hyphen
    if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
        return Err("Username can only contain letters, numbers, underscore, and hyphen".to_string());
    }

    // Must start with alphanumeric
    if !username.starts_with(|c: char| c.is_ascii_alphanumeric()) {
        return Err("Username must start with a letter or number".to_string());
    }

    Ok(())
}

/// Validate email format: `local@domain.tld`, no whitespace
pub fn validate_email_format(email: &str) -> Result<(), String> {
    if email.chars().any(char::is_whitespace) {
        return Err("Invalid email format".to_string());
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| "Invalid email format".to_string())?;

    if local.is_empty() || domain.contains('@') {
        return Err("Invalid email format".to_string());
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// At least MIN_PASSWORD_LENGTH characters with one letter and one digit
pub fn validate_password_strength(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        ));
    }
    if !password.chars().any(|c| c.is_alphabetic()) || !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("Password must contain at least one letter and one digit".to_string());
    }
    Ok(())
}
