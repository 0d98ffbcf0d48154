//! Validation utilities for the Fazenda platform
//!
//! Includes Brazil-specific validations for registration data.

// ============================================================================
// General Validations
// ============================================================================

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    Ok(())
}

/// Validate a display name (user, farm, animal)
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Name cannot be empty");
    }
    if name.len() > 120 {
        return Err("Name is too long");
    }
    Ok(())
}

/// Validate GPS coordinates are on the globe
pub fn validate_coordinates(lat: f64, lng: f64) -> Result<(), &'static str> {
    if !lat.is_finite() || !lng.is_finite() {
        return Err("Coordinates must be finite numbers");
    }
    if !(-90.0..=90.0).contains(&lat) {
        return Err("Latitude must be between -90 and 90 degrees");
    }
    if !(-180.0..=180.0).contains(&lng) {
        return Err("Longitude must be between -180 and 180 degrees");
    }
    Ok(())
}

// ============================================================================
// Brazil-Specific Validations
// ============================================================================

/// Validate Brazilian phone number format
/// Accepts: 6199887766, (61) 99988-7766, +5561999887766
pub fn validate_brazilian_phone(phone: &str) -> Result<(), &'static str> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    // Landline: area code + 8 digits
    if digits.len() == 10 {
        return Ok(());
    }
    // Mobile: area code + 9 digits, mobile numbers start with 9
    if digits.len() == 11 && digits.as_bytes()[2] == b'9' {
        return Ok(());
    }
    // International format with country code 55
    if (digits.len() == 12 || digits.len() == 13) && digits.starts_with("55") {
        return Ok(());
    }

    Err("Invalid Brazilian phone number format")
}

/// Validate CPF (Cadastro de Pessoas Físicas)
/// 11-digit number with two mod-11 check digits
pub fn validate_cpf(cpf: &str) -> Result<(), &'static str> {
    let digits: Vec<u32> = cpf.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() != 11 {
        return Err("CPF must be 11 digits");
    }

    // Sequences of one repeated digit pass the checksum but are invalid
    if digits.iter().all(|&d| d == digits[0]) {
        return Err("Invalid CPF");
    }

    let check = |len: usize| -> u32 {
        let sum: u32 = digits
            .iter()
            .take(len)
            .enumerate()
            .map(|(i, &d)| d * (len as u32 + 1 - i as u32))
            .sum();
        let rem = (sum * 10) % 11;
        if rem == 10 {
            0
        } else {
            rem
        }
    };

    if check(9) != digits[9] || check(10) != digits[10] {
        return Err("Invalid CPF checksum");
    }

    Ok(())
}
