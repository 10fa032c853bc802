use serde::Deserialize;

use crate::errors::AppError;
use crate::models::profile::{
    FinancialNeed, LocationPreference, NewStudentProfile, StudentProfilePatch,
};

/// Raw profile form as submitted by the UI. Every field is optional at the wire
/// level so that missing fields produce a descriptive validation error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub education_level: Option<String>,
    pub field_of_study: Option<String>,
    pub gpa: Option<String>,
    pub graduation_year: Option<String>,
    pub skills: Option<String>,
    pub activities: Option<String>,
    pub financial_need: Option<String>,
    pub location: Option<String>,
}

/// Validates a complete profile for creation.
pub fn validate_new_profile(
    form: &ProfileForm,
    allowed_domains: &[String],
) -> Result<NewStudentProfile, AppError> {
    let required = [
        ("name", &form.name),
        ("email", &form.email),
        ("educationLevel", &form.education_level),
        ("fieldOfStudy", &form.field_of_study),
        ("graduationYear", &form.graduation_year),
        ("financialNeed", &form.financial_need),
        ("location", &form.location),
    ];
    let missing: Vec<&str> = required
        .iter()
        .filter(|(_, value)| trimmed(value).is_none())
        .map(|(name, _)| *name)
        .collect();
    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let patch = validate_profile_patch(form, allowed_domains)?;

    // All required fields were checked above, so the patch carries every one of them.
    match patch {
        StudentProfilePatch {
            name: Some(name),
            email: Some(email),
            education_level: Some(education_level),
            field_of_study: Some(field_of_study),
            gpa,
            graduation_year: Some(graduation_year),
            skills,
            activities,
            financial_need: Some(financial_need),
            location: Some(location),
        } => Ok(NewStudentProfile {
            name,
            email,
            education_level,
            field_of_study,
            gpa,
            graduation_year,
            skills,
            activities,
            financial_need,
            location,
        }),
        _ => Err(AppError::Validation(
            "Please fill in all required fields".to_string(),
        )),
    }
}

/// Validates the fields present in a partial update. Blank optional fields are
/// treated as absent; blank required fields are rejected.
pub fn validate_profile_patch(
    form: &ProfileForm,
    allowed_domains: &[String],
) -> Result<StudentProfilePatch, AppError> {
    for (name, value) in [
        ("name", &form.name),
        ("email", &form.email),
        ("educationLevel", &form.education_level),
        ("fieldOfStudy", &form.field_of_study),
        ("graduationYear", &form.graduation_year),
        ("financialNeed", &form.financial_need),
        ("location", &form.location),
    ] {
        if value.is_some() && trimmed(value).is_none() {
            return Err(AppError::Validation(format!("{name} cannot be empty")));
        }
    }

    let email = trimmed(&form.email).map(str::to_string);
    if let Some(email) = &email {
        if !has_allowed_domain(email, allowed_domains) {
            return Err(AppError::Validation(email_domain_message(allowed_domains)));
        }
    }

    let gpa = trimmed(&form.gpa).map(str::to_string);
    if let Some(gpa) = &gpa {
        if !is_valid_gpa(gpa) {
            return Err(AppError::Validation("GPA must be a valid number".to_string()));
        }
    }

    let graduation_year = trimmed(&form.graduation_year).map(str::to_string);
    if let Some(year) = &graduation_year {
        if !is_valid_graduation_year(year) {
            return Err(AppError::Validation(
                "Graduation year must be a four-digit year".to_string(),
            ));
        }
    }

    let financial_need = trimmed(&form.financial_need)
        .map(|v| v.parse::<FinancialNeed>())
        .transpose()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let location = trimmed(&form.location)
        .map(|v| v.parse::<LocationPreference>())
        .transpose()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    Ok(StudentProfilePatch {
        name: trimmed(&form.name).map(str::to_string),
        email,
        education_level: trimmed(&form.education_level).map(str::to_string),
        field_of_study: trimmed(&form.field_of_study).map(str::to_string),
        gpa,
        graduation_year,
        skills: trimmed(&form.skills).map(str::to_string),
        activities: trimmed(&form.activities).map(str::to_string),
        financial_need,
        location,
    })
}

fn trimmed(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// `^[0-9]+(\.[0-9]{1,2})?$`
pub fn is_valid_gpa(gpa: &str) -> bool {
    let (whole, fraction) = match gpa.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (gpa, None),
    };
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if whole.is_empty() || !all_digits(whole) {
        return false;
    }
    match fraction {
        None => true,
        Some(f) => (1..=2).contains(&f.len()) && all_digits(f),
    }
}

pub fn is_valid_graduation_year(year: &str) -> bool {
    year.len() == 4 && year.chars().all(|c| c.is_ascii_digit())
}

/// Case-insensitive check that the address has a local part and ends in `@<domain>`
/// for one of the allowed domains.
pub fn has_allowed_domain(email: &str, allowed_domains: &[String]) -> bool {
    let email = email.to_lowercase();
    match email.rsplit_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            allowed_domains.iter().any(|allowed| allowed == domain)
        }
        _ => false,
    }
}

fn email_domain_message(allowed_domains: &[String]) -> String {
    let domains: Vec<String> = allowed_domains.iter().map(|d| format!("@{d}")).collect();
    match domains.as_slice() {
        [] => "Email domain is not allowed".to_string(),
        [only] => format!("Email must be from {only}"),
        [init @ .., last] => format!("Email must be from {}, or {last}", init.join(", ")),
    }
}
