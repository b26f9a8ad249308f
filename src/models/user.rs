use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

use crate::id::generate_id;

/// Roles selectable in the profile form.
pub const ROLES: [&str; 5] = ["Member", "Team Lead", "Manager", "Director", "Admin"];

/// Timezones selectable in the profile form.
pub const TIMEZONES: [&str; 25] = [
    "UTC", "GMT-12", "GMT-11", "GMT-10", "GMT-9", "GMT-8", "GMT-7", "GMT-6", "GMT-5", "GMT-4",
    "GMT-3", "GMT-2", "GMT-1", "GMT+1", "GMT+2", "GMT+3", "GMT+4", "GMT+5", "GMT+6", "GMT+7",
    "GMT+8", "GMT+9", "GMT+10", "GMT+11", "GMT+12",
];

/// The locally fabricated identity of the signed-in person.
///
/// Stored under the `mockUser` key with camelCase field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl User {
    fn bare(email: String, full_name: String) -> Self {
        Self {
            id: generate_id(),
            email,
            full_name,
            avatar: None,
            bio: None,
            location: None,
            role: None,
            phone: None,
            timezone: None,
            department: None,
            join_date: None,
            title: None,
            company: None,
            website: None,
        }
    }

    /// Builds the user a sign-in fabricates: the display name is the local part of the
    /// email, with default role and timezone.
    pub fn from_sign_in(input: &SignInInput) -> Self {
        let local_part = input.email.split('@').next().unwrap_or_default();
        Self {
            role: Some(ROLES[0].to_string()),
            timezone: Some(TIMEZONES[0].to_string()),
            join_date: Some(Utc::now()),
            ..Self::bare(input.email.clone(), local_part.to_string())
        }
    }

    pub fn from_sign_up(input: &SignUpInput) -> Self {
        Self::bare(input.email.clone(), input.full_name.trim().to_string())
    }

    /// Returns a copy carrying the editable fields of `input`. Identity fields
    /// (`id`, `email`, `joinDate`) are kept.
    pub fn with_profile(&self, input: ProfileInput) -> Self {
        Self {
            id: self.id.clone(),
            email: self.email.clone(),
            join_date: self.join_date,
            full_name: input.full_name.trim().to_string(),
            avatar: non_blank(input.avatar),
            bio: non_blank(input.bio),
            location: non_blank(input.location),
            role: non_blank(input.role),
            phone: non_blank(input.phone),
            timezone: non_blank(input.timezone),
            department: non_blank(input.department),
            title: non_blank(input.title),
            company: non_blank(input.company),
            website: non_blank(input.website),
        }
    }

    /// Profile details the dashboard nudges the user to fill in.
    pub fn missing_profile_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.full_name.trim().is_empty() {
            missing.push("full name");
        }
        if self.avatar.is_none() {
            missing.push("profile picture");
        }
        missing
    }
}

/// Trims an optional form value, mapping blank input to `None`.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some(Cow::from("must not be empty"));
        return Err(error);
    }
    Ok(())
}

fn known_role(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || ROLES.contains(&value.trim()) {
        Ok(())
    } else {
        Err(ValidationError::new("unknown_role"))
    }
}

fn blank_or_url(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || validator::validate_url(value.trim()) {
        Ok(())
    } else {
        Err(ValidationError::new("url"))
    }
}

fn known_timezone(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || TIMEZONES.contains(&value.trim()) {
        Ok(())
    } else {
        Err(ValidationError::new("unknown_timezone"))
    }
}

/// Payload of the sign-in form. The password is only checked for shape; nothing
/// verifies it.
#[derive(Debug, Deserialize, Validate)]
pub struct SignInInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

/// Payload of the sign-up form.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignUpInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
    #[validate(custom = "not_blank")]
    pub full_name: String,
}

/// Payload of the profile form. Every field is submitted; blank optional fields clear
/// the stored value.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInput {
    #[validate(custom = "not_blank")]
    pub full_name: String,
    pub avatar: Option<String>,
    #[validate(length(max = 1000))]
    pub bio: Option<String>,
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    #[validate(custom = "blank_or_url")]
    pub website: Option<String>,
    #[validate(custom = "known_timezone")]
    pub timezone: Option<String>,
    pub department: Option<String>,
    #[validate(custom = "known_role")]
    pub role: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sign_in(email: &str) -> SignInInput {
        SignInInput {
            email: email.to_string(),
            password: "password123".to_string(),
        }
    }

    #[test]
    fn test_sign_in_fabricates_defaults() {
        let user = User::from_sign_in(&sign_in("ada@example.com"));
        assert_eq!(user.full_name, "ada");
        assert_eq!(user.role.as_deref(), Some("Member"));
        assert_eq!(user.timezone.as_deref(), Some("UTC"));
        assert!(user.join_date.is_some());
        assert_eq!(user.id.len(), crate::id::ID_LEN);
    }

    #[test]
    fn test_sign_up_input_validation() {
        let valid = SignUpInput {
            email: "ada@example.com".to_string(),
            password: "password123".to_string(),
            full_name: "Ada Lovelace".to_string(),
        };
        assert!(valid.validate().is_ok());

        let blank_name = SignUpInput {
            full_name: "   ".to_string(),
            ..valid
        };
        assert!(blank_name.validate().is_err());

        let short_password = SignInInput {
            email: "ada@example.com".to_string(),
            password: "short".to_string(),
        };
        assert!(short_password.validate().is_err());
        assert!(sign_in("not-an-email").validate().is_err());
    }

    #[test]
    fn test_serialized_field_names() {
        let user = User::from_sign_up(&SignUpInput {
            email: "ada@example.com".to_string(),
            password: "password123".to_string(),
            full_name: " Ada ".to_string(),
        });
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["fullName"], "Ada");
        assert!(json.get("avatar").is_none());
        assert!(json.get("joinDate").is_none());
    }

    #[test]
    fn test_profile_update_keeps_identity() {
        let user = User::from_sign_in(&sign_in("ada@example.com"));
        let updated = user.with_profile(ProfileInput {
            full_name: "Ada King".to_string(),
            avatar: Some("data:image/png;base64,AAAA".to_string()),
            company: Some("  ".to_string()),
            role: Some("Manager".to_string()),
            ..ProfileInput::default()
        });

        assert_eq!(updated.id, user.id);
        assert_eq!(updated.email, user.email);
        assert_eq!(updated.join_date, user.join_date);
        assert_eq!(updated.full_name, "Ada King");
        assert_eq!(updated.company, None);
        assert_eq!(updated.timezone, None);
        assert!(updated.missing_profile_fields().is_empty());
        assert_eq!(user.missing_profile_fields(), vec!["profile picture"]);
    }

    #[test]
    fn test_profile_input_validation() {
        let valid = ProfileInput {
            full_name: "Ada".to_string(),
            timezone: Some("GMT+2".to_string()),
            role: Some("Admin".to_string()),
            website: Some("https://ada.dev".to_string()),
            ..ProfileInput::default()
        };
        assert!(valid.validate().is_ok());

        let bad_role = ProfileInput {
            full_name: "Ada".to_string(),
            role: Some("Emperor".to_string()),
            ..ProfileInput::default()
        };
        assert!(bad_role.validate().is_err());

        let bad_website = ProfileInput {
            full_name: "Ada".to_string(),
            website: Some("not a url".to_string()),
            ..ProfileInput::default()
        };
        assert!(bad_website.validate().is_err());

        assert!(ProfileInput::default().validate().is_err());
    }
}
