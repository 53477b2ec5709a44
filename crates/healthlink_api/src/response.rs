//! Types for responses from the backend to the frontend.

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

/// Error payload returned by the backend.
///
/// Validation failures carry `errors`, an array of single-entry
/// field-to-message maps; other failures only set `message`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Error {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<BTreeMap<String, String>>>,
}

impl Error {
    /// Flattens the error payload into a single display-ready message.
    pub fn into_message(self) -> String {
        match self.errors {
            Some(errors) if !errors.is_empty() => errors
                .into_iter()
                .flat_map(BTreeMap::into_values)
                .collect::<Vec<_>>()
                .join(", "),
            _ => self.message,
        }
    }
}

/// The closed set of user roles known to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Patient,
    Doctor,
    Admin,
    HospitalAdmin,
    PharmacyAdmin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Patient => "patient",
            Role::Doctor => "doctor",
            Role::Admin => "admin",
            Role::HospitalAdmin => "hospital_admin",
            Role::PharmacyAdmin => "pharmacy_admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub role: Role,
    pub profile: Profile,
}

/// Role-dependent profile data. The name fields are always present;
/// the remaining fields are set only for the roles that use them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_license_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialties: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hospital_affiliations: Option<Vec<Hospital>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_reviews: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed_hospital_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed_pharmacy_id: Option<String>,
}

impl Profile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Login and registration respond with the token alongside the user fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    #[serde(flatten)]
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specialty {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pharmacy {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// One bookable slot within a day's published availability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub start_time: String,
    pub end_time: String,
    pub is_booked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    #[serde(rename = "_id")]
    pub id: String,
    pub date: String,
    pub time_slots: Vec<TimeSlot>,
    #[serde(default)]
    pub is_published: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Booked,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Booked => "booked",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::NoShow => "no_show",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Appointments come back with the doctor, patient and hospital populated
/// as full documents rather than bare ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, rename = "doctorId", skip_serializing_if = "Option::is_none")]
    pub doctor: Option<User>,
    #[serde(default, rename = "patientId", skip_serializing_if = "Option::is_none")]
    pub patient: Option<User>,
    #[serde(default, rename = "hospitalId", skip_serializing_if = "Option::is_none")]
    pub hospital: Option<Hospital>,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(rename = "type")]
    pub appointment_type: String,
    pub reason_for_visit: String,
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub upload_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(default, rename = "doctorId", skip_serializing_if = "Option::is_none")]
    pub doctor: Option<User>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, rename = "patientId", skip_serializing_if = "Option::is_none")]
    pub patient: Option<User>,
    #[serde(default, rename = "doctorId", skip_serializing_if = "Option::is_none")]
    pub doctor: Option<User>,
    pub medications: Vec<crate::request::Medication>,
    pub issue_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, rename = "doctorId", skip_serializing_if = "Option::is_none")]
    pub doctor: Option<User>,
    pub rating: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub is_anonymous: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub notification_type: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub is_read: bool,
    pub sent_at: String,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn flattens_validation_errors() {
        let error: Error = serde_json::from_str(
            r#"{"message":"Validation failed","errors":[{"email":"Email is invalid"},{"password":"Password too short"}]}"#,
        )
        .unwrap();
        assert_eq!(
            error.into_message(),
            "Email is invalid, Password too short"
        );
    }

    #[test]
    fn plain_error_keeps_message() {
        let error: Error = serde_json::from_str(r#"{"message":"Invalid credentials"}"#).unwrap();
        assert_eq!(error.into_message(), "Invalid credentials");
    }

    #[test]
    fn auth_response_splits_token_and_user() {
        let res: AuthResponse = serde_json::from_str(
            r#"{"token":"t1","_id":"u1","email":"a@b.com","role":"patient","profile":{"firstName":"A","lastName":"B"}}"#,
        )
        .unwrap();
        assert_eq!(res.token, "t1");
        assert_eq!(res.user.email, "a@b.com");
        assert_eq!(res.user.role, Role::Patient);
        assert_eq!(res.user.profile.full_name(), "A B");
    }

    #[test]
    fn roles_round_trip_as_snake_case() {
        for (role, s) in [
            (Role::Patient, "\"patient\""),
            (Role::Doctor, "\"doctor\""),
            (Role::Admin, "\"admin\""),
            (Role::HospitalAdmin, "\"hospital_admin\""),
            (Role::PharmacyAdmin, "\"pharmacy_admin\""),
        ] {
            assert_eq!(serde_json::to_string(&role).unwrap(), s);
            assert_eq!(serde_json::from_str::<Role>(s).unwrap(), role);
        }
    }
}
