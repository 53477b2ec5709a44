//! Types for requests from the frontend to the backend.

use crate::response::Role;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Login<'a> {
    pub email: Cow<'a, str>,
    pub password: Cow<'a, str>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Register<'a> {
    pub email: Cow<'a, str>,
    pub password: Cow<'a, str>,
    pub role: Role,
    pub profile: RegisterProfile<'a>,
}

/// Role-specific profile data sent on registration.
/// The name fields are always present; the rest depend on the selected role.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterProfile<'a> {
    pub first_name: Cow<'a, str>,
    pub last_name: Cow<'a, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<Cow<'a, str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<Cow<'a, str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_license_number: Option<Cow<'a, str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialties: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hospital_affiliations: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub managed_hospital_id: Option<Cow<'a, str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub managed_pharmacy_id: Option<Cow<'a, str>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookAppointment<'a> {
    pub doctor_id: Cow<'a, str>,
    pub hospital_id: Cow<'a, str>,
    pub date: Cow<'a, str>,
    pub start_time: Cow<'a, str>,
    pub end_time: Cow<'a, str>,
    pub reason_for_visit: Cow<'a, str>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateAppointmentStatus<'a> {
    pub status: Cow<'a, str>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppointmentNotes<'a> {
    pub notes: Cow<'a, str>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview<'a> {
    pub doctor_id: Cow<'a, str>,
    pub appointment_id: Cow<'a, str>,
    pub rating: i32,
    pub comment: Cow<'a, str>,
    pub is_anonymous: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReview<'a> {
    pub rating: i32,
    pub comment: Cow<'a, str>,
    pub is_anonymous: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMedicalRecord<'a> {
    pub title: Cow<'a, str>,
    #[serde(rename = "type")]
    pub record_type: Cow<'a, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Cow<'a, str>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPrescription<'a> {
    pub patient_id: Cow<'a, str>,
    pub appointment_id: Cow<'a, str>,
    pub medications: Vec<Medication>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<Cow<'a, str>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Medication {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
