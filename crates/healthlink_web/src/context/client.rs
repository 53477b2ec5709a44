//! Client context for communicating with the backend.
//!
//! The single choke point for all backend calls: every request gets the
//! bearer token attached from durable storage, every response is checked
//! for session expiry. Individual pages never touch tokens.

use super::session::Session;
use crate::storage::BrowserStorage;
use healthlink_api::{request as req, response as res};
use healthlink_core::{session as core_session, ApiError, AuthApi, SessionStore};
use reqwasm::http::{Request, Response};
use serde::{de::DeserializeOwned, Serialize};

#[derive(Clone, Copy)]
pub(super) struct ClientBuilder {
    backend_addr: &'static str,
}

impl ClientBuilder {
    pub(super) fn new(backend_addr: &'static str) -> Self {
        Self { backend_addr }
    }

    pub(super) fn build(self, session: Session) -> Client {
        Client {
            backend_addr: self.backend_addr,
            session,
        }
    }
}

#[derive(Clone, Copy)]
pub struct Client {
    backend_addr: &'static str,
    session: Session,
}

/// Non-API methods
impl Client {
    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.backend_addr)
    }

    /// Request interception: attaches the bearer token when one is stored.
    /// Nothing else about the request is touched.
    fn with_auth(request: Request) -> Request {
        match BrowserStorage.get(healthlink_api::TOKEN_STORAGE_KEY) {
            Some(token) => request.header("Authorization", &format!("Bearer {token}")),
            None => request,
        }
    }

    async fn send(&self, request: Request) -> Result<Response, ApiError> {
        let response = Self::with_auth(request)
            .send()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;
        self.check_status(response).await
    }

    /// Response interception: successes pass through; a 401 clears durable
    /// storage and signals the session context, then surfaces the error to
    /// the caller. No retries, so no retry loop to break.
    async fn check_status(&self, response: Response) -> Result<Response, ApiError> {
        match response.status() {
            100..=399 => Ok(response),
            401 => {
                tracing::warn!("Server returned 401, session expired or invalid");
                core_session::invalidate(&BrowserStorage);
                self.session.reconcile();
                Err(ApiError::Unauthorized)
            }
            status => {
                let bytes = response.binary().await.unwrap_or_default();
                let message = match serde_json::from_slice::<res::Error>(&bytes) {
                    Ok(error) => error.into_message(),
                    Err(_) => String::from_utf8_lossy(&bytes).into_owned(),
                };
                Err(ApiError::Api { status, message })
            }
        }
    }

    async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(Request::get(&self.url(path))).await?;
        response
            .json()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))
    }

    fn json_body<B: Serialize>(body: &B) -> Result<String, ApiError> {
        serde_json::to_string(body).map_err(|err| ApiError::Network(err.to_string()))
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = Request::post(&self.url(path))
            .header("Content-Type", "application/json")
            .body(Self::json_body(body)?);
        let response = self.send(request).await?;
        response
            .json()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))
    }

    async fn put_json<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let request = Request::put(&self.url(path))
            .header("Content-Type", "application/json")
            .body(Self::json_body(body)?);
        self.send(request).await?;
        Ok(())
    }

    async fn put_empty(&self, path: &str) -> Result<(), ApiError> {
        self.send(Request::put(&self.url(path))).await?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(Request::delete(&self.url(path))).await?;
        Ok(())
    }

    fn query(pairs: &[(&str, Option<&str>)]) -> String {
        let query = pairs
            .iter()
            .copied()
            .filter_map(|(key, value)| {
                value.filter(|v| !v.is_empty()).map(|v| {
                    format!("{}={}", urlencoding::encode(key), urlencoding::encode(v))
                })
            })
            .collect::<Vec<_>>()
            .join("&");
        if query.is_empty() {
            query
        } else {
            format!("?{query}")
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn builds_query_string_from_set_parameters() {
        let query = Client::query(&[
            ("name", Some("smith")),
            ("specialty", None),
            ("city", Some("tampere")),
        ]);
        assert_eq!(query, "?name=smith&city=tampere");
    }

    #[test]
    fn skips_empty_values() {
        assert_eq!(Client::query(&[("city", Some(""))]), "");
        assert_eq!(Client::query(&[("city", None)]), "");
    }

    #[test]
    fn encodes_reserved_characters_in_values() {
        let query = Client::query(&[("specialty", Some("Obstetrics & Gynecology"))]);
        assert_eq!(query, "?specialty=Obstetrics%20%26%20Gynecology");

        let query = Client::query(&[("name", Some("a=b#c+d"))]);
        assert_eq!(query, "?name=a%3Db%23c%2Bd");
    }
}

/// Auth endpoints, behind the seam the session core depends on.
impl AuthApi for Client {
    async fn login(&self, login: &req::Login<'_>) -> Result<res::AuthResponse, ApiError> {
        tracing::info!("Logging in as {}", login.email);
        self.post_json("/auth/login", login).await
    }

    async fn register(&self, register: &req::Register<'_>) -> Result<res::AuthResponse, ApiError> {
        tracing::info!("Registering {} as {}", register.email, register.role);
        self.post_json("/auth/register", register).await
    }

    async fn me(&self) -> Result<res::User, ApiError> {
        tracing::info!("Fetching current user");
        self.fetch_json("/auth/me").await
    }
}

/// API methods
impl Client {
    pub async fn get_hospitals(&self) -> Result<Vec<res::Hospital>, ApiError> {
        tracing::info!("Fetching hospitals");
        self.fetch_json("/hospitals").await
    }

    pub async fn get_hospital(&self, id: &str) -> Result<res::Hospital, ApiError> {
        tracing::info!("Fetching hospital {id}");
        self.fetch_json(&format!("/hospitals/{id}")).await
    }

    pub async fn get_specialties(&self) -> Result<Vec<res::Specialty>, ApiError> {
        tracing::info!("Fetching specialties");
        self.fetch_json("/specialties").await
    }

    pub async fn get_doctors(
        &self,
        name: Option<&str>,
        specialty: Option<&str>,
        city: Option<&str>,
    ) -> Result<Vec<res::User>, ApiError> {
        tracing::info!("Fetching doctors");
        let query = Self::query(&[("name", name), ("specialty", specialty), ("city", city)]);
        self.fetch_json(&format!("/doctors{query}")).await
    }

    pub async fn get_doctor(&self, id: &str) -> Result<res::User, ApiError> {
        tracing::info!("Fetching doctor {id}");
        self.fetch_json(&format!("/doctors/{id}")).await
    }

    pub async fn get_doctor_availability(
        &self,
        doctor_id: &str,
        hospital_id: &str,
        date: &str,
    ) -> Result<Option<res::Availability>, ApiError> {
        tracing::info!("Fetching availability for doctor {doctor_id} on {date}");
        self.fetch_json(&format!(
            "/doctors/{doctor_id}/availability/{hospital_id}/{date}"
        ))
        .await
    }

    pub async fn get_appointments(&self) -> Result<Vec<res::Appointment>, ApiError> {
        tracing::info!("Fetching appointments");
        self.fetch_json("/appointments").await
    }

    pub async fn book_appointment(
        &self,
        appointment: &req::BookAppointment<'_>,
    ) -> Result<res::Appointment, ApiError> {
        tracing::info!("Booking appointment with doctor {}", appointment.doctor_id);
        self.post_json("/appointments", appointment).await
    }

    pub async fn update_appointment_status(
        &self,
        id: &str,
        status: res::AppointmentStatus,
    ) -> Result<(), ApiError> {
        tracing::info!("Updating appointment {id} status to {status}");
        let update = req::UpdateAppointmentStatus {
            status: status.as_str().into(),
        };
        self.put_json(&format!("/appointments/{id}/status"), &update)
            .await
    }

    pub async fn add_appointment_notes(&self, id: &str, notes: &str) -> Result<(), ApiError> {
        tracing::info!("Adding notes to appointment {id}");
        let notes = req::AppointmentNotes {
            notes: notes.into(),
        };
        self.put_json(&format!("/appointments/{id}/notes"), &notes)
            .await
    }

    pub async fn get_medical_records(&self) -> Result<Vec<res::MedicalRecord>, ApiError> {
        tracing::info!("Fetching medical records");
        self.fetch_json("/medicalrecords").await
    }

    pub async fn get_medical_record(&self, id: &str) -> Result<res::MedicalRecord, ApiError> {
        tracing::info!("Fetching medical record {id}");
        self.fetch_json(&format!("/medicalrecords/{id}")).await
    }

    /// The record file and its metadata go up as multipart form data.
    pub async fn upload_medical_record(
        &self,
        form: web_sys::FormData,
    ) -> Result<res::MedicalRecord, ApiError> {
        tracing::info!("Uploading medical record");
        let request = Request::post(&self.url("/medicalrecords")).body(form);
        let response = self.send(request).await?;
        response
            .json()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))
    }

    pub async fn update_medical_record(
        &self,
        id: &str,
        update: &req::UpdateMedicalRecord<'_>,
    ) -> Result<(), ApiError> {
        tracing::info!("Updating medical record {id}");
        self.put_json(&format!("/medicalrecords/{id}"), update).await
    }

    pub async fn delete_medical_record(&self, id: &str) -> Result<(), ApiError> {
        tracing::info!("Deleting medical record {id}");
        self.delete(&format!("/medicalrecords/{id}")).await
    }

    pub async fn get_prescriptions(&self) -> Result<Vec<res::Prescription>, ApiError> {
        tracing::info!("Fetching prescriptions");
        self.fetch_json("/prescriptions").await
    }

    pub async fn get_prescription(&self, id: &str) -> Result<res::Prescription, ApiError> {
        tracing::info!("Fetching prescription {id}");
        self.fetch_json(&format!("/prescriptions/{id}")).await
    }

    pub async fn create_prescription(
        &self,
        prescription: &req::NewPrescription<'_>,
    ) -> Result<res::Prescription, ApiError> {
        tracing::info!(
            "Creating prescription for patient {}",
            prescription.patient_id
        );
        self.post_json("/prescriptions", prescription).await
    }

    pub async fn get_doctor_reviews(&self, doctor_id: &str) -> Result<Vec<res::Review>, ApiError> {
        tracing::info!("Fetching reviews for doctor {doctor_id}");
        self.fetch_json(&format!("/reviews/doctor/{doctor_id}")).await
    }

    pub async fn get_patient_reviews(
        &self,
        patient_id: &str,
    ) -> Result<Vec<res::Review>, ApiError> {
        tracing::info!("Fetching reviews by patient {patient_id}");
        self.fetch_json(&format!("/reviews/patient/{patient_id}"))
            .await
    }

    pub async fn create_review(&self, review: &req::NewReview<'_>) -> Result<res::Review, ApiError> {
        tracing::info!("Creating review for doctor {}", review.doctor_id);
        self.post_json("/reviews", review).await
    }

    pub async fn update_review(
        &self,
        id: &str,
        review: &req::UpdateReview<'_>,
    ) -> Result<(), ApiError> {
        tracing::info!("Updating review {id}");
        self.put_json(&format!("/reviews/{id}"), review).await
    }

    pub async fn delete_review(&self, id: &str) -> Result<(), ApiError> {
        tracing::info!("Deleting review {id}");
        self.delete(&format!("/reviews/{id}")).await
    }

    pub async fn get_notifications(&self) -> Result<Vec<res::Notification>, ApiError> {
        tracing::info!("Fetching notifications");
        self.fetch_json("/notifications").await
    }

    pub async fn mark_notification_read(&self, id: &str) -> Result<(), ApiError> {
        tracing::info!("Marking notification {id} as read");
        self.put_empty(&format!("/notifications/{id}/read")).await
    }

    pub async fn mark_all_notifications_read(&self) -> Result<(), ApiError> {
        tracing::info!("Marking all notifications as read");
        self.put_empty("/notifications/mark-all-read").await
    }

    pub async fn delete_notification(&self, id: &str) -> Result<(), ApiError> {
        tracing::info!("Deleting notification {id}");
        self.delete(&format!("/notifications/{id}")).await
    }

    pub async fn get_pharmacies(&self, city: Option<&str>) -> Result<Vec<res::Pharmacy>, ApiError> {
        tracing::info!("Fetching pharmacies");
        let query = Self::query(&[("city", city)]);
        self.fetch_json(&format!("/pharmacies{query}")).await
    }

    pub async fn get_pharmacy(&self, id: &str) -> Result<res::Pharmacy, ApiError> {
        tracing::info!("Fetching pharmacy {id}");
        self.fetch_json(&format!("/pharmacies/{id}")).await
    }
}
