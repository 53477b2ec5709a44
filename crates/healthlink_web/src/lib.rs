pub mod components;
pub mod context;
pub mod error;
pub mod pages;
pub mod storage;
pub mod utils;

use components::*;
use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{components::*, ParamSegment, StaticSegment};
use pages::*;

/// Route targets shared by the router, the navbar and the route guard.
pub mod paths {
    pub const LOGIN: &str = "/login";
    pub const REGISTER: &str = "/register";
    pub const UNAUTHORIZED: &str = "/unauthorized";
    pub const DASHBOARD: &str = "/dashboard";
    pub const HOSPITALS: &str = "/hospitals";
    pub const SPECIALTIES: &str = "/specialties";
    pub const DOCTORS: &str = "/doctors";
    pub const PHARMACIES: &str = "/pharmacies";
    pub const MY_APPOINTMENTS: &str = "/my-appointments";
    pub const NOTIFICATIONS: &str = "/notifications";
    pub const MEDICAL_RECORDS: &str = "/medicalrecords";
    pub const PRESCRIPTIONS: &str = "/prescriptions";
    pub const MY_REVIEWS: &str = "/my-reviews";
}

/// Wraps the content in a basic layout and a final fallback error boundary
/// which should never actually trigger
#[component]
pub fn App() -> impl IntoView {
    tracing::info!("Rendering app");

    let fallback = move |errors: ArcRwSignal<Errors>| {
        errors
            .get_untracked()
            .into_iter()
            .map(|(_key, err)| {
                view! { <div>{format!("Unhandled error: {err}")}</div>}
            })
            .collect_view()
    };

    view! {
        <Stylesheet id="healthlink" href="/pkg/healthlink.css"/>
        <Link rel="shortcut icon" type_="image/ico" href="/favicon.ico"/>
        <Meta name="description" content="HealthLink Connect: find care and book appointments"/>
        <Title text="HealthLink Connect"/>
        <div class="is-flex is-flex-direction-column" style="min-height: 100vh">
            <div class="section is-flex is-flex-grow-1">
                <div class="container">
                    <ErrorBoundary fallback>
                        <Content/>
                    </ErrorBoundary>
                </div>
            </div>
            <footer class="footer">
                <div class="container">
                    "HealthLink Connect"
                </div>
            </footer>
        </div>
    }
}

/// Contains the navbar and router
#[component]
pub fn Content() -> impl IntoView {
    view! {
        <Router>
            <Navbar/>
            <main>
                <h1 class="title">"HealthLink Connect"</h1>
                <FlatRoutes fallback=|| "Page not found.">
                    <Route
                        path=StaticSegment("/")
                        view=Home
                    />
                    <Route
                        path=StaticSegment("login")
                        view=Login
                    />
                    <Route
                        path=StaticSegment("register")
                        view=Register
                    />
                    <Route
                        path=StaticSegment("unauthorized")
                        view=Unauthorized
                    />
                    <Route
                        path=StaticSegment("hospitals")
                        view=Hospitals
                    />
                    <Route
                        path=(StaticSegment("hospitals"), ParamSegment("hospital_id"))
                        view=HospitalDetail
                    />
                    <Route
                        path=StaticSegment("specialties")
                        view=Specialties
                    />
                    <Route
                        path=StaticSegment("doctors")
                        view=Doctors
                    />
                    <Route
                        path=(StaticSegment("doctors"), ParamSegment("doctor_id"))
                        view=DoctorDetail
                    />
                    <Route
                        path=(StaticSegment("reviews"), StaticSegment("doctor"), ParamSegment("doctor_id"))
                        view=DoctorReviews
                    />
                    <Route
                        path=StaticSegment("pharmacies")
                        view=Pharmacies
                    />
                    <Route
                        path=(StaticSegment("pharmacies"), ParamSegment("pharmacy_id"))
                        view=PharmacyDetail
                    />
                    <Route
                        path=StaticSegment("dashboard")
                        view=Dashboard
                    />
                    <Route
                        path=StaticSegment("my-appointments")
                        view=MyAppointments
                    />
                    <Route
                        path=StaticSegment("notifications")
                        view=Notifications
                    />
                    <Route
                        path=StaticSegment("medicalrecords")
                        view=MedicalRecords
                    />
                    <Route
                        path=(StaticSegment("medicalrecords"), ParamSegment("record_id"), StaticSegment("edit"))
                        view=MedicalRecordEdit
                    />
                    <Route
                        path=StaticSegment("prescriptions")
                        view=Prescriptions
                    />
                    <Route
                        path=(StaticSegment("prescriptions"), ParamSegment("prescription_id"))
                        view=PrescriptionDetail
                    />
                    <Route
                        path=StaticSegment("my-reviews")
                        view=MyReviews
                    />
                </FlatRoutes>
            </main>
        </Router>
    }
}
