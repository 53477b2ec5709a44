//! Role-specific dashboard panels.
//!
//! One component per role; the dashboard page dispatches over the closed
//! [`Role`] enum so adding a role is a compile error until a panel exists.

use crate::paths;
use healthlink_api::response::User;
use leptos::prelude::*;
use leptos_router::components::*;

#[component]
pub fn PatientDashboard(user: User) -> impl IntoView {
    view! {
        <h2 class="subtitle">{format!("Welcome, {}", user.profile.full_name())}</h2>
        <div class="columns is-flex-wrap-wrap">
            <DashboardCard title="My Appointments" href=paths::MY_APPOINTMENTS link_text="Go to appointments"/>
            <DashboardCard title="Medical Records" href=paths::MEDICAL_RECORDS link_text="View records"/>
            <DashboardCard title="Prescriptions" href=paths::PRESCRIPTIONS link_text="View prescriptions"/>
            <DashboardCard title="My Reviews" href=paths::MY_REVIEWS link_text="Manage reviews"/>
            <DashboardCard title="Notifications" href=paths::NOTIFICATIONS link_text="View notifications"/>
            <DashboardCard title="Find Care" href=paths::DOCTORS link_text="Find doctors"/>
        </div>
    }
}

#[component]
pub fn DoctorDashboard(user: User) -> impl IntoView {
    let reviews_href = format!("/reviews/doctor/{}", user.id);
    view! {
        <h2 class="subtitle">{format!("Welcome, Dr. {}", user.profile.last_name)}</h2>
        <div class="columns is-flex-wrap-wrap">
            <DashboardCard title="Appointments" href=paths::MY_APPOINTMENTS link_text="Go to appointments"/>
            <DashboardCard title="Prescriptions" href=paths::PRESCRIPTIONS link_text="Manage prescriptions"/>
            <DashboardCard title="Medical Records" href=paths::MEDICAL_RECORDS link_text="Manage records"/>
            <div class="column">
                <div class="box">
                    <h3 class="has-text-weight-bold">"My Reviews"</h3>
                    <A href=reviews_href>"View my reviews"</A>
                </div>
            </div>
            <DashboardCard title="Notifications" href=paths::NOTIFICATIONS link_text="View notifications"/>
        </div>
    }
}

#[component]
pub fn AdminDashboard() -> impl IntoView {
    view! {
        <h2 class="subtitle">"Admin Panel"</h2>
        <div class="columns is-flex-wrap-wrap">
            <DashboardCard title="Hospitals" href=paths::HOSPITALS link_text="Go to hospital management"/>
            <DashboardCard title="Specialties" href=paths::SPECIALTIES link_text="Go to specialty management"/>
            <DashboardCard title="Pharmacies" href=paths::PHARMACIES link_text="Go to pharmacy management"/>
            <DashboardCard title="Appointments" href=paths::MY_APPOINTMENTS link_text="View all appointments"/>
        </div>
    }
}

#[component]
pub fn HospitalAdminDashboard(user: User) -> impl IntoView {
    let hospital = user
        .profile
        .managed_hospital_id
        .as_ref()
        .map(|id| format!("/hospitals/{id}"));
    view! {
        <h2 class="subtitle">"Hospital Admin Panel"</h2>
        <div class="columns is-flex-wrap-wrap">
            <div class="column">
                <div class="box">
                    <h3 class="has-text-weight-bold">"My Hospital"</h3>
                    {match hospital {
                        Some(href) => view! { <A href>"View hospital"</A> }.into_any(),
                        None => view! { <span>"No hospital assigned"</span> }.into_any(),
                    }}
                </div>
            </div>
            <DashboardCard title="Doctors" href=paths::DOCTORS link_text="Manage doctors"/>
            <DashboardCard title="Appointments" href=paths::MY_APPOINTMENTS link_text="View appointments"/>
        </div>
    }
}

#[component]
pub fn PharmacyAdminDashboard(user: User) -> impl IntoView {
    let pharmacy = user
        .profile
        .managed_pharmacy_id
        .as_ref()
        .map(|id| format!("/pharmacies/{id}"));
    view! {
        <h2 class="subtitle">"Pharmacy Admin Panel"</h2>
        <div class="columns is-flex-wrap-wrap">
            <div class="column">
                <div class="box">
                    <h3 class="has-text-weight-bold">"My Pharmacy"</h3>
                    {match pharmacy {
                        Some(href) => view! { <A href>"View pharmacy"</A> }.into_any(),
                        None => view! { <span>"No pharmacy assigned"</span> }.into_any(),
                    }}
                </div>
            </div>
            <DashboardCard title="Prescriptions" href=paths::PRESCRIPTIONS link_text="View orders"/>
        </div>
    }
}

#[component]
fn DashboardCard(
    title: &'static str,
    href: &'static str,
    link_text: &'static str,
) -> impl IntoView {
    view! {
        <div class="column">
            <div class="box">
                <h3 class="has-text-weight-bold">{title}</h3>
                <A href>{link_text}</A>
            </div>
        </div>
    }
}
