//! Top level pages.

use crate::{
    components::{dashboards::*, *},
    context::{get_client, get_session},
    error::{WebError, WebResult},
    paths, utils,
};
use healthlink_api::{request as req, response as res};
use leptos::{
    html::{Input, Select, Textarea},
    prelude::*,
};
use leptos_router::{components::*, params::Params};
use send_wrapper::SendWrapper;

#[component]
pub fn Home() -> impl IntoView {
    tracing::info!("Rendering Home");

    let dashboard_link = move || {
        get_session().logged_in().then(|| {
            view! {
                <div class="block">
                    <A href=paths::DASHBOARD>"Go to your dashboard"</A>
                </div>
            }
        })
    };

    view! {
        <h2 class="subtitle">"Your health, connected"</h2>
        <p class="block">
            "Browse hospitals, find doctors by specialty and book appointments online."
        </p>
        {dashboard_link}
        <div class="columns">
            <div class="column">
                <A href=paths::HOSPITALS>"Browse hospitals"</A>
            </div>
            <div class="column">
                <A href=paths::DOCTORS>"Find a doctor"</A>
            </div>
            <div class="column">
                <A href=paths::PHARMACIES>"Find a pharmacy"</A>
            </div>
        </div>
    }
}

#[component]
pub fn Unauthorized() -> impl IntoView {
    tracing::info!("Rendering Unauthorized");

    view! {
        <h2 class="subtitle">"Unauthorized"</h2>
        <p class="block">"Your account does not have access to this page."</p>
        <A href="/">"Back to home"</A>
    }
}

#[component]
pub fn Login() -> impl IntoView {
    tracing::info!("Rendering Login");

    // form
    let email_ref = NodeRef::<Input>::new();
    let password_ref = NodeRef::<Input>::new();
    let submission_act = Action::new(move |&()| {
        tracing::info!("Logging in");
        let email = email_ref.get().expect("failed to get email_ref").value();
        let password = password_ref
            .get()
            .expect("failed to get password_ref")
            .value();
        let client = get_client();
        let session = get_session();
        SendWrapper::new(async move {
            if email.is_empty() {
                return Err(WebError::new("Email cannot be empty"));
            }
            if password.is_empty() {
                return Err(WebError::new("Password cannot be empty"));
            }
            let outcome = session.login(&client, &email, &password).await;
            if outcome.success {
                // navigation is decided here, not inside the session
                WebResult::Ok(view! { <Redirect path=paths::DASHBOARD /> })
            } else {
                Err(WebError::new(
                    outcome.message.unwrap_or_else(|| "Login failed".to_string()),
                ))
            }
        })
    });

    Effect::new(move |_| {
        if let Some(email_ref) = email_ref.get() {
            email_ref.focus().expect("failed to focus email_ref");
        }
    });

    view! {
        <h2 class="subtitle">"Login"</h2>
        <form>
            <label class="label">
                "Email"
                <input class="input" node_ref=email_ref/>
            </label>
            <label class="label">
                "Password"
                <input class="input" type="password" node_ref=password_ref/>
            </label>
            <button class="button" type="submit" on:click=move |ev| {
                ev.prevent_default();
                submission_act.dispatch(());
            }>
                "Login"
            </button>
        </form>
        <ActionView action=submission_act/>
    }
}

#[component]
pub fn Register() -> impl IntoView {
    tracing::info!("Rendering Register");

    // selections for the role-specific fields
    let specialties_res = utils::client_resource!(get_specialties());
    let hospitals_res = utils::client_resource!(get_hospitals());
    let pharmacies_res = utils::client_resource!(get_pharmacies(None));

    let role = RwSignal::new(res::Role::Patient);
    let specialties = RwSignal::new(Vec::<String>::new());
    let affiliations = RwSignal::new(Vec::<String>::new());

    // form
    let email_ref = NodeRef::<Input>::new();
    let password_ref = NodeRef::<Input>::new();
    let first_name_ref = NodeRef::<Input>::new();
    let last_name_ref = NodeRef::<Input>::new();
    let date_of_birth_ref = NodeRef::<Input>::new();
    let phone_number_ref = NodeRef::<Input>::new();
    let license_ref = NodeRef::<Input>::new();
    let managed_id_ref = NodeRef::<Select>::new();

    let submit = Action::new(move |&()| {
        tracing::info!("Registering");
        let email = email_ref.get().expect("failed to get email_ref").value();
        let password = password_ref
            .get()
            .expect("failed to get password_ref")
            .value();
        let first_name = first_name_ref
            .get()
            .expect("failed to get first_name_ref")
            .value();
        let last_name = last_name_ref
            .get()
            .expect("failed to get last_name_ref")
            .value();
        let role = role.get_untracked();
        let date_of_birth = date_of_birth_ref.get().map(|r| r.value());
        let phone_number = phone_number_ref.get().map(|r| r.value());
        let license = license_ref.get().map(|r| r.value());
        let managed_id = managed_id_ref.get().map(|r| r.value());
        let specialties = specialties.get_untracked();
        let affiliations = affiliations.get_untracked();
        let client = get_client();
        let session = get_session();
        SendWrapper::new(async move {
            if email.is_empty() {
                return Err(WebError::new("Email cannot be empty"));
            }
            if password.is_empty() {
                return Err(WebError::new("Password cannot be empty"));
            }
            if first_name.is_empty() || last_name.is_empty() {
                return Err(WebError::new("Name cannot be empty"));
            }
            let mut profile = req::RegisterProfile {
                first_name: first_name.into(),
                last_name: last_name.into(),
                date_of_birth: None,
                phone_number: None,
                medical_license_number: None,
                specialties: None,
                hospital_affiliations: None,
                managed_hospital_id: None,
                managed_pharmacy_id: None,
            };
            match role {
                res::Role::Patient => {
                    profile.date_of_birth = date_of_birth.filter(|d| !d.is_empty()).map(Into::into);
                    profile.phone_number = phone_number.filter(|p| !p.is_empty()).map(Into::into);
                }
                res::Role::Doctor => {
                    profile.medical_license_number =
                        license.filter(|l| !l.is_empty()).map(Into::into);
                    profile.specialties = Some(specialties);
                    profile.hospital_affiliations = Some(affiliations);
                }
                res::Role::HospitalAdmin => {
                    profile.managed_hospital_id =
                        managed_id.filter(|id| !id.is_empty()).map(Into::into);
                }
                res::Role::PharmacyAdmin => {
                    profile.managed_pharmacy_id =
                        managed_id.filter(|id| !id.is_empty()).map(Into::into);
                }
                res::Role::Admin => {}
            }
            let register = req::Register {
                email: email.into(),
                password: password.into(),
                role,
                profile,
            };
            let outcome = session.register(&client, register).await;
            if outcome.success {
                WebResult::Ok(view! { <Redirect path=paths::DASHBOARD /> })
            } else {
                Err(WebError::new(
                    outcome
                        .message
                        .unwrap_or_else(|| "Registration failed".to_string()),
                ))
            }
        })
    });

    let multi_select_values = move |select: &web_sys::HtmlSelectElement| {
        let options = select.selected_options();
        (0..options.length())
            .filter_map(|i| options.item(i))
            .filter_map(|opt| opt.get_attribute("value"))
            .collect::<Vec<_>>()
    };

    // the extra fields depend on the selected role
    let role_fields = move || match role.get() {
        res::Role::Patient => view! {
            <label class="label">
                "Date of birth"
                <input class="input" type="date" node_ref=date_of_birth_ref/>
            </label>
            <label class="label">
                "Phone number"
                <input class="input" node_ref=phone_number_ref/>
            </label>
        }
        .into_any(),
        res::Role::Doctor => {
            let specialty_options = move |list: Option<Vec<res::Specialty>>| {
                list.unwrap_or_default()
                    .into_iter()
                    .map(|s| view! { <option value=s.name.clone()>{s.name.clone()}</option> })
                    .collect_view()
            };
            let hospital_options = move |list: Option<Vec<res::Hospital>>| {
                list.unwrap_or_default()
                    .into_iter()
                    .map(|h| view! { <option value=h.id>{format!("{} ({})", h.name, h.city)}</option> })
                    .collect_view()
            };
            view! {
                <label class="label">
                    "Medical license number"
                    <input class="input" node_ref=license_ref/>
                </label>
                <label class="label">
                    "Specialties"
                    <select class="select" multiple on:change=move |ev| {
                        let select = event_target::<web_sys::HtmlSelectElement>(&ev);
                        specialties.set(multi_select_values(&select));
                    }>
                        <ResourceView resource=specialties_res view=specialty_options/>
                    </select>
                </label>
                <label class="label">
                    "Hospital affiliations"
                    <select class="select" multiple on:change=move |ev| {
                        let select = event_target::<web_sys::HtmlSelectElement>(&ev);
                        affiliations.set(multi_select_values(&select));
                    }>
                        <ResourceView resource=hospitals_res view=hospital_options/>
                    </select>
                </label>
            }
            .into_any()
        }
        res::Role::HospitalAdmin => {
            let hospital_options = move |list: Option<Vec<res::Hospital>>| {
                list.unwrap_or_default()
                    .into_iter()
                    .map(|h| view! { <option value=h.id>{h.name}</option> })
                    .collect_view()
            };
            view! {
                <label class="label">
                    "Managed hospital"
                    <select class="select" node_ref=managed_id_ref>
                        <option value="">"Select a hospital"</option>
                        <ResourceView resource=hospitals_res view=hospital_options/>
                    </select>
                </label>
            }
            .into_any()
        }
        res::Role::PharmacyAdmin => {
            let pharmacy_options = move |list: Option<Vec<res::Pharmacy>>| {
                list.unwrap_or_default()
                    .into_iter()
                    .map(|p| view! { <option value=p.id>{p.name}</option> })
                    .collect_view()
            };
            view! {
                <label class="label">
                    "Managed pharmacy"
                    <select class="select" node_ref=managed_id_ref>
                        <option value="">"Select a pharmacy"</option>
                        <ResourceView resource=pharmacies_res view=pharmacy_options/>
                    </select>
                </label>
            }
            .into_any()
        }
        res::Role::Admin => ().into_any(),
    };

    view! {
        <h2 class="subtitle">"Register"</h2>
        <form>
            <label class="label">
                "Email"
                <input class="input" node_ref=email_ref/>
            </label>
            <label class="label">
                "Password"
                <input class="input" type="password" node_ref=password_ref/>
            </label>
            <label class="label">
                "Role"
                <select class="select" on:change=move |ev| {
                    let value = event_target_value(&ev);
                    let selected = match value.as_str() {
                        "doctor" => res::Role::Doctor,
                        "hospital_admin" => res::Role::HospitalAdmin,
                        "pharmacy_admin" => res::Role::PharmacyAdmin,
                        _ => res::Role::Patient,
                    };
                    role.set(selected);
                }>
                    <option value="patient">"Patient"</option>
                    <option value="doctor">"Doctor"</option>
                    <option value="hospital_admin">"Hospital admin"</option>
                    <option value="pharmacy_admin">"Pharmacy admin"</option>
                </select>
            </label>
            <label class="label">
                "First name"
                <input class="input" node_ref=first_name_ref/>
            </label>
            <label class="label">
                "Last name"
                <input class="input" node_ref=last_name_ref/>
            </label>
            {role_fields}
            <button class="button" type="submit" on:click=move |ev| {
                ev.prevent_default();
                submit.dispatch(());
            }>
                "Register"
            </button>
        </form>
        <ActionView action=submit/>
    }
}

#[component]
pub fn Dashboard() -> impl IntoView {
    tracing::info!("Rendering Dashboard");

    let refresh_act = Action::new(move |&()| {
        let client = get_client();
        let session = get_session();
        SendWrapper::new(async move {
            let outcome = session.refresh_profile(&client).await;
            if outcome.success {
                WebResult::Ok(view! { <div>"Profile up to date"</div> })
            } else {
                Err(WebError::new(
                    outcome
                        .message
                        .unwrap_or_else(|| "Failed to load user profile".to_string()),
                ))
            }
        })
    });

    let panel = move || {
        // dispatch over the closed role enum, one panel per role
        get_session().user().map(|user| match user.role {
            res::Role::Patient => view! { <PatientDashboard user/> }.into_any(),
            res::Role::Doctor => view! { <DoctorDashboard user/> }.into_any(),
            res::Role::Admin => view! { <AdminDashboard/> }.into_any(),
            res::Role::HospitalAdmin => view! { <HospitalAdminDashboard user/> }.into_any(),
            res::Role::PharmacyAdmin => view! { <PharmacyAdminDashboard user/> }.into_any(),
        })
    };

    view! {
        <RouteGuard>
            {panel}
            <div class="block">
                <button class="button" on:click=move |_ev| { refresh_act.dispatch(()); }>
                    "Refresh profile"
                </button>
                <ActionView action=refresh_act/>
            </div>
        </RouteGuard>
    }
}

#[component]
pub fn Hospitals() -> impl IntoView {
    tracing::info!("Rendering Hospitals");

    let hospitals_res = utils::client_resource!(get_hospitals());
    let hospitals_content = move |hospitals: Vec<res::Hospital>| {
        let hospitals = hospitals
            .into_iter()
            .map(|hospital| {
                let href = format!("/hospitals/{}", hospital.id);
                view! {
                    <div class="column">
                        <div class="box">
                            <A href>{hospital.name}</A>
                            <div>{format!("{}, {}", hospital.address, hospital.city)}</div>
                        </div>
                    </div>
                }
            })
            .collect_view();
        view! {
            <div class="columns is-flex-wrap-wrap">
                {hospitals}
            </div>
        }
        .into_any()
    };
    let hospitals_view = move |hospitals: Option<_>| match hospitals {
        Some(hospitals) => hospitals_content(hospitals).into_any(),
        None => utils::loading_fallback("Loading hospitals...").into_any(),
    };

    view! {
        <h2 class="subtitle">"Hospitals"</h2>
        <ResourceView resource=hospitals_res view=hospitals_view/>
    }
}

#[derive(Debug, Clone, PartialEq, Params)]
pub struct HospitalParams {
    hospital_id: Option<String>,
}
#[component]
pub fn HospitalDetail() -> impl IntoView {
    let HospitalParams { hospital_id } = utils::params()?;
    let hospital_id = hospital_id.expect("failed to get hospital_id");
    tracing::info!("Rendering HospitalDetail {hospital_id}");

    let hospital_res = {
        let hospital_id = hospital_id.clone();
        utils::client_resource(move |client| {
            let hospital_id = hospital_id.clone();
            async move { SendWrapper::new(client.get_hospital(&hospital_id)).await }
        })
    };
    let hospital_content = move |hospital: res::Hospital| {
        view! {
            <h2 class="subtitle">{hospital.name}</h2>
            <div class="block">{format!("{}, {}", hospital.address, hospital.city)}</div>
            {hospital.phone.map(|phone| view! { <div class="block">{format!("Phone: {phone}")}</div> })}
            {hospital.description.map(|description| view! { <div class="block">{description}</div> })}
        }
    };
    let hospital_view = move |hospital: Option<_>| match hospital {
        Some(hospital) => hospital_content(hospital).into_any(),
        None => utils::loading_fallback("Loading hospital...").into_any(),
    };

    let view = view! {
        <ResourceView resource=hospital_res view=hospital_view/>
    };
    WebResult::Ok(view)
}

#[component]
pub fn Specialties() -> impl IntoView {
    tracing::info!("Rendering Specialties");

    let specialties_res = utils::client_resource!(get_specialties());
    let specialties_content = move |specialties: Vec<res::Specialty>| {
        let specialties = specialties
            .into_iter()
            .map(|specialty| {
                let href = format!(
                    "{}?specialty={}",
                    paths::DOCTORS,
                    urlencoding::encode(&specialty.name)
                );
                view! {
                    <li>
                        <A href>{specialty.name}</A>
                        {specialty.description.map(|d| format!(": {d}"))}
                    </li>
                }
            })
            .collect_view();
        view! {
            <div class="content">
                <ul>
                    {specialties}
                </ul>
            </div>
        }
        .into_any()
    };
    let specialties_view = move |specialties: Option<_>| match specialties {
        Some(specialties) => specialties_content(specialties).into_any(),
        None => utils::loading_fallback("Loading specialties...").into_any(),
    };

    view! {
        <h2 class="subtitle">"Specialties"</h2>
        <ResourceView resource=specialties_res view=specialties_view/>
    }
}

#[component]
pub fn Doctors() -> impl IntoView {
    tracing::info!("Rendering Doctors");

    // filters, with the specialty pre-filled from the query string
    let initial_specialty = leptos_router::hooks::use_query_map()
        .get_untracked()
        .get("specialty")
        .unwrap_or_default();
    let name = RwSignal::new(String::new());
    let specialty = RwSignal::new(initial_specialty);
    let city = RwSignal::new(String::new());

    let doctors_res = Resource::new(
        move || (name.get(), specialty.get(), city.get()),
        move |(name, specialty, city)| {
            let client = get_client();
            async move {
                let doctors = SendWrapper::new(client.get_doctors(
                    Some(name.as_str()),
                    Some(specialty.as_str()),
                    Some(city.as_str()),
                ))
                .await?;
                WebResult::Ok(doctors)
            }
        },
    );
    let doctors_content = move |doctors: Vec<res::User>| {
        if doctors.is_empty() {
            return view! { <div>"No doctors found"</div> }.into_any();
        }
        let doctors = doctors
            .into_iter()
            .map(|doctor| {
                let href = format!("/doctors/{}", doctor.id);
                let specialties = doctor
                    .profile
                    .specialties
                    .as_deref()
                    .unwrap_or_default()
                    .join(", ");
                view! {
                    <div class="column">
                        <div class="box">
                            <A href>{format!("Dr. {}", doctor.profile.full_name())}</A>
                            <div>{specialties}</div>
                        </div>
                    </div>
                }
            })
            .collect_view();
        view! {
            <div class="columns is-flex-wrap-wrap">
                {doctors}
            </div>
        }
        .into_any()
    };
    let doctors_view = move |doctors: Option<_>| match doctors {
        Some(doctors) => doctors_content(doctors).into_any(),
        None => utils::loading_fallback("Loading doctors...").into_any(),
    };

    view! {
        <h2 class="subtitle">"Doctors"</h2>
        <form class="block">
            <label class="label">
                "Name"
                <input class="input" on:input=move |ev| name.set(event_target_value(&ev))/>
            </label>
            <label class="label">
                "Specialty"
                <input class="input" prop:value=move || specialty.get()
                    on:input=move |ev| specialty.set(event_target_value(&ev))/>
            </label>
            <label class="label">
                "City"
                <input class="input" on:input=move |ev| city.set(event_target_value(&ev))/>
            </label>
        </form>
        <ResourceView resource=doctors_res view=doctors_view/>
    }
}

#[derive(Debug, Clone, PartialEq, Params)]
pub struct DoctorParams {
    doctor_id: Option<String>,
}
#[component]
pub fn DoctorDetail() -> impl IntoView {
    let DoctorParams { doctor_id } = utils::params()?;
    let doctor_id = doctor_id.expect("failed to get doctor_id");
    tracing::info!("Rendering DoctorDetail {doctor_id}");

    // resources
    let doctor_res = {
        let doctor_id = doctor_id.clone();
        utils::client_resource(move |client| {
            let doctor_id = doctor_id.clone();
            async move { SendWrapper::new(client.get_doctor(&doctor_id)).await }
        })
    };

    let selected_hospital = RwSignal::new(String::new());
    let selected_date = RwSignal::new(String::new());
    let selected_slot = RwSignal::new(String::new());
    let reason_ref = NodeRef::<Textarea>::new();

    let availability_res = {
        let doctor_id = doctor_id.clone();
        Resource::new(
            move || (selected_hospital.get(), selected_date.get()),
            move |(hospital_id, date)| {
                let doctor_id = doctor_id.clone();
                let client = get_client();
                async move {
                    if hospital_id.is_empty() || date.is_empty() {
                        return WebResult::Ok(None);
                    }
                    let availability = SendWrapper::new(client.get_doctor_availability(
                        &doctor_id,
                        &hospital_id,
                        &date,
                    ))
                    .await?;
                    Ok(availability)
                }
            },
        )
    };

    // actions
    let book_act = {
        let doctor_id = doctor_id.clone();
        Action::new(move |&()| {
            let doctor_id = doctor_id.clone();
            let hospital_id = selected_hospital.get_untracked();
            let date = selected_date.get_untracked();
            let slot = selected_slot.get_untracked();
            let reason = reason_ref.get().expect("failed to get reason_ref").value();
            let client = get_client();
            SendWrapper::new(async move {
                if hospital_id.is_empty() || date.is_empty() || slot.is_empty() {
                    return Err(WebError::new("Select a hospital, date and time slot"));
                }
                let (start_time, end_time) = slot
                    .split_once('-')
                    .ok_or_else(|| WebError::new("Invalid time slot"))?;
                let appointment = req::BookAppointment {
                    doctor_id: doctor_id.into(),
                    hospital_id: hospital_id.into(),
                    date: date.into(),
                    start_time: start_time.into(),
                    end_time: end_time.into(),
                    reason_for_visit: reason.into(),
                };
                SendWrapper::new(client.book_appointment(&appointment)).await?;
                availability_res.refetch();
                WebResult::Ok(view! { <div>"Appointment booked!"</div> })
            })
        })
    };

    // doctor
    let doctor_content = move |doctor: res::User| {
        let reviews_href = format!("/reviews/doctor/{}", doctor.id);
        let specialties = doctor
            .profile
            .specialties
            .as_deref()
            .unwrap_or_default()
            .join(", ");
        let affiliations = doctor
            .profile
            .hospital_affiliations
            .clone()
            .unwrap_or_default();
        let rating = doctor.profile.average_rating.map(|rating| {
            let reviews = doctor.profile.num_reviews.unwrap_or_default();
            view! {
                <div class="block">
                    {format!("Average rating: {rating:.1} ({reviews} reviews)")}
                </div>
            }
        });
        let slots_view = move |availability: Option<Option<res::Availability>>| {
            let slots = availability
                .flatten()
                .map(|availability| availability.time_slots)
                .unwrap_or_default();
            let open_slots = slots
                .into_iter()
                .filter(|slot| !slot.is_booked)
                .map(|slot| {
                    let value = format!("{}-{}", slot.start_time, slot.end_time);
                    view! {
                        <option value=value>
                            {format!("{} - {}", slot.start_time, slot.end_time)}
                        </option>
                    }
                })
                .collect_view();
            view! {
                <select class="select" on:change=move |ev| selected_slot.set(event_target_value(&ev))>
                    <option value="">"Select a time slot"</option>
                    {open_slots}
                </select>
            }
        };
        // only patients can book
        let booking = move || {
            (get_session().role() == Some(res::Role::Patient)).then(|| {
                let hospital_options = affiliations
                    .iter()
                    .map(|h| {
                        view! {
                            <option value=h.id.clone()>{format!("{} ({})", h.name, h.city)}</option>
                        }
                    })
                    .collect_view();
                view! {
                    <div class="block">
                        <h3 class="subtitle">"Book an appointment"</h3>
                        <form>
                            <label class="label">
                                "Hospital"
                                <select class="select" on:change=move |ev| selected_hospital.set(event_target_value(&ev))>
                                    <option value="">"Select a hospital"</option>
                                    {hospital_options}
                                </select>
                            </label>
                            <label class="label">
                                "Date"
                                <input class="input" type="date"
                                    on:change=move |ev| selected_date.set(event_target_value(&ev))/>
                            </label>
                            <label class="label">
                                "Time slot"
                                <ResourceView resource=availability_res view=slots_view/>
                            </label>
                            <label class="label">
                                "Reason for visit"
                                <textarea class="textarea" node_ref=reason_ref/>
                            </label>
                            <button class="button" type="submit" on:click=move |ev| {
                                ev.prevent_default();
                                book_act.dispatch(());
                            }>
                                "Book appointment"
                            </button>
                            <ActionView action=book_act/>
                        </form>
                    </div>
                }
            })
        };
        view! {
            <h2 class="subtitle">{format!("Dr. {}", doctor.profile.full_name())}</h2>
            <div class="block">{format!("Specialties: {specialties}")}</div>
            {doctor
                .profile
                .medical_license_number
                .clone()
                .map(|license| view! { <div class="block">{format!("License: {license}")}</div> })}
            {rating}
            {doctor
                .profile
                .bio
                .clone()
                .map(|bio| view! { <div class="block">{bio}</div> })}
            <div class="block">
                <A href=reviews_href>"View all reviews"</A>
            </div>
            {booking}
        }
    };
    let doctor_view = move |doctor: Option<_>| match doctor {
        Some(doctor) => doctor_content(doctor).into_any(),
        None => utils::loading_fallback("Loading doctor...").into_any(),
    };

    let view = view! {
        <ResourceView resource=doctor_res view=doctor_view/>
    };
    WebResult::Ok(view)
}

#[derive(Debug, Clone, PartialEq, Params)]
pub struct DoctorReviewsParams {
    doctor_id: Option<String>,
}
#[component]
pub fn DoctorReviews() -> impl IntoView {
    let DoctorReviewsParams { doctor_id } = utils::params()?;
    let doctor_id = doctor_id.expect("failed to get doctor_id");
    tracing::info!("Rendering DoctorReviews {doctor_id}");

    let reviews_res = {
        let doctor_id = doctor_id.clone();
        utils::client_resource(move |client| {
            let doctor_id = doctor_id.clone();
            async move { SendWrapper::new(client.get_doctor_reviews(&doctor_id)).await }
        })
    };
    let reviews_content = move |reviews: Vec<res::Review>| {
        if reviews.is_empty() {
            return view! { <div>"No reviews yet"</div> }.into_any();
        }
        let reviews = reviews
            .into_iter()
            .map(|review| {
                view! {
                    <div class="box">
                        <div class="has-text-weight-bold">{format!("Rating: {}/5", review.rating)}</div>
                        {review.comment.map(|comment| view! { <div>{comment}</div> })}
                    </div>
                }
            })
            .collect_view();
        view! { <div>{reviews}</div> }.into_any()
    };
    let reviews_view = move |reviews: Option<_>| match reviews {
        Some(reviews) => reviews_content(reviews).into_any(),
        None => utils::loading_fallback("Loading reviews...").into_any(),
    };

    let view = view! {
        <h2 class="subtitle">"Doctor reviews"</h2>
        <ResourceView resource=reviews_res view=reviews_view/>
    };
    WebResult::Ok(view)
}

#[component]
pub fn Pharmacies() -> impl IntoView {
    tracing::info!("Rendering Pharmacies");

    let city = RwSignal::new(String::new());
    let pharmacies_res = Resource::new(
        move || city.get(),
        move |city| {
            let client = get_client();
            async move {
                let pharmacies =
                    SendWrapper::new(client.get_pharmacies(Some(city.as_str()))).await?;
                WebResult::Ok(pharmacies)
            }
        },
    );
    let pharmacies_content = move |pharmacies: Vec<res::Pharmacy>| {
        let pharmacies = pharmacies
            .into_iter()
            .map(|pharmacy| {
                let href = format!("/pharmacies/{}", pharmacy.id);
                view! {
                    <div class="column">
                        <div class="box">
                            <A href>{pharmacy.name}</A>
                            <div>{format!("{}, {}", pharmacy.address, pharmacy.city)}</div>
                        </div>
                    </div>
                }
            })
            .collect_view();
        view! {
            <div class="columns is-flex-wrap-wrap">
                {pharmacies}
            </div>
        }
        .into_any()
    };
    let pharmacies_view = move |pharmacies: Option<_>| match pharmacies {
        Some(pharmacies) => pharmacies_content(pharmacies).into_any(),
        None => utils::loading_fallback("Loading pharmacies...").into_any(),
    };

    view! {
        <h2 class="subtitle">"Pharmacies"</h2>
        <form class="block">
            <label class="label">
                "City"
                <input class="input" on:input=move |ev| city.set(event_target_value(&ev))/>
            </label>
        </form>
        <ResourceView resource=pharmacies_res view=pharmacies_view/>
    }
}

#[derive(Debug, Clone, PartialEq, Params)]
pub struct PharmacyParams {
    pharmacy_id: Option<String>,
}
#[component]
pub fn PharmacyDetail() -> impl IntoView {
    let PharmacyParams { pharmacy_id } = utils::params()?;
    let pharmacy_id = pharmacy_id.expect("failed to get pharmacy_id");
    tracing::info!("Rendering PharmacyDetail {pharmacy_id}");

    let pharmacy_res = {
        let pharmacy_id = pharmacy_id.clone();
        utils::client_resource(move |client| {
            let pharmacy_id = pharmacy_id.clone();
            async move { SendWrapper::new(client.get_pharmacy(&pharmacy_id)).await }
        })
    };
    let pharmacy_content = move |pharmacy: res::Pharmacy| {
        view! {
            <h2 class="subtitle">{pharmacy.name}</h2>
            <div class="block">{format!("{}, {}", pharmacy.address, pharmacy.city)}</div>
            {pharmacy.phone.map(|phone| view! { <div class="block">{format!("Phone: {phone}")}</div> })}
        }
    };
    let pharmacy_view = move |pharmacy: Option<_>| match pharmacy {
        Some(pharmacy) => pharmacy_content(pharmacy).into_any(),
        None => utils::loading_fallback("Loading pharmacy...").into_any(),
    };

    let view = view! {
        <ResourceView resource=pharmacy_res view=pharmacy_view/>
    };
    WebResult::Ok(view)
}

#[component]
pub fn MyAppointments() -> impl IntoView {
    tracing::info!("Rendering MyAppointments");

    let appointments_res = utils::client_resource!(get_appointments());

    let status_act = Action::new(move |&(ref id, status): &(String, res::AppointmentStatus)| {
        let id = id.clone();
        let client = get_client();
        SendWrapper::new(async move {
            SendWrapper::new(client.update_appointment_status(&id, status)).await?;
            appointments_res.refetch();
            WebResult::Ok(())
        })
    });
    let notes_act = Action::new(move |&(ref id, ref notes): &(String, String)| {
        let id = id.clone();
        let notes = notes.clone();
        let client = get_client();
        SendWrapper::new(async move {
            SendWrapper::new(client.add_appointment_notes(&id, &notes)).await?;
            appointments_res.refetch();
            WebResult::Ok(())
        })
    });

    let appointments_content = move |mut appointments: Vec<res::Appointment>| {
        if appointments.is_empty() {
            return view! { <div>"No appointments"</div> }.into_any();
        }
        appointments.sort_by(|l, r| (&l.date, &l.start_time).cmp(&(&r.date, &r.start_time)));
        let role = get_session().role();
        let appointments = appointments
            .into_iter()
            .map(|appointment| {
                // the counterparty depends on who is looking
                let other_party = if role == Some(res::Role::Patient) {
                    appointment
                        .doctor
                        .as_ref()
                        .map(|doctor| format!("Dr. {}", doctor.profile.full_name()))
                } else {
                    appointment
                        .patient
                        .as_ref()
                        .map(|patient| patient.profile.full_name())
                };
                let hospital = appointment
                    .hospital
                    .as_ref()
                    .map(|hospital| hospital.name.clone());
                let id = appointment.id.clone();
                let cancel = (role == Some(res::Role::Patient)
                    && appointment.status == res::AppointmentStatus::Booked)
                    .then(|| {
                        let id = id.clone();
                        view! {
                            <button class="button is-danger" on:click=move |_ev| {
                                status_act.dispatch((id.clone(), res::AppointmentStatus::Cancelled));
                            }>"Cancel"</button>
                        }
                    });
                let doctor_actions = (role == Some(res::Role::Doctor)
                    && matches!(
                        appointment.status,
                        res::AppointmentStatus::Booked | res::AppointmentStatus::Confirmed
                    ))
                    .then(|| {
                        let confirm_id = id.clone();
                        let complete_id = id.clone();
                        view! {
                            <button class="button mr-2" on:click=move |_ev| {
                                status_act.dispatch((confirm_id.clone(), res::AppointmentStatus::Confirmed));
                            }>"Confirm"</button>
                            <button class="button" on:click=move |_ev| {
                                status_act.dispatch((complete_id.clone(), res::AppointmentStatus::Completed));
                            }>"Complete"</button>
                        }
                    });
                // the doctor can attach notes once the visit has happened
                let notes_form = (role == Some(res::Role::Doctor)
                    && appointment.status == res::AppointmentStatus::Completed)
                    .then(|| {
                        let notes_id = id.clone();
                        let notes = RwSignal::new(appointment.notes.clone().unwrap_or_default());
                        view! {
                            <div class="mt-2">
                                <textarea class="textarea" prop:value=move || notes.get()
                                    on:input=move |ev| notes.set(event_target_value(&ev))/>
                                <button class="button mt-1" on:click=move |_ev| {
                                    notes_act.dispatch((notes_id.clone(), notes.get_untracked()));
                                }>"Save notes"</button>
                            </div>
                        }
                    });
                view! {
                    <div class="box">
                        <div class="has-text-weight-bold">
                            {format!("{} {} - {}", appointment.date, appointment.start_time, appointment.end_time)}
                        </div>
                        {other_party.map(|other| view! { <div>{other}</div> })}
                        {hospital.map(|hospital| view! { <div>{format!("Hospital: {hospital}")}</div> })}
                        <div>{format!("Reason: {}", appointment.reason_for_visit)}</div>
                        <div>{format!("Status: {}", appointment.status)}</div>
                        {appointment.notes.map(|notes| view! { <div>{format!("Notes: {notes}")}</div> })}
                        {cancel}
                        {doctor_actions}
                        {notes_form}
                    </div>
                }
            })
            .collect_view();
        view! { <div>{appointments}</div> }.into_any()
    };
    let appointments_view = move |appointments: Option<_>| match appointments {
        Some(appointments) => appointments_content(appointments).into_any(),
        None => utils::loading_fallback("Loading appointments...").into_any(),
    };

    view! {
        <RouteGuard>
            <h2 class="subtitle">"My appointments"</h2>
            <ResourceView resource=appointments_res view=appointments_view/>
        </RouteGuard>
    }
}

#[component]
pub fn Notifications() -> impl IntoView {
    tracing::info!("Rendering Notifications");

    let notifications_res = utils::client_resource!(get_notifications());

    let mark_read_act = Action::new(move |id: &String| {
        let id = id.clone();
        let client = get_client();
        SendWrapper::new(async move {
            SendWrapper::new(client.mark_notification_read(&id)).await?;
            notifications_res.refetch();
            WebResult::Ok(())
        })
    });
    let mark_all_act = Action::new(move |&()| {
        let client = get_client();
        SendWrapper::new(async move {
            SendWrapper::new(client.mark_all_notifications_read()).await?;
            notifications_res.refetch();
            WebResult::Ok(())
        })
    });
    let delete_act = Action::new(move |id: &String| {
        let id = id.clone();
        let client = get_client();
        SendWrapper::new(async move {
            SendWrapper::new(client.delete_notification(&id)).await?;
            notifications_res.refetch();
            WebResult::Ok(())
        })
    });

    let notifications_content = move |notifications: Vec<res::Notification>| {
        if notifications.is_empty() {
            return view! { <div>"No notifications"</div> }.into_any();
        }
        let notifications = notifications
            .into_iter()
            .map(|notification| {
                let mark_id = notification.id.clone();
                let delete_id = notification.id.clone();
                let mark_read = (!notification.is_read).then(|| {
                    view! {
                        <button class="button mr-2" on:click=move |_ev| {
                            mark_read_act.dispatch(mark_id.clone());
                        }>"Mark as read"</button>
                    }
                });
                let class = if notification.is_read {
                    "box has-text-grey"
                } else {
                    "box has-text-weight-medium"
                };
                view! {
                    <div class=class>
                        <div>{notification.message}</div>
                        {notification.link.map(|link| view! { <a href=link>"View details"</a> })}
                        <div class="mt-2">
                            {mark_read}
                            <button class="button is-danger" on:click=move |_ev| {
                                delete_act.dispatch(delete_id.clone());
                            }>"Delete"</button>
                        </div>
                    </div>
                }
            })
            .collect_view();
        view! { <div>{notifications}</div> }.into_any()
    };
    let notifications_view = move |notifications: Option<_>| match notifications {
        Some(notifications) => notifications_content(notifications).into_any(),
        None => utils::loading_fallback("Loading notifications...").into_any(),
    };

    view! {
        <RouteGuard>
            <h2 class="subtitle">"Notifications"</h2>
            <div class="block">
                <button class="button" on:click=move |_ev| { mark_all_act.dispatch(()); }>
                    "Mark all as read"
                </button>
            </div>
            <ResourceView resource=notifications_res view=notifications_view/>
        </RouteGuard>
    }
}

#[component]
pub fn MedicalRecords() -> impl IntoView {
    tracing::info!("Rendering MedicalRecords");

    let records_res = utils::client_resource!(get_medical_records());

    // upload form
    let title_ref = NodeRef::<Input>::new();
    let type_ref = NodeRef::<Input>::new();
    let description_ref = NodeRef::<Textarea>::new();
    let file_ref = NodeRef::<Input>::new();
    let upload_act = Action::new(move |&()| {
        let title = title_ref.get().expect("failed to get title_ref").value();
        let record_type = type_ref.get().expect("failed to get type_ref").value();
        let description = description_ref
            .get()
            .expect("failed to get description_ref")
            .value();
        let file = file_ref
            .get()
            .expect("failed to get file_ref")
            .files()
            .and_then(|files| files.get(0));
        let client = get_client();
        SendWrapper::new(async move {
            if title.is_empty() || record_type.is_empty() {
                return Err(WebError::new("Title and type are required"));
            }
            let Some(file) = file else {
                return Err(WebError::new("Select a file to upload"));
            };
            let form = web_sys::FormData::new()?;
            form.append_with_str("title", &title)?;
            form.append_with_str("type", &record_type)?;
            form.append_with_str("description", &description)?;
            form.append_with_blob("file", &file)?;
            SendWrapper::new(client.upload_medical_record(form)).await?;
            records_res.refetch();
            WebResult::Ok(view! { <div>"Record uploaded!"</div> })
        })
    });

    let delete_act = Action::new(move |id: &String| {
        let id = id.clone();
        let client = get_client();
        SendWrapper::new(async move {
            SendWrapper::new(client.delete_medical_record(&id)).await?;
            records_res.refetch();
            WebResult::Ok(())
        })
    });

    let records_content = move |records: Vec<res::MedicalRecord>| {
        if records.is_empty() {
            return view! { <div>"No medical records"</div> }.into_any();
        }
        let can_edit = matches!(
            get_session().role(),
            Some(res::Role::Patient) | Some(res::Role::Admin)
        );
        let records = records
            .into_iter()
            .map(|record| {
                let edit_href = format!("/medicalrecords/{}/edit", record.id);
                let delete_id = record.id.clone();
                let actions = can_edit.then(|| {
                    view! {
                        <A href=edit_href>"Edit"</A>
                        <button class="button is-danger ml-2" on:click=move |_ev| {
                            delete_act.dispatch(delete_id.clone());
                        }>"Delete"</button>
                    }
                });
                view! {
                    <div class="box">
                        <div class="has-text-weight-bold">{record.title}</div>
                        <div>{format!("Type: {}", record.record_type)}</div>
                        <div>{format!("Uploaded: {}", record.upload_date)}</div>
                        {record.description.map(|d| view! { <div>{d}</div> })}
                        {record
                            .file_url
                            .map(|url| view! { <a href=url target="_blank">"View file"</a> })}
                        <div class="mt-2">{actions}</div>
                    </div>
                }
            })
            .collect_view();
        view! { <div>{records}</div> }.into_any()
    };
    let records_view = move |records: Option<_>| match records {
        Some(records) => records_content(records).into_any(),
        None => utils::loading_fallback("Loading medical records...").into_any(),
    };

    view! {
        <RouteGuard>
            <h2 class="subtitle">"Medical records"</h2>
            <div class="block">
                <h3 class="subtitle is-6">"Upload a record"</h3>
                <form>
                    <label class="label">
                        "Title"
                        <input class="input" node_ref=title_ref/>
                    </label>
                    <label class="label">
                        "Type"
                        <input class="input" node_ref=type_ref/>
                    </label>
                    <label class="label">
                        "Description"
                        <textarea class="textarea" node_ref=description_ref/>
                    </label>
                    <label class="label">
                        "File"
                        <input class="input" type="file" node_ref=file_ref/>
                    </label>
                    <button class="button" type="submit" on:click=move |ev| {
                        ev.prevent_default();
                        upload_act.dispatch(());
                    }>
                        "Upload"
                    </button>
                    <ActionView action=upload_act/>
                </form>
            </div>
            <ResourceView resource=records_res view=records_view/>
        </RouteGuard>
    }
}

#[derive(Debug, Clone, PartialEq, Params)]
pub struct MedicalRecordParams {
    record_id: Option<String>,
}
#[component]
pub fn MedicalRecordEdit() -> impl IntoView {
    let MedicalRecordParams { record_id } = utils::params()?;
    let record_id = record_id.expect("failed to get record_id");
    tracing::info!("Rendering MedicalRecordEdit {record_id}");

    let record_res = {
        let record_id = record_id.clone();
        utils::client_resource(move |client| {
            let record_id = record_id.clone();
            async move { SendWrapper::new(client.get_medical_record(&record_id)).await }
        })
    };

    let title_ref = NodeRef::<Input>::new();
    let type_ref = NodeRef::<Input>::new();
    let description_ref = NodeRef::<Textarea>::new();
    let update_act = {
        let record_id = record_id.clone();
        Action::new(move |&()| {
            let record_id = record_id.clone();
            let title = title_ref.get().expect("failed to get title_ref").value();
            let record_type = type_ref.get().expect("failed to get type_ref").value();
            let description = description_ref
                .get()
                .expect("failed to get description_ref")
                .value();
            let client = get_client();
            SendWrapper::new(async move {
                if title.is_empty() || record_type.is_empty() {
                    return Err(WebError::new("Title and type are required"));
                }
                let update = req::UpdateMedicalRecord {
                    title: title.into(),
                    record_type: record_type.into(),
                    description: (!description.is_empty()).then(|| description.into()),
                };
                SendWrapper::new(client.update_medical_record(&record_id, &update)).await?;
                WebResult::Ok(view! { <Redirect path=paths::MEDICAL_RECORDS /> })
            })
        })
    };

    let record_content = move |record: res::MedicalRecord| {
        view! {
            <form>
                <label class="label">
                    "Title"
                    <input class="input" value=record.title node_ref=title_ref/>
                </label>
                <label class="label">
                    "Type"
                    <input class="input" value=record.record_type node_ref=type_ref/>
                </label>
                <label class="label">
                    "Description"
                    <textarea class="textarea" node_ref=description_ref>
                        {record.description.unwrap_or_default()}
                    </textarea>
                </label>
                <button class="button" type="submit" on:click=move |ev| {
                    ev.prevent_default();
                    update_act.dispatch(());
                }>
                    "Save"
                </button>
                <ActionView action=update_act/>
            </form>
        }
    };
    let record_view = move |record: Option<_>| match record {
        Some(record) => record_content(record).into_any(),
        None => utils::loading_fallback("Loading record...").into_any(),
    };

    let view = view! {
        <RouteGuard>
            <h2 class="subtitle">"Edit medical record"</h2>
            <ResourceView resource=record_res view=record_view/>
        </RouteGuard>
    };
    WebResult::Ok(view)
}

#[component]
pub fn Prescriptions() -> impl IntoView {
    tracing::info!("Rendering Prescriptions");

    let prescriptions_res = utils::client_resource!(get_prescriptions());
    let appointments_res = utils::client_resource!(get_appointments());

    // prescription form state (doctors only)
    let selected_appointment = RwSignal::new(String::new());
    let medications = RwSignal::new(Vec::<req::Medication>::new());
    let med_name_ref = NodeRef::<Input>::new();
    let med_dosage_ref = NodeRef::<Input>::new();
    let med_frequency_ref = NodeRef::<Input>::new();
    let med_duration_ref = NodeRef::<Input>::new();
    let valid_until_ref = NodeRef::<Input>::new();

    let add_medication = move |_ev: leptos::ev::MouseEvent| {
        let name = med_name_ref.get().expect("failed to get med_name_ref").value();
        let dosage = med_dosage_ref
            .get()
            .expect("failed to get med_dosage_ref")
            .value();
        let frequency = med_frequency_ref
            .get()
            .expect("failed to get med_frequency_ref")
            .value();
        let duration = med_duration_ref
            .get()
            .expect("failed to get med_duration_ref")
            .value();
        if name.is_empty() || dosage.is_empty() {
            return;
        }
        medications.update(|meds| {
            meds.push(req::Medication {
                name,
                dosage,
                frequency,
                duration,
                notes: None,
            })
        });
    };

    let create_act = Action::new(move |&()| {
        let selection = selected_appointment.get_untracked();
        let meds = medications.get_untracked();
        let valid_until = valid_until_ref
            .get()
            .expect("failed to get valid_until_ref")
            .value();
        let client = get_client();
        SendWrapper::new(async move {
            let (appointment_id, patient_id) = selection
                .split_once('|')
                .ok_or_else(|| WebError::new("Select an appointment"))?;
            if meds.is_empty() {
                return Err(WebError::new("Add at least one medication"));
            }
            let prescription = req::NewPrescription {
                patient_id: patient_id.to_string().into(),
                appointment_id: appointment_id.to_string().into(),
                medications: meds,
                valid_until: (!valid_until.is_empty()).then(|| valid_until.into()),
            };
            SendWrapper::new(client.create_prescription(&prescription)).await?;
            medications.set(Vec::new());
            prescriptions_res.refetch();
            WebResult::Ok(view! { <div>"Prescription created!"</div> })
        })
    });

    let appointment_options = move |appointments: Option<Vec<res::Appointment>>| {
        appointments
            .unwrap_or_default()
            .into_iter()
            .filter_map(|appointment| {
                let patient = appointment.patient.as_ref()?;
                let value = format!("{}|{}", appointment.id, patient.id);
                Some(view! {
                    <option value=value>
                        {format!("{} with {}", appointment.date, patient.profile.full_name())}
                    </option>
                })
            })
            .collect_view()
    };

    let medication_list = move || {
        let meds = medications.get();
        meds.into_iter()
            .map(|med| {
                view! {
                    <li>{format!("{} - {}, {}, {}", med.name, med.dosage, med.frequency, med.duration)}</li>
                }
            })
            .collect_view()
    };

    let create_form = move || {
        (get_session().role() == Some(res::Role::Doctor)).then(|| {
            view! {
                <div class="block">
                    <h3 class="subtitle is-6">"Create a prescription"</h3>
                    <form>
                        <label class="label">
                            "Appointment"
                            <select class="select" on:change=move |ev| {
                                selected_appointment.set(event_target_value(&ev));
                            }>
                                <option value="">"Select an appointment"</option>
                                <ResourceView resource=appointments_res view=appointment_options/>
                            </select>
                        </label>
                        <label class="label">
                            "Medication name"
                            <input class="input" node_ref=med_name_ref/>
                        </label>
                        <label class="label">
                            "Dosage"
                            <input class="input" node_ref=med_dosage_ref/>
                        </label>
                        <label class="label">
                            "Frequency"
                            <input class="input" node_ref=med_frequency_ref/>
                        </label>
                        <label class="label">
                            "Duration"
                            <input class="input" node_ref=med_duration_ref/>
                        </label>
                        <button class="button" type="button" on:click=add_medication>
                            "Add medication"
                        </button>
                        <ul>{medication_list}</ul>
                        <label class="label">
                            "Valid until"
                            <input class="input" type="date" node_ref=valid_until_ref/>
                        </label>
                        <button class="button" type="submit" on:click=move |ev| {
                            ev.prevent_default();
                            create_act.dispatch(());
                        }>
                            "Create prescription"
                        </button>
                        <ActionView action=create_act/>
                    </form>
                </div>
            }
        })
    };

    let prescriptions_content = move |prescriptions: Vec<res::Prescription>| {
        if prescriptions.is_empty() {
            return view! { <div>"No prescriptions"</div> }.into_any();
        }
        let prescriptions = prescriptions
            .into_iter()
            .map(|prescription| {
                let href = format!("/prescriptions/{}", prescription.id);
                let medications = prescription
                    .medications
                    .iter()
                    .map(|med| med.name.clone())
                    .collect::<Vec<_>>()
                    .join(", ");
                view! {
                    <div class="box">
                        <A href>{format!("Issued {}", prescription.issue_date)}</A>
                        <div>{medications}</div>
                        <div>{format!("Status: {}", prescription.status)}</div>
                    </div>
                }
            })
            .collect_view();
        view! { <div>{prescriptions}</div> }.into_any()
    };
    let prescriptions_view = move |prescriptions: Option<_>| match prescriptions {
        Some(prescriptions) => prescriptions_content(prescriptions).into_any(),
        None => utils::loading_fallback("Loading prescriptions...").into_any(),
    };

    view! {
        <RouteGuard>
            <h2 class="subtitle">"Prescriptions"</h2>
            {create_form}
            <ResourceView resource=prescriptions_res view=prescriptions_view/>
        </RouteGuard>
    }
}

#[derive(Debug, Clone, PartialEq, Params)]
pub struct PrescriptionParams {
    prescription_id: Option<String>,
}
#[component]
pub fn PrescriptionDetail() -> impl IntoView {
    let PrescriptionParams { prescription_id } = utils::params()?;
    let prescription_id = prescription_id.expect("failed to get prescription_id");
    tracing::info!("Rendering PrescriptionDetail {prescription_id}");

    let prescription_res = {
        let prescription_id = prescription_id.clone();
        utils::client_resource(move |client| {
            let prescription_id = prescription_id.clone();
            async move { SendWrapper::new(client.get_prescription(&prescription_id)).await }
        })
    };
    let prescription_content = move |prescription: res::Prescription| {
        let doctor = prescription
            .doctor
            .as_ref()
            .map(|doctor| format!("Prescribed by Dr. {}", doctor.profile.full_name()));
        let medications = prescription
            .medications
            .iter()
            .map(|med| {
                let notes = med
                    .notes
                    .as_ref()
                    .map(|notes| format!(" ({notes})"))
                    .unwrap_or_default();
                view! {
                    <li>{format!("{} - {}, {}, {}{notes}", med.name, med.dosage, med.frequency, med.duration)}</li>
                }
            })
            .collect_view();
        view! {
            <h2 class="subtitle">{format!("Prescription issued {}", prescription.issue_date)}</h2>
            {doctor.map(|doctor| view! { <div class="block">{doctor}</div> })}
            {prescription
                .valid_until
                .clone()
                .map(|valid| view! { <div class="block">{format!("Valid until: {valid}")}</div> })}
            <div class="content">
                <ul>{medications}</ul>
            </div>
        }
    };
    let prescription_view = move |prescription: Option<_>| match prescription {
        Some(prescription) => prescription_content(prescription).into_any(),
        None => utils::loading_fallback("Loading prescription...").into_any(),
    };

    let view = view! {
        <RouteGuard>
            <ResourceView resource=prescription_res view=prescription_view/>
        </RouteGuard>
    };
    WebResult::Ok(view)
}

#[component]
pub fn MyReviews() -> impl IntoView {
    tracing::info!("Rendering MyReviews");

    let reviews_res = Resource::new(
        move || get_session().user().map(|user| user.id),
        move |patient_id| {
            let client = get_client();
            async move {
                let Some(patient_id) = patient_id else {
                    return WebResult::Ok(Vec::new());
                };
                let reviews = SendWrapper::new(client.get_patient_reviews(&patient_id)).await?;
                Ok(reviews)
            }
        },
    );
    let appointments_res = utils::client_resource!(get_appointments());

    // review form
    let selected_appointment = RwSignal::new(String::new());
    let rating = RwSignal::new(5);
    let comment_ref = NodeRef::<Textarea>::new();
    let anonymous = RwSignal::new(false);

    let create_act = Action::new(move |&()| {
        let selection = selected_appointment.get_untracked();
        let rating = rating.get_untracked();
        let comment = comment_ref.get().expect("failed to get comment_ref").value();
        let is_anonymous = anonymous.get_untracked();
        let client = get_client();
        SendWrapper::new(async move {
            let (appointment_id, doctor_id) = selection
                .split_once('|')
                .ok_or_else(|| WebError::new("Select an appointment to review"))?;
            let review = req::NewReview {
                doctor_id: doctor_id.to_string().into(),
                appointment_id: appointment_id.to_string().into(),
                rating,
                comment: comment.into(),
                is_anonymous,
            };
            SendWrapper::new(client.create_review(&review)).await?;
            reviews_res.refetch();
            WebResult::Ok(view! { <div>"Review submitted!"</div> })
        })
    });

    let update_act = Action::new(move |input: &(String, i32, String, bool)| {
        let (id, rating, comment, is_anonymous) = input.clone();
        let client = get_client();
        SendWrapper::new(async move {
            let update = req::UpdateReview {
                rating,
                comment: comment.into(),
                is_anonymous,
            };
            SendWrapper::new(client.update_review(&id, &update)).await?;
            reviews_res.refetch();
            WebResult::Ok(())
        })
    });

    let delete_act = Action::new(move |id: &String| {
        let id = id.clone();
        let client = get_client();
        SendWrapper::new(async move {
            SendWrapper::new(client.delete_review(&id)).await?;
            reviews_res.refetch();
            WebResult::Ok(())
        })
    });

    // only completed appointments can be reviewed
    let appointment_options = move |appointments: Option<Vec<res::Appointment>>| {
        appointments
            .unwrap_or_default()
            .into_iter()
            .filter(|appointment| appointment.status == res::AppointmentStatus::Completed)
            .filter_map(|appointment| {
                let doctor = appointment.doctor.as_ref()?;
                let value = format!("{}|{}", appointment.id, doctor.id);
                Some(view! {
                    <option value=value>
                        {format!("{} with Dr. {}", appointment.date, doctor.profile.full_name())}
                    </option>
                })
            })
            .collect_view()
    };

    let reviews_content = move |reviews: Vec<res::Review>| {
        if reviews.is_empty() {
            return view! { <div>"No reviews yet"</div> }.into_any();
        }
        let reviews = reviews
            .into_iter()
            .map(|review| {
                let update_id = review.id.clone();
                let delete_id = review.id.clone();
                let is_anonymous = review.is_anonymous;
                let doctor = review
                    .doctor
                    .as_ref()
                    .map(|doctor| format!("Dr. {}", doctor.profile.full_name()));
                let edit_rating = RwSignal::new(review.rating);
                let edit_comment = RwSignal::new(review.comment.clone().unwrap_or_default());
                view! {
                    <div class="box">
                        {doctor.map(|doctor| view! { <div class="has-text-weight-bold">{doctor}</div> })}
                        <label class="label">
                            "Rating (1-5)"
                            <input class="input" type="number" min="1" max="5"
                                prop:value=move || edit_rating.get().to_string()
                                on:input=move |ev| {
                                    if let Ok(value) = event_target_value(&ev).parse() {
                                        edit_rating.set(value);
                                    }
                                }/>
                        </label>
                        <label class="label">
                            "Comment"
                            <textarea class="textarea" prop:value=move || edit_comment.get()
                                on:input=move |ev| edit_comment.set(event_target_value(&ev))/>
                        </label>
                        <button class="button mt-2 mr-2" on:click=move |_ev| {
                            update_act.dispatch((
                                update_id.clone(),
                                edit_rating.get_untracked(),
                                edit_comment.get_untracked(),
                                is_anonymous,
                            ));
                        }>"Save"</button>
                        <button class="button is-danger mt-2" on:click=move |_ev| {
                            delete_act.dispatch(delete_id.clone());
                        }>"Delete"</button>
                    </div>
                }
            })
            .collect_view();
        view! { <div>{reviews}</div> }.into_any()
    };
    let reviews_view = move |reviews: Option<_>| match reviews {
        Some(reviews) => reviews_content(reviews).into_any(),
        None => utils::loading_fallback("Loading reviews...").into_any(),
    };

    view! {
        <RouteGuard roles=vec![res::Role::Patient]>
            <h2 class="subtitle">"My reviews"</h2>
            <div class="block">
                <h3 class="subtitle is-6">"Write a review"</h3>
                <form>
                    <label class="label">
                        "Appointment"
                        <select class="select" on:change=move |ev| {
                            selected_appointment.set(event_target_value(&ev));
                        }>
                            <option value="">"Select an appointment"</option>
                            <ResourceView resource=appointments_res view=appointment_options/>
                        </select>
                    </label>
                    <label class="label">
                        "Rating (1-5)"
                        <input class="input" type="number" min="1" max="5" value="5"
                            on:input=move |ev| {
                                if let Ok(value) = event_target_value(&ev).parse() {
                                    rating.set(value);
                                }
                            }/>
                    </label>
                    <label class="label">
                        "Comment"
                        <textarea class="textarea" node_ref=comment_ref/>
                    </label>
                    <label class="checkbox">
                        <input type="checkbox" on:change=move |ev| {
                            anonymous.set(event_target_checked(&ev));
                        }/>
                        " Post anonymously"
                    </label>
                    <div class="mt-2">
                        <button class="button" type="submit" on:click=move |ev| {
                            ev.prevent_default();
                            create_act.dispatch(());
                        }>
                            "Submit review"
                        </button>
                    </div>
                    <ActionView action=create_act/>
                </form>
            </div>
            <ResourceView resource=reviews_res view=reviews_view/>
        </RouteGuard>
    }
}
