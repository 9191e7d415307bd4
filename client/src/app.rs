//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::route_guard::{PrivateRoute, PublicRoute};
use crate::pages::{
    home::HomePage, login::LoginPage, meeting::MeetingPage, meeting_editor::MeetingEditorPage,
    profile::ProfilePage, signup::SignupPage,
};
use crate::state::{auth::AuthState, meetings::MeetingsState};

/// Root application component.
///
/// Provides the shared state contexts and wraps every route in its gate.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::restore());
    let meetings = RwSignal::new(MeetingsState::default());

    provide_context(auth);
    provide_context(meetings);

    view! {
        <Stylesheet id="leptos" href="/pkg/meetups.css"/>
        <Title text="Meetups"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=|| view! { <PublicRoute><LoginPage/></PublicRoute> }/>
                <Route path=StaticSegment("signup") view=|| view! { <PublicRoute><SignupPage/></PublicRoute> }/>
                <Route path=StaticSegment("") view=|| view! { <PrivateRoute><HomePage/></PrivateRoute> }/>
                <Route path=StaticSegment("profile") view=|| view! { <PrivateRoute><ProfilePage/></PrivateRoute> }/>
                <Route
                    path=(StaticSegment("meetings"), StaticSegment("new"))
                    view=|| view! { <PrivateRoute><MeetingEditorPage/></PrivateRoute> }
                />
                <Route
                    path=(StaticSegment("meetings"), ParamSegment("id"))
                    view=|| view! { <PrivateRoute><MeetingPage/></PrivateRoute> }
                />
                <Route
                    path=(StaticSegment("meetings"), ParamSegment("id"), StaticSegment("edit"))
                    view=|| view! { <PrivateRoute><MeetingEditorPage/></PrivateRoute> }
                />
            </Routes>
        </Router>
    }
}
