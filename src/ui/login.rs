//! Login page.

use crate::login::LoginForm;

/// Full login page body.
#[must_use]
pub fn login_page(form: &LoginForm) -> String {
    format!(
        r#"<div class="login min-h-screen flex items-center justify-center">
    <div class="relative z-10 w-full max-w-md px-6">
        <div class="text-center mb-10">
            <h2 class="text-4xl font-bold text-white mb-4">SWAGATAM 🙏🏼</h2>
            <p class="text-lg text-white/80 leading-relaxed">
                Dive into India’s groundwater insights with Hydro AI Talk.
                Sign in to explore, analyze, and forecast data effortlessly.
            </p>
        </div>
        {card}
    </div>
</div>"#,
        card = login_card(form)
    )
}

/// The `#login-card` fragment, swapped when the mode toggles.
#[must_use]
pub fn login_card(form: &LoginForm) -> String {
    let mode = form.mode;
    let name_field = if form.shows_name_field() {
        r#"<input type="text" name="full_name" placeholder="Full Name" class="input w-full">"#
    } else {
        ""
    };
    let (prompt, switch_label) = mode.switch_prompt();
    format!(
        r##"<div id="login-card" class="bg-white/80 backdrop-blur-lg rounded-2xl shadow-2xl p-8">
    <h1 class="text-2xl font-semibold text-center mb-6">{heading}</h1>
    <form method="post" action="/login">
        <div class="space-y-4">
            {name_field}
            <input type="email" name="email" placeholder="Email" class="input w-full">
            <input type="password" name="password" placeholder="Password" class="input w-full">
        </div>
        <button type="submit" class="w-full mt-6 py-3 rounded-xl bg-primary text-white font-semibold">{submit}</button>
        <div class="flex items-center my-6">
            <div class="flex-grow h-px bg-panelBorder"></div>
            <span class="px-3 text-textMuted text-sm">or</span>
            <div class="flex-grow h-px bg-panelBorder"></div>
        </div>
        <button type="submit" name="provider" value="google" class="w-full flex items-center justify-center gap-3 py-3 rounded-xl bg-white border font-medium">{google}</button>
    </form>
    <p class="mt-6 text-center text-sm">
        {prompt}
        <button type="button" class="font-semibold hover:underline" hx-post="/login/mode" hx-target="#login-card" hx-swap="outerHTML">{switch_label}</button>
    </p>
</div>"##,
        heading = mode.heading(),
        submit = mode.submit_label(),
        google = mode.google_label(),
    )
}
