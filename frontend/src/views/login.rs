use crate::app::DashboardApp;
use crate::dataflow::Atom;
use crate::session::Session;
use crate::theme::*;
use zoon::*;

#[derive(Clone)]
struct LoginForm {
    username: Atom<String>,
    password: Atom<String>,
    session: Session,
}

impl LoginForm {
    fn submit(&self) {
        self.session
            .login_requested_relay
            .send((self.username.get_cloned(), self.password.get_cloned()));
    }
}

pub fn login_page(app: &DashboardApp) -> impl Element + use<> {
    let form = LoginForm {
        username: Atom::default(),
        password: Atom::default(),
        session: app.session.clone(),
    };

    Column::new()
        .s(Width::exact(400))
        .s(Align::new().center_x())
        .s(Padding::all(30))
        .s(Gap::new().y(SPACING_12))
        .s(Background::new().color(CARD_BG))
        .s(RoundedCorners::all(8))
        .s(Shadows::new([Shadow::new().y(4).blur(20).color("rgba(0, 0, 0, 0.1)")]))
        .update_raw_el(|el| el.class("login-container"))
        .item(
            El::new()
                .s(Align::new().center_x())
                .s(Font::new().size(24).weight(FontWeight::SemiBold).color(DARK_GREEN))
                .child("Swaccha Andhra Corporation"),
        )
        .item(El::new().s(Width::fill()).child_signal(
            app.session.state.signal().map(|state| state.error.map(login_alert)),
        ))
        .item(field_label("Username"))
        .item(text_field(&form, form.username.clone(), "Enter username", false))
        .item(field_label("Password"))
        .item(text_field(&form, form.password.clone(), "Enter password", true))
        .item(login_button(&form, app))
}

fn field_label(text: &str) -> impl Element + use<> {
    El::new()
        .s(Font::new().size(FONT_SIZE_BODY).weight(FontWeight::Medium).color(TEXT_DARK))
        .child(text.to_string())
}

fn text_field(form: &LoginForm, value: Atom<String>, placeholder: &'static str, password: bool) -> impl Element + use<> {
    let on_enter = form.clone();
    let input = TextInput::new()
        .s(Width::fill())
        .s(Padding::new().x(SPACING_12).y(SPACING_8))
        .s(Borders::all(Border::new().width(1).color(BORDER)))
        .s(RoundedCorners::all(6))
        .s(Font::new().size(FONT_SIZE_BODY).color(TEXT_DARK))
        .label_hidden(placeholder)
        .placeholder(Placeholder::new(placeholder))
        .text_signal(value.signal())
        .on_change(move |text| value.set(text))
        .on_key_down_event(move |event| event.if_key(Key::Enter, || on_enter.submit()));
    if password {
        input.input_type(InputType::password()).unify()
    } else {
        input.input_type(InputType::text()).unify()
    }
}

fn login_button(form: &LoginForm, app: &DashboardApp) -> impl Element + use<> {
    let form = form.clone();
    let pending = app.session.state.signal().map(|state| state.pending);
    Button::new()
        .s(Width::fill())
        .s(Padding::new().y(10))
        .s(RoundedCorners::all(6))
        .s(Background::new().color(DARK_GREEN))
        .s(Font::new().weight(FontWeight::Bold).color(CARD_BG).center())
        .label_signal(pending.map(|pending| if pending { "LOGGING IN..." } else { "LOG IN" }))
        .on_press(move || form.submit())
}

fn login_alert(message: String) -> impl Element {
    El::new()
        .s(Width::fill())
        .s(Padding::all(SPACING_12))
        .s(RoundedCorners::all(6))
        .s(Background::new().color("#fdecea"))
        .s(Font::new().size(FONT_SIZE_BODY).color(ACCENT_ORANGE))
        .child(message)
}
