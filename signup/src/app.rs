/// Things that can happen to the app
mod action;
pub use action::Action;

/// Side effects the app asks the shell to perform
mod effect;
pub use effect::{Effect, EffectContext};

/// Text inputs and focus for the form
mod form_view;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use form_view::{Focus, FormView};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    style::{Color, Stylize},
    text::Line,
    widgets::Paragraph,
    Frame,
};
use signup_core::{Notification, Outcome, Route, SignUpPage};
use std::process::ExitCode;

/// Shown when the user tries to leave mid-request
const STILL_SIGNING_UP: &str = "Still signing you up. Try again once it finishes.";

/// The "functional core" of the app.
#[derive(Debug)]
pub struct App {
    /// The page state: form, loading flags, inline error
    page: SignUpPage,

    /// Inputs and focus
    view: FormView,

    /// The latest notification (shown above the status line)
    toast: Option<Notification>,

    /// Status to display (visible at the bottom of the screen)
    status_line: Option<String>,

    /// Where the app is in its lifecycle
    state: AppState,
}

impl App {
    /// Create a new instance of the app
    pub fn new() -> Self {
        Self {
            page: SignUpPage::new(),
            view: FormView::default(),
            toast: None,
            status_line: None,
            state: AppState::Running,
        }
    }

    /// Render the app's UI to the screen
    pub fn render(&mut self, frame: &mut Frame) {
        let vertical = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ]);
        let [body_area, toast_area, status_area] = vertical.areas(frame.area());

        let column = Layout::horizontal([Constraint::Max(72)]).flex(Flex::Center);
        let [column_area] = column.areas(body_area);

        let rows = Layout::vertical([
            Constraint::Length(1), // title
            Constraint::Length(1), // google
            Constraint::Length(1), // inline error
            Constraint::Length(19), // form
            Constraint::Length(1), // submit
            Constraint::Length(1), // sign in instead
        ])
        .flex(Flex::Center);
        let [title_area, google_area, error_area, form_area, submit_area, login_area] =
            rows.areas(column_area);

        frame.render_widget(
            Paragraph::new(Line::from("Create Account").bold()).centered(),
            title_area,
        );

        let google = if self.page.is_google_loading() {
            Line::from("Signing Up…").fg(Color::DarkGray)
        } else {
            Line::from("ctrl-g  Sign up with Google")
        };
        frame.render_widget(Paragraph::new(google).centered(), google_area);

        if let Some(error) = self.page.error() {
            frame.render_widget(Paragraph::new(Line::from(error).fg(Color::Red)), error_area);
        }

        self.view.render(&self.page, form_area, frame);

        let submit = if self.page.is_loading() {
            Line::from("Creating Account…").fg(Color::DarkGray)
        } else {
            Line::from("enter  Create Account").bold()
        };
        frame.render_widget(Paragraph::new(submit).centered(), submit_area);

        frame.render_widget(
            Paragraph::new("Already have an account? ctrl-l to sign in").centered(),
            login_area,
        );

        if let Some(toast) = &self.toast {
            let color = if toast.is_destructive() {
                Color::Red
            } else {
                Color::Green
            };
            let line = Line::from(format!("{}: {}", toast.title, toast.description)).fg(color);
            frame.render_widget(Paragraph::new(line), toast_area);
        }

        let status = Paragraph::new(match &self.status_line {
            Some(line) => line.as_str(),
            None => "tab/shift-tab move · space toggles terms · ctrl-r show password · esc quit",
        });

        frame.render_widget(status, status_area);
    }

    /// Handle an `Action`, updating the app's state and producing some side effect(s)
    pub fn handle(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::Key(key) => self.handle_key(key),
            Action::SignedUp { email, result } => {
                let outcome = self.page.finish_submit(&email, result);
                self.settle(outcome)
            }
            Action::SignedUpWithGoogle(result) => {
                let outcome = self.page.finish_google(result);
                self.settle(outcome)
            }
            Action::Problem(problem) => {
                self.status_line = Some(problem);

                vec![]
            }
        }
    }

    /// Handle a keypress
    fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        if key.kind != KeyEventKind::Press || self.should_exit().is_some() {
            return vec![];
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => self.leave(None),
            KeyCode::Char('c') if ctrl => self.leave(None),
            KeyCode::Char('l') if ctrl => self.leave(Some(SignUpPage::sign_in_instead())),
            KeyCode::Char('g') if ctrl => {
                if self.page.begin_google() {
                    vec![Effect::SignUpWithGoogle]
                } else {
                    vec![]
                }
            }
            KeyCode::Char('r') if ctrl => {
                if let Some(field) = self.view.active_field() {
                    self.page.toggle_reveal(field);
                }

                vec![]
            }
            KeyCode::Enter => match self.page.begin_submit() {
                Some(req) => vec![Effect::SignUp(req)],
                None => vec![],
            },
            KeyCode::Tab => {
                self.view.focus_next();

                vec![]
            }
            KeyCode::BackTab => {
                self.view.focus_prev();

                vec![]
            }
            KeyCode::Char(' ') if matches!(self.view.active(), Focus::Terms) => {
                self.page.toggle_terms();

                vec![]
            }
            _ => {
                self.view.edit(&mut self.page, key);

                vec![]
            }
        }
    }

    /// Exit at the user's request, unless we're still waiting on the auth
    /// provider.
    fn leave(&mut self, route: Option<Route>) -> Vec<Effect> {
        if self.page.is_loading() || self.page.is_google_loading() {
            self.status_line = Some(STILL_SIGNING_UP.to_string());

            return vec![];
        }

        self.exit(route)
    }

    /// Show the outcome of a sign-up attempt, and leave if it tells us to.
    fn settle(&mut self, outcome: Outcome) -> Vec<Effect> {
        self.toast = Some(outcome.notification.clone());
        if self.status_line.as_deref() == Some(STILL_SIGNING_UP) {
            self.status_line = None;
        }

        let mut effects = vec![Effect::Notify(outcome.notification)];
        if let Some(route) = outcome.navigate {
            effects.extend(self.exit(Some(route)));
        }

        effects
    }

    /// Wrap up, optionally handing the user off somewhere else.
    fn exit(&mut self, route: Option<Route>) -> Vec<Effect> {
        tracing::info!(?route, "exiting");
        self.state = AppState::Exiting(ExitCode::SUCCESS, route);

        vec![]
    }

    /// Let the TUI manager know whether we're all wrapped up and can exit.
    pub fn should_exit(&self) -> Option<ExitCode> {
        if let AppState::Exiting(code, _) = &self.state {
            Some(*code)
        } else {
            None
        }
    }

    /// Where the user should go once we've exited, if anywhere.
    pub fn handoff(&self) -> Option<&Route> {
        if let AppState::Exiting(_, route) = &self.state {
            route.as_ref()
        } else {
            None
        }
    }
}

/// App lifecycle
#[derive(Debug)]
enum AppState {
    /// Filling in the form
    Running,

    /// We're done and want the following exit code after final effects, then
    /// to send the user to the given route.
    Exiting(ExitCode, Option<Route>),
}

#[cfg(test)]
mod test {
    use super::*;
    use signup_core::auth;

    /// A keypress with no modifiers
    fn key(code: KeyCode) -> Action {
        Action::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    /// A keypress with control held
    fn ctrl(c: char) -> Action {
        Action::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    /// Type into the focused field
    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle(key(KeyCode::Char(c)));
        }
    }

    /// An app with every field filled in validly and the terms accepted
    fn filled() -> App {
        let mut app = App::new();
        for value in [
            "Ada",
            "Lovelace",
            "ada@example.com",
            "0771234567",
            "200322700285",
            "Abc123!@",
            "Abc123!@",
        ] {
            type_str(&mut app, value);
            app.handle(key(KeyCode::Tab));
        }
        app.handle(key(KeyCode::Char(' ')));
        app
    }

    #[test]
    fn enter_on_empty_form_shows_first_problem() {
        let mut app = App::new();

        let effects = app.handle(key(KeyCode::Enter));

        assert!(effects.is_empty());
        assert_eq!(app.page.error(), Some("First name is required"));
    }

    #[test]
    fn enter_on_filled_form_signs_up() {
        let mut app = filled();

        let effects = app.handle(key(KeyCode::Enter));

        assert!(matches!(
            effects.as_slice(),
            [Effect::SignUp(req)] if req.email == "ada@example.com" && req.phone == "0771234567"
        ));
        assert!(app.page.is_loading());
    }

    #[test]
    fn second_enter_while_loading_does_nothing() {
        let mut app = filled();
        app.handle(key(KeyCode::Enter));

        assert!(app.handle(key(KeyCode::Enter)).is_empty());
    }

    #[test]
    fn successful_sign_up_hands_off_to_verify_email() {
        let mut app = filled();
        app.handle(key(KeyCode::Enter));

        let effects = app.handle(Action::SignedUp {
            email: "ada@example.com".to_string(),
            result: Ok(()),
        });

        assert!(matches!(effects.as_slice(), [Effect::Notify(_)]));
        assert_eq!(app.should_exit(), Some(ExitCode::SUCCESS));
        assert_eq!(
            app.handoff(),
            Some(&Route::VerifyEmail {
                email: "ada@example.com".to_string()
            })
        );
    }

    #[test]
    fn failed_sign_up_stays_on_form() {
        let mut app = filled();
        app.handle(key(KeyCode::Enter));

        app.handle(Action::SignedUp {
            email: "ada@example.com".to_string(),
            result: Err(auth::Error::Client("Email already in use".to_string())),
        });

        assert_eq!(app.should_exit(), None);
        assert_eq!(app.page.error(), Some("Email already in use"));
        assert!(app.toast.as_ref().is_some_and(Notification::is_destructive));
        assert!(!app.page.is_loading());
    }

    #[test]
    fn ctrl_g_signs_up_with_google_once() {
        let mut app = App::new();

        assert!(matches!(
            app.handle(ctrl('g')).as_slice(),
            [Effect::SignUpWithGoogle]
        ));
        assert!(app.handle(ctrl('g')).is_empty());
    }

    #[test]
    fn google_success_goes_to_onboarding() {
        let mut app = App::new();
        app.handle(ctrl('g'));

        app.handle(Action::SignedUpWithGoogle(Ok(())));

        assert_eq!(app.handoff(), Some(&Route::Onboarding));
    }

    #[test]
    fn ctrl_l_goes_to_login() {
        let mut app = App::new();

        app.handle(ctrl('l'));

        assert_eq!(app.handoff(), Some(&Route::Login));
    }

    #[test]
    fn escape_quits_without_handoff() {
        let mut app = App::new();

        app.handle(key(KeyCode::Esc));

        assert_eq!(app.should_exit(), Some(ExitCode::SUCCESS));
        assert_eq!(app.handoff(), None);
    }

    #[test]
    fn quitting_waits_for_sign_up_to_finish() {
        let mut app = filled();
        app.handle(key(KeyCode::Enter));

        app.handle(key(KeyCode::Esc));
        app.handle(ctrl('c'));

        assert_eq!(app.should_exit(), None);
        assert_eq!(app.status_line.as_deref(), Some(STILL_SIGNING_UP));

        app.handle(Action::SignedUp {
            email: "ada@example.com".to_string(),
            result: Err(auth::Error::Server),
        });
        assert_eq!(app.status_line, None);

        app.handle(key(KeyCode::Esc));
        assert_eq!(app.should_exit(), Some(ExitCode::SUCCESS));
    }

    #[test]
    fn going_to_login_waits_for_google_sign_up() {
        let mut app = App::new();
        app.handle(ctrl('g'));

        app.handle(ctrl('l'));

        assert_eq!(app.should_exit(), None);

        app.handle(Action::SignedUpWithGoogle(Ok(())));

        assert_eq!(app.handoff(), Some(&Route::Onboarding));
    }

    #[test]
    fn space_only_toggles_terms_when_focused() {
        let mut app = App::new();

        app.handle(key(KeyCode::Char(' ')));
        assert!(!app.page.agreed_to_terms());
        assert_eq!(app.page.form().data().first_name, " ");

        app.handle(key(KeyCode::BackTab));
        app.handle(key(KeyCode::Char(' ')));
        assert!(app.page.agreed_to_terms());
    }

    #[test]
    fn ctrl_r_reveals_focused_password() {
        let mut app = App::new();
        for _ in 0..5 {
            app.handle(key(KeyCode::Tab));
        }

        app.handle(ctrl('r'));

        assert!(app.page.is_revealed(signup_core::Field::Password));
        assert!(!app.page.is_revealed(signup_core::Field::ConfirmPassword));
    }

    #[test]
    fn problems_go_to_the_status_line() {
        let mut app = App::new();

        app.handle(Action::Problem("oh no".to_string()));

        assert_eq!(app.status_line.as_deref(), Some("oh no"));
    }
}
