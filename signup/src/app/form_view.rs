use crate::form_fields;
use crossterm::event::{Event, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use signup_core::{validation::ValidationState, Field, SignUpPage};
use tui_input::{backend::crossterm::EventHandler, Input};

form_fields!(Focus {
    FirstName => "First Name *",
    LastName => "Last Name *",
    Email => "Email Address *",
    Phone => "Phone Number *",
    Nic => "Enter NIC *",
    Password => "Password *",
    ConfirmPassword => "Confirm Password *",
    Terms => "Terms",
});

impl Focus {
    /// The form field this focus edits, if it's a text field at all
    fn field(self) -> Option<Field> {
        match self {
            Self::FirstName => Some(Field::FirstName),
            Self::LastName => Some(Field::LastName),
            Self::Email => Some(Field::Email),
            Self::Phone => Some(Field::Phone),
            Self::Nic => Some(Field::Nic),
            Self::Password => Some(Field::Password),
            Self::ConfirmPassword => Some(Field::ConfirmPassword),
            Self::Terms => None,
        }
    }
}

/// Text inputs for the sign-up form. The page owns the values; these keep
/// track of cursors and scrolling.
#[derive(Debug)]
pub struct FormView {
    /// Which field we're editing
    active: Focus,

    /// Given name
    first_name: Input,

    /// Family name
    last_name: Input,

    /// Email address
    email: Input,

    /// Phone number (digits only)
    phone: Input,

    /// NIC
    nic: Input,

    /// What's your password? (Masked unless revealed)
    password: Input,

    /// And again
    confirm_password: Input,
}

impl FormView {
    /// Which field has focus
    pub fn active(&self) -> Focus {
        self.active
    }

    /// The form field with focus, if it's a text field
    pub fn active_field(&self) -> Option<Field> {
        self.active.field()
    }

    /// Move focus forward
    pub fn focus_next(&mut self) {
        self.active = self.active.next();
    }

    /// Move focus back
    pub fn focus_prev(&mut self) {
        self.active = self.active.prev();
    }

    /// The input backing a form field
    fn input(&self, field: Field) -> &Input {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Nic => &self.nic,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
        }
    }

    /// The input backing a form field, mutably
    fn input_mut(&mut self, field: Field) -> &mut Input {
        match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Nic => &mut self.nic,
            Field::Password => &mut self.password,
            Field::ConfirmPassword => &mut self.confirm_password,
        }
    }

    /// Send a keypress to the focused text field and pass the new value on to
    /// the page. The page may normalize the value (phone numbers) or refuse
    /// it (while submitting), so we read it back afterwards.
    pub fn edit(&mut self, page: &mut SignUpPage, key: KeyEvent) {
        let Some(field) = self.active.field() else {
            return;
        };

        let input = self.input_mut(field);
        let changed = input.handle_event(&Event::Key(key));
        if !changed.is_some_and(|changed| changed.value) {
            return;
        }

        page.input(field, input.value());

        let current = page.form().data().get(field);
        if input.value() != current {
            *input = input.clone().with_value(current.to_owned());
        }
    }

    /// Draw the form into the given area
    pub fn render(&self, page: &SignUpPage, area: Rect, frame: &mut Frame<'_>) {
        let rows = Layout::vertical(Constraint::from_lengths([3, 3, 3, 3, 3, 3, 1]));
        let [names_area, email_area, phone_area, nic_area, password_area, confirm_area, terms_area] =
            rows.areas(area);

        let names = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).spacing(1);
        let [first_area, last_area] = names.areas(names_area);

        let validations = page.form().validations();

        for (field, area, validation) in [
            (Field::FirstName, first_area, None),
            (Field::LastName, last_area, None),
            (Field::Email, email_area, Some(&validations.email)),
            (Field::Phone, phone_area, Some(&validations.phone)),
            (Field::Nic, nic_area, None),
            (
                Field::Password,
                password_area,
                Some(&validations.password_strength),
            ),
            (
                Field::ConfirmPassword,
                confirm_area,
                Some(&validations.password_match),
            ),
        ] {
            self.render_input(page, field, area, validation, frame);
        }

        let checkbox = if page.agreed_to_terms() { "[x]" } else { "[ ]" };
        let mut terms = Line::from(format!(
            "{checkbox} I agree to the Terms of Service and Privacy Policy"
        ));
        if matches!(self.active, Focus::Terms) {
            terms = terms.bold().fg(Color::Blue);
        }
        frame.render_widget(Paragraph::new(terms), terms_area);
    }

    /// Draw one text field, with its validation message (if the user has
    /// touched it) along the bottom border.
    #[expect(clippy::cast_possible_truncation)]
    fn render_input(
        &self,
        page: &SignUpPage,
        field: Field,
        area: Rect,
        validation: Option<&ValidationState>,
        frame: &mut Frame<'_>,
    ) {
        let input = self.input(field);
        let focus = focus_for(field);
        let is_active = self.active == focus;

        let width = area.width.saturating_sub(2 + 1); // 2 for the border, 1 for the cursor
        let input_scroll = input.visual_scroll(width as usize);

        let shown = if page.is_revealed(field) {
            input.value().to_owned()
        } else {
            "*".repeat(input.value().chars().count())
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .title(focus.label())
            .border_style(Style::default().fg(border_color(validation)));

        if let Some(state) = validation.filter(|state| state.is_touched) {
            let message = Line::from(state.message).fg(border_color(Some(state)));
            block = block.title_bottom(message);
        }

        let mut paragraph = Paragraph::new(shown)
            .scroll((0, input_scroll as u16))
            .block(block);
        if is_active {
            paragraph = paragraph.bold();
        }

        frame.render_widget(paragraph, area);

        if is_active {
            frame.set_cursor_position((
                area.x
                    + (input.visual_cursor().max(input_scroll) - input_scroll) as u16 // current end of text
                    + 1, // just past the end of the text
                area.y + 1, // +1 row for the border/title
            ));
        }
    }
}

impl Default for FormView {
    fn default() -> Self {
        Self {
            active: Focus::FirstName,
            first_name: Input::default(),
            last_name: Input::default(),
            email: Input::default(),
            phone: Input::default(),
            nic: Input::default(),
            password: Input::default(),
            confirm_password: Input::default(),
        }
    }
}

/// The focus position for a form field
fn focus_for(field: Field) -> Focus {
    match field {
        Field::FirstName => Focus::FirstName,
        Field::LastName => Focus::LastName,
        Field::Email => Focus::Email,
        Field::Phone => Focus::Phone,
        Field::Nic => Focus::Nic,
        Field::Password => Focus::Password,
        Field::ConfirmPassword => Focus::ConfirmPassword,
    }
}

/// Green for good, red for bad, blue if we haven't checked yet
fn border_color(validation: Option<&ValidationState>) -> Color {
    match validation {
        Some(state) if state.is_touched && state.is_valid => Color::Green,
        Some(state) if state.is_touched => Color::Red,
        _ => Color::Blue,
    }
}
