//! Login panel state

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginPhase {
    /// Only the start button is shown
    #[default]
    Login,
    /// Name and password fields are open
    LoginActive,
    /// A user is logged in
    Logout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    User,
    Password,
}

#[derive(Debug, Default)]
pub struct LoginState {
    pub phase: LoginPhase,
    pub user: String,
    pub password: String,
    pub focus: LoginField,
    /// Last attempt was rejected; cleared by typing
    pub input_wrong: bool,
    pub logged_in_user: Option<String>,
    /// Credentials are being checked
    pub authenticating: bool,
    /// Id of the most recent credential check
    pub attempt: u64,
}

impl LoginState {
    pub fn start(&mut self) {
        if self.phase == LoginPhase::Login {
            self.phase = LoginPhase::LoginActive;
            self.focus = LoginField::User;
        }
    }

    pub fn cancel(&mut self) {
        if self.phase == LoginPhase::LoginActive {
            self.clear_fields();
            self.authenticating = false;
            self.phase = LoginPhase::Login;
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.input_wrong = false;
        match self.focus {
            LoginField::User => self.user.push(c),
            LoginField::Password => self.password.push(c),
        }
    }

    pub fn backspace(&mut self) {
        self.input_wrong = false;
        match self.focus {
            LoginField::User => self.user.pop(),
            LoginField::Password => self.password.pop(),
        };
    }

    pub fn switch_field(&mut self) {
        self.focus = match self.focus {
            LoginField::User => LoginField::Password,
            LoginField::Password => LoginField::User,
        };
    }

    /// Attempt id and credentials to submit, or `None` if a check is
    /// already running
    pub fn begin_authentication(&mut self) -> Option<(u64, String, String)> {
        if self.phase != LoginPhase::LoginActive || self.authenticating {
            return None;
        }
        self.authenticating = true;
        self.attempt += 1;
        Some((self.attempt, self.user.clone(), self.password.clone()))
    }

    /// Whether a result for `attempt` still belongs to the open panel
    pub fn is_current(&self, attempt: u64) -> bool {
        self.authenticating && self.attempt == attempt && self.phase == LoginPhase::LoginActive
    }

    pub fn finish_authentication(&mut self, user: String, accepted: bool) {
        self.authenticating = false;
        if accepted {
            self.clear_fields();
            self.logged_in_user = Some(user);
            self.phase = LoginPhase::Logout;
        } else {
            self.input_wrong = true;
        }
    }

    pub fn logout(&mut self) {
        self.clear_fields();
        self.authenticating = false;
        self.logged_in_user = None;
        self.phase = LoginPhase::Login;
    }

    fn clear_fields(&mut self) {
        self.user.clear();
        self.password.clear();
        self.focus = LoginField::User;
        self.input_wrong = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successful_login_moves_to_logout() {
        let mut login = LoginState::default();
        login.start();
        "Admin".chars().for_each(|c| login.push_char(c));

        let (attempt, user, password) = login.begin_authentication().unwrap();
        assert_eq!((user.as_str(), password.as_str()), ("Admin", ""));
        assert!(login.begin_authentication().is_none());
        assert!(login.is_current(attempt));

        login.finish_authentication(user, true);
        assert_eq!(login.phase, LoginPhase::Logout);
        assert_eq!(login.logged_in_user.as_deref(), Some("Admin"));
        assert!(login.user.is_empty());
    }

    #[test]
    fn test_wrong_input_marker_cleared_by_typing() {
        let mut login = LoginState::default();
        login.start();
        login.push_char('x');
        login.begin_authentication();
        login.finish_authentication("x".into(), false);
        assert!(login.input_wrong);
        assert_eq!(login.phase, LoginPhase::LoginActive);

        login.switch_field();
        login.push_char('p');
        assert!(!login.input_wrong);
        assert_eq!(login.password, "p");
    }

    #[test]
    fn test_logout_returns_to_login() {
        let mut login = LoginState {
            phase: LoginPhase::Logout,
            logged_in_user: Some("Admin".into()),
            ..Default::default()
        };
        login.logout();
        assert_eq!(login.phase, LoginPhase::Login);
        assert!(login.logged_in_user.is_none());
    }

    #[test]
    fn test_cancel_abandons_running_check() {
        let mut login = LoginState::default();
        login.start();
        let (first, _, _) = login.begin_authentication().unwrap();

        login.cancel();
        assert!(!login.authenticating);
        assert!(!login.is_current(first));

        login.start();
        let (second, _, _) = login.begin_authentication().unwrap();
        assert_ne!(first, second);
        assert!(login.is_current(second));
        assert!(!login.is_current(first));
    }
}
